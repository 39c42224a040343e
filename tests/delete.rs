use std::error::Error;

use stalecheck::errors::StalecheckError;
use stalecheck::{delete_files, file_globber};
use stalecheck_test_utils::builders::FileTree;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn deletes_exactly_what_file_globber_reports() -> TestResult {
    let tree = FileTree::new();
    tree.file("out/a.o", 1);
    tree.file("out/b.o", 2);
    tree.file("out/keep.c", 3);
    tree.dir("out/objs.o");
    tree.file("out/objs.o/inner.o", 4);

    let globs = tree.glob("out/*.o");
    let targets = file_globber(&globs)?;
    assert_eq!(targets, vec![tree.path("out/a.o"), tree.path("out/b.o")]);

    delete_files(&globs)?;

    for path in &targets {
        assert!(!path.exists(), "{path:?} should be gone");
    }
    assert!(tree.path("out/keep.c").exists());
    assert!(tree.path("out/objs.o").is_dir());
    assert!(tree.path("out/objs.o/inner.o").exists());
    assert!(file_globber(&globs)?.is_empty());
    Ok(())
}

#[test]
fn deleting_nothing_is_fine() -> TestResult {
    let tree = FileTree::new();
    delete_files(&tree.glob("out/*.o"))?;
    delete_files("")?;
    Ok(())
}

#[test]
fn escaped_comma_deletes_a_single_file() -> TestResult {
    let tree = FileTree::new();
    tree.file("a,b.txt", 1);
    tree.file("a", 1);
    tree.file("b.txt", 1);

    delete_files(&format!(r"{}\,b.txt", tree.glob("a")))?;

    assert!(!tree.path("a,b.txt").exists());
    assert!(tree.path("a").exists());
    assert!(tree.path("b.txt").exists());
    Ok(())
}

#[test]
fn relative_pattern_has_no_side_effects() -> TestResult {
    let tree = FileTree::new();
    tree.file("a.o", 1);

    let result = delete_files(&format!("{}, build/*.o", tree.glob("*.o")));
    assert!(matches!(result, Err(StalecheckError::ConfigError(_))));
    assert!(tree.path("a.o").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn removal_failure_is_reported_with_its_path() -> TestResult {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = FileTree::new();
    let victim = tree.file("locked/a.o", 1);
    let dir = tree.path("locked");
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555))?;

    // Root ignores directory write permission; nothing to assert then.
    let probe = dir.join(".probe");
    if fs::write(&probe, b"").is_ok() {
        fs::remove_file(&probe)?;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let result = delete_files(&tree.glob("locked/*.o"));
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755))?;

    match result {
        Err(StalecheckError::FilesystemError { path, .. }) => assert_eq!(path, victim),
        other => panic!("expected FilesystemError, got {other:?}"),
    }
    assert!(victim.exists());
    Ok(())
}

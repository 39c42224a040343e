use proptest::prelude::*;

use stalecheck::errors::StalecheckError;
use stalecheck::glob::{join_glob_list, parse_glob_list, split_glob_list, PathGlob};

#[test]
fn unescaped_commas_separate_patterns() {
    assert_eq!(
        split_glob_list("/tmp/a.txt,/tmp/b.txt"),
        vec!["/tmp/a.txt", "/tmp/b.txt"]
    );
}

#[test]
fn escaped_comma_stays_inside_one_pattern() {
    assert_eq!(split_glob_list(r"/tmp/a\,b.txt"), vec!["/tmp/a,b.txt"]);
    assert_eq!(
        split_glob_list(r"/tmp/a\,b.txt, /tmp/c.txt"),
        vec!["/tmp/a,b.txt", "/tmp/c.txt"]
    );
}

#[test]
fn patterns_are_trimmed_and_empty_segments_dropped() {
    assert_eq!(
        split_glob_list("  /in/*.csv ,\t/in/x.csv\n, ,"),
        vec!["/in/*.csv", "/in/x.csv"]
    );
    assert!(split_glob_list("").is_empty());
    assert!(split_glob_list("   ").is_empty());
    assert!(split_glob_list(",,").is_empty());
}

#[test]
fn other_backslashes_are_kept_for_the_glob_engine() {
    assert_eq!(split_glob_list(r"/tmp/\*.txt"), vec![r"/tmp/\*.txt"]);
}

#[test]
fn join_escapes_commas_in_items() {
    assert_eq!(
        join_glob_list(&["/tmp/a,b.txt", "/tmp/c.txt"]),
        r"/tmp/a\,b.txt,/tmp/c.txt"
    );
}

#[test]
fn relative_pattern_is_a_config_error() {
    match PathGlob::parse("relative/path/*.txt") {
        Err(StalecheckError::ConfigError(msg)) => {
            assert!(msg.contains("relative/path/*.txt"));
            assert!(msg.contains("not an absolute path"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn one_relative_pattern_rejects_the_whole_list() {
    let result = parse_glob_list("/tmp/*.txt, *.txt");
    assert!(matches!(result, Err(StalecheckError::ConfigError(_))));
}

#[test]
fn root_has_no_filename_segment() {
    assert!(matches!(
        PathGlob::parse("/"),
        Err(StalecheckError::InvalidPattern { .. })
    ));
}

#[test]
fn unclosed_class_matches_literally() {
    let glob = PathGlob::parse("/tmp/a[1.txt").unwrap();
    assert!(glob.matches_name("a[1.txt".as_ref()));
    assert!(!glob.matches_name("a1.txt".as_ref()));
}

#[test]
fn braces_are_not_alternation() {
    let glob = PathGlob::parse("/out/report{v1,v2}.csv").unwrap();
    assert!(glob.matches_name("report{v1,v2}.csv".as_ref()));
    assert!(!glob.matches_name("reportv1.csv".as_ref()));

    // Inside a class a brace is just a member.
    let class = PathGlob::parse("/out/x[{].csv").unwrap();
    assert!(class.matches_name("x{.csv".as_ref()));

    let after_wildcard = PathGlob::parse("/out/*{v1}.csv").unwrap();
    assert!(after_wildcard.matches_name("report{v1}.csv".as_ref()));
}

#[test]
fn reversed_range_is_an_invalid_pattern() {
    match PathGlob::parse("/tmp/[z-a].txt") {
        Err(StalecheckError::InvalidPattern { pattern, .. }) => {
            assert_eq!(pattern, "/tmp/[z-a].txt");
        }
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn directory_part_is_literal() {
    let glob = PathGlob::parse("/data/*/in/?.csv").unwrap();
    assert_eq!(glob.dir(), std::path::Path::new("/data/*/in"));
    assert!(glob.matches_name("a.csv".as_ref()));
    assert!(!glob.matches_name("ab.csv".as_ref()));
}

#[test]
fn filename_wildcards() {
    let star = PathGlob::parse("/d/*.csv").unwrap();
    assert!(star.matches_name("x.csv".as_ref()));
    assert!(star.matches_name(".hidden.csv".as_ref()));
    assert!(!star.matches_name("x.csv.bak".as_ref()));

    let class = PathGlob::parse("/d/file[0-2].txt").unwrap();
    assert!(class.matches_name("file1.txt".as_ref()));
    assert!(!class.matches_name("file3.txt".as_ref()));

    let negated = PathGlob::parse("/d/file[!0-2].txt").unwrap();
    assert!(negated.matches_name("file3.txt".as_ref()));
    assert!(!negated.matches_name("file1.txt".as_ref()));
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    // No backslashes: a trailing `\` would escape the joining comma.
    "/[a-z,. *?]{0,12}[a-z*]"
}

proptest! {
    #[test]
    fn split_recovers_joined_patterns(patterns in proptest::collection::vec(pattern_strategy(), 0..6)) {
        let expected: Vec<String> = patterns
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        prop_assert_eq!(split_glob_list(&join_glob_list(&patterns)), expected);
    }

    #[test]
    fn split_never_yields_blank_or_untrimmed_patterns(list in ".{0,40}") {
        for p in split_glob_list(&list) {
            prop_assert!(!p.is_empty());
            prop_assert_eq!(p.trim(), p.as_str());
        }
    }
}

// src/glob/pattern.rs

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{Result, StalecheckError};

/// One absolute glob pattern, split into a literal directory and a
/// single-segment filename pattern.
///
/// `/data/in/*.csv` becomes directory `/data/in` and pattern `*.csv`.
/// Wildcards in the directory part are not expanded.
#[derive(Clone)]
pub struct PathGlob {
    raw: String,
    dir: PathBuf,
    matcher: GlobMatcher,
}

impl fmt::Debug for PathGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathGlob")
            .field("dir", &self.dir)
            .field("name", &self.matcher.glob().glob())
            .finish()
    }
}

impl fmt::Display for PathGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PathGlob {
    /// Parse a single (already split and trimmed) pattern.
    ///
    /// Fails with [`StalecheckError::ConfigError`] when the pattern is
    /// relative, and with [`StalecheckError::InvalidPattern`] when it has no
    /// filename segment or globset rejects it (e.g. a reversed range `[z-a]`).
    /// An unclosed `[` and braces match literally.
    pub fn parse(pattern: &str) -> Result<Self> {
        let path = Path::new(pattern);
        if !path.is_absolute() {
            return Err(StalecheckError::ConfigError(format!(
                "{pattern} is not an absolute path"
            )));
        }

        let (dir, name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir, name.to_string_lossy()),
            _ => {
                return Err(StalecheckError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "no filename segment to match".to_string(),
                });
            }
        };

        let glob = GlobBuilder::new(&escape_braces(&name))
            .literal_separator(true)
            .backslash_escape(true)
            .allow_unclosed_class(true)
            .build()
            .map_err(|e| StalecheckError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            raw: pattern.to_string(),
            dir: dir.to_path_buf(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Directory whose entries the filename pattern is matched against.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a directory entry name matches the filename pattern.
    pub fn matches_name(&self, name: &OsStr) -> bool {
        self.matcher.is_match(Path::new(name))
    }
}

/// Escape `{` and `}` outside character classes. Only `*`, `?` and classes
/// are wildcards; braces are ordinary filename characters.
fn escape_braces(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                out.push('\\');
                if let Some(&next) = chars.get(i + 1) {
                    out.push(next);
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end;
                }
                None => out.push('['),
            },
            c @ ('{' | '}') => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `start`. A `]` right after
/// `[`, `[!` or `[^` is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if matches!(chars.get(i), Some('!' | '^')) {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    let rest = chars.get(i..)?;
    rest.iter().position(|&c| c == ']').map(|p| i + p)
}

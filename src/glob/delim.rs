// src/glob/delim.rs

//! Splitting and joining comma-delimited glob lists.
//!
//! A list looks like `"/in/*.csv, /in/extra.csv"`. A comma preceded by a
//! backslash belongs to the pattern: `"/tmp/a\,b.txt"` is the single pattern
//! `/tmp/a,b.txt`.

pub const DELIM: char = ',';
const ESCAPE: char = '\\';

/// Split a glob list on unescaped commas.
///
/// Each pattern is trimmed; empty segments are dropped, so `""` and `" , "`
/// both yield no patterns. The backslash of an escaped comma is removed,
/// every other backslash is kept for the glob engine.
pub fn split_glob_list(list: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut current = String::new();
    let mut chars = list.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE if chars.peek() == Some(&DELIM) => {
                current.push(DELIM);
                chars.next();
            }
            DELIM => {
                push_trimmed(&mut patterns, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_trimmed(&mut patterns, &current);

    patterns
}

/// Join single patterns into one glob list, escaping their commas.
pub fn join_glob_list<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(|p| p.as_ref().replace(DELIM, "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

fn push_trimmed(patterns: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        patterns.push(trimmed.to_string());
    }
}

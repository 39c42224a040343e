// src/glob/mod.rs

//! Glob-list resolution.
//!
//! This module is responsible for:
//! - Splitting a comma-delimited glob list (with `\,` escapes).
//! - Parsing each pattern into a literal directory and a filename glob.
//! - Expanding the patterns against the filesystem, keeping regular files.
//!
//! It knows nothing about freshness rules or deletion.

pub mod delim;
pub mod pattern;
pub mod resolve;

pub use delim::{join_glob_list, split_glob_list};
pub use pattern::PathGlob;
pub use resolve::{matched_paths, mod_times, parse_glob_list, resolve, MatchedFile};

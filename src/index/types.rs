use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Unique identifier for a file within one index
pub type FileId = u32;

/// Number of characters in a trigram
pub const TRIGRAM_LEN: usize = 3;

/// A trigram is 3 consecutive characters taken from a single line.
///
/// Characters are Unicode scalar values and comparison is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Trigram([char; TRIGRAM_LEN]);

impl Trigram {
    #[inline]
    pub const fn new(a: char, b: char, c: char) -> Self {
        Self([a, b, c])
    }

    #[inline]
    pub fn chars(&self) -> [char; TRIGRAM_LEN] {
        self.0
    }
}

impl FromStr for Trigram {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), Some(c), None) => Ok(Trigram::new(a, b, c)),
            _ => Err(Error::InvalidTrigram(s.to_string())),
        }
    }
}

impl fmt::Display for Trigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

/// Configuration for the indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Worker threads for tokenization (0 = one per core)
    pub threads: usize,
    /// Files larger than this are skipped (no limit by default)
    pub max_file_size: u64,
    /// Descend into hidden files and directories
    pub include_hidden: bool,
    /// Honor .gitignore / .ignore files while walking
    pub respect_ignore_files: bool,
    pub follow_links: bool,
    /// Draw a progress bar on stderr
    pub progress: bool,
    /// Minimum percentage advance between progress redraws
    pub progress_step: u8,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_file_size: u64::MAX,
            include_hidden: true,
            respect_ignore_files: false,
            follow_links: false,
            progress: true,
            progress_step: 3,
        }
    }
}

impl IndexConfig {
    /// Config for embedding and tests: no progress bar
    pub fn quiet() -> Self {
        Self {
            progress: false,
            ..Self::default()
        }
    }
}

/// Why a file was left out of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be opened or read
    Unreadable,
    /// Content is not valid UTF-8
    InvalidUtf8,
    /// Content exceeds `IndexConfig::max_file_size`
    TooLarge,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Unreadable => "unreadable",
            SkipReason::InvalidUtf8 => "not valid UTF-8",
            SkipReason::TooLarge => "too large",
        };
        f.write_str(reason)
    }
}

/// Result of running one tokenization unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// File was indexed; `trigrams` distinct trigrams were inserted
    Indexed { trigrams: usize },
    Skipped(SkipReason),
    /// Cancellation was observed before the file was finished
    Cancelled,
}

/// Statistics gathered while building an index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub files_discovered: usize,
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub trigrams: usize,
    pub elapsed: Duration,
}

/// Search match result: the first line of `path` containing the query
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SearchResult {
    pub path: PathBuf,
    /// 1-based
    pub line_number: u32,
}

impl SearchResult {
    pub fn new(path: impl Into<PathBuf>, line_number: u32) -> Self {
        Self {
            path: path.into(),
            line_number,
        }
    }
}

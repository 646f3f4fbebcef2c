//! # trigrep - In-memory trigram search
//!
//! trigrep indexes the text files of a directory tree into a trigram
//! (3-character substring) index, then answers literal substring queries
//! with the file and 1-based line number of the first match.
//!
//! ## Architecture
//!
//! - [`index`] - Directory walk, concurrent tokenization, cancellation, progress
//! - [`query`] - Trigram candidate filtering and line verification
//! - [`output`] - Result formatting for the CLI
//! - [`utils`] - Trigram extraction and the progress bar shim
//!
//! ## Quick Start
//!
//! ```no_run
//! use trigrep::index::IndexBuilder;
//! use trigrep::query::search;
//!
//! let index = IndexBuilder::new("/path/to/codebase").build()?;
//!
//! for result in search("fn main", &index)? {
//!     println!("{}:{}", result.path.display(), result.line_number);
//! }
//! # Ok::<(), trigrep::Error>(())
//! ```
//!
//! ## How it works
//!
//! 1. **Build** - every line of every UTF-8 file is split into overlapping
//!    trigrams, recorded in a concurrent trigram -> file-set table.
//! 2. **Filter** - the query's trigrams are looked up and their file sets
//!    intersected; files missing any trigram are excluded without disk access.
//! 3. **Verify** - the surviving candidates are scanned line by line in
//!    parallel to drop false positives.
//!
//! The index lives in memory only and is rebuilt on every run.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{Error, Result};
pub use index::{CancelToken, Index, IndexBuilder, IndexConfig, SearchResult};
pub use query::{SearchQueryExecutor, search};

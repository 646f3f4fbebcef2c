//! Utility functions shared by the indexer and the query executor.
//!
//! ## Modules
//!
//! - [`progress`] - Progress bar abstraction (no-op without the `progress` feature)
//! - [`trigram`] - Trigram extraction for lines and queries
//!
//! ```no_run
//! use trigrep::utils::{line_trigrams, query_trigrams};
//!
//! // Every trigram of one line, in order
//! let trigrams: Vec<_> = line_trigrams("hello world").collect();
//! // Returns: ["hel", "ell", "llo", "lo ", ...]
//!
//! // Sorted, deduplicated trigrams of a query
//! let lookup = query_trigrams("world");
//! ```

pub mod progress;
pub mod trigram;

pub use trigram::*;

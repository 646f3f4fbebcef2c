use crate::error::Result;
use crate::index::table::IndexTable;
use crate::index::types::{BuildStats, FileId, Trigram};
use ahash::AHashMap;
use roaring::RoaringBitmap;
use std::path::{Path, PathBuf};

/// Immutable result of a completed build.
///
/// Holds the trigram postings and the FileId -> path table. Nothing can be
/// mutated after construction, so an `Index` can be shared across threads
/// (by reference or in an `Arc`) without further locking.
#[derive(Debug)]
pub struct Index {
    postings: AHashMap<Trigram, RoaringBitmap>,
    files: Vec<PathBuf>,
    stats: BuildStats,
}

impl Index {
    pub(crate) fn new(table: IndexTable, files: Vec<PathBuf>, stats: BuildStats) -> Self {
        Self {
            postings: table.freeze(),
            files,
            stats,
        }
    }

    /// Files containing `trigram`.
    ///
    /// Fails with [`Error::InvalidTrigram`](crate::Error::InvalidTrigram)
    /// unless `trigram` is exactly 3 characters. An unknown trigram yields an
    /// empty set.
    pub fn get_documents(&self, trigram: &str) -> Result<RoaringBitmap> {
        let trigram: Trigram = trigram.parse()?;
        Ok(self.documents(trigram).cloned().unwrap_or_default())
    }

    /// Posting set for a trigram, if any file contains it
    pub fn documents(&self, trigram: Trigram) -> Option<&RoaringBitmap> {
        self.postings.get(&trigram)
    }

    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.files.get(file as usize).map(PathBuf::as_path)
    }

    /// Every enumerated file, indexed by FileId (skipped files included)
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn trigram_count(&self) -> usize {
        self.postings.len()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}

use crate::index::types::{FileId, Trigram};
use ahash::{AHashMap, RandomState};
use dashmap::DashMap;
use roaring::RoaringBitmap;

/// Trigram -> set of files, written concurrently while building.
///
/// Inserts are commutative and idempotent, so the only synchronization needed
/// is the per-shard locking DashMap already does. No ordering across keys is
/// required.
pub struct IndexTable {
    postings: DashMap<Trigram, RoaringBitmap, RandomState>,
}

impl Default for IndexTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexTable {
    pub fn new() -> Self {
        Self {
            postings: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Record that `file` contains `trigram`
    pub fn insert(&self, trigram: Trigram, file: FileId) {
        self.postings.entry(trigram).or_default().insert(file);
    }

    /// Record every trigram in `trigrams` for `file`
    pub fn insert_all(&self, trigrams: impl IntoIterator<Item = Trigram>, file: FileId) {
        for trigram in trigrams {
            self.insert(trigram, file);
        }
    }

    /// Number of distinct trigrams
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Consume the table into a plain map for read-only use
    pub(crate) fn freeze(self) -> AHashMap<Trigram, RoaringBitmap> {
        self.postings.into_iter().collect()
    }
}

use crate::error::{Error, Result};
use crate::index::snapshot::Index;
use crate::index::tokenizer::read_text;
use crate::index::types::{FileId, SearchResult, TRIGRAM_LEN};
use crate::utils::query_trigrams;
use memchr::memmem::Finder;
use rayon::prelude::*;
use roaring::RoaringBitmap;
use std::path::Path;
use tracing::{debug, warn};

/// Query executor
///
/// Narrows the file set with trigram postings, then confirms each candidate by
/// scanning its lines. The trigram filter can yield false positives (all
/// trigrams present, but not contiguously); verification removes them.
pub struct SearchQueryExecutor<'a> {
    index: &'a Index,
}

impl<'a> SearchQueryExecutor<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self { index }
    }

    /// Execute a query and return the first matching line of every file,
    /// sorted by path.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let candidates = self.candidates(query)?;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut results = self.verify_candidates(&candidates, query);
        results.sort_unstable();

        debug!(
            "Query {:?}: {} candidates, {} matches",
            query,
            candidates.len(),
            results.len()
        );
        Ok(results)
    }

    /// Execute the narrowing phase: intersect the postings of every query
    /// trigram, smallest set first.
    pub fn candidates(&self, query: &str) -> Result<RoaringBitmap> {
        if query.chars().count() < TRIGRAM_LEN {
            return Err(Error::InvalidQuery(query.to_string()));
        }

        let mut postings = Vec::new();
        for trigram in query_trigrams(query) {
            match self.index.documents(trigram) {
                Some(docs) => postings.push(docs),
                // A missing trigram rules out every file
                None => return Ok(RoaringBitmap::new()),
            }
        }

        postings.sort_by_key(|docs| docs.len());

        let mut iter = postings.into_iter();
        let mut result = iter.next().cloned().unwrap_or_default();
        for docs in iter {
            if result.is_empty() {
                break;
            }
            result &= docs;
        }
        Ok(result)
    }

    /// Verify candidates against actual file content
    fn verify_candidates(&self, candidates: &RoaringBitmap, query: &str) -> Vec<SearchResult> {
        let finder = Finder::new(query.as_bytes());
        let ids: Vec<FileId> = candidates.iter().collect();

        ids.par_iter()
            .filter_map(|&id| {
                let path = self.index.path(id)?;
                let line_number = first_matching_line(path, &finder)?;
                Some(SearchResult::new(path, line_number))
            })
            .collect()
    }
}

/// Search a whole index for `query`
pub fn search(query: &str, index: &Index) -> Result<Vec<SearchResult>> {
    SearchQueryExecutor::new(index).search(query)
}

/// 1-based number of the first line containing the needle.
///
/// Files that can no longer be read or decoded count as non-matches.
fn first_matching_line(path: &Path, finder: &Finder<'_>) -> Option<u32> {
    let content = read_text(path, u64::MAX).ok()?;
    let idx = content
        .lines()
        .position(|line| finder.find(line.as_bytes()).is_some())?;
    let number = line_number(idx);
    if number.is_none() {
        warn!("Match in {} is past line {}", path.display(), u32::MAX);
    }
    number
}

/// Convert a 0-based line index to a 1-based line number, if it fits
fn line_number(idx: usize) -> Option<u32> {
    idx.checked_add(1).and_then(|n| u32::try_from(n).ok())
}

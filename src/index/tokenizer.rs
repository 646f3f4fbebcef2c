use crate::index::cancel::CancelToken;
use crate::index::table::IndexTable;
use crate::index::types::{FileId, FileOutcome, SkipReason, Trigram};
use crate::utils::line_trigrams;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;

/// Index a single file into `table`.
///
/// The whole file is decoded before anything is inserted, so a file that is
/// not valid UTF-8 contributes nothing. Cancellation is checked once per line;
/// a cancelled file is abandoned without flushing its trigrams.
pub fn index_file(
    path: &Path,
    file_id: FileId,
    table: &IndexTable,
    cancel: &CancelToken,
    max_file_size: u64,
) -> FileOutcome {
    if cancel.is_cancelled() {
        return FileOutcome::Cancelled;
    }

    let content = match read_text(path, max_file_size) {
        Ok(text) => text,
        Err(reason) => return FileOutcome::Skipped(reason),
    };

    let mut seen: FxHashSet<Trigram> = FxHashSet::default();
    for line in content.lines() {
        if cancel.is_cancelled() {
            return FileOutcome::Cancelled;
        }
        seen.extend(line_trigrams(line));
    }

    let trigrams = seen.len();
    table.insert_all(seen, file_id);
    FileOutcome::Indexed { trigrams }
}

/// Read a file as UTF-8 text, classifying failures
pub(crate) fn read_text(path: &Path, max_file_size: u64) -> Result<String, SkipReason> {
    let len = fs::metadata(path)
        .map_err(|_| SkipReason::Unreadable)?
        .len();
    if len > max_file_size {
        return Err(SkipReason::TooLarge);
    }

    let bytes = fs::read(path).map_err(|_| SkipReason::Unreadable)?;
    String::from_utf8(bytes).map_err(|_| SkipReason::InvalidUtf8)
}

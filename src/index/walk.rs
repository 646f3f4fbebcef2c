use crate::error::{Error, Result};
use crate::index::types::IndexConfig;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collect every regular file under `root`, sorted by path.
///
/// A root that is itself a file yields just that file. A missing or
/// inaccessible root fails with [`Error::NotFound`]; problems with entries
/// below the root are logged and skipped.
pub fn collect_files(root: &Path, config: &IndexConfig) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(root).map_err(|source| Error::NotFound {
        path: root.to_path_buf(),
        source,
    })?;

    if metadata.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    // Make sure the directory itself is readable before walking it
    fs::read_dir(root).map_err(|source| Error::NotFound {
        path: root.to_path_buf(),
        source,
    })?;

    let walker = WalkBuilder::new(root)
        .standard_filters(config.respect_ignore_files)
        .hidden(!config.include_hidden)
        .parents(false)
        .require_git(false)
        .follow_links(config.follow_links)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("Skipping walk entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort_unstable();
    Ok(files)
}

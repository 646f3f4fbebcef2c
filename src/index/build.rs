use crate::error::{Error, Result};
use crate::index::cancel::CancelToken;
use crate::index::progress::{Signal, spawn_reporter};
use crate::index::snapshot::Index;
use crate::index::table::IndexTable;
use crate::index::tokenizer::index_file;
use crate::index::types::{BuildStats, FileId, FileOutcome, IndexConfig};
use crate::index::walk::collect_files;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Files past this many are dropped so every file gets a distinct [`FileId`]
const MAX_FILES: usize = FileId::MAX as usize;

/// Builds an in-memory trigram index for a directory tree.
///
/// ```no_run
/// use trigrep::index::IndexBuilder;
///
/// let builder = IndexBuilder::new("/path/to/codebase");
/// let index = builder.build()?;
/// println!("{} files, {} trigrams", index.file_count(), index.trigram_count());
/// # Ok::<(), trigrep::Error>(())
/// ```
///
/// `build` blocks the calling thread. To cancel it, call [`cancel`](Self::cancel)
/// from another thread (the builder is `Sync`) or hand out a
/// [`cancel_token`](Self::cancel_token).
pub struct IndexBuilder {
    root: PathBuf,
    config: IndexConfig,
    cancel: CancelToken,
}

/// Per-build counters updated by the workers
#[derive(Default)]
struct Counters {
    indexed: AtomicUsize,
    skipped: AtomicUsize,
}

impl IndexBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, IndexConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: IndexConfig) -> Self {
        Self {
            root: root.into(),
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Request cancellation of the current or next build.
    ///
    /// Idempotent. Has no effect once a build has finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Handle that cancels this builder from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Index every file under the root.
    ///
    /// Fails with [`Error::NotFound`] if the root cannot be enumerated and with
    /// [`Error::Cancelled`] if cancellation is observed before completion. A
    /// partially built table is never returned.
    pub fn build(&self) -> Result<Index> {
        let start = Instant::now();
        self.cancel.begin();

        let mut files = collect_files(&self.root, &self.config)?;
        let dropped = limit_to_id_space(&mut files, MAX_FILES);
        if dropped > 0 {
            warn!("{} files exceed the file id space and will not be indexed", dropped);
        }
        let total_files = files.len();
        info!("Indexing {} ({} files)", self.root.display(), total_files);

        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let table = IndexTable::new();
        let counters = Counters::default();

        let (signal_tx, signal_rx) = mpsc::channel::<Signal>();
        let reporter = spawn_reporter(
            total_files,
            self.config.progress_step,
            self.config.progress,
            signal_rx,
        );

        self.run_units(&files, &table, &counters, signal_tx.clone());

        // Settle the outcome before the reporter draws its last frame
        let finished = self.cancel.finish();
        let _ = signal_tx.send(Signal::Done {
            cancelled: !finished,
        });
        drop(signal_tx);

        if let Some(handle) = reporter {
            if handle.join().is_err() {
                warn!("Progress reporter panicked");
            }
        }

        if !finished {
            info!("Indexing of {} was cancelled", self.root.display());
            return Err(Error::Cancelled);
        }

        let stats = BuildStats {
            files_discovered: total_files,
            files_indexed: counters.indexed.load(Ordering::Relaxed),
            files_skipped: counters.skipped.load(Ordering::Relaxed),
            trigrams: table.len(),
            elapsed: start.elapsed(),
        };
        info!(
            "Indexed {} of {} files ({} skipped, {} trigrams) in {:.2?}",
            stats.files_indexed,
            stats.files_discovered,
            stats.files_skipped,
            stats.trigrams,
            stats.elapsed
        );

        Ok(Index::new(table, files, stats))
    }

    /// Run one tokenization unit per file and wait for all of them
    fn run_units(
        &self,
        files: &[PathBuf],
        table: &IndexTable,
        counters: &Counters,
        signal_tx: mpsc::Sender<Signal>,
    ) {
        let max_file_size = self.config.max_file_size;
        let cancel = &self.cancel;
        let ids = 0..FileId::try_from(files.len()).unwrap_or(FileId::MAX);

        let work = move || {
            files
                .par_iter()
                .zip(ids)
                .for_each_with(signal_tx, |signals, (path, file_id)| {
                    match index_file(path, file_id, table, cancel, max_file_size) {
                        FileOutcome::Indexed { trigrams } => {
                            debug!("Indexed {} ({} trigrams)", path.display(), trigrams);
                            counters.indexed.fetch_add(1, Ordering::Relaxed);
                        }
                        FileOutcome::Skipped(reason) => {
                            debug!("Skipping {}: {}", path.display(), reason);
                            counters.skipped.fetch_add(1, Ordering::Relaxed);
                        }
                        FileOutcome::Cancelled => {}
                    }
                    // Reporter may be gone; progress is best-effort
                    let _ = signals.send(Signal::FileDone);
                });
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("index-worker-{i}"))
            .build()
        {
            Ok(pool) => pool.install(work),
            Err(err) => {
                warn!("Falling back to global thread pool: {}", err);
                work();
            }
        }
    }
}

/// Truncate `files` to at most `limit` entries, returning how many were dropped
fn limit_to_id_space(files: &mut Vec<PathBuf>, limit: usize) -> usize {
    let dropped = files.len().saturating_sub(limit);
    files.truncate(limit);
    dropped
}

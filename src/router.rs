//! Destination routing and the locked append protocol.

use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use fs2::FileExt as _;

use crate::cache::HandleCache;

/// Topic whose file receives every line routed into the log directory.
pub(crate) const GLOBAL_TOPIC: &str = "global";

/// File destinations of one logging context: the optional dedicated
/// single file plus the per-topic files under the log directory, resolved
/// through the bounded [`HandleCache`].
///
/// Every append here is best-effort and independent: a destination that
/// cannot be opened, locked, or written is skipped, and the others are
/// still tried. The only trace of a skip is a `tracing` debug event.
#[derive(Debug)]
pub(crate) struct FileSinks {
    dir: Option<PathBuf>,
    single_path: Option<PathBuf>,
    single: Option<File>,
    cache: HandleCache,
}

impl FileSinks {
    pub fn new() -> Self {
        Self {
            dir: None,
            single_path: None,
            single: None,
            cache: HandleCache::new(),
        }
    }

    pub fn set_dir(&mut self, dir: PathBuf) {
        self.dir = Some(dir);
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Point the dedicated single-file destination at `path`.
    ///
    /// Any previously open single-file handle is closed and forgotten
    /// immediately; the new file is opened lazily on the next append.
    pub fn set_single(&mut self, path: PathBuf) {
        self.single = None;
        self.single_path = Some(path);
    }

    pub fn single_path(&self) -> Option<&Path> {
        self.single_path.as_deref()
    }

    /// Append `line` to every configured destination: the single file when
    /// set, `global.log` always, and `<topic>.log` when a topic was
    /// recognized.
    pub fn dispatch(&mut self, topic: Option<&str>, line: &str) {
        self.append_single(line);
        self.append_topic(GLOBAL_TOPIC, line);
        if let Some(topic) = topic {
            self.append_topic(topic, line);
        }
    }

    /// Drop every open handle. Paths stay configured, so later appends
    /// lazily reopen. Safe to call repeatedly, or with nothing open.
    pub fn close_all(&mut self) {
        self.single = None;
        self.cache.clear();
    }

    fn append_single(&mut self, line: &str) {
        if self.single_path.is_none() {
            return;
        }
        if self.single.is_none() {
            self.single = self.open_single();
        }
        if let Some(file) = &self.single {
            locked_append(file, line);
        }
    }

    fn open_single(&self) -> Option<File> {
        let path = self.single_path.as_ref()?;
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "cannot open log file, line dropped");
                None
            }
        }
    }

    fn append_topic(&mut self, topic: &str, line: &str) {
        // File mode without a directory has nowhere to route topic files.
        let Some(dir) = &self.dir else { return };
        if let Some(file) = self.cache.get(topic) {
            locked_append(file, line);
            return;
        }
        let path = dir.join(format!("{topic}.log"));
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                if let Some(file) = self.cache.insert(topic, file) {
                    locked_append(file, line);
                }
            }
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "cannot open topic log, line dropped");
            }
        }
    }
}

/// Append one line under an advisory exclusive lock on the file's
/// descriptor, blocking until other processes sharing the file release
/// theirs. The lock covers exactly this one write; it is never held
/// across destinations or calls. Failure at any step drops the line for
/// this destination only.
fn locked_append(file: &File, line: &str) {
    if let Err(error) = file.lock_exclusive() {
        tracing::debug!(%error, "lock failed, line dropped");
        return;
    }
    let mut handle = file;
    if let Err(error) = handle.write_all(line.as_bytes()) {
        tracing::debug!(%error, "append failed");
    }
    if let Err(error) = fs2::FileExt::unlock(file) {
        tracing::debug!(%error, "unlock failed");
    }
}

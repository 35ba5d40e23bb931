//! The logging facade: one owned context of mode flags, formatting state,
//! and file destinations.

use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::CreateDirError;
use crate::format::Formatter;
use crate::fsutil;
use crate::router::FileSinks;

/// Directory permission mode applied when [`Logger::set_dir`] is called
/// without an explicit mode.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Prefix-routed logging context.
///
/// One `Logger` owns everything the facility keeps per process: the
/// last-emit timestamp, the destination mode flags, the dedicated
/// single-file handle, and the bounded cache of per-topic handles. A
/// process normally holds one; tests can hold several independent ones.
///
/// Routing is decided per emit. With file mode off every line goes to
/// standard error. With it on, the line is appended under an advisory
/// exclusive lock to the configured single file, to `global.log`, and to
/// `<topic>.log` when the message carries a `topic:` prefix. Multiple
/// processes may share the same files; the per-write lock keeps their
/// lines whole. Emitting never fails: every file-bound problem degrades
/// to a skipped destination.
///
/// ```no_run
/// let mut log = topiclog::Logger::new();
/// log.set_dir("/var/log/app", None).ok();
/// log.emit("auth: login ok");
/// topiclog::emit!(log, "db: query took {}ms", 42);
/// log.close_all();
/// ```
#[derive(Debug)]
pub struct Logger {
    debug: bool,
    stderr: bool,
    files: bool,
    formatter: Formatter,
    sinks: FileSinks,
}

impl Logger {
    /// Create a logger in its default mode: lines go to standard error,
    /// debug-only messages are dropped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            debug: false,
            stderr: true,
            files: false,
            formatter: Formatter::default(),
            sinks: FileSinks::new(),
        }
    }

    /// Format `msg` and route the line to the active destinations.
    ///
    /// The interval stamp advances on every call, whether or not any
    /// destination accepts the line.
    pub fn emit(&mut self, msg: &str) {
        let (topic, line) = self.formatter.render(msg);
        if self.files {
            self.sinks.dispatch(topic, &line);
        } else {
            std::io::stderr().write_all(line.as_bytes()).ok();
        }
    }

    /// Format-and-emit variant of [`emit`](Self::emit); prefer the
    /// [`emit!`](crate::emit) macro at call sites.
    pub fn emit_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.emit(&args.to_string());
    }

    /// Like [`emit_fmt`](Self::emit_fmt), but a no-op unless debug mode
    /// is enabled; prefer the [`emit_debug!`](crate::emit_debug) macro.
    pub fn emit_debug(&mut self, args: fmt::Arguments<'_>) {
        if self.debug {
            self.emit(&args.to_string());
        }
    }

    /// Enable or disable debug-only messages.
    pub fn set_debug(&mut self, enable: bool) {
        self.debug = enable;
    }

    /// Whether debug-only messages are emitted.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    /// Record the standard-error preference.
    ///
    /// File mode takes precedence: whenever file mode is off, lines go to
    /// standard error regardless of this flag.
    pub fn use_stderr(&mut self, enable: bool) {
        self.stderr = enable;
    }

    /// Whether standard error is the preferred fallback destination.
    #[must_use]
    pub const fn using_stderr(&self) -> bool {
        self.stderr
    }

    /// Enable or disable file mode. Takes effect on the next emit;
    /// already-open handles are kept for when file mode returns.
    pub fn use_files(&mut self, enable: bool) {
        self.files = enable;
    }

    /// Whether lines are routed to files instead of standard error.
    #[must_use]
    pub const fn using_files(&self) -> bool {
        self.files
    }

    /// Route every line to the single file at `path`, in addition to the
    /// per-topic files, and enable file mode.
    ///
    /// A previously configured single file has its handle closed and
    /// forgotten immediately; the new one is opened lazily on the next
    /// emit.
    pub fn set_file(&mut self, path: impl Into<PathBuf>) {
        self.sinks.set_single(path.into());
        self.files = true;
    }

    /// The configured single-file path, if any.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.sinks.single_path()
    }

    /// Route per-topic files into `path`, creating the directory (and any
    /// missing ancestors) with `mode` (default `0o755`), and enable file
    /// mode.
    ///
    /// # Errors
    ///
    /// Returns [`CreateDirError`] when the directory cannot be created.
    /// The configuration is applied even then: logging continues in
    /// degraded mode and file-bound writes are skipped until the
    /// directory becomes usable.
    pub fn set_dir(
        &mut self,
        path: impl Into<PathBuf>,
        mode: Option<u32>,
    ) -> Result<(), CreateDirError> {
        let path = path.into();
        let result = fsutil::ensure_dir(&path, mode.unwrap_or(DEFAULT_DIR_MODE));
        self.sinks.set_dir(path);
        self.files = true;
        result
    }

    /// The configured log directory, if any.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.sinks.dir()
    }

    /// Close the single-file handle and every cached per-topic handle.
    ///
    /// Paths and mode flags stay configured, so emitting afterwards
    /// lazily reopens whatever it needs. Safe to call repeatedly, or with
    /// nothing open.
    pub fn close_all(&mut self) {
        self.sinks.close_all();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Format and emit one log line through a [`Logger`].
///
/// `emit!(log, "db: query took {}ms", 42)` renders the message and routes
/// it exactly like [`Logger::emit`].
#[macro_export]
macro_rules! emit {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_fmt(::core::format_args!($($arg)*))
    };
}

/// Format and emit one log line, dropped unless debug mode is enabled on
/// the [`Logger`].
#[macro_export]
macro_rules! emit_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.emit_debug(::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Mode flags
    // -----------------------------------------------------------------------

    #[test]
    fn default_modes() {
        let log = Logger::new();
        assert!(log.using_stderr());
        assert!(!log.using_files());
        assert!(!log.is_debug());
        assert!(log.dir().is_none());
        assert!(log.file().is_none());
    }

    #[test]
    fn toggles_round_trip() {
        let mut log = Logger::new();
        log.set_debug(true);
        log.use_stderr(false);
        log.use_files(true);
        assert!(log.is_debug());
        assert!(!log.using_stderr());
        assert!(log.using_files());
    }

    #[test]
    fn set_file_enables_file_mode() {
        let mut log = Logger::new();
        log.set_file("/tmp/single.log");
        assert!(log.using_files());
        assert_eq!(log.file(), Some(Path::new("/tmp/single.log")));
    }

    #[test]
    fn set_dir_enables_file_mode_and_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("app").join("logs");
        let mut log = Logger::new();
        log.set_dir(&dir, None).unwrap();
        assert!(log.using_files());
        assert!(dir.is_dir());
        assert_eq!(log.dir(), Some(dir.as_path()));
    }

    #[test]
    fn set_dir_failure_still_applies_configuration() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        let mut log = Logger::new();
        let result = log.set_dir(&file, None);
        assert!(result.is_err());
        assert!(log.using_files(), "degraded mode still routes to files");
        assert_eq!(log.dir(), Some(file.as_path()));
    }

    // -----------------------------------------------------------------------
    // Emit
    // -----------------------------------------------------------------------

    #[test]
    fn emit_routes_topic_and_global() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = Logger::new();
        log.set_dir(tmp.path(), None).unwrap();
        log.emit("auth: login ok");
        let global = std::fs::read_to_string(tmp.path().join("global.log")).unwrap();
        let auth = std::fs::read_to_string(tmp.path().join("auth.log")).unwrap();
        assert!(global.trim_end().ends_with("(auth) login ok"));
        assert!(auth.trim_end().ends_with("(auth) login ok"));
    }

    #[test]
    fn emit_debug_is_gated() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = Logger::new();
        log.set_dir(tmp.path(), None).unwrap();
        log.emit_debug(format_args!("db: hidden"));
        assert!(!tmp.path().join("global.log").exists());
        log.set_debug(true);
        log.emit_debug(format_args!("db: visible"));
        let global = std::fs::read_to_string(tmp.path().join("global.log")).unwrap();
        assert!(global.contains("visible"));
        assert!(!global.contains("hidden"));
    }

    #[test]
    fn emit_macros_format_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = Logger::new();
        log.set_dir(tmp.path(), None).unwrap();
        emit!(log, "db: query took {}ms", 42);
        let db = std::fs::read_to_string(tmp.path().join("db.log")).unwrap();
        assert!(db.trim_end().ends_with("(db) query took 42ms"));

        log.set_debug(true);
        emit_debug!(log, "db: {} rows", 7);
        let db = std::fs::read_to_string(tmp.path().join("db.log")).unwrap();
        assert!(db.trim_end().ends_with("(db) 7 rows"));
    }

    #[test]
    fn file_mode_without_destinations_drops_lines_quietly() {
        let mut log = Logger::new();
        log.use_files(true);
        log.emit("auth: nowhere to go");
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    #[test]
    fn close_all_is_idempotent() {
        let mut log = Logger::new();
        log.close_all();
        log.close_all();
    }

    #[test]
    fn logging_resumes_after_close_all() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = Logger::new();
        log.set_dir(tmp.path(), None).unwrap();
        log.emit("db: before");
        log.close_all();
        log.emit("db: after");
        let db = std::fs::read_to_string(tmp.path().join("db.log")).unwrap();
        assert_eq!(db.lines().count(), 2);
    }
}

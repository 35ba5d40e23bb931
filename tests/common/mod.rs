// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed logging context so each test can
// route files into an isolated directory without repeating filesystem
// boilerplate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use topiclog::Logger;

/// An isolated log directory backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when dropped.
pub struct LogDirContext {
    /// Temporary directory receiving `global.log` and per-topic files.
    pub root: tempfile::TempDir,
}

impl LogDirContext {
    /// Create a fresh, empty log directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of the log directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Build a file-mode logger routed into this directory.
    pub fn logger(&self) -> Logger {
        let mut log = Logger::new();
        log.set_dir(self.path(), None).expect("create log dir");
        log
    }

    /// Full path of `name` inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Read `name` and return its lines.
    pub fn lines(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.file(name))
            .expect("read log file")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Number of entries in the log directory.
    pub fn entry_count(&self) -> usize {
        std::fs::read_dir(self.path()).expect("read log dir").count()
    }
}

/// Assert that `line` has the full wire shape
/// `YYYYMMDD-HHMMSS.mmm+<ds>.<dms> [<pid>] (<topic>) <body>`.
pub fn assert_line_shape(line: &str, topic: &str, body: &str) {
    let (stamp, rest) = line.split_once(' ').expect("space after stamp");
    let (ts, delta) = stamp.split_once('+').expect("delta follows +");
    assert_eq!(ts.len(), 19, "timestamp length in {line:?}");
    assert!(
        ts.bytes()
            .enumerate()
            .all(|(i, b)| match i {
                8 => b == b'-',
                15 => b == b'.',
                _ => b.is_ascii_digit(),
            }),
        "timestamp shape in {line:?}"
    );
    let (ds, dms) = delta.split_once('.').expect("delta has two fields");
    let _: i64 = ds.parse().expect("seconds delta parses");
    let _: i64 = dms.parse().expect("millis delta parses");

    let (pid, rest) = rest.split_once(' ').expect("space after pid");
    assert!(pid.starts_with('[') && pid.ends_with(']'), "pid brackets in {line:?}");
    let _: u32 = pid
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .expect("pid parses");

    assert_eq!(rest, format!("({topic}) {body}"), "payload of {line:?}");
}

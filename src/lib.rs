//! Prefix-routed file logging with multi-process append safety.
//!
//! A `topic:` prefix on a message routes the line to `<topic>.log` next
//! to the always-written `global.log`; an optional dedicated file
//! receives every line regardless of topic; without file mode everything
//! goes to standard error. Every line is stamped with local wall-clock
//! time, the interval since the previous emit, and the process id:
//!
//! ```text
//! 20260804-153012.481+2.017 [4242] (db) Connected to postgres
//! ```
//!
//! Multiple processes may log into the same directory: each line is
//! appended under an advisory exclusive lock on the destination file, so
//! concurrent writers never interleave partial lines. Open per-topic
//! handles live in a fixed 64-slot cache with least-used eviction, so
//! descriptor usage stays bounded no matter how many topics a process
//! emits.
//!
//! The facility never fails its caller: directory-creation problems are
//! reported once when configured, and every I/O failure on the emit path
//! degrades to a skipped destination.

pub mod cache;
pub mod error;
pub mod fsutil;
pub mod logger;

mod format;
mod router;

pub use logger::{DEFAULT_DIR_MODE, Logger};

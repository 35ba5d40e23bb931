//! Message formatting: topic extraction and timestamped line rendering.

use chrono::Local;

/// Longest topic accepted in front of the `:` separator.
pub(crate) const MAX_TOPIC_LEN: usize = 15;

/// Split `msg` into an optional routing topic and the message body.
///
/// The candidate topic is everything before the first `:`. It is accepted
/// when it is 1 to [`MAX_TOPIC_LEN`] bytes of ASCII alphanumerics or
/// underscores; any run of spaces after the colon is then skipped. A
/// rejected candidate leaves the whole message, colon included, as the
/// body.
pub(crate) fn split_topic(msg: &str) -> (Option<&str>, &str) {
    let Some((candidate, rest)) = msg.split_once(':') else {
        return (None, msg);
    };
    let valid = !candidate.is_empty()
        && candidate.len() <= MAX_TOPIC_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        (Some(candidate), rest.trim_start_matches(' '))
    } else {
        (None, msg)
    }
}

/// Renders log lines and tracks the interval since the previous emit.
///
/// Lines look like `20260804-153012.481+2.017 [4242] (db) Connected`:
/// local calendar time with millisecond precision, the delta against the
/// previous call, the process id, and the topic (`*` when none).
///
/// The delta is the raw difference of the second and millisecond
/// components and is deliberately not normalized across second
/// boundaries: a 150 ms gap straddling a second renders as `+1.-850`.
/// Consumers of the format rely on the raw form. The first call in a
/// process renders `+0.000`.
#[derive(Debug, Default)]
pub(crate) struct Formatter {
    /// Seconds and milliseconds of the previous emit; `None` until then.
    last: Option<(i64, i64)>,
}

impl Formatter {
    /// Render `msg` into a full log line, returning the recognized topic
    /// (if any) alongside it.
    ///
    /// The previous-call timestamp is updated unconditionally, even when
    /// every destination later drops the line.
    pub fn render<'m>(&mut self, msg: &'m str) -> (Option<&'m str>, String) {
        let now = Local::now();
        let secs = now.timestamp();
        let millis = i64::from(now.timestamp_subsec_millis());
        let (delta_sec, delta_ms) = match self.last {
            Some((last_secs, last_millis)) => (secs - last_secs, millis - last_millis),
            None => (0, 0),
        };
        self.last = Some((secs, millis));

        let (topic, body) = split_topic(msg);
        let line = format!(
            "{}.{millis:03}+{delta_sec}.{delta_ms:03} [{pid}] ({name}) {body}\n",
            now.format("%Y%m%d-%H%M%S"),
            pid = std::process::id(),
            name = topic.unwrap_or("*"),
        );
        (topic, line)
    }
}

//! Dialogue Queue and In-Game Log

use std::collections::VecDeque;
use tracing::debug;

/// FIFO of lines to show.
#[derive(Clone, Debug, Default)]
pub struct Dialogue {
    lines: VecDeque<String>,
}

impl Dialogue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line.
    pub fn say(&mut self, text: impl Into<String>) {
        self.lines.push_back(text.into());
    }

    /// Take the next line.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Lines waiting.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One log line.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Message
    pub msg: String,
    /// Clock time (ms) when pushed
    pub t: f64,
}

/// Bounded on-screen log, newest first.
#[derive(Clone, Debug)]
pub struct Logger {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Logger {
    /// Create a log keeping at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a line at time `t`, dropping the oldest beyond capacity.
    pub fn push(&mut self, msg: impl Into<String>, t: f64) {
        let msg = msg.into();
        debug!(target: "gamekit::logger", t, "{msg}");
        self.entries.push_front(LogEntry { msg, t });
        self.entries.truncate(self.capacity);
    }

    /// Lines, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of lines kept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialogue_fifo() {
        let mut d = Dialogue::new();
        d.say("hello");
        d.say("world");
        assert_eq!(d.next().as_deref(), Some("hello"));
        assert_eq!(d.next().as_deref(), Some("world"));
        assert_eq!(d.next(), None);
    }

    #[test]
    fn test_logger_bounded_newest_first() {
        let mut log = Logger::new(3);
        for i in 0..5 {
            log.push(format!("m{i}"), i as f64);
        }
        let msgs: Vec<&str> = log.entries().map(|e| e.msg.as_str()).collect();
        assert_eq!(msgs, vec!["m4", "m3", "m2"]);
    }
}

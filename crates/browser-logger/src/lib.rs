//! Browser Logger
//!
//! `tracing` subscriber for the front end. Every formatted event goes to the
//! browser console at the matching level, and the most recent lines are kept
//! in a bounded ring buffer for later inspection.
//! Off wasm32 the console is stderr.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;

/// Lines kept when the caller has no preference
pub const DEFAULT_CAPACITY: usize = 500;

/// Circular buffer of formatted log lines
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { lines: Mutex::new(VecDeque::with_capacity(capacity)), capacity }
    }

    /// Append a line, evicting the oldest when full
    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().skip(lines.len().saturating_sub(count)).cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

/// Wall-clock time via chrono; `SystemTime` panics on wasm32
struct ChronoClock;

impl FormatTime for ChronoClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Hands the fmt layer one `ConsoleWriter` per event
#[derive(Debug, Clone)]
pub struct ConsoleMakeWriter {
    buffer: Arc<LogBuffer>,
}

impl ConsoleMakeWriter {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

/// Collects one formatted event and emits it when dropped
pub struct ConsoleWriter {
    buffer: Arc<LogBuffer>,
    level: Level,
    pending: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.pending).trim_end().to_string();
        if line.is_empty() {
            return;
        }
        emit(self.level, &line);
        self.buffer.push(line);
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buffer: self.buffer.clone(), level: Level::INFO, pending: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { buffer: self.buffer.clone(), level: *meta.level(), pending: Vec::new() }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use web_sys::console;
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        _ => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Build the subscriber without installing it
pub fn subscriber(
    max_level: Level,
    buffer: Arc<LogBuffer>,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    let layer = fmt::layer()
        .with_timer(ChronoClock)
        .with_target(true)
        .with_writer(ConsoleMakeWriter::new(buffer));
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(max_level))
        .with(layer)
}

/// Install the global subscriber and return its ring buffer.
///
/// Calling twice keeps the first subscriber; the second buffer stays empty.
pub fn init(max_level: Level, capacity: usize) -> Arc<LogBuffer> {
    let buffer = Arc::new(LogBuffer::new(capacity));
    if tracing::subscriber::set_global_default(subscriber(max_level, buffer.clone())).is_err() {
        emit(Level::WARN, "browser-logger: a global subscriber is already installed");
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push("one".into());
        buffer.push("two".into());
        buffer.push("three".into());
        assert_eq!(buffer.snapshot(), vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_zero_capacity_still_keeps_latest() {
        let buffer = LogBuffer::new(0);
        buffer.push("only".into());
        buffer.push("latest".into());
        assert_eq!(buffer.snapshot(), vec!["latest".to_string()]);
    }

    #[test]
    fn test_tail_keeps_newest() {
        let buffer = LogBuffer::new(10);
        for n in 1..=4 {
            buffer.push(format!("line {n}"));
        }
        assert_eq!(buffer.tail(2), vec!["line 3".to_string(), "line 4".to_string()]);
        assert_eq!(buffer.tail(20).len(), 4);
        assert!(buffer.tail(0).is_empty());

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.tail(5).is_empty());
    }

    #[test]
    fn test_events_land_in_buffer() {
        let buffer = Arc::new(LogBuffer::new(DEFAULT_CAPACITY));
        tracing::subscriber::with_default(subscriber(Level::INFO, buffer.clone()), || {
            tracing::info!(item_id = 4, "borrowed");
            tracing::debug!("filtered out");
            tracing::error!("backend unreachable");
        });

        let lines = buffer.snapshot();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("borrowed"));
        assert!(lines[0].contains("item_id=4"));
        assert!(lines[1].contains("ERROR"));
    }
}

//! Structured JSON logger
//!
//! - One log line = one event
//! - `ts`, `severity` and `event` first, caller fields after, sorted by key
//! - Flushed after every line and when the logger is dropped
//! - Write failures are swallowed; logging never fails the caller

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A logger handle writing JSON lines to a single sink.
///
/// Share it as `Arc<Logger>`; every component that logs receives the handle
/// explicitly.
pub struct Logger {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Logger {
    /// Log to any writer.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    /// Log to a file, truncating whatever was there.
    pub fn to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self::with_writer(file))
    }

    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// A logger that drops everything.
    pub fn discard() -> Self {
        Self::with_writer(io::sink())
    }

    /// Log an event with the given severity and fields
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = format_line(&ts, severity, event, fields);

        // A poisoned sink still holds a usable writer.
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }

    pub fn trace(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    pub fn info(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    pub fn error(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Ok(sink) = self.sink.get_mut() {
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

fn format_line(ts: &str, severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);

    output.push_str("{\"ts\":");
    push_json_str(&mut output, ts);
    output.push_str(",\"severity\":");
    push_json_str(&mut output, severity.as_str());
    output.push_str(",\"event\":");
    push_json_str(&mut output, event);

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push(',');
        push_json_str(&mut output, key);
        output.push(':');
        push_json_str(&mut output, value);
    }

    output.push_str("}\n");
    output
}

fn push_json_str(output: &mut String, s: &str) {
    output.push_str(&Value::from(s).to_string());
}

/// In-memory log sink. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far.
    pub fn contents(&self) -> String {
        self.inner
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }

    /// Logged lines, parsed.
    pub fn events(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Logger, LogBuffer) {
        let buffer = LogBuffer::new();
        (Logger::with_writer(buffer.clone()), buffer)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_log_json_format() {
        let (logger, buffer) = capture();
        logger.info("STORE_OPENED", &[]);

        let events = buffer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "STORE_OPENED");
        assert_eq!(events[0]["severity"], "INFO");
        assert!(events[0]["ts"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_error_severity() {
        let (logger, buffer) = capture();
        logger.error("SAVE_FAILED", &[("path", "/invalid")]);

        let events = buffer.events();
        assert_eq!(events[0]["severity"], "ERROR");
        assert_eq!(events[0]["path"], "/invalid");
    }

    #[test]
    fn test_fields_sorted() {
        let line = format_line(
            "t",
            Severity::Info,
            "TEST",
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let other = format_line(
            "t",
            Severity::Info,
            "TEST",
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );
        assert_eq!(line, other);

        let apple = line.find("apple").unwrap();
        let mango = line.find("mango").unwrap();
        let zebra = line.find("zebra").unwrap();
        assert!(apple < mango && mango < zebra);
    }

    #[test]
    fn test_escapes_special_chars() {
        let line = format_line("t", Severity::Info, "TEST", &[("text", "say \"hi\"\nбыло")]);
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["text"], "say \"hi\"\nбыло");
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_file_sink_truncates() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("log.log");
        std::fs::write(&path, "stale line\n").unwrap();

        {
            let logger = Logger::to_file(&path).unwrap();
            logger.info("SERVER_STARTING", &[]);
            logger.error("SOMETHING_FAILED", &[]);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale line"));
        assert!(content.contains("SERVER_STARTING"));
        assert!(content.contains("SOMETHING_FAILED"));
    }

    #[test]
    fn test_file_sink_bad_path() {
        assert!(Logger::to_file("/nonexistent-dir/sub/log.log").is_err());
    }
}

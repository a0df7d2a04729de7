//! Frame sinks -- the boundary to the logging/persistence collaborator.
//!
//! The acquisition loop hands every drained frame to a [`FrameSink`] and
//! keeps nothing afterward. Sinks must not block unboundedly: the loop is
//! the radio's sole consumer, and a stall here risks FIFO overflow on the
//! chip side.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::frame::FrameRecord;

/// Consumer of captured frame records.
///
/// A sink error is reported to the caller but is never fatal to the
/// acquisition loop -- the frame is logged and dropped, not retried.
pub trait FrameSink: Send {
    /// Accept one frame record.
    fn emit(&mut self, record: &FrameRecord) -> Result<()>;
}

/// Human-readable line sink, one line per frame:
///
/// ```text
/// [2026-08-07 14:03:59] PKT 1 (3 bytes): DEADBE
/// ```
///
/// Packet numbers count up from 1 for the lifetime of the sink.
pub struct TextSink<W: Write + Send> {
    writer: W,
    count: u64,
}

impl TextSink<io::Stdout> {
    /// A text sink writing to stdout.
    pub fn stdout() -> Self {
        TextSink::new(io::stdout())
    }
}

impl<W: Write + Send> TextSink<W> {
    /// Create a text sink over an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }
}

impl<W: Write + Send> FrameSink for TextSink<W> {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        self.count += 1;
        writeln!(
            self.writer,
            "[{}] PKT {} ({} bytes): {}",
            record.timestamp, self.count, record.byte_length, record.payload
        )
        .map_err(|e| Error::Sink(e.to_string()))?;
        self.writer.flush().map_err(|e| Error::Sink(e.to_string()))
    }
}

/// Machine-readable sink: one JSON object per line.
pub struct JsonSink<W: Write + Send> {
    writer: W,
}

impl JsonSink<io::Stdout> {
    /// A JSON-lines sink writing to stdout.
    pub fn stdout() -> Self {
        JsonSink::new(io::stdout())
    }
}

impl<W: Write + Send> JsonSink<W> {
    /// Create a JSON-lines sink over an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> FrameSink for JsonSink<W> {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(|e| Error::Sink(e.to_string()))?;
        writeln!(self.writer, "{line}").map_err(|e| Error::Sink(e.to_string()))?;
        self.writer.flush().map_err(|e| Error::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payload: &str, byte_length: usize) -> FrameRecord {
        FrameRecord {
            timestamp: "2026-08-07 14:03:59".into(),
            byte_length,
            payload: payload.into(),
        }
    }

    #[test]
    fn text_sink_formats_line() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&record("DEADBE", 3)).unwrap();
        let out = String::from_utf8(sink.writer.clone()).unwrap();
        assert_eq!(out, "[2026-08-07 14:03:59] PKT 1 (3 bytes): DEADBE\n");
    }

    #[test]
    fn text_sink_numbers_packets() {
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&record("AA", 1)).unwrap();
        sink.emit(&record("BB", 1)).unwrap();
        sink.emit(&record("CC", 1)).unwrap();
        let out = String::from_utf8(sink.writer.clone()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("PKT 1 "));
        assert!(lines[1].contains("PKT 2 "));
        assert!(lines[2].contains("PKT 3 "));
    }

    #[test]
    fn json_sink_one_object_per_line() {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&record("DEADBE", 3)).unwrap();
        sink.emit(&record("FF", 1)).unwrap();
        let out = String::from_utf8(sink.writer.clone()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            r#"{"timestamp":"2026-08-07 14:03:59","byte_length":3,"payload":"DEADBE"}"#
        );
        assert_eq!(
            lines[1],
            r#"{"timestamp":"2026-08-07 14:03:59","byte_length":1,"payload":"FF"}"#
        );
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_maps_to_sink_error() {
        let mut sink = TextSink::new(FailingWriter);
        let err = sink.emit(&record("AA", 1)).unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
    }
}

//! In-memory frame sink for assertions in tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use snifflib_core::error::{Error, Result};
use snifflib_core::frame::FrameRecord;
use snifflib_core::sink::FrameSink;

/// A [`FrameSink`] that collects records into shared memory.
///
/// Cloning yields a handle onto the same record store, so a test can
/// hand one clone to the acquisition loop and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    records: Arc<Mutex<Vec<FrameRecord>>>,
    failing: Arc<AtomicBool>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of all records emitted so far.
    pub fn records(&self) -> Vec<FrameRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of records emitted so far.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether no records have been emitted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every subsequent `emit()` fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl FrameSink for CollectSink {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Sink("injected sink failure".into()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payload: &str) -> FrameRecord {
        FrameRecord {
            timestamp: "2026-08-07 14:03:59".into(),
            byte_length: payload.len() / 2,
            payload: payload.into(),
        }
    }

    #[test]
    fn collects_records_across_clones() {
        let sink = CollectSink::new();
        let mut handle = sink.clone();
        handle.emit(&record("DEADBE")).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].payload, "DEADBE");
    }

    #[test]
    fn failing_sink_rejects_and_collects_nothing() {
        let sink = CollectSink::new();
        sink.set_failing(true);

        let mut handle = sink.clone();
        let err = handle.emit(&record("AA")).unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
        assert!(sink.is_empty());

        sink.set_failing(false);
        handle.emit(&record("AA")).unwrap();
        assert_eq!(sink.len(), 1);
    }
}

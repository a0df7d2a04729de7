//! Mock bus for deterministic testing of the radio driver.
//!
//! [`MockBus`] implements the [`Bus`] trait with pre-loaded full-duplex
//! exchanges. This lets you test strobe sequencing, register
//! configuration, and FIFO draining without real radio hardware.
//!
//! State is shared between clones, so a test can move one handle into
//! the driver and keep another for inspection after the driver has
//! consumed (or dropped) its copy.
//!
//! # Example
//!
//! ```
//! use snifflib_test_harness::MockBus;
//!
//! let mut mock = MockBus::new();
//! // Pre-load: when the driver sends this, clock back this response.
//! mock.expect(&[0xBB, 0x00], &[0x0F, 0x03]); // RXBYTES read -> 3 bytes waiting
//! let probe = mock.clone(); // inspect later via probe.sent_data()
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use snifflib_core::bus::Bus;
use snifflib_core::error::{Error, Result};

/// One scripted step in the exchange sequence.
#[derive(Debug, Clone)]
enum Step {
    /// The exact bytes we expect to be sent, and the bytes clocked back.
    Exchange { request: Vec<u8>, response: Vec<u8> },
    /// Fail the next exchange with a transfer fault.
    Fault,
}

#[derive(Debug)]
struct State {
    /// Ordered queue of scripted steps.
    steps: VecDeque<Step>,
    /// Answer with zeros instead of erroring once the script is exhausted.
    silent: bool,
    /// Whether the bus is "open". Starts open.
    open: bool,
    /// Log of all bytes sent through this bus.
    sent_log: Vec<Vec<u8>>,
    /// Number of `close()` invocations (including redundant ones).
    close_calls: usize,
}

/// A mock [`Bus`] for testing the driver without hardware.
///
/// Steps are consumed in order. When `exchange()` is called, the sent
/// data is recorded and matched against the next expectation; the
/// scripted response is returned. A [`fault`](MockBus::expect_fault)
/// step fails its exchange with [`Error::BusTransfer`].
///
/// A bus created with [`MockBus::silent`] answers every exchange with
/// all-zero bytes once its script is exhausted -- the behavior of a radio
/// whose FIFO stays empty.
#[derive(Debug, Clone)]
pub struct MockBus {
    state: Arc<Mutex<State>>,
}

impl MockBus {
    /// Create a strict mock bus: every exchange must match a scripted
    /// expectation, and an exhausted script is an error.
    pub fn new() -> Self {
        MockBus {
            state: Arc::new(Mutex::new(State {
                steps: VecDeque::new(),
                silent: false,
                open: true,
                sent_log: Vec::new(),
                close_calls: 0,
            })),
        }
    }

    /// Create a mock bus that answers all-zero bytes for any exchange its
    /// script does not cover. Useful for smoke-testing wiring: a radio
    /// that resets, configures, arms, and then never receives anything.
    pub fn silent() -> Self {
        let mock = MockBus::new();
        mock.state.lock().unwrap().silent = true;
        mock
    }

    /// Add an expected request/response exchange.
    ///
    /// Panics if the lengths differ -- the bus is full duplex, one byte
    /// in per byte out, so a length mismatch is a bug in the test script.
    pub fn expect(&mut self, request: &[u8], response: &[u8]) {
        assert_eq!(
            request.len(),
            response.len(),
            "full-duplex exchange: request and response must have equal length"
        );
        self.state.lock().unwrap().steps.push_back(Step::Exchange {
            request: request.to_vec(),
            response: response.to_vec(),
        });
    }

    /// Fail the next exchange with a transfer fault.
    pub fn expect_fault(&mut self) {
        self.state.lock().unwrap().steps.push_back(Step::Fault);
    }

    /// All data sent through this bus, one entry per `exchange()` call.
    pub fn sent_data(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().sent_log.clone()
    }

    /// Number of scripted steps not yet consumed.
    pub fn remaining_expectations(&self) -> usize {
        self.state.lock().unwrap().steps.len()
    }

    /// Number of times `close()` has been invoked.
    pub fn close_calls(&self) -> usize {
        self.state.lock().unwrap().close_calls
    }

    /// Force the open/closed state.
    pub fn set_open(&mut self, open: bool) {
        self.state.lock().unwrap().open = open;
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bus for MockBus {
    async fn exchange(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();
        if !state.open {
            return Err(Error::NotOpen);
        }

        state.sent_log.push(tx.to_vec());

        match state.steps.pop_front() {
            Some(Step::Exchange { request, response }) => {
                if tx != request.as_slice() {
                    return Err(Error::BusTransfer(format!(
                        "unexpected exchange: expected {request:02X?}, got {tx:02X?}"
                    )));
                }
                Ok(response)
            }
            Some(Step::Fault) => Err(Error::BusTransfer("injected transfer fault".into())),
            None if state.silent => Ok(vec![0u8; tx.len()]),
            None => Err(Error::BusTransfer("no more expectations in mock bus".into())),
        }
    }

    async fn close(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.close_calls += 1;
        state.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_bus_basic_exchange() {
        let mut mock = MockBus::new();
        mock.expect(&[0x30, 0x00], &[0x0F, 0x0F]);

        let response = mock.exchange(&[0x30, 0x00]).await.unwrap();
        assert_eq!(response, vec![0x0F, 0x0F]);
        assert_eq!(mock.remaining_expectations(), 0);
    }

    #[tokio::test]
    async fn mock_bus_tracks_sent_data() {
        let mut mock = MockBus::new();
        mock.expect(&[0x01, 0x02], &[0x00, 0x00]);
        mock.expect(&[0x03, 0x04], &[0x00, 0x00]);

        mock.exchange(&[0x01, 0x02]).await.unwrap();
        mock.exchange(&[0x03, 0x04]).await.unwrap();

        assert_eq!(mock.sent_data(), [vec![0x01, 0x02], vec![0x03, 0x04]]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mut mock = MockBus::new();
        let probe = mock.clone();
        mock.expect(&[0x01, 0x00], &[0x00, 0x00]);

        mock.exchange(&[0x01, 0x00]).await.unwrap();
        mock.close().await.unwrap();

        assert_eq!(probe.sent_data(), [vec![0x01, 0x00]]);
        assert_eq!(probe.close_calls(), 1);
        assert!(!probe.is_open());
    }

    #[tokio::test]
    async fn mock_bus_wrong_data_errors() {
        let mut mock = MockBus::new();
        mock.expect(&[0x01, 0x00], &[0x00, 0x00]);

        let result = mock.exchange(&[0x99, 0x00]).await;
        assert!(matches!(result.unwrap_err(), Error::BusTransfer(_)));
    }

    #[tokio::test]
    async fn mock_bus_exhausted_script_errors() {
        let mut mock = MockBus::new();
        let result = mock.exchange(&[0x01, 0x00]).await;
        assert!(matches!(result.unwrap_err(), Error::BusTransfer(_)));
    }

    #[tokio::test]
    async fn silent_bus_answers_zeros() {
        let mut mock = MockBus::silent();
        let response = mock.exchange(&[0xBB, 0x00]).await.unwrap();
        assert_eq!(response, vec![0x00, 0x00]);
        assert_eq!(mock.sent_data().len(), 1);
    }

    #[tokio::test]
    async fn silent_bus_runs_script_first() {
        let mut mock = MockBus::silent();
        mock.expect(&[0xBB, 0x00], &[0x00, 0x03]);

        let scripted = mock.exchange(&[0xBB, 0x00]).await.unwrap();
        assert_eq!(scripted, vec![0x00, 0x03]);

        let fallback = mock.exchange(&[0xBB, 0x00]).await.unwrap();
        assert_eq!(fallback, vec![0x00, 0x00]);
    }

    #[tokio::test]
    async fn injected_fault_fails_one_exchange() {
        let mut mock = MockBus::new();
        mock.expect_fault();
        mock.expect(&[0x36, 0x00], &[0x0F, 0x00]);

        let result = mock.exchange(&[0xBB, 0x00]).await;
        assert!(matches!(result.unwrap_err(), Error::BusTransfer(_)));

        // The script continues past the fault.
        let response = mock.exchange(&[0x36, 0x00]).await.unwrap();
        assert_eq!(response, vec![0x0F, 0x00]);
    }

    #[tokio::test]
    async fn closed_bus_rejects_exchange() {
        let mut mock = MockBus::new();
        mock.close().await.unwrap();
        assert!(!mock.is_open());

        let result = mock.exchange(&[0x01, 0x00]).await;
        assert!(matches!(result.unwrap_err(), Error::NotOpen));
    }

    #[tokio::test]
    async fn close_calls_are_counted() {
        let mut mock = MockBus::new();
        assert_eq!(mock.close_calls(), 0);
        mock.close().await.unwrap();
        mock.close().await.unwrap();
        assert_eq!(mock.close_calls(), 2);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn expect_rejects_length_mismatch() {
        let mut mock = MockBus::new();
        mock.expect(&[0x01, 0x00], &[0x00]);
    }
}

//! The acquisition loop.
//!
//! A pure polling design: the bus gives no asynchronous "frame complete"
//! notification, so a packet boundary is operationally defined as
//! whatever bytes the FIFO holds the moment a poll observes nonzero
//! occupancy. That is a heuristic, not a guarantee of single-frame
//! granularity -- at high traffic rates two back-to-back transmissions
//! can merge into one drain. The poll interval trades latency against
//! bus utilization; a tighter interval catches short frames more
//! reliably at higher bus load.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use snifflib_core::bus::Bus;
use snifflib_core::error::{Error, Result};
use snifflib_core::frame::CapturedFrame;
use snifflib_core::sink::FrameSink;

use crate::radio::{Cc1101, RadioState};

/// Default pause between occupancy polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The acquisition loop over an armed radio.
///
/// Owns the radio (and through it the bus) for the process lifetime.
/// Cancellation is cooperative: the token is checked at each iteration
/// boundary and interrupts the poll sleep, but never a settle wait or a
/// register sequence mid-transaction.
#[derive(Debug)]
pub struct Sniffer<B: Bus> {
    radio: Cc1101<B>,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl<B: Bus> Sniffer<B> {
    /// Wrap an already-initialized radio.
    ///
    /// Most callers should go through
    /// [`SnifferBuilder`](crate::builder::SnifferBuilder), which also
    /// performs the reset/configure/arm sequence.
    pub fn new(radio: Cc1101<B>, poll_interval: Duration, cancel: CancellationToken) -> Self {
        Self {
            radio,
            poll_interval,
            cancel,
        }
    }

    /// The wrapped radio.
    pub fn radio(&self) -> &Cc1101<B> {
        &self.radio
    }

    /// A handle onto the loop's cancellation token.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// One poll iteration, without the poll sleep.
    ///
    /// Reads the occupancy register (masking the overflow flag from the
    /// count), and on nonzero occupancy drains the FIFO as one frame,
    /// emits it, and reflushes/rearms. Returns whether a frame was
    /// drained.
    ///
    /// A bus fault anywhere propagates and emits nothing for this
    /// iteration. A sink failure is logged and the frame dropped -- never
    /// retried, since a retry against a possibly desynced FIFO risks
    /// misaligned frame boundaries -- and the rearm still happens.
    pub async fn poll_once(&mut self, sink: &mut dyn FrameSink) -> Result<bool> {
        let count = self.radio.rx_byte_count().await?;
        if count == 0 {
            return Ok(false);
        }

        let bytes = self.radio.drain_fifo(count).await?;
        let frame = CapturedFrame::new(bytes);
        debug!(len = frame.len(), payload = %frame.hex_payload(), "frame captured");

        if let Err(e) = sink.emit(&frame.record()) {
            warn!(error = %e, "frame sink rejected record, frame dropped");
        }

        // Draining does not clear the hardware boundary marker; an
        // explicit reflush is required or the next frame is re-read or
        // fragmented.
        self.radio.disarm().await?;
        self.radio.flush_and_arm().await?;

        Ok(true)
    }

    /// Run the acquisition loop until cancellation or a bus fault.
    ///
    /// Requires [`RadioState::Receiving`]. Returns `Ok(())` on
    /// cancellation; a bus fault aborts the loop and propagates so the
    /// caller can fall through to cleanup.
    pub async fn run(&mut self, sink: &mut dyn FrameSink) -> Result<()> {
        if self.radio.state() != RadioState::Receiving {
            return Err(Error::InvalidState {
                expected: "Receiving",
                found: self.radio.state().name(),
            });
        }

        info!(
            poll_ms = self.poll_interval.as_millis() as u64,
            "listening for packets"
        );

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            self.poll_once(sink).await?;

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        info!("acquisition loop stopped");
        Ok(())
    }

    /// Return the chip to idle and release the bus, exactly once.
    ///
    /// Delegates to [`Cc1101::shutdown`]; faults are logged, never
    /// escalated, so cleanup can never mask the condition that
    /// triggered it.
    pub async fn shutdown(&mut self) {
        self.radio.shutdown().await;
    }
}

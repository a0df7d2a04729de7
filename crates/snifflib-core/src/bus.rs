//! Bus trait for radio register access.
//!
//! The [`Bus`] trait abstracts over the synchronous serial control bus
//! (SPI) between the host and the transceiver. Implementations exist for
//! Linux spidev devices and for mock buses used in testing.
//!
//! The radio driver (`snifflib-cc1101`) operates on a `Bus` rather than
//! directly on a device node, enabling both real hardware control and
//! deterministic unit testing with `MockBus` from the
//! `snifflib-test-harness` crate.

use async_trait::async_trait;

use crate::error::Result;

/// Full-duplex byte-level bus to the radio.
///
/// Every exchange clocks one byte out for every byte in: the chip drives
/// its status byte onto the bus while the first command/address byte is
/// still being shifted toward it, so half-duplex writes would silently
/// discard protocol feedback. Implementations must therefore return
/// exactly `tx.len()` bytes from [`exchange`](Bus::exchange).
#[async_trait]
pub trait Bus: Send {
    /// Perform one full-duplex transfer.
    ///
    /// Sends all of `tx` and returns the bytes clocked back in the same
    /// transfer. The returned buffer has the same length as `tx`. A
    /// transport fault propagates unchanged; this layer never retries.
    async fn exchange(&mut self, tx: &[u8]) -> Result<Vec<u8>>;

    /// Release the bus device.
    ///
    /// Idempotent: a second `close()` is a no-op. After the first close,
    /// [`exchange`](Bus::exchange) returns
    /// [`Error::NotOpen`](crate::error::Error::NotOpen).
    async fn close(&mut self) -> Result<()>;

    /// Whether the bus device is currently open.
    fn is_open(&self) -> bool;
}

#[async_trait]
impl Bus for Box<dyn Bus> {
    async fn exchange(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        (**self).exchange(tx).await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

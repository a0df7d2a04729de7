//! CC1101 driver: register/strobe interface and radio state machine.
//!
//! [`Cc1101`] owns the bus and the chip's logical state exclusively.
//! State is never inferred from bus activity -- every transition goes
//! through an explicit strobe, and the driver's [`RadioState`] tracks
//! what the last strobe established.
//!
//! Settle intervals bound the chip's internal transition latency. They
//! are hard preconditions, not optimizations: configuration and status
//! registers are undefined until the post-reset settle elapses, and a
//! shortened wait leaves the chip in a state no subsequent strobe is
//! guaranteed to correct. They are plain sleeps and always run to
//! completion, even under shutdown pressure; only the acquisition loop's
//! poll sleep is cancellation-aware.

use std::time::Duration;

use tracing::{debug, trace, warn};

use snifflib_core::bus::Bus;
use snifflib_core::error::{Error, Result};

use crate::profile::RfProfile;
use crate::regs::{self, reg, status, strobe};

/// Wait after SRES before the register file is defined.
pub const RESET_SETTLE: Duration = Duration::from_millis(100);

/// Wait after each state-changing strobe in the flush/arm sequence.
pub const STROBE_SETTLE: Duration = Duration::from_millis(10);

/// The chip's logical state as established by explicit strobes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioState {
    /// Powered but never reset; register contents undefined.
    Uninitialized,
    /// Reset and settled; accepting configuration.
    Idle,
    /// RX enabled; bytes accumulate in the FIFO.
    Receiving,
}

impl RadioState {
    pub(crate) fn name(self) -> &'static str {
        match self {
            RadioState::Uninitialized => "Uninitialized",
            RadioState::Idle => "Idle",
            RadioState::Receiving => "Receiving",
        }
    }
}

impl std::fmt::Display for RadioState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// CC1101 transceiver driver over an exclusive [`Bus`].
#[derive(Debug)]
pub struct Cc1101<B: Bus> {
    bus: B,
    state: RadioState,
}

impl<B: Bus> Cc1101<B> {
    /// Wrap a bus. The radio starts [`RadioState::Uninitialized`];
    /// call [`reset`](Cc1101::reset) before anything else.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            state: RadioState::Uninitialized,
        }
    }

    /// The current logical state.
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// Shared access to the underlying bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn require_state(&self, expected: RadioState) -> Result<()> {
        if self.state != expected {
            return Err(Error::InvalidState {
                expected: expected.name(),
                found: self.state.name(),
            });
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Register/strobe interface
    //
    // These four operations are the only place the SPI addressing-mode
    // bits are applied; callers pass raw datasheet addresses.
    // -----------------------------------------------------------------

    /// Issue a command strobe and return the chip status byte.
    pub async fn strobe(&mut self, cmd: u8) -> Result<u8> {
        let resp = self.bus.exchange(&[cmd, 0x00]).await?;
        trace!(cmd, status = resp[0], "strobe");
        Ok(resp[0])
    }

    /// Write one configuration register.
    pub async fn write_register(&mut self, addr: u8, value: u8) -> Result<()> {
        self.bus.exchange(&[addr, value]).await?;
        trace!(addr, value, "write register");
        Ok(())
    }

    /// Read one register.
    pub async fn read_register(&mut self, addr: u8) -> Result<u8> {
        let resp = self.bus.exchange(&[addr | regs::READ_SINGLE, 0x00]).await?;
        trace!(addr, value = resp[1], "read register");
        Ok(resp[1])
    }

    /// Burst-read `count` bytes starting at `addr`.
    ///
    /// Returns exactly `count` bytes (the leading status byte of the
    /// exchange is stripped).
    pub async fn read_burst(&mut self, addr: u8, count: usize) -> Result<Vec<u8>> {
        let mut tx = vec![0x00; count + 1];
        tx[0] = addr | regs::READ_BURST;
        let resp = self.bus.exchange(&tx).await?;
        trace!(addr, count, "burst read");
        Ok(resp[1..].to_vec())
    }

    // -----------------------------------------------------------------
    // State controller
    // -----------------------------------------------------------------

    /// Reset the chip and wait for its register file to become defined.
    ///
    /// Valid from any state; afterwards the radio is [`RadioState::Idle`]
    /// with all configuration at chip defaults.
    pub async fn reset(&mut self) -> Result<()> {
        self.strobe(strobe::SRES).await?;
        tokio::time::sleep(RESET_SETTLE).await;
        self.state = RadioState::Idle;
        debug!("radio reset, now Idle");
        Ok(())
    }

    /// Read the silicon revision from the VERSION status register.
    pub async fn chip_version(&mut self) -> Result<u8> {
        self.read_register(status::VERSION).await
    }

    /// Apply a configuration profile: the three frequency bytes, then
    /// every `(register, value)` pair in profile order.
    ///
    /// Idle only. A bus fault mid-sequence leaves the chip's
    /// configuration undefined and yields
    /// [`Error::ConfigIncomplete`]; the logical state stays Idle and the
    /// sequence is never partially retried.
    pub async fn configure(&mut self, profile: &RfProfile) -> Result<()> {
        self.require_state(RadioState::Idle)?;

        let total = profile.write_count();
        let mut written = 0usize;

        let freq_writes = [
            (reg::FREQ2, profile.freq[0]),
            (reg::FREQ1, profile.freq[1]),
            (reg::FREQ0, profile.freq[2]),
        ];
        for (addr, value) in freq_writes.into_iter().chain(profile.regs.iter().copied()) {
            if let Err(e) = self.write_register(addr, value).await {
                return Err(Error::ConfigIncomplete {
                    written,
                    total,
                    source: Box::new(e),
                });
            }
            written += 1;
        }

        debug!(writes = total, "radio configured");
        Ok(())
    }

    /// Flush the RX FIFO and enter receive mode.
    ///
    /// Idle only. Strobes SIDLE (idempotent -- ensures the chip is not
    /// already receiving), SFRX, then SRX, settling after each. Flushing
    /// before every arm is mandatory: arming over a non-empty FIFO
    /// yields stale bytes misattributed to the next frame.
    pub async fn flush_and_arm(&mut self) -> Result<()> {
        self.require_state(RadioState::Idle)?;

        self.strobe(strobe::SIDLE).await?;
        tokio::time::sleep(STROBE_SETTLE).await;
        self.strobe(strobe::SFRX).await?;
        tokio::time::sleep(STROBE_SETTLE).await;
        self.strobe(strobe::SRX).await?;
        tokio::time::sleep(STROBE_SETTLE).await;

        self.state = RadioState::Receiving;
        debug!("RX armed");
        Ok(())
    }

    /// Leave receive mode.
    ///
    /// Safe from any state -- the chip tolerates a redundant SIDLE, and
    /// two consecutive calls both land in [`RadioState::Idle`].
    pub async fn disarm(&mut self) -> Result<()> {
        self.strobe(strobe::SIDLE).await?;
        self.state = RadioState::Idle;
        debug!("RX disarmed, now Idle");
        Ok(())
    }

    // -----------------------------------------------------------------
    // Acquisition helpers
    // -----------------------------------------------------------------

    /// Number of readable bytes in the RX FIFO.
    ///
    /// Bit 7 of RXBYTES is the overflow flag and is masked off -- a raw
    /// `0x80` reports zero readable bytes, not 128.
    pub async fn rx_byte_count(&mut self) -> Result<u8> {
        let raw = self.read_register(status::RXBYTES).await?;
        if raw & regs::RXBYTES_OVERFLOW != 0 {
            warn!(raw, "RX FIFO overflow flagged");
        }
        Ok(raw & regs::RXBYTES_COUNT_MASK)
    }

    /// Drain exactly `count` bytes from the RX FIFO.
    pub async fn drain_fifo(&mut self, count: u8) -> Result<Vec<u8>> {
        self.read_burst(regs::RX_FIFO, count as usize).await
    }

    // -----------------------------------------------------------------
    // Cleanup
    // -----------------------------------------------------------------

    /// Return the chip to idle and release the bus, exactly once.
    ///
    /// Best-effort: faults here are logged and swallowed so they can
    /// never mask the condition that triggered shutdown. A second call
    /// is a complete no-op -- in particular, it never attempts a second
    /// bus close.
    pub async fn shutdown(&mut self) {
        if !self.bus.is_open() {
            return;
        }
        if let Err(e) = self.disarm().await {
            warn!(error = %e, "disarm failed during shutdown");
        }
        if let Err(e) = self.bus.close().await {
            warn!(error = %e, "bus close failed during shutdown");
        }
        debug!("radio shut down, bus released");
    }
}

//! Builder for a configured, armed [`Sniffer`].
//!
//! Performs the full bring-up sequence -- reset, silicon check,
//! configuration, flush/arm -- so the sniffer it returns is already in
//! receive mode. On any setup failure the radio is shut down (chip
//! idled, bus released) before the error propagates; a setup fault never
//! leaks an open bus.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use snifflib_core::bus::Bus;
use snifflib_core::error::Result;

use crate::profile::{hz_for_freq_bytes, RfProfile};
use crate::radio::Cc1101;
use crate::sniffer::{Sniffer, DEFAULT_POLL_INTERVAL};

/// Builder for a [`Sniffer`].
///
/// # Example
///
/// ```no_run
/// use snifflib_cc1101::{RfProfile, SnifferBuilder};
/// use snifflib_transport::{SpiConfig, SpidevBus};
///
/// # async fn example() -> snifflib_core::Result<()> {
/// let bus = SpidevBus::open(SpiConfig::default()).await?;
/// let mut sniffer = SnifferBuilder::new()
///     .profile(RfProfile::ask_ook_433())
///     .build_with_bus(bus)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SnifferBuilder {
    profile: RfProfile,
    poll_interval: Duration,
    cancel: CancellationToken,
}

impl SnifferBuilder {
    /// Start from the default 433.92 MHz ASK/OOK profile, the default
    /// poll interval, and a fresh cancellation token.
    pub fn new() -> Self {
        Self {
            profile: RfProfile::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel: CancellationToken::new(),
        }
    }

    /// Use a specific RF configuration profile.
    pub fn profile(mut self, profile: RfProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the pause between occupancy polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Use an external cancellation token (e.g. wired to a signal
    /// handler) instead of a fresh one.
    pub fn cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Bring the radio up on the given bus and return an armed sniffer.
    ///
    /// Sequence: reset (settled), silicon version check (advisory),
    /// configure, flush and arm. On failure the radio is shut down
    /// before the error is returned.
    pub async fn build_with_bus<B: Bus>(self, bus: B) -> Result<Sniffer<B>> {
        let mut radio = Cc1101::new(bus);

        match Self::bring_up(&mut radio, &self.profile).await {
            Ok(()) => Ok(Sniffer::new(radio, self.poll_interval, self.cancel)),
            Err(e) => {
                radio.shutdown().await;
                Err(e)
            }
        }
    }

    async fn bring_up<B: Bus>(radio: &mut Cc1101<B>, profile: &RfProfile) -> Result<()> {
        radio.reset().await?;

        let version = radio.chip_version().await?;
        if version == 0x00 || version == 0xFF {
            // A floating bus reads all-zeros or all-ones; the radio is
            // probably not connected.
            warn!(version, "unexpected silicon version, is the radio wired up?");
        } else {
            debug!(version, "silicon version");
        }

        radio.configure(profile).await?;
        radio.flush_and_arm().await?;

        info!(
            freq_hz = hz_for_freq_bytes(profile.freq),
            "radio configured and armed"
        );
        Ok(())
    }
}

impl Default for SnifferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snifflib_core::error::Error;
    use snifflib_test_harness::MockBus;

    use crate::radio::RadioState;
    use crate::regs::{self, reg, status, strobe};

    const STATUS: u8 = 0x0F;

    fn expect_strobe(mock: &mut MockBus, cmd: u8) {
        mock.expect(&[cmd, 0x00], &[STATUS, 0x00]);
    }

    fn expect_write(mock: &mut MockBus, addr: u8, value: u8) {
        mock.expect(&[addr, value], &[STATUS, 0x00]);
    }

    fn expect_bring_up(mock: &mut MockBus, profile: &RfProfile) {
        expect_strobe(mock, strobe::SRES);
        mock.expect(
            &[status::VERSION | regs::READ_SINGLE, 0x00],
            &[STATUS, 0x14],
        );
        expect_write(mock, reg::FREQ2, profile.freq[0]);
        expect_write(mock, reg::FREQ1, profile.freq[1]);
        expect_write(mock, reg::FREQ0, profile.freq[2]);
        for &(addr, value) in &profile.regs {
            expect_write(mock, addr, value);
        }
        expect_strobe(mock, strobe::SIDLE);
        expect_strobe(mock, strobe::SFRX);
        expect_strobe(mock, strobe::SRX);
    }

    #[tokio::test(start_paused = true)]
    async fn build_brings_radio_to_receiving() {
        let profile = RfProfile::ask_ook_433();
        let mut probe = MockBus::new();
        expect_bring_up(&mut probe, &profile);

        let sniffer = SnifferBuilder::new()
            .profile(profile)
            .build_with_bus(probe.clone())
            .await
            .unwrap();

        assert_eq!(sniffer.radio().state(), RadioState::Receiving);
        assert_eq!(probe.remaining_expectations(), 0);
        assert_eq!(probe.close_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn build_works_against_silent_bus() {
        // A silent bus answers zeros everywhere -- the wiring smoke test
        // used by the CLI's --mock flag.
        let sniffer = SnifferBuilder::new()
            .build_with_bus(MockBus::silent())
            .await
            .unwrap();
        assert_eq!(sniffer.radio().state(), RadioState::Receiving);
    }

    #[tokio::test(start_paused = true)]
    async fn setup_fault_shuts_down_and_propagates() {
        let mut probe = MockBus::new();
        expect_strobe(&mut probe, strobe::SRES);
        probe.expect_fault(); // version read faults
        expect_strobe(&mut probe, strobe::SIDLE); // shutdown's disarm

        let err = SnifferBuilder::new()
            .build_with_bus(probe.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BusTransfer(_)));
        // Cleanup ran on the failure path: chip idled, bus closed once.
        assert_eq!(probe.close_calls(), 1);
        assert!(!probe.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn config_fault_surfaces_config_incomplete() {
        let mut probe = MockBus::new();
        expect_strobe(&mut probe, strobe::SRES);
        probe.expect(
            &[status::VERSION | regs::READ_SINGLE, 0x00],
            &[STATUS, 0x14],
        );
        expect_write(&mut probe, reg::FREQ2, 0x10);
        probe.expect_fault(); // FREQ1 write faults
        expect_strobe(&mut probe, strobe::SIDLE); // shutdown's disarm

        let err = SnifferBuilder::new()
            .build_with_bus(probe.clone())
            .await
            .unwrap_err();

        match err {
            Error::ConfigIncomplete { written, total, .. } => {
                assert_eq!(written, 1);
                assert_eq!(total, 23);
            }
            other => panic!("expected ConfigIncomplete, got {other}"),
        }
        assert_eq!(probe.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn builder_passes_cancel_token_through() {
        let cancel = CancellationToken::new();
        let sniffer = SnifferBuilder::new()
            .cancel_token(cancel.clone())
            .build_with_bus(MockBus::silent())
            .await
            .unwrap();

        cancel.cancel();
        assert!(sniffer.cancel_token().is_cancelled());
    }
}

//! snifflib-cc1101: CC1101 sub-GHz transceiver driver and acquisition loop.
//!
//! The CC1101 is driven over SPI with a small command set: single-byte
//! strobes for state transitions, single register reads/writes for
//! configuration, and burst reads for draining the 64-byte RX FIFO. This
//! crate owns that protocol and the polled acquisition loop on top of it.
//!
//! # Key types
//!
//! - [`Cc1101`] -- register/strobe interface and radio state machine
//! - [`RfProfile`] -- one complete RF configuration
//! - [`Sniffer`] -- the polled acquisition loop
//! - [`SnifferBuilder`] -- bring-up (reset, configure, arm) in one call
//!
//! Capture is receive-only and protocol-blind: the packet engine is
//! disabled and whatever bytes are on the air land in the FIFO, to be
//! reported upward as [`CapturedFrame`](snifflib_core::CapturedFrame)s.

pub mod builder;
pub mod profile;
pub mod radio;
pub mod regs;
pub mod sniffer;

pub use builder::SnifferBuilder;
pub use profile::{freq_bytes_for_hz, hz_for_freq_bytes, RfProfile, FXOSC_HZ};
pub use radio::{Cc1101, RadioState, RESET_SETTLE, STROBE_SETTLE};
pub use sniffer::{Sniffer, DEFAULT_POLL_INTERVAL};

//! # snifflib -- Sub-GHz Packet Sniffing for Security Research
//!
//! `snifflib` is an asynchronous Rust library for passively capturing
//! arbitrary-protocol ASK/OOK packets with a TI CC1101 transceiver on a
//! Linux SPI bus (e.g. a Raspberry Pi with the radio on SPI0). It drives
//! the chip's state machine, polls the receive FIFO, and hands each
//! drained read upward as a timestamped, hex-encoded frame record.
//!
//! ## Quick Start
//!
//! ```no_run
//! use snifflib::TextSink;
//! use snifflib::cc1101::{RfProfile, SnifferBuilder};
//! use snifflib::transport::{SpiConfig, SpidevBus};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let bus = SpidevBus::open(SpiConfig::default()).await?;
//!     let mut sniffer = SnifferBuilder::new()
//!         .profile(RfProfile::ask_ook_433())
//!         .build_with_bus(bus)
//!         .await?;
//!
//!     let mut sink = TextSink::stdout();
//!     let result = sniffer.run(&mut sink).await;
//!     sniffer.shutdown().await;
//!     Ok(result?)
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                   | Purpose                                     |
//! |-------------------------|---------------------------------------------|
//! | `snifflib-core`         | `Bus` trait, frames, sinks, errors          |
//! | `snifflib-transport`    | Linux spidev bus implementation             |
//! | `snifflib-cc1101`       | CC1101 driver and acquisition loop          |
//! | `snifflib-test-harness` | Mock bus and sinks for hardware-free tests  |
//! | **`snifflib`**          | This facade crate -- re-exports everything  |
//!
//! ## What a "packet" is here
//!
//! The capture is protocol-blind. A frame is exactly the bytes present
//! in the receive FIFO at the moment a poll observes nonzero occupancy --
//! an operational boundary, not a demodulated, protocol-verified unit.
//! Decoding is deliberately left to downstream consumers.

pub use snifflib_core::*;

/// CC1101 driver backend.
///
/// Provides [`Cc1101`](cc1101::Cc1101), [`Sniffer`](cc1101::Sniffer),
/// and [`SnifferBuilder`](cc1101::SnifferBuilder) for driving the radio
/// over any [`Bus`] implementation.
pub mod cc1101 {
    pub use snifflib_cc1101::*;
}

/// Bus transports.
///
/// Provides [`SpidevBus`](transport::SpidevBus) for real hardware on
/// Linux spidev device nodes.
pub mod transport {
    pub use snifflib_transport::*;
}

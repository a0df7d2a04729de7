//! snifflib-transport: Bus implementations for snifflib.
//!
//! Currently one backend: [`SpidevBus`], the Linux spidev userspace SPI
//! interface. The mock bus used in tests lives in the
//! `snifflib-test-harness` crate.

pub mod spi;

pub use spi::{SpiConfig, SpidevBus};

//! snifflib-core: Core traits, types, and error definitions for snifflib.
//!
//! This crate defines the hardware-agnostic abstractions the radio driver
//! and application are built on. Consumers depend on these types without
//! pulling in the spidev transport or a specific chip driver.
//!
//! # Key types
//!
//! - [`Bus`] -- full-duplex byte-level bus to the radio
//! - [`CapturedFrame`] / [`FrameRecord`] -- one drained FIFO read
//! - [`FrameSink`] -- the boundary to the logging collaborator
//! - [`Error`] / [`Result`] -- error handling

pub mod bus;
pub mod error;
pub mod frame;
pub mod sink;

// Re-export key types at crate root for ergonomic `use snifflib_core::*`.
pub use bus::Bus;
pub use error::{Error, Result};
pub use frame::{CapturedFrame, FrameRecord, MAX_FRAME_LEN, TIMESTAMP_FORMAT};
pub use sink::{FrameSink, JsonSink, TextSink};

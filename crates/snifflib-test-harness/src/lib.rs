//! snifflib-test-harness: Mock bus and frame sinks for testing snifflib.
//!
//! This crate provides [`MockBus`] for deterministic unit testing of the
//! radio driver without real hardware, and [`CollectSink`] for asserting
//! on emitted frame records.

pub mod collect_sink;
pub mod mock_bus;

pub use collect_sink::CollectSink;
pub use mock_bus::MockBus;

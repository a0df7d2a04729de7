//! Error types for snifflib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Bus-level, driver-level, and frame
//! emission errors are all captured here.

/// The error type for all snifflib operations.
///
/// Variants cover the failure modes of a polled radio driver: the SPI
/// bus failing to open or transfer, the radio state machine being driven
/// out of sequence, and the frame sink refusing a record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The SPI device could not be opened (missing, busy, or misconfigured).
    #[error("bus open failed: {0}")]
    BusOpen(String),

    /// A full-duplex transfer faulted mid-exchange.
    #[error("bus transfer failed: {0}")]
    BusTransfer(String),

    /// A bus operation was attempted after `close()`.
    #[error("bus not open")]
    NotOpen,

    /// A configuration write sequence did not reach its terminal byte.
    ///
    /// The radio's register file is undefined at this point; the only
    /// recovery is a fresh `reset()` + `configure()` in a new process.
    #[error("configuration incomplete: {written} of {total} register writes applied")]
    ConfigIncomplete {
        /// Number of register writes that completed.
        written: usize,
        /// Number of register writes the profile required.
        total: usize,
        /// The bus fault that interrupted the sequence.
        #[source]
        source: Box<Error>,
    },

    /// An operation was invoked from the wrong radio state.
    #[error("invalid radio state: expected {expected}, found {found}")]
    InvalidState {
        /// The state the operation requires.
        expected: &'static str,
        /// The state the radio was actually in.
        found: &'static str,
    },

    /// The frame sink rejected a record.
    ///
    /// Sink errors are never fatal to the acquisition loop; the frame is
    /// logged and dropped.
    #[error("frame sink error: {0}")]
    Sink(String),

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

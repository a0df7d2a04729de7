//! CC1101 register map, command strobes, and SPI addressing bits.
//!
//! Addresses are the raw datasheet values; the addressing-mode bits
//! ([`READ_SINGLE`], [`READ_BURST`]) are applied only by the bus
//! operations on [`Cc1101`](crate::radio::Cc1101), never by callers.

/// OR'd onto an address for a single register read.
pub const READ_SINGLE: u8 = 0x80;
/// OR'd onto an address for a burst read.
pub const READ_BURST: u8 = 0xC0;

/// Configuration registers.
pub mod reg {
    /// GDO0 output pin configuration.
    pub const IOCFG0: u8 = 0x02;
    /// RX FIFO and TX FIFO thresholds.
    pub const FIFOTHR: u8 = 0x03;
    /// Packet automation control.
    pub const PKTCTRL0: u8 = 0x08;
    /// Frequency synthesizer control.
    pub const FSCTRL1: u8 = 0x0B;
    /// Frequency control word, high byte.
    pub const FREQ2: u8 = 0x0D;
    /// Frequency control word, middle byte.
    pub const FREQ1: u8 = 0x0E;
    /// Frequency control word, low byte.
    pub const FREQ0: u8 = 0x0F;
    /// Modem configuration (channel bandwidth, data rate exponent).
    pub const MDMCFG4: u8 = 0x10;
    /// Modem configuration (data rate mantissa).
    pub const MDMCFG3: u8 = 0x11;
    /// Modem configuration (modulation, sync mode).
    pub const MDMCFG2: u8 = 0x12;
    /// Modem deviation setting.
    pub const DEVIATN: u8 = 0x15;
    /// Main radio control state machine configuration.
    pub const MCSM1: u8 = 0x17;
    /// Main radio control state machine configuration.
    pub const MCSM0: u8 = 0x18;
    /// Frequency offset compensation configuration.
    pub const FOCCFG: u8 = 0x19;
    /// AGC control.
    pub const AGCCTRL2: u8 = 0x1B;
    /// Wake-on-radio control.
    pub const WORCTRL: u8 = 0x1E;
    /// Front end TX configuration.
    pub const FREND0: u8 = 0x22;
    /// Frequency synthesizer calibration.
    pub const FSCAL3: u8 = 0x25;
    /// Frequency synthesizer calibration.
    pub const FSCAL1: u8 = 0x27;
    /// Frequency synthesizer calibration.
    pub const FSCAL0: u8 = 0x29;
    /// Various test settings.
    pub const TEST2: u8 = 0x2C;
    /// Various test settings.
    pub const TEST1: u8 = 0x2D;
    /// Various test settings.
    pub const TEST0: u8 = 0x2E;
    /// PA table address.
    pub const PATABLE: u8 = 0x3E;
}

/// Command strobes -- single bytes triggering an immediate chip action.
pub mod strobe {
    /// Reset chip.
    pub const SRES: u8 = 0x30;
    /// Enable RX.
    pub const SRX: u8 = 0x34;
    /// Exit RX/TX, go to IDLE.
    pub const SIDLE: u8 = 0x36;
    /// Flush the RX FIFO.
    pub const SFRX: u8 = 0x3A;
}

/// Read-only status registers.
pub mod status {
    /// Silicon version number.
    pub const VERSION: u8 = 0x31;
    /// Overflow flag and number of bytes in the RX FIFO.
    pub const RXBYTES: u8 = 0x3B;
}

/// RX FIFO access address.
pub const RX_FIFO: u8 = 0x3F;

/// Mask selecting the byte-count field of RXBYTES.
///
/// Bit 7 is the RX FIFO overflow flag and must never be treated as part
/// of the count: a raw `0x80` means "overflowed, zero readable bytes",
/// not a 128-byte burst.
pub const RXBYTES_COUNT_MASK: u8 = 0x7F;

/// RX FIFO overflow flag bit of RXBYTES.
pub const RXBYTES_OVERFLOW: u8 = 0x80;

/// RX FIFO depth in bytes.
pub const FIFO_SIZE: usize = 64;

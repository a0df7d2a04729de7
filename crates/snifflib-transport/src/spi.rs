//! Linux spidev transport for radio register access.
//!
//! This module provides [`SpidevBus`], which implements the [`Bus`] trait
//! over a `/dev/spidevB.C` device node -- the kernel's userspace interface
//! to an SPI controller with hardware chip-select.
//!
//! Transfers here are short, fixed-size, microsecond-scale ioctls (the
//! longest is one address byte plus a 63-byte FIFO drain), so the
//! blocking ioctl is issued inline rather than shipped to a worker
//! thread.
//!
//! # Example
//!
//! ```no_run
//! use snifflib_transport::{SpiConfig, SpidevBus};
//! use snifflib_core::Bus;
//!
//! # async fn example() -> snifflib_core::Result<()> {
//! // Open /dev/spidev0.0 at 500 kHz, SPI mode 1.
//! let mut bus = SpidevBus::open(SpiConfig::default()).await?;
//!
//! // Strobe-style exchange: command byte plus one dummy byte.
//! let response = bus.exchange(&[0x3D, 0x00]).await?;
//! let _status = response[0];
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};

use snifflib_core::bus::Bus;
use snifflib_core::error::{Error, Result};

/// SPI device addressing and clocking configuration.
///
/// Defaults match the values the radio's register interface is specified
/// for: bus 0, chip-select 0, 500 kHz, mode 1. These are constants
/// consumed from the platform, not negotiated at runtime.
#[derive(Debug, Clone)]
pub struct SpiConfig {
    /// SPI bus (controller) index -- the `B` in `/dev/spidevB.C`.
    pub bus: u8,
    /// Chip-select index -- the `C` in `/dev/spidevB.C`.
    pub cs: u8,
    /// Clock speed in hertz.
    pub speed_hz: u32,
    /// SPI mode (0-3, clock polarity/phase).
    pub mode: u8,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            cs: 0,
            speed_hz: 500_000,
            mode: 1,
        }
    }
}

impl SpiConfig {
    /// The device node this configuration addresses, e.g. `/dev/spidev0.0`.
    pub fn device_path(&self) -> String {
        format!("/dev/spidev{}.{}", self.bus, self.cs)
    }
}

/// Map a numeric SPI mode to the kernel mode flags.
fn mode_flags(mode: u8) -> Result<SpiModeFlags> {
    match mode {
        0 => Ok(SpiModeFlags::SPI_MODE_0),
        1 => Ok(SpiModeFlags::SPI_MODE_1),
        2 => Ok(SpiModeFlags::SPI_MODE_2),
        3 => Ok(SpiModeFlags::SPI_MODE_3),
        other => Err(Error::BusOpen(format!("invalid SPI mode {other} (expected 0-3)"))),
    }
}

/// SPI bus transport over a Linux spidev device node.
///
/// Owns the device exclusively for the process lifetime; a second driver
/// instance on the same bus/chip-select pair would corrupt the radio's
/// state transitions with no detection.
pub struct SpidevBus {
    /// The underlying device, `None` after close.
    dev: Option<Spidev>,
    /// Device path for logging.
    path: String,
}

impl SpidevBus {
    /// Open and configure the SPI device described by `config`.
    ///
    /// Fails with [`Error::BusOpen`] when the device node is missing,
    /// busy, or rejects the clock/mode configuration.
    pub async fn open(config: SpiConfig) -> Result<Self> {
        let path = config.device_path();
        tracing::debug!(
            path = %path,
            speed_hz = config.speed_hz,
            mode = config.mode,
            "opening SPI device"
        );

        let flags = mode_flags(config.mode)?;
        let mut dev = Spidev::open(&path)
            .map_err(|e| Error::BusOpen(format!("{path}: {e}")))?;

        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.speed_hz)
            .mode(flags)
            .build();
        dev.configure(&options)
            .map_err(|e| Error::BusOpen(format!("{path}: configure: {e}")))?;

        tracing::info!(path = %path, speed_hz = config.speed_hz, "SPI device opened");

        Ok(Self {
            dev: Some(dev),
            path,
        })
    }

    /// The device path this bus was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl Bus for SpidevBus {
    async fn exchange(&mut self, tx: &[u8]) -> Result<Vec<u8>> {
        let dev = self.dev.as_mut().ok_or(Error::NotOpen)?;

        let mut rx = vec![0u8; tx.len()];
        {
            let mut transfer = SpidevTransfer::read_write(tx, &mut rx);
            dev.transfer(&mut transfer).map_err(|e| {
                tracing::error!(path = %self.path, error = %e, "SPI transfer failed");
                Error::BusTransfer(format!("{}: {e}", self.path))
            })?;
        }

        tracing::trace!(path = %self.path, tx = ?tx, rx = ?rx, "SPI exchange");
        Ok(rx)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(dev) = self.dev.take() {
            tracing::debug!(path = %self.path, "closing SPI device");
            // Dropping the Spidev closes the file descriptor.
            drop(dev);
            tracing::info!(path = %self.path, "SPI device closed");
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.dev.is_some()
    }
}

impl Drop for SpidevBus {
    fn drop(&mut self) {
        if self.dev.is_some() {
            tracing::debug!(path = %self.path, "SpidevBus dropped while open, closing device");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spi_config_default() {
        let config = SpiConfig::default();
        assert_eq!(config.bus, 0);
        assert_eq!(config.cs, 0);
        assert_eq!(config.speed_hz, 500_000);
        assert_eq!(config.mode, 1);
    }

    #[test]
    fn device_path_formatting() {
        let config = SpiConfig {
            bus: 1,
            cs: 2,
            ..SpiConfig::default()
        };
        assert_eq!(config.device_path(), "/dev/spidev1.2");
        assert_eq!(SpiConfig::default().device_path(), "/dev/spidev0.0");
    }

    #[test]
    fn mode_flags_mapping() {
        assert_eq!(mode_flags(0).unwrap(), SpiModeFlags::SPI_MODE_0);
        assert_eq!(mode_flags(1).unwrap(), SpiModeFlags::SPI_MODE_1);
        assert_eq!(mode_flags(2).unwrap(), SpiModeFlags::SPI_MODE_2);
        assert_eq!(mode_flags(3).unwrap(), SpiModeFlags::SPI_MODE_3);
    }

    #[test]
    fn mode_flags_rejects_out_of_range() {
        let err = mode_flags(4).unwrap_err();
        assert!(matches!(err, Error::BusOpen(_)));
        assert!(err.to_string().contains("invalid SPI mode 4"));
    }
}

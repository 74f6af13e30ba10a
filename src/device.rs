//! Single byte register access to an I2C device.
//!
//! # Examples
//!
//! Read register `0x10` of the device at `0x20` on the first bus, with the
//! data lines wired in reverse
//!
//! ```rust,no_run
//! # use i2cio::{device::Device, remap::RemapTable};
//! let mut dev = Device::open("/dev/i2c-0").unwrap();
//! dev.set_remap(RemapTable::reversed());
//! dev.set_address(0x20).unwrap();
//! let value = dev.read_byte(0x10).unwrap();
//! println!("0x{:02X}", value);
//! dev.close().unwrap();
//! ```
//!
//! # Implementation
//!
//! A register read is two messages, a one byte write of the register
//! followed by a one byte read. A register write is one two byte message,
//! register then data.
//!
//! The data byte goes through the handle's [`RemapTable`] in both directions.
//! The register byte never does.
use crate::{
    bus::{Bus, LinuxBus},
    error::{Error, Phase, TransferError},
    remap::RemapTable,
};
use std::{io, path::Path};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Mask applied to slave addresses, only 7-bit addressing is supported.
pub const ADDRESS_MASK: u8 = 0x7F;

/// An open I2C bus, a selected device on it, and the bit mapping used for
/// data.
///
/// Not meant for sharing between threads. Selecting an address and
/// transferring are separate steps, every method takes `&mut self` so they
/// can't interleave with another caller's.
#[derive(Debug)]
pub struct Device<B = LinuxBus> {
    bus: B,

    /// Applied to every data byte
    remap: RemapTable,

    /// Last successfully selected slave address
    address: Option<u8>,
}

impl Device<LinuxBus> {
    /// Open the I2C bus controller at `path`, usually `/dev/i2c-N`.
    ///
    /// The remap table starts as [`RemapTable::identity`], and no device is
    /// selected.
    ///
    /// # Errors
    ///
    /// - [`Error::Open`] if `path` can't be opened for reading and writing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bus = LinuxBus::open(path).map_err(|source| Error::Open {
            path: path.into(),
            source,
        })?;
        Ok(Self::with_bus(bus))
    }

    /// Path of the open bus controller
    pub fn path(&self) -> &Path {
        self.bus.path()
    }
}

// Public
impl<B: Bus> Device<B> {
    /// Use an already open `bus`.
    pub fn with_bus(bus: B) -> Self {
        Self {
            bus,
            remap: RemapTable::identity(),
            address: None,
        }
    }

    /// Select the device at `address` for all following transactions.
    ///
    /// Only the low 7 bits are used, the rest are silently dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::Address`] if the bus controller rejects it. The handle is
    ///   still usable and keeps any previous selection.
    pub fn set_address(&mut self, address: u8) -> Result<()> {
        let address = address & ADDRESS_MASK;
        self.bus
            .set_slave_address(address)
            .map_err(|source| Error::Address { address, source })?;
        self.address = Some(address);
        Ok(())
    }

    /// Currently selected slave address, if any.
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Replace the bit mapping.
    pub fn set_remap(&mut self, table: RemapTable) {
        self.remap = table;
    }

    /// Validate `entries` and use them as the new bit mapping.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTable`] if there aren't exactly 8 entries, or any is
    ///   outside `-1..=7`. The current mapping is kept.
    pub fn set_remap_entries(&mut self, entries: &[i8]) -> Result<()> {
        self.remap = RemapTable::try_from(entries)?;
        Ok(())
    }

    /// Current bit mapping
    pub fn remap(&self) -> RemapTable {
        self.remap
    }

    /// Read the 8-bit register `register` of the selected device.
    ///
    /// The received byte is remapped before being returned.
    ///
    /// # Errors
    ///
    /// - [`Error::Transfer`] if either message fails or moves the wrong
    ///   number of bytes. If writing the register fails, nothing is read.
    pub fn read_byte(&mut self, register: u8) -> Result<u8> {
        let sent = self.bus.write(&[register]);
        check(Phase::Register, 1, sent)?;

        let mut data = [0u8; 1];
        let received = self.bus.read(&mut data);
        check(Phase::Read, 1, received)?;

        Ok(self.remap.apply(data[0]))
    }

    /// Write `data`, remapped, to the 8-bit register `register` of the
    /// selected device.
    ///
    /// # Errors
    ///
    /// - [`Error::Transfer`] if the message fails or doesn't move exactly 2
    ///   bytes.
    pub fn write_byte(&mut self, register: u8, data: u8) -> Result<()> {
        let buf = [register, self.remap.apply(data)];
        let sent = self.bus.write(&buf);
        check(Phase::Write, buf.len(), sent)?;
        Ok(())
    }

    /// Release the bus.
    ///
    /// Dropping the device does the same, but can't report errors.
    ///
    /// # Errors
    ///
    /// - If the bus does. It is released regardless.
    pub fn close(self) -> io::Result<()> {
        self.bus.close()
    }

    /// The underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }
}

/// Turn the outcome of a single transfer into an error unless exactly
/// `expected` bytes moved.
fn check(phase: Phase, expected: usize, res: io::Result<usize>) -> Result<(), TransferError> {
    match res {
        Ok(actual) if actual == expected => Ok(()),
        Ok(actual) => Err(TransferError::Short {
            phase,
            expected,
            actual,
        }),
        Err(source) => Err(TransferError::Io { phase, source }),
    }
}

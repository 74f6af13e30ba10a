//! Linux `i2c-dev` bus access.
//!
//! The kernel exposes each I2C adapter as a character device, `/dev/i2c-N`.
//! After selecting a slave with the `I2C_SLAVE` ioctl, plain `read(2)` and
//! `write(2)` on the file become I2C read and write messages to that slave.
//!
//! See the [kernel docs][1] for details.
//!
//! [1]: https://www.kernel.org/doc/Documentation/i2c/dev-interface
use std::{
    fs::{File, OpenOptions},
    io,
    os::unix::io::{AsRawFd, IntoRawFd, RawFd},
    path::{Path, PathBuf},
};

use libc::c_int;

/// Internal ioctl stuff
mod _impl {
    use nix::ioctl_write_int_bad;

    ioctl_write_int_bad!(
        /// The `I2C_SLAVE` ioctl, defined in
        /// <linux/i2c-dev.h>
        ///
        /// Not encoded with `_IOW`, the address is passed by value.
        set_slave_address,
        0x0703
    );
}

/// The primitives a bus controller has to provide.
///
/// Every method is a single blocking call. Nothing is retried, including on
/// `EINTR` or a short count.
pub trait Bus {
    /// Direct following transfers at the 7-bit slave `address`.
    ///
    /// Callers are expected to have masked `address` already.
    fn set_slave_address(&mut self, address: u8) -> io::Result<()>;

    /// Send `buf` as one write message, returning how many bytes went out.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Receive into `buf` as one read message, returning how many bytes came
    /// in.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Release the bus.
    ///
    /// The default just drops `self`.
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// An open `/dev/i2c-N` device file
#[derive(Debug)]
pub struct LinuxBus {
    file: File,

    /// Path it was opened from, for diagnostics.
    path: PathBuf,
}

impl LinuxBus {
    /// Open the bus controller at `path` for reading and writing.
    ///
    /// # Errors
    ///
    /// - If I/O does, for example a missing device or insufficient
    ///   permissions.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self {
            file,
            path: path.into(),
        })
    }

    /// Path this bus was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Bus for LinuxBus {
    fn set_slave_address(&mut self, address: u8) -> io::Result<()> {
        match unsafe { _impl::set_slave_address(self.file.as_raw_fd(), c_int::from(address)) } {
            Ok(_) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(rustix::io::write(&self.file, buf)?)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(rustix::io::read(&self.file, buf)?)
    }

    /// Unlike dropping the [`File`], this reports errors from `close(2)`.
    ///
    /// The descriptor is released either way.
    fn close(self) -> io::Result<()> {
        let fd = self.file.into_raw_fd();
        match nix::unistd::close(fd) {
            Ok(()) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AsRawFd for LinuxBus {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

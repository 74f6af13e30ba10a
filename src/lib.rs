//! Single byte register access to I2C devices through Linux `i2c-dev`
//!
//! Open a bus with [`Device::open`], select a device with
//! [`Device::set_address`], then read or write one register at a time with
//! [`Device::read_byte`] and [`Device::write_byte`].
//!
//! Every data byte passes through a [`RemapTable`], which can reorder or drop
//! bits to correct a board that wires a device's data lines differently from
//! its datasheet.
//!
//! # Implementation details
//!
//! This uses the `i2c-dev` character devices, so the `i2c-dev` kernel module
//! has to be loaded and the caller needs read and write access to
//! `/dev/i2c-N`.
//!
//! Nothing here logs, retries, or spawns threads. Every call blocks until the
//! kernel is done with the transfer.
#![doc(html_root_url = "https://docs.rs/i2cio/0.1.0")]

pub mod bus;
pub mod device;
pub mod error;
pub mod remap;
mod util;

#[doc(inline)]
pub use self::{
    device::Device,
    error::Error,
    remap::{remap, RemapTable},
    util::DEFAULT_BUS,
};

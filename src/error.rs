//! Error handling stuff
use displaydoc::Display;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Error type for [`crate::device::Device`]
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Couldn't open {path:?}
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Couldn't select device address {address:#04X}
    Address {
        address: u8,
        #[source]
        source: io::Error,
    },

    /// Invalid bit mapping
    InvalidTable(#[from] InvalidTable),

    /// Transfer failed
    Transfer(#[from] TransferError),
}

/// A remap table that can't be used.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTable {
    /// entry {index} is {value}, must be in -1..=7
    Entry { index: usize, value: i8 },

    /// expected 8 entries, got {0}
    Length(usize),

    /// entry {index} is not a number
    Parse { index: usize },
}

/// Which half of a transaction a [`TransferError`] happened in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// register select
    Register,

    /// data read
    Read,

    /// data write
    Write,
}

/// A byte transfer that didn't complete.
///
/// Never retried, the caller owns retry policy.
#[derive(Debug, Display, Error)]
pub enum TransferError {
    /// {phase} moved {actual} of {expected} bytes
    Short {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    /// {phase} failed
    Io {
        phase: Phase,
        #[source]
        source: io::Error,
    },
}

impl TransferError {
    /// The transaction phase that failed
    pub fn phase(&self) -> Phase {
        match self {
            TransferError::Short { phase, .. } | TransferError::Io { phase, .. } => *phase,
        }
    }
}

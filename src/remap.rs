//! Bit remapping of transferred bytes.
//!
//! Boards sometimes wire a device's data lines in a different order than the
//! device documents them. A [`RemapTable`] moves every bit of a byte to
//! where it should be, or drops it.
//!
//! # Collisions
//!
//! Tables don't have to be permutations. When two source bits land on the
//! same destination the destination is set if *either* source is, that is,
//! the bits are OR'd together. The result is deterministic but probably not
//! what you meant, so avoid it.
use crate::error::InvalidTable;
use std::{fmt, str::FromStr};

pub type Result<T, E = InvalidTable> = std::result::Result<T, E>;

/// Entry value meaning "drop this bit".
pub const DISCARD: i8 = -1;

/// How each of the 8 bits of a byte is relocated.
///
/// Index is the source bit, value is the destination bit, or [`DISCARD`].
/// Always valid, construction checks every entry is in `-1..=7`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RemapTable([i8; 8]);

// Public
impl RemapTable {
    /// Create a table from `entries`.
    ///
    /// # Errors
    ///
    /// - [`InvalidTable::Entry`] for the first entry outside `-1..=7`
    pub fn new(entries: [i8; 8]) -> Result<Self> {
        match entries.iter().position(|&v| !(DISCARD..=7).contains(&v)) {
            Some(index) => Err(InvalidTable::Entry {
                index,
                value: entries[index],
            }),
            None => Ok(Self(entries)),
        }
    }

    /// Every bit stays where it is.
    pub const fn identity() -> Self {
        Self([0, 1, 2, 3, 4, 5, 6, 7])
    }

    /// Bit `i` goes to bit `7 - i`.
    pub const fn reversed() -> Self {
        Self([7, 6, 5, 4, 3, 2, 1, 0])
    }

    /// Every bit is dropped, everything maps to zero.
    pub const fn discard_all() -> Self {
        Self([DISCARD; 8])
    }

    /// Table entries, indexed by source bit
    pub fn entries(&self) -> [i8; 8] {
        self.0
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Remap `byte` through this table.
    pub fn apply(&self, byte: u8) -> u8 {
        remap(self, byte)
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<&[i8]> for RemapTable {
    type Error = InvalidTable;

    fn try_from(entries: &[i8]) -> Result<Self> {
        let entries: [i8; 8] = entries
            .try_into()
            .map_err(|_| InvalidTable::Length(entries.len()))?;
        Self::new(entries)
    }
}

impl TryFrom<[i8; 8]> for RemapTable {
    type Error = InvalidTable;

    fn try_from(entries: [i8; 8]) -> Result<Self> {
        Self::new(entries)
    }
}

/// Parse 8 comma separated entries, like `7,6,5,4,3,2,1,0` or
/// `0,1,2,3,-1,-1,-1,-1`. Whitespace around entries is ignored.
impl FromStr for RemapTable {
    type Err = InvalidTable;

    fn from_str(s: &str) -> Result<Self> {
        let entries = s
            .split(',')
            .enumerate()
            .map(|(index, e)| e.trim().parse::<i8>().map_err(|_| InvalidTable::Parse { index }))
            .collect::<Result<Vec<_>>>()?;
        Self::try_from(entries.as_slice())
    }
}

/// Formats as `0, 1, 2, 3, 4, 5, 6, 7`
impl fmt::Display for RemapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Move every set bit of `byte` to the position `table` says.
///
/// Output bits default to zero. Discarded bits never contribute, colliding
/// bits are OR'd.
pub fn remap(table: &RemapTable, byte: u8) -> u8 {
    table
        .0
        .iter()
        .enumerate()
        .filter(|&(src, &dst)| dst != DISCARD && byte & (1u8 << src) != 0)
        .fold(0u8, |out, (_, &dst)| out | 1u8 << dst)
}

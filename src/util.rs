//! Utility functions

/// Device file location.
///
/// Technically udev could put these anywhere, but `i2c-dev` nodes are always
/// found here in practice.
pub const DEV_PATH: &str = "/dev";

/// Bus used when none is given, the first adapter under [`DEV_PATH`].
pub const DEFAULT_BUS: &str = "/dev/i2c-0";

//! Command line arguments for `i2cio`
use clap::{ArgAction, Parser};
use displaydoc::Display;
use i2cio::{RemapTable, DEFAULT_BUS};
use thiserror::Error;

/// Read or write a single register of an I2C device
#[derive(Debug, Parser)]
#[command(name = "i2cio", version, about, long_about = None)]
pub struct Args {
    /// Read from the device at <BASE>
    #[arg(short = 'r', value_name = "BASE", value_parser = parse_hex)]
    pub read: Option<u8>,

    /// Write to the device at <BASE>
    #[arg(short = 'w', value_name = "BASE", value_parser = parse_hex)]
    pub write: Option<u8>,

    /// Use <DEVFILE> instead of the default
    #[arg(short = 'c', value_name = "DEVFILE", default_value = DEFAULT_BUS)]
    pub device: String,

    /// Read or write the register at <ADDR> in the device
    #[arg(short = 'a', value_name = "ADDR", value_parser = parse_hex)]
    pub register: Option<u8>,

    /// Write <DATA> (use together with -w)
    #[arg(short = 'd', value_name = "DATA", value_parser = parse_hex)]
    pub data: Option<u8>,

    /// Verbose, repeat for more
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Reverse bit endianness
    #[arg(short = 'S', conflicts_with = "map")]
    pub reverse: bool,

    /// Custom bit mapping, 8 comma separated destination bits, -1 to drop
    #[arg(short = 'm', value_name = "MAP", allow_hyphen_values = true)]
    pub map: Option<RemapTable>,
}

/// What to do, once the arguments make sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read { base: u8, register: u8 },
    Write { base: u8, register: u8, data: u8 },
}

/// Arguments that parsed but don't describe a single action
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// No action specified (-r or -w)
    NoAction,

    /// Please, specify only one action (-r or -w)
    BothActions,

    /// No (register) address (-a) was specified
    NoRegister,

    /// No data specified (-d) to write to '{0:#04X}'
    NoData(u8),

    /// No i2c device specified (-c)
    NoDevice,
}

impl Args {
    /// Check the arguments describe exactly one action.
    pub fn action(&self) -> Result<Action, UsageError> {
        let action = match (self.read, self.write) {
            (None, None) => return Err(UsageError::NoAction),
            (Some(_), Some(_)) => return Err(UsageError::BothActions),
            (Some(base), None) => {
                let register = self.register.ok_or(UsageError::NoRegister)?;
                Action::Read { base, register }
            }
            (None, Some(base)) => {
                let register = self.register.ok_or(UsageError::NoRegister)?;
                let data = self.data.ok_or(UsageError::NoData(base))?;
                Action::Write {
                    base,
                    register,
                    data,
                }
            }
        };
        if self.device.is_empty() {
            return Err(UsageError::NoDevice);
        }
        Ok(action)
    }

    /// Bit mapping asked for, identity by default.
    pub fn remap(&self) -> RemapTable {
        match self.map {
            Some(map) => map,
            None if self.reverse => RemapTable::reversed(),
            None => RemapTable::identity(),
        }
    }

    /// Log level for the `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

/// `{0}` is not a hexadecimal byte
#[derive(Debug, Display, Error)]
pub struct ParseHexError(String);

/// Parse a byte written in hex, with or without a `0x` prefix.
///
/// Values that don't fit in a byte are rejected.
pub fn parse_hex(s: &str) -> Result<u8, ParseHexError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseHexError(s.into()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| ParseHexError(s.into()))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use clap::CommandFactory;

    use super::*;

    fn args(argv: &[&str]) -> Result<Args> {
        Ok(Args::try_parse_from(
            std::iter::once("i2cio").chain(argv.iter().copied()),
        )?)
    }

    #[test]
    fn verify_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn hex() {
        assert_eq!(parse_hex("20").ok(), Some(0x20));
        assert_eq!(parse_hex("0x7f").ok(), Some(0x7F));
        assert_eq!(parse_hex("0XfF").ok(), Some(0xFF));
        assert_eq!(parse_hex("a").ok(), Some(0x0A));
        assert!(parse_hex("").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("100").is_err());
        assert!(parse_hex("+1").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn read_action() -> Result<()> {
        let a = args(&["-r", "0x20", "-a", "10"])?;
        assert_eq!(
            a.action()?,
            Action::Read {
                base: 0x20,
                register: 0x10
            }
        );
        assert_eq!(a.device, DEFAULT_BUS);
        assert!(a.remap().is_identity());
        assert_eq!(a.log_level(), log::LevelFilter::Warn);
        Ok(())
    }

    #[test]
    fn write_action() -> Result<()> {
        let a = args(&["-w", "21", "-a", "0x01", "-d", "ab", "-c", "/dev/i2c-3", "-vv"])?;
        assert_eq!(
            a.action()?,
            Action::Write {
                base: 0x21,
                register: 0x01,
                data: 0xAB
            }
        );
        assert_eq!(a.device, "/dev/i2c-3");
        assert_eq!(a.log_level(), log::LevelFilter::Debug);
        Ok(())
    }

    #[test]
    fn usage_errors() -> Result<()> {
        assert_eq!(args(&["-a", "1"])?.action(), Err(UsageError::NoAction));
        assert_eq!(
            args(&["-r", "1", "-w", "2", "-a", "1"])?.action(),
            Err(UsageError::BothActions)
        );
        assert_eq!(args(&["-r", "1"])?.action(), Err(UsageError::NoRegister));
        assert_eq!(
            args(&["-w", "2a", "-a", "1"])?.action(),
            Err(UsageError::NoData(0x2A))
        );
        assert_eq!(
            args(&["-r", "1", "-a", "1", "-c", ""])?.action(),
            Err(UsageError::NoDevice)
        );
        assert_eq!(
            UsageError::NoData(0x2A).to_string(),
            "No data specified (-d) to write to '0x2A'"
        );
        Ok(())
    }

    #[test]
    fn remap_options() -> Result<()> {
        assert_eq!(args(&["-S"])?.remap(), RemapTable::reversed());
        assert_eq!(
            args(&["-m", "-1,1,2,3,4,5,6,7"])?.remap().entries(),
            [-1, 1, 2, 3, 4, 5, 6, 7]
        );
        assert!(args(&["-m", "0,1,2"]).is_err());
        assert!(args(&["-m", "0,1,2,3,4,5,6,9"]).is_err());
        assert!(args(&["-S", "-m", "0,1,2,3,4,5,6,7"]).is_err());
        Ok(())
    }
}

//! Run the `i2cio` binary against things that aren't I2C adapters.
use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

fn i2cio() -> Result<Command> {
    Ok(Command::cargo_bin("i2cio")?)
}

#[test]
fn help() -> Result<()> {
    i2cio()?
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("-r <BASE>"))
        .stdout(predicate::str::contains("-S"));
    Ok(())
}

#[test]
fn version() -> Result<()> {
    i2cio()?
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn no_action() -> Result<()> {
    i2cio()?
        .args(["-a", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No action specified (-r or -w)"));
    Ok(())
}

#[test]
fn write_without_data() -> Result<()> {
    i2cio()?
        .args(["-w", "0x20", "-a", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No data specified (-d) to write to '0x20'",
        ));
    Ok(())
}

#[test]
fn bad_hex_is_a_usage_error() -> Result<()> {
    i2cio()?
        .args(["-r", "zz", "-a", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("`zz` is not a hexadecimal byte"));
    Ok(())
}

#[test]
fn bad_map_is_a_usage_error() -> Result<()> {
    i2cio()?
        .args(["-r", "20", "-a", "10", "-m", "0,1,2,3,4,5,6,8"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("entry 7 is 8"));
    Ok(())
}

#[test]
fn missing_device() -> Result<()> {
    i2cio()?
        .args(["-r", "20", "-a", "10", "-c", "/dev/i2c-does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Couldn't open \"/dev/i2c-does-not-exist\"",
        ));
    Ok(())
}

/// A regular file opens, but rejects the address ioctl. Nothing is
/// transferred after that.
#[test]
fn not_an_adapter() -> Result<()> {
    let tmp = tempfile::NamedTempFile::new()?;
    i2cio()?
        .args(["-w", "0xA0", "-a", "10", "-d", "ff", "-vv", "-S"])
        .arg("-c")
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Couldn't select device address 0x20"))
        .stderr(predicate::str::contains("Bit mapping: 7, 6, 5, 4, 3, 2, 1, 0"));
    assert_eq!(std::fs::read(tmp.path())?.len(), 0);
    Ok(())
}

//! `i2cio`, read or write one register of an I2C device from the shell.
use anyhow::{Context, Result};
use clap::Parser;
use i2cio::{bus::Bus, Device};
use log::{debug, info};
use std::{io::Write, process};

mod cli;

use cli::{Action, Args};

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let action = args.action()?;

    let mut dev = Device::open(&args.device)?;
    dev.set_remap(args.remap());
    info!("Using file {}", args.device);
    debug!("Bit mapping: {}", dev.remap());

    let stdout = std::io::stdout();
    let res = execute(&mut dev, action, &mut stdout.lock());

    // Always release the bus, but report the first failure
    let closed = dev
        .close()
        .with_context(|| format!("Couldn't close {}", args.device));
    res.and(closed)
}

/// Run `action` on `dev`, printing what was read to `out`.
fn execute<B: Bus, W: Write>(dev: &mut Device<B>, action: Action, out: &mut W) -> Result<()> {
    match action {
        Action::Read { base, register } => {
            info!(
                "Read from device at address 0x{:02X} [0x{:02X}]",
                base, register
            );
            dev.set_address(base)?;
            let data = dev.read_byte(register)?;
            writeln!(out, "0x{:02X}", data)?;
        }
        Action::Write {
            base,
            register,
            data,
        } => {
            info!(
                "Write to device at address 0x{:02X} [0x{:02X}] data 0x{:02X}",
                base, register, data
            );
            dev.set_address(base)?;
            dev.write_byte(register, data)?;
        }
    }
    Ok(())
}

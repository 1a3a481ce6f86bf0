use clap::{App, Arg};
use lc3_vm::{Config, LoadError, RawModeGuard, RunError, TerminalHost};
use std::process;

fn main() {
    env_logger::init();

    let matches = App::new("LC-3 VM")
        .about("A virtual machine for the LC-3 instruction set architecture")
        .arg(
            Arg::with_name("IMAGES")
                .help("One or more image files to load, in order.")
                .multiple(true)
                .index(1),
        )
        .get_matches();

    let images: Vec<String> = matches
        .values_of("IMAGES")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();

    let config = Config::from_images(images).unwrap_or_else(|_| {
        eprintln!("Usage: lc3-vm <image-file> [<image-file> ...]");
        process::exit(2);
    });

    if let Err(err) = lc3_vm::install_interrupt_handler() {
        eprintln!("failed to install interrupt handler: {}", err);
        process::exit(1);
    }

    let _raw_mode = RawModeGuard::enter().unwrap_or_else(|err| {
        eprintln!("failed to enter raw terminal mode: {}", err);
        process::exit(1);
    });

    let host = TerminalHost::new();

    match lc3_vm::run(config, host) {
        Ok(()) => process::exit(0),
        Err(RunError::Load(LoadError::Io { path, source })) => {
            log::error!("loading {}: {}", path, source);
            eprintln!("Failed to load image: {}", path);
            process::exit(1);
        }
        Err(RunError::Fault(fault)) => {
            log::error!("fatal: {}", fault);
            eprintln!("Fatal error: {}", fault);
            process::exit(70);
        }
    }
}

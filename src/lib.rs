pub mod config;
pub mod error;
pub mod host;
pub mod image_loader;
pub mod instruction;
pub mod sign_extend;
pub mod trap_vector;
pub mod vm;

pub use crate::config::Config;
pub use crate::error::{ConfigError, Fault, LoadError, RunError};
pub use crate::host::{install_interrupt_handler, HostIo, RawModeGuard, TerminalHost};
pub use crate::vm::Vm;

/// Loads every image in `config.images`, in order, into a fresh `Vm`, then
/// runs it to completion. Raw-mode/interrupt setup is the caller's
/// responsibility.
pub fn run<H: HostIo>(config: Config, host: H) -> Result<(), RunError> {
    let mut vm = Vm::new(host);

    for path in &config.images {
        let (origin, words) = image_loader::load_image(&mut vm, path)?;
        log::debug!("loaded {} ({} words at {:#06x})", path, words, origin);
    }

    vm.run()?;
    Ok(())
}

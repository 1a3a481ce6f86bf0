//! The capability bundle the core VM needs from its environment: a
//! non-blocking keyboard poll, blocking byte input, buffered byte output,
//! and scoped raw-mode terminal control. The VM is generic over this trait
//! so it can be driven by an in-memory fake in tests instead of a real
//! terminal.

use nix::sys::select::{select, FdSet};
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::termios::{self, LocalFlags, SetArg, Termios};
use nix::sys::time::{TimeVal, TimeValLike};
use std::io::{self, Read, Write};
use std::sync::Mutex;

pub trait HostIo {
    /// Non-blocking: true iff a byte is available to read.
    fn key_poll(&mut self) -> bool;
    /// Blocking read of a single byte.
    fn key_read(&mut self) -> u8;
    /// Buffered byte output.
    fn write_byte(&mut self, byte: u8);
    /// Flush buffered output.
    fn flush(&mut self);
}

/// Holds the terminal's original attributes and restores them on drop, so
/// raw mode is released on every exit path: normal return, `HALT`, a fatal
/// abort unwinding out of `run`, or an explicit `leave_raw_mode` call.
pub struct RawModeGuard {
    original: Termios,
}

static SAVED_TERMIOS: Mutex<Option<Termios>> = Mutex::new(None);

impl RawModeGuard {
    pub fn enter() -> io::Result<RawModeGuard> {
        let fd = libc::STDIN_FILENO;
        let original = termios::tcgetattr(fd).map_err(nix_to_io)?;

        let mut raw = original.clone();
        raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
        termios::tcsetattr(fd, SetArg::TCSANOW, &raw).map_err(nix_to_io)?;

        *SAVED_TERMIOS.lock().unwrap() = Some(original.clone());

        Ok(RawModeGuard { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, &self.original);
        *SAVED_TERMIOS.lock().unwrap() = None;
    }
}

fn nix_to_io(err: nix::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Installs a `SIGINT` handler that restores the terminal (if raw mode is
/// currently active) and exits with status `-2`.
pub fn install_interrupt_handler() -> io::Result<()> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::Handler(handle_sigint)).map_err(nix_to_io)?;
    }
    Ok(())
}

extern "C" fn handle_sigint(_: libc::c_int) {
    if let Ok(guard) = SAVED_TERMIOS.lock() {
        if let Some(original) = guard.as_ref() {
            let _ = termios::tcsetattr(libc::STDIN_FILENO, SetArg::TCSANOW, original);
        }
    }
    std::process::exit(-2);
}

/// The real terminal: non-blocking poll via `select`, blocking reads from
/// stdin, buffered writes to stdout.
pub struct TerminalHost {
    stdout: io::Stdout,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostIo for TerminalHost {
    fn key_poll(&mut self) -> bool {
        let mut readfds = FdSet::new();
        readfds.insert(libc::STDIN_FILENO);

        match select(None, &mut readfds, None, None, &mut TimeVal::zero()) {
            Ok(n) => n == 1,
            Err(_) => false,
        }
    }

    fn key_read(&mut self) -> u8 {
        let mut buffer = [0u8; 1];
        io::stdin()
            .read_exact(&mut buffer)
            .expect("unable to read from stdin");
        buffer[0]
    }

    fn write_byte(&mut self, byte: u8) {
        let _ = self.stdout.write_all(&[byte]);
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

/// An in-memory host for tests: reads come from a pre-loaded queue, writes
/// are captured to a `Vec<u8>` instead of a real terminal.
#[cfg(test)]
pub struct FakeHost {
    input: std::collections::VecDeque<u8>,
    pub output: Vec<u8>,
}

#[cfg(test)]
impl FakeHost {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn output_as_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

#[cfg(test)]
impl HostIo for FakeHost {
    fn key_poll(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn key_read(&mut self) -> u8 {
        self.input.pop_front().expect("no more fake input queued")
    }

    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }

    fn flush(&mut self) {}
}

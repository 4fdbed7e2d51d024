//! Cooperative interruption.
//!
//! Returning [`Interrupted`] from a script's `main` makes the runner exit with
//! 130 and print nothing. Scripts that want Ctrl-C to take that path call
//! [`install`] once and poll [`check`] between units of work:
//!
//! ```no_run
//! use scriptrun::{interrupt, run_app};
//!
//! fn main() {
//!     std::process::exit(run_app(|args| {
//!         interrupt::install()?;
//!         for item in &args {
//!             interrupt::check()?;
//!             println!("processing {item}");
//!         }
//!         Ok(0)
//!     }));
//! }
//! ```
//!
//! Installing replaces the default SIGINT disposition, so a script that never
//! polls [`check`] should not install. Without [`install`], Ctrl-C keeps its
//! default effect: the process is killed by the signal and `run_app` never
//! returns. The launcher then sees termination by SIGINT rather than an exit
//! code (shells print that as 130).

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(unix)]
use std::{mem, ptr};

use anyhow::{Context, Result};
use thiserror::Error;

/// Marker error: `main` stopped because of an external interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interrupted")]
pub struct Interrupted;

static REQUESTED: AtomicBool = AtomicBool::new(false);
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Routes SIGINT to the interrupt flag instead of terminating the process.
///
/// Clears any interrupt left over from an earlier run in this process, so
/// scripts call it once at the start of `main`. Installing the handler itself
/// happens once. A no-op on platforms without POSIX signals.
pub fn install() -> Result<()> {
    REQUESTED.store(false, Ordering::SeqCst);
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    if let Err(e) = install_platform_handler().context("failed to install SIGINT handler") {
        INSTALLED.store(false, Ordering::SeqCst);
        return Err(e);
    }
    tracing::debug!("SIGINT handler installed");
    Ok(())
}

/// Whether an interrupt has arrived since the last [`install`].
#[must_use]
pub fn requested() -> bool {
    REQUESTED.load(Ordering::SeqCst)
}

/// Fails with [`Interrupted`] once an interrupt has arrived.
pub fn check() -> Result<(), Interrupted> {
    if requested() {
        Err(Interrupted)
    } else {
        Ok(())
    }
}

#[cfg(unix)]
extern "C" fn on_sigint(_signum: libc::c_int) {
    REQUESTED.store(true, Ordering::SeqCst);
}

#[cfg(unix)]
fn install_platform_handler() -> io::Result<()> {
    let handler: extern "C" fn(libc::c_int) = on_sigint;
    let rc = unsafe {
        let mut action: libc::sigaction = mem::zeroed();
        action.sa_sigaction = handler as libc::sighandler_t;
        action.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut action.sa_mask);
        libc::sigaction(libc::SIGINT, &raw const action, ptr::null_mut())
    };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn install_platform_handler() -> io::Result<()> {
    Ok(())
}

//! Maps a script's `main` outcome to a process exit code.
//!
//! Every path out of `main` funnels through [`run_app_with`]:
//!
//! ```text
//! Ok(code)                  -> code
//! Err(e) where e is Interrupted -> 130, silent
//! Err(e)                    -> 1, "{e}" on stderr
//! panic!(msg)               -> 1, "{msg}" on stderr
//! ```

use std::any::Any;
use std::cell::Cell;
use std::env;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use anyhow::Result;

use crate::interrupt::Interrupted;

/// Exit code for an error or panic escaping `main`.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for an interrupted `main` (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Runs `main` with the process arguments and returns its exit code.
///
/// The caller is expected to hand the result straight to
/// [`std::process::exit`]. Arguments that are not valid UTF-8 are decoded
/// lossily.
pub fn run_app<F>(main: F) -> i32
where
    F: FnOnce(Vec<String>) -> Result<i32>,
{
    let args = env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    run_app_with(args, &mut io::stderr(), main)
}

/// Runs `main` with an explicit invocation argument list and error sink.
///
/// `args` is the full invocation list, program identifier first; only the
/// entries after it reach `main`. The diagnostic line for a failed run goes to
/// `stderr`.
pub fn run_app_with<I, W, F>(args: I, stderr: &mut W, main: F) -> i32
where
    I: IntoIterator<Item = String>,
    W: Write + ?Sized,
    F: FnOnce(Vec<String>) -> Result<i32>,
{
    let argv: Vec<String> = args.into_iter().skip(1).collect();
    tracing::debug!(argc = argv.len(), "Invoking script main");

    let outcome = {
        let _quiet = QuietPanics::enter();
        panic::catch_unwind(AssertUnwindSafe(|| main(argv)))
    };

    match outcome {
        Ok(Ok(code)) => {
            tracing::debug!(code, "Script main returned");
            code
        }
        Ok(Err(err)) if err.downcast_ref::<Interrupted>().is_some() => {
            tracing::debug!("Script main interrupted");
            EXIT_INTERRUPTED
        }
        Ok(Err(err)) => {
            report(stderr, &err.to_string());
            EXIT_FAILURE
        }
        Err(payload) => {
            report(stderr, &panic_message(&*payload));
            EXIT_FAILURE
        }
    }
}

fn report<W: Write + ?Sized>(stderr: &mut W, message: &str) {
    if let Err(e) = writeln!(stderr, "{message}").and_then(|()| stderr.flush()) {
        tracing::warn!("Failed to write script error to stderr: {e}");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "script panicked".to_string()
    }
}

thread_local! {
    static SCRIPT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

static QUIET_HOOK: Once = Once::new();

/// Marks the current thread as running a script's `main` so a caught panic is
/// reported once, by [`run_app_with`], instead of twice.
///
/// The first guard wraps whatever panic hook is installed at that point. The
/// wrapper stays silent only for panics on a thread inside `main`; panics on
/// any other thread, including threads `main` spawns, go to the wrapped hook.
struct QuietPanics;

impl QuietPanics {
    fn enter() -> Self {
        QUIET_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !in_script_main() {
                    previous(info);
                }
            }));
        });
        SCRIPT_DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        SCRIPT_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn in_script_main() -> bool {
    // Thread-local storage may already be gone if the panic happens during
    // thread teardown.
    SCRIPT_DEPTH.try_with(Cell::get).unwrap_or(0) > 0
}

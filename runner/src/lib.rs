//! Entrypoint convention for scripts launched as subprocesses.
//!
//! An external runner starts a script with zero or more trailing arguments and
//! reads back its exit status. This crate covers both ends of that contract:
//!
//! - **`run`**: hands argv (minus the program name) to the script's `main` and
//!   maps its outcome to an exit code
//! - **`env`**: trimmed environment reads with a caller-supplied fallback
//! - **`interrupt`**: opt-in SIGINT flag so long-running scripts can bail out
//!   with [`Interrupted`]
//!
//! ```no_run
//! use scriptrun::{get_env, run_app};
//!
//! fn main() {
//!     std::process::exit(run_app(|args| {
//!         let tenant = get_env("TENANT", "default");
//!         println!("{tenant}: {args:?}");
//!         Ok(0)
//!     }));
//! }
//! ```

pub mod env;
pub mod interrupt;
pub mod run;

pub use env::{EnvSource, ProcessEnv, get_env, get_env_from, get_env_or_empty};
pub use interrupt::Interrupted;
pub use run::{EXIT_FAILURE, EXIT_INTERRUPTED, run_app, run_app_with};

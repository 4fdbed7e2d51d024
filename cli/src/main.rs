//! `scriptrun-probe` - a script written against the scriptrun convention.
//!
//! The first argument selects what the script does, so every exit path of
//! [`run_app`] can be driven from outside the process:
//!
//! ```text
//! echo ARG...          print each ARG on its own line      -> 0
//! exit N               return N                            -> N
//! fail MSG             return an error                     -> 1, MSG on stderr
//! panic MSG            panic                               -> 1, MSG on stderr
//! interrupt            return Interrupted                  -> 130
//! env NAME [DEFAULT]   print "[value]"                     -> 0
//! wait                 print "ready", block until SIGINT   -> 130
//! sleep                print "ready", block without opting
//!                      into SIGINT handling                -> killed by SIGINT
//! ```

use std::io::{self, Write};
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use scriptrun::{Interrupted, get_env, interrupt, run_app};
use tracing_subscriber::{EnvFilter, fmt};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);
const WAIT_TIMEOUT: Duration = Duration::from_secs(30);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    // stderr is part of the script's contract with its launcher; logs stay
    // quiet unless RUST_LOG asks for them.
    fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    process::exit(run_app(probe));
}

fn probe(args: Vec<String>) -> Result<i32> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(0);
    };
    let rest: Vec<String> = args.collect();
    tracing::debug!(%command, argc = rest.len(), "probe command");

    match command.as_str() {
        "echo" => {
            let mut out = io::stdout().lock();
            for arg in &rest {
                writeln!(out, "{arg}")?;
            }
            Ok(0)
        }
        "exit" => {
            let raw = rest.first().ok_or_else(|| anyhow!("exit requires a code"))?;
            raw.parse::<i32>()
                .with_context(|| format!("invalid exit code: {raw}"))
        }
        "fail" => bail!("{}", rest.join(" ")),
        "panic" => panic!("{}", rest.join(" ")),
        "interrupt" => Err(Interrupted.into()),
        "env" => {
            let name = rest.first().ok_or_else(|| anyhow!("env requires a name"))?;
            let default = rest.get(1).map_or("", String::as_str);
            println!("[{}]", get_env(name, default));
            Ok(0)
        }
        "wait" => wait_for_interrupt(),
        "sleep" => sleep_until_killed(),
        other => bail!("unknown command: {other}"),
    }
}

fn wait_for_interrupt() -> Result<i32> {
    interrupt::install()?;
    println!("ready");
    io::stdout().flush()?;

    let started = Instant::now();
    while started.elapsed() < WAIT_TIMEOUT {
        interrupt::check()?;
        thread::sleep(WAIT_POLL_INTERVAL);
    }
    bail!("no interrupt within {}s", WAIT_TIMEOUT.as_secs())
}

fn sleep_until_killed() -> Result<i32> {
    println!("ready");
    io::stdout().flush()?;
    thread::sleep(WAIT_TIMEOUT);
    bail!("still running after {}s", WAIT_TIMEOUT.as_secs())
}

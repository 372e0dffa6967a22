//! Hegemon -- a Warlight bot speaking the Conquest engine protocol.
//!
//! This binary reads commands from stdin and writes responses to
//! stdout, one line per action request. Diagnostics go to stderr,
//! enabled with the `HEGEMON_LOG` environment variable
//! (debug|info|warn|error); stdout stays reserved for the protocol.

use std::io::{self, BufRead};

use hegemon::board::NameTable;
use hegemon::engine::Engine;
use hegemon::log::Logger;
use hegemon::strategy::Baseline;

/// Builds the logger from `HEGEMON_LOG`, defaulting to the no-op sink.
/// Configured once here; read-only for the rest of the run.
fn logger_from_env() -> Logger {
    match std::env::var("HEGEMON_LOG") {
        Ok(value) => match value.parse() {
            Ok(level) => Logger::stderr(level),
            Err(()) => {
                eprintln!("unrecognized HEGEMON_LOG level '{}', logging disabled", value);
                Logger::null()
            }
        },
        Err(_) => Logger::null(),
    }
}

fn main() {
    let log = logger_from_env();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut engine = Engine::new(Baseline, log).with_names(NameTable::classic());
    engine.run(stdin.lock(), &mut out);
}

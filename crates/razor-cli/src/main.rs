use std::io;

use anyhow::Result;
use razor_core::init_tracing_at;
use tracing::Level;

fn main() -> Result<()> {
    // help, version and usage errors print themselves
    let matches = razor_cli::build_cli().get_matches();

    // Initialize logging
    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing_at(level);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    razor_cli::run_matches(&matches, &mut out)
}

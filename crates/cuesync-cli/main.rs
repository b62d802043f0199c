use anyhow::Result;
use clap::Parser;
use cuesync_cli::{commands, Cli};
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "cuesync_cli=debug,cuesync_core=debug,cuesync_panel=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &mut out)?;
    out.flush()?;
    Ok(())
}

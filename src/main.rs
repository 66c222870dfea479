use anyhow::Result;
use clap::Parser;
use std::io::Write;

use boolfilter::app::{Cli, run};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let match_count = run(&cli, &mut out)?;
    out.flush()?;

    tracing::info!("Done! {} subject(s) matched", match_count);

    Ok(())
}

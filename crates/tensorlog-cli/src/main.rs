mod cli;
mod render;

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tensorlog::reader::{read_stream_with, ReaderConfig, StreamMode};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).context("invalid --log filter")?)
        .with_writer(io::stderr)
        .init();

    let mode = if cli.multi_section {
        StreamMode::MultiSection
    } else {
        StreamMode::SingleSection
    };
    let config = ReaderConfig::default()
        .with_mode(mode)
        .with_byte_order(cli.byte_order.into());

    let stream = read_stream_with(&cli.path, config)
        .with_context(|| format!("opening {}", cli.path.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let printed = render::dump(stream, cli.limit, &mut out)?;
    out.flush()?;

    tracing::info!(observations = printed, "done");
    Ok(())
}

use anyhow::Result;
use clap::Parser;

use vtt_transcript::config;

mod cli;
mod pipeline;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vtt-transcript starting");

    match args.command {
        cli::Command::Parse(cmd) => pipeline::run_parse(cmd, &cfg),
        cli::Command::At(cmd) => pipeline::run_at(cmd, &cfg),
        cli::Command::Search(cmd) => pipeline::run_search(cmd, &cfg),
        cli::Command::Show(cmd) => pipeline::run_show(cmd, &cfg),
        cli::Command::Seek(cmd) => pipeline::run_seek(cmd, &cfg),
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}

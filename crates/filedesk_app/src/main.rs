mod app;
mod cli;
mod effects;
mod persistence;
mod render;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    filedesk_logging::initialize(args.log.into(), level);

    app::run(cli::AppConfig::from(args)).context("filedesk run failed")
}

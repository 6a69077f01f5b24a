//! rMachLogger library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod schema;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Ingest { .. } => cli::commands::ingest::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config ONCE
    let mut cfg = Config::load()?;

    logging::init(cli.debug, Some(&cfg.log_level));

    // 3️⃣ command line overrides for this invocation
    if let Some(file) = &cli.file {
        cfg.store_file = file.clone();
    }
    if let Some(sheet) = &cli.sheet {
        cfg.sheet_name = sheet.clone();
    }

    tracing::debug!(store = %cfg.store_file, sheet = %cfg.sheet_name, "configuration resolved");

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}

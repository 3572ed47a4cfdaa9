//! rInvoicer library root.
//! Exposes the CLI parser, the high-level run() function and the building
//! blocks used by the CLI and the HTTP service.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod notify;
pub mod render;
pub mod service;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            let path = cli.config.clone().unwrap_or_else(Config::config_file);
            cli::commands::config::handle(&cli.command, cfg, &path)
        }
        Commands::Populate { .. } => cli::commands::populate::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Render { .. } => cli::commands::render::handle(&cli.command, cfg),
        Commands::Batch { .. } => cli::commands::batch::handle(&cli.command, cfg),
        Commands::Submit { .. } | Commands::Paid { .. } => {
            cli::commands::status::handle(&cli.command, cfg)
        }
        Commands::Stats => cli::commands::stats::handle(cfg),
        Commands::Send { .. } => cli::commands::send::handle(&cli.command, cfg),
        Commands::Weekly { .. } => cli::commands::weekly::handle(&cli.command, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over the per-command default.
fn init_tracing(command: &Commands) {
    let default = match command {
        Commands::Serve { .. } => "rinvoicer=info",
        _ => "rinvoicer=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli.command);

    // configuration is loaded once and shared by every command
    let mut cfg = Config::load(cli.config.as_deref())?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}

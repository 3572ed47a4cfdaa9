use crate::models::status::StatusFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rInvoicer
/// Weekly timesheet invoices: generate, render, email and track them with SQLite
#[derive(Parser)]
#[command(
    name = "rinvoicer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weekly timesheet invoices: generate, render as PDF, email and track payment using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use another configuration file
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Generate one invoice per week between two dates
    Populate {
        #[arg(long = "from", help = "First date of the range (YYYY-MM-DD)")]
        from: String,

        #[arg(long = "to", help = "Last date of the range (YYYY-MM-DD)")]
        to: String,
    },

    /// List invoices
    List {
        #[arg(long, value_enum, help = "Filter by lifecycle status")]
        status: Option<StatusFilter>,

        #[arg(long, short, help = "Show due date and per-invoice hours")]
        verbose: bool,
    },

    /// Show every detail of one invoice
    Show {
        /// Invoice number (e.g. N001)
        number: String,
    },

    /// Render one invoice as PDF
    Render {
        number: String,

        #[arg(long, short, value_name = "DIR", help = "Output directory (default: output_dir)")]
        output: Option<PathBuf>,
    },

    /// Render every matching invoice as PDF
    Batch {
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        #[arg(long, short, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Mark an invoice as submitted
    Submit {
        number: String,

        #[arg(long, help = "Clear the submitted flag instead")]
        undo: bool,
    },

    /// Mark an invoice as paid (and submitted)
    Paid {
        number: String,

        #[arg(long, help = "Clear the paid flag instead")]
        undo: bool,
    },

    /// Show counts and amounts per status
    Stats,

    /// Render and email one invoice (default: the latest one not yet submitted)
    Send {
        number: Option<String>,

        #[arg(long, help = "Send to the approval address instead of the billing recipients")]
        approval: bool,
    },

    /// Bill the last completed work week (meant for cron)
    Weekly {
        #[arg(long, value_name = "DATE", help = "Pretend today is DATE (YYYY-MM-DD)")]
        today: Option<String>,
    },

    /// Run the HTTP service
    Serve {
        #[arg(long)]
        bind: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (integrity checks, info, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

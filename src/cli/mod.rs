//! CLI module

pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Task-management web service (JSON API + SQLite)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (default when no subcommand is given)
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = serve::DEFAULT_PORT)]
        port: u16,
        /// SQLite database file (default: ~/.taskdeck/tasks.db)
        #[arg(long, env = "TASKDECK_DB")]
        db: Option<PathBuf>,
        /// Directory with pre-built frontend files (auto-detected when omitted)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

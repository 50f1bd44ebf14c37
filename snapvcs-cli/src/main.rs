use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{add, commit, init, log, revert, status};

#[derive(Parser)]
#[command(name = "snapvcs")]
#[command(version, about = "Minimal snapshot version control", long_about = None)]
struct Cli {
    /// Working tree root (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty repository
    Init,

    /// Stage files for the next commit ('.' stages everything)
    Add {
        /// Files to stage
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Commit staged changes
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },

    /// Show staged, modified and untracked files
    Status,

    /// Show commit history
    Log {
        /// Number of commits to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Record a new commit restoring an earlier one
    Revert {
        /// Commit id, unique id prefix, or HEAD
        reference: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = commands::get_root(cli.root)?;

    match cli.command {
        Commands::Init => {
            init::run(root)?;
        }
        Commands::Add { paths } => {
            add::run(root, paths)?;
        }
        Commands::Commit { message } => {
            commit::run(root, message)?;
        }
        Commands::Status => {
            status::run(root)?;
        }
        Commands::Log { limit } => {
            log::run(root, limit)?;
        }
        Commands::Revert { reference } => {
            revert::run(root, reference)?;
        }
    }

    Ok(())
}

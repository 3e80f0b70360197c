//! plugpack CLI - Plugin packaging tool
//!
//! Commands:
//! - `plugpack pack` - Stage declared assets and create the archive
//! - `plugpack clean` - Delete the staging output directory

use clap::{Parser, Subcommand};

mod clean;
mod config;
mod pack;

#[derive(Parser)]
#[command(name = "plugpack")]
#[command(author, version, about = "Packaging tool for plugin projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package a plugin project into a staging directory and archive
    Pack {
        /// Path to the build configuration (default: plugpack.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Project root directory (default: current directory)
        #[arg(short, long)]
        root: Option<String>,
    },

    /// Delete the staging output directory
    Clean {
        /// Path to the build configuration (default: plugpack.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Project root directory (default: current directory)
        #[arg(short, long)]
        root: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack { config, root } => {
            pack::run(config, root)?;
        }
        Commands::Clean { config, root } => {
            clean::run(config, root)?;
        }
    }

    Ok(())
}

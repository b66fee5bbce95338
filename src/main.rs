//! CLI entry point for quire

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quire::Site;

#[derive(Parser)]
#[command(name = "quire")]
#[command(version)]
#[command(about = "A small static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the site into a fresh output directory
    #[command(alias = "b")]
    Build,

    /// Remove the output directory
    Clean,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name for the post, without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List posts, newest first
    List,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quire=debug,info"
    } else {
        "quire=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot read the current directory")?,
    };

    match cli.command {
        Commands::Build => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Building site in {:?}", site.base_dir);
            let report = site.build()?;
            println!(
                "Generated {} posts into {:?}",
                report.posts.len(),
                report.output_dir
            );
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            if site.clean()? {
                println!("Cleaned successfully!");
            }
        }

        Commands::New { title, slug } => {
            let site = Site::new(&base_dir)?;
            let path = site.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List => {
            let site = Site::new(&base_dir)?;
            quire::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("quire version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

//! bridgework CLI - inspect, render and generate custom element adapters.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "bridgework")]
#[command(about = "Framework adapters for custom elements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to bridgework.toml config file
    #[arg(short, long, default_value = "bridgework.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List elements and their event mappings
    List,

    /// Render an element to static markup
    Render {
        /// Custom element tag (e.g. my-checkbox)
        tag: String,

        /// Property as name=value; values are parsed as JSON when possible
        #[arg(short, long = "prop", value_name = "NAME=VALUE")]
        props: Vec<String>,

        /// Text content
        #[arg(long)]
        text: Option<String>,
    },

    /// Generate the framework wrapper module
    Generate {
        /// Output file (defaults to config, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a default bridgework.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output stays clean on stdout
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List => {
            commands::list::run(&cli.config)?;
        }
        Commands::Render { tag, props, text } => {
            commands::render::run(&cli.config, &tag, &props, text)?;
        }
        Commands::Generate { output } => {
            commands::generate::run(&cli.config, output)?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
    }

    Ok(())
}

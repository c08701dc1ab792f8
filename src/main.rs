//! iconsmith - content-bounds-aware icon generator.

mod cli;
mod config;
mod core;
mod generate;
mod image;
mod logger;
mod target;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::IconConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Commands::Generate { args } = &cli.command {
        logger::set_verbose(args.verbose);
    }

    let config = IconConfig::load(&cli)?;

    match &cli.command {
        Commands::Generate { args } => cli::generate::generate(args, &config),
        Commands::Render { args } => cli::render::render_one(args, &config),
        Commands::Bounds { file } => cli::bounds::print_bounds(file, &config),
        Commands::Targets => cli::targets::list_targets(&config),
    }
}

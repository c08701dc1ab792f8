//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BoundsConfig;

/// Content-bounds-aware icon generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconsmith.toml)
    #[arg(short = 'C', long, default_value = "iconsmith.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Regenerate every enabled icon target
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Render one source into one PNG
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Print the visible-content bounds of an image or SVG
    #[command(visible_alias = "b")]
    Bounds {
        /// Image (PNG, JPEG, WebP) or SVG file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List resolved targets with size, bounds and source
    #[command(visible_alias = "t")]
    Targets,
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Only targets whose name or path contains one of these
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Render everything but write nothing
    #[arg(short, long)]
    pub dry: bool,

    /// Render targets in parallel (overrides `[render] parallel`)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub parallel: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Source SVG or raster image
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// Output PNG path
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Square output size in pixels
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Output width (overrides --size)
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height (overrides --size)
    #[arg(long)]
    pub height: Option<u32>,

    /// Destination rectangle inside the output: x,y,width,height
    #[arg(short, long, value_parser = parse_bounds_arg, value_name = "X,Y,W,H")]
    pub bounds: Option<BoundsConfig>,
}

impl RenderArgs {
    /// Output size, `--width`/`--height` taking precedence over `--size`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width.or(self.size)?, self.height.or(self.size)?))
    }
}

/// Parse `x,y,width,height`.
fn parse_bounds_arg(s: &str) -> Result<BoundsConfig, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in `{s}`: {e}"))?;

    match parts[..] {
        [x, y, width, height] => Ok(BoundsConfig { x, y, width, height }),
        _ => Err(format!("expected x,y,width,height, got `{s}`")),
    }
}

impl Cli {
    /// Commands that only make sense inside a configured project.
    pub const fn requires_config(&self) -> bool {
        matches!(self.command, Commands::Generate { .. } | Commands::Targets)
    }
}

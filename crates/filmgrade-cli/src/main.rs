//! filmgrade - batch film negative grading CLI
//!
//! Applies the same grading pipeline the interactive editor runs: negative
//! inversion, white balance, tone mapping, curves, and loaded 3D LUTs.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "filmgrade")]
#[command(author, version, about = "Batch film negative grading CLI")]
#[command(long_about = "
Grades scanned film negatives (or any PNG) through the filmgrade pipeline.

Examples:
  filmgrade convert scan.png out.png --invert --exposure 20
  filmgrade convert scan.png out.png --preset grade.yaml --lut1 look.cube
  filmgrade bake -o grade.cube --preset grade.yaml
  filmgrade info look.cube
  filmgrade histogram scan.png --invert
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade an image and write the result
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Bake the grade into a .cube 3D LUT
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Display .cube LUT or preset information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Print channel histograms of the graded image
    #[command(visible_alias = "h")]
    Histogram(HistogramArgs),
}

/// Adjustment flags shared by grading commands.
///
/// Flags are applied on top of the preset (when given), so a preset can
/// be tweaked per invocation without editing the file.
#[derive(Args)]
struct AdjustArgs {
    /// Preset YAML with a full adjustment state
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Treat the source as a negative
    #[arg(long)]
    invert: bool,

    /// Exposure bias [-100, 100]
    #[arg(long)]
    exposure: Option<f32>,

    /// Contrast [-100, 100]
    #[arg(long)]
    contrast: Option<f32>,

    /// Highlight shaping [-100, 100]
    #[arg(long)]
    highlights: Option<f32>,

    /// Shadow lift [-100, 100]
    #[arg(long)]
    shadows: Option<f32>,

    /// White point offset [-100, 100]
    #[arg(long)]
    whites: Option<f32>,

    /// Black point offset [-100, 100]
    #[arg(long)]
    blacks: Option<f32>,

    /// White balance temp, blue-amber axis [-100, 100]
    #[arg(long)]
    temp: Option<f32>,

    /// White balance tint, green-magenta axis [-100, 100]
    #[arg(long)]
    tint: Option<f32>,

    /// Manual red gain multiplier
    #[arg(long)]
    red_gain: Option<f32>,

    /// Manual green gain multiplier
    #[arg(long)]
    green_gain: Option<f32>,

    /// Manual blue gain multiplier
    #[arg(long)]
    blue_gain: Option<f32>,

    /// First LUT slot (.cube)
    #[arg(long)]
    lut1: Option<PathBuf>,

    /// First LUT blend intensity [0, 1]
    #[arg(long, default_value = "1.0")]
    lut1_intensity: f32,

    /// Second LUT slot (.cube), applied after the first
    #[arg(long)]
    lut2: Option<PathBuf>,

    /// Second LUT blend intensity [0, 1]
    #[arg(long, default_value = "1.0")]
    lut2_intensity: f32,
}

/// Arguments for the `convert` command.
#[derive(Args)]
struct ConvertArgs {
    /// Input PNG
    input: PathBuf,

    /// Output PNG
    output: PathBuf,

    /// Fine rotation in degrees [-45, 45]
    #[arg(long, default_value = "0.0")]
    rotation: f32,

    /// Coarse orientation in degrees (0, 90, 180, 270)
    #[arg(long, default_value = "0")]
    orientation: u32,

    /// Crop as `x,y,w,h` normalized to the rotated bounding box
    #[arg(long)]
    crop: Option<String>,

    /// Derive channel gains from the image (gray-world auto color)
    #[arg(long)]
    auto_color: bool,

    #[command(flatten)]
    adjust: AdjustArgs,
}

/// Arguments for the `bake` command.
#[derive(Args)]
struct BakeArgs {
    /// Output .cube path
    #[arg(short, long)]
    output: PathBuf,

    /// LUT grid size per axis
    #[arg(short, long, default_value = "33")]
    size: usize,

    #[command(flatten)]
    adjust: AdjustArgs,
}

/// Arguments for the `info` command.
#[derive(Args)]
struct InfoArgs {
    /// A .cube LUT or a preset YAML
    input: PathBuf,
}

/// Arguments for the `histogram` command.
#[derive(Args)]
struct HistogramArgs {
    /// Input PNG
    input: PathBuf,

    /// Number of terminal columns per histogram row
    #[arg(long, default_value = "64")]
    width: usize,

    #[command(flatten)]
    adjust: AdjustArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                if cli.verbose {
                    tracing_subscriber::EnvFilter::new("debug")
                } else {
                    tracing_subscriber::EnvFilter::new("warn")
                }
            }),
        )
        .init();

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Bake(args) => commands::bake::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Histogram(args) => commands::histogram::run(args, cli.verbose),
    }
}

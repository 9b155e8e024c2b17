use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zenplain::{ImageInfo, Limits, Selector, TransformRequest, Unstoppable};

#[derive(Parser)]
#[command(name = "zenplain")]
#[command(about = "Apply per-pixel transforms to plain (P3) PPM images")]
struct Cli {
    /// Log decode and transform progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform INPUT and write the result to OUTPUT
    Apply {
        /// Existing plain PPM file
        input: PathBuf,

        /// Destination file (must differ from INPUT)
        output: PathBuf,

        /// Transform to apply
        #[arg(short, long, value_enum)]
        transform: TransformArg,

        /// Brightness change in percent, may be negative (brightness only)
        #[arg(
            short,
            long,
            allow_negative_numbers = true,
            required_if_eq("transform", "brightness")
        )]
        percent: Option<i32>,

        /// Reject images with more pixels than this
        #[arg(long)]
        max_pixels: Option<u64>,

        /// Overwrite OUTPUT if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Print the header of a plain PPM file
    Info {
        /// Plain PPM file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TransformArg {
    /// Complement every channel
    Invert,
    /// Root of the sum of squared channels
    Greyscale,
    /// Zero the red channel (cyan tint)
    RemoveRed,
    /// Zero the green channel (magenta tint)
    RemoveGreen,
    /// Zero the blue channel (yellow tint)
    RemoveBlue,
    /// Shift channels by a percentage of the pixel mean
    Brightness,
    /// Uncover a picture hidden in sample residues mod 3
    Reveal,
}

impl From<TransformArg> for Selector {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Invert => Selector::Invert,
            TransformArg::Greyscale => Selector::Greyscale,
            TransformArg::RemoveRed => Selector::RemoveRed,
            TransformArg::RemoveGreen => Selector::RemoveGreen,
            TransformArg::RemoveBlue => Selector::RemoveBlue,
            TransformArg::Brightness => Selector::Brightness,
            TransformArg::Reveal => Selector::Reveal,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "zenplain=debug"
    } else {
        "zenplain=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Apply {
            input,
            output,
            transform,
            percent,
            max_pixels,
            force,
        } => run_apply_command(&input, &output, transform, percent, max_pixels, force),
        Commands::Info { input } => run_info_command(&input),
    }
}

/// Resolve the configuration, guard the output path, then run the pipeline
fn run_apply_command(
    input: &Path,
    output: &Path,
    transform: TransformArg,
    percent: Option<i32>,
    max_pixels: Option<u64>,
    force: bool,
) -> anyhow::Result<()> {
    check_output(input, output, force)?;
    if !has_ppm_extension(output) {
        tracing::warn!(
            output = %output.display(),
            "output file does not have a .ppm extension"
        );
    }

    let transform = Selector::from(transform)
        .resolve(percent)
        .context("invalid transform options")?;
    let limits = Limits {
        max_pixels,
        ..Default::default()
    };

    TransformRequest::new(transform)
        .with_limits(&limits)
        .run_files(input, output, Unstoppable)
        .with_context(|| format!("failed to transform {}", input.display()))?;

    println!("Image successfully modified: {}", output.display());
    Ok(())
}

fn run_info_command(input: &Path) -> anyhow::Result<()> {
    let data =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let info = ImageInfo::from_bytes(&data)
        .with_context(|| format!("failed to parse header of {}", input.display()))?;
    println!("{}", input.display());
    println!("  size:    {}x{}", info.width, info.height);
    println!("  maxval:  {}", info.maxval);
    match info.expected_samples() {
        Some(n) => println!("  samples: {n}"),
        None => println!("  samples: (overflows)"),
    }
    Ok(())
}

/// Refuse a missing input, an output that is the input, or an existing
/// output without `force`
fn check_output(input: &Path, output: &Path, force: bool) -> anyhow::Result<()> {
    if !input.is_file() {
        bail!("input file {} does not exist", input.display());
    }
    if output.exists() {
        if same_file(input, output)? {
            bail!("output {} is the input file", output.display());
        }
        if !force {
            bail!(
                "output {} already exists (use --force to overwrite)",
                output.display()
            );
        }
    }
    Ok(())
}

fn has_ppm_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
}

fn same_file(a: &Path, b: &Path) -> anyhow::Result<bool> {
    let a = a
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", a.display()))?;
    let b = b
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", b.display()))?;
    Ok(a == b)
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colorswap::models::config::CONFIG_ENV;
use colorswap::models::{AppConfig, ConfigSource, OutputFormat, Recipe, StrategyName};
use colorswap::services::{
    generate_images, generate_mean_image, image_io, DirectoryPicker, FixedDirectory, PromptPicker,
};
use colorswap::Session;

#[derive(Parser)]
#[command(name = "colorswap")]
#[command(about = "Recolor images by swapping picked colors, and build weighted mean images")]
struct Cli {
    /// Config file (overrides COLORSWAP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one recolored image per target combination
    Recolor {
        /// Image to recolor
        image: PathBuf,

        /// YAML recipe listing source colors and their targets
        #[arg(short, long)]
        recipe: PathBuf,

        /// Output directory (prompted for when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        /// Pixel scan strategy: "single_pass" or "per_entry"
        #[arg(long)]
        strategy: Option<StrategyName>,
    },
    /// Average several images of the same resolution
    Mean {
        /// Image files or folders (folders are not searched recursively)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Weight for one image, as PATH=N (repeatable)
        #[arg(short, long = "weight", value_parser = parse_weight)]
        weights: Vec<(PathBuf, u32)>,

        /// Output directory (prompted for when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show dimensions, channel mode and the most frequent colors of an image
    Inspect {
        image: PathBuf,

        /// Number of colors to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Print the color at pixel (x, y)
    Sample { image: PathBuf, x: usize, y: usize },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format: "jpg" or "png"
    #[arg(long)]
    format: Option<OutputFormat>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Recompress PNG output with oxipng
    #[arg(long)]
    optimize_png: bool,
}

impl OutputArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(quality) = self.quality {
            config.output.jpeg_quality = quality;
        }
        if self.optimize_png {
            config.output.optimize_png = true;
        }
    }
}

fn parse_weight(raw: &str) -> Result<(PathBuf, u32), String> {
    let (path, weight) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=N, got '{raw}'"))?;
    let weight: u32 = weight
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{weight}'"))?;
    Ok((PathBuf::from(path), weight))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command(cli.config.as_deref());
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colorswap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let (mut config, source) = AppConfig::load_with_source(cli.config.as_deref());
    tracing::debug!(%source, "Loaded config");

    match command {
        Commands::Recolor {
            image,
            recipe,
            out,
            output,
            strategy,
        } => {
            output.apply(&mut config);
            if let Some(strategy) = strategy {
                config.matching.strategy = strategy;
            }
            run_recolor_command(&config, &image, &recipe, out, cli.json)
        }
        Commands::Mean {
            inputs,
            weights,
            out,
            output,
        } => {
            output.apply(&mut config);
            run_mean_command(&config, &inputs, &weights, out, cli.json)
        }
        Commands::Inspect { image, top } => run_inspect_command(&image, top, cli.json),
        Commands::Sample { image, x, y } => run_sample_command(&image, x, y, cli.json),
    }
}

fn picker_for(out: Option<PathBuf>) -> Box<dyn DirectoryPicker> {
    match out {
        Some(dir) => Box::new(FixedDirectory::new(dir)),
        None => Box::new(PromptPicker::stdio()),
    }
}

fn run_recolor_command(
    config: &AppConfig,
    image: &Path,
    recipe: &Path,
    out: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let recipe = Recipe::load(recipe)?;

    let mut session = Session::new();
    session.select_files([image])?;

    // Sampled colors need the pixels up front; the pipeline decodes again
    let matrix = if recipe.samples_image() {
        Some(image_io::load_matrix(image)?)
    } else {
        None
    };
    for entry in recipe.entries(matrix.as_ref())? {
        let id = entry.identifier().to_string();
        if !session.add_source(entry) {
            anyhow::bail!("Source color {id} is listed twice in the recipe");
        }
    }

    let mut picker = picker_for(out);
    let Some(report) = generate_images(&mut session, config, picker.as_mut())? else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Wrote {} images to {} ({} pixels matched)",
            report.count,
            report.output_dir.display(),
            report.matched_pixels
        );
    }
    Ok(())
}

fn run_mean_command(
    config: &AppConfig,
    inputs: &[PathBuf],
    weights: &[(PathBuf, u32)],
    out: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = Session::new();
    for input in inputs {
        if input.is_dir() {
            session.select_folder(input)?;
        } else {
            session.select_files([input])?;
        }
    }

    for (path, weight) in weights {
        let updated = session.set_weight(std::slice::from_ref(path), *weight)?;
        if updated == 0 {
            anyhow::bail!("{} is not among the selected images", path.display());
        }
    }

    let mut picker = picker_for(out);
    let Some(report) = generate_mean_image(&mut session, config, picker.as_mut())? else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Averaged {} images (total weight {}) into {}",
            report.images,
            report.weight_sum,
            report.output.display()
        );
    }
    Ok(())
}

fn run_inspect_command(image: &Path, top: usize, json: bool) -> anyhow::Result<()> {
    let record = image_io::probe(image)?;
    let matrix = image_io::load_matrix(image)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in 0..matrix.height() {
        for column in 0..matrix.width() {
            if let Some(pixel) = matrix.pixel(row, column) {
                *counts.entry(pixel.to_hex()).or_default() += 1;
            }
        }
    }
    let unique = counts.len();
    let mut colors: Vec<(String, usize)> = counts.into_iter().collect();
    colors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    colors.truncate(top);

    if json {
        let value = serde_json::json!({
            "path": image,
            "width": record.width,
            "height": record.height,
            "mode": record.mode.as_str(),
            "unique_colors": unique,
            "top_colors": colors
                .iter()
                .map(|(hex, count)| serde_json::json!({ "color": hex, "pixels": count }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", image.display());
    println!("  Size:   {}x{}", record.width, record.height);
    println!("  Mode:   {}", record.mode);
    println!("  Colors: {unique} unique");
    for (hex, count) in &colors {
        println!("    {hex}  {count}");
    }
    Ok(())
}

fn run_sample_command(image: &Path, x: usize, y: usize, json: bool) -> anyhow::Result<()> {
    let matrix = image_io::load_matrix(image)?;
    let pixel = matrix.pixel(y, x).with_context(|| {
        format!(
            "({x}, {y}) is outside the {}x{} image",
            matrix.width(),
            matrix.height()
        )
    })?;

    if json {
        let value = serde_json::json!({
            "x": x,
            "y": y,
            "color": pixel.to_hex(),
            "channels": pixel.channels(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", pixel.to_hex());
    }
    Ok(())
}

/// Show version, environment and config source when run without a command
fn run_status_command(explicit_config: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();
    let log_filter = std::env::var("RUST_LOG").ok();

    println!("Colorswap v{VERSION}");
    println!("Recolor images by swapping picked colors\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG         = {}",
        log_filter.as_deref().unwrap_or("colorswap=info (default)")
    );

    let (config, source) = AppConfig::load_with_source(explicit_config);
    let source = match source {
        ConfigSource::File(path) => path.display().to_string(),
        other => other.to_string(),
    };
    println!("\nConfig:");
    println!("  Source:   {source}");
    println!(
        "  Output:   {} (jpeg quality {}, png optimize {})",
        config.output.format, config.output.jpeg_quality, config.output.optimize_png
    );
    println!("  Matching: {:?}", config.matching.strategy);

    println!("\nCommands:");
    println!("  colorswap recolor   Write every target combination of one image");
    println!("  colorswap mean      Average images into a weighted mean image");
    println!("  colorswap inspect   Show size, mode and frequent colors");
    println!("  colorswap sample    Print the color at a pixel");
    println!("\nRun 'colorswap --help' for more details.");
}

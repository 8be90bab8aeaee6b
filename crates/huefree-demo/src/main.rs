//! HueFree demo: simulate color-vision deficiencies from the command line.
//!
//! Reads visions from the built-in table, or from a JSON vision set given by
//! `--visions` / `HUEFREE_VISIONS`.

mod config;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use huefree_core::{
    CustomVisionSet, PixelBuffer, VisionDetail, VisionPipeline, VisionSource, builtin_visions,
    get_vision_detail, list_visions,
};
use huefree_element::{ElementRecolorer, MemoryTree};
use tracing_subscriber::EnvFilter;

use config::DemoConfig;

#[derive(Parser)]
#[command(name = "huefree")]
#[command(author, version, about = "Color-vision deficiency simulation")]
#[command(long_about = "
Recolors CSS color strings, style sets and images the way they appear with
a given color-vision deficiency.

Examples:
  huefree list
  huefree detail deuteranopia
  huefree color protanopia \"1px solid rgb(255, 0, 0)\"
  huefree styles tritanopia styles.json
  huefree image achromatopsia photo.png gray.png
  huefree filter deuteranopia > filter.svg
  huefree --visions mine.json list
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON vision set to use instead of the built-in table
    #[arg(long, global = true)]
    visions: Option<PathBuf>,

    /// Log filter (overrides HUEFREE_LOG)
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List vision names
    #[command(visible_alias = "ls")]
    List,

    /// Print a vision's details as JSON
    Detail {
        vision: String,
    },

    /// Recolor the first color in a CSS value
    Color {
        vision: String,
        text: String,
    },

    /// Recolor a JSON object of CSS properties
    Styles {
        vision: String,
        input: PathBuf,
    },

    /// Recolor every pixel of an image file
    Image {
        vision: String,
        input: PathBuf,
        output: PathBuf,
    },

    /// Print the SVG color-matrix filter for a matrix vision
    Filter {
        vision: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DemoConfig::default().with_overrides(cli.visions, cli.log);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter).context("Invalid log filter")?)
        .with_writer(std::io::stderr)
        .init();

    let custom = match &config.visions {
        Some(path) => Some(
            CustomVisionSet::from_path(path)
                .with_context(|| format!("Failed to load visions from {}", path.display()))?,
        ),
        None => None,
    };
    let visions: &dyn VisionSource = match &custom {
        Some(set) => set,
        None => builtin_visions(),
    };

    match cli.command {
        Commands::List => {
            for name in list_visions(visions) {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Detail { vision } => detail(visions, &vision),
        Commands::Color { vision, text } => {
            let out = VisionPipeline::new(visions)
                .apply(&text, &vision)
                .with_context(|| unknown(&vision))?;
            println!("{out}");
            Ok(())
        }
        Commands::Styles { vision, input } => styles(visions, &vision, &input).await,
        Commands::Image {
            vision,
            input,
            output,
        } => recolor_file(visions, &vision, &input, &output),
        Commands::Filter { vision } => {
            let Some(filter) = VisionPipeline::new(visions).filter_for(&vision) else {
                bail!("'{vision}' is unknown or not a matrix vision");
            };
            println!("{}", filter.to_svg());
            Ok(())
        }
    }
}

fn unknown(vision: &str) -> String {
    format!("Unknown or empty vision '{vision}'")
}

fn detail(visions: &dyn VisionSource, vision: &str) -> Result<()> {
    let definition = get_vision_detail(vision, visions).with_context(|| unknown(vision))?;
    let detail = VisionDetail::new(vision, definition);
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

async fn styles(visions: &dyn VisionSource, vision: &str, input: &Path) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let properties: BTreeMap<String, String> =
        serde_json::from_str(&json).context("Expected a JSON object of string properties")?;

    let mut tree = MemoryTree::new("div");
    let root = tree.root();
    for (name, value) in &properties {
        tree.set_computed_style(root, name, value);
    }

    let report = ElementRecolorer::new(visions)
        .apply_vision(&mut tree, root, vision)
        .await
        .with_context(|| unknown(vision))?;
    tracing::info!("rewrote {} properties", report.properties);

    let out: BTreeMap<&str, &str> = properties
        .keys()
        .filter_map(|name| Some((name.as_str(), tree.style(root, name)?)))
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn recolor_file(
    visions: &dyn VisionSource,
    vision: &str,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let mut pixels = PixelBuffer::decode(&bytes)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let distinct = VisionPipeline::new(visions)
        .recolor_pixels(&mut pixels, vision)
        .with_context(|| unknown(vision))?;
    tracing::info!(
        "recolored {}x{} image ({distinct} distinct colors)",
        pixels.width,
        pixels.height
    );

    pixels
        .to_rgba_image()?
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

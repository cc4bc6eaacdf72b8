use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use printbooth::{
    AspectRatio, CanvasSpec, LayoutGeometry, LayoutKind, OutputFormat, RenderRequest,
    crop_aspect_ratios, resolve_layout,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "printbooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a print request to an image file.
    Render(RenderArgs),
    /// Print the resolved slot geometry of a layout as JSON.
    Geometry(GeometryArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input request JSON. Photo and logo paths are relative to this file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Output format. Defaults to the output file extension, then to the request settings.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// JPEG quality (1-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
}

#[derive(Parser, Debug)]
struct GeometryArgs {
    /// Layout id, e.g. `two-by-two`.
    #[arg(long)]
    layout: LayoutKind,

    /// Photo area percent for `single-with-logo`.
    #[arg(long)]
    ratio: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Jpeg,
    Png,
}

impl From<FormatChoice> for OutputFormat {
    fn from(c: FormatChoice) -> Self {
        match c {
            FormatChoice::Jpeg => OutputFormat::Jpeg,
            FormatChoice::Png => OutputFormat::Png,
        }
    }
}

#[derive(serde::Serialize)]
struct GeometryReport {
    #[serde(flatten)]
    geometry: LayoutGeometry,
    crop_aspect_ratios: Vec<AspectRatio>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Geometry(args) => cmd_geometry(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = RenderRequest::load(&args.in_path)?;
    let mut settings = req.render_settings();
    if let Some(format) = args
        .format
        .map(OutputFormat::from)
        .or_else(|| format_from_extension(&args.out))
    {
        settings.format = format;
    }
    if let Some(q) = args.quality {
        settings.jpeg_quality = q;
    }

    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let input = req.prepare(root)?;
    let encoded = printbooth::render(&input, &settings)?;

    std::fs::write(&args.out, &encoded.bytes)
        .with_context(|| format!("write print to '{}'", args.out.display()))?;
    eprintln!(
        "wrote {}x{} {} ({} bytes) to {}",
        encoded.width,
        encoded.height,
        encoded.mime_type(),
        encoded.bytes.len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_geometry(args: GeometryArgs) -> anyhow::Result<()> {
    let spec = CanvasSpec::default();
    let ratio = args.ratio.unwrap_or(spec.default_photo_area_ratio);
    let report = GeometryReport {
        geometry: resolve_layout(&spec, args.layout, ratio)?,
        crop_aspect_ratios: crop_aspect_ratios(&spec, args.layout, ratio)?,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize geometry")?;
    println!("{json}");
    Ok(())
}

fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(OutputFormat::Png),
        "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
        _ => None,
    }
}

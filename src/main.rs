use anyhow::{bail, Context};
use clap::Parser;
use screenmark::logging::{init_subscriber, LogFormat};
use screenmark::{
    binarize, current_username, render_with_font, Execution, OverlayStyle, TargetSize,
    TextToken, WatermarkConfig,
};
use std::path::PathBuf;

/// Screenmark - renders a tiled text watermark overlay for a screen
#[derive(Parser, Debug)]
#[command(name = "screenmark")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults are used when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target width in device pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Target height in device pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Account name to embed; defaults to the current user
    #[arg(short, long)]
    user: Option<String>,

    /// Output PNG path
    #[arg(short, long, default_value = "watermark.png")]
    output: PathBuf,

    /// Write the raw resampled image instead of the binarized overlay
    #[arg(long)]
    raw: bool,

    /// Resample rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Validate configuration and exit
    #[arg(long)]
    test: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_subscriber(args.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging subsystem: {}", e))?;

    let config = match &args.config {
        Some(path) => WatermarkConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => WatermarkConfig::default(),
    };
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        config_file = ?args.config,
        rotation = config.rotation,
        skew_angle = config.skew_angle,
        spacing_x = config.spacing_x,
        spacing_y = config.spacing_y,
        "Configuration loaded successfully"
    );

    if args.test {
        println!("configuration OK");
        return Ok(());
    }

    let account = match args.user.clone().or_else(current_username) {
        Some(account) => account,
        None => bail!("Could not determine the current user; pass --user"),
    };
    let token = TextToken::compose(&config.label, &account, config.space_count);
    if token.is_empty() {
        bail!("Watermark text is blank; set a label or pass --user");
    }

    let execution = if args.parallel {
        Execution::Parallel
    } else {
        Execution::Serial
    };
    let target = TargetSize::new(args.width, args.height);
    let image = render_with_font(&config, &token, target, execution).map_err(|e| {
        let context = if e.is_config_error() {
            "Invalid watermark configuration"
        } else {
            "Failed to render watermark"
        };
        anyhow::Error::new(e).context(context)
    })?;

    let image = if args.raw {
        image
    } else {
        let style = OverlayStyle::from_config(&config)?;
        tracing::debug!(
            colorref = format_args!("{:#010x}", style.colorref()),
            alpha = config.alpha,
            "binarizing overlay"
        );
        binarize(&image, style)?
    };

    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    tracing::info!(
        output = %args.output.display(),
        width = image.width(),
        height = image.height(),
        "Watermark written"
    );
    Ok(())
}

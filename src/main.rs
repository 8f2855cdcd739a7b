use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use retro_filter::{FilterMode, FilterPipeline};
use retrocam::models::AppConfig;
use retrocam::rendering::SvgGlyphRasterizer;
use retrocam::services::{
    encode_frame, load_frame, CaptureSource, FrameWriter, KeyScript, PngSequenceSource,
    ScreenshotWriter, Session, TestPatternSource,
};

#[derive(Parser)]
#[command(name = "retrocam")]
#[command(about = "Retro webcam filters - dithering, ASCII and bitmap looks for video frames")]
struct Cli {
    /// Config file (falls back to RETROCAM_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a single PNG frame
    Render {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Filter mode (atkinson, floyd-steinberg, ascii, bitmap)
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Run the capture loop over a frame source
    Run {
        /// Directory of PNG frames, played back in file name order
        #[arg(long, conflicts_with = "pattern")]
        frames: Option<PathBuf>,

        /// Number of synthetic test-pattern frames to generate
        #[arg(long, default_value_t = 30)]
        pattern: usize,

        /// Seed for the test-pattern noise
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Directory to write filtered frames into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Key presses by tick, e.g. "3:f,5:s,9:ctrl+q"
        #[arg(short, long)]
        keys: Option<String>,

        /// Initial filter mode
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// List filter modes in cycle order
    Modes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrocam=info,retro_filter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("RETROCAM_CONFIG").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            mode,
        }) => {
            let config = AppConfig::load(config_path.as_deref());
            run_render_command(&config, &input, &output, mode.as_deref())
        }
        Some(Commands::Run {
            frames,
            pattern,
            seed,
            output,
            keys,
            mode,
        }) => {
            let config = AppConfig::load(config_path.as_deref());
            run_session_command(
                &config,
                frames.as_deref(),
                pattern,
                seed,
                output.as_deref(),
                keys.as_deref(),
                mode.as_deref(),
            )
        }
        Some(Commands::Modes) => {
            run_modes_command();
            Ok(())
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Build the filter pipeline from config, with an optional mode override
fn build_pipeline(
    config: &AppConfig,
    mode: Option<&str>,
) -> anyhow::Result<FilterPipeline<SvgGlyphRasterizer>> {
    let mode = match mode {
        Some(name) => name.parse::<FilterMode>()?,
        None => config.filter_mode()?,
    };
    let options = config.diffusion_options()?;

    Ok(FilterPipeline::new(SvgGlyphRasterizer::from_config(&config.ascii))
        .with_mode(mode)
        .with_options(options))
}

/// Filter one PNG frame to a file
fn run_render_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    mode: Option<&str>,
) -> anyhow::Result<()> {
    let mut pipeline = build_pipeline(config, mode)?;
    let mut frame = load_frame(input)?;

    pipeline.process(&mut frame);

    let mut png_bytes = encode_frame(&frame)?;
    if config.screenshot.optimize {
        png_bytes = retrocam::rendering::png_codec::optimize(png_bytes);
    }
    std::fs::write(output, &png_bytes)?;
    println!(
        "Rendered {} with {} ({}x{}, {} bytes)",
        output.display(),
        pipeline.mode().label(),
        frame.width(),
        frame.height(),
        png_bytes.len()
    );

    Ok(())
}

/// Run the capture loop
#[allow(clippy::too_many_arguments)]
fn run_session_command(
    config: &AppConfig,
    frames: Option<&Path>,
    pattern: usize,
    seed: u64,
    output: Option<&Path>,
    keys: Option<&str>,
    mode: Option<&str>,
) -> anyhow::Result<()> {
    let size = config.frame_spec()?;
    let pipeline = build_pipeline(config, mode)?;

    let source: Box<dyn CaptureSource> = match frames {
        Some(dir) => Box::new(PngSequenceSource::open(dir, size)?),
        None => Box::new(TestPatternSource::new(size, pattern, seed)),
    };

    let mut session = Session::new(
        pipeline,
        source,
        ScreenshotWriter::from_config(&config.screenshot),
    );
    if let Some(dir) = output {
        session = session.with_display(FrameWriter::create(dir)?);
    }
    if let Some(script) = keys {
        session = session.with_keys(script.parse::<KeyScript>()?);
    }

    let report = session.run()?;

    println!(
        "Processed {} frame{} ending in {}{}",
        report.frames,
        if report.frames == 1 { "" } else { "s" },
        report.final_mode.label(),
        if report.quit { " (quit)" } else { "" }
    );
    for path in &report.screenshots {
        println!("  screenshot: {}", path.display());
    }

    Ok(())
}

/// Print the filter cycle
fn run_modes_command() {
    let default = FilterMode::default();
    for mode in FilterMode::ALL {
        let marker = if mode == default { " (default)" } else { "" };
        println!("  {:<16} {}{marker}", mode.name(), mode.label());
    }
}

/// Print version and resolved configuration
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Retrocam v{VERSION}");
    println!("Retro webcam filters\n");

    println!("Environment Variables:");
    println!(
        "  RETROCAM_CONFIG = {}",
        std::env::var("RETROCAM_CONFIG")
            .as_deref()
            .unwrap_or("(not set)")
    );

    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let config = AppConfig::load(config_path);

    println!("\nConfiguration:");
    println!("  Source:      {source}");
    println!("  Frame size:  {}x{}", config.width, config.height);
    println!("  Mode:        {}", config.mode);
    println!("  Arithmetic:  {}", config.channel_arithmetic);
    println!(
        "  ASCII font:  {} {}px{}",
        config.ascii.font_family,
        config.ascii.font_size,
        config
            .ascii
            .fonts_dir
            .as_ref()
            .map(|d| format!(" (+ {})", d.display()))
            .unwrap_or_default()
    );
    println!(
        "  Screenshots: {}{}",
        config.screenshot.dir.display(),
        if config.screenshot.optimize {
            " (oxipng)"
        } else {
            ""
        }
    );

    println!("\nRun 'retrocam --help' for usage.");
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyfx", version)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine config JSON. Flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// Seed for Glitch Flicker jitter.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one rendered frame as JSON.
    Frame(FrameArgs),
    /// Run the scheduler headless, logging sound triggers.
    Play(PlayArgs),
    /// Print the generative render request for the storyboard.
    Prompt(InputArgs),
    /// Parse and validate every phrase.
    Validate(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of ticks to run (default: one full loop).
    #[arg(long)]
    frames: Option<u64>,

    /// Sleep one tick period between frames.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.engine)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args, config),
        Command::Play(args) => cmd_play(args, config),
        Command::Prompt(args) => cmd_prompt(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn load_config(args: &EngineArgs) -> anyhow::Result<storyfx::EngineConfig> {
    let mut config = match &args.config {
        Some(path) => storyfx::EngineConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => storyfx::EngineConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = storyfx::Fps::new(fps, 1)?;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn read_storyboard(path: &Path) -> anyhow::Result<Vec<storyfx::Phrase>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open storyboard '{}'", path.display()))?;
    let phrases = storyfx::parse_storyboard(&text)
        .with_context(|| format!("parse storyboard '{}'", path.display()))?;
    Ok(phrases)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{s}");
    Ok(())
}

fn cmd_frame(args: FrameArgs, config: storyfx::EngineConfig) -> anyhow::Result<()> {
    let phrases = read_storyboard(&args.input.in_path)?;
    let frame = storyfx::Evaluator::eval_frame(&phrases, storyfx::FrameIndex(args.frame), &config);
    print_json(&frame)
}

fn cmd_play(args: PlayArgs, config: storyfx::EngineConfig) -> anyhow::Result<()> {
    let phrases = read_storyboard(&args.input.in_path)?;
    let period = config.fps.tick_period();

    let mut timeline = storyfx::Timeline::new(config, storyfx::LogBackend)?;
    timeline.replace_phrases(phrases);
    let ticks = args
        .frames
        .unwrap_or_else(|| timeline.clock().total_frames());

    timeline.play();
    let mut triggers = timeline.last_triggers().len();
    for _ in 0..ticks {
        if args.realtime {
            std::thread::sleep(period);
        }
        let Some(frame) = timeline.tick() else {
            break;
        };
        triggers += timeline.last_triggers().len();
        tracing::debug!(
            hud = %timeline.clock().hud_label(),
            active = frame.phrases.len(),
            "tick"
        );
    }

    eprintln!(
        "played {ticks} frames, {triggers} sfx triggers ({})",
        timeline.clock().hud_label()
    );
    Ok(())
}

fn cmd_prompt(args: InputArgs) -> anyhow::Result<()> {
    let phrases = read_storyboard(&args.in_path)?;
    print_json(&storyfx::RenderRequest::from_phrases(&phrases))
}

fn cmd_validate(args: InputArgs) -> anyhow::Result<()> {
    let phrases = read_storyboard(&args.in_path)?;
    for phrase in &phrases {
        phrase.validate()?;
    }
    eprintln!("ok: {} phrases", phrases.len());
    Ok(())
}

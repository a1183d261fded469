use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the state of a single global frame as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one JSON line per frame.
    Render(RenderArgs),
    /// Print the scene table of a manifest.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input manifest JSON (single card or compilation).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Global frame index (0-based).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,

    /// Optional render settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input manifest JSON (single card or compilation).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// First global frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last global frame (exclusive); defaults to the timeline length.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per scheduling chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Optional render settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input manifest JSON (single card or compilation).
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn load(
    in_path: &Path,
    settings: Option<&Path>,
) -> anyhow::Result<(cardreel::Compilation, cardreel::RenderSettings)> {
    let comp = cardreel::Manifest::from_path(in_path)
        .with_context(|| format!("load manifest '{}'", in_path.display()))?
        .into_compilation();
    let settings = match settings {
        Some(p) => cardreel::RenderSettings::from_path(p)?,
        None => cardreel::RenderSettings::default(),
    };
    Ok((comp, settings))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (comp, settings) = load(&args.in_path, args.settings.as_deref())?;
    let sess = cardreel::RenderSession::new(&comp, settings)?;
    let frame = cardreel::FrameIndex::from_signed(args.frame, sess.total_frames())?;
    let out = sess.render_frame(frame)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (comp, settings) = load(&args.in_path, args.settings.as_deref())?;
    let sess = cardreel::RenderSession::new(&comp, settings)?;
    let range = cardreel::FrameRange::new(
        cardreel::FrameIndex(args.start),
        cardreel::FrameIndex(args.end.unwrap_or(sess.total_frames())),
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut sink = cardreel::JsonLinesSink::new(BufWriter::new(file));

    let threading = cardreel::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let stats = sess.render_range(range, &threading, &mut sink)?;

    eprintln!(
        "wrote {} ({} frames, {} changed)",
        args.out.display(),
        stats.frames_total,
        stats.frames_changed
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let (comp, settings) = load(&args.in_path, None)?;
    let sess = cardreel::RenderSession::new(&comp, settings)?;
    let seq = sess.timeline().sequencer();

    for (idx, card) in comp.cards.iter().enumerate() {
        if let Some(r) = seq.scene_range(idx) {
            println!(
                "scene {idx:>3}  card {:>4}  frames {:>7}..{:<7}  items {:>2}  words {:>4}  {}",
                card.id,
                r.start.0,
                r.end.0,
                card.content.items.len(),
                card.words.len(),
                card.audio_ref
            );
        }
    }
    println!("total frames: {}", sess.total_frames());
    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lapreplay::{
    Circuit, CpuBackend, CpuBackendOpts, FixedRateTimer, FrameTimer, JsonDirService,
    JsonFileRotationStore, LapSelection, PngSequenceSink, PositionBundle, ROTATION_STEP,
    RenderBackend, Replay, ReplayConfig, RotationControl, SceneRenderer, SceneStyle, SessionKey,
    VisualizationSession, WallClockTimer,
};

#[derive(Parser, Debug)]
#[command(name = "lapreplay", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export a full playback as a PNG sequence.
    Play(PlayArgs),
    /// Adjust the stored rotation of a circuit.
    Rotate(RotateArgs),
    /// Print lap labels from a lap-list JSON.
    Laps(LapsArgs),
    /// Assemble a session from a data directory and render one frame.
    Fetch(FetchArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Config JSON; defaults apply to missing keys.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PositionArgs {
    /// Playback time in seconds.
    #[arg(long, conflicts_with = "fraction")]
    time: Option<f64>,

    /// Playback position as a fraction of the replay, 0..=1.
    #[arg(long)]
    fraction: Option<f64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Position bundle JSON (single bundle or array). Repeat for more drivers.
    #[arg(long = "bundle", required = true)]
    bundles: Vec<PathBuf>,

    #[command(flatten)]
    position: PositionArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Circuit year; with `--event`, applies the stored rotation.
    #[arg(long, requires = "event")]
    year: Option<String>,

    #[arg(long, requires = "year")]
    event: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[arg(long = "bundle", required = true)]
    bundles: Vec<PathBuf>,

    /// Directory receiving `frame_NNNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Speed multiplier (e.g. 0.5, 1, 2, 4).
    #[arg(long)]
    speed: Option<f64>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Pace frames against the wall clock instead of synthetic timestamps.
    #[arg(long)]
    realtime: bool,

    #[arg(long, requires = "event")]
    year: Option<String>,

    #[arg(long, requires = "year")]
    event: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("action").required(true).args(["left", "right", "reset"])))]
struct RotateArgs {
    #[arg(long)]
    year: String,

    #[arg(long)]
    event: String,

    /// Rotate counter-clockwise by one step.
    #[arg(long)]
    left: bool,

    /// Rotate clockwise by one step.
    #[arg(long)]
    right: bool,

    #[arg(long)]
    reset: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser, Debug)]
struct LapsArgs {
    /// Lap-list JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Root of the `<year>/<event>/<session>/<driver>/<lap>.json` tree.
    #[arg(long)]
    root: PathBuf,

    #[arg(long)]
    year: String,

    #[arg(long)]
    event: String,

    /// Session code, e.g. `R` or `Q`.
    #[arg(long)]
    session: String,

    /// `CODE:LAP`; repeat to compare drivers.
    #[arg(long = "driver", required = true)]
    drivers: Vec<LapSelection>,

    #[command(flatten)]
    position: PositionArgs,

    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Rotate(args) => cmd_rotate(args),
        Command::Laps(args) => cmd_laps(args),
        Command::Fetch(args) => cmd_fetch(args),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<ReplayConfig> {
    let mut cfg = match &args.config {
        Some(path) => ReplayConfig::from_path(path)?,
        None => ReplayConfig::default(),
    };
    cfg.apply_env().context("apply LAPREPLAY_* overrides")?;
    Ok(cfg)
}

fn open_store(cfg: &ReplayConfig) -> anyhow::Result<JsonFileRotationStore> {
    let path = cfg
        .rotation_store_path()
        .context("no config directory; set LAPREPLAY_ROTATION_STORE")?;
    Ok(JsonFileRotationStore::open(path)?)
}

fn read_session(paths: &[PathBuf]) -> anyhow::Result<VisualizationSession> {
    let mut bundles: Vec<PositionBundle> = Vec::new();
    for path in paths {
        let mut more = lapreplay::read_bundles(path)
            .with_context(|| format!("read bundle '{}'", path.display()))?;
        bundles.append(&mut more);
    }
    Ok(VisualizationSession::from_bundles(&bundles)?)
}

fn circuit<'a>(year: Option<&'a str>, event: Option<&'a str>) -> Option<Circuit<'a>> {
    Some(Circuit {
        year: year?,
        event: event?,
    })
}

fn make_replay(cfg: &ReplayConfig) -> anyhow::Result<Replay<JsonFileRotationStore>> {
    let style = SceneStyle {
        progress_bar: cfg.show_progress_bar,
        ..SceneStyle::default()
    };
    Ok(Replay::with_renderer(
        open_store(cfg)?,
        cfg.canvas()?,
        SceneRenderer::new(style),
    ))
}

fn make_backend(cfg: &ReplayConfig) -> anyhow::Result<CpuBackend> {
    let opts = match &cfg.font_path {
        Some(path) => CpuBackendOpts::default().with_font_file(path)?,
        None => CpuBackendOpts::default(),
    };
    Ok(CpuBackend::new(opts)?)
}

fn render_still(
    cfg: &ReplayConfig,
    session: VisualizationSession,
    circuit: Option<Circuit<'_>>,
    position: &PositionArgs,
    out: &Path,
) -> anyhow::Result<()> {
    let mut replay = make_replay(cfg)?;
    replay.visualize(session, circuit);
    match (position.time, position.fraction) {
        (Some(t), _) => replay.seek(t),
        (None, Some(f)) => replay.seek_fraction(f),
        (None, None) => {}
    }

    let scene = replay.draw().context("no session loaded")?;
    let frame = make_backend(cfg)?.render_scene(&scene)?;
    lapreplay::write_png(out, &frame)?;

    eprintln!(
        "wrote {} (t={:.3}s, rotation={:.4})",
        out.display(),
        replay.state().current_time,
        replay.rotation()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let session = read_session(&args.bundles)?;
    render_still(
        &cfg,
        session,
        circuit(args.year.as_deref(), args.event.as_deref()),
        &args.position,
        &args.out,
    )
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    if let Some(speed) = args.speed {
        cfg.speed = speed;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.validate()?;

    let session = read_session(&args.bundles)?;
    let mut replay = make_replay(&cfg)?;
    replay.visualize(session, circuit(args.year.as_deref(), args.event.as_deref()));
    replay.set_speed(cfg.speed)?;

    let mut backend = make_backend(&cfg)?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let mut timer: Box<dyn FrameTimer> = if args.realtime {
        Box::new(WallClockTimer::new(cfg.fps))
    } else {
        Box::new(FixedRateTimer::new(cfg.fps))
    };
    let stats = lapreplay::export_playback(
        &mut replay,
        &mut backend,
        timer.as_mut(),
        &mut sink,
        cfg.fps,
        cfg.max_frames,
    )?;

    eprintln!(
        "wrote {} frames to {} (end t={:.3}s{})",
        stats.frames,
        args.out_dir.display(),
        stats.end_time,
        if stats.finished { "" } else { ", truncated" }
    );
    Ok(())
}

fn cmd_rotate(args: RotateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let mut control = RotationControl::new(open_store(&cfg)?);
    control.load(&args.year, &args.event);
    if args.reset {
        control.reset()?;
    } else if args.left {
        control.rotate(-ROTATION_STEP)?;
    } else {
        control.rotate(ROTATION_STEP)?;
    }
    println!("{}", control.angle());
    Ok(())
}

fn cmd_laps(args: LapsArgs) -> anyhow::Result<()> {
    let f = std::fs::File::open(&args.in_path)
        .with_context(|| format!("open lap list '{}'", args.in_path.display()))?;
    let laps = lapreplay::read_laps(std::io::BufReader::new(f))?;
    for lap in &laps {
        println!("{}", lap.label());
    }
    Ok(())
}

fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let service = JsonDirService::new(&args.root);
    let key = SessionKey {
        year: args.year.clone(),
        event: args.event.clone(),
        session: args.session.clone(),
    };
    let session = lapreplay::load_session(&service, &key, &args.drivers)?;
    render_still(
        &cfg,
        session,
        Some(Circuit {
            year: &args.year,
            event: &args.event,
        }),
        &args.position,
        &args.out,
    )
}

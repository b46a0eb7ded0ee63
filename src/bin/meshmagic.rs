use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "meshmagic", version, about = "Fluid mesh gradient toolkit")]
struct Cli {
    /// Log debug output to stderr (overridden by `MESHMAGIC_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the preset gallery.
    Presets,
    /// Print a randomly chosen preset as JSON.
    Random(RandomArgs),
    /// Print the inline style of one frame.
    Frame(FrameArgs),
    /// Export a scene as CSS or React code.
    Export(ExportArgs),
    /// Validate a stored generator response as if it came back for `--prompt`.
    AiCheck(AiCheckArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Preset name (`01_Neon_Vortex` or `Neon Vortex`).
    #[arg(long, conflicts_with = "in_path")]
    preset: Option<String>,

    /// Scene configuration JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RandomArgs {
    /// Seed for a reproducible pick.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Seconds since flow was enabled.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Project the scene at rest instead of sampling the flow.
    #[arg(long = "static")]
    at_rest: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output flavor.
    #[arg(long, value_enum)]
    format: FormatChoice,

    /// Output file (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AiCheckArgs {
    /// Prompt the response was generated for.
    #[arg(long)]
    prompt: String,

    /// Raw response body.
    #[arg(long)]
    response: PathBuf,

    /// Give up after this many seconds.
    #[arg(long, default_value_t = 45)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Css,
    React,
}

impl From<FormatChoice> for meshmagic::ExportFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Css => meshmagic::ExportFormat::Css,
            FormatChoice::React => meshmagic::ExportFormat::React,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Presets => cmd_presets(),
        Command::Random(args) => cmd_random(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::AiCheck(args) => cmd_ai_check(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("MESHMAGIC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<meshmagic::Configuration> {
    if let Some(name) = &args.preset {
        let preset = meshmagic::lookup_preset(name)
            .with_context(|| format!("unknown preset '{name}' (see `meshmagic presets`)"))?;
        return Ok(preset.config.clone());
    }
    match &args.in_path {
        Some(path) => read_scene_json(path),
        None => Ok(meshmagic::initial_configuration()),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<meshmagic::Configuration> {
    let cfg = meshmagic::Configuration::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    Ok(cfg)
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for preset in meshmagic::presets() {
        writeln!(stdout, "{}\t{}", preset.name, preset.display_name()).context("write stdout")?;
    }
    Ok(())
}

fn cmd_random(args: RandomArgs) -> anyhow::Result<()> {
    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let preset = meshmagic::random_preset(&mut rng);
    eprintln!("picked {}", preset.name);
    write_output(None, &preset.config.to_json_pretty()?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let style = if args.at_rest {
        meshmagic::project_static(&cfg)
    } else {
        let samples = meshmagic::sample_frame(&cfg, args.time, None);
        meshmagic::project_frame(&cfg, &samples)
    };
    write_output(None, &style.to_inline())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let text = meshmagic::export(&cfg, args.format.into());
    write_output(args.out.as_deref(), &text)
}

fn cmd_ai_check(args: AiCheckArgs) -> anyhow::Result<()> {
    if args.prompt.trim().is_empty() {
        anyhow::bail!("prompt is empty; no request issued");
    }
    let body = std::fs::read_to_string(&args.response)
        .with_context(|| format!("read response '{}'", args.response.display()))?;

    let mut ids = meshmagic::IdSource::from_rng(&mut fastrand::Rng::new());
    let task = meshmagic::GenerationTask::spawn(
        Arc::new(meshmagic::FixedResponse::new(body)),
        &args.prompt,
        ids.next_call(),
        Duration::ZERO,
        Duration::from_secs(args.timeout_secs),
    )?;
    let cfg = task
        .wait()
        .with_context(|| format!("check response '{}'", args.response.display()))?;
    write_output(None, &cfg.to_json_pretty()?)
}

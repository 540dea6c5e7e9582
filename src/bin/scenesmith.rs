use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scenesmith::{
    Brief, Domain, GenerateOpts, GeometryValidator, MotifCatalog, MotifManifest, MotifSources,
    Scene, SceneError, ScoreTable, Style, SymbolStore,
};

#[derive(Parser, Debug)]
#[command(name = "scenesmith", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a scene mother from a brief and the motif catalog.
    AutoFill(AutoFillArgs),
    /// Fill a scene mother's `{{slot:*}}` placeholders from a brief.
    Compose(ComposeArgs),
    /// Resolve `defs.motifs` into `<symbol>` markup.
    InjectMotifs(InjectArgs),
    /// Check the scene document shape.
    Lint(InputArgs),
    /// Check geometric layout rules.
    VisualLint(InputArgs),
    /// Visual-lint a scene, then render it to static SVG.
    Render(RenderArgs),
    /// Compose, inject, lint, visual-lint and render in one go.
    Pipeline(PipelineArgs),
}

#[derive(Parser, Debug)]
struct AutoFillArgs {
    /// Brief JSON used for domain/style detection and the default seed.
    #[arg(long)]
    brief: Option<PathBuf>,

    /// Motif catalog metadata JSON.
    #[arg(long)]
    meta: PathBuf,

    /// Output scene JSON.
    #[arg(long)]
    out: PathBuf,

    /// Force the product domain.
    #[arg(long)]
    domain: Option<Domain>,

    /// Force the visual style.
    #[arg(long)]
    style: Option<Style>,

    /// Seed (defaults to `brief.meta.seed`, then 1).
    #[arg(long)]
    seed: Option<u32>,

    /// Candidates to evaluate (1..=200).
    #[arg(long, default_value_t = scenesmith::DEFAULT_CANDIDATES)]
    candidates: usize,

    /// Score rule table JSON overriding the built-in weights.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Evaluate candidates on a worker pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    #[arg(long)]
    brief: PathBuf,

    /// Scene mother JSON.
    #[arg(long)]
    scene: PathBuf,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InjectArgs {
    #[arg(long)]
    scene: PathBuf,

    /// Motif manifest JSON; symbol paths resolve against its directory.
    #[arg(long)]
    manifest: PathBuf,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PipelineArgs {
    #[arg(long)]
    brief: PathBuf,

    #[arg(long)]
    scene: PathBuf,

    #[arg(long)]
    manifest: PathBuf,

    /// Where the composed and injected scene is written.
    #[arg(long)]
    out_scene: PathBuf,

    #[arg(long)]
    out_svg: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let res = match cli.cmd {
        Command::AutoFill(args) => cmd_auto_fill(args),
        Command::Compose(args) => cmd_compose(args),
        Command::InjectMotifs(args) => cmd_inject(args),
        Command::Lint(args) => cmd_lint(args),
        Command::VisualLint(args) => cmd_visual_lint(args),
        Command::Render(args) => cmd_render(args),
        Command::Pipeline(args) => cmd_pipeline(args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// 2 for bad options, 3 for schema or geometry rejections, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SceneError>() {
        Some(SceneError::Validation(_)) => 2,
        Some(e) if e.is_structural() => 3,
        _ => 1,
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    let text = read_text(path, "scene")?;
    Ok(scenesmith::load_scene_str(&text)?)
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}

fn write_scene(path: &Path, scene: &Scene) -> anyhow::Result<()> {
    write_text(path, &scene.to_json_pretty()?)
}

fn symbol_store_for(manifest: &Path) -> SymbolStore {
    SymbolStore::new(manifest.parent().unwrap_or_else(|| Path::new(".")))
}

fn cmd_auto_fill(args: AutoFillArgs) -> anyhow::Result<()> {
    let brief = match &args.brief {
        Some(path) => Brief::load(path)?,
        None => Brief::default(),
    };
    let catalog = MotifCatalog::load(&args.meta)?;
    let score_table = match &args.rules {
        Some(path) => ScoreTable::load(path)?,
        None => ScoreTable::default(),
    };

    let style = scenesmith::detect_style(&brief, args.style);
    let domain = scenesmith::detect_domain(&brief, args.domain);
    let seed = scenesmith::resolve_seed(args.seed, Some(&brief));
    let opts = GenerateOpts {
        candidates: args.candidates,
        parallel: args.parallel,
        threads: args.threads,
        score_table,
    };

    let filled = scenesmith::auto_fill(&catalog, domain, style, seed, &opts)?;
    write_scene(&args.out, &filled.scene)?;
    println!(
        "OK: auto-filled scene ({domain}/{style}) candidates={} score={:.1} -> {}",
        filled.candidates,
        filled.score,
        args.out.display()
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let brief = Brief::load(&args.brief)?;
    let mother = load_scene(&args.scene)?;
    let scene = scenesmith::compose(&mother, &brief);
    write_scene(&args.out, &scene)?;
    println!("OK: wrote {}", args.out.display());
    Ok(())
}

fn cmd_inject(args: InjectArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let manifest = MotifManifest::load(&args.manifest)?;
    let mut store = symbol_store_for(&args.manifest);
    let count = scene.defs.motifs.len();
    let scene = scenesmith::inject_motifs(scene, &manifest, &mut store)?;
    write_scene(&args.out, &scene)?;
    println!("OK: injected {count} motifs -> {}", args.out.display());
    Ok(())
}

fn cmd_lint(args: InputArgs) -> anyhow::Result<()> {
    let text = read_text(&args.in_path, "scene")?;
    let doc: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse scene '{}'", args.in_path.display()))?;
    scenesmith::validate_scene_value(&doc).map_err(SceneError::from)?;
    println!("OK: {}", args.in_path.display());
    Ok(())
}

fn cmd_visual_lint(args: InputArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    GeometryValidator::default()
        .validate(&scene)
        .map_err(SceneError::from)?;
    println!("OK: visual lint passed {}", args.in_path.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    GeometryValidator::default()
        .validate(&scene)
        .map_err(SceneError::from)?;
    write_text(&args.out, &scenesmith::render_svg(&scene))?;
    println!("OK: wrote {}", args.out.display());
    Ok(())
}

fn cmd_pipeline(args: PipelineArgs) -> anyhow::Result<()> {
    let brief = Brief::load(&args.brief)?;
    let mother = load_scene(&args.scene)?;
    let manifest = MotifManifest::load(&args.manifest)?;
    let mut store = symbol_store_for(&args.manifest);

    let out = scenesmith::run_pipeline(
        &mother,
        &brief,
        MotifSources {
            manifest: &manifest,
            store: &mut store,
        },
        &GeometryValidator::default(),
        |scene| {
            write_scene(&args.out_scene, scene)
                .map_err(|e| SceneError::resource(format!("{e:#}")))
        },
    )?;
    write_text(&args.out_svg, &out.svg)?;
    println!(
        "OK: pipeline wrote {} and {}",
        args.out_scene.display(),
        args.out_svg.display()
    );
    Ok(())
}

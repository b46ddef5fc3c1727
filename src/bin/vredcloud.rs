use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "vredcloud", version, about = "VRED render-farm worker tools")]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map paths with a path mapping rules file.
    MapPath(MapPathArgs),
    /// Print the pixel bounds and ray-tracing region of one tile as JSON.
    Tile(TileArgs),
    /// Print the frames of a range (`S`, `S-E`, `S-E:step`) as JSON.
    Frames(FramesArgs),
    /// Run a render task against a recording host and print the host calls as JSON.
    Plan(PlanArgs),
    /// Write the parameter values and asset references of a job bundle.
    Bundle(BundleArgs),
    /// Assemble rendered tile images into full frames.
    Assemble(AssembleArgs),
}

#[derive(Parser, Debug)]
struct MapPathArgs {
    /// JSON rules file (`{"path_mapping_rules": [...]}`).
    #[arg(long)]
    rules: PathBuf,

    /// Separator conventions of this worker.
    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    /// Paths to map.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[derive(Parser, Debug)]
struct TileArgs {
    /// Full image width.
    #[arg(long)]
    width: u32,
    /// Full image height.
    #[arg(long)]
    height: u32,
    /// Tile columns.
    #[arg(long)]
    x_tiles: u32,
    /// Tile rows.
    #[arg(long)]
    y_tiles: u32,
    /// 1-based tile column.
    #[arg(long)]
    tile_x: u32,
    /// 1-based tile row.
    #[arg(long)]
    tile_y: u32,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Frame range text.
    range: String,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Render parameters as a JSON object.
    #[arg(long, conflicts_with = "bundle", required_unless_present = "bundle")]
    params: Option<PathBuf>,

    /// Job bundle directory holding `parameter_values.yaml`.
    #[arg(long)]
    bundle: Option<PathBuf>,

    /// Viewpoint present in the simulated scene.
    #[arg(long = "viewpoint")]
    viewpoints: Vec<String>,

    /// Camera present in the simulated scene.
    #[arg(long = "camera")]
    cameras: Vec<String>,

    /// Plain file reference of the simulated scene.
    #[arg(long = "reference")]
    references: Vec<String>,

    /// Smart file reference of the simulated scene.
    #[arg(long = "smart-reference")]
    smart_references: Vec<String>,

    /// Simulate a GPU with DLSS support.
    #[arg(long)]
    dlss: bool,

    /// Path mapping rules file, overriding `PathMappingRulesFile`.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Separator conventions of the simulated worker.
    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    /// End failed sessions with a plain terminate instead of a crash.
    #[arg(long)]
    no_crash_on_error: bool,
}

#[derive(Parser, Debug)]
struct BundleArgs {
    /// Render parameters as a JSON object.
    #[arg(long)]
    params: PathBuf,

    /// Bundle directory to write.
    #[arg(long)]
    out: PathBuf,

    /// Extra input file.
    #[arg(long = "input-file")]
    input_files: Vec<String>,

    /// Input directory.
    #[arg(long = "input-dir")]
    input_dirs: Vec<String>,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Directory holding the tile images.
    #[arg(long)]
    tiles: PathBuf,
    /// Directory receiving assembled frames.
    #[arg(long)]
    out: PathBuf,
    /// Full image width.
    #[arg(long)]
    width: u32,
    /// Full image height.
    #[arg(long)]
    height: u32,
    /// Tile columns.
    #[arg(long)]
    x_tiles: u32,
    /// Tile rows.
    #[arg(long)]
    y_tiles: u32,
    /// Only assemble these frames.
    #[arg(long)]
    frames: Option<String>,
    /// Worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Posix,
    Windows,
}

impl From<StyleChoice> for vredcloud::PathStyle {
    fn from(s: StyleChoice) -> Self {
        match s {
            StyleChoice::Posix => Self::Posix,
            StyleChoice::Windows => Self::Windows,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.cmd {
        Command::MapPath(args) => cmd_map_path(args),
        Command::Tile(args) => cmd_tile(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Bundle(args) => cmd_bundle(args),
        Command::Assemble(args) => cmd_assemble(args),
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<vredcloud::RenderParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open render parameters '{}'", path.display()))?;
    Ok(vredcloud::RenderParameters::from_json(&text)?)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_map_path(args: MapPathArgs) -> anyhow::Result<()> {
    let mut mapper = vredcloud::PathMapper::from_rules_file(&args.rules);
    if let Some(style) = args.style {
        mapper = mapper.with_style(style.into());
    }
    mapper.load_rules()?;
    for p in &args.paths {
        println!("{}", mapper.map_path(p));
    }
    Ok(())
}

fn cmd_tile(args: TileArgs) -> anyhow::Result<()> {
    let spec = vredcloud::TileSpec {
        num_x_tiles: args.x_tiles,
        num_y_tiles: args.y_tiles,
        tile_number_x: args.tile_x,
        tile_number_y: args.tile_y,
        image_width: args.width,
        image_height: args.height,
    };
    let bounds = vredcloud::compute_pixel_bounds(&spec)?;
    let region = vredcloud::to_normalized_raytracing_region(&bounds, args.width, args.height)?;
    let grid = vredcloud::TileGrid::new(args.x_tiles, args.y_tiles)?;
    print_json(&serde_json::json!({
        "bounds": bounds,
        "raytracing_region": [region.x0, region.y0, region.x1, region.y1],
        "suffix": vredcloud::region_suffix(args.tile_x, args.tile_y, grid),
    }))
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let range: vredcloud::FrameRange = args.range.parse()?;
    print_json(&range.iter().collect::<Vec<_>>())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut params = match (&args.params, &args.bundle) {
        (Some(path), _) => read_params_json(path)?,
        (None, Some(dir)) => vredcloud::read_job_bundle_parameters(dir)?,
        (None, None) => anyhow::bail!("one of --params or --bundle is required"),
    };
    if let Some(rules) = &args.rules {
        params.path_mapping_rules_file = Some(rules.to_string_lossy().into_owned());
    }

    let mut host = vredcloud::RecordingHost::new().with_dlss_support(args.dlss);
    for v in args.viewpoints {
        host = host.with_viewpoint(v);
    }
    for c in args.cameras {
        host = host.with_camera(c);
    }
    for r in args.references {
        host = host.with_reference(vredcloud::ReferenceKind::Source, r);
    }
    for r in args.smart_references {
        host = host.with_reference(vredcloud::ReferenceKind::Smart, r);
    }

    let mut job = vredcloud::RenderJob::new(params).with_terminate_on_error(!args.no_crash_on_error);
    if let Some(style) = args.style {
        let mapper = match job.mapper().rules_file() {
            Some(f) => vredcloud::PathMapper::from_rules_file(f),
            None => vredcloud::PathMapper::identity(),
        };
        job = job.with_mapper(mapper.with_style(style.into()));
    }

    let result = job.render(&mut host);
    print_json(&serde_json::json!({
        "calls": host.calls(),
        "references": host.references(),
        "history": job.history(),
        "warnings": job.warnings(),
        "termination": job.termination(),
        "error": result.as_ref().err().map(|e| e.to_string()),
    }))?;
    Ok(result?)
}

fn cmd_bundle(args: BundleArgs) -> anyhow::Result<()> {
    let params = read_params_json(&args.params)?;

    let style = vredcloud::PathStyle::host();
    let mut assets = vredcloud::AssetReferences::default();
    if let Some(scene) = params.scene_file.as_deref().filter(|s| !s.is_empty()) {
        assets.add_input_file(scene, style);
    }
    for f in &args.input_files {
        assets.add_input_file(f, style);
    }
    for d in args.input_dirs {
        assets.add_input_directory(d);
    }
    let output_dir = params.output_dir.trim();
    if !output_dir.is_empty() {
        assets.add_output_directory(output_dir);
    }

    let files = vredcloud::write_job_bundle(&args.out, &params, &[], &assets)?;
    eprintln!("wrote {}", files.parameter_values.display());
    eprintln!("wrote {}", files.asset_references.display());
    Ok(())
}

fn cmd_assemble(args: AssembleArgs) -> anyhow::Result<()> {
    let grid = vredcloud::TileGrid::new(args.x_tiles, args.y_tiles)?;
    let size = vredcloud::ImageSize::new(args.width, args.height)?;
    let frames = args
        .frames
        .as_deref()
        .map(str::parse::<vredcloud::FrameRange>)
        .transpose()?;
    let opts = vredcloud::AssembleOptions {
        frames,
        threads: args.threads,
    };
    let written = vredcloud::assemble_directory(&args.tiles, &args.out, grid, size, &opts)?;
    for p in &written {
        eprintln!("wrote {}", p.display());
    }
    Ok(())
}

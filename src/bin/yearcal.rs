use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Datelike as _, NaiveDate};
use clap::{Args, Parser, Subcommand};

use yearcal::{CalendarConfig, LabelStyle, RenderEnv, RenderOutcome};

#[derive(Parser, Debug)]
#[command(name = "yearcal", version)]
struct Cli {
    /// Calendar config JSON; defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (repeat for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full-year composite as a PNG.
    Year(YearArgs),
    /// Render a single day cell as a PNG.
    Cell(CellArgs),
    /// Render every day cell of a year into a directory of PNGs.
    Cells(CellsArgs),
}

#[derive(Args, Debug)]
struct RenderOpts {
    /// Font file to try before the configured candidates.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Use English weekday labels.
    #[arg(long, default_value_t = false)]
    english: bool,

    /// Skip the vector backend.
    #[arg(long, default_value_t = false)]
    raster_only: bool,

    /// Raster backend supersampling factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Render cells on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct YearArgs {
    /// Calendar year; defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Output PNG path; defaults to the configured pattern.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct CellArgs {
    /// Date as YYYY-MM-DD.
    #[arg(long)]
    date: NaiveDate,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct CellsArgs {
    /// Calendar year; defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Output directory; defaults to the configured one. Stale day_MM_DD.png files are replaced.
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(flatten)]
    render: RenderOpts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => CalendarConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => CalendarConfig::default(),
    };

    match cli.cmd {
        Command::Year(args) => cmd_year(config, args),
        Command::Cell(args) => cmd_cell(config, args),
        Command::Cells(args) => cmd_cells(config, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn apply(mut config: CalendarConfig, opts: &RenderOpts) -> CalendarConfig {
    if let Some(font) = &opts.font
        && let Some(prev) = config.fonts.path.replace(font.clone())
    {
        config.fonts.fallback_paths.insert(0, prev);
    }
    if opts.english {
        config.labels.style = LabelStyle::English;
    }
    if opts.raster_only {
        config.render.prefer_vector = false;
    }
    if let Some(scale) = opts.scale {
        config.render.render_scale = scale;
    }
    if opts.sequential {
        config.render.parallel = false;
    }
    if opts.threads.is_some() {
        config.render.threads = opts.threads;
    }
    config
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn cmd_year(config: CalendarConfig, args: YearArgs) -> anyhow::Result<()> {
    let env = RenderEnv::new(apply(config, &args.render)).context("set up renderer")?;
    let year = args.year.unwrap_or_else(current_year);

    let (path, stats) = yearcal::export_year(&env, year, args.out.as_deref())
        .with_context(|| format!("compose calendar for {year}"))?;

    eprintln!(
        "wrote {} ({} cells, {} fallbacks, {} failures)",
        path.display(),
        stats.cells,
        stats.fallbacks,
        stats.failures
    );
    Ok(())
}

fn cmd_cell(config: CalendarConfig, args: CellArgs) -> anyhow::Result<()> {
    let env = RenderEnv::new(apply(config, &args.render)).context("set up renderer")?;
    let d = args.date;

    let outcome = yearcal::render_day(&env, d.year(), d.month(), d.day())?;
    if let RenderOutcome::FallbackUsed { failures, .. } = &outcome {
        for (kind, err) in failures {
            eprintln!("{kind} backend failed: {err}");
        }
    }
    let bitmap = outcome
        .into_result()
        .with_context(|| format!("render cell {d}"))?;
    let img = bitmap.to_rgba_image()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_cells(config: CalendarConfig, args: CellsArgs) -> anyhow::Result<()> {
    let env = RenderEnv::new(apply(config, &args.render)).context("set up renderer")?;
    let year = args.year.unwrap_or_else(current_year);

    let (dir, stats) = yearcal::export_cells(&env, year, args.dir.as_deref())
        .with_context(|| format!("export cells for {year}"))?;

    eprintln!("wrote {} cells to {}", stats.cells - stats.failures, dir.display());
    Ok(())
}

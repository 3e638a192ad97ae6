// File: crates/dashboard/src/main.rs
// Summary: Bootstrap: loads the three TV market CSVs once, renders each chart into its
// mount point, and writes index.html plus one standalone SVG per chart.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tvchart_core::data::{BRAND_CSV, SIZE_CSV, TECH_CSV};
use tvchart_core::record::{max_count, sort_by_count_desc, sort_by_size_asc};
use tvchart_core::{
    page, theme, BrandRecord, ChartConfig, ChartRenderer, CsvSource, DataError, DataSource, Datum, Page,
    RenderOptions, ShareSource, SizeRecord, TechRecord,
};

#[derive(Parser, Debug)]
#[command(name = "tvchart-dashboard")]
#[command(about = "Render the TV brand, screen-size and screen-technology charts from CSV data")]
struct Cli {
    /// Site root containing the data/ directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output directory for index.html and the chart SVGs
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Color theme (aurora, midnight)
    #[arg(long, default_value = "aurora")]
    theme: String,

    /// Draw marks at their final extent instead of animating them in
    #[arg(long)]
    no_animation: bool,

    /// Show the technology shares from the CSV's percentage column instead of deriving them
    #[arg(long)]
    precomputed_shares: bool,

    /// Footer copyright year (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Exit with an error if any chart could not be rendered
    #[arg(long)]
    strict: bool,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    run(&cli)
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(cli: &Cli) -> Result<()> {
    let options = RenderOptions { theme: theme::find(&cli.theme), animate: !cli.no_animation };
    let year = cli.year.unwrap_or_else(page::current_year);
    let mut page = Page::dashboard(year);
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;

    let brands = CsvSource::<BrandRecord>::under(&cli.root, BRAND_CSV).load().map(|mut rows| {
        log_extent(&rows);
        sort_by_count_desc(&mut rows);
        rows
    });
    let sizes = CsvSource::<SizeRecord>::under(&cli.root, SIZE_CSV).load().map(|mut rows| {
        sort_by_size_asc(&mut rows);
        rows
    });
    let techs = CsvSource::<TechRecord>::under(&cli.root, TECH_CSV).load();

    let tech_config = if cli.precomputed_shares {
        ChartConfig::screen_technologies().with_share_source(ShareSource::Precomputed)
    } else {
        ChartConfig::screen_technologies()
    };

    let mut failures = 0;
    failures += mount_chart(&mut page, ChartConfig::brand_market_share(), options, brands, &cli.out_dir)?;
    failures += mount_chart(&mut page, ChartConfig::screen_sizes(), options, sizes, &cli.out_dir)?;
    failures += mount_chart(&mut page, tech_config, options, techs, &cli.out_dir)?;

    let index = cli.out_dir.join("index.html");
    std::fs::write(&index, page.to_html()).with_context(|| format!("writing {}", index.display()))?;
    info!(path = %index.display(), failures, "wrote page");

    if cli.strict && failures > 0 {
        anyhow::bail!("{failures} chart(s) could not be rendered");
    }
    Ok(())
}

/// Render one chart into its container. Load and mount failures are logged and leave the
/// container empty; returns the number of such failures (0 or 1).
fn mount_chart<D: Datum>(
    page: &mut Page,
    config: ChartConfig,
    options: RenderOptions,
    rows: Result<Vec<D>, DataError>,
    out_dir: &Path,
) -> Result<usize> {
    let id = config.id;
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            let e = anyhow::Error::new(e);
            error!(chart = id, error = format!("{e:#}"), "data source failed; chart left empty");
            return Ok(1);
        }
    };
    let mount = match page.mount(config.mount) {
        Ok(mount) => mount,
        Err(e) => {
            warn!(chart = id, error = %e, "chart not mounted");
            return Ok(1);
        }
    };

    let renderer = ChartRenderer::new(config, options);
    renderer.render(&rows, mount);
    let out = out_dir.join(format!("chart_{id}.svg"));
    if let Some(svg) = mount.children().last() {
        std::fs::write(&out, svg).with_context(|| format!("writing {}", out.display()))?;
    }
    info!(chart = id, rows = rows.len(), path = %out.display(), "rendered chart");
    Ok(0)
}

fn log_extent(rows: &[BrandRecord]) {
    let min = rows.iter().map(Datum::count).min().unwrap_or(0);
    info!(rows = rows.len(), max = max_count(rows), min, "brand counts");
}

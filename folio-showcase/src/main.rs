use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Target};
use folio_carousel::RuntimeConfig;
use folio_carousel::sim::UniformStrip;
use folio_showcase::{ProjectsSection, default_catalog, load_catalog, scenario};
use log::LevelFilter;
use serde::Serialize;

const DEFAULT_SCRIPT: &str =
    "wait:100 scroll:+900 wait:200 click:9 wait:700 visit:3 wait:700 snap wait:700";

#[derive(Parser, Debug)]
#[command(
    name = "folio-showcase",
    about = "Replay scripted interactions against the portfolio Projects carousel"
)]
struct Cli {
    /// Project catalog (.json array or .toml with [[projects]]); built-in sample when omitted
    #[arg(long)]
    projects: Option<PathBuf>,
    /// Carousel tuning file; defaults to $FOLIO_CAROUSEL_CONFIG or the user config dir
    #[arg(long)]
    config: Option<PathBuf>,
    /// Viewport width in pixels
    #[arg(long, default_value_t = 1000.0)]
    viewport: f32,
    /// Card width in pixels
    #[arg(long, default_value_t = 300.0)]
    item_width: f32,
    /// Steps: scroll:+N, scroll:-N, click:ABS, visit:LOGICAL, wait:MS, snap
    #[arg(long, default_value = DEFAULT_SCRIPT)]
    script: String,
    /// Print the step reports as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    projects: usize,
    steps: &'a [scenario::StepReport],
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("folio_showcase", LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RuntimeConfig::load_from(path)
            .with_context(|| format!("loading carousel config {}", path.display()))?,
        None => RuntimeConfig::load(),
    };
    let projects = match &cli.projects {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading project catalog {}", path.display()))?,
        None => default_catalog(),
    };
    let steps = scenario::parse_script(&cli.script).context("parsing --script")?;

    if !(cli.viewport.is_finite() && cli.viewport > 0.0) {
        anyhow::bail!("--viewport must be a positive number of pixels");
    }
    if !(cli.item_width.is_finite() && cli.item_width > 0.0) {
        anyhow::bail!("--item-width must be a positive number of pixels");
    }

    let project_count = projects.len();
    let strip = UniformStrip::new(cli.item_width, config.item_gap(), cli.viewport);
    let mut section = ProjectsSection::new(projects, strip, &config);
    let reports = scenario::run(&mut section, &steps);

    if cli.json {
        let output = JsonOutput {
            projects: project_count,
            steps: &reports,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serializing step reports")?
        );
        return Ok(());
    }

    println!("{project_count} projects, {} steps", reports.len());
    for report in &reports {
        println!("{report}");
    }
    match section.panel() {
        Some(panel) => print!("\n{panel}"),
        None => println!("\nNo projects to show"),
    }
    Ok(())
}

mod input;
mod reports;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use input::{JsonPanelFile, Overrides, load_config};
use partyspace_core::{
    EquilibriumEngine, EquilibriumOutcome, EquilibriumReport, PanelSource, SeededSynthetic,
    Simulation, SimulationConfig, SyntheticPanel, constants,
};

#[derive(Debug, Parser)]
#[command(name = "partyspace", version)]
#[command(
    about = "Simulate probabilistic voting and search for a two-party positioning equilibrium"
)]
struct Args {
    /// Survey panel as a JSON array of voter records
    #[arg(long)]
    panel: Option<PathBuf>,

    /// Synthetic partisans per party when no panel is given
    #[arg(long, default_value_t = constants::SYNTHETIC_VOTERS_PER_PARTY)]
    synthetic_voters: usize,

    /// Synthetic floating voters when no panel is given
    #[arg(long, default_value_t = constants::SYNTHETIC_FLOATING_VOTERS)]
    floating_voters: usize,

    /// JSON configuration file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for resampling and synthetic panels
    #[arg(long)]
    seed: Option<u64>,

    /// Bootstrap replications of the panel
    #[arg(long)]
    replications: Option<usize>,

    /// Maximum best-response iterations
    #[arg(long)]
    max_iter: Option<usize>,

    /// Convergence tolerance on distance from baseline
    #[arg(long)]
    tolerance: Option<f64>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the resampled population and party positions as JSON
    #[arg(long)]
    population_out: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    const fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            replications: self.replications,
            max_iter: self.max_iter,
            tolerance: self.tolerance,
        }
    }

    const fn synthetic_shape(&self) -> SyntheticPanel {
        SyntheticPanel {
            voters_per_party: self.synthetic_voters,
            floating_voters: self.floating_voters,
            spread: constants::SYNTHETIC_SPREAD,
        }
    }
}

type RunArtifacts = (Simulation, EquilibriumOutcome, EquilibriumReport);

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    announce_banner();
    let start_time = Instant::now();

    let config = load_config(args.config.as_deref(), args.overrides())?;
    let (simulation, outcome, report) = run(&args, config)?;

    write_reports(&args, &report)?;
    if let Some(path) = args.population_out.as_ref() {
        write_population(path, &simulation, &outcome)?;
    }

    log::info!("finished in {:?}", start_time.elapsed());
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    eprintln!("{}", "🗳️  Partyspace Equilibrium".bright_cyan().bold());
    eprintln!("{}", "==========================".cyan());
}

fn run(args: &Args, config: SimulationConfig) -> Result<RunArtifacts> {
    if let Some(path) = args.panel.clone() {
        eprintln!("📂 Loading panel from {}", path.display());
        run_source(JsonPanelFile::new(path), config)
    } else {
        let shape = args.synthetic_shape();
        eprintln!(
            "🎲 Generating synthetic panel: {} voters (seed {})",
            shape.len(),
            config.seed
        );
        let source = SeededSynthetic {
            shape,
            baselines: config.baselines,
            seed: config.seed,
        };
        run_source(source, config)
    }
}

fn run_source<S: PanelSource>(source: S, config: SimulationConfig) -> Result<RunArtifacts> {
    EquilibriumEngine::new(source)
        .run(config)
        .context("simulation failed")
}

fn write_reports(args: &Args, report: &EquilibriumReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, report)?,
        "csv" => reports::generate_csv_report(&mut output_target, report)?,
        _ => reports::generate_console_report(&mut output_target, report)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

fn write_population(
    path: &std::path::Path,
    simulation: &Simulation,
    outcome: &EquilibriumOutcome,
) -> Result<()> {
    let export = simulation.export_population(outcome);
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &export)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.flush()?;
    eprintln!(
        "💾 Wrote {} voters to {}",
        export.voters.len(),
        path.display()
    );
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use runar_contracts::RUNAR_LANGUAGE_URL;
use runar_core::output::StreamSink;
use runar_core::report::RunReport;
use runar_core::{RunConfig, Scheduler};
use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const EGILL: &str = "ᚱᚢᚾᛅᛦ

  Skalat maðr Rúnaʀ rísta,
  nema ráða vel kunni;
  þat verðr mǫrgum manni,
  es of myrkan staf villisk;
  sák á telgðu tálkni
  tíu launstafi ristna,
  þat hefr lauka lindi
  langs oftrega fengit.
    -- Egill Skallagrímsson.
";

#[derive(Parser, Debug)]
#[command(name = "runar")]
#[command(about = "Interpreter for the runic two-dimensional language ᚱᚢᚾᛅᛦ.")]
#[command(long_about = format!("{EGILL}\n{RUNAR_LANGUAGE_URL}"))]
struct Cli {
    /// Source file to run.
    file: PathBuf,
    /// Trace every executed instruction to stdout.
    #[arg(long, default_value_t = false)]
    debug: bool,
    /// Give up after this many ticks instead of running until `end`.
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Write a JSON run report to this path.
    #[arg(long)]
    report_json: Option<PathBuf>,
    /// Skip the GRID/POSITIONS listing before execution.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    try_main().map_err(|err| {
        eprintln!("{err:#}");
        err
    })
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let src = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("read source: {}", cli.file.display()))?;

    let program = match runar_core::load(&src) {
        Ok(p) => p,
        Err(err) => {
            if let Some(path) = &cli.report_json {
                write_report(path, &RunReport::load_failed(&err))?;
            }
            return Err(err).with_context(|| format!("load: {}", cli.file.display()));
        }
    };

    if !cli.quiet {
        let positions: Vec<(i64, i64)> = program.pointers.iter().map(|p| p.pos()).collect();
        println!("GRID: {:?}", program.grid.render());
        println!("POSITIONS: {positions:?}");
    }
    if program.pointers.is_empty() {
        warn!("no start glyph in {}; nothing will ever run", cli.file.display());
    }

    let config = RunConfig {
        max_ticks: cli.max_ticks,
    };
    let mut sched = Scheduler::new(program, StreamSink::new(std::io::stdout()), config);
    let result = sched.run();

    if let Some(path) = &cli.report_json {
        write_report(path, &RunReport::from_run(&sched, &result))?;
    }
    result
        .map(|_| ())
        .with_context(|| format!("run: {}", cli.file.display()))
}

fn init_tracing(debug: bool) {
    let (filter, writer) = if debug {
        (
            EnvFilter::new("runar=debug,runar_core=debug"),
            BoxMakeWriter::new(std::io::stdout),
        )
    } else {
        (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("runar=warn")),
            BoxMakeWriter::new(std::io::stderr),
        )
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .init();
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let bytes = report.to_json_pretty().context("encode run report")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create report dir: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write report: {}", path.display()))?;
    Ok(())
}

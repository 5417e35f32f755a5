//! Genstab - generator self-excitation stability analyzer
//!
//! Reads a scenario file and reports on, simulates, or draws the stability
//! picture of its operating point.
//!
//! # Usage
//!
//! ```bash
//! genstab analyze island.gs
//! genstab simulate island.gs -o response.csv
//! RUST_LOG=debug genstab contours island.gs -k 0.5 -k 1 -k 2
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use genstab_core::{
    dsl,
    error::{GenstabError, Result},
    report::{self, TrajectoryWriter},
    stability_boundary, voltage_contours, AnalysisSession, Scenario, DEFAULT_CONTOUR_RATIOS,
};
use tracing::{error, info};

/// Generator self-excitation stability analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the scenario's operating point and print its eigenvalues
    Analyze {
        /// Path to the scenario description file
        #[arg(value_name = "SCENARIO_FILE")]
        scenario: PathBuf,
    },
    /// Simulate the voltage response to a disturbance as CSV
    Simulate {
        /// Path to the scenario description file
        #[arg(value_name = "SCENARIO_FILE")]
        scenario: PathBuf,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the stability boundary and equal-voltage-ratio contours
    Contours {
        /// Path to the scenario description file
        #[arg(value_name = "SCENARIO_FILE")]
        scenario: PathBuf,

        /// Voltage ratio to draw (repeatable)
        #[arg(short = 'k', long = "ratio", value_parser = positive_ratio)]
        ratios: Vec<f64>,
    },
}

fn positive_ratio(s: &str) -> std::result::Result<f64, String> {
    let k = dsl::parse_value(s).ok_or_else(|| format!("invalid number '{}'", s))?;
    if k.is_finite() && k > 0.0 {
        Ok(k)
    } else {
        Err(format!("ratio must be > 0, got {}", k))
    }
}

fn load_session(path: &Path) -> Result<AnalysisSession> {
    let ast = dsl::parse_file(path)?;
    let scenario = Scenario::from_ast(ast)?;
    info!(path = %path.display(), params = %scenario.params, "loaded scenario");
    Ok(AnalysisSession::from_scenario(scenario))
}

fn run(args: Args) -> Result<()> {
    let stdout = io::stdout();

    match args.command {
        Command::Analyze { scenario } => {
            let session = load_session(&scenario)?;
            let evaluation = session.evaluate();
            report::write_report(&mut stdout.lock(), &evaluation)?;
        }
        Command::Simulate { scenario, output } => {
            let session = load_session(&scenario)?;
            let trajectory = session.simulate();
            info!("{}", report::summarize(&trajectory));

            let sink: Box<dyn Write> = match output {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| GenstabError::OutputError {
                        message: format!("{}: {}", path.display(), e),
                    })?;
                    Box::new(BufWriter::new(file))
                }
                None => Box::new(stdout.lock()),
            };
            let mut writer = TrajectoryWriter::new(sink);
            writer.write(&trajectory)?;
            writer.flush()?;
        }
        Command::Contours { scenario, ratios } => {
            let session = load_session(&scenario)?;
            let ratios = if ratios.is_empty() {
                DEFAULT_CONTOUR_RATIOS.to_vec()
            } else {
                ratios
            };
            let params = session.params();
            report::write_contours(
                &mut stdout.lock(),
                &stability_boundary(params),
                &voltage_contours(params, &ratios),
            )?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use std::process::ExitCode;

use incident_triage::{logger, report, run_triage};

/// Classifies incidents, allocates responders and routes emergency units for a scenario file.
#[derive(Debug, Parser)]
#[command(name = "incident-triage", version)]
struct Args {
    /// Path to the scenario JSON file.
    scenario: String,

    /// Seed for edge weights and capacities; overrides the scenario's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the allocation table to this CSV file.
    #[arg(long)]
    allocation_csv: Option<String>,

    /// Print the full report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    logger::init();

    let report = match run_triage(&args.scenario, args.seed) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Triage run failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.allocation_csv {
        if let Err(e) = report::write_allocation_csv_file(&report, path) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report::render_text(&report));
    }

    ExitCode::SUCCESS
}

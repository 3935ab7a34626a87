//! # Wind Load CLI
//!
//! Command-line front end for `wind_core`.
//!
//! ```text
//! wind_cli --sample > site.json          # write a sample input
//! wind_cli --input site.json             # text summary
//! wind_cli --input site.json --json      # full result as JSON
//! wind_cli --project job.wnd             # every calculation in a project
//! ```
//!
//! Logging goes to stderr through `env_logger`; set `RUST_LOG=debug` to see
//! the engine's branch decisions. Errors are printed as JSON and the process
//! exits with a non-zero status.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use wind_core::errors::{CalcError, CalcResult};
use wind_core::file_io::{load_input, load_project_with_lock_check};
use wind_core::{calculate, WindInput};

#[derive(Parser, Debug)]
#[command(name = "wind_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ASCE 7 wind load calculator", long_about = None)]
struct Cli {
    /// WindInput JSON file
    #[arg(short, long, conflicts_with = "project")]
    input: Option<PathBuf>,

    /// .wnd project file; every calculation in it is run
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Print results as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Print a sample input file and exit
    #[arg(long)]
    sample: bool,
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    code: &'static str,
    message: String,
    error: &'a CalcError,
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::serialization)?;
    println!("{}", json);
    Ok(())
}

fn run(cli: &Cli) -> CalcResult<()> {
    if cli.sample {
        return print_json(&sample_input());
    }

    if let Some(path) = &cli.project {
        let (project, lock) = load_project_with_lock_check(path)?;
        if let Some(info) = lock {
            log::warn!("{} is open by {} on {}", path.display(), info.user_id, info.machine);
        }
        let results = project.calculate_all();
        if cli.json {
            let by_label: Vec<_> = project
                .sorted_calculations()
                .into_iter()
                .map(|(id, item)| {
                    serde_json::json!({
                        "id": id,
                        "label": item.label,
                        "result": results.get(id).and_then(|r| r.as_ref().ok()),
                        "error": results.get(id).and_then(|r| r.as_ref().err()),
                    })
                })
                .collect();
            return print_json(&by_label);
        }
        println!("Project {} ({}), engineer {}", project.meta.job_id, project.meta.client, project.meta.engineer);
        for (id, item) in project.sorted_calculations() {
            println!();
            println!("=== {} ===", item.label);
            match results.get(id) {
                Some(Ok(result)) => print!("{}", report::summary(result)),
                Some(Err(e)) => println!("  error: {}", e),
                None => {}
            }
        }
        return Ok(());
    }

    let input = match &cli.input {
        Some(path) => load_input(path)?,
        None => {
            log::info!("no --input given; running the sample input");
            sample_input()
        }
    };
    let result = calculate(&input)?;
    if cli.json {
        print_json(&result)
    } else {
        print!("{}", report::summary(&result));
        Ok(())
    }
}

fn sample_input() -> WindInput {
    WindInput {
        label: "Sample warehouse".to_string(),
        effective_wind_area: Some(20.0),
        ..WindInput::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let output = ErrorOutput {
                code: e.error_code(),
                message: e.to_string(),
                error: &e,
            };
            match serde_json::to_string_pretty(&output) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}

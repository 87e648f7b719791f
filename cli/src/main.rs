//! alloc-cli: Command-line interface for the tabletop session allocator
//!
//! # Commands
//!
//! - `solve`: Run the allocator on a problem file
//! - `validate`: Validate a problem file without running any trials
//! - `schema`: Print an example JSON input/output format

use alloc_core::models::AllocationInput;
use alloc_core::run_allocator;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alloc-cli")]
#[command(version = "0.1.0")]
#[command(about = "Tabletop session allocator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the allocator on a problem file
    Solve {
        /// Input JSON file path (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Run trials across all available cores instead of sequentially
        #[arg(long)]
        parallel: bool,
    },

    /// Validate a problem file without running any trials
    Validate {
        /// Input JSON file path
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Read input from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },

    /// Print an example JSON schema for input/output formats
    Schema {
        /// Which schema to print: input, output, or all
        #[arg(value_name = "TYPE", default_value = "all")]
        schema_type: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            stdin,
            output,
            pretty,
            parallel,
        } => cmd_solve(input, stdin, output, pretty, parallel),

        Commands::Validate { input, stdin } => cmd_validate(input, stdin),

        Commands::Schema { schema_type } => cmd_schema(&schema_type),
    }
}

fn read_input(file: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    if use_stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path))
    } else {
        anyhow::bail!("Either provide an input file or use --stdin")
    }
}

fn cmd_solve(
    input: Option<PathBuf>,
    stdin: bool,
    output: Option<PathBuf>,
    pretty: bool,
    parallel: bool,
) -> Result<()> {
    let json_str = read_input(input, stdin)?;
    let allocation_input: AllocationInput =
        serde_json::from_str(&json_str).context("Failed to parse input JSON")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(format!(
        "running {} trial(s){}...",
        allocation_input.solver.n_trials,
        if parallel { " in parallel" } else { "" }
    ));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = if parallel {
        alloc_core::run_allocator_parallel(&allocation_input)
    } else {
        run_allocator(&allocation_input)
    }
    .map_err(|e| anyhow::anyhow!("allocator error: {e}"))?;

    spinner.finish_and_clear();

    let output_json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    if let Some(output_path) = output {
        fs::write(&output_path, &output_json)
            .with_context(|| format!("Failed to write output to {:?}", output_path))?;
        eprintln!("Result written to {:?}", output_path);
    } else {
        println!("{}", output_json);
    }

    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool) -> Result<()> {
    let json_str = read_input(input, stdin)?;

    let allocation_input: AllocationInput =
        serde_json::from_str(&json_str).context("JSON parse error")?;

    match alloc_core::validation::validate(&allocation_input) {
        Ok(()) => {
            println!("{{\"valid\": true, \"message\": \"input is valid\"}}");
            Ok(())
        }
        Err(e) => {
            println!(
                "{{\"valid\": false, \"error\": \"{}\"}}",
                e.to_string().replace('"', "\\\"")
            );
            Ok(())
        }
    }
}

fn cmd_schema(schema_type: &str) -> Result<()> {
    match schema_type {
        "input" => print_input_schema(),
        "output" => print_output_schema(),
        "all" => {
            println!("=== INPUT SCHEMA ===\n");
            print_input_schema()?;
            println!("\n=== OUTPUT SCHEMA ===\n");
            print_output_schema()?;
            Ok(())
        }
        _ => anyhow::bail!(
            "Unknown schema type: {}. Use: input, output, or all",
            schema_type
        ),
    }
}

fn print_input_schema() -> Result<()> {
    let example = r#"{
  "sessions": [
    {"id": "dungeon-crawl", "min": 2, "optimal": 4, "max": 5, "metadata": {"gm": "pat"}},
    {"id": "heist", "min": 2, "optimal": 4, "max": 5, "metadata": {}}
  ],
  "groups": [
    {"id": "alice+bob", "player_ids": ["alice", "bob"], "avg_compensation": 0.0},
    {"id": "carol", "player_ids": ["carol"], "avg_compensation": 0.0}
  ],
  "preferences": {
    "alice+bob": {"dungeon-crawl": 5, "heist": 1},
    "carol": {"dungeon-crawl": 3, "heist": 4}
  },
  "solver": {
    "run_seed": 42,
    "n_trials": 20,
    "logging": {"log_trial_summaries": false, "log_final_breakdown": true}
  }
}"#;
    println!("{}", example);
    Ok(())
}

fn print_output_schema() -> Result<()> {
    let example = r#"{
  "assignments": [
    {"group_id": "alice+bob", "session_id": "dungeon-crawl"},
    {"group_id": "carol", "session_id": "heist"}
  ],
  "total_loss": 0,
  "loss_histogram": {"0": 3},
  "delta_histogram": {"-2": 1, "-3": 1},
  "trial_index": 4
}"#;
    println!("{}", example);
    Ok(())
}

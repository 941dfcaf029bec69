//! logicbench - combinational digital-logic workbench CLI
//!
//! Provides commands for:
//! - Running a netlist through the event-driven timing simulator
//! - Computing SCOAP testability costs
//! - Generating PODEM test patterns for a fault list
//! - Showing system information

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use logic_cli::report::{AtpgReportLine, ScoapReport, TraceReport};
use logic_cli::workbench;
use logic_core::WorkbenchConfig;

/// logicbench - a combinational digital-logic workbench
///
/// Zero-delay evaluation, event-driven timing simulation, SCOAP
/// testability analysis, and PODEM automatic test-pattern generation
/// over ISCAS-85 netlists.
#[derive(Parser)]
#[command(name = "logicbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Path to a JSON workbench configuration file (overrides defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the event-driven timing simulator against a stimulus file
    Simulate {
        /// Path to an ISCAS-85 netlist
        #[arg(value_name = "NETLIST")]
        netlist: PathBuf,

        /// Path to a stimulus file
        #[arg(value_name = "STIMULUS")]
        stimulus: PathBuf,
    },

    /// Compute SCOAP controllability/observability costs
    Scoap {
        /// Path to an ISCAS-85 netlist
        #[arg(value_name = "NETLIST")]
        netlist: PathBuf,
    },

    /// Generate PODEM test patterns for a fault list
    Atpg {
        /// Path to an ISCAS-85 netlist
        #[arg(value_name = "NETLIST")]
        netlist: PathBuf,

        /// Path to a fault list
        #[arg(value_name = "FAULTS")]
        faults: PathBuf,
    },

    /// Show system information
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            WorkbenchConfig::from_json(&json)?
        },
        None => WorkbenchConfig::default(),
    };

    match cli.command {
        Commands::Simulate { netlist, stimulus } => cmd_simulate(&netlist, &stimulus, &config, cli.format),
        Commands::Scoap { netlist } => cmd_scoap(&netlist, cli.format),
        Commands::Atpg { netlist, faults } => cmd_atpg(&netlist, &faults, &config, cli.format),
        Commands::Info => cmd_info(cli.format),
    }
}

fn cmd_simulate(netlist_path: &PathBuf, stimulus_path: &PathBuf, config: &WorkbenchConfig, format: OutputFormat) -> Result<()> {
    let mut netlist = workbench::load_netlist(netlist_path)?;
    let trace = workbench::simulate(&mut netlist, stimulus_path, config)?;
    let report = TraceReport::build(&netlist, &trace);

    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_scoap(netlist_path: &PathBuf, format: OutputFormat) -> Result<()> {
    let mut netlist = workbench::load_netlist(netlist_path)?;
    workbench::scoap(&mut netlist);
    let report = ScoapReport::build(&netlist);

    match format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn cmd_atpg(netlist_path: &PathBuf, faults_path: &PathBuf, config: &WorkbenchConfig, format: OutputFormat) -> Result<()> {
    let mut netlist = workbench::load_netlist(netlist_path)?;
    let results = workbench::run_atpg(&mut netlist, faults_path, config)?;

    let lines: Vec<AtpgReportLine> = results
        .iter()
        .map(|(fault, vector)| AtpgReportLine::build(&netlist, *fault, vector.as_ref()))
        .collect();

    match format {
        OutputFormat::Text => {
            for line in &lines {
                println!("{line}");
            }
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&lines)?),
    }
    Ok(())
}

fn cmd_info(format: OutputFormat) -> Result<()> {
    let info = SystemInfo {
        name: "logicbench".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engines: vec![
            "zero-delay evaluator".to_string(),
            "event-driven timing simulator".to_string(),
            "SCOAP testability analysis".to_string(),
            "PODEM automatic test-pattern generation".to_string(),
        ],
        gate_kinds: vec!["inpt", "and", "or", "nand", "nor", "xor", "xnor", "not", "buf", "fanout"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    match format {
        OutputFormat::Text => {
            println!("\n=== {} ===", info.name);
            println!("Version: {}", info.version);
            println!();
            println!("Engines:");
            for engine in &info.engines {
                println!("  - {engine}");
            }
            println!();
            println!("Gate kinds:");
            println!("  {}", info.gate_kinds.join(", "));
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct SystemInfo {
    name: String,
    version: String,
    engines: Vec<String>,
    gate_kinds: Vec<String>,
}

//! # logic_cli
//!
//! Command-line interface and integration library for the combinational
//! logic workbench.
//!
//! This crate provides:
//! - [`workbench`]: loading netlists/stimuli/fault lists and driving the
//!   simulator, SCOAP, and ATPG engines.
//! - [`report`]: text/JSON report writers for the `simulate`, `scoap`,
//!   and `atpg` subcommands.
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use logic_cli::{report::TraceReport, workbench};
//! use logic_core::WorkbenchConfig;
//! use std::path::Path;
//!
//! let config = WorkbenchConfig::default();
//! let mut netlist = workbench::load_netlist(Path::new("c17.isc")).unwrap();
//! let trace = workbench::simulate(&mut netlist, Path::new("c17.stim"), &config).unwrap();
//! println!("{}", TraceReport::build(&netlist, &trace));
//! ```

pub mod report;
pub mod workbench;

//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use logic_core::prelude::*;
//! ```

pub use crate::algebra::{
    evaluate_binary, evaluate_dalgebra, inject_fault, Kind, LogicValue,
};
pub use crate::config::{AtpgConfig, ScoapConfig, SimulatorConfig, WorkbenchConfig};
pub use crate::error::{LogicError, Result};
pub use crate::gate::{Gate, SCOAP_UNSET};
pub use crate::netlist::Netlist;

//! # logic_core
//!
//! Netlist data model and logic algebra for the combinational logic
//! workbench.
//!
//! This crate provides:
//! - [`Gate`]: the atomic netlist entity (address, kind, inputs, SCOAP
//!   costs, fault-injection flags).
//! - [`Netlist`]: an address-keyed DAG of gates with derived
//!   primary-input/output views and consumer adjacency.
//! - [`algebra`]: the 7-valued logic domain (`0,1,U,Z,X,D,D'`) and the
//!   per-gate-kind binary and D-algebra evaluation rules.
//! - [`LogicError`]: unified error type shared by every downstream crate.
//!
//! ## Example
//!
//! ```rust
//! use logic_core::prelude::*;
//!
//! let mut a = Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]);
//! a.output = LogicValue::One;
//! let mut b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
//! b.output = LogicValue::One;
//! let mut and_gate = Gate::new(3, "g", Kind::And, 0, 2, vec![]);
//! and_gate.inputs = vec![1, 2];
//!
//! let netlist = Netlist::build(vec![a, b, and_gate]).unwrap();
//! let inputs = netlist.input_values(3);
//! assert_eq!(evaluate_binary(Kind::And, &inputs), LogicValue::One);
//! ```

pub mod algebra;
pub mod config;
pub mod error;
pub mod gate;
pub mod netlist;
pub mod prelude;

pub use algebra::{evaluate_binary, evaluate_dalgebra, inject_fault, Kind, LogicValue};
pub use config::{AtpgConfig, ScoapConfig, SimulatorConfig, WorkbenchConfig};
pub use error::{LogicError, Result};
pub use gate::Gate;
pub use netlist::Netlist;

//! # logic_parser
//!
//! Boundary parsers for the workbench's three text formats (§6): the
//! ISCAS-85 netlist, the timing simulator's stimulus file, and PODEM's
//! fault list. None of these formats need a bespoke error type — every
//! failure mode they raise already has a home in
//! [`logic_core::LogicError`] (`Parse` for the netlist and fault list,
//! `Stimulus` for the stimulus file), so this crate re-exports
//! `logic_core`'s result type rather than wrapping it.

pub mod faultlist;
pub mod iscas;
pub mod stimulus;

pub use iscas::write as write_iscas;
pub use logic_core::{LogicError, Result};

//! # logic_atpg
//!
//! A PODEM-style automatic test-pattern generator (§4.6) for single
//! stuck-at faults. Given a [`logic_core::Netlist`] whose SCOAP costs
//! have already been computed by `logic_scoap`, [`PodemEngine`] performs
//! a SCOAP-guided depth-first search over primary-input assignments to
//! find a pattern that drives a fault's discrepancy to a primary output.

pub mod error;
pub mod fault;
pub mod podem;

pub use error::{AtpgError, Result};
pub use fault::{Fault, TestVector};
pub use podem::PodemEngine;

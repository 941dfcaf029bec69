//! # logic_scoap
//!
//! SCOAP (Sandia Controllability/Observability Analysis Program)
//! testability measures (§4.5): a forward controllability pass followed
//! by a backward observability pass over a [`logic_core::Netlist`].
//! PODEM's objective and backtrace steps consult these costs to steer its
//! search without backtracking blindly.

pub mod error;
pub mod scoap;

pub use error::{Result, ScoapError};
pub use scoap::compute;

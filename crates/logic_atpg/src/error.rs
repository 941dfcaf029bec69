//! Error types for the PODEM ATPG engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtpgError {
    #[error(transparent)]
    Core(#[from] logic_core::LogicError),

    #[error("unknown fault target: gate {0} has no primary address in the netlist")]
    UnknownFaultTarget(u32),
}

pub type Result<T> = std::result::Result<T, AtpgError>;

//! Error types for the simulator crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("simulation error: {0}")]
    Simulation(String),

    #[error(transparent)]
    Core(#[from] logic_core::LogicError),
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }
}

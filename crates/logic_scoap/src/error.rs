//! Error types for the SCOAP engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoapError {
    #[error(transparent)]
    Core(#[from] logic_core::LogicError),
}

pub type Result<T> = std::result::Result<T, ScoapError>;

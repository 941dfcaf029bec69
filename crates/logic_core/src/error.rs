//! Error types shared by every engine in the workbench.

use thiserror::Error;

/// Unified error type for netlist construction and evaluation.
#[derive(Error, Debug)]
pub enum LogicError {
    // ============ Parse errors ============
    /// Malformed line, unknown gate kind, or unresolved reference.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    // ============ Structural errors ============
    /// Cycle, fanin mismatch, or missing primary output.
    #[error("structural error at gate {address}: {message}")]
    Structural { address: u32, message: String },

    // ============ Stimulus errors ============
    /// Unknown input address, out-of-order time, or bad value character.
    #[error("stimulus error at line {line}: {message}")]
    Stimulus { line: usize, message: String },

    // ============ ATPG ============
    /// The PODEM recursion exhausted its configured backtrack budget.
    #[error("ATPG backtrack budget ({budget}) exceeded for fault at gate {address}")]
    AtpgBudgetExceeded { address: u32, budget: usize },

    /// Gate kind not recognized by an evaluator.
    #[error("unrecognized gate kind '{0}'")]
    UnknownGateKind(String),

    // ============ I/O ============
    /// IO error reading a netlist, stimulus, fault list, or report file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias used throughout the workbench.
pub type Result<T> = std::result::Result<T, LogicError>;

impl LogicError {
    /// Builds a [`LogicError::Parse`] at the given source line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Builds a [`LogicError::Structural`] for the given gate address.
    pub fn structural(address: u32, message: impl Into<String>) -> Self {
        Self::Structural {
            address,
            message: message.into(),
        }
    }

    /// Builds a [`LogicError::Stimulus`] at the given source line.
    pub fn stimulus(line: usize, message: impl Into<String>) -> Self {
        Self::Stimulus {
            line,
            message: message.into(),
        }
    }
}

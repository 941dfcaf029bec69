//! The single stuck-at fault model (§3, §4.6) and the resulting test
//! pattern.

use logic_core::LogicValue;

/// A single stuck-at fault: line `address` is stuck at `stuck_at`
/// (`LogicValue::Zero` or `LogicValue::One`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub address: u32,
    pub stuck_at: LogicValue,
}

impl Fault {
    pub fn new(address: u32, stuck_at: LogicValue) -> Self {
        Self { address, stuck_at }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/sa{}", self.address, self.stuck_at.as_char())
    }
}

/// A primary-input assignment that detects a fault, in primary-input
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub assignment: Vec<(u32, LogicValue)>,
}

impl std::fmt::Display for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (_, value)) in self.assignment.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value.as_char())?;
        }
        Ok(())
    }
}

//! Configuration management for the workbench.

use serde::{Deserialize, Serialize};

/// Aggregate configuration for a workbench run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkbenchConfig {
    /// Event-driven simulator configuration.
    pub simulator: SimulatorConfig,
    /// PODEM ATPG configuration.
    pub atpg: AtpgConfig,
    /// SCOAP configuration (currently just a placeholder for future
    /// cost-model tuning).
    pub scoap: ScoapConfig,
}

/// Configuration for the event-driven timing simulator (§4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Safety bound on total scheduled events, guarding against the
    /// "same event re-inserted past a safety bound" cycle-detection
    /// failure mode in §4.4.
    pub max_events: usize,
}

/// Configuration for the PODEM engine (§4.6, §9 "Search budget").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtpgConfig {
    /// Maximum number of primary-input backtracks before a fault is
    /// reported as undetectable-within-budget rather than exhaustively
    /// searched to `2^|PI|`.
    pub max_backtracks: usize,
}

/// Configuration for the SCOAP engine (§4.5). Reserved for future tuning
/// of the cost model; currently empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoapConfig {}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_events: 1_000_000,
        }
    }
}

impl Default for AtpgConfig {
    fn default() -> Self {
        Self {
            max_backtracks: 50_000,
        }
    }
}

impl WorkbenchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON string.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Serializes configuration to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WorkbenchConfig::default();
        assert_eq!(config.atpg.max_backtracks, 50_000);
        assert_eq!(config.simulator.max_events, 1_000_000);
    }

    #[test]
    fn json_roundtrip() {
        let config = WorkbenchConfig::default();
        let json = config.to_json().unwrap();
        let parsed = WorkbenchConfig::from_json(&json).unwrap();
        assert_eq!(config.atpg.max_backtracks, parsed.atpg.max_backtracks);
    }
}

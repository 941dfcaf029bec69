//! The [`Gate`] type: the atomic entity of a netlist (§3).

use crate::algebra::{Kind, LogicValue};
use serde::{Deserialize, Serialize};

/// A single gate (or fan-out branch) in a netlist.
///
/// Mutated only through (i) an evaluator writing `output`, (ii) the SCOAP
/// engine writing the cost fields, (iii) PODEM toggling the fault fields
/// and writing `output` (§3 Lifecycle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    /// Unique integer identity from the netlist source.
    pub address: u32,
    /// Human-readable label.
    pub name: String,
    /// Gate kind.
    pub kind: Kind,
    /// Declared fan-out arity (0 for primary outputs).
    pub fanout: usize,
    /// Declared fan-in arity (0 for `inpt`).
    pub fanin: usize,
    /// Ordered references to predecessor gates, by address.
    pub inputs: Vec<u32>,
    /// Non-negative propagation delay; ignored by the zero-delay evaluator.
    pub delay: u64,
    /// Current output value.
    pub output: LogicValue,
    /// SCOAP controllability-0 cost.
    pub cc0: u64,
    /// SCOAP controllability-1 cost.
    pub cc1: u64,
    /// SCOAP observability cost.
    pub co: u64,
    /// True while this gate carries an injected stuck-at fault.
    pub faulty: bool,
    /// The stuck-at value of the injected fault, when `faulty`.
    pub fault_value: Option<LogicValue>,
    /// Fault names declared on this line in the source netlist.
    pub faults: Vec<String>,
}

/// SCOAP costs default to "not yet computed". The engine uses a large
/// sentinel rather than a true `u64::MAX` so that `+1` additions during
/// the forward pass cannot silently overflow if applied to an
/// unintialized line by mistake.
pub const SCOAP_UNSET: u64 = u64::MAX / 4;

impl Gate {
    /// Builds a fresh gate with unset SCOAP costs and an undefined output.
    pub fn new(
        address: u32,
        name: impl Into<String>,
        kind: Kind,
        fanout: usize,
        fanin: usize,
        faults: Vec<String>,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            kind,
            fanout,
            fanin,
            inputs: Vec::new(),
            delay: 0,
            output: LogicValue::U,
            cc0: SCOAP_UNSET,
            cc1: SCOAP_UNSET,
            co: SCOAP_UNSET,
            faulty: false,
            fault_value: None,
            faults,
        }
    }

    /// True if this gate is a primary input.
    pub fn is_primary_input(&self) -> bool {
        self.kind == Kind::Inpt
    }

    /// True if this gate has no consumer (a primary output, per §3).
    pub fn is_primary_output(&self) -> bool {
        self.fanout == 0
    }

    /// The non-controlling value used by PODEM's backtrace/objective steps.
    pub fn non_controlling_value(&self) -> LogicValue {
        self.kind.non_controlling_value()
    }

    /// True if this gate's kind inverts (nand, nor, xnor, not).
    pub fn inverts(&self) -> bool {
        self.kind.inverts()
    }
}

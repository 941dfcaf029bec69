//! The [`Netlist`]: an immutable-shape, mutable-contents DAG of gates
//! (§3, §4.1).

use crate::algebra::{Kind, LogicValue};
use crate::error::{LogicError, Result};
use crate::gate::Gate;
use std::collections::HashMap;
use tracing::{debug, info};

/// A netlist: a mapping from address to [`Gate`], plus the derived
/// primary-input/output views and a consumer adjacency used by the event
/// simulator's fan-out rescheduling and PODEM's X-path check.
#[derive(Debug, Clone)]
pub struct Netlist {
    /// Gates keyed by address. Iteration in ascending-address order is a
    /// valid topological order (§4.1: the parser guarantees declaration
    /// order visits predecessors before successors).
    gates: HashMap<u32, Gate>,
    /// Addresses in declaration order — the topological order relied on
    /// by the zero-delay evaluator and PODEM's implication pass.
    order: Vec<u32>,
    /// address -> addresses of gates that take it as an input.
    consumers: HashMap<u32, Vec<u32>>,
    primary_inputs: Vec<u32>,
    primary_outputs: Vec<u32>,
}

impl Netlist {
    /// Builds a netlist from gates already materialized in declaration
    /// order, validating the invariants from §3.
    pub fn build(gates: Vec<Gate>) -> Result<Self> {
        let order: Vec<u32> = gates.iter().map(|g| g.address).collect();
        let mut map = HashMap::with_capacity(gates.len());
        for gate in gates {
            if map.insert(gate.address, gate).is_some() {
                return Err(LogicError::structural(
                    *order.last().unwrap_or(&0),
                    "duplicate gate address",
                ));
            }
        }

        for &addr in &order {
            let gate = &map[&addr];
            if gate.kind != Kind::Inpt && gate.inputs.len() != gate.fanin {
                return Err(LogicError::structural(
                    addr,
                    format!(
                        "declared fanin {} does not match {} bound inputs",
                        gate.fanin,
                        gate.inputs.len()
                    ),
                ));
            }
            if gate.kind == Kind::Fanout && gate.inputs.len() != 1 {
                return Err(LogicError::structural(
                    addr,
                    "fanout gate must have exactly one input",
                ));
            }
            for &input_addr in &gate.inputs {
                if !map.contains_key(&input_addr) {
                    return Err(LogicError::structural(
                        addr,
                        format!("reference to unresolved input address {input_addr}"),
                    ));
                }
            }
            debug!(gate = addr, kind = %gate.kind, "netlist gate validated");
        }

        let mut consumers: HashMap<u32, Vec<u32>> = HashMap::new();
        for &addr in &order {
            for &input_addr in &map[&addr].inputs {
                consumers.entry(input_addr).or_default().push(addr);
            }
        }

        let primary_inputs: Vec<u32> = order
            .iter()
            .copied()
            .filter(|a| map[a].is_primary_input())
            .collect();
        let primary_outputs: Vec<u32> = order
            .iter()
            .copied()
            .filter(|a| map[a].is_primary_output())
            .collect();

        if primary_inputs.is_empty() || primary_outputs.is_empty() {
            return Err(LogicError::structural(
                *order.first().unwrap_or(&0),
                "netlist must have at least one primary input and one primary output",
            ));
        }

        info!(
            gate_count = order.len(),
            primary_inputs = primary_inputs.len(),
            primary_outputs = primary_outputs.len(),
            "netlist constructed"
        );

        Ok(Self {
            gates: map,
            order,
            consumers,
            primary_inputs,
            primary_outputs,
        })
    }

    /// Gate addresses in topological (declaration) order.
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Immutable gate access.
    pub fn gate(&self, address: u32) -> &Gate {
        &self.gates[&address]
    }

    /// Mutable gate access.
    pub fn gate_mut(&mut self, address: u32) -> &mut Gate {
        self.gates.get_mut(&address).expect("valid gate address")
    }

    /// Total gate count, including fan-out branch nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Primary input addresses, in declaration order.
    pub fn primary_inputs(&self) -> &[u32] {
        &self.primary_inputs
    }

    /// Primary output addresses, in declaration order.
    pub fn primary_outputs(&self) -> &[u32] {
        &self.primary_outputs
    }

    /// Addresses of gates that take `address` as one of their inputs.
    pub fn consumers_of(&self, address: u32) -> &[u32] {
        self.consumers.get(&address).map(AsRef::as_ref).unwrap_or(&[])
    }

    /// Finds a gate's address by its name (used by fault-list resolution).
    pub fn address_of_name(&self, name: &str) -> Option<u32> {
        self.order.iter().copied().find(|&a| self.gates[&a].name == name)
    }

    /// Input values for `address`, in declared order — the slice passed to
    /// the algebra's `evaluate_*` free functions.
    pub fn input_values(&self, address: u32) -> Vec<LogicValue> {
        self.gates[&address]
            .inputs
            .iter()
            .map(|&a| self.gates[&a].output)
            .collect()
    }
}

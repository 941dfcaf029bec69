//! Text and JSON report writers (§6).
//!
//! Shaped as plain data (`Serialize`) plus a hand-written [`Display`] impl
//! for the text form, so the CLI's `--format json|text` switch can reuse
//! the same builder for both.

use logic_atpg::{Fault, TestVector};
use logic_core::Netlist;
use logic_sim::Trace;
use serde::Serialize;
use std::fmt;

/// The "Test Vectors" and "Gate Outputs" tables from §6, covering every
/// time step the trace recorded.
#[derive(Debug, Serialize)]
pub struct TraceReport {
    pub primary_inputs: Vec<u32>,
    pub times: Vec<u64>,
    /// `inputs[i]` holds the primary-input values at `times[i]`.
    pub inputs: Vec<Vec<char>>,
    pub gates: Vec<GateTrace>,
}

#[derive(Debug, Serialize)]
pub struct GateTrace {
    pub address: u32,
    pub name: String,
    pub kind: String,
    /// `outputs[i]` is this gate's output at `times[i]`.
    pub outputs: Vec<char>,
}

impl TraceReport {
    pub fn build(netlist: &Netlist, trace: &Trace) -> Self {
        let times: Vec<u64> = trace.times().collect();
        let primary_inputs = netlist.primary_inputs().to_vec();

        let inputs = times
            .iter()
            .map(|&t| {
                primary_inputs
                    .iter()
                    .map(|&addr| trace.output_at(t, addr).unwrap_or(netlist.gate(addr).output).as_char())
                    .collect()
            })
            .collect();

        let gates = netlist
            .order()
            .iter()
            .map(|&addr| {
                let gate = netlist.gate(addr);
                GateTrace {
                    address: addr,
                    name: gate.name.clone(),
                    kind: gate.kind.to_string(),
                    outputs: times
                        .iter()
                        .map(|&t| trace.output_at(t, addr).unwrap_or(gate.output).as_char())
                        .collect(),
                }
            })
            .collect();

        Self {
            primary_inputs,
            times,
            inputs,
            gates,
        }
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test Vectors:")?;
        write!(f, "{:>8} |", "time")?;
        for addr in &self.primary_inputs {
            write!(f, " {:>6} |", format!("in{addr}"))?;
        }
        writeln!(f)?;
        for (row, &t) in self.inputs.iter().zip(&self.times) {
            write!(f, "{t:>8} |")?;
            for v in row {
                write!(f, " {v:>6} |")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "\nGate Outputs:")?;
        write!(f, "{:>24} |", "gate (kind)")?;
        for &t in &self.times {
            write!(f, " t={t:<5}|")?;
        }
        writeln!(f)?;
        for gate in &self.gates {
            write!(f, "{:>24} |", format!("{}({})", gate.address, gate.kind))?;
            for v in &gate.outputs {
                write!(f, " {v:<6}|")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Per-gate SCOAP costs (§4.5).
#[derive(Debug, Serialize)]
pub struct ScoapReport {
    pub rows: Vec<ScoapRow>,
}

#[derive(Debug, Serialize)]
pub struct ScoapRow {
    pub address: u32,
    pub name: String,
    pub cc0: u64,
    pub cc1: u64,
    pub co: u64,
}

impl ScoapReport {
    pub fn build(netlist: &Netlist) -> Self {
        let rows = netlist
            .order()
            .iter()
            .map(|&addr| {
                let gate = netlist.gate(addr);
                ScoapRow {
                    address: addr,
                    name: gate.name.clone(),
                    cc0: gate.cc0,
                    cc1: gate.cc1,
                    co: gate.co,
                }
            })
            .collect();
        Self { rows }
    }
}

impl fmt::Display for ScoapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>6} {:<16} {:>6} {:>6} {:>6}", "addr", "name", "CC0", "CC1", "CO")?;
        for row in &self.rows {
            writeln!(f, "{:>6} {:<16} {:>6} {:>6} {:>6}", row.address, row.name, row.cc0, row.cc1, row.co)?;
        }
        Ok(())
    }
}

/// One line of the ATPG report: the fault, and its detecting vector or
/// `none found` (§6).
#[derive(Debug, Serialize)]
pub struct AtpgReportLine {
    pub net_name: String,
    pub fault: String,
    pub pattern: Option<String>,
}

impl AtpgReportLine {
    pub fn build(netlist: &Netlist, fault: Fault, vector: Option<&TestVector>) -> Self {
        Self {
            net_name: netlist.gate(fault.address).name.clone(),
            fault: fault.to_string(),
            pattern: vector.map(|v| v.to_string()),
        }
    }
}

impl fmt::Display for AtpgReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => write!(f, "{} {}: {}", self.net_name, self.fault, pattern),
            None => write!(f, "{} {}: none found", self.net_name, self.fault),
        }
    }
}

//! The PODEM recursion (§4.6): objective selection, SCOAP-guided
//! backtrace, implication to fixed point, D-frontier maintenance, the
//! X-path check, and chronological backtracking.
//!
//! Requires SCOAP costs (`Gate::cc0`/`cc1`/`co`) to already be populated
//! by [`logic_scoap::compute`] — the engine only reads them.

use crate::error::{AtpgError, Result};
use crate::fault::{Fault, TestVector};
use logic_core::{evaluate_dalgebra, inject_fault, AtpgConfig, Kind, LogicValue, Netlist};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace, warn};

fn opposite(value: LogicValue) -> LogicValue {
    match value {
        LogicValue::Zero => LogicValue::One,
        LogicValue::One => LogicValue::Zero,
        other => other,
    }
}

/// A single PODEM run against one `Netlist`. Owns an exclusive `&mut`
/// borrow of the circuit for its lifetime, so the borrow checker rules
/// out the reentrant use spec.md forbids without any runtime locking.
pub struct PodemEngine<'a> {
    netlist: &'a mut Netlist,
    config: AtpgConfig,
    fault_gate: u32,
    fault_value: LogicValue,
    activated: bool,
    backtracks: usize,
}

impl<'a> PodemEngine<'a> {
    pub fn new(netlist: &'a mut Netlist, config: AtpgConfig) -> Self {
        Self {
            netlist,
            config,
            fault_gate: 0,
            fault_value: LogicValue::Zero,
            activated: false,
            backtracks: 0,
        }
    }

    /// Generates a test vector detecting `fault`, or `None` if it is
    /// undetectable with the current SCOAP costs and backtrack budget.
    pub fn generate_test_vector(&mut self, fault: Fault) -> Result<Option<TestVector>> {
        if !self.netlist.order().contains(&fault.address) {
            return Err(AtpgError::UnknownFaultTarget(fault.address));
        }

        self.podem_init();
        self.fault_gate = fault.address;
        self.fault_value = fault.stuck_at;
        self.activated = false;
        self.backtracks = 0;
        self.netlist.gate_mut(fault.address).faulty = true;
        self.netlist.gate_mut(fault.address).fault_value = Some(fault.stuck_at);

        let outcome = self.recurse();

        self.netlist.gate_mut(fault.address).faulty = false;
        self.netlist.gate_mut(fault.address).fault_value = None;

        match outcome {
            Ok(true) => Ok(Some(self.collect_test_vector())),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!(fault = %fault, "podem budget exceeded, treating as undetectable-within-budget");
                self.podem_init();
                Err(e)
            }
        }
    }

    fn podem_init(&mut self) {
        for &addr in &self.netlist.order().to_vec() {
            self.netlist.gate_mut(addr).output = LogicValue::X;
        }
    }

    fn collect_test_vector(&self) -> TestVector {
        let assignment = self
            .netlist
            .primary_inputs()
            .iter()
            .map(|&addr| {
                let value = match self.netlist.gate(addr).output {
                    LogicValue::D => LogicValue::One,
                    LogicValue::DBar => LogicValue::Zero,
                    other => other,
                };
                (addr, value)
            })
            .collect();
        TestVector { assignment }
    }

    fn success(&self) -> bool {
        self.netlist
            .primary_outputs()
            .iter()
            .any(|&addr| matches!(self.netlist.gate(addr).output, LogicValue::D | LogicValue::DBar))
    }

    /// BFS over consumers: is there a forward path from `from` to a
    /// primary output all of whose intermediate outputs are in
    /// `{X, D, D'}`?
    fn x_path_check(&self, from: u32) -> bool {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(from);
        visited.insert(from);

        while let Some(node) = queue.pop_front() {
            if self.netlist.gate(node).is_primary_output() {
                return true;
            }
            for &consumer in self.netlist.consumers_of(node) {
                if visited.contains(&consumer) {
                    continue;
                }
                if matches!(
                    self.netlist.gate(consumer).output,
                    LogicValue::X | LogicValue::D | LogicValue::DBar
                ) {
                    visited.insert(consumer);
                    queue.push_back(consumer);
                }
            }
        }
        false
    }

    fn generate_d_frontier(&self) -> Vec<u32> {
        self.netlist
            .order()
            .iter()
            .copied()
            .filter(|&addr| {
                let gate = self.netlist.gate(addr);
                gate.output == LogicValue::X
                    && gate
                        .inputs
                        .iter()
                        .any(|&i| matches!(self.netlist.gate(i).output, LogicValue::D | LogicValue::DBar))
                    && self.x_path_check(addr)
            })
            .collect()
    }

    /// Objective selection (§4.6 step 2).
    fn get_objective(&mut self) -> Option<(u32, LogicValue)> {
        if matches!(
            self.netlist.gate(self.fault_gate).output,
            LogicValue::D | LogicValue::DBar
        ) {
            self.activated = true;
        }

        if !self.activated {
            return match self.netlist.gate(self.fault_gate).output {
                LogicValue::Zero | LogicValue::One => None,
                _ => Some((self.fault_gate, opposite(self.fault_value))),
            };
        }

        let frontier = self.generate_d_frontier();
        if frontier.is_empty() {
            return None;
        }
        let g = *frontier
            .iter()
            .min_by_key(|&&addr| self.netlist.gate(addr).co)
            .expect("non-empty frontier");
        let target_value = self.netlist.gate(g).non_controlling_value();
        self.netlist
            .gate(g)
            .inputs
            .iter()
            .copied()
            .find(|&inp| self.netlist.gate(inp).output == LogicValue::X)
            .map(|inp| (inp, target_value))
    }

    /// Backtrace (§4.6 step 3): walk backward from `(addr, value)` to a
    /// primary input, flipping the target value through inversions and
    /// descending through the easiest or hardest still-`X` child.
    fn backtrace(&self, addr: u32, value: LogicValue) -> (u32, LogicValue) {
        let mut addr = addr;
        let mut value = value;

        loop {
            let kind = self.netlist.gate(addr).kind;
            if kind == Kind::Inpt {
                return (addr, value);
            }
            if self.netlist.gate(addr).inverts() {
                value = opposite(value);
            }

            addr = if matches!(kind, Kind::Xor | Kind::Xnor) {
                self.backtrace_parity_child(addr, kind, value)
            } else {
                let forces_controlling = matches!(
                    (kind, value),
                    (Kind::And, LogicValue::One)
                        | (Kind::Or, LogicValue::Zero)
                        | (Kind::Nand, LogicValue::Zero)
                        | (Kind::Nor, LogicValue::One)
                );
                if forces_controlling {
                    self.hardest_child(addr, value)
                } else {
                    self.easiest_child(addr, value)
                }
            };
        }
    }

    fn easiest_child(&self, addr: u32, value: LogicValue) -> u32 {
        self.select_child(addr, value, false)
    }

    fn hardest_child(&self, addr: u32, value: LogicValue) -> u32 {
        self.select_child(addr, value, true)
    }

    fn select_child(&self, addr: u32, value: LogicValue, prefer_hardest: bool) -> u32 {
        let mut best: Option<(u32, u64)> = None;
        for &input in &self.netlist.gate(addr).inputs {
            if self.netlist.gate(input).output != LogicValue::X {
                continue;
            }
            let cc = self.cc_for(input, value);
            let better = match best {
                None => true,
                Some((_, best_cc)) => {
                    if prefer_hardest {
                        cc > best_cc
                    } else {
                        cc < best_cc
                    }
                }
            };
            if better {
                best = Some((input, cc));
            }
        }
        best.map(|(a, _)| a)
            .expect("backtrace reached a gate with no X input")
    }

    fn cc_for(&self, addr: u32, value: LogicValue) -> u64 {
        let gate = self.netlist.gate(addr);
        if value == LogicValue::Zero {
            gate.cc0
        } else {
            gate.cc1
        }
    }

    /// Per §9's "multi-input XOR/XNOR backtrace" design decision: reduce
    /// the parity target to a single derived 0/1 bit for the still-`X`
    /// inputs (accounting for the parity already fixed by non-`X`
    /// inputs), then descend into the single cheapest input for that bit
    /// — exactly the two-input case's "smallest CC1 wins" rule (§8
    /// scenario 6), generalized.
    fn backtrace_parity_child(&self, addr: u32, kind: Kind, value: LogicValue) -> u32 {
        let gate = self.netlist.gate(addr);
        let want_odd_ones = match (kind, value) {
            (Kind::Xor, LogicValue::One) => true,
            (Kind::Xor, LogicValue::Zero) => false,
            (Kind::Xnor, LogicValue::One) => false,
            (Kind::Xnor, LogicValue::Zero) => true,
            _ => unreachable!("only called for xor/xnor with a binary target"),
        };

        let fixed_ones = gate
            .inputs
            .iter()
            .filter(|&&i| {
                matches!(
                    self.netlist.gate(i).output,
                    LogicValue::One | LogicValue::D
                )
            })
            .count();
        let remaining_want_odd = want_odd_ones ^ (fixed_ones % 2 == 1);
        let derived_value = if remaining_want_odd {
            LogicValue::One
        } else {
            LogicValue::Zero
        };

        self.easiest_child(addr, derived_value)
    }

    /// Implication to fixed point (§4.6 step 4): iterate D-algebra
    /// evaluation over the whole netlist in topological order until a
    /// full pass changes nothing.
    fn imply(&mut self) {
        loop {
            let mut changed = false;
            for &addr in &self.netlist.order().to_vec() {
                let gate = self.netlist.gate(addr);
                let kind = gate.kind;
                let old = gate.output;

                let natural = if kind == Kind::Inpt {
                    old
                } else {
                    let inputs = self.netlist.input_values(addr);
                    evaluate_dalgebra(kind, &inputs)
                };
                let gate = self.netlist.gate(addr);
                let new = if gate.faulty {
                    inject_fault(natural, gate.fault_value.unwrap())
                } else {
                    natural
                };

                if new != old {
                    changed = true;
                    self.netlist.gate_mut(addr).output = new;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// The recursive search itself (§4.6 steps 1, 5-7).
    fn recurse(&mut self) -> Result<bool> {
        if self.success() {
            return Ok(true);
        }

        let Some((objective_addr, objective_value)) = self.get_objective() else {
            return Ok(false);
        };

        let (pi, pi_value) = self.backtrace(objective_addr, objective_value);

        self.backtracks += 1;
        if self.backtracks > self.config.max_backtracks {
            return Err(logic_core::LogicError::AtpgBudgetExceeded {
                address: pi,
                budget: self.config.max_backtracks,
            }
            .into());
        }

        trace!(pi, %pi_value, backtracks = self.backtracks, "podem decision");

        self.netlist.gate_mut(pi).output = pi_value;
        self.imply();
        if self.recurse()? {
            return Ok(true);
        }

        let flipped = opposite(pi_value);
        self.netlist.gate_mut(pi).output = flipped;
        self.imply();
        if self.recurse()? {
            return Ok(true);
        }

        self.netlist.gate_mut(pi).output = LogicValue::X;
        self.imply();
        debug!(pi, "podem backtrack exhausted");
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_core::Gate;

    fn and2() -> Netlist {
        let a = Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]);
        let b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
        let mut g = Gate::new(3, "g", Kind::And, 0, 2, vec![]);
        g.inputs = vec![1, 2];
        Netlist::build(vec![a, b, g]).unwrap()
    }

    #[test]
    fn and_stuck_at_zero_detected_by_all_ones() {
        // Scenario 1 (spec §8): 2-input AND, output stuck-at-0, detected
        // by driving both inputs to 1.
        let mut nl = and2();
        logic_scoap::compute(&mut nl);
        let mut engine = PodemEngine::new(&mut nl, AtpgConfig::default());
        let fault = Fault::new(3, LogicValue::Zero);
        let vector = engine.generate_test_vector(fault).unwrap().expect("fault is detectable");
        assert_eq!(
            vector.assignment,
            vec![(1, LogicValue::One), (2, LogicValue::One)]
        );
    }

    #[test]
    fn primary_input_stuck_at_is_detected_directly() {
        let mut nl = and2();
        logic_scoap::compute(&mut nl);
        let mut engine = PodemEngine::new(&mut nl, AtpgConfig::default());
        let fault = Fault::new(1, LogicValue::Zero);
        let vector = engine.generate_test_vector(fault).unwrap().expect("fault is detectable");
        let a_value = vector.assignment.iter().find(|&&(a, _)| a == 1).unwrap().1;
        assert_eq!(a_value, LogicValue::One);
    }

    #[test]
    fn netlist_is_reset_to_x_after_a_run() {
        let mut nl = and2();
        logic_scoap::compute(&mut nl);
        let mut engine = PodemEngine::new(&mut nl, AtpgConfig::default());
        engine.generate_test_vector(Fault::new(3, LogicValue::Zero)).unwrap();
        assert!(!nl.gate(3).faulty);
        assert!(nl.gate(3).fault_value.is_none());
    }

    #[test]
    fn and_stuck_at_one_detected_by_a_zero_input() {
        let mut nl = and2();
        logic_scoap::compute(&mut nl);
        let mut engine = PodemEngine::new(&mut nl, AtpgConfig::default());
        let fault = Fault::new(3, LogicValue::One);
        let vector = engine.generate_test_vector(fault).unwrap().expect("fault is detectable");
        assert!(vector.assignment.iter().any(|&(_, v)| v == LogicValue::Zero));
    }
}

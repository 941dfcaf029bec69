//! Two-pass SCOAP testability analysis (§4.5).
//!
//! `CCk` estimates the minimum number of primary-input assignments needed
//! to justify value `k` on a line; `CO` estimates the difficulty of
//! propagating that line's value to any primary output. The forward pass
//! (controllability) visits gates in topological order; the backward pass
//! (observability) visits them in reverse.

use logic_core::{Kind, Netlist, SCOAP_UNSET};
use tracing::debug;

/// Computes CC0/CC1/CO for every line in `netlist`, writing the results
/// into each [`logic_core::Gate`]'s cost fields in place.
pub fn compute(netlist: &mut Netlist) {
    forward_pass(netlist);
    backward_pass(netlist);
}

fn forward_pass(netlist: &mut Netlist) {
    for &address in &netlist.order().to_vec() {
        let kind = netlist.gate(address).kind;
        if kind == Kind::Inpt {
            let gate = netlist.gate_mut(address);
            gate.cc0 = 1;
            gate.cc1 = 1;
            continue;
        }

        let input_costs: Vec<(u64, u64)> = netlist
            .gate(address)
            .inputs
            .iter()
            .map(|&a| {
                let g = netlist.gate(a);
                (g.cc0, g.cc1)
            })
            .collect();

        let (cc0, cc1) = match kind {
            Kind::And => (
                input_costs.iter().map(|&(c0, _)| c0).min().unwrap() + 1,
                input_costs.iter().map(|&(_, c1)| c1).sum::<u64>() + 1,
            ),
            Kind::Nand => (
                input_costs.iter().map(|&(_, c1)| c1).sum::<u64>() + 1,
                input_costs.iter().map(|&(c0, _)| c0).min().unwrap() + 1,
            ),
            Kind::Or => (
                input_costs.iter().map(|&(c0, _)| c0).sum::<u64>() + 1,
                input_costs.iter().map(|&(_, c1)| c1).min().unwrap() + 1,
            ),
            Kind::Nor => (
                input_costs.iter().map(|&(_, c1)| c1).min().unwrap() + 1,
                input_costs.iter().map(|&(c0, _)| c0).sum::<u64>() + 1,
            ),
            Kind::Xor | Kind::Xnor => {
                let (even, odd) = fold_xor_costs(&input_costs);
                if kind == Kind::Xor {
                    (even + 1, odd + 1)
                } else {
                    (odd + 1, even + 1)
                }
            }
            Kind::Not => (input_costs[0].1 + 1, input_costs[0].0 + 1),
            Kind::Buf | Kind::Fanout => (input_costs[0].0, input_costs[0].1),
            Kind::Inpt => unreachable!("handled above"),
        };

        let gate = netlist.gate_mut(address);
        gate.cc0 = cc0;
        gate.cc1 = cc1;
        debug!(gate = address, cc0, cc1, "scoap forward");
    }
}

/// Folds per-input `(CC0, CC1)` pairs through a chain of 2-input XORs,
/// tracking the cheapest way to reach an even vs. an odd count of 1s
/// among the inputs. Exactly matches the reference 2-input formula when
/// `input_costs.len() == 2`, and generalizes it for wider XOR/XNOR gates.
fn fold_xor_costs(input_costs: &[(u64, u64)]) -> (u64, u64) {
    let mut iter = input_costs.iter();
    let &(first0, first1) = iter.next().expect("xor has at least one input");
    let mut even = first0;
    let mut odd = first1;
    for &(c0, c1) in iter {
        let new_even = (even + c0).min(odd + c1);
        let new_odd = (even + c1).min(odd + c0);
        even = new_even;
        odd = new_odd;
    }
    (even, odd)
}

fn backward_pass(netlist: &mut Netlist) {
    for &address in &netlist.order().to_vec() {
        if netlist.consumers_of(address).is_empty() {
            netlist.gate_mut(address).co = 0;
        }
    }

    for &address in netlist.order().to_vec().iter().rev() {
        let gate_inputs = netlist.gate(address).inputs.clone();
        let kind = netlist.gate(address).kind;
        let gate_co = netlist.gate(address).co;

        if kind == Kind::Inpt || gate_inputs.is_empty() {
            continue;
        }
        if gate_co == SCOAP_UNSET {
            // Unreachable from any primary output (dead logic); leave
            // downstream costs unset rather than propagating a sentinel.
            continue;
        }

        let input_costs: Vec<(u64, u64)> = gate_inputs
            .iter()
            .map(|&a| {
                let g = netlist.gate(a);
                (g.cc0, g.cc1)
            })
            .collect();

        let candidates: Vec<u64> = match kind {
            Kind::Buf | Kind::Fanout => vec![gate_co],
            Kind::Not => vec![gate_co + 1],
            Kind::And | Kind::Nand => gate_inputs
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let other_cc1: u64 = input_costs
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &(_, c1))| c1)
                        .sum();
                    gate_co + other_cc1 + 1
                })
                .collect(),
            Kind::Or | Kind::Nor => gate_inputs
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let other_cc0: u64 = input_costs
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &(c0, _))| c0)
                        .sum();
                    gate_co + other_cc0 + 1
                })
                .collect(),
            Kind::Xor | Kind::Xnor => gate_inputs
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let min_other_cc0 = input_costs
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &(c0, _))| c0)
                        .min()
                        .unwrap_or(0);
                    let min_other_cc1 = input_costs
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &(_, c1))| c1)
                        .min()
                        .unwrap_or(0);
                    gate_co + min_other_cc0 + min_other_cc1 + 1
                })
                .collect(),
            Kind::Inpt => unreachable!("handled above"),
        };

        for (&input_addr, &candidate) in gate_inputs.iter().zip(candidates.iter()) {
            let input_gate = netlist.gate_mut(input_addr);
            // Reconvergent fan-in lines are always refined to the
            // strict minimum across every consumer, never overwritten.
            input_gate.co = input_gate.co.min(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_core::Gate;

    fn two_input_or() -> Netlist {
        let a = Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]);
        let b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
        let mut g = Gate::new(3, "g", Kind::Or, 0, 2, vec![]);
        g.inputs = vec![1, 2];
        Netlist::build(vec![a, b, g]).unwrap()
    }

    #[test]
    fn primary_inputs_have_unit_controllability() {
        let mut nl = two_input_or();
        compute(&mut nl);
        assert_eq!(nl.gate(1).cc0, 1);
        assert_eq!(nl.gate(1).cc1, 1);
    }

    #[test]
    fn two_input_or_scenario() {
        // Scenario 4 (spec §8): inputs (1,1) controllability, OR yields
        // CC0=3, CC1=2; as a primary output each input's CO = 2.
        let mut nl = two_input_or();
        compute(&mut nl);
        assert_eq!(nl.gate(3).cc0, 3);
        assert_eq!(nl.gate(3).cc1, 2);
        assert_eq!(nl.gate(3).co, 0);
        assert_eq!(nl.gate(1).co, 2);
        assert_eq!(nl.gate(2).co, 2);
    }

    #[test]
    fn reconvergent_fanout_takes_minimum_co() {
        // a feeds both a 2-input AND (with b) and a 2-input OR (with c);
        // both gate outputs are primary outputs, so a's CO is the
        // minimum of the two paths, not either one alone.
        let a = Gate::new(1, "a", Kind::Inpt, 2, 0, vec![]);
        let b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
        let c = Gate::new(3, "c", Kind::Inpt, 1, 0, vec![]);
        let mut and1 = Gate::new(4, "and1", Kind::And, 0, 2, vec![]);
        and1.inputs = vec![1, 2];
        let mut or1 = Gate::new(5, "or1", Kind::Or, 0, 2, vec![]);
        or1.inputs = vec![1, 3];
        let mut nl = Netlist::build(vec![a, b, c, and1, or1]).unwrap();
        compute(&mut nl);

        let via_and = 0 + nl.gate(2).cc1 + 1;
        let via_or = 0 + nl.gate(3).cc0 + 1;
        assert_eq!(nl.gate(1).co, via_and.min(via_or));
    }

    #[test]
    fn every_gate_has_sane_costs() {
        let mut nl = two_input_or();
        compute(&mut nl);
        for &addr in nl.order() {
            let g = nl.gate(addr);
            assert!(g.cc0 >= 1);
            assert!(g.cc1 >= 1);
            assert_ne!(g.co, SCOAP_UNSET);
        }
    }
}

//! Zero-delay evaluator (§4.3).
//!
//! A single pass in address order, which the parser guarantees is a valid
//! topological order (§4.1), invoking each gate's binary-mode evaluator
//! exactly once.

use logic_core::{evaluate_binary, Kind, LogicValue, Netlist};
use tracing::debug;

/// Applies a primary-input assignment and evaluates every gate once, in
/// topological order.
///
/// `assignment` maps primary-input address to the value that gate's
/// output is set to before the pass begins. Addresses not present in
/// `assignment` keep their current output.
pub fn evaluate(netlist: &mut Netlist, assignment: &[(u32, LogicValue)]) {
    for &(address, value) in assignment {
        netlist.gate_mut(address).output = value;
    }

    for &address in &netlist.order().to_vec() {
        if netlist.gate(address).kind == Kind::Inpt {
            continue;
        }
        let inputs = netlist.input_values(address);
        let output = evaluate_binary(netlist.gate(address).kind, &inputs);
        debug!(gate = address, %output, "zero-delay evaluate");
        netlist.gate_mut(address).output = output;
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
    fn both_inputs_one_yields_one() {
        let mut nl = and2();
        evaluate(&mut nl, &[(1, LogicValue::One), (2, LogicValue::One)]);
        assert_eq!(nl.gate(3).output, LogicValue::One);
    }

    #[test]
    fn one_zero_input_yields_zero() {
        let mut nl = and2();
        evaluate(&mut nl, &[(1, LogicValue::One), (2, LogicValue::Zero)]);
        assert_eq!(nl.gate(3).output, LogicValue::Zero);
    }

    #[test]
    fn fresh_netlist_after_one_pass_has_no_u_left_on_c17_like_circuit() {
        // Scenario 2 (spec §8): all PIs = 1 on a small reconvergent
        // circuit leaves no U anywhere after one evaluator pass.
        let a = Gate::new(1, "a", Kind::Inpt, 2, 0, vec![]);
        let b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
        let mut and1 = Gate::new(3, "and1", Kind::And, 1, 2, vec![]);
        and1.inputs = vec![1, 2];
        let mut or1 = Gate::new(4, "or1", Kind::Or, 0, 2, vec![]);
        or1.inputs = vec![1, 3];
        let mut nl = Netlist::build(vec![a, b, and1, or1]).unwrap();
        evaluate(&mut nl, &[(1, LogicValue::One), (2, LogicValue::One)]);
        for &addr in nl.order() {
            assert_ne!(nl.gate(addr).output, LogicValue::U);
        }
    }
}

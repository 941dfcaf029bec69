//! Fault list parser for PODEM (§6).
//!
//! Each line: `<net_name> sa0|sa1`. Net names are resolved to addresses
//! against an already-built [`Netlist`] via
//! [`Netlist::address_of_name`](logic_core::Netlist::address_of_name).
//! Resolved faults are returned as bare `(address, stuck_at)` pairs
//! rather than `logic_atpg::Fault` so this crate does not need to depend
//! on the ATPG engine; the CLI driver wraps each pair into a `Fault`.

use logic_core::{LogicError, LogicValue, Netlist, Result};

/// Parses a fault list against `netlist`, resolving each net name to its
/// address. A name with no matching gate is a parse error naming the
/// offending line.
pub fn parse(source: &str, netlist: &Netlist) -> Result<Vec<(u32, LogicValue)>> {
    let mut faults = Vec::new();
    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| LogicError::parse(line_no, "missing net name"))?;
        let stuck_at = tokens
            .next()
            .ok_or_else(|| LogicError::parse(line_no, "missing stuck-at designator"))?;
        if tokens.next().is_some() {
            return Err(LogicError::parse(line_no, format!("unexpected trailing tokens after '{stuck_at}'")));
        }

        let stuck_at = match stuck_at {
            "sa0" => LogicValue::Zero,
            "sa1" => LogicValue::One,
            other => {
                return Err(LogicError::parse(
                    line_no,
                    format!("expected 'sa0' or 'sa1', found '{other}'"),
                ))
            }
        };
        let address = netlist
            .address_of_name(name)
            .ok_or_else(|| LogicError::parse(line_no, format!("no gate named '{name}'")))?;

        faults.push((address, stuck_at));
    }
    Ok(faults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_core::{Gate, Kind};

    fn and2() -> Netlist {
        let mut a = Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]);
        a.output = LogicValue::U;
        let b = Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]);
        let mut g = Gate::new(3, "g", Kind::And, 0, 2, vec![]);
        g.inputs = vec![1, 2];
        Netlist::build(vec![a, b, g]).unwrap()
    }

    #[test]
    fn resolves_names_to_addresses() {
        let nl = and2();
        let faults = parse("a sa0\ng sa1\n", &nl).unwrap();
        assert_eq!(faults, vec![(1, LogicValue::Zero), (3, LogicValue::One)]);
    }

    #[test]
    fn unknown_net_name_is_a_parse_error() {
        let nl = and2();
        let err = parse("nope sa0\n", &nl).unwrap_err();
        assert!(matches!(err, LogicError::Parse { .. }));
    }

    #[test]
    fn unknown_stuck_at_designator_is_a_parse_error() {
        let nl = and2();
        let err = parse("a sa2\n", &nl).unwrap_err();
        assert!(matches!(err, LogicError::Parse { .. }));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let nl = and2();
        let faults = parse("* a comment\n\na sa0\n", &nl).unwrap();
        assert_eq!(faults, vec![(1, LogicValue::Zero)]);
    }
}

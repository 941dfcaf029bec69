//! ISCAS-85 netlist parser (§6).
//!
//! The format is line-oriented, not free-form, so unlike a typical `nom`
//! grammar this parser runs one combinator per physical line rather than
//! folding the whole file through a single recursive grammar. Each line
//! is classified in turn: comment/blank, gate declaration, fan-out
//! branch, or (falling through) an input-list line continuing the most
//! recently declared gate.

use logic_core::{Gate, Kind, LogicError, Netlist, Result};
use nom::{
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{digit1, multispace0, multispace1},
    combinator::{map_res, opt},
    multi::separated_list0,
    sequence::{preceded, tuple},
    IResult,
};
use std::collections::HashMap;
use tracing::debug;

fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn uint(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse)(input)
}

fn usize_count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn fault_tokens(input: &str) -> IResult<&str, Vec<String>> {
    let (rest, tokens) = separated_list0(multispace1, token)(input)?;
    Ok((rest, tokens.into_iter().map(str::to_owned).collect()))
}

struct GateLine {
    address: u32,
    name: String,
    kind: String,
    fanout: usize,
    fanin: usize,
    faults: Vec<String>,
}

/// `<addr> <name> <kind> <fanout> <fanin> <faults...>`
fn gate_line(input: &str) -> IResult<&str, GateLine> {
    let (rest, (_, address, _, name, _, kind, _, fanout, _, fanin, faults)) = tuple((
        multispace0,
        uint,
        multispace1,
        token,
        multispace1,
        token,
        multispace1,
        usize_count,
        multispace1,
        usize_count,
        opt(preceded(multispace1, fault_tokens)),
    ))(input)?;
    Ok((
        rest,
        GateLine {
            address,
            name: name.to_owned(),
            kind: kind.to_owned(),
            fanout,
            fanin,
            faults: faults.unwrap_or_default(),
        },
    ))
}

struct FanoutLine {
    address: u32,
    source_address: u32,
    faults: Vec<String>,
}

/// `<addr> <name> from <stem_addr>... <faults...>`
///
/// The stem address is occasionally followed directly by non-whitespace
/// junk characters in source files (no separating space); `take_while`
/// (zero-or-more) swallows that without requiring it to be present.
fn fanout_line(input: &str) -> IResult<&str, FanoutLine> {
    let (rest, (_, address, _, _name, _, _, _, source_address, _junk, faults)) = tuple((
        multispace0,
        uint,
        multispace1,
        token,
        multispace1,
        tag("from"),
        multispace1,
        uint,
        take_while(|c: char| !c.is_whitespace()),
        opt(preceded(multispace1, fault_tokens)),
    ))(input)?;
    Ok((
        rest,
        FanoutLine {
            address,
            source_address,
            faults: faults.unwrap_or_default(),
        },
    ))
}

fn input_list_line(input: &str) -> IResult<&str, Vec<u32>> {
    let (rest, (_, values)) = tuple((multispace0, separated_list0(multispace1, uint)))(input)?;
    Ok((rest, values))
}

/// Parses an ISCAS-85 netlist (§6).
///
/// Gate lines, fan-out branch lines, and the input-list line that
/// follows each non-`inpt` gate are each recognized by a dedicated `nom`
/// parser; the choice of which parser to try is driven by the small
/// per-line state machine below rather than a single top-level grammar,
/// since the ISCAS format has no lookahead-free way to tell a gate line
/// from a fan-out line without first trying both.
pub fn parse(source: &str) -> Result<Netlist> {
    let mut gates: Vec<Gate> = Vec::new();
    let mut index_of: HashMap<u32, usize> = HashMap::new();
    let mut branch_counter: HashMap<u32, usize> = HashMap::new();
    let mut pending: Option<u32> = None;

    for (line_no, raw_line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        if let Ok((_, fanout)) = fanout_line(raw_line) {
            let stem_idx = *index_of
                .get(&fanout.source_address)
                .ok_or_else(|| LogicError::parse(line_no, format!("fan-out branch from unresolved stem {}", fanout.source_address)))?;
            let stem_name = gates[stem_idx].name.clone();
            let count = branch_counter.entry(fanout.source_address).or_insert(0);
            *count += 1;
            let branch_name = format!("{stem_name}_{count}");

            let mut gate = Gate::new(fanout.address, branch_name, Kind::Fanout, 1, 1, fanout.faults);
            gate.inputs = vec![fanout.source_address];
            index_of.insert(fanout.address, gates.len());
            gates.push(gate);
            continue;
        }

        if let Ok((_, decl)) = gate_line(raw_line) {
            let kind = Kind::from_str_opt(&decl.kind)
                .ok_or_else(|| LogicError::parse(line_no, format!("unknown gate kind '{}'", decl.kind)))?;
            let gate = Gate::new(decl.address, decl.name, kind, decl.fanout, decl.fanin, decl.faults);
            index_of.insert(decl.address, gates.len());
            gates.push(gate);
            pending = Some(decl.address);
            continue;
        }

        let Some(addr) = pending else {
            return Err(LogicError::parse(line_no, format!("unrecognized line: '{trimmed}'")));
        };
        let (_, values) = input_list_line(raw_line)
            .map_err(|e| LogicError::parse(line_no, format!("malformed input list: {e}")))?;
        let idx = index_of[&addr];
        let fanin = gates[idx].fanin;
        let (inputs, delay) = if values.len() == fanin + 1 {
            let mut values = values;
            let delay = values.pop().expect("checked non-empty above") as u64;
            (values, delay)
        } else {
            (values, 0)
        };
        gates[idx].inputs = inputs;
        gates[idx].delay = delay;
        pending = None;
    }

    debug!(gate_count = gates.len(), "parsed ISCAS-85 netlist");
    Netlist::build(gates)
}

/// Pretty-prints `netlist` back into ISCAS-85 source (§8 "Round-trips":
/// parse → pretty-print → parse must yield the same netlist modulo
/// whitespace). Fan-out branch nodes are emitted as `from` lines; every
/// other non-`inpt` gate gets its declaration line followed by an
/// input-list line, with the delay appended only when non-zero (the
/// parser treats an absent trailing integer as zero delay, so omitting
/// it round-trips cleanly).
pub fn write(netlist: &Netlist) -> String {
    let mut out = String::new();
    for &address in netlist.order() {
        let gate = netlist.gate(address);
        let faults = gate.faults.join(" ");
        if gate.kind == Kind::Fanout {
            let stem = gate.inputs[0];
            out.push_str(&format!("{} {} from {}", gate.address, gate.name, stem));
            if !faults.is_empty() {
                out.push(' ');
                out.push_str(&faults);
            }
            out.push('\n');
            continue;
        }

        out.push_str(&format!(
            "{} {} {} {} {}",
            gate.address, gate.name, gate.kind, gate.fanout, gate.fanin
        ));
        if !faults.is_empty() {
            out.push(' ');
            out.push_str(&faults);
        }
        out.push('\n');

        if gate.kind != Kind::Inpt {
            let inputs: Vec<String> = gate.inputs.iter().map(u32::to_string).collect();
            out.push_str(&inputs.join(" "));
            if gate.delay != 0 {
                out.push(' ');
                out.push_str(&gate.delay.to_string());
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_core::LogicValue;

    const C17: &str = "\
* c17 ISCAS-85 benchmark, hand-trimmed
1 inpt_1 inpt 1 0
2 inpt_2 inpt 2 0
3 inpt_3 inpt 1 0
10 g10 nand 2 2
1 2
11 g11 nand 1 2
2 3
16 g11_1 from 11
22 g22 nand 0 2
10 16
23 g23 nand 0 2
16 11
";

    #[test]
    fn parses_gates_fanout_and_inputs() {
        let nl = parse(C17).unwrap();
        assert_eq!(nl.primary_inputs(), &[1, 2, 3]);
        assert_eq!(nl.primary_outputs(), &[22, 23]);
        assert_eq!(nl.gate(10).inputs, vec![1, 2]);
        assert_eq!(nl.gate(16).kind, Kind::Fanout);
        assert_eq!(nl.gate(16).name, "g11_1");
        assert_eq!(nl.gate(16).inputs, vec![11]);
    }

    #[test]
    fn trailing_integer_on_input_line_is_a_delay() {
        let source = "\
1 a inpt 1 0
2 b inpt 1 0
3 g and 0 2
1 2 5
";
        let nl = parse(source).unwrap();
        assert_eq!(nl.gate(3).inputs, vec![1, 2]);
        assert_eq!(nl.gate(3).delay, 5);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let source = "\
* a leading comment

1 a inpt 1 0
2 b inpt 1 0
3 g and 0 2
1 2
";
        let nl = parse(source).unwrap();
        assert_eq!(nl.len(), 3);
        assert_eq!(nl.gate(1).output, LogicValue::U);
    }

    #[test]
    fn unresolved_fanout_stem_is_a_parse_error() {
        let source = "\
1 a inpt 1 0
5 a_1 from 99
";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, LogicError::Parse { .. }));
    }

    #[test]
    fn unknown_gate_kind_is_a_parse_error() {
        let source = "1 a bogus 1 0\n";
        let err = parse(source).unwrap_err();
        assert!(matches!(err, LogicError::Parse { .. }));
    }

    #[test]
    fn parse_pretty_print_parse_round_trip() {
        let nl = parse(C17).unwrap();
        let printed = write(&nl);
        let nl2 = parse(&printed).unwrap();

        assert_eq!(nl.primary_inputs(), nl2.primary_inputs());
        assert_eq!(nl.primary_outputs(), nl2.primary_outputs());
        for &addr in nl.order() {
            let (g1, g2) = (nl.gate(addr), nl2.gate(addr));
            assert_eq!(g1.kind, g2.kind);
            assert_eq!(g1.inputs, g2.inputs);
            assert_eq!(g1.name, g2.name);
            assert_eq!(g1.delay, g2.delay);
        }
    }

    #[test]
    fn round_trip_preserves_delay() {
        let source = "\
1 a inpt 1 0
2 b inpt 1 0
3 g and 0 2
1 2 5
";
        let nl = parse(source).unwrap();
        let nl2 = parse(&write(&nl)).unwrap();
        assert_eq!(nl2.gate(3).delay, 5);
        assert_eq!(nl2.gate(3).inputs, vec![1, 2]);
    }
}

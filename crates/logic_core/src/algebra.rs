//! The logic value domain and per-gate-kind evaluation rules.
//!
//! Two evaluation modes share the same [`LogicValue`] domain:
//! - "binary" mode (used by the zero-delay evaluator and the timing
//!   simulator) never produces `D`/`D'` and treats `X` as a synonym for `U`.
//! - "D-algebra" mode (used by PODEM) distinguishes `U` (propagation
//!   failure) from `X` (don't-care, pre-assignment) and can produce the
//!   discrepancy values `D`/`D'`.
//!
//! Both modes are exposed as free functions over a gate [`Kind`] and a
//! slice of input values, independent of any [`crate::Gate`], so the
//! per-kind truth tables can be exercised directly in unit tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gate kinds recognized by the netlist format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Inpt,
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    Not,
    Buf,
    Fanout,
}

impl Kind {
    /// Parses a gate kind from its lowercase ISCAS-85 keyword.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        Some(match s {
            "inpt" => Kind::Inpt,
            "and" => Kind::And,
            "or" => Kind::Or,
            "nand" => Kind::Nand,
            "nor" => Kind::Nor,
            "xor" => Kind::Xor,
            "xnor" => Kind::Xnor,
            "not" => Kind::Not,
            "buf" => Kind::Buf,
            "fanout" => Kind::Fanout,
            _ => return None,
        })
    }

    /// True if this gate kind inverts its "natural" controlling result
    /// (nand, nor, xnor, not).
    pub fn inverts(self) -> bool {
        matches!(self, Kind::Nand | Kind::Nor | Kind::Xnor | Kind::Not)
    }

    /// The non-controlling value used by PODEM's objective selection
    /// (§4.6): the value a D-frontier gate's unassigned input must be
    /// driven to in order to let the frontier gate's other, already-D/D'
    /// inputs propagate through. XOR/XNOR/NOT have no single electrically
    /// non-controlling value, but the reference still assigns them a
    /// conventional placeholder that `get_objective` depends on, so the
    /// same placeholders are kept here.
    pub fn non_controlling_value(self) -> LogicValue {
        match self {
            Kind::And | Kind::Nand | Kind::Not | Kind::Buf | Kind::Fanout => LogicValue::One,
            Kind::Or | Kind::Nor | Kind::Xor | Kind::Xnor => LogicValue::Zero,
            Kind::Inpt => LogicValue::X,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Inpt => "inpt",
            Kind::And => "and",
            Kind::Or => "or",
            Kind::Nand => "nand",
            Kind::Nor => "nor",
            Kind::Xor => "xor",
            Kind::Xnor => "xnor",
            Kind::Not => "not",
            Kind::Buf => "buf",
            Kind::Fanout => "fanout",
        };
        write!(f, "{s}")
    }
}

/// A value in the 7-symbol logic domain used by both evaluation modes.
///
/// `U` (undefined) and `Z` (high-impedance) are the binary-mode sentinels;
/// `X` (don't care) and `D`/`D'` (discrepancy) are the D-algebra-mode
/// sentinels. Binary-mode evaluators never produce `X`, `D`, or `D'`;
/// D-algebra-mode evaluators never produce `Z` (a `Z` in a D-algebra
/// evaluation is an input-modeling error upstream, not a gate result).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicValue {
    Zero,
    One,
    /// Undefined (pre-simulation sentinel).
    U,
    /// High-impedance.
    Z,
    /// Don't-care / unassigned (D-algebra sentinel).
    X,
    /// Discrepancy: fault-free = 1, faulty = 0.
    D,
    /// Discrepancy: fault-free = 0, faulty = 1.
    DBar,
}

impl LogicValue {
    /// The literal character used in netlists, stimulus files, and reports.
    pub fn as_char(self) -> char {
        match self {
            LogicValue::Zero => '0',
            LogicValue::One => '1',
            LogicValue::U => 'U',
            LogicValue::Z => 'Z',
            LogicValue::X => 'X',
            LogicValue::D => 'D',
            LogicValue::DBar => 'd', // paired with 'D' below in from_char via "D'"
        }
    }

    /// Parses a single stimulus-file value character (`0`, `1`, `U`, `Z`).
    pub fn from_stimulus_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(LogicValue::Zero),
            '1' => Some(LogicValue::One),
            'U' | 'u' => Some(LogicValue::U),
            'Z' | 'z' => Some(LogicValue::Z),
            _ => None,
        }
    }

    fn is_controlling(self, controlling: LogicValue) -> bool {
        self == controlling
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicValue::D => write!(f, "D"),
            LogicValue::DBar => write!(f, "D'"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

/// Evaluates `kind` in binary/unknown mode (§4.2, rules used by the
/// zero-delay evaluator and the event-driven timing simulator).
///
/// `U` and `Z` both act as "unknown" sentinels here; the result is never
/// `X`, `D`, or `D'`.
pub fn evaluate_binary(kind: Kind, inputs: &[LogicValue]) -> LogicValue {
    use LogicValue::*;

    match kind {
        Kind::Inpt => U, // never called; inpt output is set externally
        Kind::Buf | Kind::Fanout => inputs[0],
        Kind::Not => match inputs[0] {
            Zero => One,
            One => Zero,
            _ => U,
        },
        Kind::And | Kind::Nand => {
            let cv = Zero;
            let has_cv = inputs.iter().any(|&v| v.is_controlling(cv));
            let has_unknown = inputs.iter().any(|&v| matches!(v, U | Z));
            let has_z = inputs.iter().any(|&v| v == Z);
            let out = if has_cv {
                Zero
            } else if kind == Kind::Nand && has_z && !has_cv {
                // Reference quirk (§4.2, §9 open question): nand reports Z
                // when Z is present with no controlling 0, rather than U.
                return Z;
            } else if has_unknown {
                U
            } else {
                One
            };
            if kind == Kind::Nand {
                invert_binary(out)
            } else {
                out
            }
        }
        Kind::Or | Kind::Nor => {
            let cv = One;
            let has_cv = inputs.iter().any(|&v| v.is_controlling(cv));
            let has_unknown = inputs.iter().any(|&v| matches!(v, U | Z));
            let out = if has_cv {
                One
            } else if has_unknown {
                U
            } else {
                Zero
            };
            if kind == Kind::Nor {
                invert_binary(out)
            } else {
                out
            }
        }
        Kind::Xor | Kind::Xnor => {
            let has_unknown = inputs.iter().any(|&v| matches!(v, U | Z));
            if has_unknown {
                return U;
            }
            let ones = inputs.iter().filter(|&&v| v == One).count();
            let parity = if ones % 2 == 1 { One } else { Zero };
            if kind == Kind::Xnor {
                invert_binary(parity)
            } else {
                parity
            }
        }
    }
}

fn invert_binary(v: LogicValue) -> LogicValue {
    match v {
        LogicValue::Zero => LogicValue::One,
        LogicValue::One => LogicValue::Zero,
        other => other,
    }
}

/// Evaluates `kind` in D-algebra mode (§4.2, rules used by PODEM).
///
/// `U` or `Z` on any input is a strict propagation failure and always
/// yields `U`. Otherwise `X` (don't-care) and the discrepancy values
/// `D`/`D'` propagate per the standard D-algebra rules.
pub fn evaluate_dalgebra(kind: Kind, inputs: &[LogicValue]) -> LogicValue {
    use LogicValue::*;

    if inputs.iter().any(|&v| matches!(v, U | Z)) {
        return U;
    }

    match kind {
        Kind::Inpt => X,
        Kind::Buf | Kind::Fanout => inputs[0],
        Kind::Not => match inputs[0] {
            Zero => One,
            One => Zero,
            D => DBar,
            DBar => D,
            _ => X,
        },
        Kind::And | Kind::Nand => {
            let out = and_like_dalgebra(inputs, Zero, One);
            if kind == Kind::Nand {
                invert_dalgebra(out)
            } else {
                out
            }
        }
        Kind::Or | Kind::Nor => {
            let out = and_like_dalgebra(inputs, One, Zero);
            if kind == Kind::Nor {
                invert_dalgebra(out)
            } else {
                out
            }
        }
        Kind::Xor | Kind::Xnor => {
            let out = xor_dalgebra(inputs);
            if kind == Kind::Xnor {
                invert_dalgebra(out)
            } else {
                out
            }
        }
    }
}

/// Shared AND/OR D-algebra rule. `controlling` is the value that alone
/// determines the output (0 for AND, 1 for OR); `non_controlling` is its
/// complement.
fn and_like_dalgebra(
    inputs: &[LogicValue],
    controlling: LogicValue,
    non_controlling: LogicValue,
) -> LogicValue {
    use LogicValue::*;

    if inputs.iter().any(|&v| v == controlling) {
        return controlling;
    }
    if inputs.iter().any(|&v| v == X) {
        return X;
    }

    let has_d = inputs.iter().any(|&v| v == D);
    let has_dbar = inputs.iter().any(|&v| v == DBar);

    match (has_d, has_dbar) {
        // Mixing D and D' resolves the gate to its controlling constant
        // (0 for AND, 1 for OR); nand/nor invert it afterwards.
        (true, true) => controlling,
        (true, false) => D,
        (false, true) => DBar,
        (false, false) => non_controlling, // all inputs equal non_controlling
    }
}

fn xor_dalgebra(inputs: &[LogicValue]) -> LogicValue {
    use LogicValue::*;

    if inputs.iter().any(|&v| v == X) {
        return X;
    }

    let d_count = inputs.iter().filter(|&&v| v == D).count();
    let dbar_count = inputs.iter().filter(|&&v| v == DBar).count();
    let one_count = inputs.iter().filter(|&&v| v == One).count();
    let one_parity_odd = one_count % 2 == 1;

    match (d_count % 2, dbar_count % 2) {
        (0, 0) => {
            if one_parity_odd {
                One
            } else {
                Zero
            }
        }
        (1, 0) => {
            if one_parity_odd {
                DBar
            } else {
                D
            }
        }
        (1, 1) => {
            if one_parity_odd {
                Zero
            } else {
                One
            }
        }
        (0, 1) => {
            if one_parity_odd {
                D
            } else {
                DBar
            }
        }
        _ => unreachable!(),
    }
}

fn invert_dalgebra(v: LogicValue) -> LogicValue {
    match v {
        LogicValue::Zero => LogicValue::One,
        LogicValue::One => LogicValue::Zero,
        LogicValue::D => LogicValue::DBar,
        LogicValue::DBar => LogicValue::D,
        other => other,
    }
}

/// Applies §4.2's fault-injection overlay: if the gate is flagged faulty
/// with `fault_value`, and the computed output equals the logical
/// complement of that value, overwrite it with the corresponding
/// discrepancy value.
pub fn inject_fault(computed: LogicValue, fault_value: LogicValue) -> LogicValue {
    use LogicValue::*;
    match (fault_value, computed) {
        (Zero, One) => D,
        (One, Zero) => DBar,
        _ => computed,
    }
}

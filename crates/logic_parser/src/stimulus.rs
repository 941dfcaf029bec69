//! Stimulus file parser for the event-driven timing simulator (§6).
//!
//! First line: whitespace-separated primary-input addresses ending with
//! the literal `time`. Each subsequent non-blank line: one value token
//! per input followed by an integer time step; time steps must be
//! non-decreasing.

use logic_core::{LogicError, LogicValue, Result};

/// One time step of the stimulus: values for a subset (or all) of the
/// primary inputs named in the header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimulusStep {
    pub time: u64,
    pub values: Vec<(u32, LogicValue)>,
}

/// Parses a stimulus file into its header-declared input order and the
/// sequence of timed steps (§6). Steps are returned in file order; the
/// caller (the event simulator) is responsible for the non-decreasing
/// check it performs as it consumes them.
pub fn parse(source: &str) -> Result<(Vec<u32>, Vec<StimulusStep>)> {
    let mut lines = source.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| LogicError::stimulus(1, "empty stimulus file"))?;
    let header_no = header_no + 1;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    if tokens.last() != Some(&"time") {
        return Err(LogicError::stimulus(
            header_no,
            "header must end with the literal 'time'",
        ));
    }
    let addresses: Vec<u32> = tokens[..tokens.len() - 1]
        .iter()
        .map(|t| {
            t.parse()
                .map_err(|_| LogicError::stimulus(header_no, format!("bad input address '{t}'")))
        })
        .collect::<Result<_>>()?;
    if addresses.is_empty() {
        return Err(LogicError::stimulus(header_no, "header names no primary inputs"));
    }

    let mut steps = Vec::new();
    let mut last_time: Option<u64> = None;
    for (line_no, line) in lines {
        let line_no = line_no + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != addresses.len() + 1 {
            return Err(LogicError::stimulus(
                line_no,
                format!(
                    "expected {} value(s) and a time step, found {} token(s)",
                    addresses.len(),
                    tokens.len()
                ),
            ));
        }

        let time: u64 = tokens[addresses.len()]
            .parse()
            .map_err(|_| LogicError::stimulus(line_no, format!("bad time step '{}'", tokens[addresses.len()])))?;
        if let Some(prev) = last_time {
            if time < prev {
                return Err(LogicError::stimulus(
                    line_no,
                    format!("time step {time} is out of order (previous was {prev})"),
                ));
            }
        }
        last_time = Some(time);

        let values = addresses
            .iter()
            .zip(tokens.iter())
            .map(|(&addr, token)| {
                let mut chars = token.chars();
                let value = chars
                    .next()
                    .and_then(LogicValue::from_stimulus_char)
                    .filter(|_| chars.next().is_none())
                    .ok_or_else(|| LogicError::stimulus(line_no, format!("bad value character '{token}'")))?;
                Ok((addr, value))
            })
            .collect::<Result<Vec<_>>>()?;

        steps.push(StimulusStep { time, values });
    }

    Ok((addresses, steps))
}

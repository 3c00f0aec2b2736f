//! Applying a pulse-sequence file to a circuit
//!
//! Lines are applied in order. A malformed or rejected line is recorded and
//! skipped; it never affects the lines around it.

use std::fmt;
use std::io::BufRead;

use crate::circuit::LaserCircuit;
use crate::components::{EmitterSymbol, Pulse};
use crate::core::error::{ParseError, PulseError, Result};
use crate::input::parser::parse_pulse_sequence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PulseOutcome {
    Applied(EmitterSymbol),
    Malformed(ParseError),
    Rejected(PulseError),
}

impl PulseOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PulseOutcome::Applied(_))
    }

    /// Message for lines that were skipped
    pub fn error_message(&self) -> Option<String> {
        match self {
            PulseOutcome::Applied(_) => None,
            PulseOutcome::Malformed(e) => Some(e.to_string()),
            PulseOutcome::Rejected(e) => Some(e.to_string()),
        }
    }
}

/// One processed line of the pulse sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseLine {
    /// 1-based
    pub number: usize,
    pub text: String,
    /// Emitters still unconfigured before this line was applied
    pub pending: Vec<EmitterSymbol>,
    pub outcome: PulseOutcome,
}

impl fmt::Display for PulseLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: Vec<String> = self.pending.iter().map(|s| s.to_string()).collect();
        writeln!(f, "-- ({})", pending.join(", "))?;
        write!(f, "Line {}: {}", self.number, self.text)?;
        if let Some(message) = self.outcome.error_message() {
            write!(f, "\nError: {}", message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseReport {
    pub lines: Vec<PulseLine>,
}

impl PulseReport {
    pub fn applied(&self) -> usize {
        self.lines.iter().filter(|l| l.outcome.is_applied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.lines.len() - self.applied()
    }
}

/// Apply a single directive line to `circuit`
pub fn apply_pulse_line(circuit: &mut LaserCircuit, line: &str) -> PulseOutcome {
    let directive = match parse_pulse_sequence(line) {
        Ok(directive) => directive,
        Err(e) => return PulseOutcome::Malformed(e),
    };
    let pulse = match Pulse::new(directive.frequency, directive.direction) {
        Ok(pulse) => pulse,
        Err(e) => return PulseOutcome::Rejected(e),
    };
    match circuit.set_pulse(directive.symbol, pulse) {
        Ok(()) => PulseOutcome::Applied(directive.symbol),
        Err(e) => PulseOutcome::Rejected(e),
    }
}

/// Apply every line of `reader` to `circuit`, in order.
///
/// Only I/O failures abort; bad lines are reported in the returned
/// [`PulseReport`].
pub fn apply_pulse_sequence(circuit: &mut LaserCircuit, reader: impl BufRead) -> Result<PulseReport> {
    let mut report = PulseReport::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let pending: Vec<EmitterSymbol> = circuit.pending_emitters().collect();
        let outcome = apply_pulse_line(circuit, &line);

        if let Some(message) = outcome.error_message() {
            tracing::debug!("Pulse line {} skipped: {}", i + 1, message);
        }
        report.lines.push(PulseLine {
            number: i + 1,
            text: line.trim().to_string(),
            pending,
            outcome,
        });
    }

    tracing::info!(
        "Pulse sequence applied: {} line(s) accepted, {} skipped",
        report.applied(),
        report.skipped()
    );
    Ok(report)
}

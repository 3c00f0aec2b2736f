//! Read-only reports over a circuit
//!
//! Reports are plain values. Formatting is via `Display` (one line per entry,
//! each newline-terminated) and they serialize to JSON for machine output.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use std::path::Path;

use crate::components::{emitter, Emitter, EmitterSymbol, Pulse, Receiver, ReceiverSymbol};
use crate::core::error::Result;
use crate::core::types::Tick;

pub const EMISSION_FILE: &str = "emit_photons.out";
pub const ACTIVATION_FILE: &str = "activation_times.out";
pub const ENERGY_FILE: &str = "total_energy.out";

/// One line per emitter, in symbol order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionReport {
    pub entries: Vec<EmissionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionEntry {
    pub emitter: EmitterSymbol,
    pub pulse: Option<Pulse>,
}

impl EmissionReport {
    pub fn from_emitters(emitters: &[Emitter]) -> Self {
        let entries = emitters
            .iter()
            .map(|e| EmissionEntry { emitter: e.symbol(), pulse: e.pulse() })
            .collect();
        Self { entries }
    }
}

impl fmt::Display for EmissionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        emitter::describe(f, self.emitter, self.pulse)
    }
}

/// Activated receivers, earliest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationReport {
    pub entries: Vec<ActivationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivationEntry {
    pub receiver: ReceiverSymbol,
    pub time: Tick,
}

impl ActivationReport {
    /// `receivers` must be in symbol order; ties keep that order.
    pub fn from_receivers(receivers: &[Receiver]) -> Self {
        let mut entries: Vec<ActivationEntry> = receivers
            .iter()
            .filter_map(|r| {
                r.activation_time()
                    .map(|time| ActivationEntry { receiver: r.symbol(), time })
            })
            .collect();
        entries.sort_by_key(|e| e.time);
        Self { entries }
    }
}

impl fmt::Display for ActivationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}ns", self.receiver, self.time)
    }
}

/// Activated receivers, most energy first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReport {
    pub entries: Vec<EnergyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyEntry {
    pub receiver: ReceiverSymbol,
    /// eV
    pub energy: f64,
    pub photons_absorbed: u32,
}

impl EnergyReport {
    /// `receivers` must be in symbol order; ties keep that order.
    pub fn from_receivers(receivers: &[Receiver]) -> Self {
        let mut entries: Vec<EnergyEntry> = receivers
            .iter()
            .filter(|r| r.is_activated())
            .map(|r| EnergyEntry {
                receiver: r.symbol(),
                energy: r.total_energy(),
                photons_absorbed: r.photons_absorbed(),
            })
            .collect();
        entries.sort_by_key(|e| Reverse(OrderedFloat(e.energy)));
        Self { entries }
    }
}

impl fmt::Display for EnergyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}eV ({})", self.receiver, self.energy, self.photons_absorbed)
    }
}

macro_rules! display_lines {
    ($($report:ty),*) => {
        $(
            impl fmt::Display for $report {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    for entry in &self.entries {
                        writeln!(f, "{}", entry)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

display_lines!(EmissionReport, ActivationReport, EnergyReport);

/// Write `report` to `dir/file_name`
pub fn write_report(dir: &Path, file_name: &str, report: &impl fmt::Display) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join(file_name), report.to_string())?;
    Ok(())
}

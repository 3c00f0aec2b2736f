//! Full circuit run: emission, ticking to completion, reports
//!
//! The runner returns everything it observed as a [`RunSummary`]; printing is
//! left to the caller through the progress callback, which also sees the
//! circuit at that tick for anything it wants to draw.

use serde::Serialize;
use std::fmt;

use crate::circuit::engine::LaserCircuit;
use crate::circuit::events::CircuitEvent;
use crate::circuit::report::{
    write_report, ActivationReport, EmissionReport, EnergyReport, ACTIVATION_FILE, EMISSION_FILE,
    ENERGY_FILE,
};
use crate::core::config::RunConfig;
use crate::core::error::Result;
use crate::core::types::Tick;

/// Receiver activation status at a point in the run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub tick: Tick,
    pub activated: usize,
    pub receivers: usize,
}

impl ProgressSnapshot {
    fn capture(circuit: &LaserCircuit) -> Self {
        Self {
            tick: circuit.clock(),
            activated: circuit.activated_receivers(),
            receivers: circuit.receivers().len(),
        }
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}ns: {}/{} receiver(s) activated.",
            self.tick, self.activated, self.receivers
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub emission: EmissionReport,
    pub progress: Vec<ProgressSnapshot>,
    pub activation: ActivationReport,
    pub energy: EnergyReport,
    pub events: Vec<CircuitEvent>,
    pub ticks: Tick,
    /// False when the tick budget ran out with photons still live
    pub completed: bool,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run `circuit` from emission until every photon is absorbed.
///
/// `on_progress` sees each snapshot, with the circuit in that state, as it is
/// taken: at 0ns when nothing was emitted, every `progress_interval` ticks,
/// and on the finishing tick.
pub fn run_circuit(
    circuit: &mut LaserCircuit,
    config: &RunConfig,
    mut on_progress: impl FnMut(&ProgressSnapshot, &LaserCircuit),
) -> Result<RunSummary> {
    let emission = EmissionReport::from_emitters(circuit.emitters());
    let emitted = circuit.emit_photons()?;

    let mut progress: Vec<ProgressSnapshot> = Vec::new();
    let mut record = |progress: &mut Vec<ProgressSnapshot>, circuit: &LaserCircuit| {
        // At most one snapshot per tick
        if progress.last().is_some_and(|s| s.tick == circuit.clock()) {
            return;
        }
        let snapshot = ProgressSnapshot::capture(circuit);
        on_progress(&snapshot, circuit);
        progress.push(snapshot);
    };

    if emitted == 0 {
        record(&mut progress, &*circuit);
    }

    let interval = config.progress_interval.max(1);
    let mut events = Vec::new();
    let mut completed = true;

    while !circuit.is_finished() {
        if config.max_ticks.is_some_and(|budget| circuit.clock() >= budget) {
            tracing::warn!(
                "Tick budget of {} exhausted with {} photon(s) still live",
                circuit.clock(),
                circuit.photons().iter().filter(|p| !p.is_absorbed()).count()
            );
            completed = false;
            record(&mut progress, &*circuit);
            break;
        }

        events.extend(circuit.tick());
        if circuit.clock() % interval == 0 || circuit.is_finished() {
            record(&mut progress, &*circuit);
        }
    }

    let summary = RunSummary {
        emission,
        progress,
        activation: ActivationReport::from_receivers(circuit.receivers()),
        energy: EnergyReport::from_receivers(circuit.receivers()),
        events,
        ticks: circuit.clock(),
        completed,
    };

    if let Some(dir) = &config.output_dir {
        write_report(dir, EMISSION_FILE, &summary.emission)?;
        write_report(dir, ACTIVATION_FILE, &summary.activation)?;
        write_report(dir, ENERGY_FILE, &summary.energy)?;
        tracing::info!("Reports written to {}", dir.display());
    }

    Ok(summary)
}

//! The circuit engine and everything that reads from it

pub mod display;
pub mod engine;
pub mod events;
pub mod report;
pub mod runner;

pub use display::render_board;
pub use engine::{CircuitPhase, LaserCircuit};
pub use events::CircuitEvent;
pub use report::{ActivationReport, EmissionReport, EnergyReport};
pub use runner::{run_circuit, ProgressSnapshot, RunSummary};

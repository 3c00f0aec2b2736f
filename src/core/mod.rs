pub mod config;
pub mod error;
pub mod types;

pub use config::RunConfig;
pub use error::{CircuitError, ParseError, PlacementError, PulseError, Result};
pub use types::{BoardSize, Direction, Position, Tick};

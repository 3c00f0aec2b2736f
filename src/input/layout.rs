//! Circuit layouts stored as TOML
//!
//! ```toml
//! width = 18
//! height = 6
//!
//! [[emitters]]
//! symbol = "A"
//! x = 2
//! y = 2
//!
//! [[receivers]]
//! symbol = "R0"
//! x = 15
//! y = 2
//!
//! [[mirrors]]
//! symbol = '\'
//! x = 5
//! y = 2
//!
//! [[pulses]]
//! symbol = "A"
//! frequency = 100
//! direction = "E"
//! ```
//!
//! Entries go through the same validation as interactive input. A bad entry
//! is reported and skipped; only an unreadable file or an invalid board size
//! fails the whole load.

use serde::Deserialize;
use std::path::Path;

use crate::circuit::LaserCircuit;
use crate::components::{Component, Emitter, EmitterSymbol, Mirror, MirrorSymbol, Pulse, Receiver, ReceiverSymbol};
use crate::core::error::{CircuitError, ParseError, Result};
use crate::core::types::{BoardSize, Direction, Position};
use crate::input::parser::{non_negative, positive};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CircuitLayout {
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub emitters: Vec<PlacementEntry>,
    #[serde(default)]
    pub receivers: Vec<PlacementEntry>,
    #[serde(default)]
    pub mirrors: Vec<PlacementEntry>,
    #[serde(default)]
    pub pulses: Vec<PulseEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacementEntry {
    pub symbol: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PulseEntry {
    pub symbol: String,
    pub frequency: i64,
    pub direction: String,
}

/// A circuit built from a layout, plus every entry that was skipped
#[derive(Debug, Clone)]
pub struct LoadedLayout {
    pub circuit: LaserCircuit,
    pub rejections: Vec<String>,
}

impl PlacementEntry {
    fn position(&self) -> std::result::Result<Position, ParseError> {
        let x = non_negative(self.x, "x")?;
        let y = non_negative(self.y, "y")?;
        Ok(Position::new(x, y))
    }

    fn emitter(&self) -> std::result::Result<Emitter, ParseError> {
        let symbol = EmitterSymbol::parse(&self.symbol).ok_or(ParseError::EmitterSymbol)?;
        Ok(Emitter::new(symbol, self.position()?))
    }

    fn receiver(&self) -> std::result::Result<Receiver, ParseError> {
        let symbol = ReceiverSymbol::parse(&self.symbol).ok_or(ParseError::ReceiverSymbol)?;
        Ok(Receiver::new(symbol, self.position()?))
    }

    fn mirror(&self) -> std::result::Result<Mirror, ParseError> {
        let symbol = MirrorSymbol::parse(&self.symbol).ok_or(ParseError::MirrorSymbol)?;
        Ok(Mirror::new(symbol, self.position()?))
    }
}

impl PulseEntry {
    fn apply(&self, circuit: &mut LaserCircuit) -> Result<()> {
        let symbol = EmitterSymbol::parse(&self.symbol).ok_or(ParseError::EmitterSymbol)?;
        let frequency = positive(self.frequency, "frequency")?;
        let direction = Direction::from_letter(&self.direction).ok_or(ParseError::Direction)?;
        circuit.set_pulse(symbol, Pulse::new(frequency, direction)?)?;
        Ok(())
    }
}

impl CircuitLayout {
    pub fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CircuitError::Layout(e.to_string()))
    }

    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn board(&self) -> Result<BoardSize> {
        let width = positive(self.width, "width")?;
        let height = positive(self.height, "height")?;
        BoardSize::new(width, height).ok_or(CircuitError::InvalidBoard { width, height })
    }

    /// Build the circuit: emitters, receivers, mirrors, then pulses
    pub fn build(&self) -> Result<LoadedLayout> {
        let mut circuit = LaserCircuit::with_board(self.board()?);
        let mut rejections = Vec::new();

        let placements = self
            .emitters
            .iter()
            .map(|e| (e, e.emitter().map(Component::from)))
            .chain(self.receivers.iter().map(|r| (r, r.receiver().map(Component::from))))
            .chain(self.mirrors.iter().map(|m| (m, m.mirror().map(Component::from))));

        for (entry, component) in placements {
            let result = component
                .map_err(CircuitError::from)
                .and_then(|c| circuit.add_component(c).map_err(CircuitError::from));
            if let Err(e) = result {
                tracing::warn!("Skipping '{}' at ({}, {}): {}", entry.symbol, entry.x, entry.y, e);
                rejections.push(format!("{} {} {}: {}", entry.symbol, entry.x, entry.y, e));
            }
        }

        for pulse in &self.pulses {
            if let Err(e) = pulse.apply(&mut circuit) {
                tracing::warn!("Skipping pulse for '{}': {}", pulse.symbol, e);
                rejections.push(format!(
                    "{} {} {}: {}",
                    pulse.symbol, pulse.frequency, pulse.direction, e
                ));
            }
        }

        tracing::info!(
            "Layout loaded: {} emitter(s), {} receiver(s), {} mirror(s), {} entry(ies) skipped",
            circuit.emitters().len(),
            circuit.receivers().len(),
            circuit.mirrors().len(),
            rejections.len()
        );
        Ok(LoadedLayout { circuit, rejections })
    }
}

/// Read, parse and build the layout at `path`
pub fn load_layout(path: &Path) -> Result<LoadedLayout> {
    CircuitLayout::load_from_toml(path)?.build()
}

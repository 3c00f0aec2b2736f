//! Receivers - absorb photons and accumulate their energy

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::photon::photon_energy_ev;
use crate::core::types::{Position, Tick};

/// Receiver symbol, `R0` to `R9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReceiverSymbol(u8);

impl ReceiverSymbol {
    pub fn new(number: u8) -> Option<Self> {
        (number <= 9).then_some(Self(number))
    }

    /// Parse an `R<digit>` token
    pub fn parse(token: &str) -> Option<Self> {
        let digit = token.strip_prefix('R')?;
        let mut chars = digit.chars();
        match (chars.next(), chars.next()) {
            (Some(d), None) => d.to_digit(10).and_then(|n| Self::new(n as u8)),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ReceiverSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receiver {
    symbol: ReceiverSymbol,
    position: Position,
    photons_absorbed: u32,
    total_energy: f64,
    activation_time: Option<Tick>,
}

impl Receiver {
    pub fn new(symbol: ReceiverSymbol, position: Position) -> Self {
        Self {
            symbol,
            position,
            photons_absorbed: 0,
            total_energy: 0.0,
            activation_time: None,
        }
    }

    pub fn symbol(&self) -> ReceiverSymbol {
        self.symbol
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn photons_absorbed(&self) -> u32 {
        self.photons_absorbed
    }

    /// Accumulated energy in eV
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Tick of the first absorption, if any
    pub fn activation_time(&self) -> Option<Tick> {
        self.activation_time
    }

    pub fn is_activated(&self) -> bool {
        self.activation_time.is_some()
    }

    /// Record a photon of `frequency` THz arriving at `timestamp`.
    ///
    /// Returns true when this absorption activated the receiver.
    pub fn absorb(&mut self, frequency: u32, timestamp: Tick) -> bool {
        self.photons_absorbed += 1;
        self.total_energy += photon_energy_ev(frequency);
        if self.activation_time.is_some() {
            return false;
        }
        self.activation_time = Some(timestamp);
        true
    }
}

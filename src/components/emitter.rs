//! Emitters - photon sources configured with a single pulse

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::photon::Photon;
use crate::core::error::PulseError;
use crate::core::types::{Direction, Position};

/// Emitter symbol, a letter from `A` to `J`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmitterSymbol(char);

impl EmitterSymbol {
    pub fn new(letter: char) -> Option<Self> {
        ('A'..='J').contains(&letter).then_some(Self(letter))
    }

    /// Parse a one-letter token
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::new(letter),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for EmitterSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frequency (THz) and launch direction of an emitter's photon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pulse {
    frequency: u32,
    direction: Direction,
}

impl Pulse {
    pub fn new(frequency: u32, direction: Direction) -> Result<Self, PulseError> {
        if frequency == 0 {
            return Err(PulseError::ZeroFrequency);
        }
        Ok(Self { frequency, direction })
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emitter {
    symbol: EmitterSymbol,
    position: Position,
    pulse: Option<Pulse>,
}

impl Emitter {
    pub fn new(symbol: EmitterSymbol, position: Position) -> Self {
        Self { symbol, position, pulse: None }
    }

    pub fn symbol(&self) -> EmitterSymbol {
        self.symbol
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn pulse(&self) -> Option<Pulse> {
        self.pulse
    }

    pub fn is_pulse_set(&self) -> bool {
        self.pulse.is_some()
    }

    /// Configure the pulse. Only the first call succeeds.
    pub fn set_pulse(&mut self, pulse: Pulse) -> Result<(), PulseError> {
        if self.pulse.is_some() {
            return Err(PulseError::AlreadySet(self.symbol.as_char()));
        }
        self.pulse = Some(pulse);
        Ok(())
    }

    /// A fresh photon on this emitter's cell, or `None` while unconfigured
    pub fn emit_photon(&self) -> Option<Photon> {
        self.pulse.map(|pulse| Photon::new(self.position, pulse.frequency(), pulse.direction()))
    }
}

/// `A: 100THz, East`, shared by the emitter and the emission report
pub(crate) fn describe(f: &mut fmt::Formatter<'_>, symbol: EmitterSymbol, pulse: Option<Pulse>) -> fmt::Result {
    match pulse {
        Some(pulse) => write!(f, "{}: {}THz, {}", symbol, pulse.frequency, pulse.direction),
        None => write!(f, "{}: pulse sequence not set", symbol),
    }
}

impl fmt::Display for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, self.symbol, self.pulse)
    }
}

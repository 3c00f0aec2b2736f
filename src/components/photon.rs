//! Photons - light pulses travelling one cell per tick
//!
//! A photon only ever changes in three ways: it moves, a mirror turns it, or
//! it is absorbed. Absorption is terminal.

use serde::Serialize;

use crate::components::mirror::Reflection;
use crate::components::ComponentMut;
use crate::core::types::{BoardSize, Direction, Position, Tick};

/// Planck's constant expressed in eV per THz (h = 4.135667696e-15 eV*s)
pub const PLANCK_EV_PER_THZ: f64 = 4.135667696e-3;

/// Energy in eV carried by a photon of `frequency` THz
pub fn photon_energy_ev(frequency: u32) -> f64 {
    f64::from(frequency) * PLANCK_EV_PER_THZ
}

/// Outcome of [`Photon::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Already absorbed, nothing happened
    Inert,
    Moved,
    /// The step would have left the board; the photon stopped on its last cell
    Exited,
}

/// Outcome of [`Photon::interact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Already absorbed, nothing happened
    Inert,
    /// Crossed an emitter cell
    PassedThrough,
    /// Absorbed by a receiver; `activated` is true on the receiver's first hit
    Received { activated: bool },
    Reflected(Direction),
    /// Stopped on a mirror's blind face
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photon {
    position: Position,
    direction: Direction,
    frequency: u32,
    absorbed: bool,
}

impl Photon {
    pub fn new(position: Position, frequency: u32, direction: Direction) -> Self {
        Self {
            position,
            direction,
            frequency,
            absorbed: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Frequency in THz
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn is_absorbed(&self) -> bool {
        self.absorbed
    }

    /// Mark the photon absorbed. Irreversible.
    pub fn absorb(&mut self) {
        self.absorbed = true;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !self.absorbed {
            self.direction = direction;
        }
    }

    /// Move one cell in the current direction.
    ///
    /// A photon that would step off `board` stays on its current cell and is
    /// absorbed.
    pub fn advance(&mut self, board: BoardSize) -> Movement {
        if self.absorbed {
            return Movement::Inert;
        }
        match self.position.step(self.direction) {
            Some(next) if board.contains(next) => {
                self.position = next;
                Movement::Moved
            }
            _ => {
                self.absorbed = true;
                Movement::Exited
            }
        }
    }

    /// Interact with the component occupying this photon's cell
    pub fn interact(&mut self, component: ComponentMut<'_>, timestamp: Tick) -> Interaction {
        if self.absorbed {
            return Interaction::Inert;
        }
        match component {
            ComponentMut::Emitter(_) => Interaction::PassedThrough,
            ComponentMut::Receiver(receiver) => {
                let activated = receiver.absorb(self.frequency, timestamp);
                self.absorbed = true;
                Interaction::Received { activated }
            }
            ComponentMut::Mirror(mirror) => match mirror.reflect_photon(self) {
                Some(Reflection::Redirect(direction)) => Interaction::Reflected(direction),
                Some(Reflection::Absorb) => Interaction::Blocked,
                None => Interaction::Inert,
            },
        }
    }
}

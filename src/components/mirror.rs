//! Mirrors - redirect photons, or swallow them on their blind faces
//!
//! Reflection is a pure function of the mirror shape and the photon's
//! incoming direction:
//!
//! | shape | N | E | S | W |
//! |-------|---|---|---|---|
//! | `\`   | W | S | E | N |
//! | `/`   | E | N | W | S |
//! | `>`   | E | x | E | x |
//! | `<`   | W | x | W | x |
//! | `^`   | x | N | x | N |
//! | `v`   | x | S | x | S |
//!
//! `x` marks an absorption: the photon keeps its direction and stops.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::photon::Photon;
use crate::core::types::{Direction, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MirrorSymbol {
    /// `\`
    Backslash,
    /// `/`
    Slash,
    /// `>`
    Right,
    /// `<`
    Left,
    /// `^`
    Up,
    /// `v`
    Down,
}

/// Result of a photon striking a mirror face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reflection {
    Redirect(Direction),
    Absorb,
}

impl MirrorSymbol {
    pub const ALL: [MirrorSymbol; 6] = [
        MirrorSymbol::Backslash,
        MirrorSymbol::Slash,
        MirrorSymbol::Right,
        MirrorSymbol::Left,
        MirrorSymbol::Up,
        MirrorSymbol::Down,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\\' => Some(MirrorSymbol::Backslash),
            '/' => Some(MirrorSymbol::Slash),
            '>' => Some(MirrorSymbol::Right),
            '<' => Some(MirrorSymbol::Left),
            '^' => Some(MirrorSymbol::Up),
            'v' => Some(MirrorSymbol::Down),
            _ => None,
        }
    }

    /// Parse a one-character token
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            MirrorSymbol::Backslash => '\\',
            MirrorSymbol::Slash => '/',
            MirrorSymbol::Right => '>',
            MirrorSymbol::Left => '<',
            MirrorSymbol::Up => '^',
            MirrorSymbol::Down => 'v',
        }
    }

    pub fn reflect(self, incoming: Direction) -> Reflection {
        use Direction::*;
        use Reflection::{Absorb, Redirect};

        match (self, incoming) {
            (MirrorSymbol::Backslash, North) => Redirect(West),
            (MirrorSymbol::Backslash, East) => Redirect(South),
            (MirrorSymbol::Backslash, South) => Redirect(East),
            (MirrorSymbol::Backslash, West) => Redirect(North),

            (MirrorSymbol::Slash, North) => Redirect(East),
            (MirrorSymbol::Slash, East) => Redirect(North),
            (MirrorSymbol::Slash, South) => Redirect(West),
            (MirrorSymbol::Slash, West) => Redirect(South),

            (MirrorSymbol::Right, North | South) => Redirect(East),
            (MirrorSymbol::Left, North | South) => Redirect(West),
            (MirrorSymbol::Right | MirrorSymbol::Left, East | West) => Absorb,

            (MirrorSymbol::Up, East | West) => Redirect(North),
            (MirrorSymbol::Down, East | West) => Redirect(South),
            (MirrorSymbol::Up | MirrorSymbol::Down, North | South) => Absorb,
        }
    }
}

impl fmt::Display for MirrorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mirror {
    symbol: MirrorSymbol,
    position: Position,
}

impl Mirror {
    pub fn new(symbol: MirrorSymbol, position: Position) -> Self {
        Self { symbol, position }
    }

    pub fn symbol(&self) -> MirrorSymbol {
        self.symbol
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Reflect `photon` off this mirror.
    ///
    /// Returns `None` without touching the photon if it was already absorbed.
    pub fn reflect_photon(&self, photon: &mut Photon) -> Option<Reflection> {
        if photon.is_absorbed() {
            return None;
        }
        let reflection = self.symbol.reflect(photon.direction());
        match reflection {
            Reflection::Redirect(direction) => photon.set_direction(direction),
            Reflection::Absorb => photon.absorb(),
        }
        Some(reflection)
    }
}

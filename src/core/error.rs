use thiserror::Error;

use crate::components::ComponentKind;
use crate::core::types::{BoardSize, Position};

/// Why a component could not be placed on the board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("position {position} is out-of-bounds of {board} circuit board")]
    OutOfBounds { position: Position, board: BoardSize },

    #[error("position {position} is already taken by {kind} '{symbol}'")]
    PositionTaken {
        position: Position,
        kind: ComponentKind,
        symbol: String,
    },

    #[error("symbol '{0}' is already taken")]
    SymbolTaken(String),
}

/// Why a pulse could not be configured on an emitter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PulseError {
    #[error("emitter '{0}' already has its pulse sequence set")]
    AlreadySet(char),

    #[error("emitter '{0}' does not exist")]
    UnknownEmitter(char),

    #[error("frequency must be greater than zero")]
    ZeroFrequency,
}

/// Input validation failures, worded for the console transcript
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("{0} is not an integer")]
    NotInteger(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} cannot be negative")]
    Negative(&'static str),

    #[error("symbol is not between 'A'-'J'")]
    EmitterSymbol,

    #[error("symbol is not between R0-R9")]
    ReceiverSymbol,

    #[error("symbol must be '/', '\\', '>', '<', '^' or 'v'")]
    MirrorSymbol,

    #[error("direction must be 'N', 'E', 'S' or 'W'")]
    Direction,
}

#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidBoard { width: u32, height: u32 },

    #[error("photons have already been emitted")]
    AlreadyEmitted,

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Pulse(#[from] PulseError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CircuitError>;

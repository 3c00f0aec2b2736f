//! Events produced by a circuit tick

use serde::Serialize;

use crate::components::{MirrorSymbol, ReceiverSymbol};
use crate::core::types::{Direction, Position, Tick};

/// Something noteworthy that happened to a photon during a tick
///
/// `photon` is the photon's index in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CircuitEvent {
    /// Tried to leave the board and was absorbed on its last cell
    PhotonExited {
        photon: usize,
        position: Position,
        tick: Tick,
    },
    PhotonReflected {
        photon: usize,
        position: Position,
        mirror: MirrorSymbol,
        direction: Direction,
        tick: Tick,
    },
    /// Absorbed on a mirror's blind face
    PhotonBlocked {
        photon: usize,
        position: Position,
        mirror: MirrorSymbol,
        tick: Tick,
    },
    PhotonReceived {
        photon: usize,
        receiver: ReceiverSymbol,
        tick: Tick,
    },
    ReceiverActivated { receiver: ReceiverSymbol, tick: Tick },
}

impl CircuitEvent {
    pub fn tick(&self) -> Tick {
        match self {
            CircuitEvent::PhotonExited { tick, .. }
            | CircuitEvent::PhotonReflected { tick, .. }
            | CircuitEvent::PhotonBlocked { tick, .. }
            | CircuitEvent::PhotonReceived { tick, .. }
            | CircuitEvent::ReceiverActivated { tick, .. } => *tick,
        }
    }

    /// True for events that end a photon's life
    pub fn is_absorption(&self) -> bool {
        matches!(
            self,
            CircuitEvent::PhotonExited { .. }
                | CircuitEvent::PhotonBlocked { .. }
                | CircuitEvent::PhotonReceived { .. }
        )
    }
}

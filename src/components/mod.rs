//! Circuit components and the photons that travel between them
//!
//! Components are a closed set: emitters, receivers and mirrors. A photon
//! never sees a concrete component type, only a [`ComponentMut`] variant and
//! the single operation that variant exposes.

pub mod emitter;
pub mod mirror;
pub mod photon;
pub mod receiver;

pub use emitter::{Emitter, EmitterSymbol, Pulse};
pub use mirror::{Mirror, MirrorSymbol, Reflection};
pub use photon::{photon_energy_ev, Interaction, Movement, Photon, PLANCK_EV_PER_THZ};
pub use receiver::{Receiver, ReceiverSymbol};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Position;

/// Kind tag shared by every component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Emitter,
    Receiver,
    Mirror,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComponentKind::Emitter => "emitter",
            ComponentKind::Receiver => "receiver",
            ComponentKind::Mirror => "mirror",
        })
    }
}

/// An owned component of any kind, used where placement is kind-erased
#[derive(Debug, Clone)]
pub enum Component {
    Emitter(Emitter),
    Receiver(Receiver),
    Mirror(Mirror),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Emitter(_) => ComponentKind::Emitter,
            Component::Receiver(_) => ComponentKind::Receiver,
            Component::Mirror(_) => ComponentKind::Mirror,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Component::Emitter(e) => e.position(),
            Component::Receiver(r) => r.position(),
            Component::Mirror(m) => m.position(),
        }
    }
}

impl From<Emitter> for Component {
    fn from(emitter: Emitter) -> Self {
        Component::Emitter(emitter)
    }
}

impl From<Receiver> for Component {
    fn from(receiver: Receiver) -> Self {
        Component::Receiver(receiver)
    }
}

impl From<Mirror> for Component {
    fn from(mirror: Mirror) -> Self {
        Component::Mirror(mirror)
    }
}

/// Read-only view of a placed component
#[derive(Debug, Clone, Copy)]
pub enum ComponentRef<'a> {
    Emitter(&'a Emitter),
    Receiver(&'a Receiver),
    Mirror(&'a Mirror),
}

impl ComponentRef<'_> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Emitter(_) => ComponentKind::Emitter,
            ComponentRef::Receiver(_) => ComponentKind::Receiver,
            ComponentRef::Mirror(_) => ComponentKind::Mirror,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ComponentRef::Emitter(e) => e.position(),
            ComponentRef::Receiver(r) => r.position(),
            ComponentRef::Mirror(m) => m.position(),
        }
    }

    pub fn symbol(&self) -> String {
        match self {
            ComponentRef::Emitter(e) => e.symbol().to_string(),
            ComponentRef::Receiver(r) => r.symbol().to_string(),
            ComponentRef::Mirror(m) => m.symbol().to_string(),
        }
    }

    /// Single character drawn on the board
    pub fn glyph(&self) -> char {
        match self {
            ComponentRef::Emitter(e) => e.symbol().as_char(),
            ComponentRef::Receiver(r) => char::from(b'0' + r.symbol().number()),
            ComponentRef::Mirror(m) => m.symbol().as_char(),
        }
    }
}

/// Borrowed view of the component a photon collided with
///
/// Only receivers are borrowed mutably: they are the one kind whose state
/// changes on interaction.
#[derive(Debug)]
pub enum ComponentMut<'a> {
    Emitter(&'a Emitter),
    Receiver(&'a mut Receiver),
    Mirror(&'a Mirror),
}

impl ComponentMut<'_> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentMut::Emitter(_) => ComponentKind::Emitter,
            ComponentMut::Receiver(_) => ComponentKind::Receiver,
            ComponentMut::Mirror(_) => ComponentKind::Mirror,
        }
    }
}

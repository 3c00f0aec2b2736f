//! Circuit engine - owns the board, its components and every photon
//!
//! Lifecycle: Idle (nothing emitted) -> emission (one photon per configured
//! emitter, at tick 0) -> Running -> Finished once every photon is absorbed.
//! Photons are never removed; absorbed ones stay in the collection as inert
//! records, which is what makes "finished" a simple all-absorbed check.

use serde::Serialize;

use crate::circuit::events::CircuitEvent;
use crate::components::{
    Component, ComponentMut, ComponentRef, Emitter, EmitterSymbol, Interaction, Mirror, Movement,
    Photon, Pulse, Receiver,
};
use crate::core::error::{CircuitError, PlacementError, PulseError, Result};
use crate::core::types::{BoardSize, Position, Tick};
use crate::spatial::{BoardIndex, Grid, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CircuitPhase {
    /// Photons not yet emitted
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct LaserCircuit {
    board: BoardSize,
    /// Sorted by symbol
    emitters: Vec<Emitter>,
    /// Sorted by symbol
    receivers: Vec<Receiver>,
    /// Insertion order
    mirrors: Vec<Mirror>,
    /// Emission order
    photons: Vec<Photon>,
    index: BoardIndex,
    /// Cells any photon has entered, for rendering
    trail: Grid<bool>,
    clock: Tick,
    emitted: bool,
}

impl LaserCircuit {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let board = BoardSize::new(width, height).ok_or(CircuitError::InvalidBoard { width, height })?;
        Ok(Self::with_board(board))
    }

    pub fn with_board(board: BoardSize) -> Self {
        Self {
            board,
            emitters: Vec::new(),
            receivers: Vec::new(),
            mirrors: Vec::new(),
            photons: Vec::new(),
            index: BoardIndex::new(),
            trail: Grid::for_board(board),
            clock: 0,
            emitted: false,
        }
    }

    pub fn board(&self) -> BoardSize {
        self.board
    }

    pub fn width(&self) -> u32 {
        self.board.width
    }

    pub fn height(&self) -> u32 {
        self.board.height
    }

    /// Nanoseconds elapsed
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }

    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    pub fn emitter(&self, symbol: EmitterSymbol) -> Option<&Emitter> {
        self.emitters
            .binary_search_by_key(&symbol, Emitter::symbol)
            .ok()
            .map(|i| &self.emitters[i])
    }

    /// The component occupying `pos`, if any
    pub fn component_at(&self, pos: Position) -> Option<ComponentRef<'_>> {
        self.index.occupant(pos).map(|slot| self.resolve(slot))
    }

    /// Whether any photon has entered `pos`
    pub fn visited(&self, pos: Position) -> bool {
        self.trail.at(pos).copied().unwrap_or(false)
    }

    fn resolve(&self, slot: Slot) -> ComponentRef<'_> {
        match slot {
            Slot::Emitter(i) => ComponentRef::Emitter(&self.emitters[i]),
            Slot::Receiver(i) => ComponentRef::Receiver(&self.receivers[i]),
            Slot::Mirror(i) => ComponentRef::Mirror(&self.mirrors[i]),
        }
    }

    // === PLACEMENT ===

    /// Bounds, then occupancy. One lookup covers the emitter, receiver and
    /// mirror collision checks because a cell holds at most one component.
    fn check_cell(&self, pos: Position) -> std::result::Result<(), PlacementError> {
        if !self.board.contains(pos) {
            return Err(PlacementError::OutOfBounds { position: pos, board: self.board });
        }
        if let Some(occupant) = self.component_at(pos) {
            return Err(PlacementError::PositionTaken {
                position: pos,
                kind: occupant.kind(),
                symbol: occupant.symbol(),
            });
        }
        Ok(())
    }

    pub fn add_emitter(&mut self, emitter: Emitter) -> std::result::Result<(), PlacementError> {
        let pos = emitter.position();
        self.check_cell(pos)?;

        let at = match self.emitters.binary_search_by_key(&emitter.symbol(), Emitter::symbol) {
            Ok(_) => return Err(PlacementError::SymbolTaken(emitter.symbol().to_string())),
            Err(at) => at,
        };

        tracing::debug!("Placed emitter {} at {}", emitter.symbol(), pos);
        self.emitters.insert(at, emitter);
        self.index.insert(pos, Slot::Emitter(at));
        Ok(())
    }

    pub fn add_receiver(&mut self, receiver: Receiver) -> std::result::Result<(), PlacementError> {
        let pos = receiver.position();
        self.check_cell(pos)?;

        let at = match self.receivers.binary_search_by_key(&receiver.symbol(), Receiver::symbol) {
            Ok(_) => return Err(PlacementError::SymbolTaken(receiver.symbol().to_string())),
            Err(at) => at,
        };

        tracing::debug!("Placed receiver {} at {}", receiver.symbol(), pos);
        self.receivers.insert(at, receiver);
        self.index.insert(pos, Slot::Receiver(at));
        Ok(())
    }

    pub fn add_mirror(&mut self, mirror: Mirror) -> std::result::Result<(), PlacementError> {
        let pos = mirror.position();
        self.check_cell(pos)?;

        let at = self.mirrors.len();
        tracing::debug!("Placed mirror {} at {}", mirror.symbol(), pos);
        self.mirrors.push(mirror);
        self.index.insert(pos, Slot::Mirror(at));
        Ok(())
    }

    pub fn add_component(&mut self, component: Component) -> std::result::Result<(), PlacementError> {
        match component {
            Component::Emitter(e) => self.add_emitter(e),
            Component::Receiver(r) => self.add_receiver(r),
            Component::Mirror(m) => self.add_mirror(m),
        }
    }

    // === PULSES ===

    /// Configure the pulse of emitter `symbol`. An emitter accepts one pulse.
    pub fn set_pulse(&mut self, symbol: EmitterSymbol, pulse: Pulse) -> std::result::Result<(), PulseError> {
        let i = self
            .emitters
            .binary_search_by_key(&symbol, Emitter::symbol)
            .map_err(|_| PulseError::UnknownEmitter(symbol.as_char()))?;
        self.emitters[i].set_pulse(pulse)
    }

    /// Emitters still waiting for a pulse, in symbol order
    pub fn pending_emitters(&self) -> impl Iterator<Item = EmitterSymbol> + '_ {
        self.emitters.iter().filter(|e| !e.is_pulse_set()).map(Emitter::symbol)
    }

    // === SIMULATION ===

    /// Every configured emitter fires one photon. Returns how many were emitted.
    pub fn emit_photons(&mut self) -> Result<usize> {
        if self.emitted {
            return Err(CircuitError::AlreadyEmitted);
        }
        self.emitted = true;

        self.photons.extend(self.emitters.iter().filter_map(Emitter::emit_photon));
        for photon in &self.photons {
            if let Some(cell) = self.trail.at_mut(photon.position()) {
                *cell = true;
            }
        }

        tracing::info!(
            "Emitted {} photon(s) from {} emitter(s)",
            self.photons.len(),
            self.emitters.len()
        );
        Ok(self.photons.len())
    }

    pub fn is_finished(&self) -> bool {
        self.photons.iter().all(Photon::is_absorbed)
    }

    pub fn phase(&self) -> CircuitPhase {
        if !self.emitted {
            CircuitPhase::Idle
        } else if self.is_finished() {
            CircuitPhase::Finished
        } else {
            CircuitPhase::Running
        }
    }

    pub fn activated_receivers(&self) -> usize {
        self.receivers.iter().filter(|r| r.is_activated()).count()
    }

    /// Advance one nanosecond.
    ///
    /// The clock always advances. On a finished circuit nothing else happens.
    /// Otherwise each live photon, in emission order, moves one cell and then
    /// interacts with whatever occupies its new cell, stamped with the new
    /// clock value. A photon interacts at most once per tick.
    pub fn tick(&mut self) -> Vec<CircuitEvent> {
        self.clock += 1;
        let mut events = Vec::new();
        if self.is_finished() {
            return events;
        }

        let now = self.clock;
        let Self {
            board,
            emitters,
            receivers,
            mirrors,
            photons,
            index,
            trail,
            ..
        } = self;

        for (id, photon) in photons.iter_mut().enumerate() {
            match photon.advance(*board) {
                Movement::Inert => continue,
                Movement::Exited => {
                    tracing::debug!("Photon {} left the board at {} ({}ns)", id, photon.position(), now);
                    events.push(CircuitEvent::PhotonExited {
                        photon: id,
                        position: photon.position(),
                        tick: now,
                    });
                    continue;
                }
                Movement::Moved => {}
            }

            let pos = photon.position();
            if let Some(cell) = trail.at_mut(pos) {
                *cell = true;
            }

            let Some(slot) = index.occupant(pos) else {
                continue;
            };
            let component = match slot {
                Slot::Emitter(i) => ComponentMut::Emitter(&emitters[i]),
                Slot::Receiver(i) => ComponentMut::Receiver(&mut receivers[i]),
                Slot::Mirror(i) => ComponentMut::Mirror(&mirrors[i]),
            };

            match photon.interact(component, now) {
                Interaction::Inert | Interaction::PassedThrough => {}
                Interaction::Received { activated } => {
                    let receiver = receivers[slot.index()].symbol();
                    tracing::debug!("Photon {} absorbed by {} ({}ns)", id, receiver, now);
                    events.push(CircuitEvent::PhotonReceived { photon: id, receiver, tick: now });
                    if activated {
                        events.push(CircuitEvent::ReceiverActivated { receiver, tick: now });
                    }
                }
                Interaction::Reflected(direction) => {
                    let mirror = mirrors[slot.index()].symbol();
                    events.push(CircuitEvent::PhotonReflected {
                        photon: id,
                        position: pos,
                        mirror,
                        direction,
                        tick: now,
                    });
                }
                Interaction::Blocked => {
                    let mirror = mirrors[slot.index()].symbol();
                    tracing::debug!("Photon {} blocked by mirror {} at {} ({}ns)", id, mirror, pos, now);
                    events.push(CircuitEvent::PhotonBlocked {
                        photon: id,
                        position: pos,
                        mirror,
                        tick: now,
                    });
                }
            }
        }

        if self.is_finished() {
            tracing::info!("Circuit finished at {}ns", self.clock);
        }
        events
    }
}

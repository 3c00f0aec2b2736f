//! Position index for O(1) collision lookups

use ahash::AHashMap;

use crate::components::ComponentKind;
use crate::core::types::Position;

/// Where the occupant of a cell lives inside the circuit's collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Emitter(usize),
    Receiver(usize),
    Mirror(usize),
}

impl Slot {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Slot::Emitter(_) => ComponentKind::Emitter,
            Slot::Receiver(_) => ComponentKind::Receiver,
            Slot::Mirror(_) => ComponentKind::Mirror,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Slot::Emitter(i) | Slot::Receiver(i) | Slot::Mirror(i) => i,
        }
    }

    fn with_index(self, index: usize) -> Self {
        match self {
            Slot::Emitter(_) => Slot::Emitter(index),
            Slot::Receiver(_) => Slot::Receiver(index),
            Slot::Mirror(_) => Slot::Mirror(index),
        }
    }
}

/// Maps occupied cells to their component slot.
///
/// Holds at most one slot per cell: placement refuses shared cells, so a
/// lookup answers the same question as scanning emitters, then receivers,
/// then mirrors.
#[derive(Debug, Clone, Default)]
pub struct BoardIndex {
    cells: AHashMap<Position, Slot>,
}

impl BoardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn occupant(&self, pos: Position) -> Option<Slot> {
        self.cells.get(&pos).copied()
    }

    /// Record `slot` at `pos`.
    ///
    /// `slot` is the index the component was inserted at; existing slots of the
    /// same kind at or after that index move up by one to follow the shifted
    /// collection.
    pub fn insert(&mut self, pos: Position, slot: Slot) {
        debug_assert!(!self.cells.contains_key(&pos), "cell {pos} already indexed");
        for existing in self.cells.values_mut() {
            if existing.kind() == slot.kind() && existing.index() >= slot.index() {
                *existing = existing.with_index(existing.index() + 1);
            }
        }
        self.cells.insert(pos, slot);
    }
}

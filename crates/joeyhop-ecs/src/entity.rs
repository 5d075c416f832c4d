//! Generational handles for entities in the store.
//!
//! Entities themselves carry no identity; the store hands out an [`EntityId`]
//! per spawn so other entities can point at them (a joey riding the player,
//! for instance). A handle is a slot number plus the slot's generation at the
//! time of the spawn. Dropping an entity bumps its slot's generation, so any
//! handle still pointing there stops resolving instead of silently naming
//! whatever gets spawned into the slot next.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// Handle to one spawned entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    slot: u32,
    generation: u32,
}

impl EntityId {
    /// Handle for `slot` at `generation`.
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Slot in the store's index table.
    #[inline]
    pub fn index(self) -> u32 {
        self.slot
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.slot, self.generation)
    }
}

// ---------------------------------------------------------------------------
// EntityAllocator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    generation: u32,
    occupied: bool,
}

/// Issues and retires [`EntityId`]s.
///
/// Retired slots queue up and are handed out oldest first, so a particle
/// burst that dies and respawns every few frames cycles through many slots
/// rather than hammering the generation of one.
#[derive(Debug, Clone, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    vacant: VecDeque<u32>,
    live: usize,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a handle for a new entity.
    pub fn allocate(&mut self) -> EntityId {
        self.live += 1;
        match self.vacant.pop_front() {
            Some(slot) => {
                let entry = &mut self.slots[slot as usize];
                entry.occupied = true;
                EntityId::new(slot, entry.generation)
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    occupied: true,
                });
                EntityId::new(slot, 0)
            }
        }
    }

    /// Retire `id`. Returns `false`, changing nothing, if it was already
    /// stale.
    pub fn release(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let entry = &mut self.slots[id.index() as usize];
        entry.occupied = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.vacant.push_back(id.index());
        self.live -= 1;
        true
    }

    /// Whether `id` still names a live entity.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|s| s.occupied && s.generation == id.generation())
    }

    /// Live handles outstanding.
    pub fn alive_count(&self) -> usize {
        self.live
    }

    /// Slots ever created, occupied or vacant.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

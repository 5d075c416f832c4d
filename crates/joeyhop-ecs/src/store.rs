//! The [`EntityStore`]: an append-ordered, compacting collection of entities.
//!
//! Iteration order is append order, which renderers rely on for overlap.
//! Filtering by component is a linear scan; at this scale an index would cost
//! more than it saves. Removal never happens mid-pass: passes set
//! [`Entity::destroy`] and [`EntityStore::compact`] drops every tombstoned
//! entity in one sweep, then clears attachment handles that went stale.

use tracing::{debug, warn};

use crate::component::{ComponentKind, Entity};
use crate::entity::{EntityAllocator, EntityId};
use crate::vec2::Vec2;
use crate::EcsError;

// ---------------------------------------------------------------------------
// CompactReport
// ---------------------------------------------------------------------------

/// What a compaction sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactReport {
    /// Entities dropped from the store.
    pub removed: usize,
    /// Surviving entities whose `attached_to` handle was cleared.
    pub detached: usize,
    /// Pinned entities that were tombstoned and had the flag reverted.
    pub spared: usize,
}

// ---------------------------------------------------------------------------
// EntityStore
// ---------------------------------------------------------------------------

/// Owns every live entity and maps handles to rows.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    allocator: EntityAllocator,
    /// Entities in append order.
    entities: Vec<Entity>,
    /// Handle of each row, parallel to `entities`.
    ids: Vec<EntityId>,
    /// Row of each slot index, `None` for free slots.
    rows: Vec<Option<usize>>,
    /// Handles compaction must never drop.
    pinned: Vec<EntityId>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its handle.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.allocator.allocate();
        let slot = id.index() as usize;
        if slot >= self.rows.len() {
            self.rows.resize(slot + 1, None);
        }
        self.rows[slot] = Some(self.entities.len());
        self.entities.push(entity);
        self.ids.push(id);
        id
    }

    /// Append an entity that compaction must never drop.
    pub fn spawn_pinned(&mut self, entity: Entity) -> EntityId {
        let id = self.spawn(entity);
        self.pinned.push(id);
        id
    }

    /// Append every entity from an iterator, in order.
    pub fn spawn_batch(&mut self, entities: impl IntoIterator<Item = Entity>) -> usize {
        let mut count = 0;
        for entity in entities {
            self.spawn(entity);
            count += 1;
        }
        count
    }

    /// Number of entities currently stored (tombstoned ones included).
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether `id` names an entity still in the store.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id)
    }

    fn row_of(&self, id: EntityId) -> Option<usize> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.rows.get(id.index() as usize).copied().flatten()
    }

    /// Borrow an entity, or `None` if the handle is stale.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.row_of(id).map(|row| &self.entities[row])
    }

    /// Mutably borrow an entity, or `None` if the handle is stale.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.row_of(id).map(move |row| &mut self.entities[row])
    }

    /// Like [`get`](Self::get) but reports a stale handle as an error.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, EcsError> {
        self.get(id).ok_or(EcsError::StaleEntity { entity: id })
    }

    /// Like [`get_mut`](Self::get_mut) but reports a stale handle as an error.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, EcsError> {
        self.get_mut(id).ok_or(EcsError::StaleEntity { entity: id })
    }

    /// Position of an entity, erroring if it is gone or has no position.
    pub fn position(&self, id: EntityId) -> Result<Vec2, EcsError> {
        self.entity(id)?
            .position
            .ok_or(EcsError::MissingComponent {
                entity: id,
                component: ComponentKind::Position,
            })
    }

    /// Mutably borrow two distinct entities at once.
    ///
    /// Returns `None` if either handle is stale or both name the same entity.
    pub fn get_pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let ra = self.row_of(a)?;
        let rb = self.row_of(b)?;
        if ra == rb {
            return None;
        }
        if ra < rb {
            let (lo, hi) = self.entities.split_at_mut(rb);
            Some((&mut lo[ra], &mut hi[0]))
        } else {
            let (lo, hi) = self.entities.split_at_mut(ra);
            Some((&mut hi[0], &mut lo[rb]))
        }
    }

    // -- iteration ----------------------------------------------------------

    /// All handles in append order.
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// Iterate every entity in append order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.ids.iter().copied().zip(self.entities.iter())
    }

    /// Iterate every entity mutably in append order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.ids.iter().copied().zip(self.entities.iter_mut())
    }

    /// Iterate entities that carry `kind`.
    pub fn query(&self, kind: ComponentKind) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.iter().filter(move |(_, e)| e.has(kind))
    }

    /// Iterate entities that carry `kind`, mutably.
    pub fn query_mut(
        &mut self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.iter_mut().filter(move |(_, e)| e.has(kind))
    }

    /// Snapshot the handles of entities carrying `kind`.
    ///
    /// Passes that append while they work iterate this list, so entities
    /// spawned during the pass are not visited until the next one.
    pub fn matching(&self, kind: ComponentKind) -> Vec<EntityId> {
        self.query(kind).map(|(id, _)| id).collect()
    }

    // -- tombstones ---------------------------------------------------------

    /// Mark one entity for removal at the next compaction.
    pub fn tombstone(&mut self, id: EntityId) -> Result<(), EcsError> {
        self.entity_mut(id)?.destroy = true;
        Ok(())
    }

    /// Tombstone every entity except those in `keep`. Returns how many were
    /// newly marked.
    pub fn tombstone_all_except(&mut self, keep: &[EntityId]) -> usize {
        let mut marked = 0;
        for (id, entity) in self.iter_mut() {
            if !keep.contains(&id) && !entity.destroy {
                entity.destroy = true;
                marked += 1;
            }
        }
        marked
    }

    /// Protect an entity from ever being dropped by compaction.
    pub fn pin(&mut self, id: EntityId) -> Result<(), EcsError> {
        self.entity(id)?;
        if !self.pinned.contains(&id) {
            self.pinned.push(id);
        }
        Ok(())
    }

    /// Whether `id` is protected from compaction.
    pub fn is_pinned(&self, id: EntityId) -> bool {
        self.pinned.contains(&id)
    }

    /// Handles of every tombstoned entity still in the store.
    pub fn tombstoned(&self) -> Vec<EntityId> {
        self.iter()
            .filter(|(_, e)| e.destroy)
            .map(|(id, _)| id)
            .collect()
    }

    /// Drop every tombstoned entity, then clear attachment handles that no
    /// longer resolve.
    pub fn compact(&mut self) -> CompactReport {
        let mut report = CompactReport::default();

        for i in 0..self.pinned.len() {
            let id = self.pinned[i];
            if let Some(entity) = self.get_mut(id) {
                if entity.destroy {
                    entity.destroy = false;
                    report.spared += 1;
                    warn!(entity = %id, "pinned entity was tombstoned; keeping it");
                }
            }
        }

        if self.entities.iter().any(|e| e.destroy) {
            let entities = std::mem::take(&mut self.entities);
            let ids = std::mem::take(&mut self.ids);
            self.entities.reserve(entities.len());
            self.ids.reserve(ids.len());

            for (id, entity) in ids.into_iter().zip(entities) {
                let slot = id.index() as usize;
                if entity.destroy {
                    self.allocator.release(id);
                    self.rows[slot] = None;
                    report.removed += 1;
                } else {
                    self.rows[slot] = Some(self.entities.len());
                    self.entities.push(entity);
                    self.ids.push(id);
                }
            }
        }

        for entity in &mut self.entities {
            if let Some(anchor) = entity.attached_to {
                if !self.allocator.is_alive(anchor) {
                    entity.attached_to = None;
                    report.detached += 1;
                }
            }
        }

        if report.removed > 0 || report.detached > 0 {
            debug!(
                removed = report.removed,
                detached = report.detached,
                remaining = self.entities.len(),
                "compacted entity store"
            );
        }
        report
    }
}

//! Joeyhop ECS -- a flat entity store with a closed set of optional components.
//!
//! Entities are plain records ([`Entity`](component::Entity)) whose
//! behaviour is decided by which component slots are filled. The
//! [`EntityStore`](store::EntityStore) keeps them in append order, hands out
//! generational [`EntityId`](entity::EntityId) handles, and drops tombstoned
//! entities in a single compaction sweep per frame.
//!
//! # Quick Start
//!
//! ```
//! use joeyhop_ecs::prelude::*;
//!
//! let mut store = EntityStore::new();
//! let ball = store.spawn(
//!     Entity::new()
//!         .with_position(Vec2::new(0.0, 0.0))
//!         .with_velocity(Vec2::new(1.0, 0.0))
//!         .with_gravity(0.8),
//! );
//!
//! assert_eq!(store.matching(ComponentKind::Gravity), vec![ball]);
//! store.tombstone(ball).unwrap();
//! store.compact();
//! assert!(!store.is_alive(ball));
//! ```

#![deny(unsafe_code)]

pub mod component;
pub mod entity;
pub mod store;
pub mod vec2;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by entity store lookups.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The handle no longer names an entity in the store.
    #[error("entity {entity:?} does not exist (removed or never allocated)")]
    StaleEntity { entity: entity::EntityId },

    /// The entity exists but lacks a component the caller needs.
    #[error("entity {entity:?} has no {component:?} component")]
    MissingComponent {
        entity: entity::EntityId,
        component: component::ComponentKind,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::component::{
        Animation, Collision, ComponentKind, Entity, Particle, PlayerState, Spring, Sprite,
        SpriteImage, View,
    };
    pub use crate::entity::{EntityAllocator, EntityId};
    pub use crate::store::{CompactReport, EntityStore};
    pub use crate::vec2::Vec2;
    pub use crate::EcsError;
}

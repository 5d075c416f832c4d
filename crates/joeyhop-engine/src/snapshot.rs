//! World snapshots with BLAKE3 hashing.
//!
//! A [`WorldSnapshot`] is a serializable copy of everything that affects how
//! the simulation continues: the level, every entity with its handle, and the
//! session flags. Its hash is a BLAKE3 digest of the JSON form, so two runs
//! with the same seed and the same inputs can be compared with one string.
//!
//! ```
//! use joeyhop_engine::prelude::*;
//!
//! let run = || {
//!     let mut world = World::new(GameConfig::default(), BaseSeed(99));
//!     for _ in 0..30 {
//!         world.tick(1.0 / 60.0, &InputState::default());
//!     }
//!     world.state_hash().unwrap()
//! };
//! assert_eq!(run(), run());
//! assert_eq!(run().len(), 64);
//! ```
//!
//! Cosmetic RNG state and frame diagnostics are not captured.

use joeyhop_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::prng::BaseSeed;
use crate::world::World;

/// Errors from capturing or checking a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The state could not be encoded as JSON (a non-finite float, usually).
    #[error("snapshot is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serializable copy of a [`World`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame: u64,
    pub elapsed_ms: f64,
    pub game_over: bool,
    pub seed: BaseSeed,
    pub level: Level,
    pub player: EntityId,
    pub camera: EntityId,
    /// Every live entity in store order.
    pub entities: Vec<(EntityId, Entity)>,
}

impl WorldSnapshot {
    /// BLAKE3 hex digest (64 lowercase hex chars) of the JSON encoding.
    pub fn hash(&self) -> Result<String, SnapshotError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl World {
    /// Capture the current state.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame: self.frame_count(),
            elapsed_ms: self.elapsed_ms,
            game_over: self.game_over,
            seed: self.seed,
            level: self.level.clone(),
            player: self.player,
            camera: self.camera,
            entities: self.store.iter().map(|(id, e)| (id, e.clone())).collect(),
        }
    }

    /// Hash of [`snapshot`](Self::snapshot).
    pub fn state_hash(&self) -> Result<String, SnapshotError> {
        self.snapshot().hash()
    }
}

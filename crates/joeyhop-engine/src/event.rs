//! Gameplay events reported by a frame.
//!
//! [`World::tick`](crate::world::World::tick) returns the events it produced
//! so the caller can react (play a cue, persist a high score) without the
//! pipeline calling out mid-frame.

use joeyhop_ecs::entity::EntityId;
use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;

/// Something the player would notice happened this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player ran through a bush.
    HazardHit { entity: EntityId, score: u32 },
    /// A joey was picked up and now rides with the player.
    Rescued { entity: EntityId, score: u32 },
    /// The player reached the top of the stairs.
    LevelCompleted { day: u32, score: u32 },
    /// The next level was queued for population.
    LevelAdvanced { day: u32 },
    /// The player ran out of lives.
    GameOver { score: u32 },
}

impl GameEvent {
    /// The cue to play for this event, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::HazardHit { .. } => Some(SoundCue::HazardHit),
            GameEvent::Rescued { .. } => Some(SoundCue::Rescued),
            _ => None,
        }
    }

    /// The score carried by events that settle one.
    pub fn final_score(&self) -> Option<u32> {
        match self {
            GameEvent::LevelCompleted { score, .. } | GameEvent::GameOver { score } => {
                Some(*score)
            }
            _ => None,
        }
    }
}

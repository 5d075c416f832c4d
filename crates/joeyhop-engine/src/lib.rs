//! Joeyhop Engine -- the simulation core of a small stair-climbing arcade game.
//!
//! This crate builds on [`joeyhop_ecs`] to provide the [`World`](world::World)
//! and its per-frame [`pipeline`]: level population from a seeded generator,
//! camera pursuit, player steering, collision resolution, physics passes,
//! scoring, level progression and lifetime expiry. Rendering, input capture,
//! audio and storage are host concerns reached through small seams
//! ([`render::RenderView`], [`input::InputEvent`], [`audio::AudioSink`],
//! [`highscore::HighScoreStore`]).
//!
//! # Quick Start
//!
//! ```
//! use joeyhop_engine::prelude::*;
//!
//! let mut game = Game::headless(GameConfig::default(), BaseSeed(2024));
//! game.handle_input(InputEvent::KeyDown { key: Key::Right, repeat: false });
//!
//! for _ in 0..120 {
//!     game.advance(1.0 / 60.0);
//! }
//! assert_eq!(game.world().level().day, 1);
//! assert!(game.world().player().unwrap().position.unwrap().y > -0.5);
//! ```

#![deny(unsafe_code)]

pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod event;
pub mod highscore;
pub mod hud;
pub mod input;
pub mod level;
pub mod palette;
pub mod particles;
pub mod pipeline;
pub mod prng;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod world;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the ECS crate for convenience.
pub use joeyhop_ecs;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use joeyhop_ecs::prelude::*;

    pub use crate::audio::{AudioSink, NullAudio, RecordingAudio, SoundCue};
    pub use crate::clock::FrameClock;
    pub use crate::config::{
        CameraConfig, ConfigError, GameConfig, LevelConfig, PlayerConfig, ScoringConfig,
    };
    pub use crate::event::GameEvent;
    pub use crate::highscore::{
        HighScoreError, HighScoreStore, JsonFileHighScore, MemoryHighScore,
    };
    pub use crate::input::{InputEvent, InputState, Key};
    pub use crate::level::Level;
    pub use crate::pipeline::{Frame, PIPELINE};
    pub use crate::prng::{BaseSeed, SeededRandom};
    pub use crate::render::{RenderView, Tile};
    pub use crate::session::Game;
    pub use crate::snapshot::{SnapshotError, WorldSnapshot};
    pub use crate::world::{FrameDiagnostics, World};
}

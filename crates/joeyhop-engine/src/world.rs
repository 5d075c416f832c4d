//! The simulation world and its frame loop.
//!
//! [`World`] owns everything the game simulates: the entity store, the
//! active level, the pinned player and camera handles, the configuration and
//! the seeds. [`World::tick`] advances it by one variable-length frame by
//! running every pass of [`PIPELINE`](crate::pipeline::PIPELINE) in order.
//!
//! # Example
//!
//! ```
//! use joeyhop_engine::prelude::*;
//!
//! let mut world = World::new(GameConfig::default(), BaseSeed(7));
//! let input = InputState::default();
//! for _ in 0..10 {
//!     world.tick(1.0 / 60.0, &input);
//! }
//! assert_eq!(world.frame_count(), 10);
//! assert!(world.player().is_some());
//! ```

use std::time::{Duration, Instant};

use joeyhop_ecs::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::input::InputState;
use crate::level::Level;
use crate::pipeline::{Frame, PIPELINE};
use crate::prng::BaseSeed;

// ---------------------------------------------------------------------------
// FrameDiagnostics
// ---------------------------------------------------------------------------

/// Timing and bookkeeping for the last frame that ran.
#[derive(Debug, Clone, Default)]
pub struct FrameDiagnostics {
    /// Wall-clock time per pass, in execution order.
    pub pass_times: Vec<(&'static str, Duration)>,
    /// Total time for the frame.
    pub total_time: Duration,
    /// Entities alive before the frame.
    pub entities_before: usize,
    /// Entities alive after compaction.
    pub entities_after: usize,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The whole simulated game state.
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) store: EntityStore,
    pub(crate) level: Level,
    pub(crate) player: EntityId,
    pub(crate) camera: EntityId,
    pub(crate) config: GameConfig,
    pub(crate) seed: BaseSeed,
    /// Cosmetic randomness: particle directions, sizes and colours.
    pub(crate) rng: Pcg32,
    /// Simulated milliseconds since the world was created. Drives the
    /// player's bounce instead of the host clock.
    pub(crate) elapsed_ms: f64,
    pub(crate) game_over: bool,
    frame_counter: u64,
    last_diagnostics: FrameDiagnostics,
}

impl World {
    /// A fresh world on the first level, with the player and camera spawned
    /// and pinned. The level is populated on the first tick.
    pub fn new(config: GameConfig, seed: BaseSeed) -> Self {
        let mut store = EntityStore::new();

        let camera = store.spawn_pinned(
            Entity {
                view: Some(View {
                    size: config.camera.view_size,
                    speed: config.camera.speed,
                }),
                ..Entity::new()
            }
            .with_position(Vec2::ZERO)
            .with_velocity(Vec2::ZERO),
        );

        let player_config = &config.player;
        let player = store.spawn_pinned(
            Entity {
                player: Some(PlayerState {
                    score: 0,
                    lives: player_config.initial_lives,
                    bounce: 0.0,
                    acceleration: player_config.acceleration,
                    max_speed: player_config.max_speed,
                    idle_ms: 0.0,
                }),
                ..Entity::new()
            }
            .with_sprite(Sprite::new(SpriteImage::Player).animated(2, None))
            .with_lifetime(None)
            .with_position(Vec2::ZERO)
            .with_velocity(Vec2::ZERO)
            .with_damping(player_config.damping)
            .with_gravity(0.0)
            .with_rotation(0.0, Some(0.0))
            .with_collision(Collision::circle(player_config.collision_radius)),
        );

        let level = Level::new(&config.level);
        Self {
            store,
            level,
            player,
            camera,
            rng: Pcg32::seed_from_u64(seed.0),
            config,
            seed,
            elapsed_ms: 0.0,
            game_over: false,
            frame_counter: 0,
            last_diagnostics: FrameDiagnostics::default(),
        }
    }

    /// Rebuild the world from scratch with the same configuration and seed.
    pub fn reset(&mut self) {
        info!(seed = self.seed.0, "resetting world");
        *self = World::new(self.config.clone(), self.seed);
    }

    /// Advance the simulation by `delta_seconds` and return what happened.
    ///
    /// Does nothing while paused or after game over. Negative or non-finite
    /// deltas are treated as zero.
    pub fn tick(&mut self, delta_seconds: f64, input: &InputState) -> Vec<GameEvent> {
        if input.pause || self.game_over {
            return Vec::new();
        }

        let delta = if delta_seconds.is_finite() && delta_seconds >= 0.0 {
            delta_seconds
        } else {
            warn!(delta_seconds, "invalid frame delta; using zero");
            0.0
        };

        let tick_start = Instant::now();
        let entities_before = self.store.len();
        let mut frame = Frame::new(delta, *input);
        self.elapsed_ms += frame.delta_ms;

        let mut pass_times = Vec::with_capacity(PIPELINE.len());
        for &(name, pass) in PIPELINE {
            let pass_start = Instant::now();
            pass(self, &mut frame);
            pass_times.push((name, pass_start.elapsed()));
        }

        self.frame_counter += 1;
        self.last_diagnostics = FrameDiagnostics {
            pass_times,
            total_time: tick_start.elapsed(),
            entities_before,
            entities_after: self.store.len(),
        };
        debug!(
            frame = self.frame_counter,
            entities = self.store.len(),
            events = frame.events.len(),
            "frame complete"
        );

        frame.events
    }

    // -- accessors ----------------------------------------------------------

    /// The entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable access to the entity store, for hosts and tests that stage
    /// entities directly.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// The active level.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable access to the active level.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn camera_id(&self) -> EntityId {
        self.camera
    }

    /// The player entity.
    pub fn player(&self) -> Option<&Entity> {
        self.store.get(self.player)
    }

    /// Mutable access to the player entity.
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.store.get_mut(self.player)
    }

    /// The camera entity.
    pub fn camera(&self) -> Option<&Entity> {
        self.store.get(self.camera)
    }

    /// The player's gameplay state.
    pub fn player_state(&self) -> Option<PlayerState> {
        self.player().and_then(|p| p.player)
    }

    /// Current score, zero if the player somehow has no state.
    pub fn score(&self) -> u32 {
        self.player_state().map_or(0, |s| s.score)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> BaseSeed {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Simulated milliseconds since creation.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Number of frames that actually ran.
    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Diagnostics from the most recent frame.
    pub fn last_diagnostics(&self) -> &FrameDiagnostics {
        &self.last_diagnostics
    }
}

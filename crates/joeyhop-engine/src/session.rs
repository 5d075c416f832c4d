//! The outer frame loop glue.
//!
//! [`Game`] sits between a host and the [`World`]: it folds host input into
//! [`InputState`], turns host timestamps into frame deltas, ticks the world,
//! and hands each frame's events to the audio sink and the high-score store.
//! Collaborator failures are logged, never propagated.

use std::time::Instant;

use tracing::{info, warn};

use crate::audio::{AudioSink, NullAudio};
use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::highscore::{HighScoreStore, MemoryHighScore};
use crate::input::{InputEvent, InputState};
use crate::prng::BaseSeed;
use crate::world::World;

/// A playable session.
pub struct Game<A = NullAudio, H = MemoryHighScore> {
    world: World,
    input: InputState,
    clock: FrameClock,
    audio: A,
    high_scores: H,
    high_score: u32,
    was_paused: bool,
}

impl Game {
    /// A session with silent audio and an in-memory high score.
    pub fn headless(config: GameConfig, seed: BaseSeed) -> Self {
        Game::new(World::new(config, seed), NullAudio, MemoryHighScore::new())
    }
}

impl<A: AudioSink, H: HighScoreStore> Game<A, H> {
    /// Wrap `world`, reading the stored high score once up front.
    pub fn new(world: World, audio: A, high_scores: H) -> Self {
        let high_score = high_scores.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read high score; starting from zero");
            0
        });
        Self {
            world,
            input: InputState::default(),
            clock: FrameClock::new(),
            audio,
            high_scores,
            high_score,
            was_paused: false,
        }
    }

    /// Feed one host input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle(event);
    }

    /// Run one host frame stamped `now`.
    ///
    /// While paused the clock is held; the first frame after a pause starts
    /// timing afresh so paused wall time is never simulated. After game over,
    /// holding action restarts.
    pub fn frame(&mut self, now: Instant) -> Vec<GameEvent> {
        if self.input.pause {
            self.was_paused = true;
            return Vec::new();
        }
        if self.was_paused {
            self.clock.resume(now);
            self.was_paused = false;
        }
        let delta = self.clock.sample(now);

        if self.world.is_game_over() {
            if self.input.action {
                self.restart();
            }
            return Vec::new();
        }

        self.advance(delta.as_secs_f64())
    }

    /// Tick the world by `delta_seconds` and dispatch the resulting events.
    pub fn advance(&mut self, delta_seconds: f64) -> Vec<GameEvent> {
        let events = self.world.tick(delta_seconds, &self.input);
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if let Some(cue) = event.sound_cue() {
            self.audio.play(cue);
        }
        if let Some(score) = event.final_score() {
            self.record_score(score);
        }
    }

    fn record_score(&mut self, score: u32) {
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        match self.high_scores.save(score) {
            Ok(()) => info!(score, "new high score"),
            Err(e) => warn!(error = %e, score, "could not save high score"),
        }
    }

    /// Start over on the first level, keeping the high score.
    pub fn restart(&mut self) {
        info!(high_score = self.high_score, "restarting game");
        self.world.reset();
        self.input.action = false;
        self.clock.reset();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn high_scores(&self) -> &H {
        &self.high_scores
    }
}

//! Level state and procedural layout.
//!
//! A level is a stairwell `2 * width` wide and `height` rows tall. Each row's
//! decorations come from an independent [`SeededRandom`](crate::prng::SeededRandom)
//! stream keyed by the row index, so the same seed always rebuilds the same
//! stairs.

use joeyhop_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::prng::BaseSeed;

/// Collider radius of bushes and joeys.
pub const DECORATION_RADIUS: f64 = 0.3;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// The one active level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level counter shown on the HUD.
    pub day: u32,
    /// Half-width of the stairwell; walls sit at `±width`.
    pub width: f64,
    /// Number of stair rows.
    pub height: u32,
    /// Reserved for a sideways push; no pass reads it yet.
    pub wind: f64,
    /// Milliseconds since the level was populated.
    pub age: f64,
    /// Milliseconds until the next level begins, counted from population.
    /// `None` while the level is still being climbed.
    pub lifetime: Option<f64>,
    /// Set when the next frame must (re)populate the stairwell.
    pub needs_population: bool,
}

impl Level {
    /// The first level described by `config`.
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            day: config.initial_day,
            width: config.width,
            height: config.initial_height,
            wind: 0.0,
            age: 0.0,
            lifetime: None,
            needs_population: true,
        }
    }

    /// Whether the level is still waiting to be completed.
    pub fn is_open(&self) -> bool {
        self.lifetime.is_none()
    }

    /// The y coordinate the player must pass to complete the level.
    pub fn finish_line(&self) -> f64 {
        self.height as f64 + 0.5
    }

    /// Whether the level's countdown has run out.
    pub fn is_expired(&self) -> bool {
        self.lifetime.is_some_and(|lifetime| self.age > lifetime)
    }

    /// Move on to the next, taller level.
    pub fn advance(&mut self, height_growth: u32) {
        self.day += 1;
        self.height += height_growth;
        self.needs_population = true;
    }
}

// ---------------------------------------------------------------------------
// Layout generation
// ---------------------------------------------------------------------------

/// A bush the player should avoid.
pub fn hazard(position: Vec2) -> Entity {
    Entity::new()
        .with_sprite(Sprite::new(SpriteImage::Bush))
        .with_lifetime(None)
        .with_position(position)
        .with_collision(Collision::circle(DECORATION_RADIUS))
}

/// A joey waiting to be carried up the stairs.
pub fn joey(position: Vec2) -> Entity {
    Entity::new()
        .with_sprite(Sprite::new(SpriteImage::Joey).animated(2, Some(300.0)))
        .with_lifetime(None)
        .with_position(position)
        .with_velocity(Vec2::ZERO)
        .with_rotation(0.0, None)
        .with_collision(Collision {
            radius: DECORATION_RADIUS,
            attach: true,
        })
}

/// The marker drawn past the last stair.
pub fn goal(level: &Level) -> Entity {
    Entity::new()
        .with_sprite(Sprite::new(SpriteImage::Goal).scaled(3.0))
        .with_position(Vec2::new(0.0, level.height as f64 + 1.0))
}

/// Build every decoration of `level`, plus its goal marker, in spawn order.
pub fn layout(level: &Level, seed: BaseSeed, config: &LevelConfig) -> Vec<Entity> {
    let mut entities = Vec::new();

    for row in 1..level.height {
        let mut random = seed.stream(row as i64);
        let y = row as f64;

        if random.next_unit() < config.hazard_chance {
            let x = random.range(-1.0, 1.0) * level.width;
            entities.push(hazard(Vec2::new(x, y + 0.2)));
        }

        if config.riders_enabled() && random.next_unit() < config.joey_chance {
            let x = random.range(-1.0, 1.0) * level.width;
            entities.push(joey(Vec2::new(x, y + 0.6)));
        }
    }

    entities.push(goal(level));
    entities
}

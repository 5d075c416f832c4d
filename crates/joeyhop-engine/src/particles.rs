//! Particle recipes.
//!
//! Each recipe builds one short-lived particle entity from a handful of uniform
//! draws. Callers own the RNG so whole sessions stay reproducible.

use std::f64::consts::PI;

use joeyhop_ecs::prelude::*;
use rand::Rng;

use crate::palette;

/// Offset from the player's centre to its feet.
pub const FEET_OFFSET: Vec2 = Vec2::new(0.0, 0.6);

/// Dust kicked up while hopping.
pub fn bounce_dust(player_position: Vec2, rng: &mut impl Rng) -> Entity {
    let direction = Vec2::UP.rotate((rng.gen::<f64>() - 0.5) * 3.0);
    let color = palette::pick(palette::DUST, rng.gen());
    let size = rng.gen::<f64>() * 0.1 + 0.05;
    let lifetime = rng.gen::<f64>() * 200.0 + 200.0;
    let spread = rng.gen::<f64>() * 0.5;
    let speed = rng.gen::<f64>() * 1.2 + 0.2;

    Entity::new()
        .with_particle(color, size)
        .with_lifetime(Some(lifetime))
        .with_position(player_position + FEET_OFFSET + direction * spread)
        .with_velocity(direction * speed)
}

/// Leaves thrown out of a trampled bush.
pub fn hazard_debris(hazard_position: Vec2, rng: &mut impl Rng) -> Entity {
    let direction = Vec2::DOWN.rotate(rng.gen::<f64>() * 2.0 * PI);
    let color = palette::pick(palette::LEAVES, rng.gen());
    let size = rng.gen::<f64>() * 0.1 + 0.1;
    let lifetime = rng.gen::<f64>() * 400.0 + 600.0;
    let spread = rng.gen::<f64>() * 0.3;
    let speed = rng.gen::<f64>() * 1.5 + 0.2;

    Entity::new()
        .with_particle(color, size)
        .with_lifetime(Some(lifetime))
        .with_position(hazard_position + direction * spread)
        .with_velocity(direction * speed)
        .with_damping(2.0)
        .with_gravity(0.8)
}

/// Confetti fountain on reaching the top of the stairs.
pub fn celebration(player_position: Vec2, rng: &mut impl Rng) -> Entity {
    let direction = Vec2::UP.rotate((rng.gen::<f64>() - 0.5) * 3.0);
    let color = palette::pick(palette::DUST, rng.gen());
    let size = rng.gen::<f64>() * 0.15 + 0.05;
    let lifetime = rng.gen::<f64>() * 400.0 + 600.0;
    let spread = rng.gen::<f64>() * 0.5;
    let speed = rng.gen::<f64>() * 1.2 + 0.6;

    Entity::new()
        .with_particle(color, size)
        .with_lifetime(Some(lifetime))
        .with_position(player_position + FEET_OFFSET + direction * spread)
        .with_velocity(direction * speed)
        .with_gravity(0.8)
}

/// How many dust particles a frame of `delta_ms` emits at the given bounce.
///
/// One particle per whole unit of `delta_ms * bounce * 0.2`, not counting the
/// first.
pub fn dust_count(delta_ms: f64, bounce: f64) -> usize {
    let budget = delta_ms * bounce * 0.2;
    if !(budget > 1.0) {
        return 0;
    }
    budget.ceil() as usize - 1
}

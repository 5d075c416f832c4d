//! The per-frame update pipeline.
//!
//! [`PIPELINE`] is the fixed, ordered list of passes that
//! [`World::tick`](crate::world::World::tick) runs. Later passes observe the
//! output of earlier ones within the same frame, so the order is part of the
//! game's behaviour:
//!
//! 1. level population (first frame of a level only)
//! 2. camera pursuit
//! 3. player steering
//! 4. player bounce and dust
//! 5. player/collider resolution ([`collision`](crate::collision))
//! 6. wall containment
//! 7. gravity
//! 8. velocity integration
//! 9. springs
//! 10. rotation and orbiting
//! 11. damping
//! 12. idle score penalty
//! 13. level completion
//! 14. level countdown and advance
//! 15. game over
//! 16. aging
//! 17. lifetime expiry
//! 18. compaction
//!
//! The physics passes are also exposed as plain functions over an
//! [`EntityStore`] so they can be exercised in isolation. Each one is a no-op
//! on entities missing the components it needs.

use std::f64::consts::{FRAC_PI_2, TAU};

use joeyhop_ecs::prelude::*;
use tracing::{debug, info};

use crate::collision;
use crate::event::GameEvent;
use crate::input::InputState;
use crate::level;
use crate::particles;
use crate::world::World;

// ---------------------------------------------------------------------------
// Frame context
// ---------------------------------------------------------------------------

/// Everything a pass needs to know about the current frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Seconds since the previous frame; scales physics.
    pub delta: f64,
    /// Milliseconds since the previous frame; scales ages and lifetimes.
    pub delta_ms: f64,
    /// Input flags sampled for this frame.
    pub input: InputState,
    /// Events produced so far this frame.
    pub events: Vec<GameEvent>,
}

impl Frame {
    /// A frame of `delta` seconds with the given input.
    pub fn new(delta: f64, input: InputState) -> Self {
        Self {
            delta,
            delta_ms: delta * 1000.0,
            input,
            events: Vec::new(),
        }
    }
}

/// One named step of the pipeline.
pub type PassFn = fn(&mut World, &mut Frame);

/// Every pass, in execution order.
pub const PIPELINE: &[(&str, PassFn)] = &[
    ("populate_level", populate_level),
    ("camera_pursuit", camera_pursuit),
    ("steer_player", steer_player),
    ("bounce_player", bounce_player),
    ("resolve_collisions", resolve_collisions),
    ("contain_walls", walls_pass),
    ("gravity", gravity_pass),
    ("velocity", velocity_pass),
    ("springs", spring_pass),
    ("rotation", rotation_pass),
    ("damping", damping_pass),
    ("idle_penalty", idle_penalty),
    ("level_completion", level_completion),
    ("level_countdown", level_countdown),
    ("game_over", game_over),
    ("aging", aging),
    ("expire", expire_pass),
    ("compact", compact_pass),
];

// ---------------------------------------------------------------------------
// Gameplay passes
// ---------------------------------------------------------------------------

/// Reset the player and camera and lay out a fresh stairwell, once per level.
pub fn populate_level(world: &mut World, _frame: &mut Frame) {
    if !world.level.needs_population {
        return;
    }

    let player_config = world.config.player.clone();
    if let Some(player) = world.store.get_mut(world.player) {
        if let Some(sprite) = player.sprite.as_mut() {
            if let Some(animation) = sprite.animation.as_mut() {
                animation.delay_ms = Some(player_config.animation_delay_ms);
            }
        }
        player.age = Some(0.0);
        player.gravity = Some(player_config.gravity);
        player.rotation = Some(0.0);
        player.rotational_velocity = Some(player_config.spin);
        player.position = Some(Vec2::new(0.0, -0.5));
        if let Some(state) = player.player.as_mut() {
            state.idle_ms = 0.0;
        }
    }
    if let Some(camera) = world.store.get_mut(world.camera) {
        camera.position = Some(Vec2::new(0.0, -2.0));
    }

    let decorations = level::layout(&world.level, world.seed, &world.config.level);
    let spawned = world.store.spawn_batch(decorations);

    world.level.age = 0.0;
    world.level.lifetime = None;
    world.level.needs_population = false;

    info!(
        day = world.level.day,
        height = world.level.height,
        spawned,
        "populated level"
    );
}

/// Steer the camera toward a point just ahead of the player.
///
/// Pure proportional control on position error plus a velocity lead, so the
/// camera always trails slightly.
pub fn camera_pursuit(world: &mut World, _frame: &mut Frame) {
    let Some((player_position, player_velocity)) = world
        .store
        .get(world.player)
        .and_then(|p| Some((p.position?, p.velocity.unwrap_or(Vec2::ZERO))))
    else {
        return;
    };
    let lead = world.config.camera.lead;

    let Some(camera) = world.store.get_mut(world.camera) else {
        return;
    };
    let (Some(position), Some(view)) = (camera.position, camera.view) else {
        return;
    };
    let error = player_position - position;
    camera.velocity = Some((player_velocity * lead + error) * view.speed);
}

/// Accelerate the player sideways from input, or let it coast to a stop.
pub fn steer_player(world: &mut World, frame: &mut Frame) {
    let steering = frame.input.steering();
    let delta = frame.delta;
    let Some(player) = world.store.get_mut(world.player) else {
        return;
    };
    let (Some(velocity), Some(state)) = (player.velocity.as_mut(), player.player) else {
        return;
    };

    if steering == 0.0 {
        velocity.x *= 1.0 - delta;
    }
    velocity.x += steering * state.acceleration * delta;
    velocity.x = velocity.x.max(-state.max_speed).min(state.max_speed);
}

/// Update the cosmetic hop height and kick up dust proportional to it.
///
/// The hop phase follows the world's simulated clock (`elapsed_ms`), not the
/// host's wall clock, so a replay with the same inputs hops identically.
pub fn bounce_player(world: &mut World, frame: &mut Frame) {
    let elapsed_ms = world.elapsed_ms;
    let Some(player) = world.store.get_mut(world.player) else {
        return;
    };
    let animating = player
        .sprite
        .and_then(|s| s.animation)
        .is_some_and(|a| a.delay_ms.is_some());
    let bounce = if animating {
        1.0 - (elapsed_ms * 0.003).sin().abs()
    } else {
        0.0
    };
    let Some(state) = player.player.as_mut() else {
        return;
    };
    state.bounce = bounce;
    let Some(position) = player.position else {
        return;
    };

    let count = particles::dust_count(frame.delta_ms, bounce);
    for _ in 0..count {
        let dust = particles::bounce_dust(position, &mut world.rng);
        world.store.spawn(dust);
    }
}

fn resolve_collisions(world: &mut World, frame: &mut Frame) {
    collision::resolve(world, &mut frame.events);
}

/// Dock a point every interval the player spends climbing.
pub fn idle_penalty(world: &mut World, _frame: &mut Frame) {
    if !world.level.is_open() {
        return;
    }
    let scoring = &world.config.scoring;
    let Some(state) = world
        .store
        .get_mut(world.player)
        .and_then(|p| p.player.as_mut())
    else {
        return;
    };
    if state.idle_ms > scoring.idle_interval_ms {
        state.score = state.score.saturating_sub(scoring.idle_penalty);
        state.idle_ms = 0.0;
    }
}

/// Finish the level once the player passes the last stair.
pub fn level_completion(world: &mut World, frame: &mut Frame) {
    if !world.level.is_open() {
        return;
    }
    let finish_line = world.level.finish_line();
    let bonus = world.config.scoring.completion_bonus;
    let Some(player) = world.store.get_mut(world.player) else {
        return;
    };
    let Some(position) = player.position else {
        return;
    };
    if position.y <= finish_line {
        return;
    }

    if let Some(animation) = player.sprite.as_mut().and_then(|s| s.animation.as_mut()) {
        animation.delay_ms = None;
    }
    player.velocity = Some(Vec2::ZERO);
    player.gravity = Some(0.0);
    player.rotation = Some(FRAC_PI_2);
    player.rotational_velocity = Some(0.0);
    let score = match player.player.as_mut() {
        Some(state) => {
            state.score += bonus;
            state.score
        }
        None => 0,
    };

    world.level.lifetime = Some(world.level.age + world.config.level.completion_linger_ms);

    for _ in 0..world.config.scoring.completion_burst {
        let confetti = particles::celebration(position, &mut world.rng);
        world.store.spawn(confetti);
    }

    info!(day = world.level.day, score, "level completed");
    frame.events.push(GameEvent::LevelCompleted {
        day: world.level.day,
        score,
    });
}

/// Age the level and roll over to the next one when its countdown ends.
pub fn level_countdown(world: &mut World, frame: &mut Frame) {
    world.level.age += frame.delta_ms;
    if !world.level.is_expired() {
        return;
    }

    world.level.advance(world.config.level.height_growth);
    let cleared = world
        .store
        .tombstone_all_except(&[world.player, world.camera]);

    info!(
        day = world.level.day,
        height = world.level.height,
        cleared,
        "advanced to next level"
    );
    frame.events.push(GameEvent::LevelAdvanced {
        day: world.level.day,
    });
}

/// End the game when lives run out, if lives are in play at all.
pub fn game_over(world: &mut World, frame: &mut Frame) {
    if world.game_over || !world.config.lives_enabled() {
        return;
    }
    let Some(state) = world.store.get(world.player).and_then(|p| p.player) else {
        return;
    };
    if state.lives > 0 {
        return;
    }

    world.game_over = true;
    if let Some(player) = world.store.get_mut(world.player) {
        player.velocity = Some(Vec2::ZERO);
        player.gravity = Some(0.0);
        player.rotational_velocity = Some(0.0);
        if let Some(animation) = player.sprite.as_mut().and_then(|s| s.animation.as_mut()) {
            animation.delay_ms = None;
        }
    }
    let cleared = world
        .store
        .tombstone_all_except(&[world.player, world.camera]);

    info!(score = state.score, cleared, "game over");
    frame.events.push(GameEvent::GameOver { score: state.score });
}

/// Advance every age, and the player's idle counter.
pub fn aging(world: &mut World, frame: &mut Frame) {
    age_entities(&mut world.store, frame.delta_ms);
    if let Some(state) = world
        .store
        .get_mut(world.player)
        .and_then(|p| p.player.as_mut())
    {
        state.idle_ms += frame.delta_ms;
    }
}

// ---------------------------------------------------------------------------
// Physics passes
// ---------------------------------------------------------------------------

fn walls_pass(world: &mut World, _frame: &mut Frame) {
    contain_walls(&mut world.store, world.level.width);
}

fn gravity_pass(world: &mut World, frame: &mut Frame) {
    apply_gravity(&mut world.store, frame.delta);
}

fn velocity_pass(world: &mut World, frame: &mut Frame) {
    integrate_velocity(&mut world.store, frame.delta);
}

fn spring_pass(world: &mut World, _frame: &mut Frame) {
    apply_springs(&mut world.store);
}

fn rotation_pass(world: &mut World, frame: &mut Frame) {
    integrate_rotation(&mut world.store, frame.delta);
}

fn damping_pass(world: &mut World, frame: &mut Frame) {
    apply_damping(&mut world.store, frame.delta);
}

fn expire_pass(world: &mut World, _frame: &mut Frame) {
    expire_lifetimes(&mut world.store);
}

fn compact_pass(world: &mut World, _frame: &mut Frame) {
    world.store.compact();
}


/// Clamp colliders into `[-width, width]`, stopping their sideways motion.
pub fn contain_walls(store: &mut EntityStore, width: f64) {
    for (_, entity) in store.query_mut(ComponentKind::Collision) {
        let Some(position) = entity.position.as_mut() else {
            continue;
        };
        if position.x >= -width && position.x <= width {
            continue;
        }
        position.x = position.x.max(-width).min(width);
        if let Some(velocity) = entity.velocity.as_mut() {
            velocity.x = 0.0;
        }
    }
}

/// Accelerate entities with a gravity component downward.
pub fn apply_gravity(store: &mut EntityStore, delta: f64) {
    for (_, entity) in store.query_mut(ComponentKind::Gravity) {
        if let (Some(velocity), Some(gravity)) = (entity.velocity.as_mut(), entity.gravity) {
            velocity.y += gravity * delta;
        }
    }
}

/// Move entities by their velocity, or by their anchor's when attached.
pub fn integrate_velocity(store: &mut EntityStore, delta: f64) {
    let anchor_velocities: Vec<Option<Vec2>> = store
        .iter()
        .map(|(_, e)| store.get(e.attached_to?)?.velocity)
        .collect();

    for ((_, entity), anchor_velocity) in store.iter_mut().zip(anchor_velocities) {
        if let (Some(position), Some(velocity)) = (entity.position.as_mut(), entity.velocity) {
            *position += anchor_velocity.unwrap_or(velocity) * delta;
        }
    }
}

/// Pull spring entities toward their origin. Undamped and not scaled by the
/// frame delta; stiffness must stay small.
pub fn apply_springs(store: &mut EntityStore) {
    for (_, entity) in store.query_mut(ComponentKind::Spring) {
        if let (Some(velocity), Some(position), Some(spring)) =
            (entity.velocity.as_mut(), entity.position, entity.spring)
        {
            *velocity += (spring.origin - position) * spring.stiffness;
        }
    }
}

/// Spin entities by their rotational velocity, wrapped into `[0, 2π)`.
///
/// Attached entities ignore their own spin and instead orbit their anchor by
/// the anchor's angular step this frame.
pub fn integrate_rotation(store: &mut EntityStore, delta: f64) {
    let orbits: Vec<Option<(Vec2, f64)>> = store
        .iter()
        .map(|(_, e)| {
            let anchor = store.get(e.attached_to?)?;
            Some((anchor.position?, anchor.rotational_velocity.unwrap_or(0.0) * delta))
        })
        .collect();

    for ((_, entity), orbit) in store.iter_mut().zip(orbits) {
        match orbit {
            Some((pivot, step)) => {
                if let Some(position) = entity.position.as_mut() {
                    *position = position.rotate_about(pivot, step);
                }
                if let Some(rotation) = entity.rotation.as_mut() {
                    *rotation = wrap_angle(*rotation + step);
                }
            }
            None => {
                if let (Some(rotation), Some(spin)) =
                    (entity.rotation.as_mut(), entity.rotational_velocity)
                {
                    *rotation = wrap_angle(*rotation + spin * delta);
                }
            }
        }
    }
}

/// Exponentially decay linear and rotational velocity.
pub fn apply_damping(store: &mut EntityStore, delta: f64) {
    for (_, entity) in store.iter_mut() {
        if let (Some(velocity), Some(damping)) = (entity.velocity.as_mut(), entity.damping) {
            *velocity = *velocity * (1.0 - damping * delta);
        }
        if let (Some(spin), Some(damping)) = (
            entity.rotational_velocity.as_mut(),
            entity.rotational_damping,
        ) {
            *spin *= 1.0 - damping * delta;
        }
    }
}

/// Advance the age of every entity that has one.
pub fn age_entities(store: &mut EntityStore, delta_ms: f64) {
    for (_, entity) in store.query_mut(ComponentKind::Age) {
        if let Some(age) = entity.age.as_mut() {
            *age += delta_ms;
        }
    }
}

/// Tombstone entities that outlived a finite lifetime. Returns how many.
pub fn expire_lifetimes(store: &mut EntityStore) -> usize {
    let mut expired = 0;
    for (_, entity) in store.query_mut(ComponentKind::Lifetime) {
        if !entity.destroy && entity.is_expired() {
            entity.destroy = true;
            expired += 1;
        }
    }
    if expired > 0 {
        debug!(expired, "lifetimes ran out");
    }
    expired
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

//! Player-versus-collider resolution.
//!
//! Every collider is tested against the player as a true circle-circle
//! overlap. Touching a bush tramples it; touching a collider flagged
//! `attach` picks it up as a rider. Particle bursts are queued while the
//! candidates are walked and spawned once the walk is done, so new particles
//! are never themselves tested this frame.

use joeyhop_ecs::prelude::*;
use tracing::debug;

use crate::event::GameEvent;
use crate::particles;
use crate::world::World;

/// Whether two circles touch. Tangent circles count as touching.
pub fn overlaps(a: Vec2, radius_a: f64, b: Vec2, radius_b: f64) -> bool {
    a.distance(b) <= radius_a + radius_b
}

/// Resolve every player contact for this frame, appending to `events`.
pub fn resolve(world: &mut World, events: &mut Vec<GameEvent>) {
    let player_id = world.player;
    let scoring = world.config.scoring.clone();
    let mut bursts: Vec<Vec2> = Vec::new();

    for candidate in world.store.matching(ComponentKind::Collision) {
        if candidate == player_id {
            continue;
        }
        let Some((player, other)) = world.store.get_pair_mut(player_id, candidate) else {
            continue;
        };
        let (Some(player_position), Some(player_collision)) = (player.position, player.collision)
        else {
            return;
        };
        let (Some(position), Some(collision)) = (other.position, other.collision) else {
            continue;
        };
        if !overlaps(
            player_position,
            player_collision.radius,
            position,
            collision.radius,
        ) {
            continue;
        }
        let Some(state) = player.player.as_mut() else {
            return;
        };

        if collision.attach {
            other.attached_to = Some(player_id);
            other.collision = None;
            state.score += scoring.rescue_bonus;
            debug!(entity = %candidate, score = state.score, "joey rescued");
            events.push(GameEvent::Rescued {
                entity: candidate,
                score: state.score,
            });
            continue;
        }

        if other.sprite.map(|s| s.image) == Some(SpriteImage::Bush) {
            state.score = state.score.saturating_sub(scoring.hazard_penalty);
            state.lives = state.lives.saturating_sub(scoring.lives_per_hazard);
            if let Some(velocity) = player.velocity.as_mut() {
                *velocity = *velocity * scoring.hazard_slowdown;
            }
            other.sprite = Some(Sprite::new(SpriteImage::BushDead).animated(2, Some(400.0)));
            bursts.push(position);

            debug!(
                entity = %candidate,
                score = state.score,
                lives = state.lives,
                "bush trampled"
            );
            events.push(GameEvent::HazardHit {
                entity: candidate,
                score: state.score,
            });
        }
    }

    for origin in bursts {
        for _ in 0..scoring.hazard_burst {
            let leaf = particles::hazard_debris(origin, &mut world.rng);
            world.store.spawn(leaf);
        }
    }
}

//! The closed component set and the [`Entity`] record that carries it.
//!
//! An entity is nothing but a bag of optional component slots. Systems decide
//! whether an entity takes part in a pass purely by which slots are filled,
//! tested through [`Entity::has`] with a [`ComponentKind`].

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::vec2::Vec2;

// ---------------------------------------------------------------------------
// Render descriptors
// ---------------------------------------------------------------------------

/// Which image a sprite draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteImage {
    Player,
    Bush,
    BushDead,
    Goal,
    Joey,
}

impl SpriteImage {
    /// The asset identifier the renderer looks the image up by.
    pub fn asset_id(self) -> &'static str {
        match self {
            SpriteImage::Player => "player",
            SpriteImage::Bush => "bush",
            SpriteImage::BushDead => "bush_dead",
            SpriteImage::Goal => "goal",
            SpriteImage::Joey => "joey",
        }
    }
}

/// Frame-strip animation. A `delay_ms` of `None` holds the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Number of frames laid out horizontally in the image.
    pub frames: u32,
    /// Milliseconds per frame, or `None` when the animation is stopped.
    pub delay_ms: Option<f64>,
}

/// Render descriptor for an image-backed entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub image: SpriteImage,
    /// Size multiplier in world units; `None` draws at 1x1.
    pub scale: Option<f64>,
    pub animation: Option<Animation>,
}

impl Sprite {
    /// A static, unscaled sprite.
    pub fn new(image: SpriteImage) -> Self {
        Self {
            image,
            scale: None,
            animation: None,
        }
    }

    /// Builder: set the draw scale.
    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Builder: attach a frame-strip animation.
    pub fn animated(mut self, frames: u32, delay_ms: Option<f64>) -> Self {
        self.animation = Some(Animation { frames, delay_ms });
        self
    }
}

/// A small coloured square that fades out over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Packed `0xRRGGBB` colour.
    pub color: u32,
    /// Edge length in world units.
    pub size: f64,
}

// ---------------------------------------------------------------------------
// Physics components
// ---------------------------------------------------------------------------

/// Circular collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub radius: f64,
    /// Touching this collider attaches it to the player.
    pub attach: bool,
}

impl Collision {
    /// A plain (non-attaching) collider.
    pub fn circle(radius: f64) -> Self {
        Self {
            radius,
            attach: false,
        }
    }
}

/// Undamped linear restoring force toward `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub origin: Vec2,
    pub stiffness: f64,
}

// ---------------------------------------------------------------------------
// Gameplay components
// ---------------------------------------------------------------------------

/// Player-only gameplay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub score: u32,
    pub lives: u32,
    /// Current cosmetic bounce height in `[0, 1]`.
    pub bounce: f64,
    /// Horizontal acceleration from steering, units/s².
    pub acceleration: f64,
    /// Horizontal speed clamp, units/s.
    pub max_speed: f64,
    /// Milliseconds since the last idle score penalty.
    pub idle_ms: f64,
}

/// Camera view parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Edge length of the square view, in world units.
    pub size: f64,
    /// Pursuit gain applied to the blended error.
    pub speed: f64,
}

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// Names one slot of [`Entity`]; used to filter store iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Velocity,
    Sprite,
    Collision,
    Gravity,
    Damping,
    RotationalDamping,
    Spring,
    Rotation,
    RotationalVelocity,
    Age,
    Lifetime,
    Particle,
    Attachment,
    Player,
    View,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A heterogeneous game object: any subset of the components below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Option<Vec2>,
    pub velocity: Option<Vec2>,
    pub sprite: Option<Sprite>,
    pub collision: Option<Collision>,
    /// Downward acceleration, units/s².
    pub gravity: Option<f64>,
    /// Exponential velocity decay rate, 1/s.
    pub damping: Option<f64>,
    /// Exponential rotational velocity decay rate, 1/s.
    pub rotational_damping: Option<f64>,
    pub spring: Option<Spring>,
    /// Radians in `[0, 2π)`.
    pub rotation: Option<f64>,
    /// Radians per second.
    pub rotational_velocity: Option<f64>,
    /// Milliseconds since creation.
    pub age: Option<f64>,
    /// Milliseconds the entity may live. `None` is immortal; a non-positive
    /// value is already expired.
    pub lifetime: Option<f64>,
    pub particle: Option<Particle>,
    /// Weak reference to the entity whose motion drives this one.
    pub attached_to: Option<EntityId>,
    pub player: Option<PlayerState>,
    pub view: Option<View>,
    /// Tombstone; the entity is dropped at the next compaction.
    pub destroy: bool,
}

impl Entity {
    /// An entity with no components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given component slot is filled.
    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Position => self.position.is_some(),
            ComponentKind::Velocity => self.velocity.is_some(),
            ComponentKind::Sprite => self.sprite.is_some(),
            ComponentKind::Collision => self.collision.is_some(),
            ComponentKind::Gravity => self.gravity.is_some(),
            ComponentKind::Damping => self.damping.is_some(),
            ComponentKind::RotationalDamping => self.rotational_damping.is_some(),
            ComponentKind::Spring => self.spring.is_some(),
            ComponentKind::Rotation => self.rotation.is_some(),
            ComponentKind::RotationalVelocity => self.rotational_velocity.is_some(),
            ComponentKind::Age => self.age.is_some(),
            ComponentKind::Lifetime => self.lifetime.is_some(),
            ComponentKind::Particle => self.particle.is_some(),
            ComponentKind::Attachment => self.attached_to.is_some(),
            ComponentKind::Player => self.player.is_some(),
            ComponentKind::View => self.view.is_some(),
        }
    }

    /// Whether the entity has outlived a finite lifetime.
    ///
    /// A zero or negative lifetime counts as already expired so that no
    /// caller ever divides by it.
    pub fn is_expired(&self) -> bool {
        match self.lifetime {
            None => false,
            Some(lifetime) if lifetime <= 0.0 => true,
            Some(lifetime) => self.age.unwrap_or(0.0) > lifetime,
        }
    }

    // -- builders -----------------------------------------------------------

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_collision(mut self, collision: Collision) -> Self {
        self.collision = Some(collision);
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    pub fn with_rotational_damping(mut self, damping: f64) -> Self {
        self.rotational_damping = Some(damping);
        self
    }

    pub fn with_spring(mut self, origin: Vec2, stiffness: f64) -> Self {
        self.spring = Some(Spring { origin, stiffness });
        self
    }

    pub fn with_rotation(mut self, rotation: f64, rotational_velocity: Option<f64>) -> Self {
        self.rotation = Some(rotation);
        self.rotational_velocity = rotational_velocity;
        self
    }

    /// Start aging at zero with the given lifetime (`None` for immortal).
    pub fn with_lifetime(mut self, lifetime: Option<f64>) -> Self {
        self.age = Some(0.0);
        self.lifetime = lifetime;
        self
    }

    pub fn with_particle(mut self, color: u32, size: f64) -> Self {
        self.particle = Some(Particle { color, size });
        self
    }

    pub fn attached(mut self, anchor: EntityId) -> Self {
        self.attached_to = Some(anchor);
        self
    }
}

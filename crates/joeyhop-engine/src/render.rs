//! Read-only view of a [`World`] for an external renderer.
//!
//! The core never draws. A renderer builds a [`RenderView`] once per frame
//! and pulls out what it needs: the camera transform, the visible stair
//! tiles, sprites (player last, so it draws on top) and fading particles.
//! All units are world units unless a name says pixels.

use joeyhop_ecs::prelude::*;

use crate::level::Level;
use crate::world::World;

/// Pixel size the render surface snaps to.
pub const SURFACE_UNIT: u32 = 32;

/// Largest surface, in [`SURFACE_UNIT`]s.
pub const MAX_SURFACE_UNITS: u32 = 24;

/// Width of one tile in the tileset image, in pixels.
pub const TILE_PIXELS: u32 = 16;

/// Side of the square render surface for a host window of `width` by
/// `height` pixels.
pub fn surface_size(width: u32, height: u32) -> u32 {
    let units = (width.min(height) / SURFACE_UNIT).min(MAX_SURFACE_UNITS);
    units * SURFACE_UNIT
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

/// One cell of the stairwell tile map. The discriminant is the column in
/// the tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    Empty = 0,
    LeftWall = 1,
    Steps = 2,
    RightWall = 3,
    TopSteps = 4,
    TopLeftWall = 5,
    TopRightWall = 6,
    BottomSteps = 7,
    BottomLeftWall = 8,
    BottomRightWall = 9,
    Ground = 10,
    BackgroundWall = 11,
    LeftEdge = 12,
    RightEdge = 13,
    BottomBackgroundWall = 14,
}

impl Tile {
    /// Column in the tileset image.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Horizontal pixel offset of this tile in the tileset image.
    pub fn source_x(self) -> u32 {
        self.index() as u32 * TILE_PIXELS
    }
}

/// The tile drawn at integer cell `(x, y)` of `level`.
///
/// Steps run between the walls at `-width - 1` and `width`; below the stairs
/// the background wall widens by one cell per row, and everything from
/// `height` down is ground.
pub fn tile_at(level: &Level, x: i64, y: i64) -> Tile {
    let x = x as f64;
    let left_wall = -level.width - 1.0;
    let right_wall = level.width;
    let height = level.height as i64;
    let between_walls = x > left_wall && x < right_wall;

    if y == -1 {
        if between_walls {
            Tile::TopSteps
        } else if x == left_wall {
            Tile::TopLeftWall
        } else if x == right_wall {
            Tile::TopRightWall
        } else {
            Tile::Empty
        }
    } else if (0..height).contains(&y) {
        let left_edge = left_wall - y as f64 - 1.0;
        let right_edge = right_wall + y as f64 + 1.0;
        if between_walls {
            Tile::Steps
        } else if x == left_wall {
            Tile::LeftWall
        } else if x == right_wall {
            Tile::RightWall
        } else if x > left_edge && x < right_edge {
            if y == height - 1 {
                Tile::BottomBackgroundWall
            } else {
                Tile::BackgroundWall
            }
        } else if x == left_edge {
            Tile::LeftEdge
        } else if x == right_edge {
            Tile::RightEdge
        } else {
            Tile::Empty
        }
    } else if y == height {
        if between_walls {
            Tile::BottomSteps
        } else if x == left_wall {
            Tile::BottomLeftWall
        } else if x == right_wall {
            Tile::BottomRightWall
        } else {
            Tile::Ground
        }
    } else if y > height {
        Tile::Ground
    } else {
        Tile::Empty
    }
}

// ---------------------------------------------------------------------------
// Per-entity helpers
// ---------------------------------------------------------------------------

/// Which frame of `animation` to show at `age` milliseconds.
///
/// Stopped animations hold the first frame; so do degenerate ones with no
/// frames or a non-positive delay.
pub fn sprite_frame(animation: Option<Animation>, age: f64) -> u32 {
    let Some(animation) = animation else {
        return 0;
    };
    let Some(delay) = animation.delay_ms else {
        return 0;
    };
    if animation.frames == 0 || !(delay > 0.0) || !age.is_finite() {
        return 0;
    }
    ((age / delay).floor().max(0.0) as u64 % animation.frames as u64) as u32
}

/// Opacity of a particle: opaque when young, fading sharply near the end.
///
/// Immortal and zero-lifetime particles are drawn opaque and invisible
/// respectively, instead of dividing by zero.
pub fn particle_alpha(age: f64, lifetime: Option<f64>) -> f64 {
    match lifetime {
        None => 1.0,
        Some(lifetime) if lifetime <= 0.0 => 0.0,
        Some(lifetime) => (1.0 - (age / lifetime).powi(4)).clamp(0.0, 1.0),
    }
}

/// Vertical hop offset applied to a bouncing player sprite.
pub fn bounce_offset(bounce: f64) -> f64 {
    if bounce == 0.0 {
        0.0
    } else {
        bounce * 0.4 - 0.2
    }
}

// ---------------------------------------------------------------------------
// RenderView
// ---------------------------------------------------------------------------

/// A sprite ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub entity: EntityId,
    /// Centre of the sprite, including any hop offset.
    pub position: Vec2,
    pub rotation: f64,
    pub image: SpriteImage,
    /// Frame within the image strip.
    pub frame: u32,
    /// Frames in the image strip.
    pub frames: u32,
    /// Side length in world units.
    pub size: f64,
}

/// A particle ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDraw {
    pub position: Vec2,
    pub color: u32,
    pub size: f64,
    pub alpha: f64,
}

/// Borrowed per-frame view of a world.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    world: &'a World,
}

impl<'a> RenderView<'a> {
    pub fn new(world: &'a World) -> Self {
        Self { world }
    }

    pub fn level(&self) -> &'a Level {
        self.world.level()
    }

    /// Camera centre and view size.
    pub fn camera(&self) -> (Vec2, f64) {
        let camera = self.world.camera();
        let position = camera.and_then(|c| c.position).unwrap_or(Vec2::ZERO);
        let size = camera.and_then(|c| c.view).map_or(1.0, |v| v.size);
        (position, size)
    }

    /// World-space corners of the visible square.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let (centre, size) = self.camera();
        let half = Vec2::new(size / 2.0, size / 2.0);
        (centre - half, centre + half)
    }

    /// Pixels per world unit and the pixel translation of the world origin
    /// for a square surface of `surface_pixels`.
    pub fn transform(&self, surface_pixels: u32) -> (f64, Vec2) {
        let (_, size) = self.camera();
        let scale = surface_pixels as f64 / size;
        let (top_left, _) = self.bounds();
        (scale, (top_left * -scale).floor())
    }

    /// Every visible cell with its tile, row by row.
    pub fn tiles(&self) -> Vec<(i64, i64, Tile)> {
        let (top_left, bottom_right) = self.bounds();
        let level = self.level();
        let mut tiles = Vec::new();
        let mut y = top_left.y.floor() as i64;
        while (y as f64) <= bottom_right.y {
            let mut x = top_left.x.floor() as i64;
            while (x as f64) <= bottom_right.x {
                tiles.push((x, y, tile_at(level, x, y)));
                x += 1;
            }
            y += 1;
        }
        tiles
    }

    /// Sprites in store order with the player moved to the end.
    pub fn sprites(&self) -> Vec<SpriteDraw> {
        let player = self.world.player_id();
        let store = self.world.store();
        let mut sprites: Vec<SpriteDraw> = store
            .query(ComponentKind::Sprite)
            .filter(|(id, _)| *id != player)
            .filter_map(|(id, e)| sprite_draw(id, e))
            .collect();
        if let Some(draw) = store.get(player).and_then(|e| sprite_draw(player, e)) {
            sprites.push(draw);
        }
        sprites
    }

    /// Every particle with its current opacity.
    pub fn particles(&self) -> Vec<ParticleDraw> {
        self.world
            .store()
            .query(ComponentKind::Particle)
            .filter_map(|(_, e)| {
                let particle = e.particle?;
                Some(ParticleDraw {
                    position: e.position?,
                    color: particle.color,
                    size: particle.size,
                    alpha: particle_alpha(e.age.unwrap_or(0.0), e.lifetime),
                })
            })
            .collect()
    }
}

fn sprite_draw(id: EntityId, entity: &Entity) -> Option<SpriteDraw> {
    let sprite = entity.sprite?;
    let mut position = entity.position?;
    if let Some(state) = entity.player {
        position.y += bounce_offset(state.bounce);
    }
    Some(SpriteDraw {
        entity: id,
        position,
        rotation: entity.rotation.unwrap_or(0.0),
        image: sprite.image,
        frame: sprite_frame(sprite.animation, entity.age.unwrap_or(0.0)),
        frames: sprite.animation.map_or(1, |a| a.frames.max(1)),
        size: sprite.scale.unwrap_or(1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, LevelConfig};
    use crate::input::InputState;
    use crate::prng::BaseSeed;

    fn level() -> Level {
        Level::new(&LevelConfig::default())
    }

    #[test]
    fn surface_snaps_to_units() {
        assert_eq!(surface_size(1920, 1080), 768);
        assert_eq!(surface_size(500, 700), 480);
        assert_eq!(surface_size(20, 700), 0);
    }

    #[test]
    fn stairwell_tiles() {
        // width 2, height 4: walls at x = -3 and x = 2.
        let l = level();
        assert_eq!(tile_at(&l, 0, -1), Tile::TopSteps);
        assert_eq!(tile_at(&l, -3, -1), Tile::TopLeftWall);
        assert_eq!(tile_at(&l, 2, -1), Tile::TopRightWall);
        assert_eq!(tile_at(&l, -2, 1), Tile::Steps);
        assert_eq!(tile_at(&l, -3, 1), Tile::LeftWall);
        assert_eq!(tile_at(&l, 2, 1), Tile::RightWall);
        assert_eq!(tile_at(&l, 3, 1), Tile::BackgroundWall);
        assert_eq!(tile_at(&l, 4, 1), Tile::RightEdge);
        assert_eq!(tile_at(&l, -5, 1), Tile::LeftEdge);
        assert_eq!(tile_at(&l, 3, 3), Tile::BottomBackgroundWall);
        assert_eq!(tile_at(&l, 0, 4), Tile::BottomSteps);
        assert_eq!(tile_at(&l, -3, 4), Tile::BottomLeftWall);
        assert_eq!(tile_at(&l, 7, 4), Tile::Ground);
        assert_eq!(tile_at(&l, 0, 9), Tile::Ground);
        assert_eq!(tile_at(&l, 0, -3), Tile::Empty);
        assert_eq!(Tile::Ground.source_x(), 160);
    }

    #[test]
    fn frames_cycle_with_age() {
        let anim = Animation {
            frames: 2,
            delay_ms: Some(400.0),
        };
        assert_eq!(sprite_frame(Some(anim), 0.0), 0);
        assert_eq!(sprite_frame(Some(anim), 399.0), 0);
        assert_eq!(sprite_frame(Some(anim), 400.0), 1);
        assert_eq!(sprite_frame(Some(anim), 800.0), 0);
        let stopped = Animation {
            frames: 2,
            delay_ms: None,
        };
        assert_eq!(sprite_frame(Some(stopped), 900.0), 0);
        assert_eq!(sprite_frame(None, 900.0), 0);
    }

    #[test]
    fn particle_fade_is_guarded() {
        assert_eq!(particle_alpha(0.0, Some(500.0)), 1.0);
        assert!((particle_alpha(250.0, Some(500.0)) - 0.9375).abs() < 1e-12);
        assert_eq!(particle_alpha(600.0, Some(500.0)), 0.0);
        assert_eq!(particle_alpha(10.0, Some(0.0)), 0.0);
        assert_eq!(particle_alpha(10.0, None), 1.0);
    }

    #[test]
    fn player_sprite_draws_last() {
        let mut world = World::new(GameConfig::default(), BaseSeed(3));
        world.tick(1.0 / 60.0, &InputState::default());
        let view = RenderView::new(&world);
        let sprites = view.sprites();
        assert!(sprites.len() >= 2);
        assert_eq!(sprites.last().map(|s| s.image), Some(SpriteImage::Player));
        assert!(sprites
            .iter()
            .any(|s| s.image == SpriteImage::Goal && s.size == 3.0));
    }

    #[test]
    fn visible_tiles_cover_view() {
        let world = World::new(GameConfig::default(), BaseSeed(3));
        let view = RenderView::new(&world);
        // Camera at origin with an 8-unit view: cells -4..=4 on each axis.
        assert_eq!(view.tiles().len(), 81);
        let (scale, translate) = view.transform(256);
        assert_eq!(scale, 32.0);
        assert_eq!(translate, Vec2::new(128.0, 128.0));
    }
}

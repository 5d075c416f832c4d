//! Tunable gameplay constants.
//!
//! The prototype variants of the game disagree on several rules (score
//! penalties, whether hazards cost lives, whether joeys can be picked up).
//! Rather than hard-coding one variant, every such constant lives in
//! [`GameConfig`]. The defaults reproduce the stair-climbing variant with
//! infinite level progression.
//!
//! Configs load from JSON; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors produced while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON did not match the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is outside its legal range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Player physics and starting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub initial_lives: u32,
    /// Steering acceleration, units/s².
    pub acceleration: f64,
    /// Horizontal speed clamp, units/s.
    pub max_speed: f64,
    pub damping: f64,
    /// Gravity applied while climbing a level.
    pub gravity: f64,
    /// Spin rate while climbing, rad/s.
    pub spin: f64,
    pub collision_radius: f64,
    /// Frame delay of the hop animation, ms.
    pub animation_delay_ms: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_lives: 2,
            acceleration: 5.0,
            max_speed: 1.0,
            damping: 0.2,
            gravity: 0.4,
            spin: 3.0,
            collision_radius: 0.5,
            animation_delay_ms: 500.0,
        }
    }
}

/// Camera view and pursuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Edge length of the square view, world units.
    pub view_size: f64,
    /// Pursuit gain.
    pub speed: f64,
    /// How far ahead of the player, in seconds of player velocity, to aim.
    pub lead: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_size: 8.0,
            speed: 1.0,
            lead: 1.5,
        }
    }
}

/// Level geometry and population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub initial_day: u32,
    /// Half-width of the stairwell, world units.
    pub width: f64,
    /// Number of stair rows on day one.
    pub initial_height: u32,
    /// Extra rows per completed level.
    pub height_growth: u32,
    /// Chance per row of a hazard bush.
    pub hazard_chance: f64,
    /// Chance per row of a joey to rescue; zero disables riders.
    pub joey_chance: f64,
    /// How long a completed level lingers before the next begins, ms.
    pub completion_linger_ms: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            initial_day: 1,
            width: 2.0,
            initial_height: 4,
            height_growth: 2,
            hazard_chance: 0.3,
            joey_chance: 0.0,
            completion_linger_ms: 1000.0,
        }
    }
}

impl LevelConfig {
    /// Whether joeys are placed on the stairs to be picked up and carried.
    pub fn riders_enabled(&self) -> bool {
        self.joey_chance > 0.0
    }
}

/// Scoring and lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub hazard_penalty: u32,
    pub idle_penalty: u32,
    /// Idle time between penalties, ms.
    pub idle_interval_ms: f64,
    pub completion_bonus: u32,
    pub rescue_bonus: u32,
    /// Lives lost per hazard hit; zero means the game never ends.
    pub lives_per_hazard: u32,
    /// Player velocity multiplier on a hazard hit.
    pub hazard_slowdown: f64,
    pub hazard_burst: usize,
    pub completion_burst: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            hazard_penalty: 10,
            idle_penalty: 1,
            idle_interval_ms: 1000.0,
            completion_bonus: 100,
            rescue_bonus: 25,
            lives_per_hazard: 0,
            hazard_slowdown: 0.5,
            hazard_burst: 63,
            completion_burst: 64,
        }
    }
}

// ---------------------------------------------------------------------------
// GameConfig
// ---------------------------------------------------------------------------

/// Every tunable of a game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub level: LevelConfig,
    pub scoring: ScoringConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and >= 0, got {value}"),
                })
            }
        }
        fn chance(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within [0, 1], got {value}"),
                })
            }
        }

        non_negative("player.acceleration", self.player.acceleration)?;
        non_negative("player.max_speed", self.player.max_speed)?;
        non_negative("player.damping", self.player.damping)?;
        non_negative("player.gravity", self.player.gravity)?;
        non_negative("player.collision_radius", self.player.collision_radius)?;
        non_negative("player.animation_delay_ms", self.player.animation_delay_ms)?;
        non_negative("camera.speed", self.camera.speed)?;
        non_negative("camera.lead", self.camera.lead)?;
        if !(self.camera.view_size.is_finite() && self.camera.view_size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.view_size",
                reason: format!("must be positive, got {}", self.camera.view_size),
            });
        }
        non_negative("level.width", self.level.width)?;
        non_negative("level.completion_linger_ms", self.level.completion_linger_ms)?;
        chance("level.hazard_chance", self.level.hazard_chance)?;
        chance("level.joey_chance", self.level.joey_chance)?;
        non_negative("scoring.idle_interval_ms", self.scoring.idle_interval_ms)?;
        non_negative("scoring.hazard_slowdown", self.scoring.hazard_slowdown)?;
        Ok(())
    }

    /// Whether hazard hits can end the game.
    pub fn lives_enabled(&self) -> bool {
        self.scoring.lives_per_hazard > 0
    }
}

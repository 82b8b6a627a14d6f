//! Tunable constants for a round, deserialisable from TOML by adapters.

use std::{collections::HashMap, time::Duration};

use cat_chase_core::{BodyState, Rectangle, Toy, Vector2};
use cat_chase_system_behavior::CatConfig;
use serde::{Deserialize, Serialize};

/// Complete world configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield dimensions and frame rate.
    pub graphics: GraphicsConfig,
    /// Player constants.
    pub player: PlayerConfig,
    /// Cat constants.
    pub cat: CatSettings,
    /// Score, difficulty, and frame pacing rules.
    pub rules: RulesConfig,
    /// Seed for the cat's random source; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Rectangle every entity is confined to, anchored at its upper-left corner.
    #[must_use]
    pub fn boundary(&self) -> Rectangle {
        let height = self.graphics.height;
        Rectangle::new(
            Vector2::new(0.0, height),
            Vector2::new(self.graphics.width, height),
        )
    }

    /// Fixed physics step in milliseconds.
    #[must_use]
    pub fn timestep(&self) -> f32 {
        1000.0 / self.graphics.fps.max(1) as f32
    }
}

/// Playfield dimensions and frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    /// Width of the playfield in world units.
    pub width: f32,
    /// Height of the playfield in world units.
    pub height: f32,
    /// Physics steps per second.
    pub fps: u32,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            width: 368.0,
            height: 100.0,
            fps: 60,
        }
    }
}

/// Player health, timers, ability power, and body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Health at the start of a round.
    pub health: u32,
    /// Invulnerability window after a hit, in milliseconds.
    pub hit_duration: f32,
    /// Length of the laser's "off" window, in milliseconds.
    pub ability_duration: f32,
    /// Maximum charged power.
    pub power_max: f32,
    /// Number of discrete power levels reported to adapters.
    pub power_levels: u32,
    /// Toy selected before the player picks one.
    pub toy: Toy,
    /// Hitbox dimensions.
    pub dimensions: Vector2,
    /// Initial kinematic state.
    pub body: BodyState,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 3,
            hit_duration: 1500.0,
            ability_duration: 700.0,
            power_max: 0.3,
            power_levels: 6,
            toy: Toy::Laser,
            dimensions: Vector2::new(8.0, 8.0),
            body: BodyState {
                position: Vector2::new(-999.0, -999.0),
                velocity: Vector2::ZERO,
                acceleration: Vector2::ZERO,
                gravity: Vector2::new(0.0, -0.0015),
            },
        }
    }
}

/// Cat behavior tunables plus its body and animation layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatSettings {
    /// Speeds and round-start state.
    pub behavior: CatConfig,
    /// Hitbox dimensions.
    pub dimensions: Vector2,
    /// Frame count of animations missing from `frames`.
    pub default_frames: u32,
    /// Frame counts keyed by sprite state.
    pub frames: HashMap<String, u32>,
}

impl Default for CatSettings {
    fn default() -> Self {
        let frames = [
            ("crouch-left", 4),
            ("crouch-right", 4),
            ("attack-left", 6),
            ("attack-right", 6),
            ("jump-left", 8),
            ("jump-right", 8),
            ("land-left", 3),
            ("land-right", 3),
        ]
        .into_iter()
        .map(|(state, count)| (state.to_owned(), count))
        .collect();

        Self {
            behavior: CatConfig::default(),
            dimensions: Vector2::new(24.0, 16.0),
            default_frames: 4,
            frames,
        }
    }
}

/// Score, difficulty, and frame pacing rules.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Score cap in whole seconds.
    pub max_score_seconds: u64,
    /// Survival time per difficulty level, in milliseconds.
    pub difficulty_interval_ms: u64,
    /// Longest frame the simulation accepts, in milliseconds.
    pub max_frame_ms: u64,
}

impl RulesConfig {
    /// Score cap.
    #[must_use]
    pub fn max_score(&self) -> Duration {
        Duration::from_secs(self.max_score_seconds)
    }

    /// Longest frame the simulation accepts.
    #[must_use]
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_score_seconds: 999_999,
            difficulty_interval_ms: 60_000,
            max_frame_ms: 30,
        }
    }
}

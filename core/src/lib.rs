#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cat Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the behavior systems. Adapters submit [`Command`]
//! values describing player input, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened. The geometry primitives, the ballistic solver, and the
//! capability traits consumed by agents also live here so every crate agrees
//! on a single coordinate convention: world space grows upward.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod animation;
mod body;
mod capability;
mod geometry;
pub mod projectile;

pub use animation::{Animator, DEFAULT_FRAME_DURATION};
pub use body::{Body, BodyState};
pub use capability::{Audio, Physics, Silence, Sprite};
pub use geometry::{sign, Corners, Rectangle, Vector2};

/// Horizontal direction an entity faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    Right,
}

impl Facing {
    /// Label fragment used when composing sprite states.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Identifies one side of the world boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallId {
    /// Wall at the minimum x edge.
    Left,
    /// Wall at the maximum x edge.
    Right,
    /// Ceiling.
    Top,
    /// Floor.
    Bottom,
}

impl WallId {
    /// Every wall, in the order observations report them.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Label fragment used when composing sprite states.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Toy the player controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toy {
    /// Laser dot that follows the cursor and can briefly switch off.
    Laser,
    /// Mouse that runs along the floor and can jump.
    Mouse,
}

impl Toy {
    /// Label used for sprite states and logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Laser => "laser",
            Self::Mouse => "mouse",
        }
    }
}

/// Cat aggressiveness tier, derived from the elapsed score.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    /// Level 0: reacts to the player's current position.
    #[default]
    Easy,
    /// Level 1: mixes current and predicted player positions.
    Intermediate,
    /// Level 2: reacts primarily to predicted player positions.
    Hard,
}

impl Difficulty {
    /// Converts a raw level, clamping it into `[0, 2]`.
    #[must_use]
    pub const fn from_level(level: i64) -> Self {
        if level <= 0 {
            Self::Easy
        } else if level == 1 {
            Self::Intermediate
        } else {
            Self::Hard
        }
    }

    /// Numeric level in `[0, 2]`.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Intermediate => 1,
            Self::Hard => 2,
        }
    }

    /// Level as a float multiplier for speed modifiers.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Easy => 0.0,
            Self::Intermediate => 1.0,
            Self::Hard => 2.0,
        }
    }
}

/// Selects which ballistic solution a jump uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionFlag {
    /// Fastest arrival.
    Min,
    /// Least energy, a lower and slower arc.
    #[default]
    Low,
}

/// Screen the game is currently presenting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenState {
    /// Toy selection; the cat idles while the player chooses.
    #[default]
    Start,
    /// Round in progress.
    Active,
    /// Round suspended by the player.
    Paused,
    /// Round ended because the player ran out of health.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a round with the selected toy. Ignored outside the start screen.
    SelectToy {
        /// Toy the player controls during the round.
        toy: Toy,
    },
    /// Moves the player's cursor to a world-space position.
    MoveCursor {
        /// Cursor position in world space.
        position: Vector2,
    },
    /// Begins charging the toy's ability.
    PressAbility,
    /// Releases the ability at the charged power.
    ReleaseAbility,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time since the previous tick.
        dt: Duration,
    },
    /// Suspends an active round.
    Pause,
    /// Resumes a paused round.
    Resume,
    /// Returns to the start screen, resetting the player and the cat.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced during an active round.
    TimeAdvanced {
        /// Clamped duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the world presents a new screen.
    ScreenChanged {
        /// Screen that became active.
        state: ScreenState,
    },
    /// Confirms the toy chosen for the new round.
    RoundStarted {
        /// Toy selected by the player.
        toy: Toy,
    },
    /// Reports that the score crossed into a new difficulty tier.
    DifficultyChanged {
        /// Tier the cat now plays at.
        difficulty: Difficulty,
    },
    /// Reports that the cat started executing a new action.
    CatActionStarted {
        /// Label of the action that became current.
        label: String,
    },
    /// Reports that the player's toy triggered its ability.
    AbilityTriggered {
        /// Toy whose ability fired.
        toy: Toy,
    },
    /// Reports that the player's ability ran its course.
    AbilityEnded {
        /// Toy whose ability ended.
        toy: Toy,
    },
    /// Reports that the cat caught the player.
    PlayerHit {
        /// Health remaining after the hit.
        health: u32,
    },
    /// Reports that the round ended in defeat.
    PlayerDefeated {
        /// Whole seconds survived.
        score_seconds: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_levels_are_clamped() {
        assert_eq!(Difficulty::from_level(-4), Difficulty::Easy);
        assert_eq!(Difficulty::from_level(1), Difficulty::Intermediate);
        assert_eq!(Difficulty::from_level(7), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.level(), 2);
    }

    #[test]
    fn rectangle_round_trips_through_bincode() {
        let rect = Rectangle::new(Vector2::new(0.0, 100.0), Vector2::new(368.0, 100.0));
        let bytes = bincode::serialize(&rect).expect("serialize rectangle");
        let decoded: Rectangle = bincode::deserialize(&bytes).expect("deserialize rectangle");
        assert_eq!(decoded, rect);
    }

    #[test]
    fn toy_uses_lowercase_labels() {
        assert_eq!(Toy::Mouse.as_str(), "mouse");
        assert_eq!(WallId::ALL.map(WallId::as_str), ["left", "right", "top", "bottom"]);
        assert_eq!(Facing::Left.as_str(), "left");
    }
}

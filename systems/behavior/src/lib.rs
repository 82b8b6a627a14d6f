#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cat agent driven by observations, action schemas, and a planner.
//!
//! Each call to [`Cat::logic`] ages the current action, refreshes the
//! observation snapshot, and advances the action queue by one step. When the
//! queue runs dry, the [`planner`] consults the most recent completed action,
//! the difficulty tier, and the observed spatial zone to choose a
//! [`Behavior`], which enqueues a chain of actions generated from the
//! schemas registered at construction.

use std::{fmt, rc::Rc};

use cat_chase_core::{
    Audio, BodyState, Difficulty, Facing, Physics, SolutionFlag, Sprite, Vector2, WallId,
};
use cat_chase_system_actions::{
    run_tick, ActionError, ActionFactory, ActionQueue, Actor, Bindings, Step,
};
use cat_chase_system_observation::{Observation, ObservationSnapshot, PlayerView, Subject};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

mod behaviors;
pub mod planner;
mod schemas;

pub use behaviors::Behavior;

/// Observed entity an action is aimed at.
///
/// Resolved against the latest snapshot every time an action function runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetRef {
    /// The player's current position.
    Player,
    /// The player's predicted position.
    Predict,
    /// Midpoint of a boundary wall.
    Wall(WallId),
}

/// Argument bound into a cat action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg {
    /// Observed entity to act upon.
    Target(TargetRef),
    /// Duration in milliseconds, distance, or coordinate.
    Number(f32),
    /// Ballistic solution variant for jumps.
    Flag(SolutionFlag),
    /// Whether a jump grabs onto walls it collides with.
    Toggle(bool),
}

impl From<TargetRef> for Arg {
    fn from(target: TargetRef) -> Self {
        Self::Target(target)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<SolutionFlag> for Arg {
    fn from(flag: SolutionFlag) -> Self {
        Self::Flag(flag)
    }
}

impl From<bool> for Arg {
    fn from(toggle: bool) -> Self {
        Self::Toggle(toggle)
    }
}

/// Resolved view of a [`TargetRef`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Position of the target.
    pub position: Vector2,
    /// Target position relative to the cat's midpoint.
    pub relative: Vector2,
    /// Component-wise absolute value of `relative`.
    pub absolute: Vector2,
    /// Distance between the cat and the target.
    pub distance: f32,
}

/// Whether the cat looks toward or away from a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Face the point.
    Toward,
    /// Turn away from the point.
    Away,
}

/// Facing and travel sign toward a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heading {
    /// Direction the sprite should face.
    pub facing: Facing,
    /// Sign applied to horizontal speeds.
    pub sign: f32,
}

/// Base speeds in world units per millisecond.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatSpeeds {
    /// Running speed.
    pub run: f32,
    /// Walking speed.
    pub walk: f32,
    /// Sneaking speed.
    pub sneak: f32,
    /// Maximum jump launch speed.
    pub jump: f32,
    /// Climbing speed.
    pub climb: f32,
}

impl CatSpeeds {
    /// Minimum jump launch speed.
    #[must_use]
    pub fn min_jump(&self) -> f32 {
        self.jump / 10.0
    }
}

impl Default for CatSpeeds {
    fn default() -> Self {
        Self {
            run: 0.1,
            walk: 0.05,
            sneak: 0.02,
            jump: 0.33,
            climb: 0.03,
        }
    }
}

/// State the cat starts every round in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatInitial {
    /// Sprite state entered on reset.
    pub state: String,
    /// Label seeded into the action history on reset.
    pub action: String,
    /// Kinematic state restored on reset.
    pub body: BodyState,
}

impl Default for CatInitial {
    fn default() -> Self {
        Self {
            state: "sit-right".to_owned(),
            action: "sit".to_owned(),
            body: BodyState {
                position: Vector2::new(100.0, 1.0),
                velocity: Vector2::ZERO,
                acceleration: Vector2::ZERO,
                gravity: Vector2::new(0.0, -0.0005),
            },
        }
    }
}

/// Tunables for a [`Cat`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatConfig {
    /// Base movement speeds.
    pub speeds: CatSpeeds,
    /// Round-start state.
    pub initial: CatInitial,
}

/// Cat agent and the capabilities it drives.
pub struct Cat {
    physics: Box<dyn Physics>,
    sprite: Box<dyn Sprite>,
    audio: Rc<dyn Audio>,
    rng: Box<dyn RngCore>,
    difficulty: Difficulty,
    observation: Observation,
    speeds: CatSpeeds,
    initial: CatInitial,
    factory: ActionFactory<Cat, Arg>,
    actions: ActionQueue<Cat, Arg>,
}

impl fmt::Debug for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cat")
            .field("difficulty", &self.difficulty)
            .field("state", &self.sprite.state())
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl Cat {
    /// Creates a cat and registers its action schemas.
    ///
    /// The sprite is put into the configured initial state; the physics body
    /// is used as provided.
    #[must_use]
    pub fn new(
        config: CatConfig,
        physics: Box<dyn Physics>,
        mut sprite: Box<dyn Sprite>,
        audio: Rc<dyn Audio>,
        rng: Box<dyn RngCore>,
    ) -> Self {
        let mut factory = ActionFactory::new();
        schemas::register(&mut factory);
        sprite.set_state(&config.initial.state);

        Self {
            physics,
            sprite,
            audio,
            rng,
            difficulty: Difficulty::Easy,
            observation: Observation::new(),
            speeds: config.speeds,
            actions: ActionQueue::new(&config.initial.action),
            initial: config.initial,
            factory,
        }
    }

    /// Current difficulty tier.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Sets the difficulty tier, clamping `level` into `[0, 2]`.
    pub fn set_difficulty(&mut self, level: i64) {
        self.difficulty = Difficulty::from_level(level);
    }

    /// Physics body of the cat.
    #[must_use]
    pub fn physics(&self) -> &dyn Physics {
        self.physics.as_ref()
    }

    /// Mutable physics body of the cat.
    pub fn physics_mut(&mut self) -> &mut dyn Physics {
        self.physics.as_mut()
    }

    /// Sprite of the cat.
    #[must_use]
    pub fn sprite(&self) -> &dyn Sprite {
        self.sprite.as_ref()
    }

    /// Latest observation snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &ObservationSnapshot {
        self.observation.snapshot()
    }

    /// Base movement speeds.
    #[must_use]
    pub fn speeds(&self) -> &CatSpeeds {
        &self.speeds
    }

    /// Schema registry.
    #[must_use]
    pub fn factory(&self) -> &ActionFactory<Cat, Arg> {
        &self.factory
    }

    /// Advances the cat by one frame.
    ///
    /// Ages the current action, observes the player, and steps the action
    /// queue, planning a new behavior whenever it runs dry.
    pub fn logic(&mut self, dt: f32, player: &PlayerView) -> Result<Step, ActionError> {
        self.actions.tick(dt);
        self.look(player);
        run_tick(self)
    }

    /// Refreshes the observation snapshot without stepping the queue.
    pub fn look(&mut self, player: &PlayerView) {
        let subject = Subject {
            hitbox: self.physics.hitbox(),
            boundary: self.physics.boundary(),
            history: self.actions.history(),
            current_action: self.actions.current_label(),
        };
        self.observation.look(&subject, player);
    }

    /// Integrates the physics body by `dt` milliseconds.
    pub fn integrate(&mut self, dt: f32) {
        self.physics.integrate(dt);
    }

    /// Advances the sprite animation by `dt` milliseconds.
    pub fn animate(&mut self, dt: f32) {
        self.sprite.animate(dt);
    }

    /// Restores the round-start state, discarding every queued action.
    pub fn reset(&mut self) {
        self.sprite.set_state(&self.initial.state);
        self.difficulty = Difficulty::Easy;
        self.actions.reset(&self.initial.action);
        self.physics.set_position(self.initial.body.position);
        self.physics.set_velocity(self.initial.body.velocity);
        self.physics.set_acceleration(self.initial.body.acceleration);
    }

    /// Facing and travel sign from the cat's midpoint toward `point`.
    #[must_use]
    pub fn direction(&self, point: Vector2, orientation: Orientation) -> Heading {
        let relative = point - self.physics.midpoint();
        let ahead = relative.x >= 0.0;
        match (orientation, ahead) {
            (Orientation::Toward, true) => Heading {
                facing: Facing::Right,
                sign: 1.0,
            },
            (Orientation::Toward, false) if relative.x < 0.0 => Heading {
                facing: Facing::Left,
                sign: -1.0,
            },
            (Orientation::Away, true) => Heading {
                facing: Facing::Left,
                sign: 1.0,
            },
            (Orientation::Away, false) if relative.x < 0.0 => Heading {
                facing: Facing::Right,
                sign: -1.0,
            },
            _ => Heading {
                facing: Facing::Right,
                sign: 1.0,
            },
        }
    }

    /// Resolves `target` against the latest snapshot.
    #[must_use]
    pub fn target(&self, target: TargetRef) -> Target {
        let snapshot = self.observation.snapshot();
        match target {
            TargetRef::Player => Target {
                position: snapshot.player.position,
                relative: snapshot.player.relative,
                absolute: snapshot.player.absolute,
                distance: snapshot.player.distance,
            },
            TargetRef::Predict => Target {
                position: snapshot.predict.position,
                relative: snapshot.predict.relative,
                absolute: snapshot.predict.absolute,
                distance: snapshot.predict.distance,
            },
            TargetRef::Wall(id) => {
                let wall = snapshot.boundary.wall(id);
                Target {
                    position: wall.position,
                    relative: wall.relative,
                    absolute: wall.absolute,
                    distance: wall.distance,
                }
            }
        }
    }

    /// Generates an action and appends it to the queue.
    pub fn enqueue_action(&mut self, label: &str, bindings: Bindings<Arg>) -> Result<(), ActionError> {
        let action = self.factory.generate(label, bindings)?;
        self.actions.enqueue(action);
        Ok(())
    }

    /// Replaces the current action with a freshly generated one and runs
    /// its entry effect immediately.
    pub fn change_current_action(
        &mut self,
        label: &str,
        bindings: Bindings<Arg>,
    ) -> Result<(), ActionError> {
        let action = self.factory.generate(label, bindings)?;
        self.actions.replace_current(action.clone());
        action.execute(self)
    }

    /// Drops every queued action except the current one.
    pub fn clear_future_actions(&mut self) {
        self.actions.clear_future();
    }

    /// Uniform draw in `[0, 1)` from the cat's random source.
    fn draw(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn speed_modifier(&self, per_level: f32) -> f32 {
        per_level * self.difficulty.factor()
    }
}

impl Actor for Cat {
    type Arg = Arg;

    fn actions(&self) -> &ActionQueue<Self, Arg> {
        &self.actions
    }

    fn actions_mut(&mut self) -> &mut ActionQueue<Self, Arg> {
        &mut self.actions
    }

    fn plan(&mut self) -> Result<(), ActionError> {
        let chance = self.draw();
        let category = planner::Category::from_recent(self.actions.history().first());
        let behavior = planner::choose(
            category,
            self.difficulty,
            self.observation.snapshot(),
            chance,
        );
        debug!(
            ?category,
            difficulty = self.difficulty.level(),
            chance,
            ?behavior,
            "planned behavior"
        );
        self.perform(behavior)
    }
}

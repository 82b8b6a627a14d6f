#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cat Chase.
//!
//! The world owns the player's toy and the cat, advances both on a fixed
//! physics timestep, keeps the score and difficulty progression, and moves
//! between the start, active, paused, and game-over screens. Adapters drive
//! it exclusively through [`apply`] and read it through [`query`].

use std::{collections::HashMap, fmt, rc::Rc, time::Duration};

use cat_chase_core::{
    Animator, Audio, Body, Command, Event, Rectangle, ScreenState, Silence, Vector2,
};
use cat_chase_system_actions::{ActionError, Actor, Step};
use cat_chase_system_behavior::Cat;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

mod config;
mod player;
mod timer;

pub use config::{CatSettings, GameConfig, GraphicsConfig, PlayerConfig, RulesConfig};
pub use timer::Timer;

use player::Player;

/// Represents the authoritative Cat Chase world state.
pub struct World {
    config: GameConfig,
    boundary: Rectangle,
    screen: ScreenState,
    audio: Rc<dyn Audio>,
    player: Player,
    cat: Cat,
    cursor: Vector2,
    charging: bool,
    score: Duration,
    record: Duration,
    accumulator: f32,
    timestep: f32,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("screen", &self.screen)
            .field("score", &self.score)
            .field("player", &self.player)
            .field("cat", &self.cat)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Creates a silent world on the start screen.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_audio(config, Rc::new(Silence))
    }

    /// Creates a world whose entities play sounds through `audio`.
    #[must_use]
    pub fn with_audio(config: GameConfig, audio: Rc<dyn Audio>) -> Self {
        let boundary = config.boundary();
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
            None => Box::new(ChaCha8Rng::from_entropy()),
        };

        let player = Player::new(&config.player, boundary, Rc::clone(&audio));
        let cat = spawn_cat(&config, boundary, Rc::clone(&audio), rng);

        Self {
            timestep: config.timestep(),
            config,
            boundary,
            screen: ScreenState::Start,
            audio,
            player,
            cat,
            cursor: Vector2::ZERO,
            charging: false,
            score: Duration::ZERO,
            record: Duration::ZERO,
            accumulator: 0.0,
        }
    }

    fn change_screen(&mut self, state: ScreenState, out_events: &mut Vec<Event>) {
        self.screen = state;
        out_events.push(Event::ScreenChanged { state });
    }

    fn restart(&mut self) {
        self.player.reset();
        self.cat.reset();
        self.score = Duration::ZERO;
        self.accumulator = 0.0;
        self.charging = false;
        info!("round reset");
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        let dt = dt.min(self.config.rules.max_frame());
        let ms = dt.as_secs_f32() * 1000.0;

        match self.screen {
            ScreenState::Start => {
                self.cat.animate(ms);
                return Ok(());
            }
            ScreenState::Paused | ScreenState::GameOver => return Ok(()),
            ScreenState::Active => {}
        }

        out_events.push(Event::TimeAdvanced { dt });
        self.player.process_position(self.cursor);
        if self.charging {
            self.player.increment_power(ms);
        }

        self.advance_score(dt, out_events);

        if self.player.defeated() {
            self.defeat(out_events);
            self.physics(ms, out_events);
            return Ok(());
        }
        self.logic(ms, out_events)?;
        self.physics(ms, out_events);

        self.cat.animate(ms);
        self.player.animate(ms);
        Ok(())
    }

    fn advance_score(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.score = (self.score + dt).min(self.config.rules.max_score());

        let interval = u128::from(self.config.rules.difficulty_interval_ms.max(1));
        let level = i64::try_from(self.score.as_millis() / interval).unwrap_or(i64::MAX);
        let before = self.cat.difficulty();
        self.cat.set_difficulty(level);
        let difficulty = self.cat.difficulty();
        if difficulty != before {
            info!(?difficulty, "difficulty changed");
            out_events.push(Event::DifficultyChanged { difficulty });
        }
    }

    fn defeat(&mut self, out_events: &mut Vec<Event>) {
        self.audio.play("defeat");
        self.charging = false;
        self.record = self.record.max(self.score);
        let score_seconds = self.score.as_secs();
        info!(score_seconds, "player defeated");
        self.change_screen(ScreenState::GameOver, out_events);
        out_events.push(Event::PlayerDefeated { score_seconds });
    }

    fn logic(&mut self, ms: f32, out_events: &mut Vec<Event>) -> Result<(), ActionError> {
        if self.player.logic(ms) {
            out_events.push(Event::AbilityEnded {
                toy: self.player.toy(),
            });
        }

        let step = self.cat.logic(ms, &self.player.view())?;
        match step {
            Step::Planned | Step::Advanced | Step::Replanned => {
                if let Some(label) = self.cat.actions().current_label() {
                    debug!(label, ?step, "cat action started");
                    out_events.push(Event::CatActionStarted {
                        label: label.to_owned(),
                    });
                }
            }
            Step::Updated | Step::Waiting => {}
        }
        Ok(())
    }

    /// Trajectories restart here so the cat observes the previous step's motion.
    fn physics(&mut self, ms: f32, out_events: &mut Vec<Event>) {
        self.player.begin_frame();
        self.cat.physics_mut().begin_frame();

        self.accumulator += ms;
        while self.accumulator >= self.timestep {
            self.player.integrate(self.timestep);
            self.cat.integrate(self.timestep);
            self.accumulator -= self.timestep;
        }

        if self.player.process_collision(&self.cat.physics().hitbox()) {
            let health = self.player.health();
            info!(health, "player hit");
            out_events.push(Event::PlayerHit { health });
        }

        self.player.resolve_boundary();
        let _ = self.cat.physics_mut().resolve_boundary();
    }
}

fn spawn_cat(
    config: &GameConfig,
    boundary: Rectangle,
    audio: Rc<dyn Audio>,
    rng: Box<dyn RngCore>,
) -> Cat {
    let settings = &config.cat;
    let initial = &settings.behavior.initial;
    let body = Body::new(initial.body, settings.dimensions, boundary);
    let frames: HashMap<String, u32> = settings.frames.clone();
    let sprite = Animator::new(&initial.state, frames, settings.default_frames);
    Cat::new(
        settings.behavior.clone(),
        Box::new(body),
        Box::new(sprite),
        audio,
        rng,
    )
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// # Errors
///
/// Propagates [`ActionError`] when the cat's action queue references an
/// unregistered action or receives malformed arguments.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), ActionError> {
    match command {
        Command::SelectToy { toy } => {
            if world.screen == ScreenState::Start {
                world.player.set_toy(toy);
                world.change_screen(ScreenState::Active, out_events);
                info!(toy = toy.as_str(), "round started");
                out_events.push(Event::RoundStarted { toy });
            }
        }
        Command::MoveCursor { position } => {
            let corners = world.boundary.corners();
            world.cursor = position.limited(corners.a.x, corners.c.x, corners.c.y, corners.a.y);
        }
        Command::PressAbility => {
            if world.screen == ScreenState::Active {
                world.charging = true;
            }
        }
        Command::ReleaseAbility => {
            if world.screen == ScreenState::Active {
                world.charging = false;
                if world.player.do_ability() {
                    out_events.push(Event::AbilityTriggered {
                        toy: world.player.toy(),
                    });
                }
            }
        }
        Command::Tick { dt } => world.tick(dt, out_events)?,
        Command::Pause => {
            if world.screen == ScreenState::Active {
                world.charging = false;
                world.change_screen(ScreenState::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.screen == ScreenState::Paused {
                world.change_screen(ScreenState::Active, out_events);
            }
        }
        Command::Restart => {
            if world.screen != ScreenState::Start {
                world.restart();
                world.change_screen(ScreenState::Start, out_events);
            }
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use cat_chase_core::{Difficulty, Physics, Rectangle, ScreenState, Sprite, Toy, Vector2};
    use cat_chase_system_actions::Actor;

    /// Read-only view of the player's toy.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Toy the player controls.
        pub toy: Toy,
        /// Lower-left corner of the toy's hitbox.
        pub position: Vector2,
        /// Collision box of the toy.
        pub hitbox: Rectangle,
        /// Remaining health.
        pub health: u32,
        /// Whether the toy ability is running.
        pub ability: bool,
        /// Charged ability power.
        pub power: f32,
        /// Charged power expressed as a discrete level for cursor rendering.
        pub power_level: u32,
        /// Active sprite state.
        pub state: String,
    }

    /// Read-only view of the cat.
    #[derive(Clone, Debug, PartialEq)]
    pub struct CatSnapshot {
        /// Lower-left corner of the cat's hitbox.
        pub position: Vector2,
        /// Collision box of the cat.
        pub hitbox: Rectangle,
        /// Active sprite state.
        pub state: String,
        /// Label of the action being performed, if any.
        pub current_action: Option<String>,
        /// Completed action labels, most recent first.
        pub history: Vec<String>,
    }

    /// Screen the world is presenting.
    #[must_use]
    pub fn screen(world: &World) -> ScreenState {
        world.screen
    }

    /// Time survived in the current round.
    #[must_use]
    pub fn score(world: &World) -> Duration {
        world.score
    }

    /// Best score reached by a finished round.
    #[must_use]
    pub fn record(world: &World) -> Duration {
        world.record
    }

    /// Difficulty tier the cat currently plays at.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.cat.difficulty()
    }

    /// Cursor position, clamped to the playfield.
    #[must_use]
    pub fn cursor(world: &World) -> Vector2 {
        world.cursor
    }

    /// Rectangle every entity is confined to.
    #[must_use]
    pub fn boundary(world: &World) -> Rectangle {
        world.boundary
    }

    /// Captures a read-only view of the player's toy.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            toy: player.toy(),
            position: player.physics().position(),
            hitbox: player.physics().hitbox(),
            health: player.health(),
            ability: player.ability_active(),
            power: player.power(),
            power_level: player.power_level(),
            state: player.sprite().state().to_owned(),
        }
    }

    /// Captures a read-only view of the cat.
    #[must_use]
    pub fn cat(world: &World) -> CatSnapshot {
        let cat = &world.cat;
        CatSnapshot {
            position: cat.physics().position(),
            hitbox: cat.physics().hitbox(),
            state: cat.sprite().state().to_owned(),
            current_action: cat.actions().current_label().map(str::to_owned),
            history: cat.actions().history().to_vec(),
        }
    }
}

//! The player's toy: health, hit invulnerability, and the toy abilities.

use std::{collections::HashMap, fmt, rc::Rc};

use cat_chase_core::{sign, Animator, Audio, Body, Physics, Rectangle, Sprite, Toy, Vector2};
use cat_chase_system_observation::PlayerView;

use crate::{config::PlayerConfig, timer::Timer};

const HIT_SUFFIX: &str = "-hit";
const FLOOR: f32 = 1.0;

/// Player-controlled toy chased by the cat.
pub(crate) struct Player {
    body: Body,
    sprite: Animator,
    audio: Rc<dyn Audio>,
    toy: Toy,
    health: u32,
    max_health: u32,
    ability: bool,
    hit_timer: Timer,
    ability_timer: Timer,
    power: f32,
    power_max: f32,
    power_levels: u32,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("toy", &self.toy)
            .field("position", &self.body.position())
            .field("health", &self.health)
            .field("ability", &self.ability)
            .field("power", &self.power)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub(crate) fn new(config: &PlayerConfig, boundary: Rectangle, audio: Rc<dyn Audio>) -> Self {
        Self {
            body: Body::new(config.body, config.dimensions, boundary),
            sprite: Animator::new(config.toy.as_str(), HashMap::new(), 1),
            audio,
            toy: config.toy,
            health: config.health,
            max_health: config.health,
            ability: false,
            hit_timer: Timer::new(config.hit_duration),
            ability_timer: Timer::new(config.ability_duration),
            power: 0.0,
            power_max: config.power_max,
            power_levels: config.power_levels,
        }
    }

    pub(crate) fn toy(&self) -> Toy {
        self.toy
    }

    pub(crate) fn health(&self) -> u32 {
        self.health
    }

    pub(crate) fn ability_active(&self) -> bool {
        self.ability
    }

    pub(crate) fn power(&self) -> f32 {
        self.power
    }

    pub(crate) fn physics(&self) -> &Body {
        &self.body
    }

    pub(crate) fn sprite(&self) -> &Animator {
        &self.sprite
    }

    pub(crate) fn view(&self) -> PlayerView {
        PlayerView {
            toy: self.toy,
            hitbox: self.body.hitbox(),
            trajectory: self.body.trajectory(),
        }
    }

    /// Switches toys. The mouse drops from wherever it is onto the floor.
    pub(crate) fn set_toy(&mut self, toy: Toy) {
        self.sprite.set_state(toy.as_str());
        self.toy = toy;

        if toy == Toy::Mouse {
            self.body.jump(Vector2::ZERO);
            self.ability = true;
        }
    }

    /// Moves the toy toward the cursor the way the active toy moves.
    pub(crate) fn process_position(&mut self, cursor: Vector2) {
        match self.toy {
            Toy::Laser => self.body.set_position(cursor),
            Toy::Mouse => {
                let mut position = Vector2::new(cursor.x, FLOOR);
                if self.ability {
                    position.y = self.body.position().y;
                }
                self.body.set_position(position);

                let travel = self.body.trajectory().x;
                if travel != 0.0 {
                    let facing = if sign(travel) < 0.0 { "left" } else { "right" };
                    let hit = if self.hit_timer.is_active() {
                        HIT_SUFFIX
                    } else {
                        ""
                    };
                    self.sprite.switch_state(&format!("mouse-{facing}{hit}"));
                }
            }
        }
    }

    /// Runs timers and ability end conditions, returning `true` when the
    /// ability finished during this frame.
    pub(crate) fn logic(&mut self, dt: f32) -> bool {
        if self.hit_timer.decrement(dt) {
            let state = self.sprite.state();
            let plain = state.strip_suffix(HIT_SUFFIX).unwrap_or(state).to_owned();
            self.sprite.set_state(&plain);
        }

        if !self.ability {
            return false;
        }

        match self.toy {
            Toy::Laser => {
                if self.ability_timer.decrement(dt) {
                    self.ability = false;
                }
            }
            Toy::Mouse => {
                if self.body.position().y <= FLOOR && self.body.velocity().y <= 0.0 {
                    self.body.land();
                    self.ability = false;
                    self.audio.play("land");
                }
            }
        }
        !self.ability
    }

    /// Triggers the toy ability at the charged power, returning `true` if it fired.
    pub(crate) fn do_ability(&mut self) -> bool {
        if self.ability {
            return false;
        }

        match self.toy {
            Toy::Laser => {
                self.ability_timer.start();
                self.audio.play("laser");
            }
            Toy::Mouse => {
                self.body.jump(Vector2::new(0.0, self.power));
                self.power = 0.0;
                self.audio.play("jump_2");
            }
        }
        self.ability = true;
        true
    }

    pub(crate) fn increment_power(&mut self, dt: f32) {
        if !self.ability {
            self.power = (self.power + dt / 1000.0).min(self.power_max);
        }
    }

    /// Charged power mapped onto `[0, power_levels]`.
    pub(crate) fn power_level(&self) -> u32 {
        if self.power_max <= 0.0 {
            return 0;
        }
        (self.power * self.power_levels as f32 / self.power_max).floor() as u32
    }

    /// Applies contact with `other`, returning `true` if the player lost health.
    pub(crate) fn process_collision(&mut self, other: &Rectangle) -> bool {
        if !self.body.collides(other) {
            return false;
        }

        match self.toy {
            Toy::Laser if self.ability => false,
            Toy::Laser | Toy::Mouse => self.damage(),
        }
    }

    fn damage(&mut self) -> bool {
        if self.hit_timer.is_active() || self.health == 0 {
            return false;
        }

        self.health -= 1;
        if self.health > 0 {
            let state = format!("{}{HIT_SUFFIX}", self.sprite.state());
            self.sprite.set_state(&state);
            self.hit_timer.start();
            self.audio.play("hit");
        }
        true
    }

    pub(crate) fn defeated(&self) -> bool {
        self.health == 0
    }

    pub(crate) fn begin_frame(&mut self) {
        self.body.begin_frame();
    }

    /// Only the mouse is simulated; the laser is pinned to the cursor.
    pub(crate) fn integrate(&mut self, dt: f32) {
        if self.toy != Toy::Mouse {
            return;
        }

        self.body.integrate(dt);
        let position = self.body.position();
        if position.y < FLOOR {
            self.body.set_position(Vector2::new(position.x, FLOOR));
        }
    }

    pub(crate) fn resolve_boundary(&mut self) {
        let _ = self.body.resolve_boundary();
    }

    pub(crate) fn animate(&mut self, dt: f32) {
        self.sprite.animate(dt);
    }

    pub(crate) fn reset(&mut self) {
        self.health = self.max_health;
        self.ability = false;
        self.ability_timer.reset();
        self.hit_timer.reset();
        self.power = 0.0;
        self.body.set_velocity(Vector2::ZERO);
        self.body.set_acceleration(Vector2::ZERO);
    }
}

//! Capabilities an agent consumes from its surroundings.
//!
//! The behavior engine never owns a physics engine, renderer, or mixer. It
//! drives them exclusively through these traits so adapters and tests can
//! substitute their own implementations.

use crate::geometry::{Rectangle, Vector2};

/// Kinematic body with an axis-aligned hitbox confined to a boundary.
pub trait Physics {
    /// Anchor of the body, coinciding with the lower-left hitbox corner.
    fn position(&self) -> Vector2;

    /// Current velocity in world units per millisecond.
    fn velocity(&self) -> Vector2;

    /// Current acceleration in world units per square millisecond.
    fn acceleration(&self) -> Vector2;

    /// Displacement accumulated since the last call to [`Physics::begin_frame`].
    fn trajectory(&self) -> Vector2;

    /// Acceleration applied while the body is airborne.
    fn gravity(&self) -> Vector2;

    /// Axis-aligned collision box of the body.
    fn hitbox(&self) -> Rectangle;

    /// Rectangle the body is confined to.
    fn boundary(&self) -> Rectangle;

    /// Center of the hitbox.
    fn midpoint(&self) -> Vector2 {
        self.hitbox().midpoint()
    }

    /// Moves the body to `position`.
    fn set_position(&mut self, position: Vector2);

    /// Replaces the velocity.
    fn set_velocity(&mut self, velocity: Vector2);

    /// Replaces the acceleration.
    fn set_acceleration(&mut self, acceleration: Vector2);

    /// Updates selected position components, `None` leaves a component unchanged.
    fn set_position_components(&mut self, x: Option<f32>, y: Option<f32>) {
        let mut position = self.position();
        position.set(x, y);
        self.set_position(position);
    }

    /// Updates selected velocity components, `None` leaves a component unchanged.
    fn set_velocity_components(&mut self, x: Option<f32>, y: Option<f32>) {
        let mut velocity = self.velocity();
        velocity.set(x, y);
        self.set_velocity(velocity);
    }

    /// Updates selected acceleration components, `None` leaves a component unchanged.
    fn set_acceleration_components(&mut self, x: Option<f32>, y: Option<f32>) {
        let mut acceleration = self.acceleration();
        acceleration.set(x, y);
        self.set_acceleration(acceleration);
    }

    /// Launches the body with `impulse` as its new velocity under gravity.
    fn jump(&mut self, impulse: Vector2);

    /// Stops all motion after touching down.
    fn land(&mut self);

    /// Clears the trajectory so it records only the upcoming frame.
    fn begin_frame(&mut self);

    /// Advances the body by `dt` milliseconds.
    fn integrate(&mut self, dt: f32);

    /// Reports whether the hitbox overlaps `other`.
    fn collides(&self, other: &Rectangle) -> bool {
        self.hitbox().collides(other)
    }

    /// Pushes the body out of `other` along the shallower axis and returns
    /// the applied translation.
    fn resolve_collision(&mut self, other: &Rectangle) -> Vector2;

    /// Pushes the body back inside its boundary and returns the applied
    /// translation.
    fn resolve_boundary(&mut self) -> Vector2;
}

/// Frame-based animation state of an entity.
pub trait Sprite {
    /// Label of the active animation state.
    fn state(&self) -> &str;

    /// Enters `state`, restarting the animation from its first frame.
    fn set_state(&mut self, state: &str);

    /// Changes the visual state while keeping animation progress.
    fn switch_state(&mut self, state: &str);

    /// Selects whether the animation loops.
    fn set_repeat(&mut self, repeat: bool);

    /// Reports whether a non-looping animation reached its final frame.
    fn is_finished(&self) -> bool;

    /// Number of frames in the active animation.
    fn frame_count(&self) -> u32;

    /// Overrides the duration of each frame in milliseconds.
    fn set_frame_duration(&mut self, duration: f32);

    /// Advances the animation by `dt` milliseconds.
    fn animate(&mut self, dt: f32);
}

/// Fire-and-forget sound trigger.
pub trait Audio {
    /// Plays the sound registered under `label`.
    fn play(&self, label: &str);
}

/// Audio sink that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl Audio for Silence {
    fn play(&self, _label: &str) {}
}

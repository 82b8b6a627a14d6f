//! Reference [`Physics`] implementation backed by explicit Euler integration.

use serde::{Deserialize, Serialize};

use crate::capability::Physics;
use crate::geometry::{Rectangle, Vector2};

/// Initial kinematic state used to build or reset a [`Body`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    /// Lower-left corner of the hitbox.
    pub position: Vector2,
    /// Initial velocity.
    pub velocity: Vector2,
    /// Initial acceleration.
    pub acceleration: Vector2,
    /// Acceleration applied by [`Physics::jump`].
    pub gravity: Vector2,
}

/// Axis-aligned kinematic body confined to a rectangular boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    gravity: Vector2,
    trajectory: Vector2,
    dimensions: Vector2,
    boundary: Rectangle,
}

impl Body {
    /// Creates a body with the provided hitbox dimensions and boundary.
    #[must_use]
    pub fn new(state: BodyState, dimensions: Vector2, boundary: Rectangle) -> Self {
        Self {
            position: state.position,
            velocity: state.velocity,
            acceleration: state.acceleration,
            gravity: state.gravity,
            trajectory: Vector2::ZERO,
            dimensions,
            boundary,
        }
    }

    /// Restores the kinematic state without touching dimensions or boundary.
    pub fn reset(&mut self, state: BodyState) {
        self.position = state.position;
        self.velocity = state.velocity;
        self.acceleration = state.acceleration;
        self.gravity = state.gravity;
        self.trajectory = Vector2::ZERO;
    }

    fn translate(&mut self, offset: Vector2) {
        self.position += offset;
        self.trajectory += offset;
    }
}

impl Physics for Body {
    fn position(&self) -> Vector2 {
        self.position
    }

    fn velocity(&self) -> Vector2 {
        self.velocity
    }

    fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    fn trajectory(&self) -> Vector2 {
        self.trajectory
    }

    fn gravity(&self) -> Vector2 {
        self.gravity
    }

    fn hitbox(&self) -> Rectangle {
        Rectangle::new(
            Vector2::new(self.position.x, self.position.y + self.dimensions.y),
            self.dimensions,
        )
    }

    fn boundary(&self) -> Rectangle {
        self.boundary
    }

    fn set_position(&mut self, position: Vector2) {
        self.translate(position - self.position);
    }

    fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    fn set_acceleration(&mut self, acceleration: Vector2) {
        self.acceleration = acceleration;
    }

    fn jump(&mut self, impulse: Vector2) {
        self.velocity = impulse;
        self.acceleration = self.gravity;
    }

    fn land(&mut self) {
        self.velocity = Vector2::ZERO;
        self.acceleration = Vector2::ZERO;
    }

    fn begin_frame(&mut self) {
        self.trajectory = Vector2::ZERO;
    }

    fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.translate(self.velocity * dt);
    }

    fn resolve_collision(&mut self, other: &Rectangle) -> Vector2 {
        let hitbox = self.hitbox();
        if !hitbox.collides(other) {
            return Vector2::ZERO;
        }

        let depth = hitbox.depth(other);
        let relative = hitbox.relative(other);
        let push = if depth.x < depth.y {
            Vector2::new(depth.x * direction(relative.x), 0.0)
        } else {
            Vector2::new(0.0, depth.y * direction(relative.y))
        };
        self.translate(push);
        push
    }

    fn resolve_boundary(&mut self) -> Vector2 {
        let delta = self.hitbox().difference(&self.boundary);
        if !delta.is_zero() {
            self.translate(delta);
        }
        delta
    }
}

/// Push direction along one axis; centered overlaps resolve toward positive.
fn direction(relative: f32) -> f32 {
    if relative < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> Rectangle {
        Rectangle::new(Vector2::new(0.0, 100.0), Vector2::new(368.0, 100.0))
    }

    fn body_at(position: Vector2) -> Body {
        Body::new(
            BodyState {
                position,
                velocity: Vector2::ZERO,
                acceleration: Vector2::ZERO,
                gravity: Vector2::new(0.0, -0.0005),
            },
            Vector2::new(24.0, 16.0),
            boundary(),
        )
    }

    #[test]
    fn hitbox_is_anchored_at_lower_left() {
        let body = body_at(Vector2::new(100.0, 1.0));
        let corners = body.hitbox().corners();
        assert_eq!(corners.b, Vector2::new(100.0, 1.0));
        assert_eq!(corners.d, Vector2::new(124.0, 17.0));
        assert_eq!(body.midpoint(), Vector2::new(112.0, 9.0));
    }

    #[test]
    fn jump_applies_gravity_until_landing() {
        let mut body = body_at(Vector2::new(100.0, 1.0));
        body.jump(Vector2::new(0.1, 0.2));
        body.integrate(10.0);
        assert_eq!(body.acceleration(), Vector2::new(0.0, -0.0005));
        assert!(body.position().y > 1.0);
        body.land();
        assert_eq!(body.velocity(), Vector2::ZERO);
        assert_eq!(body.acceleration(), Vector2::ZERO);
    }

    #[test]
    fn trajectory_accumulates_within_a_frame() {
        let mut body = body_at(Vector2::new(100.0, 1.0));
        body.begin_frame();
        body.set_position(Vector2::new(103.0, 1.0));
        body.set_velocity(Vector2::new(0.0, 0.1));
        body.integrate(10.0);
        assert_eq!(body.trajectory(), Vector2::new(3.0, 1.0));
        body.begin_frame();
        assert_eq!(body.trajectory(), Vector2::ZERO);
    }

    #[test]
    fn resolve_boundary_returns_body_to_floor() {
        let mut body = body_at(Vector2::new(100.0, -4.0));
        let delta = body.resolve_boundary();
        assert_eq!(delta, Vector2::new(0.0, 4.0));
        assert_eq!(body.position(), Vector2::new(100.0, 0.0));
        assert_eq!(body.resolve_boundary(), Vector2::ZERO);
    }

    #[test]
    fn resolve_collision_uses_shallow_axis() {
        let mut body = body_at(Vector2::new(100.0, 0.0));
        let obstacle = Rectangle::new(Vector2::new(120.0, 16.0), Vector2::new(10.0, 16.0));
        let push = body.resolve_collision(&obstacle);
        assert_eq!(push, Vector2::new(-4.0, 0.0));
        assert_eq!(body.position(), Vector2::new(96.0, 0.0));
    }
}

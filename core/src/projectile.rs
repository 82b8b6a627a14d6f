//! Closed-form ballistic solver used to aim jumps.
//!
//! All functions assume a constant acceleration (gravity) and report an
//! unreachable target by returning `None` rather than failing.

use crate::geometry::Vector2;
use crate::SolutionFlag;

/// Discriminant of the launch quadratic, or `None` when it is negative.
fn discriminant(origin: Vector2, target: Vector2, speed: f32, acceleration: Vector2) -> Option<f32> {
    let delta = target - origin;
    let b = delta.dot(acceleration) + speed * speed;
    let discriminant = b * b - acceleration.dot(acceleration) * delta.dot(delta);
    (discriminant >= 0.0).then_some(discriminant)
}

/// Reports whether a launch at `speed` can reach `target` from `origin`.
#[must_use]
pub fn has_solution(origin: Vector2, target: Vector2, speed: f32, acceleration: Vector2) -> bool {
    discriminant(origin, target, speed, acceleration).is_some()
}

/// Launch velocity that reaches `target` in the shortest time.
#[must_use]
pub fn min_launch_velocity(
    origin: Vector2,
    target: Vector2,
    max_speed: f32,
    min_speed: f32,
    acceleration: Vector2,
) -> Option<Vector2> {
    let discriminant = discriminant(origin, target, max_speed, acceleration)?;
    let delta = target - origin;
    let b = delta.dot(acceleration) + max_speed * max_speed;
    let time = (2.0 * (b - discriminant.sqrt()) / acceleration.dot(acceleration)).sqrt();
    velocity_for_time(delta, time, max_speed, min_speed, acceleration)
}

/// Launch velocity that reaches `target` with the least energy, producing
/// a lower and slower arc.
#[must_use]
pub fn low_launch_velocity(
    origin: Vector2,
    target: Vector2,
    max_speed: f32,
    min_speed: f32,
    acceleration: Vector2,
) -> Option<Vector2> {
    let _ = discriminant(origin, target, max_speed, acceleration)?;
    let delta = target - origin;
    let time = (4.0 * delta.dot(delta) / acceleration.dot(acceleration))
        .sqrt()
        .sqrt();
    velocity_for_time(delta, time, max_speed, min_speed, acceleration)
}

/// Dispatches to the solver variant selected by `flag`.
#[must_use]
pub fn launch_velocity(
    flag: SolutionFlag,
    origin: Vector2,
    target: Vector2,
    max_speed: f32,
    min_speed: f32,
    acceleration: Vector2,
) -> Option<Vector2> {
    match flag {
        SolutionFlag::Min => {
            min_launch_velocity(origin, target, max_speed, min_speed, acceleration)
        }
        SolutionFlag::Low => {
            low_launch_velocity(origin, target, max_speed, min_speed, acceleration)
        }
    }
}

fn velocity_for_time(
    delta: Vector2,
    time: f32,
    max_speed: f32,
    min_speed: f32,
    acceleration: Vector2,
) -> Option<Vector2> {
    if !time.is_finite() || time <= 0.0 {
        return None;
    }

    let velocity = delta / time - acceleration * time / 2.0;
    let speed = velocity.length();
    let clamped = if speed > max_speed {
        max_speed
    } else if speed < min_speed {
        min_speed
    } else {
        return Some(velocity);
    };

    let theta = velocity.angle();
    Some(Vector2::new(clamped * theta.cos(), clamped * theta.sin()))
}

/// Position along a trajectory after `time` has elapsed.
#[must_use]
pub fn point_at(origin: Vector2, velocity: Vector2, acceleration: Vector2, time: f32) -> Vector2 {
    origin + velocity * time + acceleration * (time * time) / 2.0
}

/// Flight duration of the vertical sub-problem, taking the later root so the
/// projectile is descending through the target height.
#[must_use]
pub fn time_of_flight(launch_y: f32, target_y: f32, velocity_y: f32, gravity: f32) -> f32 {
    let apex = -(velocity_y / gravity);
    let descent =
        -(velocity_y * velocity_y - 2.0 * gravity * (launch_y - target_y)).sqrt() / gravity;
    apex + descent
}

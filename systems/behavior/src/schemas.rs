//! Action schemas registered for every cat.

use cat_chase_core::{projectile, sign, Facing, SolutionFlag, Vector2, WallId};
use cat_chase_system_actions::{ActionError, ActionFactory, Actor, Bindings};
use cat_chase_system_observation::WallInfo;

use crate::{Arg, Cat, Orientation, TargetRef};

/// Ground speed bonus per difficulty level.
const GROUND_BONUS: f32 = 0.03;
/// Jump launch speed bonus per difficulty level.
const JUMP_BONUS: f32 = 0.002;
/// Climb speed bonus per difficulty level.
const CLIMB_BONUS: f32 = 0.015;

/// Registers every cat schema with `factory`.
pub(crate) fn register(factory: &mut ActionFactory<Cat, Arg>) {
    for label in ["sit", "idle"] {
        let _ = factory.register(
            label,
            move |cat: &mut Cat, args: &[Arg]| rest(cat, &Args::new(label, args)),
            move |cat: &mut Cat, args: &[Arg]| linger(cat, &Args::new(label, args)),
        );
    }

    let _ = factory.register_with_update(
        "wait",
        |cat: &mut Cat, args: &[Arg]| rest(cat, &Args::new("wait", args)),
        |cat: &mut Cat, args: &[Arg]| {
            let max_t = Args::new("wait", args).number(0)?;
            Ok(cat.actions().elapsed() >= max_t)
        },
        |cat: &mut Cat, args: &[Arg]| {
            let target = cat.target(Args::new("wait", args).target(0)?);
            if target.absolute.x >= 5.0 {
                let heading = cat.direction(target.position, Orientation::Toward);
                cat.sprite
                    .switch_state(&format!("wait-{}", heading.facing.as_str()));
            }
            Ok(())
        },
    );

    let _ = factory.register(
        "attack",
        |cat: &mut Cat, args: &[Arg]| attack(cat, &Args::new("attack", args)),
        |cat: &mut Cat, _: &[Arg]| Ok(cat.sprite.is_finished()),
    );

    for (label, speed) in [
        ("walk", Gait::Walk),
        ("run", Gait::Run),
        ("sneak", Gait::Sneak),
    ] {
        let _ = factory.register_with_update(
            label,
            move |cat: &mut Cat, args: &[Arg]| stride(cat, &Args::new(label, args), speed),
            move |cat: &mut Cat, args: &[Arg]| {
                let args = Args::new(label, args);
                match speed {
                    Gait::Run => run_arrived(cat, &args),
                    Gait::Walk | Gait::Sneak => approach_arrived(cat, &args),
                }
            },
            move |cat: &mut Cat, args: &[Arg]| steer(cat, &Args::new(label, args)),
        );
    }

    let _ = factory.register(
        "run-to",
        |cat: &mut Cat, args: &[Arg]| {
            let x = Args::new("run-to", args).number(0)?;
            let heading = sign(x - cat.physics.midpoint().x);
            let facing = if heading >= 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
            cat.sprite.set_state(&format!("run-{}", facing.as_str()));
            let speed = cat.speeds.run + cat.speed_modifier(GROUND_BONUS);
            cat.physics
                .set_velocity_components(Some(heading * speed), Some(0.0));
            cat.physics.set_acceleration_components(Some(0.0), Some(0.0));
            Ok(())
        },
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("run-to", args);
            let (x, max_t, range) = (args.number(0)?, args.number(1)?, args.number(2)?);
            Ok(cat.actions().elapsed() >= max_t || (x - cat.physics.midpoint().x).abs() < range)
        },
    );

    let _ = factory.register(
        "crouch",
        |cat: &mut Cat, args: &[Arg]| {
            let target = cat.target(Args::new("crouch", args).target(0)?);
            let heading = cat.direction(target.position, Orientation::Toward);
            cat.sprite
                .set_state(&format!("crouch-{}", heading.facing.as_str()));
            cat.sprite.set_repeat(false);
            halt(cat);
            Ok(())
        },
        |cat: &mut Cat, _: &[Arg]| Ok(cat.sprite.is_finished()),
    );

    let _ = factory.register_with_update(
        "jump",
        |cat: &mut Cat, args: &[Arg]| jump(cat, &Args::new("jump", args)),
        |cat: &mut Cat, args: &[Arg]| jump_landed(cat, &Args::new("jump", args)),
        |cat: &mut Cat, _: &[Arg]| {
            stop_at_ceiling(cat);
            Ok(())
        },
    );

    let _ = factory.register_with_update(
        "wall-jump",
        |cat: &mut Cat, args: &[Arg]| wall_jump(cat, &Args::new("wall-jump", args)),
        |cat: &mut Cat, _: &[Arg]| {
            let boundary = cat.snapshot().boundary;
            if boundary.bottom.hit {
                return Ok(true);
            }
            if boundary.side_hit() {
                bounce_off_wall(cat);
            }
            Ok(false)
        },
        |cat: &mut Cat, _: &[Arg]| {
            stop_at_ceiling(cat);
            Ok(())
        },
    );

    let _ = factory.register(
        "land",
        |cat: &mut Cat, _: &[Arg]| {
            let facing = facing_of(cat.physics.velocity().x);
            cat.sprite.set_state(&format!("land-{}", facing.as_str()));
            cat.sprite.set_repeat(false);
            cat.physics.land();
            cat.audio.play("land");
            Ok(())
        },
        |cat: &mut Cat, _: &[Arg]| Ok(cat.sprite.is_finished()),
    );

    let _ = factory.register(
        "hang",
        |cat: &mut Cat, args: &[Arg]| {
            let wall = wall_or_contact(cat, Args::new("hang", args).wall(0)?);
            cat.sprite.set_state(&format!("hang-{}", wall.id.as_str()));
            cat.physics.set_position_components(Some(wall.position.x), None);
            halt(cat);
            Ok(())
        },
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("hang", args);
            let target = cat.target(args.target(0)?);
            let (max_t, min_t, min_d) = (args.number(1)?, args.number(2)?, args.number(3)?);
            let elapsed = cat.actions().elapsed();
            Ok(elapsed >= max_t || (elapsed >= min_t && target.distance <= min_d))
        },
    );

    let _ = factory.register_with_update(
        "climb",
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("climb", args);
            let target = cat.target(args.target(0)?);
            let wall = wall_or_contact(cat, args.wall(1)?);
            climb(cat, wall.id, sign(target.relative.y));
            Ok(())
        },
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("climb", args);
            let target = cat.target(args.target(0)?);
            let (max_t, min_y) = (args.number(1)?, args.number(2)?);
            let boundary = cat.snapshot().boundary;
            Ok(cat.actions().elapsed() >= max_t
                || target.absolute.y < min_y
                || boundary.top.hit
                || boundary.bottom.hit)
        },
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("climb", args);
            let target = cat.target(args.target(0)?);
            let wall = wall_or_contact(cat, args.wall(1)?);
            let heading = sign(target.relative.y);
            if heading != sign(cat.physics.velocity().y) {
                cat.sprite.switch_state(&climb_state(wall.id, heading));
                let velocity_y = cat.physics.velocity().y;
                cat.physics
                    .set_velocity_components(Some(0.0), Some(-velocity_y));
            }
            Ok(())
        },
    );

    let _ = factory.register(
        "climb-to",
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("climb-to", args);
            let y = args.number(0)?;
            let wall = wall_or_contact(cat, args.wall(1)?);
            climb(cat, wall.id, sign(y - cat.physics.midpoint().y));
            Ok(())
        },
        |cat: &mut Cat, args: &[Arg]| {
            let args = Args::new("climb-to", args);
            let (y, max_t, range) = (args.number(0)?, args.number(1)?, args.number(2)?);
            Ok(cat.actions().elapsed() >= max_t || (y - cat.physics.position().y).abs() < range)
        },
    );
}

/// Ground gait selecting the base speed and exit condition of a stride.
#[derive(Clone, Copy, Debug)]
enum Gait {
    Walk,
    Run,
    Sneak,
}

/// Positional view over the arguments bound to one action function.
struct Args<'a> {
    action: &'static str,
    values: &'a [Arg],
}

impl<'a> Args<'a> {
    fn new(action: &'static str, values: &'a [Arg]) -> Self {
        Self { action, values }
    }

    fn invalid(&self, index: usize) -> ActionError {
        ActionError::InvalidArgument {
            action: self.action.to_owned(),
            index,
        }
    }

    fn target(&self, index: usize) -> Result<TargetRef, ActionError> {
        match self.values.get(index) {
            Some(Arg::Target(target)) => Ok(*target),
            _ => Err(self.invalid(index)),
        }
    }

    fn number(&self, index: usize) -> Result<f32, ActionError> {
        match self.values.get(index) {
            Some(Arg::Number(value)) => Ok(*value),
            _ => Err(self.invalid(index)),
        }
    }

    fn toggle(&self, index: usize) -> Result<bool, ActionError> {
        match self.values.get(index) {
            Some(Arg::Toggle(value)) => Ok(*value),
            _ => Err(self.invalid(index)),
        }
    }

    /// Missing or malformed flags fall back to the low arc.
    fn flag(&self, index: usize) -> SolutionFlag {
        match self.values.get(index) {
            Some(Arg::Flag(flag)) => *flag,
            _ => SolutionFlag::Low,
        }
    }

    /// Optional wall argument; absent means "the wall currently touched".
    fn wall(&self, index: usize) -> Result<Option<WallId>, ActionError> {
        match self.values.get(index) {
            None => Ok(None),
            Some(Arg::Target(TargetRef::Wall(id))) => Ok(Some(*id)),
            Some(_) => Err(self.invalid(index)),
        }
    }
}

fn halt(cat: &mut Cat) {
    cat.physics.set_velocity_components(Some(0.0), Some(0.0));
    cat.physics.set_acceleration_components(Some(0.0), Some(0.0));
}

fn facing_of(velocity_x: f32) -> Facing {
    if velocity_x < 0.0 {
        Facing::Left
    } else {
        Facing::Right
    }
}

/// Sit, idle and wait: face the target and stop.
fn rest(cat: &mut Cat, args: &Args<'_>) -> Result<(), ActionError> {
    let target = cat.target(args.target(0)?);
    let heading = cat.direction(target.position, Orientation::Toward);
    cat.sprite
        .set_state(&format!("{}-{}", args.action, heading.facing.as_str()));
    halt(cat);
    Ok(())
}

fn linger(cat: &mut Cat, args: &Args<'_>) -> Result<bool, ActionError> {
    let target = cat.target(args.target(0)?);
    let (max_t, min_t, max_d) = (args.number(1)?, args.number(2)?, args.number(3)?);
    let elapsed = cat.actions().elapsed();
    Ok(elapsed >= max_t || (elapsed >= min_t && target.distance >= max_d))
}

fn attack(cat: &mut Cat, args: &Args<'_>) -> Result<(), ActionError> {
    let target_ref = args.target(0)?;
    let target = cat.target(target_ref);
    if target.absolute.y > 30.0 {
        cat.clear_future_actions();
        cat.change_current_action("crouch", Bindings::new().execute([Arg::from(target_ref)]))?;
        cat.enqueue_action(
            "jump",
            Bindings::new()
                .execute([Arg::from(target_ref), Arg::from(SolutionFlag::Low)])
                .condition([Arg::from(true)]),
        )?;
        return cat.enqueue_action("land", Bindings::new());
    }

    let heading = cat.direction(target.position, Orientation::Toward);
    cat.sprite
        .set_state(&format!("attack-{}", heading.facing.as_str()));
    cat.sprite.set_repeat(false);
    halt(cat);
    cat.audio.play("attack");
    Ok(())
}

fn stride(cat: &mut Cat, args: &Args<'_>, gait: Gait) -> Result<(), ActionError> {
    let target = cat.target(args.target(0)?);
    let heading = cat.direction(target.position, Orientation::Toward);
    cat.sprite
        .set_state(&format!("{}-{}", args.action, heading.facing.as_str()));

    let base = match gait {
        Gait::Walk => cat.speeds.walk,
        Gait::Run => cat.speeds.run,
        Gait::Sneak => cat.speeds.sneak,
    };
    let velocity_x = heading.sign * (base + cat.speed_modifier(GROUND_BONUS));
    cat.physics
        .set_velocity_components(Some(velocity_x), Some(0.0));
    cat.physics.set_acceleration_components(Some(0.0), Some(0.0));
    Ok(())
}

fn run_arrived(cat: &mut Cat, args: &Args<'_>) -> Result<bool, ActionError> {
    let target = cat.target(args.target(0)?);
    let (max_t, min_x) = (args.number(1)?, args.number(2)?);
    Ok(cat.actions().elapsed() >= max_t || target.absolute.x <= min_x)
}

fn approach_arrived(cat: &mut Cat, args: &Args<'_>) -> Result<bool, ActionError> {
    let target = cat.target(args.target(0)?);
    let (max_t, min_t) = (args.number(1)?, args.number(2)?);
    let (min_x, max_x) = (args.number(3)?, args.number(4)?);
    let elapsed = cat.actions().elapsed();
    Ok(elapsed >= max_t
        || target.absolute.x <= min_x
        || (elapsed >= min_t && target.absolute.x >= max_x))
}

/// Turns a stride around when the target crosses to the other side.
fn steer(cat: &mut Cat, args: &Args<'_>) -> Result<(), ActionError> {
    let target = cat.target(args.target(0)?);
    let heading = cat.direction(target.position, Orientation::Toward);
    let velocity_x = cat.physics.velocity().x;
    if heading.sign != sign(velocity_x) {
        cat.sprite
            .switch_state(&format!("{}-{}", args.action, heading.facing.as_str()));
        cat.physics
            .set_velocity_components(Some(-velocity_x), Some(0.0));
    }
    Ok(())
}

fn jump(cat: &mut Cat, args: &Args<'_>) -> Result<(), ActionError> {
    let target_ref = args.target(0)?;
    let target = cat.target(target_ref);
    let mut aim = target.position;
    if target.absolute.x < 20.0 && target.absolute.y < 20.0 {
        let nudge = Vector2::new(sign(cat.snapshot().player.relative.x), 1.0);
        aim += nudge * 20.0;
    }

    let heading = cat.direction(aim, Orientation::Toward);
    cat.sprite
        .set_state(&format!("jump-{}", heading.facing.as_str()));
    cat.sprite.set_repeat(false);

    match solve(cat, args.flag(1), aim) {
        Some(velocity) => {
            launch(cat, velocity);
            Ok(())
        }
        None => {
            cat.clear_future_actions();
            let target = Arg::from(target_ref);
            cat.change_current_action(
                "run",
                Bindings::new()
                    .execute([target])
                    .condition([target, Arg::Number(6000.0), Arg::Number(30.0)])
                    .update([target]),
            )
        }
    }
}

fn wall_jump(cat: &mut Cat, args: &Args<'_>) -> Result<(), ActionError> {
    let target = cat.target(args.target(0)?);
    let midpoint = cat.physics.midpoint();
    let center = cat.physics.boundary().midpoint();
    let mut aim = target.position;
    if target.absolute.x < 10.0 {
        aim = (center - midpoint).signs() * 20.0 + midpoint;
    }

    let heading = cat.direction(aim, Orientation::Toward);
    cat.sprite
        .set_state(&format!("jump-{}", heading.facing.as_str()));
    cat.sprite.set_repeat(false);

    let flag = args.flag(1);
    let velocity = solve(cat, flag, aim)
        .or_else(|| {
            let position = cat.physics.position();
            let hop = (center - position).signs() * 20.0 + position;
            solve(cat, flag, hop)
        })
        .unwrap_or(Vector2::ZERO);
    launch(cat, velocity);
    Ok(())
}

fn solve(cat: &Cat, flag: SolutionFlag, aim: Vector2) -> Option<Vector2> {
    projectile::launch_velocity(
        flag,
        cat.physics.midpoint(),
        aim,
        cat.speeds.jump + cat.speed_modifier(JUMP_BONUS),
        cat.speeds.min_jump(),
        cat.physics.gravity(),
    )
}

/// Applies the impulse and paces the jump animation over the flight.
fn launch(cat: &mut Cat, velocity: Vector2) {
    let flight = projectile::time_of_flight(
        cat.physics.midpoint().y,
        0.0,
        velocity.y,
        cat.physics.gravity().y,
    );
    cat.physics.jump(velocity);
    let frames = cat.sprite.frame_count() as f32;
    cat.sprite.set_frame_duration(flight / frames);
    cat.audio.play("jump_1");
}

fn jump_landed(cat: &mut Cat, args: &Args<'_>) -> Result<bool, ActionError> {
    let boundary = cat.snapshot().boundary;
    if boundary.bottom.hit {
        return Ok(true);
    }
    if !boundary.side_hit() {
        return Ok(false);
    }

    let grab = args.toggle(0)?;
    if !grab || boundary.top.absolute.y < 20.0 || boundary.bottom.absolute.y < 20.0 {
        bounce_off_wall(cat);
        return Ok(false);
    }

    let wall = if boundary.left.hit {
        boundary.left
    } else {
        boundary.right
    };
    let floor = cat.physics.hitbox().corners().b.y;
    cat.physics
        .set_position_components(Some(wall.position.x), Some(floor));
    cat.clear_future_actions();
    cat.enqueue_action(
        "hang",
        Bindings::new()
            .execute([Arg::from(TargetRef::Wall(wall.id))])
            .condition([
                Arg::from(TargetRef::Player),
                Arg::Number(1000.0),
                Arg::Number(0.0),
                Arg::Number(0.0),
            ]),
    )?;
    Ok(true)
}

fn bounce_off_wall(cat: &mut Cat) {
    let velocity = cat.physics.velocity().reflected_x();
    cat.physics.set_velocity(velocity);
    cat.sprite
        .switch_state(&format!("jump-{}", facing_of(velocity.x).as_str()));
    cat.audio.play("land");
}

fn stop_at_ceiling(cat: &mut Cat) {
    if cat.snapshot().boundary.top.hit {
        cat.physics.set_velocity_components(None, Some(0.0));
    }
}

/// Resolves an optional wall argument, defaulting to the touched side wall.
fn wall_or_contact(cat: &Cat, wall: Option<WallId>) -> WallInfo {
    let boundary = cat.snapshot().boundary;
    match wall {
        Some(id) => *boundary.wall(id),
        None if boundary.left.hit => boundary.left,
        None => boundary.right,
    }
}

fn climb_state(wall: WallId, heading: f32) -> String {
    let vertical = if heading < 0.0 { "down" } else { "up" };
    format!("climb-{}-{vertical}", wall.as_str())
}

fn climb(cat: &mut Cat, wall: WallId, heading: f32) {
    cat.sprite.set_state(&climb_state(wall, heading));
    let speed = cat.speeds.climb + cat.speed_modifier(CLIMB_BONUS);
    cat.physics
        .set_velocity_components(Some(0.0), Some(heading * speed));
    cat.physics.set_acceleration_components(Some(0.0), Some(0.0));
}

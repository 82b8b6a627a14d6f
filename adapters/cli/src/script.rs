//! Scripted player input for headless runs.

use std::f32::consts::TAU;

use cat_chase_core::{Command, Rectangle, Vector2};

/// Frames the ability is charged before each release.
const CHARGE_FRAMES: u32 = 20;
/// Frames for one full horizontal sweep of the cursor.
const SWEEP_FRAMES: f32 = 480.0;
/// Frames for one full vertical bob of the cursor.
const BOB_FRAMES: f32 = 150.0;
/// Cursor stays one toy width away from the right and top edges.
const MARGIN: f32 = 8.0;

/// Deterministic cursor path that sweeps the playfield in a Lissajous figure.
#[derive(Clone, Debug)]
pub(crate) struct CursorScript {
    center: Vector2,
    reach: Vector2,
    ability_every: u32,
}

impl CursorScript {
    pub(crate) fn new(boundary: Rectangle, ability_every: u32) -> Self {
        let corners = boundary.corners();
        let lower = corners.b;
        let upper = corners.d - Vector2::new(MARGIN, MARGIN);
        Self {
            center: (lower + upper) / 2.0,
            reach: (upper - lower) / 2.0,
            ability_every,
        }
    }

    /// Commands issued before the tick of `frame`.
    pub(crate) fn commands(&self, frame: u32) -> Vec<Command> {
        let mut commands = vec![Command::MoveCursor {
            position: self.position(frame),
        }];

        if self.ability_every > 0 {
            let phase = frame % self.ability_every;
            if phase == 0 {
                commands.push(Command::PressAbility);
            } else if phase == CHARGE_FRAMES.min(self.ability_every - 1) {
                commands.push(Command::ReleaseAbility);
            }
        }
        commands
    }

    fn position(&self, frame: u32) -> Vector2 {
        let t = frame as f32;
        let sweep = (TAU * t / SWEEP_FRAMES).sin();
        let bob = (TAU * t / BOB_FRAMES).cos();
        self.center + self.reach * Vector2::new(sweep, bob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(ability_every: u32) -> CursorScript {
        let boundary = Rectangle::new(Vector2::new(0.0, 100.0), Vector2::new(368.0, 100.0));
        CursorScript::new(boundary, ability_every)
    }

    #[test]
    fn cursor_stays_on_the_playfield() {
        let script = script(0);
        for frame in 0..1000 {
            let commands = script.commands(frame);
            assert_eq!(commands.len(), 1);
            let Command::MoveCursor { position } = commands[0] else {
                panic!("expected a cursor move");
            };
            assert!((0.0..=360.0 + 1e-3).contains(&position.x), "{position:?}");
            assert!((0.0..=92.0 + 1e-3).contains(&position.y), "{position:?}");
        }
    }

    #[test]
    fn ability_is_charged_then_released() {
        let script = script(90);
        assert!(script.commands(0).contains(&Command::PressAbility));
        assert!(script.commands(20).contains(&Command::ReleaseAbility));
        assert_eq!(script.commands(21).len(), 1);
        assert!(script.commands(90).contains(&Command::PressAbility));
    }
}

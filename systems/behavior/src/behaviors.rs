//! Composite behaviors expanded into queued action chains.

use cat_chase_core::{SolutionFlag, WallId};
use cat_chase_system_actions::{ActionError, Bindings};

use crate::{Arg, Cat, TargetRef};

/// Distance kept from a side wall before jumping at it.
const WALL_APPROACH: f32 = 50.0;

/// Named sequence of actions chosen by the planner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Sit then idle near the target, or hang on if stuck to a wall mid-air.
    Relax(TargetRef),
    /// Sit facing the target for a few seconds.
    Sit(TargetRef),
    /// Run then walk after the target.
    Chase(TargetRef),
    /// Run up to the target and swipe at it.
    Attack(TargetRef),
    /// Creep toward the target.
    Sneak(TargetRef),
    /// Climb along the touched wall toward the target.
    Climb(TargetRef),
    /// Crouch, jump at the target, and land.
    Pounce {
        /// Jump target.
        target: TargetRef,
        /// Skip the crouch wind-up.
        skip: bool,
        /// Ballistic solution variant.
        flag: SolutionFlag,
        /// Grab onto walls hit mid-flight.
        hold: bool,
    },
    /// Crouch, wait a short random time, feign sitting, then pounce.
    Trick {
        /// Jump target.
        target: TargetRef,
        /// Ballistic solution variant.
        flag: SolutionFlag,
        /// Grab onto walls hit mid-flight.
        hold: bool,
    },
    /// Crouch and wait a longer random time before pouncing.
    Suspense {
        /// Jump target.
        target: TargetRef,
        /// Ballistic solution variant.
        flag: SolutionFlag,
        /// Grab onto walls hit mid-flight.
        hold: bool,
    },
    /// Run to the nearer side wall and jump onto it.
    Hang {
        /// Target the wall is chosen relative to.
        target: TargetRef,
        /// Ballistic solution variant.
        flag: SolutionFlag,
    },
    /// Run to the nearer side wall and jump off it.
    Bounce {
        /// Target the wall is chosen relative to.
        target: TargetRef,
        /// Ballistic solution variant.
        flag: SolutionFlag,
    },
    /// Leap off the wall toward the target.
    Aerial {
        /// Jump target.
        target: TargetRef,
        /// Ballistic solution variant.
        flag: SolutionFlag,
        /// Hang briefly before leaping.
        hang_first: bool,
    },
    /// Three pounces in a row.
    Hops {
        /// Jump target.
        target: TargetRef,
        /// Skip the crouch before the first hop.
        skip: bool,
        /// Solution variant of each hop.
        flags: [SolutionFlag; 3],
    },
}

impl Behavior {
    /// Target the behavior is aimed at.
    #[must_use]
    pub fn target(&self) -> TargetRef {
        match *self {
            Self::Relax(target)
            | Self::Sit(target)
            | Self::Chase(target)
            | Self::Attack(target)
            | Self::Sneak(target)
            | Self::Climb(target)
            | Self::Pounce { target, .. }
            | Self::Trick { target, .. }
            | Self::Suspense { target, .. }
            | Self::Hang { target, .. }
            | Self::Bounce { target, .. }
            | Self::Aerial { target, .. }
            | Self::Hops { target, .. } => target,
        }
    }
}

fn n(value: f32) -> Arg {
    Arg::Number(value)
}

impl Cat {
    /// Enqueues the action chain of `behavior`.
    pub fn perform(&mut self, behavior: Behavior) -> Result<(), ActionError> {
        match behavior {
            Behavior::Relax(target) => self.relax(target),
            Behavior::Sit(target) => {
                let t = Arg::from(target);
                self.enqueue_action(
                    "sit",
                    Bindings::new()
                        .execute([t])
                        .condition([t, n(3000.0), n(2000.0), n(40.0)]),
                )
            }
            Behavior::Chase(target) => self.chase(target),
            Behavior::Attack(target) => {
                let t = Arg::from(target);
                self.enqueue_action(
                    "run",
                    Bindings::new()
                        .execute([t])
                        .condition([t, n(10000.0), n(15.0)])
                        .update([t]),
                )?;
                self.enqueue_action("attack", Bindings::new().execute([t]))
            }
            Behavior::Sneak(target) => {
                let t = Arg::from(target);
                self.enqueue_action(
                    "sneak",
                    Bindings::new()
                        .execute([t])
                        .condition([t, n(6000.0), n(4000.0), n(15.0), n(40.0)])
                        .update([t]),
                )
            }
            Behavior::Climb(target) => {
                let t = Arg::from(target);
                self.enqueue_action(
                    "climb",
                    Bindings::new()
                        .execute([t])
                        .condition([t, n(6000.0), n(10.0)])
                        .update([t]),
                )
            }
            Behavior::Pounce {
                target,
                skip,
                flag,
                hold,
            } => self.pounce(target, skip, flag, hold),
            Behavior::Trick { target, flag, hold } => {
                let delay = self.draw() * 2500.0;
                self.crouch_and_wait(target, delay)?;
                let player = Arg::from(TargetRef::Player);
                self.enqueue_action(
                    "sit",
                    Bindings::new()
                        .execute([player])
                        .condition([player, n(2000.0), n(1500.0), n(50.0)]),
                )?;
                self.leap(target, flag, hold)
            }
            Behavior::Suspense { target, flag, hold } => {
                let delay = self.draw() * 5000.0;
                self.crouch_and_wait(target, delay)?;
                self.leap(target, flag, hold)
            }
            Behavior::Hang { target, flag } => self.wall_approach(target, flag, true),
            Behavior::Bounce { target, flag } => self.wall_approach(target, flag, false),
            Behavior::Aerial {
                target,
                flag,
                hang_first,
            } => {
                let t = Arg::from(target);
                if hang_first {
                    self.enqueue_action(
                        "hang",
                        Bindings::new().condition([t, n(500.0), n(0.0), n(0.0)]),
                    )?;
                }
                self.enqueue_action("wall-jump", Bindings::new().execute([t, Arg::from(flag)]))?;
                self.enqueue_action("land", Bindings::new())
            }
            Behavior::Hops {
                target,
                skip,
                flags,
            } => {
                self.pounce(target, skip, flags[0], false)?;
                self.pounce(target, false, flags[1], false)?;
                self.pounce(target, false, flags[2], false)
            }
        }
    }

    fn relax(&mut self, target: TargetRef) -> Result<(), ActionError> {
        let t = Arg::from(target);
        let boundary = self.snapshot().boundary;
        if !boundary.bottom.hit && boundary.side_hit() {
            return self.enqueue_action(
                "hang",
                Bindings::new().condition([t, n(1000.0), n(0.0), n(0.0)]),
            );
        }
        let condition = [t, n(1000.0), n(500.0), n(100.0)];
        self.enqueue_action("sit", Bindings::new().execute([t]).condition(condition))?;
        self.enqueue_action("idle", Bindings::new().execute([t]).condition(condition))
    }

    fn chase(&mut self, target: TargetRef) -> Result<(), ActionError> {
        let t = Arg::from(target);
        self.enqueue_action(
            "run",
            Bindings::new()
                .execute([t])
                .condition([t, n(6000.0), n(30.0)])
                .update([t]),
        )?;
        self.enqueue_action(
            "walk",
            Bindings::new()
                .execute([t])
                .condition([t, n(6000.0), n(0.0), n(10.0), n(30.0)])
                .update([t]),
        )
    }

    fn pounce(
        &mut self,
        target: TargetRef,
        skip: bool,
        flag: SolutionFlag,
        hold: bool,
    ) -> Result<(), ActionError> {
        if !skip {
            self.enqueue_action("crouch", Bindings::new().execute([Arg::from(target)]))?;
        }
        self.leap(target, flag, hold)
    }

    /// Jump followed by the landing.
    fn leap(&mut self, target: TargetRef, flag: SolutionFlag, hold: bool) -> Result<(), ActionError> {
        self.enqueue_action(
            "jump",
            Bindings::new()
                .execute([Arg::from(target), Arg::from(flag)])
                .condition([Arg::from(hold)]),
        )?;
        self.enqueue_action("land", Bindings::new())
    }

    fn crouch_and_wait(&mut self, target: TargetRef, delay: f32) -> Result<(), ActionError> {
        let t = Arg::from(target);
        self.enqueue_action("crouch", Bindings::new().execute([t]))?;
        self.enqueue_action(
            "wait",
            Bindings::new().execute([t]).condition([n(delay)]).update([t]),
        )
    }

    /// Runs beside the side wall nearer to `target`, then jumps at it.
    fn wall_approach(
        &mut self,
        target: TargetRef,
        flag: SolutionFlag,
        grab: bool,
    ) -> Result<(), ActionError> {
        let aim = self.target(target).position;
        let boundary = self.snapshot().boundary;
        let to_left = (aim.x - boundary.left.position.x).abs();
        let to_right = (aim.x - boundary.right.position.x).abs();
        let (wall, x) = if to_left < to_right {
            (WallId::Left, boundary.left.position.x + WALL_APPROACH)
        } else {
            (WallId::Right, boundary.right.position.x - WALL_APPROACH)
        };

        self.enqueue_action(
            "run-to",
            Bindings::new()
                .execute([n(x)])
                .condition([n(x), n(6000.0), n(5.0)]),
        )?;
        let wall = Arg::from(TargetRef::Wall(wall));
        self.enqueue_action("crouch", Bindings::new().execute([wall]))?;
        self.enqueue_action(
            "jump",
            Bindings::new()
                .execute([wall, Arg::from(flag)])
                .condition([Arg::from(grab)]),
        )?;
        self.enqueue_action("land", Bindings::new())
    }
}

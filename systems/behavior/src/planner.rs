//! Decision table mapping recent history, difficulty, and spatial zone to a
//! [`Behavior`].
//!
//! Each `(Category, Difficulty)` pair owns an ordered list of [`Rule`]s. The
//! first rule whose guards all hold wins; the last rule of every list has no
//! guards. Several intermediate-difficulty rows measure zones on the
//! predicted player but aim the behavior at the current player.

use cat_chase_core::{Difficulty, SolutionFlag, Toy};
use cat_chase_system_observation::{ActionKeyword, ObservationSnapshot, TargetInfo};

use crate::{Behavior, TargetRef};

/// Class of the most recently completed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// `sit` or `idle`.
    SitIdle,
    /// `walk` or `run`.
    WalkRun,
    /// `sneak` or `attack`.
    SneakAttack,
    /// `wait` or `crouch`.
    WaitCrouch,
    /// `jump`.
    Jump,
    /// `land`.
    Land,
    /// `hang`.
    Hang,
    /// `climb`.
    Climb,
    /// No history or any other label.
    Relax,
}

impl Category {
    /// Classifies the exact label of the latest history entry.
    #[must_use]
    pub fn from_recent(label: Option<&String>) -> Self {
        match label.map(String::as_str) {
            Some("sit" | "idle") => Self::SitIdle,
            Some("walk" | "run") => Self::WalkRun,
            Some("sneak" | "attack") => Self::SneakAttack,
            Some("wait" | "crouch") => Self::WaitCrouch,
            Some("jump") => Self::Jump,
            Some("land") => Self::Land,
            Some("hang") => Self::Hang,
            Some("climb") => Self::Climb,
            _ => Self::Relax,
        }
    }
}

/// Vertical band the target falls into, on the signed relative y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    /// `rel.y < 20`.
    LineOfSight,
    /// `20 <= rel.y < 70`.
    Near,
    /// Everything else.
    Far,
}

impl Zone {
    /// Classifies a signed vertical offset.
    #[must_use]
    pub fn of(relative_y: f32) -> Self {
        if relative_y < 20.0 {
            Self::LineOfSight
        } else if relative_y < 70.0 {
            Self::Near
        } else {
            Self::Far
        }
    }
}

/// Snapshot entry a guard measures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Current player.
    Player,
    /// Predicted player.
    Predict,
}

/// Predicate over the snapshot and the planning draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guard {
    /// The source lies in the zone.
    Zone(Source, Zone),
    /// Signed relative x of the source is below the threshold.
    RelXBelow(Source, f32),
    /// Absolute vertical offset of the source is below the threshold.
    AbsYBelow(Source, f32),
    /// The planning draw is below the threshold.
    ChanceBelow(f32),
    /// No history entry contains the keyword.
    CountIsZero(ActionKeyword),
    /// The player uses the toy.
    ToyIs(Toy),
}

impl Guard {
    /// Evaluates the guard.
    #[must_use]
    pub fn holds(&self, snapshot: &ObservationSnapshot, chance: f32) -> bool {
        match *self {
            Self::Zone(source, zone) => Zone::of(info(snapshot, source).relative.y) == zone,
            Self::RelXBelow(source, limit) => info(snapshot, source).relative.x < limit,
            Self::AbsYBelow(source, limit) => info(snapshot, source).absolute.y < limit,
            Self::ChanceBelow(limit) => chance < limit,
            Self::CountIsZero(keyword) => snapshot.history.count(keyword) == 0,
            Self::ToyIs(toy) => snapshot.player.toy == toy,
        }
    }
}

fn info(snapshot: &ObservationSnapshot, source: Source) -> &TargetInfo {
    match source {
        Source::Player => &snapshot.player,
        Source::Predict => &snapshot.predict,
    }
}

/// Guarded behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    /// Conditions that must all hold.
    pub guards: &'static [Guard],
    /// Behavior chosen when they do.
    pub behavior: Behavior,
}

impl Rule {
    /// Reports whether every guard holds.
    #[must_use]
    pub fn matches(&self, snapshot: &ObservationSnapshot, chance: f32) -> bool {
        self.guards.iter().all(|guard| guard.holds(snapshot, chance))
    }
}

/// Picks the behavior of the first matching rule.
#[must_use]
pub fn choose(
    category: Category,
    difficulty: Difficulty,
    snapshot: &ObservationSnapshot,
    chance: f32,
) -> Behavior {
    rules_for(category, difficulty)
        .iter()
        .find(|rule| rule.matches(snapshot, chance))
        .map_or(Behavior::Relax(TargetRef::Player), |rule| rule.behavior)
}

/// Ordered rules for a category at a difficulty.
#[must_use]
pub fn rules_for(category: Category, difficulty: Difficulty) -> &'static [Rule] {
    use Difficulty::{Easy, Hard, Intermediate};

    match (category, difficulty) {
        (Category::SitIdle, Easy) => SIT_IDLE_EASY,
        (Category::SitIdle, Intermediate) => SIT_IDLE_INTERMEDIATE,
        (Category::SitIdle, Hard) => SIT_IDLE_HARD,
        (Category::WalkRun, Easy) => WALK_RUN_EASY,
        (Category::WalkRun, Intermediate) => WALK_RUN_INTERMEDIATE,
        (Category::WalkRun, Hard) => WALK_RUN_HARD,
        (Category::SneakAttack, Easy) => SNEAK_ATTACK_EASY,
        (Category::SneakAttack, Intermediate) => SNEAK_ATTACK_INTERMEDIATE,
        (Category::SneakAttack, Hard) => SNEAK_ATTACK_HARD,
        (Category::WaitCrouch, _) => WAIT_CROUCH,
        (Category::Jump, _) | (Category::Relax, _) => RELAX,
        (Category::Land, Easy) => LAND_EASY,
        (Category::Land, Intermediate) => LAND_INTERMEDIATE,
        (Category::Land, Hard) => LAND_HARD,
        (Category::Hang, Easy) => HANG_EASY,
        (Category::Hang, Intermediate) => HANG_INTERMEDIATE,
        (Category::Hang, Hard) => HANG_HARD,
        (Category::Climb, Easy) => CLIMB_EASY,
        (Category::Climb, Intermediate | Hard) => CLIMB_PREDICT,
    }
}

const PL: Source = Source::Player;
const PR: Source = Source::Predict;
const AT_PL: TargetRef = TargetRef::Player;
const AT_PR: TargetRef = TargetRef::Predict;
const LOW: SolutionFlag = SolutionFlag::Low;
const MIN: SolutionFlag = SolutionFlag::Min;
const LOW3: [SolutionFlag; 3] = [LOW, LOW, LOW];

const fn los(source: Source) -> Guard {
    Guard::Zone(source, Zone::LineOfSight)
}

const fn near(source: Source) -> Guard {
    Guard::Zone(source, Zone::Near)
}

const PL_LOS: Guard = los(PL);
const PL_NEAR: Guard = near(PL);
const PR_LOS: Guard = los(PR);
const PR_NEAR: Guard = near(PR);
const ODDS_70: Guard = Guard::ChanceBelow(0.7);

const RELAX: &[Rule] = &[Rule {
    guards: &[],
    behavior: Behavior::Relax(AT_PL),
}];

const WAIT_CROUCH: &[Rule] = &[Rule {
    guards: &[],
    behavior: Behavior::Hops {
        target: AT_PR,
        skip: false,
        flags: LOW3,
    },
}];

const SIT_IDLE_EASY: &[Rule] = &[
    Rule {
        guards: &[PL_LOS, Guard::RelXBelow(PL, 75.0)],
        behavior: Behavior::Attack(AT_PL),
    },
    Rule {
        guards: &[PL_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[PL_NEAR, Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PL_NEAR],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Chase(AT_PL),
    },
];

const SIT_IDLE_INTERMEDIATE: &[Rule] = &[
    Rule {
        guards: &[
            PR_LOS,
            Guard::RelXBelow(PR, 125.0),
            Guard::CountIsZero(ActionKeyword::Wait),
        ],
        behavior: Behavior::Trick {
            target: AT_PL,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 125.0)],
        behavior: Behavior::Attack(AT_PL),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Suspense {
            target: AT_PL,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Bounce {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Chase(AT_PL),
    },
];

const SIT_IDLE_HARD: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 75.0)],
        behavior: Behavior::Attack(AT_PR),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PR),
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Bounce {
            target: AT_PR,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Suspense {
            target: AT_PR,
            flag: MIN,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Chase(AT_PR),
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Hops {
            target: AT_PR,
            skip: false,
            flags: LOW3,
        },
    },
];

const WALK_RUN_EASY: &[Rule] = &[
    Rule {
        guards: &[PL_LOS, Guard::RelXBelow(PL, 50.0)],
        behavior: Behavior::Sneak(AT_PL),
    },
    Rule {
        guards: &[PL_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[PL_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PL_NEAR, Guard::RelXBelow(PL, 50.0)],
        behavior: Behavior::Sneak(AT_PL),
    },
    Rule {
        guards: &[PL_NEAR],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Bounce {
            target: AT_PL,
            flag: LOW,
        },
    },
];

const WALK_RUN_INTERMEDIATE: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 75.0)],
        behavior: Behavior::Attack(AT_PL),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 50.0)],
        behavior: Behavior::Sneak(AT_PL),
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Suspense {
            target: AT_PL,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Trick {
            target: AT_PL,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Hops {
            target: AT_PL,
            skip: false,
            flags: LOW3,
        },
    },
];

const WALK_RUN_HARD: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 50.0)],
        behavior: Behavior::Sneak(AT_PR),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PR),
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PR,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Trick {
            target: AT_PR,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Suspense {
            target: AT_PR,
            flag: MIN,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Hops {
            target: AT_PR,
            skip: false,
            flags: LOW3,
        },
    },
];

const SNEAK_ATTACK_EASY: &[Rule] = &[
    Rule {
        guards: &[PL_LOS, Guard::RelXBelow(PL, 80.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: true,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[PL_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[PL_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PL_NEAR, Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: true,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[PL_NEAR],
        behavior: Behavior::Bounce {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: true,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Chase(AT_PL),
    },
];

const SNEAK_ATTACK_INTERMEDIATE: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 75.0)],
        behavior: Behavior::Relax(AT_PL),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Bounce {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Hops {
            target: AT_PL,
            skip: true,
            flags: LOW3,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: true,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Suspense {
            target: AT_PL,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: true,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Chase(AT_PL),
    },
];

const SNEAK_ATTACK_HARD: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Suspense {
            target: AT_PR,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PR),
    },
    Rule {
        guards: &[PR_NEAR, ODDS_70],
        behavior: Behavior::Hang {
            target: AT_PR,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: true,
            flag: LOW,
            hold: true,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Hops {
            target: AT_PR,
            skip: true,
            flags: LOW3,
        },
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Trick {
            target: AT_PR,
            flag: MIN,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: true,
            flag: LOW,
            hold: false,
        },
    },
];

const LAND_EASY: &[Rule] = &[
    Rule {
        guards: &[PL_LOS, Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Relax(AT_PL),
    },
    Rule {
        guards: &[PL_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[
            PL_NEAR,
            Guard::RelXBelow(PL, 100.0),
            Guard::CountIsZero(ActionKeyword::Hang),
        ],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PL_NEAR, Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PL_NEAR],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[Guard::RelXBelow(PL, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Chase(AT_PL),
    },
];

const LAND_INTERMEDIATE: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 50.0)],
        behavior: Behavior::Sneak(AT_PL),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[
            PR_NEAR,
            Guard::RelXBelow(PR, 100.0),
            Guard::CountIsZero(ActionKeyword::Hang),
        ],
        behavior: Behavior::Hang {
            target: AT_PL,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Chase(AT_PL),
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PL,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Hops {
            target: AT_PL,
            skip: false,
            flags: LOW3,
        },
    },
];

const LAND_HARD: &[Rule] = &[
    Rule {
        guards: &[PR_LOS, Guard::RelXBelow(PR, 75.0)],
        behavior: Behavior::Attack(AT_PR),
    },
    Rule {
        guards: &[PR_LOS],
        behavior: Behavior::Relax(AT_PR),
    },
    Rule {
        guards: &[
            PR_NEAR,
            Guard::RelXBelow(PR, 100.0),
            Guard::CountIsZero(ActionKeyword::Hang),
        ],
        behavior: Behavior::Hang {
            target: AT_PR,
            flag: LOW,
        },
    },
    Rule {
        guards: &[PR_NEAR, Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[PR_NEAR],
        behavior: Behavior::Chase(AT_PR),
    },
    Rule {
        guards: &[Guard::RelXBelow(PR, 100.0)],
        behavior: Behavior::Pounce {
            target: AT_PR,
            skip: false,
            flag: LOW,
            hold: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Hops {
            target: AT_PR,
            skip: false,
            flags: LOW3,
        },
    },
];

const HANG_EASY: &[Rule] = &[
    Rule {
        guards: &[Guard::ToyIs(Toy::Mouse), ODDS_70],
        behavior: Behavior::Aerial {
            target: AT_PL,
            flag: LOW,
            hang_first: false,
        },
    },
    Rule {
        guards: &[Guard::AbsYBelow(PL, 20.0)],
        behavior: Behavior::Aerial {
            target: AT_PL,
            flag: LOW,
            hang_first: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Climb(AT_PL),
    },
];

const HANG_INTERMEDIATE: &[Rule] = &[
    Rule {
        guards: &[Guard::ToyIs(Toy::Mouse), Guard::ChanceBelow(0.8)],
        behavior: Behavior::Aerial {
            target: AT_PL,
            flag: LOW,
            hang_first: false,
        },
    },
    Rule {
        guards: &[Guard::AbsYBelow(PL, 20.0)],
        behavior: Behavior::Aerial {
            target: AT_PL,
            flag: LOW,
            hang_first: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Climb(AT_PL),
    },
];

const HANG_HARD: &[Rule] = &[
    Rule {
        guards: &[Guard::ToyIs(Toy::Mouse), Guard::ChanceBelow(0.9)],
        behavior: Behavior::Aerial {
            target: AT_PR,
            flag: MIN,
            hang_first: false,
        },
    },
    Rule {
        guards: &[Guard::AbsYBelow(PL, 20.0)],
        behavior: Behavior::Aerial {
            target: AT_PR,
            flag: LOW,
            hang_first: false,
        },
    },
    Rule {
        guards: &[],
        behavior: Behavior::Climb(AT_PR),
    },
];

const CLIMB_EASY: &[Rule] = &[Rule {
    guards: &[],
    behavior: Behavior::Aerial {
        target: AT_PL,
        flag: LOW,
        hang_first: true,
    },
}];

const CLIMB_PREDICT: &[Rule] = &[Rule {
    guards: &[],
    behavior: Behavior::Aerial {
        target: AT_PR,
        flag: LOW,
        hang_first: true,
    },
}];

#[cfg(test)]
mod tests {
    use super::*;
    use cat_chase_core::Vector2;

    fn snapshot(player: Vector2, predict: Vector2) -> ObservationSnapshot {
        let mut snapshot = ObservationSnapshot::default();
        snapshot.player.relative = player;
        snapshot.player.absolute = player.abs();
        snapshot.predict.relative = predict;
        snapshot.predict.absolute = predict.abs();
        snapshot
    }

    const CATEGORIES: [Category; 9] = [
        Category::SitIdle,
        Category::WalkRun,
        Category::SneakAttack,
        Category::WaitCrouch,
        Category::Jump,
        Category::Land,
        Category::Hang,
        Category::Climb,
        Category::Relax,
    ];

    #[test]
    fn every_table_ends_with_an_unguarded_rule() {
        for category in CATEGORIES {
            for level in 0..3 {
                let rules = rules_for(category, Difficulty::from_level(level));
                let last = rules.last().expect("table is not empty");
                assert!(last.guards.is_empty(), "{category:?} at {level}");
            }
        }
    }

    #[test]
    fn categories_use_exact_labels() {
        let label = |text: &str| Category::from_recent(Some(&text.to_owned()));
        assert_eq!(label("idle"), Category::SitIdle);
        assert_eq!(label("run"), Category::WalkRun);
        assert_eq!(label("run-to"), Category::Relax);
        assert_eq!(label("wall-jump"), Category::Relax);
        assert_eq!(label("crouch"), Category::WaitCrouch);
        assert_eq!(Category::from_recent(None), Category::Relax);
    }

    #[test]
    fn zones_use_signed_vertical_offset() {
        assert_eq!(Zone::of(-200.0), Zone::LineOfSight);
        assert_eq!(Zone::of(19.9), Zone::LineOfSight);
        assert_eq!(Zone::of(20.0), Zone::Near);
        assert_eq!(Zone::of(69.9), Zone::Near);
        assert_eq!(Zone::of(70.0), Zone::Far);
    }

    #[test]
    fn easy_sit_attacks_close_player() {
        let view = snapshot(Vector2::new(40.0, 10.0), Vector2::new(400.0, 400.0));
        assert_eq!(
            choose(Category::SitIdle, Difficulty::Easy, &view, 0.0),
            Behavior::Attack(TargetRef::Player)
        );
        let far = snapshot(Vector2::new(75.0, 10.0), Vector2::ZERO);
        assert_eq!(
            choose(Category::SitIdle, Difficulty::Easy, &far, 0.0),
            Behavior::Chase(TargetRef::Player)
        );
    }

    #[test]
    fn intermediate_measures_prediction_but_targets_player() {
        let view = snapshot(Vector2::new(500.0, 500.0), Vector2::new(60.0, 40.0));
        assert_eq!(
            choose(Category::SitIdle, Difficulty::Intermediate, &view, 0.5),
            Behavior::Hang {
                target: TargetRef::Player,
                flag: SolutionFlag::Low,
            }
        );
        assert_eq!(
            choose(Category::SitIdle, Difficulty::Intermediate, &view, 0.7),
            Behavior::Suspense {
                target: TargetRef::Player,
                flag: SolutionFlag::Low,
                hold: true,
            }
        );
    }

    #[test]
    fn intermediate_sit_tricks_only_without_recent_wait() {
        let mut view = snapshot(Vector2::ZERO, Vector2::new(100.0, 0.0));
        assert!(matches!(
            choose(Category::SitIdle, Difficulty::Intermediate, &view, 0.0),
            Behavior::Trick { .. }
        ));
        view.history = cat_chase_system_observation::HistoryCounts::from_history(&[
            "wait".to_owned(),
        ]);
        assert_eq!(
            choose(Category::SitIdle, Difficulty::Intermediate, &view, 0.0),
            Behavior::Attack(TargetRef::Player)
        );
    }

    #[test]
    fn hard_hang_prefers_min_arc_for_mouse() {
        let mut view = snapshot(Vector2::new(0.0, 80.0), Vector2::ZERO);
        view.player.toy = Toy::Mouse;
        assert_eq!(
            choose(Category::Hang, Difficulty::Hard, &view, 0.85),
            Behavior::Aerial {
                target: TargetRef::Predict,
                flag: SolutionFlag::Min,
                hang_first: false,
            }
        );
        assert_eq!(
            choose(Category::Hang, Difficulty::Hard, &view, 0.95),
            Behavior::Climb(TargetRef::Predict)
        );
        view.player.toy = Toy::Laser;
        assert_eq!(
            choose(Category::Hang, Difficulty::Easy, &view, 0.0),
            Behavior::Climb(TargetRef::Player)
        );
    }

    #[test]
    fn land_hangs_once_per_history_window() {
        let mut view = snapshot(Vector2::new(90.0, 40.0), Vector2::ZERO);
        assert!(matches!(
            choose(Category::Land, Difficulty::Easy, &view, 0.0),
            Behavior::Hang { .. }
        ));
        view.history = cat_chase_system_observation::HistoryCounts::from_history(&[
            "land".to_owned(),
            "hang".to_owned(),
        ]);
        assert!(matches!(
            choose(Category::Land, Difficulty::Easy, &view, 0.0),
            Behavior::Pounce { hold: false, .. }
        ));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick observation of the world from an agent's point of view.
//!
//! [`Observation::look`] rebuilds an [`ObservationSnapshot`] from scratch
//! every call: wall positions and contact flags, the player's relative
//! position and velocity, a one-step prediction of where the player is
//! heading, and keyword counts over the agent's recent action history.
//! Action functions must read the snapshot afresh whenever they run instead
//! of holding on to values from earlier ticks.

use cat_chase_core::{Rectangle, Toy, Vector2, WallId};

/// Keywords counted across the agent's action history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKeyword {
    /// Matches `sit`.
    Sit,
    /// Matches `idle`.
    Idle,
    /// Matches `walk`.
    Walk,
    /// Matches `run` and therefore also `run-to`.
    Run,
    /// Matches `sneak`.
    Sneak,
    /// Matches `attack`.
    Attack,
    /// Matches `wait`.
    Wait,
    /// Matches `crouch`.
    Crouch,
    /// Matches `jump` and therefore also `wall-jump`.
    Jump,
    /// Matches `land`.
    Land,
    /// Matches `hang`.
    Hang,
    /// Matches `climb` and therefore also `climb-to`.
    Climb,
}

impl ActionKeyword {
    /// Every keyword in counting order.
    pub const ALL: [Self; 12] = [
        Self::Sit,
        Self::Idle,
        Self::Walk,
        Self::Run,
        Self::Sneak,
        Self::Attack,
        Self::Wait,
        Self::Crouch,
        Self::Jump,
        Self::Land,
        Self::Hang,
        Self::Climb,
    ];

    /// Substring searched for in history labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sit => "sit",
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Sneak => "sneak",
            Self::Attack => "attack",
            Self::Wait => "wait",
            Self::Crouch => "crouch",
            Self::Jump => "jump",
            Self::Land => "land",
            Self::Hang => "hang",
            Self::Climb => "climb",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Number of history entries containing each [`ActionKeyword`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryCounts {
    counts: [usize; 12],
}

impl HistoryCounts {
    /// Counts keyword occurrences by substring match over `history`.
    #[must_use]
    pub fn from_history(history: &[String]) -> Self {
        let mut counts = [0; 12];
        for keyword in ActionKeyword::ALL {
            counts[keyword.index()] = history
                .iter()
                .filter(|label| label.contains(keyword.as_str()))
                .count();
        }
        Self { counts }
    }

    /// Number of history entries containing `keyword`.
    #[must_use]
    pub fn count(&self, keyword: ActionKeyword) -> usize {
        self.counts[keyword.index()]
    }
}

/// Observed state of the player or of its predicted position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetInfo {
    /// Toy the player is using.
    pub toy: Toy,
    /// Position of the target.
    pub position: Vector2,
    /// Target position relative to the agent's midpoint.
    pub relative: Vector2,
    /// Component-wise absolute value of `relative`.
    pub absolute: Vector2,
    /// Euclidean distance between the agent and the target.
    pub distance: f32,
    /// Displacement of the target over the last frame.
    pub velocity: Vector2,
}

impl Default for TargetInfo {
    fn default() -> Self {
        Self {
            toy: Toy::Laser,
            position: Vector2::ZERO,
            relative: Vector2::ZERO,
            absolute: Vector2::ZERO,
            distance: 0.0,
            velocity: Vector2::ZERO,
        }
    }
}

/// Observed state of a single boundary wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallInfo {
    /// Wall this entry describes.
    pub id: WallId,
    /// Midpoint of the wall.
    pub position: Vector2,
    /// Wall midpoint relative to the agent's midpoint.
    pub relative: Vector2,
    /// Component-wise absolute value of `relative`.
    pub absolute: Vector2,
    /// Euclidean distance between the agent and the wall midpoint.
    pub distance: f32,
    /// Whether the agent is touching the wall.
    pub hit: bool,
}

impl WallInfo {
    fn new(id: WallId) -> Self {
        Self {
            id,
            position: Vector2::ZERO,
            relative: Vector2::ZERO,
            absolute: Vector2::ZERO,
            distance: 0.0,
            hit: false,
        }
    }

    fn observe(id: WallId, position: Vector2, origin: Vector2, hit: bool) -> Self {
        let relative = position - origin;
        Self {
            id,
            position,
            relative,
            absolute: relative.abs(),
            distance: relative.length(),
            hit,
        }
    }
}

/// Observed state of all four boundary walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryInfo {
    /// Wall at the minimum x edge.
    pub left: WallInfo,
    /// Wall at the maximum x edge.
    pub right: WallInfo,
    /// Ceiling.
    pub top: WallInfo,
    /// Floor.
    pub bottom: WallInfo,
}

impl Default for BoundaryInfo {
    fn default() -> Self {
        Self {
            left: WallInfo::new(WallId::Left),
            right: WallInfo::new(WallId::Right),
            top: WallInfo::new(WallId::Top),
            bottom: WallInfo::new(WallId::Bottom),
        }
    }
}

impl BoundaryInfo {
    /// Looks up the entry for `id`.
    #[must_use]
    pub fn wall(&self, id: WallId) -> &WallInfo {
        match id {
            WallId::Left => &self.left,
            WallId::Right => &self.right,
            WallId::Top => &self.top,
            WallId::Bottom => &self.bottom,
        }
    }

    /// Reports whether the agent touches either side wall.
    #[must_use]
    pub fn side_hit(&self) -> bool {
        self.left.hit || self.right.hit
    }
}

/// Everything the agent knows about the world this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ObservationSnapshot {
    /// Keyword counts over the agent's recent history.
    pub history: HistoryCounts,
    /// Current state of the player.
    pub player: TargetInfo,
    /// One-step prediction of the player.
    pub predict: TargetInfo,
    /// State of the four boundary walls.
    pub boundary: BoundaryInfo,
}

/// Agent-side inputs to [`Observation::look`].
#[derive(Clone, Copy, Debug)]
pub struct Subject<'a> {
    /// Agent hitbox.
    pub hitbox: Rectangle,
    /// Rectangle the agent is confined to.
    pub boundary: Rectangle,
    /// Completed action labels, most recent first.
    pub history: &'a [String],
    /// Label of the action the agent is currently performing.
    pub current_action: Option<&'a str>,
}

/// Read-only view of the player consumed by [`Observation::look`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    /// Toy the player is using.
    pub toy: Toy,
    /// Player hitbox.
    pub hitbox: Rectangle,
    /// Player displacement over the last frame.
    pub trajectory: Vector2,
}

/// Owner of an agent's [`ObservationSnapshot`].
#[derive(Clone, Debug, Default)]
pub struct Observation {
    snapshot: ObservationSnapshot,
}

impl Observation {
    /// Creates an observation with an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot computed by the latest [`Observation::look`].
    #[must_use]
    pub fn snapshot(&self) -> &ObservationSnapshot {
        &self.snapshot
    }

    /// Recomputes the snapshot from the agent and the player.
    ///
    /// The prediction adds the player's velocity from the previous snapshot
    /// to its current velocity, so calling `look` twice in one tick shifts
    /// the prediction.
    pub fn look(&mut self, subject: &Subject<'_>, player: &PlayerView) {
        let own = subject.hitbox.corners();
        let origin = subject.hitbox.midpoint();
        let bounds = subject.boundary.corners();

        let left = (bounds.a + bounds.b) / 2.0;
        let mut right = (bounds.c + bounds.d) / 2.0;
        let top = (bounds.d + bounds.a) / 2.0;
        let mut bottom = (bounds.b + bounds.c) / 2.0;
        // Walls are inclusive pixel rows on the rendered canvas.
        right.x -= 1.0;
        bottom.y += 1.0;

        let running = subject
            .current_action
            .is_some_and(|label| label.contains(ActionKeyword::Run.as_str()));

        let boundary = BoundaryInfo {
            left: WallInfo::observe(WallId::Left, left, origin, own.b.x <= left.x),
            right: WallInfo::observe(WallId::Right, right, origin, own.d.x >= right.x),
            top: WallInfo::observe(WallId::Top, top, origin, own.a.y >= top.y),
            // Counts as grounded while running; the run cycle lifts both feet for a frame.
            bottom: WallInfo::observe(
                WallId::Bottom,
                bottom,
                origin,
                own.c.y <= bottom.y || running,
            ),
        };

        let relative = player.hitbox.relative(&subject.hitbox);
        let player_position = player.hitbox.midpoint();
        let player_info = TargetInfo {
            toy: player.toy,
            position: player_position,
            relative,
            absolute: relative.abs(),
            distance: relative.length(),
            velocity: player.trajectory,
        };

        let predicted_velocity = player.trajectory + self.snapshot.player.velocity;
        let predicted_position = (player_position + predicted_velocity).limited(
            bounds.a.x,
            bounds.c.x,
            bounds.b.y,
            bounds.d.y,
        );
        let predicted_relative = predicted_position - origin;
        let predict = TargetInfo {
            toy: player.toy,
            position: predicted_position,
            relative: predicted_relative,
            absolute: predicted_relative.abs(),
            distance: predicted_relative.length(),
            velocity: predicted_velocity,
        };

        self.snapshot = ObservationSnapshot {
            history: HistoryCounts::from_history(subject.history),
            player: player_info,
            predict,
            boundary,
        };
    }
}

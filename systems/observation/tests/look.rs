use cat_chase_core::{Rectangle, Toy, Vector2};
use cat_chase_system_observation::{
    ActionKeyword, Observation, ObservationSnapshot, PlayerView, Subject,
};

fn boundary() -> Rectangle {
    Rectangle::new(Vector2::new(0.0, 100.0), Vector2::new(368.0, 100.0))
}

fn cat_hitbox(x: f32, y: f32) -> Rectangle {
    Rectangle::new(Vector2::new(x, y + 16.0), Vector2::new(24.0, 16.0))
}

fn player(x: f32, y: f32, trajectory: Vector2) -> PlayerView {
    PlayerView {
        toy: Toy::Laser,
        hitbox: Rectangle::new(Vector2::new(x, y), Vector2::new(8.0, 8.0)),
        trajectory,
    }
}

fn look(
    observation: &mut Observation,
    hitbox: Rectangle,
    history: &[String],
    current_action: Option<&str>,
    player: &PlayerView,
) -> ObservationSnapshot {
    let subject = Subject {
        hitbox,
        boundary: boundary(),
        history,
        current_action,
    };
    observation.look(&subject, player);
    *observation.snapshot()
}

#[test]
fn walls_include_pixel_correction() {
    let mut observation = Observation::new();
    let snapshot = look(
        &mut observation,
        cat_hitbox(100.0, 1.0),
        &[],
        None,
        &player(150.0, 20.0, Vector2::ZERO),
    );

    let walls = snapshot.boundary;
    assert_eq!(walls.left.position, Vector2::new(0.0, 50.0));
    assert_eq!(walls.right.position, Vector2::new(367.0, 50.0));
    assert_eq!(walls.top.position, Vector2::new(184.0, 100.0));
    assert_eq!(walls.bottom.position, Vector2::new(184.0, 1.0));
    assert_eq!(walls.left.relative, Vector2::new(-112.0, 41.0));
    assert_eq!(walls.left.absolute, Vector2::new(112.0, 41.0));
    assert!(walls.bottom.hit);
    assert!(!walls.left.hit && !walls.right.hit && !walls.top.hit);
}

#[test]
fn side_wall_contact_is_detected() {
    let mut observation = Observation::new();
    let snapshot = look(
        &mut observation,
        cat_hitbox(344.0, 40.0),
        &[],
        None,
        &player(150.0, 20.0, Vector2::ZERO),
    );

    assert!(snapshot.boundary.right.hit);
    assert!(!snapshot.boundary.bottom.hit);
    assert!(snapshot.boundary.side_hit());
}

#[test]
fn running_forces_floor_contact() {
    let mut observation = Observation::new();
    let view = player(150.0, 20.0, Vector2::ZERO);

    let airborne = look(&mut observation, cat_hitbox(100.0, 10.0), &[], None, &view);
    assert!(!airborne.boundary.bottom.hit);

    let running = look(
        &mut observation,
        cat_hitbox(100.0, 10.0),
        &[],
        Some("run-to"),
        &view,
    );
    assert!(running.boundary.bottom.hit);
}

#[test]
fn player_is_reported_relative_to_agent() {
    let mut observation = Observation::new();
    let snapshot = look(
        &mut observation,
        cat_hitbox(100.0, 1.0),
        &[],
        None,
        &player(150.0, 20.0, Vector2::new(2.0, 0.0)),
    );

    assert_eq!(snapshot.player.toy, Toy::Laser);
    assert_eq!(snapshot.player.position, Vector2::new(154.0, 16.0));
    assert_eq!(snapshot.player.relative, Vector2::new(42.0, 7.0));
    assert_eq!(snapshot.player.absolute, Vector2::new(42.0, 7.0));
    assert!((snapshot.player.distance - 42.579_338).abs() < 1e-4);
    assert_eq!(snapshot.player.velocity, Vector2::new(2.0, 0.0));
}

#[test]
fn prediction_adds_previous_velocity() {
    let mut observation = Observation::new();
    let cat = cat_hitbox(100.0, 1.0);

    let first = look(
        &mut observation,
        cat,
        &[],
        None,
        &player(150.0, 20.0, Vector2::new(2.0, 0.0)),
    );
    assert_eq!(first.predict.velocity, Vector2::new(2.0, 0.0));
    assert_eq!(first.predict.position, Vector2::new(156.0, 16.0));

    let second = look(
        &mut observation,
        cat,
        &[],
        None,
        &player(153.0, 20.0, Vector2::new(3.0, 0.0)),
    );
    assert_eq!(second.predict.velocity, Vector2::new(5.0, 0.0));
    assert_eq!(second.predict.position, Vector2::new(162.0, 16.0));
    assert_eq!(second.predict.relative, Vector2::new(50.0, 7.0));
}

#[test]
fn prediction_is_clamped_to_boundary() {
    let mut observation = Observation::new();
    let snapshot = look(
        &mut observation,
        cat_hitbox(100.0, 1.0),
        &[],
        None,
        &player(362.0, 20.0, Vector2::new(10.0, 0.0)),
    );

    assert_eq!(snapshot.predict.position, Vector2::new(368.0, 16.0));
}

#[test]
fn history_counts_track_recent_actions() {
    let mut observation = Observation::new();
    let history = ["land", "jump", "crouch", "run", "run-to"].map(String::from);
    let snapshot = look(
        &mut observation,
        cat_hitbox(100.0, 1.0),
        &history,
        None,
        &player(150.0, 20.0, Vector2::ZERO),
    );

    assert_eq!(snapshot.history.count(ActionKeyword::Run), 2);
    assert_eq!(snapshot.history.count(ActionKeyword::Land), 1);
    assert_eq!(snapshot.history.count(ActionKeyword::Sit), 0);
}

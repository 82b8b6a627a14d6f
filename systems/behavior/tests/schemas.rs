use std::{cell::RefCell, collections::HashMap, rc::Rc};

use cat_chase_core::{Animator, Audio, Body, Rectangle, SolutionFlag, Toy, Vector2, WallId};
use cat_chase_system_actions::{ActionError, Actor, Bindings, Step};
use cat_chase_system_behavior::{Arg, Cat, CatConfig, TargetRef};
use cat_chase_system_observation::PlayerView;
use rand::rngs::mock::StepRng;

#[derive(Default)]
struct Recorder {
    sounds: RefCell<Vec<String>>,
}

impl Audio for Recorder {
    fn play(&self, label: &str) {
        self.sounds.borrow_mut().push(label.to_owned());
    }
}

fn cat_at(position: Vector2, audio: Rc<Recorder>) -> Cat {
    cat_with(CatConfig::default(), position, audio)
}

fn cat_with(mut config: CatConfig, position: Vector2, audio: Rc<Recorder>) -> Cat {
    config.initial.body.position = position;
    let boundary = Rectangle::new(Vector2::new(0.0, 100.0), Vector2::new(368.0, 100.0));
    let body = Body::new(config.initial.body, Vector2::new(24.0, 16.0), boundary);
    let sprite = Animator::new(&config.initial.state, HashMap::new(), 4);
    Cat::new(
        config,
        Box::new(body),
        Box::new(sprite),
        audio,
        Box::new(StepRng::new(0, 0)),
    )
}

fn player_at(midpoint: Vector2) -> PlayerView {
    PlayerView {
        toy: Toy::Laser,
        hitbox: Rectangle::new(midpoint + Vector2::new(-4.0, 4.0), Vector2::new(8.0, 8.0)),
        trajectory: Vector2::ZERO,
    }
}

fn jump_at(target: TargetRef, grab: bool) -> Bindings<Arg> {
    Bindings::new()
        .execute([Arg::from(target), Arg::from(SolutionFlag::Low)])
        .condition([Arg::from(grab)])
}

fn labels(cat: &Cat) -> Vec<&str> {
    cat.actions().labels().collect()
}

#[test]
fn jump_launches_toward_reachable_target() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::clone(&audio));
    cat.look(&player_at(Vector2::new(152.0, 40.0)));

    cat.change_current_action("jump", jump_at(TargetRef::Player, false))
        .expect("jump is registered");

    let velocity = cat.physics().velocity();
    assert!(velocity.x > 0.0 && velocity.y > 0.0, "{velocity:?}");
    assert!(velocity.length() <= cat.speeds().jump + 1e-5);
    assert_eq!(cat.physics().acceleration(), Vector2::new(0.0, -0.0005));
    assert_eq!(cat.sprite().state(), "jump-right");
    assert_eq!(*audio.sounds.borrow(), ["jump_1"]);
}

#[test]
fn unreachable_jump_falls_back_to_running() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::clone(&audio));
    cat.look(&player_at(Vector2::new(356.0, 19.0)));
    cat.enqueue_action("jump", jump_at(TargetRef::Player, false))
        .expect("jump is registered");
    cat.enqueue_action("land", Bindings::new())
        .expect("land is registered");

    let jump = cat.actions().current().cloned().expect("queued");
    jump.execute(&mut cat).expect("fallback succeeds");

    assert_eq!(labels(&cat), ["run"]);
    assert_eq!(cat.sprite().state(), "run-right");
    assert_eq!(cat.physics().velocity(), Vector2::new(0.1, 0.0));
    assert!(audio.sounds.borrow().is_empty());
}

#[test]
fn jump_grabs_side_wall_when_holding() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(0.0, 40.0), audio);
    let player = player_at(Vector2::new(150.0, 60.0));
    cat.enqueue_action("jump", jump_at(TargetRef::Player, true))
        .expect("jump is registered");
    cat.enqueue_action("land", Bindings::new())
        .expect("land is registered");

    let step = cat.logic(16.0, &player).expect("tick succeeds");

    assert_eq!(step, Step::Advanced);
    assert_eq!(labels(&cat), ["hang"]);
    assert_eq!(cat.actions().history()[0], "jump");
    assert_eq!(cat.sprite().state(), "hang-left");
    assert_eq!(cat.physics().position(), Vector2::new(0.0, 40.0));
    assert_eq!(cat.physics().velocity(), Vector2::ZERO);
}

#[test]
fn grabbed_wall_is_held_for_one_second() {
    let mut cat = cat_at(Vector2::new(0.0, 40.0), Rc::new(Recorder::default()));
    let player = player_at(Vector2::new(150.0, 60.0));
    cat.enqueue_action("jump", jump_at(TargetRef::Player, true))
        .expect("jump is registered");
    let _ = cat.logic(16.0, &player).expect("tick succeeds");

    let hang = cat.actions().current().expect("hang queued");
    assert_eq!(hang.label(), "hang");
    assert_eq!(
        hang.condition_args(),
        [
            Arg::from(TargetRef::Player),
            Arg::Number(1000.0),
            Arg::Number(0.0),
            Arg::Number(0.0),
        ]
    );

    let mut held = 0.0;
    loop {
        held += 100.0;
        let step = cat.logic(100.0, &player).expect("tick succeeds");
        if step != Step::Waiting {
            assert_eq!(step, Step::Replanned);
            break;
        }
        assert!(held < 1000.0, "still hanging after {held} ms");
    }
    assert_eq!(held, 1000.0);
    assert_eq!(cat.actions().history()[0], "hang");
}

#[test]
fn wall_jump_steps_away_from_target_overhead() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(344.0, 40.0), Rc::clone(&audio));
    // Player is 4 units to the right of the cat, so the cat hops toward the center.
    cat.look(&player_at(Vector2::new(360.0, 90.0)));

    cat.change_current_action(
        "wall-jump",
        Bindings::new().execute([Arg::from(TargetRef::Player), Arg::from(SolutionFlag::Low)]),
    )
    .expect("wall-jump is registered");

    let velocity = cat.physics().velocity();
    assert!(velocity.x < 0.0 && velocity.y > 0.0, "{velocity:?}");
    assert_eq!(cat.sprite().state(), "jump-left");
    assert_eq!(*audio.sounds.borrow(), ["jump_1"]);
}

#[test]
fn wall_jump_drops_in_place_without_a_solution() {
    let audio = Rc::new(Recorder::default());
    let mut config = CatConfig::default();
    config.speeds.jump = 0.01;
    let mut cat = cat_with(config, Vector2::new(0.0, 40.0), Rc::clone(&audio));
    cat.look(&player_at(Vector2::new(150.0, 60.0)));
    cat.enqueue_action(
        "wall-jump",
        Bindings::new().execute([Arg::from(TargetRef::Player), Arg::from(SolutionFlag::Min)]),
    )
    .expect("wall-jump is registered");
    cat.enqueue_action("land", Bindings::new())
        .expect("land is registered");

    let wall_jump = cat.actions().current().cloned().expect("queued");
    wall_jump.execute(&mut cat).expect("wall-jump executes");

    assert_eq!(labels(&cat), ["wall-jump", "land"]);
    assert_eq!(cat.physics().velocity(), Vector2::ZERO);
    assert_eq!(cat.physics().acceleration(), Vector2::new(0.0, -0.0005));
    assert_eq!(*audio.sounds.borrow(), ["jump_1"]);
}

#[test]
fn wall_jump_bounces_off_side_wall_mid_flight() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(0.0, 40.0), Rc::clone(&audio));
    cat.physics_mut().set_velocity(Vector2::new(-0.1, 0.05));
    cat.enqueue_action(
        "wall-jump",
        Bindings::new().execute([Arg::from(TargetRef::Player), Arg::from(SolutionFlag::Low)]),
    )
    .expect("wall-jump is registered");

    let step = cat
        .logic(16.0, &player_at(Vector2::new(150.0, 60.0)))
        .expect("tick succeeds");

    assert_eq!(step, Step::Updated);
    assert_eq!(labels(&cat), ["wall-jump"]);
    assert_eq!(cat.physics().velocity(), Vector2::new(0.1, 0.05));
    assert_eq!(cat.sprite().state(), "jump-right");
    assert_eq!(*audio.sounds.borrow(), ["land"]);
}

#[test]
fn jump_bounces_off_side_wall_without_holding() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(0.0, 40.0), Rc::clone(&audio));
    cat.physics_mut().set_velocity(Vector2::new(-0.1, 0.05));
    cat.enqueue_action("jump", jump_at(TargetRef::Player, false))
        .expect("jump is registered");

    let step = cat
        .logic(16.0, &player_at(Vector2::new(150.0, 60.0)))
        .expect("tick succeeds");

    assert_eq!(step, Step::Updated);
    assert_eq!(labels(&cat), ["jump"]);
    assert_eq!(cat.physics().velocity(), Vector2::new(0.1, 0.05));
    assert_eq!(cat.sprite().state(), "jump-right");
    assert_eq!(*audio.sounds.borrow(), ["land"]);
}

#[test]
fn attack_on_high_target_becomes_pounce() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::clone(&audio));
    cat.look(&player_at(Vector2::new(122.0, 59.0)));

    cat.change_current_action("attack", Bindings::new().execute([Arg::from(TargetRef::Player)]))
        .expect("attack is registered");

    assert_eq!(labels(&cat), ["crouch", "jump", "land"]);
    assert_eq!(cat.sprite().state(), "crouch-right");
    assert!(audio.sounds.borrow().is_empty());
}

#[test]
fn attack_on_level_target_swipes() {
    let audio = Rc::new(Recorder::default());
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::clone(&audio));
    cat.look(&player_at(Vector2::new(90.0, 15.0)));

    cat.change_current_action("attack", Bindings::new().execute([Arg::from(TargetRef::Player)]))
        .expect("attack is registered");

    assert_eq!(labels(&cat), ["attack"]);
    assert_eq!(cat.sprite().state(), "attack-left");
    assert_eq!(*audio.sounds.borrow(), ["attack"]);
}

#[test]
fn climb_speed_scales_with_difficulty() {
    let mut cat = cat_at(Vector2::new(0.0, 40.0), Rc::new(Recorder::default()));
    cat.set_difficulty(2);
    cat.look(&player_at(Vector2::new(50.0, 90.0)));

    cat.change_current_action("climb", Bindings::new().execute([Arg::from(TargetRef::Player)]))
        .expect("climb is registered");

    assert_eq!(cat.sprite().state(), "climb-left-up");
    let velocity = cat.physics().velocity();
    assert_eq!(velocity.x, 0.0);
    assert!((velocity.y - 0.06).abs() < 1e-6, "{velocity:?}");
}

#[test]
fn climb_turns_downward_when_target_drops_below() {
    let mut cat = cat_at(Vector2::new(344.0, 60.0), Rc::new(Recorder::default()));
    let player = Arg::from(TargetRef::Player);
    cat.look(&player_at(Vector2::new(300.0, 20.0)));

    cat.change_current_action(
        "climb",
        Bindings::new()
            .execute([player])
            .condition([player, Arg::Number(5000.0), Arg::Number(5.0)])
            .update([player]),
    )
    .expect("climb is registered");
    assert_eq!(cat.sprite().state(), "climb-right-down");
    assert!((cat.physics().velocity().y + 0.03).abs() < 1e-6);

    let step = cat
        .logic(16.0, &player_at(Vector2::new(300.0, 95.0)))
        .expect("tick succeeds");

    assert_eq!(step, Step::Updated);
    assert_eq!(cat.sprite().state(), "climb-right-up");
    assert_eq!(cat.physics().velocity().x, 0.0);
    assert!((cat.physics().velocity().y - 0.03).abs() < 1e-6);
}

#[test]
fn climb_to_stops_near_height() {
    let mut cat = cat_at(Vector2::new(0.0, 40.0), Rc::new(Recorder::default()));
    let player = player_at(Vector2::new(150.0, 60.0));
    cat.look(&player);

    cat.change_current_action(
        "climb-to",
        Bindings::new()
            .execute([Arg::Number(80.0), Arg::from(TargetRef::Wall(WallId::Left))])
            .condition([Arg::Number(80.0), Arg::Number(3000.0), Arg::Number(5.0)]),
    )
    .expect("climb-to is registered");
    assert_eq!(cat.sprite().state(), "climb-left-up");
    cat.enqueue_action(
        "hang",
        Bindings::new().condition([
            Arg::from(TargetRef::Player),
            Arg::Number(1000.0),
            Arg::Number(0.0),
            Arg::Number(0.0),
        ]),
    )
    .expect("hang is registered");

    let mut climbed = 0.0;
    loop {
        cat.integrate(100.0);
        climbed += 100.0;
        if cat.logic(100.0, &player).expect("tick succeeds") == Step::Advanced {
            break;
        }
        assert!(climbed < 3000.0, "climb-to never arrived");
    }

    assert_eq!(labels(&cat), ["hang"]);
    assert_eq!(cat.actions().history()[0], "climb-to");
    let height = cat.physics().position().y;
    assert!((75.0..80.0).contains(&height), "{height}");
    assert_eq!(cat.physics().velocity(), Vector2::ZERO);
    assert_eq!(cat.sprite().state(), "hang-left");
}

#[test]
fn sit_waits_for_minimum_time_before_leaving() {
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::new(Recorder::default()));
    let far = player_at(Vector2::new(300.0, 9.0));
    let player = Arg::from(TargetRef::Player);
    cat.enqueue_action(
        "sit",
        Bindings::new().execute([player]).condition([
            player,
            Arg::Number(3000.0),
            Arg::Number(2000.0),
            Arg::Number(40.0),
        ]),
    )
    .expect("sit is registered");
    cat.enqueue_action("idle", Bindings::new().execute([player]).condition([
        player,
        Arg::Number(1000.0),
        Arg::Number(0.0),
        Arg::Number(0.0),
    ]))
    .expect("idle is registered");

    assert_eq!(cat.logic(1500.0, &far), Ok(Step::Waiting));
    assert_eq!(cat.logic(600.0, &far), Ok(Step::Advanced));
    assert_eq!(cat.sprite().state(), "idle-right");
}

#[test]
fn walk_and_sneak_give_up_after_max_time() {
    for label in ["walk", "sneak"] {
        let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::new(Recorder::default()));
        let far = player_at(Vector2::new(300.0, 9.0));
        let player = Arg::from(TargetRef::Player);
        cat.look(&far);
        cat.change_current_action(
            label,
            Bindings::new()
                .execute([player])
                .condition([
                    player,
                    Arg::Number(1000.0),
                    Arg::Number(500.0),
                    Arg::Number(5.0),
                    Arg::Number(400.0),
                ])
                .update([player]),
        )
        .expect("stride is registered");
        cat.enqueue_action("sit", Bindings::new().execute([player]).condition([
            player,
            Arg::Number(3000.0),
            Arg::Number(2000.0),
            Arg::Number(40.0),
        ]))
        .expect("sit is registered");

        assert_eq!(cat.logic(600.0, &far), Ok(Step::Updated), "{label}");
        assert_eq!(cat.logic(400.0, &far), Ok(Step::Advanced), "{label}");
        assert_eq!(cat.actions().history()[0], label);
        assert_eq!(cat.sprite().state(), "sit-right");
    }
}

#[test]
fn malformed_arguments_are_reported() {
    let mut cat = cat_at(Vector2::new(100.0, 1.0), Rc::new(Recorder::default()));
    let error = cat
        .change_current_action("run-to", Bindings::new().execute([Arg::from(true)]))
        .expect_err("run-to needs a coordinate");

    assert_eq!(
        error,
        ActionError::InvalidArgument {
            action: "run-to".to_owned(),
            index: 0,
        }
    );
}

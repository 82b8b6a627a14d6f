use cat_chase_system_actions::{
    run_tick, ActionError, ActionFactory, ActionQueue, Actor, Bindings, Step,
};

struct Stub {
    factory: ActionFactory<Stub, i32>,
    queue: ActionQueue<Stub, i32>,
    log: Vec<String>,
    plans: usize,
    ready: bool,
}

impl Stub {
    fn new() -> Self {
        let mut factory = ActionFactory::new();
        let _ = factory.register(
            "instant",
            |agent: &mut Stub, args: &[i32]| {
                agent.log.push(format!("execute instant {args:?}"));
                Ok(())
            },
            |_: &mut Stub, _: &[i32]| Ok(true),
        );
        let _ = factory.register_with_update(
            "hold",
            |agent: &mut Stub, args: &[i32]| {
                agent.log.push(format!("execute hold {args:?}"));
                Ok(())
            },
            |agent: &mut Stub, _: &[i32]| Ok(agent.ready),
            |agent: &mut Stub, args: &[i32]| {
                agent.log.push(format!("update hold {args:?}"));
                Ok(())
            },
        );

        Self {
            factory,
            queue: ActionQueue::new("sit"),
            log: Vec::new(),
            plans: 0,
            ready: false,
        }
    }

    fn enqueue(&mut self, label: &str, bindings: Bindings<i32>) {
        let action = self
            .factory
            .generate(label, bindings)
            .expect("stub schemas are registered");
        self.queue.enqueue(action);
    }
}

impl Actor for Stub {
    type Arg = i32;

    fn actions(&self) -> &ActionQueue<Self, i32> {
        &self.queue
    }

    fn actions_mut(&mut self) -> &mut ActionQueue<Self, i32> {
        &mut self.queue
    }

    fn plan(&mut self) -> Result<(), ActionError> {
        self.plans += 1;
        let action = self
            .factory
            .generate("hold", Bindings::new().execute([7]).update([8]))?;
        self.queue.enqueue(action);
        Ok(())
    }
}

#[test]
fn satisfied_condition_advances_to_next_action() {
    let mut stub = Stub::new();
    stub.enqueue("instant", Bindings::new().execute([1]));
    stub.enqueue("hold", Bindings::new().execute([2]));

    let step = run_tick(&mut stub).expect("tick succeeds");

    assert_eq!(step, Step::Advanced);
    assert_eq!(stub.queue.current_label(), Some("hold"));
    assert_eq!(stub.queue.history(), ["instant", "sit"]);
    assert_eq!(stub.log, ["execute hold [2]"]);
    assert_eq!(stub.plans, 0);
}

#[test]
fn empty_queue_plans_and_executes_without_condition_check() {
    let mut stub = Stub::new();
    stub.ready = true;

    let step = run_tick(&mut stub).expect("tick succeeds");

    assert_eq!(step, Step::Planned);
    assert_eq!(stub.plans, 1);
    assert_eq!(stub.queue.current_label(), Some("hold"));
    assert_eq!(stub.log, ["execute hold [7]"]);
    assert_eq!(stub.queue.history(), ["sit"]);
}

#[test]
fn unsatisfied_condition_runs_update() {
    let mut stub = Stub::new();
    stub.enqueue("hold", Bindings::new().execute([3]).update([4]));

    assert_eq!(run_tick(&mut stub), Ok(Step::Updated));
    assert_eq!(run_tick(&mut stub), Ok(Step::Updated));
    assert_eq!(stub.log, ["update hold [4]", "update hold [4]"]);
}

#[test]
fn completing_last_action_replans() {
    let mut stub = Stub::new();
    stub.enqueue("instant", Bindings::new());

    assert_eq!(run_tick(&mut stub), Ok(Step::Replanned));
    assert_eq!(stub.plans, 1);
    assert_eq!(stub.queue.history(), ["instant", "sit"]);
    assert_eq!(stub.log, ["execute hold [7]"]);
}

#[test]
fn generated_actions_do_not_share_arguments() {
    let stub = Stub::new();
    let first = stub
        .factory
        .generate("hold", Bindings::new().execute([1]).condition([2]).update([3]))
        .expect("registered");
    let second = stub
        .factory
        .generate("hold", Bindings::new().execute([10]))
        .expect("registered");

    assert_eq!(first.execute_args(), [1]);
    assert_eq!(first.condition_args(), [2]);
    assert_eq!(first.update_args(), Some(&[3][..]));
    assert_eq!(second.execute_args(), [10]);
    assert!(second.condition_args().is_empty());
    assert_eq!(second.update_args(), Some(&[][..]));
}

#[test]
fn update_bindings_are_dropped_without_update_function() {
    let stub = Stub::new();
    let action = stub
        .factory
        .generate("instant", Bindings::new().update([5]))
        .expect("registered");

    assert!(!action.has_update());
    assert_eq!(action.update_args(), None);
}

#[test]
fn first_registration_wins() {
    let mut stub = Stub::new();
    let replaced = stub.factory.register(
        "instant",
        |agent: &mut Stub, _: &[i32]| {
            agent.log.push("replacement".to_owned());
            Ok(())
        },
        |_: &mut Stub, _: &[i32]| Ok(false),
    );
    assert!(!replaced);

    stub.enqueue("instant", Bindings::new().execute([9]));
    let action = stub.queue.current().cloned().expect("queued");
    action.execute(&mut stub).expect("execute succeeds");
    assert_eq!(action.condition(&mut stub), Ok(true));
    assert_eq!(stub.log, ["execute instant [9]"]);
}

#[test]
fn unknown_label_is_reported() {
    let mut stub = Stub::new();
    assert!(stub.factory.deregister("hold"));
    assert!(!stub.factory.deregister("hold"));

    let error = stub
        .factory
        .generate("hold", Bindings::new())
        .expect_err("schema was removed");
    assert_eq!(
        error,
        ActionError::UnknownActionLabel {
            label: "hold".to_owned()
        }
    );
    assert_eq!(run_tick(&mut stub), Err(error));
}

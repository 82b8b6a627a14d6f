#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Action schemas, the per-agent action queue, and the tick state machine
//! that drives it.
//!
//! A schema is a labelled triple of execute/condition/update functions that
//! receive the agent explicitly as their first parameter. The
//! [`ActionFactory`] stores schemas once and stamps out [`Action`] instances
//! with argument lists bound separately for each function. Agents implement
//! [`Actor`] to expose their [`ActionQueue`] and planner, and [`run_tick`]
//! advances them by one frame.

use std::{
    collections::{HashMap, VecDeque},
    fmt,
    rc::Rc,
};

use thiserror::Error;
use tracing::{debug, warn};

/// Maximum number of completed action labels retained in the history.
pub const HISTORY_CAPACITY: usize = 7;

/// Failures raised while generating or running actions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No schema is registered under the requested label.
    #[error("no action schema registered under label `{label}`")]
    UnknownActionLabel {
        /// Label that failed to resolve.
        label: String,
    },
    /// An action was invoked with an argument of the wrong kind.
    #[error("action `{action}` received an invalid argument at position {index}")]
    InvalidArgument {
        /// Label of the action that rejected the argument.
        action: String,
        /// Position of the offending argument.
        index: usize,
    },
}

/// Entry effect or per-tick update of an action.
pub type ExecuteFn<A, T> = Rc<dyn Fn(&mut A, &[T]) -> Result<(), ActionError>>;

/// Exit condition of an action.
pub type ConditionFn<A, T> = Rc<dyn Fn(&mut A, &[T]) -> Result<bool, ActionError>>;

/// Registered template for an action.
pub struct ActionSchema<A, T> {
    label: String,
    execute: ExecuteFn<A, T>,
    condition: ConditionFn<A, T>,
    update: Option<ExecuteFn<A, T>>,
}

impl<A, T> ActionSchema<A, T> {
    /// Label the schema is registered under.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Reports whether the schema defines a per-tick update.
    #[must_use]
    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }
}

impl<A, T> fmt::Debug for ActionSchema<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSchema")
            .field("label", &self.label)
            .field("has_update", &self.has_update())
            .finish()
    }
}

/// Argument lists bound to each function of a generated action.
#[derive(Clone, Debug, PartialEq)]
pub struct Bindings<T> {
    execute: Vec<T>,
    condition: Vec<T>,
    update: Vec<T>,
}

impl<T> Default for Bindings<T> {
    fn default() -> Self {
        Self {
            execute: Vec::new(),
            condition: Vec::new(),
            update: Vec::new(),
        }
    }
}

impl<T> Bindings<T> {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the arguments passed to the execute function.
    #[must_use]
    pub fn execute(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.execute = args.into_iter().collect();
        self
    }

    /// Binds the arguments passed to the condition function.
    #[must_use]
    pub fn condition(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.condition = args.into_iter().collect();
        self
    }

    /// Binds the arguments passed to the update function.
    #[must_use]
    pub fn update(mut self, args: impl IntoIterator<Item = T>) -> Self {
        self.update = args.into_iter().collect();
        self
    }
}

/// Schema instance with bound arguments, living only in an action queue.
pub struct Action<A, T> {
    label: Rc<str>,
    execute: ExecuteFn<A, T>,
    condition: ConditionFn<A, T>,
    update: Option<(ExecuteFn<A, T>, Vec<T>)>,
    execute_args: Vec<T>,
    condition_args: Vec<T>,
}

impl<A, T> Action<A, T> {
    /// Label of the schema the action was generated from.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Reports whether the action defines a per-tick update.
    #[must_use]
    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    /// Arguments bound to the execute function.
    #[must_use]
    pub fn execute_args(&self) -> &[T] {
        &self.execute_args
    }

    /// Arguments bound to the condition function.
    #[must_use]
    pub fn condition_args(&self) -> &[T] {
        &self.condition_args
    }

    /// Arguments bound to the update function, if the action has one.
    #[must_use]
    pub fn update_args(&self) -> Option<&[T]> {
        self.update.as_ref().map(|(_, args)| args.as_slice())
    }

    /// Runs the entry effect against `agent`.
    pub fn execute(&self, agent: &mut A) -> Result<(), ActionError> {
        (self.execute)(agent, &self.execute_args)
    }

    /// Evaluates the exit condition against `agent`.
    pub fn condition(&self, agent: &mut A) -> Result<bool, ActionError> {
        (self.condition)(agent, &self.condition_args)
    }

    /// Runs the per-tick update, doing nothing when the action has none.
    pub fn update(&self, agent: &mut A) -> Result<(), ActionError> {
        match &self.update {
            Some((update, args)) => update(agent, args),
            None => Ok(()),
        }
    }
}

impl<A, T: Clone> Clone for Action<A, T> {
    fn clone(&self) -> Self {
        Self {
            label: Rc::clone(&self.label),
            execute: Rc::clone(&self.execute),
            condition: Rc::clone(&self.condition),
            update: self
                .update
                .as_ref()
                .map(|(update, args)| (Rc::clone(update), args.clone())),
            execute_args: self.execute_args.clone(),
            condition_args: self.condition_args.clone(),
        }
    }
}

impl<A, T: fmt::Debug> fmt::Debug for Action<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("execute_args", &self.execute_args)
            .field("condition_args", &self.condition_args)
            .field("update_args", &self.update_args())
            .finish()
    }
}

/// Registry of action schemas owned by a single agent.
pub struct ActionFactory<A, T> {
    schemas: HashMap<String, Rc<ActionSchema<A, T>>>,
}

impl<A, T> Default for ActionFactory<A, T> {
    fn default() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }
}

impl<A, T> fmt::Debug for ActionFactory<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        labels.sort_unstable();
        f.debug_struct("ActionFactory")
            .field("labels", &labels)
            .finish()
    }
}

impl<A, T> ActionFactory<A, T> {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema without an update function.
    ///
    /// Returns `false` and keeps the existing schema when `label` is taken.
    pub fn register<E, C>(&mut self, label: &str, execute: E, condition: C) -> bool
    where
        E: Fn(&mut A, &[T]) -> Result<(), ActionError> + 'static,
        C: Fn(&mut A, &[T]) -> Result<bool, ActionError> + 'static,
    {
        self.insert(ActionSchema {
            label: label.to_owned(),
            execute: Rc::new(execute),
            condition: Rc::new(condition),
            update: None,
        })
    }

    /// Registers a schema with a per-tick update function.
    ///
    /// Returns `false` and keeps the existing schema when `label` is taken.
    pub fn register_with_update<E, C, U>(
        &mut self,
        label: &str,
        execute: E,
        condition: C,
        update: U,
    ) -> bool
    where
        E: Fn(&mut A, &[T]) -> Result<(), ActionError> + 'static,
        C: Fn(&mut A, &[T]) -> Result<bool, ActionError> + 'static,
        U: Fn(&mut A, &[T]) -> Result<(), ActionError> + 'static,
    {
        self.insert(ActionSchema {
            label: label.to_owned(),
            execute: Rc::new(execute),
            condition: Rc::new(condition),
            update: Some(Rc::new(update)),
        })
    }

    fn insert(&mut self, schema: ActionSchema<A, T>) -> bool {
        if self.schemas.contains_key(&schema.label) {
            warn!(label = %schema.label, "ignoring duplicate action schema registration");
            return false;
        }
        let _ = self.schemas.insert(schema.label.clone(), Rc::new(schema));
        true
    }

    /// Removes the schema registered under `label`, reporting whether one existed.
    pub fn deregister(&mut self, label: &str) -> bool {
        self.schemas.remove(label).is_some()
    }

    /// Looks up the schema registered under `label`.
    #[must_use]
    pub fn schema(&self, label: &str) -> Option<&ActionSchema<A, T>> {
        self.schemas.get(label).map(Rc::as_ref)
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Reports whether no schema is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Creates a fresh action from the schema registered under `label`.
    ///
    /// Update bindings are dropped when the schema has no update function.
    pub fn generate(&self, label: &str, bindings: Bindings<T>) -> Result<Action<A, T>, ActionError> {
        let schema = self
            .schemas
            .get(label)
            .ok_or_else(|| ActionError::UnknownActionLabel {
                label: label.to_owned(),
            })?;
        let Bindings {
            execute,
            condition,
            update,
        } = bindings;

        Ok(Action {
            label: Rc::from(schema.label.as_str()),
            execute: Rc::clone(&schema.execute),
            condition: Rc::clone(&schema.condition),
            update: schema
                .update
                .as_ref()
                .map(|function| (Rc::clone(function), update)),
            execute_args: execute,
            condition_args: condition,
        })
    }
}

/// Pending actions, completed-label history, and the current action's age.
pub struct ActionQueue<A, T> {
    actions: VecDeque<Action<A, T>>,
    history: Vec<String>,
    elapsed: f32,
}

impl<A, T> ActionQueue<A, T> {
    /// Creates an empty queue whose history holds `initial_label`.
    #[must_use]
    pub fn new(initial_label: &str) -> Self {
        Self {
            actions: VecDeque::new(),
            history: vec![initial_label.to_owned()],
            elapsed: 0.0,
        }
    }

    /// Action at the head of the queue.
    #[must_use]
    pub fn current(&self) -> Option<&Action<A, T>> {
        self.actions.front()
    }

    /// Label of the action at the head of the queue.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        self.current().map(Action::label)
    }

    /// Labels of every queued action, current first.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().map(Action::label)
    }

    /// Completed action labels, most recent first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Milliseconds spent in the current action.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of queued actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Reports whether no action is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Ages the current action by `dt` milliseconds.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Appends an action to the back of the queue.
    pub fn enqueue(&mut self, action: Action<A, T>) {
        self.actions.push_back(action);
    }

    /// Replaces the current action, or queues `action` when the queue is empty.
    pub fn replace_current(&mut self, action: Action<A, T>) {
        match self.actions.front_mut() {
            Some(current) => *current = action,
            None => self.actions.push_back(action),
        }
    }

    /// Drops every queued action except the current one.
    pub fn clear_future(&mut self) {
        self.actions.truncate(1);
    }

    /// Completes the current action, recording its label in the history.
    pub fn advance(&mut self) -> Option<Action<A, T>> {
        let finished = self.actions.pop_front()?;
        self.history.insert(0, finished.label().to_owned());
        self.history.truncate(HISTORY_CAPACITY);
        self.elapsed = 0.0;
        Some(finished)
    }

    /// Empties the queue and restarts the history from `initial_label`.
    pub fn reset(&mut self, initial_label: &str) {
        self.actions.clear();
        self.history.clear();
        self.history.push(initial_label.to_owned());
        self.elapsed = 0.0;
    }
}

impl<A, T: fmt::Debug> fmt::Debug for ActionQueue<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionQueue")
            .field("actions", &self.actions)
            .field("history", &self.history)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

/// Agent whose behavior is driven by an [`ActionQueue`].
pub trait Actor: Sized {
    /// Argument type bound into generated actions.
    type Arg: Clone;

    /// Queue of pending actions.
    fn actions(&self) -> &ActionQueue<Self, Self::Arg>;

    /// Mutable queue of pending actions.
    fn actions_mut(&mut self) -> &mut ActionQueue<Self, Self::Arg>;

    /// Enqueues a new action sequence once the queue runs dry.
    fn plan(&mut self) -> Result<(), ActionError>;
}

/// Outcome of a single [`run_tick`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The queue was empty, so a new sequence was planned and started.
    Planned,
    /// The current action completed and the next queued action started.
    Advanced,
    /// The current action completed, emptying the queue, so a new sequence
    /// was planned and started.
    Replanned,
    /// The current action is still running and its update ran.
    Updated,
    /// The current action is still running and has no update.
    Waiting,
}

/// Advances `agent` by one tick of the action state machine.
///
/// The current action is cloned before any of its functions run so schemas
/// are free to rewrite the queue while executing.
pub fn run_tick<A: Actor>(agent: &mut A) -> Result<Step, ActionError> {
    let Some(current) = agent.actions().current().cloned() else {
        agent.plan()?;
        start_current(agent)?;
        return Ok(Step::Planned);
    };

    if current.condition(agent)? {
        if let Some(finished) = agent.actions_mut().advance() {
            debug!(label = finished.label(), "action completed");
        }
        if agent.actions().is_empty() {
            agent.plan()?;
            start_current(agent)?;
            return Ok(Step::Replanned);
        }
        start_current(agent)?;
        return Ok(Step::Advanced);
    }

    if current.has_update() {
        current.update(agent)?;
        Ok(Step::Updated)
    } else {
        Ok(Step::Waiting)
    }
}

fn start_current<A: Actor>(agent: &mut A) -> Result<(), ActionError> {
    match agent.actions().current().cloned() {
        Some(action) => {
            debug!(label = action.label(), "action started");
            action.execute(agent)
        }
        None => Ok(()),
    }
}

//! The view-state controller: named states, a transition table, a serial
//! request queue, and a grouped back stack.
//!
//! ```text
//! show(to) ──> table.get_transition(from, to) ──> materialize ──> engine
//!                                                                  │
//!        drain <── transition_complete <── on_end listener <───────┘
//! ```
//!
//! Bookkeeping (queue, transitioning flag, current state, back stack) lives
//! behind one mutex. Animations are built under that lock but always
//! started after it is released, so an engine that completes synchronously
//! re-enters the controller without deadlocking.

mod back_stack;
mod queue;
mod table;

use std::sync::{Arc, Mutex};

pub use back_stack::StackGrouping;
use back_stack::BackStack;
use queue::{QueueEntry, TransitionQueue};
use rustc_hash::FxHashMap;
pub use table::TransitionTable;

use crate::animation::{materialize, AnimationEngine, Transition};
use crate::error::ViewStateError;
use crate::options::Options;
use crate::state::{Composition, UNGROUPED};
use crate::util::lock;

#[derive(Default)]
struct ControllerState {
    queue: TransitionQueue,
    back_stack: BackStack,
}

struct Shared {
    name: String,
    default_state: String,
    table: TransitionTable,
    engine: Arc<dyn AnimationEngine>,
    options: Options,
    grouping: StackGrouping,
    state: Mutex<ControllerState>,
}

impl Shared {
    fn group_of(&self, state: &str) -> Option<i32> {
        match &self.grouping {
            StackGrouping::Disabled => None,
            StackGrouping::Composition => self
                .table
                .composition(state)
                .and_then(Composition::stack_group),
            StackGrouping::Custom(rule) => {
                rule(state).filter(|&g| g != UNGROUPED)
            }
        }
    }

    /// Prepare the transition into `to` and append it. Returns `false` when
    /// the request was suppressed as a duplicate.
    fn enqueue_locked(
        self: &Arc<Self>,
        st: &mut ControllerState,
        to: &str,
    ) -> Result<bool, ViewStateError> {
        self.table.check_state(to)?;

        if self.options.queue.suppress_duplicate_requests
            && st.queue.pending_target() == Some(to)
        {
            log::debug!("[{}] '{to}' is already pending, ignored", self.name);
            return Ok(false);
        }

        let from = st.queue.next_from(&self.default_state).to_owned();
        let transition = self.table.get_transition(&from, to)?;
        let group = materialize(&transition, format!("{}: {from} -> {to}", self.name));
        let mut animation = self.engine.build_group(group);

        let actions = Arc::clone(&transition.actions);
        animation.on_start(Box::new(move || actions.before()));

        let actions = Arc::clone(&transition.actions);
        let weak = Arc::downgrade(self);
        animation.on_end(Box::new(move || {
            actions.after();
            if let Some(shared) = weak.upgrade() {
                shared.transition_complete();
            }
        }));

        log::debug!("[{}] queued {from} -> {to}", self.name);
        st.queue.push(QueueEntry {
            target: to.to_owned(),
            animation,
        });
        st.back_stack.record(to, self.group_of(to));
        Ok(true)
    }

    /// Start the head of the queue if nothing is running.
    fn drain(&self) {
        let entry = {
            let mut st = lock(&self.state);
            let Some(entry) = st.queue.pop_ready() else {
                return;
            };
            log::debug!(
                "[{}] starting transition to '{}' ({} queued)",
                self.name,
                entry.target,
                st.queue.len()
            );
            entry
        };
        entry.animation.start();
    }

    fn transition_complete(&self) {
        {
            let mut st = lock(&self.state);
            st.queue.complete();
            log::debug!(
                "[{}] reached '{}'",
                self.name,
                st.queue.current().unwrap_or(&self.default_state)
            );
        }
        self.drain();
    }
}

/// Plays transitions between named view states, one at a time.
///
/// Cheap to clone; clones drive the same controller. Requests may come from
/// any thread and are served strictly in arrival order.
#[derive(Clone)]
pub struct ViewStateController {
    shared: Arc<Shared>,
}

impl ViewStateController {
    /// Start building a controller called `name` that rests in
    /// `default_state` before its first transition.
    pub fn builder(
        name: impl Into<String>,
        default_state: impl Into<String>,
    ) -> ViewStateControllerBuilder {
        ViewStateControllerBuilder {
            name: name.into(),
            default_state: default_state.into(),
            states: FxHashMap::default(),
            transitions: Vec::new(),
            grouping: StackGrouping::default(),
            options: Options::default(),
        }
    }

    /// Request a transition to `state`. Failures are logged.
    pub fn show(&self, state: &str) {
        if let Err(e) = self.try_show(state) {
            log::error!("{e}");
        }
    }

    /// Request a transition to the default state.
    pub fn show_default(&self) {
        let state = self.shared.default_state.clone();
        self.show(&state);
    }

    /// Request a transition to `state`.
    ///
    /// Returns whether a transition was queued; `Ok(false)` means `state`
    /// was already the pending target and duplicate suppression is on.
    pub fn try_show(&self, state: &str) -> Result<bool, ViewStateError> {
        let queued = {
            let mut st = lock(&self.shared.state);
            self.shared.enqueue_locked(&mut st, state)?
        };
        self.shared.drain();
        Ok(queued)
    }

    /// Navigate back to the state beneath the top of the back stack.
    ///
    /// The stack follows requests, so a drill-down still waiting in the
    /// queue can be backed out of. Drops queued requests that have not
    /// started yet; the running transition plays on. Returns `false`,
    /// leaving the queue alone, when there is nothing to go back to.
    pub fn back(&self) -> bool {
        {
            let mut st = lock(&self.shared.state);
            let Some(target) = st.back_stack.pop() else {
                return false;
            };
            let dropped = st.queue.clear();
            log::debug!(
                "[{}] back to '{target}', dropped {dropped} queued request(s)",
                self.shared.name
            );
            if let Err(e) = self.shared.enqueue_locked(&mut st, &target) {
                log::error!("{e}");
                return false;
            }
        }
        self.shared.drain();
        true
    }

    /// Register `transition` for `from -> to`, and its reverse when
    /// `reversible`.
    pub fn add_transition(
        &self,
        transition: Transition,
        from: &str,
        to: &str,
        reversible: bool,
    ) -> Result<(), ViewStateError> {
        self.shared.table.add_transition(transition, from, to, reversible)
    }

    /// State the last started transition went to, `None` before the first.
    pub fn current_state(&self) -> Option<String> {
        lock(&self.shared.state).queue.current().map(str::to_owned)
    }

    /// Whether a transition is playing.
    pub fn is_transitioning(&self) -> bool {
        lock(&self.shared.state).queue.is_transitioning()
    }

    /// Number of queued, not yet started transitions.
    pub fn pending_len(&self) -> usize {
        lock(&self.shared.state).queue.len()
    }

    /// Back stack contents, bottom first.
    pub fn back_stack(&self) -> Vec<String> {
        lock(&self.shared.state).back_stack.states()
    }

    /// Controller name.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// State the controller rests in before its first transition.
    pub fn default_state(&self) -> &str {
        &self.shared.default_state
    }

    /// The controller's transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.shared.table
    }
}

impl std::fmt::Debug for ViewStateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateController")
            .field("name", &self.shared.name)
            .field("current", &self.current_state())
            .field("pending", &self.pending_len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ViewStateController`].
pub struct ViewStateControllerBuilder {
    name: String,
    default_state: String,
    states: FxHashMap<String, Composition>,
    transitions: Vec<(Transition, String, String, bool)>,
    grouping: StackGrouping,
    options: Options,
}

impl ViewStateControllerBuilder {
    /// Declare a state. Redeclaring a name replaces it.
    #[must_use]
    pub fn state(
        mut self,
        name: impl Into<String>,
        composition: impl Into<Composition>,
    ) -> Self {
        let _ = self.states.insert(name.into(), composition.into());
        self
    }

    /// Pre-register a transition, as with
    /// [`ViewStateController::add_transition`].
    #[must_use]
    pub fn transition(
        mut self,
        transition: Transition,
        from: impl Into<String>,
        to: impl Into<String>,
        reversible: bool,
    ) -> Self {
        self.transitions
            .push((transition, from.into(), to.into(), reversible));
        self
    }

    /// How states map to back-stack groups.
    #[must_use]
    pub fn grouping(mut self, grouping: StackGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Duration, easing and queue defaults.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Build the controller on top of `engine`.
    ///
    /// Fails when the default state is not declared, or a pre-registered
    /// transition names an undeclared state.
    pub fn build(
        self,
        engine: Arc<dyn AnimationEngine>,
    ) -> Result<ViewStateController, ViewStateError> {
        if !self.states.contains_key(&self.default_state) {
            return Err(ViewStateError::MissingDefaultState {
                controller: self.name,
                state: self.default_state,
            });
        }

        let table = TransitionTable::new(
            self.name.clone(),
            self.states,
            self.options.transition.clone(),
        );
        for (transition, from, to, reversible) in self.transitions {
            table.add_transition(transition, &from, &to, reversible)?;
        }

        log::debug!(
            "[{}] built with {} state(s), default '{}'",
            self.name,
            table.state_names().len(),
            self.default_state
        );
        Ok(ViewStateController {
            shared: Arc::new(Shared {
                name: self.name,
                default_state: self.default_state,
                table,
                engine,
                options: self.options,
                grouping: self.grouping,
                state: Mutex::default(),
            }),
        })
    }
}

impl std::fmt::Debug for ViewStateControllerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStateControllerBuilder")
            .field("name", &self.name)
            .field("default_state", &self.default_state)
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .field("grouping", &self.grouping)
            .finish_non_exhaustive()
    }
}

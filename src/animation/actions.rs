//! Lifecycle callbacks fired around a transition.

use std::sync::Arc;

/// Callbacks a transition fires while it plays.
///
/// All methods default to no-ops.
pub trait TransitionActions: Send + Sync {
    /// Fired when the transition's animation group starts.
    fn before(&self) {}

    /// Fired every frame with the eased transition-wide progress.
    fn on_step(&self, _progress: f32) {}

    /// Fired when the animation group ends, before the controller advances.
    fn after(&self) {}
}

/// Type alias for shared action references.
pub type SharedActions = Arc<dyn TransitionActions>;

/// Create shared actions from any [`TransitionActions`] implementation.
pub fn shared_actions<A: TransitionActions + 'static>(actions: A) -> SharedActions {
    Arc::new(actions)
}

/// Actions that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActions;

impl TransitionActions for NoActions {}

type Hook = Box<dyn Fn() + Send + Sync>;
type StepHook = Box<dyn Fn(f32) + Send + Sync>;

/// Closure-backed actions for hosts that don't want a dedicated type.
#[derive(Default)]
pub struct CallbackActions {
    before: Option<Hook>,
    on_step: Option<StepHook>,
    after: Option<Hook>,
}

impl CallbackActions {
    /// Actions with no hooks installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` when the transition starts.
    #[must_use]
    pub fn before(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.before = Some(Box::new(f));
        self
    }

    /// Run `f` with the progress of every frame.
    #[must_use]
    pub fn on_step(mut self, f: impl Fn(f32) + Send + Sync + 'static) -> Self {
        self.on_step = Some(Box::new(f));
        self
    }

    /// Run `f` when the transition ends.
    #[must_use]
    pub fn after(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.after = Some(Box::new(f));
        self
    }
}

impl TransitionActions for CallbackActions {
    fn before(&self) {
        if let Some(f) = &self.before {
            f();
        }
    }

    fn on_step(&self, progress: f32) {
        if let Some(f) = &self.on_step {
            f(progress);
        }
    }

    fn after(&self) {
        if let Some(f) = &self.after {
            f();
        }
    }
}

impl std::fmt::Debug for CallbackActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackActions")
            .field("before", &self.before.is_some())
            .field("on_step", &self.on_step.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// Actions of a reversed transition: `before` and `after` swap and
/// progress runs backwards.
pub(crate) struct ReversedActions {
    inner: SharedActions,
}

impl ReversedActions {
    pub(crate) fn wrap(inner: SharedActions) -> SharedActions {
        Arc::new(Self { inner })
    }
}

impl TransitionActions for ReversedActions {
    fn before(&self) {
        self.inner.after();
    }

    fn on_step(&self, progress: f32) {
        self.inner.on_step(1.0 - progress);
    }

    fn after(&self) {
        self.inner.before();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn test_reversed_swaps_and_negates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (b, s, a) = (log.clone(), log.clone(), log.clone());
        let actions = shared_actions(
            CallbackActions::new()
                .before(move || b.lock().unwrap().push("before".to_owned()))
                .on_step(move |p| s.lock().unwrap().push(format!("step {p:.2}")))
                .after(move || a.lock().unwrap().push("after".to_owned())),
        );

        let reversed = ReversedActions::wrap(actions);
        reversed.before();
        reversed.on_step(0.25);
        reversed.after();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["after", "step 0.75", "before"]
        );
    }

    #[test]
    fn test_double_reverse_restores_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (b, s) = (log.clone(), log.clone());
        let actions = shared_actions(
            CallbackActions::new()
                .before(move || b.lock().unwrap().push("before".to_owned()))
                .on_step(move |p| s.lock().unwrap().push(format!("step {p:.2}"))),
        );

        let twice = ReversedActions::wrap(ReversedActions::wrap(actions));
        twice.before();
        twice.on_step(0.25);
        twice.after();

        assert_eq!(*log.lock().unwrap(), vec!["before", "step 0.25"]);
    }
}

//! Transition table: explicit and lazily-synthesized transitions per
//! ordered state pair.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::animation::Transition;
use crate::error::ViewStateError;
use crate::options::TransitionOptions;
use crate::state::Composition;
use crate::util::{read, write};

type Row = FxHashMap<String, Arc<Transition>>;

/// Transitions between a fixed set of declared states.
///
/// A missing cell means "not synthesized yet": [`get_transition`] fills it
/// with the destination's default transition on first use and returns the
/// same shared instance afterwards.
///
/// [`get_transition`]: Self::get_transition
pub struct TransitionTable {
    controller: String,
    states: FxHashMap<String, Composition>,
    options: TransitionOptions,
    cells: RwLock<FxHashMap<String, Row>>,
}

impl TransitionTable {
    /// Empty table over `states`. `controller` names the owner in errors.
    pub fn new(
        controller: impl Into<String>,
        states: FxHashMap<String, Composition>,
        options: TransitionOptions,
    ) -> Self {
        Self {
            controller: controller.into(),
            states,
            options,
            cells: RwLock::default(),
        }
    }

    /// Whether `name` is a declared state.
    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Declared state names, sorted.
    pub fn state_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Composition declared for `name`.
    pub fn composition(&self, name: &str) -> Option<&Composition> {
        self.states.get(name)
    }

    /// Fail with [`ViewStateError::UnknownState`] unless `name` is declared.
    pub fn check_state(&self, name: &str) -> Result<(), ViewStateError> {
        if self.contains_state(name) {
            Ok(())
        } else {
            Err(self.unknown_state(name))
        }
    }

    fn unknown_state(&self, name: &str) -> ViewStateError {
        ViewStateError::UnknownState {
            controller: self.controller.clone(),
            state: name.to_owned(),
        }
    }

    /// Register `transition` for `from -> to`, and its reverse for
    /// `to -> from` when `reversible`. Replaces whatever was there.
    pub fn add_transition(
        &self,
        transition: Transition,
        from: &str,
        to: &str,
        reversible: bool,
    ) -> Result<(), ViewStateError> {
        self.check_state(from)?;
        self.check_state(to)?;

        let reverse = reversible.then(|| Arc::new(transition.reversed()));
        let mut cells = write(&self.cells);
        let _ = cells
            .entry(from.to_owned())
            .or_default()
            .insert(to.to_owned(), Arc::new(transition));
        if let Some(reverse) = reverse {
            let _ = cells
                .entry(to.to_owned())
                .or_default()
                .insert(from.to_owned(), reverse);
        }
        Ok(())
    }

    /// Transition for `from -> to`, synthesizing and caching the
    /// destination's default on first use.
    pub fn get_transition(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Arc<Transition>, ViewStateError> {
        self.check_state(from)?;
        let composition =
            self.states.get(to).ok_or_else(|| self.unknown_state(to))?;

        if let Some(found) = self.cached(from, to) {
            return Ok(found);
        }

        let mut cells = write(&self.cells);
        let row = cells.entry(from.to_owned()).or_default();
        let cell = row.entry(to.to_owned()).or_insert_with(|| {
            log::debug!(
                "[{}] synthesizing default transition {from} -> {to}",
                self.controller
            );
            Arc::new(Transition::for_composition(composition, &self.options))
        });
        Ok(Arc::clone(cell))
    }

    /// Cached transition for `from -> to`, without synthesizing.
    pub fn cached(&self, from: &str, to: &str) -> Option<Arc<Transition>> {
        read(&self.cells).get(from)?.get(to).cloned()
    }

    /// Number of filled cells.
    pub fn len(&self) -> usize {
        read(&self.cells).values().map(FxHashMap::len).sum()
    }

    /// Whether no cell is filled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionTable")
            .field("controller", &self.controller)
            .field("states", &self.state_names())
            .field("cells", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::TransitionComponent;
    use crate::state::{AnimatedValue, PropertyGoal, ViewId, ViewState, Visibility};

    fn table() -> TransitionTable {
        let mut states = FxHashMap::default();
        for (name, alpha) in [("a", 0.0_f32), ("b", 0.5), ("c", 1.0)] {
            let _ = states.insert(
                name.to_owned(),
                Composition::from(ViewState::new(
                    ViewId(1),
                    Visibility::Visible,
                    [PropertyGoal::new("alpha", alpha)],
                )),
            );
        }
        TransitionTable::new("table", states, TransitionOptions::default())
    }

    fn explicit() -> Transition {
        Transition::new(
            [TransitionComponent::new(
                ViewId(1),
                "x",
                [AnimatedValue::Float(1.0), AnimatedValue::Float(2.0)],
            )
            .with_window(0.0, 0.5)],
            Duration::from_millis(200),
        )
    }

    #[test]
    fn test_reversible_registers_reverse_without_synthesis() {
        let table = table();
        table.add_transition(explicit(), "a", "b", true).unwrap();
        assert_eq!(table.len(), 2);

        let back = table.cached("b", "a").unwrap();
        assert_eq!(
            back.components[0].values,
            vec![AnimatedValue::Float(2.0), AnimatedValue::Float(1.0)]
        );
        assert!((back.components[0].start - 0.5).abs() < 1e-6);

        let got = table.get_transition("b", "a").unwrap();
        assert!(Arc::ptr_eq(&got, &back));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_one_way_leaves_reverse_empty() {
        let table = table();
        table.add_transition(explicit(), "a", "b", false).unwrap();
        assert!(table.cached("b", "a").is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let table = table();
        table.add_transition(explicit(), "a", "b", false).unwrap();
        let replacement = Transition::new([], Duration::from_millis(5));
        table.add_transition(replacement, "a", "b", false).unwrap();
        let got = table.get_transition("a", "b").unwrap();
        assert_eq!(got.duration, Duration::from_millis(5));
    }

    #[test]
    fn test_lazy_synthesis_is_cached() {
        let table = table();
        assert!(table.is_empty());

        let first = table.get_transition("a", "c").unwrap();
        let second = table.get_transition("a", "c").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(table.len(), 1);

        // Default of the destination: one leg to alpha 1.0.
        assert_eq!(first.components.len(), 1);
        assert_eq!(first.components[0].values, vec![AnimatedValue::Float(1.0)]);
        assert_eq!(first.duration, Duration::from_millis(3500));
    }

    #[test]
    fn test_unknown_state_is_error() {
        let table = table();
        let err = table.get_transition("a", "nope").unwrap_err();
        assert!(matches!(
            &err,
            ViewStateError::UnknownState { controller, state }
                if controller == "table" && state == "nope"
        ));
        assert!(table.add_transition(explicit(), "nope", "a", true).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_concurrent_synthesis_yields_one_entry() {
        let table = Arc::new(table());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || table.get_transition("b", "c").unwrap())
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|t| Arc::ptr_eq(t, &results[0])));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_state_names_sorted() {
        assert_eq!(table().state_names(), vec!["a", "b", "c"]);
    }
}

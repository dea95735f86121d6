//! Grouped back-navigation history.

use std::sync::Arc;

/// How a state name maps to a back-stack group.
///
/// `None` from the rule means the state never touches the stack.
#[derive(Clone, Default)]
pub enum StackGrouping {
    /// No back stack; [`back`](super::ViewStateController::back) always
    /// returns `false`.
    Disabled,
    /// Use each composition's declared group.
    #[default]
    Composition,
    /// Caller-supplied rule.
    Custom(Arc<dyn Fn(&str) -> Option<i32> + Send + Sync>),
}

impl StackGrouping {
    /// Wrap a closure as a custom rule.
    pub fn custom(rule: impl Fn(&str) -> Option<i32> + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(rule))
    }
}

impl std::fmt::Debug for StackGrouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Composition => f.write_str("Composition"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    state: String,
    group: i32,
}

/// Stack of requested states, at most one entry per group.
///
/// Moving between states of the same group replaces the top (peers);
/// moving into a new group pushes (drill-down). Returning to a group
/// already on the stack unwinds to that group's entry.
#[derive(Debug, Default)]
pub(crate) struct BackStack {
    entries: Vec<Entry>,
}

impl BackStack {
    /// Record a request to move into `state`.
    pub(crate) fn record(&mut self, state: &str, group: Option<i32>) {
        let Some(group) = group else {
            return;
        };
        let entry = Entry {
            state: state.to_owned(),
            group,
        };
        match self.entries.iter().rposition(|e| e.group == group) {
            Some(at) => {
                self.entries.truncate(at);
                self.entries.push(entry);
            }
            None => self.entries.push(entry),
        }
    }

    /// Pop the top and return the state now on top, if any remains.
    pub(crate) fn pop(&mut self) -> Option<String> {
        if self.entries.len() < 2 {
            return None;
        }
        let _ = self.entries.pop();
        self.entries.last().map(|e| e.state.clone())
    }

    /// State names, bottom first.
    pub(crate) fn states(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.state.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peers_replace_and_groups_push() {
        let mut stack = BackStack::default();
        stack.record("zero", Some(0));
        stack.record("one", Some(0));
        assert_eq!(stack.states(), ["one"]);

        stack.record("two", Some(1));
        assert_eq!(stack.states(), ["one", "two"]);
    }

    #[test]
    fn test_ungrouped_is_ignored() {
        let mut stack = BackStack::default();
        stack.record("zero", Some(0));
        stack.record("overlay", None);
        assert_eq!(stack.states(), ["zero"]);
    }

    #[test]
    fn test_returning_to_a_group_unwinds() {
        let mut stack = BackStack::default();
        for _ in 0..4 {
            stack.record("zero", Some(0));
            stack.record("two", Some(1));
        }
        assert_eq!(stack.states(), ["zero", "two"]);

        stack.record("three", Some(2));
        stack.record("one", Some(0));
        assert_eq!(stack.states(), ["one"]);
    }

    #[test]
    fn test_pop_needs_two_entries() {
        let mut stack = BackStack::default();
        assert_eq!(stack.pop(), None);

        stack.record("zero", Some(0));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.states(), ["zero"]);

        stack.record("two", Some(1));
        assert_eq!(stack.pop(), Some("zero".to_owned()));
        assert_eq!(stack.states(), ["zero"]);
    }

    #[test]
    fn test_grouping_debug() {
        let grouping = StackGrouping::custom(|name| name.strip_prefix('g')?.parse().ok());
        assert_eq!(format!("{grouping:?}"), "Custom(..)");
        assert_eq!(format!("{:?}", StackGrouping::default()), "Composition");
    }
}

//! Views, property goals, and the compositions that group them.

use std::fmt;

use super::value::AnimatedValue;
use crate::animation::interpolation::SharedEvaluator;

/// Group tag for states that take no part in back-stack grouping.
pub const UNGROUPED: i32 = -1;

/// Opaque handle to a host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Visibility of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Drawn and laid out.
    #[default]
    Visible,
    /// Laid out but not drawn.
    Invisible,
    /// Neither drawn nor laid out.
    Gone,
}

/// End value for one property of a view.
#[derive(Clone)]
pub struct PropertyGoal {
    /// Property name, e.g. `"alpha"` or `"translationX"`.
    pub property: String,
    /// Value the property settles on.
    pub value: AnimatedValue,
    /// Interpolation used when a default transition animates this goal.
    pub evaluator: Option<SharedEvaluator>,
}

impl PropertyGoal {
    /// Goal with the value's own interpolation.
    pub fn new(property: impl Into<String>, value: impl Into<AnimatedValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            evaluator: None,
        }
    }

    /// Animate this goal with a custom evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: SharedEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }
}

impl fmt::Debug for PropertyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyGoal")
            .field("property", &self.property)
            .field("value", &self.value)
            .field("evaluator", &self.evaluator.as_ref().map(|e| e.name()))
            .finish()
    }
}

/// Visibility and property goals shared by one or more views.
#[derive(Debug, Clone)]
pub struct ViewState {
    views: Vec<ViewId>,
    visibility: Visibility,
    goals: Vec<PropertyGoal>,
}

impl ViewState {
    /// State for a single view.
    pub fn new(
        view: ViewId,
        visibility: Visibility,
        goals: impl IntoIterator<Item = PropertyGoal>,
    ) -> Self {
        Self::for_views([view], visibility, goals)
    }

    /// State applied identically to several views.
    ///
    /// Goals form a set keyed by property name; a later goal for the same
    /// property replaces the earlier one.
    pub fn for_views(
        views: impl IntoIterator<Item = ViewId>,
        visibility: Visibility,
        goals: impl IntoIterator<Item = PropertyGoal>,
    ) -> Self {
        let mut deduped: Vec<PropertyGoal> = Vec::new();
        for goal in goals {
            if let Some(existing) =
                deduped.iter_mut().find(|g| g.property == goal.property)
            {
                *existing = goal;
            } else {
                deduped.push(goal);
            }
        }
        Self {
            views: views.into_iter().collect(),
            visibility,
            goals: deduped,
        }
    }

    /// Views this state applies to.
    pub fn views(&self) -> &[ViewId] {
        &self.views
    }

    /// Visibility the views end in.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Property goals, one per property.
    pub fn goals(&self) -> &[PropertyGoal] {
        &self.goals
    }
}

/// A named state's full description: one or more view states and the
/// back-stack group the state belongs to.
#[derive(Debug, Clone)]
pub struct Composition {
    view_states: Vec<ViewState>,
    group: i32,
}

impl Composition {
    /// Ungrouped composition.
    pub fn new(view_states: impl IntoIterator<Item = ViewState>) -> Self {
        Self {
            view_states: view_states.into_iter().collect(),
            group: UNGROUPED,
        }
    }

    /// Place this composition in a back-stack group.
    #[must_use]
    pub fn in_group(mut self, group: i32) -> Self {
        self.group = group;
        self
    }

    /// View states making up the composition.
    pub fn view_states(&self) -> &[ViewState] {
        &self.view_states
    }

    /// Back-stack group, [`UNGROUPED`] when none.
    pub fn group(&self) -> i32 {
        self.group
    }

    /// Group as an option, `None` for [`UNGROUPED`].
    pub fn stack_group(&self) -> Option<i32> {
        (self.group != UNGROUPED).then_some(self.group)
    }
}

impl From<ViewState> for Composition {
    fn from(view_state: ViewState) -> Self {
        Self::new([view_state])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goals_dedupe_by_property() {
        let state = ViewState::new(
            ViewId(1),
            Visibility::Visible,
            [
                PropertyGoal::new("alpha", 0.2_f32),
                PropertyGoal::new("translationY", 50.0_f32),
                PropertyGoal::new("alpha", 1.0_f32),
            ],
        );
        assert_eq!(state.goals().len(), 2);
        assert_eq!(state.goals()[0].value, AnimatedValue::Float(1.0));
    }

    #[test]
    fn test_composition_groups() {
        let state = ViewState::new(ViewId(1), Visibility::Gone, []);
        let ungrouped = Composition::from(state.clone());
        assert_eq!(ungrouped.group(), UNGROUPED);
        assert_eq!(ungrouped.stack_group(), None);

        let grouped = Composition::from(state).in_group(3);
        assert_eq!(grouped.stack_group(), Some(3));
    }
}

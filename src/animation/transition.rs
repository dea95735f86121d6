//! Transition describes how to animate between two states.

use std::time::Duration;

use super::actions::{NoActions, ReversedActions, SharedActions};
use super::interpolation::{Interpolation, SharedEvaluator};
use crate::options::TransitionOptions;
use crate::state::{AnimatedValue, Composition, ViewId, Visibility};
use crate::util::easing::EasingFunction;

/// One view+property leg of a [`Transition`].
///
/// `start` and `end` are fractions of the owning transition's duration;
/// the leg runs from `start * duration` for `(end - start) * duration`.
#[derive(Clone)]
pub struct TransitionComponent {
    /// View being animated.
    pub target: ViewId,
    /// Property being animated.
    pub property: String,
    /// Easing for this leg. `None` inherits the transition's.
    pub easing: Option<EasingFunction>,
    /// Visibility applied when the leg starts.
    pub start_visibility: Visibility,
    /// Visibility applied when the leg ends.
    pub end_visibility: Visibility,
    /// Fractional start offset in [0, 1].
    pub start: f32,
    /// Fractional end offset in [0, 1].
    pub end: f32,
    /// Custom interpolation, overriding the value-kind default.
    pub evaluator: Option<SharedEvaluator>,
    /// Treat integer values as packed ARGB colors.
    pub is_color: bool,
    /// Values to animate through. A single value animates from the
    /// view's live value at the moment the leg starts.
    pub values: Vec<AnimatedValue>,
}

impl TransitionComponent {
    /// Full-duration leg, visible throughout.
    pub fn new(
        target: ViewId,
        property: impl Into<String>,
        values: impl IntoIterator<Item = AnimatedValue>,
    ) -> Self {
        Self {
            target,
            property: property.into(),
            easing: None,
            start_visibility: Visibility::Visible,
            end_visibility: Visibility::Visible,
            start: 0.0,
            end: 1.0,
            evaluator: None,
            is_color: false,
            values: values.into_iter().collect(),
        }
    }

    /// Use a dedicated easing curve for this leg.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Visibility to apply at the leg's start and end.
    #[must_use]
    pub fn with_visibility(mut self, start: Visibility, end: Visibility) -> Self {
        self.start_visibility = start;
        self.end_visibility = end;
        self
    }

    /// Run only within the `[start, end]` fraction of the transition.
    #[must_use]
    pub fn with_window(mut self, start: f32, end: f32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Interpolate with a custom evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: SharedEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Treat integer values as colors.
    #[must_use]
    pub fn as_color(mut self) -> Self {
        self.is_color = true;
        self
    }

    /// Strategy for this leg's values, `None` when there are no values.
    #[must_use]
    pub fn interpolation(&self) -> Option<Interpolation> {
        self.values.first().map(|first| {
            Interpolation::resolve(first, self.is_color, self.evaluator.as_ref())
        })
    }

    /// The same leg played backwards over the mirrored time window.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            target: self.target,
            property: self.property.clone(),
            easing: self.easing,
            start_visibility: self.end_visibility,
            end_visibility: self.start_visibility,
            start: 1.0 - self.end,
            end: 1.0 - self.start,
            evaluator: self.evaluator.clone(),
            is_color: self.is_color,
            values: self.values.iter().rev().copied().collect(),
        }
    }
}

impl std::fmt::Debug for TransitionComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionComponent")
            .field("target", &self.target)
            .field("property", &self.property)
            .field("easing", &self.easing)
            .field("visibility", &(self.start_visibility, self.end_visibility))
            .field("window", &(self.start, self.end))
            .field("evaluator", &self.evaluator.as_ref().map(|e| e.name()))
            .field("is_color", &self.is_color)
            .field("values", &self.values)
            .finish()
    }
}

/// A timed animation recipe between two states.
///
/// Construct explicitly with [`new()`](Self::new), or derive the default
/// for a destination state with [`for_composition()`](Self::for_composition).
#[derive(Clone)]
pub struct Transition {
    /// Per-view per-property legs, in play order.
    pub components: Vec<TransitionComponent>,
    /// Total duration of the transition.
    pub duration: Duration,
    /// Easing for legs that don't set their own, and for progress.
    pub easing: EasingFunction,
    /// Lifecycle callbacks.
    pub actions: SharedActions,
}

impl Transition {
    /// Transition with default easing and no actions.
    pub fn new(
        components: impl IntoIterator<Item = TransitionComponent>,
        duration: Duration,
    ) -> Self {
        Self {
            components: components.into_iter().collect(),
            duration,
            easing: EasingFunction::default(),
            actions: std::sync::Arc::new(NoActions),
        }
    }

    /// Default transition into `composition`.
    ///
    /// One full-duration leg per (view, goal) pair. Each leg carries only
    /// the goal value, so it starts from wherever the view currently is,
    /// whichever state that happens to be. Views start and end visible,
    /// unless [`apply_state_visibility`] is set, in which case they end
    /// with the view state's visibility.
    ///
    /// [`apply_state_visibility`]: TransitionOptions::apply_state_visibility
    #[must_use]
    pub fn for_composition(
        composition: &Composition,
        options: &TransitionOptions,
    ) -> Self {
        let components = composition.view_states().iter().flat_map(|vs| {
            let end_visibility = if options.apply_state_visibility {
                vs.visibility()
            } else {
                Visibility::Visible
            };
            vs.views().iter().flat_map(move |&view| {
                vs.goals().iter().map(move |goal| {
                    let mut component = TransitionComponent::new(
                        view,
                        goal.property.clone(),
                        [goal.value],
                    )
                    .with_visibility(Visibility::Visible, end_visibility);
                    component.evaluator.clone_from(&goal.evaluator);
                    component
                })
            })
        });
        Self::new(components, options.duration()).with_easing(options.easing)
    }

    /// Use a different default easing.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Attach lifecycle callbacks.
    #[must_use]
    pub fn with_actions(mut self, actions: SharedActions) -> Self {
        self.actions = actions;
        self
    }

    /// The transition played backwards.
    ///
    /// Legs mirror their windows, swap visibilities and reverse their
    /// values; `before`/`after` swap and progress becomes `1 - p`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(TransitionComponent::reversed)
                .collect(),
            duration: self.duration,
            easing: self.easing,
            actions: ReversedActions::wrap(self.actions.clone()),
        }
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("components", &self.components)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::animation::actions::{shared_actions, CallbackActions};
    use crate::state::{PropertyGoal, ViewState};

    fn sample_transition() -> Transition {
        Transition::new(
            [
                TransitionComponent::new(
                    ViewId(1),
                    "x",
                    [15.0_f32, 20.0, 30.0, 35.0].map(AnimatedValue::Float),
                )
                .with_window(0.0, 0.3)
                .with_visibility(Visibility::Invisible, Visibility::Visible),
                TransitionComponent::new(
                    ViewId(2),
                    "alpha",
                    [AnimatedValue::Float(1.0)],
                )
                .with_window(0.25, 1.0)
                .with_easing(EasingFunction::Linear),
            ],
            Duration::from_millis(350),
        )
    }

    fn assert_same_legs(a: &Transition, b: &Transition) {
        assert_eq!(a.duration, b.duration);
        assert_eq!(a.easing, b.easing);
        assert_eq!(a.components.len(), b.components.len());
        for (x, y) in a.components.iter().zip(&b.components) {
            assert_eq!(x.target, y.target);
            assert_eq!(x.property, y.property);
            assert_eq!(x.easing, y.easing);
            assert_eq!(x.start_visibility, y.start_visibility);
            assert_eq!(x.end_visibility, y.end_visibility);
            assert!((x.start - y.start).abs() < 1e-6);
            assert!((x.end - y.end).abs() < 1e-6);
            assert_eq!(x.values, y.values);
        }
    }

    #[test]
    fn test_reverse_mirrors_components() {
        let t = sample_transition();
        let r = t.reversed();
        let leg = &r.components[0];
        assert!((leg.start - 0.7).abs() < 1e-6);
        assert!((leg.end - 1.0).abs() < 1e-6);
        assert_eq!(leg.start_visibility, Visibility::Visible);
        assert_eq!(leg.end_visibility, Visibility::Invisible);
        assert_eq!(
            leg.values,
            [35.0_f32, 30.0, 20.0, 15.0].map(AnimatedValue::Float).to_vec()
        );
        assert_eq!(r.components[1].easing, Some(EasingFunction::Linear));
    }

    #[test]
    fn test_reverse_is_involutive() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (b, s, a) = (log.clone(), log.clone(), log.clone());
        let t = sample_transition().with_actions(shared_actions(
            CallbackActions::new()
                .before(move || b.lock().unwrap().push("before".to_owned()))
                .on_step(move |p| s.lock().unwrap().push(format!("{p:.1}")))
                .after(move || a.lock().unwrap().push("after".to_owned())),
        ));

        let twice = t.reversed().reversed();
        assert_same_legs(&t, &twice);

        twice.actions.before();
        twice.actions.on_step(0.2);
        twice.actions.after();
        assert_eq!(*log.lock().unwrap(), vec!["before", "0.2", "after"]);
    }

    #[test]
    fn test_reverse_leaves_input_untouched() {
        let t = sample_transition();
        let _reversed = t.reversed();
        assert!((t.components[0].end - 0.3).abs() < 1e-6);
        assert_eq!(t.components[0].values[0], AnimatedValue::Float(15.0));
    }

    fn mixed_composition() -> Composition {
        Composition::new([
            ViewState::for_views(
                [ViewId(1), ViewId(2)],
                Visibility::Gone,
                [
                    PropertyGoal::new("alpha", 1.0_f32),
                    PropertyGoal::new("translationX", 0.0_f32),
                ],
            ),
            ViewState::new(
                ViewId(3),
                Visibility::Visible,
                [PropertyGoal::new("textColor", 0xff00_00ff_u32 as i32)],
            ),
        ])
    }

    #[test]
    fn test_for_composition_one_leg_per_view_goal() {
        let options = TransitionOptions {
            apply_state_visibility: true,
            ..TransitionOptions::default()
        };
        let t = Transition::for_composition(&mixed_composition(), &options);

        assert_eq!(t.components.len(), 5);
        assert_eq!(t.duration, options.duration());
        for leg in &t.components {
            assert_eq!(leg.values.len(), 1);
            assert_eq!(leg.start, 0.0);
            assert_eq!(leg.end, 1.0);
            assert_eq!(leg.easing, None);
            assert_eq!(leg.start_visibility, Visibility::Visible);
        }
        assert_eq!(t.components[0].end_visibility, Visibility::Gone);
        assert_eq!(t.components[4].end_visibility, Visibility::Visible);
        assert_eq!(t.components[4].target, ViewId(3));
    }

    #[test]
    fn test_for_composition_keeps_views_visible_by_default() {
        let t = Transition::for_composition(
            &mixed_composition(),
            &TransitionOptions::default(),
        );
        for leg in &t.components {
            assert_eq!(
                (leg.start_visibility, leg.end_visibility),
                (Visibility::Visible, Visibility::Visible)
            );
        }
    }

    #[test]
    fn test_for_composition_carries_goal_evaluator() {
        let snap = crate::animation::interpolation::evaluator(
            |_t: f32, _a: &AnimatedValue, b: &AnimatedValue| *b,
        );
        let composition = Composition::from(ViewState::new(
            ViewId(1),
            Visibility::Visible,
            [PropertyGoal::new("y", 4.0_f32).with_evaluator(snap)],
        ));
        let t = Transition::for_composition(&composition, &TransitionOptions::default());
        assert!(matches!(
            t.components[0].interpolation(),
            Some(Interpolation::Custom(_))
        ));
    }
}

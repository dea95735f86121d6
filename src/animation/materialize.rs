//! Turns a [`Transition`] into one engine-agnostic [`AnimationGroup`].

use std::time::Duration;

use super::engine::{AnimationGroup, ProgressTrack, SubAnimation};
use super::transition::{Transition, TransitionComponent};
use crate::error::ViewStateError;

/// Build the group for `transition`.
///
/// Components with no values contribute nothing. Components that cannot be
/// played are logged and skipped; the rest of the transition still plays.
pub fn materialize(transition: &Transition, label: impl Into<String>) -> AnimationGroup {
    let label = label.into();
    let animations = transition.components.iter().fold(
        Vec::with_capacity(transition.components.len()),
        |mut acc, component| {
            match materialize_component(component, transition) {
                Ok(Some(sub)) => acc.push(sub),
                Ok(None) => log::debug!(
                    "[{label}] {}.{} has no values, skipped",
                    component.target,
                    component.property
                ),
                Err(e) => log::warn!("[{label}] {e}, skipped"),
            }
            acc
        },
    );

    AnimationGroup {
        label,
        duration: transition.duration,
        animations,
        progress: ProgressTrack {
            easing: transition.easing,
            actions: transition.actions.clone(),
        },
    }
}

/// Build the sub-animation for one component.
///
/// Returns `Ok(None)` for an empty value sequence.
pub fn materialize_component(
    component: &TransitionComponent,
    transition: &Transition,
) -> Result<Option<SubAnimation>, ViewStateError> {
    let Some(interpolation) = component.interpolation() else {
        return Ok(None);
    };

    let (start, end) = (component.start, component.end);
    let in_range = |f: f32| f.is_finite() && (0.0..=1.0).contains(&f);
    if !in_range(start) || !in_range(end) || start > end {
        return Err(ViewStateError::InvalidComponent {
            property: component.property.clone(),
            reason: format!("window [{start}, {end}] is not within [0, 1]"),
        });
    }

    let values: Vec<_> = component
        .values
        .iter()
        .filter(|v| interpolation.accepts(v))
        .copied()
        .collect();
    if values.len() != component.values.len() {
        log::warn!(
            "{}.{}: dropped {} value(s) not matching {} interpolation",
            component.target,
            component.property,
            component.values.len() - values.len(),
            interpolation.name()
        );
    }

    let delay = scale(transition.duration, start);
    let finish = scale(transition.duration, end).min(transition.duration);

    Ok(Some(SubAnimation {
        target: component.target,
        property: component.property.clone(),
        values,
        interpolation,
        easing: component.easing.unwrap_or(transition.easing),
        delay,
        duration: finish.saturating_sub(delay),
        start_visibility: component.start_visibility,
        end_visibility: component.end_visibility,
    }))
}

/// `fraction` of `total`, rounded to the microsecond.
fn scale(total: Duration, fraction: f32) -> Duration {
    let micros = total.as_micros() as f64 * f64::from(fraction);
    Duration::from_micros(micros.round() as u64)
}

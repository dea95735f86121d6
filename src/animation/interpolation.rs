//! Value interpolation strategies and keyframe sampling.

use std::sync::Arc;

use crate::state::{AnimatedValue, ValueKind};

/// Custom interpolation between two values.
///
/// Implemented for any `Fn(f32, &AnimatedValue, &AnimatedValue) ->
/// AnimatedValue` closure, so most callers never name this trait.
pub trait ValueEvaluator: Send + Sync {
    /// Value at `fraction` (0.0 to 1.0, already eased) between `start`
    /// and `end`.
    fn evaluate(
        &self,
        fraction: f32,
        start: &AnimatedValue,
        end: &AnimatedValue,
    ) -> AnimatedValue;

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> ValueEvaluator for F
where
    F: Fn(f32, &AnimatedValue, &AnimatedValue) -> AnimatedValue + Send + Sync,
{
    fn evaluate(
        &self,
        fraction: f32,
        start: &AnimatedValue,
        end: &AnimatedValue,
    ) -> AnimatedValue {
        self(fraction, start, end)
    }
}

/// Type alias for shared evaluator references.
pub type SharedEvaluator = Arc<dyn ValueEvaluator>;

/// Create a shared evaluator from any [`ValueEvaluator`].
pub fn evaluator<E: ValueEvaluator + 'static>(e: E) -> SharedEvaluator {
    Arc::new(e)
}

/// How a sub-animation moves between its values.
///
/// Resolved once per component when a transition is materialized.
#[derive(Clone)]
pub enum Interpolation {
    /// Linear float interpolation.
    Float,
    /// Linear interpolation, rounded to the nearest integer.
    Integer,
    /// Per-channel ARGB interpolation.
    Color,
    /// User-supplied evaluator.
    Custom(SharedEvaluator),
}

impl Interpolation {
    /// Pick the strategy for a value sequence starting with `first`.
    #[must_use]
    pub fn resolve(
        first: &AnimatedValue,
        is_color: bool,
        custom: Option<&SharedEvaluator>,
    ) -> Self {
        if let Some(custom) = custom {
            return Self::Custom(Arc::clone(custom));
        }
        match first.kind() {
            ValueKind::Integer if is_color => Self::Color,
            ValueKind::Integer => Self::Integer,
            ValueKind::Float => Self::Float,
            ValueKind::Color => Self::Color,
        }
    }

    /// Whether a value may appear in a sequence animated by this strategy.
    #[must_use]
    pub fn accepts(&self, value: &AnimatedValue) -> bool {
        match self {
            Self::Float => value.kind() == ValueKind::Float,
            Self::Integer => value.kind() == ValueKind::Integer,
            Self::Color => {
                matches!(value.kind(), ValueKind::Integer | ValueKind::Color)
            }
            Self::Custom(_) => true,
        }
    }

    /// Value at `fraction` between two adjacent keyframes.
    ///
    /// The result keeps the kind of `start`.
    #[must_use]
    pub fn between(
        &self,
        fraction: f32,
        start: &AnimatedValue,
        end: &AnimatedValue,
    ) -> AnimatedValue {
        match self {
            Self::Float => {
                let (a, b) = (start.as_f32(), end.as_f32());
                AnimatedValue::Float(a + (b - a) * fraction)
            }
            Self::Integer => {
                let (a, b) = (start.as_f32(), end.as_f32());
                AnimatedValue::Integer((a + (b - a) * fraction).round() as i32)
            }
            Self::Color => {
                let c = start.as_argb().lerp(end.as_argb(), fraction);
                match start.kind() {
                    ValueKind::Integer => AnimatedValue::Integer(c.0 as i32),
                    ValueKind::Float | ValueKind::Color => AnimatedValue::Color(c),
                }
            }
            Self::Custom(e) => e.evaluate(fraction, start, end),
        }
    }

    /// Name for debugging/logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Color => "color",
            Self::Custom(e) => e.name(),
        }
    }
}

impl std::fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sample a keyframe sequence at an eased `fraction`.
///
/// Keyframes are spaced evenly over [0, 1]. A single keyframe is returned
/// as-is; an empty sequence yields `None`.
#[must_use]
pub fn sample_keyframes(
    interpolation: &Interpolation,
    values: &[AnimatedValue],
    fraction: f32,
) -> Option<AnimatedValue> {
    match values {
        [] => None,
        [only] => Some(*only),
        _ => {
            let segments = values.len() - 1;
            let scaled = fraction.clamp(0.0, 1.0) * segments as f32;
            let index = (scaled.floor() as usize).min(segments - 1);
            let local = scaled - index as f32;
            Some(interpolation.between(
                local,
                &values[index],
                &values[index + 1],
            ))
        }
    }
}

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Defaults applied to transitions the controller synthesizes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
pub struct TransitionOptions {
    /// Duration of a synthesized transition, in milliseconds.
    #[schemars(title = "Duration (ms)")]
    pub duration_ms: u64,
    /// Easing of a synthesized transition.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// End each synthesized leg with the destination view state's
    /// visibility. Off: views start and stay visible.
    #[schemars(title = "Apply State Visibility")]
    pub apply_state_visibility: bool,
}

impl TransitionOptions {
    /// Duration as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration_ms: 3500,
            easing: EasingFunction::AccelerateDecelerate,
            apply_state_visibility: false,
        }
    }
}

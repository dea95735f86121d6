//! The seam between the controller and whatever actually animates views.
//!
//! The controller only ever builds an [`AnimationGroup`], hands it to an
//! [`AnimationEngine`], attaches start/end listeners to the returned
//! [`PlayableHandle`], and starts it.

use std::time::Duration;

use super::actions::SharedActions;
use super::interpolation::{sample_keyframes, Interpolation};
use crate::state::{AnimatedValue, ViewId, Visibility};
use crate::util::easing::EasingFunction;

/// Callback fired once when a group starts or ends.
pub type Listener = Box<dyn FnOnce() + Send>;

/// A single property animation inside a group.
#[derive(Debug, Clone)]
pub struct SubAnimation {
    /// View being animated.
    pub target: ViewId,
    /// Property being animated.
    pub property: String,
    /// Keyframes. A single keyframe means "from the live value".
    pub values: Vec<AnimatedValue>,
    /// Strategy between keyframes.
    pub interpolation: Interpolation,
    /// Easing applied to this animation's local progress.
    pub easing: EasingFunction,
    /// Delay from group start.
    pub delay: Duration,
    /// Own duration after the delay.
    pub duration: Duration,
    /// Visibility written when this animation starts.
    pub start_visibility: Visibility,
    /// Visibility written when this animation ends.
    pub end_visibility: Visibility,
}

impl SubAnimation {
    /// Local progress (0.0 to 1.0) at `elapsed` since the group started,
    /// or `None` before the delay has passed.
    #[must_use]
    pub fn local_progress(&self, elapsed: Duration) -> Option<f32> {
        let since = elapsed.checked_sub(self.delay)?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        Some((since.as_secs_f32() / self.duration.as_secs_f32()).min(1.0))
    }

    /// Value at local progress `t`, animating from `live` when this
    /// animation holds a single keyframe. The last keyframe is returned
    /// exactly once `t` reaches 1.
    #[must_use]
    pub fn value_at(
        &self,
        t: f32,
        live: Option<AnimatedValue>,
    ) -> Option<AnimatedValue> {
        if t >= 1.0 {
            return self.values.last().copied();
        }
        let eased = self.easing.evaluate(t);
        match (self.values.as_slice(), live) {
            ([end], Some(start)) => {
                Some(self.interpolation.between(eased, &start, end))
            }
            (values, _) => {
                sample_keyframes(&self.interpolation, values, eased)
            }
        }
    }
}

/// Transition-wide progress reporting.
#[derive(Clone)]
pub struct ProgressTrack {
    /// Easing applied to raw group progress before reporting.
    pub easing: EasingFunction,
    /// Receives `on_step(progress)` every frame.
    pub actions: SharedActions,
}

impl ProgressTrack {
    /// Report progress for raw group fraction `t`.
    pub fn step(&self, t: f32) {
        self.actions.on_step(self.easing.evaluate(t));
    }
}

impl std::fmt::Debug for ProgressTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTrack")
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}

/// Everything an engine needs to play one transition.
#[derive(Debug, Clone)]
pub struct AnimationGroup {
    /// Label for logging, usually `"from -> to"`.
    pub label: String,
    /// Span of the whole group.
    pub duration: Duration,
    /// Property animations played together.
    pub animations: Vec<SubAnimation>,
    /// Progress reporting for the whole group.
    pub progress: ProgressTrack,
}

/// Something that plays [`AnimationGroup`]s.
pub trait AnimationEngine: Send + Sync {
    /// Prepare a group for playing. Nothing runs until the handle starts.
    fn build_group(&self, group: AnimationGroup) -> Box<dyn PlayableHandle>;
}

/// A prepared, not-yet-started animation group.
pub trait PlayableHandle: Send {
    /// Register a listener fired when the group starts.
    fn on_start(&mut self, listener: Listener);

    /// Register a listener fired when the group ends.
    ///
    /// Engines must fire end listeners without holding any lock they also
    /// take in [`start`](Self::start); listeners commonly start the next
    /// group.
    fn on_end(&mut self, listener: Listener);

    /// Start playing.
    fn start(self: Box<Self>);
}

//! Frame-driven reference engine.
//!
//! [`FrameEngine`] plays [`AnimationGroup`]s against a [`ViewSink`] each
//! time the host calls [`FrameEngine::tick`]. A group's clock starts on the
//! first tick after it is started, the way platform animators begin on the
//! next frame.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use super::engine::{
    AnimationEngine, AnimationGroup, Listener, PlayableHandle, ProgressTrack,
    SubAnimation,
};
use crate::state::{AnimatedValue, ViewId, Visibility};
use crate::util::lock;

/// Where animated values end up.
pub trait ViewSink: Send + Sync {
    /// Current value of a view property, if the sink knows it.
    fn property(&self, view: ViewId, property: &str) -> Option<AnimatedValue>;

    /// Write a view property.
    fn set_property(&self, view: ViewId, property: &str, value: AnimatedValue);

    /// Write a view's visibility.
    fn set_visibility(&self, view: ViewId, visibility: Visibility);
}

/// In-memory [`ViewSink`] for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    properties: Mutex<FxHashMap<(ViewId, String), AnimatedValue>>,
    visibility: Mutex<FxHashMap<ViewId, Visibility>>,
}

impl MemorySink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written for a property.
    #[must_use]
    pub fn get(&self, view: ViewId, property: &str) -> Option<AnimatedValue> {
        lock(&self.properties)
            .get(&(view, property.to_owned()))
            .copied()
    }

    /// Last visibility written for a view, `Visible` if never written.
    #[must_use]
    pub fn visibility(&self, view: ViewId) -> Visibility {
        lock(&self.visibility)
            .get(&view)
            .copied()
            .unwrap_or_default()
    }
}

impl ViewSink for MemorySink {
    fn property(&self, view: ViewId, property: &str) -> Option<AnimatedValue> {
        self.get(view, property)
    }

    fn set_property(&self, view: ViewId, property: &str, value: AnimatedValue) {
        let _ = lock(&self.properties).insert((view, property.to_owned()), value);
    }

    fn set_visibility(&self, view: ViewId, visibility: Visibility) {
        let _ = lock(&self.visibility).insert(view, visibility);
    }
}

/// One sub-animation in flight.
struct RunningAnimation {
    animation: SubAnimation,
    /// Live value read when a single-keyframe animation starts.
    live_start: Option<AnimatedValue>,
    started: bool,
    finished: bool,
}

impl RunningAnimation {
    fn advance(&mut self, elapsed: Duration, sink: &dyn ViewSink) {
        if self.finished {
            return;
        }
        let Some(t) = self.animation.local_progress(elapsed) else {
            return;
        };
        let target = self.animation.target;
        let property = self.animation.property.as_str();

        if !self.started {
            self.started = true;
            sink.set_visibility(target, self.animation.start_visibility);
            if self.animation.values.len() == 1 {
                self.live_start = sink.property(target, property);
            }
        }

        if let Some(value) = self.animation.value_at(t, self.live_start) {
            sink.set_property(target, property, value);
        }

        if t >= 1.0 {
            self.finished = true;
            sink.set_visibility(target, self.animation.end_visibility);
        }
    }
}

/// One group in flight.
struct RunningGroup {
    label: String,
    started_at: Option<Instant>,
    duration: Duration,
    animations: Vec<RunningAnimation>,
    progress: ProgressTrack,
    on_end: Vec<Listener>,
}

impl RunningGroup {
    /// Advance to `now`. Returns `true` once the group has finished.
    fn advance(&mut self, now: Instant, sink: &dyn ViewSink) -> bool {
        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started_at);

        for animation in &mut self.animations {
            animation.advance(elapsed, sink);
        }

        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        self.progress.step(t);

        t >= 1.0 && self.animations.iter().all(|a| a.finished)
    }
}

type RunningList = Arc<Mutex<Vec<RunningGroup>>>;

/// Headless [`AnimationEngine`] driven by explicit ticks.
pub struct FrameEngine<S: ViewSink> {
    sink: Arc<S>,
    running: RunningList,
}

impl<S: ViewSink> FrameEngine<S> {
    /// Engine writing into `sink`.
    pub fn new(sink: Arc<S>) -> Self {
        Self {
            sink,
            running: Arc::default(),
        }
    }

    /// The sink this engine writes into.
    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Number of started, unfinished groups.
    pub fn running(&self) -> usize {
        lock(&self.running).len()
    }

    /// Whether no group is playing.
    pub fn is_idle(&self) -> bool {
        self.running() == 0
    }

    /// Advance every running group to `now`.
    ///
    /// End listeners of groups that finish are fired after all groups have
    /// advanced, with no engine lock held. Returns `true` while any group
    /// is still playing, including groups started by those listeners.
    pub fn tick(&self, now: Instant) -> bool {
        // Work on a detached list so sink writes and callbacks may start
        // new groups on this engine.
        let mut groups = std::mem::take(&mut *lock(&self.running));

        let mut finished = Vec::new();
        let sink: &dyn ViewSink = &*self.sink;
        groups.retain_mut(|group| {
            if group.advance(now, sink) {
                finished.push((
                    std::mem::take(&mut group.label),
                    std::mem::take(&mut group.on_end),
                ));
                false
            } else {
                true
            }
        });

        {
            let mut running = lock(&self.running);
            // Groups started during this tick go after the ones we held.
            let started_meanwhile = std::mem::replace(&mut *running, groups);
            running.extend(started_meanwhile);
        }

        for (label, listeners) in finished {
            log::debug!("[{label}] finished");
            for listener in listeners {
                listener();
            }
        }

        !self.is_idle()
    }
}

impl<S: ViewSink> std::fmt::Debug for FrameEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameEngine")
            .field("running", &self.running())
            .finish_non_exhaustive()
    }
}

impl<S: ViewSink + 'static> AnimationEngine for FrameEngine<S> {
    fn build_group(&self, group: AnimationGroup) -> Box<dyn PlayableHandle> {
        Box::new(FrameHandle {
            group,
            running: Arc::clone(&self.running),
            on_start: Vec::new(),
            on_end: Vec::new(),
        })
    }
}

/// Handle returned by [`FrameEngine::build_group`].
struct FrameHandle {
    group: AnimationGroup,
    running: RunningList,
    on_start: Vec<Listener>,
    on_end: Vec<Listener>,
}

impl PlayableHandle for FrameHandle {
    fn on_start(&mut self, listener: Listener) {
        self.on_start.push(listener);
    }

    fn on_end(&mut self, listener: Listener) {
        self.on_end.push(listener);
    }

    fn start(self: Box<Self>) {
        let Self {
            group,
            running,
            on_start,
            on_end,
        } = *self;

        log::debug!(
            "[{}] started: {} animation(s) over {:?}",
            group.label,
            group.animations.len(),
            group.duration
        );
        for listener in on_start {
            listener();
        }

        let animations = group
            .animations
            .into_iter()
            .map(|animation| RunningAnimation {
                animation,
                live_start: None,
                started: false,
                finished: false,
            })
            .collect();
        lock(&running).push(RunningGroup {
            label: group.label,
            started_at: None,
            duration: group.duration,
            animations,
            progress: group.progress,
            on_end,
        });
    }
}

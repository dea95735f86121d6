//! Transition model and its path to an animation engine.
//!
//! - [`Transition`] / [`TransitionComponent`]: what to animate, reversible
//! - [`materialize`]: transition → engine-agnostic [`AnimationGroup`]
//! - [`AnimationEngine`] / [`PlayableHandle`]: the injected player
//! - [`FrameEngine`]: headless player ticked by the host

mod actions;
mod engine;
pub mod interpolation;
mod materialize;
mod runner;
mod transition;

pub use actions::{
    shared_actions, CallbackActions, NoActions, SharedActions,
    TransitionActions,
};
pub use engine::{
    AnimationEngine, AnimationGroup, Listener, PlayableHandle, ProgressTrack,
    SubAnimation,
};
pub use materialize::{materialize, materialize_component};
pub use runner::{FrameEngine, MemorySink, ViewSink};
pub use transition::{Transition, TransitionComponent};

//! Goal/state model: what a set of views should look like in a named state.
//!
//! Everything here is immutable once built. A [`Composition`] is the unit
//! the controller stores per state name; default transitions are derived
//! from it by [`Transition::for_composition`].
//!
//! [`Transition::for_composition`]: crate::animation::Transition::for_composition

mod value;
mod view;

pub use value::{AnimatedValue, Argb, ValueKind};
pub use view::{
    Composition, PropertyGoal, ViewId, ViewState, Visibility, UNGROUPED,
};

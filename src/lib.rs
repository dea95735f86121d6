// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated transitions between named view states.
//!
//! A [`controller::ViewStateController`] owns a set of named states, each a
//! [`state::Composition`] of target property values and visibility for one
//! or more views. Asking it to `show` a state resolves a transition from
//! wherever the controller is (or is about to be), materializes it into an
//! [`animation::AnimationGroup`], and hands that to an injected
//! [`animation::AnimationEngine`]. Transitions play strictly one at a time,
//! in request order.
//!
//! # Key entry points
//!
//! - [`controller::ViewStateController`] - the controller and its builder
//! - [`controller::TransitionTable`] - explicit and lazily-synthesized
//!   transitions per state pair
//! - [`animation::Transition`] - timed, reversible animation recipe
//! - [`animation::FrameEngine`] - headless engine ticked by the host
//! - [`options::Options`] - default duration, easing and queue behavior
//!
//! # Back navigation
//!
//! States may carry an integer group. Moving between states of the same
//! group replaces the top of the back stack; moving into another group
//! pushes onto it. [`controller::ViewStateController::back`] returns to the
//! state beneath the top.

pub mod animation;
pub mod controller;
pub mod error;
pub mod options;
pub mod state;
pub mod util;

pub use controller::{StackGrouping, ViewStateController};
pub use error::ViewStateError;

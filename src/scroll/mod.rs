//! Scroll trigger module
//!
//! Connects "the bottom of the feed became visible" to
//! [`PaginationController::load_next`](crate::feed::PaginationController::load_next).
//!
//! The host's viewport-intersection mechanism is injected as a
//! [`VisibilitySource`]. The trigger knows nothing about pages; repeated
//! visibility events are absorbed by the controller's single-flight guard.

mod trigger;
mod visibility;

pub use trigger::ScrollTrigger;
pub use visibility::{ManualVisibility, Registration, Sentinel, VisibilityCallback, VisibilitySource};

//! Slide carousel: the navigation controller, the transition timeline it runs,
//! and the slide assets it draws.

mod controller;
mod slide;
mod transition;

pub use controller::Carousel;
pub use slide::Slide;
pub use transition::{HeadingPose, OverlayPose, SlideParts};

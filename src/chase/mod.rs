//! The drag area: a leader mascot that wanders and a follower that chases it,
//! both draggable and throwable.

mod controller;
mod mascot;

pub use controller::Chase;

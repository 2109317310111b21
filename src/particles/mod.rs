//! Short-lived visuals: confetti, bursts, balloon shards and the balloons
//! themselves. Everything here lives in a capped [`pool::Pool`] and is
//! dropped by its owner when its own timeline ends.

mod balloons;
mod field;
mod particle;
mod pool;

pub use balloons::BalloonFleet;
pub use field::ParticleField;

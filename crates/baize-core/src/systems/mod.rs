pub mod rng;
pub mod sparks;

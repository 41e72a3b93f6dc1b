pub mod curve;
pub mod math;
pub mod path;
pub mod rng;

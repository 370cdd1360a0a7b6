// Public-key arithmetic over curve25519.
pub mod arith;
pub mod curve;
pub mod curve25519;
pub mod ladder;
pub mod params;
pub mod point;

//! Montgomery-form curve25519 arithmetic behind a generic point interface.
//!
//! `Add`, `Double` and `IsOnCurve` are plain big-integer code and are not
//! constant time. Scalar multiplication goes through a constant-time
//! ladder from `curve25519-dalek`.
pub mod common;
pub mod pke;
pub mod util;

pub use common::CurveError;
pub use pke::curve::{curve25519, Curve};
pub use pke::curve25519::Curve25519;
pub use pke::ladder::{DalekLadder, MontgomeryLadder, X25519Ladder};
pub use pke::params::CurveParams;
pub use pke::point::{Point, UCoordinate};
pub use util::{FieldBytes, LeBytes, ScalarBytes};

// Generic curve interface and the process-wide curve25519 instance.
use crate::common::CurveError;
use crate::pke::curve25519::Curve25519;
use crate::pke::params::CurveParams;
use crate::pke::point::{Point, UCoordinate};
use crate::util::ScalarBytes;
use log::debug;
use once_cell::sync::OnceCell;

/// A curve with a generic, non-constant-time affine point interface.
/// Scalar multiplication is expected to be constant time.
pub trait Curve {
    fn params(&self) -> &CurveParams;
    fn is_on_curve(&self, point: &Point) -> bool;
    fn add(&self, p1: &Point, p2: &Point) -> Result<Point, CurveError>;
    fn double(&self, point: &Point) -> Result<Point, CurveError>;
    fn scalar_mult(&self, point: &Point, k: &ScalarBytes) -> UCoordinate;
    fn scalar_base_mult(&self, k: &ScalarBytes) -> UCoordinate;
}

static CURVE25519: OnceCell<Curve25519> = OnceCell::new();

/// Shared curve25519, built on first use.
///
/// Independent instances can be made with `Curve25519::new`.
pub fn curve25519() -> &'static Curve25519 {
    CURVE25519.get_or_init(|| {
        debug!("initializing shared curve25519");
        match Curve25519::new() {
            Ok(curve) => curve,
            Err(e) => panic!("embedded curve25519 parameters are malformed: {}", e),
        }
    })
}

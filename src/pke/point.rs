use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on a Montgomery curve in affine coordinates.
///
/// The group identity has its own variant, so `(0, 0)` is just the
/// 2-torsion point it really is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Point {
    Infinity,
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    pub fn affine(x: BigInt, y: BigInt) -> Self {
        Point::Affine { x, y }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// Coordinates of an affine point, `None` for the identity.
    pub fn coordinates(&self) -> Option<(&BigInt, &BigInt)> {
        match self {
            Point::Infinity => None,
            Point::Affine { x, y } => Some((x, y)),
        }
    }
}

impl From<(BigInt, BigInt)> for Point {
    fn from((x, y): (BigInt, BigInt)) -> Self {
        Point::Affine { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "infinity"),
            Point::Affine { x, y } => write!(f, "({}, {})", x, y),
        }
    }
}

/// Output of the u-only ladder. The v-coordinate is not recovered;
/// see `Curve25519::recover_v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UCoordinate {
    pub u: BigInt,
}

impl UCoordinate {
    /// The `(u, 0)` pair of the generic curve interface. The zero is a
    /// placeholder, not a v-coordinate.
    pub fn coordinates(&self) -> (BigInt, BigInt) {
        (self.u.clone(), BigInt::from(0u8))
    }
}

#[test]
fn test_point_display() {
    assert_eq!(Point::Infinity.to_string(), "infinity");
    let p: Point = (BigInt::from(9u8), BigInt::from(0u8)).into();
    assert_eq!(p.to_string(), "(9, 0)");
    assert!(!p.is_infinity());
    assert_eq!(UCoordinate { u: 9u8.into() }.coordinates(), (9u8.into(), 0u8.into()));
}

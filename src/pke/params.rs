// Domain parameters of curve25519 in Montgomery form.
// v^2 = u^3 + 486662u^2 + u mod (2^255 - 19)
// See https://safecurves.cr.yp.to/field.html and RFC 7748 section 4.1.
use crate::common::CurveError;
use crate::pke::point::Point;
use log::debug;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

const P: &str = "57896044618658097711785492504343953926634992332820282019728792003956564819949";
const N: &str = "7237005577332262213973186563042994240857116359379907606001950938285454250989";
const A: &str = "486662";
const GU: &str = "9";
const GV: &str = "14781619447589544791020593568409986887264606134616475288964881837755586237401";

/// Parameters of a Montgomery curve, laid out like a generic short
/// Weierstrass parameter record: the Montgomery coefficient A sits in `b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    pub name: String,
    /// Prime modulus of the base field.
    pub p: BigInt,
    /// Order of the generator.
    pub n: BigInt,
    /// Montgomery coefficient A.
    pub b: BigInt,
    pub gx: BigInt,
    pub gy: BigInt,
    pub bit_size: usize,
}

fn parse(name: &'static str, value: &str) -> Result<BigInt, CurveError> {
    BigInt::parse_bytes(value.as_bytes(), 10).ok_or(CurveError::InvalidParameter(name))
}

impl CurveParams {
    pub fn curve25519() -> Result<Self, CurveError> {
        let params = Self {
            name: "curve-25519".to_owned(),
            p: parse("P", P)?,
            n: parse("N", N)?,
            b: parse("A", A)?,
            gx: parse("Gu", GU)?,
            gy: parse("Gv", GV)?,
            bit_size: 256,
        };
        debug!("built {} parameters", params.name);
        Ok(params)
    }

    pub fn generator(&self) -> Point {
        Point::affine(self.gx.clone(), self.gy.clone())
    }
}

#[test]
fn test_curve25519_params() {
    let params = CurveParams::curve25519().unwrap();
    let p = (BigInt::from(1u8) << 255usize) - 19u32;
    assert_eq!(params.p, p);
    // n = 2^252 + 27742317777372353535851937790883648493
    let n = (BigInt::from(1u8) << 252usize)
        + BigInt::parse_bytes(b"27742317777372353535851937790883648493", 10).unwrap();
    assert_eq!(params.n, n);
    assert_eq!(params.b, BigInt::from(486662u32));
    assert_eq!(params.bit_size, 256);
    assert_eq!(params.generator(), Point::affine(9u32.into(), params.gy.clone()));
}

#[test]
fn test_malformed_constant() {
    assert_eq!(parse("P", "0x7f"), Err(CurveError::InvalidParameter("P")));
}

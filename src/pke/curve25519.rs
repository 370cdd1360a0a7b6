// Operations over curve25519.
// parameters:
// v^2 = u^3 + 486662u^2 + u mod (2^255 - 19)
// p = 0x7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed
// A = 0x0000000000000000000000000000000000000000000000000000000000076d06
// contains 8*q elements.
//
// Add, Double and IsOnCurve are generic big-integer code and NOT constant
// time. Only the ladder behind scalar_mult/scalar_base_mult is.
use crate::common::CurveError;
use crate::pke::arith::{self, reduce};
use crate::pke::curve::Curve;
use crate::pke::ladder::{DalekLadder, MontgomeryLadder};
use crate::pke::params::CurveParams;
use crate::pke::point::{Point, UCoordinate};
use crate::util::{FieldBytes, ScalarBytes};
use log::{trace, warn};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// curve25519 with the generic affine point interface.
#[derive(Debug, Clone)]
pub struct Curve25519<L = DalekLadder> {
    params: CurveParams,
    ladder: L,
}

impl Curve25519<DalekLadder> {
    pub fn new() -> Result<Self, CurveError> {
        Self::with_ladder(DalekLadder)
    }
}

impl<L: MontgomeryLadder> Curve25519<L> {
    pub fn with_ladder(ladder: L) -> Result<Self, CurveError> {
        Ok(Self {
            params: CurveParams::curve25519()?,
            ladder,
        })
    }

    /// x3 = l^2 - A - x1 - x2
    /// y3 = (x1 - x3)*l - y1
    /// Shared tail of addition and doubling, see
    /// https://www.hyperelliptic.org/EFD/g1p/auto-montgom.html
    fn chord(&self, x1: &BigInt, y1: &BigInt, x2: &BigInt, lambda: &BigInt) -> Point {
        let p = &self.params.p;
        let lambda = reduce(lambda, p);
        let x3 = reduce(&(&lambda * &lambda - &self.params.b - x1 - x2), p);
        let y3 = reduce(&((x1 - &x3) * &lambda - y1), p);
        Point::affine(x3, y3)
    }

    fn encode_u(&self, point: &Point) -> FieldBytes {
        match point.coordinates() {
            None => FieldBytes::default(),
            // Reduced values are below 2^255 and always fit.
            Some((x, _)) => FieldBytes::truncating(&reduce(x, &self.params.p).to_bytes_le().1),
        }
    }

    fn decode_u(out: &FieldBytes) -> UCoordinate {
        UCoordinate {
            u: BigInt::from_bytes_le(Sign::Plus, out.as_bytes()),
        }
    }

    /// -(x, y) = (x, -y)
    pub fn negate(&self, point: &Point) -> Point {
        match point.coordinates() {
            None => Point::Infinity,
            Some((x, y)) => {
                let p = &self.params.p;
                Point::affine(reduce(x, p), reduce(&-y, p))
            }
        }
    }

    /// Sum of any two points. Equal points are doubled and opposite points
    /// cancel, so unlike `add` this has no singular inputs.
    fn add_or_double(&self, p1: &Point, p2: &Point) -> Result<Point, CurveError> {
        if let (Some((x1, y1)), Some((x2, y2))) = (p1.coordinates(), p2.coordinates()) {
            let p = &self.params.p;
            if reduce(x1, p) == reduce(x2, p) {
                if reduce(&(y1 + y2), p).is_zero() {
                    return Ok(Point::Infinity);
                }
                return self.double(p1);
            }
        }
        self.add(p1, p2)
    }

    /// Variable-time double-and-add, most significant bit first.
    ///
    /// Reference multiplier on full `(u, v)` points built from `add` and
    /// `double`. Slow and leaks `k` through timing; use `scalar_mult` for
    /// anything secret.
    pub fn mul_vartime(&self, point: &Point, k: &BigUint) -> Result<Point, CurveError> {
        if point.is_infinity() {
            return Ok(Point::Infinity);
        }
        let mut acc = Point::Infinity;
        for bit in k.to_radix_be(2) {
            // 2-torsion points double to the identity.
            acc = match acc.coordinates() {
                Some((_, y)) if reduce(y, &self.params.p).is_zero() => Point::Infinity,
                _ => self.double(&acc)?,
            };
            if bit == 1 {
                acc = self.add_or_double(&acc, point)?;
            }
        }
        Ok(acc)
    }

    /// Find the point with u-coordinate `u` whose v has parity `odd`.
    ///
    /// Fills in the v-coordinate that the ladder drops. Fails with
    /// `NotOnCurve` when `u` belongs to the twist.
    pub fn recover_v(&self, u: &BigInt, odd: bool) -> Result<Point, CurveError> {
        let p = &self.params.p;
        let u = reduce(u, p);
        let rhs = ((&u + &self.params.b) * &u + 1u32) * &u;
        let v = arith::sqrt(&rhs, p).ok_or(CurveError::NotOnCurve)?;
        let v = if arith::sgn0(&v, p) == odd {
            v
        } else {
            reduce(&-v, p)
        };
        Ok(Point::affine(u, v))
    }

    /// `scalar_mult` for callers that want off-curve points refused instead
    /// of multiplied on the twist.
    pub fn checked_scalar_mult(
        &self,
        point: &Point,
        k: &ScalarBytes,
    ) -> Result<UCoordinate, CurveError> {
        if !self.is_on_curve(point) {
            warn!("refusing scalar multiplication of off-curve point {}", point);
            return Err(CurveError::NotOnCurve);
        }
        Ok(self.scalar_mult(point, k))
    }
}

impl<L: MontgomeryLadder> Curve for Curve25519<L> {
    fn params(&self) -> &CurveParams {
        &self.params
    }

    /// v^2 = u^3 + A*u^2 + u
    fn is_on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point.coordinates() {
            None => return true,
            Some(c) => c,
        };
        let p = &self.params.p;
        let x2 = x * x;
        let rhs = &x2 * x + &x2 * &self.params.b + x;
        reduce(&rhs, p) == reduce(&(y * y), p)
    }

    /// l = (y2-y1)/(x2-x1)
    ///
    /// Does not look at point equality: `x1 == x2` makes the slope singular
    /// and returns `NonInvertible`. Equal points go through `double`.
    fn add(&self, p1: &Point, p2: &Point) -> Result<Point, CurveError> {
        let ((x1, y1), (x2, y2)) = match (p1.coordinates(), p2.coordinates()) {
            (None, _) => return Ok(p2.clone()),
            (_, None) => return Ok(p1.clone()),
            (Some(a), Some(b)) => (a, b),
        };
        let lambda = (y2 - y1) * arith::inverse(&(x2 - x1), &self.params.p)?;
        Ok(self.chord(x1, y1, x2, &lambda))
    }

    /// l = (3*x1^2 + 2*A*x1 + 1)/(2*y1)
    ///
    /// A 2-torsion point (y1 = 0) returns `NonInvertible`.
    fn double(&self, point: &Point) -> Result<Point, CurveError> {
        let (x1, y1) = match point.coordinates() {
            None => return Ok(Point::Infinity),
            Some(c) => c,
        };
        let num = (x1 * 3u32 + &self.params.b * 2u32) * x1 + 1u32;
        let lambda = num * arith::inverse(&(y1 * 2u32), &self.params.p)?;
        Ok(self.chord(x1, y1, x1, &lambda))
    }

    /// u([k]P), with `k` little-endian. v is not recovered.
    fn scalar_mult(&self, point: &Point, k: &ScalarBytes) -> UCoordinate {
        let u = self.encode_u(point);
        trace!("ladder on u = {}", hex::encode(u.as_bytes()));
        Self::decode_u(&self.ladder.ladder(k, &u))
    }

    /// u([k]G), with `k` little-endian. v is not recovered.
    fn scalar_base_mult(&self, k: &ScalarBytes) -> UCoordinate {
        trace!("ladder on generator");
        Self::decode_u(&self.ladder.ladder_base(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pke::ladder::X25519Ladder;
    use crate::util::LeBytes;
    use rand::prelude::*;
    use rand_chacha::ChaCha20Rng;

    fn int(s: &str) -> BigInt {
        BigInt::parse_bytes(s.as_bytes(), 10).unwrap()
    }

    fn generator() -> Point {
        Curve25519::new().unwrap().params().generator()
    }

    #[test]
    fn generator_on_curve() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        assert!(curve.is_on_curve(&g));
        assert!(curve.is_on_curve(&Point::Infinity));
        assert!(curve.is_on_curve(&Point::affine(0u8.into(), 0u8.into())));

        let (x, y) = g.coordinates().unwrap();
        assert!(!curve.is_on_curve(&Point::affine(x + 1u32, y.clone())));
        assert!(!curve.is_on_curve(&Point::affine(x.clone(), y + 1u32)));
        // Unreduced representatives are accepted.
        let p = &curve.params().p;
        assert!(curve.is_on_curve(&Point::affine(x + p, y - p)));
    }

    #[test]
    fn double_vectors() {
        let curve = Curve25519::new().unwrap();
        let g2 = curve.double(&generator()).unwrap();
        assert_eq!(
            g2,
            Point::affine(
                int("6784692728748995825599862402855483522016546426567910438357042338075027826575"),
                int("14982863109320699114866362806305859444453206692004135551371801829915686450358"),
            )
        );
        let g4 = curve.double(&g2).unwrap();
        assert_eq!(
            g4,
            Point::affine(
                int("12318642006867402687195826566147291859634823582672295191656499276835526033145"),
                int("9343467693237486709905252998911952863134805995110526737200728195882424275543"),
            )
        );
        assert!(curve.is_on_curve(&g4));
    }

    #[test]
    fn add_is_commutative() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let mut rng = ChaCha20Rng::seed_from_u64(486662);
        for _ in 0..16 {
            let a = BigUint::from(rng.next_u64());
            let b = BigUint::from(rng.next_u64());
            if a == b {
                continue;
            }
            let p = curve.mul_vartime(&g, &a).unwrap();
            let q = curve.mul_vartime(&g, &b).unwrap();
            let pq = curve.add(&p, &q).unwrap();
            assert_eq!(pq, curve.add(&q, &p).unwrap());
            assert!(curve.is_on_curve(&pq));
            assert_eq!(pq, curve.mul_vartime(&g, &(a + b)).unwrap());
        }
    }

    #[test]
    fn add_equal_x_is_singular() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        // Doubling only goes through `double`.
        assert_eq!(curve.add(&g, &g), Err(CurveError::NonInvertible));
        assert_eq!(curve.add(&g, &curve.negate(&g)), Err(CurveError::NonInvertible));
        assert!(curve.double(&g).is_ok());
    }

    #[test]
    fn two_torsion_double_is_singular() {
        let curve = Curve25519::new().unwrap();
        let t = Point::affine(0u8.into(), 0u8.into());
        assert_eq!(curve.double(&t), Err(CurveError::NonInvertible));
        assert_eq!(curve.mul_vartime(&t, &BigUint::from(2u8)), Ok(Point::Infinity));
        assert_eq!(curve.mul_vartime(&t, &BigUint::from(3u8)), Ok(t));
    }

    #[test]
    fn infinity_is_identity() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        assert_eq!(curve.add(&Point::Infinity, &g).unwrap(), g);
        assert_eq!(curve.add(&g, &Point::Infinity).unwrap(), g);
        assert_eq!(curve.double(&Point::Infinity).unwrap(), Point::Infinity);
        assert_eq!(curve.negate(&Point::Infinity), Point::Infinity);
    }

    #[test]
    fn reference_multiplier() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let g2 = curve.double(&g).unwrap();
        assert_eq!(curve.mul_vartime(&g, &BigUint::from(0u8)).unwrap(), Point::Infinity);
        assert_eq!(curve.mul_vartime(&g, &BigUint::from(1u8)).unwrap(), g);
        assert_eq!(
            curve.mul_vartime(&g, &BigUint::from(3u8)).unwrap(),
            curve.add(&g, &g2).unwrap()
        );
        assert_eq!(
            curve.mul_vartime(&g, &BigUint::from(4u8)).unwrap(),
            curve.double(&g2).unwrap()
        );
        let n = curve.params().n.to_biguint().unwrap();
        assert_eq!(curve.mul_vartime(&g, &n).unwrap(), Point::Infinity);
        assert_eq!(
            curve.mul_vartime(&g, &(n - 1u32)).unwrap(),
            curve.negate(&g)
        );
    }

    #[test]
    fn base_mult_matches_mult_of_generator() {
        let plain = Curve25519::new().unwrap();
        let x25519 = Curve25519::with_ladder(X25519Ladder).unwrap();
        let g = generator();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut k = [0u8; 32];
        for _ in 0..32 {
            rng.fill_bytes(&mut k);
            let k = LeBytes(k);
            assert_eq!(plain.scalar_base_mult(&k), plain.scalar_mult(&g, &k));
            assert_eq!(x25519.scalar_base_mult(&k), x25519.scalar_mult(&g, &k));
        }
    }

    #[test]
    fn ladder_matches_reference_multiplier() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let mut rng = ChaCha20Rng::seed_from_u64(255);
        let mut k = [0u8; 32];
        for _ in 0..4 {
            rng.fill_bytes(&mut k);
            // Below 2^252 < n.
            k[31] &= 0x0f;
            let k = LeBytes(k);
            let full = curve.mul_vartime(&g, &k.to_biguint()).unwrap();
            let u = curve.scalar_base_mult(&k);
            assert_eq!(full.coordinates().map(|(x, _)| x.clone()), Some(u.u.clone()));
            // The dropped v can be recovered up to sign.
            let (_, v) = full.coordinates().unwrap();
            let odd = arith::sgn0(v, &curve.params().p);
            assert_eq!(curve.recover_v(&u.u, odd).unwrap(), full);
        }
    }

    /// u of a full point, with the identity at u = 0 as the ladder encodes it.
    fn u_of(point: &Point) -> BigInt {
        point.coordinates().map_or_else(BigInt::zero, |(x, _)| x.clone())
    }

    #[test]
    fn ladder_matches_reference_multiplier_with_torsion() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        // (1, v) has order 4, so q has order 4n.
        let t4 = curve.recover_v(&BigInt::from(1u8), false).unwrap();
        assert_eq!(
            curve.mul_vartime(&t4, &BigUint::from(2u8)).unwrap(),
            Point::affine(0u8.into(), 0u8.into())
        );
        assert!(curve.mul_vartime(&t4, &BigUint::from(4u8)).unwrap().is_infinity());
        let q = curve.add(&g, &t4).unwrap();

        let n = curve.params().n.to_biguint().unwrap();
        let k = ScalarBytes::try_from(&n).unwrap();
        let full = curve.mul_vartime(&q, &n).unwrap();
        assert_eq!(u_of(&full), BigInt::from(1u8));
        assert_eq!(curve.scalar_mult(&q, &k).u, u_of(&full));

        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut k = [0u8; 32];
        for _ in 0..4 {
            rng.fill_bytes(&mut k);
            let k = LeBytes(k);
            let full = curve.mul_vartime(&q, &k.to_biguint()).unwrap();
            assert_eq!(curve.scalar_mult(&q, &k).u, u_of(&full));
            let full = curve.mul_vartime(&g, &k.to_biguint()).unwrap();
            assert_eq!(curve.scalar_base_mult(&k).u, u_of(&full));
        }
    }

    #[test]
    fn zero_and_one_scalars() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let zero = ScalarBytes::default();
        let one = ScalarBytes::one();
        assert_eq!(curve.scalar_base_mult(&zero).u, BigInt::zero());
        assert_eq!(curve.scalar_mult(&g, &zero).u, BigInt::zero());
        assert_eq!(curve.scalar_base_mult(&one).u, BigInt::from(9u8));
        assert_eq!(curve.scalar_mult(&g, &one).coordinates(), (BigInt::from(9u8), BigInt::zero()));

        let g2 = curve.double(&g).unwrap();
        let (x2, _) = g2.coordinates().unwrap();
        assert_eq!(&curve.scalar_mult(&g2, &one).u, x2);
        assert_eq!(curve.scalar_mult(&Point::Infinity, &one).u, BigInt::zero());
    }

    #[test]
    fn recover_generator() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let p = curve.params().p.clone();
        let odd = arith::sgn0(&curve.params().gy, &p);
        assert_eq!(curve.recover_v(&BigInt::from(9u8), odd).unwrap(), g);
        assert_eq!(curve.recover_v(&BigInt::from(9u8), !odd).unwrap(), curve.negate(&g));

        // First u on the twist.
        let twist = (1u32..)
            .map(BigInt::from)
            .find(|u| curve.recover_v(u, false).is_err())
            .unwrap();
        let rhs = ((&twist + &curve.params().b) * &twist + 1u32) * &twist;
        assert_eq!(arith::sqrt(&rhs, &p), None);
        assert_eq!(curve.recover_v(&twist, true), Err(CurveError::NotOnCurve));
    }

    #[test]
    fn checked_scalar_mult_rejects_off_curve() {
        let curve = Curve25519::new().unwrap();
        let g = generator();
        let (x, y) = g.coordinates().unwrap();
        let bad = Point::affine(x.clone(), y + 1u32);
        let k = ScalarBytes::one();
        assert_eq!(curve.checked_scalar_mult(&bad, &k), Err(CurveError::NotOnCurve));
        assert_eq!(curve.checked_scalar_mult(&g, &k).unwrap(), curve.scalar_mult(&g, &k));
    }
}

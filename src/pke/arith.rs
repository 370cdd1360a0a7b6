// Arithmetic over Z_p with arbitrary-precision integers.
// Variable time. Only for public data.
use crate::common::CurveError;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;

/// Reduce `a` into [0, p). Works for negative and oversized values.
pub fn reduce(a: &BigInt, p: &BigInt) -> BigInt {
    let r = a % p;
    if r.sign() == Sign::Minus {
        r + p
    } else {
        r
    }
}

/// inverse: Get multiplicational reverse.
/// since p is a prime, there is a^(p-1) = 1,
/// therefore a*a^(p-2) = 1 for every a != 0.
/// Zero has no inverse and is reported instead of silently mapping to 0.
pub fn inverse(a: &BigInt, p: &BigInt) -> Result<BigInt, CurveError> {
    let a = reduce(a, p);
    if a.is_zero() {
        return Err(CurveError::NonInvertible);
    }
    Ok(a.modpow(&(p - 2u32), p))
}

/// Get sqrt(a) over p, for `p mod 8 = 5`.
/// Candidate is a^((p+3)/8); if its square is -a, multiply by
/// sqrt(-1) = 2^((p-1)/4). Returns `None` for non-residues.
pub fn sqrt(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let a = reduce(a, p);
    let mut r = a.modpow(&((p + 3u32) >> 3usize), p);
    if reduce(&(&r * &r - &a), p).is_zero() {
        return Some(r);
    }
    let sqrt_m1 = BigInt::from(2u32).modpow(&((p - 1u32) >> 2usize), p);
    r = (r * sqrt_m1) % p;
    if reduce(&(&r * &r - &a), p).is_zero() {
        Some(r)
    } else {
        None
    }
}

/// Parity of the canonical representative of `a`.
pub fn sgn0(a: &BigInt, p: &BigInt) -> bool {
    let (_, digits) = reduce(a, p).to_u32_digits();
    digits.first().map_or(false, |d| d & 1 == 1)
}

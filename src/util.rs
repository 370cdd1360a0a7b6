use crate::common::CurveError;
use num_bigint::BigUint;

/// Fixed-width little-endian integer, as handed to the ladder.
///
/// Building one from a slice is where the width policy is decided:
/// `try_from` rejects anything wider than `N` bytes, `truncating` keeps
/// the first `N` bytes and drops the rest. Shorter input is zero padded
/// at the high end either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct LeBytes<const N: usize>(pub [u8; N]);

/// A 32-byte little-endian scalar. Not reduced modulo the group order.
pub type ScalarBytes = LeBytes<32>;
/// A 32-byte little-endian field element (Montgomery u-coordinate).
pub type FieldBytes = LeBytes<32>;

impl<const N: usize> Default for LeBytes<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> LeBytes<N> {
    #[inline]
    pub fn one() -> Self {
        let mut ret = [0u8; N];
        ret[0] = 1;
        Self(ret)
    }

    pub fn truncating(data: &[u8]) -> Self {
        let mut ret = [0u8; N];
        let len = data.len().min(N);
        ret[..len].copy_from_slice(&data[..len]);
        Self(ret)
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0[..])
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for LeBytes<N> {
    type Error = CurveError;
    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        if data.len() > N {
            return Err(CurveError::InputTooLong {
                len: data.len(),
                max: N,
            });
        }
        Ok(Self::truncating(data))
    }
}

impl<const N: usize> TryFrom<&BigUint> for LeBytes<N> {
    type Error = CurveError;
    fn try_from(n: &BigUint) -> Result<Self, Self::Error> {
        Self::try_from(&n.to_bytes_le()[..])
    }
}

impl<const N: usize> From<[u8; N]> for LeBytes<N> {
    fn from(t: [u8; N]) -> Self {
        Self(t)
    }
}

impl<const N: usize> From<LeBytes<N>> for [u8; N] {
    fn from(t: LeBytes<N>) -> [u8; N] {
        t.0
    }
}

#[test]
fn test_short_input_is_zero_padded() {
    let s = ScalarBytes::try_from(&[1u8, 2, 3][..]).unwrap();
    assert_eq!(&s.0[..3], &[1, 2, 3]);
    assert!(s.0[3..].iter().all(|b| *b == 0));
    assert_eq!(s.to_biguint(), BigUint::from(0x030201u32));
}

#[test]
fn test_long_input_is_rejected() {
    let data = [0xffu8; 33];
    assert_eq!(
        ScalarBytes::try_from(&data[..]),
        Err(CurveError::InputTooLong { len: 33, max: 32 })
    );
}

#[test]
fn test_truncating_drops_high_bytes() {
    let mut data = [0u8; 40];
    data[0] = 7;
    data[39] = 0xaa;
    let s = ScalarBytes::truncating(&data);
    assert_eq!(s, ScalarBytes::try_from(&[7u8][..]).unwrap());
}

#[test]
fn test_biguint_width() {
    let wide = BigUint::from(1u8) << 256;
    assert!(ScalarBytes::try_from(&wide).is_err());
    let fits = (BigUint::from(1u8) << 256) - 1u8;
    assert_eq!(ScalarBytes::try_from(&fits).unwrap(), LeBytes([0xff; 32]));
    assert_eq!(ScalarBytes::one().to_biguint(), BigUint::from(1u8));
    assert_eq!(<[u8; 32]>::from(ScalarBytes::one())[0], 1);
}

// Constant-time u-only scalar multiplication, delegated to curve25519-dalek.
use crate::util::{FieldBytes, ScalarBytes};
use curve25519_dalek::constants::X25519_BASEPOINT;
use curve25519_dalek::montgomery::MontgomeryPoint;

/// The constant-time Montgomery ladder on 32-byte little-endian buffers.
pub trait MontgomeryLadder: Send + Sync {
    /// u([k]P) for the point with u-coordinate `u`.
    fn ladder(&self, scalar: &ScalarBytes, u: &FieldBytes) -> FieldBytes;
    /// u([k]G) for the curve generator.
    fn ladder_base(&self, scalar: &ScalarBytes) -> FieldBytes;
}

/// Plain ladder: all 256 bits of the scalar are used as given, with no
/// reduction and no clamping. Scalar 0 gives u = 0, scalar 1 gives the
/// input back.
#[derive(Debug, Clone, Copy, Default)]
pub struct DalekLadder;

/// Bits of a little-endian scalar, most significant first.
fn bits_be(scalar: &ScalarBytes) -> impl Iterator<Item = bool> + '_ {
    let bytes = scalar.as_bytes();
    (0..256).rev().map(move |i| (bytes[i >> 3] >> (i & 7)) & 1 == 1)
}

impl MontgomeryLadder for DalekLadder {
    fn ladder(&self, scalar: &ScalarBytes, u: &FieldBytes) -> FieldBytes {
        MontgomeryPoint(*u.as_bytes()).mul_bits_be(bits_be(scalar)).to_bytes().into()
    }

    fn ladder_base(&self, scalar: &ScalarBytes) -> FieldBytes {
        X25519_BASEPOINT.mul_bits_be(bits_be(scalar)).to_bytes().into()
    }
}

/// RFC 7748 X25519: the scalar is clamped before the ladder runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct X25519Ladder;

impl MontgomeryLadder for X25519Ladder {
    fn ladder(&self, scalar: &ScalarBytes, u: &FieldBytes) -> FieldBytes {
        MontgomeryPoint(*u.as_bytes()).mul_clamped(*scalar.as_bytes()).to_bytes().into()
    }

    fn ladder_base(&self, scalar: &ScalarBytes) -> FieldBytes {
        MontgomeryPoint::mul_base_clamped(*scalar.as_bytes()).to_bytes().into()
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("non-invertible operand")]
    NonInvertible,
    #[error("input too long: {len} bytes, at most {max} allowed")]
    InputTooLong { len: usize, max: usize },
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("invalid curve parameter {0}")]
    InvalidParameter(&'static str),
}

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvatarError {
    #[error("keep_bits must be between 1 and 8, got {0}")]
    InvalidKeepBits(i64),

    #[error("maxgap must be a non-negative 32-bit integer, got {0}")]
    InvalidMaxGap(i64),

    #[error("colors_to_keep must be at least {min}, got {got}")]
    InvalidColorsToKeep { min: u32, got: i64 },

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("unknown algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

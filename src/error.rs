/// Result alias for checksum operations.
pub type ChecksumResult<T> = Result<T, ChecksumError>;

/// Errors raised at the input boundary or when verifying a checksum.
///
/// The engine itself cannot fail on a byte slice; these only show up when
/// input arrives in a wider form (code points, hex text) or when a caller
/// compares against an expected value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumError {
    /// A value outside 0..=255 was offered as a byte.
    #[error("invalid input: value {value} at position {index} does not fit in a byte")]
    InvalidInput { index: usize, value: u32 },

    /// Hex text could not be decoded into bytes.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),

    /// An expected checksum could not be parsed as a 16-bit value.
    #[error("invalid checksum value: {0}")]
    InvalidValue(String),

    /// The computed checksum does not match the expected one.
    #[error("checksum mismatch: expected 0x{expected:04X}, computed 0x{computed:04X}")]
    Mismatch { expected: u16, computed: u16 },
}

use super::crc16::crc16;
use crate::error::{ChecksumError, ChecksumResult};

/// Check `data` against an expected checksum.
pub fn verify(data: &[u8], expected: u16) -> ChecksumResult<()> {
    let computed = crc16(data);
    if computed != expected {
        return Err(ChecksumError::Mismatch { expected, computed });
    }
    Ok(())
}

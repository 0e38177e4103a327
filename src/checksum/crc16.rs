use tracing::trace;

use crate::error::{ChecksumError, ChecksumResult};

/// Reflected form of the 0x8005 generator polynomial.
pub const POLY: u16 = 0xA001;

/// Initial accumulator value.
pub const INIT: u16 = 0xFFFF;

/// Fold one byte into the accumulator: XOR into the low byte, then eight
/// rounds of right shift with a conditional XOR of [`POLY`].
#[inline]
pub fn update_byte(mut acc: u16, byte: u8) -> u16 {
    acc ^= u16::from(byte);
    for _ in 0..8 {
        let last = acc & 1;
        acc >>= 1;
        if last == 1 {
            acc ^= POLY;
        }
    }
    acc
}

/// Split the accumulator into high and low bytes and put them back together
/// as `low + high * 256`.
///
/// This is numerically the identity. Existing consumers depend on the value
/// coming out unswapped, so it must stay that way.
#[inline]
pub fn assemble(acc: u16) -> u16 {
    let [high, low] = acc.to_be_bytes();
    u16::from(low) + u16::from(high) * 256
}

/// Compute the CRC-16 of `data` (poly 0xA001 reflected, init 0xFFFF, no final XOR).
pub fn crc16(data: &[u8]) -> u16 {
    let acc = data.iter().fold(INIT, |acc, &b| update_byte(acc, b));
    let sum = assemble(acc);
    trace!(len = data.len(), sum, "crc16");
    sum
}

/// Narrow wider values to bytes, failing on the first one outside 0..=255.
pub fn bytes_from_codes<I>(codes: I) -> ChecksumResult<Vec<u8>>
where
    I: IntoIterator<Item = u32>,
{
    codes
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            u8::try_from(value).map_err(|_| ChecksumError::InvalidInput { index, value })
        })
        .collect()
}

/// Checksum a sequence of wider values, each of which must fit in a byte.
///
/// Every value is checked before any computation happens.
pub fn crc16_codes<I>(codes: I) -> ChecksumResult<u16>
where
    I: IntoIterator<Item = u32>,
{
    Ok(crc16(&bytes_from_codes(codes)?))
}

/// Checksum a string one character at a time, using each character's code
/// point as the byte value.
///
/// ASCII and Latin-1 text is accepted; any character above U+00FF is
/// rejected rather than truncated. For the UTF-8 encoding of a string,
/// call [`crc16`] on `s.as_bytes()` instead.
pub fn crc16_str(s: &str) -> ChecksumResult<u16> {
    crc16_codes(s.chars().map(u32::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straight bit loop on a `u32` register with explicit masking, kept
    /// apart from the engine so the two can be compared.
    fn raw_accumulator(data: &[u8]) -> u32 {
        let mut a: u32 = 0xFFFF;
        for &byte in data {
            a ^= byte as u32;
            for _ in 0..8 {
                let last = a & 1;
                a = (a >> 1) & 0xFFFF;
                if last == 1 {
                    a ^= 0xA001;
                }
            }
        }
        a
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(crc16(b"hello"), 13558);
        assert_eq!(crc16(b"world"), 61249);
        assert_eq!(crc16(&[104, 101, 108, 108, 111]), 0x34F6);
        assert_eq!(crc16(&[119, 111, 114, 108, 100]), 0xEF41);
    }

    #[test]
    fn test_check_value() {
        assert_eq!(crc16(b"123456789"), 0x4B37);
    }

    #[test]
    fn test_empty() {
        assert_eq!(crc16(&[]), 65535);
    }

    #[test]
    fn test_single_bytes() {
        assert_eq!(crc16(&[0x00]), 0x40BF);
        assert_eq!(crc16(&[0xFF]), 0x00FF);
        assert_eq!(crc16(b"a"), 0xA87E);
    }

    #[test]
    fn test_deterministic() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let first = crc16(data);
        for _ in 0..10 {
            assert_eq!(crc16(data), first);
        }
        assert_eq!(first, 0xA89C);
    }

    #[test]
    fn test_single_byte_sensitivity() {
        let mut seen = std::collections::HashSet::new();
        for b in 0..=255u8 {
            assert!(seen.insert(crc16(&[b])), "collision for byte {b:#04x}");
        }
    }

    #[test]
    fn test_trailing_zero_usually_changes_sum() {
        let inputs: Vec<Vec<u8>> = (0..=255u8)
            .map(|b| vec![b])
            .chain([b"hello".to_vec(), b"world".to_vec(), Vec::new()])
            .collect();
        let changed = inputs
            .iter()
            .filter(|x| {
                let mut padded = x.to_vec();
                padded.push(0);
                crc16(x) != crc16(&padded)
            })
            .count();
        // Not an invariant, but it holds for this whole set.
        assert!(changed * 10 >= inputs.len() * 9);
        assert_eq!(crc16(b"hello\0"), 18100);
    }

    #[test]
    fn test_assemble_is_identity() {
        for acc in 0..=u16::MAX {
            assert_eq!(assemble(acc), acc);
        }
    }

    #[test]
    fn test_result_matches_raw_accumulator() {
        for data in [&b""[..], b"hello", b"world", b"\x00\x00", b"hello world"] {
            assert_eq!(u32::from(crc16(data)), raw_accumulator(data));
        }
    }

    #[test]
    fn test_update_byte_matches_full_run() {
        let acc = b"hel".iter().fold(INIT, |a, &b| update_byte(a, b));
        let acc = update_byte(update_byte(acc, b'l'), b'o');
        assert_eq!(acc, crc16(b"hello"));
    }

    #[test]
    fn test_matches_crc_crate_modbus() {
        let reference = crc::Crc::<u16>::new(&crc::CRC_16_MODBUS);
        let all: Vec<u8> = (0..=255u8).collect();
        for data in [&b""[..], b"hello", b"world", b"123456789", all.as_slice()] {
            assert_eq!(crc16(data), reference.checksum(data));
        }
    }

    #[test]
    fn test_str_and_codes() {
        assert_eq!(crc16_str("hello"), Ok(13558));
        assert_eq!(crc16_str(""), Ok(0xFFFF));
        // U+00E9 is a single Latin-1 byte, not its two-byte UTF-8 form.
        assert_eq!(crc16_str("\u{e9}"), Ok(crc16(&[0xE9])));
        assert_eq!(crc16_codes([119, 111, 114, 108, 100]), Ok(61249));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            crc16_codes([104, 256, 1000]),
            Err(ChecksumError::InvalidInput {
                index: 1,
                value: 256
            })
        );
        assert_eq!(
            crc16_str("h\u{20ac}"),
            Err(ChecksumError::InvalidInput {
                index: 1,
                value: 0x20AC
            })
        );
    }
}

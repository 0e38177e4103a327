use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChecksumError, ChecksumResult};

/// Byte order used when a checksum is laid out as two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    pub fn to_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }

    pub fn from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" | "be" => Ok(ByteOrder::Big),
            "little" | "le" => Ok(ByteOrder::Little),
            other => Err(format!("unknown byte order: {other}")),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::Big => "big",
            ByteOrder::Little => "little",
        })
    }
}

/// How a checksum value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain integer, e.g. `13558`.
    #[default]
    Decimal,
    /// Four hex digits with `0x` prefix, e.g. `0x34f6`.
    Hex,
    /// The two serialized bytes in hex, e.g. `34f6` (big) or `f634` (little).
    Bytes,
}

impl OutputFormat {
    pub fn render(self, value: u16, order: ByteOrder, uppercase: bool) -> String {
        let out = match self {
            OutputFormat::Decimal => return value.to_string(),
            OutputFormat::Hex => format!("0x{value:04x}"),
            OutputFormat::Bytes => {
                let [a, b] = order.to_bytes(value);
                format!("{a:02x}{b:02x}")
            }
        };
        if uppercase {
            // Keep the prefix lowercase.
            match out.strip_prefix("0x") {
                Some(digits) => format!("0x{}", digits.to_ascii_uppercase()),
                None => out.to_ascii_uppercase(),
            }
        } else {
            out
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" | "dec" => Ok(OutputFormat::Decimal),
            "hex" => Ok(OutputFormat::Hex),
            "bytes" => Ok(OutputFormat::Bytes),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Decimal => "decimal",
            OutputFormat::Hex => "hex",
            OutputFormat::Bytes => "bytes",
        })
    }
}

/// Decode hex text into bytes.
///
/// Whitespace anywhere is ignored and a single leading `0x` is allowed.
pub fn parse_hex(s: &str) -> ChecksumResult<Vec<u8>> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: Vec<u8> = body.bytes().filter(|b| !b.is_ascii_whitespace()).collect();

    if digits.len() % 2 != 0 {
        return Err(ChecksumError::InvalidHex(format!(
            "odd number of digits ({})",
            digits.len()
        )));
    }

    digits
        .chunks(2)
        .map(|pair| -> ChecksumResult<u8> { Ok((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?) })
        .collect()
}

fn hex_digit(c: u8) -> ChecksumResult<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ChecksumError::InvalidHex(format!(
            "unexpected character {:?}",
            c as char
        ))),
    }
}

/// Parse an expected checksum given as decimal or `0x`-prefixed hex.
pub fn parse_value(s: &str) -> ChecksumResult<u16> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| ChecksumError::InvalidValue(format!("{s:?}: {e}")))
}

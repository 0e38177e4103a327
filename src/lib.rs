//! CRC-16 over byte sequences: reflected polynomial 0xA001, initial value
//! 0xFFFF, no final XOR.
//!
//! ```
//! assert_eq!(crc16sum::crc16(b"hello"), 13558);
//! assert_eq!(crc16sum::crc16(b""), 0xFFFF);
//! ```

pub mod checksum;
pub mod config;
pub mod error;

pub use checksum::{crc16, crc16_codes, crc16_str, verify, ByteOrder, OutputFormat};
pub use config::AppConfig;
pub use error::{ChecksumError, ChecksumResult};

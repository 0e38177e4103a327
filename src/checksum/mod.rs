pub mod crc16;
pub mod encoding;
pub mod verify;

pub use crc16::{assemble, bytes_from_codes, crc16, crc16_codes, crc16_str, update_byte, INIT, POLY};
pub use encoding::{parse_hex, parse_value, ByteOrder, OutputFormat};
pub use verify::verify;

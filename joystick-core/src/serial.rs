//! Per-device USB serial number.

use heapless::String;

/// Size of the board's unique identifier in bytes.
pub const UNIQUE_ID_LEN: usize = 8;

/// Hex digits lookup table.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Serial number string rendered from the board's unique flash ID.
///
/// Each ID byte becomes two upper-case hex digits, most significant nibble
/// first, so an 8-byte ID yields a 16-character string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerialNumber(String<{ 2 * UNIQUE_ID_LEN }>);

impl SerialNumber {
    /// Render a unique ID as a serial number.
    #[must_use]
    pub fn from_unique_id(id: &[u8; UNIQUE_ID_LEN]) -> Self {
        let mut text = String::new();
        for &byte in id {
            // Capacity is exactly two digits per byte.
            let _ = text.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            let _ = text.push(HEX_DIGITS[(byte & 0xF) as usize] as char);
        }
        Self(text)
    }

    /// Get the serial number text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SerialNumber {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_is_upper_hex() {
        let serial = SerialNumber::from_unique_id(&[0xE6, 0x60, 0x58, 0x38, 0x83, 0x1A, 0x2B, 0x0F]);
        assert_eq!(serial.as_str(), "E6605838831A2B0F");
    }

    #[test]
    fn test_serial_keeps_leading_zeros() {
        let serial = SerialNumber::from_unique_id(&[0x00, 0x01, 0, 0, 0, 0, 0, 0x10]);
        assert_eq!(serial.as_str(), "0001000000000010");
        assert_eq!(serial.as_str().len(), 16);
    }
}

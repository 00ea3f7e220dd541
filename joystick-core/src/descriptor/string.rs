//! USB string descriptors.

use heapless::Vec;

/// Descriptor type code for string descriptors.
pub const DESC_TYPE_STRING: u8 = 0x03;

/// Capacity of an encoded string descriptor in 16-bit units, header included.
pub const STRING_CAPACITY: usize = 32;

/// Known string descriptor slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StringIndex {
    /// Supported language list.
    LanguageIds = 0,
    Manufacturer = 1,
    Product = 2,
    SerialNumber = 3,
    /// Name of the CDC control interface.
    ControlInterface = 4,
}

impl TryFrom<u8> for StringIndex {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::LanguageIds),
            1 => Ok(Self::Manufacturer),
            2 => Ok(Self::Product),
            3 => Ok(Self::SerialNumber),
            4 => Ok(Self::ControlInterface),
            other => Err(other),
        }
    }
}

const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Encoded UTF-16 string descriptor.
///
/// Unit 0 is the header: descriptor type in the high byte, total length in
/// bytes in the low byte. Every following unit is one UTF-16 code unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringDescriptor(Vec<u16, STRING_CAPACITY>);

impl StringDescriptor {
    fn with_units(units: impl Iterator<Item = u16>, max_units: usize) -> Self {
        let max_units = max_units.clamp(1, STRING_CAPACITY);
        let mut encoded = Vec::new();
        // Header placeholder, patched once the length is known.
        let _ = encoded.push(0);
        for unit in units.take(max_units - 1) {
            let _ = encoded.push(unit);
        }
        // A cut surrogate pair leaves its high half last.
        if encoded.len() > 1 && encoded.last().is_some_and(|unit| is_high_surrogate(*unit)) {
            encoded.pop();
        }
        encoded[0] = (u16::from(DESC_TYPE_STRING) << 8) | (2 * encoded.len()) as u16;
        Self(encoded)
    }

    /// The supported-language list (index 0).
    #[must_use]
    pub fn language_ids(languages: &[u16]) -> Self {
        Self::with_units(languages.iter().copied(), STRING_CAPACITY)
    }

    /// All units, header first.
    #[inline]
    #[must_use]
    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Payload units, header excluded.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u16] {
        &self.0[1..]
    }

    /// Total encoded length in bytes, as declared in the header.
    #[inline]
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        2 * self.0.len()
    }

    /// Serialize to the little-endian byte layout sent on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8, { 2 * STRING_CAPACITY }> {
        let mut bytes = Vec::new();
        for unit in &self.0 {
            // Capacity is exactly two bytes per unit.
            let _ = bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }
}

/// Encode `text` as a string descriptor of at most `max_units` units
/// (header included, capped at [`STRING_CAPACITY`]).
///
/// Text that does not fit is truncated at a character boundary.
#[must_use]
pub fn encode_string(text: &str, max_units: usize) -> StringDescriptor {
    StringDescriptor::with_units(text.encode_utf16(), max_units)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::String;

    #[test]
    fn test_header_and_units() {
        let desc = encode_string("PicoJoy", STRING_CAPACITY);

        assert_eq!(desc.units()[0], 0x0310);
        assert_eq!(desc.len_bytes(), 16);
        assert_eq!(desc.chars(), &[0x50, 0x69, 0x63, 0x6F, 0x4A, 0x6F, 0x79]);
        assert_eq!(
            desc.to_bytes().as_slice(),
            &[0x10, 0x03, b'P', 0, b'i', 0, b'c', 0, b'o', 0, b'J', 0, b'o', 0, b'y', 0]
        );
    }

    #[test]
    fn test_empty_string() {
        let desc = encode_string("", STRING_CAPACITY);
        assert_eq!(desc.units(), &[0x0302]);
        assert_eq!(desc.to_bytes().as_slice(), &[0x02, 0x03]);
    }

    #[test]
    fn test_long_string_is_truncated() {
        let text = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnop";
        assert!(text.len() >= STRING_CAPACITY - 1);

        let desc = encode_string(text, STRING_CAPACITY);
        assert_eq!(desc.len_bytes(), 2 * (STRING_CAPACITY - 1) + 2);
        assert_eq!(desc.to_bytes().len(), 64);
        assert_eq!(desc.units()[0] & 0xFF, 64);
        assert_eq!(desc.chars().len(), STRING_CAPACITY - 1);
        assert_eq!(*desc.chars().last().unwrap(), u16::from(b'e'));
    }

    #[test]
    fn test_exact_boundary_lengths() {
        let thirty_one = "0123456789012345678901234567890";
        assert_eq!(encode_string(thirty_one, STRING_CAPACITY).len_bytes(), 64);

        let thirty = &thirty_one[..30];
        assert_eq!(encode_string(thirty, STRING_CAPACITY).len_bytes(), 62);
    }

    #[test]
    fn test_smaller_max_units() {
        let desc = encode_string("Serial Control", 5);
        assert_eq!(desc.units().len(), 5);
        assert_eq!(desc.chars(), &[0x53, 0x65, 0x72, 0x69]);

        // Anything above the fixed capacity is clamped.
        let desc = encode_string("PicoJoy", 1000);
        assert_eq!(desc.len_bytes(), 16);
    }

    #[test]
    fn test_non_ascii_uses_utf16_units() {
        let desc = encode_string("Ä€", STRING_CAPACITY);
        assert_eq!(desc.chars(), &[0x00C4, 0x20AC]);
    }

    #[test]
    fn test_truncation_never_splits_surrogate_pair() {
        // 30 ASCII units leave room for one more; the emoji needs two.
        let text = "012345678901234567890123456789\u{1F600}";
        let desc = encode_string(text, STRING_CAPACITY);

        assert_eq!(desc.chars().len(), 30);
        assert_eq!(desc.len_bytes(), 62);
        assert_eq!(desc.units()[0] & 0xFF, 62);
        assert_eq!(*desc.chars().last().unwrap(), u16::from(b'9'));
    }

    #[test]
    fn test_surrogate_pair_kept_when_it_fits() {
        let desc = encode_string("Joy\u{1F600}", STRING_CAPACITY);
        assert_eq!(desc.chars(), &[0x4A, 0x6F, 0x79, 0xD83D, 0xDE00]);
        assert_eq!(String::from_utf16(desc.chars()).unwrap(), "Joy\u{1F600}");
    }

    #[test]
    fn test_language_ids() {
        let desc = StringDescriptor::language_ids(&[0x0409]);
        assert_eq!(desc.units(), &[0x0304, 0x0409]);
        assert_eq!(desc.to_bytes().as_slice(), &[0x04, 0x03, 0x09, 0x04]);
    }

    #[test]
    fn test_index_from_u8() {
        assert_eq!(StringIndex::try_from(0), Ok(StringIndex::LanguageIds));
        assert_eq!(StringIndex::try_from(4), Ok(StringIndex::ControlInterface));
        assert_eq!(StringIndex::try_from(5), Err(5));
    }
}

//! Static USB descriptors and the provider the USB stack queries during enumeration.

pub mod configuration;
pub mod device;
pub mod report;
pub mod string;

pub use configuration::{CONFIGURATION_DESCRIPTOR, CONFIG_TOTAL_LEN, INTERFACE_COUNT};
pub use device::DEVICE_DESCRIPTOR;
pub use report::HID_REPORT_DESCRIPTOR;
pub use string::{encode_string, StringDescriptor, StringIndex, STRING_CAPACITY};

use crate::config::{CONTROL_INTERFACE, LANGUAGE_ID_ENGLISH_US, MANUFACTURER, PRODUCT};
use crate::serial::SerialNumber;

/// Answers the host's descriptor requests.
///
/// Every method is a pure lookup: the USB stack calls these while handling
/// GET_DESCRIPTOR and relays `None` to the host as a request error (stall).
pub trait DescriptorProvider {
    /// The 18-byte device descriptor.
    fn device_descriptor(&self) -> &[u8];

    /// Full configuration descriptor for `index`, or `None` if there is no
    /// such configuration.
    fn configuration_descriptor(&self, index: u8) -> Option<&[u8]>;

    /// HID report descriptor for the HID `interface`.
    fn hid_report_descriptor(&self, interface: u8) -> &[u8];

    /// UTF-16 string descriptor for `index`, or `None` for unknown indices.
    fn string_descriptor(&self, index: u8, language_id: u16) -> Option<StringDescriptor>;
}

/// Descriptor set of the joystick.
///
/// All tables are compile-time constants except the serial number, which is
/// read from the board once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickDescriptors {
    serial: SerialNumber,
}

impl JoystickDescriptors {
    /// Create the descriptor set for a board with the given serial number.
    #[must_use]
    pub fn new(serial: SerialNumber) -> Self {
        Self { serial }
    }

    /// Get the serial number.
    #[inline]
    #[must_use]
    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    /// Text of a string slot. The language list has no text form.
    #[must_use]
    pub fn text(&self, index: StringIndex) -> Option<&str> {
        match index {
            StringIndex::LanguageIds => None,
            StringIndex::Manufacturer => Some(MANUFACTURER),
            StringIndex::Product => Some(PRODUCT),
            StringIndex::SerialNumber => Some(self.serial.as_str()),
            StringIndex::ControlInterface => Some(CONTROL_INTERFACE),
        }
    }
}

impl DescriptorProvider for JoystickDescriptors {
    fn device_descriptor(&self) -> &[u8] {
        &DEVICE_DESCRIPTOR
    }

    fn configuration_descriptor(&self, index: u8) -> Option<&[u8]> {
        match index {
            0 => Some(&CONFIGURATION_DESCRIPTOR[..]),
            _ => {
                debug!("configuration {} not found", index);
                None
            }
        }
    }

    fn hid_report_descriptor(&self, _interface: u8) -> &[u8] {
        HID_REPORT_DESCRIPTOR
    }

    // Only one language is offered, so the requested one is not checked.
    fn string_descriptor(&self, index: u8, _language_id: u16) -> Option<StringDescriptor> {
        let Ok(slot) = StringIndex::try_from(index) else {
            debug!("string {} not found", index);
            return None;
        };

        match self.text(slot) {
            Some(text) => Some(encode_string(text, STRING_CAPACITY)),
            None => Some(StringDescriptor::language_ids(&[LANGUAGE_ID_ENGLISH_US])),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::String;

    fn descriptors() -> JoystickDescriptors {
        JoystickDescriptors::new(SerialNumber::from_unique_id(&[
            0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04,
        ]))
    }

    fn decode(desc: &StringDescriptor) -> String {
        String::from_utf16(desc.chars()).unwrap()
    }

    #[test]
    fn test_only_configuration_zero_exists() {
        let provider = descriptors();
        assert_eq!(
            provider.configuration_descriptor(0),
            Some(&CONFIGURATION_DESCRIPTOR[..])
        );
        assert_eq!(provider.configuration_descriptor(1), None);
        assert_eq!(provider.configuration_descriptor(255), None);
    }

    #[test]
    fn test_device_and_report_descriptors() {
        let provider = descriptors();
        assert_eq!(provider.device_descriptor().len(), 18);
        assert_eq!(provider.hid_report_descriptor(0), HID_REPORT_DESCRIPTOR);
    }

    #[test]
    fn test_string_table() {
        let provider = descriptors();

        let languages = provider.string_descriptor(0, 0).unwrap();
        assert_eq!(languages.chars(), &[0x0409]);

        assert_eq!(
            decode(&provider.string_descriptor(1, 0x0409).unwrap()),
            "HasseHans Fabrik"
        );
        assert_eq!(decode(&provider.string_descriptor(2, 0x0409).unwrap()), "PicoJoy");
        assert_eq!(
            decode(&provider.string_descriptor(3, 0x0409).unwrap()),
            "DEADBEEF01020304"
        );
        assert_eq!(
            decode(&provider.string_descriptor(4, 0x0409).unwrap()),
            "PicoJoy Serial Control"
        );
    }

    #[test]
    fn test_unknown_string_index_not_found() {
        let provider = descriptors();
        assert_eq!(provider.string_descriptor(5, 0x0409), None);
        assert_eq!(provider.string_descriptor(0xEE, 0x0409), None);
    }

    #[test]
    fn test_language_id_is_ignored() {
        let provider = descriptors();
        assert_eq!(
            provider.string_descriptor(2, 0x0407),
            provider.string_descriptor(2, 0x0409)
        );
    }

    #[test]
    fn test_text_lookup() {
        let provider = descriptors();
        assert_eq!(provider.text(StringIndex::LanguageIds), None);
        assert_eq!(provider.text(StringIndex::SerialNumber), Some("DEADBEEF01020304"));
    }
}

//! HID report descriptor for the joystick.

use crate::types::InputReport;
use usbd_hid::descriptor::SerializedDescriptor;

/// HID Joystick Report Descriptor.
///
/// This descriptor defines a joystick with:
/// - report ID 1
/// - 32 buttons (1 bit each)
/// - 4 axes: X, Y, Z, Slider (signed 16-bit, -32767 to 32767)
///
/// The field layout must stay in step with [`InputReport`].
pub const HID_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    //
    // --- Buttons (32 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x20, //   Usage Maximum (Button 32)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x20, //   Report Count (32)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Axes ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x16, 0x01, 0x80, //   Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, //   Logical Maximum (32767)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x36, //   Usage (Slider)
    0x95, 0x04, //   Report Count (4)
    0x75, 0x10, //   Report Size (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

impl SerializedDescriptor for InputReport {
    fn desc() -> &'static [u8] {
        HID_REPORT_DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Input fields found while walking a report descriptor.
    #[derive(Debug, Default)]
    struct InputLayout {
        report_id: Option<u8>,
        bits: u32,
        fields: u32,
        logical_ranges: [(i32, i32); 2],
    }

    fn item_value(data: &[u8]) -> i32 {
        match data.len() {
            0 => 0,
            1 => data[0] as i8 as i32,
            2 => i16::from_le_bytes([data[0], data[1]]) as i32,
            _ => i32::from_le_bytes([data[0], data[1], data[2], data[3]]),
        }
    }

    // Minimal short-item walker, enough for this descriptor.
    fn walk(descriptor: &[u8]) -> InputLayout {
        let mut layout = InputLayout::default();
        let (mut size, mut count) = (0u32, 0u32);
        let (mut min, mut max) = (0i32, 0i32);
        let mut pos = 0;

        while pos < descriptor.len() {
            let prefix = descriptor[pos];
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let data = &descriptor[pos + 1..pos + 1 + len];

            match prefix & 0xFC {
                0x84 => layout.report_id = Some(data[0]),
                0x74 => size = item_value(data) as u32,
                0x94 => count = item_value(data) as u32,
                0x14 => min = item_value(data),
                0x24 => max = item_value(data),
                0x80 => {
                    if let Some(slot) = layout.logical_ranges.get_mut(layout.fields as usize) {
                        *slot = (min, max);
                    }
                    layout.bits += size * count;
                    layout.fields += 1;
                }
                _ => {}
            }
            pos += 1 + len;
        }
        layout
    }

    #[test]
    fn test_input_bits_match_report_size() {
        let layout = walk(HID_REPORT_DESCRIPTOR);
        assert_eq!(layout.bits, 32 + 4 * 16);
        assert_eq!(layout.bits as usize, 8 * core::mem::size_of::<InputReport>());
        assert_eq!(layout.bits as usize / 8, InputReport::SIZE);
    }

    #[test]
    fn test_report_id_matches() {
        let layout = walk(HID_REPORT_DESCRIPTOR);
        assert_eq!(layout.report_id, Some(InputReport::REPORT_ID));
    }

    #[test]
    fn test_logical_ranges() {
        let layout = walk(HID_REPORT_DESCRIPTOR);
        assert_eq!(layout.fields, 2);
        assert_eq!(layout.logical_ranges[0], (0, 1));
        assert_eq!(layout.logical_ranges[1], (-32_767, 32_767));
    }

    #[test]
    fn test_collection_is_balanced() {
        let opens = HID_REPORT_DESCRIPTOR
            .windows(2)
            .filter(|w| w[0] == 0xA1)
            .count();
        assert_eq!(opens, 1);
        assert_eq!(HID_REPORT_DESCRIPTOR.last(), Some(&0xC0));
    }

    #[test]
    fn test_serialized_descriptor() {
        assert_eq!(InputReport::desc(), HID_REPORT_DESCRIPTOR);
        assert_eq!(InputReport::desc().len(), 47);
    }
}

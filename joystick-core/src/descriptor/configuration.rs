//! USB configuration descriptor: configuration header, HID function and
//! (with the `cdc` feature) the CDC-ACM control function.
//!
//! The table is assembled at compile time in interface-number order:
//!
//! | Interface | Function |
//! |-----------|----------|
//! | 0         | HID joystick, interrupt IN `0x81` |
//! | 1         | CDC control, notification IN `0x82` |
//! | 2         | CDC data, bulk OUT `0x02` / IN `0x83` |

use crate::config::{
    CDC_DATA_EP_SIZE, CDC_NOTIF_EP_SIZE, CDC_NOTIF_POLL_MS, EPNUM_CDC_IN, EPNUM_CDC_NOTIF,
    EPNUM_CDC_OUT, EPNUM_HID, HID_EP_SIZE, HID_POLL_MS, ITF_NUM_CDC, ITF_NUM_HID, MAX_POWER_MA,
};
use crate::descriptor::report::HID_REPORT_DESCRIPTOR;
use crate::descriptor::StringIndex;

pub const DESC_TYPE_CONFIGURATION: u8 = 0x02;
pub const DESC_TYPE_INTERFACE: u8 = 0x04;
pub const DESC_TYPE_ENDPOINT: u8 = 0x05;
pub const DESC_TYPE_INTERFACE_ASSOCIATION: u8 = 0x0B;
pub const DESC_TYPE_HID: u8 = 0x21;
pub const DESC_TYPE_HID_REPORT: u8 = 0x22;
pub const DESC_TYPE_CS_INTERFACE: u8 = 0x24;

const CLASS_HID: u8 = 0x03;
pub const CLASS_CDC: u8 = 0x02;
pub const CLASS_CDC_DATA: u8 = 0x0A;
pub const CDC_SUBCLASS_ACM: u8 = 0x02;
pub const CDC_PROTOCOL_NONE: u8 = 0x00;

/// CDC functional descriptor subtypes.
const CDC_TYPE_HEADER: u8 = 0x00;
const CDC_TYPE_CALL_MANAGEMENT: u8 = 0x01;
const CDC_TYPE_ACM: u8 = 0x02;
const CDC_TYPE_UNION: u8 = 0x06;

/// ACM capabilities: line coding and serial state requests.
const ACM_CAPABILITIES: u8 = 0x02;

const EP_TRANSFER_BULK: u8 = 0x02;
const EP_TRANSFER_INTERRUPT: u8 = 0x03;

/// bmAttributes: reserved bit 7 set, bus powered, no remote wakeup.
const CONFIG_ATTRIBUTES: u8 = 0x80;

/// HID 1.11.
const BCD_HID: u16 = 0x0111;
/// CDC 1.20.
const BCD_CDC: u16 = 0x0120;

pub const CONFIG_DESC_LEN: usize = 9;
/// Interface + HID class + endpoint.
pub const HID_DESC_LEN: usize = 9 + 9 + 7;
/// IAD + interface + header, call management, ACM, union + notification
/// endpoint + data interface + two bulk endpoints.
pub const CDC_DESC_LEN: usize = 8 + 9 + 5 + 5 + 4 + 5 + 7 + 9 + 7 + 7;

const CDC_COUNT: usize = if cfg!(feature = "cdc") { 1 } else { 0 };

/// Number of interfaces in the configuration.
pub const INTERFACE_COUNT: u8 = 1 + 2 * CDC_COUNT as u8;

/// Total configuration descriptor length.
pub const CONFIG_TOTAL_LEN: usize = CONFIG_DESC_LEN + HID_DESC_LEN + CDC_COUNT * CDC_DESC_LEN;

/// The device's only configuration.
pub static CONFIGURATION_DESCRIPTOR: [u8; CONFIG_TOTAL_LEN] = build_configuration();

/// Fixed-size byte buffer filled front to back at compile time.
struct DescriptorWriter<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> DescriptorWriter<N> {
    const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    const fn push(mut self, bytes: &[u8]) -> Self {
        let mut i = 0;
        while i < bytes.len() {
            self.buf[self.len] = bytes[i];
            self.len += 1;
            i += 1;
        }
        self
    }

    const fn finish(self) -> [u8; N] {
        assert!(self.len == N, "descriptor length mismatch");
        self.buf
    }
}

const fn lo(value: u16) -> u8 {
    value.to_le_bytes()[0]
}

const fn hi(value: u16) -> u8 {
    value.to_le_bytes()[1]
}

/// CDC header functional descriptor.
pub const CDC_HEADER_FUNCTIONAL: [u8; 5] = [
    5,
    DESC_TYPE_CS_INTERFACE,
    CDC_TYPE_HEADER,
    lo(BCD_CDC),
    hi(BCD_CDC),
];

/// ACM functional descriptor.
pub const CDC_ACM_FUNCTIONAL: [u8; 4] = [4, DESC_TYPE_CS_INTERFACE, CDC_TYPE_ACM, ACM_CAPABILITIES];

/// Call management functional descriptor; the device does not handle call
/// management itself.
pub const fn cdc_call_management_functional(data_interface: u8) -> [u8; 5] {
    [
        5,
        DESC_TYPE_CS_INTERFACE,
        CDC_TYPE_CALL_MANAGEMENT,
        0x00,
        data_interface,
    ]
}

/// Union functional descriptor tying the data interface to its control interface.
pub const fn cdc_union_functional(control_interface: u8, data_interface: u8) -> [u8; 5] {
    [
        5,
        DESC_TYPE_CS_INTERFACE,
        CDC_TYPE_UNION,
        control_interface,
        data_interface,
    ]
}

const fn build_configuration() -> [u8; CONFIG_TOTAL_LEN] {
    let writer = DescriptorWriter::<CONFIG_TOTAL_LEN>::new()
        .push(&config_header(CONFIG_TOTAL_LEN as u16, INTERFACE_COUNT))
        .push(&hid_function(
            ITF_NUM_HID,
            HID_REPORT_DESCRIPTOR.len() as u16,
            EPNUM_HID,
            HID_EP_SIZE,
            HID_POLL_MS,
        ));

    let writer = if CDC_COUNT > 0 {
        writer.push(&cdc_function(
            ITF_NUM_CDC,
            StringIndex::ControlInterface as u8,
            EPNUM_CDC_NOTIF,
            EPNUM_CDC_OUT,
            EPNUM_CDC_IN,
        ))
    } else {
        writer
    };

    writer.finish()
}

const fn config_header(total_len: u16, interfaces: u8) -> [u8; CONFIG_DESC_LEN] {
    [
        CONFIG_DESC_LEN as u8,
        DESC_TYPE_CONFIGURATION,
        lo(total_len),
        hi(total_len),
        interfaces,
        1, // bConfigurationValue
        0, // iConfiguration
        CONFIG_ATTRIBUTES,
        (MAX_POWER_MA / 2) as u8,
    ]
}

const fn hid_function(
    interface: u8,
    report_len: u16,
    ep_in: u8,
    ep_size: u16,
    interval_ms: u8,
) -> [u8; HID_DESC_LEN] {
    [
        // Interface
        9,
        DESC_TYPE_INTERFACE,
        interface,
        0, // bAlternateSetting
        1, // bNumEndpoints
        CLASS_HID,
        0, // no boot subclass
        0, // no boot protocol
        0, // iInterface
        // HID class descriptor
        9,
        DESC_TYPE_HID,
        lo(BCD_HID),
        hi(BCD_HID),
        0, // bCountryCode
        1, // bNumDescriptors
        DESC_TYPE_HID_REPORT,
        lo(report_len),
        hi(report_len),
        // Endpoint
        7,
        DESC_TYPE_ENDPOINT,
        ep_in,
        EP_TRANSFER_INTERRUPT,
        lo(ep_size),
        hi(ep_size),
        interval_ms,
    ]
}

const fn cdc_function(
    interface: u8,
    string_index: u8,
    ep_notif: u8,
    ep_out: u8,
    ep_in: u8,
) -> [u8; CDC_DESC_LEN] {
    let data_interface = interface + 1;
    DescriptorWriter::<CDC_DESC_LEN>::new()
        // Interface association
        .push(&[
            8,
            DESC_TYPE_INTERFACE_ASSOCIATION,
            interface,
            2, // bInterfaceCount
            CLASS_CDC,
            CDC_SUBCLASS_ACM,
            CDC_PROTOCOL_NONE,
            0, // iFunction
        ])
        // Communication interface
        .push(&[
            9,
            DESC_TYPE_INTERFACE,
            interface,
            0,
            1,
            CLASS_CDC,
            CDC_SUBCLASS_ACM,
            CDC_PROTOCOL_NONE,
            string_index,
        ])
        .push(&CDC_HEADER_FUNCTIONAL)
        .push(&cdc_call_management_functional(data_interface))
        .push(&CDC_ACM_FUNCTIONAL)
        .push(&cdc_union_functional(interface, data_interface))
        .push(&[
            7,
            DESC_TYPE_ENDPOINT,
            ep_notif,
            EP_TRANSFER_INTERRUPT,
            lo(CDC_NOTIF_EP_SIZE),
            hi(CDC_NOTIF_EP_SIZE),
            CDC_NOTIF_POLL_MS,
        ])
        // Data interface
        .push(&[9, DESC_TYPE_INTERFACE, data_interface, 0, 2, CLASS_CDC_DATA, 0, 0, 0])
        .push(&[
            7,
            DESC_TYPE_ENDPOINT,
            ep_out,
            EP_TRANSFER_BULK,
            lo(CDC_DATA_EP_SIZE),
            hi(CDC_DATA_EP_SIZE),
            0,
        ])
        .push(&[
            7,
            DESC_TYPE_ENDPOINT,
            ep_in,
            EP_TRANSFER_BULK,
            lo(CDC_DATA_EP_SIZE),
            hi(CDC_DATA_EP_SIZE),
            0,
        ])
        .finish()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::ITF_NUM_CDC_DATA;
    use std::vec::Vec;

    /// Split a configuration descriptor into its (type, bytes) components.
    fn components(desc: &[u8]) -> Vec<(u8, &[u8])> {
        let mut parts = Vec::new();
        let mut pos = 0;
        while pos < desc.len() {
            let len = desc[pos] as usize;
            assert!(len >= 2, "zero-length descriptor at offset {pos}");
            parts.push((desc[pos + 1], &desc[pos..pos + len]));
            pos += len;
        }
        assert_eq!(pos, desc.len(), "last descriptor overruns the table");
        parts
    }

    #[test]
    fn test_total_length_is_sum_of_components() {
        let desc = &CONFIGURATION_DESCRIPTOR[..];
        let declared = u16::from_le_bytes([desc[2], desc[3]]) as usize;
        let summed: usize = components(desc).iter().map(|(_, bytes)| bytes.len()).sum();

        assert_eq!(declared, desc.len());
        assert_eq!(declared, summed);
        assert_eq!(
            declared,
            CONFIG_DESC_LEN + HID_DESC_LEN + if cfg!(feature = "cdc") { CDC_DESC_LEN } else { 0 }
        );
    }

    #[test]
    fn test_interfaces_in_number_order() {
        let numbers: Vec<u8> = components(&CONFIGURATION_DESCRIPTOR)
            .iter()
            .filter(|(kind, _)| *kind == DESC_TYPE_INTERFACE)
            .map(|(_, bytes)| bytes[2])
            .collect();

        #[cfg(feature = "cdc")]
        assert_eq!(numbers, [ITF_NUM_HID, ITF_NUM_CDC, ITF_NUM_CDC_DATA]);
        #[cfg(not(feature = "cdc"))]
        assert_eq!(numbers, [ITF_NUM_HID]);

        assert_eq!(CONFIGURATION_DESCRIPTOR[4] as usize, numbers.len());
    }

    #[test]
    fn test_hid_function() {
        let parts = components(&CONFIGURATION_DESCRIPTOR);
        let (_, hid) = parts
            .iter()
            .find(|(kind, _)| *kind == DESC_TYPE_HID)
            .copied()
            .unwrap();
        let report_len = u16::from_le_bytes([hid[7], hid[8]]) as usize;
        assert_eq!(report_len, HID_REPORT_DESCRIPTOR.len());

        let (_, endpoint) = parts
            .iter()
            .find(|(kind, bytes)| *kind == DESC_TYPE_ENDPOINT && bytes[2] == EPNUM_HID)
            .copied()
            .unwrap();
        assert_eq!(endpoint[3], 0x03);
        assert_eq!(u16::from_le_bytes([endpoint[4], endpoint[5]]), 16);
        assert_eq!(endpoint[6], 10);
    }

    #[test]
    fn test_configuration_header() {
        assert_eq!(CONFIGURATION_DESCRIPTOR[1], DESC_TYPE_CONFIGURATION);
        assert_eq!(CONFIGURATION_DESCRIPTOR[5], 1);
        assert_eq!(CONFIGURATION_DESCRIPTOR[7], 0x80);
        assert_eq!(CONFIGURATION_DESCRIPTOR[8], 50);
    }

    #[test]
    fn test_cdc_function_layout() {
        let desc = cdc_function(1, 4, 0x82, 0x02, 0x83);
        let parts = components(&desc);
        let kinds: Vec<u8> = parts.iter().map(|(kind, _)| *kind).collect();

        assert_eq!(
            kinds,
            [
                DESC_TYPE_INTERFACE_ASSOCIATION,
                DESC_TYPE_INTERFACE,
                DESC_TYPE_CS_INTERFACE,
                DESC_TYPE_CS_INTERFACE,
                DESC_TYPE_CS_INTERFACE,
                DESC_TYPE_CS_INTERFACE,
                DESC_TYPE_ENDPOINT,
                DESC_TYPE_INTERFACE,
                DESC_TYPE_ENDPOINT,
                DESC_TYPE_ENDPOINT,
            ]
        );
        // Communication interface names the control string.
        assert_eq!(parts[1].1[8], 4);
        // Union ties interface 1 to data interface 2.
        assert_eq!(&parts[5].1[3..], &[1, 2]);
        assert_eq!(parts[7].1[2], 2);
    }

    #[test]
    fn test_cdc_function_embeds_shared_functional_descriptors() {
        let desc = cdc_function(ITF_NUM_CDC, 4, EPNUM_CDC_NOTIF, EPNUM_CDC_OUT, EPNUM_CDC_IN);
        let parts = components(&desc);

        assert_eq!(parts[2].1, &CDC_HEADER_FUNCTIONAL[..]);
        assert_eq!(parts[3].1, &cdc_call_management_functional(ITF_NUM_CDC_DATA)[..]);
        assert_eq!(parts[4].1, &CDC_ACM_FUNCTIONAL[..]);
        assert_eq!(parts[5].1, &cdc_union_functional(ITF_NUM_CDC, ITF_NUM_CDC_DATA)[..]);

        // Notification endpoint at its fixed address and interval.
        assert_eq!(parts[6].1, &[7, DESC_TYPE_ENDPOINT, 0x82, 0x03, 8, 0, 16][..]);
        // Bulk OUT then bulk IN at their fixed addresses.
        assert_eq!(parts[8].1[2], 0x02);
        assert_eq!(parts[9].1[2], 0x83);
    }

    #[cfg(feature = "cdc")]
    #[test]
    fn test_total_length_with_cdc() {
        assert_eq!(CONFIG_TOTAL_LEN, 100);
        assert_eq!(INTERFACE_COUNT, 3);
    }
}

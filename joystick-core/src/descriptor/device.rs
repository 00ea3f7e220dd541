//! USB device descriptor.

use crate::config::{EP0_MAX_PACKET_SIZE, USB_DEVICE_RELEASE, USB_VID};
use crate::descriptor::StringIndex;
use crate::interfaces::InterfaceSet;

pub const DESC_TYPE_DEVICE: u8 = 0x01;
pub const DEVICE_DESC_LEN: usize = 18;

/// USB 2.0.
pub const BCD_USB: u16 = 0x0200;

/// Miscellaneous device class with interface association descriptors, so the
/// host binds HID and CDC functions separately.
pub const CLASS_MISC: u8 = 0xEF;
pub const MISC_SUBCLASS_COMMON: u8 = 0x02;
pub const MISC_PROTOCOL_IAD: u8 = 0x01;

/// Device descriptor for the compiled interface set.
pub static DEVICE_DESCRIPTOR: [u8; DEVICE_DESC_LEN] =
    device_descriptor(InterfaceSet::COMPILED.product_id());

/// Build a device descriptor for the given product ID.
#[must_use]
pub const fn device_descriptor(product_id: u16) -> [u8; DEVICE_DESC_LEN] {
    let bcd_usb = BCD_USB.to_le_bytes();
    let vid = USB_VID.to_le_bytes();
    let pid = product_id.to_le_bytes();
    let release = USB_DEVICE_RELEASE.to_le_bytes();

    [
        DEVICE_DESC_LEN as u8,
        DESC_TYPE_DEVICE,
        bcd_usb[0],
        bcd_usb[1],
        CLASS_MISC,
        MISC_SUBCLASS_COMMON,
        MISC_PROTOCOL_IAD,
        EP0_MAX_PACKET_SIZE,
        vid[0],
        vid[1],
        pid[0],
        pid[1],
        release[0],
        release[1],
        StringIndex::Manufacturer as u8,
        StringIndex::Product as u8,
        StringIndex::SerialNumber as u8,
        1, // bNumConfigurations
    ]
}

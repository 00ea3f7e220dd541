//! Compile-time device configuration.
//!
//! Everything the host sees during enumeration is derived from these
//! constants, both by the static descriptor tables in this crate and by the
//! firmware when it configures the USB stack.

/// USB vendor ID.
pub const USB_VID: u16 = 0xCAFE;

/// Device release number (bcdDevice).
pub const USB_DEVICE_RELEASE: u16 = 0x0100;

/// Max packet size of the default control endpoint.
pub const EP0_MAX_PACKET_SIZE: u8 = 64;

/// Bus power draw in mA.
pub const MAX_POWER_MA: u16 = 100;

/// Interface numbers, in descriptor order.
pub const ITF_NUM_HID: u8 = 0;
pub const ITF_NUM_CDC: u8 = 1;
pub const ITF_NUM_CDC_DATA: u8 = 2;

/// Endpoint addresses (bit 7 set = IN).
pub const EPNUM_HID: u8 = 0x81;
pub const EPNUM_CDC_NOTIF: u8 = 0x82;
pub const EPNUM_CDC_OUT: u8 = 0x02;
pub const EPNUM_CDC_IN: u8 = 0x83;

/// HID interrupt IN endpoint buffer size.
pub const HID_EP_SIZE: u16 = 16;

/// Host polling interval for the HID endpoint.
pub const HID_POLL_MS: u8 = 10;

/// CDC notification endpoint size and interval.
pub const CDC_NOTIF_EP_SIZE: u16 = 8;
pub const CDC_NOTIF_POLL_MS: u8 = 16;

/// CDC bulk data endpoint size.
pub const CDC_DATA_EP_SIZE: u16 = 64;

/// Supported string language (English, United States).
pub const LANGUAGE_ID_ENGLISH_US: u16 = 0x0409;

pub const MANUFACTURER: &str = "HasseHans Fabrik";
pub const PRODUCT: &str = "PicoJoy";
pub const CONTROL_INTERFACE: &str = "PicoJoy Serial Control";

/// Report publishing cadence in milliseconds.
pub const REPORT_INTERVAL_MS: u32 = 1;

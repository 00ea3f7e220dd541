//! USB device-level configuration and bus event handling.

use defmt::{debug, info};
use embassy_usb::types::StringIndex as UsbStringIndex;
use embassy_usb::{Config, Handler};
use joystick_core::config::{EP0_MAX_PACKET_SIZE, MAX_POWER_MA, USB_DEVICE_RELEASE, USB_VID};
use joystick_core::descriptor::device::{CLASS_MISC, MISC_PROTOCOL_IAD, MISC_SUBCLASS_COMMON};
use joystick_core::descriptor::{DescriptorProvider, StringIndex};
use joystick_core::{InterfaceSet, JoystickDescriptors};
use portable_atomic::{AtomicBool, Ordering};

/// Set while the host has the device in the configured state.
static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Whether the host has configured the device.
#[inline]
pub fn is_configured() -> bool {
    CONFIGURED.load(Ordering::Acquire)
}

/// Build the device-level USB configuration from the joystick descriptor set.
///
/// The resulting device descriptor matches
/// [`DEVICE_DESCRIPTOR`](joystick_core::descriptor::DEVICE_DESCRIPTOR) except
/// for bcdUSB, which the stack raises to 2.10 to announce its BOS descriptor.
pub fn usb_config(descriptors: &'static JoystickDescriptors) -> Config<'static> {
    debug!("Device descriptor: {=[u8]:x}", descriptors.device_descriptor());
    if let Some(configuration) = descriptors.configuration_descriptor(0) {
        debug!("Configuration descriptor: {=[u8]:x}", configuration);
    }

    let mut config = Config::new(USB_VID, InterfaceSet::COMPILED.product_id());
    config.manufacturer = descriptors.text(StringIndex::Manufacturer);
    config.product = descriptors.text(StringIndex::Product);
    config.serial_number = descriptors.text(StringIndex::SerialNumber);
    config.device_release = USB_DEVICE_RELEASE;
    config.max_power = MAX_POWER_MA;
    config.max_packet_size_0 = EP0_MAX_PACKET_SIZE;

    // Required for composite devices on Windows
    config.device_class = CLASS_MISC;
    config.device_sub_class = MISC_SUBCLASS_COMMON;
    config.device_protocol = MISC_PROTOCOL_IAD;
    config.composite_with_iads = true;

    config
}

/// USB device handler.
///
/// Tracks the configured state for [`UsbHidOutput`](crate::UsbHidOutput),
/// logs bus transitions and serves the strings the stack does not know
/// about from the joystick string table.
pub struct UsbDeviceHandler {
    descriptors: &'static JoystickDescriptors,
}

impl UsbDeviceHandler {
    /// Create a new handler serving strings from `descriptors`.
    #[must_use]
    pub fn new(descriptors: &'static JoystickDescriptors) -> Self {
        Self { descriptors }
    }
}

impl Handler for UsbDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if enabled {
            info!("USB device enabled");
        } else {
            CONFIGURED.store(false, Ordering::Release);
            info!("USB device disabled");
        }
    }

    fn reset(&mut self) {
        CONFIGURED.store(false, Ordering::Release);
        info!("USB bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        debug!("USB address set to {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        CONFIGURED.store(configured, Ordering::Release);
        if configured {
            info!("USB device configured");
        } else {
            info!("USB device deconfigured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            info!("USB bus suspended");
        } else {
            info!("USB bus resumed");
        }
    }

    fn get_string(&mut self, index: UsbStringIndex, lang_id: u16) -> Option<&str> {
        let raw: u8 = index.into();
        let slot = StringIndex::try_from(raw).ok()?;
        debug!("String {} requested (lang {=u16:#x})", raw, lang_id);
        self.descriptors.text(slot)
    }
}

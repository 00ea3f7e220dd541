//! Board identity.

use defmt::warn;
use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use joystick_core::serial::UNIQUE_ID_LEN;
use joystick_core::SerialNumber;

/// Flash size of the Raspberry Pi Pico.
const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Read the flash chip's 64-bit unique ID and render it as the USB serial number.
///
/// If the flash does not answer, an all-zero ID is used so enumeration
/// still succeeds.
pub fn read_serial_number(flash: Peri<'static, FLASH>) -> SerialNumber {
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut id = [0u8; UNIQUE_ID_LEN];

    if let Err(e) = flash.blocking_unique_id(&mut id) {
        warn!("Failed to read flash unique ID: {:?}", e);
        id = [0; UNIQUE_ID_LEN];
    }

    SerialNumber::from_unique_id(&id)
}

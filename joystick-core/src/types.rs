//! Core joystick types: Buttons, InputReport.

use core::ops::BitOr;

/// Button state represented as a 32-bit bitfield.
///
/// Bit `n` corresponds to HID button usage `n + 1`; a set bit means pressed.
///
/// # Example
///
/// ```
/// use joystick_core::Buttons;
///
/// let buttons = Buttons::button(0) | Buttons::button(31);
/// assert!(buttons.is_pressed(0));
/// assert!(buttons.is_pressed(31));
/// assert!(!buttons.is_pressed(1));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Buttons(pub u32);

impl Buttons {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// A single button, zero-based. Indices past 31 yield no button.
    #[inline]
    #[must_use]
    pub const fn button(index: u8) -> Self {
        match 1u32.checked_shl(index as u32) {
            Some(bit) => Self(bit),
            None => Self::NONE,
        }
    }

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, buttons: Buttons) -> bool {
        (self.0 & buttons.0) == buttons.0
    }

    /// Check if the zero-based button is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(self, index: u8) -> bool {
        let single = Self::button(index);
        single.0 != 0 && self.contains(single)
    }

    /// Get the raw u32 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Number of analog axes in an input report.
pub const SLIDER_COUNT: usize = 4;

/// USB HID joystick input report.
///
/// This matches the HID report descriptor in
/// [`HID_REPORT_DESCRIPTOR`](crate::descriptor::HID_REPORT_DESCRIPTOR).
/// Total payload size: 12 bytes (buttons: 4, sliders: 4x2), sent with
/// report ID [`InputReport::REPORT_ID`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct InputReport {
    /// Button bitfield (32 buttons)
    pub buttons: Buttons,
    /// X, Y, Z and Slider axes (-32767 to 32767)
    pub sliders: [i16; SLIDER_COUNT],
}

const _: () = assert!(core::mem::size_of::<InputReport>() == InputReport::SIZE);

impl InputReport {
    /// Report ID declared in the report descriptor.
    pub const REPORT_ID: u8 = 1;

    /// Number of analog axes.
    pub const SLIDER_COUNT: usize = SLIDER_COUNT;

    /// Payload size in bytes, excluding the report ID.
    pub const SIZE: usize = 4 + 2 * Self::SLIDER_COUNT;

    /// Wire size in bytes, including the leading report ID.
    pub const WIRE_SIZE: usize = Self::SIZE + 1;

    /// Neutral/zero report.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            sliders: [0; Self::SLIDER_COUNT],
        }
    }

    /// Encode the payload as little-endian bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[..4].copy_from_slice(&self.buttons.raw().to_le_bytes());
        for (chunk, slider) in bytes[4..].chunks_exact_mut(2).zip(self.sliders) {
            chunk.copy_from_slice(&slider.to_le_bytes());
        }
        bytes
    }

    /// Frame an encoded payload as it appears on the interrupt endpoint:
    /// report ID, then payload.
    ///
    /// Returns `None` if `payload` is not exactly [`SIZE`](Self::SIZE) bytes.
    #[must_use]
    pub fn frame_payload(report_id: u8, payload: &[u8]) -> Option<[u8; Self::WIRE_SIZE]> {
        let payload: &[u8; Self::SIZE] = payload.try_into().ok()?;
        let mut wire = [0u8; Self::WIRE_SIZE];
        wire[0] = report_id;
        wire[1..].copy_from_slice(payload);
        Some(wire)
    }
}

//! Compiled-in USB interface set and the product ID derived from it.
//!
//! Hosts cache driver bindings per VID/PID pair, so a firmware image that
//! changes its interface mix must also change its product ID. The product ID
//! is `0x4000` with one bit per interface class:
//!
//! ```text
//! bit:   4       3      2     1     0
//!      VENDOR | MIDI | HID | MSC | CDC
//! ```

/// Bitmap of USB interface classes present in the firmware image.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceSet(u8);

impl InterfaceSet {
    pub const CDC: Self = Self(1 << 0);
    pub const MSC: Self = Self(1 << 1);
    pub const HID: Self = Self(1 << 2);
    pub const MIDI: Self = Self(1 << 3);
    pub const VENDOR: Self = Self(1 << 4);

    /// No interfaces.
    pub const EMPTY: Self = Self(0);

    /// Every known interface class.
    pub const ALL: Self = Self(0x1F);

    /// Base of the auto-derived product ID range.
    pub const PID_BASE: u16 = 0x4000;

    /// Interfaces compiled into this build.
    pub const COMPILED: Self = {
        let set = Self::HID;
        if cfg!(feature = "cdc") {
            set.with(Self::CDC)
        } else {
            set
        }
    };

    /// Build a set from raw bits; bits outside [`ALL`](Self::ALL) are discarded.
    #[inline]
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Get the raw bitmap.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Union of two sets.
    #[inline]
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether every interface in `other` is present.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// USB product ID for this interface combination.
    #[inline]
    #[must_use]
    pub const fn product_id(self) -> u16 {
        Self::PID_BASE | self.0 as u16
    }
}

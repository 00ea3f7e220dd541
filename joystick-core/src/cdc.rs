//! CDC-ACM class requests for the serial control interface.
//!
//! The control channel defines no commands of its own, but hosts configure
//! every ACM port before opening it. [`AcmControl`] keeps the line coding and
//! the DTR/RTS state the host sets and answers the matching reads.

/// Class request codes (CDC PSTN 1.2, table 13).
pub const SEND_ENCAPSULATED_COMMAND: u8 = 0x00;
pub const GET_ENCAPSULATED_RESPONSE: u8 = 0x01;
pub const SET_LINE_CODING: u8 = 0x20;
pub const GET_LINE_CODING: u8 = 0x21;
pub const SET_CONTROL_LINE_STATE: u8 = 0x22;

/// Size of the line coding structure on the wire.
pub const LINE_CODING_LEN: usize = 7;

/// Error type for rejected class requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcmRequestError {
    /// Request code the ACM subclass does not define.
    Unsupported(u8),
    /// Request data too short or out of range.
    Malformed,
    /// Response buffer too small.
    BufferTooSmall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One = 0,
    OnePointFive = 1,
    Two = 2,
}

impl TryFrom<u8> for StopBits {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::One),
            1 => Ok(Self::OnePointFive),
            2 => Ok(Self::Two),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None = 0,
    Odd = 1,
    Even = 2,
    Mark = 3,
    Space = 4,
}

impl TryFrom<u8> for Parity {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Odd),
            2 => Ok(Self::Even),
            3 => Ok(Self::Mark),
            4 => Ok(Self::Space),
            other => Err(other),
        }
    }
}

/// Serial line parameters set by the host.
///
/// Nothing is clocked out on a physical UART, so the values are only stored
/// and reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineCoding {
    pub data_rate: u32,
    pub stop_bits: StopBits,
    pub parity: Parity,
    pub data_bits: u8,
}

impl LineCoding {
    /// 115200 baud, 8N1.
    pub const DEFAULT: Self = Self {
        data_rate: 115_200,
        stop_bits: StopBits::One,
        parity: Parity::None,
        data_bits: 8,
    };

    /// Decode the 7-byte structure of a SET_LINE_CODING request.
    #[must_use]
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; LINE_CODING_LEN] = bytes.get(..LINE_CODING_LEN)?.try_into().ok()?;
        let data_bits = bytes[6];
        if !matches!(data_bits, 5..=8 | 16) {
            return None;
        }

        Some(Self {
            data_rate: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            stop_bits: StopBits::try_from(bytes[4]).ok()?,
            parity: Parity::try_from(bytes[5]).ok()?,
            data_bits,
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; LINE_CODING_LEN] {
        let rate = self.data_rate.to_le_bytes();
        [
            rate[0],
            rate[1],
            rate[2],
            rate[3],
            self.stop_bits as u8,
            self.parity as u8,
            self.data_bits,
        ]
    }
}

impl Default for LineCoding {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Modem control lines from SET_CONTROL_LINE_STATE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLineState {
    /// Data terminal ready: a host program has the port open.
    pub dtr: bool,
    pub rts: bool,
}

impl ControlLineState {
    /// Decode the request's wValue.
    #[inline]
    #[must_use]
    pub const fn from_value(value: u16) -> Self {
        Self {
            dtr: value & 0x0001 != 0,
            rts: value & 0x0002 != 0,
        }
    }
}

/// ACM control state of the serial control interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcmControl {
    line_coding: LineCoding,
    line_state: ControlLineState,
}

impl AcmControl {
    pub const fn new() -> Self {
        Self {
            line_coding: LineCoding::DEFAULT,
            line_state: ControlLineState {
                dtr: false,
                rts: false,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn line_coding(&self) -> LineCoding {
        self.line_coding
    }

    #[inline]
    #[must_use]
    pub fn line_state(&self) -> ControlLineState {
        self.line_state
    }

    /// Handle a host-to-device class request.
    pub fn handle_out(
        &mut self,
        request: u8,
        value: u16,
        data: &[u8],
    ) -> Result<(), AcmRequestError> {
        match request {
            // No commands are defined; the payload is discarded.
            SEND_ENCAPSULATED_COMMAND => Ok(()),
            SET_LINE_CODING => {
                self.line_coding = LineCoding::parse(data).ok_or(AcmRequestError::Malformed)?;
                trace!("Line coding set to {} baud", self.line_coding.data_rate);
                Ok(())
            }
            SET_CONTROL_LINE_STATE => {
                self.line_state = ControlLineState::from_value(value);
                Ok(())
            }
            other => Err(AcmRequestError::Unsupported(other)),
        }
    }

    /// Handle a device-to-host class request, returning the response length.
    pub fn handle_in(&self, request: u8, buf: &mut [u8]) -> Result<usize, AcmRequestError> {
        match request {
            GET_ENCAPSULATED_RESPONSE => Ok(0),
            GET_LINE_CODING => {
                let out = buf
                    .get_mut(..LINE_CODING_LEN)
                    .ok_or(AcmRequestError::BufferTooSmall)?;
                out.copy_from_slice(&self.line_coding.to_bytes());
                Ok(LINE_CODING_LEN)
            }
            other => Err(AcmRequestError::Unsupported(other)),
        }
    }
}

impl Default for AcmControl {
    fn default() -> Self {
        Self::new()
    }
}

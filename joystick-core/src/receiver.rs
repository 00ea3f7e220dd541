//! Host-initiated Set Report / Get Report handling.

/// HID report type carried in the wValue high byte of a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportType {
    Input,
    Output,
    Feature,
}

impl TryFrom<u8> for ReportType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Input),
            2 => Ok(Self::Output),
            3 => Ok(Self::Feature),
            other => Err(other),
        }
    }
}

/// Callbacks the USB stack invokes for HID class report requests.
pub trait ReportHandler {
    /// Host pushed a report (SET_REPORT or an OUT transfer).
    fn on_set_report(&mut self, instance: u8, report_id: u8, report_type: ReportType, data: &[u8]);

    /// Host asked for a report (GET_REPORT). Fill `buffer` and return the
    /// number of bytes written; 0 means an empty response.
    fn on_get_report(
        &mut self,
        instance: u8,
        report_id: u8,
        report_type: ReportType,
        buffer: &mut [u8],
    ) -> usize;
}

/// Report handler for the joystick.
///
/// The joystick exposes no writable or readable output/feature reports:
/// pushed data is accepted and discarded, and every read is answered with
/// an empty response.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickRequests;

impl ReportHandler for JoystickRequests {
    fn on_set_report(&mut self, instance: u8, report_id: u8, report_type: ReportType, data: &[u8]) {
        trace!(
            "SET_REPORT ignored: instance {} id {} type {:?} ({} bytes)",
            instance,
            report_id,
            report_type,
            data.len()
        );
    }

    fn on_get_report(
        &mut self,
        instance: u8,
        report_id: u8,
        report_type: ReportType,
        _buffer: &mut [u8],
    ) -> usize {
        trace!(
            "GET_REPORT answered empty: instance {} id {} type {:?}",
            instance,
            report_id,
            report_type
        );
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_from_wvalue() {
        assert_eq!(ReportType::try_from(1), Ok(ReportType::Input));
        assert_eq!(ReportType::try_from(2), Ok(ReportType::Output));
        assert_eq!(ReportType::try_from(3), Ok(ReportType::Feature));
        assert_eq!(ReportType::try_from(0), Err(0));
        assert_eq!(ReportType::try_from(4), Err(4));
    }

    #[test]
    fn test_set_report_is_accepted() {
        let mut handler = JoystickRequests;
        handler.on_set_report(0, 1, ReportType::Output, &[0xAA; 8]);
        handler.on_set_report(0, 7, ReportType::Feature, &[]);
    }

    #[test]
    fn test_get_report_returns_empty_and_leaves_buffer() {
        let mut handler = JoystickRequests;
        let mut buffer = [0x55u8; 16];

        for report_type in [ReportType::Input, ReportType::Output, ReportType::Feature] {
            assert_eq!(handler.on_get_report(0, 1, report_type, &mut buffer), 0);
        }
        assert_eq!(buffer, [0x55u8; 16]);
    }
}

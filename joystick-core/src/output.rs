//! HID transport trait and error types.

/// Error type for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Device not ready (e.g., USB not configured).
    NotReady,
    /// Endpoint busy with a previous report.
    Busy,
    /// USB/communication I/O error.
    Io,
}

/// Non-blocking sink for HID input reports.
///
/// This is the slice of the USB stack the [`ReportPublisher`](crate::ReportPublisher)
/// depends on: a readiness query and a submit primitive. Both must return
/// immediately; the publisher calls them from the cooperative polling loop.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait HidTransport {
    /// Check if the HID endpoint can accept a new input report.
    ///
    /// The answer is advisory: [`submit`](Self::submit) may still reject.
    fn is_ready(&self) -> bool;

    /// Submit an input report payload for transmission.
    ///
    /// `payload` excludes the report ID, which the transport prepends on the
    /// wire.
    fn submit(&mut self, instance: u8, report_id: u8, payload: &[u8])
        -> Result<(), TransportError>;
}

impl<T: HidTransport + ?Sized> HidTransport for &mut T {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn submit(
        &mut self,
        instance: u8,
        report_id: u8,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        (**self).submit(instance, report_id, payload)
    }
}

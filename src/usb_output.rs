//! USB HID joystick output and report request handling.

use crate::usb_device::is_configured;
use crate::UsbDriver;
use defmt::{info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::{
    HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::Builder;
use joystick_core::config::{HID_EP_SIZE, HID_POLL_MS};
use joystick_core::publisher::HID_INSTANCE;
use joystick_core::{
    HidTransport, InputReport, JoystickRequests, ReportHandler, ReportType, TransportError,
};
use usbd_hid::descriptor::SerializedDescriptor;

/// Size of a report on the interrupt endpoint, report ID included.
pub const HID_REPORT_SIZE: usize = InputReport::WIRE_SIZE;

/// Hand-off slot between the publisher and the HID writer task.
pub type ReportSignal = Signal<CriticalSectionRawMutex, [u8; HID_REPORT_SIZE]>;

/// HID writer for the joystick interface.
pub type JoystickWriter = HidWriter<'static, UsbDriver, { HID_EP_SIZE as usize }>;

/// USB HID joystick output.
///
/// Implements the non-blocking [`HidTransport`] on top of a [`ReportSignal`]:
/// submitting stores the report for the HID writer task, and the output is
/// ready only while the device is configured and no report is pending.
pub struct UsbHidOutput {
    signal: &'static ReportSignal,
}

impl UsbHidOutput {
    /// Create a new USB HID output feeding the given signal.
    pub fn new(signal: &'static ReportSignal) -> Self {
        Self { signal }
    }
}

impl HidTransport for UsbHidOutput {
    fn is_ready(&self) -> bool {
        is_configured() && !self.signal.signaled()
    }

    fn submit(
        &mut self,
        instance: u8,
        report_id: u8,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        if instance != HID_INSTANCE {
            return Err(TransportError::Io);
        }
        let wire = InputReport::frame_payload(report_id, payload).ok_or(TransportError::Io)?;
        if !is_configured() {
            return Err(TransportError::NotReady);
        }
        if self.signal.signaled() {
            return Err(TransportError::Busy);
        }

        self.signal.signal(wire);
        Ok(())
    }
}

/// Drain the report signal into the HID interrupt endpoint.
///
/// Waits for the host to configure the device first. Write errors (e.g. a
/// bus reset mid-transfer) are logged and the report is dropped.
pub async fn run_hid_writer(writer: &mut JoystickWriter, signal: &'static ReportSignal) -> ! {
    writer.ready().await;
    info!("USB HID ready, publishing joystick reports...");

    loop {
        let report = signal.wait().await;
        if let Err(e) = writer.write(&report).await {
            warn!("HID write failed: {:?}", e);
        }
    }
}

/// HID request handler (GET_REPORT / SET_REPORT).
///
/// Adapts the Embassy request callbacks to the joystick's [`ReportHandler`].
pub struct JoystickRequestHandler {
    inner: JoystickRequests,
}

impl JoystickRequestHandler {
    pub const fn new() -> Self {
        Self {
            inner: JoystickRequests,
        }
    }
}

impl Default for JoystickRequestHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn split_report_id(id: ReportId) -> (u8, ReportType) {
    match id {
        ReportId::In(id) => (id, ReportType::Input),
        ReportId::Out(id) => (id, ReportType::Output),
        ReportId::Feature(id) => (id, ReportType::Feature),
    }
}

impl RequestHandler for JoystickRequestHandler {
    fn get_report(&mut self, id: ReportId, buf: &mut [u8]) -> Option<usize> {
        let (report_id, report_type) = split_report_id(id);
        Some(
            self.inner
                .on_get_report(HID_INSTANCE, report_id, report_type, buf),
        )
    }

    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        let (report_id, report_type) = split_report_id(id);
        self.inner
            .on_set_report(HID_INSTANCE, report_id, report_type, data);
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Must be called before any other class so the joystick gets interface 0.
/// Returns the HID writer for use by [`run_hid_writer`].
pub fn configure_usb_hid(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut State<'static>,
    request_handler: &'static mut JoystickRequestHandler,
) -> JoystickWriter {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: InputReport::desc(),
        request_handler: Some(request_handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: HID_EP_SIZE,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}

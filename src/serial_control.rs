//! CDC-ACM serial control interface.
//!
//! The function is assembled by hand instead of through
//! `embassy_usb::class::cdc_acm` so it carries the control interface name
//! and sits on the fixed endpoint addresses of the descriptor tables in
//! [`joystick_core::descriptor::configuration`].
//!
//! The control channel currently defines no commands: the firmware answers
//! the ACM class requests, keeps the data endpoint serviced so host
//! terminals can open the port, and discards whatever they send.

use crate::UsbDriver;
use defmt::{debug, info, trace, warn};
use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::driver::{Driver, Endpoint, EndpointAddress, EndpointError, EndpointOut};
use embassy_usb::types::InterfaceNumber;
use embassy_usb::{Builder, Handler};
use joystick_core::cdc::{AcmControl, SET_CONTROL_LINE_STATE, SET_LINE_CODING};
use joystick_core::config::{
    CDC_DATA_EP_SIZE, CDC_NOTIF_EP_SIZE, CDC_NOTIF_POLL_MS, EPNUM_CDC_IN, EPNUM_CDC_NOTIF,
    EPNUM_CDC_OUT,
};
use joystick_core::descriptor::configuration::{
    cdc_call_management_functional, cdc_union_functional, CDC_ACM_FUNCTIONAL,
    CDC_HEADER_FUNCTIONAL, CDC_PROTOCOL_NONE, CDC_SUBCLASS_ACM, CLASS_CDC, CLASS_CDC_DATA,
};
use joystick_core::descriptor::StringIndex;
use static_cell::StaticCell;

type DataEndpointOut = <UsbDriver as Driver<'static>>::EndpointOut;

/// Host side of the control channel: the bulk OUT endpoint.
pub struct SerialControl {
    read_ep: DataEndpointOut,
}

/// Answers the ACM class requests addressed to the communication interface.
pub struct AcmRequestHandler {
    comm_if: InterfaceNumber,
    control: AcmControl,
}

impl AcmRequestHandler {
    pub const fn new(comm_if: InterfaceNumber) -> Self {
        Self {
            comm_if,
            control: AcmControl::new(),
        }
    }

    fn addressed_to_us(&self, req: &Request) -> bool {
        req.request_type == RequestType::Class
            && req.recipient == Recipient::Interface
            && req.index == u16::from(u8::from(self.comm_if))
    }
}

impl Handler for AcmRequestHandler {
    fn reset(&mut self) {
        self.control = AcmControl::new();
    }

    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if !self.addressed_to_us(&req) {
            return None;
        }

        match self.control.handle_out(req.request, req.value, data) {
            Ok(()) => {
                match req.request {
                    SET_LINE_CODING => {
                        debug!("Serial control line coding: {}", self.control.line_coding())
                    }
                    SET_CONTROL_LINE_STATE => {
                        debug!("Serial control lines: {}", self.control.line_state())
                    }
                    _ => {}
                }
                Some(OutResponse::Accepted)
            }
            Err(e) => {
                debug!("ACM request {=u8:#x} rejected: {}", req.request, e);
                Some(OutResponse::Rejected)
            }
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if !self.addressed_to_us(&req) {
            return None;
        }

        match self.control.handle_in(req.request, buf) {
            Ok(len) => Some(InResponse::Accepted(&buf[..len])),
            Err(e) => {
                debug!("ACM request {=u8:#x} rejected: {}", req.request, e);
                Some(InResponse::Rejected)
            }
        }
    }
}

/// Add the CDC-ACM function to the USB builder.
///
/// Call after [`configure_usb_hid`](crate::configure_usb_hid) so the control
/// interfaces follow the joystick.
pub fn configure_serial(
    builder: &mut Builder<'static, UsbDriver>,
    handler: &'static StaticCell<AcmRequestHandler>,
) -> SerialControl {
    // First custom string slot; served by UsbDeviceHandler::get_string.
    let name = builder.string();
    if u8::from(name) != StringIndex::ControlInterface as u8 {
        warn!("Control interface string allocated at index {}", u8::from(name));
    }

    let mut func = builder.function(CLASS_CDC, CDC_SUBCLASS_ACM, CDC_PROTOCOL_NONE);

    let comm_if = {
        let mut iface = func.interface();
        let comm_if = iface.interface_number();
        let data_if = u8::from(comm_if) + 1;
        let mut alt =
            iface.alt_setting(CLASS_CDC, CDC_SUBCLASS_ACM, CDC_PROTOCOL_NONE, Some(name));

        let call_management = cdc_call_management_functional(data_if);
        let union = cdc_union_functional(u8::from(comm_if), data_if);
        for desc in [
            &CDC_HEADER_FUNCTIONAL[..],
            &call_management[..],
            &CDC_ACM_FUNCTIONAL[..],
            &union[..],
        ] {
            // The builder writes bLength and bDescriptorType itself.
            alt.descriptor(desc[1], &desc[2..]);
        }

        // Serial state notifications are never sent.
        let _notif_ep = alt.endpoint_interrupt_in(
            Some(EndpointAddress::from(EPNUM_CDC_NOTIF)),
            CDC_NOTIF_EP_SIZE,
            CDC_NOTIF_POLL_MS,
        );
        comm_if
    };

    let read_ep = {
        let mut iface = func.interface();
        let mut alt = iface.alt_setting(CLASS_CDC_DATA, 0, 0, None);
        let read_ep =
            alt.endpoint_bulk_out(Some(EndpointAddress::from(EPNUM_CDC_OUT)), CDC_DATA_EP_SIZE);
        // Nothing is written back to the host.
        let _write_ep =
            alt.endpoint_bulk_in(Some(EndpointAddress::from(EPNUM_CDC_IN)), CDC_DATA_EP_SIZE);
        read_ep
    };
    drop(func);

    builder.handler(handler.init(AcmRequestHandler::new(comm_if)));

    SerialControl { read_ep }
}

/// Service the control interface forever.
pub async fn run_serial(port: &mut SerialControl) -> ! {
    loop {
        port.read_ep.wait_enabled().await;
        info!("Serial control connected");
        let _ = drain(&mut port.read_ep).await;
        info!("Serial control disconnected");
    }
}

async fn drain(read_ep: &mut DataEndpointOut) -> Result<(), EndpointError> {
    let mut buf = [0u8; CDC_DATA_EP_SIZE as usize];
    loop {
        let n = read_ep.read(&mut buf).await?;
        trace!("Serial control: ignoring {} bytes", n);
    }
}

//! PicoJoy: USB HID joystick for RP2040.
//!
//! This crate wires the platform-agnostic [`joystick_core`] into the
//! Embassy USB stack and the RP2040 board support.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and enumerates as a
//! composite device:
//! 1. HID joystick (interface 0): 32 buttons and 4 axes, report ID 1
//! 2. CDC-ACM serial control channel (interfaces 1 and 2, `cdc` feature)
//!
//! # Architecture
//!
//! The firmware uses the Embassy thread-mode executor, so every task is
//! cooperatively scheduled on a single core:
//!
//! - **USB Task**: Runs the USB device stack (enumeration, control requests)
//! - **Publisher Task**: Polls the [`ReportPublisher`](joystick_core::ReportPublisher)
//!   against the millisecond clock and hands each report to the HID output
//! - **HID Writer Task**: Writes the newest report to the interrupt endpoint
//! - **Serial Task**: Services the CDC control interface
//!
//! The publisher and the HID writer communicate through Embassy's
//! [`Signal`](embassy_sync::signal::Signal) with "latest value wins"
//! semantics. While a report is still waiting for the endpoint, the output
//! reports itself as not ready and the publisher drops new samples.
//!
//! # Modules
//!
//! - [`board`]: Board identity ([`read_serial_number`])
//! - [`usb_device`]: Device-level configuration and bus events ([`UsbDeviceHandler`])
//! - [`usb_output`]: HID output and request handling ([`UsbHidOutput`])
//! - [`serial_control`]: CDC control interface
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`cdc`** (default): Expose the CDC-ACM control interface
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`joystick_core`] that the
//! binary needs, so consumers only need to depend on this crate.

#![no_std]

// Ensure mutually exclusive panic handler features
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use joystick_core::{
    DemoPattern, HidTransport, InputReport, InputSampler, InterfaceSet, JoystickDescriptors,
    PollOutcome, ReportPublisher, SerialNumber, TransportError,
};

pub mod board;
#[cfg(feature = "cdc")]
pub mod serial_control;
pub mod usb_device;
pub mod usb_output;

pub use board::read_serial_number;
pub use usb_device::{usb_config, UsbDeviceHandler};
pub use usb_output::{
    configure_usb_hid, JoystickRequestHandler, ReportSignal, UsbHidOutput, HID_REPORT_SIZE,
};

/// The RP2040 USB driver the firmware runs on.
pub type UsbDriver = embassy_rp::usb::Driver<'static, embassy_rp::peripherals::USB>;

//! Platform-agnostic USB HID joystick types, descriptors and report publishing.
//!
//! This crate provides everything the joystick firmware needs that does not
//! depend on a particular chip or USB stack. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Core data structures ([`InputReport`], [`Buttons`])
//! - [`descriptor`]: Static USB descriptors and the [`DescriptorProvider`] trait
//! - [`interfaces`]: Compiled interface bitmap and product ID ([`InterfaceSet`])
//! - [`input`]: Input sampling trait ([`InputSampler`]) and the [`DemoPattern`] fixture
//! - [`output`]: HID transport trait ([`HidTransport`])
//! - [`publisher`]: Fixed-cadence report publishing ([`ReportPublisher`])
//! - [`receiver`]: Set/Get Report handling ([`ReportHandler`])
//! - [`serial`]: Serial number rendering ([`SerialNumber`])
//! - [`cdc`]: CDC-ACM class requests of the control interface ([`AcmControl`])
//!
//! # Report Format
//!
//! Every input report carries report ID 1 followed by a 12-byte little-endian
//! payload:
//!
//! ```text
//! | buttons: u32 | x: i16 | y: i16 | z: i16 | slider: i16 |
//! ```
//!
//! # Example
//!
//! ```rust
//! use joystick_core::{DemoPattern, HidTransport, PollOutcome, ReportPublisher, TransportError};
//!
//! struct Capture(Option<[u8; 12]>);
//!
//! impl HidTransport for Capture {
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!
//!     fn submit(&mut self, _instance: u8, _report_id: u8, payload: &[u8]) -> Result<(), TransportError> {
//!         let mut buf = [0u8; 12];
//!         buf.copy_from_slice(payload);
//!         self.0 = Some(buf);
//!         Ok(())
//!     }
//! }
//!
//! let mut publisher = ReportPublisher::new(DemoPattern);
//! let mut transport = Capture(None);
//!
//! assert_eq!(publisher.poll(0, &mut transport), PollOutcome::Idle);
//! assert_eq!(publisher.poll(1, &mut transport), PollOutcome::Sent);
//! assert!(transport.0.is_some());
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`cdc`** (default): Include the CDC-ACM control interface in the descriptor set
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;

pub mod cdc;
pub mod config;
pub mod descriptor;
pub mod input;
pub mod interfaces;
pub mod output;
pub mod publisher;
pub mod receiver;
pub mod serial;
pub mod types;

// Re-export main types at crate root
pub use cdc::AcmControl;
pub use descriptor::{
    encode_string, DescriptorProvider, JoystickDescriptors, StringDescriptor, StringIndex,
    HID_REPORT_DESCRIPTOR,
};
pub use input::{DemoPattern, InputSampler};
pub use interfaces::InterfaceSet;
pub use output::{HidTransport, TransportError};
pub use publisher::{PollOutcome, ReportPublisher};
pub use receiver::{JoystickRequests, ReportHandler, ReportType};
pub use serial::SerialNumber;
pub use types::{Buttons, InputReport};

//! ReportPublisher: samples inputs on a fixed cadence and hands reports to the transport.

use crate::config::REPORT_INTERVAL_MS;
use crate::input::InputSampler;
use crate::output::HidTransport;
use crate::types::InputReport;

/// HID instance the joystick reports are sent on.
pub const HID_INSTANCE: u8 = 0;

/// What a single [`ReportPublisher::poll`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Less than one tick elapsed since the last emission; nothing sampled.
    Idle,
    /// A fresh report was submitted to the transport.
    Sent,
    /// A report was sampled but the transport was not ready or rejected it.
    Dropped,
}

/// Emits at most one input report per millisecond tick.
///
/// The publisher owns the sampler and the timestamp of the last emitted tick.
/// It never buffers: when the transport is not ready the sample is dropped
/// and the next tick samples fresh state.
///
/// # Cadence
///
/// The tick timestamp advances by exactly one interval per emission instead
/// of snapping to `now`, so irregular call intervals do not accumulate drift.
/// All clock arithmetic wraps, so a free-running `u32` millisecond counter
/// can roll over.
pub struct ReportPublisher<S> {
    sampler: S,
    last_emitted: u32,
}

impl<S: InputSampler> ReportPublisher<S> {
    /// Create a new publisher with its tick clock at zero.
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            last_emitted: 0,
        }
    }

    /// Run one iteration of the publishing loop.
    ///
    /// Call this unconditionally on every pass of the main loop with the
    /// current millisecond clock.
    pub fn poll<T: HidTransport>(&mut self, now: u32, transport: &mut T) -> PollOutcome {
        if now.wrapping_sub(self.last_emitted) < REPORT_INTERVAL_MS {
            return PollOutcome::Idle;
        }
        self.last_emitted = self.last_emitted.wrapping_add(REPORT_INTERVAL_MS);

        let report = self.sampler.sample_inputs(now);

        if !transport.is_ready() {
            trace!("HID endpoint not ready, dropping sample at {}", now);
            return PollOutcome::Dropped;
        }

        match transport.submit(HID_INSTANCE, InputReport::REPORT_ID, &report.as_bytes()) {
            Ok(()) => PollOutcome::Sent,
            Err(e) => {
                debug!("HID submit rejected: {:?}", e);
                PollOutcome::Dropped
            }
        }
    }

    /// Timestamp of the most recently emitted tick.
    #[inline]
    #[must_use]
    pub fn last_emitted(&self) -> u32 {
        self.last_emitted
    }

    /// Get a reference to the input sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }
}

//! Input sampling trait and the time-driven demo pattern.

use crate::types::{Buttons, InputReport};

/// Source of joystick input state.
///
/// This trait abstracts where button and axis values come from, allowing
/// GPIO/ADC readers, test fixtures and the [`DemoPattern`] to be used
/// interchangeably by the [`ReportPublisher`](crate::ReportPublisher).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputSampler {
    /// Sample the current input state.
    ///
    /// `now_ms` is the free-running millisecond clock at the time of sampling.
    /// Implementations must return quickly; this is called from the
    /// cooperative polling loop.
    fn sample_inputs(&mut self, now_ms: u32) -> InputReport;
}

impl<S: InputSampler + ?Sized> InputSampler for &mut S {
    fn sample_inputs(&mut self, now_ms: u32) -> InputReport {
        (**self).sample_inputs(now_ms)
    }
}

/// Deterministic placeholder inputs derived from the clock.
///
/// - buttons: `((t / 1000) % 2) << ((t / 2000) % 16)`, so a single button
///   blinks at 0.5 Hz and walks across the first 16 buttons
/// - sliders: all four axes ramp as `t % 32768`
///
/// Stands in for hardware reads until real inputs are wired up.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DemoPattern;

impl InputSampler for DemoPattern {
    fn sample_inputs(&mut self, now_ms: u32) -> InputReport {
        let buttons = ((now_ms / 1000) % 2) << ((now_ms / 2000) % 16);
        // Always below 0x8000, so the cast cannot go negative.
        let slider = (now_ms % 0x8000) as i16;

        InputReport {
            buttons: Buttons(buttons),
            sliders: [slider; InputReport::SLIDER_COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_pattern_at_start() {
        let report = DemoPattern.sample_inputs(0);
        assert_eq!(report, InputReport::neutral());
    }

    #[test]
    fn test_demo_pattern_button_blinks_and_walks() {
        let mut demo = DemoPattern;

        // Odd seconds light the button, even seconds clear it.
        assert_eq!(demo.sample_inputs(999).buttons, Buttons::NONE);
        assert_eq!(demo.sample_inputs(1_000).buttons, Buttons::button(0));
        assert_eq!(demo.sample_inputs(2_000).buttons, Buttons::NONE);
        assert_eq!(demo.sample_inputs(3_000).buttons, Buttons::button(1));
        assert_eq!(demo.sample_inputs(31_500).buttons, Buttons::button(15));

        // Wraps back to the first button after 32 s.
        assert_eq!(demo.sample_inputs(33_000).buttons, Buttons::button(0));
    }

    #[test]
    fn test_demo_pattern_sliders_ramp_and_wrap() {
        let mut demo = DemoPattern;

        assert_eq!(demo.sample_inputs(1).sliders, [1; 4]);
        assert_eq!(demo.sample_inputs(32_767).sliders, [32_767; 4]);
        assert_eq!(demo.sample_inputs(32_768).sliders, [0; 4]);
        assert_eq!(demo.sample_inputs(u32::MAX).sliders, [32_767; 4]);
    }
}

//! State shared between the main loop and the button interrupts.
//!
//! Every field is a single word, held in an atomic. The interrupt handlers are the only
//! writers of the selection, delay count and rate LED state; the main loop is the only writer of
//! the last sample. No invariant spans two fields, so each is read and written on its own,
//! without a critical section. Keep this set small and word-sized.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::waveform::{NUM_WAVEFORMS, Waveform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// The two step-rate presets toggled by the rate button.
pub enum RatePreset {
    /// Long delay between samples; rate LED off. The reset state.
    Slow,
    /// Half the delay; rate LED on.
    Fast,
}

impl RatePreset {
    pub const fn delay_count(self) -> u32 {
        match self {
            Self::Slow => 100_000,
            Self::Fast => 50_000,
        }
    }

    pub const fn led_on(self) -> bool {
        matches!(self, Self::Fast)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Slow => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }
}

/// Process-wide state. See the module docs for the ownership rules.
pub struct SharedState {
    waveform: AtomicU8,
    delay_count: AtomicU32,
    rate_led: AtomicBool,
    last_sample: AtomicU32,
}

impl SharedState {
    /// Reset state: sine selected, slow rate, rate LED off.
    pub const fn new() -> Self {
        Self {
            waveform: AtomicU8::new(Waveform::Sine.index()),
            delay_count: AtomicU32::new(RatePreset::Slow.delay_count()),
            rate_led: AtomicBool::new(false),
            last_sample: AtomicU32::new(0),
        }
    }

    /// The selected waveform.
    pub fn waveform(&self) -> Waveform {
        // Only `advance_waveform` stores here, and it stores in range.
        Waveform::try_from(self.waveform.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Select the next waveform, modulo 7, and return it. Interrupt context only.
    pub fn advance_waveform(&self) -> Waveform {
        let next = (self.waveform.load(Ordering::Relaxed) + 1) % NUM_WAVEFORMS;
        self.waveform.store(next, Ordering::Release);
        self.waveform()
    }

    /// Busy-wait count between samples.
    pub fn delay_count(&self) -> u32 {
        self.delay_count.load(Ordering::Acquire)
    }

    pub fn rate(&self) -> RatePreset {
        if self.delay_count() == RatePreset::Fast.delay_count() {
            RatePreset::Fast
        } else {
            RatePreset::Slow
        }
    }

    /// Swap the delay count between the two presets, and flip the rate LED state. Returns the
    /// new preset and LED state. Interrupt context only.
    pub fn toggle_rate(&self) -> (RatePreset, bool) {
        let rate = self.rate().toggled();
        self.delay_count.store(rate.delay_count(), Ordering::Release);

        let led = !self.rate_led.load(Ordering::Relaxed);
        self.rate_led.store(led, Ordering::Release);

        (rate, led)
    }

    pub fn rate_led(&self) -> bool {
        self.rate_led.load(Ordering::Acquire)
    }

    /// The most recent word written to the DAC.
    pub fn last_sample(&self) -> u32 {
        self.last_sample.load(Ordering::Relaxed)
    }

    pub fn record_sample(&self, code: u32) {
        self.last_sample.store(code, Ordering::Relaxed);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// The one instance the firmware uses.
pub static STATE: SharedState = SharedState::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_state() {
        let state = SharedState::new();
        assert_eq!(state.waveform(), Waveform::Sine);
        assert_eq!(state.delay_count(), 100_000);
        assert_eq!(state.rate(), RatePreset::Slow);
        assert!(!state.rate_led());
        assert_eq!(state.last_sample(), 0);
    }

    #[test]
    fn selection_is_press_count_mod_7() {
        let state = SharedState::new();
        for k in 1..=30u8 {
            let wf = state.advance_waveform();
            assert_eq!(wf.index(), k % 7);
            assert_eq!(state.waveform(), wf);
        }
    }

    #[test]
    fn rate_follows_press_parity() {
        let state = SharedState::new();
        for k in 1..=9u32 {
            let (rate, led) = state.toggle_rate();
            let odd = k % 2 == 1;
            assert_eq!(state.delay_count(), if odd { 50_000 } else { 100_000 });
            assert_eq!(state.rate_led(), odd);
            assert_eq!(led, odd);
            assert_eq!(rate.led_on(), odd);
        }
    }

    #[test]
    fn preset_counts() {
        assert_eq!(RatePreset::Slow.delay_count(), 100_000);
        assert_eq!(RatePreset::Fast.delay_count(), 50_000);
        assert_eq!(RatePreset::Slow.toggled(), RatePreset::Fast);
        assert_eq!(RatePreset::Fast.toggled(), RatePreset::Slow);
    }
}

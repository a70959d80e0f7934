//! What the two buttons do. The interrupt handlers in the firmware binary call these with the
//! hardware pins; tests call them with mocks.
//!
//! Contact bounce is not filtered: every falling edge that sets the pending bit counts as a
//! press.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::{
    delay::IterDelay,
    state::{RatePreset, SharedState},
    waveform::Waveform,
};

/// The pending flag of an external interrupt line.
pub trait PendingFlag {
    /// If the line has fired, clear its pending bit and return `true`. Otherwise leave it
    /// alone and return `false`.
    fn take(&mut self) -> bool;
}

/// Waveform-select edge: advance the selection and pulse the activity LED. Returns the new
/// selection, or `None` if the line wasn't pending.
///
/// The pulse busy-waits for `pulse` iterations inside the handler, holding off every other
/// interrupt at the same or lower priority for that long.
// TODO: Turn the LED on here, and let the main loop turn it off after its next sample.
pub fn on_select_edge<L, P, D>(
    line: &mut L,
    state: &SharedState,
    led: &mut P,
    delay: &mut D,
    pulse: u32,
) -> Option<Waveform>
where
    L: PendingFlag,
    P: OutputPin<Error = Infallible>,
    D: IterDelay,
{
    if !line.take() {
        return None;
    }

    let waveform = state.advance_waveform();

    let Ok(()) = led.set_high();
    delay.delay_iters(pulse);
    let Ok(()) = led.set_low();

    Some(waveform)
}

/// Rate-toggle edge: swap the delay count and drive the rate LED to match. Returns the new
/// preset and LED state, or `None` if the line wasn't pending.
pub fn on_rate_edge<L, P>(
    line: &mut L,
    state: &SharedState,
    led: &mut P,
) -> Option<(RatePreset, bool)>
where
    L: PendingFlag,
    P: OutputPin<Error = Infallible>,
{
    if !line.take() {
        return None;
    }

    let (rate, led_on) = state.toggle_rate();

    let Ok(()) = if led_on { led.set_high() } else { led.set_low() };

    Some((rate, led_on))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{MockLed, MockLine, RecordingDelay};

    #[test]
    fn select_ignores_spurious_entry() {
        let state = SharedState::new();
        let mut led = MockLed::default();
        let mut delay = RecordingDelay::default();

        let res = on_select_edge(&mut MockLine::idle(), &state, &mut led, &mut delay, 100_000);

        assert_eq!(res, None);
        assert_eq!(state.waveform(), Waveform::Sine);
        assert!(led.history.is_empty());
        assert!(delay.counts.is_empty());
    }

    #[test]
    fn select_clears_pending_and_pulses_led() {
        let state = SharedState::new();
        let mut line = MockLine::pending();
        let mut led = MockLed::default();
        let mut delay = RecordingDelay::default();

        let res = on_select_edge(&mut line, &state, &mut led, &mut delay, 100_000);

        assert_eq!(res, Some(Waveform::Square));
        assert!(!line.is_pending());
        assert_eq!(led.history, [true, false]);
        assert_eq!(delay.counts, [100_000]);

        // The flag is clear now, so a second entry does nothing.
        assert_eq!(on_select_edge(&mut line, &state, &mut led, &mut delay, 100_000), None);
        assert_eq!(state.waveform(), Waveform::Square);
    }

    #[test]
    fn select_wraps_after_seven_presses() {
        let state = SharedState::new();
        let mut led = MockLed::default();
        let mut delay = RecordingDelay::default();

        for _ in 0..7 {
            on_select_edge(&mut MockLine::pending(), &state, &mut led, &mut delay, 10);
        }

        assert_eq!(state.waveform(), Waveform::Sine);
        assert_eq!(led.history.len(), 14);
        assert!(!led.is_on());
    }

    #[test]
    fn rate_ignores_spurious_entry() {
        let state = SharedState::new();
        let mut led = MockLed::default();

        assert_eq!(on_rate_edge(&mut MockLine::idle(), &state, &mut led), None);
        assert_eq!(state.delay_count(), 100_000);
        assert!(led.history.is_empty());
    }

    #[test]
    fn rate_led_tracks_preset() {
        let state = SharedState::new();
        let mut led = MockLed::default();

        for k in 1..=6u32 {
            let (rate, on) = on_rate_edge(&mut MockLine::pending(), &state, &mut led).unwrap();
            let odd = k % 2 == 1;
            assert_eq!(rate, if odd { RatePreset::Fast } else { RatePreset::Slow });
            assert_eq!(on, odd);
            assert_eq!(led.is_on(), odd);
            assert_eq!(state.delay_count(), rate.delay_count());
        }
    }
}

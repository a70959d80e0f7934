//! Host-side stand-ins for the hardware, for unit tests.

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::{
    dac::{DAC_MASK, DacOutput, Trigger},
    delay::IterDelay,
    input::PendingFlag,
};

/// A model of DAC channel 1. Register writes only land while the clock gate is open, and a
/// software trigger only latches when the channel and its trigger are enabled with the
/// software source selected.
#[derive(Debug, Default)]
pub struct SimDac {
    pub clock: bool,
    pub enabled: bool,
    pub trigger_enabled: bool,
    pub tsel: Option<Trigger>,
    /// Holding register.
    pub dhr: u32,
    /// Output register, ie the pin.
    pub dor: u32,
    /// Every word written to the holding register while clocked.
    pub writes: Vec<u32>,
    /// Number of software triggers asserted while clocked.
    pub triggers: usize,
    /// Every code latched to the output.
    pub outputs: Vec<u32>,
}

impl SimDac {
    /// Straight out of reset: clock gated, everything zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured the way the firmware's init leaves it.
    pub fn powered() -> Self {
        let mut dac = Self::new();
        dac.enable_clock();
        dac.enable();
        dac.select_trigger(Trigger::Software);
        dac.enable_trigger();
        dac
    }

    pub fn enable_clock(&mut self) {
        self.clock = true;
    }

    pub fn enable(&mut self) {
        if self.clock {
            self.enabled = true;
        }
    }

    pub fn select_trigger(&mut self, trigger: Trigger) {
        if self.clock {
            self.tsel = Some(trigger);
        }
    }

    pub fn enable_trigger(&mut self) {
        if self.clock {
            self.trigger_enabled = true;
        }
    }
}

impl DacOutput for SimDac {
    fn set_value(&mut self, val: u32) {
        if !self.clock {
            return;
        }
        self.dhr = val & DAC_MASK;
        self.writes.push(val);
    }

    fn trigger(&mut self) {
        if !self.clock {
            return;
        }
        self.triggers += 1;
        if self.enabled && self.trigger_enabled && self.tsel == Some(Trigger::Software) {
            self.dor = self.dhr;
            self.outputs.push(self.dor);
        }
    }
}

/// Records every delay it's asked for, without waiting.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub counts: Vec<u32>,
}

impl IterDelay for RecordingDelay {
    fn delay_iters(&mut self, count: u32) {
        self.counts.push(count);
    }
}

/// An LED that remembers each level it was driven to.
#[derive(Debug, Default)]
pub struct MockLed {
    pub history: Vec<bool>,
}

impl MockLed {
    pub fn is_on(&self) -> bool {
        self.history.last().copied().unwrap_or(false)
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.push(true);
        Ok(())
    }
}

/// An EXTI line's sticky pending flag.
#[derive(Debug, Default)]
pub struct MockLine {
    pending: bool,
}

impl MockLine {
    pub fn pending() -> Self {
        Self { pending: true }
    }

    pub fn idle() -> Self {
        Self { pending: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl PendingFlag for MockLine {
    fn take(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_before_clock_gate_are_lost() {
        let mut dac = SimDac::new();
        dac.set_value(1234);
        dac.trigger();
        dac.enable();
        dac.select_trigger(Trigger::Software);
        dac.enable_trigger();

        assert!(dac.writes.is_empty());
        assert!(dac.outputs.is_empty());
        assert_eq!(dac.dor, 0);
    }

    #[test]
    fn code_reaches_output_only_after_trigger() {
        let mut dac = SimDac::powered();
        dac.set_value(1234);
        assert_eq!(dac.dor, 0);
        dac.trigger();
        assert_eq!(dac.dor, 1234);
    }

    #[test]
    fn trigger_needs_software_source() {
        let mut dac = SimDac::new();
        dac.enable_clock();
        dac.enable();
        dac.enable_trigger();
        dac.set_value(77);
        dac.trigger();
        assert_eq!(dac.dor, 0);

        dac.select_trigger(Trigger::Software);
        dac.trigger();
        assert_eq!(dac.dor, 77);
    }

    #[test]
    fn output_keeps_low_12_bits() {
        let mut dac = SimDac::powered();
        dac.set_value(4100);
        dac.trigger();
        assert_eq!(dac.dor, 4);
        assert_eq!(dac.writes, [4100]);
    }
}

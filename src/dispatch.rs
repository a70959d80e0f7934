//! The main loop: one sample from the selected generator, then a busy-wait, forever.

use crate::{
    dac::DacOutput,
    delay::IterDelay,
    state::SharedState,
    waveform::{GeneratorBank, Waveform},
};

/// Code placed on the output before the first sample.
pub const INITIAL_CODE: u32 = 0;

/// Put a known code on the output: one holding-register write of `INITIAL_CODE`, one software
/// trigger, and the code recorded as the last sample. Runs once, after the DAC is configured and
/// before the loop starts.
pub fn prime_output<D: DacOutput>(dac: &mut D, state: &SharedState) {
    dac.set_value(INITIAL_CODE);
    dac.trigger();
    state.record_sample(INITIAL_CODE);
}

/// Owns the generators, and runs whichever one the shared state selects.
pub struct Dispatcher<'a> {
    state: &'a SharedState,
    bank: GeneratorBank,
}

impl<'a> Dispatcher<'a> {
    pub const fn new(state: &'a SharedState) -> Self {
        Self {
            state,
            bank: GeneratorBank::new(),
        }
    }

    /// One loop iteration. Selection and delay count are reloaded here, so a change published
    /// by an interrupt takes effect at the next call. Returns the waveform used and its code.
    pub fn step<D, W>(&mut self, dac: &mut D, delay: &mut W) -> (Waveform, u32)
    where
        D: DacOutput,
        W: IterDelay,
    {
        let waveform = self.state.waveform();
        let code = self.bank.emit(waveform, dac, self.state);

        delay.delay_iters(self.state.delay_count());

        (waveform, code)
    }

    pub fn run<D, W>(mut self, dac: &mut D, delay: &mut W) -> !
    where
        D: DacOutput,
        W: IterDelay,
    {
        loop {
            self.step(dac, delay);
        }
    }
}

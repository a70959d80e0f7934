//! Brings the board from reset to the state the main loop and the button handlers expect.

use crate::{
    config::{Config, PinCfg},
    dac::Dac,
    dispatch::prime_output,
    error::{Error, Result},
    gpio::{Edge, ExtiLine, Pin, PinMode, Pull},
    pac,
    state::SharedState,
};

/// Everything `init` configured that is used afterwards.
pub struct Board {
    pub dac: Dac,
    pub dac_pin: Pin,
    pub select_button: Pin,
    pub rate_button: Pin,
    pub activity_led: Pin,
    pub rate_led: Pin,
}

impl Board {
    pub fn select_line(&self) -> ExtiLine {
        self.select_button.exti_line()
    }

    pub fn rate_line(&self) -> ExtiLine {
        self.rate_button.exti_line()
    }
}

fn pin(cfg: PinCfg, mode: PinMode) -> Pin {
    Pin::new(cfg.port, cfg.pin, mode)
}

/// Configure the GPIO pins, the DAC and the button EXTI lines, in that order. Each peripheral's
/// clock gate is opened before its registers are written. The DAC is left holding code 0 on its
/// output, and that code is recorded in `state`.
///
/// The NVIC lines stay masked; unmask them once the handlers' resources are in place.
pub fn init(dac: pac::DAC, cfg: &Config, state: &SharedState) -> Result<Board> {
    if !cfg.is_valid() {
        return Err(Error::InvalidConfig);
    }

    // The DAC pin first, so the LED pins on the same port find the port already clocked and
    // leave its mode alone.
    let dac_pin = pin(cfg.dac_pin, PinMode::Analog);

    let mut select_button = pin(cfg.select_button, PinMode::Input);
    select_button.pull(Pull::Up);
    let mut rate_button = pin(cfg.rate_button, PinMode::Input);
    rate_button.pull(Pull::Up);

    let mut activity_led = pin(cfg.activity_led, PinMode::Output);
    activity_led.set_low();
    let mut rate_led = pin(cfg.rate_led, PinMode::Output);
    rate_led.set_low();

    defmt::debug!("GPIO configured");

    let mut dac = Dac::new(dac, cfg.dac)?;
    prime_output(&mut dac, state);

    defmt::debug!("DAC primed");

    select_button.enable_interrupt(Edge::Falling)?;
    rate_button.enable_interrupt(Edge::Falling)?;

    defmt::debug!("EXTI lines routed");

    Ok(Board {
        dac,
        dac_pin,
        select_button,
        rate_button,
        activity_led,
        rate_led,
    })
}

//! Board configuration: which pins do what, and how long the activity LED pulses.
//!
//! `Config::default()` matches a Nucleo-F446RE with the DAC output on the Arduino A2 header.

use crate::dac::DacConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// GPIO port letter
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Port {
    /// See F446 RM section 7.2.3: each port has an associated value for `SYSCFG_EXTICRx`.
    pub const fn cr_val(&self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
            Self::F => 5,
            Self::G => 6,
            Self::H => 7,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// A port and pin number, eg `PinCfg::new(Port::C, 13)` for PC13.
pub struct PinCfg {
    pub port: Port,
    pub pin: u8,
}

impl PinCfg {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// The EXTI line this pin can drive. Every port's pin n shares line n.
    pub const fn exti_line(&self) -> u8 {
        self.pin
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
pub struct Config {
    /// Analog output. Must be the pin wired to `dac.channel`: PA4 for channel 1.
    pub dac_pin: PinCfg,
    /// Falling edge advances the waveform.
    pub select_button: PinCfg,
    /// Falling edge toggles the step rate.
    pub rate_button: PinCfg,
    /// Pulsed on each waveform change.
    pub activity_led: PinCfg,
    /// Lit while the fast rate is selected.
    pub rate_led: PinCfg,
    /// Busy-wait iterations the activity LED stays lit.
    pub led_pulse: u32,
    pub dac: DacConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dac_pin: PinCfg::new(Port::A, 4),
            select_button: PinCfg::new(Port::C, 13),
            rate_button: PinCfg::new(Port::A, 0),
            activity_led: PinCfg::new(Port::A, 5),
            rate_led: PinCfg::new(Port::A, 1),
            led_pulse: 100_000,
            dac: DacConfig::default(),
        }
    }
}

impl Config {
    /// Checks the pin assignments are usable together: pin numbers in range, no pin used
    /// twice, the two buttons on different EXTI lines, and the DAC pin matching its channel.
    pub fn is_valid(&self) -> bool {
        use crate::dac::DacChannel;

        let pins = [
            self.dac_pin,
            self.select_button,
            self.rate_button,
            self.activity_led,
            self.rate_led,
        ];

        if pins.iter().any(|p| p.pin > 15) {
            return false;
        }
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].contains(a) {
                return false;
            }
        }

        let dac_pin = match self.dac.channel {
            DacChannel::C1 => PinCfg::new(Port::A, 4),
            DacChannel::C2 => PinCfg::new(Port::A, 5),
        };

        self.select_button.exti_line() != self.rate_button.exti_line() && self.dac_pin == dac_pin
    }
}

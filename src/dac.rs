//! Support for the digital-to-analog converter (DAC) peripheral.
//!
//! The waveform generators only see the [`DacOutput`] trait: load a code, then latch it with a
//! software trigger. [`Dac`] implements it on the F4's DAC channel 1; tests implement it on a
//! recording model.

#[cfg(feature = "f4")]
use crate::{
    error::Result,
    pac::{self, RCC},
    util::rcc_en,
};

/// Full-scale code of the 12-bit converter.
pub const DAC_MAX: u32 = 4_095;

/// Bits of the holding register that reach the converter. Anything above is ignored by the
/// hardware.
pub const DAC_MASK: u32 = 0xfff;

/// A DAC channel whose samples are latched by a software trigger.
pub trait DacOutput {
    /// Load a code into the 12-bit right-aligned holding register. Bits above bit 11 are
    /// dropped by the peripheral.
    fn set_value(&mut self, val: u32);

    /// Assert the software trigger, moving the held code to the output.
    fn trigger(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// Select the channel. The F446 routes channel 1 to PA4 and channel 2 to PA5.
pub enum DacChannel {
    C1,
    C2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// Three options are available to set DAC precision. Sets the DAC_DHR8R1 etc register contents.
pub enum DacBits {
    /// Eight bit precision, right-aligned.
    EightR,
    /// 12-bit precision, left-aligned.
    TwelveL,
    /// 12-bit precision, right-aligned.
    TwelveR,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
#[repr(u8)]
/// Select a trigger, used by some features. Sets DAC_CR, TSEL1 and TSEL2 fields, for Channel 1
/// and Channel 2 triggers respectively. See F446 RM, section 14.5.
pub enum Trigger {
    /// Timer 6
    Tim6 = 0b000,
    /// Timer 8
    Tim8 = 0b001,
    /// Timer 7
    Tim7 = 0b010,
    /// Timer 5
    Tim5 = 0b011,
    /// Timer 2
    Tim2 = 0b100,
    /// Timer 4
    Tim4 = 0b101,
    /// External interrupt line 9
    Exti9 = 0b110,
    /// A software trigger
    Software = 0b111,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
/// Initial configuration data for the DAC peripheral.
pub struct DacConfig {
    pub channel: DacChannel,
    /// Holding register used by `set_value`.
    pub bits: DacBits,
    /// Trigger source selected before the trigger is enabled.
    pub trigger: Trigger,
    /// `true` leaves `BOFFx` cleared.
    pub output_buffer: bool,
}

impl Default for DacConfig {
    fn default() -> Self {
        Self {
            channel: DacChannel::C1,
            bits: DacBits::TwelveR,
            trigger: Trigger::Software,
            output_buffer: true,
        }
    }
}

#[cfg(feature = "f4")]
/// Represents a Digital to Analog Converter (DAC) peripheral.
pub struct Dac {
    pub regs: pac::DAC,
    cfg: DacConfig,
}

#[cfg(feature = "f4")]
impl Dac {
    /// Initialize a DAC peripheral: open its clock gate, then enable the channel, set the
    /// output buffer, select the trigger source, and only then enable the trigger.
    /// Doesn't write a sample; see `set_value` and `trigger`.
    pub fn new(regs: pac::DAC, cfg: DacConfig) -> Result<Self> {
        let rcc = unsafe { &(*RCC::ptr()) };
        rcc_en!(apb1, dac, rcc);

        let mut result = Self { regs, cfg };

        result.enable(cfg.channel);
        result.set_output_buffer(cfg.channel, cfg.output_buffer);
        result.set_trigger(cfg.channel, cfg.trigger);

        defmt::debug!(
            "DAC {} ready; trigger {}, buffer {}",
            cfg.channel,
            cfg.trigger,
            cfg.output_buffer
        );

        Ok(result)
    }

    /// Enable the DAC, for a specific channel.
    pub fn enable(&mut self, channel: DacChannel) {
        match channel {
            DacChannel::C1 => self.regs.cr().modify(|_, w| w.en1().set_bit()),
            DacChannel::C2 => self.regs.cr().modify(|_, w| w.en2().set_bit()),
        };
    }

    /// Set `BOFFx`. The bit is active-low with respect to the buffer: cleared means buffered.
    pub fn set_output_buffer(&mut self, channel: DacChannel, buffered: bool) {
        match channel {
            DacChannel::C1 => self.regs.cr().modify(|_, w| w.boff1().bit(!buffered)),
            DacChannel::C2 => self.regs.cr().modify(|_, w| w.boff2().bit(!buffered)),
        };
    }

    /// Select and activate a trigger. The source is written before `TENx` is set, so the
    /// channel never latches on an undefined source. See F446 RM, section 14.3.6.
    pub fn set_trigger(&mut self, channel: DacChannel, trigger: Trigger) {
        match channel {
            DacChannel::C1 => {
                self.regs
                    .cr()
                    .modify(|_, w| unsafe { w.tsel1().bits(trigger as u8) });
                self.regs.cr().modify(|_, w| w.ten1().set_bit());
            }
            DacChannel::C2 => {
                self.regs
                    .cr()
                    .modify(|_, w| unsafe { w.tsel2().bits(trigger as u8) });
                self.regs.cr().modify(|_, w| w.ten2().set_bit());
            }
        }
    }

    /// Set the DAC output word. The whole word goes to the holding register; the peripheral
    /// keeps the low 12 (or 8) bits.
    pub fn write(&mut self, channel: DacChannel, val: u32) {
        let regs = &self.regs;
        unsafe {
            match channel {
                DacChannel::C1 => match self.cfg.bits {
                    DacBits::EightR => regs.dhr8r1().write(|w| w.bits(val)),
                    DacBits::TwelveL => regs.dhr12l1().write(|w| w.bits(val)),
                    DacBits::TwelveR => regs.dhr12r1().write(|w| w.bits(val)),
                },
                DacChannel::C2 => match self.cfg.bits {
                    DacBits::EightR => regs.dhr8r2().write(|w| w.bits(val)),
                    DacBits::TwelveL => regs.dhr12l2().write(|w| w.bits(val)),
                    DacBits::TwelveR => regs.dhr12r2().write(|w| w.bits(val)),
                },
            };
        }
    }

    /// Assert the channel's software trigger. Hardware clears the bit once the held code has
    /// moved to the output register.
    pub fn trigger_software(&mut self, channel: DacChannel) {
        match channel {
            DacChannel::C1 => self.regs.swtrigr().write(|w| w.swtrig1().set_bit()),
            DacChannel::C2 => self.regs.swtrigr().write(|w| w.swtrig2().set_bit()),
        };
    }

    /// The code currently driving the output pin.
    pub fn output(&self, channel: DacChannel) -> u16 {
        match channel {
            DacChannel::C1 => self.regs.dor1().read().daccdor().bits(),
            DacChannel::C2 => self.regs.dor2().read().daccdor().bits(),
        }
    }
}

#[cfg(feature = "f4")]
impl DacOutput for Dac {
    fn set_value(&mut self, val: u32) {
        self.write(self.cfg.channel, val);
    }

    fn trigger(&mut self) {
        self.trigger_software(self.cfg.channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_select_bits() {
        assert_eq!(Trigger::Tim6 as u8, 0b000);
        assert_eq!(Trigger::Exti9 as u8, 0b110);
        assert_eq!(Trigger::Software as u8, 0b111);
    }

    #[test]
    fn default_config_is_software_triggered_12_bit() {
        let cfg = DacConfig::default();
        assert_eq!(cfg.channel, DacChannel::C1);
        assert_eq!(cfg.bits, DacBits::TwelveR);
        assert_eq!(cfg.trigger, Trigger::Software);
        assert!(cfg.output_buffer);
    }
}

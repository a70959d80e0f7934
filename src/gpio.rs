//! This module provides functionality for General Purpose Input and Output (GPIO) pins,
//! including the external interrupt (EXTI) routing that turns a pin edge into an IRQ.
//! It includes implementations of `embedded-hal` pin abstraction.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use paste::paste;

pub use crate::config::Port;
use crate::{
    error::Result,
    input::PendingFlag,
    pac::{self, EXTI, Interrupt, RCC, SYSCFG},
    util::rcc_en,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
/// Values for `GPIOx_MODER`. Sets modes.
pub enum PinMode {
    Input = 0b00,
    Output = 0b01,
    Alt = 0b10,
    Analog = 0b11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
/// Values for `GPIOx_PUPDR`. Sets if the pin uses the internal pull-up or pull-down
/// resistor.
pub enum Pull {
    Floating = 0b00,
    Up = 0b01,
    Dn = 0b10,
}

#[derive(Copy, Clone, Debug, defmt::Format)]
/// A pulse edge, used to trigger interrupts.
pub enum Edge {
    Rising,
    Falling,
    Either,
}

/// Run `$body` with `$regs` bound to the port's register block. The ports have distinct
/// register block types in the PAC, so each arm is type-checked on its own.
macro_rules! with_regs {
    ($port:expr, $regs:ident, $body:expr) => {
        match $port {
            Port::A => { let $regs = unsafe { &(*pac::GPIOA::ptr()) }; $body }
            Port::B => { let $regs = unsafe { &(*pac::GPIOB::ptr()) }; $body }
            Port::C => { let $regs = unsafe { &(*pac::GPIOC::ptr()) }; $body }
            Port::D => { let $regs = unsafe { &(*pac::GPIOD::ptr()) }; $body }
            Port::E => { let $regs = unsafe { &(*pac::GPIOE::ptr()) }; $body }
            Port::F => { let $regs = unsafe { &(*pac::GPIOF::ptr()) }; $body }
            Port::G => { let $regs = unsafe { &(*pac::GPIOG::ptr()) }; $body }
            Port::H => { let $regs = unsafe { &(*pac::GPIOH::ptr()) }; $body }
        }
    };
}

/// Open a port's clock gate. A port that's already clocked is left alone rather than reset,
/// so configuring a second pin on it doesn't undo the first.
macro_rules! port_clock {
    ($port:expr, $rcc:expr, [$($P:ident),+]) => {
        paste! {
            match $port {
                $(
                    Port::$P => {
                        if $rcc.ahb1enr().read().[<gpio $P:lower en>]().bit_is_clear() {
                            $rcc.ahb1enr().modify(|_, w| w.[<gpio $P:lower en>]().set_bit());
                            $rcc.ahb1rstr().modify(|_, w| w.[<gpio $P:lower rst>]().set_bit());
                            $rcc.ahb1rstr().modify(|_, w| w.[<gpio $P:lower rst>]().clear_bit());
                        }
                    }
                )+
            }
        }
    };
}

/// Set the 2-bit field for `$pin` in a MODER-style register, leaving the other pins' fields
/// untouched.
macro_rules! set_field2 {
    ($regs:expr, $reg:ident, $pin:expr, $val:expr) => {
        $regs.$reg().modify(|r, w| unsafe {
            w.bits((r.bits() & !(0b11 << ($pin * 2))) | (($val as u32) << ($pin * 2)))
        })
    };
}

#[derive(Debug, defmt::Format)]
/// Represents a single GPIO pin. Doesn't own the port's registers; other pins on the same port
/// can exist at the same time.
pub struct Pin {
    pub port: Port,
    /// Pin number, 0 through 15. For example, use 5 for PA5.
    pub pin: u8,
}

impl Pin {
    /// Create a new pin, with a specific mode. Enables the port's clock if it isn't already.
    pub fn new(port: Port, pin: u8, mode: PinMode) -> Self {
        assert!(pin <= 15, "Pin must be 0 - 15.");

        let rcc = unsafe { &(*RCC::ptr()) };
        port_clock!(port, rcc, [A, B, C, D, E, F, G, H]);

        let mut result = Self { port, pin };
        result.mode(mode);

        result
    }

    /// Set pin mode. Eg, Output, Analog etc.
    pub fn mode(&mut self, value: PinMode) {
        with_regs!(self.port, regs, {
            set_field2!(regs, moder, self.pin, value);
        });
    }

    /// Set internal pull resistor: Pull up, pull down, or floating.
    pub fn pull(&mut self, value: Pull) {
        with_regs!(self.port, regs, {
            set_field2!(regs, pupdr, self.pin, value);
        });
    }

    /// Read the pin's mode back from `MODER`.
    pub fn get_mode(&self) -> PinMode {
        let bits = with_regs!(self.port, regs, regs.moder().read().bits() >> (self.pin * 2)) & 0b11;
        match bits {
            0b00 => PinMode::Input,
            0b01 => PinMode::Output,
            0b10 => PinMode::Alt,
            _ => PinMode::Analog,
        }
    }

    /// Set the output level using the atomic set/reset register, so no other pin on the port
    /// is written.
    fn set_state(&mut self, high: bool) {
        let offset = if high { 0 } else { 16 };
        let bit = 1 << (self.pin + offset);
        with_regs!(self.port, regs, {
            regs.bsrr().write(|w| unsafe { w.bits(bit) });
        });
    }

    /// Set a pin state (ie set high or low output voltage level).
    pub fn set_high(&mut self) {
        self.set_state(true);
    }

    /// Set a pin state (ie set high or low output voltage level).
    pub fn set_low(&mut self) {
        self.set_state(false);
    }

    /// Check if the pin's input voltage is high. Reads from the `IDR` register.
    pub fn is_high(&self) -> bool {
        with_regs!(self.port, regs, regs.idr().read().bits() & (1 << self.pin) != 0)
    }

    /// Check if the pin's input voltage is low. Reads from the `IDR` register.
    pub fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Check the level the pin is driven to. Reads from the `ODR` register.
    pub fn is_set_high(&self) -> bool {
        with_regs!(self.port, regs, regs.odr().read().bits() & (1 << self.pin) != 0)
    }

    /// Configure this pin as an interrupt source: route its EXTI line to this port, select
    /// the edge(s), then unmask the line. The NVIC side is left to the caller.
    pub fn enable_interrupt(&mut self, edge: Edge) -> Result<()> {
        let rcc = unsafe { &(*RCC::ptr()) };
        let syscfg = unsafe { &(*SYSCFG::ptr()) };
        let exti = unsafe { &(*EXTI::ptr()) };

        rcc_en!(apb2, syscfg, rcc);

        let shift = (self.pin as u32 % 4) * 4;
        let mask = 0b1111 << shift;
        let val = (self.port.cr_val() as u32) << shift;

        unsafe {
            match self.pin / 4 {
                0 => syscfg.exticr1().modify(|r, w| w.bits((r.bits() & !mask) | val)),
                1 => syscfg.exticr2().modify(|r, w| w.bits((r.bits() & !mask) | val)),
                2 => syscfg.exticr3().modify(|r, w| w.bits((r.bits() & !mask) | val)),
                _ => syscfg.exticr4().modify(|r, w| w.bits((r.bits() & !mask) | val)),
            };

            let line = 1 << self.pin;
            let (rising, falling) = match edge {
                Edge::Rising => (true, false),
                Edge::Falling => (false, true),
                Edge::Either => (true, true),
            };

            exti.rtsr().modify(|r, w| {
                w.bits(if rising { r.bits() | line } else { r.bits() & !line })
            });
            exti.ftsr().modify(|r, w| {
                w.bits(if falling { r.bits() | line } else { r.bits() & !line })
            });
            exti.imr().modify(|r, w| w.bits(r.bits() | line));
        }

        defmt::debug!("EXTI{} <- P{}{} on {}", self.pin, self.port, self.pin, edge);

        Ok(())
    }

    /// The EXTI line this pin drives.
    pub fn exti_line(&self) -> ExtiLine {
        ExtiLine(self.pin)
    }

    /// The NVIC interrupt this pin's EXTI line is wired to. Lines 5 - 9 and 10 - 15 share one
    /// each.
    pub fn interrupt(&self) -> Interrupt {
        match self.pin {
            0 => Interrupt::EXTI0,
            1 => Interrupt::EXTI1,
            2 => Interrupt::EXTI2,
            3 => Interrupt::EXTI3,
            4 => Interrupt::EXTI4,
            5..=9 => Interrupt::EXTI9_5,
            _ => Interrupt::EXTI15_10,
        }
    }
}

/// Check whether an EXTI line's pending bit is set.
pub fn exti_pending(line: u8) -> bool {
    let exti = unsafe { &(*EXTI::ptr()) };
    exti.pr().read().bits() & (1 << line) != 0
}

/// Clear an EXTI line's pending bit. The register is write-1-to-clear, so this writes only
/// that line's bit; a read-modify-write would clear every other pending line too.
pub fn clear_exti_interrupt(line: u8) {
    let exti = unsafe { &(*EXTI::ptr()) };
    exti.pr().write(|w| unsafe { w.bits(1 << line) });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
/// An external interrupt line, 0 - 15.
pub struct ExtiLine(pub u8);

impl PendingFlag for ExtiLine {
    fn take(&mut self) -> bool {
        if !exti_pending(self.0) {
            return false;
        }
        clear_exti_interrupt(self.0);
        true
    }
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Pin::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Pin::set_high(self);
        Ok(())
    }
}

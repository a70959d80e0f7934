//! A seven-waveform function generator on the STM32F446's 12-bit DAC.
//!
//! The main loop emits one sample per iteration from the selected generator, then busy-waits.
//! Two buttons on falling-edge external interrupts change what it does: one cycles through the
//! waveforms, the other toggles between two step rates.
//!
//! Everything that doesn't touch registers (the generators, the dispatcher, the shared state,
//! and the button logic) builds without any features, and is tested on the host. The register
//! level drivers need the `f446` feature.

#![cfg_attr(not(test), no_std)]

use cfg_if::cfg_if;

// F4 PAC
#[cfg(feature = "f446")]
pub use stm32f4::stm32f446 as pac;

cfg_if! {
    if #[cfg(feature = "f4")] {
        pub mod gpio;
        pub mod setup;
    }
}

pub mod config;
pub mod dac;
pub mod delay;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod macros;
pub mod state;
pub mod waveform;

mod util;

#[cfg(test)]
mod sim;

pub use error::{Error, Result};

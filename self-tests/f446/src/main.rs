//! Smoke test: bring the board up with the default configuration, then step the sine
//! generator and print what lands on the DAC output. Attach a scope to PA4 to see it.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use hal::{
    config::Config,
    dac::DacChannel,
    delay::SpinDelay,
    dispatch::Dispatcher,
    pac, setup,
    state::STATE,
};

// Import the panic handler
use panic_probe as _;

#[entry]
fn main() -> ! {
    rtt_target::rtt_init_defmt!();
    // Set up microcontroller peripherals
    let dp = pac::Peripherals::take().unwrap();

    defmt::println!("Hello, world!");

    let mut board = setup::init(dp.DAC, &Config::default(), &STATE).unwrap();
    let mut dispatcher = Dispatcher::new(&STATE);
    let mut delay = SpinDelay::new();

    loop {
        let (waveform, code) = dispatcher.step(&mut board.dac, &mut delay);
        defmt::debug!(
            "{}: wrote {}, output {}",
            waveform.name(),
            code,
            board.dac.output(DacChannel::C1)
        );
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

//! Firmware entry point. Brings the board up, hands the LEDs to the button handlers, unmasks
//! the button interrupts, then runs the sample loop forever.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use critical_section::CriticalSection;
use defmt_rtt as _;
use panic_probe as _;

use stm32_wavegen::{
    access_global,
    config::Config,
    delay::SpinDelay,
    dispatch::Dispatcher,
    gpio::{ExtiLine, Pin},
    init_globals, input, make_globals,
    pac::{self, Interrupt, interrupt},
    setup, setup_nvic,
    state::STATE,
};

/// What the waveform-select handler drives.
struct SelectButton {
    line: ExtiLine,
    led: Pin,
    /// Busy-wait iterations the LED stays lit.
    pulse: u32,
}

/// What the rate-toggle handler drives.
struct RateButton {
    line: ExtiLine,
    led: Pin,
}

make_globals!((SELECT, SelectButton), (RATE, RateButton));

/// Both buttons share a priority, so neither handler preempts the other.
const BUTTON_PRIORITY: u8 = 1 << 4;

#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let mut cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let dp = pac::Peripherals::take().unwrap();

    defmt::info!("wavegen booting");

    let cfg = Config::default();

    let mut board = match setup::init(dp.DAC, &cfg, &STATE) {
        Ok(b) => b,
        Err(e) => {
            defmt::error!("Init failed: {}", e);
            defmt::panic!("Reset to retry");
        }
    };

    let select_irq = board.select_button.interrupt();
    let rate_irq = board.rate_button.interrupt();
    let select_line = board.select_line();
    let rate_line = board.rate_line();

    // The handlers below are bound to these two vectors.
    if select_irq != Interrupt::EXTI15_10 || rate_irq != Interrupt::EXTI0 {
        defmt::panic!(
            "Buttons on EXTI{} and EXTI{} have no handlers",
            select_line.0,
            rate_line.0
        );
    }

    init_globals!(
        (
            SELECT,
            SelectButton {
                line: select_line,
                led: board.activity_led,
                pulse: cfg.led_pulse,
            }
        ),
        (
            RATE,
            RateButton {
                line: rate_line,
                led: board.rate_led,
            }
        ),
    );

    setup_nvic!([(select_irq, BUTTON_PRIORITY), (rate_irq, BUTTON_PRIORITY)], cp.NVIC);

    defmt::debug!("NVIC lines unmasked");
    defmt::info!(
        "Init complete. {} at delay {}",
        STATE.waveform().name(),
        STATE.delay_count()
    );

    Dispatcher::new(&STATE).run(&mut board.dac, &mut SpinDelay::new())
}

fn select_edge(cs: CriticalSection) {
    access_global!(SELECT, button, cs);

    let SelectButton { line, led, pulse } = button;
    match input::on_select_edge(line, &STATE, led, &mut SpinDelay::new(), *pulse) {
        Some(wf) => defmt::debug!("Waveform: {} ({})", wf.name(), wf.index()),
        None => defmt::warn!("Spurious EXTI{} entry", line.0),
    }
}

fn rate_edge(cs: CriticalSection) {
    access_global!(RATE, button, cs);

    let RateButton { line, led } = button;
    match input::on_rate_edge(line, &STATE, led) {
        Some((rate, led_on)) => {
            defmt::debug!("Rate: {} delay {}, LED {}", rate, rate.delay_count(), led_on)
        }
        None => defmt::warn!("Spurious EXTI{} entry", line.0),
    }
}

#[interrupt]
/// Waveform-select button.
fn EXTI15_10() {
    critical_section::with(select_edge);
}

#[interrupt]
/// Rate-toggle button.
fn EXTI0() {
    critical_section::with(rate_edge);
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}

// Test file for the GPIO and EXTI parts of the driver, on a Nucleo-F446RE.

// With nothing attached, both buttons read high: PC13 has the board's pull-up, and PA0 has
// the internal one.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(setup = rtt_target::rtt_init_defmt!())]
mod tests {
    use hal::{
        gpio::{Edge, ExtiLine, Pin, PinMode, Port, Pull, exti_pending},
        input::PendingFlag,
        pac,
    };

    struct State {
        select: Pin,
        rate: Pin,
    }

    #[init]
    fn init() -> State {
        let mut select = Pin::new(Port::C, 13, PinMode::Input);
        select.pull(Pull::Up);
        let mut rate = Pin::new(Port::A, 0, PinMode::Input);
        rate.pull(Pull::Up);

        State { select, rate }
    }

    #[test]
    fn released_buttons_read_high(state: State) {
        defmt::assert!(state.select.is_high());
        defmt::assert!(state.rate.is_high());
    }

    #[test]
    fn led_drives() {
        let mut led = Pin::new(Port::A, 5, PinMode::Output);
        led.set_high();
        defmt::assert!(led.is_set_high());
        defmt::assert!(led.is_high());
        led.set_low();
        defmt::assert!(!led.is_set_high());
        defmt::assert!(led.is_low());
    }

    #[test]
    fn second_pin_keeps_first_pins_mode() {
        let dac_pin = Pin::new(Port::A, 4, PinMode::Analog);
        let _led = Pin::new(Port::A, 5, PinMode::Output);
        let _rate_led = Pin::new(Port::A, 1, PinMode::Output);
        defmt::assert_eq!(dac_pin.get_mode(), PinMode::Analog);
    }

    #[test]
    fn clearing_one_line_leaves_the_other_pending(mut state: State) {
        state.select.enable_interrupt(Edge::Falling).unwrap();
        state.rate.enable_interrupt(Edge::Falling).unwrap();

        // Software interrupt event register; the NVIC lines stay masked.
        let exti = unsafe { &(*pac::EXTI::ptr()) };
        exti.swier().write(|w| unsafe { w.bits((1 << 13) | 1) });

        defmt::assert!(ExtiLine(0).take());
        defmt::assert!(exti_pending(13));
        defmt::assert!(!ExtiLine(0).take());

        defmt::assert!(ExtiLine(13).take());
        defmt::assert!(!exti_pending(13));
    }
}

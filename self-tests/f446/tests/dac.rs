// Test file for the DAC driver. Needs no wiring; the output register is read back directly.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(setup = rtt_target::rtt_init_defmt!())]
mod tests {
    use hal::{
        dac::{Dac, DacChannel, DacConfig, DacOutput},
        delay::spin,
        pac,
    };

    fn dac() -> Dac {
        let dp = pac::Peripherals::take().unwrap();
        Dac::new(dp.DAC, DacConfig::default()).unwrap()
    }

    #[test]
    fn writes_before_clock_gate_are_lost() {
        let dp = pac::Peripherals::take().unwrap();
        dp.DAC.dhr12r1().write(|w| unsafe { w.bits(1234) });

        let dac = Dac::new(dp.DAC, DacConfig::default()).unwrap();
        defmt::assert_eq!(dac.regs.dhr12r1().read().bits(), 0);
        defmt::assert_eq!(dac.output(DacChannel::C1), 0);
    }

    #[test]
    fn trigger_configured_before_enable() {
        let dac = dac();
        let cr = dac.regs.cr().read();
        defmt::assert!(cr.en1().bit_is_set());
        defmt::assert!(cr.boff1().bit_is_clear());
        defmt::assert_eq!(cr.tsel1().bits(), 0b111);
        defmt::assert!(cr.ten1().bit_is_set());
    }

    #[test]
    fn code_latches_on_software_trigger() {
        let mut dac = dac();

        dac.set_value(1234);
        spin(10);
        defmt::assert_eq!(dac.output(DacChannel::C1), 0);

        dac.trigger();
        spin(10);
        defmt::assert_eq!(dac.output(DacChannel::C1), 1234);
    }

    #[test]
    fn output_keeps_low_12_bits() {
        let mut dac = dac();

        // The triangle's overshoot.
        dac.set_value(4100);
        dac.trigger();
        spin(10);
        defmt::assert_eq!(dac.output(DacChannel::C1), 4);
    }
}

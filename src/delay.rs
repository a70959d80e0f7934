//! Busy-wait delays, counted in loop iterations. There's no timer behind these: a count of
//! 100_000 is "about 100_000 trips round a loop", which sets the pace of the waveform and the
//! length of the LED pulse without reference to wall time.

/// Something that can stall the caller for a number of loop iterations.
pub trait IterDelay {
    /// Spin for approximately `count` iterations, then return.
    fn delay_iters(&mut self, count: u32);
}

/// Busy-wait delay provider. Holds no peripheral; any number of these can exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpinDelay;

impl SpinDelay {
    pub const fn new() -> Self {
        Self
    }
}

impl IterDelay for SpinDelay {
    fn delay_iters(&mut self, count: u32) {
        spin(count);
    }
}

/// Count `count` down to zero. The counter is volatile, so the compiler can't fold the loop
/// away or shorten it.
#[inline(never)]
pub fn spin(count: u32) {
    let mut remaining = count;
    let ptr = &mut remaining as *mut u32;

    // Safety: `ptr` points to a live, aligned local for the whole loop.
    unsafe {
        while core::ptr::read_volatile(ptr) != 0 {
            core::ptr::write_volatile(ptr, core::ptr::read_volatile(ptr) - 1);
            #[cfg(cortex_m_target)]
            cortex_m::asm::nop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_returns() {
        spin(0);
        spin(1);
        spin(100_000);
    }

    #[test]
    fn spin_delay_is_an_iter_delay() {
        let mut delay = SpinDelay::new();
        delay.delay_iters(50_000);
    }
}

//! This is an internal module that contains utility functionality used by other modules.

/// Maximum number of polls before giving up on a register. The MCU runs from HSI after
/// reset, so this is generous.
pub(crate) const MAX_ITERS: u32 = 300_000;

/// Poll while `$cond` holds, returning `Err($err)` from the enclosing function if it still
/// holds after `MAX_ITERS` polls. An optional block runs on each poll.
macro_rules! bounded_loop {
    ($cond:expr, $err:expr $(,)?) => {
        $crate::util::bounded_loop!($cond, $err, {})
    };
    ($cond:expr, $err:expr, $body:block $(,)?) => {{
        let mut i: u32 = 0;
        while $cond {
            $body
            i += 1;
            if i >= $crate::util::MAX_ITERS {
                return Err($err);
            }
        }
    }};
}

pub(crate) use bounded_loop;

/// Enables a peripheral's clock on one of the RCC enable registers, and waits until the bit
/// reads back as set. The bit is OR'd in, so other gates on the same register are untouched.
/// The first argument is `ahb1`, `apb1` etc to specify the reg block. The second is something
/// like `dac`, and the third is a `pac::rcc::RegisterBlock`.
#[cfg(feature = "f4")]
macro_rules! rcc_en {
    ($bus:ident, $periph:ident, $rcc:expr) => {
        paste::paste! {
            $rcc.[<$bus enr>]().modify(|_, w| w.[<$periph en>]().set_bit());
            $crate::util::bounded_loop!(
                $rcc.[<$bus enr>]().read().[<$periph en>]().bit_is_clear(),
                $crate::error::Error::RegisterUnchanged
            );
        }
    };
}

#[cfg(feature = "f4")]
pub(crate) use rcc_en;

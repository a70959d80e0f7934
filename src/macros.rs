//! Syntax helpers for sharing peripherals with interrupt handlers, and for NVIC setup.
//!
//! The shared waveform state lives in atomics (see `state`); these macros are for the things
//! that aren't `Copy` and can't be built at compile time, ie the LED pins the handlers drive.

/// Syntax helper for getting global variables of the form `Mutex<RefCell<Option>>>` from an interrupt-free
/// context - eg in interrupt handlers. Returns from the enclosing function or closure if the
/// global hasn't been initialized yet.
///
/// Example: `access_global!(ACTIVITY_LED, led, cs)`
#[macro_export]
macro_rules! access_global {
    ($NAME_GLOBAL:ident, $name_local:ident, $cs:expr) => {
        let mut part1 = $NAME_GLOBAL.borrow($cs).borrow_mut();
        let Some($name_local) = part1.as_mut() else {
            return;
        };
    };
}

/// Syntax helper for setting global variables of the form `Mutex<RefCell<Option>>>`.
/// eg in interrupt handlers. Ideal for non-copy-type variables that can't be initialized
/// immediatiately.
///
/// Example: `make_globals!(
///     (ACTIVITY_LED, Pin),
///     (RATE_LED, Pin),
/// )`
#[macro_export]
macro_rules! make_globals {
    ($(($NAME:ident, $type:ty)),+ $(,)?) => {
        $(
            static $NAME: ::critical_section::Mutex<core::cell::RefCell<Option<$type>>> = ::critical_section::Mutex::new(core::cell::RefCell::new(None));
        )+
    };
}

/// Initialize one or more globals inside a critical section.
///
/// Usage:
/// ```ignore
/// init_globals!(
///     (ACTIVITY_LED, board.activity_led),
///     (RATE_LED, board.rate_led),
/// );
/// ```
#[macro_export]
macro_rules! init_globals {
    ($(($NAME:ident, $val:expr)),* $(,)?) => {
        ::critical_section::with(|cs| {
            $(
                $NAME.borrow(cs).replace(Some($val));
            )*
        });
    };
}

/// Automates Cortex-M NVIC setup. The first value is a `pac::Interrupt`, the second is NVIC
/// priority; lower is higher priority. Priorities are set before any line is unmasked, so the
/// first entry already runs at its configured level. Example use:
/// setup_nvic!([
///     (board.select_button.interrupt(), 1 << 4),
///     (pac::Interrupt::EXTI0, 1 << 4),
/// ], cp.NVIC);
#[macro_export]
macro_rules! setup_nvic {
    (
        [ $( ($int:expr, $prio:expr) ),* $(,)? ],
        $nvic:expr
    ) => {
        unsafe {
            $(
                $nvic.set_priority($int, $prio);
            )*
            $(
                cortex_m::peripheral::NVIC::unmask($int);
            )*
        }
    };
}

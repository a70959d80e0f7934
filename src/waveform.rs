//! The seven waveform generators.
//!
//! Each generator owns a little state, and each call produces exactly one DAC code: the code is
//! written to the holding register, latched with a software trigger, and recorded as the last
//! sample. Generators never wait; the dispatcher paces them.
//!
//! Codes are the raw words written to the DAC. Two variants can step past 4095: the triangle
//! overshoots to 4100 before it turns round, and the falling ramp's unsigned counter wraps below
//! zero. The DAC keeps the low 12 bits of either.

use core::f32::consts::TAU;

use num_traits::Float;

use crate::{
    dac::{DAC_MAX, DacOutput},
    error::Error,
    state::SharedState,
};

/// Number of selectable waveforms.
pub const NUM_WAVEFORMS: u8 = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
#[repr(u8)]
/// Selects the active generator. The order is the order the select button cycles through.
pub enum Waveform {
    #[default]
    Sine = 0,
    Square = 1,
    Triangle = 2,
    RisingSawtooth = 3,
    FallingSawtooth = 4,
    RisingRamp = 5,
    FallingRamp = 6,
}

impl Waveform {
    pub const ALL: [Self; NUM_WAVEFORMS as usize] = [
        Self::Sine,
        Self::Square,
        Self::Triangle,
        Self::RisingSawtooth,
        Self::FallingSawtooth,
        Self::RisingRamp,
        Self::FallingRamp,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The waveform after this one, wrapping from the falling ramp back to the sine.
    pub fn next(self) -> Self {
        Self::ALL[((self.index() + 1) % NUM_WAVEFORMS) as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::RisingSawtooth => "rising sawtooth",
            Self::FallingSawtooth => "falling sawtooth",
            Self::RisingRamp => "rising ramp",
            Self::FallingRamp => "falling ramp",
        }
    }
}

impl TryFrom<u8> for Waveform {
    type Error = Error;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(val as usize)
            .copied()
            .ok_or(Error::InvalidWaveform(val))
    }
}

/// Sine from a running phase angle, in radians.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sine {
    phase: f32,
}

impl Sine {
    /// Phase advance per sample. About 63 samples per period.
    pub const STEP: f32 = 0.1;

    pub fn next_code(&mut self) -> u32 {
        let code = Float::round((Float::sin(self.phase) + 1.) * (DAC_MAX as f32 / 2.)) as u32;

        self.phase += Self::STEP;
        if self.phase > TAU {
            self.phase = 0.;
        }

        code
    }
}

/// Alternates between the rails, starting low.
#[derive(Clone, Copy, Debug, Default)]
pub struct Square {
    high: bool,
}

impl Square {
    pub fn next_code(&mut self) -> u32 {
        let code = if self.high { DAC_MAX } else { 0 };
        self.high = !self.high;
        code
    }
}

/// Climbs and descends in steps of 100. The bound is checked after the step, so the peak
/// sample is 4100.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    val: u32,
    direction: i32,
}

impl Triangle {
    pub const STEP: i32 = 100;

    pub const fn new() -> Self {
        Self {
            val: 0,
            direction: 1,
        }
    }

    pub fn next_code(&mut self) -> u32 {
        self.val = self.val.wrapping_add_signed(self.direction * Self::STEP);
        if self.val >= DAC_MAX || self.val == 0 {
            self.direction = -self.direction;
        }
        self.val
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new()
    }
}

/// Climbs by `step`, returning to 0 once the count reaches full scale. Used for both the
/// rising sawtooth (step 100) and the rising ramp (step 50).
#[derive(Clone, Copy, Debug)]
pub struct Rising {
    val: u32,
    step: u32,
}

impl Rising {
    pub const fn new(step: u32) -> Self {
        Self { val: 0, step }
    }

    pub fn next_code(&mut self) -> u32 {
        self.val += self.step;
        if self.val >= DAC_MAX {
            self.val = 0;
        }
        self.val
    }
}

/// Falls by 100, jumping back to full scale when the next step would pass below zero.
#[derive(Clone, Copy, Debug)]
pub struct FallingSawtooth {
    val: u32,
}

impl FallingSawtooth {
    pub const STEP: u32 = 100;

    pub const fn new() -> Self {
        Self { val: DAC_MAX }
    }

    pub fn next_code(&mut self) -> u32 {
        if self.val >= Self::STEP {
            self.val -= Self::STEP;
        } else {
            self.val = DAC_MAX;
        }
        self.val
    }
}

impl Default for FallingSawtooth {
    fn default() -> Self {
        Self::new()
    }
}

/// Falls by 50 on an unsigned counter. The reset to full scale only fires on an exact zero,
/// which an odd start and an even step never hit: below 50 the counter wraps, and the DAC sees
/// the low 12 bits (45 is followed by 4091).
#[derive(Clone, Copy, Debug)]
pub struct FallingRamp {
    val: u32,
}

impl FallingRamp {
    pub const STEP: u32 = 50;

    pub const fn new() -> Self {
        Self { val: DAC_MAX }
    }

    pub fn next_code(&mut self) -> u32 {
        self.val = self.val.wrapping_sub(Self::STEP);
        if self.val == 0 {
            self.val = DAC_MAX;
        }
        self.val
    }
}

impl Default for FallingRamp {
    fn default() -> Self {
        Self::new()
    }
}

/// One generator, tagged by waveform, carrying its own state.
#[derive(Clone, Copy, Debug)]
pub enum Generator {
    Sine(Sine),
    Square(Square),
    Triangle(Triangle),
    RisingSawtooth(Rising),
    FallingSawtooth(FallingSawtooth),
    RisingRamp(Rising),
    FallingRamp(FallingRamp),
}

impl Generator {
    /// A generator in its reset state.
    pub const fn new(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => Self::Sine(Sine { phase: 0. }),
            Waveform::Square => Self::Square(Square { high: false }),
            Waveform::Triangle => Self::Triangle(Triangle::new()),
            Waveform::RisingSawtooth => Self::RisingSawtooth(Rising::new(100)),
            Waveform::FallingSawtooth => Self::FallingSawtooth(FallingSawtooth::new()),
            Waveform::RisingRamp => Self::RisingRamp(Rising::new(50)),
            Waveform::FallingRamp => Self::FallingRamp(FallingRamp::new()),
        }
    }

    pub const fn waveform(&self) -> Waveform {
        match self {
            Self::Sine(_) => Waveform::Sine,
            Self::Square(_) => Waveform::Square,
            Self::Triangle(_) => Waveform::Triangle,
            Self::RisingSawtooth(_) => Waveform::RisingSawtooth,
            Self::FallingSawtooth(_) => Waveform::FallingSawtooth,
            Self::RisingRamp(_) => Waveform::RisingRamp,
            Self::FallingRamp(_) => Waveform::FallingRamp,
        }
    }

    /// Advance the state and return the next code, without touching the DAC.
    pub fn next_code(&mut self) -> u32 {
        match self {
            Self::Sine(g) => g.next_code(),
            Self::Square(g) => g.next_code(),
            Self::Triangle(g) => g.next_code(),
            Self::RisingSawtooth(g) | Self::RisingRamp(g) => g.next_code(),
            Self::FallingSawtooth(g) => g.next_code(),
            Self::FallingRamp(g) => g.next_code(),
        }
    }

    /// Produce one sample: one holding-register write, one software trigger, and the code
    /// recorded as the last sample.
    pub fn emit<D: DacOutput>(&mut self, dac: &mut D, state: &SharedState) -> u32 {
        let code = self.next_code();
        dac.set_value(code);
        dac.trigger();
        state.record_sample(code);
        code
    }
}

/// All seven generators. Each keeps its state while another is selected, so switching back
/// resumes where it left off.
#[derive(Clone, Debug)]
pub struct GeneratorBank {
    generators: [Generator; NUM_WAVEFORMS as usize],
}

impl GeneratorBank {
    pub const fn new() -> Self {
        Self {
            generators: [
                Generator::new(Waveform::Sine),
                Generator::new(Waveform::Square),
                Generator::new(Waveform::Triangle),
                Generator::new(Waveform::RisingSawtooth),
                Generator::new(Waveform::FallingSawtooth),
                Generator::new(Waveform::RisingRamp),
                Generator::new(Waveform::FallingRamp),
            ],
        }
    }

    pub fn get_mut(&mut self, waveform: Waveform) -> &mut Generator {
        &mut self.generators[waveform.index() as usize]
    }

    /// Emit one sample from the selected generator.
    pub fn emit<D: DacOutput>(&mut self, waveform: Waveform, dac: &mut D, state: &SharedState) -> u32 {
        self.get_mut(waveform).emit(dac, state)
    }
}

impl Default for GeneratorBank {
    fn default() -> Self {
        Self::new()
    }
}

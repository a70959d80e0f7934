//! Common error definitions.

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "f4", derive(defmt::Format))]
pub enum Error {
    /// Occurs when an expected change of a register does happen in time.
    ///
    /// This is returned when a bounded loop exceeds its alotted iteration count; eg a
    /// peripheral clock gate that doesn't read back as open.
    RegisterUnchanged,
    /// A waveform index outside of `0..7`.
    InvalidWaveform(u8),
    /// Pin assignments that can't work together; see `Config::is_valid`.
    InvalidConfig,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RegisterUnchanged => write!(f, "register did not change in time"),
            Self::InvalidWaveform(i) => write!(f, "no waveform with index {i}"),
            Self::InvalidConfig => write!(f, "conflicting pin assignments"),
        }
    }
}

//! Odometer value in its stored representation.

use serde::{Serialize, Serializer};

use crate::error::{CodecError, CodecResult};

/// Stored values carry one fractional digit: physical value × 10.
pub const ODOMETER_SCALE: i64 = 10;

/// An odometer reading as stored in the dump (tenths of a unit, `i32`).
///
/// Conversions never round: a stored value that is not a multiple of 10
/// keeps its fractional digit, and scaling up is exact integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Odometer(i32);

impl Odometer {
    /// Scale a whole physical value by 10, failing if the result does not fit
    /// the 32-bit signed field.
    pub fn from_units(units: i64) -> CodecResult<Self> {
        units
            .checked_mul(ODOMETER_SCALE)
            .and_then(|raw| i32::try_from(raw).ok())
            .map(Self)
            .ok_or(CodecError::ValueOutOfRange { value: units })
    }

    /// Wrap a value exactly as it is stored in the dump.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Physical value (stored / 10).
    pub fn units(self) -> f64 {
        f64::from(self.0) / ODOMETER_SCALE as f64
    }

    /// `true` when the stored value has no fractional digit.
    pub const fn is_whole(self) -> bool {
        self.0 % ODOMETER_SCALE as i32 == 0
    }

    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl std::fmt::Display for Odometer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / ODOMETER_SCALE as i32)
        } else {
            write!(f, "{}", self.units())
        }
    }
}

impl Serialize for Odometer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.units())
    }
}

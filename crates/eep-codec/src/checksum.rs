//! Odometer checksum: a shift-and-add sum over the scaled odometer and two
//! seed bytes taken from the dump.
//!
//! The byte sequence is `[odo0, odo1, odo2, odo3, byte1, byte2, 0x00, 0x00]`
//! with the odometer (×10) in little-endian order. Each byte contributes
//! `b + (b >> 1)` and the total is reduced to its low 8 bits. Real ECU dumps
//! only validate if this is reproduced exactly.

use serde::{Deserialize, Serialize};

use crate::dump::RawDump;
use crate::layout::Field;
use crate::odometer::{ODOMETER_SCALE, Odometer};

/// The two auxiliary bytes at `0x14` that feed every odometer checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChecksumSeed {
    pub byte1: u8,
    pub byte2: u8,
}

impl ChecksumSeed {
    pub const fn new(byte1: u8, byte2: u8) -> Self {
        Self { byte1, byte2 }
    }

    /// Read the seed bytes from a loaded dump.
    pub fn from_dump(dump: &RawDump) -> Self {
        let bytes = dump.field(Field::ChecksumSeed);
        Self::new(bytes[0], bytes[1])
    }
}

impl std::fmt::Display for ChecksumSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X} {:02X}", self.byte1, self.byte2)
    }
}

/// Checksum for a whole physical odometer value.
///
/// Total over `i64`: the ×10 scaling and the truncation to 32 bits wrap
/// instead of failing. Range checks belong to callers that write the value.
pub fn compute_checksum(odometer: i64, byte1: u8, byte2: u8) -> u8 {
    let adjusted = odometer.wrapping_mul(ODOMETER_SCALE) as i32;
    shift_add_sum(adjusted.to_le_bytes(), byte1, byte2)
}

/// Checksum for an odometer already in its stored representation.
pub fn checksum_for(odometer: Odometer, seed: ChecksumSeed) -> u8 {
    shift_add_sum(odometer.to_le_bytes(), seed.byte1, seed.byte2)
}

/// Compare a stored checksum byte against the recomputed one.
///
/// Byte values are compared directly, so hex formatting width or case can
/// never cause a false mismatch.
pub fn validate_checksum(odometer: Odometer, stored: u8, seed: ChecksumSeed) -> bool {
    let calculated = checksum_for(odometer, seed);
    if calculated != stored {
        tracing::debug!(
            calculated = %format_checksum(calculated),
            stored = %format_checksum(stored),
            "odometer checksum mismatch"
        );
    }
    calculated == stored
}

/// Two-digit uppercase hex, as shown next to the odometer.
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

fn shift_add_sum(odometer_le: [u8; 4], byte1: u8, byte2: u8) -> u8 {
    let [o0, o1, o2, o3] = odometer_le;
    let sum: u32 = [o0, o1, o2, o3, byte1, byte2, 0x00, 0x00]
        .into_iter()
        .map(|b| u32::from(b) + u32::from(b >> 1))
        .sum();
    (sum & 0xFF) as u8
}

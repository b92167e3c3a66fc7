//! Fixed field layout of a 24C16 odometer dump.
//!
//! Every field lives at a compile-time offset inside the 2048-byte image.
//! Overlap between fields is not checked; the layout below does not have any.

use std::ops::Range;

use serde::Serialize;

/// Size of a 24C16 EEPROM image in bytes.
pub const DUMP_SIZE: usize = 2048;

// ── Offsets ─────────────────────────────────────────────────────

/// Primary odometer, little-endian `i32` holding tenths.
pub const MILEAGE_OFFSET: usize = 0x10;
/// Two auxiliary bytes feeding the odometer checksum.
pub const CHECKSUM_SEED_OFFSET: usize = 0x14;
/// Checksum of the primary odometer.
pub const MILEAGE_CHECKSUM_OFFSET: usize = 0x19;
/// Redundant odometer copy.
pub const MILEAGE2_OFFSET: usize = 0x20;
/// Checksum of the redundant odometer copy.
pub const MILEAGE2_CHECKSUM_OFFSET: usize = 0x29;
pub const IMMO_BYPASS1_OFFSET: usize = 0x100;
pub const IMMO_BYPASS2_OFFSET: usize = 0x110;
pub const KEY_CODE1_OFFSET: usize = 0x120;
pub const KEY_CODE2_OFFSET: usize = 0x130;

// ── Widths ──────────────────────────────────────────────────────

pub const MILEAGE_WIDTH: usize = 4;
pub const CHECKSUM_SEED_WIDTH: usize = 2;
pub const IMMO_CODE_WIDTH: usize = 5;
pub const KEY_CODE_WIDTH: usize = 10;

/// A named region of the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Mileage,
    ChecksumSeed,
    MileageChecksum,
    Mileage2,
    Mileage2Checksum,
    ImmoBypass1,
    ImmoBypass2,
    KeyCode1,
    KeyCode2,
}

impl Field {
    /// Every field, in address order.
    pub const ALL: [Field; 9] = [
        Field::Mileage,
        Field::ChecksumSeed,
        Field::MileageChecksum,
        Field::Mileage2,
        Field::Mileage2Checksum,
        Field::ImmoBypass1,
        Field::ImmoBypass2,
        Field::KeyCode1,
        Field::KeyCode2,
    ];

    pub const fn offset(self) -> usize {
        match self {
            Field::Mileage => MILEAGE_OFFSET,
            Field::ChecksumSeed => CHECKSUM_SEED_OFFSET,
            Field::MileageChecksum => MILEAGE_CHECKSUM_OFFSET,
            Field::Mileage2 => MILEAGE2_OFFSET,
            Field::Mileage2Checksum => MILEAGE2_CHECKSUM_OFFSET,
            Field::ImmoBypass1 => IMMO_BYPASS1_OFFSET,
            Field::ImmoBypass2 => IMMO_BYPASS2_OFFSET,
            Field::KeyCode1 => KEY_CODE1_OFFSET,
            Field::KeyCode2 => KEY_CODE2_OFFSET,
        }
    }

    pub const fn width(self) -> usize {
        match self {
            Field::Mileage | Field::Mileage2 => MILEAGE_WIDTH,
            Field::ChecksumSeed => CHECKSUM_SEED_WIDTH,
            Field::MileageChecksum | Field::Mileage2Checksum => 1,
            Field::ImmoBypass1 | Field::ImmoBypass2 => IMMO_CODE_WIDTH,
            Field::KeyCode1 | Field::KeyCode2 => KEY_CODE_WIDTH,
        }
    }

    /// Byte range of the field inside the dump.
    pub const fn range(self) -> Range<usize> {
        self.offset()..self.offset() + self.width()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Field::Mileage => "mileage",
            Field::ChecksumSeed => "checksum_seed",
            Field::MileageChecksum => "mileage_checksum",
            Field::Mileage2 => "mileage2",
            Field::Mileage2Checksum => "mileage2_checksum",
            Field::ImmoBypass1 => "immo_bypass_1",
            Field::ImmoBypass2 => "immo_bypass_2",
            Field::KeyCode1 => "key_code_1",
            Field::KeyCode2 => "key_code_2",
        }
    }

    /// Fields rewritten when the odometer is patched.
    pub const fn is_odometer_field(self) -> bool {
        matches!(
            self,
            Field::Mileage | Field::MileageChecksum | Field::Mileage2 | Field::Mileage2Checksum
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ 0x{:03X}", self.name(), self.offset())
    }
}

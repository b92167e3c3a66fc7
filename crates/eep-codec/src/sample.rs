//! Deterministic sample dumps for tests and mock sources.

use crate::checksum::ChecksumSeed;
use crate::dump::RawDump;
use crate::layout::{DUMP_SIZE, Field};
use crate::odometer::Odometer;

/// Odometer of [`sample_dump`], in whole units.
pub const SAMPLE_ODOMETER: i64 = 154_321;

/// Seed bytes of [`sample_dump`].
pub const SAMPLE_SEED: ChecksumSeed = ChecksumSeed::new(0x5A, 0x01);

pub const SAMPLE_IMMO_1: [u8; 5] = [1, 2, 3, 4, 5];
pub const SAMPLE_IMMO_2: [u8; 5] = [9, 8, 7, 6, 5];
pub const SAMPLE_KEY_1: [u8; 10] = [0x0A, 0xFF, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80];
pub const SAMPLE_KEY_2: [u8; 10] = [0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05];

/// A consistent dump: both odometer copies at [`SAMPLE_ODOMETER`] with valid
/// checksums, sample immobilizer and key codes, and a non-zero filler
/// pattern everywhere else.
pub fn sample_dump() -> RawDump {
    let odometer = Odometer::from_raw((SAMPLE_ODOMETER * 10) as i32);
    dump_with(odometer, SAMPLE_SEED)
}

/// Same layout as [`sample_dump`] with a chosen odometer and seed.
pub fn dump_with(odometer: Odometer, seed: ChecksumSeed) -> RawDump {
    let mut bytes = filler();
    put(&mut bytes, Field::ChecksumSeed, &[seed.byte1, seed.byte2]);
    put(&mut bytes, Field::ImmoBypass1, &SAMPLE_IMMO_1);
    put(&mut bytes, Field::ImmoBypass2, &SAMPLE_IMMO_2);
    put(&mut bytes, Field::KeyCode1, &SAMPLE_KEY_1);
    put(&mut bytes, Field::KeyCode2, &SAMPLE_KEY_2);

    RawDump::from_array(bytes).with_odometer(odometer, seed)
}

fn filler() -> [u8; DUMP_SIZE] {
    std::array::from_fn(|i| (i * 7 % 251) as u8)
}

fn put(bytes: &mut [u8], field: Field, value: &[u8]) {
    bytes[field.range()].copy_from_slice(value);
}

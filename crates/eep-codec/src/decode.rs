//! Read projection of a dump: every layout field in display form.

use serde::Serialize;

use crate::checksum::{ChecksumSeed, checksum_for, format_checksum};
use crate::dump::RawDump;
use crate::error::CodecResult;
use crate::layout::Field;
use crate::odometer::Odometer;

/// Human-readable view of a dump. Recomputed in full on every load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedView {
    /// Primary odometer (physical value, stored / 10).
    pub odometer: Odometer,
    /// Checksum byte stored for the primary odometer.
    pub odometer_checksum: u8,
    /// Same byte as two-digit uppercase hex.
    pub odometer_checksum_hex: String,
    /// Redundant odometer copy.
    pub odometer2: Odometer,
    pub odometer2_checksum: u8,
    /// Seed bytes for every checksum computed against this dump.
    pub seed: ChecksumSeed,
    /// Checksum recomputed from `odometer` and `seed`.
    pub calculated_checksum: u8,
    /// Whether the stored checksum matches. Informational only.
    pub checksum_valid: bool,
    pub immo_bypass_1: String,
    pub immo_bypass_2: String,
    pub key_code_1: String,
    pub key_code_2: String,
}

impl DecodedView {
    pub fn calculated_checksum_hex(&self) -> String {
        format_checksum(self.calculated_checksum)
    }

    /// `true` when both odometer copies and their checksums agree.
    pub fn copies_agree(&self) -> bool {
        self.odometer == self.odometer2 && self.odometer_checksum == self.odometer2_checksum
    }
}

/// Decode a raw byte buffer. Fails on any length other than 2048.
pub fn decode(bytes: &[u8]) -> CodecResult<DecodedView> {
    let dump = RawDump::from_bytes(bytes)?;
    Ok(decode_dump(&dump))
}

/// Decode an already size-checked dump.
pub fn decode_dump(dump: &RawDump) -> DecodedView {
    let odometer = dump.odometer(Field::Mileage);
    let odometer_checksum = dump.byte(Field::MileageChecksum);
    let seed = ChecksumSeed::from_dump(dump);
    let calculated_checksum = checksum_for(odometer, seed);

    let view = DecodedView {
        odometer,
        odometer_checksum,
        odometer_checksum_hex: format_checksum(odometer_checksum),
        odometer2: dump.odometer(Field::Mileage2),
        odometer2_checksum: dump.byte(Field::Mileage2Checksum),
        seed,
        calculated_checksum,
        checksum_valid: calculated_checksum == odometer_checksum,
        immo_bypass_1: format_immo_code(dump.field(Field::ImmoBypass1)),
        immo_bypass_2: format_immo_code(dump.field(Field::ImmoBypass2)),
        key_code_1: format_key_code(dump.field(Field::KeyCode1)),
        key_code_2: format_key_code(dump.field(Field::KeyCode2)),
    };

    tracing::debug!(
        odometer = %view.odometer,
        stored = %view.odometer_checksum_hex,
        calculated = %view.calculated_checksum_hex(),
        seed = %view.seed,
        "dump decoded"
    );
    view
}

/// Immobilizer bypass code: each byte's decimal value, concatenated.
///
/// Bytes above 9 produce more than one digit (`[12, 3]` -> `"123"`).
pub fn format_immo_code(bytes: &[u8]) -> String {
    bytes.iter().map(u8::to_string).collect()
}

/// Transponder key code: two-digit uppercase hex per byte, space-separated.
pub fn format_key_code(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

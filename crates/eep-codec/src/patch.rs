//! Building a modified dump with a new odometer value.

use crate::checksum::ChecksumSeed;
use crate::dump::RawDump;
use crate::error::{CodecError, CodecResult};
use crate::odometer::Odometer;

/// Produce a copy of `bytes` with both odometer copies set to `new_odometer`
/// (whole units) and both checksum bytes recomputed with `seed`.
///
/// Inputs are checked in order (size, seed, range) before any byte is
/// written. The input slice is never modified.
pub fn create_modified_dump(
    bytes: &[u8],
    new_odometer: i64,
    seed: Option<ChecksumSeed>,
) -> CodecResult<RawDump> {
    let source = RawDump::from_bytes(bytes)?;
    let seed = seed.ok_or(CodecError::MissingChecksumSeed)?;
    let odometer = Odometer::from_units(new_odometer)?;
    Ok(source.with_odometer(odometer, seed))
}

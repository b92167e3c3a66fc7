//! Load-then-edit workflow with the checksum seed held as an explicit value.
//!
//! Loading a dump replaces both the pristine copy and the seed, so an edit
//! can never be checksummed with bytes left over from an earlier dump.

use crate::checksum::{ChecksumSeed, checksum_for};
use crate::decode::{DecodedView, decode_dump};
use crate::dump::RawDump;
use crate::error::{CodecError, CodecResult};
use crate::odometer::Odometer;

#[derive(Debug)]
struct Loaded {
    original: RawDump,
    view: DecodedView,
}

/// A host's view of one loaded dump.
#[derive(Debug, Default)]
pub struct DumpSession {
    loaded: Option<Loaded>,
}

impl DumpSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and make it the current dump.
    ///
    /// On failure the previous dump is dropped as well.
    pub fn load(&mut self, bytes: &[u8]) -> CodecResult<&DecodedView> {
        self.loaded = None;
        let original = RawDump::from_bytes(bytes)?;
        let view = decode_dump(&original);
        if !view.checksum_valid {
            tracing::warn!(
                stored = %view.odometer_checksum_hex,
                calculated = %view.calculated_checksum_hex(),
                "loaded dump has a checksum mismatch"
            );
        }
        Ok(&self.loaded.insert(Loaded { original, view }).view)
    }

    pub fn clear(&mut self) {
        self.loaded = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn decoded(&self) -> Option<&DecodedView> {
        self.loaded.as_ref().map(|l| &l.view)
    }

    pub fn seed(&self) -> Option<ChecksumSeed> {
        self.loaded.as_ref().map(|l| l.view.seed)
    }

    /// The dump exactly as loaded.
    pub fn original(&self) -> Option<&RawDump> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    /// Checksum a new odometer value would be written with.
    pub fn preview_checksum(&self, new_odometer: i64) -> CodecResult<u8> {
        let seed = self.seed().ok_or(CodecError::MissingChecksumSeed)?;
        let odometer = Odometer::from_units(new_odometer)?;
        Ok(checksum_for(odometer, seed))
    }

    /// Modified copy of the loaded dump. Always starts from the pristine
    /// bytes, so repeated calls never compound.
    pub fn patch(&self, new_odometer: i64) -> CodecResult<RawDump> {
        let loaded = self.loaded.as_ref().ok_or(CodecError::MissingChecksumSeed)?;
        let odometer = Odometer::from_units(new_odometer)?;
        Ok(loaded.original.with_odometer(odometer, loaded.view.seed))
    }
}

//! Owned, size-checked 2048-byte dump image.

use crate::checksum::{ChecksumSeed, checksum_for, format_checksum};
use crate::error::{CodecError, CodecResult};
use crate::layout::{DUMP_SIZE, Field};
use crate::odometer::Odometer;

/// A complete 24C16 image. Can only be built from exactly [`DUMP_SIZE`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct RawDump {
    bytes: Box<[u8; DUMP_SIZE]>,
}

impl RawDump {
    /// Copy `bytes` into a new dump, rejecting any length other than 2048.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let array: [u8; DUMP_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CodecError::InvalidDumpSize {
                    expected: DUMP_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self::from_array(array))
    }

    pub fn from_array(bytes: [u8; DUMP_SIZE]) -> Self {
        Self {
            bytes: Box::new(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Raw bytes of a layout field.
    pub fn field(&self, field: Field) -> &[u8] {
        &self.bytes[field.range()]
    }

    /// First byte of a layout field.
    pub fn byte(&self, field: Field) -> u8 {
        self.bytes[field.offset()]
    }

    /// Odometer stored at `field` (little-endian `i32`).
    pub fn odometer(&self, field: Field) -> Odometer {
        let mut le = [0u8; 4];
        le.copy_from_slice(&self.bytes[field.offset()..field.offset() + 4]);
        Odometer::from_raw(i32::from_le_bytes(le))
    }

    /// Copy of this dump with both odometer copies set to `odometer` and both
    /// checksum bytes recomputed from `seed`. Every other byte is untouched.
    pub fn with_odometer(&self, odometer: Odometer, seed: ChecksumSeed) -> RawDump {
        let checksum = checksum_for(odometer, seed);
        tracing::debug!(
            odometer = %odometer,
            checksum = %format_checksum(checksum),
            "patching odometer fields"
        );

        let mut patched = self.clone();
        patched.write(Field::Mileage, &odometer.to_le_bytes());
        patched.write(Field::Mileage2, &odometer.to_le_bytes());
        patched.write(Field::MileageChecksum, &[checksum]);
        patched.write(Field::Mileage2Checksum, &[checksum]);
        patched
    }

    /// Offsets of every byte that differs from `other`.
    pub fn diff(&self, other: &RawDump) -> Vec<usize> {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }

    fn write(&mut self, field: Field, value: &[u8]) {
        self.bytes[field.range()].copy_from_slice(value);
    }
}

impl TryFrom<Vec<u8>> for RawDump {
    type Error = CodecError;

    fn try_from(bytes: Vec<u8>) -> CodecResult<Self> {
        Self::from_bytes(&bytes)
    }
}

impl TryFrom<&[u8]> for RawDump {
    type Error = CodecError;

    fn try_from(bytes: &[u8]) -> CodecResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for RawDump {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for RawDump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawDump")
            .field("len", &DUMP_SIZE)
            .field("mileage", &self.odometer(Field::Mileage))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_sizes() {
        for len in [0, 2047, 2049, 4096] {
            let err = RawDump::from_bytes(&vec![0u8; len]).unwrap_err();
            assert_eq!(
                err,
                CodecError::InvalidDumpSize {
                    expected: DUMP_SIZE,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn accepts_exact_size() {
        let dump = RawDump::try_from(vec![0xAA; DUMP_SIZE]).unwrap();
        assert_eq!(dump.as_bytes().len(), DUMP_SIZE);
        assert_eq!(dump.byte(Field::KeyCode2), 0xAA);
    }

    #[test]
    fn reads_little_endian_odometer() {
        let mut bytes = vec![0u8; DUMP_SIZE];
        bytes[0x10..0x14].copy_from_slice(&[0x3A, 0xE2, 0x01, 0x00]);
        let dump = RawDump::from_bytes(&bytes).unwrap();
        assert_eq!(dump.odometer(Field::Mileage).raw(), 123_450);
    }

    #[test]
    fn reads_negative_odometer() {
        let mut bytes = vec![0u8; DUMP_SIZE];
        bytes[0x20..0x24].copy_from_slice(&(-50i32).to_le_bytes());
        let dump = RawDump::from_bytes(&bytes).unwrap();
        assert_eq!(dump.odometer(Field::Mileage2).raw(), -50);
    }

    #[test]
    fn with_odometer_leaves_source_untouched() {
        let original = RawDump::from_bytes(&[0x11; DUMP_SIZE]).unwrap();
        let seed = ChecksumSeed::new(0x5A, 0x01);
        let patched = original.with_odometer(Odometer::from_raw(123_450), seed);

        assert_eq!(original.as_bytes(), &[0x11; DUMP_SIZE][..]);
        assert_eq!(patched.field(Field::Mileage), &[0x3A, 0xE2, 0x01, 0x00]);
        assert_eq!(patched.field(Field::Mileage2), &[0x3A, 0xE2, 0x01, 0x00]);
        assert_eq!(patched.byte(Field::MileageChecksum), 0x33);
        assert_eq!(patched.byte(Field::Mileage2Checksum), 0x33);
    }

    #[test]
    fn with_odometer_only_touches_odometer_fields() {
        let original = RawDump::from_bytes(&[0x11; DUMP_SIZE]).unwrap();
        let patched =
            original.with_odometer(Odometer::from_raw(0x2222_2222), ChecksumSeed::new(1, 2));
        for offset in original.diff(&patched) {
            assert!(
                Field::ALL
                    .iter()
                    .any(|f| f.is_odometer_field() && f.range().contains(&offset)),
                "unexpected change at 0x{offset:03X}"
            );
        }
    }

    #[test]
    fn debug_does_not_dump_bytes() {
        let dump = RawDump::from_bytes(&[0u8; DUMP_SIZE]).unwrap();
        let debug = format!("{dump:?}");
        assert!(debug.contains("len: 2048"));
        assert!(debug.len() < 100);
    }
}

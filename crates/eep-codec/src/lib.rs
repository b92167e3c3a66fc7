//! Codec for 24C16 odometer EEPROM dumps.
//!
//! Decodes the fixed-layout 2048-byte image (odometer, checksum seed,
//! immobilizer bypass codes, transponder key codes), validates the odometer
//! checksum, and builds patched copies with a new odometer value. Pure and
//! synchronous: callers supply the bytes and decide where results go.

pub mod checksum;
pub mod decode;
pub mod dump;
pub mod error;
pub mod layout;
pub mod odometer;
pub mod patch;
pub mod sample;
pub mod session;

pub use checksum::{ChecksumSeed, checksum_for, compute_checksum, format_checksum, validate_checksum};
pub use decode::{DecodedView, decode, decode_dump, format_immo_code, format_key_code};
pub use dump::RawDump;
pub use error::{CodecError, CodecResult};
pub use layout::{DUMP_SIZE, Field};
pub use odometer::Odometer;
pub use patch::create_modified_dump;
pub use session::DumpSession;

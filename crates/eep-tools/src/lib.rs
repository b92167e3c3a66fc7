//! Host-side tools for 24C16 odometer dumps.
//!
//! Provides a `DumpSource` abstraction for reading and writing images
//! (filesystem or in-memory mock), the host's input checks, and 4 tools:
//! read_dump, verify_checksum, preview_checksum, patch_odometer.

pub mod error;
pub mod mock;
pub mod source;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use error::{ToolError, ToolOutcome};
pub use mock::MockDumpSource;
pub use source::{DumpSource, FileDumpSource, load_dump, validate_dump_path};
pub use types::{DumpTool, ToolResult};

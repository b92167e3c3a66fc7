//! Dump source abstraction: read and write images from files, mocks, or
//! other backends.

use std::path::Path;

use async_trait::async_trait;
use eep_codec::RawDump;

use crate::error::{ToolError, ToolOutcome};

/// Where dump bytes come from and where patched dumps go.
///
/// The codec only ever sees complete byte buffers; all suspension happens
/// behind this trait.
#[async_trait]
pub trait DumpSource: Send + Sync {
    /// Read the whole file at `path`.
    async fn read_dump(&self, path: &str) -> ToolOutcome<Vec<u8>>;

    /// Create or replace the file at `path`.
    async fn write_dump(&self, path: &str, bytes: &[u8]) -> ToolOutcome<()>;

    /// Check if `path` exists.
    async fn exists(&self, path: &str) -> bool;

    /// Whether `a` and `b` name the same dump. Defaults to string equality.
    async fn same_file(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

/// Reads and writes dumps on the local filesystem.
pub struct FileDumpSource;

#[async_trait]
impl DumpSource for FileDumpSource {
    async fn read_dump(&self, path: &str) -> ToolOutcome<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound(path.to_string())
            } else {
                ToolError::Io(format!("{path}: {e}"))
            }
        })
    }

    async fn write_dump(&self, path: &str, bytes: &[u8]) -> ToolOutcome<()> {
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| ToolError::Io(format!("{path}: {e}")))
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Compares canonical paths. A path that cannot be resolved (an output
    /// not created yet) falls back to string equality.
    async fn same_file(&self, a: &str, b: &str) -> bool {
        match (
            tokio::fs::canonicalize(a).await,
            tokio::fs::canonicalize(b).await,
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

/// Reject paths without a `.bin` extension (case-insensitive) when
/// `require_bin` is set.
pub fn validate_dump_path(path: &str, require_bin: bool) -> ToolOutcome<()> {
    if !require_bin {
        return Ok(());
    }
    let is_bin = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"));
    if is_bin {
        Ok(())
    } else {
        Err(ToolError::InvalidExtension(path.to_string()))
    }
}

/// Validate the path, read the file and check its size.
pub async fn load_dump(
    source: &dyn DumpSource,
    path: &str,
    require_bin: bool,
) -> ToolOutcome<RawDump> {
    validate_dump_path(path, require_bin)?;
    let bytes = source.read_dump(path).await?;
    let dump = RawDump::from_bytes(&bytes).inspect_err(|e| {
        tracing::warn!(path, error = %e, "rejected dump");
    })?;
    tracing::debug!(path, "dump loaded");
    Ok(dump)
}

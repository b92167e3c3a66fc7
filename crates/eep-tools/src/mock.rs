//! In-memory dump source for testing. Serves pre-loaded images and records
//! every write.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{ToolError, ToolOutcome};
use crate::source::DumpSource;

/// Path under which [`MockDumpSource::with_sample_dump`] stores the sample.
pub const SAMPLE_PATH: &str = "/dumps/sample.bin";

/// A mock dump source backed by a map of path → bytes.
pub struct MockDumpSource {
    files: Mutex<HashMap<String, Vec<u8>>>,
    /// Paths passed to `write_dump`, in call order.
    writes: Mutex<Vec<String>>,
}

impl MockDumpSource {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock holding `eep_codec::sample::sample_dump()` at [`SAMPLE_PATH`].
    pub fn with_sample_dump() -> Self {
        let m = Self::new();
        m.add_file(SAMPLE_PATH, eep_codec::sample::sample_dump().into_vec());
        m
    }

    /// Add or replace a file.
    pub fn add_file(&self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.into(), bytes);
    }

    /// Current contents of a file, if present.
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// Paths written so far.
    pub fn written_paths(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Default for MockDumpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DumpSource for MockDumpSource {
    async fn read_dump(&self, path: &str) -> ToolOutcome<Vec<u8>> {
        self.file(path)
            .ok_or_else(|| ToolError::NotFound(path.to_string()))
    }

    async fn write_dump(&self, path: &str, bytes: &[u8]) -> ToolOutcome<()> {
        self.writes.lock().unwrap().push(path.to_string());
        self.add_file(path, bytes.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

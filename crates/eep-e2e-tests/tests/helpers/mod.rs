//! Shared test harness for E2E integration tests.
//!
//! Drives the CLI library against real files in a unique temp directory,
//! exercising the same code paths as the `eep` binary.

#![allow(dead_code)]

use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;

use eep_cli::app;
use eep_cli::cli::Cli;
use eep_cli::config::CliConfig;
use eep_cli::registry::ToolRegistry;
use eep_tools::FileDumpSource;

/// Temp directory with dump files, removed on drop.
pub struct TestHarness {
    pub dir: PathBuf,
    pub registry: ToolRegistry,
    pub config: CliConfig,
}

/// Captured result of one CLI invocation.
pub struct CliRun {
    pub code: u8,
    pub stdout: String,
}

impl CliRun {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("eep-e2e-{}", Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        Self {
            dir,
            registry: ToolRegistry::with_defaults(),
            config: CliConfig::default(),
        }
    }

    /// Harness with the sample dump written as `sample.bin`.
    pub fn with_sample_dump() -> Self {
        let h = Self::new();
        h.write("sample.bin", eep_codec::sample::sample_dump().as_bytes());
        h
    }

    pub fn path(&self, name: &str) -> String {
        self.dir.join(name).to_str().unwrap().to_string()
    }

    pub fn write(&self, name: &str, bytes: &[u8]) -> String {
        let path = self.path(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.path(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    /// File names currently in the temp directory, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Run the CLI with `args` (without the program name).
    pub async fn run(&self, args: &[&str]) -> CliRun {
        let cli = Cli::try_parse_from(std::iter::once("eep").chain(args.iter().copied())).unwrap();
        let mut out = Vec::new();
        let code = app::run(&cli, &self.config, &self.registry, &FileDumpSource, &mut out)
            .await
            .unwrap();
        CliRun {
            code,
            stdout: String::from_utf8(out).unwrap(),
        }
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

//! eep: library crate for the dump command line host.
//!
//! Re-exports all modules so external crates (e.g. `eep-e2e-tests`) can
//! drive the same code paths as the binary.

pub mod app;
pub mod cli;
pub mod config;
pub mod registry;

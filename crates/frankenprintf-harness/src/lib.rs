//! Conformance testing harness for frankenprintf.
//!
//! This crate provides:
//! - Fixtures: JSON case sets pairing templates and typed arguments with
//!   expected output or expected error
//! - Runner + verification: render every case through the engine and diff it
//! - Host oracle: render the same case through the host C library's
//!   `snprintf` and flag parity drift
//! - Capture: record host output for a built-in grid as a fixture set
//! - Report generation: markdown + JSON conformance reports
//! - Structured logging: JSONL run logs and an artifact index with SHA-256
//!   digests

#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod diff;
pub mod error;
pub mod fixtures;
#[allow(unsafe_code)]
pub mod host_oracle;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use config::ParityMode;
pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet, Parity};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};

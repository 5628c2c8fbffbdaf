//! Output comparison and verification.

use serde::{Deserialize, Serialize};

/// Result of verifying a single fixture case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Name of the test case.
    pub case_name: String,
    /// Fixture family the case came from.
    pub family: String,
    /// C standard / printf(3) reference.
    pub reference: String,
    /// Template under test.
    pub template: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Expected output (or `error:<code>`).
    pub expected: String,
    /// Actual output from the engine.
    pub actual: String,
    /// Host `snprintf` output, when the case was oracle-checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Diff or parity note if the case failed.
    pub diff: Option<String>,
    /// Render latency in nanoseconds.
    #[serde(default)]
    pub latency_ns: u64,
}

/// Aggregate verification summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    /// Total cases run.
    pub total: usize,
    /// Cases passed.
    pub passed: usize,
    /// Cases failed.
    pub failed: usize,
    /// Cases also checked against the host libc.
    pub host_checked: usize,
    /// Individual results.
    pub results: Vec<VerificationResult>,
}

impl VerificationSummary {
    /// Build a summary from a list of results.
    #[must_use]
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let host_checked = results.iter().filter(|r| r.host.is_some()).count();
        Self {
            total,
            passed,
            failed: total - passed,
            host_checked,
            results,
        }
    }

    /// Returns true if all cases passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

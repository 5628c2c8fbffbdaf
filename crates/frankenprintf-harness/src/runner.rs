//! Test execution engine.

use std::time::Instant;

use frankenprintf_core::Template;

use crate::config::ParityMode;
use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet, Parity, error_code};
use crate::host_oracle::host_render;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Parity mode being enforced.
    pub mode: ParityMode,
}

/// What one case produced.
struct Execution {
    actual: String,
    host: Option<String>,
    latency_ns: u64,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: ParityMode) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .map(|case| self.verify_case(&fixture_set.family, case))
            .collect()
    }

    /// Run all fixtures, emitting one `case_result` log entry per case.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let results = self.run(fixture_set);
        for result in &results {
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new(String::new(), level, "case_result")
                .with_stream(StreamKind::Conformance)
                .with_mode(self.mode.as_str())
                .with_case(&fixture_set.family, &result.case_name)
                .with_template(&result.template)
                .with_outcome(outcome)
                .with_latency_ns(result.latency_ns);
            if !result.passed {
                entry = entry.with_details(serde_json::json!({
                    "expected": result.expected,
                    "actual": result.actual,
                    "host": result.host,
                }));
            }
            log.emit_entry(entry)?;
        }
        Ok(results)
    }

    fn verify_case(&self, family: &str, case: &FixtureCase) -> VerificationResult {
        let expected = case.expected();
        let check_host = self.mode.compares_host() && case.parity == Parity::Host;
        let run = execute_case(case, check_host);

        let mut notes = Vec::new();
        let mut passed = run.actual == expected;
        if run.actual != expected {
            notes.push(diff::render_diff(&expected, &run.actual));
        }
        if let Some(host) = run.host.as_deref()
            && host != run.actual
        {
            passed = false;
            notes.push(format!(
                "strict host parity mismatch: host={host:?}, impl={:?}",
                run.actual
            ));
        }

        VerificationResult {
            case_name: case.name.clone(),
            family: family.to_string(),
            reference: case.reference.clone(),
            template: case.template.clone(),
            passed,
            expected,
            actual: run.actual,
            host: run.host,
            diff: (!notes.is_empty()).then(|| notes.join("\n")),
            latency_ns: run.latency_ns,
        }
    }
}

fn execute_case(case: &FixtureCase, check_host: bool) -> Execution {
    let template = match Template::compile(&case.template) {
        Ok(template) => template,
        Err(err) => {
            return Execution {
                actual: format!("error:{}", error_code(&err)),
                host: None,
                latency_ns: 0,
            };
        }
    };
    let args = match case.engine_args() {
        Ok(args) => args,
        Err(err) => {
            return Execution {
                actual: format!("unsupported:{err}"),
                host: None,
                latency_ns: 0,
            };
        }
    };

    let start = Instant::now();
    let rendered = template.render(&args);
    let latency_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

    match rendered {
        Ok(actual) => Execution {
            host: if check_host {
                host_render(&template, &args)
            } else {
                None
            },
            actual,
            latency_ns,
        },
        Err(err) => Execution {
            actual: format!("error:{}", error_code(&err)),
            host: None,
            latency_ns,
        },
    }
}

//! CLI entrypoint for the frankenprintf conformance harness.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use frankenprintf_core::Template;
use frankenprintf_harness::fixtures::fixture_paths;
use frankenprintf_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, StreamKind, now_utc,
};
use frankenprintf_harness::{
    ConformanceReport, FixtureArg, FixtureSet, ParityMode, TestRunner, VerificationSummary,
};

/// Conformance tooling for frankenprintf.
#[derive(Debug, Parser)]
#[command(name = "frankenprintf-harness")]
#[command(about = "Conformance testing harness for frankenprintf")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a template with typed arguments and print the result.
    Render {
        /// Template text, e.g. "%-8s|%6.2f".
        #[arg(long)]
        template: String,
        /// Typed argument as TYPE:VALUE (e.g. i32:-3, f64:2.5, str:hi). Repeatable.
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Also print the pre-computed buffer size.
        #[arg(long)]
        estimate: bool,
    },
    /// Print the compiled form of a template.
    Explain {
        /// Template text.
        #[arg(long)]
        template: String,
        /// Print the placeholder specs as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; a JSON twin is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Parity mode (`strict` or `engine`); overrides FRANKENPRINTF_PARITY.
        #[arg(long)]
        parity: Option<String>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Capture host snprintf output for the built-in grid as a fixture file.
    Capture {
        /// Output fixture JSON path.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            template,
            args,
            estimate,
        } => {
            let template = Template::compile(&template)?;
            let fixture_args = args
                .iter()
                .map(|raw| FixtureArg::parse_cli(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let engine_args = fixture_args
                .iter()
                .map(FixtureArg::to_arg)
                .collect::<Result<Vec<_>, _>>()?;
            if estimate {
                eprintln!("estimated bytes: {}", template.estimated_len(&engine_args)?);
            }
            let mut stdout = std::io::stdout().lock();
            template.render_to(&mut stdout, &engine_args)?;
            writeln!(stdout)?;
        }
        Command::Explain { template, json } => {
            let compiled = Template::compile(&template)?;
            if json {
                println!("{}", serde_json::to_string_pretty(compiled.placeholders())?);
                return Ok(());
            }
            println!("template: {:?}", compiled.source());
            println!("literal bytes: {}", compiled.literal_len());
            let mut segments = compiled.literal_segments();
            if let Some(first) = segments.next() {
                println!("literal[0]: {first:?}");
            }
            for (index, (spec, literal)) in compiled.placeholders().iter().zip(segments).enumerate()
            {
                println!("placeholder[{index}]: {spec} ({:?})", spec.conversion);
                println!("literal[{}]: {literal:?}", index + 1);
            }
        }
        Command::Verify {
            fixture,
            report,
            log,
            parity,
            timestamp,
        } => {
            let mode = parity
                .as_deref()
                .map_or_else(ParityMode::from_env, ParityMode::from_str_loose);
            eprintln!(
                "Verifying against fixtures in {} ({} parity)",
                fixture.display(),
                mode.as_str()
            );

            let mut fixture_sets = Vec::new();
            for path in fixture_paths(&fixture)? {
                match FixtureSet::from_file(&path) {
                    Ok(set) => fixture_sets.push(set),
                    Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
                }
            }
            if fixture_sets.is_empty() {
                return Err(format!("No fixture JSON files found in {}", fixture.display()).into());
            }

            let runner = TestRunner::new("fixture-verify", mode);
            let run_id = format!("run-{}", std::process::id());
            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, &runner.campaign, &run_id)?),
                None => None,
            };
            let mut results = Vec::new();
            for set in &fixture_sets {
                match emitter.as_mut() {
                    Some(emitter) => results.extend(runner.run_logged(set, emitter)?),
                    None => results.extend(runner.run(set)),
                }
            }

            // Stable ordering for reproducible reports.
            results.sort_by(|a, b| {
                a.family
                    .cmp(&b.family)
                    .then_with(|| a.case_name.cmp(&b.case_name))
            });

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("frankenprintf Conformance Report"),
                parity: mode.as_str().to_string(),
                timestamp: timestamp.unwrap_or_else(now_utc),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}, host_checked={}",
                report_doc.summary.total,
                report_doc.summary.passed,
                report_doc.summary.failed,
                report_doc.summary.host_checked
            );

            let mut index = ArtifactIndex::new(&run_id, &runner.campaign);
            if let Some(report_path) = &report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
                index.add_file(report_path, "report_markdown")?;
                index.add_file(&json_path, "report_json")?;
            }

            if let (Some(mut emitter), Some(log_path)) = (emitter, &log) {
                let level = if report_doc.summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                };
                emitter.emit_entry(
                    LogEntry::new(String::new(), level, "run_summary")
                        .with_stream(StreamKind::Conformance)
                        .with_mode(mode.as_str())
                        .with_artifacts(index.artifacts.iter().map(|a| a.path.clone()).collect())
                        .with_details(serde_json::json!({
                            "total": report_doc.summary.total,
                            "passed": report_doc.summary.passed,
                            "failed": report_doc.summary.failed,
                            "host_checked": report_doc.summary.host_checked,
                        })),
                )?;
                emitter.flush()?;
                drop(emitter);
                index.add_file(log_path, "log_jsonl")?;
                let index_path = log_path.with_extension("index.json");
                std::fs::write(&index_path, index.to_json()?)?;
                eprintln!("Wrote artifact index to {}", index_path.display());
            }

            if !report_doc.summary.all_passed() {
                for failure in report_doc.summary.failures() {
                    eprintln!(
                        "FAIL {} [{}]: {}",
                        failure.case_name,
                        failure.family,
                        failure.diff.as_deref().unwrap_or("(no diff)")
                    );
                }
                return Err("Conformance verification failed".into());
            }
        }
        Command::Capture { output } => {
            let set = frankenprintf_harness::capture::capture_host_fixtures();
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, set.to_json()?)?;
            eprintln!(
                "Captured {} host cases to {}",
                set.cases.len(),
                output.display()
            );
        }
    }

    Ok(())
}

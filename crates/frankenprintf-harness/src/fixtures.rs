//! Fixture loading and management.

use std::path::{Path, PathBuf};

use frankenprintf_core::{Arg, FormatError};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// A typed render argument, externally tagged in JSON: `{"i32": -3}`,
/// `{"f64": 2.5}`, `{"str": "hi"}`, `{"char": "A"}`, `{"ptr": 4096}`.
///
/// `f64_text` carries values JSON numbers cannot spell (`"inf"`, `"nan"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureArg {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    F64Text(String),
    Char(char),
    Str(String),
    Bool(bool),
    Ptr(u64),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    pub fn to_arg(&self) -> Result<Arg<'_>, HarnessError> {
        Ok(match self {
            Self::I8(v) => Arg::from(*v),
            Self::I16(v) => Arg::from(*v),
            Self::I32(v) => Arg::from(*v),
            Self::I64(v) => Arg::from(*v),
            Self::U8(v) => Arg::from(*v),
            Self::U16(v) => Arg::from(*v),
            Self::U32(v) => Arg::from(*v),
            Self::U64(v) => Arg::from(*v),
            Self::F32(v) => Arg::from(*v),
            Self::F64(v) => Arg::from(*v),
            Self::F64Text(text) => Arg::from(
                text.trim()
                    .parse::<f64>()
                    .map_err(|err| HarnessError::invalid_arg(text, err.to_string()))?,
            ),
            Self::Char(c) => Arg::from(*c),
            Self::Str(s) => Arg::from(s.as_str()),
            Self::Bool(b) => Arg::from(*b),
            Self::Ptr(addr) => Arg::Pointer(
                usize::try_from(*addr)
                    .map_err(|_| HarnessError::invalid_arg(&addr.to_string(), "address too wide"))?,
            ),
        })
    }

    /// Parse the CLI form `TYPE:VALUE`, e.g. `i32:-3`, `str:hello`,
    /// `ptr:0x1000`. Type names match the JSON tags.
    pub fn parse_cli(input: &str) -> Result<Self, HarnessError> {
        let (kind, value) = input
            .split_once(':')
            .ok_or_else(|| HarnessError::invalid_arg(input, "expected TYPE:VALUE"))?;
        let bad = |err: &dyn std::fmt::Display| HarnessError::invalid_arg(input, err.to_string());
        Ok(match kind {
            "i8" => Self::I8(value.parse().map_err(|e| bad(&e))?),
            "i16" => Self::I16(value.parse().map_err(|e| bad(&e))?),
            "i32" => Self::I32(value.parse().map_err(|e| bad(&e))?),
            "i64" => Self::I64(value.parse().map_err(|e| bad(&e))?),
            "u8" => Self::U8(value.parse().map_err(|e| bad(&e))?),
            "u16" => Self::U16(value.parse().map_err(|e| bad(&e))?),
            "u32" => Self::U32(value.parse().map_err(|e| bad(&e))?),
            "u64" => Self::U64(value.parse().map_err(|e| bad(&e))?),
            "f32" => Self::F32(value.parse().map_err(|e| bad(&e))?),
            "f64" | "f64_text" => Self::F64(value.parse().map_err(|e| bad(&e))?),
            "char" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(HarnessError::invalid_arg(input, "expected one character")),
                }
            }
            "str" => Self::Str(value.to_string()),
            "bool" => Self::Bool(value.parse().map_err(|e| bad(&e))?),
            "ptr" => {
                let digits = value.strip_prefix("0x").unwrap_or(value);
                let radix = if digits.len() == value.len() { 10 } else { 16 };
                Self::Ptr(u64::from_str_radix(digits, radix).map_err(|e| bad(&e))?)
            }
            other => {
                return Err(HarnessError::invalid_arg(
                    input,
                    format!("unknown type '{other}'"),
                ));
            }
        })
    }
}

/// Whether the host C library is expected to agree with a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// Classic printf output; host `snprintf` must match.
    #[default]
    Host,
    /// Engine-defined output (zero-extended `%p`, non-ASCII text,
    /// argument coercion); not compared against the host.
    Engine,
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Template text.
    pub template: String,
    /// Render arguments.
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Expected rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Expected error code (`malformed_template`, `arity_mismatch`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_error: Option<String>,
    /// C standard / printf(3) reference.
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub parity: Parity,
}

impl FixtureCase {
    /// Expected outcome in the runner's comparison form: the rendering, or
    /// `error:<code>`.
    #[must_use]
    pub fn expected(&self) -> String {
        match (&self.expected_output, &self.expected_error) {
            (Some(output), _) => output.clone(),
            (None, Some(code)) => format!("error:{code}"),
            (None, None) => String::new(),
        }
    }

    /// Borrow every argument as an engine argument.
    pub fn engine_args(&self) -> Result<Vec<Arg<'_>>, HarnessError> {
        self.args.iter().map(FixtureArg::to_arg).collect()
    }
}

/// Stable short code for an engine error, as used in `expected_error`.
#[must_use]
pub fn error_code(err: &FormatError) -> &'static str {
    match err {
        FormatError::MalformedTemplate { .. } => "malformed_template",
        FormatError::ArityMismatch { .. } => "arity_mismatch",
        FormatError::OutputTooLarge => "output_too_large",
    }
}

/// A collection of fixture cases for one conversion family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Family name (e.g. `printf/integer`).
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// Sorted `*.json` paths directly inside `dir`.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

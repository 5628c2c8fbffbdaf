//! Parity mode configuration.
//!
//! The parity mode is set via the `FRANKENPRINTF_PARITY` environment variable:
//! - `strict` (default): every case must match its fixture expectation, and
//!   cases marked `host` must also match the host C library's `snprintf`.
//! - `engine`: fixture expectations only. Use where the host libc is not
//!   glibc-compatible or not available.
//!
//! A `--parity` flag on the CLI overrides the environment.

/// Environment variable selecting the parity mode.
pub const PARITY_ENV: &str = "FRANKENPRINTF_PARITY";

/// How much agreement a verification run demands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParityMode {
    /// Fixture expectations plus host libc agreement for `host` cases.
    #[default]
    Strict,
    /// Fixture expectations only.
    Engine,
}

impl ParityMode {
    /// Parse from string (case-insensitive). Unknown values fall back to
    /// `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "engine" | "fixture" | "off" | "none" => Self::Engine,
            _ => Self::Strict,
        }
    }

    /// Read `FRANKENPRINTF_PARITY`, defaulting to `Strict` when unset.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(PARITY_ENV)
            .map(|v| Self::from_str_loose(&v))
            .unwrap_or_default()
    }

    /// Returns true if host cases are checked against the host libc.
    #[must_use]
    pub const fn compares_host(self) -> bool {
        matches!(self, Self::Strict)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Engine => "engine",
        }
    }
}

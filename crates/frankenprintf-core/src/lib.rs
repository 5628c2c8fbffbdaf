//! # frankenprintf-core
//!
//! printf-style formatting with a compile-once template and single-allocation
//! rendering.
//!
//! A [`Template`] is parsed once from a C-style format string and reused for
//! any number of render calls, including concurrently. Each render sizes its
//! output up front from a per-placeholder upper bound, allocates exactly once,
//! and writes every byte in place. No `unsafe` code is permitted at the crate
//! level.
//!
//! ```
//! use frankenprintf_core::{Arg, Template};
//!
//! let t = Template::compile("%-6s|%05.1f|%#x").unwrap();
//! let out = t.render(&[Arg::from("cpu"), Arg::from(3.14159), Arg::from(255)]).unwrap();
//! assert_eq!(out, "cpu   |003.1|0xff");
//! ```

#![deny(unsafe_code)]

pub mod arg;
mod buf;
pub mod compile;
pub mod decimal;
pub mod error;
pub mod estimate;
mod render;
pub mod spec;

pub use arg::Arg;
pub use compile::Template;
pub use error::{FormatError, MalformedReason, WriteError};
pub use estimate::{F32_WORST_LEN, F64_WORST_LEN, estimate};
pub use spec::{ConversionKind, Flags, PlaceholderSpec, Precision};

/// Compile `template` and render `args` in one call.
pub fn sprintf(template: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
    Template::compile(template)?.render(args)
}

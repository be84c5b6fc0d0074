//! Reader for LTX configuration files: INI-like sections that can inherit keys
//! from other sections, possibly declared in a different file.
//!
//! ```
//! use ltx::Ltx;
//!
//! let mut ltx = Ltx::new();
//! ltx.parse(["[child]:base", "own = 1"])?;
//! ltx.parse(["[base]", "own = 0", "shared = yes"])?;
//!
//! assert_eq!(ltx.get_int("child", "own")?, Some(1));
//! assert_eq!(ltx.get_bool("child", "shared")?, Some(true));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod diagnostic;
mod error;
mod inheritance;
mod ltx;
pub mod parser;
mod section;
mod util;
mod value;

pub use diagnostic::{Collector, Diagnostic, DiagnosticKind, Reporter, WarningMode};
pub use error::{ParseError, ValueError};
pub use inheritance::Pending;
pub use ltx::{Ltx, Options};
pub use section::{Entry, Origin, Section};
pub use util::decode_data;
pub use value::{Value, coerce};

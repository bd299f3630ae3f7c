#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::new_without_default)]

//! A duration which can be parsed from and printed as text like `1h30m`,
//! `1.5d` or `off`.
//!
//! ```
//! use fire_duration::Duration;
//!
//! let d: Duration = "1.5d".parse().unwrap();
//! assert_eq!(d, Duration::from_hours(36));
//! assert_eq!(d.to_string(), "1.5d");
//!
//! let d = Duration::from_secs(90);
//! assert_eq!(d.to_string(), "1m30s");
//! assert_eq!(Duration::from_days(4 * 7 + 3).readable_string(), "4w3d");
//! ```
//!
//! ## Features
//! - `serde` serializes a duration as a string and deserializes it from a
//! string or from nanoseconds.
//! - `chrono` conversions to and from `chrono::Duration`.
//! - `clap` allows to use [`Duration`] as a clap argument.

pub mod duration;
pub use duration::{Duration, OutOfRangeError};

mod format;

mod parse;
pub use parse::ParseError;

pub mod flag;
pub use flag::FlagValue;

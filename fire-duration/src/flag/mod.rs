//! Binding of values to command line flags.
//!
//! A flag library only needs three things from a value: a way to set it from
//! the command line, a way to print the default and a type name for the help
//! text. [`FlagValue`] describes exactly that so any flag library can be
//! bound to it, see the `clap` feature for an example.

mod scan;
pub use scan::{ScanError, Scanner};

#[cfg(feature = "clap")]
mod clap;
#[cfg(feature = "clap")]
pub use self::clap::FlagValueParser;

use crate::{Duration, ParseError};

use tracing::debug;

pub trait FlagValue {
	type Err: std::error::Error + Send + Sync + 'static;

	/// Replaces the current value with the parsed text.
	///
	/// If the text is invalid the value stays unchanged.
	fn set(&mut self, text: &str) -> Result<(), Self::Err>;

	/// The current value as it would be passed to [`set`](Self::set).
	fn to_flag_string(&self) -> String;

	/// The name shown in the help text.
	fn type_name(&self) -> &'static str;
}

impl FlagValue for Duration {
	type Err = ParseError;

	fn set(&mut self, text: &str) -> Result<(), ParseError> {
		match Duration::parse(text) {
			Ok(d) => {
				*self = d;
				Ok(())
			}
			Err(e) => {
				debug!("rejected duration flag value {text:?}: {e}");
				Err(e)
			}
		}
	}

	fn to_flag_string(&self) -> String {
		self.to_string()
	}

	fn type_name(&self) -> &'static str {
		"Duration"
	}
}

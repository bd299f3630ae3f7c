use super::FlagValue;
use crate::Duration;

use std::ffi::OsStr;
use std::marker::PhantomData;

use ::clap::builder::{TypedValueParser, ValueParserFactory};
use ::clap::error::{Error, ErrorKind};
use ::clap::{Arg, Command};

/// Parses clap arguments with [`FlagValue::set`].
///
/// The value starts out as `V::default()` and is then set to the argument.
pub struct FlagValueParser<V> {
	marker: PhantomData<fn() -> V>,
}

impl<V> FlagValueParser<V> {
	pub fn new() -> Self {
		Self {
			marker: PhantomData,
		}
	}
}

impl<V> Clone for FlagValueParser<V> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<V> TypedValueParser for FlagValueParser<V>
where
	V: FlagValue + Default + Clone + Send + Sync + 'static,
{
	type Value = V;

	fn parse_ref(
		&self,
		cmd: &Command,
		arg: Option<&Arg>,
		value: &OsStr,
	) -> Result<V, Error> {
		let text = value
			.to_str()
			.ok_or_else(|| Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;

		let mut v = V::default();
		let type_name = v.type_name();
		v.set(text).map_err(|e| {
			let arg = arg
				.map(|a| a.to_string())
				.unwrap_or_else(|| "...".to_string());

			Error::raw(
				ErrorKind::ValueValidation,
				format!(
					"invalid {type_name} value {text:?} for '{arg}': {e}\n"
				),
			)
			.with_cmd(cmd)
		})?;

		Ok(v)
	}
}

impl ValueParserFactory for Duration {
	type Parser = FlagValueParser<Duration>;

	fn value_parser() -> Self::Parser {
		FlagValueParser::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use ::clap::Parser;

	#[derive(Debug, Parser)]
	struct Args {
		#[arg(long, default_value_t = Duration::OFF)]
		max_age: Duration,
		#[arg(long)]
		timeout: Option<Duration>,
	}

	#[test]
	fn default_value() {
		let args = Args::try_parse_from(["prog"]).unwrap();
		assert!(args.max_age.is_off());
		assert_eq!(args.timeout, None);
	}

	#[test]
	fn set_value() {
		let args = Args::try_parse_from([
			"prog",
			"--max-age",
			"1.5y",
			"--timeout=-1h2m3s",
		])
		.unwrap();
		assert_eq!(args.max_age, Duration::from_hours(24 * 365 * 3 / 2));
		assert_eq!(args.timeout, Some(-Duration::from_secs(3723)));
	}

	#[test]
	fn invalid_value() {
		let err = Args::try_parse_from(["prog", "--max-age", "1x"]).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::ValueValidation);
		assert!(err.to_string().contains("invalid duration \"1x\""));
	}
}

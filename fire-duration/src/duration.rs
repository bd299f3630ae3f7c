use crate::format;
use crate::parse::{self, ParseError};

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use std::time::Duration as StdDuration;

pub const NANOSECOND: i64 = 1;
pub const MICROSECOND: i64 = 1_000 * NANOSECOND;
pub const MILLISECOND: i64 = 1_000 * MICROSECOND;
pub const SECOND: i64 = 1_000 * MILLISECOND;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;
pub const WEEK: i64 = 7 * DAY;
/// A month is always 30 days long.
pub const MONTH: i64 = 30 * DAY;
/// A year is always 365 days long.
pub const YEAR: i64 = 365 * DAY;

/// The keyword used to parse and print [`Duration::OFF`].
pub const OFF_KEYWORD: &str = "off";

/// A signed duration with nanosecond precision.
///
/// Besides normal durations it can hold the special value [`Duration::OFF`]
/// which is used for settings that can be disabled, a timeout that never
/// fires for example.
///
/// The text representation supports the units `ns`, `us`, `ms`, `s`, `m`
/// and `h` which can be combined (`1h30m`) and the extended units `d`, `w`,
/// `M` and `y` which can only be used alone (`1.5d`).
///
/// The `from_*` constructors and negation panic if the result does not fit
/// into an i64 of nanoseconds, about 292 years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64); // nanos

impl Duration {
	pub const ZERO: Self = Self(0);

	/// Means disabled or unlimited. Printed as `off`.
	///
	/// Only the largest positive value is treated as off, there is no
	/// negative counterpart.
	pub const OFF: Self = Self(i64::MAX);

	pub const fn from_nanos(nanos: i64) -> Self {
		Self(nanos)
	}

	/// ## Panics
	/// If the result does not fit into an i64 of nanoseconds (about 292
	/// years), the same applies to every `from_*` constructor.
	const fn from_units(count: i64, unit: i64) -> Self {
		match count.checked_mul(unit) {
			Some(nanos) => Self(nanos),
			None => panic!("duration overflow"),
		}
	}

	pub const fn from_micros(micros: i64) -> Self {
		Self::from_units(micros, MICROSECOND)
	}

	pub const fn from_millis(millis: i64) -> Self {
		Self::from_units(millis, MILLISECOND)
	}

	pub const fn from_secs(secs: i64) -> Self {
		Self::from_units(secs, SECOND)
	}

	pub const fn from_mins(mins: i64) -> Self {
		Self::from_units(mins, MINUTE)
	}

	pub const fn from_hours(hours: i64) -> Self {
		Self::from_units(hours, HOUR)
	}

	pub const fn from_days(days: i64) -> Self {
		Self::from_units(days, DAY)
	}

	pub const fn from_weeks(weeks: i64) -> Self {
		Self::from_units(weeks, WEEK)
	}

	/// A month has 30 days
	pub const fn from_months(months: i64) -> Self {
		Self::from_units(months, MONTH)
	}

	/// A year has 365 days
	pub const fn from_years(years: i64) -> Self {
		Self::from_units(years, YEAR)
	}

	pub const fn as_nanos(&self) -> i64 {
		self.0
	}

	pub const fn is_off(&self) -> bool {
		self.0 == i64::MAX
	}

	/// Returns true if this is not [`Duration::OFF`].
	pub const fn is_set(&self) -> bool {
		!self.is_off()
	}

	pub const fn is_zero(&self) -> bool {
		self.0 == 0
	}

	pub const fn is_negative(&self) -> bool {
		self.0 < 0
	}

	/// The magnitude in nanoseconds, this never overflows.
	pub const fn unsigned_abs(&self) -> u64 {
		self.0.unsigned_abs()
	}

	/// Returns None if the duration is off or the negation would overflow.
	pub const fn checked_neg(self) -> Option<Self> {
		if self.is_off() {
			return None;
		}

		match self.0.checked_neg() {
			Some(n) => Some(Self(n)),
			None => None,
		}
	}

	/// Parses a duration, see [`Duration`] for the format.
	pub fn parse(s: &str) -> Result<Self, ParseError> {
		parse::parse(s).map(Self)
	}

	/// Prints every unit from years down to milliseconds, for example
	/// `1y2w3d4h5m6s7ms`. Months are never used.
	pub fn readable_string(&self) -> String {
		format::readable(self.0, None)
	}

	/// Like [`readable_string`](Self::readable_string) but only keeps the
	/// three largest units.
	pub fn short_readable_string(&self) -> String {
		format::readable(self.0, Some(3))
	}

	/// Returns None if the duration is negative or off.
	pub fn to_std(&self) -> Option<StdDuration> {
		if self.is_off() || self.is_negative() {
			return None;
		}

		Some(StdDuration::from_nanos(self.0 as u64))
	}

	/// Returns None if the duration does not fit.
	pub fn from_std(d: StdDuration) -> Option<Self> {
		i64::try_from(d.as_nanos()).ok().map(Self)
	}
}

impl Neg for Duration {
	type Output = Self;

	/// ## Panics
	/// If the duration is `i64::MIN` nanoseconds, and in debug builds if the
	/// duration is [`Duration::OFF`]. Use
	/// [`checked_neg`](Duration::checked_neg) to avoid both.
	fn neg(self) -> Self {
		debug_assert!(self.is_set(), "cannot negate Duration::OFF");
		match self.0.checked_neg() {
			Some(n) => Self(n),
			None => panic!("duration overflow"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duration out of range")]
pub struct OutOfRangeError;

impl TryFrom<StdDuration> for Duration {
	type Error = OutOfRangeError;

	fn try_from(d: StdDuration) -> Result<Self, Self::Error> {
		Self::from_std(d).ok_or(OutOfRangeError)
	}
}

// DISPLAY
impl fmt::Display for Duration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&format::compact(self.0))
	}
}

impl FromStr for Duration {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

// SERDE

#[cfg(feature = "serde")]
mod impl_serde {
	use super::*;

	use serde::de::{Deserializer, Error, Visitor};
	use serde::ser::Serializer;
	use serde::{Deserialize, Serialize};

	impl Serialize for Duration {
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.collect_str(self)
		}
	}

	struct DurationVisitor;

	impl<'de> Visitor<'de> for DurationVisitor {
		type Value = Duration;

		fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
			formatter.write_str("a duration string or nanoseconds")
		}

		fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
		where
			E: Error,
		{
			Duration::parse(v).map_err(E::custom)
		}

		fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
		where
			E: Error,
		{
			Ok(Duration::from_nanos(v))
		}

		fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
		where
			E: Error,
		{
			i64::try_from(v)
				.map(Duration::from_nanos)
				.map_err(|_| E::custom("duration to big"))
		}
	}

	impl<'de> Deserialize<'de> for Duration {
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			deserializer.deserialize_any(DurationVisitor)
		}
	}
}

#[cfg(feature = "chrono")]
mod impl_chrono {
	use super::*;

	impl From<Duration> for chrono::Duration {
		/// [`Duration::OFF`] becomes the largest nanosecond count.
		fn from(d: Duration) -> Self {
			chrono::Duration::nanoseconds(d.as_nanos())
		}
	}

	impl TryFrom<chrono::Duration> for Duration {
		type Error = OutOfRangeError;

		fn try_from(d: chrono::Duration) -> Result<Self, Self::Error> {
			d.num_nanoseconds()
				.map(Duration::from_nanos)
				.ok_or(OutOfRangeError)
		}
	}
}

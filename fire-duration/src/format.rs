use crate::duration::{
	DAY, HOUR, MICROSECOND, MILLISECOND, MINUTE, MONTH, OFF_KEYWORD, SECOND,
	WEEK, YEAR,
};

use std::fmt::Write;

/// Largest unit first, the order matters.
const COMPACT_UNITS: &[(u64, char)] = &[
	(YEAR as u64, 'y'),
	(MONTH as u64, 'M'),
	(WEEK as u64, 'w'),
	(DAY as u64, 'd'),
];

// months are left out
const READABLE_UNITS: &[(u64, &str)] = &[
	(YEAR as u64, "y"),
	(WEEK as u64, "w"),
	(DAY as u64, "d"),
	(HOUR as u64, "h"),
	(MINUTE as u64, "m"),
	(SECOND as u64, "s"),
	(MILLISECOND as u64, "ms"),
];

/// The shortest representation which parses back to the same value.
///
/// `y`, `M`, `w` and `d` are only used for durations of at least one such
/// unit, so 12h prints as `12h0m0s` and not as `0.5d`.
pub(crate) fn compact(nanos: i64) -> String {
	match nanos {
		i64::MAX => return OFF_KEYWORD.to_string(),
		0 => return "0s".to_string(),
		_ => {}
	}

	let mut s = String::new();
	if nanos < 0 {
		s.push('-');
	}

	let m = nanos.unsigned_abs();
	match extended_unit(m) {
		Some((whole, half, suffix)) => {
			write!(s, "{whole}").unwrap();
			if half {
				s.push_str(".5");
			}
			s.push(suffix);
		}
		None => write_clock(&mut s, m),
	}

	s
}

/// Only exact multiples or exact halves are accepted, anything else could
/// not be parsed back without losing precision.
fn extended_unit(m: u64) -> Option<(u64, bool, char)> {
	COMPACT_UNITS
		.iter()
		.filter(|(unit, _)| m >= *unit)
		.find_map(|&(unit, suffix)| {
			if m % unit == 0 {
				Some((m / unit, false, suffix))
			} else if m % (unit / 2) == 0 {
				Some((m / unit, true, suffix))
			} else {
				None
			}
		})
}

/// Writes `1h2m3.5s` or for less than a second `1.5ms`, `2µs` or `3ns`.
fn write_clock(s: &mut String, m: u64) {
	let micro = MICROSECOND as u64;
	let milli = MILLISECOND as u64;
	let second = SECOND as u64;

	if m < micro {
		write!(s, "{m}ns").unwrap();
		return;
	}

	if m < milli {
		write_fraction(s, m / micro, m % micro, 3);
		s.push_str("\u{b5}s");
		return;
	}

	if m < second {
		write_fraction(s, m / milli, m % milli, 6);
		s.push_str("ms");
		return;
	}

	let secs = m / second;
	let mins = secs / 60;
	let hours = mins / 60;

	if hours > 0 {
		write!(s, "{hours}h").unwrap();
	}

	if mins > 0 {
		write!(s, "{}m", mins % 60).unwrap();
	}

	write_fraction(s, secs % 60, m % second, 9);
	s.push('s');
}

/// Writes `whole.frac` with trailing zeros of the fraction removed.
fn write_fraction(s: &mut String, whole: u64, frac: u64, digits: usize) {
	write!(s, "{whole}").unwrap();
	if frac == 0 {
		return;
	}

	let frac = format!("{frac:0digits$}");
	s.push('.');
	s.push_str(frac.trim_end_matches('0'));
}

/// Every unit of the cascade from years down to milliseconds. If `max_units`
/// is set only that many units are printed.
pub(crate) fn readable(nanos: i64, max_units: Option<usize>) -> String {
	match nanos {
		i64::MAX => return OFF_KEYWORD.to_string(),
		0 => return "0s".to_string(),
		_ => {}
	}

	let mut parts = String::new();
	let mut remaining = nanos.unsigned_abs();
	let mut printed = 0;

	for &(unit, suffix) in READABLE_UNITS {
		if max_units.is_some_and(|max| printed >= max) {
			break;
		}

		let count = remaining / unit;
		remaining -= count * unit;

		if count > 0 {
			write!(parts, "{count}{suffix}").unwrap();
			printed += 1;
		}
	}

	// less than a millisecond
	if parts.is_empty() {
		return "0s".to_string();
	}

	if nanos < 0 {
		parts.insert(0, '-');
	}

	parts
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn compact_extended() {
		assert_eq!(compact(DAY), "1d");
		assert_eq!(compact(WEEK), "1w");
		assert_eq!(compact(2 * WEEK), "2w");
		assert_eq!(compact(MONTH), "1M");
		assert_eq!(compact(YEAR), "1y");
		assert_eq!(compact(YEAR + YEAR / 2), "1.5y");
		assert_eq!(compact(-(YEAR + YEAR / 2)), "-1.5y");
		assert_eq!(compact(DAY + DAY / 2), "1.5d");
		assert_eq!(compact(400 * DAY), "400d");
		assert_eq!(compact(15 * DAY), "15d");
	}

	#[test]
	fn compact_half_below_unit() {
		assert_eq!(compact(12 * HOUR), "12h0m0s");
		assert_eq!(compact(WEEK / 2), "3.5d");
		assert_eq!(compact(YEAR / 2), "182.5d");
		assert_eq!(compact(-(MONTH / 2)), "-15d");
	}

	#[test]
	fn compact_clock() {
		assert_eq!(compact(SECOND), "1s");
		assert_eq!(compact(-SECOND), "-1s");
		assert_eq!(compact(MINUTE), "1m0s");
		assert_eq!(compact(90 * SECOND), "1m30s");
		assert_eq!(compact(HOUR), "1h0m0s");
		assert_eq!(compact(HOUR + 2 * MINUTE + 3 * SECOND), "1h2m3s");
		assert_eq!(compact(12 * HOUR), "12h0m0s");
		assert_eq!(compact(25 * HOUR), "25h0m0s");
		assert_eq!(compact(SECOND + 1), "1.000000001s");
		assert_eq!(compact(MINUTE + 500 * MILLISECOND), "1m0.5s");
	}

	#[test]
	fn compact_sub_second() {
		assert_eq!(compact(MILLISECOND), "1ms");
		assert_eq!(compact(1_500 * MICROSECOND), "1.5ms");
		assert_eq!(compact(2 * MICROSECOND), "2\u{b5}s");
		assert_eq!(compact(2_250), "2.25\u{b5}s");
		assert_eq!(compact(3), "3ns");
	}

	#[test]
	fn compact_special() {
		assert_eq!(compact(0), "0s");
		assert_eq!(compact(i64::MAX), "off");
		assert_eq!(compact(i64::MIN), "-2562047h47m16.854775808s");
	}

	#[test]
	fn readable_units() {
		assert_eq!(readable(MILLISECOND, None), "1ms");
		assert_eq!(readable(MINUTE, None), "1m");
		assert_eq!(readable(HOUR, None), "1h");
		assert_eq!(readable(MONTH, None), "4w2d");
		assert_eq!(readable(YEAR + 14 * DAY, None), "1y2w");
		assert_eq!(readable(-(YEAR + 14 * DAY), None), "-1y2w");
	}

	#[test]
	fn readable_truncates() {
		assert_eq!(readable(SECOND + 999_999, None), "1s");
		assert_eq!(readable(999_999, None), "0s");
		assert_eq!(readable(-999_999, None), "0s");
	}

	#[test]
	fn readable_max_units() {
		let d = YEAR + 2 * WEEK + 3 * DAY + 4 * HOUR + 5 * MINUTE;
		assert_eq!(readable(d, None), "1y2w3d4h5m");
		assert_eq!(readable(d, Some(3)), "1y2w3d");
		assert_eq!(readable(-d, Some(3)), "-1y2w3d");
		assert_eq!(readable(YEAR + 5 * MINUTE + SECOND, Some(2)), "1y5m");
	}
}

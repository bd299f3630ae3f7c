use crate::duration::{
	DAY, HOUR, MICROSECOND, MILLISECOND, MINUTE, MONTH, NANOSECOND, OFF_KEYWORD,
	SECOND, WEEK, YEAR,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("empty duration")]
	EmptyInput,
	#[error("invalid duration {0:?}")]
	InvalidFormat(String),
}

/// Units which can only be used as a single token like `1.5d`.
const EXTENDED_UNITS: &[(char, i64)] =
	&[('d', DAY), ('w', WEEK), ('M', MONTH), ('y', YEAR)];

/// Units which can be combined like `1h2m3s`.
const STANDARD_UNITS: &[(&str, i64)] = &[
	("ns", NANOSECOND),
	("us", MICROSECOND),
	// micro sign U+00B5
	("\u{b5}s", MICROSECOND),
	// greek small letter mu U+03BC
	("\u{3bc}s", MICROSECOND),
	("ms", MILLISECOND),
	("s", SECOND),
	("m", MINUTE),
	("h", HOUR),
];

/// Returns the duration in nanoseconds.
pub(crate) fn parse(s: &str) -> Result<i64, ParseError> {
	if s.is_empty() {
		return Err(ParseError::EmptyInput);
	}

	if s == OFF_KEYWORD {
		return Ok(i64::MAX);
	}

	let invalid = || ParseError::InvalidFormat(s.to_string());

	let (neg, body) = match s.strip_prefix('-') {
		Some(body) => (true, body),
		None => (false, s),
	};

	if body == "0" {
		return Ok(0);
	}

	let nanos = match parse_extended(body) {
		Some(nanos) => nanos,
		None => parse_compound(body).ok_or_else(invalid)?,
	};

	apply_sign(nanos, neg).ok_or_else(invalid)
}

/// A negative duration can go one nanosecond further than a positive one.
fn apply_sign(nanos: u64, neg: bool) -> Option<i64> {
	if neg {
		match nanos {
			n if n <= 1 << 63 => Some((n as i64).wrapping_neg()),
			_ => None,
		}
	} else {
		i64::try_from(nanos).ok()
	}
}

/// Parses `<decimal><d|w|M|y>`.
fn parse_extended(body: &str) -> Option<u64> {
	let unit_char = body.chars().last()?;
	let (_, unit) = EXTENDED_UNITS.iter().find(|(c, _)| *c == unit_char)?;

	let number = &body[..body.len() - unit_char.len_utf8()];
	if !is_decimal(number) {
		return None;
	}

	let value: f64 = number.parse().ok()?;
	let nanos = (value * *unit as f64).round();
	// 2^64 is the first value which does not fit
	if nanos < 18_446_744_073_709_551_616.0 {
		Some(nanos as u64)
	} else {
		None
	}
}

/// `<digits>["." [<digits>]]` where at least one digit is present.
fn is_decimal(s: &str) -> bool {
	let (int, frac) = match s.split_once('.') {
		Some((int, frac)) => (int, frac),
		None => (s, ""),
	};

	let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());

	!(int.is_empty() && frac.is_empty()) && all_digits(int) && all_digits(frac)
}

/// Parses one or more `<decimal><unit>` pairs and sums them up.
fn parse_compound(mut s: &str) -> Option<u64> {
	if s.is_empty() {
		return None;
	}

	let mut total: u64 = 0;
	while !s.is_empty() {
		let (int, rest) = leading_int(s)?;
		let has_int = rest.len() != s.len();
		s = rest;

		let mut frac = 0;
		let mut scale = 1.0;
		let mut has_frac = false;
		if let Some(rest) = s.strip_prefix('.') {
			let (f, sc, rest_frac) = leading_fraction(rest);
			has_frac = rest_frac.len() != rest.len();
			frac = f;
			scale = sc;
			s = rest_frac;
		}

		// "." alone is not a number, "1." and ".5" are
		if !has_int && !has_frac {
			return None;
		}

		let unit_end = s
			.find(|c: char| c == '.' || c.is_ascii_digit())
			.unwrap_or(s.len());
		let (unit_str, rest) = s.split_at(unit_end);
		s = rest;

		let (_, unit) = STANDARD_UNITS.iter().find(|(u, _)| *u == unit_str)?;
		let unit = *unit as u64;

		let mut value = int.checked_mul(unit)?;
		if frac > 0 {
			// truncate the fraction to whole nanoseconds
			value = value
				.checked_add((frac as f64 * (unit as f64 / scale)) as u64)?;
		}

		total = total.checked_add(value)?;
	}

	Some(total)
}

/// Returns the value of the leading digits, overflow returns None.
fn leading_int(s: &str) -> Option<(u64, &str)> {
	let end = s.bytes().take_while(u8::is_ascii_digit).count();
	let (digits, rest) = s.split_at(end);

	let mut n: u64 = 0;
	for b in digits.bytes() {
		n = n.checked_mul(10)?.checked_add((b - b'0') as u64)?;
	}

	Some((n, rest))
}

/// Returns the value of the leading fraction digits and the scale to divide
/// it by. Digits which would overflow are skipped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
	let end = s.bytes().take_while(u8::is_ascii_digit).count();
	let (digits, rest) = s.split_at(end);

	let mut frac: u64 = 0;
	let mut scale = 1.0;
	let mut overflow = false;
	for b in digits.bytes() {
		if overflow {
			continue;
		}

		let next = frac
			.checked_mul(10)
			.and_then(|f| f.checked_add((b - b'0') as u64));
		match next {
			Some(next) => {
				frac = next;
				scale *= 10.0;
			}
			None => overflow = true,
		}
	}

	(frac, scale, rest)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ok(s: &str) -> i64 {
		parse(s).unwrap_or_else(|e| panic!("{s:?} failed with {e}"))
	}

	#[test]
	fn standard_units() {
		assert_eq!(ok("1ns"), 1);
		assert_eq!(ok("1us"), MICROSECOND);
		assert_eq!(ok("1µs"), MICROSECOND);
		assert_eq!(ok("1μs"), MICROSECOND);
		assert_eq!(ok("1ms"), MILLISECOND);
		assert_eq!(ok("1s"), SECOND);
		assert_eq!(ok("1m"), MINUTE);
		assert_eq!(ok("1h"), HOUR);
	}

	#[test]
	fn fractions() {
		assert_eq!(ok("1.5m"), 90 * SECOND);
		assert_eq!(ok("1.s"), SECOND);
		assert_eq!(ok(".5s"), 500 * MILLISECOND);
		assert_eq!(ok("1.000000001s"), SECOND + 1);
		assert_eq!(ok("1.d"), DAY);
		assert_eq!(ok("1.5y"), YEAR + YEAR / 2);
		assert_eq!(ok("0.5w"), WEEK / 2);
	}

	#[test]
	fn compound() {
		assert_eq!(ok("1h2m3s"), HOUR + 2 * MINUTE + 3 * SECOND);
		assert_eq!(ok("1m30.5s"), 90 * SECOND + 500 * MILLISECOND);
		assert_eq!(ok("-1h0m0s"), -HOUR);
		assert_eq!(ok("2s1h"), HOUR + 2 * SECOND);
	}

	#[test]
	fn zero_and_sign() {
		assert_eq!(ok("0"), 0);
		assert_eq!(ok("-0"), 0);
		assert_eq!(ok("-1s"), -SECOND);
		assert_eq!(ok("-1.5d"), -(DAY + DAY / 2));
	}

	#[test]
	fn off() {
		assert_eq!(ok("off"), i64::MAX);
		assert!(matches!(parse("Off"), Err(ParseError::InvalidFormat(_))));
		assert!(matches!(parse("-off"), Err(ParseError::InvalidFormat(_))));
	}

	#[test]
	fn limits() {
		assert_eq!(ok("-9223372036854775808ns"), i64::MIN);
		assert_eq!(ok("9223372036854775807ns"), i64::MAX);
		assert!(parse("9223372036854775808ns").is_err());
		assert!(parse("300y").is_err());
		assert!(parse("99999999999999999999h").is_err());
	}

	#[test]
	fn errors() {
		assert_eq!(parse(""), Err(ParseError::EmptyInput));
		for s in [
			"1x", "1", "-", "s", ".s", "1.2.3s", "1d2h", "1h2d", "1dd", "d",
			"1 s", "1e3s", "+1s", "inf d", "1s ",
		] {
			assert_eq!(
				parse(s),
				Err(ParseError::InvalidFormat(s.to_string())),
				"{s:?}"
			);
		}
	}
}

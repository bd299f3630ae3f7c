use super::FlagValue;

use std::io::{self, BufRead};

use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum ScanError<E> {
	#[error("failed to read token {0}")]
	Io(#[from] io::Error),
	#[error("unexpected end of input")]
	Eof,
	#[error("invalid token {0}")]
	Value(E),
}

/// Reads whitespace separated tokens from a reader.
///
/// Leading whitespace is skipped and the token ends at the next whitespace
/// or at the end of the input. The whitespace after a token is left in the
/// reader.
#[derive(Debug)]
pub struct Scanner<R> {
	reader: R,
}

impl<R> Scanner<R>
where
	R: BufRead,
{
	pub fn new(reader: R) -> Self {
		Self { reader }
	}

	/// Returns None if only whitespace was left.
	pub fn next_token(&mut self) -> io::Result<Option<String>> {
		let mut token = Vec::new();

		loop {
			let buf = self.reader.fill_buf()?;
			if buf.is_empty() {
				break;
			}

			let skip = if token.is_empty() {
				buf.iter().take_while(|b| b.is_ascii_whitespace()).count()
			} else {
				0
			};

			let len = buf[skip..]
				.iter()
				.take_while(|b| !b.is_ascii_whitespace())
				.count();
			token.extend_from_slice(&buf[skip..skip + len]);

			let reached_end = skip + len < buf.len() && !token.is_empty();
			self.reader.consume(skip + len);

			if reached_end {
				break;
			}
		}

		if token.is_empty() {
			return Ok(None);
		}

		String::from_utf8(token)
			.map(Some)
			.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
	}

	/// Reads the next token into `value` and returns the number of tokens
	/// consumed, which is always one.
	///
	/// If the token is invalid `value` stays unchanged.
	pub fn scan<V>(&mut self, value: &mut V) -> Result<usize, ScanError<V::Err>>
	where
		V: FlagValue,
	{
		let token = self.next_token()?.ok_or(ScanError::Eof)?;
		trace!("scanned {} token {token:?}", value.type_name());

		value.set(token.trim()).map_err(ScanError::Value)?;

		Ok(1)
	}

	pub fn into_inner(self) -> R {
		self.reader
	}
}

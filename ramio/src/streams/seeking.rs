// SPDX-License-Identifier: Apache-2.0

use std::io::SeekFrom;
use super::{Error, OperationKind, Result};

/// The reference point of a seek offset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SeekOrigin {
	/// Seek relative to the start of the stream.
	#[default]
	Begin,
	/// Seek relative to the current position.
	Current,
	/// Seek relative to the end of the stream. A positive offset will seek beyond
	/// the stream, the behavior of which is implementation-dependent.
	End,
}

impl SeekOrigin {
	/// Converts to a start-based position given a current `pos` and `len`. Fails
	/// with a seek error if the position would be negative, or an argument error
	/// if the arithmetic overflows.
	pub fn to_pos(self, offset: i64, pos: usize, len: usize) -> Result<usize> {
		let base = match self {
			SeekOrigin::Begin   => 0,
			SeekOrigin::Current => pos,
			SeekOrigin::End     => len,
		};
		let base = i64::try_from(base).map_err(|_| overflow())?;
		let target = base.checked_add(offset).ok_or_else(overflow)?;
		if target < 0 {
			return Err(Error::seek_before_start(OperationKind::Seek))
		}
		usize::try_from(target).map_err(|_| overflow())
	}

	/// Converts an `offset` from this origin into [`std::io`]'s [`SeekFrom`] enum.
	/// Fails if seeking from the start with a negative offset.
	pub fn into_seek_from(self, offset: i64) -> Result<SeekFrom> {
		Ok(
			match self {
				SeekOrigin::Begin => SeekFrom::Start(
					u64::try_from(offset)
						.map_err(|_| Error::seek_before_start(OperationKind::Seek))?
				),
				SeekOrigin::Current => SeekFrom::Current(offset),
				SeekOrigin::End     => SeekFrom::End(offset),
			}
		)
	}

	/// Splits [`std::io`]'s [`SeekFrom`] into an offset and origin.
	pub fn from_seek_from(value: SeekFrom) -> Result<(i64, SeekOrigin)> {
		Ok(
			match value {
				SeekFrom::Start  (pos) => (
					i64::try_from(pos).map_err(|_| overflow())?,
					SeekOrigin::Begin
				),
				SeekFrom::Current(off) => (off, SeekOrigin::Current),
				SeekFrom::End    (off) => (off, SeekOrigin::End),
			}
		)
	}
}

fn overflow() -> Error {
	Error::argument(OperationKind::Seek, "seek offset overflowed")
}

/// A stream that supports seeking. Based on the [`std::io::Seek`] trait.
pub trait Seekable {
	/// Seeks `offset` bytes from `origin`, returning the new position.
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize>;

	/// Seeks to the end of the stream then back to the current position, returning
	/// the length.
	fn seek_len(&mut self) -> Result<usize> {
		let pos = self.seek_pos()?;
		let len = self.seek(0, SeekOrigin::End)?;

		if pos != len {
			self.seek(to_offset(pos)?, SeekOrigin::Begin)?;
		}

		Ok(len)
	}

	/// Returns the current position.
	fn seek_pos(&mut self) -> Result<usize> {
		self.seek(0, SeekOrigin::Current)
	}
}

/// A convenience extension for [`Seekable`].
pub trait SeekableExt: Seekable {
	/// Resets to the start of the stream. Shorthand for `seek(0, Begin)`.
	fn reset(&mut self) -> Result {
		self.seek(0, SeekOrigin::Begin)?;
		Ok(())
	}

	/// Seeks forward `offset` bytes relative to the current position, returning
	/// the new position.
	fn seek_forward(&mut self, offset: usize) -> Result<usize> {
		self.seek(to_offset(offset)?, SeekOrigin::Current)
	}

	/// Seeks back `offset` bytes relative to the current position, returning the
	/// new position.
	fn seek_back(&mut self, offset: usize) -> Result<usize> {
		self.seek(-to_offset(offset)?, SeekOrigin::Current)
	}

	/// Seeks to `offset` bytes from the start of the stream, returning the new
	/// position.
	fn seek_from_start(&mut self, offset: usize) -> Result<usize> {
		self.seek(to_offset(offset)?, SeekOrigin::Begin)
	}

	/// Seeks `offset` bytes relative to the end of the stream, returning the new
	/// position. A positive offset will seek beyond the stream, the behavior of
	/// which is implementation-dependent.
	fn seek_from_end(&mut self, offset: i64) -> Result<usize> {
		self.seek(offset, SeekOrigin::End)
	}
}

impl<S: Seekable + ?Sized> SeekableExt for S { }

fn to_offset(value: usize) -> Result<i64> {
	i64::try_from(value).map_err(|_| overflow())
}

/// A stream whose length can be set directly.
pub trait Resizable {
	/// Sets the length of the stream to `len` bytes, truncating it or extending it
	/// with zeros.
	fn set_len(&mut self, len: usize) -> Result;
}

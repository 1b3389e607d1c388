// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod progress;
mod seeking;
mod void;

pub use progress::*;
pub use seeking::*;
pub use void::*;

use std::{io, result};
use std::error::Error as StdError;
use std::ops::Range;
use amplify_derive::Display;
use crate::error;
use crate::error::Utf8Error;
use crate::memory::AllocError;
use ErrorKind::{Argument, Capacity, Disposed, Eos, Io, Seek, StaleView, Unsupported, Utf8};

pub type Error = error::Error<OperationKind, ErrorKind>;
pub type Result<T = ()> = result::Result<T, Error>;

#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq)]
pub enum OperationKind {
	#[default]
	#[display("unknown operation")]
	Unknown,
	#[display("read")]
	Read,
	#[display("write")]
	Write,
	#[display("seek")]
	Seek,
	#[display("flush")]
	Flush,
	#[display("set length")]
	SetLength,
	#[display("set capacity")]
	SetCapacity,
	#[display("set position")]
	SetPosition,
	#[display("get stream info")]
	Info,
	#[display("view")]
	View,
	#[display("copy")]
	Copy,
	#[display("{0}")]
	Other(&'static str)
}

impl error::OperationKind for OperationKind { }

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum ErrorKind {
	#[display("invalid argument: {0}")]
	Argument(&'static str),
	#[display("capacity exceeds the maximum allocation size")]
	Capacity,
	#[display("stream disposed")]
	Disposed,
	#[display("attempt to move before the beginning of the stream")]
	Seek,
	#[display("view outlived its buffer")]
	StaleView,
	#[display("premature end-of-stream")]
	Eos,
	#[display("invalid UTF-8")]
	Utf8,
	#[display("IO error")]
	Io,
	#[display("unsupported: {0}")]
	Unsupported(&'static str),
	#[display("{0}")]
	Other(&'static str),
}

impl error::ErrorKind for ErrorKind {
	fn other(message: &'static str) -> Self { Self::Other(message) }
}

impl ErrorKind {
	fn io_kind(self) -> io::ErrorKind {
		match self {
			Argument(_)    => io::ErrorKind::InvalidInput,
			Capacity       => io::ErrorKind::OutOfMemory,
			Disposed       => io::ErrorKind::NotConnected,
			Seek           => io::ErrorKind::InvalidInput,
			StaleView      => io::ErrorKind::InvalidData,
			Eos            => io::ErrorKind::UnexpectedEof,
			Utf8           => io::ErrorKind::InvalidData,
			Unsupported(_) => io::ErrorKind::Unsupported,
			Io | Self::Other(_) => io::ErrorKind::Other,
		}
	}
}

impl From<io::Error> for Error {
	fn from(value: io::Error) -> Self {
		// Errors round-tripped through std::io keep their kind and operation.
		if value.get_ref().is_some_and(|inner| inner.is::<Self>()) {
			return match value.into_inner().map(|inner| inner.downcast::<Self>()) {
				Some(Ok(error)) => *error,
				_ => Self::other(OperationKind::Unknown, "lost wrapped error", None)
			}
		}

		if let io::ErrorKind::UnexpectedEof = value.kind() {
			Self::eos(OperationKind::Unknown)
		} else {
			Self::io(OperationKind::Unknown, value)
		}
	}
}

impl From<Error> for io::Error {
	fn from(value: Error) -> Self {
		let kind = value.kind();
		if let Io = kind {
			if let Some(source) = value.into_source() {
				return match source.downcast::<io::Error>() {
					Ok(error) => *error,
					Err(source) => io::Error::new(kind.io_kind(), source)
				}
			}
			return io::Error::from(kind.io_kind())
		}

		io::Error::new(kind.io_kind(), value)
	}
}

impl Error {
	/// Creates a new "invalid argument" error.
	pub fn argument(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, Argument(message), None)
	}

	/// Creates a new "capacity exceeded" error.
	pub fn capacity(op: OperationKind) -> Self { Self::new(op, Capacity, None) }

	/// Creates a new "capacity exceeded" error caused by a failed allocation.
	pub fn alloc(op: OperationKind, error: AllocError) -> Self {
		Self::new(op, Capacity, Some(error.into()))
	}

	/// Creates a new "disposed" error.
	pub fn disposed(op: OperationKind) -> Self { Self::new(op, Disposed, None) }

	/// Creates a new error for seeking before the start of a stream.
	pub fn seek_before_start(op: OperationKind) -> Self { Self::new(op, Seek, None) }

	/// Creates a new "stale view" error.
	pub fn stale_view() -> Self { Self::new(OperationKind::View, StaleView, None) }

	/// Creates a new "end-of-stream" error.
	pub fn eos(op: OperationKind) -> Self { Self::new(op, Eos, None) }

	/// Creates a new UTF-8 decode error.
	pub fn utf8(op: OperationKind, error: Utf8Error) -> Self {
		Self::new(op, Utf8, Some(error.into()))
	}

	/// Creates a new IO error.
	pub fn io(op: OperationKind, error: io::Error) -> Self {
		Self::new(op, Io, Some(error.into()))
	}

	/// Creates a new "unsupported operation" error.
	pub fn unsupported(op: OperationKind, message: &'static str) -> Self {
		Self::new(op, Unsupported(message), None)
	}

	/// Returns `true` if the error was raised on a disposed stream.
	pub fn is_disposed(&self) -> bool { matches!(self.kind(), Disposed) }

	/// Returns `true` if the error was raised by seeking before the stream start.
	pub fn is_seek(&self) -> bool { matches!(self.kind(), Seek) }

	/// Returns `true` if the error is an end-of-stream error.
	pub fn is_eos(&self) -> bool { matches!(self.kind(), Eos) }

	/// Returns the source downcast into an IO Error, if possible.
	pub fn io_source(&self) -> Option<&io::Error> {
		self.source()?.downcast_ref()
	}

	/// Returns the source downcast into a UTF-8 Error, if possible.
	pub fn utf8_source(&self) -> Option<&Utf8Error> {
		self.source()?.downcast_ref()
	}
}

/// Checks that `offset..offset + count` lies within a buffer of length `len`,
/// returning the range.
pub(crate) fn check_range(
	op: OperationKind,
	len: usize,
	offset: usize,
	count: usize
) -> Result<Range<usize>> {
	match offset.checked_add(count) {
		Some(end) if end <= len => Ok(offset..end),
		_ if offset > len => Err(Error::argument(op, "offset is past the end of the buffer")),
		_ => Err(Error::argument(op, "buffer is too small for the requested count"))
	}
}

/// A data stream, either [`Source`] or [`Sink`].
pub trait Stream {
	/// Returns `true` if the stream is closed.
	fn is_closed(&self) -> bool;

	/// Closes the stream. Closing is idempotent, [`close`] may be called more than
	/// once with no effect.
	///
	/// [`close`]: Self::close
	fn close(&mut self) -> Result;
}

/// A data source.
pub trait Source: Stream {
	/// Reads at most `count` bytes into `buf`, starting at `offset`. Returns the
	/// number of bytes read, zero only at the end of the stream or when `count` is
	/// zero.
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize>;

	/// Reads at most `buf.len()` bytes into `buf`.
	#[inline]
	fn read_slice(&mut self, buf: &mut [u8]) -> Result<usize> {
		let count = buf.len();
		self.read(buf, 0, count)
	}

	/// Reads exactly `buf.len()` bytes into `buf`, failing with an end-of-stream
	/// error if the source ends first.
	fn read_slice_exact(&mut self, buf: &mut [u8]) -> Result {
		let mut read = 0;
		while read < buf.len() {
			match self.read(buf, read, buf.len() - read)? {
				0 => return Err(Error::eos(OperationKind::Read)),
				n => read += n
			}
		}
		Ok(())
	}

	/// Reads one byte, returning `None` at the end of the stream.
	fn read_byte(&mut self) -> Result<Option<u8>> {
		let mut byte = [0];
		Ok((self.read(&mut byte, 0, 1)? == 1).then_some(byte[0]))
	}
}

/// A data sink.
pub trait Sink: Stream {
	/// Writes `count` bytes from `buf`, starting at `offset`.
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result;

	/// Writes all of `buf`.
	#[inline]
	fn write_slice(&mut self, buf: &[u8]) -> Result {
		self.write(buf, 0, buf.len())
	}

	/// Writes one byte.
	#[inline]
	fn write_byte(&mut self, byte: u8) -> Result {
		self.write(&[byte], 0, 1)
	}

	/// Writes all buffered data to its final target.
	fn flush(&mut self) -> Result { Ok(()) }
}

impl<S: Stream + ?Sized> Stream for &mut S {
	fn is_closed(&self) -> bool { S::is_closed(self) }

	fn close(&mut self) -> Result { S::close(self) }
}

impl<S: Source + ?Sized> Source for &mut S {
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
		S::read(self, buf, offset, count)
	}
}

impl<S: Sink + ?Sized> Sink for &mut S {
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result {
		S::write(self, buf, offset, count)
	}

	fn flush(&mut self) -> Result { S::flush(self) }
}

impl<S: Seekable + ?Sized> Seekable for &mut S {
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
		S::seek(self, offset, origin)
	}

	fn seek_len(&mut self) -> Result<usize> { S::seek_len(self) }

	fn seek_pos(&mut self) -> Result<usize> { S::seek_pos(self) }
}

impl<S: Resizable + ?Sized> Resizable for &mut S {
	fn set_len(&mut self, len: usize) -> Result { S::set_len(self, len) }
}

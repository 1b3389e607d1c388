// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::fmt::{Debug, Formatter};
use super::{Error, OperationKind, Resizable, Result, Seekable, SeekOrigin, Sink, Source, Stream};

/// A stream wrapper reporting progress of its position through the wrapped
/// stream, relative to the position it started at.
///
/// After every read, write, and seek, `report` is called with the ratio of bytes
/// passed since the start position to the bytes between the start position and
/// the end of the stream. An empty span reports `1.0`. Writing past the end
/// extends the span.
pub struct ProgressStream<S: Seekable, F: FnMut(f32)> {
	inner: S,
	report: F,
	base: usize,
	current: usize,
	size: usize,
	leave_open: bool,
	closed: bool,
}

impl<S: Seekable, F: FnMut(f32)> ProgressStream<S, F> {
	/// Wraps `inner`, reporting to `report`. The current position of `inner` is
	/// taken as the start. With `leave_open`, closing the wrapper leaves `inner`
	/// open.
	pub fn new(mut inner: S, leave_open: bool, report: F) -> Result<Self> {
		let base = inner.seek_pos()?;
		let mut stream = Self {
			inner,
			report,
			base,
			current: 0,
			size: 0,
			leave_open,
			closed: false,
		};
		stream.update_size()?;
		Ok(stream)
	}

	/// Returns the current progress, between `0.0` and `1.0` unless the position
	/// has moved past the end.
	pub fn progress(&self) -> f32 {
		if self.size == 0 {
			1.0
		} else {
			self.current as f32 / self.size as f32
		}
	}

	/// Returns a reference to the wrapped stream.
	pub fn inner(&self) -> &S { &self.inner }

	/// Returns a mutable reference to the wrapped stream. Progress isn't reported
	/// for operations done through it.
	pub fn inner_mut(&mut self) -> &mut S { &mut self.inner }

	/// Consumes the wrapper, returning the wrapped stream.
	pub fn into_inner(self) -> S { self.inner }

	/// Sets the position of the wrapped stream, extending the span if it moves
	/// past the end.
	pub fn set_position(&mut self, position: usize) -> Result {
		self.ensure_open(OperationKind::SetPosition)?;
		let offset = i64::try_from(position).map_err(|_|
			Error::argument(OperationKind::SetPosition, "position overflowed")
		)?;
		let pos = self.inner.seek(offset, SeekOrigin::Begin)?;
		self.current = pos.saturating_sub(self.base);
		self.update_size()?;
		self.invoke_report();
		Ok(())
	}

	fn sync(&mut self) -> Result {
		self.current = self.inner.seek_pos()?.saturating_sub(self.base);
		self.update_size()
	}

	fn update_size(&mut self) -> Result {
		self.size = self.inner.seek_len()?.saturating_sub(self.base);
		Ok(())
	}

	fn ensure_open(&self, op: OperationKind) -> Result {
		if self.closed {
			Err(Error::disposed(op))
		} else {
			Ok(())
		}
	}

	fn invoke_report(&mut self) {
		let progress = self.progress();
		(self.report)(progress);
	}
}

impl<S: Seekable + Resizable, F: FnMut(f32)> ProgressStream<S, F> {
	/// Sets the length of the wrapped stream, resizing the span to match.
	pub fn set_len(&mut self, len: usize) -> Result {
		self.ensure_open(OperationKind::SetLength)?;
		self.inner.set_len(len)?;
		self.sync()?;
		self.invoke_report();
		Ok(())
	}
}

impl<S: Seekable + Resizable, F: FnMut(f32)> Resizable for ProgressStream<S, F> {
	fn set_len(&mut self, len: usize) -> Result { ProgressStream::set_len(self, len) }
}

impl<S: Seekable + Stream, F: FnMut(f32)> Stream for ProgressStream<S, F> {
	fn is_closed(&self) -> bool {
		self.closed || self.inner.is_closed()
	}

	/// Closes the wrapper, closing the wrapped stream too unless the wrapper was
	/// created to leave it open.
	fn close(&mut self) -> Result {
		if self.closed {
			return Ok(())
		}

		self.closed = true;
		if self.leave_open {
			Ok(())
		} else {
			self.inner.close()
		}
	}
}

impl<S: Seekable + Source, F: FnMut(f32)> Source for ProgressStream<S, F> {
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
		self.ensure_open(OperationKind::Read)?;
		let read = self.inner.read(buf, offset, count)?;
		self.current += read;
		self.invoke_report();
		Ok(read)
	}
}

impl<S: Seekable + Sink, F: FnMut(f32)> Sink for ProgressStream<S, F> {
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result {
		self.ensure_open(OperationKind::Write)?;
		self.inner.write(buf, offset, count)?;
		self.sync()?;
		self.invoke_report();
		Ok(())
	}

	fn flush(&mut self) -> Result {
		self.ensure_open(OperationKind::Flush)?;
		self.inner.flush()
	}
}

impl<S: Seekable, F: FnMut(f32)> Seekable for ProgressStream<S, F> {
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
		self.ensure_open(OperationKind::Seek)?;
		let pos = self.inner.seek(offset, origin)?;
		self.current = pos.saturating_sub(self.base);
		self.invoke_report();
		Ok(pos)
	}
}

impl<S: Seekable + Debug, F: FnMut(f32)> Debug for ProgressStream<S, F> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProgressStream")
			.field("inner", &self.inner)
			.field("base", &self.base)
			.field("current", &self.current)
			.field("size", &self.size)
			.field("leave_open", &self.leave_open)
			.finish_non_exhaustive()
	}
}

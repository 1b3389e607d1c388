// SPDX-License-Identifier: Apache-2.0

use super::{check_range, OperationKind, Result, Sink, Source, Stream};

/// Returns a [`Sink`] that writes to nowhere, dropping any data written to it.
pub fn void_sink() -> VoidSink { VoidSink::default() }

/// Returns a [`Source`] that reads from nowhere, producing no data.
pub fn void_source() -> VoidSource { VoidSource }

/// A [`Sink`] that writes to nowhere, dropping any data written to it. Keeps a
/// count of bytes dropped.
#[derive(Copy, Clone, Debug, Default)]
pub struct VoidSink {
	count: usize,
}

impl VoidSink {
	/// Returns the number of bytes written and dropped.
	pub fn count(&self) -> usize { self.count }
}

impl Stream for VoidSink {
	fn is_closed(&self) -> bool { false }

	fn close(&mut self) -> Result { Ok(()) }
}

impl Sink for VoidSink {
	/// Drops `count` bytes from `buf`.
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result {
		check_range(OperationKind::Write, buf.len(), offset, count)?;
		self.count = self.count.saturating_add(count);
		Ok(())
	}
}

/// A [`Source`] that reads from nowhere, producing no data.
#[derive(Copy, Clone, Debug, Default)]
pub struct VoidSource;

impl Stream for VoidSource {
	fn is_closed(&self) -> bool { false }

	fn close(&mut self) -> Result { Ok(()) }
}

impl Source for VoidSource {
	/// Reads nothing, returning `0`.
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
		check_range(OperationKind::Read, buf.len(), offset, count)?;
		Ok(0)
	}
}

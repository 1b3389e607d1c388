// SPDX-License-Identifier: Apache-2.0

use crate::RamStream;
use crate::streams::{check_range, Error, Resizable, Result, Sink};
use crate::streams::OperationKind::{Flush, SetLength, Write};

impl RamStream {
	/// Sets the length of the stream, truncating or extending it with zeros. The
	/// position is moved back to the new length if it was past it. Truncating
	/// advances the epoch, so handles to the cut bytes no longer resolve.
	pub fn set_len(&mut self, len: usize) -> Result {
		self.ensure_open(SetLength)?;

		let grown = self.ensure_capacity(len, SetLength)?;
		if !grown && len > self.length {
			self.zero_fill(self.length, len)
		}

		if len < self.length {
			self.epoch += 1;
		}

		self.length = len;
		self.position = self.position.min(len);
		Ok(())
	}

	/// Zeros `start..end` of the block, which must already be allocated.
	fn zero_fill(&mut self, start: usize, end: usize) {
		if let Some(block) = &mut self.block {
			block.fill(start, 0, end - start);
		}
	}
}

impl Resizable for RamStream {
	fn set_len(&mut self, len: usize) -> Result { RamStream::set_len(self, len) }
}

impl Sink for RamStream {
	/// Writes `count` bytes from `buf` at `offset` to the current position, growing
	/// the stream if they don't fit. Writing past the end zeros the gap between the
	/// old end and the position.
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result {
		self.ensure_open(Write)?;
		let range = check_range(Write, buf.len(), offset, count)?;

		let end = self.position
					  .checked_add(count)
					  .filter(|&end| end <= self.options.max_capacity())
					  .ok_or_else(|| Error::capacity(Write))?;

		if end > self.length {
			let grown = self.ensure_capacity(end, Write)?;
			// Fresh blocks are zeroed past the copied length; reused space may hold
			// bytes from before a truncation.
			if !grown && self.position > self.length {
				self.zero_fill(self.length, self.position);
			}
			self.length = end;
		}

		if let Some(block) = &mut self.block {
			block.copy_from(self.position, &buf[range]);
		}
		self.position = end;
		Ok(())
	}

	fn flush(&mut self) -> Result {
		self.ensure_open(Flush)
	}
}

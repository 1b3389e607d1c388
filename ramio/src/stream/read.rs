// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use crate::RamStream;
use crate::streams::{check_range, Result, Source};
use crate::streams::OperationKind::Read;

impl Source for RamStream {
	/// Reads at most `count` bytes into `buf` at `offset`, stopping at the end of
	/// the stream. Reading at or past the end returns `0` without moving.
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
		self.ensure_open(Read)?;
		let range = check_range(Read, buf.len(), offset, count)?;

		let count = min(self.length.saturating_sub(self.position), range.len());
		if count == 0 {
			return Ok(0)
		}

		if let Some(block) = &self.block {
			block.copy_to(self.position, &mut buf[range.start..range.start + count]);
		}
		self.position += count;
		Ok(count)
	}
}

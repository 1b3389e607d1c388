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

//! Exclusively-owned raw memory blocks backing a [`RamStream`].
//!
//! [`RamStream`]: crate::RamStream

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;
use std::slice;
use all_asserts::assert_le;
use thiserror::Error;

/// The largest single allocation the platform allows, in bytes.
pub const MAX_ALLOC_SIZE: usize = isize::MAX as usize;

/// A block allocation failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
	#[error("cannot allocate an empty block")]
	Empty,
	#[error("{0} bytes exceeds the maximum allocation size")]
	TooLarge(usize),
	#[error("the allocator could not provide {0} bytes")]
	Exhausted(usize),
}

/// A fixed-size, zero-initialized block of heap memory with a single owner. The
/// memory is released exactly once, when the block is dropped or [released].
///
/// Every byte of a block is initialized: allocation zeroes the memory, so bytes
/// never written read back as zero.
///
/// [released]: Self::release
pub struct Block {
	ptr: NonNull<u8>,
	len: usize,
}

// Safety: a block uniquely owns its allocation, like a Box<[u8]>.
unsafe impl Send for Block { }
unsafe impl Sync for Block { }

impl Block {
	/// Allocates a zeroed block of `len` bytes.
	pub fn allocate(len: usize) -> Result<Self, AllocError> {
		if len == 0 {
			return Err(AllocError::Empty)
		}

		let layout = Self::layout(len)?;
		// Safety: the layout has a non-zero size.
		let ptr = unsafe { alloc_zeroed(layout) };
		let ptr = NonNull::new(ptr).ok_or(AllocError::Exhausted(len))?;

		#[cfg(feature = "tracing")]
		tracing::trace!(len, "allocated block");
		Ok(Self { ptr, len })
	}

	/// Returns the allocated size in bytes.
	#[inline]
	pub fn len(&self) -> usize { self.len }

	/// Always returns `false`, blocks are never empty.
	#[inline]
	pub fn is_empty(&self) -> bool { false }

	/// Returns a pointer to the start of the block.
	#[inline]
	pub fn as_ptr(&self) -> *const u8 { self.ptr.as_ptr() }

	/// Returns a mutable pointer to the start of the block.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut u8 { self.ptr.as_ptr() }

	/// Returns a pointer `offset` bytes into the block.
	///
	/// # Panics
	///
	/// Panics if `offset` is past the end of the block.
	pub fn ptr_at(&self, offset: usize) -> *const u8 {
		assert_le!(offset, self.len);
		// Safety: offset is within or one past the end of the allocation.
		unsafe { self.as_ptr().add(offset) }
	}

	/// Returns a mutable pointer `offset` bytes into the block.
	///
	/// # Panics
	///
	/// Panics if `offset` is past the end of the block.
	pub fn ptr_at_mut(&mut self, offset: usize) -> *mut u8 {
		assert_le!(offset, self.len);
		// Safety: offset is within or one past the end of the allocation.
		unsafe { self.as_mut_ptr().add(offset) }
	}

	/// Returns the whole block as a slice.
	#[inline]
	pub fn as_slice(&self) -> &[u8] {
		// Safety: the memory is initialized on allocation and owned by this block.
		unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
	}

	/// Returns the whole block as a mutable slice.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		// Safety: the memory is initialized on allocation and uniquely borrowed.
		unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
	}

	/// Copies `src` into the block at `offset`.
	///
	/// # Panics
	///
	/// Panics if `src` doesn't fit at `offset`.
	pub fn copy_from(&mut self, offset: usize, src: &[u8]) {
		let count = src.len();
		assert_le!(count, self.len.saturating_sub(offset));
		let dst = self.ptr_at_mut(offset);
		// Safety: the range is in bounds, and src can't alias memory we borrow
		// mutably.
		unsafe { dst.copy_from_nonoverlapping(src.as_ptr(), count) }
	}

	/// Copies bytes from the block at `offset` into `dst`, filling it.
	///
	/// # Panics
	///
	/// Panics if the block has fewer than `dst.len()` bytes after `offset`.
	pub fn copy_to(&self, offset: usize, dst: &mut [u8]) {
		let count = dst.len();
		assert_le!(count, self.len.saturating_sub(offset));
		let src = self.ptr_at(offset);
		// Safety: the range is in bounds, and dst can't alias memory we borrow.
		unsafe { src.copy_to_nonoverlapping(dst.as_mut_ptr(), count) }
	}

	/// Copies the first `count` bytes of `other` to the start of this block.
	///
	/// # Panics
	///
	/// Panics if `count` exceeds either block's size.
	pub fn copy_prefix(&mut self, other: &Block, count: usize) {
		assert_le!(count, other.len);
		assert_le!(count, self.len);
		// Safety: both ranges are in bounds; two blocks never share memory.
		unsafe { self.as_mut_ptr().copy_from_nonoverlapping(other.as_ptr(), count) }
	}

	/// Fills `count` bytes at `offset` with `value`.
	///
	/// # Panics
	///
	/// Panics if the range is out of bounds.
	pub fn fill(&mut self, offset: usize, value: u8, count: usize) {
		assert_le!(count, self.len.saturating_sub(offset));
		let dst = self.ptr_at_mut(offset);
		// Safety: the range is in bounds.
		unsafe { dst.write_bytes(value, count) }
	}

	/// Releases the block's memory. Equivalent to dropping it.
	#[inline]
	pub fn release(self) { drop(self) }

	fn layout(len: usize) -> Result<Layout, AllocError> {
		Layout::array::<u8>(len).map_err(|_| AllocError::TooLarge(len))
	}
}

impl Drop for Block {
	fn drop(&mut self) {
		#[cfg(feature = "tracing")]
		tracing::trace!(len = self.len, "released block");

		// The layout was valid when the block was allocated.
		if let Ok(layout) = Self::layout(self.len) {
			// Safety: ptr was allocated with this layout and is released once.
			unsafe { dealloc(self.ptr.as_ptr(), layout) }
		}
	}
}

impl Debug for Block {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Block")
			.field("ptr", &self.ptr)
			.field("len", &self.len)
			.finish()
	}
}

impl AsRef<[u8]> for Block {
	fn as_ref(&self) -> &[u8] { self.as_slice() }
}

impl AsMut<[u8]> for Block {
	fn as_mut(&mut self) -> &mut [u8] { self.as_mut_slice() }
}

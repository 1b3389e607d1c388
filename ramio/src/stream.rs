// SPDX-License-Identifier: Apache-2.0

mod growth;
mod options;
mod read;
mod write;

pub use growth::*;
pub use options::*;

use std::{fmt, mem};
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::memory::Block;
use crate::streams::{Error, OperationKind, Result, Seekable, SeekOrigin, Sink, Stream};
use crate::streams::OperationKind::{Info, SetCapacity, SetPosition};
use crate::view::{View, ViewHandle};

/// A growable, randomly-addressable byte stream backed by a single raw memory
/// [`Block`] that it owns and resizes.
///
/// The stream tracks three sizes: its *capacity*, the size of its block; its
/// *length*, the number of valid bytes, never more than the capacity; and its
/// *position*, the read/write cursor, which may sit past the length. Reading
/// never passes the length. Writing past the length grows the stream, zeroing any
/// gap between the old length and the position.
///
/// Every operation validates its arguments before changing any state: a failed
/// operation leaves the stream as it was. Once [disposed], every operation fails
/// with a [`Disposed`](crate::streams::ErrorKind::Disposed) error.
///
/// The live bytes can be borrowed without copying through a [`View`]. Views are
/// tied to the stream and buffer they were taken from; replacing the buffer,
/// truncating the stream, or disposing it advances the stream's *epoch*,
/// invalidating detached [`ViewHandle`]s.
///
/// [disposed]: Self::dispose
pub struct RamStream {
	id: u64,
	block: Option<Block>,
	length: usize,
	position: usize,
	epoch: u64,
	disposed: bool,
	options: StreamOptions,
}

impl Default for RamStream {
	fn default() -> Self { Self::new() }
}

impl Debug for RamStream {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("RamStream")
			.field("id", &self.id)
			.field("capacity", &self.block_len())
			.field("length", &self.length)
			.field("position", &self.position)
			.field("epoch", &self.epoch)
			.field("disposed", &self.disposed)
			.finish_non_exhaustive()
	}
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

impl RamStream {
	/// Creates an empty stream with no capacity.
	pub fn new() -> Self {
		Self {
			id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
			block: None,
			length: 0,
			position: 0,
			epoch: 0,
			disposed: false,
			options: StreamOptions::new(),
		}
	}

	/// Creates an empty stream with at least `capacity` bytes allocated.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		Self::with_options(StreamOptions::new().with_initial_capacity(capacity))
	}

	/// Creates an empty stream with `options`, allocating the initial capacity.
	pub fn with_options(options: StreamOptions) -> Result<Self> {
		let mut stream = Self { options, ..Self::new() };
		stream.set_capacity(options.initial_capacity())?;
		Ok(stream)
	}

	/// Creates a stream containing a copy of `data`, positioned at the start.
	pub fn from_slice(data: &[u8]) -> Result<Self> {
		let mut stream = Self::with_capacity(data.len())?;
		stream.write_slice(data)?;
		stream.position = 0;
		Ok(stream)
	}

	/// Returns the stream's options.
	#[inline]
	pub fn options(&self) -> StreamOptions { self.options }

	/// Returns the number of bytes allocated for the stream.
	pub fn capacity(&self) -> Result<usize> {
		self.ensure_open(Info)?;
		Ok(self.block_len())
	}

	/// Sets the number of bytes allocated for the stream, reallocating and copying
	/// the stream's contents into a new block if it changes. A capacity of zero
	/// releases the block. Fails if `capacity` is less than the stream length or
	/// more than the maximum capacity.
	pub fn set_capacity(&mut self, capacity: usize) -> Result {
		self.ensure_open(SetCapacity)?;

		if capacity < self.length {
			return Err(Error::argument(SetCapacity, "capacity is less than the stream length"))
		}

		if capacity > self.options.max_capacity() {
			return Err(Error::capacity(SetCapacity))
		}

		if capacity != self.block_len() {
			self.replace_block(capacity)?;
		}
		Ok(())
	}

	/// Returns the length of the stream in bytes.
	pub fn len(&self) -> Result<usize> {
		self.ensure_open(Info)?;
		Ok(self.length)
	}

	/// Returns `true` if the stream has a length of zero.
	pub fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}

	/// Returns the current position within the stream.
	pub fn position(&self) -> Result<usize> {
		self.ensure_open(Info)?;
		Ok(self.position)
	}

	/// Sets the current position within the stream. The position may be past the
	/// end of the stream, but not past the maximum capacity.
	pub fn set_position(&mut self, position: usize) -> Result {
		self.ensure_open(SetPosition)?;

		if position > self.options.max_capacity() {
			return Err(Error::argument(SetPosition, "position exceeds the maximum allocation size"))
		}

		self.position = position;
		Ok(())
	}

	/// Returns the number of times the stream's buffer has been replaced,
	/// truncated, or released.
	#[inline]
	pub fn epoch(&self) -> u64 { self.epoch }

	/// Borrows the live contents of the stream without copying.
	pub fn view(&self) -> Result<View<'_>> {
		self.ensure_open(OperationKind::View)?;
		Ok(View::new(self.live(self.length), self.id, self.epoch))
	}

	/// Returns a detached handle to the live contents of the stream, which can be
	/// resolved into a [`View`] as long as the buffer isn't replaced.
	pub fn view_handle(&self) -> Result<ViewHandle> {
		Ok(self.view()?.handle())
	}

	/// Resolves a detached view `handle`, failing with a stale view error if it
	/// was taken from another stream, or if the buffer it was taken from has since
	/// been replaced, truncated, or released.
	pub fn resolve(&self, handle: ViewHandle) -> Result<View<'_>> {
		self.ensure_open(OperationKind::View)?;

		if handle.stream() != self.id ||
		   handle.epoch()  != self.epoch ||
		   handle.len()    >  self.length {
			return Err(Error::stale_view())
		}

		Ok(View::new(self.live(handle.len()), self.id, self.epoch))
	}

	/// Copies the live contents of the stream into a vector.
	pub fn to_vec(&self) -> Result<Vec<u8>> {
		Ok(self.view()?.to_vec())
	}

	/// Returns `true` if the stream was disposed.
	#[inline]
	pub fn is_disposed(&self) -> bool { self.disposed }

	/// Releases the stream's buffer, making the stream unusable. Disposal is
	/// idempotent, [`dispose`] may be called more than once with no effect.
	///
	/// [`dispose`]: Self::dispose
	pub fn dispose(&mut self) {
		if self.disposed {
			return
		}

		if let Some(block) = self.block.take() {
			block.release();
		}

		self.length = 0;
		self.position = 0;
		self.epoch += 1;
		self.disposed = true;

		#[cfg(feature = "tracing")]
		tracing::debug!(epoch = self.epoch, "disposed stream");
	}

	fn ensure_open(&self, op: OperationKind) -> Result {
		if self.disposed {
			Err(Error::disposed(op))
		} else {
			Ok(())
		}
	}

	fn block_len(&self) -> usize {
		self.block.as_ref().map_or(0, Block::len)
	}

	/// Returns the first `len` bytes of the block.
	fn live(&self, len: usize) -> &[u8] {
		self.block
			.as_ref()
			.map_or(&[][..], |block| &block.as_slice()[..len])
	}

	/// Grows the capacity to fit `target` bytes if needed, returning `true` if the
	/// block was replaced. New blocks are zeroed past the copied length.
	fn ensure_capacity(&mut self, target: usize, op: OperationKind) -> Result<bool> {
		let min_growth = self.options.min_growth();
		let max_capacity = self.options.max_capacity();
		if target > max_capacity {
			return Err(Error::capacity(op))
		}

		match grow_target(self.block_len(), target, min_growth, max_capacity) {
			Some(capacity) => {
				self.replace_block(capacity).map_err(|err| err.with_operation(op))?;
				Ok(true)
			}
			None => Ok(false)
		}
	}

	/// Replaces the block with one of `capacity` bytes, copying the stream's
	/// contents. The old block is released only after the new one is allocated,
	/// so a failed allocation leaves the stream untouched.
	fn replace_block(&mut self, capacity: usize) -> Result {
		let block = if capacity > 0 {
			let mut block = Block::allocate(capacity).map_err(|err| Error::alloc(SetCapacity, err))?;
			if let Some(old) = &self.block {
				block.copy_prefix(old, self.length);
			}
			Some(block)
		} else {
			None
		};

		#[cfg(feature = "tracing")]
		let old_capacity = self.block_len();
		if let Some(old) = mem::replace(&mut self.block, block) {
			old.release();
		}
		self.epoch += 1;

		#[cfg(feature = "tracing")]
		tracing::debug!(
			old_capacity,
			capacity = self.block_len(),
			length = self.length,
			epoch = self.epoch,
			"replaced stream buffer"
		);
		Ok(())
	}
}

impl Stream for RamStream {
	fn is_closed(&self) -> bool { self.disposed }

	/// Disposes the stream.
	fn close(&mut self) -> Result {
		self.dispose();
		Ok(())
	}
}

impl Seekable for RamStream {
	/// Seeks `offset` bytes from `origin`, returning the new position. Offsets are
	/// relative to the start, the current position, or the length. Fails without
	/// moving if the new position would be negative or past the maximum capacity.
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
		self.ensure_open(OperationKind::Seek)?;

		let max_capacity = self.options.max_capacity();
		if u64::try_from(offset).is_ok_and(|offset| offset > max_capacity as u64) {
			return Err(Error::argument(OperationKind::Seek, "offset exceeds the maximum allocation size"))
		}

		let position = origin.to_pos(offset, self.position, self.length)?;
		if position > max_capacity {
			return Err(Error::argument(OperationKind::Seek, "position exceeds the maximum allocation size"))
		}

		self.position = position;
		Ok(position)
	}

	fn seek_len(&mut self) -> Result<usize> { self.len() }

	fn seek_pos(&mut self) -> Result<usize> { self.position() }
}

// SPDX-License-Identifier: Apache-2.0

mod hash;

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;

/// A borrowed, read-only window onto the live bytes of a [`RamStream`], valid for
/// as long as the stream isn't mutated.
///
/// [`RamStream`]: crate::RamStream
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct View<'a> {
	data: &'a [u8],
	stream: u64,
	epoch: u64,
}

/// A detached reference to a [`View`], recording the stream, buffer epoch, and
/// length it was taken at. Resolving it with [`RamStream::resolve`] fails on any
/// other stream, and once the stream's buffer is replaced, truncated, or released.
///
/// [`RamStream::resolve`]: crate::RamStream::resolve
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewHandle {
	stream: u64,
	epoch: u64,
	len: usize,
}

impl<'a> View<'a> {
	pub(crate) fn new(data: &'a [u8], stream: u64, epoch: u64) -> Self {
		Self { data, stream, epoch }
	}

	/// Returns the number of bytes in view.
	#[inline]
	pub fn len(&self) -> usize { self.data.len() }

	#[inline]
	pub fn is_empty(&self) -> bool { self.data.is_empty() }

	/// Returns the viewed bytes, borrowed for the lifetime of the stream.
	#[inline]
	pub fn as_slice(&self) -> &'a [u8] { self.data }

	/// Returns the epoch of the buffer in view.
	#[inline]
	pub fn epoch(&self) -> u64 { self.epoch }

	/// Detaches the view into a handle that can be resolved later.
	pub fn handle(&self) -> ViewHandle {
		ViewHandle { stream: self.stream, epoch: self.epoch, len: self.len() }
	}
}

impl ViewHandle {
	/// Returns the identifier of the stream the handle was taken from.
	#[inline]
	pub fn stream(&self) -> u64 { self.stream }

	/// Returns the epoch of the buffer the handle was taken from.
	#[inline]
	pub fn epoch(&self) -> u64 { self.epoch }

	/// Returns the length of the view the handle was taken from.
	#[inline]
	pub fn len(&self) -> usize { self.len }

	#[inline]
	pub fn is_empty(&self) -> bool { self.len == 0 }
}

impl Deref for View<'_> {
	type Target = [u8];

	fn deref(&self) -> &[u8] { self.data }
}

impl AsRef<[u8]> for View<'_> {
	fn as_ref(&self) -> &[u8] { self.data }
}

impl PartialEq<[u8]> for View<'_> {
	fn eq(&self, other: &[u8]) -> bool { self.data == other }
}

impl Debug for View<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("View")
			.field("len", &self.len())
			.field("epoch", &self.epoch)
			.finish()
	}
}

#[cfg(feature = "bytes")]
impl From<View<'_>> for bytes::Bytes {
	fn from(value: View<'_>) -> Self {
		bytes::Bytes::copy_from_slice(value.data)
	}
}

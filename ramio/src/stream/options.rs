// SPDX-License-Identifier: Apache-2.0

use crate::memory::MAX_ALLOC_SIZE;

/// The default minimum capacity allocated when a stream first grows.
pub const DEFAULT_MIN_GROWTH: usize = 1024;

/// Options for tuning [`RamStream`](super::RamStream)'s memory behavior.
///
/// # Initial capacity
///
/// The capacity allocated when the stream is created. Defaults to `0`, allocating
/// nothing until the first write.
///
/// # Minimum growth
///
/// The smallest capacity allocated when the stream grows. Defaults to `1024B`.
/// Past this, the capacity doubles on each growth, so that a run of small writes
/// costs an amortized constant number of copies per byte.
///
/// # Maximum capacity
///
/// The ceiling for the stream's capacity, length, and position. Defaults to the
/// platform's maximum allocation size, and can never exceed it. Once doubling the
/// capacity would pass this ceiling, growth allocates the ceiling itself.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StreamOptions {
	initial_capacity: usize,
	min_growth: usize,
	max_capacity: usize,
}

impl Default for StreamOptions {
	fn default() -> Self { Self::new() }
}

impl StreamOptions {
	/// Creates a new set of stream options.
	pub const fn new() -> Self {
		Self {
			initial_capacity: 0,
			min_growth: DEFAULT_MIN_GROWTH,
			max_capacity: MAX_ALLOC_SIZE,
		}
	}

	/// Returns the initial capacity.
	#[inline]
	pub const fn initial_capacity(&self) -> usize { self.initial_capacity }

	/// Returns the minimum growth capacity.
	#[inline]
	pub const fn min_growth(&self) -> usize { self.min_growth }

	/// Returns the maximum capacity.
	#[inline]
	pub const fn max_capacity(&self) -> usize { self.max_capacity }

	/// Sets the initial capacity.
	#[inline]
	pub fn set_initial_capacity(&mut self, value: usize) {
		self.initial_capacity = value;
	}

	/// Sets the minimum growth capacity.
	#[inline]
	pub fn set_min_growth(&mut self, value: usize) {
		self.min_growth = value;
	}

	/// Sets the maximum capacity, clamped to the platform's maximum allocation
	/// size.
	#[inline]
	pub fn set_max_capacity(&mut self, value: usize) {
		self.max_capacity = value.min(MAX_ALLOC_SIZE);
	}

	/// Sets the initial capacity.
	#[inline]
	pub const fn with_initial_capacity(mut self, value: usize) -> Self {
		self.initial_capacity = value;
		self
	}

	/// Sets the minimum growth capacity.
	#[inline]
	pub const fn with_min_growth(mut self, value: usize) -> Self {
		self.min_growth = value;
		self
	}

	/// Sets the maximum capacity, clamped to the platform's maximum allocation
	/// size.
	#[inline]
	pub const fn with_max_capacity(mut self, value: usize) -> Self {
		self.max_capacity = if value < MAX_ALLOC_SIZE { value } else { MAX_ALLOC_SIZE };
		self
	}
}

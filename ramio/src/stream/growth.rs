// SPDX-License-Identifier: Apache-2.0

use std::cmp::max;

/// Computes the capacity to grow to so that `target` bytes fit, given the current
/// `capacity`, or `None` if `target` already fits.
///
/// The new capacity is the largest of `target`, `min_growth`, and double the
/// current capacity, never more than `max_capacity`. When doubling would pass
/// `max_capacity`, the result is `max_capacity` itself. The result is never less
/// than `target`, even when `target` is over the ceiling; callers reject such
/// targets before growing.
pub fn grow_target(
	capacity: usize,
	target: usize,
	min_growth: usize,
	max_capacity: usize
) -> Option<usize> {
	if target <= capacity {
		return None
	}

	let doubled = capacity.saturating_mul(2);
	let new_capacity = if doubled > max_capacity {
		max_capacity
	} else {
		max(max(target, min_growth), doubled)
	};
	Some(new_capacity.min(max_capacity).max(target))
}

#[cfg(test)]
mod test {
	use quickcheck::TestResult;
	use quickcheck_macros::quickcheck;
	use super::grow_target;

	const MIN: usize = 1024;

	#[test]
	fn fits() {
		assert_eq!(grow_target(2048, 2048, MIN, usize::MAX), None);
		assert_eq!(grow_target(2048, 0, MIN, usize::MAX), None);
	}

	#[test]
	fn minimum() {
		assert_eq!(grow_target(0, 1, MIN, usize::MAX), Some(1024));
		assert_eq!(grow_target(0, 5000, MIN, usize::MAX), Some(5000));
	}

	#[test]
	fn doubles() {
		assert_eq!(grow_target(1024, 1025, MIN, usize::MAX), Some(2048));
		assert_eq!(grow_target(1024, 4096, MIN, usize::MAX), Some(4096));
		assert_eq!(grow_target(3000, 3001, MIN, usize::MAX), Some(6000));
	}

	#[test]
	fn clamps_to_ceiling() {
		// Doubling passes the ceiling, grow to the ceiling instead.
		assert_eq!(grow_target(3000, 3001, MIN, 5000), Some(5000));
		// The minimum alone passes the ceiling.
		assert_eq!(grow_target(0, 10, MIN, 100), Some(100));
		assert_eq!(grow_target(60, 100, MIN, 100), Some(100));
		// Targets past the ceiling are returned as-is.
		assert_eq!(grow_target(60, 200, MIN, 100), Some(200));
	}

	#[test]
	fn saturates() {
		assert_eq!(grow_target(usize::MAX - 1, usize::MAX, MIN, usize::MAX), Some(usize::MAX));
	}

	#[quickcheck]
	fn bounds(capacity: usize, target: usize, min_growth: u16, max_capacity: usize) -> TestResult {
		if target > max_capacity {
			return TestResult::discard()
		}

		TestResult::from_bool(
			match grow_target(capacity, target, min_growth as usize, max_capacity) {
				None => target <= capacity,
				Some(new) => new >= target && new <= max_capacity && target > capacity
			}
		)
	}
}

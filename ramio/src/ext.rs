// SPDX-License-Identifier: Apache-2.0

//! Convenience operations on any [`Source`] or [`Sink`]: bounded copies,
//! zero-terminated strings, and fixed-layout records.

use std::cmp::min;
use std::mem::size_of;
use bytemuck::Pod;
use simdutf8::compat::from_utf8;
use crate::error::Utf8Error;
use crate::streams::{Error, OperationKind, Result, Sink, Source};

/// The default buffer size of [`copy`], `1MiB`.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 1 << 20;

/// Copies at most `count` bytes from `source` to `sink` through a buffer of at
/// most `buffer_size` bytes, stopping early if the source ends. Returns the number
/// of bytes copied.
pub fn copy(
	source: &mut (impl Source + ?Sized),
	sink: &mut (impl Sink + ?Sized),
	count: usize,
	buffer_size: usize
) -> Result<usize> {
	if buffer_size == 0 {
		return Err(Error::argument(OperationKind::Copy, "buffer size must be greater than zero"))
	}

	let mut buffer = vec![0; min(buffer_size, count)];
	let mut copied = 0;
	while copied < count {
		let limit = min(buffer.len(), count - copied);
		let read = source.read(&mut buffer, 0, limit)
						 .map_err(|err| err.with_operation(OperationKind::Copy))?;
		if read == 0 { break }

		sink.write(&buffer, 0, read)
			.map_err(|err| err.with_operation(OperationKind::Copy))?;
		copied += read;
	}

	#[cfg(feature = "tracing")]
	tracing::trace!(copied, count, "copied bytes");
	Ok(copied)
}

pub trait SourceExt: Source {
	/// Copies at most `count` bytes into `sink` with the default buffer size.
	fn copy_to(&mut self, sink: &mut (impl Sink + ?Sized), count: usize) -> Result<usize> {
		copy(self, sink, count, DEFAULT_COPY_BUFFER_SIZE)
	}

	/// Copies at most `count` bytes into `sink` through a buffer of `buffer_size`
	/// bytes.
	fn copy_to_with(
		&mut self,
		sink: &mut (impl Sink + ?Sized),
		count: usize,
		buffer_size: usize
	) -> Result<usize> {
		copy(self, sink, count, buffer_size)
	}

	/// Reads a UTF-8 string terminated by a zero byte or the end of the source. The
	/// terminator is consumed but not returned.
	fn read_cstr(&mut self) -> Result<String> {
		let mut bytes = Vec::new();
		while let Some(byte) = self.read_byte()? {
			if byte == 0 { break }
			bytes.push(byte);
		}

		if let Err(error) = from_utf8(&bytes) {
			return Err(Error::utf8(OperationKind::Read, Utf8Error::from_compat(error, &bytes)))
		}
		// Safety: validated above.
		Ok(unsafe { String::from_utf8_unchecked(bytes) })
	}

	/// Reads a fixed-layout record, failing with an end-of-stream error if the
	/// source ends first.
	fn read_record<T: Pod>(&mut self) -> Result<T> {
		let mut value = T::zeroed();
		self.read_slice_exact(bytemuck::bytes_of_mut(&mut value))?;
		Ok(value)
	}

	/// Reads `count` fixed-layout records, failing with an end-of-stream error if
	/// the source ends first. Records are read in bounded chunks, so a `count`
	/// larger than the source fails at its end rather than allocating up front.
	fn read_records<T: Pod>(&mut self, count: usize) -> Result<Vec<T>> {
		let size = size_of::<T>();
		if count.checked_mul(size).map_or(true, |len| len > isize::MAX as usize) {
			return Err(Error::argument(OperationKind::Read, "record count overflows the address space"))
		}

		if size == 0 {
			return Ok(vec![T::zeroed(); count])
		}

		let chunk_len = (DEFAULT_COPY_BUFFER_SIZE / size).max(1);
		let mut records = Vec::new();
		while records.len() < count {
			let start = records.len();
			let chunk = min(count - start, chunk_len);
			records.try_reserve_exact(chunk)
				   .map_err(|_| Error::capacity(OperationKind::Read))?;
			records.resize(start + chunk, T::zeroed());
			self.read_slice_exact(bytemuck::cast_slice_mut(&mut records[start..]))?;
		}
		Ok(records)
	}
}

impl<S: Source + ?Sized> SourceExt for S { }

pub trait SinkExt: Sink {
	/// Writes `value` as UTF-8 followed by a zero byte.
	fn write_cstr(&mut self, value: &str) -> Result {
		self.write_slice(value.as_bytes())?;
		self.write_byte(0)
	}

	/// Writes the bytes of a fixed-layout record.
	fn write_record<T: Pod>(&mut self, value: &T) -> Result {
		self.write_slice(bytemuck::bytes_of(value))
	}

	/// Writes the bytes of a slice of fixed-layout records.
	fn write_records<T: Pod>(&mut self, values: &[T]) -> Result {
		if size_of::<T>() == 0 {
			return Ok(())
		}
		self.write_slice(bytemuck::cast_slice(values))
	}
}

impl<S: Sink + ?Sized> SinkExt for S { }

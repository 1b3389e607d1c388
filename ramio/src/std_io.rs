// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use crate::RamStream;
use crate::streams::{check_range, Error, OperationKind, Result, Seekable, SeekOrigin, Sink, Source, Stream};

/// A [`Source`] reading from a wrapped [`Read`]er.
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
	reader: Option<R>,
}

/// A [`Sink`] writing to a wrapped [`Write`]r.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
	writer: Option<W>,
}

impl<R: Read> From<R> for ReaderSource<R> {
	fn from(reader: R) -> Self {
		Self { reader: Some(reader) }
	}
}

impl<W: Write> From<W> for WriterSink<W> {
	fn from(writer: W) -> Self {
		Self { writer: Some(writer) }
	}
}

impl<R: Read> ReaderSource<R> {
	/// Consumes the source, returning the reader, or `None` if it was closed.
	pub fn into_inner(self) -> Option<R> { self.reader }

	fn reader(&mut self, op: OperationKind) -> Result<&mut R> {
		self.reader.as_mut().ok_or_else(|| Error::disposed(op))
	}
}

impl<W: Write> WriterSink<W> {
	/// Consumes the sink, returning the writer, or `None` if it was closed.
	pub fn into_inner(self) -> Option<W> { self.writer }

	fn writer(&mut self, op: OperationKind) -> Result<&mut W> {
		self.writer.as_mut().ok_or_else(|| Error::disposed(op))
	}
}

impl<R: Read> Stream for ReaderSource<R> {
	fn is_closed(&self) -> bool {
		self.reader.is_none()
	}

	/// Closes the underlying reader by letting it fall out of scope. Subsequent
	/// reads will fail.
	fn close(&mut self) -> Result {
		self.reader.take();
		Ok(())
	}
}

impl<R: Read> Source for ReaderSource<R> {
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize> {
		let range = check_range(OperationKind::Read, buf.len(), offset, count)?;
		loop {
			match self.reader(OperationKind::Read)?.read(&mut buf[range.clone()]) {
				Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
				result => break result.map_err(|err| Error::io(OperationKind::Read, err))
			}
		}
	}
}

impl<W: Write> Stream for WriterSink<W> {
	fn is_closed(&self) -> bool {
		self.writer.is_none()
	}

	/// Flushes and closes the underlying writer by letting it fall out of scope.
	/// Subsequent writes will fail.
	fn close(&mut self) -> Result {
		if let Some(mut writer) = self.writer.take() {
			writer.flush().map_err(|err| Error::io(OperationKind::Flush, err))?;
		}
		Ok(())
	}
}

impl<W: Write> Sink for WriterSink<W> {
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> Result {
		let range = check_range(OperationKind::Write, buf.len(), offset, count)?;
		self.writer(OperationKind::Write)?
			.write_all(&buf[range])
			.map_err(|err| Error::io(OperationKind::Write, err))
	}

	fn flush(&mut self) -> Result {
		self.writer(OperationKind::Flush)?
			.flush()
			.map_err(|err| Error::io(OperationKind::Flush, err))
	}
}

fn seek_std(seek: &mut impl Seek, offset: i64, origin: SeekOrigin) -> Result<usize> {
	let pos = seek.seek(origin.into_seek_from(offset)?)
				  .map_err(|err| Error::io(OperationKind::Seek, err))?;
	usize::try_from(pos).map_err(|_|
		Error::argument(OperationKind::Seek, "position exceeds the address space")
	)
}

impl<R: Read + Seek> Seekable for ReaderSource<R> {
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
		seek_std(self.reader(OperationKind::Seek)?, offset, origin)
	}
}

impl<W: Write + Seek> Seekable for WriterSink<W> {
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
		seek_std(self.writer(OperationKind::Seek)?, offset, origin)
	}
}

impl Read for RamStream {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		Ok(Source::read_slice(self, buf)?)
	}
}

impl Write for RamStream {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Sink::write_slice(self, buf)?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(Sink::flush(self)?)
	}
}

impl Seek for RamStream {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		let (offset, origin) = SeekOrigin::from_seek_from(pos)?;
		Ok(Seekable::seek(self, offset, origin)? as u64)
	}
}

// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::time::SystemTime;
use crate::RamStream;
use crate::streams::{self, OperationKind, Seekable, SeekOrigin, Sink, Source, Stream};
use super::{Archive, ArchiveEntry, ArchiveMode, ArchiveOperation, Error, Result};
use ArchiveOperation::{Create, Delete, Get, List, Open, SetTime};

/// An in-memory [`Archive`] storing each entry in a [`RamStream`].
#[derive(Debug, Default)]
pub struct RamArchive {
	entries: BTreeMap<String, RamEntry>,
	mode: ArchiveMode,
	closed: bool,
}

/// An entry of a [`RamArchive`].
#[derive(Debug)]
pub struct RamEntry {
	full_name: String,
	data: RamStream,
	last_write_time: SystemTime,
	mode: ArchiveMode,
}

/// A stream over the contents of a [`RamEntry`], allowing only the operations
/// its archive's mode permits. Writing updates the entry's last write time.
/// Closing the stream leaves the entry intact.
#[derive(Debug)]
pub struct EntryStream<'a> {
	entry: &'a mut RamEntry,
	closed: bool,
}

impl RamArchive {
	/// Creates an empty archive in `mode`.
	pub fn new(mode: ArchiveMode) -> Self {
		Self { mode, ..Self::default() }
	}

	/// Creates an archive in `mode` holding copies of the named `entries`. Entries
	/// are added regardless of mode, so that read-only archives can be populated.
	pub fn from_entries<'a>(
		mode: ArchiveMode,
		entries: impl IntoIterator<Item = (&'a str, &'a [u8])>
	) -> Result<Self> {
		let mut archive = Self::new(mode);
		for (name, data) in entries {
			archive.insert(name, RamStream::from_slice(data)?)?;
		}
		Ok(archive)
	}

	fn insert(&mut self, name: &str, data: RamStream) -> Result<&mut RamEntry> {
		check_name(Create, name)?;
		if self.entries.contains_key(name) {
			return Err(Error::argument(Create, "an entry with this name already exists"))
		}

		let entry = RamEntry {
			full_name: name.to_owned(),
			data,
			last_write_time: SystemTime::now(),
			mode: self.mode,
		};

		#[cfg(feature = "tracing")]
		tracing::trace!(name, "created archive entry");
		Ok(self.entries.entry(name.to_owned()).or_insert(entry))
	}

	fn ensure_open(&self, op: ArchiveOperation) -> Result {
		if self.closed {
			Err(Error::disposed(op))
		} else {
			Ok(())
		}
	}

	fn ensure_readable(&self, op: ArchiveOperation) -> Result {
		self.ensure_open(op)?;
		if self.mode.can_read() {
			Ok(())
		} else {
			Err(Error::unsupported(op, "archive does not support reading"))
		}
	}
}

fn check_name(op: ArchiveOperation, name: &str) -> Result {
	if name.is_empty() {
		Err(Error::argument(op, "entry name is empty"))
	} else {
		Ok(())
	}
}

impl Archive for RamArchive {
	type Entry = RamEntry;

	fn mode(&self) -> ArchiveMode { self.mode }

	fn is_closed(&self) -> bool { self.closed }

	fn entry_names(&self) -> Result<Vec<&str>> {
		self.ensure_readable(List)?;
		Ok(self.entries.keys().map(String::as_str).collect())
	}

	fn create_entry(&mut self, name: &str) -> Result<&mut RamEntry> {
		self.ensure_open(Create)?;
		if !self.mode.can_write() {
			return Err(Error::unsupported(Create, "archive does not support writing"))
		}
		self.insert(name, RamStream::new())
	}

	fn entry(&self, name: &str) -> Result<Option<&RamEntry>> {
		self.ensure_readable(Get)?;
		check_name(Get, name)?;
		Ok(self.entries.get(name))
	}

	fn entry_mut(&mut self, name: &str) -> Result<Option<&mut RamEntry>> {
		self.ensure_readable(Get)?;
		check_name(Get, name)?;
		Ok(self.entries.get_mut(name))
	}

	fn delete_entry(&mut self, name: &str) -> Result<bool> {
		self.ensure_open(Delete)?;
		if !self.mode.can_delete() {
			return Err(Error::unsupported(Delete, "archive does not support deleting"))
		}
		check_name(Delete, name)?;

		Ok(
			self.entries
				.remove(name)
				.map(|mut entry| entry.data.dispose())
				.is_some()
		)
	}

	/// Closes the archive, disposing every entry's stream.
	fn close(&mut self) -> Result {
		if self.closed {
			return Ok(())
		}

		self.closed = true;
		for entry in self.entries.values_mut() {
			entry.data.dispose();
		}
		self.entries.clear();
		Ok(())
	}
}

impl RamEntry {
	/// Borrows the entry's contents.
	pub fn view(&self) -> Result<crate::View<'_>> {
		if !self.mode.can_read() {
			return Err(Error::unsupported(Get, "archive does not support reading"))
		}
		Ok(self.data.view()?)
	}
}

impl ArchiveEntry for RamEntry {
	type Stream<'a> = EntryStream<'a>;

	fn full_name(&self) -> &str { &self.full_name }

	fn len(&self) -> Result<usize> { Ok(self.data.len()?) }

	fn last_write_time(&self) -> SystemTime { self.last_write_time }

	fn set_last_write_time(&mut self, time: SystemTime) -> Result {
		if !self.mode.can_write() {
			return Err(Error::unsupported(SetTime, "archive does not support writing"))
		}
		self.last_write_time = time;
		Ok(())
	}

	fn open(&mut self) -> Result<EntryStream<'_>> {
		self.data
			.seek(0, SeekOrigin::Begin)
			.map_err(|err| Error::from(err).with_operation(Open))?;
		Ok(EntryStream { entry: self, closed: false })
	}
}

impl EntryStream<'_> {
	fn ensure_open(&self, op: OperationKind) -> streams::Result {
		if self.closed {
			Err(streams::Error::disposed(op))
		} else {
			Ok(())
		}
	}
}

impl Stream for EntryStream<'_> {
	fn is_closed(&self) -> bool {
		self.closed || self.entry.data.is_disposed()
	}

	fn close(&mut self) -> streams::Result {
		self.closed = true;
		Ok(())
	}
}

impl Source for EntryStream<'_> {
	fn read(&mut self, buf: &mut [u8], offset: usize, count: usize) -> streams::Result<usize> {
		self.ensure_open(OperationKind::Read)?;
		if !self.entry.mode.can_read() {
			return Err(streams::Error::unsupported(OperationKind::Read, "entry is write-only"))
		}
		self.entry.data.read(buf, offset, count)
	}
}

impl Sink for EntryStream<'_> {
	fn write(&mut self, buf: &[u8], offset: usize, count: usize) -> streams::Result {
		self.ensure_open(OperationKind::Write)?;
		if !self.entry.mode.can_write() {
			return Err(streams::Error::unsupported(OperationKind::Write, "entry is read-only"))
		}
		self.entry.data.write(buf, offset, count)?;
		self.entry.last_write_time = SystemTime::now();
		Ok(())
	}

	fn flush(&mut self) -> streams::Result {
		self.ensure_open(OperationKind::Flush)?;
		self.entry.data.flush()
	}
}

impl Seekable for EntryStream<'_> {
	fn seek(&mut self, offset: i64, origin: SeekOrigin) -> streams::Result<usize> {
		self.ensure_open(OperationKind::Seek)?;
		self.entry.data.seek(offset, origin)
	}
}

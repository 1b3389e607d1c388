// SPDX-License-Identifier: Apache-2.0

//! Named collections of byte streams.

mod ram;

pub use ram::*;

use std::result;
use std::time::SystemTime;
use amplify_derive::Display;
use itertools::Itertools;
use crate::error;
use crate::path::{parent_dir, split_path};
use crate::streams::{self, ErrorKind, Seekable, Sink, Source};

pub type Error = error::Error<ArchiveOperation, ErrorKind>;
pub type Result<T = ()> = result::Result<T, Error>;

#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq)]
pub enum ArchiveOperation {
	#[default]
	#[display("unknown operation")]
	Unknown,
	#[display("list entries")]
	List,
	#[display("create entry")]
	Create,
	#[display("get entry")]
	Get,
	#[display("delete entry")]
	Delete,
	#[display("open entry")]
	Open,
	#[display("set last write time")]
	SetTime,
	#[display("entry {0}")]
	Entry(streams::OperationKind),
	#[display("{0}")]
	Other(&'static str),
}

impl error::OperationKind for ArchiveOperation { }

impl From<streams::Error> for Error {
	fn from(value: streams::Error) -> Self {
		let op = ArchiveOperation::Entry(value.operation());
		let kind = value.kind();
		Self::new(op, kind, value.into_source())
	}
}

impl Error {
	pub(crate) fn disposed(op: ArchiveOperation) -> Self {
		Self::new(op, ErrorKind::Disposed, None)
	}

	pub(crate) fn argument(op: ArchiveOperation, message: &'static str) -> Self {
		Self::new(op, ErrorKind::Argument(message), None)
	}

	pub(crate) fn unsupported(op: ArchiveOperation, message: &'static str) -> Self {
		Self::new(op, ErrorKind::Unsupported(message), None)
	}
}

/// The actions an archive allows on its entries.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ArchiveMode {
	/// Entries can only be listed and read.
	Read,
	/// Entries can only be created and written.
	Create,
	/// Entries can be listed, read, created, written, and deleted.
	#[default]
	Update,
}

impl ArchiveMode {
	/// Returns `true` if entries can be listed and read.
	pub fn can_read(self) -> bool { !matches!(self, Self::Create) }

	/// Returns `true` if entries can be created and written.
	pub fn can_write(self) -> bool { !matches!(self, Self::Read) }

	/// Returns `true` if entries can be deleted.
	pub fn can_delete(self) -> bool { matches!(self, Self::Update) }
}

/// A package of named entries, each holding a byte stream. Entry names are paths
/// relative to the archive root.
pub trait Archive {
	type Entry: ArchiveEntry;

	/// Returns the actions the archive allows on its entries.
	fn mode(&self) -> ArchiveMode;

	/// Returns `true` if the archive was closed.
	fn is_closed(&self) -> bool;

	/// Returns the full names of all entries.
	fn entry_names(&self) -> Result<Vec<&str>>;

	/// Creates an empty entry named `name`.
	fn create_entry(&mut self, name: &str) -> Result<&mut Self::Entry>;

	/// Returns the entry named `name`, if any.
	fn entry(&self, name: &str) -> Result<Option<&Self::Entry>>;

	/// Returns the entry named `name` mutably, if any.
	fn entry_mut(&mut self, name: &str) -> Result<Option<&mut Self::Entry>>;

	/// Deletes the entry named `name`, returning `true` if it existed.
	fn delete_entry(&mut self, name: &str) -> Result<bool>;

	/// Closes the archive and all its entries. Closing is idempotent.
	fn close(&mut self) -> Result;
}

/// A named entry within an [`Archive`].
pub trait ArchiveEntry {
	type Stream<'a>: Source + Sink + Seekable + streams::Stream where Self: 'a;

	/// Returns the path of the entry relative to the archive root.
	fn full_name(&self) -> &str;

	/// Returns the file name of the entry, the last component of its path.
	fn name(&self) -> &str {
		let full_name = self.full_name();
		match full_name.rfind(&['/', '\\'][..]) {
			Some(i) => &full_name[i + 1..],
			None => full_name
		}
	}

	/// Returns the length of the entry's contents in bytes.
	fn len(&self) -> Result<usize>;

	/// Returns `true` if the entry has no contents.
	fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}

	/// Returns the last time the entry was written.
	fn last_write_time(&self) -> SystemTime;

	/// Sets the last time the entry was written.
	fn set_last_write_time(&mut self, time: SystemTime) -> Result;

	/// Opens the entry's contents as a stream, positioned at the start.
	fn open(&mut self) -> Result<Self::Stream<'_>>;
}

/// Directory listings on an [`Archive`].
pub trait ArchiveExt: Archive {
	/// Returns the full names of entries directly inside directory `dir`. The root
	/// directory is the empty string.
	fn files(&self, dir: &str) -> Result<Vec<&str>> {
		let dir = split_path(dir);
		Ok(
			self.entry_names()?
				.into_iter()
				.filter(|name| split_path(parent_dir(name)) == dir)
				.filter(|name| split_path(name).len() == dir.len() + 1)
				.collect()
		)
	}

	/// Returns the distinct names of directories directly inside directory `dir`.
	fn directories(&self, dir: &str) -> Result<Vec<&str>> {
		let dir = split_path(dir);
		Ok(
			self.entry_names()?
				.into_iter()
				.filter_map(|name| {
					let parts = split_path(name);
					(parts.len() > dir.len() + 1 && parts[..dir.len()] == dir[..])
						.then(|| parts[dir.len()])
				})
				.unique()
				.collect()
		)
	}
}

impl<A: Archive + ?Sized> ArchiveExt for A { }

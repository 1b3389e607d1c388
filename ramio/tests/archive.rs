// SPDX-License-Identifier: Apache-2.0

use std::time::{Duration, SystemTime};
use pretty_assertions::assert_eq;
use ramio::archive::{Archive, ArchiveEntry, ArchiveExt, ArchiveMode, ArchiveOperation, RamArchive};
use ramio::ext::{SinkExt, SourceExt};
use ramio::streams::{ErrorKind, SeekableExt, Sink, Source, Stream};

const ENTRIES: [(&str, &[u8]); 6] = [
	("readme.txt", b"read me"),
	("home/user/notes.txt", b"notes"),
	("home/user/docs/a.txt", b"a"),
	("home/user/docs/b.txt", b"b"),
	("home/other/c.txt", b"c"),
	("home\\user\\d.txt", b"d"),
];

fn archive(mode: ArchiveMode) -> RamArchive {
	RamArchive::from_entries(mode, ENTRIES).unwrap()
}

#[test]
fn create_and_read() {
	let mut archive = RamArchive::new(ArchiveMode::Update);
	let entry = archive.create_entry("data/values.bin").unwrap();
	assert_eq!(entry.name(), "values.bin");
	assert_eq!(entry.full_name(), "data/values.bin");

	{
		let mut stream = entry.open().unwrap();
		stream.write_cstr("header").unwrap();
		stream.write_record(&42u32).unwrap();
	}
	assert_eq!(entry.len().unwrap(), 11);

	let entry = archive.entry_mut("data/values.bin").unwrap().unwrap();
	let mut stream = entry.open().unwrap();
	assert_eq!(stream.read_cstr().unwrap(), "header");
	assert_eq!(stream.read_record::<u32>().unwrap(), 42);
}

#[test]
fn entry_names_are_sorted() {
	let archive = archive(ArchiveMode::Read);
	assert_eq!(
		archive.entry_names().unwrap(),
		[
			"home/other/c.txt",
			"home/user/docs/a.txt",
			"home/user/docs/b.txt",
			"home/user/notes.txt",
			"home\\user\\d.txt",
			"readme.txt",
		]
	);
}

#[test]
fn listings() {
	let archive = archive(ArchiveMode::Read);
	assert_eq!(archive.files("").unwrap(), ["readme.txt"]);
	assert_eq!(archive.files("home/user").unwrap(), ["home/user/notes.txt", "home\\user\\d.txt"]);
	assert_eq!(archive.files("home/user/docs/").unwrap(), ["home/user/docs/a.txt", "home/user/docs/b.txt"]);
	assert!(archive.files("home").unwrap().is_empty());

	assert_eq!(archive.directories("").unwrap(), ["home"]);
	assert_eq!(archive.directories("home").unwrap(), ["other", "user"]);
	assert_eq!(archive.directories("home/user").unwrap(), ["docs"]);
	assert!(archive.directories("home/user/docs").unwrap().is_empty());
}

#[test]
fn read_mode() {
	let mut archive = archive(ArchiveMode::Read);
	let error = archive.create_entry("new.txt").unwrap_err();
	assert!(matches!(error.kind(), ErrorKind::Unsupported(_)));
	assert_eq!(error.operation(), ArchiveOperation::Create);
	assert!(matches!(archive.delete_entry("readme.txt").unwrap_err().kind(), ErrorKind::Unsupported(_)));

	let entry = archive.entry_mut("readme.txt").unwrap().unwrap();
	assert_eq!(entry.view().unwrap().as_slice(), b"read me");
	assert!(entry.set_last_write_time(SystemTime::UNIX_EPOCH).is_err());

	let mut stream = entry.open().unwrap();
	let mut buf = [0; 4];
	stream.read_slice_exact(&mut buf).unwrap();
	assert_eq!(&buf, b"read");
	assert!(matches!(stream.write_byte(0).unwrap_err().kind(), ErrorKind::Unsupported(_)));
}

#[test]
fn create_mode() {
	let mut archive = RamArchive::new(ArchiveMode::Create);
	let entry = archive.create_entry("out.txt").unwrap();
	let mut stream = entry.open().unwrap();
	stream.write_slice(b"output").unwrap();
	stream.reset().unwrap();
	assert!(matches!(stream.read_byte().unwrap_err().kind(), ErrorKind::Unsupported(_)));

	assert!(matches!(archive.entry_names().unwrap_err().kind(), ErrorKind::Unsupported(_)));
	assert!(matches!(archive.entry("out.txt").unwrap_err().kind(), ErrorKind::Unsupported(_)));
}

#[test]
fn invalid_names() {
	let mut archive = archive(ArchiveMode::Update);
	assert!(matches!(archive.create_entry("").unwrap_err().kind(), ErrorKind::Argument(_)));
	assert!(matches!(archive.create_entry("readme.txt").unwrap_err().kind(), ErrorKind::Argument(_)));
	assert!(matches!(archive.entry("").unwrap_err().kind(), ErrorKind::Argument(_)));
	assert!(archive.entry("missing.txt").unwrap().is_none());
}

#[test]
fn delete() {
	let mut archive = archive(ArchiveMode::Update);
	assert!(archive.delete_entry("readme.txt").unwrap());
	assert!(!archive.delete_entry("readme.txt").unwrap());
	assert!(archive.entry("readme.txt").unwrap().is_none());
	assert_eq!(archive.entry_names().unwrap().len(), ENTRIES.len() - 1);
}

#[test]
fn writes_touch_last_write_time() {
	let mut archive = archive(ArchiveMode::Update);
	let entry = archive.entry_mut("readme.txt").unwrap().unwrap();
	let past = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
	entry.set_last_write_time(past).unwrap();
	assert_eq!(entry.last_write_time(), past);

	entry.open().unwrap().read_byte().unwrap();
	assert_eq!(entry.last_write_time(), past, "reads shouldn't touch the entry");

	entry.open().unwrap().write_byte(b'R').unwrap();
	assert!(entry.last_write_time() > past);
	assert_eq!(entry.view().unwrap().as_slice(), b"Read me");
}

#[test]
fn close() {
	let mut archive = archive(ArchiveMode::Update);
	archive.close().unwrap();
	archive.close().unwrap();
	assert!(archive.is_closed());
	assert_eq!(archive.entry_names().unwrap_err().kind(), ErrorKind::Disposed);
	assert_eq!(archive.create_entry("x").unwrap_err().kind(), ErrorKind::Disposed);
	assert_eq!(archive.entry_mut("readme.txt").unwrap_err().kind(), ErrorKind::Disposed);
	assert_eq!(archive.delete_entry("readme.txt").unwrap_err().kind(), ErrorKind::Disposed);
}

#[test]
fn closed_entry_stream() {
	let mut archive = archive(ArchiveMode::Update);
	let entry = archive.entry_mut("readme.txt").unwrap().unwrap();
	let mut stream = entry.open().unwrap();
	stream.close().unwrap();
	assert!(stream.is_closed());
	assert!(stream.read_byte().unwrap_err().is_disposed());
	drop(stream);
	assert_eq!(entry.len().unwrap(), 7);
}

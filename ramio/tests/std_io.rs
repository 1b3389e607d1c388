// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs::File;
use std::io;
use std::io::{Seek as _, SeekFrom};
use pretty_assertions::assert_eq;
use ramio::RamStream;
use ramio::ext::SourceExt;
use ramio::std_io::{ReaderSource, WriterSink};
use ramio::streams::{Seekable, SeekableExt, SeekOrigin, Sink, Stream};

mod common;

use common::pattern;

#[test]
fn file_round_trip() -> Result<(), Box<dyn Error>> {
	let data = pattern(10_000);
	let mut file = tempfile::tempfile()?;

	{
		let mut source = RamStream::from_slice(&data)?;
		let mut sink = WriterSink::from(&mut file);
		assert_eq!(source.copy_to_with(&mut sink, usize::MAX, 4096)?, data.len());
		sink.close()?;
	}

	file.seek(SeekFrom::Start(0))?;
	let mut source = ReaderSource::from(file);
	assert_eq!(source.seek_len()?, data.len());

	let mut stream = RamStream::new();
	assert_eq!(source.copy_to(&mut stream, usize::MAX)?, data.len());
	assert!(stream.to_vec()? == data);

	source.seek_from_start(9_990)?;
	let mut tail = RamStream::new();
	assert_eq!(source.copy_to(&mut tail, 100)?, 10);
	assert_eq!(tail.to_vec()?, &data[9_990..]);
	Ok(())
}

#[test]
fn std_consumers() -> io::Result<()> {
	let mut stream = RamStream::new();
	io::copy(&mut &pattern(3000)[..], &mut stream)?;
	assert_eq!(stream.len().map_err(io::Error::from)?, 3000);

	io::Seek::seek(&mut stream, SeekFrom::End(-1000))?;
	let mut out = Vec::new();
	io::copy(&mut stream, &mut out)?;
	assert_eq!(out, &pattern(3000)[2000..]);
	Ok(())
}

#[test]
fn errors_survive_std_io() {
	let mut stream = RamStream::new();
	stream.dispose();
	let error = io::Read::read(&mut stream, &mut [0; 4]).unwrap_err();
	assert_eq!(error.kind(), io::ErrorKind::NotConnected);

	let error = ramio::Error::from(error);
	assert!(error.is_disposed());
}

#[test]
fn closed_adapters() {
	let file = tempfile::tempfile().unwrap();
	let mut source = ReaderSource::from(file);
	source.close().unwrap();
	assert!(source.seek(0, SeekOrigin::Begin).unwrap_err().is_disposed());
	assert!(source.into_inner().is_none());

	let mut sink = WriterSink::from(Vec::new());
	sink.close().unwrap();
	assert!(sink.write_slice(&[1]).unwrap_err().is_disposed());
}

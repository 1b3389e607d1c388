// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use ramio::RamStream;
use ramio::streams::{ProgressStream, Resizable, Seekable, SeekOrigin, Sink, Source, Stream};

mod common;

use common::pattern;

#[test]
fn reports_reads() {
	let stream = RamStream::from_slice(&pattern(100)).unwrap();
	let mut reports = Vec::new();
	{
		let mut progress = ProgressStream::new(stream, false, |p| reports.push(p)).unwrap();
		let mut buf = [0; 25];
		while progress.read_slice(&mut buf).unwrap() > 0 { }
		assert_eq!(progress.progress(), 1.0);
	}
	assert_eq!(reports, [0.25, 0.5, 0.75, 1.0, 1.0]);
}

#[test]
fn reports_from_start_position() {
	let mut stream = RamStream::from_slice(&pattern(100)).unwrap();
	stream.set_position(20).unwrap();

	let mut last = None;
	let mut progress = ProgressStream::new(stream, false, |p| last = Some(p)).unwrap();
	let mut buf = [0; 40];
	progress.read_slice(&mut buf).unwrap();
	progress.seek(60, SeekOrigin::Begin).unwrap();
	assert_eq!(progress.progress(), 0.5);
	drop(progress);
	assert_eq!(last, Some(0.5));
}

#[test]
fn writes_extend_span() {
	let mut progress = ProgressStream::new(RamStream::new(), false, |_| ()).unwrap();
	assert_eq!(progress.progress(), 1.0, "an empty span is complete");

	progress.write_slice(&pattern(10)).unwrap();
	assert_eq!(progress.progress(), 1.0);

	progress.seek(5, SeekOrigin::Begin).unwrap();
	assert_eq!(progress.progress(), 0.5);
	assert_eq!(progress.inner().len().unwrap(), 10);
}

#[test]
fn set_len_resizes_span() {
	let stream = RamStream::from_slice(&pattern(100)).unwrap();
	let mut last = None;
	{
		let mut progress = ProgressStream::new(stream, false, |p| last = Some(p)).unwrap();
		progress.seek(50, SeekOrigin::Begin).unwrap();
		assert_eq!(progress.progress(), 0.5);

		progress.set_len(200).unwrap();
		assert_eq!(progress.progress(), 0.25);

		// Truncating pulls the position back to the new end.
		progress.set_len(40).unwrap();
		assert_eq!(progress.progress(), 1.0);
		assert_eq!(progress.inner().position().unwrap(), 40);

		progress.seek(10, SeekOrigin::Begin).unwrap();
		assert_eq!(progress.progress(), 0.25);
	}
	assert_eq!(last, Some(0.25));
}

#[test]
fn set_len_through_trait() {
	fn truncate(stream: &mut impl Resizable) {
		stream.set_len(10).unwrap();
	}

	let mut progress = ProgressStream::new(RamStream::from_slice(&pattern(20)).unwrap(), false, |_| ()).unwrap();
	progress.seek(5, SeekOrigin::Begin).unwrap();
	truncate(&mut progress);
	assert_eq!(progress.progress(), 0.5);
	assert_eq!(progress.inner().len().unwrap(), 10);
}

#[test]
fn set_position_extends_span() {
	let mut progress = ProgressStream::new(RamStream::from_slice(&pattern(10)).unwrap(), false, |_| ()).unwrap();
	progress.set_position(5).unwrap();
	assert_eq!(progress.progress(), 0.5);

	progress.set_position(20).unwrap();
	assert_eq!(progress.inner().position().unwrap(), 20);
	progress.write_byte(1).unwrap();
	assert_eq!(progress.progress(), 1.0);
	assert_eq!(progress.inner().len().unwrap(), 21);

	progress.close().unwrap();
	assert!(progress.set_position(0).unwrap_err().is_disposed());
	assert!(progress.set_len(0).unwrap_err().is_disposed());
}

#[test]
fn close_honors_leave_open() {
	let mut progress = ProgressStream::new(RamStream::new(), true, |_| ()).unwrap();
	progress.close().unwrap();
	assert!(progress.is_closed());
	assert!(progress.write_byte(1).unwrap_err().is_disposed());
	assert!(!progress.into_inner().is_disposed());

	let mut progress = ProgressStream::new(RamStream::new(), false, |_| ()).unwrap();
	progress.close().unwrap();
	assert!(progress.into_inner().is_disposed());
}

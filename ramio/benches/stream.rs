// SPDX-License-Identifier: Apache-2.0

use criterion::{BatchSize, black_box, Criterion, criterion_group, criterion_main, Throughput};
use ramio::{RamStream, StreamOptions};
use ramio::ext::{SinkExt, SourceExt};
use ramio::streams::{SeekableExt, Sink, Source};

const SIZE: usize = 1 << 20;

fn data() -> Vec<u8> {
	(0..SIZE).map(|i| i as u8).collect()
}

fn write_slice(c: &mut Criterion) {
	let data = data();
	let mut group = c.benchmark_group("write_slice");
	group.throughput(Throughput::Bytes(SIZE as u64));
	group.bench_function("grow", |b| b.iter(|| {
		let mut stream = RamStream::new();
		stream.write_slice(black_box(&data)).unwrap();
		stream
	}));
	group.bench_function("preallocated", |b| b.iter_batched_ref(
		|| RamStream::with_capacity(SIZE).unwrap(),
		|stream| stream.write_slice(black_box(&data)).unwrap(),
		BatchSize::SmallInput
	));
	group.bench_function("large_min_growth", |b| b.iter(|| {
		let options = StreamOptions::new().with_min_growth(SIZE);
		let mut stream = RamStream::with_options(options).unwrap();
		stream.write_slice(black_box(&data)).unwrap();
		stream
	}));
	group.finish();
}

fn write_small(c: &mut Criterion) {
	let mut group = c.benchmark_group("write_small");
	group.throughput(Throughput::Bytes(SIZE as u64));
	group.bench_function("bytes", |b| b.iter(|| {
		let mut stream = RamStream::new();
		for i in 0..SIZE {
			stream.write_byte(i as u8).unwrap();
		}
		stream
	}));
	group.bench_function("records", |b| b.iter(|| {
		let mut stream = RamStream::new();
		for i in 0..SIZE / 8 {
			stream.write_record(&(i as u64)).unwrap();
		}
		stream
	}));
	group.finish();
}

fn read_slice(c: &mut Criterion) {
	let mut stream = RamStream::from_slice(&data()).unwrap();
	let mut target = vec![0; SIZE];
	let mut group = c.benchmark_group("read_slice");
	group.throughput(Throughput::Bytes(SIZE as u64));
	group.bench_function("exact", |b| b.iter(|| {
		stream.reset().unwrap();
		stream.read_slice_exact(black_box(&mut target)).unwrap();
	}));
	group.bench_function("cstr", |b| b.iter_batched_ref(
		|| {
			let mut stream = RamStream::new();
			for _ in 0..1024 {
				stream.write_cstr("the quick brown fox jumps over the lazy dog").unwrap();
			}
			stream.reset().unwrap();
			stream
		},
		|stream| {
			while !stream.read_cstr().unwrap().is_empty() { }
		},
		BatchSize::SmallInput
	));
	group.finish();
}

fn copy(c: &mut Criterion) {
	let mut source = RamStream::from_slice(&data()).unwrap();
	let mut group = c.benchmark_group("copy");
	group.throughput(Throughput::Bytes(SIZE as u64));
	for buffer_size in [4096, 65536, SIZE] {
		group.bench_function(buffer_size.to_string(), |b| b.iter_batched_ref(
			RamStream::new,
			|sink| {
				source.reset().unwrap();
				source.copy_to_with(sink, SIZE, buffer_size).unwrap()
			},
			BatchSize::SmallInput
		));
	}
	group.finish();
}

criterion_group!(benches, write_slice, write_small, read_slice, copy);
criterion_main!(benches);

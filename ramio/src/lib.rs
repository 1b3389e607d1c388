// Copyright 2023 Strixpyrr
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ## How it works
//!
//! A [`RamStream`] stores its bytes in a single contiguous *block* of zeroed heap
//! memory that it owns. The stream tracks a *length*, the number of valid bytes,
//! and a *position*, the cursor reads and writes start from. Reads stop at the
//! length; writes past it grow the stream. Growth reallocates: a new block is
//! allocated, the valid bytes are copied over, and the old block is released. The
//! new capacity is at least the minimum growth size, 1024B by default, and at least
//! double the old capacity, so runs of small writes stay amortized-linear. Once
//! doubling would pass the configured maximum capacity, the maximum itself is
//! allocated.
//!
//! Writing or setting the length past the old length never exposes stale data:
//! the gap reads back as zeros, whether the block was reallocated or reused.
//!
//! ### Views
//!
//! The valid bytes can be borrowed without copying as a [`View`]. A view borrows
//! the stream, so it can't outlive a mutation. For cases where that borrow can't
//! be held, a [`ViewHandle`] records the stream it came from and that stream's
//! *epoch*, a counter bumped on every reallocation, truncation, or disposal.
//! Resolving a handle against another stream, or after its epoch has moved on,
//! fails instead of reading freed or cut memory.
//!
//! ### Streams
//!
//! Streams implement the [`Source`](streams::Source), [`Sink`](streams::Sink),
//! and [`Seekable`](streams::Seekable) traits, which [`ext`] extends with bounded
//! copies, zero-terminated strings, and fixed-layout records. [`RamStream`] also
//! implements [`std::io`]'s `Read`, `Write`, and `Seek`, and [`std_io`] adapts
//! `std::io` types into sources and sinks.

mod memory;
mod stream;
mod view;
pub mod archive;
pub mod error;
pub mod ext;
pub mod path;
pub mod std_io;
pub mod streams;

pub use error::{Utf8Error, Utf8ErrorKind};
pub use memory::*;
pub use stream::*;
pub use streams::{Error, Result};
pub use view::*;

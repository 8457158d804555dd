//! A growable bitmap that persists to a compact, canonical hex string.
//! `no_std` with `alloc`, no `unsafe`.
//!
//! Meant as a building block wherever presence has to be tracked sparsely,
//! combined with set operations and stored compactly, e.g. inverted indices
//! or presence filters.
//!
//! [`Bitmap`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use persistable_bitmap::Bitmap;
//!
//! let mut bitmap = Bitmap::new();
//! assert_eq!(bitmap.count(), 0);
//! bitmap.set(3).set(130);
//! assert!(bitmap.get(3));
//! assert_eq!(bitmap.to_offsets(), [3, 130]);
//!
//! let persisted = bitmap.to_persistable();
//! assert_eq!(persisted, "1000000000000000000000000000000020");
//! assert_eq!(persisted.parse::<Bitmap>().unwrap().to_offsets(), [3, 130]);
//! ```
//!
//! # Bit Layout
//!
//! Bit `n` lives in byte `n / 8`, and within that byte bit 0 is the most
//! significant one. The persisted form is the buffer in lowercase hex with
//! trailing zero bytes dropped, so `"8f12"` has bits 0, 4, 5, 6, 7, 11 and
//! 14 set. A bitmap without set bits persists as `"00"`.
//!
//! # Features
//!
//! - `#![no_std]` compatible (needs `alloc`)
//! - Buffer grows on demand in chunks of [`Config::chunk_size`] bytes
//!   (default [`DEFAULT_CHUNK_SIZE`]) and never shrinks
//! - Bit access: `get`, `set`, `unset`, chainable
//! - Range operations: `fill_range`, `set_range`, `unset_range`
//! - Boolean algebra between bitmaps of any length:
//!   - `and`, `or`, `xor`
//!   - `&`, `|`, `^`, `&=`, `|=`, `^=`
//! - Counting: `count` / `population`, `is_empty`
//! - Iteration:
//!   - `iter_ones()` (lazy, positions of set bits)
//!   - `to_offsets()` (all positions of set bits at once)
//!   - `iter()` (all bits as bools)
//! - Canonical persistence: `to_persistable` / `Display`, `from_persisted`
//!   / `FromStr`
//! - Choice of [`IndexPolicy`] for negative positions
//! - Optional `serde` support, as the persisted string

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bitmap;
mod codec;
mod config;
mod error;
mod iter;
#[cfg(feature = "serde")]
mod serde;

pub use bitmap::Bitmap;
pub use config::{Config, DEFAULT_CHUNK_SIZE, IndexPolicy};
pub use error::DecodeError;
pub use iter::{Bits, IterOnes};

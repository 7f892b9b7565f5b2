// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # passphrase_keys
//!
//! Turns the raw bytes a terminal delivers into logical editing keys.
//!
//! ## Core Types
//!
//! - [`Key`]: A decoded keystroke (a character byte or an editing action)
//! - [`KeyDecoder`]: Decodes one key, pulling escape-sequence bytes as needed
//!
//! ## Traits
//!
//! - [`ByteSource`]: Byte-at-a-time input, implemented by [`FdSource`] and
//!   [`IoSource`]
//!
//! ## Recognized sequences
//!
//! | Key            | Escape sequences   | Control alias |
//! |----------------|--------------------|---------------|
//! | `Home`         | `ESC[1~`, `ESC O H`| `^A`          |
//! | `ToggleInsert` | `ESC[2~`           |               |
//! | `Delete`       | `ESC[3~`           | `^D`          |
//! | `End`          | `ESC[4~`, `ESC O F`| `^E`          |
//! | `Erase`        | `0x08`, `0x7F`     |               |
//! | `Right`        | `ESC[C`            | `^F`          |
//! | `Left`         | `ESC[D`            | `^B`          |
//!
//! ## Example
//!
//! ```rust
//! use passphrase_keys::{IoSource, Key, KeyDecoder};
//!
//! let decoder = KeyDecoder::default();
//! let mut source = IoSource::new(&b"[D"[..]);
//!
//! let key = decoder.decode(0x1B, &mut source).expect("Failed to decode(..)");
//! assert_eq!(key, Key::Left);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod decoder;
mod key;
mod source;
mod support;

pub use decoder::KeyDecoder;
pub use key::Key;
pub use source::{ByteSource, FdSource, IoSource};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;

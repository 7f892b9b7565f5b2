// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Passphrase storage that never leaves plaintext behind.
//!
//! # Types
//!
//! ## PassphraseBuffer
//!
//! The editable buffer behind the line editor:
//! - Byte storage with a cursor that always sits on a UTF-8 code-point boundary
//! - Append, insert, overwrite, erase, delete and cursor movement by code point
//! - Doubling growth through a wiping reallocation
//! - Every byte vacated by a shift is wiped immediately
//!
//! ## SecretBuffer
//!
//! The owned, NUL-terminated result handed to the caller:
//! - Redacted `Debug`, no `Clone`
//! - Wiped on drop, or earlier through [`SecretBuffer::wipe`]
//!
//! # Example
//!
//! ```rust
//! use passphrase_buffer::{BufferError, PassphraseBuffer};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut buffer = PassphraseBuffer::new()?;
//!
//!     for &b in "añb".as_bytes() {
//!         buffer.append(b)?;
//!     }
//!
//!     buffer.move_left();
//!     buffer.erase_before_cursor(); // removes the two-byte 'ñ'
//!
//!     let secret = buffer.into_secret()?;
//!     assert_eq!(secret.as_bytes(), b"ab");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod passphrase_buffer;
mod secret;

pub mod utf8;

pub use error::BufferError;
pub use passphrase_buffer::{PassphraseBuffer, START_CAPACITY};
pub use secret::SecretBuffer;

#[cfg(any(test, feature = "test-utils"))]
pub use passphrase_buffer::BufferBehaviour;

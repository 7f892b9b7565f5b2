// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::fmt;

use passphrase_zero::{wipe, wipe_vec};

use crate::error::BufferError;

/// An owned, NUL-terminated passphrase.
///
/// Returned by the line editor once reading terminates successfully.
///
/// # Design Principles
///
/// - **No `Clone`**: Prevents unintended copies of the passphrase
/// - **Redacted `Debug`**: Prints `[REDACTED SecretBuffer]`
/// - **Wipe on drop**: The whole allocation, spare capacity included, is wiped
///   when the value is dropped
/// - **Explicit wipe**: [`wipe`](SecretBuffer::wipe) can be called earlier, as soon
///   as the caller is done with the passphrase
///
/// # Usage
///
/// ```rust
/// use passphrase_buffer::SecretBuffer;
///
/// let mut typed = *b"correct horse";
/// let secret = SecretBuffer::from_mut_bytes(&mut typed).expect("Failed to from_mut_bytes(..)");
///
/// // typed is guaranteed to be wiped
/// assert!(typed.iter().all(|&b| b == 0));
///
/// assert_eq!(secret.as_bytes(), b"correct horse");
/// assert_eq!(secret.as_bytes_with_nul().last(), Some(&0));
/// ```
pub struct SecretBuffer {
    data: Vec<u8>,
    len: usize,
}

impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SecretBuffer]")
    }
}

impl SecretBuffer {
    /// `data[len]` must be zero and `len < data.len()`.
    pub(crate) fn from_parts(data: Vec<u8>, len: usize) -> Self {
        debug_assert!(len < data.len());
        debug_assert_eq!(data[len], 0);

        Self { data, len }
    }

    /// Copies `src` into a new secret and wipes `src`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the allocation fails; `src` is
    /// wiped regardless.
    pub fn from_mut_bytes(src: &mut [u8]) -> Result<Self, BufferError> {
        let mut data = Vec::new();
        let reserved = data.try_reserve_exact(src.len() + 1);

        if reserved.is_err() {
            wipe(src);
            return Err(BufferError::AllocationFailed);
        }

        data.extend_from_slice(src);
        data.push(0);
        wipe(src);

        Ok(Self {
            len: src.len(),
            data,
        })
    }

    /// The passphrase bytes, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The passphrase bytes including the trailing NUL.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data[..=self.len]
    }

    /// The passphrase as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the UTF-8 error if the terminal delivered bytes that are not valid
    /// UTF-8 (for example a legacy 8-bit encoding).
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Length in bytes, without the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for an empty passphrase.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Wipes the whole allocation now. The secret reads as empty afterwards.
    pub fn wipe(&mut self) {
        wipe_vec(&mut self.data);
        self.len = 0;
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        wipe_vec(&mut self.data);
    }
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use passphrase_buffer::utf8::{MAX_SEQUENCE_WIDTH, is_continuation, sequence_width};
use passphrase_keys::ByteSource;
use passphrase_zero::wipe;

/// One complete UTF-8 sequence pulled from the input. Wiped on drop.
pub(crate) struct CodePoint {
    bytes: [u8; MAX_SEQUENCE_WIDTH],
    len: usize,
}

impl CodePoint {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Drop for CodePoint {
    fn drop(&mut self) {
        wipe(&mut self.bytes);
    }
}

/// A [`ByteSource`] with one byte of push-back.
pub(crate) struct Lookahead<'a> {
    inner: &'a mut dyn ByteSource,
    pending: Option<u8>,
}

impl<'a> Lookahead<'a> {
    pub(crate) fn new(inner: &'a mut dyn ByteSource) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    fn unread(&mut self, byte: u8) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(byte);
    }

    /// Completes the code point started by `lead`.
    ///
    /// Returns `None` for a malformed sequence: a stray continuation byte, a
    /// lead announcing more than four bytes, or a sequence cut short. A byte
    /// that cut the sequence short is pushed back and decoded normally.
    pub(crate) fn read_code_point(&mut self, lead: u8) -> io::Result<Option<CodePoint>> {
        if is_continuation(lead) {
            return Ok(None);
        }

        let width = sequence_width(lead);
        if width > MAX_SEQUENCE_WIDTH {
            return Ok(None);
        }

        let mut code_point = CodePoint {
            bytes: [0; MAX_SEQUENCE_WIDTH],
            len: 1,
        };
        code_point.bytes[0] = lead;

        while code_point.len < width {
            match self.read_byte()? {
                Some(byte) if is_continuation(byte) => {
                    code_point.bytes[code_point.len] = byte;
                    code_point.len += 1;
                }
                Some(byte) => {
                    self.unread(byte);
                    return Ok(None);
                }
                None => return Ok(None),
            }
        }

        Ok(Some(code_point))
    }
}

impl ByteSource for Lookahead<'_> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }

        self.inner.read_byte()
    }
}

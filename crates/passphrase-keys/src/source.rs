// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::{self, Read};
use std::os::fd::RawFd;

/// Byte-at-a-time input for the line editor.
///
/// Reads are unbuffered on purpose: nothing the user typed may linger in an
/// intermediate buffer the editor does not own and wipe.
pub trait ByteSource {
    /// Reads one byte.
    ///
    /// Returns `Ok(None)` at end of input. Interrupted reads are retried by the
    /// implementation and never surface.
    ///
    /// # Errors
    ///
    /// Any other read failure.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Reads straight from a file descriptor with `read(2)`, one byte per call.
///
/// The descriptor is borrowed, never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FdSource {
    fd: RawFd,
}

impl FdSource {
    /// Wraps `fd`.
    pub fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// The wrapped descriptor.
    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

impl ByteSource for FdSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;

        loop {
            // SAFETY: `byte` is valid for a 1-byte write for the whole call
            let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };

            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err);
                    }
                }
            }
        }
    }
}

/// Adapts any [`Read`] into a [`ByteSource`].
#[derive(Debug)]
pub struct IoSource<R: Read> {
    inner: R,
}

impl<R: Read> IoSource<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];

        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

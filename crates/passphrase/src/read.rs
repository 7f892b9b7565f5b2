// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;
use std::os::fd::RawFd;

use passphrase_buffer::SecretBuffer;
use passphrase_keys::FdSource;
use passphrase_meter::ReadFlags;

use crate::config::EditorConfig;
use crate::editor::LineEditor;
use crate::error::ReadError;

/// Reads a passphrase from `fd` with the default configuration, drawing
/// feedback on stderr.
///
/// The terminal should already be in raw mode (see
/// [`enable_raw_mode`](crate::enable_raw_mode)). Returns `None` if memory ran
/// out or `fd` could not be read; the partial input is wiped.
pub fn read_passphrase(fd: RawFd, flags: ReadFlags) -> Option<SecretBuffer> {
    read_passphrase_with(&EditorConfig::default(), fd, flags)
}

/// [`read_passphrase`] with an explicit configuration.
///
/// Also returns `None` if `config` is invalid.
pub fn read_passphrase_with(
    config: &EditorConfig,
    fd: RawFd,
    flags: ReadFlags,
) -> Option<SecretBuffer> {
    match read_from_fd(config, fd, flags) {
        Ok(secret) => Some(secret),
        Err(err @ ReadError::Config(_)) => {
            tracing::warn!(error = %err, "invalid editor configuration");
            None
        }
        // The editor has logged it already
        Err(_) => None,
    }
}

pub(crate) fn read_from_fd(
    config: &EditorConfig,
    fd: RawFd,
    flags: ReadFlags,
) -> Result<SecretBuffer, ReadError> {
    let editor = LineEditor::new(config.clone())?;
    let mut source = FdSource::new(fd);

    editor.read(&mut source, io::stderr(), flags)
}

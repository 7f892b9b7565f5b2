// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! passphrase_tty - Echo-free, non-canonical terminal input for the duration
//! of a passphrase read.
//!
//! [`enable_raw_mode`] clears `ECHO` and `ICANON` on a terminal descriptor and
//! returns a [`TtyContext`] holding the previous settings;
//! [`restore_mode`] puts them back. Both flush pending input (`TCSAFLUSH`) so
//! nothing typed before the prompt leaks into the passphrase and nothing typed
//! after it leaks onto the command line.
//!
//! [`RawModeGuard`] does the same with restore-on-drop, so the terminal is
//! restored on every exit path, unwinding included.

#![warn(missing_docs)]


use std::io;
use std::os::fd::RawFd;

use thiserror::Error;

/// Terminal mode errors.
#[derive(Debug, Error)]
pub enum TtyError {
    /// Reading the terminal attributes failed (typically: not a terminal).
    #[error("failed to read terminal attributes: {0}")]
    GetAttributes(#[source] io::Error),

    /// Writing the terminal attributes failed.
    #[error("failed to set terminal attributes: {0}")]
    SetAttributes(#[source] io::Error),
}

/// Terminal settings saved by [`enable_raw_mode`].
#[derive(Clone, Copy)]
pub struct TtyContext {
    fd: RawFd,
    saved: libc::termios,
}

impl core::fmt::Debug for TtyContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TtyContext")
            .field("fd", &self.fd)
            .finish_non_exhaustive()
    }
}

impl TtyContext {
    /// The terminal descriptor the settings belong to.
    pub fn fd(&self) -> RawFd {
        self.fd
    }
}

fn get_attributes(fd: RawFd) -> Result<libc::termios, TtyError> {
    // SAFETY: termios is plain data, tcgetattr fills it in
    let mut termios: libc::termios = unsafe { core::mem::zeroed() };

    // SAFETY: termios is a valid out-pointer
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(TtyError::GetAttributes(io::Error::last_os_error()));
    }

    Ok(termios)
}

fn set_attributes(fd: RawFd, termios: &libc::termios) -> Result<(), TtyError> {
    // SAFETY: termios points to a fully initialized struct
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } != 0 {
        return Err(TtyError::SetAttributes(io::Error::last_os_error()));
    }

    Ok(())
}

/// Disables echo and canonical (line-buffered) input on `fd`.
///
/// # Errors
///
/// [`TtyError::GetAttributes`] if `fd` is not a terminal,
/// [`TtyError::SetAttributes`] if the new settings are refused.
pub fn enable_raw_mode(fd: RawFd) -> Result<TtyContext, TtyError> {
    let saved = get_attributes(fd)?;

    let mut raw = saved;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON);
    set_attributes(fd, &raw)?;

    Ok(TtyContext { fd, saved })
}

/// Restores the settings saved in `ctx`.
///
/// # Errors
///
/// [`TtyError::SetAttributes`] if the terminal refuses them.
pub fn restore_mode(ctx: &TtyContext) -> Result<(), TtyError> {
    set_attributes(ctx.fd, &ctx.saved)
}

/// Keeps a terminal in raw mode until dropped.
#[derive(Debug)]
pub struct RawModeGuard {
    ctx: TtyContext,
}

impl RawModeGuard {
    /// Enables raw mode on `fd`.
    ///
    /// # Errors
    ///
    /// See [`enable_raw_mode`].
    pub fn new(fd: RawFd) -> Result<Self, TtyError> {
        Ok(Self {
            ctx: enable_raw_mode(fd)?,
        })
    }

    /// The saved settings.
    pub fn context(&self) -> &TtyContext {
        &self.ctx
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_mode(&self.ctx) {
            tracing::warn!(fd = self.ctx.fd, error = %err, "failed to restore terminal mode");
        }
    }
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use passphrase_buffer::BufferError;
use passphrase_display::PolicyError;
use thiserror::Error;

/// Invalid editor configuration.
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Conflicting feedback switches.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Echo feedback needs cursor movement to keep the terminal in sync.
    #[error("echo feedback requires cursor movement support")]
    EchoRequiresMovement,
}

/// Why a passphrase read produced no passphrase.
///
/// Partial input is wiped before any of these is returned.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The editor configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The passphrase buffer could not grow.
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// Reading from the input descriptor failed.
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
}

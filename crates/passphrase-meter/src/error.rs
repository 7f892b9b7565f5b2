// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use thiserror::Error;

/// Reasons the meter could not be started or kept alive.
///
/// Never leaves the crate: [`MeterSession`](crate::MeterSession) logs it and
/// degrades to [`MeterState::Stopped`](crate::MeterState::Stopped).
#[derive(Debug, Error)]
pub(crate) enum MeterError {
    #[error("meter program name contains a NUL byte")]
    InvalidProgram,

    #[error("failed to create pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("failed to open /dev/null: {0}")]
    DevNull(#[source] io::Error),

    #[error("failed to fork: {0}")]
    Fork(#[source] io::Error),

    #[error("meter child failed before exec completed")]
    ChildFailed,

    #[error("failed to read meter handshake: {0}")]
    Handshake(#[source] io::Error),

    #[error("failed to write snapshot: {0}")]
    Write(#[source] io::Error),

    #[error("no memory to hold a partly written snapshot")]
    Backlog,
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for passphrase-buffer.
use thiserror::Error;

/// Errors that can occur while growing or finalizing a passphrase buffer.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum BufferError {
    /// The allocator refused the doubled capacity (or the doubling overflowed).
    #[error("allocation failed while growing the passphrase buffer")]
    AllocationFailed,
}

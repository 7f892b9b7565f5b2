// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors when selecting a [`RenderPolicy`](crate::RenderPolicy).
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
pub enum PolicyError {
    /// More than one of star, text and echo feedback was requested.
    #[error("at most one of star, text and echo feedback may be enabled")]
    Conflicting,
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::PolicyError;

/// How typed input is reflected on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Nothing is printed.
    Silent,
    /// One mask glyph per code point.
    #[default]
    Starred,
    /// A banner telling whether anything has been typed.
    TextIndicator,
    /// The typed text itself. Requires cursor movement support.
    Echo,
}

impl RenderPolicy {
    /// Selects a policy from independent on/off switches.
    ///
    /// No switch selects [`RenderPolicy::Silent`].
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Conflicting`] when two or more switches are on.
    pub fn from_switches(star: bool, text: bool, echo: bool) -> Result<Self, PolicyError> {
        match (star, text, echo) {
            (false, false, false) => Ok(Self::Silent),
            (true, false, false) => Ok(Self::Starred),
            (false, true, false) => Ok(Self::TextIndicator),
            (false, false, true) => Ok(Self::Echo),
            _ => Err(PolicyError::Conflicting),
        }
    }

    /// Whether the policy draws per-character cells that cursor movement
    /// has to follow.
    pub fn tracks_cursor(self) -> bool {
        matches!(self, Self::Starred | Self::Echo)
    }
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::ffi::OsString;
use std::os::fd::RawFd;

use passphrase_display::{
    DEFAULT_EMPTY_TEXT, DEFAULT_MASK_GLYPH, DEFAULT_NOT_EMPTY_TEXT, RenderPolicy,
};

use crate::error::ConfigError;

/// What typing in the middle of the line does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPolicy {
    /// Always insert before the cursor.
    Insert,
    /// Always replace the code point under the cursor.
    Overwrite,
    /// Insert key flips between the two.
    Toggle {
        /// Mode at the start of every read.
        start_in_insert: bool,
    },
}

impl Default for InsertPolicy {
    fn default() -> Self {
        Self::Toggle {
            start_in_insert: true,
        }
    }
}

impl InsertPolicy {
    /// Insert mode at the start of a read.
    pub fn starts_in_insert(self) -> bool {
        match self {
            Self::Insert => true,
            Self::Overwrite => false,
            Self::Toggle { start_in_insert } => start_in_insert,
        }
    }

    /// Whether the insert key is honoured.
    pub fn can_toggle(self) -> bool {
        matches!(self, Self::Toggle { .. })
    }
}

/// Behaviour of a [`LineEditor`](crate::LineEditor).
///
/// The default is starred feedback with full cursor editing: escape-sequence
/// keys, Ctrl aliases, and an insert key that starts in insert mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Feedback policy.
    pub policy: RenderPolicy,
    /// Cursor movement, mid-line editing and the Delete key.
    pub movement: bool,
    /// Decode escape sequences (arrows, Home/End, Insert, Delete).
    pub dedicated_keys: bool,
    /// Decode Ctrl-A/B/D/E/F.
    pub control_aliases: bool,
    /// Insert / overwrite behaviour.
    pub insert_policy: InsertPolicy,
    /// Meter program, taking precedence over `LIBPASSPHRASE_METER`.
    pub meter_program: Option<OsString>,
    /// Descriptor the meter draws on when the read flags leave it room.
    pub meter_output_fd: Option<RawFd>,
    /// Glyph for [`RenderPolicy::Starred`].
    pub mask_glyph: char,
    /// Banner for [`RenderPolicy::TextIndicator`] while nothing is typed.
    pub empty_text: String,
    /// Banner for [`RenderPolicy::TextIndicator`] once something is typed.
    pub not_empty_text: String,
    /// Print a newline when the read succeeds.
    pub newline_on_finish: bool,
    /// Call [`passphrase_guard::harden_process`] before reading.
    pub harden_process: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            policy: RenderPolicy::Starred,
            movement: true,
            dedicated_keys: true,
            control_aliases: true,
            insert_policy: InsertPolicy::default(),
            meter_program: None,
            meter_output_fd: Some(libc::STDERR_FILENO),
            mask_glyph: DEFAULT_MASK_GLYPH,
            empty_text: DEFAULT_EMPTY_TEXT.to_owned(),
            not_empty_text: DEFAULT_NOT_EMPTY_TEXT.to_owned(),
            newline_on_finish: true,
            harden_process: false,
        }
    }
}

impl EditorConfig {
    /// Default configuration with the feedback policy picked from switches.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Policy`] if more than one switch is on.
    pub fn from_switches(star: bool, text: bool, echo: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            policy: RenderPolicy::from_switches(star, text, echo)?,
            ..Self::default()
        })
    }

    /// Checks the combination of options.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EchoRequiresMovement`] for echo feedback without
    /// movement support.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy == RenderPolicy::Echo && !self.movement {
            return Err(ConfigError::EchoRequiresMovement);
        }

        Ok(())
    }
}

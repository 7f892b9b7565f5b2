// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bitflags::bitflags;

bitflags! {
    /// What kind of passphrase is being read and where the meter may draw.
    ///
    /// Unknown bits are dropped by [`from_bits_truncate`](ReadFlags::from_bits_truncate).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ReadFlags: u32 {
        /// A new passphrase is being chosen; enables the strength meter.
        const NEW_PASSPHRASE = 1;
        /// The rest of the screen is free for the meter to draw on.
        const SCREEN_FREE = 2;
        /// The line below the prompt is free for the meter to draw on.
        const BELOW_LINE_FREE = 4;
    }
}

impl ReadFlags {
    /// An existing passphrase is being entered. No meter.
    pub const EXISTING_PASSPHRASE: Self = Self::empty();

    /// Whether the meter has room on the terminal.
    pub fn meter_may_draw(self) -> bool {
        self.intersects(Self::SCREEN_FREE | Self::BELOW_LINE_FREE)
    }
}

impl Default for ReadFlags {
    fn default() -> Self {
        Self::EXISTING_PASSPHRASE
    }
}

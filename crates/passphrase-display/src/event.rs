// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// A change the line editor applied, as far as the display is concerned.
///
/// Character events carry one complete code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent<'a> {
    /// Reading begins.
    Start,
    /// A code point was added at the end.
    Append(&'a [u8]),
    /// A code point was inserted before the cursor.
    Insert(&'a [u8]),
    /// The code point under the cursor was replaced.
    Overwrite(&'a [u8]),
    /// The code point before the cursor was removed.
    Erase,
    /// The code point at the cursor was removed.
    Delete,
    /// The cursor moved one code point left.
    Left,
    /// The cursor moved one code point right.
    Right,
    /// The cursor jumped to the start, over this many code points.
    Home(usize),
    /// The cursor jumped to the end, over this many code points.
    End(usize),
    /// Reading ended successfully.
    Finish,
}

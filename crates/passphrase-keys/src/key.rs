// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// A logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A byte that belongs to the passphrase. Multi-byte code points arrive as
    /// their lead byte; the caller pulls the continuation bytes.
    Char(u8),
    /// Move to the start of the line.
    Home,
    /// Move to the end of the line.
    End,
    /// Move one code point left.
    Left,
    /// Move one code point right.
    Right,
    /// Remove the code point before the cursor.
    Erase,
    /// Remove the code point at the cursor.
    Delete,
    /// Flip between insert and overwrite mode.
    ToggleInsert,
    /// Nothing to do: an unbound control byte or an undecodable sequence.
    None,
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Byte-level UTF-8 helpers used to keep the cursor on code-point boundaries.

/// Longest UTF-8 sequence accepted from the input stream.
pub const MAX_SEQUENCE_WIDTH: usize = 4;

/// Returns `true` for continuation bytes (`10xxxxxx`).
#[inline(always)]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Byte width announced by a leading byte: the number of leading one-bits,
/// minimum 1.
///
/// ASCII and stray continuation bytes both report 1. Widths above
/// [`MAX_SEQUENCE_WIDTH`] are returned as-is so callers can reject them.
///
/// ```
/// use passphrase_buffer::utf8::sequence_width;
///
/// assert_eq!(sequence_width(b'a'), 1);
/// assert_eq!(sequence_width(0xC3), 2);
/// assert_eq!(sequence_width(0xE2), 3);
/// assert_eq!(sequence_width(0xF0), 4);
/// ```
#[inline(always)]
pub fn sequence_width(lead: u8) -> usize {
    (lead.leading_ones() as usize).max(1)
}

/// Number of code points in `bytes` (non-continuation bytes).
#[inline]
pub fn count_code_points(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| !is_continuation(b)).count()
}

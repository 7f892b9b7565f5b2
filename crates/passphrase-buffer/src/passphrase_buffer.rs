// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;

use passphrase_zero::{wipe, wipe_vec};

use crate::error::BufferError;
use crate::secret::SecretBuffer;
use crate::utf8::{count_code_points, is_continuation, sequence_width};

/// Capacity of a freshly created [`PassphraseBuffer`].
pub const START_CAPACITY: usize = 32;

/// Failure injection for [`PassphraseBuffer`] growth.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferBehaviour {
    /// Normal operation.
    None,
    /// Every growth attempt reports [`BufferError::AllocationFailed`].
    FailAtGrowth,
}

/// Growable, cursor-addressed storage for a passphrase being typed.
///
/// The backing `Vec` is always fully initialized: `data.len()` is the capacity
/// and every byte at or past `length` is zero. This keeps the buffer
/// NUL-terminated whenever `length < capacity` and guarantees no stale
/// plaintext survives a shift.
///
/// # Growth
///
/// When full, capacity doubles through a wiping reallocation:
/// 1. Reserve the doubled storage (fallible, the buffer is untouched on failure)
/// 2. Copy the live bytes over
/// 3. Wipe the whole old allocation
/// 4. Drop the old allocation
///
/// # Cursor invariant
///
/// `cursor <= length <= capacity`, and when `cursor < length` the byte at
/// `cursor` is never a UTF-8 continuation byte. Every operation below preserves
/// this as long as callers feed complete code points, which the line editor
/// does.
///
/// Operations whose precondition does not hold are no-ops and return `false`.
pub struct PassphraseBuffer {
    data: Vec<u8>,
    length: usize,
    cursor: usize,
    insert_mode: bool,
    #[cfg(any(test, feature = "test-utils"))]
    behaviour: BufferBehaviour,
}

impl core::fmt::Debug for PassphraseBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PassphraseBuffer")
            .field("data", &"REDACTED")
            .field("capacity", &self.capacity())
            .field("insert_mode", &self.insert_mode)
            .finish_non_exhaustive()
    }
}

impl PassphraseBuffer {
    /// Creates an empty buffer with [`START_CAPACITY`] bytes, in insert mode.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the initial allocation fails.
    pub fn new() -> Result<Self, BufferError> {
        Self::with_capacity(START_CAPACITY)
    }

    /// Creates an empty buffer with the given starting capacity (at least 1).
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let capacity = capacity.max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| BufferError::AllocationFailed)?;
        data.resize(capacity, 0);

        Ok(Self {
            data,
            length: 0,
            cursor: 0,
            insert_mode: true,
            #[cfg(any(test, feature = "test-utils"))]
            behaviour: BufferBehaviour::None,
        })
    }

    /// Changes the failure-injection behaviour.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_behaviour(&mut self, behaviour: BufferBehaviour) {
        self.behaviour = behaviour;
    }

    /// Number of passphrase bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no bytes have been entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Cursor position as a byte offset.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` when the cursor sits after the last byte.
    #[inline]
    pub fn cursor_at_end(&self) -> bool {
        self.cursor == self.length
    }

    /// Whether mid-buffer input is inserted (`true`) or overwrites (`false`).
    #[inline]
    pub fn insert_mode(&self) -> bool {
        self.insert_mode
    }

    /// Sets insert (`true`) or overwrite (`false`) mode.
    pub fn set_insert_mode(&mut self, insert: bool) {
        self.insert_mode = insert;
    }

    /// Flips between insert and overwrite mode.
    pub fn toggle_insert(&mut self) {
        self.insert_mode = !self.insert_mode;
    }

    /// The passphrase bytes entered so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length]
    }

    /// Code points between the start of the buffer and the cursor.
    pub fn code_points_before_cursor(&self) -> usize {
        count_code_points(&self.data[..self.cursor])
    }

    /// Code points between the cursor and the end of the buffer.
    pub fn code_points_after_cursor(&self) -> usize {
        count_code_points(&self.data[self.cursor..self.length])
    }

    /// Appends `byte` at the end. Only valid when the cursor is at the end.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the buffer was full and could
    /// not grow.
    pub fn append(&mut self, byte: u8) -> Result<bool, BufferError> {
        if self.cursor != self.length {
            return Ok(false);
        }

        self.maybe_grow_to(self.length + 1)?;

        self.data[self.length] = byte;
        self.length += 1;
        self.cursor += 1;

        Ok(true)
    }

    /// Inserts `byte` at the cursor, shifting the tail right by one byte.
    /// Only valid mid-buffer in insert mode.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the buffer was full and could
    /// not grow.
    pub fn insert(&mut self, byte: u8) -> Result<bool, BufferError> {
        if self.cursor >= self.length || !self.insert_mode {
            return Ok(false);
        }

        self.maybe_grow_to(self.length + 1)?;

        self.data.copy_within(self.cursor..self.length, self.cursor + 1);
        self.data[self.cursor] = byte;
        self.length += 1;
        self.cursor += 1;

        Ok(true)
    }

    /// Replaces the whole code point at the cursor with `code_point`.
    /// Only valid mid-buffer in overwrite mode.
    ///
    /// The outgoing width comes from scanning continuation bytes after the
    /// cursor, the incoming width from the leading byte of `code_point`. Only
    /// that many bytes of `code_point` are written; a slice shorter than its
    /// announced width is rejected without touching the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the replacement is wider than
    /// the free space and the buffer could not grow. The outgoing code point has
    /// already been removed (and wiped) at that point.
    pub fn overwrite(&mut self, code_point: &[u8]) -> Result<bool, BufferError> {
        if self.cursor >= self.length || self.insert_mode {
            return Ok(false);
        }

        let Some(&lead) = code_point.first() else {
            return Ok(false);
        };

        let width = sequence_width(lead);
        if code_point.len() < width {
            return Ok(false);
        }

        let end = self.code_point_end(self.cursor);
        self.remove_range(self.cursor, end);

        self.maybe_grow_to(self.length + width)?;

        self.data.copy_within(self.cursor..self.length, self.cursor + width);
        self.data[self.cursor..self.cursor + width].copy_from_slice(&code_point[..width]);
        self.length += width;
        self.cursor += width;

        Ok(true)
    }

    /// Removes the code point before the cursor (backspace).
    pub fn erase_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let start = self.code_point_start(self.cursor - 1);
        let end = self.cursor;
        self.remove_range(start, end);
        self.cursor = start;

        true
    }

    /// Removes the code point at the cursor (delete).
    pub fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.length {
            return false;
        }

        let end = self.code_point_end(self.cursor);
        self.remove_range(self.cursor, end);

        true
    }

    /// Moves the cursor one code point to the left.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor = self.code_point_start(self.cursor - 1);

        true
    }

    /// Moves the cursor one code point to the right.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.length {
            return false;
        }

        self.cursor = self.code_point_end(self.cursor);

        true
    }

    /// Moves the cursor to the start of the buffer.
    pub fn move_home(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor = 0;

        true
    }

    /// Moves the cursor to the end of the buffer.
    pub fn move_end(&mut self) -> bool {
        if self.cursor == self.length {
            return false;
        }

        self.cursor = self.length;

        true
    }

    /// Wipes every byte and resets the buffer to empty.
    pub fn discard(&mut self) {
        wipe(&mut self.data);
        self.length = 0;
        self.cursor = 0;
    }

    /// NUL-terminates the passphrase and hands the allocation over.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the buffer is exactly full and
    /// cannot grow to make room for the terminator. The buffer is still wiped on
    /// drop in that case.
    pub fn into_secret(mut self) -> Result<SecretBuffer, BufferError> {
        self.maybe_grow_to(self.length + 1)?;
        self.data[self.length] = 0;

        let data = core::mem::take(&mut self.data);
        let length = self.length;
        self.length = 0;
        self.cursor = 0;

        Ok(SecretBuffer::from_parts(data, length))
    }

    /// Full backing storage, capacity included.
    #[cfg(test)]
    pub(crate) fn raw(&self) -> &[u8] {
        &self.data
    }

    fn code_point_start(&self, mut index: usize) -> usize {
        while index > 0 && is_continuation(self.data[index]) {
            index -= 1;
        }

        index
    }

    fn code_point_end(&self, index: usize) -> usize {
        let mut end = index + 1;
        while end < self.length && is_continuation(self.data[end]) {
            end += 1;
        }

        end
    }

    /// Removes `[start, end)`, shifting the tail left and wiping the vacated bytes.
    fn remove_range(&mut self, start: usize, end: usize) {
        let removed = end - start;

        self.data.copy_within(end..self.length, start);
        wipe(&mut self.data[self.length - removed..self.length]);
        self.length -= removed;
    }

    #[inline(always)]
    fn maybe_grow_to(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        while self.capacity() < min_capacity {
            self.grow()?;
        }

        Ok(())
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<(), BufferError> {
        #[cfg(any(test, feature = "test-utils"))]
        if self.behaviour == BufferBehaviour::FailAtGrowth {
            return Err(BufferError::AllocationFailed);
        }

        let new_capacity = self
            .capacity()
            .checked_mul(2)
            .ok_or(BufferError::AllocationFailed)?;

        // 1. Reserve first so a refusal leaves the current storage intact
        let mut grown = Vec::new();
        grown
            .try_reserve_exact(new_capacity)
            .map_err(|_| BufferError::AllocationFailed)?;

        // 2. Copy live bytes, zero-fill the rest
        grown.extend_from_slice(&self.data[..self.length]);
        grown.resize(new_capacity, 0);

        // 3. Wipe old allocation before it is released
        wipe_vec(&mut self.data);
        self.data = grown;

        Ok(())
    }
}

impl Drop for PassphraseBuffer {
    fn drop(&mut self) {
        wipe_vec(&mut self.data);
    }
}

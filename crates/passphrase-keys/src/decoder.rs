// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use crate::key::Key;
use crate::source::ByteSource;

const ESC: u8 = 0x1B;
const BACKSPACE: u8 = 0x08;
const DEL: u8 = 0x7F;

const fn ctrl(letter: u8) -> u8 {
    letter - b'@'
}

/// Decodes keystrokes from a [`ByteSource`].
///
/// The decoder is stateless: every call to [`decode`](KeyDecoder::decode)
/// starts from a byte the caller already read and pulls whatever else the
/// sequence needs straight from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDecoder {
    /// Decode `ESC`-prefixed sequences (arrow keys, Home/End, Insert, Delete).
    pub dedicated_keys: bool,
    /// Map Ctrl-A/B/D/E/F to Home/Left/Delete/End/Right.
    pub control_aliases: bool,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self {
            dedicated_keys: true,
            control_aliases: true,
        }
    }
}

impl KeyDecoder {
    /// Creates a decoder with the given sequence families enabled.
    pub fn new(dedicated_keys: bool, control_aliases: bool) -> Self {
        Self {
            dedicated_keys,
            control_aliases,
        }
    }

    /// Decodes the key that starts with `first`.
    ///
    /// End of input inside an escape sequence resolves to [`Key::None`]; the
    /// next read from the source reports it again.
    ///
    /// # Errors
    ///
    /// Propagates read errors from `source` while consuming an escape sequence.
    pub fn decode(&self, first: u8, source: &mut dyn ByteSource) -> io::Result<Key> {
        if first == ESC && self.dedicated_keys {
            return Self::decode_escape(source);
        }

        let key = match first {
            BACKSPACE | DEL => Key::Erase,
            b if b >= b' ' => Key::Char(b),
            b if self.control_aliases => Self::decode_control(b),
            _ => Key::None,
        };

        Ok(key)
    }

    fn decode_control(byte: u8) -> Key {
        match byte {
            b if b == ctrl(b'A') => Key::Home,
            b if b == ctrl(b'B') => Key::Left,
            b if b == ctrl(b'D') => Key::Delete,
            b if b == ctrl(b'E') => Key::End,
            b if b == ctrl(b'F') => Key::Right,
            _ => Key::None,
        }
    }

    fn decode_escape(source: &mut dyn ByteSource) -> io::Result<Key> {
        let key = match source.read_byte()? {
            Some(b'O') => match source.read_byte()? {
                Some(b'H') => Key::Home,
                Some(b'F') => Key::End,
                _ => Key::None,
            },
            Some(b'[') => match source.read_byte()? {
                Some(b'C') => Key::Right,
                Some(b'D') => Key::Left,
                Some(digit @ b'1'..=b'4') => match source.read_byte()? {
                    Some(b'~') => Self::tilde_key(digit),
                    _ => Key::None,
                },
                _ => Key::None,
            },
            _ => Key::None,
        };

        Ok(key)
    }

    fn tilde_key(digit: u8) -> Key {
        match digit {
            b'1' => Key::Home,
            b'2' => Key::ToggleInsert,
            b'3' => Key::Delete,
            _ => Key::End,
        }
    }
}

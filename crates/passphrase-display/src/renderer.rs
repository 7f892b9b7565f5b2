// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::Write;

use crate::event::EditEvent;
use crate::policy::RenderPolicy;

/// Glyph drawn per code point under [`RenderPolicy::Starred`].
pub const DEFAULT_MASK_GLYPH: char = '*';
/// Banner shown under [`RenderPolicy::TextIndicator`] while nothing is typed.
pub const DEFAULT_EMPTY_TEXT: &str = "(empty)";
/// Banner shown under [`RenderPolicy::TextIndicator`] once something is typed.
pub const DEFAULT_NOT_EMPTY_TEXT: &str = "(not empty)";

const CURSOR_LEFT: &[u8] = b"\x1b[D";
const CURSOR_RIGHT: &[u8] = b"\x1b[C";
const INSERT_CELL: &[u8] = b"\x1b[@";
const DELETE_CELL: &[u8] = b"\x1b[P";
const CLEAR_TO_EOL: &[u8] = b"\x1b[K";

/// Renders [`EditEvent`]s onto a feedback stream.
///
/// [`sequence`](DisplayRenderer::sequence) is pure and only computes the bytes;
/// [`render`](DisplayRenderer::render) writes and flushes them, and keeps track
/// of which text-indicator banner is on screen.
pub struct DisplayRenderer<W: Write> {
    out: W,
    policy: RenderPolicy,
    movement: bool,
    mask_glyph: char,
    empty_text: String,
    not_empty_text: String,
    newline_on_finish: bool,
    showing_not_empty: bool,
}

impl<W: Write> core::fmt::Debug for DisplayRenderer<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisplayRenderer")
            .field("policy", &self.policy)
            .field("movement", &self.movement)
            .finish_non_exhaustive()
    }
}

impl<W: Write> DisplayRenderer<W> {
    /// Creates a renderer with movement support, the default glyph and banners,
    /// and a final newline.
    pub fn new(out: W, policy: RenderPolicy) -> Self {
        Self {
            out,
            policy,
            movement: true,
            mask_glyph: DEFAULT_MASK_GLYPH,
            empty_text: DEFAULT_EMPTY_TEXT.to_owned(),
            not_empty_text: DEFAULT_NOT_EMPTY_TEXT.to_owned(),
            newline_on_finish: true,
            showing_not_empty: false,
        }
    }

    /// Whether the editor supports cursor movement. Without it a starred
    /// erase blanks the cell instead of deleting it.
    pub fn with_movement(mut self, movement: bool) -> Self {
        self.movement = movement;
        self
    }

    /// Replaces the mask glyph.
    pub fn with_mask_glyph(mut self, glyph: char) -> Self {
        self.mask_glyph = glyph;
        self
    }

    /// Replaces the text-indicator banners.
    pub fn with_indicator_texts(mut self, empty: &str, not_empty: &str) -> Self {
        self.empty_text = empty.to_owned();
        self.not_empty_text = not_empty.to_owned();
        self
    }

    /// Whether [`EditEvent::Finish`] prints a newline.
    pub fn with_newline_on_finish(mut self, newline: bool) -> Self {
        self.newline_on_finish = newline;
        self
    }

    /// Active policy.
    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// The feedback stream.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the renderer, returning the feedback stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Bytes to emit for `event`. `buffer_empty` is the buffer state after the
    /// change.
    pub fn sequence(&self, event: &EditEvent<'_>, buffer_empty: bool) -> Vec<u8> {
        let mut seq = Vec::new();

        if let EditEvent::Finish = event {
            if self.newline_on_finish {
                seq.push(b'\n');
            }
            return seq;
        }

        match self.policy {
            policy if policy.tracks_cursor() => self.cell_sequence(event, &mut seq),
            RenderPolicy::TextIndicator => self.indicator_sequence(event, buffer_empty, &mut seq),
            _ => {}
        }

        seq
    }

    /// Writes and flushes the bytes for `event`.
    ///
    /// Write failures are logged and dropped: feedback is never worth aborting
    /// a read over.
    pub fn render(&mut self, event: &EditEvent<'_>, buffer_empty: bool) {
        let seq = self.sequence(event, buffer_empty);

        if self.policy == RenderPolicy::TextIndicator {
            match event {
                EditEvent::Start => self.showing_not_empty = false,
                EditEvent::Finish => {}
                _ => self.showing_not_empty = !buffer_empty,
            }
        }

        if seq.is_empty() {
            return;
        }

        if let Err(err) = self.out.write_all(&seq).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %err, "feedback write failed");
        }
    }

    fn cell_sequence(&self, event: &EditEvent<'_>, seq: &mut Vec<u8>) {
        match *event {
            EditEvent::Append(code_point) | EditEvent::Overwrite(code_point) => {
                self.push_cell(code_point, seq);
            }
            EditEvent::Insert(code_point) => {
                seq.extend_from_slice(INSERT_CELL);
                self.push_cell(code_point, seq);
            }
            EditEvent::Erase => {
                if self.movement {
                    seq.extend_from_slice(CURSOR_LEFT);
                    seq.extend_from_slice(DELETE_CELL);
                } else {
                    seq.extend_from_slice(CURSOR_LEFT);
                    seq.push(b' ');
                    seq.extend_from_slice(CURSOR_LEFT);
                }
            }
            EditEvent::Delete => seq.extend_from_slice(DELETE_CELL),
            EditEvent::Left => seq.extend_from_slice(CURSOR_LEFT),
            EditEvent::Right => seq.extend_from_slice(CURSOR_RIGHT),
            EditEvent::Home(n) => push_cursor_jump(n, b'D', seq),
            EditEvent::End(n) => push_cursor_jump(n, b'C', seq),
            EditEvent::Start | EditEvent::Finish => {}
        }
    }

    fn push_cell(&self, code_point: &[u8], seq: &mut Vec<u8>) {
        if code_point.is_empty() {
            return;
        }

        match self.policy {
            RenderPolicy::Echo => seq.extend_from_slice(code_point),
            _ => {
                let mut glyph = [0u8; 4];
                seq.extend_from_slice(self.mask_glyph.encode_utf8(&mut glyph).as_bytes());
            }
        }
    }

    fn indicator_sequence(&self, event: &EditEvent<'_>, buffer_empty: bool, seq: &mut Vec<u8>) {
        match event {
            EditEvent::Start => push_banner(&self.empty_text, seq),
            EditEvent::Append(_)
            | EditEvent::Insert(_)
            | EditEvent::Overwrite(_)
            | EditEvent::Erase
            | EditEvent::Delete => {
                if buffer_empty && self.showing_not_empty {
                    push_banner(&self.empty_text, seq);
                } else if !buffer_empty && !self.showing_not_empty {
                    push_banner(&self.not_empty_text, seq);
                }
            }
            _ => {}
        }
    }
}

/// Clears to end of line, prints `text`, moves back to where it started.
fn push_banner(text: &str, seq: &mut Vec<u8>) {
    seq.extend_from_slice(CLEAR_TO_EOL);
    seq.extend_from_slice(text.as_bytes());
    push_cursor_jump(text.chars().count(), b'D', seq);
}

fn push_cursor_jump(n: usize, direction: u8, seq: &mut Vec<u8>) {
    if n == 0 {
        return;
    }

    seq.extend_from_slice(b"\x1b[");
    seq.extend_from_slice(n.to_string().as_bytes());
    seq.push(direction);
}

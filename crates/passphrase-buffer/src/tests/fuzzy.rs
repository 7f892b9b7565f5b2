// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use passphrase_zero::is_wiped;

use crate::PassphraseBuffer;
use crate::utf8::is_continuation;

#[derive(Debug, Clone)]
enum Op {
    Type(char),
    Left,
    Right,
    Home,
    End,
    Erase,
    Delete,
    Toggle,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<char>().prop_map(Op::Type),
        1 => Just(Op::Left),
        1 => Just(Op::Right),
        1 => Just(Op::Home),
        1 => Just(Op::End),
        1 => Just(Op::Erase),
        1 => Just(Op::Delete),
        1 => Just(Op::Toggle),
    ]
}

/// Types `c` the way the line editor does: whole code points only.
fn type_char(buffer: &mut PassphraseBuffer, c: char) {
    let mut encoded = [0u8; 4];
    let bytes = c.encode_utf8(&mut encoded).as_bytes();

    if buffer.cursor_at_end() {
        for &b in bytes {
            buffer.append(b).expect("Failed to append(..)");
        }
    } else if buffer.insert_mode() {
        for &b in bytes {
            buffer.insert(b).expect("Failed to insert(..)");
        }
    } else {
        buffer.overwrite(bytes).expect("Failed to overwrite(..)");
    }
}

/// Plain `Vec<char>` model of the same editing session.
struct Model {
    chars: Vec<char>,
    cursor: usize,
    insert: bool,
}

impl Model {
    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Type(c) => {
                if self.cursor == self.chars.len() || self.insert {
                    self.chars.insert(self.cursor, c);
                } else {
                    self.chars[self.cursor] = c;
                }
                self.cursor += 1;
            }
            Op::Left => self.cursor = self.cursor.saturating_sub(1),
            Op::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            Op::Home => self.cursor = 0,
            Op::End => self.cursor = self.chars.len(),
            Op::Erase => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            Op::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            Op::Toggle => self.insert = !self.insert,
        }
    }
}

fn apply(buffer: &mut PassphraseBuffer, op: &Op) {
    match *op {
        Op::Type(c) => type_char(buffer, c),
        Op::Left => {
            buffer.move_left();
        }
        Op::Right => {
            buffer.move_right();
        }
        Op::Home => {
            buffer.move_home();
        }
        Op::End => {
            buffer.move_end();
        }
        Op::Erase => {
            buffer.erase_before_cursor();
        }
        Op::Delete => {
            buffer.delete_at_cursor();
        }
        Op::Toggle => buffer.toggle_insert(),
    }
}

fn assert_invariants(buffer: &PassphraseBuffer, model: &Model) {
    assert!(buffer.cursor() <= buffer.len());
    assert!(buffer.len() <= buffer.capacity());

    if buffer.cursor() < buffer.len() {
        assert!(!is_continuation(buffer.as_bytes()[buffer.cursor()]));
    }

    let expected: String = model.chars.iter().collect();
    assert_eq!(buffer.as_bytes(), expected.as_bytes());
    assert_eq!(buffer.code_points_before_cursor(), model.cursor);
    assert_eq!(buffer.code_points_after_cursor(), model.chars.len() - model.cursor);

    assert!(is_wiped(&buffer.raw()[buffer.len()..]));
}

proptest! {
    #[test]
    fn fuzzy_buffer_matches_char_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut buffer = PassphraseBuffer::new().expect("Failed to new()");
        let mut model = Model { chars: Vec::new(), cursor: 0, insert: true };

        for op in &ops {
            apply(&mut buffer, op);
            model.apply(op);
            assert_invariants(&buffer, &model);
        }
    }

    #[test]
    fn fuzzy_erase_then_retype_restores(text in "\\PC{1,40}", back in 0usize..40) {
        let mut buffer = PassphraseBuffer::new().expect("Failed to new()");
        for c in text.chars() {
            type_char(&mut buffer, c);
        }

        let chars: Vec<char> = text.chars().collect();
        let back = back % chars.len();
        for _ in 0..back {
            buffer.move_left();
        }

        let removed = chars[chars.len() - back - 1];
        buffer.erase_before_cursor();
        type_char(&mut buffer, removed);

        prop_assert_eq!(buffer.as_bytes(), text.as_bytes());
    }
}

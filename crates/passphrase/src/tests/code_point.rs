// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use passphrase_keys::ByteSource;
use passphrase_keys::test_utils::{MockByteSource, MockByteSourceBehaviour};

use crate::code_point::Lookahead;

fn read(lead: u8, rest: &[u8]) -> (Option<Vec<u8>>, Option<u8>) {
    let mut mock = MockByteSource::new(rest, MockByteSourceBehaviour::None);
    let mut input = Lookahead::new(&mut mock);

    let code_point = input
        .read_code_point(lead)
        .expect("Failed to read_code_point(..)")
        .map(|cp| cp.as_bytes().to_vec());
    let next = input.read_byte().expect("Failed to read_byte()");

    (code_point, next)
}

#[test]
fn test_ascii_is_complete() {
    assert_eq!(read(b'a', b"b"), (Some(b"a".to_vec()), Some(b'b')));
}

#[test]
fn test_multibyte_sequences() {
    let euro = "€".as_bytes();
    assert_eq!(read(euro[0], &euro[1..]), (Some(euro.to_vec()), None));

    let emoji = "😀".as_bytes();
    assert_eq!(read(emoji[0], &emoji[1..]), (Some(emoji.to_vec()), None));
}

#[test]
fn test_stray_continuation_is_dropped() {
    assert_eq!(read(0x80, b"x"), (None, Some(b'x')));
}

#[test]
fn test_overlong_lead_is_dropped() {
    assert_eq!(read(0xF8, b"x"), (None, Some(b'x')));
    assert_eq!(read(0xFF, b"x"), (None, Some(b'x')));
}

#[test]
fn test_interrupted_sequence_pushes_back() {
    assert_eq!(read(0xE2, &[0x82, b'\n']), (None, Some(b'\n')));
}

#[test]
fn test_eof_inside_sequence() {
    assert_eq!(read(0xE2, &[0x82]), (None, None));
}

#[test]
fn test_read_error_inside_sequence() {
    let mut mock = MockByteSource::new(&[0x82, 0xAC], MockByteSourceBehaviour::FailAtNthRead(2));
    let mut input = Lookahead::new(&mut mock);

    assert!(input.read_code_point(0xE2).is_err());
}

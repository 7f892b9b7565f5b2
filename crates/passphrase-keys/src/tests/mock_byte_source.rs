// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io;

use crate::ByteSource;
use crate::support::test_utils::{MockByteSource, MockByteSourceBehaviour};

#[test]
fn test_mock_byte_source_behaviour_none() {
    let mut mock = MockByteSource::new(b"ab", MockByteSourceBehaviour::None);

    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'a'));
    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'b'));
    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), None);
    assert_eq!(mock.read_count(), 3);
}

#[test]
fn test_mock_byte_source_fail_at_nth_read() {
    let mut mock = MockByteSource::new(b"abc", MockByteSourceBehaviour::FailAtNthRead(2));

    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'a'));

    let err = mock.read_byte().expect_err("Expected read_byte() to fail");
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

    // The failed read consumed nothing
    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'b'));
}

#[test]
fn test_mock_byte_source_interrupt_is_retried() {
    let mut mock = MockByteSource::new(b"ab", MockByteSourceBehaviour::InterruptAtNthRead(1));

    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'a'));
    assert_eq!(mock.interruptions(), 1);
    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'b'));
    assert_eq!(mock.interruptions(), 1);
}

#[test]
fn test_mock_byte_source_change_behaviour() {
    let mut mock = MockByteSource::new(b"abc", MockByteSourceBehaviour::None);

    assert!(mock.read_byte().is_ok());

    mock.change_behaviour(MockByteSourceBehaviour::FailAtNthRead(2));
    assert!(mock.read_byte().is_err());

    mock.change_behaviour(MockByteSourceBehaviour::None);
    assert_eq!(mock.read_byte().expect("Failed to read_byte()"), Some(b'b'));
}

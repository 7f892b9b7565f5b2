// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use passphrase::{EditorConfig, ReadFlags, RenderPolicy, read_passphrase, read_passphrase_with};

fn pipe_with(data: &[u8]) -> libc::c_int {
    let mut fds = [0 as libc::c_int; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);

    let n = unsafe { libc::write(fds[1], data.as_ptr().cast(), data.len()) };
    assert_eq!(n, data.len() as isize);
    unsafe { libc::close(fds[1]) };

    fds[0]
}

#[test]
fn test_read_passphrase_from_descriptor() {
    let fd = pipe_with(b"correct horse\x7f\x7f\x7f\x7f\x7fbattery\n");

    let secret =
        read_passphrase(fd, ReadFlags::EXISTING_PASSPHRASE).expect("Expected a passphrase");

    assert_eq!(secret.as_str(), Ok("correct battery"));
    unsafe { libc::close(fd) };
}

#[test]
fn test_read_passphrase_bad_descriptor_is_none() {
    assert!(read_passphrase(-1, ReadFlags::EXISTING_PASSPHRASE).is_none());
}

#[test]
fn test_invalid_config_is_none() {
    let fd = pipe_with(b"x\n");
    let config = EditorConfig {
        policy: RenderPolicy::Echo,
        movement: false,
        ..EditorConfig::default()
    };

    assert!(read_passphrase_with(&config, fd, ReadFlags::EXISTING_PASSPHRASE).is_none());
    unsafe { libc::close(fd) };
}

#[test]
fn test_unknown_flag_bits_are_ignored() {
    let fd = pipe_with(b"pw\n");

    let flags = ReadFlags::from_bits_truncate(0x100);
    let secret = read_passphrase(fd, flags).expect("Expected a passphrase");

    assert_eq!(secret.as_bytes(), b"pw");
    unsafe { libc::close(fd) };
}

#[test]
fn test_secret_wipe() {
    let fd = pipe_with(b"wipe me\n");
    let mut secret =
        read_passphrase(fd, ReadFlags::EXISTING_PASSPHRASE).expect("Expected a passphrase");

    secret.wipe();

    assert!(secret.is_empty());
    assert_eq!(format!("{secret:?}"), "[REDACTED SecretBuffer]");
    unsafe { libc::close(fd) };
}

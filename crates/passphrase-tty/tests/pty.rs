// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw mode against a real pseudo-terminal.

#![cfg(target_os = "linux")]

use serial_test::serial;

use passphrase_tty::{RawModeGuard, enable_raw_mode, restore_mode};

struct Pty {
    master: libc::c_int,
    slave: libc::c_int,
}

impl Pty {
    fn open() -> Self {
        unsafe {
            let master = libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY);
            assert!(master >= 0, "posix_openpt failed");
            assert_eq!(libc::grantpt(master), 0);
            assert_eq!(libc::unlockpt(master), 0);

            let mut name = [0 as libc::c_char; 128];
            assert_eq!(libc::ptsname_r(master, name.as_mut_ptr(), name.len()), 0);

            let slave = libc::open(name.as_ptr(), libc::O_RDWR | libc::O_NOCTTY);
            assert!(slave >= 0, "failed to open pty slave");

            Self { master, slave }
        }
    }

    fn lflag(&self) -> libc::tcflag_t {
        let mut termios: libc::termios = unsafe { core::mem::zeroed() };
        assert_eq!(unsafe { libc::tcgetattr(self.slave, &mut termios) }, 0);

        termios.c_lflag
    }
}

impl Drop for Pty {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.slave);
            libc::close(self.master);
        }
    }
}

#[test]
#[serial]
fn test_enable_and_restore() {
    let pty = Pty::open();
    let before = pty.lflag();
    assert_ne!(before & libc::ECHO, 0);
    assert_ne!(before & libc::ICANON, 0);

    let ctx = enable_raw_mode(pty.slave).expect("Failed to enable_raw_mode(..)");
    assert_eq!(ctx.fd(), pty.slave);

    let raw = pty.lflag();
    assert_eq!(raw & (libc::ECHO | libc::ICANON), 0);

    restore_mode(&ctx).expect("Failed to restore_mode(..)");
    assert_eq!(pty.lflag(), before);
}

#[test]
#[serial]
fn test_guard_restores_on_drop() {
    let pty = Pty::open();
    let before = pty.lflag();

    {
        let guard = RawModeGuard::new(pty.slave).expect("Failed to RawModeGuard::new(..)");
        assert_eq!(guard.context().fd(), pty.slave);
        assert_eq!(pty.lflag() & libc::ECHO, 0);
    }

    assert_eq!(pty.lflag(), before);
}

#[test]
#[serial]
fn test_contexts_are_independent() {
    let first = Pty::open();
    let second = Pty::open();

    let ctx_first = enable_raw_mode(first.slave).expect("Failed to enable_raw_mode(..)");
    let ctx_second = enable_raw_mode(second.slave).expect("Failed to enable_raw_mode(..)");

    restore_mode(&ctx_first).expect("Failed to restore_mode(..)");

    assert_ne!(first.lflag() & libc::ECHO, 0);
    assert_eq!(second.lflag() & libc::ECHO, 0);

    restore_mode(&ctx_second).expect("Failed to restore_mode(..)");
}

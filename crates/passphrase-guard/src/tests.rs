// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Tests for passphrase_guard

use crate::GuardStatus;

#[test]
fn test_is_protected() {
    let none = GuardStatus {
        not_dumpable: false,
        core_limit_zero: false,
    };
    let partial = GuardStatus {
        not_dumpable: false,
        core_limit_zero: true,
    };

    assert!(!none.is_protected());
    assert!(partial.is_protected());
}

#[cfg(target_os = "linux")]
mod linux {
    use serial_test::serial;

    /// Runs an ignored test as a subprocess and returns its exit code.
    fn run_test_as_subprocess(test_name: &str) -> Option<i32> {
        let exe = std::env::current_exe().expect("Failed to current_exe()");
        let status = std::process::Command::new(exe)
            .args([
                "--exact",
                test_name,
                "--ignored",
                "--test-threads=1",
                "--nocapture",
            ])
            .status()
            .expect("Failed to run subprocess");

        status.code()
    }

    // Subprocess test: hardening takes effect and is cached
    #[test]
    #[ignore]
    fn subprocess_test_harden_process_applies_once() {
        let status = crate::harden_process();

        assert!(status.not_dumpable);
        assert_eq!(unsafe { libc::prctl(libc::PR_GET_DUMPABLE, 0, 0, 0, 0) }, 0);

        let mut limit = libc::rlimit {
            rlim_cur: 1,
            rlim_max: 1,
        };
        assert_eq!(unsafe { libc::getrlimit(libc::RLIMIT_CORE, &mut limit) }, 0);
        assert_eq!(limit.rlim_cur, 0);

        // Re-enable dumping behind the guard's back: the cached status is kept
        unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 1, 0, 0, 0) };
        assert_eq!(crate::harden_process(), status);
    }

    #[test]
    #[serial(guard)]
    fn test_harden_process_applies_once() {
        let exit_code =
            run_test_as_subprocess("tests::linux::subprocess_test_harden_process_applies_once");

        assert_eq!(exit_code, Some(0), "Subprocess test failed");
    }
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! passphrase_guard - Keeps a typed passphrase out of core dumps and away from
//! ptrace.
//!
//! [`harden_process`] applies, once per process:
//! - `prctl(PR_SET_DUMPABLE, 0)`: no core dumps, no ptrace attach by
//!   same-uid processes
//! - `setrlimit(RLIMIT_CORE, 0)`: core size limited to zero
//!
//! Both are best effort. The returned [`GuardStatus`] says which took effect;
//! failures are logged, never returned.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

/// Which protections [`harden_process`] managed to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardStatus {
    /// `prctl(PR_SET_DUMPABLE, 0)` succeeded.
    pub not_dumpable: bool,
    /// `setrlimit(RLIMIT_CORE, 0)` succeeded.
    pub core_limit_zero: bool,
}

impl GuardStatus {
    /// At least one protection is in place.
    pub fn is_protected(&self) -> bool {
        self.not_dumpable || self.core_limit_zero
    }
}

static STATUS: OnceLock<GuardStatus> = OnceLock::new();

/// Hardens the process on first call and returns the cached status afterwards.
///
/// Thread-safe: concurrent first calls perform the syscalls exactly once.
///
/// # Example
///
/// ```
/// let status = passphrase_guard::harden_process();
///
/// // Cached: a second call has no side effects
/// assert_eq!(passphrase_guard::harden_process(), status);
/// ```
pub fn harden_process() -> GuardStatus {
    *STATUS.get_or_init(apply)
}

fn apply() -> GuardStatus {
    let status = GuardStatus {
        not_dumpable: set_not_dumpable(),
        core_limit_zero: set_core_limit_zero(),
    };

    if !status.is_protected() {
        tracing::warn!("process hardening unavailable, passphrase may appear in core dumps");
    } else {
        tracing::debug!(?status, "process hardened");
    }

    status
}

#[cfg(target_os = "linux")]
fn set_not_dumpable() -> bool {
    // SAFETY: PR_SET_DUMPABLE takes plain integer arguments
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0, 0, 0, 0) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn set_not_dumpable() -> bool {
    false
}

#[cfg(target_os = "linux")]
fn set_core_limit_zero() -> bool {
    let limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    // SAFETY: limit is a valid rlimit for the duration of the call
    unsafe { libc::setrlimit(libc::RLIMIT_CORE, &limit) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn set_core_limit_zero() -> bool {
    false
}

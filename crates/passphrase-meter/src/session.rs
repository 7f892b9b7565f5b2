// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::ffi::{CString, OsStr, OsString};
use std::io;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::os::unix::ffi::OsStrExt;

use passphrase_zero::{wipe_spare_capacity, wipe_vec};

use crate::error::MeterError;
use crate::flags::ReadFlags;
use crate::sys;

/// Environment variable naming the meter program.
pub const METER_ENV_VAR: &str = "LIBPASSPHRASE_METER";
/// Meter program used when neither an override nor [`METER_ENV_VAR`] is set.
pub const DEFAULT_METER_PROGRAM: &str = "passcheck";

/// Exit status of a meter child that failed before `exec`.
const CHILD_FAILURE_STATUS: libc::c_int = 127;

/// Lifecycle of a [`MeterSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterState {
    /// No meter was requested.
    Unconfigured,
    /// The child is forked and has not confirmed `exec` yet.
    Starting,
    /// The meter program is running and accepts snapshots.
    Active,
    /// The meter is gone (finished, failed or never started successfully).
    Stopped,
}

/// Everything the child needs, prepared before `fork` so the child does not
/// allocate.
struct ChildPlan {
    program: CString,
    flag: CString,
    data_read: RawFd,
    stdout: RawFd,
    handshake_write: RawFd,
}

/// An optional strength-meter child process fed over a pipe.
///
/// # Handshake
///
/// Besides the data pipe, [`start`](MeterSession::start) creates a
/// close-on-exec handshake pipe. A successful `exec` closes the child's write
/// end, so the parent reads end of file; a child that fails anywhere before
/// `exec` writes a single byte instead and exits. The parent blocks only for
/// that one read.
///
/// # Privileges
///
/// If the process runs with different real and effective ids (setuid login
/// programs), the child drops to the real gid and uid before `exec`. Failing to
/// do so counts as a child failure.
///
/// # Framing
///
/// Every snapshot reaches the meter as one whole `\n`-terminated line. A
/// snapshot the pipe only partly accepts leaves its tail in `unsent`; later
/// updates are dropped until that tail is flushed, and [`stop`](MeterSession::stop)
/// flushes it blocking before closing the pipe. The tail is wiped once sent.
pub struct MeterSession {
    state: MeterState,
    child: Option<libc::pid_t>,
    data_write: Option<OwnedFd>,
    unsent: Vec<u8>,
}

impl core::fmt::Debug for MeterSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeterSession")
            .field("state", &self.state)
            .field("child", &self.child)
            .field("unsent", &"REDACTED")
            .finish_non_exhaustive()
    }
}

impl Default for MeterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MeterSession {
    /// Creates an [`Unconfigured`](MeterState::Unconfigured) session.
    pub fn new() -> Self {
        Self {
            state: MeterState::Unconfigured,
            child: None,
            data_write: None,
            unsent: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> MeterState {
        self.state
    }

    /// Pid of the running meter child, if any.
    pub fn child_pid(&self) -> Option<libc::pid_t> {
        self.child
    }

    /// Whether snapshots are being delivered.
    pub fn is_active(&self) -> bool {
        self.state == MeterState::Active
    }

    /// Resolves the meter program: `program_override`, else
    /// [`METER_ENV_VAR`] when set and non-empty, else [`DEFAULT_METER_PROGRAM`].
    pub fn resolve_program(program_override: Option<&OsStr>) -> OsString {
        if let Some(program) = program_override {
            return program.to_owned();
        }

        match std::env::var_os(METER_ENV_VAR) {
            Some(program) if !program.is_empty() => program,
            _ => OsString::from(DEFAULT_METER_PROGRAM),
        }
    }

    /// Starts the meter for a [`ReadFlags::NEW_PASSPHRASE`] read.
    ///
    /// Without that flag nothing happens and the session stays
    /// [`Unconfigured`](MeterState::Unconfigured). The meter's stdout is
    /// `output_fd` when `flags` leave room for it to draw and `/dev/null`
    /// otherwise.
    ///
    /// Never fails: a meter that cannot be started leaves the session
    /// [`Stopped`](MeterState::Stopped).
    pub fn start(
        &mut self,
        flags: ReadFlags,
        program_override: Option<&OsStr>,
        output_fd: Option<RawFd>,
    ) -> MeterState {
        if !flags.contains(ReadFlags::NEW_PASSPHRASE) || self.state != MeterState::Unconfigured {
            return self.state;
        }

        let program = Self::resolve_program(program_override);
        let output_fd = output_fd.filter(|_| flags.meter_may_draw());

        self.state = MeterState::Starting;

        match self.spawn(&program, output_fd) {
            Ok(()) => {
                tracing::debug!(program = ?program, "strength meter active");
                self.state = MeterState::Active;
            }
            Err(err) => {
                tracing::warn!(program = ?program, error = %err, "strength meter unavailable");
                self.stop();
            }
        }

        self.state
    }

    /// Sends the current buffer contents to the meter.
    ///
    /// A full pipe drops the update, as does a previous snapshot whose tail is
    /// still waiting for room. Any other write failure stops the meter.
    pub fn update(&mut self, snapshot: &[u8]) {
        if self.state != MeterState::Active {
            return;
        }

        let result = {
            let _sigpipe = sys::SigpipeBlock::new();
            self.send(snapshot)
        };

        match result {
            Ok(true) => {}
            Ok(false) => tracing::debug!("meter pipe full, snapshot dropped"),
            Err(err) => {
                tracing::warn!(error = %err, "strength meter stopped");
                self.stop();
            }
        }
    }

    /// Closes the data pipe and reaps the child. Idempotent.
    ///
    /// A partly sent snapshot is completed first, blocking until the meter
    /// reads it.
    pub fn stop(&mut self) {
        if !self.unsent.is_empty() {
            let _sigpipe = sys::SigpipeBlock::new();
            if let Err(err) = self.flush_unsent_blocking() {
                tracing::debug!(error = %err, "failed to finish last snapshot");
            }
        }
        wipe_vec(&mut self.unsent);
        self.unsent.clear();

        // Closing the write end delivers EOF to the meter
        drop(self.data_write.take());

        if let Some(pid) = self.child.take() {
            match sys::wait_child(pid) {
                Ok(status) => tracing::debug!(status, "strength meter reaped"),
                Err(err) => tracing::debug!(error = %err, "failed to reap strength meter"),
            }
        }

        if self.state != MeterState::Unconfigured {
            self.state = MeterState::Stopped;
        }
    }

    /// Returns `Ok(false)` when the snapshot was dropped for lack of room.
    fn send(&mut self, snapshot: &[u8]) -> Result<bool, MeterError> {
        let Some(fd) = self.data_write.as_ref() else {
            return Ok(false);
        };

        if !self.unsent.is_empty() {
            match sys::write_some(fd, &self.unsent) {
                Ok(n) => consume_front(&mut self.unsent, n),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => {}
                Err(err) => return Err(MeterError::Write(err)),
            }

            if !self.unsent.is_empty() {
                return Ok(false);
            }
        }

        let written = match sys::write_line(fd, snapshot) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(false),
            Err(err) => return Err(MeterError::Write(err)),
        };

        let line_len = snapshot.len() + 1;
        if written < line_len {
            self.unsent
                .try_reserve_exact(line_len - written)
                .map_err(|_| MeterError::Backlog)?;

            if written < snapshot.len() {
                self.unsent.extend_from_slice(&snapshot[written..]);
            }
            self.unsent.push(b'\n');
        }

        Ok(true)
    }

    fn flush_unsent_blocking(&mut self) -> io::Result<()> {
        let Some(fd) = self.data_write.as_ref() else {
            return Ok(());
        };

        sys::set_nonblocking(fd, false)?;

        while !self.unsent.is_empty() {
            let n = sys::write_some(fd, &self.unsent)?;
            if n == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
            consume_front(&mut self.unsent, n);
        }

        Ok(())
    }

    fn spawn(&mut self, program: &OsStr, output_fd: Option<RawFd>) -> Result<(), MeterError> {
        let program = CString::new(program.as_bytes()).map_err(|_| MeterError::InvalidProgram)?;
        let flag = CString::from(c"-r");

        let (data_read, data_write) = sys::cloexec_pipe().map_err(MeterError::Pipe)?;
        let (handshake_read, handshake_write) = sys::cloexec_pipe().map_err(MeterError::Pipe)?;
        sys::set_nonblocking(&data_write, true).map_err(MeterError::Pipe)?;

        let (stdout, dev_null) = match output_fd {
            Some(fd) => (fd, None),
            None => {
                let null = sys::open_dev_null().map_err(MeterError::DevNull)?;
                (null.as_raw_fd(), Some(null))
            }
        };

        let plan = ChildPlan {
            program,
            flag,
            data_read: data_read.as_raw_fd(),
            stdout,
            handshake_write: handshake_write.as_raw_fd(),
        };

        // SAFETY: the child only runs async-signal-safe calls before exec/_exit
        let pid = unsafe { libc::fork() };
        if pid == -1 {
            return Err(MeterError::Fork(io::Error::last_os_error()));
        }
        if pid == 0 {
            run_child(&plan);
        }

        // Parent keeps only the data write end and the handshake read end
        drop(data_read);
        drop(handshake_write);
        drop(dev_null);

        self.child = Some(pid);
        self.data_write = Some(data_write);

        match sys::read_byte(&handshake_read) {
            Ok(None) => Ok(()),
            Ok(Some(_)) => Err(MeterError::ChildFailed),
            Err(err) => Err(MeterError::Handshake(err)),
        }
    }
}

impl Drop for MeterSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drops the first `n` bytes of `bytes`, wiping the vacated tail.
pub(crate) fn consume_front(bytes: &mut Vec<u8>, n: usize) {
    bytes.copy_within(n.., 0);
    bytes.truncate(bytes.len() - n);
    wipe_spare_capacity(bytes);
}

/// Child side of the fork. Never returns.
fn run_child(plan: &ChildPlan) -> ! {
    let argv = [plan.program.as_ptr(), plan.flag.as_ptr(), core::ptr::null()];

    // SAFETY: only async-signal-safe libc calls on descriptors and strings
    // prepared before fork
    unsafe {
        let gid = libc::getgid();
        if libc::getegid() != gid && libc::setgid(gid) != 0 {
            child_failed(plan.handshake_write);
        }

        let uid = libc::getuid();
        if libc::geteuid() != uid && libc::setuid(uid) != 0 {
            child_failed(plan.handshake_write);
        }

        if libc::dup2(plan.data_read, libc::STDIN_FILENO) == -1 {
            child_failed(plan.handshake_write);
        }

        if libc::dup2(plan.stdout, libc::STDOUT_FILENO) == -1 {
            child_failed(plan.handshake_write);
        }

        libc::execvp(plan.program.as_ptr(), argv.as_ptr());
    }

    child_failed(plan.handshake_write)
}

fn child_failed(handshake_write: RawFd) -> ! {
    let byte = 1u8;

    // SAFETY: write and _exit are async-signal-safe
    unsafe {
        libc::write(handshake_write, (&byte as *const u8).cast(), 1);
        libc::_exit(CHILD_FAILURE_STATUS)
    }
}

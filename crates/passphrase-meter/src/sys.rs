// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Thin libc wrappers used by the meter session.

use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

/// Creates a pipe whose both ends are close-on-exec. Returns `(read, write)`.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub(crate) fn cloexec_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds = [0 as libc::c_int; 2];

    // SAFETY: fds is valid for two c_int writes
    if unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) } != 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: pipe2 succeeded, both descriptors are fresh and owned by us
    Ok(unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) })
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
pub(crate) fn cloexec_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds = [0 as libc::c_int; 2];

    // SAFETY: fds is valid for two c_int writes
    if unsafe { libc::pipe(fds.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: pipe succeeded, both descriptors are fresh and owned by us
    let (read, write) = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };

    for fd in [&read, &write] {
        // SAFETY: fd is open for the duration of the call
        if unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) } == -1 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok((read, write))
}

/// Sets or clears `O_NONBLOCK` on `fd`.
pub(crate) fn set_nonblocking(fd: &OwnedFd, nonblocking: bool) -> io::Result<()> {
    let raw = fd.as_raw_fd();

    // SAFETY: raw is open for the duration of both calls
    let flags = unsafe { libc::fcntl(raw, libc::F_GETFL) };
    if flags == -1 {
        return Err(io::Error::last_os_error());
    }

    let flags = if nonblocking {
        flags | libc::O_NONBLOCK
    } else {
        flags & !libc::O_NONBLOCK
    };

    // SAFETY: as above
    if unsafe { libc::fcntl(raw, libc::F_SETFL, flags) } == -1 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

pub(crate) fn open_dev_null() -> io::Result<OwnedFd> {
    // SAFETY: the path is a NUL-terminated literal
    let fd = unsafe { libc::open(c"/dev/null".as_ptr(), libc::O_WRONLY | libc::O_CLOEXEC) };
    if fd == -1 {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: open succeeded, the descriptor is fresh and owned by us
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// Reads a single byte, retrying `EINTR`. `Ok(None)` is end of file.
pub(crate) fn read_byte(fd: &OwnedFd) -> io::Result<Option<u8>> {
    let mut byte = 0u8;

    loop {
        // SAFETY: byte is valid for a 1-byte write
        let n = unsafe { libc::read(fd.as_raw_fd(), (&mut byte as *mut u8).cast(), 1) };

        match n {
            1 => return Ok(Some(byte)),
            0 => return Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() != io::ErrorKind::Interrupted {
                    return Err(err);
                }
            }
        }
    }
}

/// Writes `line` followed by `\n` in a single `writev`, retrying `EINTR`.
pub(crate) fn write_line(fd: &OwnedFd, line: &[u8]) -> io::Result<usize> {
    let newline = b"\n";
    let iov = [
        libc::iovec {
            iov_base: line.as_ptr() as *mut libc::c_void,
            iov_len: line.len(),
        },
        libc::iovec {
            iov_base: newline.as_ptr() as *mut libc::c_void,
            iov_len: newline.len(),
        },
    ];

    loop {
        // SAFETY: both iovecs describe live, readable memory
        let n = unsafe { libc::writev(fd.as_raw_fd(), iov.as_ptr(), iov.len() as libc::c_int) };
        if n >= 0 {
            return Ok(n as usize);
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Writes as much of `bytes` as the descriptor accepts, retrying `EINTR`.
pub(crate) fn write_some(fd: &OwnedFd, bytes: &[u8]) -> io::Result<usize> {
    loop {
        // SAFETY: bytes is live, readable memory of bytes.len() bytes
        let n = unsafe { libc::write(fd.as_raw_fd(), bytes.as_ptr().cast(), bytes.len()) };
        if n >= 0 {
            return Ok(n as usize);
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Waits for `pid`, retrying `EINTR`. Returns the raw wait status.
pub(crate) fn wait_child(pid: libc::pid_t) -> io::Result<libc::c_int> {
    let mut status: libc::c_int = 0;

    loop {
        // SAFETY: status is valid for a c_int write
        if unsafe { libc::waitpid(pid, &mut status, 0) } == pid {
            return Ok(status);
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Blocks `SIGPIPE` for the calling thread while alive.
///
/// On drop, a `SIGPIPE` raised while blocked is consumed (so it cannot kill the
/// process once unblocked) and the previous mask is restored.
pub(crate) struct SigpipeBlock {
    previous: libc::sigset_t,
    pipe_set: libc::sigset_t,
    was_pending: bool,
}

impl SigpipeBlock {
    pub(crate) fn new() -> Self {
        // SAFETY: sigset_t is a plain C struct, zeroed is a valid starting value
        // for sigemptyset/pthread_sigmask to fill in
        let mut pipe_set: libc::sigset_t = unsafe { core::mem::zeroed() };
        let mut previous: libc::sigset_t = unsafe { core::mem::zeroed() };

        // SAFETY: all pointers refer to the locals above
        unsafe {
            libc::sigemptyset(&mut pipe_set);
            libc::sigaddset(&mut pipe_set, libc::SIGPIPE);
            libc::pthread_sigmask(libc::SIG_BLOCK, &pipe_set, &mut previous);
        }

        let was_pending = sigpipe_pending();

        Self {
            previous,
            pipe_set,
            was_pending,
        }
    }
}

impl Drop for SigpipeBlock {
    fn drop(&mut self) {
        if !self.was_pending && sigpipe_pending() {
            let mut signal: libc::c_int = 0;
            // SAFETY: SIGPIPE is pending and blocked, so sigwait returns at once
            unsafe { libc::sigwait(&self.pipe_set, &mut signal) };
        }

        // SAFETY: previous was filled in by pthread_sigmask in new()
        unsafe { libc::pthread_sigmask(libc::SIG_SETMASK, &self.previous, core::ptr::null_mut()) };
    }
}

fn sigpipe_pending() -> bool {
    // SAFETY: zeroed sigset_t is filled in by sigpending
    let mut pending: libc::sigset_t = unsafe { core::mem::zeroed() };

    // SAFETY: pending is a valid sigset_t
    unsafe {
        libc::sigpending(&mut pending) == 0 && libc::sigismember(&pending, libc::SIGPIPE) == 1
    }
}

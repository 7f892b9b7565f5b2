// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # passphrase_meter
//!
//! Live passphrase-strength feedback through an external meter program.
//!
//! When a *new* passphrase is read, the editor can feed every intermediate
//! state of the buffer to a meter (by default `passcheck`, overridable through
//! `LIBPASSPHRASE_METER`). The meter runs as a child process invoked as
//! `<program> -r`; each snapshot is written to its stdin followed by a newline.
//!
//! ## Lifecycle
//!
//! ```text
//! Unconfigured --start(NEW_PASSPHRASE)--> Starting --handshake EOF--> Active
//!                                            |                          |
//!                                            +--child failure--+        +--stop / write error
//!                                                              v        v
//!                                                              Stopped <-
//! ```
//!
//! The meter is strictly best effort. Every failure (no program, exec error,
//! broken pipe, full pipe) is logged with `tracing` and disables the meter;
//! none of them reaches the caller.
//!
//! ## Example
//!
//! ```rust
//! use passphrase_meter::{MeterSession, MeterState, ReadFlags};
//!
//! let mut meter = MeterSession::new();
//! meter.start(ReadFlags::EXISTING_PASSPHRASE, None, None);
//!
//! // Existing passphrases are never metered
//! assert_eq!(meter.state(), MeterState::Unconfigured);
//! assert_eq!(meter.child_pid(), None);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod flags;
mod session;
mod sys;

pub use flags::ReadFlags;
pub use session::{DEFAULT_METER_PROGRAM, METER_ENV_VAR, MeterSession, MeterState};

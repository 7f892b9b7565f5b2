// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Interactive passphrase entry for terminal programs.
//!
//! `passphrase` reads a secret from a terminal descriptor with a small line
//! editor: masked feedback, cursor movement, insert and overwrite, and an
//! optional live strength meter. Every byte the user typed lives in memory
//! that is wiped as soon as it is shrunk, reallocated or released.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use passphrase::{RawModeGuard, ReadFlags, read_passphrase};
//!
//! let fd = libc::STDIN_FILENO;
//!
//! let secret = {
//!     let _raw = RawModeGuard::new(fd).expect("stdin is not a terminal");
//!     eprint!("Passphrase: ");
//!     read_passphrase(fd, ReadFlags::EXISTING_PASSPHRASE)
//! }; // terminal restored here
//!
//! if let Some(secret) = secret {
//!     // use secret.as_bytes() ...
//! } // secret is wiped on drop
//! ```
//!
//! # Configuring the editor
//!
//! ```rust
//! use passphrase::keys::IoSource;
//! use passphrase::{EditorConfig, InsertPolicy, LineEditor, ReadFlags, RenderPolicy};
//!
//! let config = EditorConfig {
//!     policy: RenderPolicy::TextIndicator,
//!     insert_policy: InsertPolicy::Insert,
//!     ..EditorConfig::default()
//! };
//! let editor = LineEditor::new(config)?;
//!
//! let mut input = IoSource::new(&b"hunter2\n"[..]);
//! let mut feedback = Vec::new();
//!
//! let secret = editor.read(&mut input, &mut feedback, ReadFlags::EXISTING_PASSPHRASE)?;
//! assert_eq!(secret.as_bytes(), b"hunter2");
//! # Ok::<(), passphrase::ReadError>(())
//! ```
//!
//! # Keys
//!
//! | Action            | Keys                         |
//! |-------------------|------------------------------|
//! | Accept            | Enter, end of input          |
//! | Erase             | Backspace                    |
//! | Delete            | Delete, Ctrl-D               |
//! | Left / Right      | arrows, Ctrl-B / Ctrl-F      |
//! | Home / End        | Home / End, Ctrl-A / Ctrl-E  |
//! | Insert/overwrite  | Insert                       |
//!
//! # Strength meter
//!
//! With [`ReadFlags::NEW_PASSPHRASE`], the program named by
//! `LIBPASSPHRASE_METER` (default `passcheck`) is started as `<program> -r`
//! and receives every intermediate state of the passphrase on stdin, one per
//! line. It may draw on the terminal only if [`ReadFlags::SCREEN_FREE`] or
//! [`ReadFlags::BELOW_LINE_FREE`] is given. A missing or failing meter never
//! affects the read.
//!
//! # Crates
//!
//! - [`zero`]: guaranteed wiping
//! - [`buffer`]: the passphrase buffer and [`SecretBuffer`]
//! - [`keys`]: key decoding and byte sources
//! - [`display`]: feedback rendering
//! - [`meter`]: the strength-meter session
//! - [`tty`]: raw mode
//! - [`guard`]: process hardening
//!
//! # License
//!
//! GPL-3.0-only

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod code_point;
mod config;
mod editor;
mod error;
mod read;

pub use passphrase_buffer as buffer;
pub use passphrase_display as display;
pub use passphrase_guard as guard;
pub use passphrase_keys as keys;
pub use passphrase_meter as meter;
pub use passphrase_tty as tty;
pub use passphrase_zero as zero;

pub use config::{EditorConfig, InsertPolicy};
pub use editor::LineEditor;
pub use error::{ConfigError, ReadError};
pub use read::{read_passphrase, read_passphrase_with};

pub use passphrase_buffer::SecretBuffer;
pub use passphrase_display::RenderPolicy;
pub use passphrase_meter::ReadFlags;
pub use passphrase_tty::{RawModeGuard, TtyContext, TtyError, enable_raw_mode, restore_mode};
pub use passphrase_zero::wipe;

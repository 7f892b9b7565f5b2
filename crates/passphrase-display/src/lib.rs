// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # passphrase_display
//!
//! Visual feedback for a passphrase being typed.
//!
//! The editor reports every change it makes as an [`EditEvent`];
//! [`DisplayRenderer`] turns it into terminal control sequences according to
//! the active [`RenderPolicy`] and writes them to the feedback stream.
//!
//! ## Policies
//!
//! - [`RenderPolicy::Silent`]: nothing is shown
//! - [`RenderPolicy::Starred`]: one mask glyph per code point
//! - [`RenderPolicy::TextIndicator`]: a fixed `(empty)` / `(not empty)` banner
//! - [`RenderPolicy::Echo`]: the passphrase itself, with cursor movement
//!
//! ## Example
//!
//! ```rust
//! use passphrase_display::{DisplayRenderer, EditEvent, RenderPolicy};
//!
//! let mut renderer = DisplayRenderer::new(Vec::new(), RenderPolicy::Starred);
//!
//! renderer.render(&EditEvent::Append("é".as_bytes()), false);
//! renderer.render(&EditEvent::Left, false);
//!
//! assert_eq!(renderer.get_ref().as_slice(), b"*\x1b[D");
//! ```
//!
//! Feedback write errors never interrupt the read: they are logged with
//! `tracing` at `debug` and dropped.

#![warn(missing_docs)]

#[cfg(test)]
mod tests;

mod error;
mod event;
mod policy;
mod renderer;

pub use error::PolicyError;
pub use event::EditEvent;
pub use policy::RenderPolicy;
pub use renderer::{DEFAULT_EMPTY_TEXT, DEFAULT_MASK_GLYPH, DEFAULT_NOT_EMPTY_TEXT, DisplayRenderer};

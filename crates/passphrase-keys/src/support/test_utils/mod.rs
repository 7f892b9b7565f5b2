// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test doubles for [`ByteSource`](crate::ByteSource).

mod mock_byte_source;

pub use mock_byte_source::{MockByteSource, MockByteSourceBehaviour};

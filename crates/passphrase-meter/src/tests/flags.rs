// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::ReadFlags;

#[test]
fn test_flag_values() {
    assert_eq!(ReadFlags::EXISTING_PASSPHRASE.bits(), 0);
    assert_eq!(ReadFlags::NEW_PASSPHRASE.bits(), 1);
    assert_eq!(ReadFlags::SCREEN_FREE.bits(), 2);
    assert_eq!(ReadFlags::BELOW_LINE_FREE.bits(), 4);
    assert_eq!(ReadFlags::default(), ReadFlags::EXISTING_PASSPHRASE);
}

#[test]
fn test_unknown_bits_are_dropped() {
    let flags = ReadFlags::from_bits_truncate(0xF0 | 1);

    assert_eq!(flags, ReadFlags::NEW_PASSPHRASE);
}

#[test]
fn test_meter_may_draw() {
    assert!(!ReadFlags::NEW_PASSPHRASE.meter_may_draw());
    assert!((ReadFlags::NEW_PASSPHRASE | ReadFlags::SCREEN_FREE).meter_may_draw());
    assert!(ReadFlags::BELOW_LINE_FREE.meter_may_draw());
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use passphrase_display::PolicyError;

use crate::{ConfigError, EditorConfig, InsertPolicy, LineEditor, RenderPolicy};

#[test]
fn test_default_config() {
    let config = EditorConfig::default();

    assert_eq!(config.policy, RenderPolicy::Starred);
    assert!(config.movement);
    assert!(config.dedicated_keys);
    assert!(config.control_aliases);
    assert_eq!(
        config.insert_policy,
        InsertPolicy::Toggle {
            start_in_insert: true
        }
    );
    assert_eq!(config.meter_program, None);
    assert_eq!(config.meter_output_fd, Some(libc::STDERR_FILENO));
    assert!(config.newline_on_finish);
    assert!(!config.harden_process);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_echo_requires_movement() {
    let config = EditorConfig {
        policy: RenderPolicy::Echo,
        movement: false,
        ..EditorConfig::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::EchoRequiresMovement));
    assert!(matches!(LineEditor::new(config), Err(ConfigError::EchoRequiresMovement)));
}

#[test]
fn test_starred_without_movement_is_valid() {
    let config = EditorConfig {
        movement: false,
        ..EditorConfig::default()
    };

    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_from_switches() {
    let config =
        EditorConfig::from_switches(false, true, false).expect("Failed to from_switches(..)");
    assert_eq!(config.policy, RenderPolicy::TextIndicator);

    assert_eq!(
        EditorConfig::from_switches(true, false, true),
        Err(ConfigError::Policy(PolicyError::Conflicting))
    );
}

#[test]
fn test_insert_policy() {
    assert!(InsertPolicy::Insert.starts_in_insert());
    assert!(!InsertPolicy::Insert.can_toggle());
    assert!(!InsertPolicy::Overwrite.starts_in_insert());
    assert!(!InsertPolicy::Overwrite.can_toggle());

    let toggle = InsertPolicy::Toggle {
        start_in_insert: false,
    };
    assert!(!toggle.starts_in_insert());
    assert!(toggle.can_toggle());
}

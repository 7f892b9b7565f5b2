// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::Write;

#[cfg(any(test, feature = "test-utils"))]
use passphrase_buffer::BufferBehaviour;
use passphrase_buffer::{PassphraseBuffer, SecretBuffer};
use passphrase_display::{DisplayRenderer, EditEvent};
use passphrase_keys::{ByteSource, Key, KeyDecoder};
use passphrase_meter::{MeterSession, ReadFlags};

use crate::code_point::Lookahead;
use crate::config::EditorConfig;
use crate::error::{ConfigError, ReadError};

/// Reads one passphrase at a time according to an [`EditorConfig`].
///
/// # Read loop
///
/// Bytes are read one at a time until `\n` or end of input:
/// 1. NUL bytes are skipped
/// 2. The byte is decoded into a [`Key`], pulling escape sequences as needed
/// 3. Character keys are completed into a full UTF-8 code point and appended,
///    inserted or overwritten depending on the cursor and insert mode
/// 4. Every content change is rendered and forwarded to the strength meter
///
/// An allocation failure or an input error aborts the read: the partial
/// passphrase is wiped and no buffer is returned. The meter is stopped on
/// every path.
#[derive(Debug)]
pub struct LineEditor {
    config: EditorConfig,
    decoder: KeyDecoder,
    #[cfg(any(test, feature = "test-utils"))]
    buffer_behaviour: BufferBehaviour,
}

impl LineEditor {
    /// Validates `config` and builds an editor.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let decoder = KeyDecoder::new(config.dedicated_keys, config.control_aliases);

        Ok(Self {
            config,
            decoder,
            #[cfg(any(test, feature = "test-utils"))]
            buffer_behaviour: BufferBehaviour::None,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Failure injection applied to the buffer of every subsequent read.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn change_buffer_behaviour(&mut self, behaviour: BufferBehaviour) {
        self.buffer_behaviour = behaviour;
    }

    /// Reads a passphrase from `source`, drawing feedback on `feedback`.
    ///
    /// # Errors
    ///
    /// [`ReadError::Buffer`] if the buffer cannot grow, [`ReadError::Input`]
    /// if `source` fails. The partial input is wiped in both cases.
    pub fn read<W: Write>(
        &self,
        source: &mut dyn ByteSource,
        feedback: W,
        flags: ReadFlags,
    ) -> Result<SecretBuffer, ReadError> {
        if self.config.harden_process {
            passphrase_guard::harden_process();
        }

        let mut buffer = PassphraseBuffer::new()?;
        buffer.set_insert_mode(self.config.insert_policy.starts_in_insert());
        #[cfg(any(test, feature = "test-utils"))]
        buffer.change_behaviour(self.buffer_behaviour);

        let mut renderer = DisplayRenderer::new(feedback, self.config.policy)
            .with_movement(self.config.movement)
            .with_mask_glyph(self.config.mask_glyph)
            .with_indicator_texts(&self.config.empty_text, &self.config.not_empty_text)
            .with_newline_on_finish(self.config.newline_on_finish);

        let mut meter = MeterSession::new();
        meter.start(
            flags,
            self.config.meter_program.as_deref(),
            self.config.meter_output_fd,
        );

        renderer.render(&EditEvent::Start, true);

        let outcome = self.run(source, &mut buffer, &mut renderer, &mut meter);
        meter.stop();

        match outcome {
            Ok(()) => {
                renderer.render(&EditEvent::Finish, buffer.is_empty());
                tracing::debug!("passphrase read finished");

                Ok(buffer.into_secret()?)
            }
            Err(err) => {
                buffer.discard();
                tracing::warn!(error = %err, "passphrase read aborted");

                Err(err)
            }
        }
    }

    fn run<W: Write>(
        &self,
        source: &mut dyn ByteSource,
        buffer: &mut PassphraseBuffer,
        renderer: &mut DisplayRenderer<W>,
        meter: &mut MeterSession,
    ) -> Result<(), ReadError> {
        let mut input = Lookahead::new(source);

        loop {
            let byte = match input.read_byte().map_err(ReadError::Input)? {
                None | Some(b'\n') => return Ok(()),
                Some(0) => continue,
                Some(byte) => byte,
            };

            let key = self
                .decoder
                .decode(byte, &mut input)
                .map_err(ReadError::Input)?;

            if self.apply(key, &mut input, buffer, renderer)? {
                meter.update(buffer.as_bytes());
            }
        }
    }

    /// Applies `key`. Returns `true` when the buffer contents changed.
    fn apply<W: Write>(
        &self,
        key: Key,
        input: &mut Lookahead<'_>,
        buffer: &mut PassphraseBuffer,
        renderer: &mut DisplayRenderer<W>,
    ) -> Result<bool, ReadError> {
        let movement = self.config.movement;

        match key {
            Key::Char(lead) => {
                let Some(code_point) = input.read_code_point(lead).map_err(ReadError::Input)? else {
                    return Ok(false);
                };
                let bytes = code_point.as_bytes();

                let event = if buffer.cursor_at_end() {
                    for &b in bytes {
                        buffer.append(b)?;
                    }
                    EditEvent::Append(bytes)
                } else if buffer.insert_mode() {
                    for &b in bytes {
                        buffer.insert(b)?;
                    }
                    EditEvent::Insert(bytes)
                } else {
                    buffer.overwrite(bytes)?;
                    EditEvent::Overwrite(bytes)
                };

                renderer.render(&event, buffer.is_empty());
                Ok(true)
            }
            Key::Erase => {
                let erased = buffer.erase_before_cursor();
                if erased {
                    renderer.render(&EditEvent::Erase, buffer.is_empty());
                }
                Ok(erased)
            }
            Key::Delete if movement => {
                let deleted = buffer.delete_at_cursor();
                if deleted {
                    renderer.render(&EditEvent::Delete, buffer.is_empty());
                }
                Ok(deleted)
            }
            Key::ToggleInsert if movement && self.config.insert_policy.can_toggle() => {
                buffer.toggle_insert();
                Ok(false)
            }
            Key::Left if movement => {
                if buffer.move_left() {
                    renderer.render(&EditEvent::Left, buffer.is_empty());
                }
                Ok(false)
            }
            Key::Right if movement => {
                if buffer.move_right() {
                    renderer.render(&EditEvent::Right, buffer.is_empty());
                }
                Ok(false)
            }
            Key::Home if movement => {
                let distance = buffer.code_points_before_cursor();
                if buffer.move_home() {
                    renderer.render(&EditEvent::Home(distance), buffer.is_empty());
                }
                Ok(false)
            }
            Key::End if movement => {
                let distance = buffer.code_points_after_cursor();
                if buffer.move_end() {
                    renderer.render(&EditEvent::End(distance), buffer.is_empty());
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

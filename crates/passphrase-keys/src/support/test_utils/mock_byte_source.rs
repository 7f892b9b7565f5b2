// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::VecDeque;
use std::io;

use crate::source::ByteSource;

/// Configurable behavior for [`MockByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockByteSourceBehaviour {
    /// Serve the scripted bytes, then end of input.
    None,
    /// Fail the Nth read (1-indexed) with `ErrorKind::BrokenPipe`.
    FailAtNthRead(usize),
    /// The Nth read (1-indexed) is interrupted once before it succeeds.
    ///
    /// Interruptions are retried inside [`read_byte`](ByteSource::read_byte),
    /// the way a real source retries `EINTR`; [`interruptions`](MockByteSource::interruptions)
    /// counts them.
    InterruptAtNthRead(usize),
}

/// Scripted [`ByteSource`] for testing.
#[derive(Debug)]
pub struct MockByteSource {
    bytes: VecDeque<u8>,
    behaviour: MockByteSourceBehaviour,
    read_count: usize,
    interruptions: usize,
}

impl MockByteSource {
    /// Creates a source that serves `bytes` in order.
    pub fn new(bytes: &[u8], behaviour: MockByteSourceBehaviour) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            behaviour,
            read_count: 0,
            interruptions: 0,
        }
    }

    /// Changes the mock behavior at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockByteSourceBehaviour) {
        self.behaviour = behaviour;
    }

    /// Number of `read_byte` calls so far.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Number of simulated interruptions that were retried.
    pub fn interruptions(&self) -> usize {
        self.interruptions
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn raw_read(&mut self, interrupted: bool) -> io::Result<Option<u8>> {
        if interrupted {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }

        Ok(self.bytes.pop_front())
    }
}

impl ByteSource for MockByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.read_count += 1;
        let nth = self.read_count;

        match self.behaviour {
            MockByteSourceBehaviour::FailAtNthRead(n) if n == nth => {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
            MockByteSourceBehaviour::InterruptAtNthRead(n) if n == nth => {
                let mut interrupted = true;
                loop {
                    match self.raw_read(interrupted) {
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                            self.interruptions += 1;
                            interrupted = false;
                        }
                        other => return other,
                    }
                }
            }
            _ => self.raw_read(false),
        }
    }
}

// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Reads a passphrase from the controlling terminal and prints it back.
//!
//! Logging goes to stderr and is filtered through `RUST_LOG` (default `warn`).


use std::fs::OpenOptions;
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use passphrase::{EditorConfig, InsertPolicy, RawModeGuard, ReadFlags, read_passphrase_with};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InsertMode {
    /// Insert key flips between insert and overwrite, starting in insert
    Toggle,
    /// Always insert
    Insert,
    /// Always overwrite
    Overwrite,
}

#[derive(Debug, Parser)]
#[command(name = "passphrase-demo")]
#[command(about = "Read a passphrase from the terminal and print it back")]
#[command(version)]
struct Cli {
    /// Terminal to read from
    #[arg(long, default_value = "/dev/tty")]
    tty: PathBuf,

    /// Show one `*` per character (the default)
    #[arg(long)]
    star: bool,

    /// Show only whether something has been typed
    #[arg(long)]
    text: bool,

    /// Show the passphrase while typing
    #[arg(long)]
    echo: bool,

    /// Show nothing while typing
    #[arg(long, conflicts_with_all = ["star", "text", "echo"])]
    silent: bool,

    /// Disable cursor movement and mid-line editing
    #[arg(long)]
    no_movement: bool,

    /// Insert / overwrite behaviour for mid-line typing
    #[arg(long, value_enum, default_value_t = InsertMode::Toggle)]
    insert_mode: InsertMode,

    /// Treat the input as a new passphrase and run the strength meter
    #[arg(long)]
    new: bool,

    /// Let the strength meter use the rest of the screen
    #[arg(long)]
    screen_free: bool,

    /// Let the strength meter draw on the line below the prompt
    #[arg(long)]
    below_line_free: bool,

    /// Strength meter program (overrides LIBPASSPHRASE_METER)
    #[arg(long)]
    meter: Option<PathBuf>,

    /// Disable core dumps and ptrace attach before reading
    #[arg(long)]
    harden: bool,
}

impl Cli {
    fn editor_config(&self) -> Result<EditorConfig> {
        let mut config = if self.star || self.text || self.echo || self.silent {
            EditorConfig::from_switches(self.star, self.text, self.echo)?
        } else {
            EditorConfig::default()
        };

        config.movement = !self.no_movement;
        config.insert_policy = match self.insert_mode {
            InsertMode::Toggle => InsertPolicy::Toggle {
                start_in_insert: true,
            },
            InsertMode::Insert => InsertPolicy::Insert,
            InsertMode::Overwrite => InsertPolicy::Overwrite,
        };
        config.meter_program = self.meter.as_ref().map(|path| path.clone().into_os_string());
        config.harden_process = self.harden;

        config.validate()?;

        Ok(config)
    }

    fn read_flags(&self) -> ReadFlags {
        let mut flags = ReadFlags::EXISTING_PASSPHRASE;
        flags.set(ReadFlags::NEW_PASSPHRASE, self.new);
        flags.set(ReadFlags::SCREEN_FREE, self.screen_free);
        flags.set(ReadFlags::BELOW_LINE_FREE, self.below_line_free);

        flags
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.editor_config()?;

    let tty = OpenOptions::new()
        .read(true)
        .open(&cli.tty)
        .with_context(|| format!("failed to open {}", cli.tty.display()))?;
    let fd = tty.as_raw_fd();
    tracing::debug!(tty = %cli.tty.display(), flags = ?cli.read_flags(), "reading passphrase");

    let secret = {
        let _raw = RawModeGuard::new(fd).context("failed to disable terminal echo")?;

        eprint!("Passphrase: ");
        io::stderr().flush()?;

        read_passphrase_with(&config, fd, cli.read_flags())
    };

    let Some(mut secret) = secret else {
        bail!("failed to read passphrase");
    };

    match secret.as_str() {
        Ok(text) => println!("You entered: {text}"),
        Err(_) => println!("You entered {} bytes of non-UTF-8 input", secret.len()),
    }

    secret.wipe();

    Ok(())
}

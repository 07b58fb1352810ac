// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::Result;
use clap::Parser;
use gpiocmd::{Command, ParseCommandError, Runner};
use std::path::PathBuf;
use std::time::Duration;

// common helper functions

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
}

pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let t = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let t = num
                .parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
            t * match units {
                "us" => 1000,
                "ms" => 1000000,
                "s" => 1000000000,
                _ => return Err(ParseDurationError::Units(s.into())),
            }
        }
        None => {
            s.parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(s.into(), e))?
                * 1000000
        }
    };
    Ok(Duration::from_nanos(t))
}

pub fn parse_read_command(s: &str) -> std::result::Result<Command, Error> {
    let c: Command = s.parse()?;
    if !c.is_read() {
        return Err(Error::NotARead(s.into()));
    }
    Ok(c)
}

pub fn parse_set_command(s: &str) -> std::result::Result<Command, Error> {
    let c: Command = s.parse()?;
    if c.is_read() {
        return Err(Error::NotASet(s.into()));
    }
    Ok(c)
}

// common command line parser options

/// Options controlling how commands are run.
///
/// These are global options, so they may be placed before or after the subcommand.
#[derive(Clone, Debug, Default, Parser)]
pub struct RunnerOpts {
    #[arg(from_global)]
    pub shell: PathBuf,

    #[arg(from_global)]
    pub label: String,

    #[arg(from_global)]
    pub quiet: bool,
}

impl RunnerOpts {
    pub fn runner(&self, emit: &EmitOpts) -> Result<Runner> {
        #[cfg(feature = "json")]
        let echo = !self.quiet && !emit.json;
        #[cfg(not(feature = "json"))]
        let echo = {
            let _ = emit;
            !self.quiet
        };
        Ok(Runner::builder()
            .with_shell(&self.shell)
            .with_label(&self.label)
            .with_echo(echo)
            .build()?)
    }
}

#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct EmitOpts {
    #[arg(from_global)]
    pub verbose: bool,

    /// Emit output in JSON format
    ///
    /// The echo of the raw tool output is suppressed.
    #[cfg(feature = "json")]
    #[arg(long)]
    pub json: bool,
}

pub fn emit_error(opts: &EmitOpts, e: &anyhow::Error) {
    let e_str = format_error(opts, e);
    #[cfg(feature = "json")]
    if opts.json {
        println!("{}", serde_json::json!({ "error": e_str }));
        return;
    }
    eprintln!("{e_str}");
}

pub fn format_error(opts: &EmitOpts, e: &anyhow::Error) -> String {
    if opts.verbose {
        format!("{e:#}")
    } else {
        format!("{e}")
    }
}

/// Errors returned by cli functions.
#[derive(Clone, Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    UnknownCommand(#[from] ParseCommandError),

    #[error("'{0}' drives a line - use the set command")]
    NotARead(String),

    #[error("'{0}' reads a line - use the get command")]
    NotASet(String),

    #[error("'{0}' produced no output")]
    NoReading(String),
}

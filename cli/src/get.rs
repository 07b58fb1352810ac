// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, format_error, EmitOpts, RunnerOpts};
use anyhow::anyhow;
use clap::Parser;
use gpiocmd::{Command, Reading, Runner};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("g"))]
pub struct Opts {
    /// The read command to run
    #[arg(
        value_name = "command",
        default_value = "read-button14",
        value_parser = common::parse_read_command
    )]
    command: Command,

    /// Treat a command that produces no output as a failure
    ///
    /// If not specified then no output is reported as '0', the same as
    /// an inactive line.
    #[arg(short, long)]
    pub strict: bool,

    #[command(flatten)]
    runner_opts: RunnerOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let res = match opts.runner_opts.runner(&opts.emit) {
        Ok(runner) => read(&runner, opts.command.invocation(), opts.strict, &opts.emit),
        Err(e) => CmdResult::from_error(opts.command.invocation(), &opts.emit, &e),
    };
    res.emit(&opts.emit);
    res.errors.is_empty()
}

// Shared with exec, which runs arbitrary command strings.
pub fn read(runner: &Runner, command: &str, strict: bool, emit: &EmitOpts) -> CmdResult {
    let mut res = CmdResult {
        command: command.into(),
        ..Default::default()
    };
    match runner.read_state(command) {
        Ok(Reading::NoReading) if strict => {
            res.push_error(emit, &anyhow!(common::Error::NoReading(command.into())));
        }
        Ok(reading) => res.reading = Some(reading),
        Err(e) => res.push_error(emit, &anyhow!(e)),
    }
    res
}

#[derive(Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CmdResult {
    command: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    reading: Option<Reading>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    errors: Vec<String>,
}

impl CmdResult {
    pub fn from_error(command: &str, opts: &EmitOpts, e: &anyhow::Error) -> Self {
        let mut res = CmdResult {
            command: command.into(),
            ..Default::default()
        };
        res.push_error(opts, e);
        res
    }

    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    #[cfg_attr(not(feature = "json"), allow(unused_variables))]
    pub fn emit(&self, opts: &EmitOpts) {
        #[cfg(feature = "json")]
        if opts.json {
            match serde_json::to_string(self) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("{e}"),
            }
            return;
        }
        self.print();
    }

    fn push_error(&mut self, opts: &EmitOpts, e: &anyhow::Error) {
        self.errors.push(format_error(opts, e))
    }

    fn print(&self) {
        if let Some(reading) = self.reading {
            println!("{}", reading.value());
        }
        for e in &self.errors {
            eprintln!("{}", e);
        }
    }
}

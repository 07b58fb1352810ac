// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error, EmitOpts, RunnerOpts};
use anyhow::Result;
use clap::Parser;
use gpiocmd::Command;
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("s"))]
pub struct Opts {
    /// The set commands to run, in order
    ///
    /// e.g.
    ///     set-pin17-high set-pin11-low
    #[arg(
        value_name = "command",
        required = true,
        value_parser = common::parse_set_command,
        verbatim_doc_comment
    )]
    commands: Vec<Command>,

    /// The time period to wait between commands
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = common::parse_duration)]
    hold_period: Option<Duration>,

    #[command(flatten)]
    runner_opts: RunnerOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    match do_cmd(opts) {
        Ok(()) => true,
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn do_cmd(opts: &Opts) -> Result<()> {
    let runner = opts.runner_opts.runner(&opts.emit)?;
    for (idx, c) in opts.commands.iter().enumerate() {
        if idx > 0 {
            if let Some(period) = opts.hold_period {
                thread::sleep(period);
            }
        }
        tracing::debug!(command = c.name(), "driving");
        runner.drive(*c)?;
    }
    Ok(())
}

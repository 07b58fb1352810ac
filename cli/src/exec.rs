// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{EmitOpts, RunnerOpts};
use super::get::{self, CmdResult};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(alias("x"))]
pub struct Opts {
    /// The command line to run
    ///
    /// The command is passed to the shell as is, and its first line of output
    /// is read as the line state, e.g.
    ///     "gpioget -B pull-up /dev/gpiochip4 14"
    #[arg(value_name = "command", verbatim_doc_comment)]
    command: String,

    /// Treat a command that produces no output as a failure
    #[arg(short, long)]
    pub strict: bool,

    #[command(flatten)]
    runner_opts: RunnerOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let res = match opts.runner_opts.runner(&opts.emit) {
        Ok(runner) => get::read(&runner, &opts.command, opts.strict, &opts.emit),
        Err(e) => CmdResult::from_error(&opts.command, &opts.emit, &e),
    };
    res.emit(&opts.emit);
    res.succeeded()
}

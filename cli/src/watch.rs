// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, EmitOpts, RunnerOpts};
use super::get::{self, CmdResult};
use clap::Parser;
use gpiocmd::Command;
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("w"))]
pub struct Opts {
    /// The read command to poll
    #[arg(
        value_name = "command",
        default_value = "read-button14",
        value_parser = common::parse_read_command
    )]
    command: Command,

    /// The time period between reads
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(
        short = 'p',
        long,
        value_name = "period",
        default_value = "100ms",
        value_parser = common::parse_duration
    )]
    poll_period: Duration,

    /// Exit after the specified number of reads
    ///
    /// If not specified then reading continues indefinitely.
    #[arg(short = 'n', long, value_name = "num")]
    num_reads: Option<u32>,

    /// Treat a command that produces no output as a failure
    #[arg(short, long)]
    pub strict: bool,

    #[command(flatten)]
    runner_opts: RunnerOpts,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let command = opts.command.invocation();
    let runner = match opts.runner_opts.runner(&opts.emit) {
        Ok(runner) => runner,
        Err(e) => {
            CmdResult::from_error(command, &opts.emit, &e).emit(&opts.emit);
            return false;
        }
    };
    let mut count = 0;
    loop {
        let res = get::read(&runner, command, opts.strict, &opts.emit);
        res.emit(&opts.emit);
        if !res.succeeded() {
            return false;
        }
        if reads_done(opts.num_reads, &mut count) {
            return true;
        }
        thread::sleep(opts.poll_period);
    }
}

// Only counted when a limit is set, so an unbounded watch cannot overflow.
fn reads_done(num_reads: Option<u32>, count: &mut u32) -> bool {
    match num_reads {
        Some(n) => {
            *count += 1;
            *count >= n
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::reads_done;

    #[test]
    fn limited() {
        let mut count = 0;
        assert!(!reads_done(Some(3), &mut count));
        assert!(!reads_done(Some(3), &mut count));
        assert!(reads_done(Some(3), &mut count));
        assert_eq!(count, 3);
    }

    #[test]
    fn unlimited() {
        let mut count = u32::MAX;
        for _ in 0..10 {
            assert!(!reads_done(None, &mut count));
        }
        assert_eq!(count, u32::MAX);
    }
}

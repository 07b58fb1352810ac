// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for reading and driving GPIO lines via the gpioget
//! and gpioset tools.

use clap::Parser;
use gpiocmd::runner::{DEFAULT_LABEL, DEFAULT_SHELL};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod common;
mod exec;
mod get;
mod list;
mod set;
mod watch;

fn main() -> ExitCode {
    let opt = match Opts::try_parse() {
        Ok(opt) => opt,
        Err(e) => e.exit(),
    };
    init_logging(opt.verbose);
    let res = match opt.cmd {
        Command::Exec(cfg) => exec::cmd(&cfg),
        Command::Get(cfg) => get::cmd(&cfg),
        Command::List(cfg) => list::cmd(&cfg),
        Command::Set(cfg) => set::cmd(&cfg),
        Command::Watch(cfg) => watch::cmd(&cfg),
    };
    if res {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Parser)]
#[command(
    name = "gpiocmd",
    about = "A utility to read and drive GPIO lines using the gpioget and gpioset tools.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Provide more detailed error messages and debug logging.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    pub verbose: bool,

    /// The shell used to run commands.
    #[arg(
        long,
        global = true,
        value_name = "path",
        env = "GPIOCMD_SHELL",
        default_value = DEFAULT_SHELL,
        display_order = 810
    )]
    pub shell: PathBuf,

    /// The label prefixed to the echoed tool output.
    #[arg(
        long,
        global = true,
        value_name = "text",
        env = "GPIOCMD_LABEL",
        default_value = DEFAULT_LABEL,
        display_order = 811
    )]
    pub label: String,

    /// Do not echo the tool output.
    #[arg(short = 'q', long, global = true, display_order = 812)]
    pub quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Run an arbitrary command line and read the state it reports.
    Exec(exec::Opts),

    /// Read the level of a GPIO line.
    Get(get::Opts),

    /// List the predefined commands.
    List(list::Opts),

    /// Set the levels of GPIO lines.
    Set(set::Opts),

    /// Poll the level of a GPIO line.
    Watch(watch::Opts),
}

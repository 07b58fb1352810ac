// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::EmitOpts;
use clap::Parser;
use gpiocmd::{Command, Offset};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("l"))]
pub struct Opts {
    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(opts: &Opts) -> bool {
    let entries: Vec<Entry> = Command::ALL.iter().map(Entry::from).collect();
    #[cfg(feature = "json")]
    if opts.emit.json {
        return match serde_json::to_string(&entries) {
            Ok(s) => {
                println!("{s}");
                true
            }
            Err(e) => {
                eprintln!("{e}");
                false
            }
        };
    }
    #[cfg(not(feature = "json"))]
    let _ = opts;
    for e in &entries {
        println!("{}\t{}", e.name, e.invocation);
    }
    true
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(not(feature = "serde"), allow(dead_code))]
struct Entry {
    name: &'static str,
    invocation: &'static str,
    line: Offset,
    read: bool,
}

impl From<&Command> for Entry {
    fn from(c: &Command) -> Self {
        Entry {
            name: c.name(),
            invocation: c.invocation(),
            line: c.line(),
            read: c.is_read(),
        }
    }
}

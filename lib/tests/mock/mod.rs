// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use gpiocmd::Runner;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

// Fake shells that ignore the tool and report a fixed level followed by
// the command they were asked to run.
pub struct Shells {
    _dir: TempDir,
    pub active: PathBuf,
    pub inactive: PathBuf,
}

// All tests must call this before spawning anything, so no child can
// inherit a script while it is still open for writing.
pub fn shells() -> &'static Shells {
    static SHELLS: OnceLock<Shells> = OnceLock::new();
    SHELLS.get_or_init(|| {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let active = write_shell(dir.path(), "active", "1");
        let inactive = write_shell(dir.path(), "inactive", "0");
        Shells {
            _dir: dir,
            active,
            inactive,
        }
    })
}

fn write_shell(dir: &Path, name: &str, level: &str) -> PathBuf {
    let p = dir.join(name);
    // invoked as `<shell> -c <command>`
    fs::write(&p, format!("#!/bin/sh\nprintf '{level} %s\\n' \"$2\"\n"))
        .expect("shell should be written");
    fs::set_permissions(&p, fs::Permissions::from_mode(0o755))
        .expect("shell should be executable");
    p
}

pub fn runner_with_shell(shell: &Path) -> Runner {
    Runner::builder()
        .with_shell(shell)
        .build()
        .expect("runner should be valid")
}

// Run a command with the system shell, returning the reading and the echo.
pub fn run(command: &str) -> (gpiocmd::Result<gpiocmd::Reading>, String) {
    shells();
    let mut sink = Vec::new();
    let res = Runner::default().read_state_into(command, &mut sink);
    (res, String::from_utf8(sink).expect("echo should be utf8"))
}

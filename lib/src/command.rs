// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Offset;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The GPIO chip device the catalog commands operate on.
pub const CHIP_PATH: &str = "/dev/gpiochip4";

/// The predefined GPIO commands.
///
/// Each command maps to the literal `gpioget` or `gpioset` invocation that
/// performs it on [`CHIP_PATH`].
///
/// | Command | Invocation |
/// |---------|------------|
/// | `ReadButton14` | `gpioget -B pull-up /dev/gpiochip4 14` |
/// | `SetPin17High` | `gpioset gpiochip4 17=1` |
/// | `SetPin17Low`  | `gpioset gpiochip4 17=0` |
/// | `SetPin11High` | `gpioset gpiochip4 11=1` |
/// | `SetPin11Low`  | `gpioset gpiochip4 11=0` |
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Command {
    /// Read the pulled-up button on line 14.
    ReadButton14,
    /// Drive line 17 high.
    SetPin17High,
    /// Drive line 17 low.
    SetPin17Low,
    /// Drive line 11 high.
    SetPin11High,
    /// Drive line 11 low.
    SetPin11Low,
}

impl Command {
    /// All commands in the catalog, in declaration order.
    pub const ALL: [Command; 5] = [
        Command::ReadButton14,
        Command::SetPin17High,
        Command::SetPin17Low,
        Command::SetPin11High,
        Command::SetPin11Low,
    ];

    /// The literal command line executed for the command.
    pub fn invocation(&self) -> &'static str {
        match self {
            Command::ReadButton14 => "gpioget -B pull-up /dev/gpiochip4 14",
            Command::SetPin17High => "gpioset gpiochip4 17=1",
            Command::SetPin17Low => "gpioset gpiochip4 17=0",
            Command::SetPin11High => "gpioset gpiochip4 11=1",
            Command::SetPin11Low => "gpioset gpiochip4 11=0",
        }
    }

    /// The stable name of the command, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Command::ReadButton14 => "read-button14",
            Command::SetPin17High => "set-pin17-high",
            Command::SetPin17Low => "set-pin17-low",
            Command::SetPin11High => "set-pin11-high",
            Command::SetPin11Low => "set-pin11-low",
        }
    }

    /// The offset of the line the command operates on.
    pub fn line(&self) -> Offset {
        match self {
            Command::ReadButton14 => 14,
            Command::SetPin17High | Command::SetPin17Low => 17,
            Command::SetPin11High | Command::SetPin11Low => 11,
        }
    }

    /// Returns true if the command reads a line rather than driving it.
    pub fn is_read(&self) -> bool {
        matches!(self, Command::ReadButton14)
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        self.invocation()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.invocation())
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Command::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| ParseCommandError::Unknown(s.into()))
    }
}

/// Errors returned when parsing a [`Command`] name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("'{0}' is not a known command")]
    Unknown(String),
}

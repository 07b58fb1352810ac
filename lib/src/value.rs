// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// The logical level of a line, as reported by the tool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Value {
    /// The line is inactive.
    #[default]
    Inactive,
    /// The line is active.
    Active,
}

impl Value {
    /// Interpret a line of tool output.
    ///
    /// The line is active only if its first character is an ASCII `'1'`.
    /// Anything else, including an empty line, is inactive.
    pub fn from_line(line: &[u8]) -> Value {
        (line.first() == Some(&b'1')).into()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v: u8 = (*self).into();
        write!(f, "{}", v)
    }
}

impl From<Value> for bool {
    fn from(l: Value) -> bool {
        match l {
            Value::Inactive => false,
            Value::Active => true,
        }
    }
}
impl From<Value> for u8 {
    fn from(l: Value) -> u8 {
        match l {
            Value::Inactive => 0,
            Value::Active => 1,
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        match b {
            false => Value::Inactive,
            true => Value::Active,
        }
    }
}
impl From<u8> for Value {
    fn from(i: u8) -> Value {
        match i {
            0 => Value::Inactive,
            _ => Value::Active,
        }
    }
}

/// The outcome of reading a command's output.
///
/// A command that closes its output without producing a line yields
/// [`NoReading`], which callers that cannot tell a low line from a failed
/// read may collapse using [`value`].
///
/// [`NoReading`]: Reading::NoReading
/// [`value`]: Reading::value
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Reading {
    /// A line was read and interpreted.
    Level(Value),
    /// The command produced no output line.
    NoReading,
}

impl Reading {
    /// The level read, with `NoReading` treated as inactive.
    pub fn value(&self) -> Value {
        match self {
            Reading::Level(v) => *v,
            Reading::NoReading => Value::Inactive,
        }
    }

    /// Returns true if a line was read.
    pub fn is_level(&self) -> bool {
        matches!(self, Reading::Level(_))
    }
}

impl From<Reading> for u8 {
    fn from(r: Reading) -> u8 {
        r.value().into()
    }
}

impl From<Reading> for Value {
    fn from(r: Reading) -> Value {
        r.value()
    }
}

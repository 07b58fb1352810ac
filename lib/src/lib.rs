// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for reading and driving GPIO lines on Linux platforms
//! by running the `gpioget` and `gpioset` tools.
//!
//! The predefined tool invocations are provided by [`Command`].
//!
//! Commands are executed, and their output interpreted, by a [`Runner`]:
//! ```no_run
//! # fn main() -> gpiocmd::Result<()> {
//! use gpiocmd::{Command, Runner};
//!
//! let runner = Runner::default();
//! let pressed = runner.read(Command::ReadButton14)?;
//! # Ok(())
//! # }
//! ```
//!
//! Errors are returned rather than terminating the process, so the caller
//! decides whether a failed launch is fatal.

mod command;
pub use self::command::{Command, ParseCommandError, CHIP_PATH};

/// Spawning commands and interpreting their output.
pub mod runner;
pub use self::runner::{read_gpio_state, Runner};

mod value;
pub use self::value::{Reading, Value};

/// An identifier for a line on a particular chip.
pub type Offset = u32;

/// Errors returned by [`gpiocmd`] functions.
///
/// [`gpiocmd`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command could not be launched.
    #[error("failed to run command '{0}': {1}")]
    Spawn(String, #[source] std::io::Error),

    /// The exit status of the command could not be collected.
    #[error("failed to close command '{0}': {1}")]
    Reclaim(String, #[source] std::io::Error),

    /// An error returned when there is a problem with an argument.
    #[error("{0}")]
    InvalidArgument(String),
}

/// The result for [`gpiocmd`] functions.
///
/// [`gpiocmd`]: crate
pub type Result<T> = std::result::Result<T, Error>;

// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Error types shared by the input and audio subsystems.
//!
//! None of these errors are meant to reach the user. They are logged by the
//! component that observes them and the session carries on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HudError>;

#[derive(Debug, Error)]
pub enum HudError {
    /// A serialized layout entry could not be turned into a control element.
    #[error("layout entry {line}: {reason}")]
    Layout { line: usize, reason: String },

    /// Hot-replace or removal named an element that is not laid out.
    #[error("no control element with id {0}")]
    UnknownElement(u32),

    #[error("audio device error: {0}")]
    AudioDevice(String),

    #[error("failed to spawn worker thread")]
    WorkerSpawn(#[source] std::io::Error),

    /// A bound finger's pointer id was absent from the touch frame.
    #[error("pointer {0} missing from touch frame")]
    MissingPointer(i32),
}

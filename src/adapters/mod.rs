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

//! Non-touch input sources.
//!
//! Each adapter normalises one platform input source into the same
//! [`InputSink`](crate::bridge::InputSink) primitives the on-screen controls
//! use.

mod gamepad;
mod gyro;
mod keyboard;
mod mouse;

pub use gamepad::{AxisReading, GamepadAdapter, StickAxes};
pub use gyro::{DEFAULT_GYRO_SENSITIVITY, GyroAdapter, Rotation};
pub use keyboard::{KeyboardAdapter, PlatformKey};
pub use mouse::{MouseAdapter, MouseButton, PointerCapture, Scroll};

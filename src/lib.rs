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

//! # HUD input bridge.
//!
//! The input and audio plumbing that sits between a launcher shell and a
//! native first-person-shooter engine.
//!
//! The crate is organised around three execution contexts:
//!
//! * The **UI thread** runs the [`touch::TouchDispatcher`], the on-screen
//!   [`controls`] and the [`adapters`] for mouse, gamepad, gyroscope and
//!   keyboard input. All of them produce events through the
//!   [`bridge::InputSink`] primitives and never block.
//! * The **native simulation thread** drains the [`bridge::EventQueue`] once
//!   per tick through an [`engine::NativePump`], which is the only place
//!   allowed to call into the engine's input API.
//! * The **audio writer thread** owned by [`audio::AudioWriter`] performs
//!   every device write, with retry on back-pressure and an explicit flush
//!   protocol.
//!
//! Ambient session state (engine state flags, active key map) lives in an
//! explicit [`session::Session`] shared by reference.

pub mod adapters;
pub mod audio;
pub mod bridge;
pub mod config;
pub mod controls;
pub mod engine;
pub mod error;
pub mod keycodes;
pub mod session;
pub mod touch;

pub use error::{HudError, Result};

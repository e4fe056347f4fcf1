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

//! Session context shared by the input components.
//!
//! The engine reports its state as a bitmask from its own thread, while the
//! UI thread reads the derived flags to decide how controls behave. The flags
//! are therefore kept in atomics and the [`Session`] is shared by reference.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::keycodes::{EngineFamily, KeyMap};

pub const STATE_NONE: u32 = 0;
/// A map has been spawned.
pub const STATE_GAME: u32 = 1 << 1;
/// The loading screen is up.
pub const STATE_LOADING: u32 = 1 << 3;
/// The console covers the screen.
pub const STATE_CONSOLE: u32 = 1 << 4;
/// Any menu other than the loading screen is up.
pub const STATE_MENU: u32 = 1 << 5;

pub struct Session {
    keymap: KeyMap,
    state: AtomicU32,
    in_game: AtomicBool,
    in_loading: AtomicBool,
    in_console: AtomicBool,
    joystick_smooth: AtomicBool,
}

impl Session {
    /// Creates a session for the given engine family.
    ///
    /// Until the engine reports its first state the session assumes it is in
    /// game and loading.
    pub fn new(family: EngineFamily, joystick_smooth: bool) -> Self {
        Self {
            keymap: KeyMap::select(family),
            state: AtomicU32::new(STATE_NONE),
            in_game: AtomicBool::new(true),
            in_loading: AtomicBool::new(true),
            in_console: AtomicBool::new(false),
            joystick_smooth: AtomicBool::new(joystick_smooth),
        }
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Records a state bitmask reported by the engine.
    pub fn set_state(&self, state: u32) {
        let console = (state & STATE_CONSOLE) == STATE_CONSOLE;
        self.state.store(state, Ordering::Release);
        self.in_console.store(console, Ordering::Release);
        self.in_game
            .store((state & STATE_GAME) == STATE_GAME && !console, Ordering::Release);
        self.in_loading
            .store((state & STATE_LOADING) == STATE_LOADING, Ordering::Release);
    }

    pub fn state(&self) -> u32 {
        self.state.load(Ordering::Acquire)
    }

    /// True while a map is running and no console or menu covers it.
    pub fn in_game(&self) -> bool {
        self.in_game.load(Ordering::Acquire)
    }

    pub fn in_loading(&self) -> bool {
        self.in_loading.load(Ordering::Acquire)
    }

    pub fn in_console(&self) -> bool {
        self.in_console.load(Ordering::Acquire)
    }

    pub fn joystick_smooth(&self) -> bool {
        self.joystick_smooth.load(Ordering::Relaxed)
    }

    pub fn set_joystick_smooth(&self, smooth: bool) {
        self.joystick_smooth.store(smooth, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_game_and_loading() {
        let session = Session::new(EngineFamily::Doom3, true);
        assert!(session.in_game());
        assert!(session.in_loading());
        assert!(!session.in_console());
    }

    #[test]
    fn console_takes_the_player_out_of_game() {
        let session = Session::new(EngineFamily::Doom3, true);

        session.set_state(STATE_GAME);
        assert!(session.in_game());
        assert!(!session.in_loading());

        session.set_state(STATE_GAME | STATE_CONSOLE);
        assert!(!session.in_game());
        assert!(session.in_console());

        session.set_state(STATE_MENU | STATE_LOADING);
        assert!(!session.in_game());
        assert!(session.in_loading());
        assert_eq!(session.state(), STATE_MENU | STATE_LOADING);
    }
}

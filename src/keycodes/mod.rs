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

//! Key code remapping between the generic numbering and engine families.
//!
//! Layout tables, preferences and on-screen controls all speak the generic
//! numbering. Each engine family numbers keys differently, so a [`KeyMap`] is
//! selected once per session and used to translate generic codes into the
//! codes the active engine expects.

mod tables;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Named keys the launcher can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    CapsLock,
    Pause,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Alt,
    Ctrl,
    Shift,
    Ins,
    Del,
    PgDn,
    PgUp,
    Home,
    End,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Mouse1,
    Mouse2,
    Mouse3,
    Mouse4,
    Mouse5,
    MWheelDown,
    MWheelUp,
    JLeft,
    JRight,
    JUp,
    JDown,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
}

impl LogicalKey {
    pub const COUNT: usize = 79;

    const LETTERS: [LogicalKey; 26] = [
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G, Self::H, Self::I,
        Self::J, Self::K, Self::L, Self::M, Self::N, Self::O, Self::P, Self::Q, Self::R,
        Self::S, Self::T, Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
    ];

    const DIGITS: [LogicalKey; 10] = [
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
    ];

    /// Index of this key in a dense per-key array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a letter or digit to its key, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        match c {
            'a'..='z' => Some(Self::LETTERS[(c as u8 - b'a') as usize]),
            '0'..='9' => Some(Self::DIGITS[(c as u8 - b'0') as usize]),
            _ => None,
        }
    }

    /// Whether the key is one of the joystick direction keys, which share
    /// their engine code with a movement key in most families.
    pub fn is_joystick_alias(self) -> bool {
        matches!(self, Self::JLeft | Self::JRight | Self::JUp | Self::JDown)
    }

    /// The key's code in the generic numbering.
    ///
    /// Returns zero for keys the generic table has no entry for.
    pub fn generic_code(self) -> i32 {
        tables::GENERIC
            .iter()
            .find(|(key, _)| *key == self)
            .map_or(0, |(_, code)| *code)
    }
}

/// Supported engine families, each with its own key numbering.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineFamily {
    Generic,
    Quake3,
    /// Enemy Territory: Legacy. Shares the Quake 3 numbering.
    EtLegacy,
    #[default]
    Doom3,
    Doom3Bfg,
    Quake1,
    Sdl,
}

impl EngineFamily {
    fn overrides(self) -> &'static [(LogicalKey, i32)] {
        match self {
            EngineFamily::Generic => &[],
            EngineFamily::Quake3 | EngineFamily::EtLegacy => tables::QUAKE3,
            EngineFamily::Doom3 => tables::DOOM3,
            EngineFamily::Doom3Bfg => tables::DOOM3_BFG,
            EngineFamily::Quake1 => tables::QUAKE1,
            EngineFamily::Sdl => tables::SDL,
        }
    }

    /// Divisor applied to the engine's audio buffer hint before the device is
    /// sized.
    pub fn audio_hint_divisor(self) -> usize {
        match self {
            EngineFamily::EtLegacy => 8,
            _ => 1,
        }
    }
}

/// The active family's key numbering, merged over the generic table.
#[derive(Clone, Debug)]
pub struct KeyMap {
    family: EngineFamily,
    codes: [i32; LogicalKey::COUNT],
}

impl KeyMap {
    /// Builds the key map for `family`.
    ///
    /// Every key starts from its generic code and is then overridden by the
    /// family's own entry where one exists.
    pub fn select(family: EngineFamily) -> Self {
        let mut codes = [0; LogicalKey::COUNT];
        let mut defined = [false; LogicalKey::COUNT];

        for (key, code) in tables::GENERIC.iter().chain(family.overrides()) {
            codes[key.index()] = *code;
            defined[key.index()] = true;
        }

        let missing = defined.iter().filter(|d| !**d).count();
        if missing > 0 {
            debug!("{missing} keys have no code for {family:?}, defaulting to 0");
        }
        info!("Selected key map for {family:?}");

        Self { family, codes }
    }

    pub fn family(&self) -> EngineFamily {
        self.family
    }

    /// The engine code for `key`.
    pub fn code(&self, key: LogicalKey) -> i32 {
        self.codes[key.index()]
    }

    /// Translates a generic code into the active family's code.
    ///
    /// Codes with no generic entry are assumed to already be native and are
    /// returned unchanged.
    pub fn reverse_lookup(&self, generic_code: i32) -> i32 {
        match tables::GENERIC.iter().find(|(_, code)| *code == generic_code) {
            Some((key, _)) => {
                let code = self.code(*key);
                debug!("Map virtual key {key:?} = {generic_code} -> {code}");
                code
            }
            None => generic_code,
        }
    }

    /// Translates an engine code back into the generic numbering for
    /// persistence. Unknown codes are returned unchanged.
    ///
    /// Where a joystick direction shares its code with another key, the other
    /// key wins.
    pub fn to_generic(&self, engine_code: i32) -> i32 {
        let find = |aliases: bool| {
            tables::GENERIC
                .iter()
                .find(|(key, _)| {
                    key.is_joystick_alias() == aliases && self.code(*key) == engine_code
                })
        };
        find(false)
            .or_else(|| find(true))
            .map_or(engine_code, |(_, generic)| *generic)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::select(EngineFamily::default())
    }
}

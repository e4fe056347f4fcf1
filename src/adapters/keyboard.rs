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

//! Hardware keys.
//!
//! Platform key events are translated to the generic numbering first, the
//! same way layout tables store keys, and then through the active key map.

use crate::{
    bridge::InputSink,
    keycodes::{KeyMap, LogicalKey},
};

const BACKSPACE_CHAR: i32 = 8;

/// A key as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformKey {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    DpadCenter,
    Back,
    /// Backspace.
    Del,
    Tab,
    Enter,
    Escape,
    GamepadA,
    GamepadB,
    GamepadC,
    GamepadX,
    GamepadY,
    GamepadZ,
    GamepadL1,
    GamepadR1,
    GamepadL2,
    GamepadR2,
    GamepadStart,
    GamepadSelect,
    VolumeUp,
    VolumeDown,
    /// Any other key, by the character it produces.
    Char(char),
}

pub struct KeyboardAdapter {
    keymap: KeyMap,
    map_volume: bool,
    volume_up: LogicalKey,
    volume_down: LogicalKey,
}

impl KeyboardAdapter {
    /// # Arguments
    ///
    /// * `map_volume` - Forward the volume keys to the engine as F3 and F2
    ///   instead of leaving them to the platform.
    pub fn new(keymap: KeyMap, map_volume: bool) -> Self {
        Self {
            keymap,
            map_volume,
            volume_up: LogicalKey::F3,
            volume_down: LogicalKey::F2,
        }
    }

    /// Handles a key change. Returns false if the key is not for the engine.
    pub fn on_key(&self, key: PlatformKey, pressed: bool, sink: &dyn InputSink) -> bool {
        let Some(generic) = self.to_generic(key) else {
            return false;
        };
        let char_code = match key {
            PlatformKey::Del => BACKSPACE_CHAR,
            PlatformKey::Char(c) if (c as u32) < 127 => c as i32,
            _ => 0,
        };
        sink.send_key(pressed, self.keymap.reverse_lookup(generic), char_code);
        true
    }

    fn to_generic(&self, key: PlatformKey) -> Option<i32> {
        let logical = match key {
            PlatformKey::DpadUp => LogicalKey::UpArrow,
            PlatformKey::DpadDown => LogicalKey::DownArrow,
            PlatformKey::DpadLeft => LogicalKey::LeftArrow,
            PlatformKey::DpadRight => LogicalKey::RightArrow,
            PlatformKey::DpadCenter => LogicalKey::Ctrl,
            PlatformKey::Back | PlatformKey::Escape | PlatformKey::GamepadStart => {
                LogicalKey::Escape
            }
            PlatformKey::Del => LogicalKey::Backspace,
            PlatformKey::Tab => LogicalKey::Tab,
            PlatformKey::Enter | PlatformKey::GamepadSelect => LogicalKey::Enter,
            PlatformKey::GamepadA => LogicalKey::C,
            PlatformKey::GamepadB => LogicalKey::R,
            PlatformKey::GamepadC => LogicalKey::A,
            PlatformKey::GamepadX => LogicalKey::Space,
            PlatformKey::GamepadY => LogicalKey::F,
            PlatformKey::GamepadZ => LogicalKey::Z,
            PlatformKey::GamepadL1 => LogicalKey::L,
            PlatformKey::GamepadR1 => LogicalKey::Mouse1,
            PlatformKey::GamepadL2 => LogicalKey::MWheelDown,
            PlatformKey::GamepadR2 => LogicalKey::MWheelUp,
            PlatformKey::VolumeUp if self.map_volume => self.volume_up,
            PlatformKey::VolumeDown if self.map_volume => self.volume_down,
            PlatformKey::VolumeUp | PlatformKey::VolumeDown => return None,
            PlatformKey::Char(c) => match LogicalKey::from_char(c) {
                // Letters are remapped unshifted.
                Some(key) => key,
                None => {
                    let code = c as i32;
                    return Some(if code < 127 { code } else { code % 95 + 32 });
                }
            },
        };
        Some(logical.generic_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{InputEvent, testing::RecordingSink},
        keycodes::EngineFamily,
    };

    fn keyboard(family: EngineFamily, map_volume: bool) -> KeyboardAdapter {
        KeyboardAdapter::new(KeyMap::select(family), map_volume)
    }

    fn press(adapter: &KeyboardAdapter, key: PlatformKey) -> Option<InputEvent> {
        let sink = RecordingSink::default();
        adapter.on_key(key, true, &sink);
        sink.events().first().copied()
    }

    #[test]
    fn navigation_keys_map_to_logical_keys() {
        let kb = keyboard(EngineFamily::Generic, false);
        let key = |k| press(&kb, k).map(|e| match e {
            InputEvent::Key { code, .. } => code,
            _ => 0,
        });

        assert_eq!(key(PlatformKey::DpadUp), Some(133));
        assert_eq!(key(PlatformKey::DpadCenter), Some(141));
        assert_eq!(key(PlatformKey::Back), Some(27));
        assert_eq!(key(PlatformKey::GamepadA), Some(99));
        assert_eq!(key(PlatformKey::GamepadX), Some(32));
        assert_eq!(key(PlatformKey::GamepadR1), Some(187));
        assert_eq!(key(PlatformKey::GamepadL2), Some(196));
    }

    #[test]
    fn characters_carry_their_char_code() {
        let kb = keyboard(EngineFamily::Generic, false);
        assert_eq!(
            press(&kb, PlatformKey::Char('w')),
            Some(InputEvent::Key {
                pressed: true,
                code: 119,
                char_code: 119,
            })
        );
        assert_eq!(
            press(&kb, PlatformKey::Del),
            Some(InputEvent::Key {
                pressed: true,
                code: 127,
                char_code: 8,
            })
        );
        // Outside ASCII, folded into the printable range.
        assert_eq!(
            press(&kb, PlatformKey::Char('é')),
            Some(InputEvent::Key {
                pressed: true,
                code: 233 % 95 + 32,
                char_code: 0,
            })
        );
    }

    #[test]
    fn volume_keys_are_opt_in() {
        let sink = RecordingSink::default();
        assert!(!keyboard(EngineFamily::Generic, false).on_key(PlatformKey::VolumeUp, true, &sink));
        assert!(sink.events().is_empty());

        let kb = keyboard(EngineFamily::Generic, true);
        assert!(kb.on_key(PlatformKey::VolumeUp, true, &sink));
        assert!(kb.on_key(PlatformKey::VolumeDown, true, &sink));
        assert_eq!(sink.keys(), vec![(true, 151), (true, 150)]);
    }

    #[test]
    fn codes_follow_the_engine_family() {
        let kb = keyboard(EngineFamily::Doom3Bfg, false);
        assert_eq!(
            press(&kb, PlatformKey::Char('q')),
            Some(InputEvent::Key {
                pressed: true,
                code: 16,
                char_code: 113,
            })
        );
    }

    #[test]
    fn shifted_letters_remap_like_unshifted_ones() {
        let kb = keyboard(EngineFamily::Doom3Bfg, false);
        assert_eq!(
            press(&kb, PlatformKey::Char('Q')),
            Some(InputEvent::Key {
                pressed: true,
                code: 16,
                char_code: 81,
            })
        );

        let kb = keyboard(EngineFamily::Generic, false);
        assert_eq!(
            press(&kb, PlatformKey::Char('W')),
            Some(InputEvent::Key {
                pressed: true,
                code: 119,
                char_code: 87,
            })
        );
    }
}

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

//! Per-engine key code tables.
//!
//! Each family lists only the keys it numbers differently from the generic
//! table. Keys a family leaves out resolve through [`GENERIC`] when a
//! [`KeyMap`](super::KeyMap) is selected.

use super::LogicalKey::{self, *};

const fn ch(c: u8) -> i32 {
    c as i32
}

/// The generic numbering every layout table and preference is stored in.
///
/// `Pause` is intentionally absent so it resolves to zero, matching the
/// launcher's generic key class.
pub(crate) const GENERIC: &[(LogicalKey, i32)] = &[
    (Tab, 9),
    (Enter, 13),
    (Escape, 27),
    (Space, 32),
    (Backspace, 127),
    (CapsLock, 129),
    (UpArrow, 133),
    (DownArrow, 134),
    (LeftArrow, 135),
    (RightArrow, 136),
    (Alt, 140),
    (Ctrl, 141),
    (Shift, 142),
    (Ins, 143),
    (Del, 144),
    (PgDn, 145),
    (PgUp, 146),
    (Home, 147),
    (End, 148),
    (F1, 149),
    (F2, 150),
    (F3, 151),
    (F4, 152),
    (F5, 153),
    (F6, 154),
    (F7, 155),
    (F8, 156),
    (F9, 157),
    (F10, 158),
    (F11, 159),
    (F12, 160),
    (Mouse1, 187),
    (Mouse2, 188),
    (Mouse3, 189),
    (Mouse4, 190),
    (Mouse5, 191),
    (MWheelUp, 195),
    (MWheelDown, 196),
    (JLeft, -ch(b'a')),
    (JRight, -ch(b'd')),
    (JUp, -133),
    (JDown, -134),
    (A, ch(b'a')),
    (B, ch(b'b')),
    (C, ch(b'c')),
    (D, ch(b'd')),
    (E, ch(b'e')),
    (F, ch(b'f')),
    (G, ch(b'g')),
    (H, ch(b'h')),
    (I, ch(b'i')),
    (J, ch(b'j')),
    (K, ch(b'k')),
    (L, ch(b'l')),
    (M, ch(b'm')),
    (N, ch(b'n')),
    (O, ch(b'o')),
    (P, ch(b'p')),
    (Q, ch(b'q')),
    (R, ch(b'r')),
    (S, ch(b's')),
    (T, ch(b't')),
    (U, ch(b'u')),
    (V, ch(b'v')),
    (W, ch(b'w')),
    (X, ch(b'x')),
    (Y, ch(b'y')),
    (Z, ch(b'z')),
    (Num0, ch(b'0')),
    (Num1, ch(b'1')),
    (Num2, ch(b'2')),
    (Num3, ch(b'3')),
    (Num4, ch(b'4')),
    (Num5, ch(b'5')),
    (Num6, ch(b'6')),
    (Num7, ch(b'7')),
    (Num8, ch(b'8')),
    (Num9, ch(b'9')),
];

/// Quake 3, RTCW and Enemy Territory.
pub(crate) const QUAKE3: &[(LogicalKey, i32)] = &[
    (Tab, 9),
    (Enter, 13),
    (Escape, 27),
    (Space, 32),
    (Backspace, 127),
    (CapsLock, 129),
    (Pause, 131),
    (UpArrow, 132),
    (DownArrow, 133),
    (LeftArrow, 134),
    (RightArrow, 135),
    (Alt, 136),
    (Ctrl, 137),
    (Shift, 138),
    (Ins, 139),
    (Del, 140),
    (PgDn, 141),
    (PgUp, 142),
    (Home, 143),
    (End, 144),
    (F1, 145),
    (F2, 146),
    (F3, 147),
    (F4, 148),
    (F5, 149),
    (F6, 150),
    (F7, 151),
    (F8, 152),
    (F9, 153),
    (F10, 154),
    (F11, 155),
    (F12, 156),
    (Mouse1, 178),
    (Mouse2, 179),
    (Mouse3, 180),
    (Mouse4, 181),
    (Mouse5, 182),
    (MWheelDown, 183),
    (MWheelUp, 184),
    (JLeft, ch(b'a')),
    (JRight, ch(b'd')),
    (JUp, 132),
    (JDown, 133),
];

/// Doom 3 and its expansions, also used by The Dark Mod.
pub(crate) const DOOM3: &[(LogicalKey, i32)] = &[
    (Tab, 9),
    (Enter, 13),
    (Escape, 27),
    (Space, 32),
    (Backspace, 127),
    (CapsLock, 129),
    (Pause, 132),
    (UpArrow, 133),
    (DownArrow, 134),
    (LeftArrow, 135),
    (RightArrow, 136),
    (Alt, 140),
    (Ctrl, 141),
    (Shift, 142),
    (Ins, 143),
    (Del, 144),
    (PgDn, 145),
    (PgUp, 146),
    (Home, 147),
    (End, 148),
    (F1, 149),
    (F2, 150),
    (F3, 151),
    (F4, 152),
    (F5, 153),
    (F6, 154),
    (F7, 155),
    (F8, 156),
    (F9, 157),
    (F10, 158),
    (F11, 159),
    (F12, 160),
    (Mouse1, 187),
    (Mouse2, 188),
    (Mouse3, 189),
    (Mouse4, 190),
    (Mouse5, 191),
    (MWheelDown, 195),
    (MWheelUp, 196),
    (JLeft, ch(b'a')),
    (JRight, ch(b'd')),
    (JUp, 133),
    (JDown, 134),
];

/// Doom 3 BFG edition, which numbers keys by DirectInput scancode.
pub(crate) const DOOM3_BFG: &[(LogicalKey, i32)] = &[
    (Escape, 1),
    (Num1, 2),
    (Num2, 3),
    (Num3, 4),
    (Num4, 5),
    (Num5, 6),
    (Num6, 7),
    (Num7, 8),
    (Num8, 9),
    (Num9, 10),
    (Num0, 11),
    (Backspace, 14),
    (Tab, 15),
    (Q, 16),
    (W, 17),
    (E, 18),
    (R, 19),
    (T, 20),
    (Y, 21),
    (U, 22),
    (I, 23),
    (O, 24),
    (P, 25),
    (Enter, 28),
    (Ctrl, 29),
    (A, 30),
    (S, 31),
    (D, 32),
    (F, 33),
    (G, 34),
    (H, 35),
    (J, 36),
    (K, 37),
    (L, 38),
    (Shift, 42),
    (Z, 44),
    (X, 45),
    (C, 46),
    (V, 47),
    (B, 48),
    (N, 49),
    (M, 50),
    (Alt, 56),
    (Space, 57),
    (CapsLock, 58),
    (F1, 59),
    (F2, 60),
    (F3, 61),
    (F4, 62),
    (F5, 63),
    (F6, 64),
    (F7, 65),
    (F8, 66),
    (F9, 67),
    (F10, 68),
    (F11, 0x57),
    (F12, 0x58),
    (Pause, 0xC5),
    (Home, 0xC7),
    (UpArrow, 0xC8),
    (PgUp, 0xC9),
    (LeftArrow, 0xCB),
    (RightArrow, 0xCD),
    (End, 0xCF),
    (DownArrow, 0xD0),
    (PgDn, 0xD1),
    (Ins, 0xD2),
    (Del, 0xD3),
    (Mouse1, 286),
    (Mouse2, 287),
    (Mouse3, 288),
    (Mouse4, 289),
    (Mouse5, 290),
    (MWheelDown, 294),
    (MWheelUp, 295),
    (JLeft, 30),
    (JRight, 32),
    (JUp, 0xC8),
    (JDown, 0xD0),
];

/// Quake 1 derived engines.
pub(crate) const QUAKE1: &[(LogicalKey, i32)] = &[
    (Tab, 9),
    (Enter, 13),
    (Escape, 27),
    (Space, 32),
    (Backspace, 127),
    (UpArrow, 128),
    (DownArrow, 129),
    (LeftArrow, 130),
    (RightArrow, 131),
    (Alt, 132),
    (Ctrl, 133),
    (Shift, 134),
    (F1, 135),
    (F2, 136),
    (F3, 137),
    (F4, 138),
    (F5, 139),
    (F6, 140),
    (F7, 141),
    (F8, 142),
    (F9, 143),
    (F10, 144),
    (F11, 145),
    (F12, 146),
    (Ins, 147),
    (Del, 148),
    (PgDn, 149),
    (PgUp, 150),
    (Home, 151),
    (End, 152),
    (Pause, 153),
    (CapsLock, 155),
    (Mouse1, 512),
    (Mouse2, 513),
    (Mouse3, 514),
    (MWheelUp, 515),
    (MWheelDown, 516),
    (Mouse4, 517),
    (Mouse5, 518),
    (JLeft, ch(b'a')),
    (JRight, ch(b'd')),
    (JUp, 128),
    (JDown, 129),
];

const SDL_SCANCODE_MASK: i32 = 1 << 30;

const fn sdl_scancode(code: i32) -> i32 {
    code | SDL_SCANCODE_MASK
}

/// SDL2 keycodes, used by GZDoom and other SDL based ports.
///
/// Letters and digits already match the generic numbering.
pub(crate) const SDL: &[(LogicalKey, i32)] = &[
    (Escape, 27),
    (Backspace, 8),
    (Tab, 9),
    (Enter, 13),
    (Space, 32),
    (Del, 127),
    (CapsLock, sdl_scancode(57)),
    (F1, sdl_scancode(58)),
    (F2, sdl_scancode(59)),
    (F3, sdl_scancode(60)),
    (F4, sdl_scancode(61)),
    (F5, sdl_scancode(62)),
    (F6, sdl_scancode(63)),
    (F7, sdl_scancode(64)),
    (F8, sdl_scancode(65)),
    (F9, sdl_scancode(66)),
    (F10, sdl_scancode(67)),
    (F11, sdl_scancode(68)),
    (F12, sdl_scancode(69)),
    (Pause, sdl_scancode(72)),
    (Ins, sdl_scancode(73)),
    (Home, sdl_scancode(74)),
    (PgUp, sdl_scancode(75)),
    (End, sdl_scancode(77)),
    (PgDn, sdl_scancode(78)),
    (RightArrow, sdl_scancode(79)),
    (LeftArrow, sdl_scancode(80)),
    (DownArrow, sdl_scancode(81)),
    (UpArrow, sdl_scancode(82)),
    (Ctrl, sdl_scancode(224)),
    (Shift, sdl_scancode(225)),
    (Alt, sdl_scancode(226)),
    (Mouse1, 1),
    (Mouse2, 3),
    (Mouse3, 2),
    (MWheelDown, 4),
    (MWheelUp, 5),
    (JLeft, ch(b'a')),
    (JRight, ch(b'd')),
    (JUp, ch(b'w')),
    (JDown, ch(b's')),
];

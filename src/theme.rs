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

use std::io::{self, Write};

use log::warn;
use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) label_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) error_fg: Color,
}

impl Default for Theme {
    // Returns the standard HUD theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(24, 28, 32),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            label_fg: Color::Rgb(230, 230, 230),
            muted_fg: Color::Rgb(140, 140, 150),
            error_fg: Color::Rgb(235, 87, 87),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences.
    ///
    /// # Arguments
    ///
    /// * `colour` - The Ratatui color to convert. Anything other than an `Rgb`
    ///   variant converts to black.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => String::from("#000000"),
        }
    }
}

/// Sets the terminal emulator's background with an OSC 11 sequence.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    print!("\x1b]11;{}\x07", hex_color);
    if let Err(e) = io::stdout().flush() {
        warn!("Failed to set terminal background: {e}");
    }
}

pub(crate) fn reset_terminal_bg() {
    print!("\x1b]111\x07");
    if let Err(e) = io::stdout().flush() {
        warn!("Failed to reset terminal background: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_converts_to_hex() {
        assert_eq!(Theme::to_hex(Color::Rgb(250, 189, 47)), "#fabd2f");
        assert_eq!(Theme::to_hex(Color::Reset), "#000000");
    }
}

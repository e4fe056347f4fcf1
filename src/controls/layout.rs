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

//! Control layout tables.
//!
//! A layout is an ordered list of [`ControlSpec`] entries as stored in the
//! configuration file. Each entry carries its geometry as a
//! `"cx cy size alpha"` string, with alpha a percentage, and its keys in the
//! generic numbering so the same layout works for every engine family.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    HudError, Result,
    controls::{
        Button, ButtonStyle, ControlElement, Disc, Joystick, JoystickOptions, Rect, Slider,
        SliderStyle,
    },
    keycodes::KeyMap,
};

/// Weapon keys offered by the disc when none are configured.
pub const DEFAULT_DISC_KEYS: &str = "1,2,3,4,5,6,7,8,9,q,0";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlSpec {
    Button {
        label: String,
        geometry: String,
        key: i32,
        #[serde(default)]
        hold: bool,
        #[serde(default)]
        style: ButtonStyle,
    },
    Slider {
        label: String,
        geometry: String,
        keys: [i32; 3],
        #[serde(default)]
        style: SliderStyle,
    },
    Joystick {
        geometry: String,
    },
    Disc {
        label: String,
        geometry: String,
    },
}

impl ControlSpec {
    fn geometry(&self) -> &str {
        match self {
            ControlSpec::Button { geometry, .. }
            | ControlSpec::Slider { geometry, .. }
            | ControlSpec::Joystick { geometry }
            | ControlSpec::Disc { geometry, .. } => geometry,
        }
    }
}

/// Position, size and opacity of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub cx: i32,
    pub cy: i32,
    pub size: i32,
    pub alpha: f32,
}

impl Geometry {
    /// Parses a `"cx cy size alpha"` string.
    ///
    /// # Errors
    ///
    /// Fails with [`HudError::Layout`] naming `line` if the string does not
    /// hold exactly four integers or the size is not positive.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let fields = text
            .split_whitespace()
            .map(|f| f.parse::<i32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| HudError::Layout {
                line,
                reason: format!("bad number in \"{text}\": {e}"),
            })?;

        let [cx, cy, size, alpha] = fields[..] else {
            return Err(HudError::Layout {
                line,
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        };
        if size <= 0 {
            return Err(HudError::Layout {
                line,
                reason: format!("size must be positive, got {size}"),
            });
        }

        Ok(Self {
            cx,
            cy,
            size,
            alpha: alpha.clamp(0, 100) as f32 / 100.0,
        })
    }

    fn format(cx: i32, cy: i32, size: i32, alpha: i32) -> String {
        format!("{cx} {cy} {size} {alpha}")
    }
}

/// Options applied while building elements from specs.
#[derive(Clone, Debug, Default)]
pub struct LayoutOptions {
    pub joystick: JoystickOptions,
    /// Characters shown on the weapon disc, in order.
    pub disc_keys: Vec<char>,
}

/// Splits a comma separated key list such as [`DEFAULT_DISC_KEYS`].
///
/// Each entry contributes its first character; empty entries are skipped.
pub fn parse_disc_keys(text: &str) -> Vec<char> {
    text.split(',')
        .filter_map(|key| key.trim().chars().next())
        .collect()
}

/// Builds the elements for a layout table.
///
/// Keys are translated from the generic numbering through `keymap`. Buttons,
/// sliders and discs lying wholly off `screen` are dropped; the joystick is
/// always kept.
///
/// # Errors
///
/// Returns [`HudError::Layout`] for the first malformed entry. Lines are
/// numbered from one.
pub fn build_elements(
    specs: &[ControlSpec],
    screen: Rect,
    keymap: &KeyMap,
    options: &LayoutOptions,
) -> Result<Vec<Box<dyn ControlElement>>> {
    let mut elements: Vec<Box<dyn ControlElement>> = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        let g = Geometry::parse(spec.geometry(), index + 1)?;

        let element: Box<dyn ControlElement> = match spec {
            ControlSpec::Button {
                label,
                key,
                hold,
                style,
                ..
            } => {
                let height = if *style == ButtonStyle::Rect { g.size / 2 } else { g.size };
                Box::new(Button::new(
                    label.as_str(),
                    g.cx,
                    g.cy,
                    g.size,
                    height,
                    keymap.reverse_lookup(*key),
                    *style,
                    *hold,
                    g.alpha,
                ))
            }
            ControlSpec::Slider {
                label, keys, style, ..
            } => {
                let height = if style.is_horizontal() { g.size / 2 } else { g.size };
                Box::new(Slider::new(
                    label.as_str(),
                    g.cx,
                    g.cy,
                    g.size,
                    height,
                    keys.map(|k| keymap.reverse_lookup(k)),
                    *style,
                    g.alpha,
                ))
            }
            ControlSpec::Joystick { .. } => {
                elements.push(Box::new(Joystick::new(
                    g.cx,
                    g.cy,
                    g.size,
                    g.alpha,
                    options.joystick,
                    keymap,
                )));
                continue;
            }
            ControlSpec::Disc { label, .. } => Box::new(Disc::new(
                label.as_str(),
                g.cx,
                g.cy,
                g.size,
                g.alpha,
                &options.disc_keys,
                keymap,
            )),
        };

        if element.bounds().intersects(&screen) {
            elements.push(element);
        } else {
            warn!("Element {} at line {} is off screen, skipped", element.label(), index + 1);
        }
    }

    debug!("Built {} of {} layout entries", elements.len(), specs.len());
    Ok(elements)
}

/// The stock layout for a `width` by `height` landscape screen.
///
/// Fire and jump sit under the right thumb, the stick under the left, with
/// the reload slider and weapon disc along the top edge.
pub fn default_layout(width: i32, height: i32, alpha: i32) -> Vec<ControlSpec> {
    let r = height / 5;
    let ro = r * 3 / 4;
    let sw = r * 5 / 3;
    let sr = r / 6 * 5;

    let button = |label: &str, cx, cy, size, key, hold, style| ControlSpec::Button {
        label: label.to_string(),
        geometry: Geometry::format(cx, cy, size, alpha),
        key,
        hold,
        style,
    };

    vec![
        ControlSpec::Joystick {
            geometry: Geometry::format(r * 4 / 3, height - r * 4 / 3, r, alpha),
        },
        button(
            "FIRE",
            width - r / 2 - ro,
            height - r / 2 - ro,
            r * 3 / 2,
            187,
            false,
            ButtonStyle::Circle,
        ),
        button("JUMP", width - r / 2, height - r - 2 * ro, r, 32, false, ButtonStyle::Circle),
        button("CROUCH", width - r / 2, height - r / 2, r, 99, true, ButtonStyle::Circle),
        ControlSpec::Slider {
            label: "RELOAD".to_string(),
            geometry: Geometry::format(width - sw / 2 - ro / 3, sw * 3 / 8, sw, alpha),
            keys: [91, 114, 93],
            style: SliderStyle::LeftRight,
        },
        button("LIGHT", width - r / 2 - 4 * ro, height - r / 2, r, 102, false, ButtonStyle::Circle),
        ControlSpec::Disc {
            label: "WEAPON".to_string(),
            geometry: Geometry::format(width - sw - r - ro, r, r / 3, alpha),
        },
        button("ESC", sw / 2 + sr / 2, sw / 2 + sr / 2, sr, 27, false, ButtonStyle::Rect),
    ]
}

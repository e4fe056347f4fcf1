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

//! Radial weapon menu.

use std::f64::consts::PI;

use crate::{
    Result,
    controls::{ControlElement, ElementKind, Rect, Touch, TouchAct, TouchContext, Visual},
    keycodes::KeyMap,
};

struct Part {
    start: f32,
    end: f32,
    code: i32,
}

/// A disc split into equal sectors, one per key.
///
/// Press inside the disc, drag out across a sector and lift to fire that
/// sector's key. Lifting back inside the disc selects nothing.
pub struct Disc {
    label: String,
    cx: i32,
    cy: i32,
    size: i32,
    parts: Vec<Part>,
    selected: Option<usize>,
    tracking: bool,
    alpha: f32,
}

impl Disc {
    /// Creates a disc with one sector per character in `keys`, clockwise from
    /// twelve o'clock.
    pub fn new(
        label: impl Into<String>,
        cx: i32,
        cy: i32,
        radius: i32,
        alpha: f32,
        keys: &[char],
        keymap: &KeyMap,
    ) -> Self {
        let step = 360.0 / keys.len().max(1) as f32;
        let parts = keys
            .iter()
            .enumerate()
            .map(|(i, key)| Part {
                start: step * i as f32,
                end: step * (i + 1) as f32,
                code: keymap.reverse_lookup(*key as i32),
            })
            .collect();

        Self {
            label: label.into(),
            cx,
            cy,
            size: radius * 2,
            parts,
            selected: None,
            tracking: false,
            alpha,
        }
    }

    fn inside(&self, dx: i32, dy: i32) -> bool {
        4 * (dx * dx + dy * dy) <= self.size * self.size
    }

    fn part_at(&self, dx: i32, dy: i32) -> Option<usize> {
        let mut degrees = (((dy as f64).atan2(dx as f64) + PI / 2.0) / PI * 180.0) as f32;
        while degrees > 360.0 {
            degrees -= 360.0;
        }
        while degrees < 0.0 {
            degrees += 360.0;
        }
        self.parts
            .iter()
            .position(|p| degrees >= p.start && degrees < p.end)
    }
}

impl ControlElement for Disc {
    fn kind(&self) -> ElementKind {
        ElementKind::Disc
    }

    fn bounds(&self) -> Rect {
        Rect::centered(self.cx, self.cy, self.size, self.size)
    }

    fn is_inside(&self, x: i32, y: i32) -> bool {
        self.inside(x - self.cx, y - self.cy)
    }

    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool> {
        if self.parts.is_empty() {
            return Ok(true);
        }

        let dx = touch.x - self.cx;
        let dy = touch.y - self.cy;
        let inside = self.inside(dx, dy);

        match touch.act {
            TouchAct::Press => {
                self.tracking = true;
                self.selected = None;
            }
            TouchAct::Motion if self.tracking => {
                self.selected = if inside { None } else { self.part_at(dx, dy) };
            }
            TouchAct::Motion => {}
            TouchAct::Release => {
                if self.tracking && !inside {
                    if let Some(part) = self.selected {
                        ctx.sink.send_key_tap(self.parts[part].code);
                    }
                }
                self.selected = None;
                self.tracking = false;
            }
        }
        Ok(true)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn visual(&self) -> Visual {
        Visual {
            active: self.tracking,
            highlight: self.selected,
            ..Visual::idle(self.alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::testing::RecordingSink,
        keycodes::EngineFamily,
        session::Session,
    };

    fn touch(x: i32, y: i32, act: TouchAct) -> Touch {
        Touch { x, y, act, slot: 0 }
    }

    fn disc(family: EngineFamily) -> Disc {
        Disc::new("weapons", 100, 100, 20, 1.0, &['1', '2', '3', 'q'], &KeyMap::select(family))
    }

    fn gesture(disc: &mut Disc, moves: &[(i32, i32)]) -> Vec<(bool, i32)> {
        let sink = RecordingSink::default();
        let session = Session::new(EngineFamily::Generic, true);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        disc.on_touch(touch(100, 100, TouchAct::Press), &ctx).unwrap();
        for (x, y) in moves {
            disc.on_touch(touch(*x, *y, TouchAct::Motion), &ctx).unwrap();
        }
        let (x, y) = moves.last().copied().unwrap_or((100, 100));
        disc.on_touch(touch(x, y, TouchAct::Release), &ctx).unwrap();
        sink.keys()
    }

    #[test]
    fn release_outside_fires_selected_sector() {
        let mut disc = disc(EngineFamily::Generic);

        // Straight right is the second quarter clockwise from the top.
        assert_eq!(gesture(&mut disc, &[(150, 100)]), vec![(true, 50), (false, 50)]);
        // Up and slightly right is the first.
        assert_eq!(gesture(&mut disc, &[(105, 40)]), vec![(true, 49), (false, 49)]);
        // Up and slightly left wraps to the last.
        assert_eq!(gesture(&mut disc, &[(95, 40)]), vec![(true, 113), (false, 113)]);
    }

    #[test]
    fn release_inside_cancels() {
        let mut disc = disc(EngineFamily::Generic);
        assert!(gesture(&mut disc, &[(150, 100), (105, 100)]).is_empty());
    }

    #[test]
    fn sector_keys_are_remapped() {
        let mut disc = disc(EngineFamily::Doom3Bfg);
        assert_eq!(gesture(&mut disc, &[(95, 40)]), vec![(true, 16), (false, 16)]);
    }
}

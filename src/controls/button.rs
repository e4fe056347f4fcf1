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

//! Push buttons.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    controls::{ControlElement, ElementKind, Rect, Touch, TouchAct, TouchContext, Visual},
    keycodes::LogicalKey,
};

/// Shape of a button's hit region.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonStyle {
    /// A circle inscribed in the button's width.
    #[default]
    Circle,
    /// The lower right triangle of the bounding box.
    RightBottom,
    /// The whole bounding box, half as tall as it is wide.
    Rect,
    /// The upper left triangle of the bounding box.
    LeftTop,
}

pub struct Button {
    label: String,
    cx: i32,
    cy: i32,
    width: i32,
    height: i32,
    key: i32,
    style: ButtonStyle,
    /// Toggle buttons latch their key down on one press and up on the next.
    toggle: bool,
    latched: bool,
    pressed: bool,
    last: (i32, i32),
    base_alpha: f32,
    alpha: f32,
}

impl Button {
    /// Creates a button sending the engine code `key`.
    ///
    /// # Arguments
    ///
    /// * `toggle` - Latch the key on alternate presses instead of holding it
    ///   only while touched.
    /// * `alpha` - Resting opacity in `0.0..=1.0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: impl Into<String>,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        key: i32,
        style: ButtonStyle,
        toggle: bool,
        alpha: f32,
    ) -> Self {
        Self {
            label: label.into(),
            cx,
            cy,
            width,
            height,
            key,
            style,
            toggle,
            latched: false,
            pressed: false,
            last: (cx, cy),
            base_alpha: alpha,
            alpha,
        }
    }

    pub fn key(&self) -> i32 {
        self.key
    }

    fn on_toggle(&mut self, act: TouchAct, ctx: &TouchContext<'_>) {
        if act != TouchAct::Press {
            return;
        }
        if self.latched {
            ctx.sink.send_key(false, self.key, 0);
            self.alpha = self.base_alpha;
        } else {
            ctx.sink.send_key(true, self.key, 0);
            self.alpha = (self.base_alpha * 2.0).min(1.0);
        }
        self.latched = !self.latched;
    }
}

impl ControlElement for Button {
    fn kind(&self) -> ElementKind {
        ElementKind::Button
    }

    fn bounds(&self) -> Rect {
        Rect::centered(self.cx, self.cy, self.width, self.height)
    }

    fn is_inside(&self, x: i32, y: i32) -> bool {
        match self.style {
            ButtonStyle::Circle => {
                let dx = self.cx - x;
                let dy = self.cy - y;
                4 * (dx * dx + dy * dy) <= self.width * self.width
            }
            ButtonStyle::RightBottom => {
                let dx = x - self.cx;
                let dy = self.cy - y;
                dy <= dx && 2 * dx.abs() < self.width && 2 * dy.abs() < self.height
            }
            ButtonStyle::Rect => {
                let dx = x - self.cx;
                let dy = self.cy - y;
                2 * dx.abs() < self.width && 2 * dy.abs() < self.height
            }
            ButtonStyle::LeftTop => {
                let dx = self.cx - x;
                let dy = y - self.cy;
                dy <= dx && 2 * dx.abs() < self.width && 2 * dy.abs() < self.height
            }
        }
    }

    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool> {
        if self.toggle {
            self.on_toggle(touch.act, ctx);
            return Ok(true);
        }

        let was_pressed = self.pressed;
        match touch.act {
            TouchAct::Press => {
                self.last = (touch.x, touch.y);
                self.pressed = true;
                ctx.sink.send_key(true, self.key, 0);
            }
            TouchAct::Release if self.pressed => {
                self.pressed = false;
                ctx.sink.send_key(false, self.key, 0);
            }
            _ => {}
        }

        // Fire doubles as an aim stick while held.
        if self.key == ctx.session.keymap().code(LogicalKey::Mouse1)
            && (was_pressed || self.pressed)
        {
            if ctx.session.in_game() {
                let (lx, ly) = self.last;
                ctx.sink
                    .send_motion((touch.x - lx) as f32, (touch.y - ly) as f32);
                self.last = (touch.x, touch.y);
            } else {
                ctx.sink.send_motion(0.0, 0.0);
            }
        }

        Ok(true)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn visual(&self) -> Visual {
        Visual {
            active: self.pressed || self.latched,
            ..Visual::idle(self.alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{InputEvent, testing::RecordingSink},
        keycodes::EngineFamily,
        session::{STATE_GAME, STATE_MENU, Session},
    };

    fn touch(x: i32, y: i32, act: TouchAct) -> Touch {
        Touch { x, y, act, slot: 0 }
    }

    fn in_game() -> Session {
        let session = Session::new(EngineFamily::Generic, true);
        session.set_state(STATE_GAME);
        session
    }

    #[test]
    fn hit_regions_follow_style() {
        let circle = Button::new("b", 100, 100, 40, 40, 32, ButtonStyle::Circle, false, 0.5);
        assert!(circle.is_inside(100, 100));
        assert!(circle.is_inside(120, 100));
        assert!(!circle.is_inside(118, 118));

        let rect = Button::new("b", 100, 100, 40, 20, 32, ButtonStyle::Rect, false, 0.5);
        assert!(rect.is_inside(118, 108));
        assert!(!rect.is_inside(100, 111));

        let right_bottom =
            Button::new("b", 100, 100, 40, 40, 32, ButtonStyle::RightBottom, false, 0.5);
        assert!(right_bottom.is_inside(110, 110));
        assert!(!right_bottom.is_inside(90, 90));

        let left_top = Button::new("b", 100, 100, 40, 40, 32, ButtonStyle::LeftTop, false, 0.5);
        assert!(left_top.is_inside(90, 90));
        assert!(!left_top.is_inside(110, 110));
    }

    #[test]
    fn press_and_release_send_key() {
        let sink = RecordingSink::default();
        let session = in_game();
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut button = Button::new("jump", 50, 50, 20, 20, 32, ButtonStyle::Circle, false, 0.5);

        button.on_touch(touch(50, 50, TouchAct::Press), &ctx).unwrap();
        button.on_touch(touch(52, 50, TouchAct::Motion), &ctx).unwrap();
        button.on_touch(touch(52, 50, TouchAct::Release), &ctx).unwrap();

        assert_eq!(sink.keys(), vec![(true, 32), (false, 32)]);
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let sink = RecordingSink::default();
        let session = in_game();
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut button = Button::new("jump", 50, 50, 20, 20, 32, ButtonStyle::Circle, false, 0.5);

        button.on_touch(touch(50, 50, TouchAct::Motion), &ctx).unwrap();
        button.on_touch(touch(50, 50, TouchAct::Release), &ctx).unwrap();

        assert!(sink.events().is_empty());
    }

    #[test]
    fn toggle_button_latches_on_alternate_presses() {
        let sink = RecordingSink::default();
        let session = in_game();
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut button = Button::new("crouch", 50, 50, 20, 20, 99, ButtonStyle::Circle, true, 0.4);

        button.on_touch(touch(50, 50, TouchAct::Press), &ctx).unwrap();
        button.on_touch(touch(50, 50, TouchAct::Release), &ctx).unwrap();
        assert_eq!(sink.keys(), vec![(true, 99)]);
        assert_eq!(button.visual().alpha, 0.8);

        button.on_touch(touch(50, 50, TouchAct::Press), &ctx).unwrap();
        assert_eq!(sink.keys(), vec![(true, 99), (false, 99)]);
        assert_eq!(button.visual().alpha, 0.4);
    }

    #[test]
    fn fire_button_aims_while_held_in_game() {
        let sink = RecordingSink::default();
        let session = in_game();
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut fire = Button::new("fire", 50, 50, 40, 40, 187, ButtonStyle::Circle, false, 0.5);

        fire.on_touch(touch(50, 50, TouchAct::Press), &ctx).unwrap();
        fire.on_touch(touch(55, 47, TouchAct::Motion), &ctx).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Key {
                    pressed: true,
                    code: 187,
                    char_code: 0,
                },
                InputEvent::Motion { dx: 0.0, dy: 0.0 },
                InputEvent::Motion { dx: 5.0, dy: -3.0 },
            ]
        );
    }

    #[test]
    fn fire_button_sends_no_aim_in_menus() {
        let sink = RecordingSink::default();
        let session = Session::new(EngineFamily::Generic, true);
        session.set_state(STATE_MENU);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut fire = Button::new("fire", 50, 50, 40, 40, 187, ButtonStyle::Circle, false, 0.5);

        fire.on_touch(touch(50, 50, TouchAct::Press), &ctx).unwrap();
        fire.on_touch(touch(60, 60, TouchAct::Motion), &ctx).unwrap();

        assert_eq!(sink.events()[2], InputEvent::Motion { dx: 0.0, dy: 0.0 });
    }
}

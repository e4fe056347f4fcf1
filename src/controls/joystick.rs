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

//! Virtual movement stick.
//!
//! In smooth mode the stick reports a continuous analog vector. Otherwise it
//! emulates four direction keys, eight-way while in game and four-way arrow
//! keys while a menu is up.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    controls::{ControlElement, ElementKind, Rect, Touch, TouchAct, TouchContext, Visual},
    keycodes::{KeyMap, LogicalKey},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct JoystickOptions {
    /// Re-centre the stick wherever the finger lands.
    pub unfixed: bool,
    /// Distance, as a multiple of the radius, beyond which a fixed stick lets
    /// go. Values below 1.0 disable it.
    pub release_range: f32,
    /// Radius of the dead zone as a fraction of the stick radius.
    pub dead_zone: f32,
}

pub struct Joystick {
    home: (i32, i32),
    cx: i32,
    cy: i32,
    size: i32,
    internal: f32,
    release_range_2: i32,
    dead_zone_2: i32,
    range: Rect,
    unfixed: bool,
    pressed: bool,
    /// Code sent for each direction currently held down, in up, right, down,
    /// left order.
    held: [Option<i32>; 4],
    direction_codes: [i32; 4],
    menu_codes: [i32; 4],
    dot: Option<(i32, i32)>,
    alpha: f32,
}

impl Joystick {
    pub fn new(
        cx: i32,
        cy: i32,
        radius: i32,
        alpha: f32,
        options: JoystickOptions,
        keymap: &KeyMap,
    ) -> Self {
        let size = radius * 2;

        let mut full_zone = if options.release_range >= 1.0 {
            (radius as f32 * options.release_range) as i32
        } else {
            0
        };
        if options.unfixed && full_zone < radius {
            full_zone = radius;
        }
        let mut dead_zone = if options.dead_zone > 0.0 {
            (radius as f32 * options.dead_zone.clamp(0.0, 1.0)) as i32
        } else {
            0
        };
        if dead_zone >= radius {
            dead_zone = 0;
        }

        let size_f = size as f32;
        Self {
            home: (cx, cy),
            cx,
            cy,
            size,
            internal: (size_f / 2.0 - size_f / 24.0) - size_f / 6.0,
            release_range_2: if full_zone >= radius { 4 * full_zone * full_zone } else { 0 },
            dead_zone_2: 4 * dead_zone * dead_zone,
            range: Rect::new(cx - full_zone, cy - full_zone, cx + full_zone, cy + full_zone),
            unfixed: options.unfixed,
            pressed: false,
            held: [None; 4],
            direction_codes: [
                keymap.code(LogicalKey::JUp),
                keymap.code(LogicalKey::JRight),
                keymap.code(LogicalKey::JDown),
                keymap.code(LogicalKey::JLeft),
            ],
            menu_codes: [
                keymap.code(LogicalKey::UpArrow),
                keymap.code(LogicalKey::RightArrow),
                keymap.code(LogicalKey::DownArrow),
                keymap.code(LogicalKey::LeftArrow),
            ],
            dot: None,
            alpha,
        }
    }

    fn outside_dead_zone(&self, dx: i32, dy: i32) -> bool {
        self.dead_zone_2 <= 0 || 4 * (dx * dx + dy * dy) >= self.dead_zone_2
    }

    fn outside_full_zone(&self, dx: i32, dy: i32) -> bool {
        self.release_range_2 > 0 && 4 * (dx * dx + dy * dy) > self.release_range_2
    }

    fn sector(base: f64, dx: i32, dy: i32) -> i32 {
        let angle = (base - 180.0 * ((-dy as f64).atan2(dx as f64) / PI)) as i32;
        if angle < 0 {
            angle + 360
        } else if angle >= 360 {
            angle - 360
        } else {
            angle
        }
    }

    fn steer(&mut self, dx: i32, dy: i32, ctx: &TouchContext<'_>) {
        if !ctx.session.in_game() {
            let sector = (Self::sector(135.0, dx, dy) / 90) as usize;
            let mut wanted = [false; 4];
            if self.outside_dead_zone(dx, dy) {
                wanted[sector.min(3)] = true;
            }
            self.dot = Some((dx, dy));
            self.set_directions(wanted, ctx);
            return;
        }

        if ctx.session.joystick_smooth() {
            let clamp = |v: f32| if v.abs() > 1.0 { v.signum() } else { v };
            let x = clamp(dx as f32 / self.internal);
            let y = clamp(-dy as f32 / self.internal);

            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            self.dot = if dist > self.internal {
                Some((
                    (dx as f32 * self.internal / dist) as i32,
                    (dy as f32 * self.internal / dist) as i32,
                ))
            } else {
                Some((dx, dy))
            };

            if self.outside_dead_zone(dx, dy) {
                ctx.sink.send_analog(true, x, y);
            } else {
                ctx.sink.send_analog(false, 0.0, 0.0);
            }
            return;
        }

        let sector = Self::sector(112.5, dx, dy) / 45;
        let wanted = if self.outside_dead_zone(dx, dy) {
            [
                sector % 7 < 2,
                sector > 0 && sector < 4,
                sector > 2 && sector < 6,
                sector > 4,
            ]
        } else {
            [false; 4]
        };
        self.dot = Some((dx, dy));
        self.set_directions(wanted, ctx);
    }

    // Sends only the direction keys whose state changes.
    fn set_directions(&mut self, wanted: [bool; 4], ctx: &TouchContext<'_>) {
        let codes = if ctx.session.in_game() {
            self.direction_codes
        } else {
            self.menu_codes
        };
        for (direction, want) in wanted.into_iter().enumerate() {
            match (self.held[direction], want) {
                (None, true) => {
                    ctx.sink.send_key(true, codes[direction], 0);
                    self.held[direction] = Some(codes[direction]);
                }
                (Some(code), false) => {
                    ctx.sink.send_key(false, code, 0);
                    self.held[direction] = None;
                }
                _ => {}
            }
        }
    }

    fn release(&mut self, ctx: &TouchContext<'_>) {
        self.pressed = false;
        if ctx.session.joystick_smooth() {
            ctx.sink.send_analog(false, 0.0, 0.0);
        }
        self.dot = None;
        self.set_directions([false; 4], ctx);
    }

    fn on_fixed(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> bool {
        let dx = touch.x - self.cx;
        let dy = touch.y - self.cy;
        let inside = !self.outside_full_zone(dx, dy);
        if touch.act == TouchAct::Press {
            self.pressed = true;
        }
        if inside && touch.act != TouchAct::Release {
            self.steer(dx, dy, ctx);
        } else {
            self.release(ctx);
        }
        inside
    }

    fn on_unfixed(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> bool {
        match touch.act {
            TouchAct::Press => {
                self.cx = touch.x;
                self.cy = touch.y;
                self.pressed = true;
            }
            TouchAct::Motion => self.steer(touch.x - self.cx, touch.y - self.cy, ctx),
            TouchAct::Release => {
                self.release(ctx);
                (self.cx, self.cy) = self.home;
            }
        }
        true
    }
}

impl ControlElement for Joystick {
    fn kind(&self) -> ElementKind {
        ElementKind::Joystick
    }

    fn bounds(&self) -> Rect {
        if self.unfixed {
            self.range
        } else {
            Rect::centered(self.home.0, self.home.1, self.size, self.size)
        }
    }

    fn is_inside(&self, x: i32, y: i32) -> bool {
        if self.unfixed {
            self.range.contains(x, y)
        } else {
            let dx = self.cx - x;
            let dy = self.cy - y;
            4 * (dx * dx + dy * dy) <= self.size * self.size
        }
    }

    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool> {
        Ok(if self.unfixed {
            self.on_unfixed(touch, ctx)
        } else {
            self.on_fixed(touch, ctx)
        })
    }

    fn supports_multi_touch(&self) -> bool {
        true
    }

    fn label(&self) -> &str {
        "MOVE"
    }

    fn visual(&self) -> Visual {
        Visual {
            active: self.pressed,
            offset: self.dot,
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

    const J_UP: i32 = -133;
    const J_RIGHT: i32 = -100;

    fn touch(x: i32, y: i32, act: TouchAct) -> Touch {
        Touch { x, y, act, slot: 0 }
    }

    fn session(smooth: bool, state: u32) -> Session {
        let session = Session::new(EngineFamily::Generic, smooth);
        session.set_state(state);
        session
    }

    fn stick(options: JoystickOptions) -> Joystick {
        // Radius 60, so the analog range is 35.
        Joystick::new(100, 100, 60, 1.0, options, &KeyMap::select(EngineFamily::Generic))
    }

    #[test]
    fn smooth_stick_reports_clamped_analog() {
        let sink = RecordingSink::default();
        let session = session(true, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions::default());

        joystick.on_touch(touch(135, 100, TouchAct::Press), &ctx).unwrap();
        joystick.on_touch(touch(100, 30, TouchAct::Motion), &ctx).unwrap();
        joystick.on_touch(touch(100, 30, TouchAct::Release), &ctx).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Analog {
                    enabled: true,
                    x: 1.0,
                    y: 0.0,
                },
                InputEvent::Analog {
                    enabled: true,
                    x: 0.0,
                    y: 1.0,
                },
                InputEvent::Analog {
                    enabled: false,
                    x: 0.0,
                    y: 0.0,
                },
            ]
        );
    }

    #[test]
    fn dead_zone_disables_analog() {
        let sink = RecordingSink::default();
        let session = session(true, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions {
            dead_zone: 0.5,
            ..JoystickOptions::default()
        });

        joystick.on_touch(touch(110, 100, TouchAct::Press), &ctx).unwrap();

        assert_eq!(
            sink.events(),
            vec![InputEvent::Analog {
                enabled: false,
                x: 0.0,
                y: 0.0,
            }]
        );
    }

    #[test]
    fn key_stick_sends_transitions_only() {
        let sink = RecordingSink::default();
        let session = session(false, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions::default());

        joystick.on_touch(touch(100, 70, TouchAct::Press), &ctx).unwrap();
        joystick.on_touch(touch(100, 60, TouchAct::Motion), &ctx).unwrap();
        joystick.on_touch(touch(120, 80, TouchAct::Motion), &ctx).unwrap();
        joystick.on_touch(touch(120, 80, TouchAct::Release), &ctx).unwrap();

        assert_eq!(
            sink.keys(),
            vec![(true, J_UP), (true, J_RIGHT), (false, J_UP), (false, J_RIGHT)]
        );
    }

    #[test]
    fn menu_uses_arrow_keys() {
        let sink = RecordingSink::default();
        let session = session(true, STATE_MENU);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions::default());

        joystick.on_touch(touch(140, 100, TouchAct::Press), &ctx).unwrap();
        joystick.on_touch(touch(140, 100, TouchAct::Release), &ctx).unwrap();

        // Release also clears the analog state in smooth mode.
        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Key {
                    pressed: true,
                    code: 136,
                    char_code: 0,
                },
                InputEvent::Analog {
                    enabled: false,
                    x: 0.0,
                    y: 0.0,
                },
                InputEvent::Key {
                    pressed: false,
                    code: 136,
                    char_code: 0,
                },
            ]
        );
    }

    #[test]
    fn smoothing_follows_the_session_at_runtime() {
        let sink = RecordingSink::default();
        let session = session(true, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions::default());

        joystick.on_touch(touch(135, 100, TouchAct::Press), &ctx).unwrap();
        joystick.on_touch(touch(135, 100, TouchAct::Release), &ctx).unwrap();

        session.set_joystick_smooth(false);
        joystick.on_touch(touch(100, 70, TouchAct::Press), &ctx).unwrap();
        joystick.on_touch(touch(100, 70, TouchAct::Release), &ctx).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Analog {
                    enabled: true,
                    x: 1.0,
                    y: 0.0,
                },
                InputEvent::Analog {
                    enabled: false,
                    x: 0.0,
                    y: 0.0,
                },
                InputEvent::Key {
                    pressed: true,
                    code: J_UP,
                    char_code: 0,
                },
                InputEvent::Key {
                    pressed: false,
                    code: J_UP,
                    char_code: 0,
                },
            ]
        );
    }

    #[test]
    fn fixed_stick_lets_go_outside_full_zone() {
        let sink = RecordingSink::default();
        let session = session(false, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions {
            release_range: 1.5,
            ..JoystickOptions::default()
        });

        assert!(joystick.on_touch(touch(100, 60, TouchAct::Press), &ctx).unwrap());
        assert!(!joystick.on_touch(touch(100, 0, TouchAct::Motion), &ctx).unwrap());
        assert_eq!(sink.keys(), vec![(true, J_UP), (false, J_UP)]);
    }

    #[test]
    fn unfixed_stick_recentres_on_press() {
        let sink = RecordingSink::default();
        let session = session(false, STATE_GAME);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut joystick = stick(JoystickOptions {
            unfixed: true,
            ..JoystickOptions::default()
        });

        assert!(joystick.is_inside(150, 150));
        joystick.on_touch(touch(150, 150, TouchAct::Press), &ctx).unwrap();
        assert!(sink.events().is_empty());

        joystick.on_touch(touch(150, 120, TouchAct::Motion), &ctx).unwrap();
        assert_eq!(sink.keys(), vec![(true, J_UP)]);
    }
}

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

//! Free look area.

use crate::{
    Result,
    controls::{ControlElement, ElementKind, Rect, Touch, TouchAct, TouchContext, Visual},
    keycodes::LogicalKey,
    touch::MAX_FINGERS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotRole {
    Idle,
    /// Dragging the view, last known position.
    Look(i32, i32),
    /// Holding primary fire for a two finger tap.
    Fire,
}

/// Catch-all element behind every other control. Dragging anywhere on
/// otherwise empty screen turns the view.
pub struct PointerPad {
    screen: Rect,
    two_finger_lmb: bool,
    slots: [SlotRole; MAX_FINGERS],
}

impl PointerPad {
    /// # Arguments
    ///
    /// * `two_finger_lmb` - A second finger landing while another is already
    ///   dragging holds primary fire until it lifts.
    pub fn new(screen: Rect, two_finger_lmb: bool) -> Self {
        Self {
            screen,
            two_finger_lmb,
            slots: [SlotRole::Idle; MAX_FINGERS],
        }
    }

    fn looking(&self) -> bool {
        self.slots.iter().any(|s| matches!(s, SlotRole::Look(..)))
    }
}

impl ControlElement for PointerPad {
    fn kind(&self) -> ElementKind {
        ElementKind::PointerPad
    }

    fn bounds(&self) -> Rect {
        self.screen
    }

    fn is_inside(&self, _x: i32, _y: i32) -> bool {
        true
    }

    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool> {
        let Some(role) = self.slots.get(touch.slot).copied() else {
            return Ok(false);
        };
        let fire = ctx.session.keymap().code(LogicalKey::Mouse1);

        match (touch.act, role) {
            (TouchAct::Press, _) => {
                if self.two_finger_lmb && self.looking() {
                    ctx.sink.send_key(true, fire, 0);
                    self.slots[touch.slot] = SlotRole::Fire;
                } else {
                    self.slots[touch.slot] = SlotRole::Look(touch.x, touch.y);
                }
            }
            (TouchAct::Motion, SlotRole::Look(lx, ly)) => {
                let (dx, dy) = (touch.x - lx, touch.y - ly);
                if dx != 0 || dy != 0 {
                    ctx.sink.send_motion(dx as f32, dy as f32);
                }
                self.slots[touch.slot] = SlotRole::Look(touch.x, touch.y);
            }
            (TouchAct::Release, SlotRole::Fire) => {
                ctx.sink.send_key(false, fire, 0);
                self.slots[touch.slot] = SlotRole::Idle;
            }
            (TouchAct::Release, _) => self.slots[touch.slot] = SlotRole::Idle,
            (TouchAct::Motion, _) => {}
        }
        Ok(true)
    }

    fn supports_multi_touch(&self) -> bool {
        true
    }

    fn label(&self) -> &str {
        "LOOK"
    }

    fn visual(&self) -> Visual {
        Visual {
            active: self.slots.iter().any(|s| *s != SlotRole::Idle),
            ..Visual::idle(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{InputEvent, testing::RecordingSink},
        keycodes::EngineFamily,
        session::Session,
    };

    fn touch(slot: usize, x: i32, y: i32, act: TouchAct) -> Touch {
        Touch { x, y, act, slot }
    }

    #[test]
    fn drag_sends_deltas() {
        let sink = RecordingSink::default();
        let session = Session::new(EngineFamily::Generic, false);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut pad = PointerPad::new(Rect::new(0, 0, 800, 480), false);

        pad.on_touch(touch(0, 100, 100, TouchAct::Press), &ctx).unwrap();
        pad.on_touch(touch(0, 110, 95, TouchAct::Motion), &ctx).unwrap();
        pad.on_touch(touch(0, 110, 95, TouchAct::Motion), &ctx).unwrap();
        pad.on_touch(touch(0, 108, 95, TouchAct::Motion), &ctx).unwrap();
        pad.on_touch(touch(0, 108, 95, TouchAct::Release), &ctx).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Motion { dx: 10.0, dy: -5.0 },
                InputEvent::Motion { dx: -2.0, dy: 0.0 },
            ]
        );
        assert!(!pad.visual().active);
    }

    #[test]
    fn second_finger_holds_fire() {
        let sink = RecordingSink::default();
        let session = Session::new(EngineFamily::Generic, false);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut pad = PointerPad::new(Rect::new(0, 0, 800, 480), true);

        pad.on_touch(touch(0, 100, 100, TouchAct::Press), &ctx).unwrap();
        pad.on_touch(touch(1, 300, 300, TouchAct::Press), &ctx).unwrap();
        pad.on_touch(touch(1, 320, 300, TouchAct::Motion), &ctx).unwrap();
        pad.on_touch(touch(1, 320, 300, TouchAct::Release), &ctx).unwrap();

        assert_eq!(sink.keys(), vec![(true, 187), (false, 187)]);
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn second_finger_looks_without_two_finger_fire() {
        let sink = RecordingSink::default();
        let session = Session::new(EngineFamily::Generic, false);
        let ctx = TouchContext {
            sink: &sink,
            session: &session,
        };
        let mut pad = PointerPad::new(Rect::new(0, 0, 800, 480), false);

        pad.on_touch(touch(0, 100, 100, TouchAct::Press), &ctx).unwrap();
        pad.on_touch(touch(1, 300, 300, TouchAct::Press), &ctx).unwrap();
        pad.on_touch(touch(1, 303, 300, TouchAct::Motion), &ctx).unwrap();

        assert!(sink.keys().is_empty());
        assert_eq!(sink.events(), vec![InputEvent::Motion { dx: 3.0, dy: 0.0 }]);
    }
}

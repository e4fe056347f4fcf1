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

//! Terminal mouse buttons as fingers.
//!
//! The left button drives finger 0 and the right button finger 1, so two
//! finger gestures can be tried from a desktop.

use crossterm::event::{MouseButton, MouseEventKind};
use hudbridge::touch::{Pointer, TouchAction, TouchFrame};

const FINGERS: usize = 2;

#[derive(Debug, Default)]
pub(crate) struct MouseFingers {
    down: [Option<(i32, i32)>; FINGERS],
}

impl MouseFingers {
    /// Turns a terminal mouse event at pixel (`x`, `y`) into a touch frame.
    ///
    /// Returns `None` for events that involve no finger.
    pub(crate) fn on_mouse(&mut self, kind: MouseEventKind, x: i32, y: i32) -> Option<TouchFrame> {
        let (finger, action) = match kind {
            MouseEventKind::Down(button) => {
                let finger = Self::finger(button)?;
                if self.down[finger].is_some() {
                    return None;
                }
                let action = if self.any_down() {
                    TouchAction::PointerDown
                } else {
                    TouchAction::Down
                };
                self.down[finger] = Some((x, y));
                (finger, action)
            }
            MouseEventKind::Drag(button) => {
                let finger = Self::finger(button)?;
                let at = self.down[finger].as_mut()?;
                *at = (x, y);
                (finger, TouchAction::Move)
            }
            MouseEventKind::Up(button) => {
                let finger = Self::finger(button)?;
                if self.down[finger].is_none() {
                    return None;
                }
                self.down[finger] = Some((x, y));
                let others = self.down.iter().filter(|d| d.is_some()).count() > 1;
                (finger, if others { TouchAction::PointerUp } else { TouchAction::Up })
            }
            _ => return None,
        };

        let frame = self.frame(finger, action);
        if matches!(action, TouchAction::Up | TouchAction::PointerUp) {
            self.down[finger] = None;
        }
        Some(frame)
    }

    /// Lifts every finger, as when focus is lost mid-gesture.
    pub(crate) fn cancel(&mut self) -> Option<TouchFrame> {
        if !self.any_down() {
            return None;
        }
        let frame = self.frame(0, TouchAction::Cancel);
        self.down = [None; FINGERS];
        Some(frame)
    }

    fn any_down(&self) -> bool {
        self.down.iter().any(Option::is_some)
    }

    fn finger(button: MouseButton) -> Option<usize> {
        match button {
            MouseButton::Left => Some(0),
            MouseButton::Right => Some(1),
            MouseButton::Middle => None,
        }
    }

    fn frame(&self, finger: usize, action: TouchAction) -> TouchFrame {
        let pointers: Vec<Pointer> = self
            .down
            .iter()
            .enumerate()
            .filter_map(|(id, at)| at.map(|(x, y)| (id as i32, x, y)))
            .map(|(id, x, y)| Pointer { id, x, y })
            .collect();
        let action_pointer = pointers
            .iter()
            .position(|p| p.id == finger as i32)
            .unwrap_or(0);
        TouchFrame {
            action,
            action_pointer,
            pointers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(id: i32, x: i32, y: i32) -> Pointer {
        Pointer { id, x, y }
    }

    #[test]
    fn buttons_map_to_fingers() {
        let mut fingers = MouseFingers::default();

        let down = fingers.on_mouse(MouseEventKind::Down(MouseButton::Left), 10, 20).unwrap();
        assert_eq!(down.action, TouchAction::Down);
        assert_eq!(down.pointers, vec![pointer(0, 10, 20)]);

        let second = fingers.on_mouse(MouseEventKind::Down(MouseButton::Right), 50, 60).unwrap();
        assert_eq!(second.action, TouchAction::PointerDown);
        assert_eq!(second.acting(), Some(&pointer(1, 50, 60)));
        assert_eq!(second.pointers.len(), 2);

        let lift = fingers.on_mouse(MouseEventKind::Up(MouseButton::Left), 12, 20).unwrap();
        assert_eq!(lift.action, TouchAction::PointerUp);
        assert_eq!(lift.acting(), Some(&pointer(0, 12, 20)));

        let last = fingers.on_mouse(MouseEventKind::Up(MouseButton::Right), 50, 60).unwrap();
        assert_eq!(last.action, TouchAction::Up);
        assert_eq!(last.pointers, vec![pointer(1, 50, 60)]);
    }

    #[test]
    fn drags_without_a_press_are_ignored() {
        let mut fingers = MouseFingers::default();
        assert!(fingers.on_mouse(MouseEventKind::Drag(MouseButton::Left), 1, 1).is_none());
        assert!(fingers.on_mouse(MouseEventKind::Up(MouseButton::Left), 1, 1).is_none());
        assert!(fingers.on_mouse(MouseEventKind::Moved, 1, 1).is_none());
        assert!(fingers.cancel().is_none());
    }

    #[test]
    fn cancel_lifts_everything() {
        let mut fingers = MouseFingers::default();
        fingers.on_mouse(MouseEventKind::Down(MouseButton::Left), 1, 1);
        fingers.on_mouse(MouseEventKind::Drag(MouseButton::Left), 3, 4);

        let cancel = fingers.cancel().unwrap();
        assert_eq!(cancel.action, TouchAction::Cancel);
        assert_eq!(cancel.pointers, vec![Pointer { id: 0, x: 3, y: 4 }]);
        assert!(fingers.cancel().is_none());
    }
}

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

//! Mouse and touchpad input.
//!
//! Uncaptured, the mouse is a hover pointer and its movement is turned into
//! look motion from absolute positions. Captured, the platform hands over
//! either relative movement or, for touchpads, absolute positions that are
//! differenced here.

use log::debug;

use crate::{
    bridge::InputSink,
    keycodes::{KeyMap, LogicalKey},
};

/// Marks the last position as unknown so the next sample sends no jump.
const NO_POSITION: f32 = -1.0;

/// Platform pointer capture.
pub trait PointerCapture {
    fn request_capture(&mut self);
    fn release_capture(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scroll {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CaptureRequest {
    Grab,
    Ungrab,
}

pub struct MouseAdapter<C: PointerCapture> {
    capture: C,
    focused: bool,
    captured: bool,
    /// Request made while the window was unfocused.
    pending: Option<CaptureRequest>,
    last: (f32, f32),
    buttons: [i32; 3],
    wheel_up: i32,
    wheel_down: i32,
}

impl<C: PointerCapture> MouseAdapter<C> {
    pub fn new(capture: C, keymap: &KeyMap) -> Self {
        Self {
            capture,
            focused: false,
            captured: false,
            pending: None,
            last: (NO_POSITION, NO_POSITION),
            buttons: [
                keymap.code(LogicalKey::Mouse1),
                keymap.code(LogicalKey::Mouse2),
                keymap.code(LogicalKey::Mouse3),
            ],
            wheel_up: keymap.code(LogicalKey::MWheelUp),
            wheel_down: keymap.code(LogicalKey::MWheelDown),
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Requests pointer capture, or defers it until focus returns.
    pub fn grab(&mut self) {
        if self.focused {
            self.apply(CaptureRequest::Grab);
        } else {
            debug!("Window unfocused, deferring pointer capture");
            self.pending = Some(CaptureRequest::Grab);
        }
    }

    /// Releases pointer capture, or defers it until focus returns.
    pub fn ungrab(&mut self) {
        if self.focused {
            self.apply(CaptureRequest::Ungrab);
        } else {
            debug!("Window unfocused, deferring pointer release");
            self.pending = Some(CaptureRequest::Ungrab);
        }
    }

    /// Tracks window focus. A deferred request is replayed once on focus gain.
    pub fn on_focus_changed(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            return;
        }
        if let Some(request) = self.pending.take() {
            debug!("Replaying deferred {request:?}");
            self.apply(request);
        }
    }

    /// The platform took capture away.
    pub fn on_capture_lost(&mut self) {
        self.captured = false;
        self.last = (NO_POSITION, NO_POSITION);
    }

    /// Uncaptured pointer movement at an absolute position.
    pub fn on_hover(&mut self, x: f32, y: f32, sink: &dyn InputSink) {
        self.difference(x, y, sink);
    }

    /// Captured relative movement.
    pub fn on_relative(&mut self, dx: f32, dy: f32, sink: &dyn InputSink) {
        if dx != 0.0 || dy != 0.0 {
            sink.send_motion(dx, dy);
        }
    }

    /// Captured touchpad movement.
    ///
    /// Touchpads that report a relative axis pass it in `relative`; the rest
    /// are differenced from their absolute positions.
    pub fn on_touchpad(
        &mut self,
        x: f32,
        y: f32,
        relative: Option<(f32, f32)>,
        sink: &dyn InputSink,
    ) {
        match relative {
            Some((dx, dy)) => self.on_relative(dx, dy, sink),
            None => self.difference(x, y, sink),
        }
    }

    /// A touchpad finger landed or lifted.
    pub fn on_touchpad_contact(&mut self, x: f32, y: f32, down: bool) {
        self.last = if down { (x, y) } else { (NO_POSITION, NO_POSITION) };
    }

    pub fn on_button(&mut self, button: MouseButton, pressed: bool, sink: &dyn InputSink) {
        let code = match button {
            MouseButton::Primary => self.buttons[0],
            MouseButton::Secondary => self.buttons[1],
            MouseButton::Tertiary => self.buttons[2],
        };
        sink.send_key(pressed, code, 0);
        if !pressed {
            self.last = (NO_POSITION, NO_POSITION);
        }
    }

    pub fn on_scroll(&mut self, scroll: Scroll, sink: &dyn InputSink) {
        sink.send_key_tap(match scroll {
            Scroll::Up => self.wheel_up,
            Scroll::Down => self.wheel_down,
        });
    }

    fn difference(&mut self, x: f32, y: f32, sink: &dyn InputSink) {
        let (lx, ly) = self.last;
        self.last = (x, y);
        if lx < 0.0 || ly < 0.0 {
            return;
        }
        let (dx, dy) = (x - lx, y - ly);
        if dx != 0.0 || dy != 0.0 {
            sink.send_motion(dx, dy);
        }
    }

    fn apply(&mut self, request: CaptureRequest) {
        match request {
            CaptureRequest::Grab => {
                self.capture.request_capture();
                self.captured = true;
            }
            CaptureRequest::Ungrab => {
                self.capture.release_capture();
                self.captured = false;
            }
        }
        self.last = (NO_POSITION, NO_POSITION);
    }
}

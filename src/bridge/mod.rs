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

//! Cross-thread input event bridge.
//!
//! The native engine's input ingestion is not thread-safe, so nothing on the
//! UI thread calls into it directly. Producers describe what happened as an
//! [`InputEvent`] through the [`InputSink`] primitives, the events are queued
//! in an [`EventQueue`], and the native simulation thread replays them into a
//! [`NativeInput`] once per tick.

mod queue;

pub use queue::EventQueue;

/// A single input event, carried as plain data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key {
        pressed: bool,
        code: i32,
        char_code: i32,
    },
    Motion {
        dx: f32,
        dy: f32,
    },
    Analog {
        enabled: bool,
        x: f32,
        y: f32,
    },
}

impl InputEvent {
    /// Replays this event into the engine.
    pub fn dispatch(self, native: &mut dyn NativeInput) {
        match self {
            InputEvent::Key {
                pressed,
                code,
                char_code,
            } => native.push_key(pressed, code, char_code),
            InputEvent::Motion { dx, dy } => native.push_motion(dx, dy),
            InputEvent::Analog { enabled, x, y } => native.push_analog(enabled, x, y),
        }
    }
}

/// The engine's input ingestion surface.
///
/// Only ever called from the native simulation thread.
pub trait NativeInput {
    fn push_key(&mut self, pressed: bool, code: i32, char_code: i32);
    fn push_motion(&mut self, dx: f32, dy: f32);
    fn push_analog(&mut self, enabled: bool, x: f32, y: f32);
}

/// Producer side primitives shared by every input source.
///
/// Implementations must not block.
pub trait InputSink {
    fn send_key(&self, pressed: bool, code: i32, char_code: i32);
    fn send_motion(&self, dx: f32, dy: f32);
    fn send_analog(&self, enabled: bool, x: f32, y: f32);

    /// Sends a press immediately followed by a release of `code`.
    fn send_key_tap(&self, code: i32) {
        self.send_key(true, code, 0);
        self.send_key(false, code, 0);
    }
}

impl InputSink for EventQueue {
    fn send_key(&self, pressed: bool, code: i32, char_code: i32) {
        self.push(InputEvent::Key {
            pressed,
            code,
            char_code,
        });
    }

    fn send_motion(&self, dx: f32, dy: f32) {
        self.push(InputEvent::Motion { dx, dy });
    }

    fn send_analog(&self, enabled: bool, x: f32, y: f32) {
        self.push(InputEvent::Analog { enabled, x, y });
    }
}

/// Test doubles for the bridge traits, shared by the other modules' tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::{InputEvent, InputSink, NativeInput};

    /// Records every event it is handed, in order.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        events: Mutex<Vec<InputEvent>>,
    }

    impl RecordingSink {
        pub(crate) fn events(&self) -> Vec<InputEvent> {
            self.events.lock().unwrap().clone()
        }

        pub(crate) fn take(&self) -> Vec<InputEvent> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }

        pub(crate) fn keys(&self) -> Vec<(bool, i32)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    InputEvent::Key { pressed, code, .. } => Some((pressed, code)),
                    _ => None,
                })
                .collect()
        }
    }

    impl InputSink for RecordingSink {
        fn send_key(&self, pressed: bool, code: i32, char_code: i32) {
            self.events.lock().unwrap().push(InputEvent::Key {
                pressed,
                code,
                char_code,
            });
        }

        fn send_motion(&self, dx: f32, dy: f32) {
            self.events.lock().unwrap().push(InputEvent::Motion { dx, dy });
        }

        fn send_analog(&self, enabled: bool, x: f32, y: f32) {
            self.events
                .lock()
                .unwrap()
                .push(InputEvent::Analog { enabled, x, y });
        }
    }

    /// A native engine stand-in that records what it ingested.
    #[derive(Default)]
    pub(crate) struct RecordingNative {
        pub(crate) events: Vec<InputEvent>,
    }

    impl NativeInput for RecordingNative {
        fn push_key(&mut self, pressed: bool, code: i32, char_code: i32) {
            self.events.push(InputEvent::Key {
                pressed,
                code,
                char_code,
            });
        }

        fn push_motion(&mut self, dx: f32, dy: f32) {
            self.events.push(InputEvent::Motion { dx, dy });
        }

        fn push_analog(&mut self, enabled: bool, x: f32, y: f32) {
            self.events.push(InputEvent::Analog { enabled, x, y });
        }
    }
}

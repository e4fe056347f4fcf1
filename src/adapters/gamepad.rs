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

//! Gamepad sticks.
//!
//! The left stick drives the movement analog. The right stick is latched and
//! integrated into look motion once per rendered frame, so look speed does
//! not depend on how often the pad reports.

use std::time::Instant;

use crate::bridge::InputSink;

/// Longest frame gap integrated into look motion, in milliseconds.
const MAX_FRAME_MS: u128 = 1000;

/// Minimum stick deflection that counts as movement.
const ANALOG_THRESHOLD: f32 = 0.01;

/// One axis value with the device's flat range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisReading {
    pub value: f32,
    pub flat: f32,
}

impl AxisReading {
    pub fn new(value: f32, flat: f32) -> Self {
        Self { value, flat }
    }

    /// The value, or zero inside the flat range.
    pub fn centered(self) -> f32 {
        if self.value.abs() > self.flat {
            self.value
        } else {
            0.0
        }
    }
}

/// A report of both sticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StickAxes {
    pub x: AxisReading,
    pub y: AxisReading,
    pub z: AxisReading,
    pub rz: AxisReading,
}

#[derive(Debug, Default)]
pub struct GamepadAdapter {
    look: (f32, f32),
    last_frame: Option<Instant>,
}

impl GamepadAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a stick report.
    pub fn on_axes(&mut self, axes: StickAxes, sink: &dyn InputSink) {
        let x = axes.x.centered();
        let y = axes.y.centered();
        let enabled = x.abs() > ANALOG_THRESHOLD || y.abs() > ANALOG_THRESHOLD;
        sink.send_analog(enabled, x, -y);

        self.look = (axes.z.centered(), axes.rz.centered());
    }

    /// Integrates the latched right stick over the time since the last frame.
    pub fn on_frame(&mut self, now: Instant, sink: &dyn InputSink) {
        let Some(last) = self.last_frame.replace(now) else {
            return;
        };
        let elapsed = now.saturating_duration_since(last).as_millis().min(MAX_FRAME_MS) as f32;

        let (lx, ly) = self.look;
        if lx != 0.0 || ly != 0.0 {
            sink.send_motion(elapsed * lx, elapsed * ly);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::bridge::{InputEvent, testing::RecordingSink};

    fn axes(x: f32, y: f32, z: f32, rz: f32) -> StickAxes {
        let flat = 0.1;
        StickAxes {
            x: AxisReading::new(x, flat),
            y: AxisReading::new(y, flat),
            z: AxisReading::new(z, flat),
            rz: AxisReading::new(rz, flat),
        }
    }

    #[test]
    fn flat_range_reads_as_centred() {
        assert_eq!(AxisReading::new(0.08, 0.1).centered(), 0.0);
        assert_eq!(AxisReading::new(-0.1, 0.1).centered(), 0.0);
        assert_eq!(AxisReading::new(-0.5, 0.1).centered(), -0.5);
    }

    #[test]
    fn left_stick_sends_analog_with_y_up() {
        let sink = RecordingSink::default();
        let mut pad = GamepadAdapter::new();

        pad.on_axes(axes(0.5, 0.25, 0.0, 0.0), &sink);
        pad.on_axes(axes(0.05, 0.0, 0.0, 0.0), &sink);

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Analog {
                    enabled: true,
                    x: 0.5,
                    y: -0.25,
                },
                InputEvent::Analog {
                    enabled: false,
                    x: 0.0,
                    y: -0.0,
                },
            ]
        );
    }

    #[test]
    fn right_stick_integrates_per_frame() {
        let sink = RecordingSink::default();
        let mut pad = GamepadAdapter::new();
        let start = Instant::now();

        pad.on_axes(axes(0.0, 0.0, 0.5, -0.25), &sink);
        sink.take();

        pad.on_frame(start, &sink);
        pad.on_frame(start + Duration::from_millis(16), &sink);
        pad.on_frame(start + Duration::from_secs(5), &sink);

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Motion { dx: 8.0, dy: -4.0 },
                InputEvent::Motion {
                    dx: 500.0,
                    dy: -250.0,
                },
            ]
        );
    }

    #[test]
    fn centred_right_stick_is_quiet() {
        let sink = RecordingSink::default();
        let mut pad = GamepadAdapter::new();
        let start = Instant::now();

        pad.on_frame(start, &sink);
        pad.on_frame(start + Duration::from_millis(16), &sink);
        assert!(sink.events().is_empty());
    }
}

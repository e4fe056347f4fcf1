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

//! Gyroscope look.

use crate::{bridge::InputSink, session::Session};

pub const DEFAULT_GYRO_SENSITIVITY: f32 = 18.0;

/// Display rotation relative to the sensor frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Normal,
    /// Landscape flipped by 180 degrees.
    Inverted,
}

/// Turns angular rate samples into look motion.
///
/// Samples are dropped while suspended and whenever the engine is not in game
/// or is loading, so menus do not drift.
#[derive(Debug)]
pub struct GyroAdapter {
    x_sens: f32,
    y_sens: f32,
    rotation: Rotation,
    active: bool,
}

impl GyroAdapter {
    pub fn new(x_sens: f32, y_sens: f32) -> Self {
        Self {
            x_sens,
            y_sens,
            rotation: Rotation::Normal,
            active: true,
        }
    }

    pub fn set_sensitivity(&mut self, x_sens: f32, y_sens: f32) {
        self.x_sens = x_sens;
        self.y_sens = y_sens;
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn suspend(&mut self) {
        self.active = false;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Handles one sample of angular rate around the sensor's x and y axes.
    pub fn on_sample(&self, x: f32, y: f32, session: &Session, sink: &dyn InputSink) {
        if !self.active || !session.in_game() || session.in_loading() {
            return;
        }

        let (x, y) = match self.rotation {
            Rotation::Normal => (x, y),
            Rotation::Inverted => (-x, -y),
        };
        if x != 0.0 || y != 0.0 {
            sink.send_motion(-x * self.x_sens, y * self.y_sens);
        }
    }
}

impl Default for GyroAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_GYRO_SENSITIVITY, DEFAULT_GYRO_SENSITIVITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{InputEvent, testing::RecordingSink},
        keycodes::EngineFamily,
        session::{STATE_GAME, STATE_LOADING, STATE_MENU},
    };

    fn playing() -> Session {
        let session = Session::new(EngineFamily::Generic, false);
        session.set_state(STATE_GAME);
        session
    }

    #[test]
    fn samples_scale_and_flip_with_rotation() {
        let sink = RecordingSink::default();
        let session = playing();
        let mut gyro = GyroAdapter::new(2.0, 3.0);

        gyro.on_sample(1.0, 0.5, &session, &sink);
        gyro.set_rotation(Rotation::Inverted);
        gyro.on_sample(1.0, 0.5, &session, &sink);

        assert_eq!(
            sink.events(),
            vec![
                InputEvent::Motion { dx: -2.0, dy: 1.5 },
                InputEvent::Motion { dx: 2.0, dy: -1.5 },
            ]
        );
    }

    #[test]
    fn menus_and_loading_suppress_samples() {
        let sink = RecordingSink::default();
        let gyro = GyroAdapter::default();

        // Loading until the engine reports otherwise.
        let session = Session::new(EngineFamily::Generic, false);
        gyro.on_sample(1.0, 1.0, &session, &sink);

        session.set_state(STATE_MENU);
        gyro.on_sample(1.0, 1.0, &session, &sink);

        session.set_state(STATE_GAME | STATE_LOADING);
        gyro.on_sample(1.0, 1.0, &session, &sink);

        assert!(sink.events().is_empty());
    }

    #[test]
    fn suspended_gyro_is_silent() {
        let sink = RecordingSink::default();
        let session = playing();
        let mut gyro = GyroAdapter::default();

        gyro.suspend();
        gyro.on_sample(1.0, 1.0, &session, &sink);
        assert!(sink.events().is_empty());

        gyro.activate();
        gyro.on_sample(1.0, 1.0, &session, &sink);
        assert_eq!(
            sink.events(),
            vec![InputEvent::Motion {
                dx: -18.0,
                dy: 18.0,
            }]
        );
    }
}

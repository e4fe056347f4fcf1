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

//! Application configuration.
//!
//! This module manages the application configuration file: the engine family,
//! control tuning and the on-screen layout table.

use serde::{Deserialize, Serialize};

use crate::{
    adapters::DEFAULT_GYRO_SENSITIVITY,
    controls::{
        JoystickOptions,
        layout::{ControlSpec, DEFAULT_DISC_KEYS, LayoutOptions, parse_disc_keys},
    },
    keycodes::EngineFamily,
};

const CONFIG_NAME: &str = "hudbridge";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HudConfig {
    pub version: u32,
    pub engine_family: EngineFamily,
    /// Hide the on-screen controls. The look pad stays active.
    pub hide_onscreen: bool,
    /// A second finger on the look pad holds primary fire.
    pub two_finger_lmb: bool,
    /// Analog stick instead of direction keys.
    pub joystick_smooth: bool,
    pub joystick_unfixed: bool,
    pub joystick_release_range: f32,
    pub joystick_dead_zone: f32,
    pub gyro_enabled: bool,
    pub gyro_x_sens: f32,
    pub gyro_y_sens: f32,
    pub map_volume_keys: bool,
    /// Capture the mouse for relative look.
    pub mouse_capture: bool,
    /// Audio buffer size requested on behalf of the engine, in bytes.
    pub audio_buffer_hint: usize,
    /// Comma separated weapon keys for the disc.
    pub disc_keys: String,
    /// On-screen layout. Empty means the stock layout for the screen size.
    pub layout: Vec<ControlSpec>,
}

impl HudConfig {
    /// Options for building the layout's elements.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            joystick: JoystickOptions {
                unfixed: self.joystick_unfixed,
                release_range: self.joystick_release_range,
                dead_zone: self.joystick_dead_zone,
            },
            disc_keys: parse_disc_keys(&self.disc_keys),
        }
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            version: 1,
            engine_family: EngineFamily::default(),
            hide_onscreen: false,
            two_finger_lmb: false,
            joystick_smooth: true,
            joystick_unfixed: false,
            joystick_release_range: 0.0,
            joystick_dead_zone: 0.0,
            gyro_enabled: false,
            gyro_x_sens: DEFAULT_GYRO_SENSITIVITY,
            gyro_y_sens: DEFAULT_GYRO_SENSITIVITY,
            map_volume_keys: false,
            mouse_capture: false,
            audio_buffer_hint: 8192,
            disc_keys: DEFAULT_DISC_KEYS.to_string(),
            layout: vec![],
        }
    }
}

pub fn load_config() -> HudConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &HudConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// Directory the configuration file lives in, also used for the log file.
pub fn config_dir() -> Option<std::path::PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.to_path_buf()))
}

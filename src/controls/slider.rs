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

//! Three-way sliders.
//!
//! A slider carries a left, centre and right key. Swipe styles pick a key
//! from the gesture when the finger lifts; split-click styles press the key
//! under the finger for as long as it is down.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    controls::{ControlElement, ElementKind, Rect, Touch, TouchAct, TouchContext, Visual},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SliderStyle {
    /// Swipe left or right, tap for centre.
    #[default]
    LeftRight,
    /// Swipe down or right, tap for centre.
    DownRight,
    LeftRightSplitClick,
    DownRightSplitClick,
}

impl SliderStyle {
    /// Whether the slider lies flat, half as tall as it is wide.
    pub fn is_horizontal(self) -> bool {
        matches!(self, SliderStyle::LeftRight | SliderStyle::LeftRightSplitClick)
    }

    fn is_split(self) -> bool {
        matches!(
            self,
            SliderStyle::LeftRightSplitClick | SliderStyle::DownRightSplitClick
        )
    }
}

pub struct Slider {
    label: String,
    cx: i32,
    cy: i32,
    width: i32,
    height: i32,
    left: i32,
    center: i32,
    right: i32,
    style: SliderStyle,
    slide_dist: i32,
    start: (i32, i32),
    held: Option<i32>,
    alpha: f32,
}

impl Slider {
    /// Creates a slider. `keys` are the left, centre and right engine codes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label: impl Into<String>,
        cx: i32,
        cy: i32,
        width: i32,
        height: i32,
        keys: [i32; 3],
        style: SliderStyle,
        alpha: f32,
    ) -> Self {
        let [left, center, right] = keys;
        Self {
            label: label.into(),
            cx,
            cy,
            width,
            height,
            left,
            center,
            right,
            style,
            slide_dist: width / 3,
            start: (cx, cy),
            held: None,
            alpha,
        }
    }

    // The key under a split-click press, if any.
    fn key_at(&self, x: i32, y: i32) -> Option<i32> {
        let dx = x - self.cx;
        if self.style.is_horizontal() {
            let half = self.slide_dist / 2;
            return Some(if dx < -half {
                self.left
            } else if dx > half {
                self.right
            } else {
                self.center
            });
        }

        let dy = y - self.cy;
        if dx > 0 && dy < 0 {
            Some(self.right)
        } else if dx < 0 && dy > 0 {
            Some(self.left)
        } else if dx <= 0 && dy <= 0 {
            Some(self.center)
        } else {
            None
        }
    }

    // The key a swipe ending at (`x`, `y`) selects.
    fn swiped_key(&self, x: i32, y: i32) -> i32 {
        let dx = x - self.start.0;
        let dy = y - self.start.1;
        match self.style {
            SliderStyle::DownRight => {
                if dy > self.slide_dist || dx > self.slide_dist {
                    let angle = (dy as f64).atan2(dx as f64).abs();
                    if angle > PI / 4.0 && angle < PI * 3.0 / 4.0 {
                        self.left
                    } else {
                        self.right
                    }
                } else {
                    self.center
                }
            }
            _ => {
                if dx < -self.slide_dist {
                    self.left
                } else if dx > self.slide_dist {
                    self.right
                } else {
                    self.center
                }
            }
        }
    }
}

impl ControlElement for Slider {
    fn kind(&self) -> ElementKind {
        ElementKind::Slider
    }

    fn bounds(&self) -> Rect {
        Rect::centered(self.cx, self.cy, self.width, self.height)
    }

    fn is_inside(&self, x: i32, y: i32) -> bool {
        let in_box = 2 * (self.cx - x).abs() < self.width && 2 * (self.cy - y).abs() < self.height;
        if self.style.is_horizontal() {
            in_box
        } else {
            // Down-right sliders leave their lower right quadrant free.
            in_box && !(y > self.cy && x > self.cx)
        }
    }

    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool> {
        match touch.act {
            TouchAct::Press => {
                self.start = (touch.x, touch.y);
                if self.style.is_split() {
                    self.held = self.key_at(touch.x, touch.y);
                    if let Some(key) = self.held {
                        ctx.sink.send_key(true, key, 0);
                    }
                }
            }
            TouchAct::Release => {
                if self.style.is_split() {
                    if let Some(key) = self.held.take() {
                        ctx.sink.send_key(false, key, 0);
                    }
                } else {
                    ctx.sink.send_key_tap(self.swiped_key(touch.x, touch.y));
                }
            }
            TouchAct::Motion => {}
        }
        Ok(true)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn visual(&self) -> Visual {
        let highlight = self.held.and_then(|key| {
            [self.left, self.center, self.right]
                .iter()
                .position(|k| *k == key)
        });
        Visual {
            active: self.held.is_some(),
            highlight,
            ..Visual::idle(self.alpha)
        }
    }
}

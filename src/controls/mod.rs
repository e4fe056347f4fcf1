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

//! On-screen control elements.
//!
//! A control element is a hit-testable widget that turns the touches routed to
//! it by the [`TouchDispatcher`](crate::touch::TouchDispatcher) into key,
//! motion or analog events. Elements never see raw touch frames, only the
//! position and phase of the one finger being delivered.

mod button;
mod disc;
mod joystick;
pub mod layout;
mod pointer_pad;
mod slider;

pub use button::{Button, ButtonStyle};
pub use disc::Disc;
pub use joystick::{Joystick, JoystickOptions};
pub use pointer_pad::PointerPad;
pub use slider::{Slider, SliderStyle};

use crate::{Result, bridge::InputSink, session::Session};

/// Identifies a laid out element for the lifetime of a dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Slider,
    Disc,
    Joystick,
    PointerPad,
}

impl ElementKind {
    /// Hit-test priority, lower first. Small precise targets are tried before
    /// large catch-all ones.
    pub fn priority(self) -> u8 {
        match self {
            ElementKind::Button => 0,
            ElementKind::Slider => 1,
            ElementKind::Disc => 2,
            ElementKind::Joystick => 3,
            ElementKind::PointerPad => 4,
        }
    }
}

/// An axis-aligned screen rectangle, right and bottom exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A `width` by `height` rectangle centred on (`cx`, `cy`).
    pub fn centered(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        Self::new(
            cx - width / 2,
            cy - height / 2,
            cx + width / 2,
            cy + height / 2,
        )
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Phase of a touch as seen by the finger being delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAct {
    Press,
    Motion,
    Release,
}

/// One finger's touch, routed to the element it is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Touch {
    pub x: i32,
    pub y: i32,
    pub act: TouchAct,
    /// Finger slot the touch belongs to.
    pub slot: usize,
}

/// Everything an element needs to act on a touch.
pub struct TouchContext<'a> {
    pub sink: &'a dyn InputSink,
    pub session: &'a Session,
}

/// Transient paint state of an element.
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
    pub active: bool,
    /// Index of the highlighted part, for elements made of parts.
    pub highlight: Option<usize>,
    /// Current stick or dot offset from the centre, for elements that have one.
    pub offset: Option<(i32, i32)>,
}

impl Visual {
    pub(crate) fn idle(alpha: f32) -> Self {
        Self {
            alpha,
            active: false,
            highlight: None,
            offset: None,
        }
    }
}

pub trait ControlElement: Send {
    fn kind(&self) -> ElementKind;

    /// Bounding box of the element's hit region.
    fn bounds(&self) -> Rect;

    fn is_inside(&self, x: i32, y: i32) -> bool;

    /// Handles one finger's touch.
    ///
    /// Returning `Ok(false)` asks the dispatcher to release the finger.
    ///
    /// # Errors
    ///
    /// An error is confined to the finger being delivered, which is released.
    fn on_touch(&mut self, touch: Touch, ctx: &TouchContext<'_>) -> Result<bool>;

    /// Whether several fingers may drive this element at once.
    fn supports_multi_touch(&self) -> bool {
        false
    }

    fn label(&self) -> &str;

    fn visual(&self) -> Visual;
}

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

//! Multi-touch routing.
//!
//! Raw touch frames from the platform are resolved here into per-element
//! [`Touch`](crate::controls::Touch) deliveries. Each finger is tracked in a
//! fixed slot and bound to at most one element for the length of its
//! gesture.

mod dispatcher;
mod finger;

pub use dispatcher::TouchDispatcher;

/// Number of finger slots tracked at once.
pub const MAX_FINGERS: usize = 10;

/// Kind of change a touch frame reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchAction {
    /// First finger down.
    Down,
    /// Another finger down while at least one is already down.
    PointerDown,
    Move,
    /// A finger lifted while others remain down.
    PointerUp,
    /// Last finger lifted.
    Up,
    /// The platform aborted the gesture.
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pointer {
    /// Hardware pointer id, stable for the life of one finger's gesture.
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

/// Snapshot of every finger currently on the surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchFrame {
    pub action: TouchAction,
    /// Index into `pointers` of the finger the action applies to.
    pub action_pointer: usize,
    pub pointers: Vec<Pointer>,
}

impl TouchFrame {
    /// A frame with a single finger.
    pub fn single(action: TouchAction, id: i32, x: i32, y: i32) -> Self {
        Self {
            action,
            action_pointer: 0,
            pointers: vec![Pointer { id, x, y }],
        }
    }

    /// The finger `action` applies to.
    pub fn acting(&self) -> Option<&Pointer> {
        self.pointers.get(self.action_pointer)
    }

    pub fn find(&self, id: i32) -> Option<&Pointer> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Whether this frame lifts the finger with the given pointer id.
    pub fn lifts(&self, id: i32) -> bool {
        match self.action {
            TouchAction::Cancel => true,
            TouchAction::Up | TouchAction::PointerUp => self.acting().is_some_and(|p| p.id == id),
            _ => false,
        }
    }
}

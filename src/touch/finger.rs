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

use crate::controls::ElementId;

/// A finger slot's binding to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Finger {
    pub pointer_id: i32,
    pub target: ElementId,
    /// Order in which the finger claimed its element; older claims are served
    /// first.
    pub claim_seq: u64,
    /// Last position delivered to the element.
    pub last: (i32, i32),
    /// Set until the press has been delivered.
    pub fresh: bool,
}

impl Finger {
    pub fn new(pointer_id: i32, target: ElementId, claim_seq: u64, at: (i32, i32)) -> Self {
        Self {
            pointer_id,
            target,
            claim_seq,
            last: at,
            fresh: true,
        }
    }
}

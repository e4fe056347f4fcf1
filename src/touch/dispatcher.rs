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

use std::collections::HashMap;

use log::{debug, warn};

use crate::{
    HudError, Result,
    controls::{ControlElement, ElementId, ElementKind, PointerPad, Touch, TouchAct, TouchContext},
    touch::{MAX_FINGERS, TouchAction, TouchFrame, finger::Finger},
};

/// Routes touch frames to the control elements under the fingers.
///
/// Elements are hit-tested in kind priority order, so small targets win over
/// the stick and the stick over the look pad. A finger keeps the element it
/// landed on until it lifts. Only elements that support multi-touch are
/// driven by more than one finger in the same pass; a second finger on a
/// single-touch element waits, bound but not delivered, until the first lets
/// go.
pub struct TouchDispatcher {
    fingers: [Option<Finger>; MAX_FINGERS],
    elements: HashMap<ElementId, Box<dyn ControlElement>>,
    /// Hit-test order.
    hit_order: Vec<ElementId>,
    /// Paint order, as laid out.
    paint_order: Vec<ElementId>,
    next_id: u32,
    next_claim: u64,
    hidden: bool,
}

impl TouchDispatcher {
    /// Creates a dispatcher holding only the look pad.
    ///
    /// The pad is never hidden so pointer traffic keeps flowing when the
    /// control layer is switched off.
    pub fn new(pad: PointerPad) -> Self {
        let mut dispatcher = Self {
            fingers: [None; MAX_FINGERS],
            elements: HashMap::new(),
            hit_order: Vec::new(),
            paint_order: Vec::new(),
            next_id: 0,
            next_claim: 0,
            hidden: false,
        };
        dispatcher.add(Box::new(pad));
        dispatcher
    }

    /// Lays out an element and returns its id.
    pub fn add(&mut self, element: Box<dyn ControlElement>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        self.elements.insert(id, element);
        self.paint_order.push(id);
        self.hit_order.push(id);
        self.sort_hit_order();
        id
    }

    /// Lays out every element in `elements`, in order.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = Box<dyn ControlElement>>) {
        for element in elements {
            self.add(element);
        }
    }

    /// Swaps the element `id` for `element` in one step.
    ///
    /// Fingers bound to the old element are dropped without a release.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::UnknownElement`] if `id` is not laid out.
    pub fn replace(&mut self, id: ElementId, element: Box<dyn ControlElement>) -> Result<()> {
        let slot = self
            .elements
            .get_mut(&id)
            .ok_or(HudError::UnknownElement(id.0))?;
        *slot = element;

        for finger in self.fingers.iter_mut() {
            if finger.is_some_and(|f| f.target == id) {
                *finger = None;
            }
        }
        self.sort_hit_order();
        debug!("Replaced element {}", id.0);
        Ok(())
    }

    /// Hides or shows the control layer. The look pad stays live either way.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Elements in paint order, skipping those hidden with the control layer.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &dyn ControlElement)> {
        self.paint_order.iter().filter_map(move |id| {
            let element = self.elements.get(id)?;
            (!self.hidden || element.kind() == ElementKind::PointerPad)
                .then_some((*id, element.as_ref()))
        })
    }

    /// The element the finger with `pointer_id` is bound to, if any.
    pub fn bound_target(&self, pointer_id: i32) -> Option<ElementId> {
        self.fingers
            .iter()
            .flatten()
            .find(|f| f.pointer_id == pointer_id)
            .map(|f| f.target)
    }

    /// Number of fingers currently bound.
    pub fn bound_count(&self) -> usize {
        self.fingers.iter().flatten().count()
    }

    /// Processes one touch frame.
    ///
    /// A failure in one finger's element is logged and releases only that
    /// finger; the other fingers in the frame are still delivered.
    pub fn dispatch(&mut self, frame: &TouchFrame, ctx: &TouchContext<'_>) {
        if matches!(frame.action, TouchAction::Down | TouchAction::PointerDown) {
            if let Some(pointer) = frame.acting() {
                self.claim(pointer.id, pointer.x, pointer.y);
            }
        }

        let mut order: Vec<usize> = (0..MAX_FINGERS)
            .filter(|slot| self.fingers[*slot].is_some())
            .collect();
        order.sort_by_key(|slot| self.fingers[*slot].map(|f| f.claim_seq));

        let mut handled: Vec<ElementId> = Vec::with_capacity(order.len());
        for slot in order {
            let Some(finger) = self.fingers[slot] else {
                continue;
            };
            let lifting = frame.lifts(finger.pointer_id);

            let Some(element) = self.elements.get_mut(&finger.target) else {
                self.fingers[slot] = None;
                continue;
            };
            if handled.contains(&finger.target) && !element.supports_multi_touch() {
                if lifting {
                    self.fingers[slot] = None;
                }
                continue;
            }
            handled.push(finger.target);

            match Self::deliver(element.as_mut(), slot, finger, frame, lifting, ctx) {
                Ok((keep, at)) if keep && !lifting => {
                    self.fingers[slot] = Some(Finger {
                        last: at,
                        fresh: false,
                        ..finger
                    });
                }
                Ok(_) => self.fingers[slot] = None,
                Err(e) => {
                    warn!(
                        "Touch on {} failed for slot {slot}, releasing: {e}",
                        element.label()
                    );
                    self.fingers[slot] = None;
                }
            }
        }
    }

    /// Delivers a release to every bound finger at its last position and
    /// unbinds them all.
    pub fn release_all(&mut self, ctx: &TouchContext<'_>) {
        for slot in 0..MAX_FINGERS {
            let Some(finger) = self.fingers[slot].take() else {
                continue;
            };
            if finger.fresh {
                continue;
            }
            if let Some(element) = self.elements.get_mut(&finger.target) {
                let (x, y) = finger.last;
                let touch = Touch {
                    x,
                    y,
                    act: TouchAct::Release,
                    slot,
                };
                if let Err(e) = element.on_touch(touch, ctx) {
                    warn!("Release on {} failed for slot {slot}: {e}", element.label());
                }
            }
        }
    }

    fn deliver(
        element: &mut dyn ControlElement,
        slot: usize,
        finger: Finger,
        frame: &TouchFrame,
        lifting: bool,
        ctx: &TouchContext<'_>,
    ) -> Result<(bool, (i32, i32))> {
        let (x, y) = match frame.find(finger.pointer_id) {
            Some(p) => (p.x, p.y),
            None if frame.action == TouchAction::Cancel => finger.last,
            None => return Err(HudError::MissingPointer(finger.pointer_id)),
        };

        let act = if finger.fresh {
            TouchAct::Press
        } else if lifting {
            TouchAct::Release
        } else {
            TouchAct::Motion
        };

        let keep = element.on_touch(Touch { x, y, act, slot }, ctx)?;
        if finger.fresh && lifting {
            // Down and up in one frame.
            let release = Touch {
                x,
                y,
                act: TouchAct::Release,
                slot,
            };
            element.on_touch(release, ctx)?;
        }
        Ok((keep, (x, y)))
    }

    fn claim(&mut self, pointer_id: i32, x: i32, y: i32) {
        if self.bound_target(pointer_id).is_some() {
            return;
        }
        let Some(slot) = self.fingers.iter().position(Option::is_none) else {
            debug!("No free finger slot for pointer {pointer_id}");
            return;
        };

        let hidden = self.hidden;
        let target = self.hit_order.iter().copied().find(|id| {
            self.elements.get(id).is_some_and(|e| {
                (!hidden || e.kind() == ElementKind::PointerPad) && e.is_inside(x, y)
            })
        });

        if let Some(target) = target {
            self.fingers[slot] = Some(Finger::new(pointer_id, target, self.next_claim, (x, y)));
            self.next_claim += 1;
        }
    }

    fn sort_hit_order(&mut self) {
        let elements = &self.elements;
        self.hit_order.retain(|id| elements.contains_key(id));
        self.hit_order.sort_by_key(|id| {
            (
                elements.get(id).map_or(u8::MAX, |e| e.kind().priority()),
                id.0,
            )
        });
    }
}

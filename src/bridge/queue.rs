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

//! The thread-safe FIFO behind the bridge.

use std::{
    collections::VecDeque,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, info};

use crate::bridge::{InputEvent, NativeInput};

struct Pending {
    seq: u64,
    event: InputEvent,
}

#[derive(Default)]
struct QueueState {
    items: VecDeque<Pending>,
    next_seq: u64,
}

/// A multi-producer, single-consumer queue of [`InputEvent`]s.
///
/// The mutex guards only the underlying sequence. It is never held while an
/// event is being replayed into the engine, so producers are never stalled
/// by a slow consumer.
///
/// After [`EventQueue::shutdown`] every operation is a silent no-op.
pub struct EventQueue {
    state: Mutex<QueueState>,
    open: AtomicBool,
}

impl EventQueue {
    pub fn new() -> Self {
        info!("Event queue created");
        Self {
            state: Mutex::new(QueueState::default()),
            open: AtomicBool::new(true),
        }
    }

    // Items are plain data, a panic elsewhere cannot leave them inconsistent.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Appends an event to the tail of the queue.
    ///
    /// Never blocks beyond the append itself and may be called from any
    /// thread.
    pub fn push(&self, event: InputEvent) {
        if !self.is_open() {
            return;
        }
        let mut state = self.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.items.push_back(Pending { seq, event });
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replays queued events into `native`.
    ///
    /// * `limit < 0` executes every event queued when the call started and
    ///   returns that count.
    /// * `limit == 0` discards everything without executing it and returns 0.
    /// * `limit > 0` executes up to `limit` events and returns the number
    ///   executed.
    ///
    /// Each event stays at the head of the queue until it has been replayed.
    /// Only one thread may drain at a time.
    pub fn drain(&self, limit: i32, native: &mut dyn NativeInput) -> i32 {
        if !self.is_open() {
            return 0;
        }
        if limit == 0 {
            self.clear();
            return 0;
        }

        let budget = if limit < 0 {
            self.len()
        } else {
            limit as usize
        };

        let mut executed = 0;
        while executed < budget {
            let Some((seq, event)) = self.peek() else {
                break;
            };
            event.dispatch(native);
            self.retire(seq);
            executed += 1;
        }

        executed as i32
    }

    fn peek(&self) -> Option<(u64, InputEvent)> {
        self.lock().items.front().map(|p| (p.seq, p.event))
    }

    // The head may already be gone if the queue was cleared while the event
    // was executing.
    fn retire(&self, seq: u64) {
        let mut state = self.lock();
        if state.items.front().is_some_and(|p| p.seq == seq) {
            state.items.pop_front();
        }
    }

    /// Discards every queued event without executing it.
    pub fn clear(&self) {
        let discarded = {
            let mut state = self.lock();
            let n = state.items.len();
            state.items.clear();
            n
        };
        if discarded > 0 {
            debug!("Discarded {discarded} queued input events");
        }
    }

    /// Closes the queue. Remaining events are dropped, not drained.
    pub fn shutdown(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            self.lock().items.clear();
            info!("Event queue shut down");
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use rand::{rng, seq::SliceRandom};

    use super::*;
    use crate::bridge::{InputSink, testing::RecordingNative};

    fn key(code: i32) -> InputEvent {
        InputEvent::Key {
            pressed: true,
            code,
            char_code: 0,
        }
    }

    fn codes(events: &[InputEvent]) -> Vec<i32> {
        events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Key { code, .. } => Some(*code),
                _ => None,
            })
            .collect()
    }

    fn filled(n: i32) -> EventQueue {
        let queue = EventQueue::new();
        for code in 0..n {
            queue.push(key(code));
        }
        queue
    }

    #[test]
    fn drain_all_returns_prior_size_in_order() {
        let queue = filled(5);
        let mut native = RecordingNative::default();

        assert_eq!(queue.drain(-1, &mut native), 5);
        assert!(queue.is_empty());
        assert_eq!(codes(&native.events), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn drain_zero_discards_without_executing() {
        let queue = filled(4);
        let mut native = RecordingNative::default();

        assert_eq!(queue.drain(0, &mut native), 0);
        assert!(queue.is_empty());
        assert!(native.events.is_empty());
    }

    #[test]
    fn drain_n_executes_at_most_n() {
        let queue = filled(5);
        let mut native = RecordingNative::default();

        assert_eq!(queue.drain(3, &mut native), 3);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(10, &mut native), 2);
        assert!(queue.is_empty());
        assert_eq!(codes(&native.events), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn drain_on_empty_queue() {
        let queue = EventQueue::new();
        let mut native = RecordingNative::default();
        assert_eq!(queue.drain(-1, &mut native), 0);
        assert_eq!(queue.drain(4, &mut native), 0);
    }

    struct Reentrant {
        queue: Arc<EventQueue>,
        seen_len: Vec<usize>,
    }

    impl NativeInput for Reentrant {
        fn push_key(&mut self, _pressed: bool, code: i32, _char_code: i32) {
            self.seen_len.push(self.queue.len());
            // Would deadlock if the lock were held across execution.
            self.queue.send_motion(code as f32, 0.0);
        }

        fn push_motion(&mut self, _dx: f32, _dy: f32) {}

        fn push_analog(&mut self, _enabled: bool, _x: f32, _y: f32) {}
    }

    #[test]
    fn event_is_removed_only_after_it_executes() {
        let queue = Arc::new(filled(3));
        let mut native = Reentrant {
            queue: Arc::clone(&queue),
            seen_len: vec![],
        };

        assert_eq!(queue.drain(-1, &mut native), 3);

        // The executing event is still counted while it runs.
        assert_eq!(native.seen_len, vec![3, 3, 3]);
        // Events pushed during the drain wait for the next one.
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn multi_producer_order_is_preserved_per_producer() {
        const PRODUCERS: i32 = 4;
        const PER_PRODUCER: i32 = 500;

        let queue = Arc::new(EventQueue::new());

        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    // Mix event kinds so producers interleave unevenly.
                    let mut kinds: Vec<bool> = (0..PER_PRODUCER).map(|i| i % 3 == 0).collect();
                    kinds.shuffle(&mut rng());
                    for (i, with_motion) in kinds.into_iter().enumerate() {
                        if with_motion {
                            queue.send_motion(0.0, 0.0);
                        }
                        queue.send_key(true, producer * 10_000 + i as i32, 0);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let mut native = RecordingNative::default();
        let prior = queue.len() as i32;
        assert_eq!(queue.drain(-1, &mut native), prior);

        let codes = codes(&native.events);
        assert_eq!(codes.len() as i32, PRODUCERS * PER_PRODUCER);
        for producer in 0..PRODUCERS {
            let own: Vec<i32> = codes
                .iter()
                .copied()
                .filter(|c| c / 10_000 == producer)
                .collect();
            let expected: Vec<i32> = (0..PER_PRODUCER).map(|i| producer * 10_000 + i).collect();
            assert_eq!(own, expected);
        }
    }

    #[test]
    fn operations_after_shutdown_are_no_ops() {
        let queue = filled(2);
        queue.shutdown();
        queue.push(key(9));

        let mut native = RecordingNative::default();
        assert_eq!(queue.drain(-1, &mut native), 0);
        assert!(queue.is_empty());
        assert!(native.events.is_empty());

        // A second shutdown is harmless.
        queue.shutdown();
    }
}

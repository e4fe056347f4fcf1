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

//! The native side of the bridge.
//!
//! [`NativePump`] runs on the engine's simulation thread and is the only
//! code that feeds queued input into the engine.

use std::sync::Arc;

use log::debug;

use crate::{
    bridge::{EventQueue, NativeInput},
    session::Session,
};

/// Drain every queued event each tick.
pub const DRAIN_ALL: i32 = -1;

/// Lifecycle surface of a native engine.
pub trait NativeEngine: NativeInput {
    /// Starts the engine with its command line. Returns false on failure.
    fn init(&mut self, args: &[String]) -> bool;
    fn pause(&mut self);
    fn resume(&mut self);
    fn shutdown(&mut self);
}

/// Moves queued input into the engine once per simulation tick.
pub struct NativePump {
    queue: Arc<EventQueue>,
    session: Arc<Session>,
    limit: i32,
    was_loading: bool,
}

impl NativePump {
    /// # Arguments
    ///
    /// * `limit` - Events replayed per tick, or [`DRAIN_ALL`].
    pub fn new(queue: Arc<EventQueue>, session: Arc<Session>, limit: i32) -> Self {
        let was_loading = session.in_loading();
        Self {
            queue,
            session,
            limit,
            was_loading,
        }
    }

    /// Replays queued input into `native` and returns the number of events
    /// replayed.
    ///
    /// Input queued before the engine enters a loading screen is discarded
    /// instead.
    pub fn tick(&mut self, native: &mut dyn NativeInput) -> i32 {
        let loading = self.session.in_loading();
        if loading && !self.was_loading {
            debug!("Engine entered loading, discarding queued input");
            self.queue.clear();
        }
        self.was_loading = loading;

        self.queue.drain(self.limit, native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{InputEvent, InputSink, testing::RecordingNative},
        keycodes::EngineFamily,
        session::{STATE_GAME, STATE_LOADING},
    };

    fn setup(limit: i32) -> (Arc<EventQueue>, Arc<Session>, NativePump) {
        let queue = Arc::new(EventQueue::new());
        let session = Arc::new(Session::new(EngineFamily::Generic, false));
        session.set_state(STATE_GAME);
        let pump = NativePump::new(queue.clone(), session.clone(), limit);
        (queue, session, pump)
    }

    #[test]
    fn tick_replays_in_order() {
        let (queue, _session, mut pump) = setup(DRAIN_ALL);
        let mut native = RecordingNative::default();

        queue.send_key(true, 32, 32);
        queue.send_motion(1.0, 2.0);
        queue.send_key(false, 32, 32);

        assert_eq!(pump.tick(&mut native), 3);
        assert_eq!(
            native.events,
            vec![
                InputEvent::Key {
                    pressed: true,
                    code: 32,
                    char_code: 32,
                },
                InputEvent::Motion { dx: 1.0, dy: 2.0 },
                InputEvent::Key {
                    pressed: false,
                    code: 32,
                    char_code: 32,
                },
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn limited_tick_leaves_the_rest_for_later() {
        let (queue, _session, mut pump) = setup(2);
        let mut native = RecordingNative::default();

        for i in 0..5 {
            queue.send_key(true, i, 0);
        }

        assert_eq!(pump.tick(&mut native), 2);
        assert_eq!(queue.len(), 3);
        assert_eq!(pump.tick(&mut native), 2);
        assert_eq!(pump.tick(&mut native), 1);
        assert_eq!(pump.tick(&mut native), 0);
        assert_eq!(native.events.len(), 5);
    }

    #[test]
    fn entering_loading_discards_pending_input() {
        let (queue, session, mut pump) = setup(DRAIN_ALL);
        let mut native = RecordingNative::default();

        queue.send_key(true, 1, 0);
        session.set_state(STATE_LOADING);
        assert_eq!(pump.tick(&mut native), 0);

        // Only the transition clears.
        queue.send_key(true, 2, 0);
        assert_eq!(pump.tick(&mut native), 1);
        assert_eq!(native.events.len(), 1);
    }
}

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

//! Simulated native engine.
//!
//! Stands in for the real engine library: a thread ticking at about 60 Hz
//! that drains the input bridge, remembers what it ingested, and streams a
//! test tone through the audio pipeline into a device that plays at real
//! time speed.

use std::{
    collections::VecDeque,
    f32::consts::TAU,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
        mpsc::Sender,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use hudbridge::{
    audio::{AudioBackend, AudioDevice, AudioWriter, PcmFormat},
    bridge::{EventQueue, NativeInput},
    engine::{DRAIN_ALL, NativeEngine, NativePump},
    session::{STATE_GAME, STATE_LOADING, Session},
};
use log::{debug, info};

use crate::events::HostEvent;

const TICK: Duration = Duration::from_millis(16);

/// Ticks spent on the simulated loading screen.
const LOADING_TICKS: u64 = 90;

const RECENT_EVENTS: usize = 32;

const TONE_HZ: f32 = 220.0;

/// What the simulated engine has seen, shared with the UI.
#[derive(Default)]
pub(crate) struct EngineMonitor {
    recent: Mutex<VecDeque<String>>,
    pub(crate) ticks: AtomicU64,
    pub(crate) ingested: AtomicU64,
    /// Set by the engine thread once it has acted on a pause.
    pub(crate) paused: AtomicBool,
}

impl EngineMonitor {
    fn record(&self, line: String) {
        let mut recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
        if recent.len() == RECENT_EVENTS {
            recent.pop_front();
        }
        recent.push_back(line);
        self.ingested.fetch_add(1, Ordering::Relaxed);
    }

    /// Most recent events, newest first.
    pub(crate) fn recent(&self) -> Vec<String> {
        let recent = self.recent.lock().unwrap_or_else(PoisonError::into_inner);
        recent.iter().rev().cloned().collect()
    }
}

struct SimEngine {
    monitor: Arc<EngineMonitor>,
}

impl NativeInput for SimEngine {
    fn push_key(&mut self, pressed: bool, code: i32, char_code: i32) {
        let state = if pressed { "down" } else { "up" };
        self.monitor.record(format!("key {code:>4} {state} char {char_code}"));
    }

    fn push_motion(&mut self, dx: f32, dy: f32) {
        self.monitor.record(format!("motion {dx:+.1} {dy:+.1}"));
    }

    fn push_analog(&mut self, enabled: bool, x: f32, y: f32) {
        if enabled {
            self.monitor.record(format!("analog {x:+.2} {y:+.2}"));
        } else {
            self.monitor.record("analog off".to_string());
        }
    }
}

impl NativeEngine for SimEngine {
    fn init(&mut self, args: &[String]) -> bool {
        info!("Simulated engine starting with {args:?}");
        true
    }

    fn pause(&mut self) {
        self.monitor.paused.store(true, Ordering::Release);
        debug!("Simulated engine paused");
    }

    fn resume(&mut self) {
        self.monitor.paused.store(false, Ordering::Release);
        debug!("Simulated engine resumed");
    }

    fn shutdown(&mut self) {
        info!("Simulated engine stopped");
    }
}

/// Handle to the running engine thread.
pub(crate) struct EngineHandle {
    stop: Arc<AtomicBool>,
    pause: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Asks the engine thread to stop ticking until [`EngineHandle::resume`].
    pub(crate) fn pause(&self) {
        self.pause.store(true, Ordering::Release);
    }

    pub(crate) fn resume(&self) {
        self.pause.store(false, Ordering::Release);
    }

    /// Asks the engine thread to finish its tick and waits for it.
    pub(crate) fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Engine thread panicked");
            }
        }
    }
}

/// Spawns the simulated engine thread.
///
/// A failure to start the engine is reported back as a fatal event.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub(crate) fn spawn_engine(
    queue: Arc<EventQueue>,
    session: Arc<Session>,
    audio: Arc<AudioWriter>,
    monitor: Arc<EngineMonitor>,
    event_tx: Sender<HostEvent>,
) -> Result<EngineHandle> {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = stop.clone();
    let pause = Arc::new(AtomicBool::new(false));
    let thread_pause = pause.clone();

    let worker = thread::Builder::new()
        .name("engine".to_string())
        .spawn(move || {
            let mut engine = SimEngine {
                monitor: monitor.clone(),
            };
            if !engine.init(&["+set".to_string(), "com_simulated".to_string(), "1".to_string()]) {
                let _ = event_tx.send(HostEvent::FatalError("Engine failed to start".to_string()));
                return;
            }
            let control = LoopControl {
                stop: &thread_stop,
                pause: &thread_pause,
            };
            engine_loop(&mut engine, queue, session, audio, &monitor, control);
            engine.shutdown();
        })
        .context("Failed to spawn engine thread")?;

    Ok(EngineHandle {
        stop,
        pause,
        worker: Some(worker),
    })
}

struct LoopControl<'a> {
    stop: &'a AtomicBool,
    pause: &'a AtomicBool,
}

fn engine_loop(
    engine: &mut SimEngine,
    queue: Arc<EventQueue>,
    session: Arc<Session>,
    audio: Arc<AudioWriter>,
    monitor: &EngineMonitor,
    control: LoopControl<'_>,
) {
    let format = PcmFormat::default();
    let frames_per_tick =
        (format.sample_rate as u128 * TICK.as_millis() / 1000) as usize;
    let mut pcm = vec![0u8; frames_per_tick * format.frame_size()];
    let mut phase = 0.0f32;

    session.set_state(STATE_LOADING);
    let mut pump = NativePump::new(queue, session.clone(), DRAIN_ALL);

    let mut tick = 0u64;
    let mut paused = false;
    while !control.stop.load(Ordering::Acquire) {
        let started = Instant::now();

        let wants_pause = control.pause.load(Ordering::Acquire);
        if wants_pause != paused {
            paused = wants_pause;
            if paused {
                engine.pause();
            } else {
                engine.resume();
            }
        }
        if paused {
            thread::sleep(TICK);
            continue;
        }

        if tick == LOADING_TICKS {
            session.set_state(STATE_GAME);
        }
        pump.tick(engine);

        phase = synthesize(&mut pcm, format, phase);
        audio.write(&pcm, 0, pcm.len() as i32);

        tick += 1;
        monitor.ticks.store(tick, Ordering::Relaxed);
        thread::sleep(TICK.saturating_sub(started.elapsed()));
    }
}

// Fills `pcm` with a quiet sine tone, returning the phase to continue from.
fn synthesize(pcm: &mut [u8], format: PcmFormat, mut phase: f32) -> f32 {
    let step = TAU * TONE_HZ / format.sample_rate as f32;
    for frame in pcm.chunks_exact_mut(format.frame_size()) {
        let sample = ((phase.sin() * 0.1) * i16::MAX as f32) as i16;
        for channel in frame.chunks_exact_mut(2) {
            channel.copy_from_slice(&sample.to_le_bytes());
        }
        phase = (phase + step) % TAU;
    }
    phase
}

/// Opens [`NullDevice`]s.
pub(crate) struct NullBackend;

impl AudioBackend for NullBackend {
    fn min_buffer_size(&self, format: PcmFormat) -> usize {
        // About 50 ms.
        format.sample_rate as usize / 20 * format.frame_size()
    }

    fn open(
        &mut self,
        format: PcmFormat,
        buffer_size: usize,
    ) -> hudbridge::Result<Box<dyn AudioDevice>> {
        Ok(Box::new(NullDevice::new(format, buffer_size)))
    }
}

/// A device that discards samples at the rate a real one would play them.
///
/// Writes beyond the buffer's free space are refused with zero so the writer
/// thread sees real back-pressure.
struct NullDevice {
    byte_rate: f64,
    capacity: usize,
    buffered: usize,
    playing: bool,
    last_drain: Instant,
}

impl NullDevice {
    fn new(format: PcmFormat, capacity: usize) -> Self {
        Self {
            byte_rate: format.sample_rate as f64 * format.frame_size() as f64,
            capacity,
            buffered: 0,
            playing: false,
            last_drain: Instant::now(),
        }
    }

    fn drain(&mut self) {
        let now = Instant::now();
        if self.playing {
            let played =
                (now.duration_since(self.last_drain).as_secs_f64() * self.byte_rate) as usize;
            self.buffered = self.buffered.saturating_sub(played);
        }
        self.last_drain = now;
    }
}

impl AudioDevice for NullDevice {
    fn is_initialized(&self) -> bool {
        true
    }

    fn write(&mut self, bytes: &[u8]) -> i32 {
        self.drain();
        let taken = bytes.len().min(self.capacity - self.buffered);
        self.buffered += taken;
        taken as i32
    }

    fn flush(&mut self) {
        self.buffered = 0;
    }

    fn play(&mut self) {
        self.drain();
        self.playing = true;
    }

    fn pause(&mut self) {
        self.drain();
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.buffered = 0;
    }

    fn release(&mut self) {
        debug!("Null audio device released");
    }
}

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

//! PCM output pipeline.
//!
//! This module provides the [`AudioWriter`] the engine's audio callback
//! writes through. The writer owns the platform device and a dedicated
//! writer thread; every device write happens on that thread, in submission
//! order, so the engine's callback never blocks on the device.
//!
//! # Write protocol
//!
//! The `offset` and `length` passed to [`AudioWriter::write`] double as a
//! flush protocol:
//!
//! * `offset < 0` flushes without writing.
//! * `length < 0` writes `-length` bytes then flushes.
//! * `length == 0` with a non-negative offset does nothing.

mod worker;

use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
        mpsc::{self, Sender},
    },
    thread::JoinHandle,
};

use log::{debug, info, warn};

use crate::{
    HudError, Result,
    audio::worker::{WriteTask, spawn_writer},
    keycodes::EngineFamily,
};

/// Output sample format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Bytes in one frame of all channels.
    pub fn frame_size(&self) -> usize {
        self.channels as usize * self.bits_per_sample as usize / 8
    }
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            bits_per_sample: 16,
        }
    }
}

/// An open platform audio device.
pub trait AudioDevice: Send {
    /// Whether the device came up usable.
    fn is_initialized(&self) -> bool;

    /// Writes as much of `bytes` as the device accepts.
    ///
    /// Returns the number of bytes taken, zero when the device is momentarily
    /// full, or a negative error code.
    fn write(&mut self, bytes: &[u8]) -> i32;
    fn flush(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn release(&mut self);
}

/// Opens audio devices.
pub trait AudioBackend {
    /// Smallest buffer, in bytes, the platform supports for `format`.
    fn min_buffer_size(&self, format: PcmFormat) -> usize;

    /// # Errors
    ///
    /// Returns [`HudError::AudioDevice`] if the device cannot be opened.
    fn open(&mut self, format: PcmFormat, buffer_size: usize) -> Result<Box<dyn AudioDevice>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioState {
    Uninitialized,
    Running,
    Paused,
    /// Terminal.
    Shutdown,
}

/// Running totals kept by the writer thread.
#[derive(Debug, Default)]
pub(crate) struct AudioStats {
    pub written: AtomicU64,
    pub flushes: AtomicU64,
    pub retries: AtomicU64,
    pub failures: AtomicU64,
}

/// A snapshot of the writer's totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioCounters {
    /// Bytes the device accepted.
    pub written: u64,
    pub flushes: u64,
    /// Writes retried after the device reported itself full.
    pub retries: u64,
    /// Tasks abandoned after a device error.
    pub failures: u64,
}

pub(crate) type SharedDevice = Arc<Mutex<Option<Box<dyn AudioDevice>>>>;

pub(crate) fn lock_device(device: &SharedDevice) -> MutexGuard<'_, Option<Box<dyn AudioDevice>>> {
    device.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Device buffer size for an engine's hint.
///
/// Some engine families over-report their needs and have the hint divided
/// down first. The result is never below the platform minimum.
pub fn buffer_size(hint: usize, family: EngineFamily, min: usize) -> usize {
    (hint / family.audio_hint_divisor()).max(min)
}

struct Lifecycle {
    state: AudioState,
    task_tx: Option<Sender<WriteTask>>,
    worker: Option<JoinHandle<()>>,
}

/// The engine-facing audio output.
///
/// All methods may be called from any thread, in any lifecycle state; calls
/// that make no sense in the current state do nothing.
pub struct AudioWriter {
    lifecycle: Mutex<Lifecycle>,
    initialized: Arc<AtomicBool>,
    device: SharedDevice,
    stats: Arc<AudioStats>,
}

impl AudioWriter {
    pub fn new() -> Self {
        Self {
            lifecycle: Mutex::new(Lifecycle {
                state: AudioState::Uninitialized,
                task_tx: None,
                worker: None,
            }),
            initialized: Arc::new(AtomicBool::new(false)),
            device: Arc::new(Mutex::new(None)),
            stats: Arc::new(AudioStats::default()),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> AudioState {
        self.lifecycle().state
    }

    pub fn counters(&self) -> AudioCounters {
        AudioCounters {
            written: self.stats.written.load(Ordering::Relaxed),
            flushes: self.stats.flushes.load(Ordering::Relaxed),
            retries: self.stats.retries.load(Ordering::Relaxed),
            failures: self.stats.failures.load(Ordering::Relaxed),
        }
    }

    /// Opens the device and starts the writer thread.
    ///
    /// Does nothing if the writer has already been initialized or shut down.
    ///
    /// # Arguments
    ///
    /// * `buffer_hint` - The engine's requested buffer size in bytes.
    /// * `family` - The active engine family, which may scale the hint.
    ///
    /// # Errors
    ///
    /// Returns [`HudError::AudioDevice`] if the device cannot be opened or
    /// comes up uninitialized, and [`HudError::WorkerSpawn`] if the writer
    /// thread cannot be started. The writer stays uninitialized either way.
    pub fn init(
        &self,
        backend: &mut dyn AudioBackend,
        buffer_hint: usize,
        family: EngineFamily,
    ) -> Result<()> {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state != AudioState::Uninitialized {
            debug!("Audio init ignored in state {:?}", lifecycle.state);
            return Ok(());
        }

        let format = PcmFormat::default();
        let size = buffer_size(buffer_hint, family, backend.min_buffer_size(format));
        let mut device = backend.open(format, size)?;
        if !device.is_initialized() {
            device.release();
            return Err(HudError::AudioDevice(
                "device did not reach the initialized state".to_string(),
            ));
        }

        let (task_tx, task_rx) = mpsc::channel();
        let worker = spawn_writer(
            task_rx,
            self.device.clone(),
            self.initialized.clone(),
            self.stats.clone(),
        );
        let worker = match worker {
            Ok(worker) => worker,
            Err(e) => {
                device.release();
                return Err(e);
            }
        };

        device.flush();
        device.play();
        *lock_device(&self.device) = Some(device);
        self.initialized.store(true, Ordering::Release);

        lifecycle.task_tx = Some(task_tx);
        lifecycle.worker = Some(worker);
        lifecycle.state = AudioState::Running;

        info!(
            "Audio initialized: {} Hz, {} channels, {size} byte buffer",
            format.sample_rate, format.channels
        );
        Ok(())
    }

    /// Queues PCM bytes from `buffer` for the writer thread.
    ///
    /// Returns the number of bytes queued, which is 0 unless the writer is
    /// running. See the module docs for how `offset` and `length` encode
    /// flushes.
    pub fn write(&self, buffer: &[u8], offset: i32, length: i32) -> i32 {
        if !self.initialized.load(Ordering::Acquire) {
            return 0;
        }
        if offset >= 0 && length == 0 {
            return 0;
        }

        let task = if offset < 0 {
            WriteTask::flush_only()
        } else {
            let start = offset as usize;
            let wanted = length.unsigned_abs() as usize;
            let end = start.saturating_add(wanted).min(buffer.len());
            if start > end || end - start < wanted {
                warn!(
                    "Audio write of {wanted} bytes at {start} overruns a {} byte buffer",
                    buffer.len()
                );
            }
            let bytes = buffer.get(start..end).unwrap_or_default().to_vec();
            WriteTask::new(bytes, length < 0)
        };
        let queued = task.len() as i32;

        let lifecycle = self.lifecycle();
        if lifecycle.state != AudioState::Running {
            return 0;
        }
        match &lifecycle.task_tx {
            Some(tx) if tx.send(task).is_ok() => queued,
            _ => 0,
        }
    }

    /// Pauses the device. Writes already queued still run against the paused
    /// device; new ones are refused until [`AudioWriter::resume`].
    pub fn pause(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state != AudioState::Running {
            return;
        }
        if let Some(device) = lock_device(&self.device).as_mut() {
            device.pause();
        }
        lifecycle.state = AudioState::Paused;
        debug!("Audio paused");
    }

    /// Restarts a paused device, dropping whatever it had buffered.
    pub fn resume(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state != AudioState::Paused {
            return;
        }
        if let Some(device) = lock_device(&self.device).as_mut() {
            device.flush();
            device.play();
        }
        lifecycle.state = AudioState::Running;
        debug!("Audio resumed");
    }

    /// Stops the writer thread and releases the device.
    ///
    /// Safe to call at any time and more than once. Tasks still queued are
    /// abandoned without touching the device.
    pub fn shutdown(&self) {
        let mut lifecycle = self.lifecycle();
        if lifecycle.state == AudioState::Shutdown {
            return;
        }

        self.initialized.store(false, Ordering::Release);
        lifecycle.task_tx = None;
        if let Some(worker) = lifecycle.worker.take() {
            if worker.join().is_err() {
                warn!("Audio writer thread panicked");
            }
        }

        if let Some(mut device) = lock_device(&self.device).take() {
            device.stop();
            device.release();
        }
        lifecycle.state = AudioState::Shutdown;
        info!("Audio shut down");
    }
}

impl Default for AudioWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AudioWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        thread,
        time::{Duration, Instant},
    };

    use super::{AudioBackend, AudioDevice, PcmFormat};
    use crate::Result;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Call {
        Write(Vec<u8>),
        Flush,
        Play,
        Pause,
        Stop,
        Release,
    }

    pub(crate) type CallLog = Arc<Mutex<Vec<Call>>>;

    /// A device that records calls and replays scripted write results.
    pub(crate) struct FakeDevice {
        pub log: CallLog,
        /// Results returned by the next writes before normal service.
        pub script: VecDeque<i32>,
        /// Most bytes taken by one write.
        pub chunk: usize,
        pub initialized: bool,
    }

    impl FakeDevice {
        pub(crate) fn new(log: CallLog) -> Self {
            Self {
                log,
                script: VecDeque::new(),
                chunk: usize::MAX,
                initialized: true,
            }
        }

        fn record(&self, call: Call) {
            self.log.lock().unwrap().push(call);
        }
    }

    impl AudioDevice for FakeDevice {
        fn is_initialized(&self) -> bool {
            self.initialized
        }

        fn write(&mut self, bytes: &[u8]) -> i32 {
            if let Some(result) = self.script.pop_front() {
                return result;
            }
            let taken = bytes.len().min(self.chunk);
            self.record(Call::Write(bytes[..taken].to_vec()));
            taken as i32
        }

        fn flush(&mut self) {
            self.record(Call::Flush);
        }

        fn play(&mut self) {
            self.record(Call::Play);
        }

        fn pause(&mut self) {
            self.record(Call::Pause);
        }

        fn stop(&mut self) {
            self.record(Call::Stop);
        }

        fn release(&mut self) {
            self.record(Call::Release);
        }
    }

    pub(crate) struct FakeBackend {
        pub device: Option<FakeDevice>,
        pub min: usize,
        pub opened: Vec<usize>,
    }

    impl FakeBackend {
        pub(crate) fn new(device: FakeDevice) -> Self {
            Self {
                device: Some(device),
                min: 4096,
                opened: Vec::new(),
            }
        }
    }

    impl AudioBackend for FakeBackend {
        fn min_buffer_size(&self, _format: PcmFormat) -> usize {
            self.min
        }

        fn open(&mut self, _format: PcmFormat, buffer_size: usize) -> Result<Box<dyn AudioDevice>> {
            self.opened.push(buffer_size);
            match self.device.take() {
                Some(device) => Ok(Box::new(device)),
                None => Err(crate::HudError::AudioDevice("already open".to_string())),
            }
        }
    }

    /// Waits for `done` to hold, panicking after a few seconds.
    pub(crate) fn wait_for(log: &CallLog, done: impl Fn(&[Call]) -> bool) -> Vec<Call> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let calls = log.lock().unwrap().clone();
            if done(&calls) {
                return calls;
            }
            assert!(Instant::now() < deadline, "timed out, device saw {calls:?}");
            thread::sleep(Duration::from_millis(1));
        }
    }
}

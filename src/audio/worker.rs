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

//! The audio writer thread.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Receiver,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{debug, error};

use crate::{
    HudError, Result,
    audio::{AudioStats, SharedDevice, lock_device},
};

/// Back-off before retrying a write the device had no room for.
const RETRY_DELAY: Duration = Duration::from_millis(1);

/// One write request, holding its own copy of the bytes.
#[derive(Debug)]
pub(crate) struct WriteTask {
    bytes: Vec<u8>,
    flush: bool,
}

impl WriteTask {
    pub fn new(bytes: Vec<u8>, flush: bool) -> Self {
        Self { bytes, flush }
    }

    pub fn flush_only() -> Self {
        Self::new(Vec::new(), true)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Spawns the writer thread.
///
/// The thread runs tasks in the order received until every sender is gone.
///
/// # Errors
///
/// Returns [`HudError::WorkerSpawn`] if the thread cannot be created.
pub(crate) fn spawn_writer(
    task_rx: Receiver<WriteTask>,
    device: SharedDevice,
    initialized: Arc<AtomicBool>,
    stats: Arc<AudioStats>,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("audio-writer".to_string())
        .spawn(move || {
            for task in task_rx {
                run_task(&task, &device, &initialized, &stats);
            }
            debug!("Audio writer thread exiting");
        })
        .map_err(HudError::WorkerSpawn)
}

// Writes the whole task, retrying while the device is full. Gives up on the
// task, but not the device, on a write error. Every device access re-checks
// the initialized flag so a shutdown in progress is never raced.
fn run_task(task: &WriteTask, device: &SharedDevice, initialized: &AtomicBool, stats: &AudioStats) {
    let mut pos = 0;
    while pos < task.bytes.len() {
        if !initialized.load(Ordering::Acquire) {
            return;
        }

        let result = match lock_device(device).as_mut() {
            Some(device) => device.write(&task.bytes[pos..]),
            None => return,
        };

        match result {
            n if n > 0 => {
                let n = (n as usize).min(task.bytes.len() - pos);
                pos += n;
                stats.written.fetch_add(n as u64, Ordering::Relaxed);
            }
            0 => {
                stats.retries.fetch_add(1, Ordering::Relaxed);
                thread::sleep(RETRY_DELAY);
            }
            code => {
                error!(
                    "Audio device write failed with {code}, dropping {} bytes",
                    task.bytes.len() - pos
                );
                stats.failures.fetch_add(1, Ordering::Relaxed);
                break;
            }
        }
    }

    if task.flush && initialized.load(Ordering::Acquire) {
        if let Some(device) = lock_device(device).as_mut() {
            device.flush();
            stats.flushes.fetch_add(1, Ordering::Relaxed);
        }
    }
}

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

//! # HUD bridge terminal host.
//!
//! A terminal stand-in for the launcher shell, used to drive the input and
//! audio bridge against a simulated engine.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, renders the control
//!   layout and plays the part of the platform UI thread, turning mouse and
//!   keyboard input into touch frames and key events.
//! * The **Engine Thread** drains the input bridge once per tick and streams
//!   PCM through the audio pipeline.
//! * **Event Loops** capture terminal input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the input threads and the UI is handled via `std::sync::mpsc`
//! channels.

mod events;
mod render;
mod sim;
mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use env_logger::{Builder, Env, Target};
use hudbridge::{
    adapters::{GyroAdapter, KeyboardAdapter, MouseAdapter},
    audio::AudioWriter,
    bridge::EventQueue,
    config::{self, HudConfig},
    controls::{
        PointerPad, Rect as ScreenRect, TouchContext,
        layout::{self, default_layout},
    },
    session::Session,
    touch::{TouchDispatcher, TouchFrame},
};
use log::{error, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::{
    fs::{self, File},
    io,
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use crate::{
    events::{HostEvent, MouseFingers, TerminalCapture, process_events},
    render::{CELL_HEIGHT, CELL_WIDTH, hud_area},
    sim::{EngineHandle, EngineMonitor, NullBackend},
    theme::Theme,
};

const LOG_FILE: &str = "hudbridge.log";

/// Opacity, in percent, of the stock layout.
const DEFAULT_OPACITY: i32 = 80;

/// Application state.
struct App {
    pub config: HudConfig,

    pub theme: Theme,

    pub event_tx: Sender<HostEvent>,
    pub event_rx: Receiver<HostEvent>,

    pub session: Arc<Session>,
    pub queue: Arc<EventQueue>,
    pub audio: Arc<AudioWriter>,
    pub monitor: Arc<EngineMonitor>,
    pub engine: Option<EngineHandle>,

    pub dispatcher: TouchDispatcher,
    pub keyboard: KeyboardAdapter,
    pub mouse: MouseAdapter<TerminalCapture>,
    pub gyro: GyroAdapter,
    pub fingers: MouseFingers,

    /// Terminal cells the control layout occupies.
    pub hud_area: Rect,
    pub last_error: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: HudConfig, columns: u16, rows: u16) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let session = Arc::new(Session::new(config.engine_family, config.joystick_smooth));
        let keyboard = KeyboardAdapter::new(session.keymap().clone(), config.map_volume_keys);
        let mouse = MouseAdapter::new(TerminalCapture::default(), session.keymap());
        let mut gyro = GyroAdapter::new(config.gyro_x_sens, config.gyro_y_sens);
        if !config.gyro_enabled {
            gyro.suspend();
        }

        let hud_area = hud_area(Rect::new(0, 0, columns, rows));
        let dispatcher = build_dispatcher(&config, &session, hud_area)?;

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            session,
            queue: Arc::new(EventQueue::new()),
            audio: Arc::new(AudioWriter::new()),
            monitor: Arc::new(EngineMonitor::default()),
            engine: None,
            dispatcher,
            keyboard,
            mouse,
            gyro,
            fingers: MouseFingers::default(),
            hud_area,
            last_error: None,
        })
    }

    /// Routes a touch frame through the on-screen controls.
    pub fn dispatch(&mut self, frame: &TouchFrame) {
        let ctx = TouchContext {
            sink: self.queue.as_ref(),
            session: &self.session,
        };
        self.dispatcher.dispatch(frame, &ctx);
    }

    /// Lays the controls out again for a new terminal size.
    pub fn relayout(&mut self, columns: u16, rows: u16) {
        let area = hud_area(Rect::new(0, 0, columns, rows));
        match build_dispatcher(&self.config, &self.session, area) {
            Ok(dispatcher) => {
                let ctx = TouchContext {
                    sink: self.queue.as_ref(),
                    session: &self.session,
                };
                self.dispatcher.release_all(&ctx);
                self.fingers = MouseFingers::default();
                self.dispatcher = dispatcher;
                self.hud_area = area;
            }
            Err(e) => {
                warn!("Keeping the previous layout: {e:#}");
                self.last_error = Some(format!("{e:#}"));
            }
        }
    }

    /// Suspends audio, the engine and the gyro while the terminal is in the
    /// background.
    pub fn suspend(&mut self) {
        self.audio.pause();
        if let Some(engine) = &self.engine {
            engine.pause();
        }
        self.gyro.suspend();
        info!("Suspended");
    }

    pub fn activate(&mut self) {
        if self.config.gyro_enabled {
            self.gyro.activate();
        }
        if let Some(engine) = &self.engine {
            engine.resume();
        }
        self.audio.resume();
        info!("Activated");
    }

    /// Stops everything in order: audio is paused, the engine finishes its
    /// tick, then the audio pipeline and finally the event queue are shut
    /// down.
    pub fn shutdown(&mut self) {
        self.audio.pause();
        if let Some(mut engine) = self.engine.take() {
            engine.stop();
        }
        self.audio.shutdown();
        self.queue.shutdown();
        info!("Shut down");
    }
}

/// Builds the touch dispatcher for the controls laid out in `area`.
///
/// # Errors
///
/// Returns an error if the configured layout has a malformed entry.
fn build_dispatcher(config: &HudConfig, session: &Session, area: Rect) -> Result<TouchDispatcher> {
    let width = area.width as i32 * CELL_WIDTH;
    let height = area.height as i32 * CELL_HEIGHT;
    let screen = ScreenRect::new(0, 0, width, height);

    let specs = if config.layout.is_empty() {
        default_layout(width, height, DEFAULT_OPACITY)
    } else {
        config.layout.clone()
    };
    let elements = layout::build_elements(
        &specs,
        screen,
        session.keymap(),
        &config.layout_options(),
    )
    .context("Failed to build control layout")?;

    let mut dispatcher = TouchDispatcher::new(PointerPad::new(screen, config.two_finger_lmb));
    dispatcher.extend(elements);
    dispatcher.set_hidden(config.hide_onscreen);
    Ok(dispatcher)
}

/// The entry point of the application.
///
/// Loads the configuration, sets up logging, initializes the application
/// state, manages the terminal lifecycle, and returns an error if any part of
/// the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    init_logging().context("Failed to set up logging")?;

    let (columns, rows) = terminal::size().context("Failed to read terminal size")?;
    let mut app = App::new(config, columns, rows).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Sends log output to a file in the configuration directory, since the
/// terminal belongs to the UI.
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
fn init_logging() -> Result<()> {
    let dir = config::config_dir().context("No configuration directory")?;
    fs::create_dir_all(&dir).context("Failed to create configuration directory")?;
    let file = File::create(dir.join(LOG_FILE)).context("Failed to create log file")?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches to the alternate screen and turns on mouse and focus reporting.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    theme::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it is called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .ok();
    theme::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the audio pipeline, the engine and the input threads, then enters
/// the main event loop. Everything is shut down again when the loop ends.
///
/// # Errors
///
/// Returns an error if the engine thread cannot be started or the event loop
/// encounters an unrecoverable error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    if let Err(e) = app.audio.init(
        &mut NullBackend,
        app.config.audio_buffer_hint,
        app.config.engine_family,
    ) {
        error!("Audio unavailable: {e}");
        app.last_error = Some(e.to_string());
    }

    let engine = sim::spawn_engine(
        app.queue.clone(),
        app.session.clone(),
        app.audio.clone(),
        app.monitor.clone(),
        app.event_tx.clone(),
    )?;
    app.engine = Some(engine);

    if app.config.mouse_capture {
        app.mouse.grab();
    }

    // Spawn a thread to forward raw terminal events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if tx_input.send(HostEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick, the minimum redraw rate.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(HostEvent::Tick).is_ok() {
            thread::sleep(Duration::from_millis(50));
        }
    });

    let res = process_events(terminal, app);
    app.shutdown();
    res
}

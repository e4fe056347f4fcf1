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

//! Host event distribution.
//!
//! Terminal input arrives here as [`HostEvent`]s and is routed the way the
//! platform would route it on a device: mouse buttons become touch frames
//! for the on-screen controls, mouse motion and the wheel go through the
//! mouse adapter, and keys through the keyboard adapter. The UI is re-drawn
//! after every event.

mod touch;

pub(crate) use touch::MouseFingers;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use hudbridge::{
    adapters::{MouseButton as PadButton, PlatformKey, PointerCapture, Scroll},
    session::STATE_CONSOLE,
};
use log::debug;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::{draw, to_pixels}};

#[derive(Debug)]
pub(crate) enum HostEvent {
    Terminal(Event),
    Tick,
    FatalError(String),
}

/// Pointer capture for a terminal, which has no pointer lock. Capture only
/// changes how hover motion is treated.
#[derive(Debug, Default)]
pub(crate) struct TerminalCapture;

impl PointerCapture for TerminalCapture {
    fn request_capture(&mut self) {
        debug!("Terminal pointer captured");
    }

    fn release_capture(&mut self) {
        debug!("Terminal pointer released");
    }
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until the user quits or the event channel is closed.
///
/// # Errors
///
/// Returns an error on a fatal event from a worker or if drawing fails.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            HostEvent::Terminal(Event::Key(key)) => {
                if !process_key_event(app, key) {
                    break;
                }
            }
            HostEvent::Terminal(Event::Mouse(mouse)) => process_mouse_event(app, mouse),
            HostEvent::Terminal(Event::FocusGained) => {
                app.mouse.on_focus_changed(true);
                app.activate();
            }
            HostEvent::Terminal(Event::FocusLost) => {
                app.mouse.on_focus_changed(false);
                if app.mouse.is_captured() {
                    // The terminal drops capture with focus; ask again on return.
                    app.mouse.on_capture_lost();
                    app.mouse.grab();
                }
                if let Some(frame) = app.fingers.cancel() {
                    app.dispatch(&frame);
                }
                app.suspend();
            }
            HostEvent::Terminal(Event::Resize(columns, rows)) => app.relayout(columns, rows),
            HostEvent::Terminal(_) | HostEvent::Tick => {}
            HostEvent::FatalError(message) => return Err(anyhow!(message)),
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Maps keyboard input to host commands and engine keys.
///
/// Returns false when the user asked to quit.
///
/// Host commands:
///
/// * `q` - Quit.
/// * `F5` - Show or hide the on-screen controls.
/// * `F6` - Grab or release the pointer.
/// * `F7` - Toggle the console, as the engine would report it.
/// * `F8` - Toggle joystick smoothing, as the engine would request it.
fn process_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => return false,
        KeyCode::F(5) => {
            let hidden = !app.dispatcher.is_hidden();
            app.dispatcher.set_hidden(hidden);
        }
        KeyCode::F(6) => {
            if app.mouse.is_captured() {
                app.mouse.ungrab();
            } else {
                app.mouse.grab();
            }
        }
        KeyCode::F(7) => app.session.set_state(app.session.state() ^ STATE_CONSOLE),
        KeyCode::F(8) => {
            let smooth = !app.session.joystick_smooth();
            app.session.set_joystick_smooth(smooth);
        }
        code => {
            if let Some(platform_key) = platform_key(code) {
                // Terminals report presses only, so every key is a tap.
                let sink = app.queue.as_ref();
                app.keyboard.on_key(platform_key, true, sink);
                app.keyboard.on_key(platform_key, false, sink);
            }
        }
    }
    true
}

fn platform_key(code: KeyCode) -> Option<PlatformKey> {
    Some(match code {
        KeyCode::Up => PlatformKey::DpadUp,
        KeyCode::Down => PlatformKey::DpadDown,
        KeyCode::Left => PlatformKey::DpadLeft,
        KeyCode::Right => PlatformKey::DpadRight,
        KeyCode::Enter => PlatformKey::Enter,
        KeyCode::Esc => PlatformKey::Escape,
        KeyCode::Backspace => PlatformKey::Del,
        KeyCode::Tab => PlatformKey::Tab,
        KeyCode::PageUp => PlatformKey::VolumeUp,
        KeyCode::PageDown => PlatformKey::VolumeDown,
        KeyCode::Char(c) => PlatformKey::Char(c),
        _ => return None,
    })
}

fn process_mouse_event(app: &mut App, mouse: MouseEvent) {
    let (x, y) = to_pixels(app.hud_area, mouse.column, mouse.row);
    let inside = app.hud_area.contains((mouse.column, mouse.row).into());
    let sink = app.queue.clone();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Middle) => {
            app.mouse.on_button(PadButton::Tertiary, true, sink.as_ref())
        }
        MouseEventKind::Up(MouseButton::Middle) => {
            app.mouse.on_button(PadButton::Tertiary, false, sink.as_ref())
        }
        MouseEventKind::Moved => {
            if app.mouse.is_captured() {
                app.mouse.on_hover(x as f32, y as f32, sink.as_ref());
            }
        }
        MouseEventKind::ScrollUp => app.mouse.on_scroll(Scroll::Up, sink.as_ref()),
        MouseEventKind::ScrollDown => app.mouse.on_scroll(Scroll::Down, sink.as_ref()),
        MouseEventKind::Down(_) if !inside => {}
        kind => {
            if let Some(frame) = app.fingers.on_mouse(kind, x, y) {
                app.dispatch(&frame);
            }
        }
    }
}

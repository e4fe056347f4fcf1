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

use std::sync::atomic::Ordering;

use hudbridge::audio::AudioState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::{App, theme::Theme};

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let theme = &app.theme;
    let session = &app.session;
    let counters = app.audio.counters();

    let mut lines = vec![
        heading("Session", theme),
        field("game", flag(session.in_game()), theme),
        field("loading", flag(session.in_loading()), theme),
        field("console", flag(session.in_console()), theme),
        field("smooth", flag(session.joystick_smooth()), theme),
        field("pending", app.queue.len().to_string(), theme),
        Line::raw(""),
        heading("Audio", theme),
        field("state", audio_state(app.audio.state()).to_string(), theme),
        field("written", format!("{} bytes", counters.written), theme),
        field("flushes", counters.flushes.to_string(), theme),
        field("retries", counters.retries.to_string(), theme),
        field("failures", counters.failures.to_string(), theme),
        Line::raw(""),
        heading("Engine", theme),
        field("ticks", app.monitor.ticks.load(Ordering::Relaxed).to_string(), theme),
        field("events", app.monitor.ingested.load(Ordering::Relaxed).to_string(), theme),
        field("paused", flag(app.monitor.paused.load(Ordering::Relaxed)), theme),
        field("pointer", flag(app.mouse.is_captured()), theme),
    ];

    if let Some(error) = &app.last_error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(error.clone(), Style::default().fg(theme.error_fg)));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Recent input", theme));
    for event in app.monitor.recent() {
        lines.push(Line::styled(event, Style::default().fg(theme.muted_fg)));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn heading<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::styled(
        title,
        Style::default()
            .fg(theme.accent_colour)
            .add_modifier(Modifier::BOLD),
    )
}

fn field<'a>(name: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{name:<10}"), Style::default().fg(theme.muted_fg)),
        Span::styled(value, Style::default().fg(theme.label_fg)),
    ])
}

fn flag(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn audio_state(state: AudioState) -> &'static str {
    match state {
        AudioState::Uninitialized => "uninitialized",
        AudioState::Running => "running",
        AudioState::Paused => "paused",
        AudioState::Shutdown => "shut down",
    }
}

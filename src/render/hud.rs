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

//! Paints the on-screen controls as bordered cell blocks.

use hudbridge::controls::{ControlElement, ElementKind, Rect as ScreenRect};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    App,
    render::{CELL_HEIGHT, CELL_WIDTH},
    theme::Theme,
};

pub(crate) fn draw_hud(f: &mut Frame, area: Rect, app: &App) {
    if app.dispatcher.is_hidden() {
        let hint = Paragraph::new("controls hidden")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted_fg));
        f.render_widget(hint, area);
        return;
    }

    for (_, element) in app.dispatcher.elements() {
        if element.kind() == ElementKind::PointerPad {
            continue;
        }
        let cells = to_cells(area, element.bounds());
        if cells.is_empty() {
            continue;
        }
        draw_element(f, cells, element, &app.theme);
    }
}

fn draw_element(f: &mut Frame, cells: Rect, element: &dyn ControlElement, theme: &Theme) {
    let visual = element.visual();
    let colour = if visual.active {
        theme.accent_colour
    } else {
        theme.border_colour
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colour));
    let inner = block.inner(cells);

    f.render_widget(Clear, cells);
    f.render_widget(block, cells);

    let mut text = element.label().to_string();
    if let Some(part) = visual.highlight {
        text = format!("{text} {}", part + 1);
    }
    if let Some((dx, dy)) = visual.offset {
        if dx != 0 || dy != 0 {
            text = format!("{text}\n{dx:+},{dy:+}");
        }
    }

    let mut style = Style::default().fg(theme.label_fg);
    if visual.active {
        style = style.add_modifier(Modifier::BOLD);
    }
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).style(style),
        inner,
    );
}

/// Maps pixel bounds onto the cells of `area`, clipped to it.
fn to_cells(area: Rect, bounds: ScreenRect) -> Rect {
    let cell = |v: i32, size: i32| (v.max(0) / size).min(u16::MAX as i32) as u16;

    let x = area.x.saturating_add(cell(bounds.left, CELL_WIDTH));
    let y = area.y.saturating_add(cell(bounds.top, CELL_HEIGHT));
    let right = area.x.saturating_add(cell(bounds.right + CELL_WIDTH - 1, CELL_WIDTH));
    let bottom = area.y.saturating_add(cell(bounds.bottom + CELL_HEIGHT - 1, CELL_HEIGHT));

    Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y)).intersection(area)
}

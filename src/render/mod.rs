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

mod hud;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    App,
    render::{hud::draw_hud, status::draw_status},
};

/// Width of a terminal cell in HUD pixels.
pub(crate) const CELL_WIDTH: i32 = 8;
/// Height of a terminal cell in HUD pixels.
pub(crate) const CELL_HEIGHT: i32 = 16;

const STATUS_WIDTH: u16 = 42;

const HELP: [(&str, &str); 6] = [
    ("q", "quit"),
    ("F5", "controls"),
    ("F6", "pointer"),
    ("F7", "console"),
    ("F8", "smoothing"),
    ("L/R mouse", "fingers"),
];

fn split(area: Rect) -> (Rect, Rect, Rect) {
    // Outer layout: main, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Main layout: controls, status
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_WIDTH)])
        .split(outer[0]);

    (main[0], main[1], outer[1])
}

/// The part of the terminal the on-screen controls are laid out in.
pub(crate) fn hud_area(full: Rect) -> Rect {
    split(full).0
}

/// Converts a terminal cell into HUD pixels at the centre of the cell.
///
/// Cells outside `area` are clamped to its edge.
pub(crate) fn to_pixels(area: Rect, column: u16, row: u16) -> (i32, i32) {
    let column = column.min(area.right().saturating_sub(1)).max(area.x);
    let row = row.min(area.bottom().saturating_sub(1)).max(area.y);
    (
        (column - area.x) as i32 * CELL_WIDTH + CELL_WIDTH / 2,
        (row - area.y) as i32 * CELL_HEIGHT + CELL_HEIGHT / 2,
    )
}

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let (hud, status, footer) = split(f.area());

    draw_hud(f, hud, app);
    draw_status(f, status, app);

    let mut spans = Vec::new();
    for (key, action) in HELP {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(app.theme.accent_colour),
        ));
        spans.push(Span::styled(
            format!("{action} "),
            Style::default().fg(app.theme.muted_fg),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), footer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_area_leaves_room_for_status_and_footer() {
        let area = hud_area(Rect::new(0, 0, 120, 40));
        assert_eq!(area, Rect::new(0, 0, 120 - STATUS_WIDTH, 39));
    }

    #[test]
    fn cells_map_to_pixel_centres() {
        let area = Rect::new(2, 1, 10, 5);
        assert_eq!(to_pixels(area, 2, 1), (4, 8));
        assert_eq!(to_pixels(area, 5, 3), (28, 40));
        // Clamped to the last cell.
        assert_eq!(to_pixels(area, 40, 40), (76, 72));
    }
}

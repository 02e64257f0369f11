// Widgets for each viewer tab plus the status bar.

pub mod breakdown;
pub mod pool;
pub mod results;
pub mod rosters;
pub mod status_bar;

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

/// Rows a bordered table with a one-line header can show in `area`.
pub fn table_rows(area: Rect) -> usize {
    (area.height as usize).saturating_sub(3)
}

/// Clamp a stored offset so the last page stays full.
pub fn clamp_offset(offset: usize, total: usize, visible: usize) -> usize {
    offset.min(total.saturating_sub(visible))
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Colour for a position label.
pub fn position_color(position: &str) -> Color {
    match position {
        "QB" => Color::Red,
        "RB" => Color::Green,
        "WR" => Color::Cyan,
        "TE" => Color::Yellow,
        "UNK" => Color::DarkGray,
        _ => Color::White,
    }
}

/// Vertical scrollbar along the right border when `total` overflows.
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, visible: usize, offset: usize) {
    if total <= visible {
        return;
    }
    let mut scrollbar_state =
        ScrollbarState::new(total.saturating_sub(visible)).position(offset);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_subtracts_borders_and_header() {
        assert_eq!(table_rows(Rect::new(0, 0, 40, 20)), 17);
        assert_eq!(table_rows(Rect::new(0, 0, 40, 2)), 0);
    }

    #[test]
    fn clamp_offset_keeps_last_page_full() {
        assert_eq!(clamp_offset(0, 30, 10), 0);
        assert_eq!(clamp_offset(25, 30, 10), 20);
        assert_eq!(clamp_offset(5, 4, 10), 0);
    }

    #[test]
    fn position_colors() {
        assert_eq!(position_color("RB"), Color::Green);
        assert_eq!(position_color("WR"), Color::Cyan);
        assert_eq!(position_color("UNK"), Color::DarkGray);
        assert_eq!(position_color("DEF"), Color::White);
    }
}

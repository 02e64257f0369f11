// Screen layout for the results viewer.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Warnings (0 rows, or up to 3 + borders)           |
// +--------------------------------------------------+
// | Main Panel (tab content)                          |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Most warning lines shown before the panel scrolls out of view.
pub const MAX_WARNING_ROWS: usize = 3;

#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub warnings: Rect,
    pub main_panel: Rect,
    pub help_bar: Rect,
}

/// Split `area`, reserving a bordered warnings panel only when there are
/// warnings to show.
pub fn build_layout(area: Rect, warning_count: usize) -> AppLayout {
    let warning_height = if warning_count == 0 {
        0
    } else {
        warning_count.min(MAX_WARNING_ROWS) as u16 + 2
    };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // status bar
            Constraint::Length(warning_height), // warnings
            Constraint::Min(5),                 // main panel
            Constraint::Length(1),              // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        warnings: vertical[1],
        main_panel: vertical[2],
        help_bar: vertical[3],
    }
}

// Expansion rosters widget: one column per expansion team.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tables::RosterTable;
use crate::tui::{Tab, ViewState};

use super::{clamp_offset, header_style, position_color, render_scrollbar, table_rows};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rosters = &state.tables.rosters;
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} ({} teams)", Tab::Rosters.label(), rosters.len()));

    if rosters.is_empty() {
        let paragraph = Paragraph::new("  No expansion teams.")
            .style(Style::default().fg(Color::DarkGray))
            .block(outer);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, rosters.len() as u32); rosters.len()])
        .split(inner);

    // All columns share one offset so rows line up by pick order.
    let visible = table_rows(inner);
    let total = state.row_count(Tab::Rosters);
    let offset = clamp_offset(state.scroll(Tab::Rosters), total, visible);

    for (roster, column) in rosters.iter().zip(columns.iter()) {
        render_roster(frame, *column, roster, offset, visible);
    }

    render_scrollbar(frame, area, total, visible, offset);
}

fn render_roster(frame: &mut Frame, area: Rect, roster: &RosterTable, offset: usize, visible: usize) {
    let header = Row::new(vec![Cell::from("Player"), Cell::from("Pos")]).style(header_style());

    let rows: Vec<Row> = roster
        .rows
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|row| {
            Row::new(vec![
                Cell::from(row.player.clone()),
                Cell::from(row.position.clone())
                    .style(Style::default().fg(position_color(&row.position))),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(4)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ({})", roster.label, roster.rows.len())),
        );
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;

    fn screen(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(100, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn render_does_not_panic_empty() {
        let text = screen(&ViewState::default());
        assert!(text.contains("No expansion teams."));
    }

    #[test]
    fn render_shows_each_team_column() {
        let text = screen(&sample_state());
        assert!(text.contains("Expansion Rosters (2 teams)"));
        assert!(text.contains("Expansion Team 1 (15)"));
        assert!(text.contains("Expansion Team 2 (15)"));
        assert!(text.contains("Player 1 "));
        assert!(text.contains("Player 2 "));
    }

    #[test]
    fn render_single_team_and_scrolled() {
        let mut state = sample_state();
        state.tables.rosters.truncate(1);
        state.scroll_offset.insert("rosters".into(), 100);
        let text = screen(&state);
        assert!(text.contains("Expansion Team 1 (15)"));
        assert!(text.contains("Player 29"));
    }
}

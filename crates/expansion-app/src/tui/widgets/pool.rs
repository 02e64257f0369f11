// Draft pool widget: the truncated pool in the order it is drafted.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tui::{Tab, ViewState};

use super::{clamp_offset, header_style, position_color, render_scrollbar, table_rows};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let pool = &state.tables.pool;
    let title = format!(
        "{} ({} of {} losses)",
        Tab::Pool.label(),
        pool.len(),
        state.total_losses
    );

    if pool.is_empty() {
        let paragraph = Paragraph::new("  No players were lost to the pool.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = table_rows(area);
    let offset = clamp_offset(state.scroll(Tab::Pool), pool.len(), visible);

    let header = Row::new(vec![Cell::from("#"), Cell::from("Player"), Cell::from("Pos")])
        .style(header_style());

    let rows: Vec<Row> = pool
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(|row| {
            Row::new(vec![
                Cell::from(row.slot.to_string()),
                Cell::from(row.player.clone()),
                Cell::from(row.position.clone())
                    .style(Style::default().fg(position_color(&row.position))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

    render_scrollbar(frame, area, pool.len(), visible, offset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;

    fn screen(state: &ViewState, width: u16, height: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(width, height);
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
        let text = screen(&ViewState::default(), 80, 20);
        assert!(text.contains("No players were lost"));
    }

    #[test]
    fn render_first_page() {
        let text = screen(&sample_state(), 80, 10);
        assert!(text.contains("Draft Pool (30 of 30 losses)"));
        assert!(text.contains("Player 1 "));
        assert!(text.contains("Player 7 "));
        assert!(!text.contains("Player 8 "));
    }

    #[test]
    fn render_respects_scroll_offset() {
        let mut state = sample_state();
        state.scroll_offset.insert("pool".into(), 10);
        let text = screen(&state, 80, 10);
        assert!(text.contains("Player 11"));
        assert!(!text.contains("Player 10 "));
    }

    #[test]
    fn render_clamps_scroll_offset() {
        let mut state = sample_state();
        state.scroll_offset.insert("pool".into(), 1000);
        let text = screen(&state, 80, 10);
        assert!(text.contains("Player 30"));
        assert!(text.contains("Player 24"));
    }
}

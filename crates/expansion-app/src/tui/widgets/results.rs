// Draft results widget: every pick in chronological order.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tables::PickRow;
use crate::tui::{Tab, ViewState};

use super::{clamp_offset, header_style, position_color, render_scrollbar, table_rows};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let picks = &state.tables.picks;
    let title = format!(
        "{} ({}/{} picks, {})",
        Tab::Results.label(),
        picks.len(),
        state.planned_picks,
        state.draft_source
    );

    if picks.is_empty() {
        let paragraph = Paragraph::new("  No picks were made.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = table_rows(area);
    let offset = clamp_offset(state.scroll(Tab::Results), picks.len(), visible);

    let header = Row::new(vec![
        Cell::from("Pick"),
        Cell::from("Rd"),
        Cell::from("Team"),
        Cell::from("Player"),
        Cell::from("Pos"),
    ])
    .style(header_style());

    let rows: Vec<Row> = picks
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(pick_row)
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

    render_scrollbar(frame, area, picks.len(), visible, offset);
}

fn pick_row(pick: &PickRow) -> Row<'static> {
    // Even rounds are dimmed.
    let style = if pick.round % 2 == 0 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(pick.pick.to_string()),
        Cell::from(pick.round.to_string()),
        Cell::from(pick.team.clone()),
        Cell::from(pick.player.clone()),
        Cell::from(pick.position.clone()).style(Style::default().fg(position_color(&pick.position))),
    ])
    .style(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_shows_title_and_first_pick() {
        let backend = ratatui::backend::TestBackend::new(80, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = sample_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Draft Results (30/50 picks, snake)"));
        assert!(text.contains("Expansion Team 1"));
        assert!(text.contains("Player 1 "));
    }
}

// Team breakdown widget: protected players and losses per existing team.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tables::BreakdownRow;
use crate::tui::{Tab, ViewState};

use super::{clamp_offset, header_style, render_scrollbar, table_rows};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rows_data = &state.tables.breakdown;
    let title = format!(
        "{} ({} teams, max protect {})",
        Tab::Breakdown.label(),
        rows_data.len(),
        state.max_protect
    );

    if rows_data.is_empty() {
        let paragraph = Paragraph::new("  No rosters in this league.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = table_rows(area);
    let total = rows_data.len();
    let offset = clamp_offset(state.scroll(Tab::Breakdown), total, visible);

    let header = Row::new(vec![
        Cell::from("Team"),
        Cell::from("Prot"),
        Cell::from("Lost"),
        Cell::from("Protected"),
        Cell::from("Losses"),
    ])
    .style(header_style());

    let rows: Vec<Row> = rows_data
        .iter()
        .skip(offset)
        .take(visible.max(1))
        .map(breakdown_row)
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Percentage(40),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);

    render_scrollbar(frame, area, total, visible, offset);
}

fn breakdown_row(row: &BreakdownRow) -> Row<'static> {
    let loss_style = if row.losses.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Row::new(vec![
        Cell::from(row.team.clone()),
        Cell::from(row.protected.len().to_string()),
        Cell::from(row.losses.len().to_string()).style(loss_style),
        Cell::from(row.protected.join(", ")),
        Cell::from(row.losses.join(", ")).style(loss_style),
    ])
}

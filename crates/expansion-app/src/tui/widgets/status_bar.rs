// Status bar widget: league, format, pick totals, advisor use, tab indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Tab, ViewState};

/// Layout: [league] [format] [picks] [sources] | [tab bar]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            format!(" League {} ", state.league_id),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", state.format), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(
                "Picks {}/{} ",
                state.tables.picks.len(),
                state.planned_picks
            ),
            Style::default().fg(Color::White),
        ),
    ];
    spans.extend(source_spans(state));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "Prot:<source> Draft:<source>", with advisor-sourced parts highlighted.
pub fn source_spans(state: &ViewState) -> Vec<Span<'static>> {
    let style_for = |source: &str| {
        if source.starts_with("advisor") {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    vec![
        Span::styled(
            format!("Prot:{} ", state.protection_source),
            style_for(&state.protection_source),
        ),
        Span::styled(
            format!("Draft:{}", state.draft_source),
            style_for(&state.draft_source),
        ),
    ]
}

/// Tab indicator spans with the active tab highlighted.
/// E.g. "[1:Breakdown] [2:Pool] [3:Results] [4:Rosters]"
pub fn tab_spans(active: Tab) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, short_label(tab)), style));
        spans.push(Span::raw(" "));
    }
    spans
}

pub fn short_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Breakdown => "Breakdown",
        Tab::Pool => "Pool",
        Tab::Results => "Results",
        Tab::Rosters => "Rosters",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(Tab::Results);
        // 0=[1:Breakdown], 1=" ", 2=[2:Pool], 3=" ", 4=[3:Results]
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn tab_spans_contain_numbered_labels() {
        let labels: Vec<String> = tab_spans(Tab::Breakdown)
            .iter()
            .step_by(2)
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(
            labels,
            vec!["[1:Breakdown]", "[2:Pool]", "[3:Results]", "[4:Rosters]"]
        );
    }

    #[test]
    fn advisor_sources_are_highlighted() {
        let mut state = sample_state();
        state.protection_source = "advisor 3/4".into();
        let spans = source_spans(&state);
        assert_eq!(spans[0].content, "Prot:advisor 3/4 ");
        assert_eq!(spans[0].style.fg, Some(Color::Magenta));
        assert_eq!(spans[1].content, "Draft:snake");
        assert_eq!(spans[1].style.fg, Some(Color::Gray));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_shows_league_and_picks() {
        let backend = ratatui::backend::TestBackend::new(140, 1);
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
        assert!(text.contains("League 1180180342143975424"));
        assert!(text.contains("Picks 30/50"));
        assert!(text.contains("[2:Pool]"));
    }
}

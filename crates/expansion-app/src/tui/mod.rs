// Read-only results viewer: tabbed tables over a finished draft report.
//
// The viewer owns a `ViewState` built once from the report. Key presses
// mutate it locally (tab, scroll); the frame is re-rendered at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::{info, warn};

use crate::app::DraftReport;
use crate::tables::ReportTables;

use input::Command;
use layout::{build_layout, AppLayout, MAX_WARNING_ROWS};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Breakdown,
    Pool,
    Results,
    Rosters,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Breakdown, Tab::Pool, Tab::Results, Tab::Rosters];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Breakdown => "Team Breakdown",
            Tab::Pool => "Draft Pool",
            Tab::Results => "Draft Results",
            Tab::Rosters => "Expansion Rosters",
        }
    }

    /// Key into `ViewState::scroll_offset`.
    pub fn scroll_key(self) -> &'static str {
        match self {
            Tab::Breakdown => "breakdown",
            Tab::Pool => "pool",
            Tab::Results => "results",
            Tab::Rosters => "rosters",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Breakdown => Tab::Pool,
            Tab::Pool => Tab::Results,
            Tab::Results => Tab::Rosters,
            Tab::Rosters => Tab::Breakdown,
        }
    }

    pub fn previous(self) -> Tab {
        match self {
            Tab::Breakdown => Tab::Rosters,
            Tab::Pool => Tab::Breakdown,
            Tab::Results => Tab::Pool,
            Tab::Rosters => Tab::Results,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Everything the viewer renders.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub league_id: String,
    /// "Snake" or "Linear".
    pub format: String,
    pub protection_source: String,
    pub draft_source: String,
    pub max_protect: usize,
    pub total_losses: usize,
    /// `num_teams * picks_per_team`, before truncation.
    pub planned_picks: usize,
    pub warnings: Vec<String>,
    /// Where CSV files were written, if anywhere.
    pub export_note: Option<String>,
    pub tables: ReportTables,
    pub active_tab: Tab,
    /// Per-tab scroll offsets (keyed by `Tab::scroll_key`).
    pub scroll_offset: HashMap<String, usize>,
}

impl ViewState {
    pub fn from_report(report: &DraftReport, tables: ReportTables) -> Self {
        ViewState {
            league_id: report.league.league_id.clone(),
            format: report.settings.format.display_str().to_string(),
            protection_source: report.protection_source(),
            draft_source: report.draft_source(),
            max_protect: report.settings.max_protect,
            total_losses: report.outcome.total_losses(),
            planned_picks: report.settings.total_picks(),
            warnings: report.warnings.clone(),
            export_note: None,
            tables,
            active_tab: Tab::default(),
            scroll_offset: HashMap::new(),
        }
    }

    /// Number of scrollable rows on a tab.
    pub fn row_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Breakdown => self.tables.breakdown.len(),
            Tab::Pool => self.tables.pool.len(),
            Tab::Results => self.tables.picks.len(),
            Tab::Rosters => self
                .tables
                .rosters
                .iter()
                .map(|r| r.rows.len())
                .max()
                .unwrap_or(0),
        }
    }

    pub fn scroll(&self, tab: Tab) -> usize {
        self.scroll_offset
            .get(tab.scroll_key())
            .copied()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), state.warnings.len());

    widgets::status_bar::render(frame, layout.status_bar, state);
    render_warnings(frame, &layout, state);
    match state.active_tab {
        Tab::Breakdown => widgets::breakdown::render(frame, layout.main_panel, state),
        Tab::Pool => widgets::pool::render(frame, layout.main_panel, state),
        Tab::Results => widgets::results::render(frame, layout.main_panel, state),
        Tab::Rosters => widgets::rosters::render(frame, layout.main_panel, state),
    }
    render_help_bar(frame, &layout, state);
}

fn render_warnings(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    if state.warnings.is_empty() {
        return;
    }
    let mut lines: Vec<Line> = state
        .warnings
        .iter()
        .take(MAX_WARNING_ROWS)
        .map(|w| Line::from(Span::styled(w.clone(), Style::default().fg(Color::Yellow))))
        .collect();
    let hidden = state.warnings.len().saturating_sub(MAX_WARNING_ROWS);
    if hidden > 0 {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled(
                format!("  (+{hidden} more in log)"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!("Warnings ({})", state.warnings.len())),
    );
    frame.render_widget(paragraph, layout.warnings);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let mut text = String::from(" q:Quit | 1-4/Tab:Switch | j/k:Scroll | PgUp/PgDn:Page");
    if let Some(note) = &state.export_note {
        text.push_str(" | Exported ");
        text.push_str(note);
    }
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Show `view_state` until the user quits.
///
/// Enters raw mode and the alternate screen, installs a panic hook that
/// restores the terminal, and restores it again on a clean exit.
pub async fn run(mut view_state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("viewer started");
    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(Command::Quit) = input::handle_key(key_event, &mut view_state) {
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("terminal input error: {e}");
                        break Err(anyhow::Error::from(e).context("terminal input failed"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    info!("viewer closed");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Keyboard handling for the results viewer.
//
// Everything except quitting is handled locally by mutating `ViewState`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Tab, ViewState};

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}

/// Handle a keyboard event.
///
/// Returns `Some(Command::Quit)` when the viewer should close.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<Command> {
    // Windows reports both Press and Release for each key.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(Command::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Command::Quit),

        KeyCode::Char('1') => view_state.active_tab = Tab::Breakdown,
        KeyCode::Char('2') => view_state.active_tab = Tab::Pool,
        KeyCode::Char('3') => view_state.active_tab = Tab::Results,
        KeyCode::Char('4') => view_state.active_tab = Tab::Rosters,
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            view_state.active_tab = view_state.active_tab.next();
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            view_state.active_tab = view_state.active_tab.previous();
        }

        KeyCode::Up | KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Down | KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, PAGE_SIZE),
        KeyCode::PageDown => scroll_down(view_state, PAGE_SIZE),
        KeyCode::Home | KeyCode::Char('g') => scroll_up(view_state, usize::MAX),
        KeyCode::End | KeyCode::Char('G') => scroll_down(view_state, usize::MAX),

        _ => {}
    }
    None
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let key = view_state.active_tab.scroll_key();
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

/// Scroll down, stopping with the last row at the top of the panel.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let tab = view_state.active_tab;
    let max = view_state.row_count(tab).saturating_sub(1);
    let offset = view_state
        .scroll_offset
        .entry(tab.scroll_key().to_string())
        .or_insert(0);
    *offset = offset.saturating_add(lines).min(max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_state;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    // -- Tab switching --

    #[test]
    fn number_keys_select_tabs() {
        let mut state = ViewState::default();
        for (c, tab) in [
            ('2', Tab::Pool),
            ('3', Tab::Results),
            ('4', Tab::Rosters),
            ('1', Tab::Breakdown),
        ] {
            assert!(handle_key(key(KeyCode::Char(c)), &mut state).is_none());
            assert_eq!(state.active_tab, tab);
        }
    }

    #[test]
    fn tab_key_cycles_forward_and_backtab_back() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.active_tab, Tab::Pool);
        handle_key(key(KeyCode::BackTab), &mut state);
        handle_key(key(KeyCode::BackTab), &mut state);
        assert_eq!(state.active_tab, Tab::Rosters);
    }

    // -- Scroll --

    #[test]
    fn j_and_k_scroll_active_tab_only() {
        let mut state = sample_state();
        state.active_tab = Tab::Pool;
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.scroll(Tab::Pool), 2);
        assert_eq!(state.scroll(Tab::Results), 0);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.scroll(Tab::Pool), 1);
    }

    #[test]
    fn scroll_up_stops_at_zero() {
        let mut state = sample_state();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll(Tab::Breakdown), 0);
    }

    #[test]
    fn page_down_clamps_to_last_row() {
        let mut state = sample_state();
        state.active_tab = Tab::Results;
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll(Tab::Results), 20);
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll(Tab::Results), 29);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.scroll(Tab::Results), 9);
    }

    #[test]
    fn home_and_end_jump() {
        let mut state = sample_state();
        state.active_tab = Tab::Rosters;
        handle_key(key(KeyCode::End), &mut state);
        assert_eq!(state.scroll(Tab::Rosters), 14);
        handle_key(key(KeyCode::Home), &mut state);
        assert_eq!(state.scroll(Tab::Rosters), 0);
    }

    #[test]
    fn scrolling_empty_tab_stays_at_zero() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll(Tab::Breakdown), 0);
    }

    // -- Quit --

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            let mut state = ViewState::default();
            assert_eq!(handle_key(key(code), &mut state), Some(Command::Quit));
        }
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(Command::Quit)
        );
    }

    #[test]
    fn plain_c_does_not_quit() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('c')), &mut state).is_none());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert!(handle_key(event, &mut state).is_none());

        let mut event = key(KeyCode::Char('3'));
        event.kind = KeyEventKind::Release;
        handle_key(event, &mut state);
        assert_eq!(state.active_tab, Tab::Breakdown);
    }
}

// Per-position limits on how many losses one team may send to the pool.

use std::collections::HashMap;

use crate::player::Position;

/// Position cap table.
///
/// Lookup order for a position: its explicit cap, then the "other
/// positions" default (if set), then uncapped. An empty table therefore
/// takes every candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCaps {
    caps: HashMap<Position, usize>,
    other: Option<usize>,
}

impl PositionCaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style explicit cap.
    pub fn with_cap(mut self, position: Position, cap: usize) -> Self {
        self.caps.insert(position, cap);
        self
    }

    /// Builder-style default cap for positions without an explicit entry.
    pub fn with_other(mut self, cap: usize) -> Self {
        self.other = Some(cap);
        self
    }

    pub fn set(&mut self, position: Position, cap: usize) {
        self.caps.insert(position, cap);
    }

    pub fn set_other(&mut self, cap: Option<usize>) {
        self.other = cap;
    }

    pub fn other(&self) -> Option<usize> {
        self.other
    }

    /// The configured cap for `position`, or `None` when uncapped.
    pub fn cap_for(&self, position: &Position) -> Option<usize> {
        self.caps.get(position).copied().or(self.other)
    }

    /// How many of a group of `group_size` candidates may be lost.
    pub fn limit(&self, position: &Position, group_size: usize) -> usize {
        self.cap_for(position)
            .unwrap_or(group_size)
            .min(group_size)
    }

    /// Explicit caps sorted by position label, for prompts and logs.
    pub fn explicit(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .caps
            .iter()
            .map(|(pos, cap)| (pos.display_str().to_string(), *cap))
            .collect();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_uncapped() {
        let caps = PositionCaps::new();
        assert_eq!(caps.cap_for(&Position::RunningBack), None);
        assert_eq!(caps.limit(&Position::RunningBack, 7), 7);
        assert_eq!(caps.limit(&Position::Unknown, 0), 0);
    }

    #[test]
    fn explicit_cap_wins_over_other() {
        let caps = PositionCaps::new()
            .with_cap(Position::RunningBack, 2)
            .with_other(5);
        assert_eq!(caps.cap_for(&Position::RunningBack), Some(2));
        assert_eq!(caps.cap_for(&Position::Kicker), Some(5));
        assert_eq!(caps.cap_for(&Position::Other("LB".into())), Some(5));
    }

    #[test]
    fn limit_never_exceeds_group_size() {
        let caps = PositionCaps::new().with_cap(Position::WideReceiver, 3);
        assert_eq!(caps.limit(&Position::WideReceiver, 1), 1);
        assert_eq!(caps.limit(&Position::WideReceiver, 10), 3);
    }

    #[test]
    fn zero_cap_blocks_position() {
        let caps = PositionCaps::new().with_cap(Position::Quarterback, 0);
        assert_eq!(caps.limit(&Position::Quarterback, 4), 0);
    }

    #[test]
    fn explicit_entries_sorted_by_label() {
        let caps = PositionCaps::new()
            .with_cap(Position::WideReceiver, 3)
            .with_cap(Position::Quarterback, 1)
            .with_cap(Position::RunningBack, 2);
        assert_eq!(
            caps.explicit(),
            vec![
                ("QB".to_string(), 1),
                ("RB".to_string(), 2),
                ("WR".to_string(), 3)
            ]
        );
    }
}

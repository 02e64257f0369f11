// CSV export of the breakdown, pool, pick log and expansion rosters.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::tables::ReportTables;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: csv::Error },
}

#[derive(Serialize)]
struct BreakdownRecord<'a> {
    owner: &'a str,
    team: &'a str,
    protected_count: usize,
    loss_count: usize,
    protected: String,
    losses: String,
}

#[derive(Serialize)]
struct PoolRecord<'a> {
    slot: usize,
    player: &'a str,
    position: &'a str,
}

#[derive(Serialize)]
struct PickRecord<'a> {
    pick: usize,
    round: usize,
    team: &'a str,
    player: &'a str,
    position: &'a str,
}

#[derive(Serialize)]
struct RosterRecord<'a> {
    player: &'a str,
    position: &'a str,
}

/// File name for an expansion team's roster export.
///
/// Path separators in the label are replaced so the file stays in `dir`.
pub fn roster_file_name(label: &str) -> String {
    let safe: String = label
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{safe}_roster.csv")
}

/// Write every table to `dir`, creating it if needed.
///
/// Returns the written paths in a stable order: breakdown, pool, results,
/// then one roster file per expansion team.
pub fn export_all(dir: &Path, tables: &ReportTables) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    let path = dir.join("breakdown.csv");
    write_records(
        &path,
        &[
            "Owner",
            "Team",
            "Protected Count",
            "Loss Count",
            "Protected",
            "Losses",
        ],
        tables.breakdown.iter().map(|row| BreakdownRecord {
            owner: &row.owner_id,
            team: &row.team,
            protected_count: row.protected.len(),
            loss_count: row.losses.len(),
            protected: row.protected.join(", "),
            losses: row.losses.join(", "),
        }),
    )?;
    written.push(path);

    let path = dir.join("pool.csv");
    write_records(
        &path,
        &["Pick Slot", "Player", "Position"],
        tables.pool.iter().map(|row| PoolRecord {
            slot: row.slot,
            player: &row.player,
            position: &row.position,
        }),
    )?;
    written.push(path);

    let path = dir.join("results.csv");
    write_records(
        &path,
        &["Pick", "Round", "Team", "Player", "Position"],
        tables.picks.iter().map(|row| PickRecord {
            pick: row.pick,
            round: row.round,
            team: &row.team,
            player: &row.player,
            position: &row.position,
        }),
    )?;
    written.push(path);

    for roster in &tables.rosters {
        let path = dir.join(roster_file_name(&roster.label));
        write_records(
            &path,
            &["Player", "Position"],
            roster.rows.iter().map(|row| RosterRecord {
                player: &row.player,
                position: &row.position,
            }),
        )?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "exported CSV files");
    Ok(written)
}

/// Write `header` then `records`. An empty table still gets its header.
fn write_records<T, I>(path: &Path, header: &[&str], records: I) -> Result<(), ExportError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let wrap = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(wrap)?;
    writer.write_record(header).map_err(wrap)?;
    for record in records {
        writer.serialize(record).map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{BreakdownRow, PickRow, PoolRow, RosterRow, RosterTable};
    use std::fs;

    fn sample_tables() -> ReportTables {
        ReportTables {
            breakdown: vec![BreakdownRow {
                owner_id: "u1".into(),
                team: "Gridiron Gang".into(),
                protected: vec!["Alpha".into()],
                losses: vec!["Bravo".into(), "Charlie".into()],
            }],
            pool: vec![
                PoolRow {
                    slot: 1,
                    player: "Bravo".into(),
                    position: "WR".into(),
                },
                PoolRow {
                    slot: 2,
                    player: "Charlie".into(),
                    position: "TE".into(),
                },
            ],
            picks: vec![PickRow {
                pick: 1,
                round: 1,
                team: "Expansion Team 1".into(),
                player: "Bravo".into(),
                position: "WR".into(),
            }],
            rosters: vec![
                RosterTable {
                    label: "Expansion Team 1".into(),
                    rows: vec![RosterRow {
                        player: "Bravo".into(),
                        position: "WR".into(),
                    }],
                },
                RosterTable {
                    label: "Expansion Team 2".into(),
                    rows: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn roster_file_names_are_path_safe() {
        assert_eq!(
            roster_file_name("Expansion Team 1"),
            "Expansion Team 1_roster.csv"
        );
        assert_eq!(roster_file_name("A/B"), "A_B_roster.csv");
    }

    #[test]
    fn export_writes_every_file() {
        let dir = std::env::temp_dir().join("expansion_export_unit");
        let _ = fs::remove_dir_all(&dir);

        let written = export_all(&dir, &sample_tables()).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "breakdown.csv",
                "pool.csv",
                "results.csv",
                "Expansion Team 1_roster.csv",
                "Expansion Team 2_roster.csv",
            ]
        );

        let breakdown = fs::read_to_string(dir.join("breakdown.csv")).unwrap();
        assert_eq!(
            breakdown,
            "Owner,Team,Protected Count,Loss Count,Protected,Losses\n\
             u1,Gridiron Gang,1,2,Alpha,\"Bravo, Charlie\"\n"
        );

        let results = fs::read_to_string(dir.join("results.csv")).unwrap();
        assert_eq!(
            results,
            "Pick,Round,Team,Player,Position\n1,1,Expansion Team 1,Bravo,WR\n"
        );

        // Empty rosters still get a header.
        let empty = fs::read_to_string(dir.join("Expansion Team 2_roster.csv")).unwrap();
        assert_eq!(empty, "Player,Position\n");

        let _ = fs::remove_dir_all(&dir);
    }
}

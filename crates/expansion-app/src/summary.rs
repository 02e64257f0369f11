// Plain-text rendering of a draft report for `--no-tui`.

use crate::app::DraftReport;
use crate::tables::ReportTables;

/// Render every table as aligned text, headed by the run's settings.
pub fn render(report: &DraftReport, tables: &ReportTables) -> String {
    let mut lines = Vec::new();
    let settings = &report.settings;

    lines.push(format!("Expansion draft for league {}", report.league.league_id));
    lines.push(format!(
        "Format: {} | Teams: {} x {} picks | Max protect: {}",
        settings.format, settings.num_teams, settings.picks_per_team, settings.max_protect
    ));
    lines.push(format!(
        "Protections: {} | Draft: {} | Losses: {} | Pool: {} | Picks: {}/{}",
        report.protection_source(),
        report.draft_source(),
        report.outcome.total_losses(),
        tables.pool.len(),
        tables.picks.len(),
        settings.total_picks()
    ));
    for warning in &report.warnings {
        lines.push(format!("warning: {warning}"));
    }

    section(&mut lines, "Team Breakdown");
    let team_width = column_width(tables.breakdown.iter().map(|r| r.team.as_str()), "Team");
    for row in &tables.breakdown {
        lines.push(format!(
            "{:<team_width$}  protected {:>2}  lost {:>2}",
            row.team,
            row.protected.len(),
            row.losses.len()
        ));
        lines.push(format!("    protected: {}", join_or_dash(&row.protected)));
        lines.push(format!("    lost:      {}", join_or_dash(&row.losses)));
    }

    section(&mut lines, "Draft Pool");
    if tables.pool.is_empty() {
        lines.push("(empty)".to_string());
    }
    let player_width = column_width(tables.pool.iter().map(|r| r.player.as_str()), "Player");
    for row in &tables.pool {
        lines.push(format!(
            "{:>3}. {:<player_width$}  {}",
            row.slot, row.player, row.position
        ));
    }

    section(&mut lines, "Draft Results");
    if tables.picks.is_empty() {
        lines.push("(no picks)".to_string());
    }
    let label_width = column_width(tables.picks.iter().map(|r| r.team.as_str()), "Team");
    for row in &tables.picks {
        lines.push(format!(
            "#{:<3} R{:<2} {:<label_width$}  {} ({})",
            row.pick, row.round, row.team, row.player, row.position
        ));
    }

    section(&mut lines, "Expansion Rosters");
    for roster in &tables.rosters {
        lines.push(format!("{} ({})", roster.label, roster.rows.len()));
        for row in &roster.rows {
            lines.push(format!("    {} ({})", row.player, row.position));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "--".to_string()
    } else {
        names.join(", ")
    }
}

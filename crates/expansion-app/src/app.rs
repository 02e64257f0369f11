// Orchestration: settings -> league fetch -> protections -> simulation ->
// optional advisor draft -> export -> presentation.

use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use expansion_core::protection::{foreign_protections, unknown_override_owners, ProtectionMode};
use expansion_core::roster::LeagueSnapshot;
use expansion_core::simulation::{
    assisted_draft, build_protections, simulate, SimulationOutcome, SimulationSettings,
};
use expansion_core::suggest::Advisor;
use expansion_llm::{ClaudeAdvisor, LlmClient};

use crate::cache::CachedSource;
use crate::cli::Cli;
use crate::config::Config;
use crate::export;
use crate::sleeper::SleeperClient;
use crate::source::LeagueSource;
use crate::summary;
use crate::tables::ReportTables;
use crate::tui::{self, ViewState};

// ---------------------------------------------------------------------------
// DraftReport
// ---------------------------------------------------------------------------

/// Everything one run produced, ready for export and presentation.
#[derive(Debug, Clone)]
pub struct DraftReport {
    pub league: LeagueSnapshot,
    pub settings: SimulationSettings,
    pub mode: ProtectionMode,
    pub outcome: SimulationOutcome,
    /// Owners whose protections came from the advisor.
    pub assisted_owners: Vec<String>,
    /// Owners whose advisor suggestion was rejected and defaulted.
    pub fallback_owners: Vec<String>,
    /// True when the advisor's draft assignment replaced the standard order.
    pub assisted_draft: bool,
    /// Non-fatal problems worth showing to the user.
    pub warnings: Vec<String>,
}

impl DraftReport {
    pub fn tables(&self) -> ReportTables {
        ReportTables::build(&self.league, &self.outcome)
    }

    /// Short description of where protections came from.
    pub fn protection_source(&self) -> String {
        match self.mode {
            ProtectionMode::Default => "default".to_string(),
            ProtectionMode::Manual => "manual".to_string(),
            ProtectionMode::Assisted => format!(
                "advisor {}/{}",
                self.assisted_owners.len(),
                self.assisted_owners.len() + self.fallback_owners.len()
            ),
        }
    }

    /// Short description of how the pool was distributed.
    pub fn draft_source(&self) -> String {
        if self.assisted_draft {
            "advisor".to_string()
        } else {
            self.settings.format.display_str().to_lowercase()
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation run
// ---------------------------------------------------------------------------

/// Run one expansion draft for the configured league.
///
/// Manual protection counts are validated before anything is simulated; a
/// violation aborts with every offending owner listed. Advisor problems
/// never abort: they are logged, collected as warnings and replaced by the
/// deterministic behavior.
pub async fn run_draft(
    config: &Config,
    source: &dyn LeagueSource,
    advisor: Option<&dyn Advisor>,
) -> anyhow::Result<DraftReport> {
    let settings = config.simulation_settings();
    settings.validate()?;

    let league = source
        .load_league(&config.league_id)
        .await
        .with_context(|| format!("failed to load league {}", config.league_id))?;
    info!(
        league_id = %league.league_id,
        rosters = league.rosters.len(),
        players = league.rostered_count(),
        "league loaded"
    );

    let mode = config.protection.mode;
    let overrides = &config.protection.overrides;
    let plan = build_protections(&league, &settings, mode, overrides, advisor).await?;

    let mut warnings = Vec::new();
    if mode == ProtectionMode::Manual {
        for foreign in foreign_protections(&league.rosters, overrides) {
            let message = format!(
                "{} protects {} who is not on their roster; the slot is wasted",
                league.team_label(&foreign.owner_id),
                league.players.display_name(&foreign.player_id)
            );
            warn!("{message}");
            warnings.push(message);
        }
        for owner in unknown_override_owners(&league.rosters, overrides) {
            let message = format!("protection override for unknown owner {owner} ignored");
            warn!("{message}");
            warnings.push(message);
        }
    }
    if mode == ProtectionMode::Assisted && !plan.fallback_owners.is_empty() {
        let labels: Vec<&str> = plan
            .fallback_owners
            .iter()
            .map(|owner| league.team_label(owner))
            .collect();
        warnings.push(format!(
            "default protections used for {} team(s): {}",
            labels.len(),
            labels.join(", ")
        ));
    }

    let mut outcome = simulate(&league, &settings, &plan.protections)?;
    info!(
        losses = outcome.total_losses(),
        pool = outcome.pool.len(),
        picks = outcome.picks.len(),
        "simulation complete"
    );

    let mut used_advisor_draft = false;
    if config.assistant.assisted_draft {
        match advisor {
            Some(advisor) => {
                match assisted_draft(advisor, &league, &settings, &outcome.pool).await {
                    Some(teams) => {
                        outcome.replace_draft(teams, settings.format);
                        used_advisor_draft = true;
                    }
                    None => warnings.push(format!(
                        "advisor draft rejected; {} allocation kept",
                        settings.format.display_str().to_lowercase()
                    )),
                }
            }
            None => {
                warn!("assisted draft requested without an API key");
                warnings.push(format!(
                    "assisted draft needs an API key; {} allocation kept",
                    settings.format.display_str().to_lowercase()
                ));
            }
        }
    }

    Ok(DraftReport {
        league,
        settings,
        mode,
        outcome,
        assisted_owners: plan.assisted_owners,
        fallback_owners: plan.fallback_owners,
        assisted_draft: used_advisor_draft,
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Program entry
// ---------------------------------------------------------------------------

/// Wire the real collaborators, run the draft, export, then present.
pub async fn run(config: Config, cli: &Cli) -> anyhow::Result<()> {
    let sleeper = SleeperClient::new(
        &config.sleeper.base_url,
        Duration::from_secs(config.sleeper.timeout_secs),
    )
    .context("failed to build Sleeper client")?;
    let source = CachedSource::with_ttl_secs(sleeper, config.sleeper.cache_ttl_secs);

    let llm_client = LlmClient::from_key(
        config.credentials.anthropic_api_key.as_deref(),
        &config.assistant.model,
    );
    match &llm_client {
        LlmClient::Active(_) => info!("LLM client initialized (API key configured)"),
        LlmClient::Disabled => info!("LLM client disabled (no API key)"),
    }
    let claude = ClaudeAdvisor::new(llm_client, config.assistant.max_tokens);
    let wants_advisor =
        config.protection.mode == ProtectionMode::Assisted || config.assistant.assisted_draft;
    let advisor: Option<&dyn Advisor> = if wants_advisor && claude.is_active() {
        Some(&claude)
    } else {
        None
    };

    let report = run_draft(&config, &source, advisor).await?;
    let tables = report.tables();

    let mut exported = None;
    if let Some(dir) = &config.export_dir {
        let written = export::export_all(dir, &tables)
            .with_context(|| format!("failed to export CSV files to {}", dir.display()))?;
        exported = Some((dir.clone(), written.len()));
    }

    if cli.no_tui {
        print!("{}", summary::render(&report, &tables));
        if let Some((dir, count)) = &exported {
            println!("Exported {} file(s) to {}", count, dir.display());
        }
        return Ok(());
    }

    let mut view_state = ViewState::from_report(&report, tables);
    view_state.export_note = exported
        .map(|(dir, count)| format!("{} CSV file(s) in {}", count, dir.display()));
    tui::run(view_state).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

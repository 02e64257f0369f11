// Configuration loading and parsing (draft.toml, credentials.toml).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use expansion_core::allocate::DraftFormat;
use expansion_core::caps::PositionCaps;
use expansion_core::player::Position;
use expansion_core::protection::ProtectionMode;
use expansion_core::simulation::SimulationSettings;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_PROTECT_LIMIT: usize = 20;
pub const MAX_EXPANSION_TEAMS: usize = 4;
pub const MAX_PICKS_PER_TEAM: usize = 50;

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league_id: String,
    pub draft: DraftConfig,
    pub position_caps: PositionCapsConfig,
    pub protection: ProtectionConfig,
    pub assistant: AssistantConfig,
    pub sleeper: SleeperConfig,
    pub export_dir: Option<PathBuf>,
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DraftConfig {
    pub max_protect: usize,
    pub num_teams: usize,
    pub picks_per_team: usize,
    pub format: DraftFormat,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionCapsConfig {
    /// Cap for any position without an explicit entry.
    #[serde(default)]
    pub other: Option<usize>,
    /// Position label -> cap.
    #[serde(default)]
    pub positions: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionConfig {
    pub mode: ProtectionMode,
    /// Owner id -> protected player ids, in preference order.
    pub overrides: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Ask the advisor to distribute the pool instead of the standard order.
    #[serde(default)]
    pub assisted_draft: bool,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SleeperConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Config {
    /// Core simulation parameters derived from this config.
    pub fn simulation_settings(&self) -> SimulationSettings {
        SimulationSettings {
            max_protect: self.draft.max_protect,
            num_teams: self.draft.num_teams,
            picks_per_team: self.draft.picks_per_team,
            format: self.draft.format,
            caps: self.position_caps.to_caps(),
        }
    }
}

impl PositionCapsConfig {
    pub fn to_caps(&self) -> PositionCaps {
        let mut caps = PositionCaps::new();
        for (label, cap) in &self.positions {
            caps.set(Position::from_str_pos(label), *cap);
        }
        caps.set_other(self.other);
        caps
    }
}

// ---------------------------------------------------------------------------
// draft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire draft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct DraftFile {
    league: LeagueSection,
    draft: DraftSection,
    #[serde(default)]
    position_caps: PositionCapsConfig,
    #[serde(default)]
    protection: ProtectionSection,
    assistant: AssistantConfig,
    sleeper: SleeperConfig,
    #[serde(default)]
    export: ExportSection,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    league_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DraftSection {
    max_protect: usize,
    num_teams: usize,
    picks_per_team: usize,
    format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProtectionSection {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    overrides: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ExportSection {
    #[serde(default)]
    dir: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub anthropic_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/draft.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- draft.toml (required) ---
    let draft_path = config_dir.join("draft.toml");
    let draft_text = read_file(&draft_path)?;
    let file: DraftFile = toml::from_str(&draft_text).map_err(|e| ConfigError::ParseError {
        path: draft_path.clone(),
        source: e,
    })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let format = parse_format(&file.draft.format)?;
    let mode = match file.protection.mode.as_deref() {
        None => ProtectionMode::Default,
        Some(raw) => ProtectionMode::from_str_mode(raw).ok_or_else(|| {
            ConfigError::ValidationError {
                field: "protection.mode".into(),
                message: format!("expected \"default\", \"manual\" or \"assisted\", got {raw:?}"),
            }
        })?,
    };

    let export_dir = match file.export.dir.trim() {
        "" => None,
        dir => Some(PathBuf::from(dir)),
    };

    let config = Config {
        league_id: file.league.league_id.trim().to_string(),
        draft: DraftConfig {
            max_protect: file.draft.max_protect,
            num_teams: file.draft.num_teams,
            picks_per_team: file.draft.picks_per_team,
            format,
        },
        position_caps: file.position_caps,
        protection: ProtectionConfig {
            mode,
            overrides: file.protection.overrides,
        },
        assistant: file.assistant,
        sleeper: file.sleeper,
        export_dir,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Files under `config/` that can be seeded from `defaults/`.
const SEEDED_FILES: [&str; 2] = ["draft.toml", "credentials.toml"];

/// Copy each of the app's config files that is missing from `config/` but
/// present in `defaults/`. Existing files are never touched, and anything
/// else in `defaults/` (such as `.example` templates) is left alone.
///
/// Returns the files that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (false, false) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "no defaults/ or config/ directory under {}; \
                     start expansion-draft from the project root",
                    base_dir.display()
                ),
            })
        }
        (false, true) => return Ok(Vec::new()),
        _ => {}
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| seed_error("create", &config_dir, e))?;

    let mut copied = Vec::new();
    for name in SEEDED_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if !source.is_file() || target.exists() {
            continue;
        }
        std::fs::copy(&source, &target).map_err(|e| seed_error("copy", &source, e))?;
        info!(file = %target.display(), "config file seeded from defaults");
        copied.push(target);
    }

    Ok(copied)
}

fn seed_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("failed to {action} {}: {e}", path.display()),
    }
}

/// Load config relative to the current working directory, copying default
/// files into place first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Parse a draft format name, reporting the field on failure.
pub fn parse_format(raw: &str) -> Result<DraftFormat, ConfigError> {
    DraftFormat::from_str_format(raw).ok_or_else(|| ConfigError::ValidationError {
        field: "draft.format".into(),
        message: format!("expected \"snake\" or \"linear\", got {raw:?}"),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check value ranges. Also run after command-line overrides are applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league_id.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.league_id".into(),
            message: "must not be empty".into(),
        });
    }

    let ranges: &[(&str, usize, usize, usize)] = &[
        ("draft.max_protect", config.draft.max_protect, 0, MAX_PROTECT_LIMIT),
        ("draft.num_teams", config.draft.num_teams, 1, MAX_EXPANSION_TEAMS),
        (
            "draft.picks_per_team",
            config.draft.picks_per_team,
            1,
            MAX_PICKS_PER_TEAM,
        ),
    ];
    for (name, val, min, max) in ranges {
        if !(*min..=*max).contains(val) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be between {min} and {max}, got {val}"),
            });
        }
    }

    if config.assistant.max_tokens == 0 {
        return Err(ConfigError::ValidationError {
            field: "assistant.max_tokens".into(),
            message: "must be > 0".into(),
        });
    }

    if config.sleeper.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "sleeper.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.sleeper.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "sleeper.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

/// Config built from the shipped defaults, for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    let dir = std::env::temp_dir().join(format!(
        "expansion_test_config_{}_{:?}",
        std::process::id(),
        std::thread::current().id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("config")).unwrap();
    std::fs::write(
        dir.join("config/draft.toml"),
        include_str!("../defaults/draft.toml"),
    )
    .unwrap();
    let config = load_config_from(&dir).unwrap();
    let _ = std::fs::remove_dir_all(&dir);
    config
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

// Command-line flags layered over config/draft.toml.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config, ConfigError};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "expansion-draft")]
#[command(about = "Simulate an expansion draft for a Sleeper dynasty league")]
pub struct Cli {
    /// Sleeper league id (overrides league.league_id).
    #[arg(long)]
    pub league: Option<String>,

    /// Draft format: snake or linear (overrides draft.format).
    #[arg(long)]
    pub format: Option<String>,

    #[arg(long, help = "Print a plain-text summary instead of the interactive view")]
    pub no_tui: bool,

    /// Directory for CSV exports (overrides export.dir).
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

impl Cli {
    /// Apply flag overrides to a loaded config and re-validate.
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(league) = &self.league {
            config.league_id = league.trim().to_string();
        }
        if let Some(raw) = &self.format {
            config.draft.format = config::parse_format(raw)?;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = Some(dir.clone());
        }
        config::validate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use expansion_core::allocate::DraftFormat;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "expansion-draft",
            "--league",
            "42",
            "--format",
            "Linear",
            "--no-tui",
            "--export-dir",
            "/tmp/out",
        ]);
        assert_eq!(cli.league.as_deref(), Some("42"));
        assert_eq!(cli.format.as_deref(), Some("Linear"));
        assert!(cli.no_tui);
        assert_eq!(cli.export_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let cli = Cli::parse_from(["expansion-draft"]);
        assert!(cli.league.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.no_tui);
        assert!(cli.export_dir.is_none());
    }

    #[test]
    fn apply_overrides_config() {
        let mut config = test_config();
        let cli = Cli::parse_from([
            "expansion-draft",
            "--league",
            " 777 ",
            "--format",
            "LINEAR",
            "--export-dir",
            "out",
        ]);
        cli.apply(&mut config).unwrap();
        assert_eq!(config.league_id, "777");
        assert_eq!(config.draft.format, DraftFormat::Linear);
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn apply_rejects_bad_format() {
        let mut config = test_config();
        let cli = Cli::parse_from(["expansion-draft", "--format", "auction"]);
        match cli.apply(&mut config).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "draft.format"),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn apply_rejects_blank_league() {
        let mut config = test_config();
        let cli = Cli::parse_from(["expansion-draft", "--league", "  "]);
        assert!(cli.apply(&mut config).is_err());
    }
}

// Error types shared by the expansion draft core.

use std::fmt;

use thiserror::Error;

/// An owner whose manual protection list does not have the required size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionViolation {
    pub owner_id: String,
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for ProtectionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} protected {} (expected {})",
            self.owner_id, self.actual, self.expected
        )
    }
}

#[derive(Debug, Error)]
pub enum ExpansionError {
    #[error("manual protections must list exactly {expected} players per team: {}", join_violations(.violations))]
    ProtectionCount {
        expected: usize,
        violations: Vec<ProtectionViolation>,
    },

    #[error("invalid setting `{field}`: {message}")]
    InvalidSetting { field: String, message: String },
}

fn join_violations(violations: &[ProtectionViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

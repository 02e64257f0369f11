// Claude-backed implementation of the core `Advisor` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use expansion_core::suggest::{Advisor, DraftRequest, ProtectionRequest};

use crate::client::LlmClient;
use crate::prompt;

/// Sends protection and draft requests to Claude and returns the raw text.
pub struct ClaudeAdvisor {
    client: LlmClient,
    max_tokens: u32,
}

impl ClaudeAdvisor {
    pub fn new(client: LlmClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    pub fn is_active(&self) -> bool {
        self.client.is_active()
    }
}

#[async_trait]
impl Advisor for ClaudeAdvisor {
    async fn suggest_protections(&self, request: &ProtectionRequest) -> anyhow::Result<String> {
        let user = prompt::build_protection_prompt(request);
        debug!(owner = %request.owner_id, prompt_len = user.len(), "requesting protections");
        let completion = self
            .client
            .complete(&prompt::protection_system_prompt(), &user, self.max_tokens)
            .await?;
        info!(
            owner = %request.owner_id,
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "protection suggestion received"
        );
        Ok(completion.text)
    }

    async fn suggest_draft(&self, request: &DraftRequest) -> anyhow::Result<String> {
        let user = prompt::build_draft_prompt(request);
        debug!(pool = request.pool.len(), prompt_len = user.len(), "requesting draft assignment");
        // A full assignment names every pooled player, so allow more room.
        let budget = self.max_tokens.max(request.pool.len() as u32 * 16);
        let completion = self
            .client
            .complete(&prompt::draft_system_prompt(), &user, budget)
            .await?;
        info!(
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "draft suggestion received"
        );
        Ok(completion.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expansion_core::allocate::DraftFormat;

    #[tokio::test]
    async fn disabled_advisor_returns_errors() {
        let advisor = ClaudeAdvisor::new(LlmClient::Disabled, 512);
        assert!(!advisor.is_active());

        let protection = ProtectionRequest {
            owner_id: "u1".into(),
            team_label: "Team".into(),
            roster: Vec::new(),
            max_protect: 1,
            position_caps: Vec::new(),
            other_cap: None,
        };
        assert!(advisor.suggest_protections(&protection).await.is_err());

        let draft = DraftRequest {
            team_labels: vec!["Expansion Team 1".into()],
            picks_per_team: 1,
            format: DraftFormat::Linear,
            pool: Vec::new(),
        };
        assert!(advisor.suggest_draft(&draft).await.is_err());
    }
}

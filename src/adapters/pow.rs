use crate::adapters::memory::MemoryCache;
use crate::config::toml_config::PowSettings;
use crate::domain::model::CHALLENGE_COUNT;
use crate::domain::ports::PowValidator;
use crate::utils::error::{Result, RibbitError};
use async_trait::async_trait;
use spow::pow::Pow;
use std::sync::OnceLock;

static POW_SECRET: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Seeds the process-wide challenge secret. Safe to call more than once.
pub fn init_secret() -> Result<()> {
    POW_SECRET
        .get_or_init(|| Pow::init_random().map_err(|e| format!("{:?}", e)))
        .clone()
        .map_err(|message| RibbitError::PowError { message })
}

/// A fresh batch of challenges for the publish form.
pub fn issue_challenges(settings: &PowSettings) -> Result<Vec<String>> {
    (0..CHALLENGE_COUNT)
        .map(|_| {
            Pow::with_difficulty(settings.difficulty.into(), settings.valid_secs.into())
                .map(|pow| pow.to_string())
                .map_err(|e| RibbitError::PowError {
                    message: format!("{:?}", e),
                })
        })
        .collect()
}

#[async_trait]
impl PowValidator for MemoryCache {
    async fn is_valid_pow(&self, challenges: &[String; CHALLENGE_COUNT]) -> bool {
        let mut spent = Vec::with_capacity(CHALLENGE_COUNT);
        for (i, solution) in challenges.iter().enumerate() {
            // spow 以位元組位置切字串，非 ASCII 會 panic
            if !solution.is_ascii() {
                tracing::debug!("Challenge #{} is not ASCII", i);
                return false;
            }
            match Pow::validate(solution) {
                Ok(challenge) => spent.push(challenge.to_string()),
                Err(e) => {
                    tracing::debug!("Challenge #{} failed validation: {:?}", i, e);
                    return false;
                }
            }
        }

        // Keyed by the issued challenge, so another counter for the same
        // challenge is still a replay.
        if !self.spend_challenges(&spent).await {
            tracing::warn!("⚠️ Replayed proof-of-work challenge rejected");
            return false;
        }
        true
    }
}

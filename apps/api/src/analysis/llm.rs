use async_trait::async_trait;
use tracing::{info, warn};

use crate::analysis::prompts::{record_mood_tool, MOOD_ANALYSIS_MAX_TOKENS, MOOD_ANALYSIS_SYSTEM};
use crate::analysis::{validate_analysis_payload, MoodAnalysis, MoodAnalyzer};
use crate::errors::ServiceError;
use crate::llm_client::{LlmClient, LlmError, ToolSpec};

/// Claude-backed analyzer: forces a `record_mood` tool call and validates it.
pub struct LlmMoodAnalyzer {
    llm: LlmClient,
    tool: ToolSpec,
}

impl LlmMoodAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            tool: record_mood_tool(),
        }
    }
}

#[async_trait]
impl MoodAnalyzer for LlmMoodAnalyzer {
    async fn analyze(&self, text: &str) -> Result<MoodAnalysis, ServiceError> {
        let input = self
            .llm
            .call_with_tool(text, MOOD_ANALYSIS_SYSTEM, &self.tool, MOOD_ANALYSIS_MAX_TOKENS)
            .await
            .map_err(|e| {
                warn!("Mood analysis failed: {e}");
                map_llm_error(&e)
            })?;

        let analysis = validate_analysis_payload(&input)?;
        info!(energy = analysis.energy, "Mood analysis complete");
        Ok(analysis)
    }
}

/// Translates an LLM failure into the user-facing taxonomy.
///
/// Credential problems (401/403) are reported as the AI being unavailable so
/// that configuration details never reach the user.
pub fn map_llm_error(error: &LlmError) -> ServiceError {
    match error {
        LlmError::Api {
            status: 429,
            retry_after,
            ..
        } => ServiceError::RateLimited {
            retry_after: *retry_after,
        },
        LlmError::Api { status: 529, .. } => ServiceError::AiUnavailable,
        LlmError::Api { status: 400, .. } => ServiceError::InvalidInput,
        LlmError::Api {
            status: 401 | 403, ..
        } => ServiceError::AiUnavailable,
        LlmError::Api { .. } => ServiceError::Unknown,
        LlmError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
            ServiceError::Network
        }
        LlmError::Http(_) | LlmError::MissingToolUse(_) => ServiceError::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, retry_after: Option<u64>) -> LlmError {
        LlmError::Api {
            status,
            message: "boom".to_string(),
            retry_after,
        }
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        assert_eq!(
            map_llm_error(&api(429, Some(20))),
            ServiceError::RateLimited {
                retry_after: Some(20)
            }
        );
    }

    #[test]
    fn test_overloaded_maps_to_unavailable() {
        assert_eq!(map_llm_error(&api(529, None)), ServiceError::AiUnavailable);
    }

    #[test]
    fn test_bad_request_maps_to_invalid_input() {
        assert_eq!(map_llm_error(&api(400, None)), ServiceError::InvalidInput);
    }

    #[test]
    fn test_auth_failures_are_hidden() {
        assert_eq!(map_llm_error(&api(401, None)), ServiceError::AiUnavailable);
        assert_eq!(map_llm_error(&api(403, None)), ServiceError::AiUnavailable);
    }

    #[test]
    fn test_other_statuses_are_unknown() {
        assert_eq!(map_llm_error(&api(500, None)), ServiceError::Unknown);
        assert_eq!(map_llm_error(&api(404, None)), ServiceError::Unknown);
    }

    #[test]
    fn test_missing_tool_use_is_unknown() {
        assert_eq!(
            map_llm_error(&LlmError::MissingToolUse("record_mood".into())),
            ServiceError::Unknown
        );
    }
}

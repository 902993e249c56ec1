//! LLM request/response types for Ezora
//!
//! Provider-agnostic: a single-turn prompt with an optional structured
//! output format. Each provider client maps these onto its own wire format.

use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction (rendered from the `system` template)
    pub system_prompt: String,

    /// User prompt (rendered from the `itinerary` template)
    pub prompt: String,

    /// Requested output format
    pub response_format: ResponseFormat,

    /// Max tokens for response (capped by config)
    pub max_tokens: u32,
}

/// Output format requested from the model
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Free-form text
    Text,
    /// JSON conforming to the given schema
    ///
    /// The schema is written in the Gemini dialect (upper-case type names).
    Json { name: String, schema: serde_json::Value },
}

impl ResponseFormat {
    /// Create a JSON response format with the given schema
    pub fn json(name: impl Into<String>, schema: serde_json::Value) -> Self {
        let name = name.into();
        debug!(%name, "ResponseFormat::json: called");
        Self::Json { name, schema }
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Convenience constructor for a plain text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    Safety,
    Other(String),
}

impl StopReason {
    /// Parse from Gemini `finishReason`
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "StopReason::from_gemini: called");
        match s {
            "STOP" => {
                debug!("StopReason::from_gemini: EndTurn");
                StopReason::EndTurn
            }
            "MAX_TOKENS" => {
                debug!("StopReason::from_gemini: MaxTokens");
                StopReason::MaxTokens
            }
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => {
                debug!("StopReason::from_gemini: Safety");
                StopReason::Safety
            }
            other => {
                debug!(%other, "StopReason::from_gemini: unrecognized reason");
                StopReason::Other(other.to_string())
            }
        }
    }

    /// Parse from OpenAI `finish_reason`
    pub fn from_openai(s: &str) -> Self {
        debug!(%s, "StopReason::from_openai: called");
        match s {
            "stop" => StopReason::EndTurn,
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::Safety,
            other => StopReason::Other(other.to_string()),
        }
    }
}

/// Token usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

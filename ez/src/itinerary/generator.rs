//! Itinerary request builder
//!
//! Turns a [`TripRequest`] into one structured-output LLM call and parses
//! the answer into an [`ItineraryResult`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use super::schema::{SCHEMA_NAME, itinerary_schema};
use super::types::{ItineraryResult, TripRequest};
use crate::config::PlannerConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError, ResponseFormat};
use crate::prompts::{PromptContext, PromptLoader};

/// Errors from a single itinerary generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport failure or non-success status from the service
    #[error("generation failed: {0}")]
    Failed(#[from] LlmError),

    #[error("empty response")]
    EmptyResponse,

    /// Body was not JSON, or did not match the itinerary shape
    #[error("failed to parse itinerary: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but the day list breaks its invariants
    #[error("invalid itinerary: {0}")]
    InvalidShape(String),

    #[error("failed to build prompt: {0}")]
    Prompt(String),
}

impl GenerationError {
    /// Message suitable for showing to the traveler
    pub fn user_message(&self) -> String {
        match self {
            Self::Failed(e) if e.is_rate_limit() => {
                "The planning service is busy right now. Please try again in a moment.".to_string()
            }
            Self::Failed(_) => "Failed to generate itinerary. Please try again.".to_string(),
            Self::EmptyResponse => "The planner returned an empty answer. Please try again.".to_string(),
            Self::Parse(_) | Self::InvalidShape(_) => {
                "The planner returned an itinerary we could not read. Please try again.".to_string()
            }
            Self::Prompt(e) => format!("The planner is misconfigured: {}", e),
        }
    }

    /// HTTP status behind a service failure, for diagnostics
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Failed(e) => e.status(),
            _ => None,
        }
    }
}

/// The seam between the planner and whatever produces itineraries
#[async_trait]
pub trait GenerateItinerary: Send + Sync {
    /// Produce an itinerary for the request; at most one outbound call
    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResult, GenerationError>;
}

/// Parse a service response body into an itinerary
///
/// No repair is attempted: the body must be exactly one JSON document of
/// the requested shape.
pub fn parse_itinerary(text: &str) -> Result<ItineraryResult, GenerationError> {
    debug!(text_len = text.len(), "parse_itinerary: called");
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let result: ItineraryResult = serde_json::from_str(text)?;
    result.check_days().map_err(GenerationError::InvalidShape)?;
    Ok(result)
}

/// LLM-backed itinerary generator
pub struct ItineraryGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    planner: PlannerConfig,
    max_tokens: u32,
}

impl ItineraryGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, planner: PlannerConfig, max_tokens: u32) -> Self {
        debug!(model = %llm.model(), %max_tokens, "ItineraryGenerator::new: called");
        Self {
            llm,
            prompts,
            planner,
            max_tokens,
        }
    }

    /// Build the completion request for a trip
    pub fn build_request(&self, request: &TripRequest) -> Result<CompletionRequest, GenerationError> {
        debug!(destination = %request.destination, "ItineraryGenerator::build_request: called");
        let context = PromptContext::new(request, &self.planner);
        let render = |name: &str| {
            self.prompts
                .render(name, &context)
                .map_err(|e| GenerationError::Prompt(e.to_string()))
        };

        Ok(CompletionRequest {
            system_prompt: render("system")?,
            prompt: render("itinerary")?,
            response_format: ResponseFormat::json(SCHEMA_NAME, itinerary_schema()),
            max_tokens: self.max_tokens,
        })
    }
}

#[async_trait]
impl GenerateItinerary for ItineraryGenerator {
    async fn generate(&self, request: &TripRequest) -> Result<ItineraryResult, GenerationError> {
        debug!(destination = %request.destination, days = request.days, "ItineraryGenerator::generate: called");
        let completion = self.build_request(request)?;

        let response = self.llm.complete(completion).await?;
        debug!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "ItineraryGenerator::generate: response received"
        );

        let text = response.content.ok_or(GenerationError::EmptyResponse)?;
        let result = parse_itinerary(&text)?;
        info!(
            title = %result.title,
            days = result.days.len(),
            "Generated itinerary for {}",
            request.destination
        );
        Ok(result)
    }
}

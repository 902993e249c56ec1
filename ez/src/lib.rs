//! Ezora - AI trip planner for Ezora Tours
//!
//! Collects trip parameters, asks a generative-language service for a
//! structured multi-day itinerary, and presents it day by day.
//!
//! - [`planner`] - the Collecting / Pending / Presenting state machine
//! - [`itinerary`] - trip request, itinerary model, generation
//! - [`llm`] - provider clients behind the `LlmClient` seam
//! - [`tui`] - terminal front end

pub mod catalog;
pub mod cli;
pub mod config;
pub mod itinerary;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod report;
pub mod tui;

pub use config::Config;
pub use itinerary::{GenerateItinerary, GenerationError, ItineraryGenerator, ItineraryResult, TravelStyle, TripRequest};
pub use llm::{LlmClient, LlmError};
pub use planner::{PlannerController, PlannerError, PlannerPhase, PlannerState};

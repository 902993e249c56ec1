//! Itinerary domain
//!
//! - [`types`] - trip request and itinerary data model
//! - [`schema`] - JSON output schema requested from the service
//! - [`generator`] - prompt building, the single service call, parsing

mod generator;
pub mod schema;
mod types;

pub use generator::{GenerateItinerary, GenerationError, ItineraryGenerator, parse_itinerary};
pub use schema::itinerary_schema;
pub use types::{
    AccommodationOption, Activity, BudgetBreakdown, DayPlan, ItineraryResult, PracticalTips, TransportInfo,
    TravelStyle, TripField, TripRequest,
};

//! Trip request and itinerary data model
//!
//! `TripRequest` is what the traveler fills in. `ItineraryResult` and its
//! parts mirror the JSON shape requested from the generative service; the
//! serde renames are the wire names, the Rust names are ours.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Travel style, drives hotel category and pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelStyle {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl TravelStyle {
    /// All styles in display order
    pub const ALL: [TravelStyle; 3] = [TravelStyle::Budget, TravelStyle::Moderate, TravelStyle::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Moderate => "Moderate",
            Self::Luxury => "Luxury",
        }
    }

    /// Next style, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::Budget => Self::Moderate,
            Self::Moderate => Self::Luxury,
            Self::Luxury => Self::Budget,
        }
    }

    /// Previous style, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Self::Budget => Self::Luxury,
            Self::Moderate => Self::Budget,
            Self::Luxury => Self::Moderate,
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "TravelStyle::from_str: called");
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "moderate" => Ok(Self::Moderate),
            "luxury" => Ok(Self::Luxury),
            _ => Err(format!("Unknown travel style: {}. Use: budget, moderate, or luxury", s)),
        }
    }
}

/// One editable field of the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    OriginCity,
    Destination,
    Days,
    Travelers,
    Budget,
    Style,
    Interests,
}

impl TripField {
    /// All fields in form order
    pub const ALL: [TripField; 7] = [
        TripField::OriginCity,
        TripField::Destination,
        TripField::Days,
        TripField::Travelers,
        TripField::Budget,
        TripField::Style,
        TripField::Interests,
    ];

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            Self::OriginCity => "Start City",
            Self::Destination => "Destination",
            Self::Days => "Duration (Days)",
            Self::Travelers => "Travelers",
            Self::Budget => "Budget (Total)",
            Self::Style => "Travel Style",
            Self::Interests => "Interests & Preferences",
        }
    }

    /// Example input shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::OriginCity => "e.g., New York",
            Self::Destination => "e.g., Paris, France",
            Self::Budget => "e.g. 2000 USD",
            Self::Interests => "e.g., Food tours, hiking, historical sites, museums, avoiding crowds...",
            Self::Days | Self::Travelers | Self::Style => "",
        }
    }

    /// Whether submission requires this field to be non-empty
    pub fn is_required(&self) -> bool {
        matches!(self, Self::OriginCity | Self::Destination | Self::Budget)
    }

    /// Whether the field holds free text
    pub fn is_text(&self) -> bool {
        matches!(self, Self::OriginCity | Self::Destination | Self::Budget | Self::Interests)
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User-supplied trip parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub origin_city: String,
    pub destination: String,
    /// Trip length, always >= 1
    pub days: u32,
    /// Party size, always >= 1
    pub travelers: u32,
    /// Total budget as typed, e.g. "2000 USD"
    pub budget_text: String,
    pub style: TravelStyle,
    pub interests: String,
}

impl TripRequest {
    pub const DEFAULT_DAYS: u32 = 5;
    pub const DEFAULT_TRAVELERS: u32 = 2;

    /// Required fields that are still empty (whitespace counts as empty)
    pub fn missing_fields(&self) -> Vec<TripField> {
        let missing: Vec<TripField> = [
            (TripField::OriginCity, &self.origin_city),
            (TripField::Destination, &self.destination),
            (TripField::Budget, &self.budget_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        debug!(?missing, "TripRequest::missing_fields: computed");
        missing
    }

    /// Whether every required field is filled in
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Current value of a field as display text
    pub fn field_text(&self, field: TripField) -> String {
        match field {
            TripField::OriginCity => self.origin_city.clone(),
            TripField::Destination => self.destination.clone(),
            TripField::Days => self.days.to_string(),
            TripField::Travelers => self.travelers.to_string(),
            TripField::Budget => self.budget_text.clone(),
            TripField::Style => self.style.to_string(),
            TripField::Interests => self.interests.clone(),
        }
    }
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            origin_city: String::new(),
            destination: String::new(),
            days: Self::DEFAULT_DAYS,
            travelers: Self::DEFAULT_TRAVELERS,
            budget_text: String::new(),
            style: TravelStyle::default(),
            interests: String::new(),
        }
    }
}

/// A single scheduled activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Display time, e.g. "09:00" or "Late morning"
    pub time: String,
    #[serde(rename = "activity")]
    pub description: String,
    pub location: String,
}

/// One day of the itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number, unique within a result
    #[serde(rename = "day")]
    pub day_number: u32,
    pub theme: String,
    #[serde(rename = "morning")]
    pub morning_activities: Vec<Activity>,
    #[serde(rename = "afternoon")]
    pub afternoon_activities: Vec<Activity>,
    #[serde(rename = "evening")]
    pub evening_activities: Vec<Activity>,
    #[serde(rename = "localTips")]
    pub local_tip: String,
}

impl DayPlan {
    /// The three time slots with their labels, in order
    pub fn slots(&self) -> [(&'static str, &[Activity]); 3] {
        [
            ("Morning", self.morning_activities.as_slice()),
            ("Afternoon", self.afternoon_activities.as_slice()),
            ("Evening", self.evening_activities.as_slice()),
        ]
    }
}

/// A recommended place to stay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationOption {
    pub name: String,
    /// Hotel, hostel, boutique, ...
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "approxCost")]
    pub approx_cost_per_night: String,
    #[serde(rename = "whyRecommended")]
    pub rationale: String,
}

/// Getting to the destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    /// Primary mode, e.g. "Flight"
    pub mode: String,
    /// Specific details, e.g. the route
    pub options: String,
    pub duration: String,
    pub approx_cost: String,
}

/// Cost buckets, all free-form currency text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub stay: String,
    pub travel: String,
    pub food: String,
    pub sightseeing: String,
    pub buffer: String,
    pub total_estimate: String,
}

impl BudgetBreakdown {
    /// Labeled buckets in display order, excluding the total
    pub fn buckets(&self) -> [(&'static str, &str); 5] {
        [
            ("Stay", self.stay.as_str()),
            ("Travel", self.travel.as_str()),
            ("Food", self.food.as_str()),
            ("Sightseeing", self.sightseeing.as_str()),
            ("Buffer", self.buffer.as_str()),
        ]
    }
}

/// Destination-wide advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticalTips {
    pub weather: String,
    pub safety: String,
    pub packing: String,
}

/// The structured multi-day plan returned by the generative service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    #[serde(rename = "tripTitle")]
    pub title: String,
    pub summary: String,
    pub days: Vec<DayPlan>,
    #[serde(rename = "accommodation")]
    pub accommodations: Vec<AccommodationOption>,
    pub transport: TransportInfo,
    pub budget: BudgetBreakdown,
    pub practical_tips: PracticalTips,
}

impl ItineraryResult {
    /// Look up a day by its number
    pub fn day(&self, day_number: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Whether `day_number` names a day in this result
    pub fn has_day(&self, day_number: u32) -> bool {
        self.day(day_number).is_some()
    }

    /// Day numbers in result order
    pub fn day_numbers(&self) -> Vec<u32> {
        self.days.iter().map(|d| d.day_number).collect()
    }

    /// Lowest day number, the default selection
    pub fn first_day_number(&self) -> Option<u32> {
        self.days.iter().map(|d| d.day_number).min()
    }

    /// Check the day invariants: non-empty, numbers >= 1 and unique
    pub fn check_days(&self) -> Result<(), String> {
        if self.days.is_empty() {
            return Err("itinerary contains no days".to_string());
        }

        let mut seen = HashSet::new();
        for day in &self.days {
            if day.day_number == 0 {
                return Err("day numbers must start at 1".to_string());
            }
            if !seen.insert(day.day_number) {
                return Err(format!("day {} appears more than once", day.day_number));
            }
        }
        Ok(())
    }
}

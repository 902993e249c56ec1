//! Planner state
//!
//! Pure data: the three phases of the planner and what each one carries.

use std::fmt;

use crate::itinerary::{ItineraryResult, TripRequest};

/// Phase tag of a [`PlannerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerPhase {
    /// Editing the trip form
    Collecting,
    /// Waiting for the itinerary service
    Pending,
    /// Showing an itinerary
    Presenting,
}

impl fmt::Display for PlannerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Collecting => "collecting",
            Self::Pending => "pending",
            Self::Presenting => "presenting",
        };
        write!(f, "{}", name)
    }
}

/// Planner state with per-phase payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerState {
    Collecting {
        request: TripRequest,
        /// Message from the last failed generation, cleared on the next edit
        last_error: Option<String>,
    },
    Pending {
        request: TripRequest,
        /// Identifies the in-flight submission; completions with any other ticket are stale
        ticket: u64,
    },
    Presenting {
        request: TripRequest,
        result: ItineraryResult,
        /// Always a day number present in `result`
        active_day: u32,
    },
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::Collecting {
            request: TripRequest::default(),
            last_error: None,
        }
    }
}

impl PlannerState {
    pub fn phase(&self) -> PlannerPhase {
        match self {
            Self::Collecting { .. } => PlannerPhase::Collecting,
            Self::Pending { .. } => PlannerPhase::Pending,
            Self::Presenting { .. } => PlannerPhase::Presenting,
        }
    }

    /// The trip request every phase carries
    pub fn request(&self) -> &TripRequest {
        match self {
            Self::Collecting { request, .. } | Self::Pending { request, .. } | Self::Presenting { request, .. } => {
                request
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_collecting_with_defaults() {
        let state = PlannerState::default();
        assert_eq!(state.phase(), PlannerPhase::Collecting);
        assert_eq!(state.request(), &TripRequest::default());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(PlannerPhase::Collecting.to_string(), "collecting");
        assert_eq!(PlannerPhase::Pending.to_string(), "pending");
        assert_eq!(PlannerPhase::Presenting.to_string(), "presenting");
    }
}

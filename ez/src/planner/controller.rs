//! Planner controller
//!
//! Owns the [`PlannerState`] and enforces its transitions. Generation runs
//! outside the controller: `submit` hands back a [`Submission`] that the
//! caller drives (spawned task, or awaited inline), and the resulting
//! [`Completion`] is fed back through `complete`. Tickets tie each
//! completion to the submission that produced it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::{PlannerPhase, PlannerState};
use crate::itinerary::{
    DayPlan, GenerateItinerary, GenerationError, ItineraryResult, TravelStyle, TripField, TripRequest,
};

/// Default upper bound for trip length
pub const DEFAULT_MAX_DAYS: u32 = 30;

fn join_labels(fields: &[TripField]) -> String {
    fields.iter().map(|f| f.label()).collect::<Vec<_>>().join(", ")
}

/// Errors from planner operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    #[error("missing required fields: {}", join_labels(.missing))]
    IncompleteRequest { missing: Vec<TripField> },

    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: PlannerPhase,
    },

    #[error("day {0} is not part of this itinerary")]
    UnknownDay(u32),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: TripField, value: String },

    #[error("planner is closed")]
    Closed,
}

/// What `complete` did with a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Result accepted, now presenting
    Presented,
    /// Generation failed, back to collecting with a visible error
    Failed,
    /// Planner was closed while pending; result dropped, request kept
    Discarded,
    /// Ticket does not match the pending submission; ignored
    Stale,
}

/// Result of running a [`Submission`]
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub outcome: Result<ItineraryResult, GenerationError>,
}

/// A single in-flight generation, detached from the controller
pub struct Submission {
    ticket: u64,
    request: TripRequest,
    generator: Arc<dyn GenerateItinerary>,
}

impl Submission {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn request(&self) -> &TripRequest {
        &self.request
    }

    /// Run the generation; exactly one call into the generator
    pub async fn run(self) -> Completion {
        debug!(ticket = self.ticket, "Submission::run: called");
        let outcome = self.generator.generate(&self.request).await;
        Completion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// State machine behind the trip planner
pub struct PlannerController {
    state: PlannerState,
    open: bool,
    generator: Arc<dyn GenerateItinerary>,
    next_ticket: u64,
    max_days: u32,
}

impl PlannerController {
    /// New controller, closed, collecting with default request values
    pub fn new(generator: Arc<dyn GenerateItinerary>) -> Self {
        debug!("PlannerController::new: called");
        Self {
            state: PlannerState::default(),
            open: false,
            generator,
            next_ticket: 1,
            max_days: DEFAULT_MAX_DAYS,
        }
    }

    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days.max(1);
        self
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    // --- visibility ---

    /// Show the planner; whatever state it had is shown again
    pub fn open(&mut self) {
        debug!(phase = %self.phase(), open = self.open, "PlannerController::open: called");
        self.open = true;
    }

    /// Hide the planner without touching its state
    ///
    /// Only `reset` clears the form or result. A completion arriving while
    /// closed is discarded.
    pub fn close(&mut self) {
        debug!(phase = %self.phase(), "PlannerController::close: called");
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    // --- accessors ---

    pub fn phase(&self) -> PlannerPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn request(&self) -> &TripRequest {
        self.state.request()
    }

    pub fn result(&self) -> Option<&ItineraryResult> {
        match &self.state {
            PlannerState::Presenting { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn active_day(&self) -> Option<u32> {
        match &self.state {
            PlannerState::Presenting { active_day, .. } => Some(*active_day),
            _ => None,
        }
    }

    /// The day currently shown
    pub fn active_day_plan(&self) -> Option<&DayPlan> {
        match &self.state {
            PlannerState::Presenting { result, active_day, .. } => result.day(*active_day),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            PlannerState::Collecting { last_error, .. } => last_error.as_deref(),
            _ => None,
        }
    }

    /// Ticket of the in-flight submission
    pub fn pending_ticket(&self) -> Option<u64> {
        match &self.state {
            PlannerState::Pending { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    // --- editing ---

    fn request_mut(&mut self, operation: &'static str) -> Result<&mut TripRequest, PlannerError> {
        match &mut self.state {
            PlannerState::Collecting { request, last_error } => {
                *last_error = None;
                Ok(request)
            }
            other => Err(PlannerError::InvalidState {
                operation,
                phase: other.phase(),
            }),
        }
    }

    pub fn set_origin_city(&mut self, value: impl Into<String>) -> Result<(), PlannerError> {
        self.request_mut("edit origin city")?.origin_city = value.into();
        Ok(())
    }

    pub fn set_destination(&mut self, value: impl Into<String>) -> Result<(), PlannerError> {
        self.request_mut("edit destination")?.destination = value.into();
        Ok(())
    }

    /// Set trip length, clamped to `1..=max_days`
    pub fn set_days(&mut self, days: u32) -> Result<(), PlannerError> {
        let days = days.clamp(1, self.max_days);
        self.request_mut("edit days")?.days = days;
        Ok(())
    }

    /// Set party size, at least one
    pub fn set_travelers(&mut self, travelers: u32) -> Result<(), PlannerError> {
        self.request_mut("edit travelers")?.travelers = travelers.max(1);
        Ok(())
    }

    pub fn set_budget(&mut self, value: impl Into<String>) -> Result<(), PlannerError> {
        self.request_mut("edit budget")?.budget_text = value.into();
        Ok(())
    }

    pub fn set_style(&mut self, style: TravelStyle) -> Result<(), PlannerError> {
        self.request_mut("edit style")?.style = style;
        Ok(())
    }

    pub fn set_interests(&mut self, value: impl Into<String>) -> Result<(), PlannerError> {
        self.request_mut("edit interests")?.interests = value.into();
        Ok(())
    }

    /// Set any field from text input
    ///
    /// Numeric fields must parse as positive integers; style accepts any
    /// case of its names.
    pub fn set_field_text(&mut self, field: TripField, text: &str) -> Result<(), PlannerError> {
        debug!(?field, "PlannerController::set_field_text: called");
        let invalid = || PlannerError::InvalidValue {
            field,
            value: text.to_string(),
        };
        match field {
            TripField::OriginCity => self.set_origin_city(text),
            TripField::Destination => self.set_destination(text),
            TripField::Budget => self.set_budget(text),
            TripField::Interests => self.set_interests(text),
            TripField::Days => self.set_days(text.trim().parse().map_err(|_| invalid())?),
            TripField::Travelers => self.set_travelers(text.trim().parse().map_err(|_| invalid())?),
            TripField::Style => self.set_style(text.parse().map_err(|_| invalid())?),
        }
    }

    // --- submission ---

    /// Whether `submit` would succeed
    pub fn can_submit(&self) -> bool {
        self.open && matches!(&self.state, PlannerState::Collecting { request, .. } if request.is_complete())
    }

    /// Move to pending and hand back the generation to run
    pub fn submit(&mut self) -> Result<Submission, PlannerError> {
        debug!(phase = %self.phase(), "PlannerController::submit: called");
        if !self.open {
            return Err(PlannerError::Closed);
        }

        let request = match &self.state {
            PlannerState::Collecting { request, .. } => request.clone(),
            other => {
                return Err(PlannerError::InvalidState {
                    operation: "submit",
                    phase: other.phase(),
                });
            }
        };

        let missing = request.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "PlannerController::submit: incomplete request");
            return Err(PlannerError::IncompleteRequest { missing });
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = PlannerState::Pending {
            request: request.clone(),
            ticket,
        };
        info!(ticket, destination = %request.destination, days = request.days, "Planning trip");

        Ok(Submission {
            ticket,
            request,
            generator: self.generator.clone(),
        })
    }

    /// Apply the result of a submission
    pub fn complete(&mut self, completion: Completion) -> CompletionOutcome {
        debug!(ticket = completion.ticket, "PlannerController::complete: called");
        let request = match std::mem::take(&mut self.state) {
            PlannerState::Pending { request, ticket } if ticket == completion.ticket => request,
            other => {
                debug!(phase = %other.phase(), "PlannerController::complete: stale completion ignored");
                self.state = other;
                return CompletionOutcome::Stale;
            }
        };

        if !self.open {
            info!(ticket = completion.ticket, "Planner closed while pending, discarding result");
            self.state = PlannerState::Collecting {
                request,
                last_error: None,
            };
            return CompletionOutcome::Discarded;
        }

        let outcome = completion
            .outcome
            .and_then(|result| result.check_days().map(|_| result).map_err(GenerationError::InvalidShape));

        match outcome {
            Ok(result) => {
                let active_day = result.first_day_number().unwrap_or(1);
                info!(title = %result.title, days = result.days.len(), "Itinerary ready");
                self.state = PlannerState::Presenting {
                    request,
                    result,
                    active_day,
                };
                CompletionOutcome::Presented
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status(), "Itinerary generation failed");
                self.state = PlannerState::Collecting {
                    request,
                    last_error: Some(e.user_message()),
                };
                CompletionOutcome::Failed
            }
        }
    }

    // --- presenting ---

    fn presenting(&self, operation: &'static str) -> Result<(&ItineraryResult, u32), PlannerError> {
        match &self.state {
            PlannerState::Presenting { result, active_day, .. } => Ok((result, *active_day)),
            other => Err(PlannerError::InvalidState {
                operation,
                phase: other.phase(),
            }),
        }
    }

    fn set_active_day(&mut self, day: u32) {
        if let PlannerState::Presenting { active_day, .. } = &mut self.state {
            *active_day = day;
        }
    }

    /// Show a specific day
    pub fn select_day(&mut self, day: u32) -> Result<(), PlannerError> {
        debug!(day, "PlannerController::select_day: called");
        let (result, _) = self.presenting("select day")?;
        if !result.has_day(day) {
            return Err(PlannerError::UnknownDay(day));
        }
        self.set_active_day(day);
        Ok(())
    }

    fn sorted_days(result: &ItineraryResult) -> Vec<u32> {
        let mut days = result.day_numbers();
        days.sort_unstable();
        days
    }

    /// Move to the next day in number order; stays put on the last day
    pub fn next_day(&mut self) -> Result<u32, PlannerError> {
        let (result, active) = self.presenting("change day")?;
        let day = Self::sorted_days(result)
            .into_iter()
            .find(|d| *d > active)
            .unwrap_or(active);
        self.set_active_day(day);
        Ok(day)
    }

    /// Move to the previous day in number order; stays put on the first day
    pub fn previous_day(&mut self) -> Result<u32, PlannerError> {
        let (result, active) = self.presenting("change day")?;
        let day = Self::sorted_days(result)
            .into_iter()
            .rev()
            .find(|d| *d < active)
            .unwrap_or(active);
        self.set_active_day(day);
        Ok(day)
    }

    /// Back to an empty form from any phase
    ///
    /// A pending submission becomes stale: its completion is ignored.
    pub fn reset(&mut self) {
        debug!(phase = %self.phase(), "PlannerController::reset: called");
        if let Some(ticket) = self.pending_ticket() {
            info!(ticket, "Abandoning in-flight itinerary");
        }
        self.state = PlannerState::default();
    }
}

//! Trip planner
//!
//! Collecting -> Pending -> Presenting, with reset back to Collecting.

mod controller;
mod state;

pub use controller::{
    Completion, CompletionOutcome, DEFAULT_MAX_DAYS, PlannerController, PlannerError, Submission,
};
pub use state::{PlannerPhase, PlannerState};

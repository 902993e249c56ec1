//! TUI state
//!
//! Everything the views read. The planner controller is the source of truth
//! for the trip; the rest is screen-local (focus, scroll, spinner).

use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::catalog::{self, Tour};
use crate::itinerary::TripField;
use crate::planner::{PlannerController, Submission};

/// Status lines shown while an itinerary is being generated
pub const PENDING_PHRASES: [&str; 6] = [
    "Calculating best routes...",
    "Checking hotels...",
    "Optimizing budget...",
    "Finding hidden gems...",
    "Balancing the daily pace...",
    "Asking the locals...",
];

/// Ticks between phrase changes
const PHRASE_TICKS: u32 = 12;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Application state
pub struct AppState {
    pub planner: PlannerController,
    /// Focused form field
    pub focus: TripField,
    /// Selected row in the tours table
    pub tour_index: usize,
    /// Vertical scroll of the itinerary view
    pub scroll: u16,
    /// Short-lived hint, cleared on the next key
    pub notice: Option<String>,
    pub should_quit: bool,
    phrase: &'static str,
    tick: u32,
    /// Submission waiting to be spawned by the runner
    outbox: Option<Submission>,
}

impl AppState {
    pub fn new(planner: PlannerController) -> Self {
        debug!("AppState::new: called");
        Self {
            planner,
            focus: TripField::OriginCity,
            tour_index: 0,
            scroll: 0,
            notice: None,
            should_quit: false,
            phrase: PENDING_PHRASES[0],
            tick: 0,
            outbox: None,
        }
    }

    pub fn tours(&self) -> &'static [Tour] {
        catalog::all()
    }

    pub fn selected_tour(&self) -> Option<&'static Tour> {
        self.tours().get(self.tour_index)
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        let notice = notice.into();
        debug!(%notice, "AppState::set_notice: called");
        self.notice = Some(notice);
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Move form focus forward, wrapping
    pub fn focus_next(&mut self) {
        let idx = TripField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = TripField::ALL[(idx + 1) % TripField::ALL.len()];
    }

    /// Move form focus backward, wrapping
    pub fn focus_prev(&mut self) {
        let idx = TripField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = TripField::ALL[(idx + TripField::ALL.len() - 1) % TripField::ALL.len()];
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn queue_submission(&mut self, submission: Submission) {
        debug!(ticket = submission.ticket(), "AppState::queue_submission: called");
        self.phrase = PENDING_PHRASES[0];
        self.tick = 0;
        self.outbox = Some(submission);
    }

    pub fn take_submission(&mut self) -> Option<Submission> {
        self.outbox.take()
    }

    /// Advance the spinner; picks a new phrase every few ticks
    pub fn on_tick(&mut self) {
        trace!("AppState::on_tick: called");
        self.tick = self.tick.wrapping_add(1);
        if self.tick % PHRASE_TICKS == 0
            && let Some(phrase) = PENDING_PHRASES.choose(&mut rand::rng())
        {
            self.phrase = *phrase;
        }
    }

    pub fn phrase(&self) -> &'static str {
        self.phrase
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.tick as usize % SPINNER.len()]
    }
}

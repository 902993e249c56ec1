//! TUI application - key handling
//!
//! The App owns the AppState and translates keys into planner operations.
//! Rendering lives in the views module; spawning lives in the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use super::state::AppState;
use crate::itinerary::{TravelStyle, TripField};
use crate::planner::{Completion, CompletionOutcome, PlannerController, PlannerError, PlannerPhase};

/// TUI application
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(planner: PlannerController) -> Self {
        debug!("App::new: called");
        Self {
            state: AppState::new(planner),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C quit");
            self.state.should_quit = true;
            return true;
        }

        self.state.clear_notice();

        if !self.state.planner.is_open() {
            self.handle_home_key(key);
        } else if key.code == KeyCode::Esc {
            debug!("App::handle_key: closing planner");
            self.state.planner.close();
        } else {
            match self.state.planner.phase() {
                PlannerPhase::Collecting => self.handle_form_key(key),
                PlannerPhase::Pending => debug!("App::handle_key: pending, key ignored"),
                PlannerPhase::Presenting => self.handle_result_key(key),
            }
        }

        self.state.should_quit
    }

    /// Apply a finished generation
    pub fn on_completion(&mut self, completion: Completion) -> CompletionOutcome {
        debug!(ticket = completion.ticket, "App::on_completion: called");
        let outcome = self.state.planner.complete(completion);
        if outcome == CompletionOutcome::Presented {
            self.state.scroll = 0;
        }
        outcome
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_home_key: called");
        let last = self.state.tours().len().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('p') | KeyCode::Enter => {
                info!("Opening planner");
                self.state.planner.open();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.tour_index = (self.state.tour_index + 1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.tour_index = self.state.tour_index.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        debug!(?key, focus = ?self.state.focus, "App::handle_form_key: called");
        match key.code {
            KeyCode::Tab | KeyCode::Down => return self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => return self.state.focus_prev(),
            KeyCode::Enter => return self.submit(),
            _ => {}
        }

        let field = self.state.focus;
        let result = if field.is_text() {
            self.edit_text(field, key)
        } else if field == TripField::Style {
            self.edit_style(key)
        } else {
            self.edit_number(field, key)
        };

        if let Err(e) = result {
            self.state.set_notice(e.to_string());
        }
    }

    fn submit(&mut self) {
        debug!("App::submit: called");
        match self.state.planner.submit() {
            Ok(submission) => self.state.queue_submission(submission),
            Err(PlannerError::IncompleteRequest { missing }) => {
                let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                self.state.set_notice(format!("Please fill in: {}", labels.join(", ")));
                if let Some(first) = missing.first() {
                    self.state.focus = *first;
                }
            }
            Err(e) => self.state.set_notice(e.to_string()),
        }
    }

    fn edit_text(&mut self, field: TripField, key: KeyEvent) -> Result<(), PlannerError> {
        let mut text = self.state.planner.request().field_text(field);
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => text.clear(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return Ok(()),
        }
        self.state.planner.set_field_text(field, &text)
    }

    fn edit_style(&mut self, key: KeyEvent) -> Result<(), PlannerError> {
        let style = self.state.planner.request().style;
        let next = match key.code {
            KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('+') | KeyCode::Char('l') => style.next(),
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => style.prev(),
            KeyCode::Char('b') => TravelStyle::Budget,
            KeyCode::Char('m') => TravelStyle::Moderate,
            KeyCode::Char('x') => TravelStyle::Luxury,
            _ => return Ok(()),
        };
        self.state.planner.set_style(next)
    }

    fn edit_number(&mut self, field: TripField, key: KeyEvent) -> Result<(), PlannerError> {
        let request = self.state.planner.request();
        let current = match field {
            TripField::Days => request.days,
            _ => request.travelers,
        };
        let value = match key.code {
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => current.saturating_add(1),
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => current.saturating_sub(1),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                current.saturating_mul(10).saturating_add(digit)
            }
            KeyCode::Backspace => current / 10,
            _ => return Ok(()),
        };
        match field {
            TripField::Days => self.state.planner.set_days(value),
            _ => self.state.planner.set_travelers(value),
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_result_key: called");
        let result = match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.state.planner.next_day().map(|_| ()),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.state.planner.previous_day().map(|_| ()),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let day = c.to_digit(10).unwrap_or(0);
                self.state.planner.select_day(day)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.scroll_down(1);
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.scroll_up(1);
                return;
            }
            KeyCode::PageDown => {
                self.state.scroll_down(10);
                return;
            }
            KeyCode::PageUp => {
                self.state.scroll_up(10);
                return;
            }
            KeyCode::Char('r') => {
                info!("Planning another trip");
                self.state.planner.reset();
                self.state.focus = TripField::OriginCity;
                self.state.scroll = 0;
                return;
            }
            _ => return,
        };

        match result {
            Ok(()) => self.state.scroll = 0,
            Err(e) => self.state.set_notice(e.to_string()),
        }
    }
}

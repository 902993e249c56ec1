//! TUI runner - main loop
//!
//! Draws, waits on terminal events and on finished generations, and spawns
//! submissions queued by the App onto tokio.

use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::app::App;
use super::events::{Event, EventHandler};
use super::{Tui, views};
use crate::planner::{Completion, PlannerController, Submission};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Owns the terminal and drives the App
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    tasks: Vec<JoinHandle<()>>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, planner: PlannerController) -> Self {
        debug!("TuiRunner::new: called");
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            terminal,
            app: App::new(planner),
            event_handler: EventHandler::new(TICK_RATE),
            completion_tx,
            completion_rx,
            tasks: Vec::new(),
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => self.app.state_mut().on_tick(),
                        Event::Key(key) => {
                            if self.app.handle_key(key) {
                                break;
                            }
                            if let Some(submission) = self.app.state_mut().take_submission() {
                                self.spawn_submission(submission);
                            }
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(completion) = self.completion_rx.recv() => {
                    let outcome = self.app.on_completion(completion);
                    debug!(?outcome, "TuiRunner::run: completion applied");
                }
            }

            if self.app.state().should_quit {
                break;
            }
        }

        self.abort_tasks();
        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    fn spawn_submission(&mut self, submission: Submission) {
        let ticket = submission.ticket();
        info!(ticket, "Spawning itinerary generation");
        let tx = self.completion_tx.clone();
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(tokio::spawn(async move {
            let completion = submission.run().await;
            if tx.send(completion).is_err() {
                warn!(ticket, "Completion dropped, runner is gone");
            }
        }));
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

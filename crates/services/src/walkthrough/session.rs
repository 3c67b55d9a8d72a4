use std::future;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use wayfind_core::Clock;
use wayfind_core::model::SessionId;
use wayfind_core::stepper::{Instruction, NavigationStepper, StepperError, StepperPhase};

use super::snapshot::WalkthroughSnapshot;
use crate::config::SimulationSettings;
use crate::error::WalkthroughError;

enum Command {
    GoToStep {
        index: usize,
        reply: oneshot::Sender<Result<Instruction, StepperError>>,
    },
    Next,
    Previous,
    ToggleDebug,
    SetDebug(bool),
}

//
// ─── SESSION HANDLE ────────────────────────────────────────────────────────────
//

/// One running walkthrough.
///
/// The stepper lives inside a single spawned task together with its tick
/// interval and completion delay. Stopping (or dropping) the handle ends that
/// task, so no timer can fire against progress that has been torn down.
pub struct WalkthroughSession {
    id: SessionId,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<WalkthroughSnapshot>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl WalkthroughSession {
    /// Spawn the walkthrough task on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn start(stepper: NavigationStepper, settings: SimulationSettings, clock: Clock) -> Self {
        let id = SessionId::new_random();
        let started_at = clock.now();
        let initial = WalkthroughSnapshot::capture(id, &stepper, started_at, None);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();

        info!(
            session = %id,
            route = stepper.route().name(),
            steps = stepper.route().len(),
            "walkthrough started"
        );

        let runner = Runner {
            id,
            stepper,
            settings,
            clock,
            started_at,
            arrived_at: None,
            snapshots: snapshot_tx,
        };
        let task = tokio::spawn(runner.run(command_rx, stop_rx));

        Self {
            id,
            commands: command_tx,
            snapshots: snapshot_rx,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> WalkthroughSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WalkthroughSnapshot> {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn send(&self, command: Command) -> Result<(), WalkthroughError> {
        self.commands
            .send(command)
            .map_err(|_| WalkthroughError::Closed)
    }

    /// Jump to a step and restart its leg.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::Stepper` for an out-of-range index (progress
    /// is kept) or `WalkthroughError::Closed` if the session has stopped.
    pub async fn go_to_step(&self, index: usize) -> Result<Instruction, WalkthroughError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::GoToStep { index, reply })?;
        let result = response.await.map_err(|_| WalkthroughError::Closed)?;
        Ok(result?)
    }

    /// # Errors
    ///
    /// Returns `WalkthroughError::Closed` if the session has stopped.
    pub fn next(&self) -> Result<(), WalkthroughError> {
        self.send(Command::Next)
    }

    /// # Errors
    ///
    /// Returns `WalkthroughError::Closed` if the session has stopped.
    pub fn previous(&self) -> Result<(), WalkthroughError> {
        self.send(Command::Previous)
    }

    /// # Errors
    ///
    /// Returns `WalkthroughError::Closed` if the session has stopped.
    pub fn toggle_debug(&self) -> Result<(), WalkthroughError> {
        self.send(Command::ToggleDebug)
    }

    /// # Errors
    ///
    /// Returns `WalkthroughError::Closed` if the session has stopped.
    pub fn set_debug(&self, enabled: bool) -> Result<(), WalkthroughError> {
        self.send(Command::SetDebug(enabled))
    }

    /// Cancel all timers and wait for the task to finish.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(session = %self.id, error = %err, "walkthrough task ended abnormally");
            }
        }
        info!(session = %self.id, "walkthrough stopped");
    }
}

impl Drop for WalkthroughSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(session = %self.id, "walkthrough aborted on drop");
        }
    }
}

impl std::fmt::Debug for WalkthroughSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkthroughSession")
            .field("id", &self.id)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

struct Runner {
    id: SessionId,
    stepper: NavigationStepper,
    settings: SimulationSettings,
    clock: Clock,
    started_at: DateTime<Utc>,
    arrived_at: Option<DateTime<Utc>>,
    snapshots: watch::Sender<WalkthroughSnapshot>,
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => future::pending().await,
    }
}

impl Runner {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut stop: oneshot::Receiver<()>,
    ) {
        let period = self.settings.tick_period();
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut advance_at: Option<Instant> = None;

        loop {
            if advance_at.is_none() && matches!(self.stepper.phase(), StepperPhase::LegComplete(_)) {
                advance_at = Some(Instant::now() + self.settings.completion_delay());
            }
            self.publish();

            let walking = matches!(self.stepper.phase(), StepperPhase::Walking(_));
            tokio::select! {
                biased;

                _ = &mut stop => break,

                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if self.apply(command) {
                        advance_at = None;
                        ticker.reset();
                    }
                }

                () = sleep_until_opt(advance_at) => {
                    advance_at = None;
                    if self.stepper.advance_if_leg_complete() {
                        let instruction = self.stepper.current_instruction();
                        info!(
                            session = %self.id,
                            step = instruction.step_index,
                            direction = %instruction.direction,
                            "advanced to next step"
                        );
                        ticker.reset();
                    }
                }

                _ = ticker.tick(), if walking => {
                    let remaining = self.stepper.tick(self.settings.tick_decrement());
                    debug!(session = %self.id, remaining, "tick");
                }
            }
        }

        debug!(session = %self.id, "walkthrough task finished");
    }

    /// Returns `true` when the current leg was restarted.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::GoToStep { index, reply } => {
                let result = self.stepper.go_to_step(index);
                let restarted = result.is_ok();
                if let Err(err) = &result {
                    warn!(session = %self.id, error = %err, "rejected step navigation");
                }
                let _ = reply.send(result);
                restarted
            }
            Command::Next => {
                self.stepper.next_step();
                true
            }
            Command::Previous => {
                self.stepper.previous_step();
                true
            }
            Command::ToggleDebug => {
                let enabled = self.stepper.toggle_debug();
                debug!(session = %self.id, enabled, "debug mode toggled");
                false
            }
            Command::SetDebug(enabled) => {
                self.stepper.set_debug(enabled);
                false
            }
        }
    }

    fn publish(&mut self) {
        if self.stepper.phase().is_arrived() {
            if self.arrived_at.is_none() {
                self.arrived_at = Some(self.clock.now());
                info!(session = %self.id, route = self.stepper.route().name(), "arrived");
            }
        } else {
            self.arrived_at = None;
        }

        let next =
            WalkthroughSnapshot::capture(self.id, &self.stepper, self.started_at, self.arrived_at);
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

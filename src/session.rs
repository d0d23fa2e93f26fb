//! Game session controller
//!
//! Owns the session state, the input gate, the drawable surface and the
//! host scheduler registrations. Two host callbacks drive it while running:
//! `on_frame` (tick + render, once per presented frame) and `on_second`
//! (countdown). Both ignore stale invocations once the session is no longer
//! running, and every transition out of `Running` cancels both registrations
//! before touching state.

use serde::{Deserialize, Serialize};

use crate::consts::{COUNTDOWN_INTERVAL_MS, MAX_SUBSTEPS, SIM_DT};
use crate::error::StartError;
use crate::platform::{FrameHandle, IntervalHandle, ManualScheduler, Scheduler};
use crate::renderer::{Surface, draw_frame};
use crate::settings::{FramePacing, Settings};
use crate::sim::{
    Action, GameState, HeldActions, InputGate, PlayerIdentity, SessionPhase, countdown, tick,
};
use crate::tuning::Tuning;

/// Final outcome of a play-through, for display by the surrounding page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub name: String,
    pub contact: String,
    pub score: u64,
    pub duration_secs: u32,
    pub seed: u64,
}

pub struct GameSession<S: Scheduler, D: Surface> {
    state: GameState,
    settings: Settings,
    held: HeldActions,
    gate: InputGate,
    scheduler: S,
    surface: D,
    frame: Option<FrameHandle>,
    countdown: Option<IntervalHandle>,
    /// Unsimulated real time (seconds) under `FramePacing::Fixed`
    accumulator: f32,
    last_frame_ms: Option<f64>,
}

impl<S: Scheduler, D: Surface> GameSession<S, D> {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, scheduler: S, surface: D) -> Self {
        let mut session = Self {
            state: GameState::new(seed, tuning),
            settings,
            held: HeldActions::default(),
            gate: InputGate::default(),
            scheduler,
            surface,
            frame: None,
            countdown: None,
            accumulator: 0.0,
            last_frame_ms: None,
        };
        session.render();
        session
    }

    /// Validate identity and begin running. Rejected input changes nothing.
    pub fn start(&mut self, name: &str, contact: &str) -> Result<(), StartError> {
        if self.state.phase != SessionPhase::NotStarted {
            let e = StartError::NotReady(self.state.phase);
            log::warn!("Start rejected: {}", e);
            return Err(e);
        }
        let identity = match PlayerIdentity::new(name, contact) {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("Start rejected: {}", e);
                return Err(e);
            }
        };

        self.cancel_callbacks();
        self.state.start(identity)?;
        self.clear_input();
        self.accumulator = 0.0;
        self.last_frame_ms = None;

        self.frame = self.scheduler.request_frame();
        self.countdown = self.scheduler.start_interval(COUNTDOWN_INTERVAL_MS);
        log::info!(
            "Session started for {} (seed {}, {}s)",
            name.trim(),
            self.state.seed,
            self.state.seconds_remaining
        );
        Ok(())
    }

    /// Frame callback: sample input, tick, render, re-register.
    pub fn on_frame(&mut self, now_ms: f64) {
        // The host consumed this registration by invoking us
        self.frame = None;
        if !self.state.is_running() {
            return;
        }

        for _ in 0..self.ticks_for_frame(now_ms) {
            let input = self.gate.sample(
                &self.held,
                now_ms,
                self.state.player.resting,
                &self.state.tuning,
            );
            tick(&mut self.state, &input);
        }
        self.render();

        if self.state.is_running() {
            self.frame = self.scheduler.request_frame();
        }
    }

    /// Interval callback: one real second has passed.
    pub fn on_second(&mut self) {
        if !self.state.is_running() {
            return;
        }
        if countdown(&mut self.state) {
            self.cancel_callbacks();
            self.clear_input();
            self.render();
        }
    }

    /// Abandon the play-through (from `Running` or `Ended`) and return to
    /// `NotStarted` with a fresh layout.
    pub fn reset(&mut self) {
        self.cancel_callbacks();
        self.state.reset();
        self.clear_input();
        self.accumulator = 0.0;
        self.last_frame_ms = None;
        self.render();
        log::info!("Session reset");
    }

    pub fn key_down(&mut self, action: Action) {
        self.held.press(action);
    }

    pub fn key_up(&mut self, action: Action) {
        self.held.release(action);
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply new preferences and redraw. Switching pacing drops any
    /// accumulated frame time.
    pub fn set_settings(&mut self, settings: Settings) {
        if settings.frame_pacing != self.settings.frame_pacing {
            self.accumulator = 0.0;
            self.last_frame_ms = None;
        }
        log::info!("Settings changed: {:?}", settings);
        self.settings = settings;
        self.render();
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Outcome once the countdown has run out
    pub fn result(&self) -> Option<SessionResult> {
        if self.state.phase != SessionPhase::Ended {
            return None;
        }
        let identity = self.state.identity.as_ref()?;
        Some(SessionResult {
            name: identity.name.clone(),
            contact: identity.contact.clone(),
            score: self.state.score,
            duration_secs: self.state.elapsed_secs(),
            seed: self.state.seed,
        })
    }

    pub fn render(&mut self) {
        draw_frame(&mut self.surface, &self.state, &self.settings);
    }

    fn ticks_for_frame(&mut self, now_ms: f64) -> u32 {
        let elapsed = self
            .last_frame_ms
            .map(|last| ((now_ms - last) / 1000.0) as f32)
            .unwrap_or(SIM_DT);
        self.last_frame_ms = Some(now_ms);

        match self.settings.frame_pacing {
            FramePacing::PerFrame => 1,
            FramePacing::Fixed => {
                self.accumulator += elapsed.clamp(0.0, 0.1);
                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    self.accumulator -= SIM_DT;
                    substeps += 1;
                }
                substeps
            }
        }
    }

    fn cancel_callbacks(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(handle) = self.countdown.take() {
            self.scheduler.clear_interval(handle);
        }
    }

    fn clear_input(&mut self) {
        self.held.clear();
        self.gate = InputGate::default();
    }
}

impl<D: Surface> GameSession<ManualScheduler, D> {
    /// Deliver the pending frame callback, if any
    pub fn pump_frame(&mut self, now_ms: f64) -> bool {
        if !self.scheduler.fire_frame() {
            return false;
        }
        self.on_frame(now_ms);
        true
    }

    /// Deliver one interval tick, if the interval is registered
    pub fn pump_second(&mut self) -> bool {
        if !self.scheduler.fire_interval() {
            return false;
        }
        self.on_second();
        true
    }
}

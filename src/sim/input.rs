//! Player input: held actions and cooldown-gated intents
//!
//! The host reports key-down/key-up; every tick the gate turns the currently
//! held actions into at most one horizontal step and one jump, honoring the
//! minimum real-time gap between accepted moves and between accepted jumps.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Logical actions the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::Left),
            "ArrowRight" | "d" | "D" => Some(Action::Right),
            "ArrowUp" | " " | "w" | "W" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Which actions are currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl HeldActions {
    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, action: Action, down: bool) {
        match action {
            Action::Left => self.left = down,
            Action::Right => self.right = down,
            Action::Jump => self.jump = down,
        }
    }

    /// -1 for left, 1 for right, 0 when neither or both are held
    fn direction(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Discrete horizontal step: -1, 0 or 1
    pub step: i8,
    /// Jump requested (only honored while resting)
    pub jump: bool,
}

/// Timestamp gate between held keys and accepted intents
#[derive(Debug, Clone, Copy, Default)]
pub struct InputGate {
    last_move_ms: Option<f64>,
    last_jump_ms: Option<f64>,
}

impl InputGate {
    /// Consume this tick's intents. `can_jump` is whether the player is
    /// resting; a jump that cannot happen does not start the cooldown.
    pub fn sample(
        &mut self,
        held: &HeldActions,
        now_ms: f64,
        can_jump: bool,
        tuning: &Tuning,
    ) -> TickInput {
        let mut input = TickInput::default();

        let direction = held.direction();
        if direction != 0 && cooled_down(self.last_move_ms, now_ms, tuning.move_cooldown_ms) {
            input.step = direction;
            self.last_move_ms = Some(now_ms);
        }

        if held.jump && can_jump && cooled_down(self.last_jump_ms, now_ms, tuning.jump_cooldown_ms) {
            input.jump = true;
            self.last_jump_ms = Some(now_ms);
        }

        input
    }
}

fn cooled_down(last: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    last.is_none_or(|t| now_ms - t >= cooldown_ms)
}

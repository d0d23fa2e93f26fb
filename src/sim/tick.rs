//! Per-frame simulation tick and the once-per-second countdown
//!
//! Integration uses fixed per-tick increments, not elapsed time, so the
//! simulation speed follows the host's frame rate unless the session runs
//! with `FramePacing::Fixed`.

use super::collision::resolve_landing;
use super::generate::generate_batch;
use super::input::TickInput;
use super::state::{GameState, SessionPhase};
use crate::consts::*;

/// Advance the session by one tick. Does nothing unless `Running`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != SessionPhase::Running {
        return;
    }

    state.time_ticks += 1;
    let tuning = state.tuning;

    // Discrete horizontal step and jump
    let player = &mut state.player;
    if input.step != 0 {
        let x = player.pos.x + f32::from(input.step) * tuning.move_step;
        player.pos.x = x.clamp(0.0, WORLD_WIDTH - player.size.x);
    }
    if input.jump && player.resting {
        player.vy = -tuning.jump_velocity;
        player.resting = false;
    }

    // Gravity
    player.vy = (player.vy + tuning.gravity).min(tuning.max_fall_speed);
    player.pos.y += player.vy;

    resolve_landing(&mut state.player, &state.platforms, tuning.landing_tolerance);

    if state.player.pos.y - state.watermark <= tuning.generation_trigger {
        generate_batch(state);
    }

    update_camera(state);

    let climbed = ((SPAWN_Y - state.player.pos.y) / SCORE_UNIT).floor().max(0.0) as u64;
    state.score = state.score.max(climbed);

    // Fell off the world: respawn, not a failure
    if state.player.pos.y > OUT_OF_BOUNDS_Y {
        log::debug!("Player fell out of bounds at y={}, respawning", state.player.pos.y);
        state.player.respawn();
        state.camera_offset = 0.0;
    }
}

/// Camera offset that keeps the player at the anchor line
pub fn camera_target(player_y: f32) -> f32 {
    (CAMERA_ANCHOR_Y - player_y).max(0.0)
}

/// Snap when the player is near the top of the view, otherwise ease
fn update_camera(state: &mut GameState) {
    let target = camera_target(state.player.pos.y);
    let screen_y = state.player.pos.y + state.camera_offset;

    let offset = if screen_y < state.tuning.camera_snap_margin {
        target
    } else {
        state.camera_offset + (target - state.camera_offset) * state.tuning.camera_smoothing
    };
    state.camera_offset = offset.max(0.0);
}

/// One real second elapsed. Returns true if this ended the session.
pub fn countdown(state: &mut GameState) -> bool {
    if state.phase != SessionPhase::Running {
        return false;
    }
    state.seconds_remaining = state.seconds_remaining.saturating_sub(1);
    if state.seconds_remaining == 0 {
        state.phase = SessionPhase::Ended;
        log::info!("Time's up! Final height: {}", state.score);
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Platform, PlayerIdentity};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state
            .start(PlayerIdentity::new("Ada", "a@x.com").unwrap())
            .unwrap();
        state
    }

    #[test]
    fn test_no_tick_unless_running() {
        let mut state = GameState::new(1, Tuning::default());
        let before = state.player;
        tick(&mut state, &TickInput { step: 1, jump: true });
        assert_eq!(state.player, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_resting_on_ground_stays_put() {
        let mut state = running(1);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.resting);
        assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lands_on_platform_below() {
        let mut state = running(1);
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        state.platforms = vec![Platform::ground(), ledge];
        state.player.pos = Vec2::new(120.0, 268.0);
        state.player.vy = 2.0;
        state.player.resting = false;

        tick(&mut state, &TickInput::default());

        assert!(state.player.resting);
        assert_eq!(state.player.bottom(), ledge.top());
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut state = running(1);
        tick(&mut state, &TickInput { step: 0, jump: true });
        assert!(!state.player.resting);
        assert!(state.player.vy < 0.0);
        assert!(state.player.pos.y < SPAWN_Y);
    }

    #[test]
    fn test_jump_reaches_gap_beyond_stepped_peak() {
        // Peak is 138 above the ground; the tolerance covers a 140 gap
        let mut state = running(1);
        let ledge = Platform::ledge(360.0, GROUND_Y - 140.0, 100.0);
        state.platforms = vec![Platform::ground(), ledge];

        tick(&mut state, &TickInput { step: 0, jump: true });
        for _ in 0..40 {
            if state.player.resting {
                break;
            }
            tick(&mut state, &TickInput::default());
        }

        assert!(state.player.resting);
        assert_eq!(state.player.bottom(), ledge.top());
    }

    #[test]
    fn test_jump_ignored_mid_air() {
        let mut state = running(1);
        tick(&mut state, &TickInput { step: 0, jump: true });
        let vy = state.player.vy;
        tick(&mut state, &TickInput { step: 0, jump: true });
        assert_eq!(state.player.vy, vy + state.tuning.gravity);
    }

    #[test]
    fn test_step_is_clamped_to_play_field() {
        let mut state = running(1);
        for _ in 0..50 {
            tick(&mut state, &TickInput { step: -1, jump: false });
        }
        assert_eq!(state.player.pos.x, 0.0);
        for _ in 0..50 {
            tick(&mut state, &TickInput { step: 1, jump: false });
        }
        assert_eq!(state.player.right(), WORLD_WIDTH);
    }

    #[test]
    fn test_out_of_bounds_respawns() {
        let mut state = running(1);
        state.player.pos = Vec2::new(10.0, OUT_OF_BOUNDS_Y + 5.0);
        state.player.vy = 8.0;
        state.player.resting = false;
        state.camera_offset = 40.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(state.player.vy, 0.0);
        assert!(state.player.resting);
        assert_eq!(state.camera_offset, 0.0);
    }

    #[test]
    fn test_generation_near_watermark() {
        let mut state = running(1);
        let count = state.platforms.len();
        let watermark = state.watermark;
        state.player.pos.y = watermark + 150.0;
        state.player.resting = false;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.platforms.len(), count + state.tuning.batch_size);
        assert!(state.watermark < watermark);
    }

    #[test]
    fn test_no_generation_far_from_watermark() {
        let mut state = running(1);
        let count = state.platforms.len();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.platforms.len(), count);
    }

    #[test]
    fn test_camera_eases_when_not_near_top() {
        let mut state = running(1);
        state.platforms.truncate(1);
        state.player.pos.y = 120.0;
        state.player.resting = false;

        tick(&mut state, &TickInput::default());

        let target = camera_target(state.player.pos.y);
        assert!(state.camera_offset > 0.0);
        assert!(state.camera_offset < target);
        assert!((state.camera_offset - target * state.tuning.camera_smoothing).abs() < 1e-4);
    }

    #[test]
    fn test_camera_snaps_near_top() {
        let mut state = running(1);
        state.platforms.truncate(1);
        state.player.pos.y = 40.0;
        state.player.resting = false;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.camera_offset, camera_target(state.player.pos.y));
    }

    #[test]
    fn test_score_tracks_best_height() {
        let mut state = running(1);
        state.platforms.truncate(1);
        state.player.pos.y = SPAWN_Y - 205.0;
        state.player.resting = false;

        tick(&mut state, &TickInput::default());
        // Fell 0.5 during the tick: climbed 204.5 units
        assert_eq!(state.score, 20);

        let best = state.score;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.pos.y > SPAWN_Y - 205.0);
        assert_eq!(state.score, best);
    }

    #[test]
    fn test_countdown_ends_session() {
        let mut state = running(1);
        for _ in 0..119 {
            assert!(!countdown(&mut state));
        }
        assert_eq!(state.seconds_remaining, 1);
        assert!(countdown(&mut state));
        assert_eq!(state.seconds_remaining, 0);
        assert_eq!(state.phase, SessionPhase::Ended);

        // Ended sessions neither tick nor count down
        assert!(!countdown(&mut state));
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput { step: 1, jump: true });
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_fixed_increments_per_tick() {
        // Each tick applies exactly one gravity increment; there is no
        // elapsed-time scaling at this level.
        let mut state = running(1);
        state.platforms.truncate(1);
        state.player.pos.y = 100.0;
        state.player.resting = false;
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        let g = state.tuning.gravity;
        assert_eq!(state.player.vy, 2.0 * g);
        assert_eq!(state.player.pos.y, 100.0 + g + 2.0 * g);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (-1i8..=1, any::<bool>()).prop_map(|(step, jump)| TickInput { step, jump })
    }

    proptest! {
        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..600),
        ) {
            let mut state = running(seed);
            let mut score = state.score;
            let mut watermark = state.watermark;

            for input in &inputs {
                tick(&mut state, input);

                prop_assert!(state.score >= score);
                prop_assert!(state.watermark <= watermark);
                prop_assert!(state.camera_offset >= 0.0);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.right() <= WORLD_WIDTH);
                if state.player.resting {
                    prop_assert_eq!(state.player.vy, 0.0);
                    let bottom = state.player.bottom();
                    prop_assert!(state.platforms.iter().any(|p| p.top() == bottom));
                }

                score = state.score;
                watermark = state.watermark;
            }
        }

        #[test]
        fn prop_countdown_never_increases(seconds in 0u32..200) {
            let mut state = running(9);
            let mut remaining = state.seconds_remaining;
            for _ in 0..seconds {
                countdown(&mut state);
                prop_assert!(state.seconds_remaining <= remaining);
                remaining = state.seconds_remaining;
            }
            prop_assert_eq!(state.phase == SessionPhase::Ended, seconds >= 120);
        }
    }
}

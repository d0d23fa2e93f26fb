//! Procedural platform generation
//!
//! Ledges are stacked upward from the watermark: each one sits a random gap
//! above the previous, with random width and horizontal placement inside the
//! play-field. All coordinates are whole units so landing snaps are exact.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameState, Platform};
use crate::consts::{GROUND_Y, WORLD_WIDTH};
use crate::tuning::Tuning;

/// Ground plus `tuning.initial_platforms` ledges. Returns the new watermark.
pub fn initial_platforms(rng: &mut Pcg32, tuning: &Tuning) -> (Vec<Platform>, f32) {
    let mut platforms = Vec::with_capacity(1 + tuning.initial_platforms);
    platforms.push(Platform::ground());

    let mut watermark = GROUND_Y;
    for _ in 0..tuning.initial_platforms {
        let ledge = next_ledge(rng, tuning, watermark);
        watermark = ledge.top();
        platforms.push(ledge);
    }

    (platforms, watermark)
}

/// Append one batch of ledges above the watermark and advance it
pub fn generate_batch(state: &mut GameState) {
    let before = state.watermark;
    for _ in 0..state.tuning.batch_size {
        let ledge = next_ledge(&mut state.rng, &state.tuning, state.watermark);
        state.watermark = ledge.top();
        state.platforms.push(ledge);
    }
    log::debug!(
        "Generated {} ledges, watermark {} -> {} ({} total)",
        state.tuning.batch_size,
        before,
        state.watermark,
        state.platforms.len()
    );
}

fn next_ledge(rng: &mut Pcg32, tuning: &Tuning, watermark: f32) -> Platform {
    // Whole-unit bounds inside the tuned ranges
    let gap = rng.random_range(tuning.min_gap.ceil()..=tuning.max_gap.floor()).round();
    let width = rng.random_range(tuning.min_width.ceil()..=tuning.max_width.floor()).round();
    let x = rng.random_range(0.0..=WORLD_WIDTH - width).round();
    Platform::ledge(x, watermark - gap, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlatformKind;
    use rand::SeedableRng;

    #[test]
    fn test_initial_platforms_stack_upward() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let (platforms, watermark) = initial_platforms(&mut rng, &tuning);

        assert_eq!(platforms.len(), 1 + tuning.initial_platforms);
        assert_eq!(platforms[0].kind, PlatformKind::Ground);
        assert!(platforms[1..].iter().all(|p| p.kind == PlatformKind::Ledge));
        assert_eq!(watermark, platforms.last().unwrap().top());

        for pair in platforms.windows(2) {
            let gap = pair[0].top() - pair[1].top();
            assert!(gap >= tuning.min_gap && gap <= tuning.max_gap, "gap {}", gap);
        }
    }

    #[test]
    fn test_fractional_bounds_stay_in_range() {
        let tuning = Tuning {
            min_gap: 70.4,
            max_gap: 90.6,
            min_width: 80.5,
            max_width: 99.5,
            initial_platforms: 40,
            ..Default::default()
        };
        tuning.validate().unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        let (platforms, _) = initial_platforms(&mut rng, &tuning);

        for pair in platforms.windows(2) {
            let gap = pair[0].top() - pair[1].top();
            assert!(gap >= tuning.min_gap && gap <= tuning.max_gap, "gap {}", gap);
            assert_eq!(gap, gap.round());
        }
        for ledge in &platforms[1..] {
            assert!(ledge.size.x >= tuning.min_width && ledge.size.x <= tuning.max_width);
        }
    }

    #[test]
    fn test_ledges_stay_inside_play_field() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let (platforms, _) = initial_platforms(&mut rng, &tuning);
        for p in &platforms[1..] {
            assert!(p.pos.x >= 0.0 && p.right() <= WORLD_WIDTH);
            assert!(p.size.x >= tuning.min_width && p.size.x <= tuning.max_width);
            assert_eq!(p.pos.x.fract(), 0.0);
            assert_eq!(p.top().fract(), 0.0);
        }
    }

    #[test]
    fn test_batch_advances_watermark() {
        let mut state = GameState::new(5, Tuning::default());
        let count = state.platforms.len();
        let before = state.watermark;
        generate_batch(&mut state);
        assert_eq!(state.platforms.len(), count + state.tuning.batch_size);
        assert!(state.watermark < before);
        assert_eq!(state.watermark, state.platforms.last().unwrap().top());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(1234, Tuning::default());
        let b = GameState::new(1234, Tuning::default());
        assert_eq!(a.platforms, b.platforms);
    }
}

//! Landing detection and response
//!
//! Platforms are one-way: the player passes through them going up and lands
//! on them coming down.

use super::state::{Platform, Player};

/// Result of a successful landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index into the platform list
    pub platform: usize,
    /// World y the player's feet were snapped to
    pub surface_y: f32,
}

/// Strict horizontal overlap of the two bounding boxes
pub fn overlaps_horizontally(player: &Player, platform: &Platform) -> bool {
    player.pos.x < platform.right() && player.right() > platform.pos.x
}

/// Whether the player lands on this platform this tick.
///
/// The player must be moving downward, overlap horizontally, and have its
/// feet at or below the platform top by no more than the tolerance. The
/// tolerance widens to the current fall speed so one tick of falling cannot
/// skip over a thin platform.
pub fn lands_on(player: &Player, platform: &Platform, tolerance: f32) -> bool {
    if player.vy < 0.0 || !overlaps_horizontally(player, platform) {
        return false;
    }
    let depth = player.bottom() - platform.top();
    depth >= 0.0 && depth <= tolerance.max(player.vy)
}

/// Find the platform the player lands on, preferring the highest surface
pub fn find_landing(player: &Player, platforms: &[Platform], tolerance: f32) -> Option<Landing> {
    platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| lands_on(player, p, tolerance))
        .min_by(|(_, a), (_, b)| a.top().total_cmp(&b.top()))
        .map(|(i, p)| Landing {
            platform: i,
            surface_y: p.top(),
        })
}

/// Snap the player onto the platform it lands on, if any.
///
/// Clears `resting` first; it is only true afterwards when a landing happened.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform], tolerance: f32) -> Option<Landing> {
    player.resting = false;
    let landing = find_landing(player, platforms, tolerance)?;
    player.pos.y = landing.surface_y - player.size.y;
    player.vy = 0.0;
    player.resting = true;
    Some(landing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vy,
            resting: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_lands_within_tolerance() {
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        // Feet 4 units into the ledge, falling
        let mut player = player_at(120.0, 274.0, 3.0);
        let landing = resolve_landing(&mut player, &[ledge], 10.0).unwrap();
        assert_eq!(landing.surface_y, 300.0);
        assert_eq!(player.bottom(), 300.0);
        assert_eq!(player.vy, 0.0);
        assert!(player.resting);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        let mut player = player_at(120.0, 274.0, -5.0);
        assert!(resolve_landing(&mut player, &[ledge], 10.0).is_none());
        assert!(!player.resting);
        assert_eq!(player.pos.y, 274.0);
    }

    #[test]
    fn test_no_landing_when_too_deep() {
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        // 12 units deep with tolerance 10 and a slow fall
        let player = player_at(120.0, 282.0, 1.0);
        assert!(!lands_on(&player, &ledge, 10.0));
    }

    #[test]
    fn test_fast_fall_widens_tolerance() {
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        let player = player_at(120.0, 284.0, 15.0);
        assert!(lands_on(&player, &ledge, 10.0));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let ledge = Platform::ledge(100.0, 300.0, 100.0);
        // Player's right edge exactly at the ledge's left edge
        let player = player_at(70.0, 272.0, 2.0);
        assert!(!overlaps_horizontally(&player, &ledge));
        let player = player_at(71.0, 272.0, 2.0);
        assert!(overlaps_horizontally(&player, &ledge));
    }

    #[test]
    fn test_highest_surface_wins() {
        let upper = Platform::ledge(100.0, 300.0, 100.0);
        let lower = Platform::ledge(100.0, 305.0, 100.0);
        let player = player_at(120.0, 277.0, 2.0);
        let landing = find_landing(&player, &[lower, upper], 10.0).unwrap();
        assert_eq!(landing.platform, 1);
        assert_eq!(landing.surface_y, 300.0);
    }
}

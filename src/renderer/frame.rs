//! The per-frame render pass
//!
//! Order: clear, camera translation, parallax background, visible platforms,
//! player, untranslate, HUD overlay.

use super::Surface;
use crate::consts::{VIEW_HEIGHT, WORLD_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, Platform, PlatformKind, Player, SessionPhase};

/// Fraction of the world scroll the background ridges follow
const PARALLAX_FACTOR: f32 = 0.3;

/// Background ridges in screen space: (x, width, height)
const RIDGES: [(f32, f32, f32); 4] = [
    (-60.0, 320.0, 180.0),
    (200.0, 280.0, 240.0),
    (430.0, 260.0, 150.0),
    (620.0, 260.0, 210.0),
];

const HUD_FONT: &str = "bold 18px sans-serif";
const BANNER_FONT: &str = "bold 28px sans-serif";

/// Colors for one frame
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub sky: &'static str,
    pub ridge: &'static str,
    pub ground: &'static str,
    pub ledge: &'static str,
    pub player: &'static str,
    pub highlight: &'static str,
    pub hud: &'static str,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        sky: "#1e1b4b",
        ridge: "#312e81",
        ground: "#166534",
        ledge: "#65a30d",
        player: "#f97316",
        highlight: "#fed7aa",
        hud: "#f8fafc",
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        sky: "#000000",
        ridge: "#1f1f1f",
        ground: "#ffffff",
        ledge: "#ffff00",
        player: "#ff00ff",
        highlight: "#ffffff",
        hud: "#ffffff",
    };

    pub fn for_settings(settings: &Settings) -> Self {
        if settings.high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }
}

/// World-y span currently on screen: (top, bottom)
pub fn visible_span(camera_offset: f32) -> (f32, f32) {
    let top = -camera_offset;
    (top, top + VIEW_HEIGHT)
}

/// Whether any part of the platform falls inside the span
pub fn is_visible(platform: &Platform, span: (f32, f32)) -> bool {
    platform.bottom() >= span.0 && platform.top() <= span.1
}

/// Draw the whole frame for the current state
pub fn draw_frame<D: Surface + ?Sized>(surface: &mut D, state: &GameState, settings: &Settings) {
    let palette = Palette::for_settings(settings);
    let span = visible_span(state.camera_offset);

    surface.clear(f64::from(WORLD_WIDTH), f64::from(VIEW_HEIGHT));
    surface.save();
    surface.translate(0.0, f64::from(state.camera_offset));

    draw_background(surface, state.camera_offset, settings.parallax, &palette);

    for platform in state.platforms.iter().filter(|p| is_visible(p, span)) {
        draw_platform(surface, platform, &palette);
    }

    draw_player(surface, &state.player, &palette);

    surface.restore();
    draw_hud(surface, state, settings, &palette);
}

fn draw_background<D: Surface + ?Sized>(
    surface: &mut D,
    camera_offset: f32,
    parallax: bool,
    palette: &Palette,
) {
    let (top, _) = visible_span(camera_offset);
    surface.set_fill(palette.sky);
    fill(surface, 0.0, top, WORLD_WIDTH, VIEW_HEIGHT);

    // Ridges sink as the camera climbs, slower than the world scrolls
    let drift = if parallax { camera_offset * PARALLAX_FACTOR } else { 0.0 };
    surface.set_fill(palette.ridge);
    for &(x, width, height) in &RIDGES {
        fill(surface, x, top + VIEW_HEIGHT - height + drift, width, height);
    }
}

fn draw_platform<D: Surface + ?Sized>(surface: &mut D, platform: &Platform, palette: &Palette) {
    let color = match platform.kind {
        PlatformKind::Ground => palette.ground,
        PlatformKind::Ledge => palette.ledge,
    };
    surface.set_fill(color);
    fill(surface, platform.pos.x, platform.pos.y, platform.size.x, platform.size.y);
}

fn draw_player<D: Surface + ?Sized>(surface: &mut D, player: &Player, palette: &Palette) {
    surface.set_fill(palette.player);
    fill(surface, player.pos.x, player.pos.y, player.size.x, player.size.y);

    // Highlight strip along the top edge
    surface.set_fill(palette.highlight);
    fill(
        surface,
        player.pos.x + 4.0,
        player.pos.y + 4.0,
        player.size.x - 8.0,
        6.0,
    );
}

fn draw_hud<D: Surface + ?Sized>(
    surface: &mut D,
    state: &GameState,
    settings: &Settings,
    palette: &Palette,
) {
    surface.set_fill(palette.hud);
    surface.set_font(HUD_FONT);
    surface.fill_text(&format!("Height: {}", state.score), 16.0, 28.0);
    surface.fill_text(
        &format!("Time: {}", format_time(state.seconds_remaining)),
        16.0,
        52.0,
    );

    if settings.show_debug {
        let player = &state.player;
        surface.fill_text(
            &format!(
                "x: {:.0} y: {:.0} vy: {:.1} cam: {:.1} platforms: {}",
                player.pos.x,
                player.pos.y,
                player.vy,
                state.camera_offset,
                state.platforms.len()
            ),
            16.0,
            f64::from(VIEW_HEIGHT) - 16.0,
        );
    }

    let center_x = f64::from(WORLD_WIDTH) / 2.0 - 190.0;
    let center_y = f64::from(VIEW_HEIGHT) / 2.0;
    match state.phase {
        SessionPhase::NotStarted => {
            surface.set_font(BANNER_FONT);
            surface.fill_text("Enter your name and contact", center_x, center_y - 20.0);
            surface.fill_text("then press Start", center_x + 80.0, center_y + 20.0);
        }
        SessionPhase::Ended => {
            surface.set_font(BANNER_FONT);
            surface.fill_text(
                &format!("Time's up! Final height: {}", state.score),
                center_x,
                center_y - 20.0,
            );
            surface.fill_text("Press Reset to play again", center_x + 20.0, center_y + 20.0);
        }
        SessionPhase::Running => {}
    }
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn fill<D: Surface + ?Sized>(surface: &mut D, x: f32, y: f32, width: f32, height: f32) {
    surface.fill_rect(
        f64::from(x),
        f64::from(y),
        f64::from(width),
        f64::from(height),
    );
}

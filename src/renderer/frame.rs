//! Per-frame draw command generation
//!
//! Converts simulation state into a flat list of draw commands a host
//! renderer can consume: path strokes, streak highlights, and sprite draws.
//! Sampling is pull-based: every value is computed from the current tick.

use glam::Vec2;

use crate::config::RaffleConfig;
use crate::consts;
use crate::sim::spiral::SpiralLayout;
use crate::sim::state::{RaffleState, SimError};

/// Canvas clear color (dark gray backdrop)
pub const BACKGROUND: [f32; 4] = rgba8(0x1F, 0x1F, 0x1F, 0xFF);
/// Decorative spiral stroke (warm brown)
pub const SPIRAL_COLOR: [f32; 4] = rgba8(0x5F, 0x31, 0x09, 0xFF);
/// Guide spiral stroke (translucent green, debug only)
pub const GUIDE_COLOR: [f32; 4] = rgba8(0x09, 0x5F, 0x0A, 0x33);
/// Streak highlight (bright amber accent)
pub const STREAK_COLOR: [f32; 4] = rgba8(0xF2, 0xB8, 0x4C, 0xFF);

const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// A stroked polyline
#[derive(Debug, Clone)]
pub struct Stroke {
    pub lane: usize,
    pub points: Vec<Vec2>,
    pub width: f32,
    pub color: [f32; 4],
}

/// An image draw at a computed position and size
#[derive(Debug, Clone)]
pub struct SpriteDraw {
    pub player_id: u32,
    pub image: String,
    pub center: Vec2,
    pub size: Vec2,
}

/// One frame of draw commands, issued back to front
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub strokes: Vec<Stroke>,
    pub streaks: Vec<Stroke>,
    pub sprites: Vec<SpriteDraw>,
}

/// Build the draw commands for the current tick.
///
/// Fails only on the invalid-state contract violation: an active player
/// without an assigned path.
pub fn build_frame(
    state: &RaffleState,
    layout: &SpiralLayout,
    config: &RaffleConfig,
) -> Result<Frame, SimError> {
    let now = state.time_ticks;
    let mut frame = Frame {
        clear_color: BACKGROUND,
        ..Frame::default()
    };

    for path in &layout.decorative {
        frame.strokes.push(Stroke {
            lane: path.lane,
            points: path.points.clone(),
            width: consts::PATH_STROKE_WIDTH,
            color: SPIRAL_COLOR,
        });
        frame.streaks.push(streak(path.lane, &path.points, now));
    }

    if config.draw_guides {
        for path in &layout.guide {
            frame.strokes.push(Stroke {
                lane: path.lane,
                points: path.points.clone(),
                width: consts::PATH_STROKE_WIDTH,
                color: GUIDE_COLOR,
            });
        }
    }

    for &id in &state.active {
        let Some(player) = state.player(id) else {
            continue;
        };
        let center = player.position(now, config.usable_range)?;
        let scale = player
            .scale_at(now)
            .clamp(consts::SPRITE_MIN_SCALE, 1.0);
        frame.sprites.push(SpriteDraw {
            player_id: id,
            image: player.image.clone(),
            center,
            size: Vec2::splat(consts::SPRITE_BASE_SIZE * scale),
        });
    }

    Ok(frame)
}

/// A short highlight window sliding along the decorative curve,
/// advancing with the tick counter and wrapping at the end
fn streak(lane: usize, points: &[Vec2], now: u64) -> Stroke {
    let window = consts::STREAK_WINDOW.min(points.len());
    let span = (points.len() - window).max(1);
    let start = (now as f32 * consts::STREAK_SPEED) as usize % span;
    Stroke {
        lane,
        points: points[start..start + window].to_vec(),
        width: consts::PATH_STROKE_WIDTH * 2.0,
        color: STREAK_COLOR,
    }
}

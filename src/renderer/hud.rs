//! Heads-up display: lives, power-up bars and score

use glam::Vec2;

use super::canvas::{Canvas2d, TextAlign, TextStyle};
use crate::color::Color;
use crate::settings::Settings;
use crate::sim::collision::Rect;
use crate::sim::state::World;

const HEART: &str = "\u{2764}";
const HEART_FONT: &str = "24px Arial";
const HEART_FULL: Color = Color::hex(0xef4444);
const HEART_EMPTY: Color = Color::rgba(0, 0, 0, 0.3);

const BAR_HEIGHT: f32 = 6.0;
const BAR_BG: Color = Color::rgba(0, 0, 0, 0.5);
const CAPTION_FONT: &str = "bold 10px monospace";

const BOOST_BAR_WIDTH: f32 = 60.0;
const BOOST_FILL: Color = Color::hex(0x60a5fa);
const BOOST_CAPTION_DAY: Color = Color::hex(0x1e40af);
const BOOST_CAPTION_NIGHT: Color = Color::hex(0x93c5fd);

const GIANT_BAR_WIDTH: f32 = 80.0;
const GIANT_FILL: Color = Color::hex(0xa855f7);
const GIANT_CAPTION: Color = Color::hex(0xd8b4fe);

const SCORE_FONT: &str = "bold 20px monospace";
const SCORE_DAY: Color = Color::hex(0x334155);
const SCORE_NIGHT: Color = Color::hex(0xe2e8f0);

/// `"HI 00042  00007"`
pub fn score_text(high_score: u64, score: u64) -> String {
    format!("HI {:05}  {:05}", high_score, score)
}

/// Draw the HUD on top of the scene
pub fn draw_hud(canvas: &mut dyn Canvas2d, world: &World, high_score: u64, settings: &Settings) {
    draw_lives(canvas, world);

    let day = world.is_day();
    let player = world.player.rect;
    let timers = world.timers;

    if timers.is_boosted() {
        let caption = if day { BOOST_CAPTION_DAY } else { BOOST_CAPTION_NIGHT };
        draw_bar(
            canvas,
            &player,
            Bar {
                width: BOOST_BAR_WIDTH,
                lift: 15.0,
                fill: timers.jump_boost as f32 / world.tuning.boost_ticks.max(1) as f32,
                color: BOOST_FILL,
                caption: "JUMP UP!",
                caption_color: caption,
            },
        );
    }

    if timers.is_giant() {
        // Stack above the boost bar when both are showing
        let lift = if timers.is_boosted() { 30.0 } else { 15.0 };
        draw_bar(
            canvas,
            &player,
            Bar {
                width: GIANT_BAR_WIDTH,
                lift,
                fill: timers.giant as f32 / world.tuning.giant_ticks.max(1) as f32,
                color: GIANT_FILL,
                caption: "GIANT MODE!",
                caption_color: GIANT_CAPTION,
            },
        );
    }

    let color = match (settings.high_contrast, day) {
        (true, true) => Color::BLACK,
        (true, false) => Color::WHITE,
        (false, true) => SCORE_DAY,
        (false, false) => SCORE_NIGHT,
    };
    let (width, _) = canvas.size();
    canvas.fill_text(
        &score_text(high_score, world.floored_score()),
        Vec2::new(width - 20.0, 30.0),
        &TextStyle {
            font: SCORE_FONT,
            align: TextAlign::Right,
            color,
        },
    );
}

fn draw_lives(canvas: &mut dyn Canvas2d, world: &World) {
    for i in 0..world.tuning.max_lives {
        let color = if i < world.lives { HEART_FULL } else { HEART_EMPTY };
        canvas.fill_text(
            HEART,
            Vec2::new(20.0 + 30.0 * i as f32, 40.0),
            &TextStyle {
                font: HEART_FONT,
                align: TextAlign::Left,
                color,
            },
        );
    }
}

struct Bar {
    width: f32,
    /// Distance above the player's top edge
    lift: f32,
    /// Remaining fraction, clamped to 1
    fill: f32,
    color: Color,
    caption: &'static str,
    caption_color: Color,
}

fn draw_bar(canvas: &mut dyn Canvas2d, player: &Rect, bar: Bar) {
    let x = player.x + (player.w - bar.width) / 2.0;
    let y = player.y - bar.lift;

    canvas.fill_rect(Rect::new(x, y, bar.width, BAR_HEIGHT), BAR_BG);
    canvas.fill_rect(
        Rect::new(x, y, bar.width * bar.fill.min(1.0), BAR_HEIGHT),
        bar.color,
    );
    canvas.fill_text(
        bar.caption,
        Vec2::new(player.x + player.w / 2.0, y - 5.0),
        &TextStyle {
            font: CAPTION_FONT,
            align: TextAlign::Center,
            color: bar.caption_color,
        },
    );
}

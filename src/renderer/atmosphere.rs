//! Sky, parallax forest and ground line
//!
//! The palette follows the day cycle: day → sunset → night, then a single
//! dawn blend back to day. Stars fade in across the evening and out at dawn.

use glam::Vec2;

use super::canvas::{Canvas2d, SpriteId};
use crate::color::Color;
use crate::sim::collision::Rect;
use crate::sim::state::World;
use crate::tuning::DayCycle;

pub const SKY_DAY: Color = Color::rgb(254, 240, 138);
pub const SKY_SUNSET: Color = Color::rgb(251, 146, 60);
pub const SKY_NIGHT: Color = Color::rgb(15, 23, 42);

pub const FOREST_DAY: Color = Color::rgb(186, 214, 196);
pub const FOREST_SUNSET: Color = Color::rgb(124, 45, 18);
pub const FOREST_NIGHT: Color = Color::rgb(2, 6, 23);

/// Ground line stroke width
const GROUND_LINE_WIDTH: f32 = 2.0;

/// Colors for one point of the day cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub sky: Color,
    pub forest: Color,
    /// Opacity of the star layer, 0..=1
    pub stars: f32,
}

impl Atmosphere {
    /// Palette at `phase` ticks into the cycle
    pub fn at(phase: u32, cycle: &DayCycle) -> Self {
        let t = phase as f32;

        if phase < cycle.sunset_start {
            Self {
                sky: SKY_DAY,
                forest: FOREST_DAY,
                stars: 0.0,
            }
        } else if phase < cycle.night_start {
            let f = fraction(t, cycle.sunset_start, cycle.night_start);
            let (sky, forest) = if f < 0.5 {
                (
                    SKY_DAY.lerp(SKY_SUNSET, f * 2.0),
                    FOREST_DAY.lerp(FOREST_SUNSET, f * 2.0),
                )
            } else {
                (
                    SKY_SUNSET.lerp(SKY_NIGHT, (f - 0.5) * 2.0),
                    FOREST_SUNSET.lerp(FOREST_NIGHT, (f - 0.5) * 2.0),
                )
            };
            Self { sky, forest, stars: f }
        } else if phase < cycle.dawn_start {
            Self {
                sky: SKY_NIGHT,
                forest: FOREST_NIGHT,
                stars: 1.0,
            }
        } else {
            let f = fraction(t, cycle.dawn_start, cycle.duration);
            Self {
                sky: SKY_NIGHT.lerp(SKY_DAY, f),
                forest: FOREST_NIGHT.lerp(FOREST_DAY, f),
                stars: 1.0 - f,
            }
        }
    }
}

fn fraction(t: f32, start: u32, end: u32) -> f32 {
    let span = end.saturating_sub(start).max(1) as f32;
    ((t - start as f32) / span).clamp(0.0, 1.0)
}

/// Two copies of a full-canvas layer, scrolled left by `offset`
pub fn layer_tiles(offset: f32, width: f32, height: f32) -> [Rect; 2] {
    [
        Rect::new(-offset, 0.0, width, height),
        Rect::new(width - offset, 0.0, width, height),
    ]
}

/// Draw the background for the current world state
pub fn draw_atmosphere(canvas: &mut dyn Canvas2d, world: &World) -> Atmosphere {
    let (width, height) = canvas.size();
    let atmosphere = Atmosphere::at(world.day_phase, &world.tuning.day_cycle);

    canvas.fill_rect(Rect::new(0.0, 0.0, width, height), atmosphere.sky);

    // Stars: untinted, faded
    if canvas.sprite_ready(SpriteId::LayerStars) {
        canvas.set_alpha(atmosphere.stars);
        for tile in layer_tiles(world.parallax[0], width, height) {
            canvas.draw_sprite(SpriteId::LayerStars, tile);
        }
        canvas.set_alpha(1.0);
    }

    // Forest: opaque, recolored with the forest tint
    for (sprite, offset) in [
        (SpriteId::LayerForestFar, world.parallax[1]),
        (SpriteId::LayerForestNear, world.parallax[2]),
    ] {
        if canvas.sprite_ready(sprite) {
            canvas.draw_tinted(sprite, &layer_tiles(offset, width, height), atmosphere.forest);
        }
    }

    let ground_y = world.ground_y();
    canvas.stroke_line(
        Vec2::new(0.0, ground_y),
        Vec2::new(width, ground_y),
        GROUND_LINE_WIDTH,
        atmosphere.forest,
    );

    atmosphere
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::canvas::{DrawCmd, DrawList};
    use crate::tuning::Tuning;

    fn cycle() -> DayCycle {
        DayCycle::default()
    }

    #[test]
    fn test_day_colors() {
        let a = Atmosphere::at(0, &cycle());
        assert_eq!(a.sky, SKY_DAY);
        assert_eq!(a.forest, FOREST_DAY);
        assert_eq!(a.stars, 0.0);
    }

    #[test]
    fn test_sunset_midpoint_is_sunset() {
        let mid = (CYCLE_SUNSET_START + CYCLE_NIGHT_START) / 2;
        let a = Atmosphere::at(mid, &cycle());
        assert_eq!(a.sky, SKY_SUNSET);
        assert_eq!(a.forest, FOREST_SUNSET);
        assert!((a.stars - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_quarter_sunset_blends_day_to_sunset() {
        let q = CYCLE_SUNSET_START + (CYCLE_NIGHT_START - CYCLE_SUNSET_START) / 4;
        let a = Atmosphere::at(q, &cycle());
        // Halfway between day and sunset, rounded per channel
        assert_eq!(a.sky, Color::rgb(253, 193, 99));
        assert!((a.stars - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_night_colors() {
        let a = Atmosphere::at(CYCLE_NIGHT_START + 10, &cycle());
        assert_eq!(a.sky, SKY_NIGHT);
        assert_eq!(a.forest, FOREST_NIGHT);
        assert_eq!(a.stars, 1.0);
    }

    #[test]
    fn test_dawn_returns_to_day() {
        let a = Atmosphere::at(CYCLE_DAWN_START, &cycle());
        assert_eq!(a.sky, SKY_NIGHT);
        assert_eq!(a.stars, 1.0);

        let a = Atmosphere::at(DAY_DURATION - 1, &cycle());
        let near_day = SKY_NIGHT.lerp(SKY_DAY, 299.0 / 300.0);
        assert_eq!(a.sky, near_day);
        assert!(a.stars < 0.01);
    }

    #[test]
    fn test_tiles_cover_canvas() {
        let [a, b] = layer_tiles(120.0, 800.0, 400.0);
        assert_eq!(a.x, -120.0);
        assert_eq!(b.x, 680.0);
        assert_eq!(a.right(), b.x);
    }

    #[test]
    fn test_draw_without_sprites() {
        let world = World::new(1, Tuning::default(), CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut list = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        draw_atmosphere(&mut list, &world);

        // Sky fill then ground line; missing layers are skipped
        assert_eq!(list.commands.len(), 2);
        assert_eq!(
            list.commands[0],
            DrawCmd::Rect {
                rect: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
                color: SKY_DAY,
            }
        );
        assert!(matches!(
            list.commands[1],
            DrawCmd::Line { width, color, .. } if width == 2.0 && color == FOREST_DAY
        ));
    }

    #[test]
    fn test_draw_with_sprites_tints_forest() {
        let mut world = World::new(1, Tuning::default(), CANVAS_WIDTH, CANVAS_HEIGHT);
        world.day_phase = CYCLE_NIGHT_START + 1;
        world.parallax = [10.0, 20.0, 30.0];
        let mut list = DrawList::with_all_sprites(CANVAS_WIDTH, CANVAS_HEIGHT);
        draw_atmosphere(&mut list, &world);

        assert_eq!(list.sprites(), vec![SpriteId::LayerStars, SpriteId::LayerStars]);
        assert!(list.commands.contains(&DrawCmd::Alpha(1.0)));
        let tinted: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Tinted { sprite, tiles, tint } => Some((*sprite, tiles[0].x, *tint)),
                _ => None,
            })
            .collect();
        assert_eq!(
            tinted,
            vec![
                (SpriteId::LayerForestFar, -20.0, FOREST_NIGHT),
                (SpriteId::LayerForestNear, -30.0, FOREST_NIGHT),
            ]
        );
    }
}

//! Drawing port
//!
//! Renderers talk to an immediate-mode [`Canvas2d`]. The browser backend
//! lives in `web_canvas`; [`DrawList`] records commands for tests and the
//! headless runner.

use std::collections::HashSet;

use glam::Vec2;

use crate::color::Color;
use crate::sim::collision::Rect;

/// Every image the renderers may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    PlayerIdle,
    PlayerRun1,
    PlayerRun2,
    PlayerJump,
    /// Stars and moon, faded in at night
    LayerStars,
    LayerForestFar,
    LayerForestNear,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::PlayerIdle,
        SpriteId::PlayerRun1,
        SpriteId::PlayerRun2,
        SpriteId::PlayerJump,
        SpriteId::LayerStars,
        SpriteId::LayerForestFar,
        SpriteId::LayerForestNear,
    ];

    /// Image path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteId::PlayerIdle => "assets/dino.png",
            SpriteId::PlayerRun1 => "assets/dino_run_1.png",
            SpriteId::PlayerRun2 => "assets/dino_run_2.png",
            SpriteId::PlayerJump => "assets/dino_jump.png",
            SpriteId::LayerStars => "assets/bg_layer_1.png",
            SpriteId::LayerForestFar => "assets/bg_layer_2.png",
            SpriteId::LayerForestNear => "assets/bg_layer_3.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font, alignment and fill for one `fill_text` call
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub align: TextAlign,
    pub color: Color,
}

/// Immediate-mode 2D drawing surface
pub trait Canvas2d {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);

    /// Whether a sprite has finished loading
    fn sprite_ready(&self, sprite: SpriteId) -> bool;

    /// Global alpha for subsequent draws
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle);

    /// Blit a sprite scaled to `dest`
    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect);

    /// Draw the sprite into every tile of an off-screen buffer, recolor the
    /// opaque pixels with `tint`, then copy the buffer onto the canvas
    fn draw_tinted(&mut self, sprite: SpriteId, tiles: &[Rect], tint: Color);
}

/// One recorded drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Alpha(f32),
    Rect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        at: Vec2,
        style: TextStyle,
    },
    Sprite {
        sprite: SpriteId,
        dest: Rect,
    },
    Tinted {
        sprite: SpriteId,
        tiles: Vec<Rect>,
        tint: Color,
    },
}

/// Canvas that records what would have been drawn
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f32,
    height: f32,
    ready: HashSet<SpriteId>,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    /// No sprites loaded
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ready: HashSet::new(),
            commands: Vec::new(),
        }
    }

    /// Every sprite loaded
    pub fn with_all_sprites(width: f32, height: f32) -> Self {
        let mut list = Self::new(width, height);
        list.ready.extend(SpriteId::ALL);
        list
    }

    pub fn set_ready(&mut self, sprite: SpriteId, ready: bool) {
        if ready {
            self.ready.insert(sprite);
        } else {
            self.ready.remove(&sprite);
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text of every `fill_text` call, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sprites blitted directly, in order
    pub fn sprites(&self) -> Vec<SpriteId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Sprite { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .collect()
    }
}

impl Canvas2d for DrawList {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn sprite_ready(&self, sprite: SpriteId) -> bool {
        self.ready.contains(&sprite)
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCmd::Alpha(alpha));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::Rect { rect, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }

    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect) {
        self.commands.push(DrawCmd::Sprite { sprite, dest });
    }

    fn draw_tinted(&mut self, sprite: SpriteId, tiles: &[Rect], tint: Color) {
        self.commands.push(DrawCmd::Tinted {
            sprite,
            tiles: tiles.to_vec(),
            tint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut list = DrawList::new(100.0, 50.0);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        list.set_alpha(0.5);
        list.draw_sprite(SpriteId::PlayerJump, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(list.commands.len(), 3);
        assert_eq!(list.commands[1], DrawCmd::Alpha(0.5));
        assert_eq!(list.sprites(), vec![SpriteId::PlayerJump]);
        assert_eq!(list.size(), (100.0, 50.0));
    }

    #[test]
    fn test_sprite_readiness() {
        let mut list = DrawList::new(10.0, 10.0);
        assert!(!list.sprite_ready(SpriteId::LayerStars));
        list.set_ready(SpriteId::LayerStars, true);
        assert!(list.sprite_ready(SpriteId::LayerStars));

        let all = DrawList::with_all_sprites(10.0, 10.0);
        assert!(SpriteId::ALL.iter().all(|s| all.sprite_ready(*s)));
    }
}

//! Browser canvas backend (`CanvasRenderingContext2d`)

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::canvas::{Canvas2d, SpriteId, TextStyle};
use crate::color::Color;
use crate::sim::collision::Rect;

/// Images requested at startup; each is usable once the browser finishes
/// decoding it
pub struct SpriteSheet {
    images: HashMap<SpriteId, HtmlImageElement>,
}

impl SpriteSheet {
    /// Start loading every sprite. Images that cannot be created are left
    /// out and drawn with the fallback.
    pub fn load() -> Self {
        let mut images = HashMap::new();
        for sprite in SpriteId::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.path());
                    images.insert(sprite, img);
                }
                Err(e) => log::warn!("Could not create image for {:?}: {:?}", sprite, e),
            }
        }
        Self { images }
    }

    fn ready(&self, sprite: SpriteId) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() != 0)
    }
}

/// Visible canvas plus the scratch canvas used for tinting
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scratch: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
    sprites: SpriteSheet,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

impl WebCanvas {
    /// `None` if the canvas has no 2D context
    pub fn new(document: &Document, canvas: HtmlCanvasElement, sprites: SpriteSheet) -> Option<Self> {
        let ctx = context_2d(&canvas)?;
        let scratch = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|c| context_2d(&c).map(|ctx| (c, ctx)));
        if scratch.is_none() {
            log::warn!("No scratch canvas; forest layers will be drawn untinted");
        }
        Some(Self {
            canvas,
            ctx,
            scratch,
            sprites,
        })
    }
}

impl Canvas2d for WebCanvas {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn sprite_ready(&self, sprite: SpriteId) -> bool {
        self.sprites.ready(sprite).is_some()
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_fill_style_str(&style.color.to_string());
        if let Err(e) = self.ctx.fill_text(text, at.x as f64, at.y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }

    fn draw_sprite(&mut self, sprite: SpriteId, dest: Rect) {
        let Some(img) = self.sprites.ready(sprite) else {
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            dest.x as f64,
            dest.y as f64,
            dest.w as f64,
            dest.h as f64,
        ) {
            log::warn!("draw_image failed: {:?}", e);
        }
    }

    fn draw_tinted(&mut self, sprite: SpriteId, tiles: &[Rect], tint: Color) {
        if self.scratch.is_none() {
            for tile in tiles {
                self.draw_sprite(sprite, *tile);
            }
            return;
        }
        let Some(img) = self.sprites.ready(sprite) else {
            return;
        };
        let Some((scratch, sctx)) = &self.scratch else {
            return;
        };

        // Resizing also clears the buffer and resets its composite mode
        scratch.set_width(self.canvas.width());
        scratch.set_height(self.canvas.height());

        for tile in tiles {
            if let Err(e) = sctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                tile.x as f64,
                tile.y as f64,
                tile.w as f64,
                tile.h as f64,
            ) {
                log::warn!("draw_image failed: {:?}", e);
            }
        }
        if let Err(e) = sctx.set_global_composite_operation("source-in") {
            log::warn!("composite mode rejected: {:?}", e);
        }
        sctx.set_fill_style_str(&tint.to_string());
        sctx.fill_rect(0.0, 0.0, scratch.width() as f64, scratch.height() as f64);

        if let Err(e) = self.ctx.draw_image_with_html_canvas_element(scratch, 0.0, 0.0) {
            log::warn!("draw_image failed: {:?}", e);
        }
    }
}

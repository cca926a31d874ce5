//! Canvas 2D renderer

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::hud::{GAME_OVER, PRESS_START, TITLE};
use crate::sim::{Aabb, Button, HazardVariant, Overlay, Scene, TextField};

const BACKGROUND: &str = "#444444";
const FOREST_FAR: &str = "#2f4a35";
const FOREST_NEAR: &str = "#22382a";
const GROUND: &str = "#6b4f32";
const GROUND_EDGE: &str = "#4c8a46";
const CAT: &str = "#e8a33d";
const CAT_DARK: &str = "#b87420";
const TEXT: &str = "#ffffff";
const BUTTON: &str = "#4C8A46";

const TITLE_FONT: &str = "Mochiy Pop One, sans-serif";
const HUD_FONT: &str = "VT323, sans-serif";

/// Spacing of the repeating tree pattern (world pixels)
const TREE_TILE: f64 = 150.0;

/// Renders scenes onto a canvas, scaling the world to fill it
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has the wrong type"))?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the element's on-screen size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn render(&self, scene: &Scene, world_width: f32, world_height: f32) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let sx = self.canvas.width() as f64 / world_width as f64;
        let sy = self.canvas.height() as f64 / world_height as f64;
        ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0)?;

        self.draw_background(scene.scroll_x as f64, world_width as f64, world_height as f64);

        let ground = scene.world.ground();
        self.fill(GROUND, &ground);
        ctx.set_fill_style_str(GROUND_EDGE);
        ctx.fill_rect(
            ground.min.x as f64,
            ground.min.y as f64,
            ground.size().x as f64,
            6.0,
        );

        for hazard in scene.world.hazards() {
            self.draw_hazard(hazard.variant, &hazard.body.aabb());
        }

        self.draw_cat(&scene.world.player().body.aabb(), scene.animator.frame());

        self.draw_hud(scene)
    }

    fn fill(&self, color: &str, rect: &Aabb) {
        let size = rect.size();
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.min.x as f64, rect.min.y as f64, size.x as f64, size.y as f64);
    }

    fn draw_background(&self, scroll_x: f64, width: f64, height: f64) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);

        // Two tree layers; the near one scrolls at the full rate
        for (color, rate, trunk, top) in [(FOREST_FAR, 0.5, 22.0, 120.0), (FOREST_NEAR, 1.0, 34.0, 60.0)] {
            let offset = (scroll_x * rate) % TREE_TILE;
            ctx.set_fill_style_str(color);
            let mut x = -offset;
            while x < width {
                ctx.fill_rect(x + TREE_TILE / 2.0, top, trunk, height - top);
                x += TREE_TILE;
            }
        }
    }

    fn draw_hazard(&self, variant: HazardVariant, rect: &Aabb) {
        let color = match variant {
            HazardVariant::Pebble => "#9a9a9a",
            HazardVariant::Stump => "#7a5230",
            HazardVariant::Log => "#8d6238",
        };
        self.fill(color, rect);
    }

    /// Body plus head; `frame` shifts the legs so walking reads as motion
    fn draw_cat(&self, rect: &Aabb, frame: u32) {
        let ctx = &self.ctx;
        let (x, y) = (rect.min.x as f64, rect.min.y as f64);
        let size = rect.size();
        let (w, h) = (size.x as f64, size.y as f64);

        ctx.set_fill_style_str(CAT);
        ctx.fill_rect(x + 10.0, y + h * 0.35, w * 0.7, h * 0.45);
        ctx.fill_rect(x + w * 0.6, y + h * 0.1, w * 0.35, h * 0.4);

        ctx.set_fill_style_str(CAT_DARK);
        let stride = match frame {
            1 => 8.0,
            2 => -8.0,
            _ => 0.0,
        };
        for leg_x in [x + 18.0 + stride, x + w * 0.55 - stride] {
            ctx.fill_rect(leg_x, y + h * 0.8, 12.0, h * 0.2);
        }
    }

    fn draw_hud(&self, scene: &Scene) -> Result<(), JsValue> {
        let hud = &scene.hud;
        self.draw_text(&hud.best, 40.0, 30.0, "left", 24.0, HUD_FONT)?;
        self.draw_text(&hud.time, 1120.0, 40.0, "right", 28.0, HUD_FONT)?;

        match hud.overlay {
            Overlay::StartScreen => {
                self.label(TITLE, 600.0, 135.0, 120.0, TITLE_FONT)?;
                self.label(PRESS_START, 600.0, 260.0, 38.0, HUD_FONT)?;
            }
            Overlay::GameOver => {
                self.label(GAME_OVER, 600.0, 260.0, 64.0, TITLE_FONT)?;
            }
            Overlay::Hidden => {}
        }
        if let Some(button) = hud.overlay.button() {
            self.draw_button(&button)?;
        }
        Ok(())
    }

    fn draw_text(
        &self,
        field: &TextField,
        x: f64,
        y: f64,
        align: &str,
        size: f64,
        family: &str,
    ) -> Result<(), JsValue> {
        if !field.visible {
            return Ok(());
        }
        let ctx = &self.ctx;
        ctx.set_fill_style_str(TEXT);
        ctx.set_font(&format!("{}px {}", size, family));
        ctx.set_text_align(align);
        ctx.set_text_baseline("top");
        ctx.fill_text(&field.text, x, y)
    }

    /// Centered text
    fn label(&self, text: &str, x: f64, y: f64, size: f64, family: &str) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(TEXT);
        ctx.set_font(&format!("{}px {}", size, family));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(text, x, y)
    }

    fn draw_button(&self, button: &Button) -> Result<(), JsValue> {
        self.fill(BUTTON, &button.rect);
        let center = button.rect.center();
        self.label(button.label, center.x as f64, center.y as f64, 26.0, HUD_FONT)
    }
}

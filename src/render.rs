//! Canvas 2D implementation of the sketch drawing surface.

use glam::Vec2;
use sketch_core::{DrawError, Hsba, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js_err(op: &str, e: JsValue) -> DrawError {
    DrawError::Surface(format!("{op}: {e:?}"))
}

pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    // Style strings are only rebuilt when the color changes; dots reuse a
    // handful of brightness values per frame.
    fill: Option<Hsba>,
    stroke: Option<Hsba>,
    css: String,
    // Unmatched saves, unwound at the start of the next frame.
    depth: usize,
    pixel_ratio: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let mut surface = Self {
            ctx,
            fill: None,
            stroke: None,
            css: String::with_capacity(32),
            depth: 0,
            pixel_ratio: 1.0,
        };
        surface.reset();
        Ok(surface)
    }

    /// Resizing a canvas wipes its context state; re-apply ours.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.forget_styles();
    }

    /// Device pixels per CSS pixel; applied by every `begin_frame`.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
    }

    fn use_fill(&mut self, color: Hsba) {
        if self.fill != Some(color) {
            color.write_css(&mut self.css);
            self.ctx.set_fill_style_str(&self.css);
            self.fill = Some(color);
        }
    }

    fn use_stroke(&mut self, color: Hsba, weight: f32) {
        if self.stroke != Some(color) {
            color.write_css(&mut self.css);
            self.ctx.set_stroke_style_str(&self.css);
            self.stroke = Some(color);
        }
        self.ctx.set_line_width(weight as f64);
    }

    // save/restore rewinds styles behind our back.
    fn forget_styles(&mut self) {
        self.fill = None;
        self.stroke = None;
    }
}

impl Surface for CanvasSurface {
    fn begin_frame(&mut self) -> Result<(), DrawError> {
        while self.depth > 0 {
            self.ctx.restore();
            self.depth -= 1;
        }
        let k = self.pixel_ratio;
        self.ctx
            .set_transform(k, 0.0, 0.0, k, 0.0, 0.0)
            .map_err(|e| js_err("setTransform", e))?;
        self.ctx.set_filter("none");
        self.forget_styles();
        Ok(())
    }

    fn save(&mut self) -> Result<(), DrawError> {
        self.ctx.save();
        self.depth += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), DrawError> {
        self.ctx.restore();
        self.depth = self.depth.saturating_sub(1);
        self.forget_styles();
        Ok(())
    }

    fn translate(&mut self, x: f32, y: f32) -> Result<(), DrawError> {
        self.ctx
            .translate(x as f64, y as f64)
            .map_err(|e| js_err("translate", e))
    }

    fn rotate(&mut self, radians: f32) -> Result<(), DrawError> {
        self.ctx
            .rotate(radians as f64)
            .map_err(|e| js_err("rotate", e))
    }

    fn set_blur(&mut self, px: f32) -> Result<(), DrawError> {
        if px > 0.0 {
            self.ctx.set_filter(&format!("blur({px}px)"));
        } else {
            self.ctx.set_filter("none");
        }
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Hsba) -> Result<(), DrawError> {
        self.use_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        Ok(())
    }

    fn fill_ellipse(&mut self, center: Vec2, w: f32, h: f32, color: Hsba) -> Result<(), DrawError> {
        self.use_fill(color);
        self.ctx.begin_path();
        self.ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                (w * 0.5).abs() as f64,
                (h * 0.5).abs() as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(|e| js_err("ellipse", e))?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsba, weight: f32) -> Result<(), DrawError> {
        self.stroke_polyline(&[from, to], color, weight)
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Hsba, weight: f32) -> Result<(), DrawError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.use_stroke(color, weight);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.stroke();
        Ok(())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas — an opaque RGB bitmap with the handful of drawing primitives the
// box rasterizer needs. Uses the `image` and `imageproc` crates.

use ab_glyph::{FontArc, PxScale};
use cvpress_core::error::{CvpressError, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;

/// Height of a greeked text bar relative to the font size.
const GREEK_BAR_EM: f32 = 0.6;

/// Opaque drawing surface in device pixels.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// A `width` x `height` canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour of one pixel. Out-of-range coordinates yield `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Fill a rectangle given in device pixels. Sub-pixel sizes still cover
    /// at least one pixel; parts outside the canvas are clipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [u8; 3]) {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return;
        }
        let w = width.round().max(1.0) as u32;
        let h = height.round().max(1.0) as u32;
        let rect = PixelRect::at(x.round() as i32, y.round() as i32).of_size(w, h);
        draw_filled_rect_mut(&mut self.image, rect, Rgb(color));
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw_text(&mut self, x: f32, y: f32, size: f32, text: &str, font: &FontArc, color: [u8; 3]) {
        if text.is_empty() || !size.is_finite() || size <= 0.0 {
            return;
        }
        draw_text_mut(
            &mut self.image,
            Rgb(color),
            x.round() as i32,
            y.round() as i32,
            PxScale::from(size),
            font,
            text,
        );
    }

    /// Stand-in for text when no font is available: a solid bar the width of
    /// the run, vertically centred in a line box of `line_height`.
    pub fn greek_text(&mut self, x: f32, y: f32, width: f32, line_height: f32, size: f32, color: [u8; 3]) {
        let bar = size * GREEK_BAR_EM;
        self.fill_rect(x, y + (line_height - bar) / 2.0, width, bar, color);
    }

    /// Encode the canvas as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| CvpressError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}

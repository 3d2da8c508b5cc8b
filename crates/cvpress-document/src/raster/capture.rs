// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout capture — the rasterizer contract and the built-in box rasterizer.
//
// Capture always works on a clone of the layout. The clone goes through an
// optional hook first so the bitmap shows the canonical print appearance
// rather than whatever zoom the on-screen preview happens to use.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::FontArc;
use cvpress_core::error::{CvpressError, Result};
use cvpress_core::{ExportConfig, RasterImage};
use tracing::{debug, info, instrument};

use super::canvas::Canvas;
use crate::layout::extract::{FALLBACK_FONT_SIZE, parse_font_size};
use crate::layout::{LayoutNode, LayoutTree, NodeKind};

/// Mutates the cloned layout just before it is painted.
pub type CloneHook = Arc<dyn Fn(&mut LayoutTree) + Send + Sync>;

/// Parameters handed to a rasterizer.
#[derive(Clone)]
pub struct CaptureOptions {
    /// Device pixels per layout pixel.
    pub pixel_ratio: u32,
    /// Layout width to capture: the full scroll width, not the viewport.
    pub width: u32,
    /// Layout height to capture: the full scroll height, not the viewport.
    pub height: u32,
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// Opaque background colour (RGB).
    pub background: [u8; 3],
    pub on_clone: Option<CloneHook>,
}

impl CaptureOptions {
    /// Options for capturing the whole of `tree` under `config`, with the
    /// print normalisation hook installed.
    pub fn for_tree(tree: &LayoutTree, config: &ExportConfig) -> Self {
        Self {
            pixel_ratio: config.pixel_ratio,
            width: tree.scroll_width,
            height: tree.scroll_height,
            scroll_x: 0.0,
            scroll_y: 0.0,
            background: config.background,
            on_clone: Some(normalize_for_print(
                config.capture_font_family.clone(),
                config.preview_role.clone(),
            )),
        }
    }
}

impl std::fmt::Debug for CaptureOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureOptions")
            .field("pixel_ratio", &self.pixel_ratio)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scroll_x", &self.scroll_x)
            .field("scroll_y", &self.scroll_y)
            .field("background", &self.background)
            .field("on_clone", &self.on_clone.is_some())
            .finish()
    }
}

/// Hook that forces `font_family` onto the node marked `role` and removes any
/// zoom applied to it.
pub fn normalize_for_print(font_family: String, role: String) -> CloneHook {
    Arc::new(move |tree: &mut LayoutTree| match tree.root.find_role_mut(&role) {
        Some(node) => {
            node.style.font_family = font_family.clone();
            node.style.scale = 1.0;
        }
        None => debug!(role = %role, "No preview root in cloned layout; capturing as-is"),
    })
}

/// Turns a layout into a bitmap.
///
/// The returned image must measure exactly
/// `(options.width * options.pixel_ratio, options.height * options.pixel_ratio)`.
pub trait Rasterizer {
    fn rasterize(
        &self,
        tree: &LayoutTree,
        options: &CaptureOptions,
    ) -> impl Future<Output = Result<RasterImage>> + Send;
}

/// Paints layout boxes directly: fills, rules and text.
///
/// Text is drawn with the configured font. Without one, each text run is
/// greeked as a solid bar so the geometry still shows.
#[derive(Clone, Default)]
pub struct BoxRasterizer {
    font: Option<FontArc>,
}

impl BoxRasterizer {
    pub fn new() -> Self {
        Self { font: None }
    }

    pub fn with_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    /// Load a TrueType/OpenType font from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn with_font_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        let font = FontArc::try_from_vec(bytes).map_err(|err| {
            CvpressError::Font(format!("{}: {}", path.as_ref().display(), err))
        })?;
        info!("Capture font loaded");
        Ok(Self::with_font(font))
    }

    /// Synchronous capture. `rasterize` runs this on the blocking pool.
    #[instrument(skip_all, fields(width = options.width, height = options.height, ratio = options.pixel_ratio))]
    pub fn render(&self, tree: &LayoutTree, options: &CaptureOptions) -> Result<RasterImage> {
        if options.width == 0 || options.height == 0 {
            return Err(CvpressError::EmptyLayout);
        }
        if options.pixel_ratio == 0 {
            return Err(CvpressError::Capture("pixel ratio must be at least 1".into()));
        }
        let pixel_width = options.width.checked_mul(options.pixel_ratio);
        let pixel_height = options.height.checked_mul(options.pixel_ratio);
        let (Some(pixel_width), Some(pixel_height)) = (pixel_width, pixel_height) else {
            return Err(CvpressError::Capture(format!(
                "{}x{} at {}x exceeds the bitmap size limit",
                options.width, options.height, options.pixel_ratio
            )));
        };

        let mut clone = tree.clone();
        if let Some(hook) = &options.on_clone {
            hook(&mut clone);
        }

        let mut canvas = Canvas::new(pixel_width, pixel_height, options.background);
        let origin = clone.root.rect;
        let mapping = Mapping {
            scale: f64::from(options.pixel_ratio),
            dx: -(origin.x + options.scroll_x) * f64::from(options.pixel_ratio),
            dy: -(origin.y + options.scroll_y) * f64::from(options.pixel_ratio),
        };
        self.paint(&mut canvas, &clone.root, mapping, None);

        let data = canvas.to_png_bytes()?;
        debug!(pixel_width, pixel_height, bytes = data.len(), "Layout rasterized");

        Ok(RasterImage {
            pixel_width,
            pixel_height,
            pixel_ratio: options.pixel_ratio,
            data,
        })
    }

    fn paint(&self, canvas: &mut Canvas, node: &LayoutNode, parent: Mapping, inherited_font_size: Option<&str>) {
        let mapping = parent.zoomed(node.style.scale, node.rect.x, node.rect.y);
        let font_size = node.style.font_size.as_deref().or(inherited_font_size);

        let x = mapping.x(node.rect.x) as f32;
        let y = mapping.y(node.rect.y) as f32;
        let width = (node.rect.width * mapping.scale) as f32;
        let height = (node.rect.height * mapping.scale) as f32;

        if let Some(fill) = node.style.background {
            canvas.fill_rect(x, y, width, height, fill);
        }

        match &node.kind {
            NodeKind::Rule if node.style.background.is_none() => {
                canvas.fill_rect(x, y, width, height, node.style.color);
            }
            NodeKind::Text { content } | NodeKind::Link { content, .. } => {
                let size_px = font_size.and_then(parse_font_size).unwrap_or(FALLBACK_FONT_SIZE);
                let size = (size_px * mapping.scale) as f32;
                match &self.font {
                    Some(font) => {
                        let top = y + (height - size).max(0.0) / 2.0;
                        canvas.draw_text(x, top, size, content, font, node.style.color);
                    }
                    None => canvas.greek_text(x, y, width, height, size, node.style.color),
                }
            }
            NodeKind::Rule | NodeKind::Block => {}
        }

        for child in &node.children {
            self.paint(canvas, child, mapping, font_size);
        }
    }
}

impl std::fmt::Debug for BoxRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxRasterizer")
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Rasterizer for BoxRasterizer {
    async fn rasterize(&self, tree: &LayoutTree, options: &CaptureOptions) -> Result<RasterImage> {
        let rasterizer = self.clone();
        let tree = tree.clone();
        let options = options.clone();
        tokio::task::spawn_blocking(move || rasterizer.render(&tree, &options))
            .await
            .map_err(|err| CvpressError::Capture(format!("rasterizer worker failed: {err}")))?
    }
}

/// Layout-to-device coordinate mapping: `device = layout * scale + offset`.
#[derive(Debug, Clone, Copy)]
struct Mapping {
    scale: f64,
    dx: f64,
    dy: f64,
}

impl Mapping {
    fn x(&self, x: f64) -> f64 {
        x * self.scale + self.dx
    }

    fn y(&self, y: f64) -> f64 {
        y * self.scale + self.dy
    }

    /// Apply a zoom of `factor` anchored at layout point (`ax`, `ay`).
    fn zoomed(self, factor: f64, ax: f64, ay: f64) -> Self {
        if factor == 1.0 || !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        Self {
            scale: self.scale * factor,
            dx: self.dx + self.scale * ax * (1.0 - factor),
            dy: self.dy + self.scale * ay * (1.0 - factor),
        }
    }
}

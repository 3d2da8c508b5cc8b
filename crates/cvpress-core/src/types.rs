// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the cvpress export pipeline.

use serde::{Deserialize, Serialize};

use crate::error::LinkAttachError;

/// Axis-aligned rectangle with a top-left origin.
///
/// The unit depends on context: CSS pixels for layout geometry, millimetres
/// for page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Express this rectangle relative to the top-left corner of `origin`.
    pub fn relative_to(&self, origin: &Rect) -> Rect {
        Rect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }

    /// True when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// One hyperlink discovered in the source layout.
///
/// `bounds` is relative to the layout's own top-left corner, not the screen.
/// The target is carried verbatim; validation happens when it is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRegion {
    /// Destination URL.
    pub target: String,
    /// Hit area in layout pixels.
    pub bounds: Rect,
    /// Rendered text, for diagnostics only.
    pub label: String,
    /// Effective font size in layout pixels, for diagnostics only.
    pub font_size: f64,
}

/// A captured bitmap of the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in device pixels (pixel ratio already applied).
    pub pixel_width: u32,
    /// Height in device pixels (pixel ratio already applied).
    pub pixel_height: u32,
    /// Device pixels per layout pixel used at capture time.
    pub pixel_ratio: u32,
    /// Encoded image payload (PNG).
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Width over height. This ratio drives every later fitting decision.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.pixel_width) / f64::from(self.pixel_height)
    }
}

/// Dimensions and fingerprint of the raster that went into an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterSummary {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// SHA-256 of the encoded payload, lowercase hex.
    pub digest: String,
}

/// Output sheet, portrait orientation. Exports always go onto A4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
        }
    }
}

/// Placement of a bitmap on a page: uniform scale plus centring offsets.
///
/// All lengths are millimetres; `scale` is millimetres per image pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitTransform {
    pub width: f64,
    pub height: f64,
    /// Fitted width over image pixel width. Doubling the pixel ratio halves
    /// it; link placement uses the layout-pixel scale instead.
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// A link annotation that made it onto the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLink {
    /// Position of the source region in extraction order.
    pub index: usize,
    pub target: String,
    /// Clickable area in page millimetres, top-left origin.
    pub rect: Rect,
    pub label: String,
}

/// A link region that was left out of the export.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLink {
    pub index: usize,
    pub target: String,
    pub label: String,
    pub reason: LinkAttachError,
}

/// The finished export: PDF bytes plus an account of what went into them.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Serialised single-page PDF.
    pub document: Vec<u8>,
    pub paper_size: PaperSize,
    pub fit: FitTransform,
    pub raster: RasterSummary,
    pub attached: Vec<PlacedLink>,
    pub skipped: Vec<SkippedLink>,
}

impl ExportResult {
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Lifecycle stages of one export operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStage {
    /// No export running.
    Idle,
    /// Extracting link regions and rasterizing the layout.
    Capturing,
    /// Computing the page fit.
    Fitting,
    /// Building the PDF and attaching links.
    Assembling,
    /// Finished successfully.
    Done,
    /// Abandoned after a fatal error.
    Failed,
}

/// Export state owned by the caller and threaded through each export.
///
/// Replaces a shared "is exporting" flag: the pipeline takes the status in and
/// hands the updated status back, so a trigger can refuse to start while a
/// previous export is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStatus {
    stage: ExportStage,
}

impl ExportStatus {
    pub fn idle() -> Self {
        Self {
            stage: ExportStage::Idle,
        }
    }

    pub fn stage(&self) -> ExportStage {
        self.stage
    }

    /// True while an export is between capture and assembly.
    pub fn is_exporting(&self) -> bool {
        matches!(
            self.stage,
            ExportStage::Capturing | ExportStage::Fitting | ExportStage::Assembling
        )
    }

    /// Move to `stage`, returning the new status.
    pub fn advance(self, stage: ExportStage) -> Self {
        Self { stage }
    }

    /// Return to `Idle` after a finished or failed export.
    pub fn reset(self) -> Self {
        Self::idle()
    }
}

impl Default for ExportStatus {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_relative_to_subtracts_origin() {
        let element = Rect::new(150.0, 420.0, 60.0, 16.0);
        let container = Rect::new(100.0, 400.0, 794.0, 1123.0);
        assert_eq!(element.relative_to(&container), Rect::new(50.0, 20.0, 60.0, 16.0));
    }

    #[test]
    fn rect_with_nan_is_not_finite() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn a4_is_210_by_297() {
        assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
        assert_eq!(PaperSize::default(), PaperSize::A4);
    }

    #[test]
    fn status_is_exporting_only_mid_flight() {
        let status = ExportStatus::idle();
        assert!(!status.is_exporting());
        assert!(status.advance(ExportStage::Capturing).is_exporting());
        assert!(status.advance(ExportStage::Assembling).is_exporting());
        assert!(!status.advance(ExportStage::Done).is_exporting());
        assert!(!status.advance(ExportStage::Failed).is_exporting());
        assert_eq!(
            status.advance(ExportStage::Failed).reset().stage(),
            ExportStage::Idle
        );
    }
}

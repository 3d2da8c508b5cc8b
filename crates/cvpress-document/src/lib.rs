// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cvpress-document — Layout capture and PDF export for cvpress.
//
// Turns a rendered resume layout into a single-page A4 PDF: link regions are
// read off the layout, the layout is rasterized, the bitmap is fitted onto the
// page, and each link is laid back over the bitmap as a clickable annotation.

pub mod export;
pub mod layout;
pub mod pdf;
pub mod raster;
pub mod resume;

// Re-export the primary entry points so callers can use
// `cvpress_document::ExportPipeline` etc.
pub use export::{ExportPipeline, write_export};
pub use layout::{LayoutSource, LayoutTree, extract_regions};
pub use pdf::{PdfAssembler, PdfReader, fit_to_page};
pub use raster::{BoxRasterizer, CaptureOptions, Rasterizer};
pub use resume::{ResumeComposer, ResumeData, sample_resume};

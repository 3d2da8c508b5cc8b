// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration. Every value here is a fixed constant of this version;
// nothing is exposed to the user.

use serde::{Deserialize, Serialize};

/// Settings for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target page. Always portrait.
    pub paper_size: crate::PaperSize,
    /// Device pixels per layout pixel when rasterizing.
    pub pixel_ratio: u32,
    /// Smallest clickable link width on the page, in mm.
    pub min_link_width_mm: f64,
    /// Smallest clickable link height on the page, in mm.
    pub min_link_height_mm: f64,
    /// Font family forced onto the preview root before capture.
    pub capture_font_family: String,
    /// Opaque capture background (RGB).
    pub background: [u8; 3],
    /// Role marker identifying the preview root inside the layout tree.
    pub preview_role: String,
    /// Title written into the PDF metadata.
    pub document_title: String,
    /// Name of the exported file.
    pub output_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            pixel_ratio: 2,
            min_link_width_mm: 10.0,
            min_link_height_mm: 4.0,
            capture_font_family: "Times New Roman, serif".into(),
            background: [255, 255, 255],
            preview_role: "resume-preview".into(),
            document_title: "Resume".into(),
            output_file_name: "resume.pdf".into(),
        }
    }
}

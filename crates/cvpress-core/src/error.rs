// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for cvpress.

use thiserror::Error;

/// Top-level error type for every fatal cvpress failure.
///
/// Any of these abandons the export in progress. Nothing is written to disk
/// when one is returned.
#[derive(Debug, Error)]
pub enum CvpressError {
    // -- Capture errors --
    #[error("layout capture failed: {0}")]
    Capture(String),

    #[error("nothing to capture: the layout has no content")]
    EmptyLayout,

    #[error("an export is already in progress")]
    ExportInProgress,

    // -- Assembly errors --
    #[error("document assembly failed: {0}")]
    Assembly(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    // -- Input --
    #[error("invalid resume data: {0}")]
    InvalidResume(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a single link region could not be attached to the exported page.
///
/// These never abort an export; the assembler records them next to the
/// region that caused them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkAttachError {
    #[error("link target is empty")]
    EmptyTarget,

    #[error("link target {target:?} is malformed: {reason}")]
    MalformedTarget { target: String, reason: String },

    #[error("link geometry is not finite")]
    InvalidGeometry,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CvpressError>;

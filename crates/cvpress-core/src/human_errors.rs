// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the person pressing "Download PDF".
//
// The export pipeline never shows anything itself; callers map the fatal
// error they get back through `humanize_error` and present the result.

use crate::error::{CvpressError, LinkAttachError};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying again is likely to work.
    Transient,
    /// The user has to change something first (fill in the resume, free disk space).
    ActionRequired,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether pressing the button again might succeed.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `CvpressError` into a `HumanError` anyone can act on.
pub fn humanize_error(err: &CvpressError) -> HumanError {
    match err {
        // -- Capture --
        CvpressError::EmptyLayout => HumanError {
            message: "There's nothing to export yet.".into(),
            suggestion: "Fill in at least your name or one section, then try downloading again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        CvpressError::Capture(detail) => HumanError {
            message: "We couldn't take a snapshot of your resume.".into(),
            suggestion: format!("Try again in a moment. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        CvpressError::ExportInProgress => HumanError {
            message: "Your PDF is still being created.".into(),
            suggestion: "Wait for the current download to finish.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Assembly --
        CvpressError::Assembly(_) | CvpressError::PdfError(_) => HumanError {
            message: "The PDF couldn't be put together.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CvpressError::ImageError(_) => HumanError {
            message: "The resume snapshot was damaged.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        CvpressError::Font(_) => HumanError {
            message: "The resume font couldn't be loaded.".into(),
            suggestion: "Check that the configured font file exists and is a TrueType or OpenType font.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Input --
        CvpressError::InvalidResume(detail) => HumanError {
            message: "Some of your resume details couldn't be read.".into(),
            suggestion: format!("Check the resume file for mistakes. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        CvpressError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to save the PDF there.".into(),
                    suggestion: "Choose a folder you can write to, or check its permissions.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        CvpressError::Serialization(_) => HumanError {
            message: "The resume file isn't in the expected format.".into(),
            suggestion: "Make sure it is the JSON file saved by the resume builder.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}

/// One-line description of why a link was dropped from the PDF.
pub fn describe_skipped_link(reason: &LinkAttachError) -> String {
    match reason {
        LinkAttachError::EmptyTarget => "the link has no address".into(),
        LinkAttachError::MalformedTarget { target, .. } => {
            format!("\"{target}\" is not a web address")
        }
        LinkAttachError::InvalidGeometry => "the link has no position on the page".into(),
    }
}

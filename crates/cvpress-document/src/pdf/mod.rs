// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — fitting the capture onto a page, assembling the linked PDF, and
// reading exported files back.

pub mod fit;
pub mod reader;
pub mod writer;

pub use fit::fit_to_page;
pub use reader::{Hyperlink, PdfReader};
pub use writer::{PdfAssembler, place_link, validate_target};

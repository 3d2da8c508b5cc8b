// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resume module — the structured resume data and its print layout.

pub mod compose;
pub mod model;
pub mod sample;

pub use compose::ResumeComposer;
pub use model::ResumeData;
pub use sample::sample_resume;

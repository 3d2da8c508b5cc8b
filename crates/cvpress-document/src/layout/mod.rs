// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — the rendered document snapshot and link region extraction.

pub mod extract;
pub mod tree;

pub use extract::{extract_regions, parse_font_size};
pub use tree::{InteractiveElement, LayoutNode, LayoutSource, LayoutTree, NodeKind, NodeStyle};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — capturing a layout tree as a bitmap.

pub mod canvas;
pub mod capture;
pub mod integrity;

pub use canvas::Canvas;
pub use capture::{BoxRasterizer, CaptureOptions, CloneHook, Rasterizer, normalize_for_print};
pub use integrity::hash_bytes;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page fitter — place a bitmap on a fixed page without distortion.
//
// The image is first sized to the full page width. If that overflows the page
// height it is sized to the full page height instead. The result is centred,
// with offsets never going below zero. Everything lands on a single page;
// content taller than the page is shrunk, not split.

use cvpress_core::FitTransform;
use cvpress_core::error::{CvpressError, Result};
use tracing::debug;

/// Fit an `image_width` x `image_height` pixel image onto a page measured in
/// millimetres.
pub fn fit_to_page(
    image_width: f64,
    image_height: f64,
    page_width: f64,
    page_height: f64,
) -> Result<FitTransform> {
    let inputs = [image_width, image_height, page_width, page_height];
    if inputs.iter().any(|value| !value.is_finite() || *value <= 0.0) {
        return Err(CvpressError::Capture(format!(
            "cannot fit a {image_width}x{image_height} image onto a {page_width}x{page_height} page"
        )));
    }

    let aspect = image_width / image_height;

    let mut width = page_width;
    let mut height = page_width / aspect;
    if height > page_height {
        height = page_height;
        width = page_height * aspect;
    }

    let fit = FitTransform {
        width,
        height,
        scale: width / image_width,
        offset_x: ((page_width - width) / 2.0).max(0.0),
        offset_y: ((page_height - height) / 2.0).max(0.0),
    };

    debug!(
        aspect,
        width = fit.width,
        height = fit.height,
        scale = fit.scale,
        offset_x = fit.offset_x,
        offset_y = fit.offset_y,
        "Page fit computed"
    );

    Ok(fit)
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export pipeline — capture the layout, fit it onto the page, assemble the
// linked PDF.
//
// Stages run strictly in order: Capturing -> Fitting -> Assembling -> Done.
// Rasterization is the only await point. The caller owns the `ExportStatus`
// and passes it in; the updated status comes back with the result, so a
// second trigger while one export is in flight is refused without any shared
// flag.

use std::io::Write;
use std::path::{Path, PathBuf};

use cvpress_core::error::{CvpressError, Result};
use cvpress_core::{ExportConfig, ExportResult, ExportStage, ExportStatus};
use tracing::{error, info, instrument, warn};

use crate::layout::{LayoutSource, LayoutTree, extract_regions};
use crate::pdf::{PdfAssembler, fit_to_page};
use crate::raster::{CaptureOptions, Rasterizer};

/// Runs exports of a layout to a single-page PDF.
pub struct ExportPipeline<R> {
    config: ExportConfig,
    rasterizer: R,
    assembler: PdfAssembler,
}

impl<R: Rasterizer> ExportPipeline<R> {
    /// Pipeline with the default export settings.
    pub fn new(rasterizer: R) -> Self {
        Self::with_config(rasterizer, ExportConfig::default())
    }

    pub fn with_config(rasterizer: R, config: ExportConfig) -> Self {
        let assembler = PdfAssembler::from_config(&config);
        Self {
            config,
            rasterizer,
            assembler,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export `tree`, returning the updated status alongside the outcome.
    ///
    /// An in-flight `status` is handed back untouched with
    /// [`CvpressError::ExportInProgress`]. Any fatal error leaves the status at
    /// [`ExportStage::Failed`]; nothing is written to disk here, so a failed
    /// export leaves no output behind.
    #[instrument(skip_all, fields(width = tree.scroll_width, height = tree.scroll_height))]
    pub async fn export(
        &self,
        status: ExportStatus,
        tree: &LayoutTree,
    ) -> (ExportStatus, Result<ExportResult>) {
        if status.is_exporting() {
            warn!(stage = ?status.stage(), "Export already in progress; ignoring trigger");
            return (status, Err(CvpressError::ExportInProgress));
        }

        let mut status = status.advance(ExportStage::Capturing);
        match self.run(&mut status, tree).await {
            Ok(result) => {
                info!(
                    attached = result.attached_count(),
                    skipped = result.skipped_count(),
                    "Export complete"
                );
                (status.advance(ExportStage::Done), Ok(result))
            }
            Err(err) => {
                error!(stage = ?status.stage(), error = %err, "Export failed");
                (status.advance(ExportStage::Failed), Err(err))
            }
        }
    }

    async fn run(&self, status: &mut ExportStatus, tree: &LayoutTree) -> Result<ExportResult> {
        info!(stage = ?status.stage(), "Capturing layout");
        if tree.is_empty() {
            return Err(CvpressError::EmptyLayout);
        }

        // Regions and bitmap both come from this one snapshot.
        let regions = extract_regions(tree);
        let options = CaptureOptions::for_tree(tree, &self.config);
        let image = self.rasterizer.rasterize(tree, &options).await?;

        let expected = (
            u64::from(options.width) * u64::from(options.pixel_ratio),
            u64::from(options.height) * u64::from(options.pixel_ratio),
        );
        if (u64::from(image.pixel_width), u64::from(image.pixel_height)) != expected {
            return Err(CvpressError::Capture(format!(
                "rasterizer returned {}x{} pixels, expected {}x{}",
                image.pixel_width, image.pixel_height, expected.0, expected.1
            )));
        }

        *status = status.advance(ExportStage::Fitting);
        info!(stage = ?status.stage(), regions = regions.len(), "Fitting capture to page");
        let (page_width, page_height) = self.config.paper_size.dimensions_mm();
        let fit = fit_to_page(
            f64::from(image.pixel_width),
            f64::from(image.pixel_height),
            page_width,
            page_height,
        )?;

        *status = status.advance(ExportStage::Assembling);
        info!(stage = ?status.stage(), "Assembling document");
        self.assembler
            .assemble(&image, &fit, tree.content_size(), &regions)
    }
}

/// Write the exported PDF to `dir/file_name`.
///
/// The bytes go to a temporary file in `dir` which is then renamed over the
/// target, so readers never observe a partial file.
#[instrument(skip_all, fields(dir = %dir.as_ref().display(), file_name = %file_name))]
pub fn write_export(
    result: &ExportResult,
    dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let path = dir.join(file_name);

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&result.document)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|err| CvpressError::Io(err.error))?;

    info!(path = %path.display(), bytes = result.document.len(), "Export written");
    Ok(path)
}

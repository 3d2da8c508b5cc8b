// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cvpress — export a resume to a print-ready PDF with live links.
//
// Entry point. Initialises logging, lays out the resume, runs the export, and
// writes `resume.pdf` into the working directory.
//
// Usage: cvpress [resume.json]
// Set CVPRESS_FONT to a TrueType/OpenType file to render real glyphs.

use std::path::PathBuf;
use std::process::ExitCode;

use cvpress_core::error::Result;
use cvpress_core::human_errors::{describe_skipped_link, humanize_error};
use cvpress_core::{ExportConfig, ExportStatus};
use cvpress_document::{
    BoxRasterizer, ExportPipeline, ResumeComposer, ResumeData, sample_resume, write_export,
};
use tracing::{error, info, warn};

const FONT_ENV: &str = "CVPRESS_FONT";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("cvpress starting");

    match run().await {
        Ok(path) => {
            println!("Saved {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Export failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

/// The single export action: load, compose, export, save.
async fn run() -> Result<PathBuf> {
    let data = match std::env::args_os().nth(1) {
        Some(path) => ResumeData::open(PathBuf::from(path))?,
        None => {
            info!("No resume file given; exporting the sample resume");
            sample_resume()
        }
    };

    let config = ExportConfig::default();
    let tree = ResumeComposer::new()
        .with_role(config.preview_role.clone())
        .compose(&data);

    let rasterizer = match std::env::var_os(FONT_ENV) {
        Some(path) => BoxRasterizer::with_font_file(PathBuf::from(path))?,
        None => {
            warn!("{FONT_ENV} not set; text will be drawn as placeholder bars");
            BoxRasterizer::new()
        }
    };

    let pipeline = ExportPipeline::with_config(rasterizer, config);
    let (status, result) = pipeline.export(ExportStatus::idle(), &tree).await;
    let result = result?;

    for skipped in &result.skipped {
        warn!(
            index = skipped.index,
            target = %skipped.target,
            label = %skipped.label,
            "{}",
            describe_skipped_link(&skipped.reason)
        );
    }

    let path = write_export(
        &result,
        std::env::current_dir()?,
        &pipeline.config().output_file_name,
    )?;

    info!(
        stage = ?status.stage(),
        attached = result.attached_count(),
        skipped = result.skipped_count(),
        path = %path.display(),
        "Resume exported"
    );

    Ok(path)
}

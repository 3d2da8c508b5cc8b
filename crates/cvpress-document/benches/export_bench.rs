// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the synchronous export stages: region extraction,
// page fitting, and PDF assembly.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cvpress_core::{LinkRegion, RasterImage, Rect};
use cvpress_document::raster::Canvas;
use cvpress_document::{PdfAssembler, ResumeComposer, extract_regions, fit_to_page, sample_resume};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Region extraction over the composed sample resume.
fn bench_extract_regions(c: &mut Criterion) {
    let tree = ResumeComposer::new().compose(&sample_resume());

    c.bench_function("extract_regions (sample resume)", |b| {
        b.iter(|| black_box(extract_regions(black_box(&tree))));
    });
}

/// Page fitting for a portrait and a landscape capture.
fn bench_fit(c: &mut Criterion) {
    c.bench_function("fit_to_page (portrait + landscape)", |b| {
        b.iter(|| {
            black_box(fit_to_page(black_box(1588.0), black_box(2246.0), 210.0, 297.0).ok());
            black_box(fit_to_page(black_box(2000.0), black_box(1000.0), 210.0, 297.0).ok());
        });
    });
}

/// Assembly of a 400x566 px capture with a dozen links, one of them invalid.
fn bench_assemble(c: &mut Criterion) {
    let (width, height) = (200u32, 283u32);
    let data = match Canvas::new(width * 2, height * 2, [255, 255, 255]).to_png_bytes() {
        Ok(data) => data,
        Err(err) => panic!("failed to encode bench raster: {err}"),
    };
    let image = RasterImage {
        pixel_width: width * 2,
        pixel_height: height * 2,
        pixel_ratio: 2,
        data,
    };
    let fit = match fit_to_page(f64::from(width * 2), f64::from(height * 2), 210.0, 297.0) {
        Ok(fit) => fit,
        Err(err) => panic!("failed to fit bench raster: {err}"),
    };
    let regions: Vec<LinkRegion> = (0..12)
        .map(|i| LinkRegion {
            target: if i == 5 {
                "not a link".into()
            } else {
                format!("https://example.com/{i}")
            },
            bounds: Rect::new(10.0, 10.0 + f64::from(i) * 20.0, 80.0, 14.0),
            label: format!("Link {i}"),
            font_size: 12.0,
        })
        .collect();
    let assembler = PdfAssembler::a4();

    c.bench_function("assemble (400x566, 12 links)", |b| {
        b.iter(|| {
            let result = assembler.assemble(
                black_box(&image),
                black_box(&fit),
                (width, height),
                black_box(&regions),
            );
            black_box(result.ok());
        });
    });
}

criterion_group!(benches, bench_extract_regions, bench_fit, bench_assemble);
criterion_main!(benches);

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF assembler — embed the captured bitmap on a single page with `printpdf`
// 0.8, then lay invisible URI link annotations over it with `lopdf`.
//
// printpdf 0.8 uses a data-oriented API: a page is a `PdfPage` holding a
// `Vec<Op>`, serialised via `PdfDocument::save()`. Link annotations are added
// afterwards on the lopdf object graph.
//
// Page geometry is kept in millimetres with a top-left origin until the last
// moment; PDF itself wants points with a bottom-left origin.

use cvpress_core::error::{CvpressError, Result};
use cvpress_core::{
    ExportConfig, ExportResult, FitTransform, LinkAttachError, LinkRegion, PaperSize, PlacedLink,
    RasterImage, RasterSummary, Rect, SkippedLink,
};
use lopdf::{Document, Object, dictionary};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::raster::hash_bytes;

const PT_PER_MM: f64 = 72.0 / 25.4;

/// At 72 dpi one image pixel is one point before scaling.
const IMAGE_DPI: f32 = 72.0;

/// Builds the exported page: bitmap plus clickable link overlay.
pub struct PdfAssembler {
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
    /// Smallest clickable link size on the page, in mm.
    min_link_size: (f64, f64),
}

impl PdfAssembler {
    /// Create an assembler targeting the given paper size with the default
    /// 10 x 4 mm link floor.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
            min_link_size: (10.0, 4.0),
        }
    }

    /// Create an assembler defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        let mut assembler = Self::new(config.paper_size);
        assembler.set_title(config.document_title.clone());
        assembler.set_min_link_size(config.min_link_width_mm, config.min_link_height_mm);
        assembler
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_min_link_size(&mut self, width_mm: f64, height_mm: f64) {
        self.min_link_size = (width_mm, height_mm);
    }

    /// Page dimensions in mm.
    pub fn page_size_mm(&self) -> (f64, f64) {
        self.paper_size.dimensions_mm()
    }

    // -- Assembly -------------------------------------------------------------

    /// Assemble the single-page document.
    ///
    /// `content_size` is the layout size (in layout pixels) the link regions
    /// were measured against. Links are attached independently: one that
    /// cannot be placed is recorded in [`ExportResult::skipped`] and the rest
    /// still go in. Only failures affecting the page as a whole are errors.
    #[instrument(skip_all, fields(
        pixel_width = image.pixel_width,
        pixel_height = image.pixel_height,
        regions = regions.len(),
    ))]
    pub fn assemble(
        &self,
        image: &RasterImage,
        fit: &FitTransform,
        content_size: (u32, u32),
        regions: &[LinkRegion],
    ) -> Result<ExportResult> {
        let (content_width, content_height) = content_size;
        if content_width == 0 || content_height == 0 {
            return Err(CvpressError::Assembly(format!(
                "content size {}x{} has no area to map links from",
                content_width, content_height
            )));
        }

        info!(paper = ?self.paper_size, "Assembling PDF");

        let page = self.render_page(image, fit)?;

        let scale = (
            fit.width / f64::from(content_width),
            fit.height / f64::from(content_height),
        );
        let (attached, skipped) = regions.iter().enumerate().fold(
            (Vec::new(), Vec::new()),
            |(mut attached, mut skipped), (index, region)| {
                match self.attach(index, region, fit, scale) {
                    Ok(link) => attached.push(link),
                    Err(reason) => {
                        warn!(index, target = %region.target, %reason, "Skipping link");
                        skipped.push(SkippedLink {
                            index,
                            target: region.target.clone(),
                            label: region.label.clone(),
                            reason,
                        });
                    }
                }
                (attached, skipped)
            },
        );

        let document = if attached.is_empty() {
            page
        } else {
            self.annotate(&page, &attached)?
        };

        info!(
            attached = attached.len(),
            skipped = skipped.len(),
            bytes = document.len(),
            "PDF assembled"
        );

        Ok(ExportResult {
            document,
            paper_size: self.paper_size,
            fit: *fit,
            raster: RasterSummary {
                pixel_width: image.pixel_width,
                pixel_height: image.pixel_height,
                digest: hash_bytes(&image.data),
            },
            attached,
            skipped,
        })
    }

    /// Validate and place one region.
    fn attach(
        &self,
        index: usize,
        region: &LinkRegion,
        fit: &FitTransform,
        scale: (f64, f64),
    ) -> std::result::Result<PlacedLink, LinkAttachError> {
        validate_target(&region.target)?;
        let rect = place_link(region, fit, scale, self.min_link_size)?;

        debug!(
            index,
            target = %region.target,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Link placed"
        );

        Ok(PlacedLink {
            index,
            target: region.target.trim().to_string(),
            rect,
            label: region.label.clone(),
        })
    }

    /// The page with only the bitmap on it.
    fn render_page(&self, image: &RasterImage, fit: &FitTransform) -> Result<Vec<u8>> {
        let (page_w_mm, page_h_mm) = self.page_size_mm();
        let title = self.title.as_deref().unwrap_or("Resume");

        let decoded = ::image::load_from_memory(&image.data).map_err(|err| {
            CvpressError::ImageError(format!("failed to decode raster for PDF: {}", err))
        })?;
        if (decoded.width(), decoded.height()) != (image.pixel_width, image.pixel_height) {
            return Err(CvpressError::ImageError(format!(
                "raster claims {}x{} but decodes to {}x{}",
                image.pixel_width,
                image.pixel_height,
                decoded.width(),
                decoded.height()
            )));
        }

        let rgb_image = decoded.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: image.pixel_width as usize,
            height: image.pixel_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let rendered_w_pt = Mm(fit.width as f32).into_pt().0;
        let rendered_h_pt = Mm(fit.height as f32).into_pt().0;
        let x_offset = Mm(fit.offset_x as f32).into_pt().0;
        let y_offset = Mm((page_h_mm - fit.offset_y - fit.height) as f32).into_pt().0;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_offset)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(rendered_w_pt / image.pixel_width as f32),
                scale_y: Some(rendered_h_pt / image.pixel_height as f32),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        }];

        let page = PdfPage::new(Mm(page_w_mm as f32), Mm(page_h_mm as f32), ops);
        doc.with_pages(vec![page]);

        debug!(rendered_w_pt, rendered_h_pt, x_offset, y_offset, "Image placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }

    /// Add one invisible /Link annotation per placed link to the first page.
    fn annotate(&self, page_pdf: &[u8], links: &[PlacedLink]) -> Result<Vec<u8>> {
        let (_, page_h_mm) = self.page_size_mm();

        let mut doc = Document::load_mem(page_pdf).map_err(|err| {
            CvpressError::Assembly(format!("failed to reopen rendered page: {}", err))
        })?;
        let page_id = *doc
            .get_pages()
            .get(&1)
            .ok_or_else(|| CvpressError::Assembly("rendered document has no page".into()))?;

        let annotations: Vec<Object> = links
            .iter()
            .map(|link| {
                let [llx, lly, urx, ury] = pdf_rect(&link.rect, page_h_mm);
                let action = dictionary! {
                    "Type" => "Action",
                    "S" => "URI",
                    "URI" => Object::string_literal(link.target.as_str()),
                };
                let annotation = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![
                        Object::Real(llx),
                        Object::Real(lly),
                        Object::Real(urx),
                        Object::Real(ury),
                    ],
                    "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
                    // Print flag, so the link survives into printed output.
                    "F" => Object::Integer(4),
                    "A" => action,
                };
                Object::Reference(doc.add_object(annotation))
            })
            .collect();

        match doc.get_object_mut(page_id) {
            Ok(Object::Dictionary(page)) => match page.get_mut(b"Annots") {
                Ok(Object::Array(existing)) => existing.extend(annotations),
                _ => page.set("Annots", Object::Array(annotations)),
            },
            _ => {
                return Err(CvpressError::Assembly(
                    "rendered page is not a dictionary".into(),
                ));
            }
        }

        let mut output = Vec::new();
        doc.save_to(&mut output).map_err(|err| {
            CvpressError::Assembly(format!("failed to serialise annotated PDF: {}", err))
        })?;

        Ok(output)
    }
}

// -- Link placement -----------------------------------------------------------

/// Check that a link target can become a URI action.
///
/// The target must be non-empty after trimming, free of whitespace and
/// control characters, and start with a URI scheme (`alpha *( alpha / digit /
/// "+" / "-" / "." ) ":"`).
pub fn validate_target(target: &str) -> std::result::Result<(), LinkAttachError> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(LinkAttachError::EmptyTarget);
    }

    let malformed = |reason: &str| LinkAttachError::MalformedTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(malformed("contains whitespace or control characters"));
    }

    let Some((scheme, _)) = trimmed.split_once(':') else {
        return Err(malformed("missing URI scheme"));
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return Err(malformed("invalid URI scheme"));
    }

    Ok(())
}

/// Map a region from layout pixels onto the page, in mm with a top-left
/// origin.
///
/// `scale` is `(fitted width / content width, fitted height / content
/// height)`. The result is never smaller than `minimum`, so zero-area regions
/// stay clickable.
pub fn place_link(
    region: &LinkRegion,
    fit: &FitTransform,
    scale: (f64, f64),
    minimum: (f64, f64),
) -> std::result::Result<Rect, LinkAttachError> {
    let bounds = &region.bounds;
    if !bounds.is_finite() || !scale.0.is_finite() || !scale.1.is_finite() {
        return Err(LinkAttachError::InvalidGeometry);
    }

    Ok(Rect::new(
        fit.offset_x + bounds.x * scale.0,
        fit.offset_y + bounds.y * scale.1,
        (bounds.width * scale.0).max(minimum.0),
        (bounds.height * scale.1).max(minimum.1),
    ))
}

/// Convert a top-left-origin mm rectangle to a PDF `[llx lly urx ury]` in
/// points.
fn pdf_rect(rect: &Rect, page_height_mm: f64) -> [f32; 4] {
    let llx = rect.x * PT_PER_MM;
    let urx = rect.right() * PT_PER_MM;
    let lly = (page_height_mm - rect.bottom()) * PT_PER_MM;
    let ury = (page_height_mm - rect.y) * PT_PER_MM;
    [llx as f32, lly as f32, urx as f32, ury as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fit::fit_to_page;
    use crate::pdf::reader::PdfReader;
    use crate::raster::Canvas;

    /// Blank raster of a `width` x `height` layout captured at `ratio`.
    fn raster(width: u32, height: u32, ratio: u32) -> RasterImage {
        let canvas = Canvas::new(width * ratio, height * ratio, [255, 255, 255]);
        RasterImage {
            pixel_width: width * ratio,
            pixel_height: height * ratio,
            pixel_ratio: ratio,
            data: canvas.to_png_bytes().unwrap(),
        }
    }

    fn region(target: &str, x: f64, y: f64, width: f64, height: f64) -> LinkRegion {
        LinkRegion {
            target: target.into(),
            bounds: Rect::new(x, y, width, height),
            label: format!("label for {target}"),
            font_size: 12.0,
        }
    }

    fn assemble(
        content: (u32, u32),
        regions: &[LinkRegion],
    ) -> (ExportResult, RasterImage) {
        let image = raster(content.0, content.1, 2);
        let fit = fit_to_page(
            f64::from(image.pixel_width),
            f64::from(image.pixel_height),
            210.0,
            297.0,
        )
        .unwrap();
        let result = PdfAssembler::a4()
            .assemble(&image, &fit, content, regions)
            .unwrap();
        (result, image)
    }

    #[test]
    fn one_bad_link_does_not_stop_the_others() {
        let regions = [
            region("https://example.com/one", 10.0, 10.0, 50.0, 12.0),
            region("not a url", 10.0, 40.0, 50.0, 12.0),
            region("https://example.com/three", 10.0, 70.0, 50.0, 12.0),
        ];
        let (result, _) = assemble((200, 100), &regions);

        let attached: Vec<usize> = result.attached.iter().map(|l| l.index).collect();
        assert_eq!(attached, vec![0, 2]);
        assert_eq!(result.skipped_count(), 1);
        assert_eq!(result.skipped[0].index, 1);
        assert!(matches!(
            result.skipped[0].reason,
            LinkAttachError::MalformedTarget { .. }
        ));

        let links = PdfReader::from_bytes(&result.document)
            .unwrap()
            .link_annotations()
            .unwrap();
        let uris: Vec<&str> = links.iter().map(|l| l.uri.as_str()).collect();
        assert_eq!(uris, vec!["https://example.com/one", "https://example.com/three"]);
    }

    #[test]
    fn zero_size_region_gets_minimum_area() {
        let (result, _) = assemble((200, 100), &[region("mailto:a@example.com", 20.0, 20.0, 0.0, 0.0)]);
        let placed = &result.attached[0].rect;
        assert_eq!(placed.width, 10.0);
        assert_eq!(placed.height, 4.0);

        let links = PdfReader::from_bytes(&result.document)
            .unwrap()
            .link_annotations()
            .unwrap();
        let min_w_pt = (10.0 * PT_PER_MM) as f32;
        let min_h_pt = (4.0 * PT_PER_MM) as f32;
        assert!((links[0].width_pt() - min_w_pt).abs() < 0.01);
        assert!((links[0].height_pt() - min_h_pt).abs() < 0.01);
    }

    #[test]
    fn links_follow_the_fit_transform() {
        // 200x100 layout -> width-fit: 210 x 105 mm, centred at y = 96 mm.
        // Layout-to-page scale is 210 / 200 = 1.05 mm per layout pixel.
        let (result, _) = assemble((200, 100), &[region("https://example.com", 100.0, 50.0, 40.0, 20.0)]);
        assert_eq!(result.fit.offset_y, 96.0);

        let rect = result.attached[0].rect;
        assert!((rect.x - 105.0).abs() < 1e-9);
        assert!((rect.y - (96.0 + 52.5)).abs() < 1e-9);
        assert!((rect.width - 42.0).abs() < 1e-9);
        assert!((rect.height - 21.0).abs() < 1e-9);

        // Same rectangle in PDF space: flipped to a bottom-left origin.
        let link = &PdfReader::from_bytes(&result.document)
            .unwrap()
            .link_annotations()
            .unwrap()[0];
        let expected = pdf_rect(&rect, 297.0);
        for (actual, expected) in link.rect.iter().zip(expected) {
            assert!((actual - expected).abs() < 0.01, "{actual} != {expected}");
        }
        assert!((link.rect[1] - ((297.0 - 96.0 - 52.5 - 21.0) * PT_PER_MM) as f32).abs() < 0.01);
    }

    /// Transformation matrix in force when page 1 draws its image, composed
    /// from every `cm` before the `Do`.
    fn image_matrix(document: &[u8]) -> [f64; 6] {
        let doc = Document::load_mem(document).unwrap();
        let page_id = doc.get_pages()[&1];
        let content = lopdf::content::Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

        let mut ctm = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        for operation in &content.operations {
            match operation.operator.as_str() {
                "cm" => {
                    let m: Vec<f64> = operation
                        .operands
                        .iter()
                        .map(|operand| match operand {
                            Object::Integer(v) => *v as f64,
                            Object::Real(v) => f64::from(*v),
                            other => panic!("unexpected cm operand {other:?}"),
                        })
                        .collect();
                    ctm = [
                        m[0] * ctm[0] + m[1] * ctm[2],
                        m[0] * ctm[1] + m[1] * ctm[3],
                        m[2] * ctm[0] + m[3] * ctm[2],
                        m[2] * ctm[1] + m[3] * ctm[3],
                        m[4] * ctm[0] + m[5] * ctm[2] + ctm[4],
                        m[4] * ctm[1] + m[5] * ctm[3] + ctm[5],
                    ];
                }
                "Do" => return ctm,
                _ => {}
            }
        }
        panic!("page draws no image");
    }

    fn assert_image_covers_fit(result: &ExportResult) {
        let fit = &result.fit;
        let [a, b, c, d, e, f] = image_matrix(&result.document);
        let expected = [
            fit.width * PT_PER_MM,
            0.0,
            0.0,
            fit.height * PT_PER_MM,
            fit.offset_x * PT_PER_MM,
            (297.0 - fit.offset_y - fit.height) * PT_PER_MM,
        ];
        for (actual, expected) in [a, b, c, d, e, f].iter().zip(expected) {
            assert!((actual - expected).abs() < 0.01, "{actual} != {expected}");
        }
    }

    #[test]
    fn wide_image_fills_the_page_width() {
        // 400x200 px -> 210 x 105 mm, 96 mm above and below.
        let (result, _) = assemble((200, 100), &[]);
        assert_image_covers_fit(&result);

        let [a, _, _, d, e, f] = image_matrix(&result.document);
        assert!((a - 595.2756).abs() < 0.01);
        assert!((d - 297.6378).abs() < 0.01);
        assert!(e.abs() < 0.01);
        assert!((f - 272.1260).abs() < 0.01);
    }

    #[test]
    fn tall_layout_is_height_fitted_with_side_margins() {
        // 200x1000 layout -> 59.4 x 297 mm, centred 75.3 mm from the left.
        let (x, y, width, height) = (100.0, 500.0, 40.0, 20.0);
        let (result, _) = assemble((200, 1000), &[region("https://example.com/tall", x, y, width, height)]);
        let fit = result.fit;
        assert!((fit.height - 297.0).abs() < 1e-9);
        assert!((fit.width - 59.4).abs() < 1e-9);
        assert!((fit.offset_x - 75.3).abs() < 1e-9);
        assert_eq!(fit.offset_y, 0.0);
        assert_image_covers_fit(&result);

        let (scale_x, scale_y) = (fit.width / 200.0, fit.height / 1000.0);
        let rect = result.attached[0].rect;
        assert!((rect.x - (fit.offset_x + x * scale_x)).abs() < 1e-9);
        assert!((rect.x - 105.0).abs() < 1e-9);
        assert!((rect.y - (fit.offset_y + y * scale_y)).abs() < 1e-9);
        assert!((rect.width - width * scale_x).abs() < 1e-9);
        assert!((rect.height - height * scale_y).abs() < 1e-9);

        let link = &PdfReader::from_bytes(&result.document)
            .unwrap()
            .link_annotations()
            .unwrap()[0];
        assert!((f64::from(link.rect[0]) - 105.0 * PT_PER_MM).abs() < 0.01);
    }

    #[test]
    fn page_is_single_a4_sheet() {
        let (result, image) = assemble((400, 566), &[]);
        let reader = PdfReader::from_bytes(&result.document).unwrap();
        assert_eq!(reader.page_count(), 1);
        let (width, height) = reader.page_size_mm(1).unwrap();
        assert!((width - 210.0).abs() < 0.1);
        assert!((height - 297.0).abs() < 0.1);
        assert!(reader.link_annotations().unwrap().is_empty());

        assert_eq!(result.paper_size, PaperSize::A4);
        assert_eq!(result.raster.pixel_width, 800);
        assert_eq!(result.raster.pixel_height, 1132);
        assert_eq!(result.raster.digest, hash_bytes(&image.data));
    }

    #[test]
    fn empty_and_non_finite_regions_are_skipped() {
        let regions = [
            region("   ", 0.0, 0.0, 10.0, 10.0),
            region("https://example.com", f64::NAN, 0.0, 10.0, 10.0),
            region("https://example.com/ok", 0.0, 0.0, 10.0, 10.0),
        ];
        let (result, _) = assemble((200, 100), &regions);
        assert_eq!(result.attached_count(), 1);
        assert_eq!(result.skipped[0].reason, LinkAttachError::EmptyTarget);
        assert_eq!(result.skipped[1].reason, LinkAttachError::InvalidGeometry);
    }

    #[test]
    fn zero_content_size_is_an_assembly_error() {
        let image = raster(10, 10, 1);
        let fit = fit_to_page(10.0, 10.0, 210.0, 297.0).unwrap();
        let err = PdfAssembler::a4()
            .assemble(&image, &fit, (0, 10), &[])
            .unwrap_err();
        assert!(matches!(err, CvpressError::Assembly(_)));
    }

    #[test]
    fn undecodable_raster_is_rejected() {
        let image = RasterImage {
            pixel_width: 10,
            pixel_height: 10,
            pixel_ratio: 1,
            data: b"not an image".to_vec(),
        };
        let fit = fit_to_page(10.0, 10.0, 210.0, 297.0).unwrap();
        let err = PdfAssembler::a4()
            .assemble(&image, &fit, (10, 10), &[])
            .unwrap_err();
        assert!(matches!(err, CvpressError::ImageError(_)));
    }

    #[test]
    fn custom_link_floor_from_config() {
        let config = ExportConfig {
            min_link_width_mm: 15.0,
            min_link_height_mm: 6.0,
            ..ExportConfig::default()
        };
        let assembler = PdfAssembler::from_config(&config);
        let image = raster(100, 100, 1);
        let fit = fit_to_page(100.0, 100.0, 210.0, 297.0).unwrap();
        let result = assembler
            .assemble(&image, &fit, (100, 100), &[region("https://example.com", 0.0, 0.0, 1.0, 1.0)])
            .unwrap();
        assert_eq!(result.attached[0].rect.width, 15.0);
        assert_eq!(result.attached[0].rect.height, 6.0);
    }

    #[test]
    fn target_validation() {
        assert!(validate_target("https://example.com/path?q=1").is_ok());
        assert!(validate_target("mailto:someone@example.com").is_ok());
        assert!(validate_target("  https://example.com  ").is_ok());
        assert!(validate_target("git+ssh:host").is_ok());

        assert_eq!(validate_target(""), Err(LinkAttachError::EmptyTarget));
        assert_eq!(validate_target(" \t"), Err(LinkAttachError::EmptyTarget));
        for bad in ["example.com", "1http://x", "://x", "http://a b", "ht_tp://x"] {
            assert!(
                matches!(validate_target(bad), Err(LinkAttachError::MalformedTarget { .. })),
                "{bad} should be rejected"
            );
        }
    }
}

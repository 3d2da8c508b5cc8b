// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region extractor — turns the hyperlinks of a layout into `LinkRegion`s
// positioned relative to the layout's own top-left corner.

use cvpress_core::LinkRegion;
use tracing::{debug, instrument};

use super::tree::LayoutSource;

/// Font size used when an element's own size is missing or unreadable.
pub const FALLBACK_FONT_SIZE: f64 = 12.0;

/// Collect one `LinkRegion` per hyperlink in `source`.
///
/// A pure read of the current snapshot. Zero-area boxes and empty targets are
/// kept; deciding what is attachable is the assembler's job.
#[instrument(skip_all)]
pub fn extract_regions(source: &impl LayoutSource) -> Vec<LinkRegion> {
    let container = source.container_rect();

    let regions: Vec<LinkRegion> = source
        .interactive_elements()
        .into_iter()
        .map(|element| {
            let font_size = element
                .font_size
                .as_deref()
                .and_then(parse_font_size)
                .unwrap_or(FALLBACK_FONT_SIZE);
            LinkRegion {
                target: element.href,
                bounds: element.rect.relative_to(&container),
                label: element.text,
                font_size,
            }
        })
        .collect();

    for (index, region) in regions.iter().enumerate() {
        debug!(
            index,
            target = %region.target,
            label = %region.label,
            x = region.bounds.x,
            y = region.bounds.y,
            width = region.bounds.width,
            height = region.bounds.height,
            font_size = region.font_size,
            "Link region found"
        );
    }
    debug!(count = regions.len(), "Region extraction complete");

    regions
}

/// Read the leading number of a CSS font-size value such as `"14px"`,
/// `"13.5"` or `"1.2em"`.
///
/// Units are ignored. A value with no leading number, or a non-positive one,
/// yields `None`.
pub fn parse_font_size(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |mut at: usize| {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return None;
    }
    // An exponent only counts when digits follow it, so "1.2em" stops at "e".
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::InteractiveElement;
    use cvpress_core::Rect;

    /// Synthetic source standing in for a live renderer.
    struct FixedSource {
        container: Rect,
        elements: Vec<InteractiveElement>,
    }

    impl LayoutSource for FixedSource {
        fn container_rect(&self) -> Rect {
            self.container
        }

        fn content_size(&self) -> (u32, u32) {
            (794, 1123)
        }

        fn interactive_elements(&self) -> Vec<InteractiveElement> {
            self.elements.clone()
        }
    }

    fn element(href: &str, rect: Rect, font_size: Option<&str>) -> InteractiveElement {
        InteractiveElement {
            href: href.into(),
            rect,
            font_size: font_size.map(str::to_owned),
            text: "link".into(),
        }
    }

    #[test]
    fn bounds_are_relative_to_container() {
        let source = FixedSource {
            container: Rect::new(120.0, 340.0, 794.0, 600.0),
            elements: vec![element(
                "https://example.com",
                Rect::new(170.0, 400.0, 60.0, 16.0),
                Some("12px"),
            )],
        };
        let regions = extract_regions(&source);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bounds, Rect::new(50.0, 60.0, 60.0, 16.0));
        assert_eq!(regions[0].target, "https://example.com");
    }

    #[test]
    fn unreadable_font_size_falls_back_to_twelve() {
        let source = FixedSource {
            container: Rect::default(),
            elements: vec![
                element("a:", Rect::default(), None),
                element("b:", Rect::default(), Some("large")),
                element("c:", Rect::default(), Some("14px")),
            ],
        };
        let sizes: Vec<f64> = extract_regions(&source)
            .iter()
            .map(|region| region.font_size)
            .collect();
        assert_eq!(sizes, vec![12.0, 12.0, 14.0]);
    }

    #[test]
    fn zero_area_and_empty_targets_pass_through() {
        let source = FixedSource {
            container: Rect::default(),
            elements: vec![element("", Rect::new(5.0, 5.0, 0.0, 0.0), None)],
        };
        let regions = extract_regions(&source);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].target, "");
        assert_eq!(regions[0].bounds.width, 0.0);
    }

    #[test]
    fn parse_font_size_reads_the_leading_number() {
        assert_eq!(parse_font_size("14px"), Some(14.0));
        assert_eq!(parse_font_size(" 13.5 px "), Some(13.5));
        assert_eq!(parse_font_size("16"), Some(16.0));
        assert_eq!(parse_font_size("1.2em"), Some(1.2));
        assert_eq!(parse_font_size(".75rem"), Some(0.75));
        assert_eq!(parse_font_size("1e1px"), Some(10.0));
        assert_eq!(parse_font_size("0px"), None);
        assert_eq!(parse_font_size("-3px"), None);
        assert_eq!(parse_font_size("px"), None);
        assert_eq!(parse_font_size("."), None);
        assert_eq!(parse_font_size("NaN"), None);
    }
}

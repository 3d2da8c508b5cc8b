// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open an exported PDF and report its pages and link annotations
// using the `lopdf` crate.

use std::path::Path;

use cvpress_core::error::{CvpressError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

const MM_PER_PT: f64 = 25.4 / 72.0;

/// A URI link annotation found on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    /// 1-indexed page the annotation sits on.
    pub page: u32,
    pub uri: String,
    /// `[llx, lly, urx, ury]` in PDF points, bottom-left origin.
    pub rect: [f32; 4],
}

impl Hyperlink {
    pub fn width_pt(&self) -> f32 {
        self.rect[2] - self.rect[0]
    }

    pub fn height_pt(&self) -> f32 {
        self.rect[3] - self.rect[1]
    }
}

/// Read-only view over an existing PDF.
pub struct PdfReader {
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            CvpressError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            CvpressError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Page size in millimetres, taken from the (possibly inherited) /MediaBox.
    pub fn page_size_mm(&self, page_number: u32) -> Result<(f64, f64)> {
        let page = self.page_dict(page_number)?;
        let media_box = self.inherited(page, b"MediaBox").ok_or_else(|| {
            CvpressError::PdfError(format!("page {} has no /MediaBox", page_number))
        })?;
        let rect = self.rect_of(media_box).ok_or_else(|| {
            CvpressError::PdfError(format!("page {} has a malformed /MediaBox", page_number))
        })?;

        let width = f64::from(rect[2] - rect[0]) * MM_PER_PT;
        let height = f64::from(rect[3] - rect[1]) * MM_PER_PT;
        Ok((width, height))
    }

    /// Every URI link annotation in the document, in page then array order.
    ///
    /// Annotations that are not links, or links without a URI action, are
    /// ignored.
    pub fn link_annotations(&self) -> Result<Vec<Hyperlink>> {
        let mut links = Vec::new();

        for (page_number, page_id) in self.document.get_pages() {
            let page = self.dict_at(page_id).ok_or_else(|| {
                CvpressError::PdfError(format!("page {} is not a dictionary", page_number))
            })?;
            let Some(annots) = page.get(b"Annots").ok().and_then(|o| self.resolve(o)) else {
                continue;
            };
            let Ok(annots) = annots.as_array() else {
                warn!(page_number, "/Annots is not an array; ignoring");
                continue;
            };

            for annot in annots {
                let Some(Object::Dictionary(annot)) = self.resolve(annot) else {
                    continue;
                };
                if !matches!(annot.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Link") {
                    continue;
                }
                let Some(uri) = self.uri_of(annot) else {
                    continue;
                };
                let Some(rect) = annot.get(b"Rect").ok().and_then(|r| self.rect_of(r)) else {
                    warn!(page_number, %uri, "Link annotation without a usable /Rect");
                    continue;
                };
                links.push(Hyperlink {
                    page: page_number,
                    uri,
                    rect,
                });
            }
        }

        debug!(links = links.len(), "Link annotations read");
        Ok(links)
    }

    // -- Helpers --------------------------------------------------------------

    fn page_dict(&self, page_number: u32) -> Result<&Dictionary> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            CvpressError::PdfError(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;
        self.dict_at(page_id).ok_or_else(|| {
            CvpressError::PdfError(format!("page {} is not a dictionary", page_number))
        })
    }

    fn dict_at(&self, id: ObjectId) -> Option<&Dictionary> {
        match self.document.get_object(id).ok()? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Follow a reference one level; direct objects come back unchanged.
    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(id) => self.document.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// Look up `key` on a page, walking /Parent for inheritable attributes.
    fn inherited<'a>(&'a self, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        let mut node = page;
        // Page trees are shallow; the bound guards against /Parent cycles.
        for _ in 0..32 {
            if let Ok(value) = node.get(key) {
                return self.resolve(value);
            }
            let parent = node.get(b"Parent").ok()?.as_reference().ok()?;
            node = self.dict_at(parent)?;
        }
        None
    }

    fn rect_of(&self, object: &Object) -> Option<[f32; 4]> {
        let values = self.resolve(object)?.as_array().ok()?;
        if values.len() != 4 {
            return None;
        }
        let mut rect = [0.0f32; 4];
        for (slot, value) in rect.iter_mut().zip(values) {
            *slot = match self.resolve(value)? {
                Object::Integer(v) => *v as f32,
                Object::Real(v) => *v as f32,
                _ => return None,
            };
        }
        Some(rect)
    }

    fn uri_of(&self, annot: &Dictionary) -> Option<String> {
        let action = match self.resolve(annot.get(b"A").ok()?)? {
            Object::Dictionary(action) => action,
            _ => return None,
        };
        if !matches!(action.get(b"S"), Ok(Object::Name(name)) if name == b"URI") {
            return None;
        }
        match self.resolve(action.get(b"URI").ok()?)? {
            Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// One-page document whose MediaBox lives on the page tree root and whose
    /// page carries a URI link, a non-link annotation, and a link without an
    /// action.
    fn fixture() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let action = dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal("https://example.com/a"),
        };
        let link = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![Object::Integer(10), Object::Integer(20), Object::Real(40.5), Object::Integer(32)],
            "A" => action,
        });
        let note = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Text",
            "Rect" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(5), Object::Integer(5)],
        });
        let dead_link = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(5), Object::Integer(5)],
        });

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Annots" => vec![
                Object::Reference(link),
                Object::Reference(note),
                Object::Reference(dead_link),
            ],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
                "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(595.28), Object::Real(841.89)],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn reads_page_count_and_inherited_media_box() {
        let reader = PdfReader::from_bytes(&fixture()).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert!(reader.source_path().is_none());

        let (width, height) = reader.page_size_mm(1).unwrap();
        assert!((width - 210.0).abs() < 0.01, "width {width}");
        assert!((height - 297.0).abs() < 0.01, "height {height}");
    }

    #[test]
    fn only_uri_links_are_reported() {
        let links = PdfReader::from_bytes(&fixture())
            .unwrap()
            .link_annotations()
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].page, 1);
        assert_eq!(links[0].uri, "https://example.com/a");
        assert_eq!(links[0].rect, [10.0, 20.0, 40.5, 32.0]);
        assert!((links[0].width_pt() - 30.5).abs() < f32::EPSILON);
        assert!((links[0].height_pt() - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_page_is_an_error() {
        let reader = PdfReader::from_bytes(&fixture()).unwrap();
        assert!(reader.page_size_mm(2).is_err());
    }

    #[test]
    fn open_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.pdf");
        std::fs::write(&path, fixture()).unwrap();

        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert!(reader.source_path().unwrap().ends_with("fixture.pdf"));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = PdfReader::from_bytes(b"not a pdf").err().unwrap();
        assert!(matches!(err, CvpressError::PdfError(_)));
    }
}

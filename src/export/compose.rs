//! Document composition
//!
//! A [`DocumentComposer`] builds a single page, places a captured bitmap on it and
//! serializes the result. [`PdfComposer`] writes PDF 1.5 with the bitmap embedded as
//! a deflate-compressed RGB image XObject.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::io::Write;
use tracing::debug;

use super::capture::Bitmap;
use super::layout::{PageSize, Placement, mm_to_points};
use crate::{PaceBandError, Result};

/// Document composer capability
pub trait DocumentComposer: Send + Sync {
    /// In-progress document
    type Document: Send;

    /// Start a document with one empty page of the given size
    fn new_page(&self, size: PageSize) -> Result<Self::Document>;

    /// Place `bitmap` on the page at `placement`
    fn embed_image(
        &self,
        doc: &mut Self::Document,
        bitmap: &Bitmap,
        placement: Placement,
    ) -> Result<()>;

    /// Serialize the finished document
    fn save(&self, doc: Self::Document) -> Result<Vec<u8>>;
}

/// PDF page under construction
pub struct PdfDocument {
    inner: Document,
    page: PageSize,
    pages_id: ObjectId,
    images: Vec<(String, ObjectId)>,
    operations: Vec<Operation>,
}

impl PdfDocument {
    /// Page size the document was started with
    pub fn page(&self) -> PageSize {
        self.page
    }

    /// Number of images placed so far
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

/// [`DocumentComposer`] producing PDF bytes
#[derive(Debug, Clone, Copy)]
pub struct PdfComposer {
    compression: Compression,
}

impl PdfComposer {
    pub fn new() -> Self {
        Self { compression: Compression::default() }
    }

    /// Use a specific zlib level for image data
    pub fn with_compression(level: u32) -> Self {
        Self { compression: Compression::new(level.min(9)) }
    }

    fn deflate(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let failed = |e: std::io::Error| {
            PaceBandError::compose_failed_with_source("image compression failed", Box::new(e))
        };
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len() / 4), self.compression);
        encoder.write_all(bytes).map_err(failed)?;
        encoder.finish().map_err(failed)
    }
}

impl Default for PdfComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

impl DocumentComposer for PdfComposer {
    type Document = PdfDocument;

    fn new_page(&self, size: PageSize) -> Result<PdfDocument> {
        if !(size.width_mm > 0.0 && size.height_mm > 0.0) {
            return Err(PaceBandError::compose_failed(format!(
                "invalid page size {}x{}mm",
                size.width_mm, size.height_mm
            )));
        }

        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();
        Ok(PdfDocument { inner, page: size, pages_id, images: Vec::new(), operations: Vec::new() })
    }

    fn embed_image(
        &self,
        doc: &mut PdfDocument,
        bitmap: &Bitmap,
        placement: Placement,
    ) -> Result<()> {
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(PaceBandError::compose_failed("cannot embed an empty bitmap"));
        }

        let data = self.deflate(&bitmap.rgb_bytes())?;
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(bitmap.width()),
                "Height" => i64::from(bitmap.height()),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "FlateDecode",
            },
            data,
        );
        let image_id = doc.inner.add_object(image);
        let name = format!("Im{}", doc.images.len());

        let (x, y) = placement.pdf_origin(doc.page);
        let width = mm_to_points(placement.width_mm);
        let height = mm_to_points(placement.height_mm);
        doc.operations.push(Operation::new("q", vec![]));
        doc.operations.push(Operation::new(
            "cm",
            vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
        ));
        doc.operations.push(Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]));
        doc.operations.push(Operation::new("Q", vec![]));

        debug!(
            "Embedded {}x{} px image as {} at ({:.1}, {:.1})pt, {:.1}x{:.1}pt",
            bitmap.width(),
            bitmap.height(),
            name,
            x,
            y,
            width,
            height
        );
        doc.images.push((name, image_id));
        Ok(())
    }

    fn save(&self, doc: PdfDocument) -> Result<Vec<u8>> {
        let PdfDocument { mut inner, page, pages_id, images, operations } = doc;

        let content = Content { operations }
            .encode()
            .map_err(|e| PaceBandError::compose_failed(format!("content stream: {}", e)))?;
        let content_id = inner.add_object(Stream::new(dictionary! {}, content));

        let mut xobjects = lopdf::Dictionary::new();
        for (name, id) in images {
            xobjects.set(name.into_bytes(), id);
        }

        let page_id = inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(page.width_points()),
                real(page.height_points()),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });
        inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        inner
            .save_to(&mut bytes)
            .map_err(|e| PaceBandError::compose_failed(format!("PDF serialization: {}", e)))?;
        debug!("Serialized PDF document: {} bytes", bytes.len());
        Ok(bytes)
    }
}

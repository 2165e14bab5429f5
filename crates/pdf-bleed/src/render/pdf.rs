//! PDF output page
//!
//! `PdfCanvas` accumulates content stream operations for a single page and
//! builds a complete lopdf `Document` from them.

use super::{DocumentCanvas, ImageRef};
use crate::constants::{CUT_TICK_WIDTH, mm_to_pt};
use crate::marks::PageSegment;
use crate::types::{LayoutError, PageSpec, Result};
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// One-page PDF canvas sized to a `PageSpec`
pub struct PdfCanvas {
    document: Document,
    page_width_pt: f32,
    page_height_pt: f32,
    images: Vec<ObjectId>,
    content_ops: Vec<String>,
}

impl PdfCanvas {
    pub fn new(page: PageSpec) -> Self {
        Self {
            document: Document::with_version("1.7"),
            page_width_pt: mm_to_pt(page.page_width_mm),
            page_height_pt: mm_to_pt(page.page_height_mm),
            images: Vec::new(),
            content_ops: Vec::new(),
        }
    }

    /// Build the page tree and catalog, returning the finished document
    pub fn finish(self) -> Document {
        let PdfCanvas {
            mut document,
            page_width_pt,
            page_height_pt,
            images,
            content_ops,
        } = self;

        let pages_id = document.new_object_id();

        let mut xobjects = Dictionary::new();
        for (idx, image_id) in images.iter().enumerate() {
            xobjects.set(image_name(idx).into_bytes(), Object::Reference(*image_id));
        }

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        // Marks are plain black hairlines
        let mut content = format!("0 0 0 RG\n{} w\n", CUT_TICK_WIDTH);
        content.push_str(&content_ops.join(""));
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_width_pt),
                Object::Real(page_height_pt),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));
        let page_id = document.add_object(page_dict);

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        document
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        document.trailer.set("Root", catalog_id);

        document
    }
}

fn image_name(idx: usize) -> String {
    format!("Im{}", idx)
}

impl DocumentCanvas for PdfCanvas {
    fn add_image(&mut self, image: &RgbImage) -> Result<ImageRef> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(LayoutError::Config(
                "Cannot embed an empty image".to_string(),
            ));
        }

        let mut image_dict = Dictionary::new();
        image_dict.set("Type", Object::Name(b"XObject".to_vec()));
        image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
        image_dict.set("Width", Object::Integer(width as i64));
        image_dict.set("Height", Object::Integer(height as i64));
        image_dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        image_dict.set("BitsPerComponent", Object::Integer(8));

        let image_id = self
            .document
            .add_object(Stream::new(image_dict, image.as_raw().clone()));
        self.images.push(image_id);

        Ok(ImageRef(self.images.len() - 1))
    }

    fn draw_image(
        &mut self,
        image: ImageRef,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<()> {
        if image.0 >= self.images.len() {
            return Err(LayoutError::Config(format!(
                "Unknown image reference {}",
                image.0
            )));
        }

        self.content_ops.push(format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            mm_to_pt(width_mm),
            mm_to_pt(height_mm),
            mm_to_pt(x_mm),
            mm_to_pt(y_mm),
            image_name(image.0)
        ));
        Ok(())
    }

    fn draw_segment(&mut self, segment: &PageSegment) -> Result<()> {
        self.content_ops.push(format!(
            "{} {} m {} {} l S\n",
            mm_to_pt(segment.x1),
            mm_to_pt(segment.y1),
            mm_to_pt(segment.x2),
            mm_to_pt(segment.y2)
        ));
        Ok(())
    }
}

//! Thin page-construction layer over lopdf.
//!
//! The renderer only needs fixed-position Helvetica text, an optional image,
//! and page breaks; this module wraps lopdf's object model behind exactly
//! those primitives. Content streams are assembled as plain text operators
//! and attached to pages when the next page starts or the document is
//! finished.

use crate::error::{Error, Result};
use crate::logo::{LogoAsset, LogoFormat};
use image::GenericImageView;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::io::Cursor;

/// An image embedded into one document's resource table.
///
/// The handle is only valid for the [`DocBuilder`] that created it; a new
/// document needs a fresh embed.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Pixel width of the decoded image.
    pub width: u32,
    /// Pixel height of the decoded image.
    pub height: u32,
    id: ObjectId,
}

struct PageInProgress {
    width: f32,
    height: f32,
    content: String,
    xobjects: Vec<(String, ObjectId)>,
}

/// Incremental builder for one PDF document.
pub struct DocBuilder {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    kids: Vec<Object>,
    current: Option<PageInProgress>,
    image_count: usize,
}

impl DocBuilder {
    /// Start an empty document with a Helvetica base font.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        Self {
            doc,
            pages_id,
            font_id,
            kids: Vec::new(),
            current: None,
            image_count: 0,
        }
    }

    /// Embed a logo into this document, returning a drawable handle.
    ///
    /// JPEG bytes pass through with the DCTDecode filter; PNG is transcoded
    /// to raw 8-bit RGB. Fails on undecodable image data.
    pub fn embed_image(&mut self, asset: &LogoAsset) -> Result<EmbeddedImage> {
        let decoded = image::load_from_memory(asset.bytes())
            .map_err(|e| Error::Image(format!("Failed to decode logo: {}", e)))?;
        let (width, height) = decoded.dimensions();

        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "BitsPerComponent" => 8,
        };

        let data = match asset.format() {
            LogoFormat::Jpeg => {
                let color_space = match decoded.color() {
                    image::ColorType::L8 | image::ColorType::La8 => "DeviceGray",
                    _ => "DeviceRGB",
                };
                dict.set("ColorSpace", Object::Name(color_space.into()));
                dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
                asset.bytes().to_vec()
            },
            LogoFormat::Png => {
                dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
                decoded.to_rgb8().into_raw()
            },
        };

        let id = self.doc.add_object(Stream::new(dict, data));
        Ok(EmbeddedImage { width, height, id })
    }

    /// Finish the current page (if any) and start a new one.
    pub fn add_page(&mut self, width: f32, height: f32) {
        self.flush_page();
        self.current = Some(PageInProgress {
            width,
            height,
            content: String::new(),
            xobjects: Vec::new(),
        });
    }

    /// Draw a single line of text at a fixed position on the current page.
    pub fn text(&mut self, x: f32, y: f32, size: f32, text: &str) {
        if let Some(page) = self.current.as_mut() {
            page.content.push_str(&format!(
                "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
                size,
                x,
                y,
                escape_literal(text)
            ));
        }
    }

    /// Draw an embedded image at a fixed position and size on the current
    /// page. `(x, y)` is the lower-left corner.
    pub fn draw_image(&mut self, img: &EmbeddedImage, x: f32, y: f32, w: f32, h: f32) {
        if let Some(page) = self.current.as_mut() {
            let name = match page.xobjects.iter().position(|(_, id)| *id == img.id) {
                Some(i) => page.xobjects[i].0.clone(),
                None => {
                    self.image_count += 1;
                    let name = format!("Im{}", self.image_count);
                    page.xobjects.push((name.clone(), img.id));
                    name
                },
            };
            page.content
                .push_str(&format!("q {} 0 0 {} {} {} cm /{} Do Q\n", w, h, x, y, name));
        }
    }

    /// Number of pages added so far, counting the page in progress.
    pub fn page_count(&self) -> usize {
        self.kids.len() + usize::from(self.current.is_some())
    }

    fn flush_page(&mut self) {
        let Some(page) = self.current.take() else {
            return;
        };

        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, page.content.into_bytes()));

        let mut resources = Dictionary::new();
        resources.set(
            "Font",
            dictionary! { "F1" => self.font_id },
        );
        if !page.xobjects.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &page.xobjects {
                xobjects.set(name.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", xobjects);
        }
        let resources_id = self.doc.add_object(resources);

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (page.width as i64).into(),
                (page.height as i64).into(),
            ],
        });
        self.kids.push(page_id.into());
    }

    /// Serialize the document to bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_page();

        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Cursor::new(Vec::new());
        self.doc.save_to(&mut bytes)?;
        Ok(bytes.into_inner())
    }
}

impl Default for DocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a string for a PDF literal string `( ... )`.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

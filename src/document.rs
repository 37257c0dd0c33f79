use crate::{
    font::Font,
    image::Image,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    GuideError, Pt,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Iterate over the pages in document order
    pub fn ordered_pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. The returned id is how spans refer to it.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored once and can be
    /// placed on any number of pages.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a bookmark pointing at `top` on the page at `page_index`
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize, top: Pt) {
        self.outline
            .add_bookmark(page_index, top, title.to_string());
    }

    /// Render the document into an in-memory PDF
    pub fn to_bytes(&self) -> Result<Vec<u8>, GuideError> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// Write the entire document to the writer. The whole document is rendered in
    /// memory first and handed to the writer in a single call, so a failing writer
    /// never sees a partial document from us.
    pub fn write<W: Write>(&self, mut w: W) -> Result<(), GuideError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in self.page_order.iter().enumerate() {
            let page = self.pages.get(*id).ok_or(GuideError::PageMissing)?;
            page.write(&mut refs, page_index, &self.fonts, &self.images, &mut writer)?;
        }

        let outlines_id = self.outline.write(&mut refs, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        drop(catalog);

        let bytes = writer.finish();
        w.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builtin::BuiltinFont, colours, pagesize, SpanFont, SpanLayout};

    fn one_page_document() -> Document {
        let mut doc = Document::default();
        let font = doc.add_font(BuiltinFont::Helvetica.into());
        let mut page = Page::new(pagesize::A4);
        page.add_span(SpanLayout {
            text: "Hello".into(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            colour: colours::BLACK,
            coords: (Pt(72.0), Pt(720.0)),
        });
        doc.add_page(page);
        doc.add_bookmark("Start", 0, Pt(720.0));
        doc
    }

    #[test]
    fn writes_a_pdf_header_and_trailer() {
        let bytes = one_page_document().to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn builtin_fonts_are_referenced_not_embedded() {
        let bytes = one_page_document().to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/BaseFont /Helvetica"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(!text.contains("/FontFile2"));
        assert!(text.contains("/Outlines"));
    }

    #[test]
    fn writing_twice_is_identical() {
        let doc = one_page_document();
        assert_eq!(doc.to_bytes().unwrap(), doc.to_bytes().unwrap());
        assert_eq!(doc.page_count(), 1);
    }
}

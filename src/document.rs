use crate::{
    font::BuiltinFont,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectRefs, RefType},
    CardError,
};
use id_arena::{Arena, Id};
use pdf_writer::Pdf;
use std::io::Write;
use std::path::Path;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub images: Arena<Image>,
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

    /// The page at the given 0-based position, if any
    pub fn page_at(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, such that any page can re-use an image by referring to its id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to the writer. The document is rendered in memory
    /// first, so the writer only ever sees complete output.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), CardError> {
        let Document {
            info,
            pages,
            page_order,
            images,
        } = self;

        let mut refs = ObjectRefs::default();

        let catalog_id = refs.alloc(RefType::Catalog);
        let page_tree_id = refs.alloc(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        for font in BuiltinFont::ALL.iter() {
            font.write(&mut refs, &mut writer);
        }

        for (i, image) in images.iter() {
            image.write(&mut refs, i.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(CardError::PageMissing)?;
            page.write(&mut refs, page_index, images.len(), &mut writer)?;
        }

        let page_refs = refs.pages(page_order.len());
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// Write the document to a file at `path`, creating or truncating it
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), CardError> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)?;
        writer.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn writes_a_well_formed_pdf_skeleton() {
        let mut doc = Document::default();
        doc.set_info(Info::titled("Skeleton", Some("tests")));
        doc.add_page(Page::new(pagesize::A4, None));
        doc.add_page(Page::new(pagesize::A4, None));
        assert_eq!(doc.page_count(), 2);

        let mut out = Vec::new();
        doc.write(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(text.contains("/Title (Skeleton)"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}

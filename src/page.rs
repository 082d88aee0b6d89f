use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::BuiltinFont;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectRefs, RefType};
use crate::units::*;
use crate::CardError;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub font: BuiltinFont,
    pub size: Pt,
}

/// A run of text drawn on a single baseline starting at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_index: usize,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    FillRect {
        rect: Rect,
        colour: Colour,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: Pt,
        colour: Colour,
        line_width: Pt,
    },
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        line_width: Pt,
    },
    Image(ImageLayout),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    /// Add a run of text. Runs added back to back share one text block, so
    /// they are painted together without resetting the graphics state.
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.contents.push(PageContents::FillRect { rect, colour });
    }

    pub fn stroke_round_rect(&mut self, rect: Rect, radius: Pt, colour: Colour, line_width: Pt) {
        self.contents.push(PageContents::StrokeRoundRect {
            rect,
            radius,
            colour,
            line_width,
        });
    }

    pub fn stroke_line(&mut self, from: (Pt, Pt), to: (Pt, Pt), colour: Colour, line_width: Pt) {
        self.contents.push(PageContents::Line {
            from,
            to,
            colour,
            line_width,
        });
    }

    /// All the text drawn on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectRefs,
        page_index: usize,
        image_count: usize,
        writer: &mut Pdf,
    ) -> Result<(), CardError> {
        let id = refs.alloc(RefType::Page(page_index));
        let page_tree_id = refs.get(RefType::PageTree).ok_or(CardError::PageMissing)?;
        let content_id = refs.alloc(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for font in BuiltinFont::ALL.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font.index())) {
                resource_fonts.pair(Name(format!("F{}", font.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for i in 0..image_count {
            if let Some(image_ref) = refs.get(RefType::Image(i)) {
                resource_xobjects.pair(Name(format!("I{i}").as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents)?;
        let compressed = compress_to_vec_zlib(
            rendered.as_slice(),
            CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize;

    fn span(text: &str, font: BuiltinFont) -> SpanLayout {
        SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                font,
                size: Pt(9.0),
            },
            colour: colours::BLACK,
            coords: (Pt(10.0), Pt(10.0)),
        }
    }

    #[test]
    fn consecutive_spans_share_a_text_block() {
        let mut page = Page::new(pagesize::A4, None);
        page.add_span(span("A.", BuiltinFont::Helvetica));
        page.add_span(span("option", BuiltinFont::Helvetica));
        page.fill_rect(Rect::from_origin(Pt(0.0), Pt(0.0), Pt(5.0), Pt(5.0)), colours::GREY);
        page.add_span(span("[B]", BuiltinFont::HelveticaBold));

        assert_eq!(page.contents.len(), 3);
        assert!(matches!(&page.contents[0], PageContents::Text(spans) if spans.len() == 2));
        assert!(matches!(&page.contents[2], PageContents::Text(spans) if spans.len() == 1));
        let texts: Vec<&str> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A.", "option", "[B]"]);

        let rendered = String::from_utf8(render_contents(&page.contents).unwrap()).unwrap();
        // one font selection and one save/restore for the shared block
        assert_eq!(rendered.matches("/F0 9 Tf").count(), 1);
        assert_eq!(rendered.matches("q\n").count(), 3);
    }
}

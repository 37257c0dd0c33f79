use super::LayoutCursor;
use crate::colour::Colour;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::units::*;

/// Pages of a top-to-bottom flow, addressed in millimetres from the top-left
/// corner the way the layout reasons about them. Pages are created on demand
/// when the cursor first writes to them, so a page break that is never
/// followed by content leaves no blank page behind.
pub struct Flow {
    size: PageSize,
    pages: Vec<Page>,
}

impl Flow {
    pub fn new(size: PageSize) -> Flow {
        Flow {
            size,
            pages: vec![Page::new(size)],
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.size
    }

    /// Converts a top-left millimetre position into PDF user space
    pub fn to_user_space(&self, x: Mm, y: Mm) -> (Pt, Pt) {
        (x.into(), (self.size.1 - y).into())
    }

    /// The page the cursor is on, created if needed
    pub fn page_mut(&mut self, cursor: &LayoutCursor) -> &mut Page {
        while self.pages.len() <= cursor.page_index() {
            self.pages.push(Page::new(self.size));
        }
        &mut self.pages[cursor.page_index()]
    }

    /// Places one line of text with its baseline at the cursor
    pub fn place_text(
        &mut self,
        cursor: &LayoutCursor,
        x: Mm,
        text: String,
        font: SpanFont,
        colour: Colour,
    ) {
        let coords = self.to_user_space(x, cursor.y());
        self.page_mut(cursor).add_span(SpanLayout {
            text,
            font,
            colour,
            coords,
        });
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Ends the layout pass, returning one page for every page the cursor
    /// reached
    pub fn finish(mut self, cursor: LayoutCursor) -> Vec<Page> {
        let page_count = cursor.finish();
        while self.pages.len() < page_count {
            self.pages.push(Page::new(self.size));
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builtin::BuiltinFont, colours, pagesize, Font};
    use id_arena::Arena;

    #[test]
    fn pages_appear_when_first_written() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(BuiltinFont::Helvetica.into());
        let font = SpanFont { id, size: Pt(11.0) };

        let mut flow = Flow::new(pagesize::A4);
        let mut cursor = LayoutCursor::new(Mm(20.0));
        flow.place_text(&cursor, Mm(20.0), "first".into(), font, colours::BLACK);
        cursor.break_page();
        assert_eq!(flow.page_count(), 1);
        flow.place_text(&cursor, Mm(20.0), "second".into(), font, colours::BLACK);
        assert_eq!(flow.page_count(), 2);

        let pages = flow.finish(cursor);
        assert_eq!(pages.len(), 2);
        let span = pages[1].spans().next().unwrap();
        assert_eq!(span.text, "second");
        let (x, y) = span.coords;
        assert!((x.0 - 56.693).abs() < 0.01);
        // 277mm above the bottom edge
        assert!((y.0 - 785.197).abs() < 0.01);
    }
}

use crate::units::Mm;

/// Where the next line of a top-to-bottom flow goes: a page index and a
/// vertical offset measured down from the top edge of that page.
///
/// The cursor is owned by a single layout pass and handed by `&mut` to each
/// step that places content. [LayoutCursor::finish] consumes it, so nothing
/// can move it once the page count has been read.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutCursor {
    y: Mm,
    page_index: usize,
    top: Mm,
}

impl LayoutCursor {
    /// Start at `top` on the first page
    pub fn new(top: Mm) -> LayoutCursor {
        LayoutCursor {
            y: top,
            page_index: 0,
            top,
        }
    }

    /// Offset of the current baseline from the top of the page
    pub fn y(&self) -> Mm {
        self.y
    }

    /// 0-based index of the page the cursor is on
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn advance(&mut self, dy: Mm) {
        self.y += dy;
    }

    /// Whether the cursor has moved strictly beyond `threshold`
    pub fn is_past(&self, threshold: Mm) -> bool {
        self.y > threshold
    }

    /// Move to the top margin of the next page
    pub fn break_page(&mut self) {
        self.page_index += 1;
        self.y = self.top;
    }

    /// Break the page if the cursor is beyond `threshold`, returning whether it did
    pub fn break_if_past(&mut self, threshold: Mm) -> bool {
        if self.is_past(threshold) {
            log::debug!(
                "page break: {}mm is past {}mm on page {}",
                self.y.0,
                threshold.0,
                self.page_index + 1
            );
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Ends the pass and returns the number of pages it spanned
    pub fn finish(self) -> usize {
        self.page_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let mut cursor = LayoutCursor::new(Mm(20.0));
        cursor.advance(Mm(230.0));
        assert!(!cursor.is_past(Mm(250.0)));
        assert!(!cursor.break_if_past(Mm(250.0)));
        cursor.advance(Mm(0.5));
        assert!(cursor.break_if_past(Mm(250.0)));
        assert_eq!(cursor.y(), Mm(20.0));
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(cursor.finish(), 2);
    }
}

use pdf_writer::{Finish, Pdf, TextStr};

use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;

/// A flat list of bookmarks shown in the viewer's navigation pane
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    /// 0-based position of the target page in the document's page order
    pub page_index: usize,
    /// Vertical position on the target page that the viewer scrolls to
    pub top: Pt,
    pub title: String,
}

impl Outline {
    pub fn add_bookmark(&mut self, page_index: usize, top: Pt, title: String) {
        self.entries.push(OutlineEntry {
            page_index,
            top,
            title,
        });
    }

    /// Writes the outline, returning its id, or [None] if there are no bookmarks
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<pdf_writer::Ref> {
        if self.entries.is_empty() {
            return None;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<_> = (0..self.entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        outline.first(item_ids[0]);
        outline.last(item_ids[item_ids.len() - 1]);
        outline.count(item_ids.len() as i32);
        outline.finish();

        for (i, entry) in self.entries.iter().enumerate() {
            let page_id = refs.get_or_gen(RefType::Page(entry.page_index));
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if let Some(next) = item_ids.get(i + 1) {
                item.next(*next);
            }
            item.dest().page(page_id).xyz(0.0, entry.top.0, None);
        }

        Some(outlines_id)
    }
}

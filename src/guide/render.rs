//! Layout of the guest guide itself.
//!
//! The guide is laid out in one forward pass over a fixed order of blocks:
//! title and address, then check-in/out, WiFi, contacts, amenities and house
//! rules. A [LayoutCursor] is threaded through every block; page breaks happen
//! at the two checkpoints before amenities and rules, and (unless turned off in
//! [Pagination]) before any line that would run into the footer. Footers are
//! stamped in a second pass once the page count is known.

use super::{guide_filename, guide_sections, PropertyGuideRecord, Section, SectionKind};
use crate::colour::colours;
use crate::config::{GuideConfig, GuideFonts, Pagination};
use crate::font::Font;
use crate::info::Info;
use crate::labels::Labels;
use crate::layout::{wrap_text, Flow, LayoutCursor};
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize::{self, PageSize};
use crate::units::*;
use crate::{Document, GuideError};
use id_arena::{Arena, Id};

/// Where the first line of every page goes
pub const TOP_MARGIN: Mm = Mm(20.0);
/// Baseline of the page footer
pub const FOOTER_BASELINE: Mm = Mm(290.0);
/// Blank space between sections
pub const SECTION_GAP: Mm = Mm(6.0);
const RIGHT_MARGIN: Mm = Mm(20.0);
const BULLET: &str = "• ";

#[derive(Debug, Copy, Clone, PartialEq)]
enum Face {
    Regular,
    Bold,
    Italic,
}

/// How one kind of line is set: face, size, left edge and how far the cursor
/// moves after it
#[derive(Debug, Copy, Clone, PartialEq)]
struct LineStyle {
    face: Face,
    size: Pt,
    x: Mm,
    advance: Mm,
}

const TITLE: LineStyle = LineStyle {
    face: Face::Bold,
    size: Pt(22.0),
    x: Mm(20.0),
    advance: Mm(15.0),
};
const ADDRESS: LineStyle = LineStyle {
    face: Face::Regular,
    size: Pt(12.0),
    x: Mm(20.0),
    advance: Mm(10.0),
};
const HEADING: LineStyle = LineStyle {
    face: Face::Bold,
    size: Pt(14.0),
    x: Mm(20.0),
    advance: Mm(8.0),
};
const ITEM: LineStyle = LineStyle {
    face: Face::Regular,
    size: Pt(11.0),
    x: Mm(20.0),
    advance: Mm(6.0),
};
const BULLET_ITEM: LineStyle = LineStyle {
    x: Mm(25.0),
    ..ITEM
};
const FOOTER: LineStyle = LineStyle {
    face: Face::Italic,
    size: Pt(9.0),
    x: Mm(105.0),
    advance: Mm(0.0),
};

/// A laid-out guest guide, ready to be written out
pub struct GuestGuide {
    pub document: Document,
    /// Name the guide should be saved under
    pub filename: String,
    pub property_name: String,
}

impl GuestGuide {
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, GuideError> {
        self.document.to_bytes()
    }
}

/// Lays out the guest guide for `record`.
///
/// This only builds the document in memory; nothing is written anywhere. The
/// same record and configuration always produce the same document.
pub fn render_guest_guide(
    record: &PropertyGuideRecord,
    config: &GuideConfig,
) -> Result<GuestGuide, GuideError> {
    record.validate()?;
    let labels = config.labels();

    let mut document = Document::default();
    let fonts = config.fonts.install(&mut document)?;

    let mut writer = GuideWriter::new(&document.fonts, fonts, &config.pagination, pagesize::A4);
    let mut cursor = LayoutCursor::new(TOP_MARGIN);

    writer.write_header(&mut cursor, record, labels);

    let sections = guide_sections(record, labels);
    let has_lists = sections.iter().any(|s| s.kind.is_bulleted());
    if has_lists {
        cursor.break_if_past(config.pagination.amenities_break_at);
    }
    for section in sections.iter() {
        if section.kind == SectionKind::Rules {
            cursor.break_if_past(config.pagination.rules_break_at);
        }
        writer.write_section(&mut cursor, section);
    }

    let GuideWriter {
        flow, bookmarks, ..
    } = writer;
    let mut pages = flow.finish(cursor);
    let footer_font = SpanFont {
        id: fonts.italic,
        size: FOOTER.size,
    };
    stamp_footers(
        &mut pages,
        &document.fonts[fonts.italic],
        footer_font,
        |i, n| labels.footer(&config.product_name, i, n),
    );

    log::debug!(
        "laid out guest guide for {:?} on {} page(s)",
        record.name,
        pages.len()
    );
    for page in pages {
        document.add_page(page);
    }
    for (title, page_index, top) in bookmarks {
        document.add_bookmark(title, page_index, top);
    }

    let mut info = Info::new();
    info.title(labels.title(&record.name))
        .subject(&record.name)
        .creator(&config.product_name);
    document.set_info(info);

    Ok(GuestGuide {
        document,
        filename: guide_filename(&record.name, labels),
        property_name: record.name.clone(),
    })
}

/// Stamps `footer(i, n)` centred at the footer baseline of every page, where `i`
/// is the 1-based page number and `n` the number of pages
pub(crate) fn stamp_footers<F>(pages: &mut [Page], font: &Font, span_font: SpanFont, footer: F)
where
    F: Fn(usize, usize) -> String,
{
    let page_count = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let text = footer(i + 1, page_count);
        let width = font.width_of_text(&text, span_font.size);
        let x = Pt::from(FOOTER.x) - width / 2.0;
        let y = page.height() - Pt::from(FOOTER_BASELINE);
        page.add_span(SpanLayout {
            text,
            font: span_font,
            colour: colours::BLACK,
            coords: (x, y),
        });
    }
}

/// Places the lines of one guide, holding everything a single layout pass needs
/// apart from the cursor
struct GuideWriter<'a> {
    fonts: &'a Arena<Font>,
    faces: GuideFonts,
    pagination: &'a Pagination,
    flow: Flow,
    bookmarks: Vec<(String, usize, Pt)>,
}

impl<'a> GuideWriter<'a> {
    fn new(
        fonts: &'a Arena<Font>,
        faces: GuideFonts,
        pagination: &'a Pagination,
        size: PageSize,
    ) -> GuideWriter<'a> {
        GuideWriter {
            fonts,
            faces,
            pagination,
            flow: Flow::new(size),
            bookmarks: Vec::new(),
        }
    }

    fn face(&self, face: Face) -> Id<Font> {
        match face {
            Face::Regular => self.faces.regular,
            Face::Bold => self.faces.bold,
            Face::Italic => self.faces.italic,
        }
    }

    fn font(&self, style: LineStyle) -> &'a Font {
        let fonts: &'a Arena<Font> = self.fonts;
        &fonts[self.face(style.face)]
    }

    fn max_width(&self, x: Mm) -> Pt {
        let (page_width, _) = self.flow.page_size();
        (page_width - x - RIGHT_MARGIN).into()
    }

    /// Breaks the page if the line about to be written would sit below the limit
    fn guard(&self, cursor: &mut LayoutCursor, needed: Mm) {
        if let Some(limit) = self.pagination.line_limit {
            cursor.break_if_past(limit - needed);
        }
    }

    fn bookmark(&mut self, cursor: &LayoutCursor, title: &str, style: LineStyle) {
        let (_, baseline) = self.flow.to_user_space(style.x, cursor.y());
        let top = baseline + self.font(style).ascent(style.size);
        self.bookmarks
            .push((title.to_string(), cursor.page_index(), top));
    }

    fn place(&mut self, cursor: &LayoutCursor, x: Mm, text: String, style: LineStyle) {
        let font = SpanFont {
            id: self.face(style.face),
            size: style.size,
        };
        self.flow.place_text(cursor, x, text, font, colours::BLACK);
    }

    /// Writes `text` in `style`, wrapped to the printable width, advancing the
    /// cursor once per printed line
    fn write_line(&mut self, cursor: &mut LayoutCursor, text: &str, style: LineStyle) {
        let font = self.font(style);
        for line in wrap_text(text, font, style.size, self.max_width(style.x)) {
            self.guard(cursor, Mm(0.0));
            self.place(cursor, style.x, line, style);
            cursor.advance(style.advance);
        }
    }

    /// Writes a bullet point. Continuation lines line up with the text after
    /// the bullet, not with the bullet itself.
    fn write_bullet(&mut self, cursor: &mut LayoutCursor, text: &str, style: LineStyle) {
        let font = self.font(style);
        let indent: Mm = font.width_of_text(BULLET, style.size).into();
        let lines = wrap_text(text, font, style.size, self.max_width(style.x + indent));
        for (i, line) in lines.into_iter().enumerate() {
            self.guard(cursor, Mm(0.0));
            if i == 0 {
                self.place(cursor, style.x, format!("{BULLET}{line}"), style);
            } else {
                self.place(cursor, style.x + indent, line, style);
            }
            cursor.advance(style.advance);
        }
    }

    fn write_header(
        &mut self,
        cursor: &mut LayoutCursor,
        record: &PropertyGuideRecord,
        labels: &Labels,
    ) {
        let title = labels.title(&record.name);
        self.bookmark(cursor, &title, TITLE);
        self.write_line(cursor, &title, TITLE);
        if let Some(address) = record.address() {
            self.write_line(cursor, address, ADDRESS);
        }
    }

    fn write_section(&mut self, cursor: &mut LayoutCursor, section: &Section) {
        // keep the heading together with its first line
        self.guard(cursor, HEADING.advance);
        self.bookmark(cursor, section.heading, HEADING);
        self.place(cursor, HEADING.x, section.heading.to_string(), HEADING);
        cursor.advance(HEADING.advance);

        for line in section.lines.iter() {
            if section.kind.is_bulleted() {
                self.write_bullet(cursor, line, BULLET_ITEM);
            } else {
                self.write_line(cursor, line, ITEM);
            }
        }
        cursor.advance(SECTION_GAP);
    }
}

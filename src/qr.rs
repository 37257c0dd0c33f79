//! QR codes pointing guests at the digital guest folder of a property.
//!
//! Codes are always encoded at error-correction level H so that they still scan
//! when printed small or partly covered. They can be exported as a PNG or as a
//! printable A4 poster.

use crate::colour::{colours, Colour};
use crate::config::GuideConfig;
use crate::guide::stamp_footers;
use crate::info::Info;
use crate::layout::wrap_text;
use crate::page::{Page, SpanFont, SpanLayout};
use crate::pagesize;
use crate::rect::Rect;
use crate::units::*;
use crate::{Document, Font, GuideError};
use image::{imageops::FilterType, DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Light modules around the code, in modules
pub const QUIET_ZONE: u32 = 4;

/// Link to the public guest view of a property
pub fn guest_view_url(origin: &str, property_id: &str) -> Result<String, GuideError> {
    let property_id = property_id.trim();
    if property_id.is_empty() {
        return Err(GuideError::InvalidInput(
            "property id must not be empty".to_string(),
        ));
    }
    Ok(format!(
        "{}/property/{}",
        origin.trim_end_matches('/'),
        property_id
    ))
}

/// The dark and light modules of an encoded QR code, row by row
#[derive(Debug, Clone, PartialEq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(data: &str) -> Result<QrMatrix, GuideError> {
        let code = QrCode::with_error_correction_level(data, EcLevel::H)?;
        Ok(QrMatrix {
            width: code.width(),
            dark: code
                .to_colors()
                .into_iter()
                .map(|c| c == Color::Dark)
                .collect(),
        })
    }

    /// Number of modules along each side, not counting the quiet zone
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Horizontal runs of dark modules as `(row, first column, length)`
    fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for (y, row) in self.dark.chunks(self.width).enumerate() {
            let mut x = 0;
            while x < row.len() {
                if !row[x] {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < row.len() && row[x] {
                    x += 1;
                }
                runs.push((y, start, x - start));
            }
        }
        runs
    }

    /// Rasterizes the code, `module_px` pixels per module, surrounded by
    /// `quiet_zone` light modules
    pub fn to_image(&self, module_px: u32, quiet_zone: u32) -> GrayImage {
        let module_px = module_px.max(1);
        let side = (self.width as u32 + 2 * quiet_zone) * module_px;
        let mut image = GrayImage::from_pixel(side, side, Luma([255]));
        let quiet_px = quiet_zone * module_px;
        for (y, start, len) in self.dark_runs() {
            let top = quiet_px + y as u32 * module_px;
            let left = quiet_px + start as u32 * module_px;
            for py in top..top + module_px {
                for px in left..left + len as u32 * module_px {
                    image.put_pixel(px, py, Luma([0]));
                }
            }
        }
        image
    }

    /// Encodes the code as a square PNG of `size_px` pixels, quiet zone included
    pub fn to_png(&self, size_px: u32) -> Result<Vec<u8>, GuideError> {
        let module_count = self.width as u32 + 2 * QUIET_ZONE;
        let module_px = (size_px / module_count).max(1);
        let mut image = DynamicImage::ImageLuma8(self.to_image(module_px, QUIET_ZONE));
        if image.width() != size_px {
            image = image.resize_exact(size_px, size_px, FilterType::Nearest);
        }

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Draws the dark modules as filled squares. `top_left` is in user space and
    /// `size` is the side of the code without its quiet zone.
    pub fn draw(&self, page: &mut Page, top_left: (Pt, Pt), size: Pt) {
        let module = size / self.width as f32;
        let (left, top) = top_left;
        let rects = self
            .dark_runs()
            .into_iter()
            .map(|(y, start, len)| {
                Rect::from_origin(
                    left + module * start as f32,
                    top - module * (y + 1) as f32,
                    module * len as f32,
                    module,
                )
            })
            .collect();
        page.add_fill(colours::BLACK, rects);
    }
}

const POSTER_MARGIN: Mm = Mm(20.0);
const POSTER_CODE_SIZE: Mm = Mm(120.0);
const POSTER_CODE_TOP: Mm = Mm(60.0);

/// A one-page A4 poster: a heading naming the property, a hint for guests, the
/// code itself and the link it encodes
pub fn render_qr_poster(
    property_name: &str,
    url: &str,
    config: &GuideConfig,
) -> Result<Document, GuideError> {
    if property_name.trim().is_empty() {
        return Err(GuideError::InvalidInput(
            "property name must not be empty".to_string(),
        ));
    }
    let labels = config.labels();
    let matrix = QrMatrix::encode(url)?;

    let mut document = Document::default();
    let fonts = config.fonts.install(&mut document)?;
    let (page_width, page_height) = pagesize::A4;
    let mut page = Page::new(pagesize::A4);

    let mut text = |x: Mm, y: Mm, text: String, id, size: Pt, colour: Colour| {
        page.add_span(SpanLayout {
            text,
            font: SpanFont { id, size },
            colour,
            coords: (x.into(), (page_height - y).into()),
        });
    };
    let centred = |font: &Font, text: &str, size: Pt| -> Mm {
        (page_width - Mm::from(font.width_of_text(text, size))) / 2.0
    };

    let title = labels.qr_title(property_name);
    let bold = &document.fonts[fonts.bold];
    let regular = &document.fonts[fonts.regular];
    let text_width: Pt = (page_width - POSTER_MARGIN * 2.0).into();

    let mut y = Mm(30.0);
    for line in wrap_text(&title, bold, Pt(18.0), text_width) {
        text(POSTER_MARGIN, y, line, fonts.bold, Pt(18.0), colours::BLACK);
        y += Mm(8.0);
    }

    y += Mm(2.0);
    for line in wrap_text(labels.qr_hint, regular, Pt(11.0), text_width) {
        text(POSTER_MARGIN, y, line, fonts.regular, Pt(11.0), colours::MUTED);
        y += Mm(6.0);
    }

    let mut y = Mm(190.0);
    for line in wrap_text(url, regular, Pt(10.0), text_width) {
        let x = centred(regular, &line, Pt(10.0));
        text(x, y, line, fonts.regular, Pt(10.0), colours::MUTED);
        y += Mm(5.0);
    }

    let code_left = (page_width - POSTER_CODE_SIZE) / 2.0;
    matrix.draw(
        &mut page,
        (code_left.into(), (page_height - POSTER_CODE_TOP).into()),
        POSTER_CODE_SIZE.into(),
    );

    let mut pages = [page];
    stamp_footers(
        &mut pages,
        &document.fonts[fonts.italic],
        SpanFont {
            id: fonts.italic,
            size: Pt(9.0),
        },
        |i, n| labels.footer(&config.product_name, i, n),
    );
    let [page] = pages;
    document.add_page(page);

    let mut info = Info::new();
    info.title(title)
        .subject(url)
        .creator(&config.product_name);
    document.set_info(info);
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;

    #[test]
    fn urls_drop_trailing_slashes() {
        assert_eq!(
            guest_view_url("https://welcome-link.de/", "42").unwrap(),
            "https://welcome-link.de/property/42"
        );
        assert!(matches!(
            guest_view_url("https://welcome-link.de", " "),
            Err(GuideError::InvalidInput(_))
        ));
    }

    #[test]
    fn finder_patterns_are_dark() {
        let matrix = QrMatrix::encode("https://welcome-link.de/property/42").unwrap();
        let w = matrix.width();
        assert_eq!((w - 17) % 4, 0);
        for (x, y) in [(0, 0), (w - 1, 0), (0, w - 1), (6, 6)] {
            assert!(matrix.is_dark(x, y), "({x}, {y})");
        }
        assert!(!matrix.is_dark(7, 7));
        assert!(!matrix.is_dark(w, 0));
    }

    #[test]
    fn image_has_a_quiet_zone() {
        let matrix = QrMatrix::encode("hello").unwrap();
        let image = matrix.to_image(3, QUIET_ZONE);
        assert_eq!(image.width(), (matrix.width() as u32 + 8) * 3);
        assert_eq!(image.get_pixel(0, 0).0, [255]);
        assert_eq!(image.get_pixel(12, 12).0, [0]);
    }

    #[test]
    fn png_has_the_requested_size() {
        let matrix = QrMatrix::encode("hello").unwrap();
        let png = matrix.to_png(256).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 256));
    }

    #[test]
    fn poster_is_one_page_with_the_code() {
        let url = "https://welcome-link.de/property/42";
        let document = render_qr_poster("Haus am See", url, &GuideConfig::default()).unwrap();
        assert_eq!(document.page_count(), 1);
        let page = document.ordered_pages().next().unwrap();
        let texts: Vec<_> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts[0], "QR code for Haus am See");
        assert!(texts.contains(&url));
        assert!(page
            .contents
            .iter()
            .any(|c| matches!(c, PageContents::Fill { rects, .. } if !rects.is_empty())));
    }

    #[test]
    fn long_names_and_urls_stay_on_the_poster() {
        let name = "Ferienwohnung ".repeat(12);
        let url = format!("https://welcome-link.de/property/{}", "a".repeat(200));
        let document = render_qr_poster(&name, &url, &GuideConfig::default()).unwrap();
        let page = document.ordered_pages().next().unwrap();
        let right_edge: Pt = (pagesize::A4.0 - POSTER_MARGIN).into();
        let mut title_lines = 0;
        for span in page.spans() {
            let font = &document.fonts[span.font.id];
            let end = span.coords.0 + font.width_of_text(&span.text, span.font.size);
            assert!(end.0 <= right_edge.0 + 0.01, "runs off the page: {}", span.text);
            if span.font.size == Pt(18.0) {
                title_lines += 1;
            }
        }
        assert!(title_lines > 1);
    }
}

//! Paginating a captured bitmap, such as a screenshot of a rendered view.
//!
//! The bitmap is scaled to the full page width. Each following page shows the
//! same image shifted up by one page height until the whole image is covered.

use crate::page::{ImageLayout, Page};
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::*;
use crate::{Document, GuideError, Image};

/// Remainders below this are rounding noise, not content
const EPSILON: Mm = Mm(1e-3);

/// Vertical offset of the image's top edge on each page, measured down from the
/// top of the page (so offsets after the first are negative)
pub fn snapshot_offsets(image_height: Mm, page_height: Mm) -> Vec<Mm> {
    let mut offsets = vec![Mm(0.0)];
    let mut remaining = image_height - page_height;
    while remaining > EPSILON {
        offsets.push(remaining - image_height);
        remaining -= page_height;
    }
    offsets
}

/// Height of `image` once scaled to `width`
pub fn scaled_height(image: &Image, width: Mm) -> Result<Mm, GuideError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(GuideError::InvalidInput("snapshot image is empty".to_string()));
    }
    Ok(width * (image.height() as f32 / image.width() as f32))
}

/// Places `image` across as many A4 pages as it needs
pub fn render_snapshot(image: Image) -> Result<Document, GuideError> {
    render_snapshot_on(image, pagesize::A4)
}

pub fn render_snapshot_on(image: Image, size: PageSize) -> Result<Document, GuideError> {
    let (page_width, page_height) = size;
    let image_height = scaled_height(&image, page_width)?;

    let mut document = Document::default();
    let image_id = document.add_image(image);
    let offsets = snapshot_offsets(image_height, page_height);
    log::debug!(
        "snapshot is {:.1}mm tall, spanning {} page(s)",
        image_height.0,
        offsets.len()
    );

    for offset in offsets {
        let mut page = Page::new(size);
        let bottom = page_height - offset - image_height;
        page.add_image(ImageLayout {
            image_id,
            position: Rect::from_origin(
                Pt(0.0),
                bottom.into(),
                page_width.into(),
                image_height.into(),
            ),
        });
        document.add_page(page);
    }
    Ok(document)
}

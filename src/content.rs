//! Turns high-level [PageContents] into low-level PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanLayout};
use id_arena::Arena;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width().0,
                    image.position.height().0,
                    image.position.x1.0,
                    image.position.y1.0
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Fill { colour, rects } => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, *colour)?;
                for rect in rects {
                    write!(
                        &mut content,
                        "{} {} {} {} re\n",
                        rect.x1.0,
                        rect.y1.0,
                        rect.width().0,
                        rect.height().0
                    )?;
                }
                write!(&mut content, "f\nQ\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font = first.font;
    let mut current_colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size.0
    )?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size.0
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
        write!(content, "<")?;
        for byte in fonts[current_font.id].encode(&span.text) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinFont;
    use crate::page::SpanFont;
    use crate::rect::Rect;
    use crate::{colours, Pt};

    #[test]
    fn text_is_shown_as_hex_strings() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(BuiltinFont::HelveticaBold.into());
        let contents = vec![PageContents::Text(vec![SpanLayout {
            text: "Hi".into(),
            font: SpanFont { id, size: Pt(14.0) },
            colour: colours::BLACK,
            coords: (Pt(56.5), Pt(700.0)),
        }])];

        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("/F0 14 Tf\n"));
        assert!(rendered.contains("56.5 700 Td\n<4869> Tj\n"));
        assert!(rendered.contains("0 g\n"));
    }

    #[test]
    fn fills_are_painted_in_one_path() {
        let fonts: Arena<Font> = Arena::new();
        let contents = vec![PageContents::Fill {
            colour: colours::BLACK,
            rects: vec![
                Rect::from_origin(Pt(0.0), Pt(0.0), Pt(2.0), Pt(2.0)),
                Rect::from_origin(Pt(4.0), Pt(0.0), Pt(2.0), Pt(2.0)),
            ],
        }];
        let rendered = String::from_utf8(render_contents(&contents, &fonts).unwrap()).unwrap();
        assert_eq!(rendered, "q\n0 g\n0 0 2 2 re\n4 0 2 2 re\nf\nQ\n");
    }
}

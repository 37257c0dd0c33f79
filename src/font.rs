use crate::{
    builtin::{winansi_byte, BuiltinFont},
    refs::{ObjectReferences, RefType},
    GuideError, Pt,
};
use id_arena::Id;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A font that text spans can be set in. Fonts are stored "globally" within the
/// [Document](crate::Document) and referred to by their arena id.
pub enum Font {
    /// One of the base-14 Helvetica faces; nothing is embedded
    Builtin(BuiltinFont),
    /// A TrueType / OpenType font embedded in its entirety
    Embedded(EmbeddedFont),
}

impl Font {
    /// Load a TTF or OTF font from raw bytes, returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, GuideError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font::Embedded(EmbeddedFont { face }))
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::Builtin(font) => size * (font.ascender() / 1000.0),
            Font::Embedded(font) => {
                let face = font.face.as_face_ref();
                size * (face.ascender() as f32 / face.units_per_em() as f32)
            }
        }
    }

    /// Distance from the baseline to the bottom of the font at the given size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            Font::Builtin(font) => size * (font.descender() / 1000.0),
            Font::Embedded(font) => {
                let face = font.face.as_face_ref();
                size * (face.descender() as f32 / face.units_per_em() as f32)
            }
        }
    }

    /// Calculate the width of a string of text at the given font size. Newlines
    /// and characters the font can't show are measured as their substitute.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match self {
            Font::Builtin(font) => {
                let units: u32 = text.chars().map(|ch| font.advance(ch) as u32).sum();
                size * (units as f32 / 1000.0)
            }
            Font::Embedded(font) => {
                let face = font.face.as_face_ref();
                let units: u32 = text
                    .chars()
                    .map(|ch| {
                        face.glyph_hor_advance(GlyphId(font.glyph_or_substitute(ch)))
                            .unwrap_or_default() as u32
                    })
                    .sum();
                size * (units as f32 / face.units_per_em() as f32)
            }
        }
    }

    /// Encodes text into the byte string shown by a `Tj` operator: WinAnsi codes
    /// for built-in fonts, big-endian glyph ids for embedded (Identity-H) fonts
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Font::Builtin(_) => text
                .chars()
                .map(|ch| winansi_byte(ch).unwrap_or(b'?'))
                .collect(),
            Font::Embedded(font) => text
                .chars()
                .flat_map(|ch| font.glyph_or_substitute(ch).to_be_bytes())
                .collect(),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        match self {
            Font::Builtin(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::Embedded(font) => font.write(refs, font_index, font_id, writer),
        }
    }
}

impl From<BuiltinFont> for Font {
    fn from(font: BuiltinFont) -> Self {
        Font::Builtin(font)
    }
}

/// A parsed TrueType / OpenType face. The whole font file is embedded, so large
/// fonts noticeably increase the size of the generated PDF.
pub struct EmbeddedFont {
    pub face: OwnedFace,
}

impl EmbeddedFont {
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// Falls back to U+FFFD, then '?', then .notdef
    fn glyph_or_substitute(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn postscript_name(&self, font_index: usize) -> String {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| {
                name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode()
            })
            .and_then(|name| name.to_string())
            .map(|name| name.chars().filter(|c| !c.is_whitespace()).collect())
            .unwrap_or_else(|| format!("EmbeddedFont{font_index}"))
    }

    /// Every glyph reachable from a unicode cmap subtable, ordered by glyph id
    fn glyph_map(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    fn write(&self, refs: &mut ObjectReferences, font_index: usize, font_id: Ref, writer: &mut Pdf) {
        let base_font = self.postscript_name(font_index);
        let glyphs = self.glyph_map();
        let descriptor_id = self.write_descriptor(refs, font_index, &base_font, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        // consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for &gid in glyphs.keys() {
            let width = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            match run.as_mut() {
                Some((start, ws)) if *start as usize + ws.len() == gid as usize => ws.push(width),
                _ => {
                    if let Some((start, ws)) = run.take() {
                        widths.consecutive(start, ws);
                    }
                    run = Some((gid, vec![width]));
                }
            }
        }
        if let Some((start, ws)) = run {
            widths.consecutive(start, ws);
        }
        widths.finish();
        cid_font.finish();

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        base_font: &str,
        writer: &mut Pdf,
    ) -> Ref {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let data_id = refs.gen(RefType::FontData(font_index));
        let raw = self.face.as_slice();
        let compressed = compress_to_vec_zlib(raw, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(data_id, compressed.as_slice())
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), raw.len() as i32);

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags |= FontFlags::FIXED_PITCH;
        }
        if face.is_italic() {
            flags |= FontFlags::ITALIC;
        }

        let bbox = face.global_bounding_box();
        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_font.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // TODO: derive the stem width from the OS/2 weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks are limited to 100 entries
        let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
        for block in entries.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|u| format!("{u:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed =
            compress_to_vec_zlib(map.as_bytes(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        let err = Font::load(b"definitely not a font".to_vec());
        assert!(matches!(err, Err(GuideError::FaceParsingError(_))));
    }

    #[test]
    fn builtin_text_is_winansi_encoded() {
        let font = Font::from(BuiltinFont::Helvetica);
        assert_eq!(font.encode("Grüße •"), vec![b'G', b'r', 0xfc, 0xdf, b'e', b' ', 0x95]);
        assert_eq!(font.encode("日"), vec![b'?']);
    }

    #[test]
    fn builtin_width_scales_with_size() {
        let font = Font::from(BuiltinFont::Helvetica);
        // "Hi" = 722 + 222 units
        assert!((font.width_of_text("Hi", Pt(10.0)).0 - 9.44).abs() < 1e-4);
        assert!((font.ascent(Pt(10.0)).0 - 7.18).abs() < 1e-4);
        assert!(font.descent(Pt(10.0)).0 < 0.0);
    }
}

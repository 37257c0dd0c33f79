//! The PDF base-14 Helvetica family. These fonts are guaranteed to be present in
//! every conforming viewer, so nothing is embedded; text is WinAnsi encoded and
//! measured with the Adobe AFM advance widths (1/1000 em).

/// One of the four Helvetica faces used for guest-guide text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

/// Advance widths for WinAnsi codes 32..=126
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

const HELVETICA_LATIN1_SYMBOLS: [u16; 31] = [
    333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // '¡'..'¯'
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // '°'..'¿'
];

const HELVETICA_BOLD_LATIN1_SYMBOLS: [u16; 31] = [
    333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // '¡'..'¯'
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // '°'..'¿'
];

/// Width used for anything the tables don't cover
const FALLBACK_WIDTH: u16 = 556;

impl BuiltinFont {
    /// The PostScript name used as the `BaseFont` of the font dictionary
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }

    /// Ascender height in 1/1000 em
    pub fn ascender(&self) -> f32 {
        718.0
    }

    /// Descender depth in 1/1000 em (negative)
    pub fn descender(&self) -> f32 {
        -207.0
    }

    /// Advance width of a character in 1/1000 em. Oblique faces share the
    /// metrics of their upright counterparts.
    pub fn advance(&self, ch: char) -> u16 {
        let (ascii, symbols) = if self.is_bold() {
            (&HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_LATIN1_SYMBOLS)
        } else {
            (&HELVETICA_ASCII, &HELVETICA_LATIN1_SYMBOLS)
        };

        if (' '..='~').contains(&ch) {
            return ascii[ch as usize - 32];
        }
        if ('¡'..='¿').contains(&ch) {
            return symbols[ch as usize - 0xa1];
        }

        if let Some(base) = unaccented(ch) {
            return ascii[base as usize - 32];
        }

        match ch {
            '\u{a0}' => 278,
            '•' => 350,
            '–' | '€' => 556,
            '—' | '…' | 'Æ' => 1000,
            'ß' => 611,
            'æ' => 889,
            '×' | '÷' => 584,
            'Þ' => 667,
            'ø' => 611,
            'ð' | 'þ' => {
                if self.is_bold() {
                    611
                } else {
                    556
                }
            }
            'ì' | 'í' | 'î' | 'ï' => 278,
            '‘' | '’' | '‚' => {
                if self.is_bold() {
                    278
                } else {
                    222
                }
            }
            '“' | '”' | '„' => {
                if self.is_bold() {
                    500
                } else {
                    333
                }
            }
            _ => FALLBACK_WIDTH,
        }
    }
}

/// Accented Latin-1 letters share the advance of their base letter
fn unaccented(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Maps a character to its WinAnsiEncoding code, if it has one
pub fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7e | 0xa0..=0xff => Some(code as u8),
        _ => {
            let byte = match ch {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8a,
                '‹' => 0x8b,
                'Œ' => 0x8c,
                'Ž' => 0x8e,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9a,
                '›' => 0x9b,
                'œ' => 0x9c,
                'ž' => 0x9e,
                'Ÿ' => 0x9f,
                _ => return None,
            };
            Some(byte)
        }
    }
}

//! Settings shared by every artefact the crate produces.
//!
//! A [GuideConfig] is usually read from a JSON file; every field has a
//! default, so `{}` is a valid configuration.

use crate::{
    builtin::BuiltinFont,
    labels::{Labels, Language},
    units::Mm,
    Document, Font, GuideError,
};
use id_arena::Id;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Product name printed in footers and document metadata
    pub product_name: String,
    /// Language of headings, labels and file names
    pub language: Language,
    pub pagination: Pagination,
    pub fonts: FontConfig,
    /// Base URL of the public guest view, used for QR codes
    pub guest_view_origin: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        GuideConfig {
            product_name: "Welcome Link".to_string(),
            language: Language::default(),
            pagination: Pagination::default(),
            fonts: FontConfig::default(),
            guest_view_origin: "https://welcome-link.de".to_string(),
        }
    }
}

impl GuideConfig {
    pub fn from_json(json: &str) -> Result<GuideConfig, GuideError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<GuideConfig, GuideError> {
        let json = std::fs::read_to_string(path)?;
        GuideConfig::from_json(&json)
    }

    pub fn labels(&self) -> &'static Labels {
        self.language.labels()
    }
}

/// Where a guest guide breaks its pages. Offsets are millimetres from the top
/// edge of an A4 page.
///
/// The amenities and rules checkpoints are always honoured. `line_limit`
/// additionally guards every heading and line, in every section, against
/// running into the footer. `None` turns the guard off, leaving checkpoint-only
/// breaks, where a long contacts list can run off the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub amenities_break_at: Mm,
    pub rules_break_at: Mm,
    pub line_limit: Option<Mm>,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            amenities_break_at: Mm(250.0),
            rules_break_at: Mm(230.0),
            line_limit: Some(Mm(275.0)),
        }
    }
}

impl Pagination {
    /// Checkpoints only, without the per-line guard
    pub fn checkpoints_only() -> Pagination {
        Pagination {
            line_limit: None,
            ..Pagination::default()
        }
    }
}

/// Optional TrueType / OpenType files replacing the built-in Helvetica faces.
/// Needed when property data contains characters outside WinAnsi.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}

/// The three faces a guide is set in, registered with a [Document]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuideFonts {
    pub regular: Id<Font>,
    pub bold: Id<Font>,
    pub italic: Id<Font>,
}

impl FontConfig {
    /// Adds the configured fonts to `document`, loading any font files
    pub fn install(&self, document: &mut Document) -> Result<GuideFonts, GuideError> {
        let mut add = |path: &Option<PathBuf>, fallback: BuiltinFont| -> Result<Id<Font>, GuideError> {
            let font = match path {
                Some(path) => {
                    log::debug!("embedding font {}", path.display());
                    Font::load(std::fs::read(path)?)?
                }
                None => Font::Builtin(fallback),
            };
            Ok(document.add_font(font))
        };

        Ok(GuideFonts {
            regular: add(&self.regular, BuiltinFont::Helvetica)?,
            bold: add(&self.bold, BuiltinFont::HelveticaBold)?,
            italic: add(&self.italic, BuiltinFont::HelveticaOblique)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_config() {
        assert_eq!(GuideConfig::from_json("{}").unwrap(), GuideConfig::default());
    }

    #[test]
    fn partial_pagination_keeps_other_defaults() {
        let config = GuideConfig::from_json(
            r#"{ "language": "de", "pagination": { "line_limit": null } }"#,
        )
        .unwrap();
        assert_eq!(config.language, Language::De);
        assert_eq!(config.pagination, Pagination::checkpoints_only());
        assert_eq!(config.product_name, "Welcome Link");
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(matches!(
            GuideConfig::from_json(r#"{ "language": "tlh" }"#),
            Err(GuideError::Json(_))
        ));
    }

    #[test]
    fn default_fonts_are_builtin() {
        let mut doc = Document::default();
        let fonts = FontConfig::default().install(&mut doc).unwrap();
        assert!(matches!(
            doc.fonts[fonts.bold],
            Font::Builtin(BuiltinFont::HelveticaBold)
        ));
        assert_eq!(doc.fonts.len(), 3);
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        let mut doc = Document::default();
        let config = FontConfig {
            regular: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..FontConfig::default()
        };
        assert!(matches!(config.install(&mut doc), Err(GuideError::Io(_))));
    }
}

//! Printable artefacts for a digital guest folder: paginated guest-guide PDFs,
//! QR codes linking to the guest view, and PDFs of captured page snapshots.
//!
//! The usual entry point is an [Exporter], which renders an artefact in memory,
//! persists it to an [ArtifactSink] and reports it to an [AnalyticsSink]. The
//! layout itself ([render_guest_guide]) is pure and can be used on its own.

pub mod analytics;
pub use analytics::{AnalyticsEvent, AnalyticsSink};

mod builtin;
pub use builtin::BuiltinFont;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod export;
pub use export::*;

mod font;
pub use font::*;

/// Guest-guide records, sections and layout
pub mod guide;
pub use guide::{render_guest_guide, GuestGuide, PropertyGuideRecord};

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod labels;
pub use labels::*;

/// Utility functions and structures to lay out text on pages
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

pub mod pagesize;

pub mod qr;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod snapshot;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;

//! Persisting finished artefacts and reporting them.
//!
//! Layout never touches the filesystem; the [Exporter] renders into memory,
//! hands the complete bytes to an [ArtifactSink] and only then emits the
//! analytics event. Persistence failures surface as [GuideError::Export];
//! analytics failures are logged and ignored.

use crate::analytics::{emit, AnalyticsEvent, AnalyticsSink};
use crate::config::GuideConfig;
use crate::guide::{render_guest_guide, PropertyGuideRecord};
use crate::qr::{guest_view_url, render_qr_poster, QrMatrix};
use crate::snapshot::render_snapshot;
use crate::{Document, GuideError, Image};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where finished artefacts end up
pub trait ArtifactSink {
    /// Stores `bytes` under `filename`, returning where they went. Either the
    /// whole artefact is stored or nothing is.
    fn persist(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError>;
}

/// Writes artefacts into a directory. Each file is written to a temporary file
/// in the same directory first and renamed into place once complete, so an
/// interrupted export never leaves a partial file under the final name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> DirectorySink {
        DirectorySink {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn persist(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError> {
        let path = self.dir.join(filename);
        let mut file =
            NamedTempFile::new_in(&self.dir).map_err(|e| GuideError::export(&path, e))?;
        file.write_all(bytes)
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| GuideError::export(&path, e))?;
        file.persist(&path)
            .map_err(|e| GuideError::export(&path, e.error))?;
        Ok(path)
    }
}

/// Keeps artefacts in memory, keyed by file name
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files.get(filename).map(Vec::as_slice)
    }
}

impl ArtifactSink for MemorySink {
    fn persist(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, GuideError> {
        self.files.insert(filename.to_string(), bytes.to_vec());
        Ok(PathBuf::from(filename))
    }
}

/// What an export produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Number of pages, or 0 for images
    pub pages: usize,
    pub bytes: usize,
}

/// Renders artefacts, persists them to `S` and reports them to `A`
pub struct Exporter<S, A> {
    config: GuideConfig,
    sink: S,
    analytics: A,
    creation_date: Option<DateTime<FixedOffset>>,
}

impl<S: ArtifactSink, A: AnalyticsSink> Exporter<S, A> {
    pub fn new(config: GuideConfig, sink: S, analytics: A) -> Exporter<S, A> {
        Exporter {
            config,
            sink,
            analytics,
            creation_date: None,
        }
    }

    /// Stamps every exported PDF with `date`. Without it, exporting the same
    /// input twice produces identical files.
    pub fn with_creation_date(mut self, date: DateTime<FixedOffset>) -> Exporter<S, A> {
        self.creation_date = Some(date);
        self
    }

    pub fn config(&self) -> &GuideConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn persist(&mut self, filename: &str, bytes: &[u8], pages: usize) -> Result<ExportReport, GuideError> {
        let path = self.sink.persist(filename, bytes)?;
        log::info!("exported {} ({} bytes)", path.display(), bytes.len());
        Ok(ExportReport {
            path,
            pages,
            bytes: bytes.len(),
        })
    }

    fn persist_document(
        &mut self,
        filename: &str,
        mut document: Document,
    ) -> Result<ExportReport, GuideError> {
        if let Some(date) = self.creation_date {
            let mut info = document.info.take().unwrap_or_default();
            info.creation_date(date);
            document.set_info(info);
        }
        let bytes = document.to_bytes()?;
        self.persist(filename, &bytes, document.page_count())
    }

    /// Lays out, saves and reports the guest guide for `record`
    pub fn export_guest_guide(
        &mut self,
        record: &PropertyGuideRecord,
    ) -> Result<ExportReport, GuideError> {
        let guide = render_guest_guide(record, &self.config)?;
        let report = self.persist_document(&guide.filename, guide.document)?;
        emit(
            &self.analytics,
            &AnalyticsEvent::guest_guide_exported(&guide.property_name),
        );
        Ok(report)
    }

    /// Paginates a captured bitmap onto A4 pages and saves it as `filename`
    pub fn export_snapshot(
        &mut self,
        image: Image,
        filename: &str,
    ) -> Result<ExportReport, GuideError> {
        let document = render_snapshot(image)?;
        let report = self.persist_document(filename, document)?;
        emit(&self.analytics, &AnalyticsEvent::pdf_exported(filename));
        Ok(report)
    }

    /// Saves the QR code linking to the guest view of `property_id` as a PNG
    pub fn export_qr_png(
        &mut self,
        property_id: &str,
        size_px: u32,
        filename: &str,
    ) -> Result<ExportReport, GuideError> {
        let url = guest_view_url(&self.config.guest_view_origin, property_id)?;
        let png = QrMatrix::encode(&url)?.to_png(size_px)?;
        let report = self.persist(filename, &png, 0)?;
        emit(&self.analytics, &AnalyticsEvent::qr_code_downloaded(&url));
        Ok(report)
    }

    /// Saves a printable A4 poster with the QR code for `property_id`
    pub fn export_qr_poster(
        &mut self,
        property_id: &str,
        property_name: &str,
        filename: &str,
    ) -> Result<ExportReport, GuideError> {
        let url = guest_view_url(&self.config.guest_view_origin, property_id)?;
        let document = render_qr_poster(property_name, &url, &self.config)?;
        let report = self.persist_document(filename, document)?;
        emit(&self.analytics, &AnalyticsEvent::qr_code_downloaded(&url));
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsError, NoopSink};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<AnalyticsEvent>>,
    }

    impl AnalyticsSink for Recorder {
        fn capture(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            self.events.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn guide_export_persists_then_reports() {
        let recorder = Recorder::default();
        let mut exporter = Exporter::new(GuideConfig::default(), MemorySink::default(), &recorder);
        let report = exporter
            .export_guest_guide(&PropertyGuideRecord::named("Hotel   Am See"))
            .unwrap();

        assert_eq!(report.path, PathBuf::from("Hotel_Am_See_GuestGuide.pdf"));
        assert_eq!(report.pages, 1);
        let stored = exporter.sink().get("Hotel_Am_See_GuestGuide.pdf").unwrap();
        assert_eq!(stored.len(), report.bytes);

        let events = recorder.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], AnalyticsEvent::guest_guide_exported("Hotel   Am See"));
    }

    #[test]
    fn invalid_records_export_nothing() {
        let recorder = Recorder::default();
        let mut exporter = Exporter::new(GuideConfig::default(), MemorySink::default(), &recorder);
        let result = exporter.export_guest_guide(&PropertyGuideRecord::named(""));
        assert!(matches!(result, Err(GuideError::InvalidInput(_))));
        assert!(exporter.sink().files.is_empty());
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn missing_directories_are_export_errors() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("missing"));
        let mut exporter = Exporter::new(GuideConfig::default(), sink, NoopSink);
        let result = exporter.export_guest_guide(&PropertyGuideRecord::named("Loft"));
        match result {
            Err(GuideError::Export { path, .. }) => {
                assert!(path.ends_with("Loft_GuestGuide.pdf"))
            }
            other => panic!("expected an export error, got {other:?}"),
        }
    }

    #[test]
    fn qr_png_reports_the_url() {
        let recorder = Recorder::default();
        let mut exporter = Exporter::new(GuideConfig::default(), MemorySink::default(), &recorder);
        exporter.export_qr_png("42", 200, "qr-code.png").unwrap();
        assert!(exporter.sink().get("qr-code.png").unwrap().starts_with(b"\x89PNG"));
        assert_eq!(
            recorder.events.borrow()[0],
            AnalyticsEvent::qr_code_downloaded("https://welcome-link.de/property/42")
        );
    }
}

//! nursebot-pdf: PDF text extraction backed by PDFium.
//!
//! The PDFium shared library is bound lazily, once, on the first
//! extraction. Callers hold a [`PdfEngine`] handle rather than relying on a
//! process-wide global.

pub mod text;

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use nursebot_core::error::PdfError;
use nursebot_core::traits::TextExtractor;

pub use text::join_pages;

/// Where to find the PDFium library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// The platform library name inside this directory.
    Directory(PathBuf),
    /// The system library search path.
    System,
}

/// Handle to a lazily bound PDFium instance.
///
/// Not `Sync`: PDFium must be driven from one thread, outside async tasks.
pub struct PdfEngine {
    source: LibrarySource,
    pdfium: OnceCell<Pdfium>,
}

impl PdfEngine {
    pub fn new(source: LibrarySource) -> Self {
        Self {
            source,
            pdfium: OnceCell::new(),
        }
    }

    /// Engine bound from `dir` when given, else from the system path.
    pub fn from_library_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(LibrarySource::Directory(dir.to_path_buf())),
            None => Self::new(LibrarySource::System),
        }
    }

    pub fn source(&self) -> &LibrarySource {
        &self.source
    }

    /// Whether the library has already been bound.
    pub fn is_loaded(&self) -> bool {
        self.pdfium.get().is_some()
    }

    /// Bind the library on first use. A failed bind leaves the engine
    /// unbound so a later call can try again.
    pub fn pdfium(&self) -> Result<&Pdfium, PdfError> {
        if let Some(pdfium) = self.pdfium.get() {
            return Ok(pdfium);
        }

        let bindings = match &self.source {
            LibrarySource::Directory(dir) => {
                let library = Pdfium::pdfium_platform_library_name_at_path(dir);
                tracing::info!("binding PDFium from {}", library.display());
                Pdfium::bind_to_library(&library)
            }
            LibrarySource::System => {
                tracing::info!("binding PDFium from system library path");
                Pdfium::bind_to_system_library()
            }
        }
        .map_err(|e| PdfError::EngineUnavailable(e.to_string()))?;

        Ok(self.pdfium.get_or_init(|| Pdfium::new(bindings)))
    }
}

impl TextExtractor for PdfEngine {
    fn extract_text(&self, path: &Path) -> Result<String, PdfError> {
        let pdfium = self.pdfium()?;

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PdfError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let text = page.text().map_err(|e| PdfError::Page {
                page: index + 1,
                message: e.to_string(),
            })?;
            let items: Vec<String> = text.segments().iter().map(|s| s.text()).collect();
            pages.push(items);
        }

        tracing::info!(pages = pages.len(), "extracted {}", path.display());
        Ok(join_pages(&pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_engine_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PdfEngine::from_library_dir(Some(dir.path()));
        assert_eq!(
            engine.source(),
            &LibrarySource::Directory(dir.path().to_path_buf())
        );

        let err = engine
            .extract_text(Path::new("data/KKH Information file.pdf"))
            .unwrap_err();
        assert!(matches!(err, PdfError::EngineUnavailable(_)));
        assert!(!engine.is_loaded());

        // A second attempt tries to bind again rather than caching the failure.
        assert!(matches!(
            engine.pdfium(),
            Err(PdfError::EngineUnavailable(_))
        ));
    }

    #[test]
    fn system_source_when_no_dir() {
        let engine = PdfEngine::from_library_dir(None);
        assert_eq!(engine.source(), &LibrarySource::System);
        assert!(!engine.is_loaded());
    }
}

// File selection: declared MIME type + raw bytes

use std::path::Path;

use image::ImageFormat;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// What the scanner does with a selected file, decided from its declared type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Unsupported,
}

impl FileKind {
    /// Classify a declared MIME type.
    ///
    /// The content is never sniffed: a PNG declared as `text/plain` is unsupported,
    /// and a text file declared as `image/png` is handed to the image loader.
    pub fn classify(declared_type: &str) -> Self {
        if declared_type.starts_with("image/") {
            FileKind::Image
        } else if declared_type == PDF_MIME_TYPE {
            FileKind::Pdf
        } else {
            FileKind::Unsupported
        }
    }
}

/// A file handed to the scanner.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    /// Empty when the type is unknown.
    pub declared_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            data,
        }
    }

    /// Read a file from disk, deriving its declared type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Ok(Self {
            name: path.display().to_string(),
            declared_type: declared_type_for_path(path),
            data,
        })
    }

    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }

    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.declared_type)
    }
}

/// MIME type guessed from the file extension, or an empty string.
pub fn declared_type_for_path(path: &Path) -> String {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        return PDF_MIME_TYPE.to_string();
    }

    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_default()
}

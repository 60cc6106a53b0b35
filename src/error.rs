use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("PDF load error: {0}")]
    PdfLoadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`ScanError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl ScanError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a PDF load error.
    pdf_load => PdfLoadError,
    /// Create a render error.
    render => RenderError,
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        Self::ReportError(e.to_string())
    }
}

impl From<serde_yml::Error> for ScanError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

#[cfg(feature = "pdfium")]
impl From<pdfium_render::prelude::PdfiumError> for ScanError {
    fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
        Self::RenderError(e.to_string())
    }
}

impl From<image::ImageError> for ScanError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageLoadError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

// Session controller: file selection -> surfaces -> decode -> output

use rayon::ThreadPool;

use crate::config::messages::Messages;
use crate::config::settings::Settings;
use crate::decode::trigger::{build_decode_pool, decode_surfaces};
use crate::decode::{DecodeHints, DecodeReport, Decoder};
use crate::input::{FileKind, SelectedFile};
use crate::loader::image::load_image;
use crate::loader::pdf::load_pdf;
use crate::output::{Output, present};
use crate::render::PdfEngine;
use crate::surface::{Surface, SurfaceContainer};

/// Holds the current surfaces and output for one scanning session.
///
/// Every [`Scanner::select_file`] starts from an empty container and output;
/// every [`Scanner::decode`] reads whatever surfaces the last selection left.
pub struct Scanner<D, P> {
    decoder: D,
    engine: P,
    hints: DecodeHints,
    messages: Messages,
    pdf_scale: f32,
    parallel_workers: usize,
    /// Built for `parallel_workers`; `None` runs on the global rayon pool.
    pool: Option<ThreadPool>,
    container: SurfaceContainer,
    output: Output,
}

impl<D: Decoder, P: PdfEngine> Scanner<D, P> {
    /// # Errors
    /// Returns `ScanError::ConfigError` for invalid settings (unknown format names,
    /// non-positive scale).
    pub fn new(settings: &Settings, decoder: D, engine: P) -> crate::error::Result<Self> {
        let mut scanner = Self {
            decoder,
            engine,
            hints: DecodeHints::default(),
            messages: Messages::default(),
            pdf_scale: settings.pdf_scale,
            parallel_workers: 0,
            pool: None,
            container: SurfaceContainer::new(),
            output: Output::default(),
        };
        scanner.apply_settings(settings)?;
        Ok(scanner)
    }

    /// Replace hints, messages, scale and worker count. Surfaces and output are
    /// untouched; the decode pool is rebuilt only when the worker count changes.
    pub fn apply_settings(&mut self, settings: &Settings) -> crate::error::Result<()> {
        settings.validate()?;
        self.hints = DecodeHints::from_settings(settings)?;
        self.messages = Messages::for_locale(settings.locale);
        self.pdf_scale = settings.pdf_scale;
        if settings.parallel_workers != self.parallel_workers {
            self.parallel_workers = settings.parallel_workers;
            self.pool = build_decode_pool(self.parallel_workers);
        }
        Ok(())
    }

    /// React to a file selection.
    ///
    /// Output and surfaces are cleared first, whatever the file turns out to be.
    pub fn select_file(&mut self, file: Option<&SelectedFile>) -> &Output {
        self.output.clear();
        self.container.clear();

        let Some(file) = file else {
            self.output = Output::error(self.messages.no_file);
            return &self.output;
        };

        match file.kind() {
            FileKind::Image => {
                if let Err(e) = load_image(&mut self.container, &file.data) {
                    tracing::info!(file = %file.name, error = %e, "image load failed");
                    self.output = Output::error(self.messages.image_load_failed);
                }
            }
            FileKind::Pdf => {
                if let Err(e) = load_pdf(
                    &self.engine,
                    &mut self.container,
                    &file.data,
                    self.pdf_scale,
                ) {
                    tracing::info!(file = %file.name, error = %e, "pdf load failed");
                    // Pages appended before the failure are dropped too
                    self.container.clear();
                    self.output = Output::error(self.messages.pdf_load_failed);
                }
            }
            FileKind::Unsupported => {
                tracing::info!(
                    file = %file.name,
                    declared_type = %file.declared_type,
                    "unsupported file type"
                );
                self.output = Output::error(self.messages.invalid_file_type);
            }
        }

        &self.output
    }

    /// Decode every current surface and update the output.
    pub fn decode(&mut self) -> DecodeReport {
        let report = decode_surfaces(
            self.container.surfaces(),
            &self.decoder,
            &self.hints,
            self.pool.as_ref(),
        );
        self.output = present(&report, &self.messages);
        report
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn surfaces(&self) -> &[Surface] {
        self.container.surfaces()
    }

    pub fn hints(&self) -> &DecodeHints {
        &self.hints
    }
}

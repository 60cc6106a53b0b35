// Decode every surface: luma conversion -> decoder, results in surface order

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{DecodeHints, DecodeReport, Decoder, SurfaceOutcome};
use crate::surface::Surface;

/// Decode one surface. Never fails; errors become outcomes.
pub fn decode_surface<D: Decoder + ?Sized>(
    surface: &Surface,
    decoder: &D,
    hints: &DecodeHints,
) -> SurfaceOutcome {
    if surface.width() == 0 || surface.height() == 0 {
        return SurfaceOutcome::NoSymbols;
    }

    let luma = surface.to_luma();
    let outcome = SurfaceOutcome::from_result(decoder.decode_multi(
        luma.as_raw(),
        surface.width(),
        surface.height(),
        hints,
    ));

    match &outcome {
        SurfaceOutcome::Decoded { barcodes } => {
            tracing::debug!(?barcodes, "decoded surface");
        }
        SurfaceOutcome::NoSymbols => {
            tracing::debug!("no symbols on surface");
        }
        SurfaceOutcome::Malformed { reason } => {
            tracing::debug!(%reason, "decoder rejected surface");
        }
    }
    outcome
}

/// Dedicated pool for `workers` threads; `None` means the global rayon pool.
///
/// `workers == 0` selects the global pool. A pool that cannot be built is
/// logged and also falls back to the global pool.
pub fn build_decode_pool(workers: usize) -> Option<ThreadPool> {
    if workers == 0 {
        return None;
    }
    match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::warn!(error = %e, workers, "failed to build decode pool, using global pool");
            None
        }
    }
}

/// Decode all surfaces in parallel, on `pool` when given.
///
/// Outcomes keep the order of `surfaces`.
pub fn decode_surfaces<D: Decoder + ?Sized>(
    surfaces: &[Surface],
    decoder: &D,
    hints: &DecodeHints,
    pool: Option<&ThreadPool>,
) -> DecodeReport {
    let run = || -> Vec<SurfaceOutcome> {
        surfaces
            .par_iter()
            .map(|s| decode_surface(s, decoder, hints))
            .collect()
    };

    let outcomes = match pool {
        Some(pool) => pool.install(run),
        None => run(),
    };

    DecodeReport { outcomes }
}

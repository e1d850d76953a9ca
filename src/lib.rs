//! Core library for batch EAN-13/JAN barcode label generation.
//!
//! Pipeline: input adapters produce candidate identifiers, the batch
//! orchestrator composes one vector label document per identifier (failures
//! isolated per item), and the archive packager bundles the successes into
//! a single ZIP.

pub mod archive;
pub mod batch;
pub mod document;
pub mod encoding;
pub mod glyphs;
pub mod input;

pub use archive::{ArchiveError, DEFAULT_ARCHIVE_NAME, resolve_name};
pub use batch::{BatchError, BatchResult, BatchSummary, Outcome};
pub use document::{Artifact, ComposeError, Composer};
pub use encoding::{Ean13, EncodeError, SYMBOL_MODULES, Symbol, check_digit, encode};
pub use glyphs::{GlyphError, GlyphOutline, GlyphSource, PathSegment, TtfGlyphSource};
pub use input::{candidates_from_csv, candidates_from_text};

use thiserror::Error;

/// Error for the full generate-and-zip pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Compose every candidate and bundle the successes into a ZIP container.
///
/// Returns the archive bytes together with the settled batch result so the
/// caller can report per-item failures. Fails only when producing any
/// output is impossible: no candidates at all, or every composition failed
/// (in which case no archive is built and nothing is delivered).
pub fn generate_zip(
    identifiers: &[String],
    glyphs: &dyn GlyphSource,
) -> Result<(Vec<u8>, BatchResult), PipelineError> {
    if identifiers.is_empty() {
        return Err(BatchError::EmptyInput.into());
    }
    let composer = Composer::new(glyphs);
    let result = batch::run(identifiers, &composer);
    if result.produced() == 0 {
        return Err(BatchError::AllFailed {
            failed: result.failed(),
        }
        .into());
    }
    let bytes = archive::build(result.artifacts())?;
    Ok((bytes, result))
}

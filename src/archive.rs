//! ZIP packaging of composed label documents.

use std::io::{Cursor, Write};

use thiserror::Error;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::Artifact;

/// Archive name used when the caller supplies none.
pub const DEFAULT_ARCHIVE_NAME: &str = "barcodes.zip";
/// Deflate level on the 0-9 scale.
pub const COMPRESSION_LEVEL: i64 = 6;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("refusing to build an archive with no entries")]
    NoEntries,
    #[error("failed to assemble zip container: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),
}

/// Bundle artifacts into a single Deflate-compressed ZIP, in order.
///
/// Runs strictly after the whole batch has settled; an empty success list
/// means there is nothing to deliver and is an error here, not a zero-entry
/// container.
pub fn build<'a>(artifacts: impl Iterator<Item = &'a Artifact>) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    let mut entries = 0usize;
    for artifact in artifacts {
        writer.start_file(artifact.filename.as_str(), options)?;
        writer.write_all(&artifact.data)?;
        entries += 1;
    }
    if entries == 0 {
        return Err(ArchiveError::NoEntries);
    }

    let cursor = writer.finish()?;
    let bytes = cursor.into_inner();
    info!(entries, bytes = bytes.len(), "archive assembled");
    Ok(bytes)
}

/// Resolve the delivery filename: default when absent, `.zip` appended
/// when the supplied name lacks the suffix (case-insensitive).
pub fn resolve_name(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        None | Some("") => DEFAULT_ARCHIVE_NAME.to_string(),
        Some(name) if name.to_ascii_lowercase().ends_with(".zip") => name.to_string(),
        Some(name) => format!("{name}.zip"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn artifact(name: &str) -> Artifact {
        Artifact {
            filename: name.to_string(),
            data: format!("contents of {name}").into_bytes(),
        }
    }

    #[test]
    fn archive_contains_exactly_the_given_entries() {
        let artifacts = vec![artifact("4006381333931.ai"), artifact("4901234567894.ai")];
        let bytes = build(artifacts.iter()).unwrap();

        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut entry = zip.by_name("4006381333931.ai").unwrap();
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "contents of 4006381333931.ai");
    }

    #[test]
    fn empty_input_is_rejected() {
        let artifacts: Vec<Artifact> = Vec::new();
        assert!(matches!(
            build(artifacts.iter()),
            Err(ArchiveError::NoEntries)
        ));
    }

    #[test]
    fn name_resolution() {
        assert_eq!(resolve_name(None), "barcodes.zip");
        assert_eq!(resolve_name(Some("")), "barcodes.zip");
        assert_eq!(resolve_name(Some("  ")), "barcodes.zip");
        assert_eq!(resolve_name(Some("labels")), "labels.zip");
        assert_eq!(resolve_name(Some("labels.zip")), "labels.zip");
        assert_eq!(resolve_name(Some("LABELS.ZIP")), "LABELS.ZIP");
    }
}

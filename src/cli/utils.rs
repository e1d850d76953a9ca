//! Small IO helpers shared by the command handlers.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eanzip::BatchSummary;

/// Gather identifier text for a command: inline argument wins, then
/// `--from` (with `-` meaning stdin), then stdin as the default source.
pub fn read_text_arg(text: Option<String>, from: Option<PathBuf>) -> Result<String> {
    match (text, from) {
        (Some(inline), _) => Ok(inline),
        (None, Some(path)) if path.as_os_str() == "-" => read_stdin(),
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        }
        (None, None) => read_stdin(),
    }
}

/// Buffer all of stdin into a string.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read identifiers from stdin")?;
    Ok(buffer)
}

/// Persist the batch summary as pretty-printed JSON.
pub fn write_report(path: &Path, summary: &BatchSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn inline_text_takes_priority_over_a_file() {
        let text = read_text_arg(Some("4006381333931".into()), Some(PathBuf::from("ignored")))
            .unwrap();
        assert_eq!(text, "4006381333931");
    }

    #[test]
    fn from_reads_the_named_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "490123456789").unwrap();
        let text = read_text_arg(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(text.trim(), "490123456789");
    }

    #[test]
    fn missing_file_carries_its_path_in_the_error() {
        let err = read_text_arg(None, Some(PathBuf::from("no-such-input.txt"))).unwrap_err();
        assert!(err.to_string().contains("no-such-input.txt"));
    }
}

//! Markdown export of a pitch. Writes to any `Write`.

use crate::core::pitch::{PitchData, display_name};
use anyhow::{Context, Result};
use std::io::Write;

/// Writes the pitch as a Markdown document, one `##` heading per section.
/// Sections with no text fall back to their original text and are skipped
/// when both are empty.
///
/// Returns the number of sections written.
pub fn export_markdown<W: Write>(
    pitch: &PitchData,
    title: Option<&str>,
    mut writer: W,
) -> Result<usize> {
    if let Some(title) = title {
        writeln!(writer, "# {title}\n").context("Failed to write title")?;
    }

    let mut count = 0;
    for (key, section) in pitch.iter() {
        let body = if section.text.is_empty() {
            section.original.as_deref().unwrap_or("")
        } else {
            section.text.as_str()
        };
        if body.is_empty() {
            continue;
        }

        writeln!(writer, "## {}\n\n{}\n", display_name(key), body.trim_end())
            .with_context(|| format!("Failed to write section: {key}"))?;
        count += 1;
    }

    writer.flush().context("Failed to flush export")?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pitch::PitchSection;

    #[test]
    fn test_export_markdown() {
        let mut pitch: PitchData = [
            ("problem", PitchSection::new("Founders waste months.\n")),
            ("empty", PitchSection::default()),
            ("business_model", PitchSection::new("Subscriptions.")),
        ]
        .into_iter()
        .collect();
        pitch.insert(
            "team",
            PitchSection {
                original: Some("Two founders.".to_string()),
                ..Default::default()
            },
        );

        let mut out = Vec::new();
        let count = export_markdown(&pitch, Some("Ledgerly"), &mut out).unwrap();
        assert_eq!(count, 3);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "# Ledgerly\n\n\
             ## Problem\n\nFounders waste months.\n\n\
             ## Business Model\n\nSubscriptions.\n\n\
             ## Team\n\nTwo founders.\n\n"
        );
    }

    #[test]
    fn test_export_empty_pitch_without_title() {
        let mut out = Vec::new();
        let count = export_markdown(&PitchData::new(), None, &mut out).unwrap();
        assert_eq!(count, 0);
        assert!(out.is_empty());
    }
}

//! Per-page text overlays supplied by the quest text source

use crate::types::*;
use std::path::Path;

/// Already-formatted text placed in a page's header band
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextOverlay {
    pub title: String,
    pub text: String,
}

impl TextOverlay {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty()
    }
}

/// Parse overlays from CSV text (columns: title, text; header row expected)
pub fn parse_overlays(contents: &str) -> Result<Vec<TextOverlay>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    let mut overlays = Vec::new();
    for record in reader.records() {
        let record = record?;
        let overlay = TextOverlay::new(
            record.get(0).unwrap_or_default(),
            record.get(1).unwrap_or_default(),
        );
        if !overlay.is_empty() {
            overlays.push(overlay);
        }
    }
    Ok(overlays)
}

/// Load overlays from a CSV file
pub async fn load_overlays(path: impl AsRef<Path>) -> Result<Vec<TextOverlay>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    // CSV parsing is CPU-bound, spawn blocking
    tokio::task::spawn_blocking(move || parse_overlays(&contents)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_rows_and_tolerates_missing_text() {
        let csv = "title,text\n07:00 Harbor,Find three boats\n,\nNight Watch\n";
        let overlays = parse_overlays(csv).unwrap();
        assert_eq!(overlays.len(), 2);
        assert_eq!(overlays[0], TextOverlay::new("07:00 Harbor", "Find three boats"));
        assert_eq!(overlays[1], TextOverlay::new("Night Watch", ""));
    }
}

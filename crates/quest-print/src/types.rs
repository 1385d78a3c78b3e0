use crate::preflight::PreflightResult;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestPrintError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Print export blocked: {} image(s) below print resolution ({})", .failing.len(), describe_failures(.failing))]
    PrintBlocked { failing: Vec<PreflightResult> },
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

fn describe_failures(failing: &[PreflightResult]) -> String {
    failing
        .iter()
        .map(|r| format!("image {}: {:.0} DPI", r.image_index + 1, r.achieved_dpi))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, QuestPrintError>;

/// Final cut size of an interior page, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrimSize {
    pub width_in: f32,
    pub height_in: f32,
}

impl TrimSize {
    pub fn new(width_in: f32, height_in: f32) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Square trim (the only format the book generator ships)
    pub fn square(edge_in: f32) -> Self {
        Self::new(edge_in, edge_in)
    }
}

impl Default for TrimSize {
    fn default() -> Self {
        Self::square(crate::constants::DEFAULT_TRIM_IN)
    }
}

/// Output target: on-screen proof or print-house upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintMode {
    /// Trim size exactly, no bleed. QA page allowed.
    #[default]
    Preview,
    /// Trim plus bleed. Never carries a QA page.
    Print,
}

/// Which side of the spread a page falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSide {
    /// Right-hand page (odd page numbers); spine on the left
    Recto,
    /// Left-hand page (even page numbers); spine on the right
    Verso,
}

impl PageSide {
    /// Side for a zero-based interior page index (page 1 is a recto)
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            PageSide::Recto
        } else {
            PageSide::Verso
        }
    }
}

/// Which edges of an interior page receive bleed in print mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BleedEdges {
    /// Top, bottom, outside and spine edge
    #[default]
    AllFour,
    /// Top, bottom and outside edge only
    ExceptSpine,
}

/// Interior paper stock, which sets the per-page thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperType {
    #[default]
    White,
    Cream,
    StandardColor,
    PremiumColor,
}

impl PaperType {
    pub fn name(&self) -> &'static str {
        match self {
            PaperType::White => "white",
            PaperType::Cream => "cream",
            PaperType::StandardColor => "standard-color",
            PaperType::PremiumColor => "premium-color",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperType {
    type Err = QuestPrintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "white" => Ok(PaperType::White),
            "cream" => Ok(PaperType::Cream),
            "standard-color" => Ok(PaperType::StandardColor),
            "premium-color" => Ok(PaperType::PremiumColor),
            other => Err(QuestPrintError::InvalidConfiguration(format!(
                "Unknown paper type: {:?}",
                other
            ))),
        }
    }
}

use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-page paper thickness in inches, one entry per stock
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaperThickness {
    pub white_in: f32,
    pub cream_in: f32,
    pub standard_color_in: f32,
    pub premium_color_in: f32,
}

impl Default for PaperThickness {
    fn default() -> Self {
        Self {
            white_in: WHITE_PAPER_IN,
            cream_in: CREAM_PAPER_IN,
            standard_color_in: STANDARD_COLOR_PAPER_IN,
            premium_color_in: PREMIUM_COLOR_PAPER_IN,
        }
    }
}

impl PaperThickness {
    pub fn for_paper(&self, paper: PaperType) -> f32 {
        match paper {
            PaperType::White => self.white_in,
            PaperType::Cream => self.cream_in,
            PaperType::StandardColor => self.standard_color_in,
            PaperType::PremiumColor => self.premium_color_in,
        }
    }
}

/// Barcode keepout on the back cover panel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarcodeKeepout {
    pub width_in: f32,
    pub height_in: f32,
    /// Distance from the back panel's right and bottom trim edges
    pub inset_in: f32,
}

impl Default for BarcodeKeepout {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_BARCODE_SIZE_IN.0,
            height_in: DEFAULT_BARCODE_SIZE_IN.1,
            inset_in: DEFAULT_BARCODE_INSET_IN,
        }
    }
}

/// Print-house policy. Built once, shared read-only by every component
/// of a generation request.
///
/// Fields missing from a policy file take their default values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrintPolicy {
    // Page geometry
    pub bleed_in: f32,
    pub safe_margin_in: f32,
    pub spine_safe_margin_in: f32,
    pub bleed_edges: BleedEdges,

    // Page count
    pub min_pages: u32,
    pub max_pages: u32,
    pub spine_text_min_pages: u32,
    /// Spine titles that would be set smaller than this are omitted
    pub spine_text_min_pt: f32,

    // Cover
    pub paper_thickness: PaperThickness,
    pub barcode: BarcodeKeepout,

    // Preflight
    pub target_dpi: f32,
    pub warn_ratio: f32,

    // Output
    pub pdf_budget_mb: f32,
}

impl Default for PrintPolicy {
    fn default() -> Self {
        Self {
            bleed_in: DEFAULT_BLEED_IN,
            safe_margin_in: DEFAULT_SAFE_IN,
            spine_safe_margin_in: DEFAULT_SPINE_SAFE_IN,
            bleed_edges: BleedEdges::AllFour,
            min_pages: DEFAULT_MIN_PAGES,
            max_pages: DEFAULT_MAX_PAGES,
            spine_text_min_pages: DEFAULT_SPINE_TEXT_MIN_PAGES,
            spine_text_min_pt: DEFAULT_SPINE_TEXT_MIN_PT,
            paper_thickness: PaperThickness::default(),
            barcode: BarcodeKeepout::default(),
            target_dpi: DEFAULT_TARGET_DPI,
            warn_ratio: DEFAULT_WARN_RATIO,
            pdf_budget_mb: DEFAULT_PDF_BUDGET_MB,
        }
    }
}

impl PrintPolicy {
    /// Load policy from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let policy: PrintPolicy = serde_json::from_slice(&bytes).map_err(|e| {
            QuestPrintError::InvalidConfiguration(format!("Failed to parse policy: {}", e))
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Save policy to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            QuestPrintError::InvalidConfiguration(format!("Failed to serialize policy: {}", e))
        })?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Thickness for a paper stock; rejects non-positive values
    pub fn thickness_for(&self, paper: PaperType) -> Result<f32> {
        let thickness = self.paper_thickness.for_paper(paper);
        if !(thickness > 0.0) {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Paper thickness for {} must be positive, got {}",
                paper, thickness
            )));
        }
        Ok(thickness)
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("bleed_in", self.bleed_in),
            ("safe_margin_in", self.safe_margin_in),
            ("spine_safe_margin_in", self.spine_safe_margin_in),
            ("barcode.inset_in", self.barcode.inset_in),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(QuestPrintError::InvalidConfiguration(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("barcode.width_in", self.barcode.width_in),
            ("barcode.height_in", self.barcode.height_in),
            ("target_dpi", self.target_dpi),
            ("pdf_budget_mb", self.pdf_budget_mb),
            ("spine_text_min_pt", self.spine_text_min_pt),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(QuestPrintError::InvalidConfiguration(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for paper in [
            PaperType::White,
            PaperType::Cream,
            PaperType::StandardColor,
            PaperType::PremiumColor,
        ] {
            self.thickness_for(paper)?;
        }

        if !(self.warn_ratio > 0.0 && self.warn_ratio < 1.0) {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "warn_ratio must be between 0 and 1, got {}",
                self.warn_ratio
            )));
        }

        if self.min_pages == 0 {
            return Err(QuestPrintError::InvalidConfiguration(
                "min_pages must be at least 1".to_string(),
            ));
        }

        // The smallest even count at or above min_pages must fit under the cap
        let smallest_even = self.min_pages.saturating_add(self.min_pages % 2);
        if self.max_pages < smallest_even {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "max_pages must be at least {} for min_pages {}, got {}",
                smallest_even, self.min_pages, self.max_pages
            )));
        }

        Ok(())
    }
}

/// Selections for one book-generation request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookOptions {
    pub trim: TrimSize,
    pub mode: PrintMode,
    pub requested_pages: u32,
    pub paper: PaperType,

    // Cover text
    pub title: String,
    pub subtitle: Option<String>,
    pub back_text: Option<String>,

    /// Draw page edge, trim and safe outlines on every page
    pub debug_overlay: bool,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            trim: TrimSize::default(),
            mode: PrintMode::Preview,
            requested_pages: DEFAULT_MIN_PAGES,
            paper: PaperType::White,
            title: "Quest Book".to_string(),
            subtitle: None,
            back_text: None,
            debug_overlay: false,
        }
    }
}

impl BookOptions {
    /// Validate the options against the policy
    pub fn validate(&self, policy: &PrintPolicy) -> Result<()> {
        if !(self.trim.width_in > 0.0 && self.trim.height_in > 0.0) {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Trim size must be positive, got {}\" x {}\"",
                self.trim.width_in, self.trim.height_in
            )));
        }

        let min_edge = self.trim.width_in.min(self.trim.height_in);
        if min_edge < MIN_TRIM_IN {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Trim edge {}\" is below the {}\" minimum",
                min_edge, MIN_TRIM_IN
            )));
        }
        if 2.0 * policy.safe_margin_in >= min_edge {
            return Err(QuestPrintError::InvalidConfiguration(format!(
                "Safe margin {}\" leaves no room on a {}\" trim",
                policy.safe_margin_in, min_edge
            )));
        }

        if self.title.trim().is_empty() {
            return Err(QuestPrintError::InvalidConfiguration(
                "Book title is empty".to_string(),
            ));
        }

        policy.thickness_for(self.paper)?;
        Ok(())
    }
}

//! Image resolution preflight
//!
//! Each image is measured against the frame it will fill at final print
//! size. Only the pixel dimensions are read; the verdict record is all that
//! outlives the check.

use crate::constants::{dpi_for, pt_to_in};
use crate::geometry::Rect;
use crate::options::PrintPolicy;

/// Three-tier preflight outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Warn => "WARN",
            Verdict::Fail => "FAIL",
        }
    }
}

/// Per-image preflight record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreflightResult {
    /// Position of the image in upload order
    pub image_index: usize,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub required_dpi: f32,
    pub achieved_dpi: f32,
    pub verdict: Verdict,
}

impl PreflightResult {
    pub fn summary(&self) -> String {
        format!(
            "image {}: {}x{} px, {:.0} DPI (needs {:.0}) {}",
            self.image_index + 1,
            self.pixel_width,
            self.pixel_height,
            self.achieved_dpi,
            self.required_dpi,
            self.verdict.label()
        )
    }
}

/// Classify an image stretched over `target` (points) at `target_dpi`.
///
/// Resolution is computed per axis and the limiting axis wins.
pub fn check_image(
    image_index: usize,
    pixel_width: u32,
    pixel_height: u32,
    target: &Rect,
    target_dpi: f32,
    warn_ratio: f32,
) -> PreflightResult {
    let dpi_x = dpi_for(pixel_width, pt_to_in(target.width));
    let dpi_y = dpi_for(pixel_height, pt_to_in(target.height));
    let achieved_dpi = dpi_x.min(dpi_y);

    let verdict = if achieved_dpi >= target_dpi {
        Verdict::Pass
    } else if achieved_dpi >= target_dpi * warn_ratio {
        Verdict::Warn
    } else {
        Verdict::Fail
    };

    PreflightResult {
        image_index,
        pixel_width,
        pixel_height,
        required_dpi: target_dpi,
        achieved_dpi,
        verdict,
    }
}

/// Accumulates preflight results for one generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflightReport {
    results: Vec<PreflightResult>,
}

impl PreflightReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge independently computed results, ordered by image index
    pub fn from_results(mut results: Vec<PreflightResult>) -> Self {
        results.sort_by_key(|r| r.image_index);
        Self { results }
    }

    pub fn push(&mut self, result: PreflightResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[PreflightResult] {
        &self.results
    }

    pub fn any_below_pass(&self) -> bool {
        self.results.iter().any(|r| r.verdict != Verdict::Pass)
    }

    pub fn below_pass(&self) -> impl Iterator<Item = &PreflightResult> {
        self.results.iter().filter(|r| r.verdict != Verdict::Pass)
    }

    pub fn failing(&self) -> Vec<PreflightResult> {
        self.results
            .iter()
            .filter(|r| r.verdict == Verdict::Fail)
            .copied()
            .collect()
    }

    /// Worst verdict across all images (Pass when empty)
    pub fn worst(&self) -> Verdict {
        self.results
            .iter()
            .map(|r| r.verdict)
            .max()
            .unwrap_or(Verdict::Pass)
    }

    /// One consolidated line per image below target
    pub fn summary_lines(&self) -> Vec<String> {
        self.below_pass().map(PreflightResult::summary).collect()
    }
}

/// Runs preflight checks under a policy and collects the report
#[derive(Debug, Clone)]
pub struct PreflightChecker<'a> {
    policy: &'a PrintPolicy,
    report: PreflightReport,
}

impl<'a> PreflightChecker<'a> {
    pub fn new(policy: &'a PrintPolicy) -> Self {
        Self {
            policy,
            report: PreflightReport::new(),
        }
    }

    /// Check the next image in upload order against `target`
    pub fn check(&mut self, pixel_width: u32, pixel_height: u32, target: &Rect) -> Verdict {
        let result = check_image(
            self.report.results.len(),
            pixel_width,
            pixel_height,
            target,
            self.policy.target_dpi,
            self.policy.warn_ratio,
        );
        if result.verdict != Verdict::Pass {
            log::warn!("{}", result.summary());
        }
        self.report.push(result);
        result.verdict
    }

    pub fn any_below_pass(&self) -> bool {
        self.report.any_below_pass()
    }

    pub fn report(&self) -> &PreflightReport {
        &self.report
    }

    pub fn finish(self) -> PreflightReport {
        self.report
    }
}

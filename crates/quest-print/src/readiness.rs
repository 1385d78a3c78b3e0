//! Print-readiness summary shown after generation

use crate::constants::{in_to_mm, pt_to_in};
use crate::geometry::resolve_page_geometry;
use crate::options::{BookOptions, PrintPolicy};
use crate::preflight::{PreflightReport, Verdict};
use crate::types::{PageSide, PrintMode};

/// Traffic-light level for a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessCheck {
    pub level: CheckLevel,
    pub message: String,
}

impl ReadinessCheck {
    fn new(level: CheckLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessReport {
    pub checks: Vec<ReadinessCheck>,
}

impl ReadinessReport {
    pub fn worst(&self) -> CheckLevel {
        self.checks
            .iter()
            .map(|c| c.level)
            .max()
            .unwrap_or(CheckLevel::Green)
    }
}

/// Expected print-house bleed
const EXPECTED_BLEED_IN: f32 = 0.125;
const SAFE_GREEN_MM: f32 = 10.0;
const SAFE_YELLOW_MM: f32 = 8.0;
const BUDGET_YELLOW_FACTOR: f32 = 1.25;

/// Evaluate a finished interior against the print-house checklist
pub fn print_readiness(
    options: &BookOptions,
    policy: &PrintPolicy,
    preflight: &PreflightReport,
    pdf_bytes: usize,
) -> ReadinessReport {
    let mut checks = Vec::new();

    if options.mode == PrintMode::Preview {
        checks.push(ReadinessCheck::new(
            CheckLevel::Red,
            "Print mode is off; interior is not print-ready.",
        ));
        return ReadinessReport { checks };
    }

    if (policy.bleed_in - EXPECTED_BLEED_IN).abs() < 1e-6 {
        checks.push(ReadinessCheck::new(
            CheckLevel::Green,
            format!("Bleed: {:.3}\" correct.", policy.bleed_in),
        ));
    } else {
        checks.push(ReadinessCheck::new(
            CheckLevel::Red,
            format!("Bleed unusual: {:.3}\".", policy.bleed_in),
        ));
    }

    // Measured from the page edge, so bleed counts towards the offset
    let geometry = resolve_page_geometry(options.trim, PrintMode::Print, PageSide::Recto, policy);
    let gaps = geometry.page_rect.gaps_to(&geometry.safe_rect);
    let offset_pt = gaps.left.min(gaps.bottom).min(gaps.right).min(gaps.top);
    let safe_mm = in_to_mm(pt_to_in(offset_pt));
    let level = if safe_mm >= SAFE_GREEN_MM {
        CheckLevel::Green
    } else if safe_mm >= SAFE_YELLOW_MM {
        CheckLevel::Yellow
    } else {
        CheckLevel::Red
    };
    checks.push(ReadinessCheck::new(
        level,
        format!("Safe-area offset from page edge: {:.1} mm.", safe_mm),
    ));

    let pdf_mb = pdf_bytes as f32 / (1024.0 * 1024.0);
    let level = if pdf_mb <= policy.pdf_budget_mb {
        CheckLevel::Green
    } else if pdf_mb <= policy.pdf_budget_mb * BUDGET_YELLOW_FACTOR {
        CheckLevel::Yellow
    } else {
        CheckLevel::Red
    };
    checks.push(ReadinessCheck::new(
        level,
        format!(
            "PDF size: {:.1} MB (budget {:.0} MB).",
            pdf_mb, policy.pdf_budget_mb
        ),
    ));

    let (level, message) = match preflight.worst() {
        Verdict::Pass => (CheckLevel::Green, "Image resolution: all images pass."),
        Verdict::Warn => (CheckLevel::Yellow, "Image resolution: some images are low."),
        Verdict::Fail => (CheckLevel::Red, "Image resolution: some images fail."),
    };
    checks.push(ReadinessCheck::new(level, message));

    if options.debug_overlay {
        checks.push(ReadinessCheck::new(CheckLevel::Green, "Debug overlay: on."));
    } else {
        checks.push(ReadinessCheck::new(
            CheckLevel::Yellow,
            "Debug overlay: off (recommended for proofing).",
        ));
    }

    ReadinessReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_red() {
        let options = BookOptions::default();
        let report = print_readiness(
            &options,
            &PrintPolicy::default(),
            &PreflightReport::new(),
            0,
        );
        assert_eq!(report.worst(), CheckLevel::Red);
        assert_eq!(report.checks.len(), 1);
    }

    #[test]
    fn test_default_policy_print_is_green_with_overlay() {
        let options = BookOptions {
            mode: PrintMode::Print,
            debug_overlay: true,
            ..Default::default()
        };
        let report = print_readiness(
            &options,
            &PrintPolicy::default(),
            &PreflightReport::new(),
            1024,
        );
        // 0.125" bleed + 0.375" safe = 12.7 mm from the page edge
        assert!(report.checks[1].message.contains("12.7 mm"));
        assert_eq!(report.worst(), CheckLevel::Green);
        assert_eq!(report.checks.len(), 5);
    }

    #[test]
    fn test_overlay_off_is_the_only_warning() {
        let options = BookOptions {
            mode: PrintMode::Print,
            ..Default::default()
        };
        let report = print_readiness(
            &options,
            &PrintPolicy::default(),
            &PreflightReport::new(),
            1024,
        );
        let warnings: Vec<_> = report
            .checks
            .iter()
            .filter(|c| c.level != CheckLevel::Green)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, CheckLevel::Yellow);
        assert!(warnings[0].message.starts_with("Debug overlay"));
    }
}

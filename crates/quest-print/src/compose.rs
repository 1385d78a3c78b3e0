//! Layout composition for interior pages and the cover
//!
//! Positions every element inside the resolved geometry and hands the result
//! to the PDF renderer. Nothing here touches PDF objects.
//!
//! Rules enforced before returning:
//! - interior elements other than the full-bleed illustration stay inside
//!   the safe rectangle
//! - cover elements stay inside a panel's safe rectangle and never overlap
//!   the barcode keepout
//! - the QA page appears only in preview, first, and is not counted

use crate::compliance::{ComplianceEngine, PageCountAdjustment, SpineSpec};
use crate::constants::*;
use crate::geometry::{CoverGeometry, PageGeometry, Rect, resolve_page_geometry};
use crate::options::{BookOptions, PrintPolicy};
use crate::overlay::TextOverlay;
use crate::preflight::PreflightReport;
use crate::types::*;

// =============================================================================
// Types
// =============================================================================

/// What the caller wants on one interior page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageContent {
    /// Index into the request's bitmaps (upload order)
    pub image: Option<usize>,
    pub overlay: Option<TextOverlay>,
    /// Draw the corner badge
    pub badge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Content,
    /// Padding added to reach the enforced page count
    Filler,
    /// Preview-only resolution report
    QualityReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Lines of text already wrapped to the element width
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub bold: bool,
    pub align: Align,
    /// Paint a white box with a thin border behind the text
    pub boxed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Full-bleed illustration
    Image { image_index: usize },
    Text(TextBlock),
    Badge,
    WritingLines { spacing: f32 },
    /// Reserved area; painted white, never covered
    Keepout,
    /// Title rotated to run down the spine
    SpineText { text: String, font_size: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub kind: ElementKind,
    pub rect: Rect,
}

impl PositionedElement {
    fn new(kind: ElementKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedPage {
    pub kind: PageKind,
    /// One-based page number in the print-house count (None for the QA page)
    pub number: Option<u32>,
    pub geometry: PageGeometry,
    pub elements: Vec<PositionedElement>,
}

/// Fully positioned interior, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedBook {
    pub mode: PrintMode,
    pub pages: Vec<PositionedPage>,
    pub adjustment: PageCountAdjustment,
    pub spine: SpineSpec,
}

impl ComposedBook {
    /// Page count reported to the print house (excludes the QA page)
    pub fn kdp_page_count(&self) -> u32 {
        self.adjustment.forced
    }

    /// Pages actually present in the interior PDF
    pub fn physical_page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn has_quality_page(&self) -> bool {
        self.pages.iter().any(|p| p.kind == PageKind::QualityReport)
    }

    pub fn notice(&self) -> Option<String> {
        self.adjustment.notice()
    }
}

/// Fully positioned wraparound cover
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedCover {
    pub geometry: CoverGeometry,
    pub elements: Vec<PositionedElement>,
}

// =============================================================================
// Interior
// =============================================================================

const FILLER_TEMPLATES: [(&str, [&str; 3]); 3] = [
    (
        "Reflection",
        [
            "What did I discover today?",
            "Which place surprised me?",
            "Where would I go next?",
        ],
    ),
    (
        "Repetition",
        [
            "Draw your favourite find again.",
            "Write two sentences about it.",
            "Explain it in your own words.",
        ],
    ),
    (
        "Transfer",
        [
            "Where else could you spot this?",
            "Which situation fits it?",
            "How would you explain it to a friend?",
        ],
    ),
];

/// Position every interior page.
///
/// The page count is forced before anything is placed: content is padded
/// with filler pages up to the enforced total, never truncated.
pub fn compose_book(
    content: &[PageContent],
    options: &BookOptions,
    policy: &PrintPolicy,
    preflight: &PreflightReport,
) -> Result<ComposedBook> {
    let engine = ComplianceEngine::new(policy);

    let content_pages = u32::try_from(content.len()).unwrap_or(u32::MAX);
    let wanted = options.requested_pages.max(content_pages);
    let forced = engine.enforce_page_count(wanted).forced;
    if content_pages > forced {
        return Err(QuestPrintError::InvalidConfiguration(format!(
            "{} content pages exceed the {} page maximum",
            content.len(),
            policy.max_pages
        )));
    }
    let adjustment = PageCountAdjustment {
        requested: options.requested_pages,
        forced,
    };
    let spine = engine.compute_spine_for_paper(forced, options.paper, options.trim)?;

    let mut pages = Vec::with_capacity(forced as usize + 1);

    if options.mode == PrintMode::Preview && preflight.any_below_pass() {
        let geometry =
            resolve_page_geometry(options.trim, options.mode, PageSide::Recto, policy);
        pages.push(quality_page(&geometry, preflight));
    }

    for index in 0..forced as usize {
        let side = PageSide::for_index(index);
        let geometry = resolve_page_geometry(options.trim, options.mode, side, policy);
        let number = Some(index as u32 + 1);

        let page = match content.get(index) {
            Some(page_content) => PositionedPage {
                kind: PageKind::Content,
                number,
                elements: content_elements(&geometry, page_content),
                geometry,
            },
            None => {
                let filler_index = index - content.len();
                PositionedPage {
                    kind: PageKind::Filler,
                    number,
                    elements: filler_elements(&geometry, filler_index),
                    geometry,
                }
            }
        };
        pages.push(page);
    }

    for page in &pages {
        verify_interior_page(page)?;
    }

    let filler = forced as usize - content.len();
    log::info!(
        "composed {} pages ({} content, {} filler{})",
        pages.len(),
        content.len(),
        filler,
        if pages.len() > forced as usize {
            ", 1 QA"
        } else {
            ""
        }
    );

    Ok(ComposedBook {
        mode: options.mode,
        pages,
        adjustment,
        spine,
    })
}

fn header_rect(safe: &Rect) -> Rect {
    let height = in_to_pt(HEADER_HEIGHT_IN);
    Rect::new(safe.x, safe.top() - height, safe.width, height)
}

fn badge_rect(safe: &Rect) -> Rect {
    let size = in_to_pt(BADGE_SIZE_IN);
    Rect::new(safe.right() - size, safe.y, size, size)
}

/// Block of wrapped text hanging from `top`, clipped to `max_height`
fn text_block_below(
    top: f32,
    column: &Rect,
    text: &str,
    font_size: f32,
    max_height: f32,
) -> Option<PositionedElement> {
    let line_height = font_size * LINE_HEIGHT_RATIO;
    let max_lines = (max_height / line_height).floor() as usize;
    let mut lines = wrap_text(text, column.width, font_size);
    lines.truncate(max_lines);
    if lines.is_empty() {
        return None;
    }

    let height = lines.len() as f32 * line_height;
    Some(PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines,
            font_size,
            bold: false,
            align: Align::Left,
            boxed: false,
        }),
        Rect::new(column.x, top - height, column.width, height),
    ))
}

fn content_elements(geometry: &PageGeometry, content: &PageContent) -> Vec<PositionedElement> {
    let safe = geometry.safe_rect;
    let gap = in_to_pt(ELEMENT_GAP_IN);
    let mut elements = Vec::new();

    if let Some(image_index) = content.image {
        elements.push(PositionedElement::new(
            ElementKind::Image { image_index },
            geometry.page_rect,
        ));
    }

    if let Some(overlay) = &content.overlay {
        let header = header_rect(&safe);
        elements.push(PositionedElement::new(
            ElementKind::Text(TextBlock {
                lines: vec![truncate_to_width(&overlay.title, header.width, OVERLAY_FONT_SIZE + 2.0)],
                font_size: OVERLAY_FONT_SIZE + 2.0,
                bold: true,
                align: Align::Left,
                boxed: true,
            }),
            header,
        ));

        if !overlay.text.trim().is_empty() {
            let max_height = safe.height / 2.0 - header.height;
            if let Some(block) = text_block_below(
                header.y - gap,
                &safe,
                &overlay.text,
                OVERLAY_FONT_SIZE,
                max_height,
            ) {
                elements.push(block);
            }
        }
    }

    if content.badge {
        elements.push(PositionedElement::new(ElementKind::Badge, badge_rect(&safe)));
    }

    elements
}

fn filler_elements(geometry: &PageGeometry, filler_index: usize) -> Vec<PositionedElement> {
    let safe = geometry.safe_rect;
    let gap = in_to_pt(ELEMENT_GAP_IN);
    let (title, prompts) = FILLER_TEMPLATES[filler_index % FILLER_TEMPLATES.len()];
    let mut elements = Vec::new();

    let header = header_rect(&safe);
    elements.push(PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines: vec![format!("{} {}", title, filler_index + 1)],
            font_size: OVERLAY_FONT_SIZE + 4.0,
            bold: true,
            align: Align::Left,
            boxed: false,
        }),
        header,
    ));

    let prompt_text = prompts
        .iter()
        .flat_map(|p| wrap_text(&format!("- {}", p), safe.width, OVERLAY_FONT_SIZE))
        .collect::<Vec<_>>();
    let line_height = OVERLAY_FONT_SIZE * LINE_HEIGHT_RATIO;
    let prompts_height = prompt_text.len() as f32 * line_height;
    let prompts_rect = Rect::new(
        safe.x,
        header.y - gap - prompts_height,
        safe.width,
        prompts_height,
    );
    elements.push(PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines: prompt_text,
            font_size: OVERLAY_FONT_SIZE,
            bold: false,
            align: Align::Left,
            boxed: false,
        }),
        prompts_rect,
    ));

    let badge = badge_rect(&safe);
    let writing_bottom = badge.top() + gap;
    let writing_top = prompts_rect.y - gap;
    if writing_top > writing_bottom {
        elements.push(PositionedElement::new(
            ElementKind::WritingLines {
                spacing: WRITING_LINE_SPACING,
            },
            Rect::new(safe.x, writing_bottom, safe.width, writing_top - writing_bottom),
        ));
    }

    elements.push(PositionedElement::new(ElementKind::Badge, badge));
    elements
}

fn quality_page(geometry: &PageGeometry, preflight: &PreflightReport) -> PositionedPage {
    let safe = geometry.safe_rect;
    let gap = in_to_pt(ELEMENT_GAP_IN);
    let header = header_rect(&safe);

    let mut elements = vec![PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines: vec!["Image quality check".to_string()],
            font_size: OVERLAY_FONT_SIZE + 4.0,
            bold: true,
            align: Align::Left,
            boxed: false,
        }),
        header,
    )];

    let line_height = QA_FONT_SIZE * LINE_HEIGHT_RATIO;
    let max_lines = ((header.y - gap - safe.y) / line_height).floor() as usize;
    let mut lines = vec![
        "These images are below print resolution. This page is not part of the book."
            .to_string(),
        String::new(),
    ];
    lines.extend(preflight.summary_lines());
    let mut lines: Vec<String> = lines
        .iter()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap_text(line, safe.width, QA_FONT_SIZE)
            }
        })
        .collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines.saturating_sub(1));
        lines.push("...".to_string());
    }

    let height = lines.len() as f32 * line_height;
    elements.push(PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines,
            font_size: QA_FONT_SIZE,
            bold: false,
            align: Align::Left,
            boxed: false,
        }),
        Rect::new(safe.x, header.y - gap - height, safe.width, height),
    ));

    PositionedPage {
        kind: PageKind::QualityReport,
        number: None,
        geometry: *geometry,
        elements,
    }
}

fn verify_interior_page(page: &PositionedPage) -> Result<()> {
    let safe = &page.geometry.safe_rect;
    for element in &page.elements {
        let allowed = match element.kind {
            ElementKind::Image { .. } => page.geometry.page_rect.contains(&element.rect),
            _ => safe.contains(&element.rect),
        };
        if !allowed {
            return Err(QuestPrintError::Layout(format!(
                "{:?} on page {:?} escapes its area: {:?}",
                element.kind, page.number, element.rect
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Cover
// =============================================================================

/// Position title, back text, spine text and the barcode keepout.
pub fn compose_cover(
    options: &BookOptions,
    policy: &PrintPolicy,
    spine: &SpineSpec,
) -> Result<ComposedCover> {
    let geometry = CoverGeometry::resolve(options.trim, spine.width_in, options.mode, policy);
    let gap = in_to_pt(ELEMENT_GAP_IN);
    let mut elements = Vec::new();

    // Front: title and subtitle centred in the upper half
    let front = geometry.front_safe;
    let title_size = 32.0;
    let mut title_lines = wrap_text(&options.title, front.width, title_size);
    title_lines.truncate(3);
    let title_height = title_lines.len() as f32 * title_size * LINE_HEIGHT_RATIO;
    let title_rect = Rect::new(
        front.x,
        front.center_y() + gap,
        front.width,
        title_height.min(front.height / 2.0 - gap),
    );
    elements.push(PositionedElement::new(
        ElementKind::Text(TextBlock {
            lines: title_lines,
            font_size: title_size,
            bold: true,
            align: Align::Center,
            boxed: false,
        }),
        title_rect,
    ));

    if let Some(subtitle) = options.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
        let size = 16.0;
        let height = size * LINE_HEIGHT_RATIO;
        elements.push(PositionedElement::new(
            ElementKind::Text(TextBlock {
                lines: vec![truncate_to_width(subtitle, front.width, size)],
                font_size: size,
                bold: false,
                align: Align::Center,
                boxed: false,
            }),
            Rect::new(front.x, front.center_y() - gap - height, front.width, height),
        ));
    }

    // Back: text block above the keepout
    let keepout = geometry.barcode_keepout;
    elements.push(PositionedElement::new(ElementKind::Keepout, keepout));

    if let Some(back_text) = options.back_text.as_deref().filter(|s| !s.trim().is_empty()) {
        let back = geometry.back_safe;
        let floor = keepout.top().max(back.y) + gap;
        if let Some(block) =
            text_block_below(back.top(), &back, back_text, OVERLAY_FONT_SIZE, back.top() - floor)
        {
            elements.push(block);
        }
    }

    // Spine: only when the title fits at a readable size
    if let Some(font_size) = spine.text_size_pt {
        let spine_safe = geometry.spine_safe;
        elements.push(PositionedElement::new(
            ElementKind::SpineText {
                text: truncate_to_width(&options.title, spine_safe.height, font_size),
                font_size,
            },
            spine_safe,
        ));
    }

    verify_cover(&geometry, &elements)?;

    Ok(ComposedCover { geometry, elements })
}

fn verify_cover(geometry: &CoverGeometry, elements: &[PositionedElement]) -> Result<()> {
    let zones = [geometry.back_safe, geometry.spine_safe, geometry.front_safe];
    for element in elements {
        if element.kind == ElementKind::Keepout {
            continue;
        }
        if element.rect.intersects(&geometry.barcode_keepout) {
            return Err(QuestPrintError::Layout(format!(
                "{:?} overlaps the barcode keepout",
                element.kind
            )));
        }
        if !zones.iter().any(|zone| zone.contains(&element.rect)) {
            return Err(QuestPrintError::Layout(format!(
                "{:?} escapes the cover safe areas: {:?}",
                element.kind, element.rect
            )));
        }
    }
    Ok(())
}

// =============================================================================
// Text measuring
// =============================================================================

/// Approximate Helvetica width of `text` at `font_size`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * HELVETICA_CHAR_WIDTH_RATIO
}

/// Greedy word wrap; words longer than a line are split
pub fn wrap_text(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((max_width / (font_size * HELVETICA_CHAR_WIDTH_RATIO)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line.is_empty() {
            word.len()
        } else {
            line.chars().count() + 1 + word.len()
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn truncate_to_width(text: &str, max_width: f32, font_size: f32) -> String {
    let max_chars = (max_width / (font_size * HELVETICA_CHAR_WIDTH_RATIO)).floor() as usize;
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("find the red boat near the old harbor wall", 60.0, 10.0);
        // 60 / (10 * 0.5) = 12 chars per line
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), "find the red boat near the old harbor wall");
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text("abcdefghij", 20.0, 10.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_filler_prompts_wrap_on_small_trim() {
        let policy = PrintPolicy::default();
        let geometry =
            resolve_page_geometry(TrimSize::square(4.0), PrintMode::Print, PageSide::Recto, &policy);

        for filler_index in 0..FILLER_TEMPLATES.len() {
            for element in filler_elements(&geometry, filler_index) {
                assert!(geometry.safe_rect.contains(&element.rect));
                if let ElementKind::Text(block) = &element.kind {
                    for line in &block.lines {
                        assert!(text_width(line, block.font_size) <= element.rect.width);
                    }
                }
            }
        }
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("short", 100.0, 10.0), "short");
        assert_eq!(truncate_to_width("a much longer title", 40.0, 10.0), "a muc...");
    }
}

//! Content stream operators for positioned elements

use crate::compose::{Align, ElementKind, PositionedElement, TextBlock, text_width};
use crate::constants::*;
use crate::geometry::Rect;

use super::Fonts;
use super::marks::circle_path;

/// Operators for one non-image element
pub(crate) fn element_ops(element: &PositionedElement) -> String {
    let rect = &element.rect;
    match &element.kind {
        // Images need resources and are drawn by the caller
        ElementKind::Image { .. } => String::new(),
        ElementKind::Text(block) => text_block_ops(block, rect),
        ElementKind::Badge => badge_ops(rect),
        ElementKind::WritingLines { spacing } => writing_lines_ops(rect, *spacing),
        ElementKind::Keepout => format!(
            "q 1 g {} {} {} {} re f Q\n",
            rect.x, rect.y, rect.width, rect.height
        ),
        ElementKind::SpineText { text, font_size } => spine_text_ops(text, *font_size, rect),
    }
}

/// Draw an image XObject scaled to fill `frame`, cropped to it
pub(crate) fn image_ops(name: &str, pixel_width: u32, pixel_height: u32, frame: &Rect) -> String {
    let scale = (frame.width / pixel_width as f32).max(frame.height / pixel_height as f32);
    let draw_w = pixel_width as f32 * scale;
    let draw_h = pixel_height as f32 * scale;
    let x = frame.center_x() - draw_w / 2.0;
    let y = frame.center_y() - draw_h / 2.0;
    format!(
        "q {} {} {} {} re W n {} 0 0 {} {} {} cm /{} Do Q\n",
        frame.x, frame.y, frame.width, frame.height, draw_w, draw_h, x, y, name
    )
}

fn text_block_ops(block: &TextBlock, rect: &Rect) -> String {
    let mut ops = String::new();

    if block.boxed {
        ops.push_str(&format!(
            "q 1 g 0 G {} w {} {} {} {} re B Q\n",
            OVERLAY_LINE_WIDTH, rect.x, rect.y, rect.width, rect.height
        ));
    }

    let font = if block.bold {
        Fonts::BOLD
    } else {
        Fonts::REGULAR
    };
    let line_height = block.font_size * LINE_HEIGHT_RATIO;
    // Boxed blocks centre their lines vertically inside the box
    let first_baseline = if block.boxed {
        let text_height = block.lines.len() as f32 * line_height;
        rect.top() - (rect.height - text_height) / 2.0 - block.font_size
    } else {
        rect.top() - block.font_size
    };
    let pad = if block.boxed { block.font_size / 2.0 } else { 0.0 };

    ops.push_str("q 0 g\n");
    for (i, line) in block.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let x = match block.align {
            Align::Left => rect.x + pad,
            Align::Center => rect.center_x() - text_width(line, block.font_size) / 2.0,
        };
        let y = first_baseline - i as f32 * line_height;
        ops.push_str(&format!(
            "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
            font,
            block.font_size,
            x,
            y,
            escape_text(line)
        ));
    }
    ops.push_str("Q\n");
    ops
}

fn writing_lines_ops(rect: &Rect, spacing: f32) -> String {
    let mut ops = format!("q 0.6 G {} w\n", WRITING_LINE_WIDTH);
    let mut y = rect.top() - spacing;
    while y >= rect.y {
        ops.push_str(&format!("{} {} m {} {} l S\n", rect.x, y, rect.right(), y));
        y -= spacing;
    }
    ops.push_str("Q\n");
    ops
}

/// Round brand badge: dark disc with a white paw print
fn badge_ops(rect: &Rect) -> String {
    let radius = rect.width.min(rect.height) / 2.0;
    let cx = rect.center_x();
    let cy = rect.center_y();

    let mut ops = String::from("q 0.15 g\n");
    ops.push_str(&circle_path(cx, cy, radius));
    ops.push_str("f\n1 g\n");

    // Main pad
    ops.push_str(&circle_path(cx, cy - radius * 0.18, radius * 0.32));
    ops.push_str("f\n");

    // Toes
    for (dx, dy) in [(-0.42, 0.12), (-0.15, 0.38), (0.15, 0.38), (0.42, 0.12)] {
        ops.push_str(&circle_path(
            cx + dx * radius,
            cy + dy * radius,
            radius * 0.14,
        ));
        ops.push_str("f\n");
    }

    ops.push_str("Q\n");
    ops
}

/// Title rotated clockwise so it reads top to bottom, centred on the spine
fn spine_text_ops(text: &str, font_size: f32, rect: &Rect) -> String {
    let length = text_width(text, font_size);
    let baseline_x = rect.center_x() - font_size * HELVETICA_CAP_HEIGHT_RATIO / 2.0;
    let start_y = rect.center_y() + length / 2.0;
    format!(
        "q 0 g 0 -1 1 0 {} {} cm BT /{} {} Tf 0 0 Td ({}) Tj ET Q\n",
        baseline_x,
        start_y,
        Fonts::BOLD,
        font_size,
        escape_text(text)
    )
}

/// Escape a string for a PDF literal under WinAnsi encoding.
///
/// Characters outside Latin-1 become `?`.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a (b) \\c"), "a \\(b\\) \\\\c");
        assert_eq!(escape_text("café"), "caf\\351");
        assert_eq!(escape_text("ok ✓"), "ok ?");
    }

    #[test]
    fn test_writing_lines_stay_inside_rect() {
        let ops = writing_lines_ops(&Rect::new(10.0, 10.0, 100.0, 40.0), 18.0);
        // Lines at 32 and 14
        assert_eq!(ops.matches(" l S").count(), 2);
    }

    #[test]
    fn test_image_fills_frame() {
        let ops = image_ops("Im0", 100, 50, &Rect::new(0.0, 0.0, 100.0, 100.0));
        // Height drives the scale: 200 x 100 centred, cropped to the frame
        assert!(ops.contains("200 0 0 100 -50 0 cm"));
    }
}

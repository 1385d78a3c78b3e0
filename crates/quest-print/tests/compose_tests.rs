use quest_print::compose::{ElementKind, PageKind};
use quest_print::*;

/// 10 images at 150 DPI against the 8.75" print page
fn low_res_report(policy: &PrintPolicy, options: &BookOptions) -> PreflightReport {
    let bitmaps: Vec<Bitmap> = (0..10).map(|_| Bitmap::filled(1313, 1313, 200)).collect();
    preflight_bitmaps(&bitmaps, options, policy)
}

fn image_pages(count: usize) -> Vec<PageContent> {
    (0..count)
        .map(|i| PageContent {
            image: Some(i),
            overlay: Some(TextOverlay::new(
                format!("Quest {}", i + 1),
                "Find something round and draw it in the corner of this page.",
            )),
            badge: true,
        })
        .collect()
}

#[test]
fn test_preview_low_res_scenario() {
    let policy = PrintPolicy::default();
    let options = BookOptions {
        requested_pages: 20,
        ..Default::default()
    };
    let report = low_res_report(&policy, &options);
    assert!(report.results().iter().all(|r| r.verdict == Verdict::Fail));

    let book = compose_book(&image_pages(10), &options, &policy, &report).unwrap();

    assert_eq!(book.kdp_page_count(), 24);
    assert_eq!(book.physical_page_count(), 25);
    assert_eq!(book.pages[0].kind, PageKind::QualityReport);
    assert_eq!(book.pages[0].number, None);
    assert_eq!(
        book.pages.iter().filter(|p| p.kind == PageKind::QualityReport).count(),
        1
    );
    assert_eq!(
        book.notice().as_deref(),
        Some("page count adjusted from 20 to 24")
    );
    assert_eq!(
        book.pages.iter().filter(|p| p.kind == PageKind::Filler).count(),
        14
    );
}

#[test]
fn test_print_mode_never_carries_qa_page() {
    let policy = PrintPolicy::default();
    let options = BookOptions {
        mode: PrintMode::Print,
        ..Default::default()
    };
    let report = low_res_report(&policy, &options);

    let book = compose_book(&image_pages(10), &options, &policy, &report).unwrap();
    assert!(!book.has_quality_page());
    assert_eq!(book.physical_page_count(), 24);
    assert_eq!(book.pages[0].number, Some(1));
}

#[test]
fn test_clean_preview_has_no_qa_page() {
    let policy = PrintPolicy::default();
    let options = BookOptions::default();

    let book = compose_book(&image_pages(4), &options, &policy, &PreflightReport::new()).unwrap();
    assert!(!book.has_quality_page());
    assert!(book.notice().is_none());
}

#[test]
fn test_content_is_never_dropped() {
    let policy = PrintPolicy::default();
    let options = BookOptions {
        requested_pages: 24,
        ..Default::default()
    };

    let book = compose_book(&image_pages(31), &options, &policy, &PreflightReport::new()).unwrap();
    assert_eq!(book.kdp_page_count(), 32);
    assert_eq!(
        book.pages.iter().filter(|p| p.kind == PageKind::Content).count(),
        31
    );
    assert_eq!(book.notice().as_deref(), Some("page count adjusted from 24 to 32"));
}

#[test]
fn test_non_image_elements_stay_in_safe_area() {
    let policy = PrintPolicy::default();
    for mode in [PrintMode::Preview, PrintMode::Print] {
        let options = BookOptions {
            mode,
            ..Default::default()
        };
        let book =
            compose_book(&image_pages(6), &options, &policy, &PreflightReport::new()).unwrap();

        for page in &book.pages {
            for element in &page.elements {
                match element.kind {
                    ElementKind::Image { .. } => {
                        assert_eq!(element.rect, page.geometry.page_rect)
                    }
                    _ => assert!(page.geometry.safe_rect.contains(&element.rect)),
                }
            }
        }
    }
}

#[test]
fn test_pages_alternate_recto_verso() {
    let policy = PrintPolicy {
        bleed_edges: BleedEdges::ExceptSpine,
        ..Default::default()
    };
    let options = BookOptions {
        mode: PrintMode::Print,
        ..Default::default()
    };
    let book = compose_book(&image_pages(2), &options, &policy, &PreflightReport::new()).unwrap();

    // Page 1 is a recto: no bleed on its left (spine) edge
    assert_eq!(book.pages[0].geometry.bleed.left, 0.0);
    assert_eq!(book.pages[1].geometry.bleed.right, 0.0);
    assert_eq!(book.pages[2].geometry.bleed.left, 0.0);
}

#[test]
fn test_filler_templates_cycle() {
    let policy = PrintPolicy::default();
    let options = BookOptions::default();
    let book = compose_book(&[], &options, &policy, &PreflightReport::new()).unwrap();

    let titles: Vec<String> = book
        .pages
        .iter()
        .take(4)
        .filter_map(|page| match &page.elements[0].kind {
            ElementKind::Text(block) => block.lines.first().cloned(),
            _ => None,
        })
        .collect();
    assert_eq!(
        titles,
        vec!["Reflection 1", "Repetition 2", "Transfer 3", "Reflection 4"]
    );
    assert!(book.pages.iter().all(|p| p.kind == PageKind::Filler));
}

#[test]
fn test_cover_respects_keepout_and_spine_threshold() {
    let policy = PrintPolicy::default();
    let engine = ComplianceEngine::new(&policy);
    let options = BookOptions {
        mode: PrintMode::Print,
        subtitle: Some("Seaside edition".to_string()),
        back_text: Some(
            "A long back-cover blurb that wraps over several lines and must stop \
             above the barcode area no matter how much there is to say about \
             the quests inside this book."
                .repeat(3),
        ),
        ..Default::default()
    };

    let thin = engine
        .compute_spine_for_paper(24, options.paper, options.trim)
        .unwrap();
    let cover = compose_cover(&options, &policy, &thin).unwrap();
    let keepout = cover.geometry.barcode_keepout;
    assert!(cover.elements.iter().any(|e| e.kind == ElementKind::Keepout));
    assert!(
        cover
            .elements
            .iter()
            .filter(|e| e.kind != ElementKind::Keepout)
            .all(|e| !e.rect.intersects(&keepout))
    );
    assert!(
        !cover
            .elements
            .iter()
            .any(|e| matches!(e.kind, ElementKind::SpineText { .. }))
    );

    let thick = engine
        .compute_spine_for_paper(120, options.paper, options.trim)
        .unwrap();
    let cover = compose_cover(&options, &policy, &thick).unwrap();
    assert!(
        cover
            .elements
            .iter()
            .any(|e| matches!(e.kind, ElementKind::SpineText { .. }))
    );
}

#[test]
fn test_content_over_maximum_is_rejected() {
    let policy = PrintPolicy {
        max_pages: 30,
        ..Default::default()
    };
    let options = BookOptions::default();

    let result = compose_book(&image_pages(31), &options, &policy, &PreflightReport::new());
    assert!(matches!(
        result,
        Err(QuestPrintError::InvalidConfiguration(_))
    ));

    let book = compose_book(&image_pages(30), &options, &policy, &PreflightReport::new()).unwrap();
    assert_eq!(book.kdp_page_count(), 30);
}

#[test]
fn test_spine_title_needs_readable_size() {
    let policy = PrintPolicy::default();
    let engine = ComplianceEngine::new(&policy);
    let options = BookOptions {
        mode: PrintMode::Print,
        ..Default::default()
    };

    let threshold = engine
        .compute_spine_for_paper(79, PaperType::White, options.trim)
        .unwrap();
    let cover = compose_cover(&options, &policy, &threshold).unwrap();
    assert!(
        !cover
            .elements
            .iter()
            .any(|e| matches!(e.kind, ElementKind::SpineText { .. }))
    );

    let thick = engine
        .compute_spine_for_paper(120, PaperType::White, options.trim)
        .unwrap();
    let cover = compose_cover(&options, &policy, &thick).unwrap();
    let spine_safe_width = cover.geometry.spine_safe.width;
    let sizes: Vec<f32> = cover
        .elements
        .iter()
        .filter_map(|e| match e.kind {
            ElementKind::SpineText { font_size, .. } => Some(font_size),
            _ => None,
        })
        .collect();
    assert_eq!(sizes.len(), 1);
    assert!(sizes[0] >= policy.spine_text_min_pt);
    // Cap height stays between the spine margins
    assert!(sizes[0] * 0.72 <= spine_safe_width + 1e-3);
}

#[test]
fn test_smallest_trim_lays_out() {
    let policy = PrintPolicy::default();
    let options = BookOptions {
        trim: TrimSize::square(4.0),
        ..Default::default()
    };
    options.validate(&policy).unwrap();
    // 600 px over the 4.25" print page is about 141 DPI
    let bitmaps: Vec<Bitmap> = (0..3).map(|_| Bitmap::filled(600, 600, 200)).collect();
    let report = preflight_bitmaps(&bitmaps, &options, &policy);
    assert!(report.any_below_pass());

    let book = compose_book(&image_pages(3), &options, &policy, &report).unwrap();
    assert!(book.has_quality_page());
    assert_eq!(
        book.pages.iter().filter(|p| p.kind == PageKind::Filler).count(),
        21
    );

    let spine = ComplianceEngine::new(&policy)
        .compute_spine_for_paper(book.kdp_page_count(), options.paper, options.trim)
        .unwrap();
    assert!(compose_cover(&options, &policy, &spine).is_ok());
}

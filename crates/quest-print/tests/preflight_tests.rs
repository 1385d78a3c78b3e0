use quest_print::*;

fn one_inch() -> Rect {
    Rect::from_size(72.0, 72.0)
}

#[test]
fn test_boundaries_against_300_dpi() {
    let frame = one_inch();

    let at_target = check_image(0, 300, 300, &frame, 300.0, 0.6);
    assert_eq!(at_target.verdict, Verdict::Pass);
    assert_eq!(at_target.achieved_dpi, 300.0);

    // 0.59 x 300 = 177 DPI
    let below = check_image(1, 177, 177, &frame, 300.0, 0.6);
    assert_eq!(below.verdict, Verdict::Fail);

    // 0.61 x 300 = 183 DPI
    let warn = check_image(2, 183, 183, &frame, 300.0, 0.6);
    assert_eq!(warn.verdict, Verdict::Warn);
}

#[test]
fn test_checker_accumulates_in_upload_order() {
    let policy = PrintPolicy::default();
    let mut checker = PreflightChecker::new(&policy);
    let frame = one_inch();

    assert_eq!(checker.check(600, 600, &frame), Verdict::Pass);
    assert!(!checker.any_below_pass());
    assert_eq!(checker.check(200, 200, &frame), Verdict::Warn);
    assert!(checker.any_below_pass());

    let report = checker.finish();
    let indices: Vec<usize> = report.results().iter().map(|r| r.image_index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(report.worst(), Verdict::Warn);
    assert!(report.failing().is_empty());
}

#[test]
fn test_report_merges_out_of_order_results() {
    let frame = one_inch();
    let report = PreflightReport::from_results(vec![
        check_image(2, 100, 100, &frame, 300.0, 0.6),
        check_image(0, 300, 300, &frame, 300.0, 0.6),
        check_image(1, 250, 250, &frame, 300.0, 0.6),
    ]);

    let indices: Vec<usize> = report.results().iter().map(|r| r.image_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(report.summary_lines().len(), 2);
    assert!(report.summary_lines()[1].contains("FAIL"));
}

#[test]
fn test_bitmaps_measured_at_full_bleed_print_size() {
    let policy = PrintPolicy::default();
    let options = BookOptions::default();

    // 8.75" x 300 DPI = 2625 px covers the bleed page exactly
    let bitmaps = vec![
        Bitmap::filled(2625, 2625, 128),
        Bitmap::filled(2550, 2550, 128),
        Bitmap::filled(1312, 1312, 128),
    ];
    let report = preflight_bitmaps(&bitmaps, &options, &policy);
    let verdicts: Vec<Verdict> = report.results().iter().map(|r| r.verdict).collect();

    // Enough for the trim size but not the bleed page: Warn, not Pass
    assert_eq!(verdicts, vec![Verdict::Pass, Verdict::Warn, Verdict::Fail]);
}

#[test]
fn test_blocked_error_lists_every_failure() {
    let frame = one_inch();
    let failing = vec![
        check_image(0, 100, 100, &frame, 300.0, 0.6),
        check_image(3, 90, 90, &frame, 300.0, 0.6),
    ];
    let message = QuestPrintError::PrintBlocked { failing }.to_string();

    assert!(message.contains("2 image(s)"));
    assert!(message.contains("image 1: 100 DPI"));
    assert!(message.contains("image 4: 90 DPI"));
}

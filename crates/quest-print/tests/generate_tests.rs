use lopdf::{Document, Object};
use quest_print::*;

fn request(mode: PrintMode, pixels: u32, count: usize, requested_pages: u32) -> GenerateRequest {
    let options = BookOptions {
        mode,
        requested_pages,
        title: "Harbor Quest".to_string(),
        back_text: Some("Twenty-four pages of things to find.".to_string()),
        ..Default::default()
    };
    let bitmaps = (0..count)
        .map(|_| Bitmap::filled(pixels, pixels, 180))
        .collect();
    let overlays = vec![TextOverlay::new("Morning", "Count the boats (all of them).")];
    GenerateRequest::from_images(options, PrintPolicy::default(), bitmaps, overlays)
}

fn box_values(doc: &Document, page_index: usize, key: &[u8]) -> Vec<f32> {
    let pages = doc.get_pages();
    let page_id = *pages.get(&(page_index as u32 + 1)).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    page.get(key)
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            _ => panic!("unexpected box entry"),
        })
        .collect()
}

#[tokio::test]
async fn test_print_mode_with_failing_images_is_blocked() {
    let result = generate_book(request(PrintMode::Print, 1313, 10, 20)).await;

    match result {
        Err(QuestPrintError::PrintBlocked { failing }) => {
            assert_eq!(failing.len(), 10);
            let indices: Vec<usize> = failing.iter().map(|r| r.image_index).collect();
            assert_eq!(indices, (0..10).collect::<Vec<_>>());
        }
        other => panic!("Expected PrintBlocked, got {:?}", other.map(|b| b.physical_pages)),
    }
}

#[tokio::test]
async fn test_preview_with_failing_images_adds_qa_page() {
    let book = generate_book(request(PrintMode::Preview, 1313, 10, 20))
        .await
        .unwrap();

    assert_eq!(book.notice.as_deref(), Some("page count adjusted from 20 to 24"));
    assert_eq!(book.physical_pages, 25);
    assert_eq!(book.statistics.kdp_pages, 24);
    assert_eq!(book.preflight.worst(), Verdict::Fail);
    assert_eq!(book.readiness.worst(), CheckLevel::Red);

    let interior = Document::load_mem(&book.interior_pdf).unwrap();
    assert_eq!(interior.get_pages().len(), 25);
    // Preview pages are exactly the trim size
    assert_eq!(box_values(&interior, 1, b"MediaBox"), vec![0.0, 0.0, 612.0, 612.0]);
}

#[tokio::test]
async fn test_print_mode_writes_bleed_and_trim_boxes() {
    let book = generate_book(request(PrintMode::Print, 2625, 3, 24))
        .await
        .unwrap();

    assert!(book.notice.is_none());
    assert_eq!(book.physical_pages, 24);

    let interior = Document::load_mem(&book.interior_pdf).unwrap();
    assert_eq!(interior.get_pages().len(), 24);
    assert_eq!(box_values(&interior, 0, b"MediaBox"), vec![0.0, 0.0, 630.0, 630.0]);
    assert_eq!(box_values(&interior, 0, b"BleedBox"), vec![0.0, 0.0, 630.0, 630.0]);
    assert_eq!(box_values(&interior, 0, b"TrimBox"), vec![9.0, 9.0, 621.0, 621.0]);

    let cover = Document::load_mem(&book.cover_pdf).unwrap();
    assert_eq!(cover.get_pages().len(), 1);
    let media = box_values(&cover, 0, b"MediaBox");
    let expected_width = (2.0 * 8.5 + 0.25 + book.statistics.spine_width_in) * 72.0;
    assert!((media[2] - expected_width).abs() < 0.01);
}

#[tokio::test]
async fn test_same_request_gives_same_bytes() {
    let first = generate_book(request(PrintMode::Preview, 300, 2, 24))
        .await
        .unwrap();
    let second = generate_book(request(PrintMode::Preview, 300, 2, 24))
        .await
        .unwrap();
    assert_eq!(first.interior_pdf, second.interior_pdf);
    assert_eq!(first.cover_pdf, second.cover_pdf);
}

#[tokio::test]
async fn test_missing_image_reference_is_rejected() {
    let mut req = request(PrintMode::Preview, 300, 1, 24);
    req.pages.push(PageContent {
        image: Some(5),
        ..Default::default()
    });

    assert!(matches!(
        generate_book(req).await,
        Err(QuestPrintError::InvalidConfiguration(_))
    ));
}

#[tokio::test]
async fn test_pencil_filter_is_applied() {
    let req = request(PrintMode::Preview, 64, 1, 24).with_filter(PencilSketch::default());
    let book = generate_book(req).await.unwrap();
    assert!(!book.interior_pdf.is_empty());
}

#[tokio::test]
async fn test_save_pdf_writes_bytes() {
    let book = generate_book(request(PrintMode::Preview, 100, 1, 24))
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interior.pdf");

    save_pdf(&book.interior_pdf, &path).await.unwrap();
    let written = tokio::fs::read(&path).await.unwrap();
    assert_eq!(written, book.interior_pdf);
}

#[tokio::test]
async fn test_load_png_and_jpeg_photos() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("page1.png");
    let jpeg = dir.path().join("page2.jpg");
    let photo = image::GrayImage::from_pixel(40, 30, image::Luma([120]));
    photo.save(&png).unwrap();
    photo.save(&jpeg).unwrap();

    let bitmaps = load_bitmaps(&[&png, &jpeg]).await.unwrap();
    assert_eq!(bitmaps.len(), 2);
    assert!(bitmaps.iter().all(|b| (b.width(), b.height()) == (40, 30)));
    assert!(bitmaps[0].pixels().iter().all(|&p| p == 120));
}

//! Export pipeline tests
//!
//! Drive [`PrintExporter`] with recording and failing collaborators to check the
//! viewport handling, error classification and output naming.

use super::*;
use crate::render::Viewport;
use crate::test_utils::{
    FailingComposer, FailingRasterizer, MisbehavingRasterizer, RecordingRasterizer,
    sample_surface,
};

fn scrolled() -> ScrollOffsets {
    ScrollOffsets::new(24, 310)
}

#[tokio::test]
async fn test_export_produces_single_page_pdf() {
    let exporter = PrintExporter::pdf(ExportSettings::default());
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);

    let document = exporter.export(&mut surface, "3:00:00").await.unwrap();

    assert!(document.bytes.starts_with(b"%PDF"));
    assert_eq!(document.file_name, "pace-band-3:00:00.pdf");
    assert_eq!(document.page, PageSize::A4);
    assert!((document.placement.width_mm - BAND_WIDTH_MM).abs() < 1e-3);
    assert!((document.placement.y_mm - TOP_MARGIN_MM).abs() < 1e-3);

    let pdf = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(pdf.get_pages().len(), 1);
}

#[tokio::test]
async fn test_capture_sees_normalized_viewport_and_restores_it() {
    let exporter =
        PrintExporter::new(RecordingRasterizer::new(), PdfComposer::new(), ExportSettings::default());
    let mut surface = sample_surface(scrolled());

    exporter.export(&mut surface, "3:00:00").await.unwrap();

    assert_eq!(exporter.rasterizer.observed(), vec![ScrollOffsets::ORIGIN]);
    assert_eq!(surface.scroll_offsets(), scrolled());
}

#[tokio::test]
async fn test_viewport_restored_after_capture_failure() {
    let exporter =
        PrintExporter::new(FailingRasterizer::new(), PdfComposer::new(), ExportSettings::default());
    let mut surface = sample_surface(scrolled());

    let result = exporter.export(&mut surface, "3:00:00").await;

    assert!(matches!(result, Err(PaceBandError::Capture { .. })));
    assert_eq!(exporter.rasterizer.observed(), vec![ScrollOffsets::ORIGIN]);
    assert_eq!(surface.scroll_offsets(), scrolled());
}

#[tokio::test]
async fn test_viewport_restored_after_compose_failure() {
    let exporter = PrintExporter::new(
        RecordingRasterizer::new(),
        FailingComposer::new(),
        ExportSettings::default(),
    );
    let mut surface = sample_surface(scrolled());

    let result = exporter.export(&mut surface, "3:00:00").await;

    assert!(matches!(result, Err(PaceBandError::Compose { .. })));
    assert_eq!(surface.scroll_offsets(), scrolled());
}

#[tokio::test]
async fn test_foreign_rasterizer_errors_become_capture_errors() {
    let exporter =
        PrintExporter::new(MisbehavingRasterizer, PdfComposer::new(), ExportSettings::default());
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);

    let error = exporter.export(&mut surface, "3:00:00").await.unwrap_err();
    assert!(matches!(error, PaceBandError::Capture { .. }));
    assert!(std::error::Error::source(&error).is_some());
}

#[tokio::test]
async fn test_low_scale_is_capture_error() {
    let settings = ExportSettings { scale: 1, ..ExportSettings::default() };
    let exporter = PrintExporter::pdf(settings);
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);

    let error = exporter.export(&mut surface, "3:00:00").await.unwrap_err();
    assert!(matches!(error, PaceBandError::Capture { .. }));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_band_too_tall_for_page_is_compose_error() {
    let settings = ExportSettings { top_margin_mm: 290.0, ..ExportSettings::default() };
    let exporter = PrintExporter::pdf(settings);
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);

    let error = exporter.export(&mut surface, "3:00:00").await.unwrap_err();
    assert!(matches!(error, PaceBandError::Compose { .. }));
}

#[tokio::test]
async fn test_printed_width_independent_of_scale() {
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);
    let low = PrintExporter::pdf(ExportSettings { scale: 2, ..ExportSettings::default() });
    let high = PrintExporter::pdf(ExportSettings { scale: 4, ..ExportSettings::default() });

    let low = low.export(&mut surface, "3:00:00").await.unwrap();
    let high = high.export(&mut surface, "3:00:00").await.unwrap();

    assert_eq!(low.placement, high.placement);
}

#[test]
fn test_file_name_embeds_goal_text() {
    assert_eq!(document_file_name("3:00:00"), "pace-band-3:00:00.pdf");
    assert_eq!(document_file_name("abc"), "pace-band-abc.pdf");
    assert_eq!(document_file_name("1/2\\3\n"), "pace-band-1_2_3_.pdf");
    assert_eq!(document_file_name("01:45:00"), document_file_name("01:45:00"));
}

fn small_document() -> ExportedDocument {
    ExportedDocument {
        file_name: document_file_name("3-00-00"),
        bytes: b"%PDF-1.5".to_vec(),
        page: PageSize::A4,
        placement: Placement { x_mm: 15.0, y_mm: 10.0, width_mm: 180.0, height_mm: 50.0 },
    }
}

#[tokio::test]
async fn test_write_to_leaves_no_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = PrintExporter::pdf(ExportSettings::default());
    let mut surface = sample_surface(ScrollOffsets::ORIGIN);
    let mut document = exporter.export(&mut surface, "3:00:00").await.unwrap();
    document.file_name = document_file_name("3-00-00");

    let path = document.write_to(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("pace-band-3-00-00.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), document.bytes);
    assert!(!dir.path().join("pace-band-3-00-00.pdf.part").exists());
}

#[test]
fn test_write_to_missing_directory_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let error = small_document().write_to(&missing).unwrap_err();
    assert!(matches!(error, PaceBandError::File { .. }));
    assert!(error.is_retryable());
}

#[test]
fn test_failed_rename_removes_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("pace-band-3-00-00.pdf");
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep.txt"), b"occupied").unwrap();

    let error = small_document().write_to(dir.path()).unwrap_err();

    assert!(matches!(error, PaceBandError::File { .. }));
    assert!(!dir.path().join("pace-band-3-00-00.pdf.part").exists());
    assert!(blocker.join("keep.txt").exists());
}

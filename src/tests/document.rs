use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use tempfile::TempDir;

use crate::directory::Memory;
use crate::tests::helper;

#[tokio::test]
async fn test_document_download() {
    let root = TempDir::new().unwrap();
    let renderer = helper::write_stub_renderer(root.path());
    let mut app = helper::setup_test_app(Memory::new(), root.path(), &renderer).await;

    let (status_code, headers, body) =
        helper::get(&mut app, "/guest/John%20Smith/2024-01-01T00:00:00.000Z/pdf").await;

    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(
        "application/pdf",
        headers.get(CONTENT_TYPE).unwrap().to_str().unwrap()
    );
    assert_eq!(
        "attachment; filename=\"John Smith_welcome.pdf\"",
        headers.get(CONTENT_DISPOSITION).unwrap().to_str().unwrap()
    );
    assert!(body.starts_with("%PDF"));

    // the renderer received the canonical guest URL
    let log = std::fs::read_to_string(root.path().join("calls.log")).unwrap();
    assert_eq!(
        "http://concierge.test/guest/John Smith/2024-01-01T00:00:00.000Z",
        log.trim_end()
    );

    // and the artifact sits at the slug's path
    assert!(
        root.path()
            .join("pdfs/john-smith-20240101t000000.000z.pdf")
            .exists()
    );
}

#[tokio::test]
async fn test_document_is_rendered_at_most_once() {
    let root = TempDir::new().unwrap();
    let renderer = helper::write_stub_renderer(root.path());
    let mut app = helper::setup_test_app(Memory::new(), root.path(), &renderer).await;

    let (status_code, _, _) =
        helper::get(&mut app, "/guest/John%20Smith/2024-01-01T00:00:00.000Z/pdf").await;
    assert_eq!(StatusCode::OK, status_code);

    let (status_code, _, _) =
        helper::get(&mut app, "/guest/John%20Smith/2024-01-01T00:00:00.000Z/pdf").await;
    assert_eq!(StatusCode::OK, status_code);

    assert_eq!(1, helper::renderer_calls(root.path()));
}

#[tokio::test]
async fn test_document_distinct_creation_times_use_distinct_artifacts() {
    let root = TempDir::new().unwrap();
    let renderer = helper::write_stub_renderer(root.path());
    let mut app = helper::setup_test_app(Memory::new(), root.path(), &renderer).await;

    let (status_code, _, _) =
        helper::get(&mut app, "/guest/John%20Smith/2024-01-01T00:00:00.000Z/pdf").await;
    assert_eq!(StatusCode::OK, status_code);

    let (status_code, headers, _) =
        helper::get(&mut app, "/guest/John%20Smith/2024-02-02T00:00:00.000Z/pdf").await;
    assert_eq!(StatusCode::OK, status_code);

    assert_eq!(2, helper::renderer_calls(root.path()));
    assert!(
        root.path()
            .join("pdfs/john-smith-20240202t000000.000z.pdf")
            .exists()
    );

    // the download filename only carries the guest name, so it collides
    // client-side even though the artifacts do not
    assert_eq!(
        "attachment; filename=\"John Smith_welcome.pdf\"",
        headers.get(CONTENT_DISPOSITION).unwrap().to_str().unwrap()
    );
}

#[tokio::test]
async fn test_silent_renderer_failure_is_a_server_error() {
    let root = TempDir::new().unwrap();
    let renderer = helper::write_broken_renderer(root.path());
    let mut app = helper::setup_test_app(Memory::new(), root.path(), &renderer).await;

    let (status_code, _, _) =
        helper::get(&mut app, "/guest/John%20Smith/2024-01-01T00:00:00.000Z/pdf").await;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
}

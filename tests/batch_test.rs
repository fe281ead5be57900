//! Integration tests for batch uploads.

use async_trait::async_trait;
use cloudinary_upload::mocks::{form_file_name, MockResponse, MockSigner, MockTransport, TestFixtures};
use cloudinary_upload::services::{BatchOptions, UploadService};
use cloudinary_upload::types::*;
use cloudinary_upload::{CloudinaryError, HttpRequest, HttpResponse, HttpTransport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn create_test_service_with_transport(transport: Arc<MockTransport>) -> UploadService {
    let config = Arc::new(TestFixtures::config().unwrap());
    UploadService::new(config, transport, Arc::new(MockSigner::new()))
}

/// Answers every upload with the file's stem as public id, except files
/// whose name starts with `bad`.
fn echo_transport() -> Arc<MockTransport> {
    Arc::new(MockTransport::with_handler(|request| {
        let name = form_file_name(request).unwrap_or_default();
        if name.starts_with("bad") {
            TestFixtures::error_response(400, &format!("Invalid image file {}", name))
        } else {
            let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(&name);
            TestFixtures::upload_response(stem)
        }
    }))
}

/// Holds each request open briefly and records the peak number in flight.
#[derive(Default)]
struct InFlightTransport {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlightTransport {
    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for InFlightTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CloudinaryError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(25)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let name = form_file_name(&request).unwrap_or_default();
        Ok(TestFixtures::upload_response(&name).into())
    }
}

fn files(names: &[&str]) -> Vec<UploadFile> {
    names.iter().map(|n| TestFixtures::png_file(n)).collect()
}

#[tokio::test]
async fn test_batch_preserves_input_order() {
    let transport = echo_transport();
    let service = create_test_service_with_transport(transport.clone());

    let report = service
        .upload_multiple_images(files(&["one.png", "two.png", "three.png"]), &UploadOptions::new())
        .await;

    assert!(report.is_complete_success());
    let ids: Vec<_> = report.successes().map(|r| r.public_id.as_str()).collect();
    assert_eq!(ids, vec!["one", "two", "three"]);
    assert_eq!(transport.request_count(), 3);

    let results = report.into_results().unwrap();
    assert_eq!(results[2].secure_url, TestFixtures::secure_url("three"));
}

#[tokio::test]
async fn test_batch_one_failure_keeps_other_results() {
    let transport = echo_transport();
    let service = create_test_service_with_transport(transport.clone());

    let report = service
        .upload_multiple_images(files(&["good.png", "bad.png"]), &UploadOptions::new())
        .await;

    assert!(!report.is_complete_success());
    assert_eq!(report.len(), 2);
    assert_eq!(report.items()[0].index, 0);
    assert!(report.items()[0].result.is_ok());
    assert_eq!(report.items()[1].file_name, "bad.png");
    assert!(report.items()[1].result.is_err());

    // good.png: one signed request; bad.png: signed then unsigned.
    assert_eq!(transport.request_count(), 3);

    let err = report.into_results().unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.file_name, "bad.png");
    assert!(err.to_string().contains("Invalid image file bad.png"));
    assert_eq!(err.succeeded.len(), 1);
    assert_eq!(err.succeeded[0].public_id, "good");
}

#[tokio::test]
async fn test_batch_validation_failure_is_per_item() {
    let transport = echo_transport();
    let service = create_test_service_with_transport(transport.clone());

    let mut batch = files(&["a.png"]);
    batch.push(UploadFile::new("notes.txt", b"hello".to_vec()));
    batch.push(TestFixtures::png_file("c.png"));

    let report = service
        .upload_multiple_images(batch, &UploadOptions::new())
        .await;

    assert_eq!(report.successes().count(), 2);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].index, 1);
    assert!(failures[0].result.as_ref().unwrap_err().is_validation());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_batch_empty() {
    let transport = Arc::new(MockTransport::with_default(MockResponse::ok_with_body("{}")));
    let service = create_test_service_with_transport(transport.clone());

    let report = service
        .upload_multiple_images(Vec::new(), &UploadOptions::new())
        .await;

    assert!(report.is_empty());
    assert!(report.is_complete_success());
    assert!(report.into_results().unwrap().is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_batch_bounded_concurrency_preserves_order() {
    let transport = echo_transport();
    let service = create_test_service_with_transport(transport.clone());

    let names = ["p0.png", "p1.png", "p2.png", "p3.png", "p4.png"];
    let report = service
        .upload_multiple_images_with(
            files(&names),
            &UploadOptions::folder("college/gallery"),
            &BatchOptions::new().with_max_concurrency(2),
        )
        .await;

    let ids: Vec<_> = report.successes().map(|r| r.public_id.clone()).collect();
    assert_eq!(ids, vec!["p0", "p1", "p2", "p3", "p4"]);
    assert_eq!(transport.request_count(), 5);
}

#[tokio::test]
async fn test_batch_uploads_run_concurrently() {
    let transport = Arc::new(InFlightTransport::default());
    let config = Arc::new(TestFixtures::config().unwrap());
    let service = UploadService::new(config, transport.clone(), Arc::new(MockSigner::new()));

    let report = service
        .upload_multiple_images(files(&["a.png", "b.png", "c.png", "d.png"]), &UploadOptions::new())
        .await;

    assert!(report.is_complete_success());
    assert_eq!(transport.peak(), 4);
}

#[tokio::test]
async fn test_batch_concurrency_limit_caps_in_flight_requests() {
    let transport = Arc::new(InFlightTransport::default());
    let config = Arc::new(TestFixtures::config().unwrap());
    let service = UploadService::new(config, transport.clone(), Arc::new(MockSigner::new()));

    let report = service
        .upload_multiple_images_with(
            files(&["a.png", "b.png", "c.png", "d.png", "e.png"]),
            &UploadOptions::new(),
            &BatchOptions::new().with_max_concurrency(2),
        )
        .await;

    assert_eq!(report.successes().count(), 5);
    assert_eq!(transport.peak(), 2);
}

//! Integration tests for upload signing.

use cloudinary_upload::credentials::{CloudinaryCredentials, StaticCredentialsProvider};
use cloudinary_upload::mocks::{MockCredentialsProvider, MockTransport, TestFixtures};
use cloudinary_upload::services::UploadService;
use cloudinary_upload::signing::*;
use cloudinary_upload::types::{UploadMode, UploadOptions};
use cloudinary_upload::CloudinaryConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_published_signature_example() {
    let p = params(&[
        ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
        ("public_id", "sample_image"),
        ("timestamp", "1315060510"),
    ]);
    let signature = sign_params(&p, "abcd", &FallbackSha1::default()).unwrap();
    assert_eq!(signature, "bfd09f95f331f558cbd1320e67aa8d488770583e");
}

#[test]
fn test_signature_ignores_insertion_order_and_unsigned_params() {
    let a = params(&[
        ("timestamp", "1315060510"),
        ("public_id", "sample_image"),
        ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
    ]);
    let mut b = a.clone();
    b.insert("api_key".to_string(), "123".to_string());
    b.insert("file".to_string(), "data:...".to_string());
    b.insert("resource_type".to_string(), "image".to_string());

    let backend = SoftSha1;
    assert_eq!(
        sign_params(&a, "abcd", &backend).unwrap(),
        sign_params(&b, "abcd", &backend).unwrap()
    );
}

#[test]
fn test_backends_agree() {
    let message = build_string_to_sign(
        &params(&[("folder", "college/hero"), ("timestamp", "1700000000")]),
        "secret",
    );
    assert_eq!(
        RingSha1.hex_digest(message.as_bytes()).unwrap(),
        SoftSha1.hex_digest(message.as_bytes()).unwrap()
    );
}

#[tokio::test]
async fn test_api_secret_signer_matches_reference() {
    let signer = ApiSecretSigner::new(TestFixtures::credentials_provider());
    let signed = signer
        .sign_at(
            &params(&[("folder", "college/hero"), ("tags", "campus,hero")]),
            1_700_000_000,
        )
        .await
        .unwrap();

    assert_eq!(signed.api_key, MockCredentialsProvider::API_KEY);
    assert_eq!(signed.signature, "a2e32a77e1e97a2bca271705b812f604a956f0a1");
}

#[tokio::test]
async fn test_signer_without_credentials_fails() {
    let signer = ApiSecretSigner::new(Arc::new(MockCredentialsProvider::empty()));
    let result = signer.sign(&params(&[("folder", "x")])).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_real_signer_through_upload_service() {
    let transport = Arc::new(MockTransport::with_responses(vec![
        TestFixtures::upload_response("signed"),
    ]));
    let provider = Arc::new(StaticCredentialsProvider::new(CloudinaryCredentials::new(
        "987654321", "topsecret",
    )));
    let config = CloudinaryConfig::builder()
        .cloud_name("demo")
        .credentials_provider(provider.clone())
        .build()
        .unwrap();
    let service = UploadService::new(
        Arc::new(config),
        transport.clone(),
        Arc::new(ApiSecretSigner::new(provider)),
    );

    let result = service
        .upload_image(TestFixtures::png_file("a.png"), &UploadOptions::folder("college"))
        .await
        .unwrap();
    assert_eq!(result.mode, UploadMode::Signed);

    let request = transport.last_request().unwrap();
    let timestamp = cloudinary_upload::mocks::form_field(&request, "timestamp").unwrap();
    let signature = cloudinary_upload::mocks::form_field(&request, "signature").unwrap();

    let expected = sign_params(
        &params(&[("folder", "college"), ("timestamp", timestamp.as_str())]),
        "topsecret",
        &SoftSha1,
    )
    .unwrap();
    assert_eq!(signature, expected);

    let body = String::from_utf8_lossy(request.body.as_ref().unwrap()).into_owned();
    assert!(!body.contains("topsecret"));
}

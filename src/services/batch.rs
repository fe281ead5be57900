//! Concurrent multi-file uploads.

use super::UploadService;
use crate::error::CloudinaryError;
use crate::types::{UploadFile, UploadOptions, UploadResult};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// Options for a batch upload.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum uploads in flight. `None` starts every upload at once.
    pub max_concurrency: Option<usize>,
}

impl BatchOptions {
    /// Create default options (unbounded fan-out).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the number of concurrent uploads. Zero is treated as one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency.max(1));
        self
    }
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchItem {
    /// Position of the file in the input.
    pub index: usize,
    /// File name of the input.
    pub file_name: String,
    /// Upload outcome.
    pub result: Result<UploadResult, CloudinaryError>,
}

/// Per-file outcomes of a batch upload, in input order.
#[derive(Debug)]
pub struct BatchUploadReport {
    items: Vec<BatchItem>,
}

impl BatchUploadReport {
    /// All items, in input order.
    pub fn items(&self) -> &[BatchItem] {
        &self.items
    }

    /// Number of files in the batch.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Successful uploads, in input order.
    pub fn successes(&self) -> impl Iterator<Item = &UploadResult> {
        self.items.iter().filter_map(|item| item.result.as_ref().ok())
    }

    /// Failed items, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| item.result.is_err())
    }

    /// True if every upload succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.items.iter().all(|item| item.result.is_ok())
    }

    /// Convert into the list of results, or the first failure by input index.
    ///
    /// The error keeps every successful result so the caller can still use
    /// or clean up the files that made it.
    pub fn into_results(self) -> Result<Vec<UploadResult>, BatchUploadError> {
        let mut succeeded = Vec::with_capacity(self.items.len());
        let mut first_failure = None;

        for item in self.items {
            match item.result {
                Ok(result) => succeeded.push(result),
                Err(source) => {
                    if first_failure.is_none() {
                        first_failure = Some((item.index, item.file_name, source));
                    }
                }
            }
        }

        match first_failure {
            None => Ok(succeeded),
            Some((index, file_name, source)) => Err(BatchUploadError {
                index,
                file_name,
                source,
                succeeded,
            }),
        }
    }
}

/// A batch in which at least one file failed.
#[derive(Debug, thiserror::Error)]
#[error("Batch upload failed at file {index} ('{file_name}'): {source}")]
pub struct BatchUploadError {
    /// Input index of the first failing file.
    pub index: usize,
    /// File name of the first failing file.
    pub file_name: String,
    /// Why it failed.
    #[source]
    pub source: CloudinaryError,
    /// Results of every file that did upload.
    pub succeeded: Vec<UploadResult>,
}

impl UploadService {
    /// Upload several files concurrently with the same options.
    ///
    /// Every file is attempted; one failure does not cancel the others.
    pub async fn upload_multiple_images(
        &self,
        files: Vec<UploadFile>,
        options: &UploadOptions,
    ) -> BatchUploadReport {
        self.upload_multiple_images_with(files, options, &BatchOptions::default())
            .await
    }

    /// Upload several files with explicit batch options.
    pub async fn upload_multiple_images_with(
        &self,
        files: Vec<UploadFile>,
        options: &UploadOptions,
        batch: &BatchOptions,
    ) -> BatchUploadReport {
        let count = files.len();
        debug!(count, max_concurrency = ?batch.max_concurrency, "Starting batch upload");

        let uploads = files.into_iter().enumerate().map(move |(index, file)| {
            let file_name = file.file_name.clone();
            async move {
                BatchItem {
                    index,
                    file_name,
                    result: self.upload_image(file, options).await,
                }
            }
        });

        let items = match batch.max_concurrency {
            None => futures::future::join_all(uploads).await,
            Some(limit) => stream::iter(uploads).buffered(limit).collect::<Vec<_>>().await,
        };

        let report = BatchUploadReport { items };
        info!(
            count,
            succeeded = report.successes().count(),
            failed = report.failures().count(),
            "Batch upload finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::TestFixtures;
    use crate::types::UploadMode;

    fn result(id: &str) -> UploadResult {
        UploadResult {
            secure_url: format!("https://res.cloudinary.com/demo/image/upload/{}.png", id),
            public_id: id.to_string(),
            width: 10,
            height: 10,
            format: Some("png".to_string()),
            bytes: None,
            resource_type: None,
            version: None,
            created_at: None,
            url: None,
            original_filename: None,
            mode: UploadMode::Signed,
        }
    }

    fn item(index: usize, result: Result<UploadResult, CloudinaryError>) -> BatchItem {
        BatchItem {
            index,
            file_name: format!("file{}.png", index),
            result,
        }
    }

    #[test]
    fn test_into_results_all_success() {
        let report = BatchUploadReport {
            items: vec![item(0, Ok(result("a"))), item(1, Ok(result("b")))],
        };
        assert!(report.is_complete_success());
        let results = report.into_results().unwrap();
        assert_eq!(results[0].public_id, "a");
        assert_eq!(results[1].public_id, "b");
    }

    #[test]
    fn test_into_results_reports_first_failure_and_keeps_successes() {
        let report = BatchUploadReport {
            items: vec![
                item(0, Ok(result("a"))),
                item(1, Err(TestFixtures::api_error(400, "Invalid image file"))),
                item(2, Err(TestFixtures::api_error(500, "later"))),
                item(3, Ok(result("d"))),
            ],
        };
        assert_eq!(report.failures().count(), 2);

        let err = report.into_results().unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.file_name, "file1.png");
        assert!(err.to_string().contains("Invalid image file"));
        let ids: Vec<_> = err.succeeded.iter().map(|r| r.public_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[test]
    fn test_batch_error_display_and_source() {
        let report = BatchUploadReport {
            items: vec![item(0, Err(TestFixtures::api_error(400, "Invalid image file")))],
        };
        let err = report.into_results().unwrap_err();

        let expected = format!("Batch upload failed at file 0 ('file0.png'): {}", err.source);
        assert_eq!(err.to_string(), expected);

        let source = std::error::Error::source(&err).expect("source is set");
        assert_eq!(source.to_string(), err.source.to_string());
    }

    #[test]
    fn test_zero_concurrency_is_clamped() {
        assert_eq!(BatchOptions::new().with_max_concurrency(0).max_concurrency, Some(1));
    }
}

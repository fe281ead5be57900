//! Upload service: signed upload with unsigned fallback.

use crate::config::CloudinaryConfig;
use crate::error::{map_api_error, CloudinaryError, ConfigurationError, ValidationError};
use crate::multipart::MultipartForm;
use crate::resilience::{RetryConfig, RetryPolicy};
use crate::signing::RequestSigner;
use crate::transfer::{ProgressCallback, TransferProgress};
use crate::transport::{HttpRequest, HttpTransport};
use crate::types::*;
use mime::Mime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Service for uploading files.
pub struct UploadService {
    config: Arc<CloudinaryConfig>,
    transport: Arc<dyn HttpTransport>,
    signer: Arc<dyn RequestSigner>,
}

impl UploadService {
    /// Create a new upload service.
    pub fn new(
        config: Arc<CloudinaryConfig>,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn RequestSigner>,
    ) -> Self {
        Self {
            config,
            transport,
            signer,
        }
    }

    /// Upload a file.
    ///
    /// Tries a signed upload first and falls back to an unsigned upload with
    /// the configured preset. Validation failures return before any request
    /// is sent.
    pub async fn upload_image(
        &self,
        file: UploadFile,
        options: &UploadOptions,
    ) -> Result<UploadResult, CloudinaryError> {
        self.upload_image_with_progress(file, options, &|_| {}).await
    }

    /// Upload a file and report completion to `on_progress`.
    ///
    /// `on_progress` is called exactly once with 100% when the upload
    /// succeeds, and never when it fails.
    #[instrument(
        skip(self, file, options, on_progress),
        fields(file_name = %file.file_name, size = file.size())
    )]
    pub async fn upload_image_with_progress(
        &self,
        file: UploadFile,
        options: &UploadOptions,
        on_progress: &ProgressCallback<'_>,
    ) -> Result<UploadResult, CloudinaryError> {
        let mime_type = self.validate(&file, options)?;
        let params = self.build_params(options);

        debug!(mode = %UploadMode::Signed, folder = ?params.get("folder"), "Attempting upload");
        let signed_error = match self.upload_signed(&file, &mime_type, &params, options.resource_type).await {
            Ok(result) => return Ok(self.complete(&file, result, on_progress)),
            Err(e) => e,
        };
        warn!(error = %signed_error, "Signed upload failed, falling back to unsigned upload");

        debug!(mode = %UploadMode::Unsigned, folder = ?params.get("folder"), "Attempting upload");
        match self.upload_unsigned(&file, &mime_type, &params, options.resource_type).await {
            Ok(result) => Ok(self.complete(&file, result, on_progress)),
            Err(unsigned_error) => Err(CloudinaryError::UploadFailed {
                signed: Box::new(signed_error),
                unsigned: Box::new(unsigned_error),
            }),
        }
    }

    /// Check the file against the effective policy. Returns the MIME type
    /// that will be sent.
    pub fn validate(
        &self,
        file: &UploadFile,
        options: &UploadOptions,
    ) -> Result<Mime, CloudinaryError> {
        let policy = options.policy.as_ref().unwrap_or(&self.config.policy);
        let mime_type = file.effective_mime_type();

        if !policy.allows(&mime_type) {
            return Err(ValidationError::InvalidFileType {
                mime_type: mime_type.essence_str().to_string(),
                allowed: policy.allowed_type_names(),
            }
            .into());
        }

        if file.size() > policy.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max_size: policy.max_file_size,
            }
            .into());
        }

        Ok(mime_type)
    }

    /// Upload parameters shared by both modes.
    fn build_params(&self, options: &UploadOptions) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        let folder = options
            .folder
            .as_ref()
            .or(self.config.default_folder.as_ref());
        if let Some(folder) = folder {
            params.insert("folder".to_string(), folder.clone());
        }
        if let Some(public_id) = &options.public_id {
            params.insert("public_id".to_string(), public_id.clone());
        }
        if !options.tags.is_empty() {
            params.insert("tags".to_string(), options.tags.join(","));
        }

        // Empty values are neither signed nor sent.
        params.retain(|_, value| !value.is_empty());
        params
    }

    async fn upload_signed(
        &self,
        file: &UploadFile,
        mime_type: &Mime,
        params: &BTreeMap<String, String>,
        resource_type: ResourceType,
    ) -> Result<UploadResult, CloudinaryError> {
        let signed = self.signer.sign(params).await?;

        let form = MultipartForm::new()
            .text("api_key", signed.api_key)
            .text("timestamp", signed.timestamp.to_string())
            .text("signature", signed.signature);
        let form = with_file(with_params(form, params), file, mime_type);

        let response = self.send_form(resource_type, form).await?;
        Ok(response.into_result(UploadMode::Signed))
    }

    async fn upload_unsigned(
        &self,
        file: &UploadFile,
        mime_type: &Mime,
        params: &BTreeMap<String, String>,
        resource_type: ResourceType,
    ) -> Result<UploadResult, CloudinaryError> {
        let preset = self
            .config
            .upload_preset
            .as_deref()
            .ok_or(CloudinaryError::Configuration(ConfigurationError::MissingUploadPreset))?;

        let policy = RetryPolicy::new(RetryConfig::from(self.config.as_ref()));
        let service = self;

        let response = policy
            .execute(move || {
                let form = MultipartForm::new().text("upload_preset", preset);
                let form = with_file(with_params(form, params), file, mime_type);
                async move { service.send_form(resource_type, form).await }
            })
            .await?;

        Ok(response.into_result(UploadMode::Unsigned))
    }

    async fn send_form(
        &self,
        resource_type: ResourceType,
        form: MultipartForm,
    ) -> Result<UploadApiResponse, CloudinaryError> {
        let request = HttpRequest::new("POST", self.config.upload_url(resource_type))
            .with_header("content-type", form.content_type())
            .with_body(form.encode());

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            debug!(
                status = response.status,
                request_id = ?response.request_id(),
                "Upload API returned an error"
            );
            return Err(map_api_error(response.status, &response.body));
        }

        UploadApiResponse::parse(&response.body, resource_type)
    }

    fn complete(
        &self,
        file: &UploadFile,
        result: UploadResult,
        on_progress: &ProgressCallback<'_>,
    ) -> UploadResult {
        info!(public_id = %result.public_id, mode = %result.mode, "Upload complete");
        on_progress(TransferProgress::complete(file.size()));
        result
    }

    /// Get the configuration.
    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn with_params(form: MultipartForm, params: &BTreeMap<String, String>) -> MultipartForm {
    params
        .iter()
        .fold(form, |form, (name, value)| form.text(name.as_str(), value.as_str()))
}

fn with_file(form: MultipartForm, file: &UploadFile, mime_type: &Mime) -> MultipartForm {
    form.file(
        "file",
        file.file_name.as_str(),
        mime_type.essence_str(),
        file.data.clone(),
    )
}

//! Mock HTTP transport for testing.

use crate::error::{CloudinaryError, NetworkError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Create a successful response with body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create an error response.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

impl From<MockResponse> for HttpResponse {
    fn from(mock: MockResponse) -> Self {
        HttpResponse {
            status: mock.status,
            headers: mock.headers,
            body: mock.body,
        }
    }
}

/// What the mock does for one request.
#[derive(Debug, Clone)]
enum MockOutcome {
    Respond(MockResponse),
    ConnectionFailure(String),
}

type Handler = Box<dyn Fn(&HttpRequest) -> MockResponse + Send + Sync>;

/// Mock HTTP transport for testing.
///
/// Answers from a FIFO queue, then from a handler, then from a default
/// response. With none of these it fails with a connection error.
pub struct MockTransport {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<HttpRequest>>,
    handler: Option<Handler>,
    default_response: Option<MockResponse>,
    send_count: AtomicUsize,
}

impl MockTransport {
    /// Create a new mock transport with no responses.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            handler: None,
            default_response: None,
            send_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock transport with queued responses.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.queue_response(response);
        }
        transport
    }

    /// Create a mock transport with a default response.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            default_response: Some(response),
            ..Self::new()
        }
    }

    /// Create a mock transport that computes each response from the request.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> MockResponse + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::new()
        }
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.outcomes.lock().push_back(MockOutcome::Respond(response));
    }

    /// Queue a connection failure.
    pub fn queue_connection_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .push_back(MockOutcome::ConnectionFailure(message.into()));
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
        self.send_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CloudinaryError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        let queued = self.outcomes.lock().pop_front();
        let outcome = match queued {
            Some(outcome) => Some(outcome),
            None => self
                .handler
                .as_ref()
                .map(|handler| MockOutcome::Respond(handler(&request)))
                .or_else(|| self.default_response.clone().map(MockOutcome::Respond)),
        };

        match outcome {
            Some(MockOutcome::Respond(mock)) => Ok(mock.into()),
            Some(MockOutcome::ConnectionFailure(message)) => {
                Err(NetworkError::ConnectionFailed { message }.into())
            }
            None => Err(NetworkError::ConnectionFailed {
                message: "No mock response available".to_string(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued_outcomes", &self.outcomes.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Extract a text field from a recorded `multipart/form-data` request.
pub fn form_field(request: &HttpRequest, name: &str) -> Option<String> {
    let body = request.body.as_ref()?;
    let body = String::from_utf8_lossy(body);
    let marker = format!("Content-Disposition: form-data; name=\"{}\"", name);
    let start = body.find(&marker)? + marker.len();
    let rest = &body[start..];
    // Skip any further disposition attributes and part headers.
    let value_start = rest.find("\r\n\r\n")? + 4;
    let value = &rest[value_start..];
    let end = value.find("\r\n--")?;
    Some(value[..end].to_string())
}

/// File name of the file part in a recorded `multipart/form-data` request.
pub fn form_file_name(request: &HttpRequest) -> Option<String> {
    let body = request.body.as_ref()?;
    let body = String::from_utf8_lossy(body);
    let marker = "name=\"file\"; filename=\"";
    let start = body.find(marker)? + marker.len();
    let end = body[start..].find('"')?;
    Some(body[start..start + end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::MultipartForm;

    #[tokio::test]
    async fn test_mock_transport_multiple_responses() {
        let transport = MockTransport::with_responses(vec![
            MockResponse::ok_with_body("first"),
            MockResponse::error(500, "second"),
        ]);

        let first = transport
            .send(HttpRequest::new("POST", "https://example.com/1"))
            .await
            .unwrap();
        assert_eq!(first.body, Bytes::from("first"));

        let second = transport
            .send(HttpRequest::new("POST", "https://example.com/2"))
            .await
            .unwrap();
        assert_eq!(second.status, 500);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue_fails() {
        let transport = MockTransport::new();
        let result = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await;
        assert!(matches!(result, Err(CloudinaryError::Network(_))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_transport_queued_failure() {
        let transport = MockTransport::with_default(MockResponse::ok_with_body("{}"));
        transport.queue_connection_failure("reset by peer");

        let first = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await;
        assert!(first.unwrap_err().to_string().contains("reset by peer"));

        let second = transport
            .send(HttpRequest::new("POST", "https://example.com"))
            .await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_mock_transport_handler() {
        let transport = MockTransport::with_handler(|request| {
            MockResponse::ok_with_body(format!("echo {}", request.url))
        });
        let response = transport
            .send(HttpRequest::new("POST", "https://example.com/x"))
            .await
            .unwrap();
        assert_eq!(response.body, Bytes::from("echo https://example.com/x"));
    }

    #[test]
    fn test_form_field_extraction() {
        let form = MultipartForm::with_boundary("B")
            .text("upload_preset", "college_unsigned")
            .text("folder", "college/events")
            .file("file", "hero.png", "image/png", Bytes::from_static(b"\x89PNG"));
        let request = HttpRequest::new("POST", "https://example.com").with_body(form.encode());

        assert_eq!(
            form_field(&request, "upload_preset").as_deref(),
            Some("college_unsigned")
        );
        assert_eq!(form_field(&request, "folder").as_deref(), Some("college/events"));
        assert_eq!(form_field(&request, "signature"), None);
        assert_eq!(form_file_name(&request).as_deref(), Some("hero.png"));
    }
}

//! Transport layer abstraction for gateway calls.

use async_trait::async_trait;
use fmxml_core::{ClientError, ClientResult, Directive, RawResponse, RequestDescriptor};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A transport sends one request to the gateway and returns its envelope.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-memory gateways, mocks for testing, etc.).
/// Timeouts and cancellation belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response envelope.
    async fn send(&self, request: &RequestDescriptor) -> ClientResult<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &RequestDescriptor) -> ClientResult<RawResponse> {
        (**self).send(request).await
    }
}

enum MockReply {
    Response(RawResponse),
    Failure(String),
}

/// A mock transport for testing.
///
/// Replies are served in the order they were queued, and every request is
/// recorded. Sending with an empty queue is a transport error.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response envelope.
    pub fn push_response(&self, response: RawResponse) -> &Self {
        self.replies.lock().push_back(MockReply::Response(response));
        self
    }

    /// Queues a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .push_back(MockReply::Failure(message.into()));
        self
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    /// Returns the directive of every request sent so far.
    pub fn directives(&self) -> Vec<Option<Directive>> {
        self.requests.lock().iter().map(|r| r.directive()).collect()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of replies still queued.
    pub fn pending_replies(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestDescriptor) -> ClientResult<RawResponse> {
        self.requests.lock().push(request.clone());

        match self.replies.lock().pop_front() {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Failure(message)) => Err(ClientError::transport(message)),
            None => Err(ClientError::transport("no mock response queued")),
        }
    }
}

//! Configuration options for the itemscan client

use std::time::Duration;

/// Configuration options for the itemscan client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to the shared HTTP client
    pub request_timeout: Option<Duration>,

    /// Maximum number of entries returned by the history list view,
    /// `None` for no limit
    pub history_page_size: Option<i32>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            history_page_size: None,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the history page size
    pub fn with_history_page_size(mut self, value: Option<i32>) -> Self {
        self.history_page_size = value;
        self
    }
}

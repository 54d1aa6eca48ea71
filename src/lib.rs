//! Verification core for a QR item scanner
//!
//! Items registered in a remote directory carry an identifier embedded in
//! their QR code. This crate resolves scanned payloads against that
//! directory, records successful lookups in a scan history log, and
//! provides the local age-eligibility check, decode-stream plumbing and
//! theme preference handling the presentation layer builds on.

pub mod age;
pub mod config;
pub mod decoder;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod history;
pub mod scan;
pub mod store;
pub mod theme;

use log::warn;
use reqwest::Client;

use crate::config::ClientOptions;
use crate::directory::Directory;
use crate::history::HistoryLog;
use crate::scan::Verifier;
use crate::store::StoreClient;

/// The main entry point for the itemscan client
pub struct ItemScan {
    /// The base URL for the store project
    pub url: String,
    /// The anonymous API key for the store project
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl ItemScan {
    /// Create a new itemscan client
    ///
    /// # Example
    ///
    /// ```
    /// use itemscan::ItemScan;
    ///
    /// let client = ItemScan::new("https://your-project-url.supabase.co", "your-anon-key");
    /// ```
    pub fn new(store_url: &str, store_key: &str) -> Self {
        Self::new_with_options(store_url, store_key, ClientOptions::default())
    }

    /// Create a new itemscan client with custom options
    pub fn new_with_options(store_url: &str, store_key: &str, options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = match builder.build() {
            Ok(client) => client,
            Err(err) => {
                warn!(
                    "failed to build HTTP client with configured options, using defaults: {}",
                    err
                );
                Client::new()
            }
        };

        Self {
            url: store_url.to_string(),
            key: store_key.to_string(),
            http_client,
            options,
        }
    }

    /// Create a StoreClient for operations on a specific table
    pub fn from(&self, table: &str) -> StoreClient {
        StoreClient::new(&self.url, &self.key, table, self.http_client.clone())
    }

    /// Read access to the item directory
    pub fn directory(&self) -> Directory {
        Directory::new(self.from(directory::ITEMS_TABLE))
    }

    /// Append and list access to the scan history log
    pub fn history(&self) -> HistoryLog {
        HistoryLog::new(
            self.from(history::HISTORY_TABLE),
            self.options.history_page_size,
        )
    }

    /// The verification workflow over this client's directory and history
    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.directory(), self.history())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::age::{check_age, VerificationOutcome};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::scan::{ScanCycle, ScanOutcome};
    pub use crate::ItemScan;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builds_client_with_custom_timeout() {
        let options = ClientOptions::default()
            .with_request_timeout(Some(Duration::from_secs(5)))
            .with_history_page_size(Some(20));
        let client = ItemScan::new_with_options("https://example.supabase.co", "key", options);

        assert_eq!(client.options.request_timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.options.history_page_size, Some(20));
    }

    #[test]
    fn builds_client_without_timeout() {
        let options = ClientOptions::default().with_request_timeout(None);
        let client = ItemScan::new_with_options("https://example.supabase.co", "key", options);

        assert_eq!(client.options.request_timeout, None);
    }
}

//! Generic table access through the store's PostgREST interface

mod query;

use reqwest::Client;
use serde::Serialize;

pub use query::*;

/// Client for operations on a single table
pub struct StoreClient {
    /// The base URL for the store project
    url: String,

    /// The anonymous API key for the store project
    key: String,

    /// The table name
    table: String,

    /// HTTP client
    client: Client,
}

impl StoreClient {
    /// Create a new StoreClient
    pub(crate) fn new(url: &str, key: &str, table: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            table: table.to_string(),
            client,
        }
    }

    /// Get the base URL for REST API requests
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    /// Select specific columns from the table
    pub fn select(&self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(
            self.table_url(),
            self.key.clone(),
            columns,
            self.client.clone(),
        )
    }

    /// Insert data into the table
    pub fn insert<T: Serialize>(&self, values: T) -> InsertBuilder<T> {
        InsertBuilder::new(
            self.table_url(),
            self.key.clone(),
            values,
            self.client.clone(),
        )
    }
}

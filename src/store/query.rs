//! Query builders for StoreClient

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::Fetch;

const CLIENT_INFO: &str = "itemscan-rust/0.1.0";

/// Base query builder
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Query parameters
    params: HashMap<String, String>,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
        }
    }

    /// Add a parameter to the query
    pub fn add_param(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    /// Get the query parameters
    pub fn get_params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Builder for SELECT queries
pub struct SelectBuilder {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// HTTP client
    client: Client,

    /// Query builder
    query: QueryBuilder,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub fn new(url: String, key: String, columns: &str, client: Client) -> Self {
        let mut query = QueryBuilder::new();
        query.add_param("select", columns);

        Self {
            url,
            key,
            client,
            query,
        }
    }

    /// Filter rows where column equals a value
    pub fn eq<T: ToString>(&mut self, column: &str, value: T) -> &mut Self {
        let filter = format!("eq.{}", value.to_string());
        self.query.add_param(column, &filter);
        self
    }

    /// Limit the number of rows returned
    pub fn limit(&mut self, count: i32) -> &mut Self {
        self.query.add_param("limit", &count.to_string());
        self
    }

    /// Order the results by a column
    pub fn order(&mut self, column: &str, ascending: bool) -> &mut Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.query
            .add_param("order", &format!("{}.{}", column, direction));
        self
    }

    /// Execute the query and return the matching rows
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let fetch = Fetch::get(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .query(self.query.get_params().clone());

        let result = fetch.execute::<Vec<T>>().await?;
        Ok(result)
    }
}

/// Builder for INSERT queries
pub struct InsertBuilder<T: Serialize> {
    /// The base URL for the request
    url: String,

    /// The API key
    key: String,

    /// The values to insert
    values: T,

    /// HTTP client
    client: Client,
}

impl<T: Serialize> InsertBuilder<T> {
    /// Create a new InsertBuilder
    pub fn new(url: String, key: String, values: T, client: Client) -> Self {
        Self {
            url,
            key,
            values,
            client,
        }
    }

    /// Execute the query without returning the inserted data
    pub async fn execute_no_return(&self) -> Result<(), Error> {
        let fetch = Fetch::post(&self.client, &self.url)
            .header("apikey", &self.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Prefer", "return=minimal")
            .json(&self.values)?;

        fetch.execute_no_content().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreClient;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn select_builds_postgrest_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/items"))
            .and(query_param("select", "*"))
            .and(query_param("random_id", "eq.abc-123"))
            .and(header("apikey", "fake-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Widget" }])),
            )
            .mount(&mock_server)
            .await;

        let store = StoreClient::new(
            &mock_server.uri(),
            "fake-key",
            "items",
            reqwest::Client::new(),
        );

        let rows = store
            .select("*")
            .eq("random_id", "abc-123")
            .execute::<serde_json::Value>()
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Widget");
    }

    #[tokio::test]
    async fn select_orders_and_limits() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/items"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let store = StoreClient::new(
            &mock_server.uri(),
            "fake-key",
            "items",
            reqwest::Client::new(),
        );

        let rows = store
            .select("*")
            .order("created_at", false)
            .limit(5)
            .execute::<serde_json::Value>()
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn insert_posts_minimal_return() {
        let mock_server = MockServer::start().await;

        let payload = json!({ "item_id": "abc", "item_name": "Widget" });
        Mock::given(method("POST"))
            .and(path("/rest/v1/items"))
            .and(header("Prefer", "return=minimal"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201))
            .mount(&mock_server)
            .await;

        let store = StoreClient::new(
            &mock_server.uri(),
            "fake-key",
            "items",
            reqwest::Client::new(),
        );

        store.insert(payload).execute_no_return().await.unwrap();
    }

    #[tokio::test]
    async fn insert_failure_surfaces_store_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/items"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })),
            )
            .mount(&mock_server)
            .await;

        let store = StoreClient::new(
            &mock_server.uri(),
            "fake-key",
            "items",
            reqwest::Client::new(),
        );

        let err = store
            .insert(json!({ "item_id": "abc" }))
            .execute_no_return()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn query_builder_collects_params() {
        let mut query = QueryBuilder::new();
        query.add_param("select", "*");
        query.add_param("limit", "1");

        assert_eq!(query.get_params().len(), 2);
        assert_eq!(query.get_params().get("limit").map(String::as_str), Some("1"));
    }
}

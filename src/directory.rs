//! Item Directory lookups
//!
//! The directory is the remote table of registered items, keyed by the
//! opaque identifier embedded in each item's QR code.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::store::StoreClient;

/// Table holding registered items
pub const ITEMS_TABLE: &str = "stored_ids";

/// Keys that are rendered through dedicated fields (or are internal) and
/// therefore excluded from the passthrough attribute listing
const DISPLAYED_OR_INTERNAL_KEYS: [&str; 7] = [
    "id",
    "random_id",
    "original_id",
    "name",
    "description",
    "created_at",
    "age",
];

/// A registered item as stored in the directory
///
/// Rows carry an open-ended set of columns beyond the ones modeled here;
/// those land in `extra` in the order the store returned them.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    /// Store-assigned primary identifier
    pub id: String,

    /// The identifier embedded in the QR code, used as the lookup key
    #[serde(rename = "random_id")]
    pub external_id: String,

    /// Display name
    pub name: String,

    /// Display description
    pub description: String,

    /// Minimum age associated with the item, if recorded
    pub age: Option<i32>,

    /// Creation timestamp, assigned by the store
    pub created_at: DateTime<Utc>,

    /// Schema-flexible passthrough columns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemRecord {
    /// Passthrough attributes suitable for display, in store order,
    /// with already-displayed and internal keys filtered out
    pub fn display_attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.extra
            .iter()
            .filter(|(key, _)| !DISPLAYED_OR_INTERNAL_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Read access to the item directory
pub struct Directory {
    store: StoreClient,
}

impl Directory {
    /// Create a new Directory over the given table client
    pub(crate) fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// All records whose `random_id` equals the scanned payload, in the
    /// store's returned order
    ///
    /// The payload is passed through verbatim; a malformed payload simply
    /// matches nothing.
    pub async fn find_by_external_id(&self, external_id: &str) -> Result<Vec<ItemRecord>, Error> {
        self.store
            .select("*")
            .eq("random_id", external_id)
            .execute::<ItemRecord>()
            .await
    }
}

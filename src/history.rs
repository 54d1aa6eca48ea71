//! Scan history log
//!
//! An append-only remote log of past successful lookups. Entries are never
//! updated or deleted by this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::StoreClient;

/// Table holding scan history entries
pub const HISTORY_TABLE: &str = "scan_history";

/// One completed lookup event
#[derive(Debug, Clone, Deserialize)]
pub struct ScanHistoryEntry {
    /// Store-assigned identifier
    pub id: String,

    /// Insertion timestamp, assigned by the store
    pub created_at: DateTime<Utc>,

    /// The matched item's QR identifier
    pub item_id: String,

    /// The matched item's name at scan time; not kept in sync with later
    /// edits to the item
    pub item_name: String,
}

/// Insert payload for a new history entry
///
/// `id` and `created_at` are assigned server-side.
#[derive(Debug, Clone, Serialize)]
pub struct NewScanEntry {
    pub item_id: String,
    pub item_name: String,
}

/// Append and list access to the scan history
pub struct HistoryLog {
    store: StoreClient,
    page_size: Option<i32>,
}

impl HistoryLog {
    /// Create a new HistoryLog over the given table client
    pub(crate) fn new(store: StoreClient, page_size: Option<i32>) -> Self {
        Self { store, page_size }
    }

    /// Append one entry to the log
    pub async fn append(&self, entry: NewScanEntry) -> Result<(), Error> {
        self.store.insert(entry).execute_no_return().await
    }

    /// Past scans, newest first
    pub async fn recent(&self) -> Result<Vec<ScanHistoryEntry>, Error> {
        let mut query = self.store.select("*");
        query.order("created_at", false);
        if let Some(limit) = self.page_size {
            query.limit(limit);
        }
        query.execute::<ScanHistoryEntry>().await
    }
}

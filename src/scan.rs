//! Verification workflow: decoded payload -> directory lookup -> history append
//!
//! The workflow classifies every lookup into a [`ScanOutcome`] and, on a
//! match, records the scan in the history log. History bookkeeping is
//! best-effort by policy: its failure never alters the outcome the caller
//! sees.

use log::{debug, warn};

use crate::directory::{Directory, ItemRecord};
use crate::history::{HistoryLog, NewScanEntry};

/// Result of resolving one scanned payload
#[derive(Debug)]
pub enum ScanOutcome {
    /// A matching item was found
    ///
    /// `multiple_matches` is an advisory flag set when the directory
    /// returned more than one row for the payload; the first row in the
    /// returned order is kept. Not a data-integrity signal.
    Found {
        record: ItemRecord,
        multiple_matches: bool,
    },

    /// No item matched the payload; informational, not a system error
    NotFound,

    /// The directory could not be queried
    LookupError(String),
}

impl ScanOutcome {
    /// User-facing message for this outcome
    pub fn message(&self) -> &str {
        match self {
            ScanOutcome::Found {
                multiple_matches: false,
                ..
            } => "Item found successfully",
            ScanOutcome::Found {
                multiple_matches: true,
                ..
            } => "Multiple items found, showing first match",
            ScanOutcome::NotFound => "No items found with this ID",
            ScanOutcome::LookupError(message) => message,
        }
    }

    /// Whether the message should be rendered with the error style
    pub fn is_error(&self) -> bool {
        matches!(self, ScanOutcome::NotFound | ScanOutcome::LookupError(_))
    }

    /// The matched record, if any
    pub fn record(&self) -> Option<&ItemRecord> {
        match self {
            ScanOutcome::Found { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Orchestrates lookup and history append for scanned payloads
pub struct Verifier {
    directory: Directory,
    history: HistoryLog,
}

impl Verifier {
    /// Create a new Verifier
    pub(crate) fn new(directory: Directory, history: HistoryLog) -> Self {
        Self { directory, history }
    }

    /// Resolve a decoded QR payload against the item directory
    ///
    /// The payload is used verbatim as the lookup key; no format is imposed
    /// on it. On a match the scan is recorded in the history log before
    /// returning; a failed history write is logged and the `Found` outcome
    /// is returned unchanged. Nothing is written for `NotFound` or
    /// `LookupError`.
    pub async fn resolve_scan(&self, payload: &str) -> ScanOutcome {
        let items = match self.directory.find_by_external_id(payload).await {
            Ok(items) => items,
            Err(err) => return ScanOutcome::LookupError(err.to_string()),
        };

        let match_count = items.len();
        let Some(record) = items.into_iter().next() else {
            return ScanOutcome::NotFound;
        };

        let multiple_matches = match_count > 1;
        if multiple_matches {
            debug!(
                "{} directory rows for payload {:?}, keeping the first",
                match_count, payload
            );
        }

        let entry = NewScanEntry {
            item_id: record.external_id.clone(),
            item_name: record.name.clone(),
        };
        if let Err(err) = self.history.append(entry).await {
            // Background bookkeeping; the caller still gets the match.
            warn!("failed to record scan of {}: {}", record.external_id, err);
        }

        ScanOutcome::Found {
            record,
            multiple_matches,
        }
    }
}

/// State of one scan cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// Not scanning; decode events are ignored
    Idle,
    /// Waiting for a decode event
    Scanning,
    /// A decode event has been accepted; further events are ignored until
    /// the cycle is reset
    Resolved,
}

/// Per-cycle decode gating
///
/// At most one decode event is acted on per cycle. The camera keeps
/// delivering events while a code stays in frame; everything after the
/// first accepted event is dropped until an explicit [`reset`].
///
/// [`reset`]: ScanCycle::reset
#[derive(Debug)]
pub struct ScanCycle {
    state: CycleState,
    camera_ready: bool,
    payload: Option<String>,
}

impl ScanCycle {
    /// Create a cycle in the idle state
    pub fn new() -> Self {
        Self {
            state: CycleState::Idle,
            camera_ready: false,
            payload: None,
        }
    }

    /// Begin scanning; no-op unless idle
    pub fn arm(&mut self) {
        if self.state == CycleState::Idle {
            self.state = CycleState::Scanning;
        }
    }

    /// Signal that the camera is delivering frames; decode events are not
    /// accepted before this
    pub fn camera_ready(&mut self) {
        self.camera_ready = true;
    }

    /// Offer a decoded text to the cycle
    ///
    /// Returns the payload to resolve if this event is the one the cycle
    /// acts on, `None` if the event is suppressed.
    pub fn accept(&mut self, text: &str) -> Option<String> {
        if self.state != CycleState::Scanning || !self.camera_ready {
            return None;
        }

        self.state = CycleState::Resolved;
        self.payload = Some(text.to_string());
        self.payload.clone()
    }

    /// Return to idle, clearing the accepted payload and the camera-ready
    /// flag (the camera must report ready again after a reset)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current cycle state
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// The payload accepted in this cycle, if any
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl Default for ScanCycle {
    fn default() -> Self {
        Self::new()
    }
}

/*!
 * Bounded session history of resolved translations.
 *
 * The buffer keeps the most recent (source, translation) pairs resolved
 * through a provider, evicting oldest-first once capacity is reached.
 * Nothing currently feeds the history back into provider prompts; it is
 * kept for display and as the seam for future context-aware translation.
 */

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A single resolved translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Original English text
    pub source: String,

    /// Resolved Runyakitara translation
    pub translation: String,
}

impl HistoryRecord {
    /// Create a new history record
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
        }
    }
}

/// FIFO-evicting buffer of the last N resolved translations
pub struct HistoryBuffer {
    /// Stored records, oldest first
    records: Arc<RwLock<VecDeque<HistoryRecord>>>,

    /// Maximum number of records retained
    capacity: usize,
}

/// Buffer operations - some methods are API surface for library consumers
#[allow(dead_code)]
impl HistoryBuffer {
    /// Create a new buffer holding at most `capacity` records.
    /// A zero capacity is clamped to one so the buffer stays usable.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Append a record, evicting the oldest record(s) past capacity
    pub fn append(&self, record: HistoryRecord) {
        let mut records = self.records.write();
        records.push_back(record);
        while records.len() > self.capacity {
            records.pop_front();
        }
    }

    /// Remove all records
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Ordered copy of the stored records, oldest first
    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.records.read().iter().cloned().collect()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the buffer has no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Maximum number of records this buffer retains
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Clone for HistoryBuffer {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            capacity: self.capacity,
        }
    }
}

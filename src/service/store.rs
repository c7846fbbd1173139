//! Conversion record storage.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;

/// One completed conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRecord {
    /// Conversion id (UUID v4)
    pub id: String,
    /// File name as uploaded, after sanitizing
    pub original_filename: String,
    /// Name of the converted article
    pub converted_filename: String,
    /// Style actually applied
    pub style: String,
    /// Title, empty when none was given
    pub title: String,
    /// Subtitle, empty when none was given
    pub subtitle: String,
    /// When the conversion finished
    pub timestamp: DateTime<Utc>,
    /// Upload size in bytes
    pub file_size: usize,
    /// The converted article
    #[serde(skip)]
    pub html: String,
}

/// Storage for conversion records.
///
/// Implementations must be safe to share between request handlers.
pub trait ConversionStore: Send + Sync {
    /// Store a record.
    fn insert(&self, record: ConversionRecord);

    /// Look up a record by id.
    fn get(&self, id: &str) -> Option<ConversionRecord>;

    /// All records, oldest first.
    fn all(&self) -> Vec<ConversionRecord>;

    /// Remove records created before `cutoff`, returning them.
    fn remove_before(&self, cutoff: DateTime<Utc>) -> Vec<ConversionRecord>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `limit` most recent records, oldest first.
    fn recent(&self, limit: usize) -> Vec<ConversionRecord> {
        let all = self.all();
        let skip = all.len().saturating_sub(limit);
        all.into_iter().skip(skip).collect()
    }
}

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<String, ConversionRecord>,
    /// Ids in insertion order
    order: Vec<String>,
}

/// In-process store behind a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversionStore for MemoryStore {
    fn insert(&self, record: ConversionRecord) {
        let mut records = self.records.write();
        if records.by_id.insert(record.id.clone(), record.clone()).is_none() {
            records.order.push(record.id);
        }
    }

    fn get(&self, id: &str) -> Option<ConversionRecord> {
        self.records.read().by_id.get(id).cloned()
    }

    fn all(&self) -> Vec<ConversionRecord> {
        let records = self.records.read();
        records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id).cloned())
            .collect()
    }

    fn remove_before(&self, cutoff: DateTime<Utc>) -> Vec<ConversionRecord> {
        let mut records = self.records.write();
        let expired: Vec<String> = records
            .by_id
            .values()
            .filter(|r| r.timestamp < cutoff)
            .map(|r| r.id.clone())
            .collect();

        let mut removed = Vec::with_capacity(expired.len());
        for id in &expired {
            if let Some(record) = records.by_id.remove(id) {
                removed.push(record);
            }
        }
        records.order.retain(|id| !expired.contains(id));
        removed
    }

    fn len(&self) -> usize {
        self.records.read().by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn record(id: &str, timestamp: DateTime<Utc>) -> ConversionRecord {
        ConversionRecord {
            id: id.to_string(),
            original_filename: format!("{}.md", id),
            converted_filename: format!("converted_{}.md.html", id),
            style: "default".to_string(),
            title: String::new(),
            subtitle: String::new(),
            timestamp,
            file_size: 1,
            html: String::new(),
        }
    }

    #[test]
    fn test_insert_get_order() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for id in ["a", "b", "c"] {
            store.insert(record(id, now));
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("b").unwrap().id, "b");
        assert!(store.get("z").is_none());
        let ids: Vec<String> = store.recent(2).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_remove_before() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.insert(record("old", now - TimeDelta::hours(30)));
        store.insert(record("new", now));

        let removed = store.remove_before(now - TimeDelta::hours(24));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "old");
        assert_eq!(store.all().len(), 1);
        assert!(!store.is_empty());
    }
}

use crate::storage::KeyValueStore;
use blurd_types::{BlurdError, BlurdResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Storage key for registered credentials.
pub const CREDENTIALS_KEY: &str = "blurd_credentials";
/// Storage key for generated proofs.
pub const PROOFS_KEY: &str = "blurd_proofs";
/// Storage key for private-payment records.
pub const PAYMENTS_KEY: &str = "blurd_payments";
/// Storage key for exported payment receipts.
pub const PAYMENT_PROOFS_KEY: &str = "blurd_payment_proofs";

/// Typed view over one storage namespace holding a JSON array of records.
///
/// Append is read-then-write; concurrent writers to the same key can
/// lose each other's appends, the same semantics as the browser storage
/// the namespaces come from.
pub struct RecordStore<'a, S: KeyValueStore, T> {
    store: &'a S,
    key: &'static str,
    _marker: PhantomData<T>,
}

impl<'a, S: KeyValueStore, T: Serialize + DeserializeOwned> RecordStore<'a, S, T> {
    /// Bind a record type to a storage key.
    pub fn new(store: &'a S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// Load all records; an absent key reads as empty.
    pub fn load(&self) -> BlurdResult<Vec<T>> {
        match self.store.get(self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                BlurdError::Serialization(format!("Corrupt {} namespace: {e}", self.key))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Append one record.
    pub fn append(&self, record: T) -> BlurdResult<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }

    /// Replace the whole namespace.
    pub fn save(&self, records: &[T]) -> BlurdResult<()> {
        let raw = serde_json::to_string(records)
            .map_err(|e| BlurdError::Serialization(e.to_string()))?;
        self.store.set(self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Probe {
        id: u32,
        label: String,
    }

    #[test]
    fn test_absent_key_reads_empty() {
        let store = MemoryStore::new();
        let records: RecordStore<'_, _, Probe> = RecordStore::new(&store, PROOFS_KEY);
        assert!(records.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_accumulates() {
        let store = MemoryStore::new();
        let records = RecordStore::new(&store, PAYMENTS_KEY);

        records
            .append(Probe {
                id: 1,
                label: "first".into(),
            })
            .unwrap();
        records
            .append(Probe {
                id: 2,
                label: "second".into(),
            })
            .unwrap();

        let loaded = records.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, 2);
    }

    #[test]
    fn test_corrupt_namespace_is_error() {
        let store = MemoryStore::new();
        store.set(CREDENTIALS_KEY, "not json").unwrap();
        let records: RecordStore<'_, _, Probe> = RecordStore::new(&store, CREDENTIALS_KEY);
        assert!(records.load().is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use parking_lot::RwLock;
use strata_catalog::MetaRecord;
use strata_core::interface::ObjectId;
use strata_type::internal_err;
use tracing::trace;

/// Durable directory rows kept in memory, keyed by object id.
///
/// Ids are allocated in creation order, so iterating by id replays parents before their children.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
	records: RwLock<BTreeMap<ObjectId, MetaRecord>>,
}

impl MemoryMetaStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, record: MetaRecord) -> crate::Result<()> {
		let mut records = self.records.write();
		if records.contains_key(&record.id) {
			return internal_err!("meta record {} is already stored", record.id);
		}
		trace!(id = %record.id, kind = %record.kind, name = %record.name, "meta record stored");
		records.insert(record.id, record);
		Ok(())
	}

	pub fn remove(&self, id: ObjectId) -> Option<MetaRecord> {
		let removed = self.records.write().remove(&id);
		if removed.is_some() {
			trace!(%id, "meta record removed");
		}
		removed
	}

	pub fn get(&self, id: ObjectId) -> Option<MetaRecord> {
		self.records.read().get(&id).cloned()
	}

	pub fn contains(&self, id: ObjectId) -> bool {
		self.records.read().contains_key(&id)
	}

	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}

	/// All rows in id order.
	pub fn records(&self) -> Vec<MetaRecord> {
		self.records.read().values().cloned().collect()
	}

	/// Create statements of every row, in replay order.
	pub fn script(&self) -> Vec<String> {
		self.records.read().values().filter_map(|record| record.sql.clone()).collect()
	}

	pub fn to_json(&self) -> crate::Result<String> {
		match serde_json::to_string_pretty(&self.records()) {
			Ok(json) => Ok(json),
			Err(err) => internal_err!("meta records do not serialize: {}", err),
		}
	}
}

#[cfg(test)]
mod tests {
	use strata_core::interface::ObjectKind;

	use super::*;

	fn record(id: i32, name: &str, sql: Option<&str>) -> MetaRecord {
		MetaRecord {
			id: ObjectId(id),
			kind: ObjectKind::Catalog,
			name: name.to_string(),
			parent: None,
			sql: sql.map(str::to_string),
		}
	}

	#[test]
	fn test_insert_and_remove() {
		let store = MemoryMetaStore::new();
		store.insert(record(2, "C2", Some("CREATE CATALOG C2"))).unwrap();
		store.insert(record(1, "C1", Some("CREATE CATALOG C1"))).unwrap();

		assert_eq!(store.script(), vec!["CREATE CATALOG C1", "CREATE CATALOG C2"]);
		assert!(store.remove(ObjectId(1)).is_some());
		assert!(store.remove(ObjectId(1)).is_none());
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn test_duplicate_id_is_internal_error() {
		let store = MemoryMetaStore::new();
		store.insert(record(1, "C1", None)).unwrap();

		let err = store.insert(record(1, "C1", None)).unwrap_err();
		assert_eq!(err.code, "INTERNAL_ERROR");
	}

	#[test]
	fn test_script_skips_rows_without_sql() {
		let store = MemoryMetaStore::new();
		store.insert(record(1, "C1", None)).unwrap();
		assert!(store.script().is_empty());
	}

	#[test]
	fn test_to_json() {
		let store = MemoryMetaStore::new();
		store.insert(record(1, "C1", Some("CREATE CATALOG C1"))).unwrap();

		let json = store.to_json().unwrap();
		let parsed: Vec<MetaRecord> = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, store.records());
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use parking_lot::Mutex;
use strata_core::interface::SessionId;
use tracing::{debug, error, instrument};

use crate::{Catalog, MetaStore, NamespaceObject};

/// Name to catalog directory owned by the database.
///
/// Lookups are lock free. Writers hold the metadata lock and the registry's own write lock, so a name is
/// checked and claimed atomically.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
	catalogs: SkipMap<String, Arc<Catalog>>,
	write: Mutex<()>,
}

impl CatalogRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn find(&self, name: &str) -> Option<Arc<Catalog>> {
		self.catalogs.get(name).map(|entry| entry.value().clone())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.catalogs.contains_key(name)
	}

	/// All catalogs, in name order.
	pub fn list(&self) -> Vec<Arc<Catalog>> {
		self.catalogs.iter().map(|entry| entry.value().clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.catalogs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.catalogs.is_empty()
	}

	/// Persists and registers `catalog`. A name collision here means the caller skipped its own existence check.
	#[instrument(name = "catalog::registry::add", level = "debug", skip(self, meta, catalog), fields(catalog = %catalog.name()))]
	pub fn add(&self, meta: &dyn MetaStore, session: SessionId, catalog: Arc<Catalog>) -> crate::Result<()> {
		let _meta = meta.lock_meta(session);
		let _write = self.write.lock();

		if self.catalogs.contains_key(catalog.name()) {
			let diagnostic = strata_type::internal_error!("catalog `{}` is already registered", catalog.name());
			error!(message = %diagnostic.message, "duplicate catalog reached the registry");
			return Err(diagnostic.into());
		}

		meta.add_meta(session, catalog.as_ref())?;
		self.catalogs.insert(catalog.name().to_string(), catalog);
		debug!("catalog registered");
		Ok(())
	}

	/// Unregisters `catalog`, leaving its teardown to the caller.
	#[instrument(name = "catalog::registry::remove", level = "debug", skip(self, meta, catalog), fields(catalog = %catalog.name()))]
	pub fn remove(&self, meta: &dyn MetaStore, session: SessionId, catalog: &Catalog) -> Option<Arc<Catalog>> {
		let _meta = meta.lock_meta(session);
		let _write = self.write.lock();
		self.catalogs.remove(catalog.name()).map(|entry| entry.value().clone())
	}
}

#[cfg(test)]
mod tests {
	use strata_core::interface::{ObjectId, SessionId};

	use super::*;
	use crate::test_utils::{TestMetaStore, test_catalog};

	#[test]
	fn test_add_and_find() {
		let store = TestMetaStore::new();
		let registry = CatalogRegistry::new();

		registry.add(store.as_ref(), SessionId(1), Arc::new(test_catalog(&store, 7, "C1"))).unwrap();

		assert!(registry.contains("C1"));
		assert_eq!(registry.find("C1").unwrap().id(), ObjectId(7));
		assert!(registry.find("c1").is_none());
		assert!(store.record(ObjectId(7)).is_some());
	}

	#[test]
	fn test_duplicate_name_is_internal_error() {
		let store = TestMetaStore::new();
		let registry = CatalogRegistry::new();
		registry.add(store.as_ref(), SessionId(1), Arc::new(test_catalog(&store, 7, "C1"))).unwrap();

		let err = registry.add(store.as_ref(), SessionId(1), Arc::new(test_catalog(&store, 8, "C1"))).unwrap_err();

		assert_eq!(err.code, "INTERNAL_ERROR");
		assert_eq!(registry.find("C1").unwrap().id(), ObjectId(7));
		assert!(store.record(ObjectId(8)).is_none());
	}

	#[test]
	fn test_remove() {
		let store = TestMetaStore::new();
		let registry = CatalogRegistry::new();
		let catalog = Arc::new(test_catalog(&store, 7, "C1"));
		registry.add(store.as_ref(), SessionId(1), catalog.clone()).unwrap();

		assert!(registry.remove(store.as_ref(), SessionId(1), &catalog).is_some());
		assert!(registry.remove(store.as_ref(), SessionId(1), &catalog).is_none());
		assert!(registry.is_empty());
	}

	#[test]
	fn test_list_is_name_ordered() {
		let store = TestMetaStore::new();
		let registry = CatalogRegistry::new();
		for (id, name) in [(7, "B"), (8, "A"), (9, "C")] {
			registry.add(store.as_ref(), SessionId(1), Arc::new(test_catalog(&store, id, name))).unwrap();
		}

		let names: Vec<_> = registry.list().iter().map(|catalog| catalog.name().to_string()).collect();
		assert_eq!(names, vec!["A", "B", "C"]);
	}
}

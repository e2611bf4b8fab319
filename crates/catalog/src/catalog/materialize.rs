// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, atomic::Ordering};

use tracing::{debug, warn};

use crate::{Catalog, NamespaceObject, SchemaObject, SystemView, SystemViewKind};

impl Catalog {
	/// Populates the information schema with one view per [`SystemViewKind`], exactly once per catalog.
	///
	/// The fast path is a single atomic load. Only the first callers contend on the information schema's
	/// structure lock, and whoever wins it re-checks the flag before building anything.
	pub fn materialize_system_views(&self) {
		if self.system_views_materialized.load(Ordering::Acquire) {
			return;
		}

		let _structure = self.info_schema.lock_structure();
		if self.system_views_materialized.load(Ordering::Acquire) {
			return;
		}

		let database = match self.base.database() {
			Ok(database) => database,
			Err(err) => {
				warn!(catalog = %self.base.name(), error = %err, "system views not materialized");
				return;
			}
		};
		let system_user = database.system_user();

		for kind in SystemViewKind::ALL {
			let view = SystemView::new(&database, self.info_schema.name(), &system_user, kind);
			self.info_schema.add_unpersisted(SchemaObject::SystemView(Arc::new(view)));
		}

		self.system_views_materialized.store(true, Ordering::Release);
		debug!(catalog = %self.base.name(), count = SystemViewKind::ALL.len(), "system views materialized");
	}

	pub fn is_materialized(&self) -> bool {
		self.system_views_materialized.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{Arc, Barrier},
		thread,
	};

	use crate::{SystemViewKind, test_utils::{TestMetaStore, test_catalog}};

	#[test]
	fn test_materialize_is_idempotent() {
		let store = TestMetaStore::new();
		let catalog = test_catalog(&store, 7, "C1");

		catalog.materialize_system_views();
		let first = catalog.info_schema().find("TABLES").unwrap();
		catalog.materialize_system_views();
		let second = catalog.info_schema().find("TABLES").unwrap();

		assert!(catalog.is_materialized());
		assert_eq!(catalog.info_schema().len(), SystemViewKind::ALL.len());
		assert_eq!(first.id(), second.id());
	}

	#[test]
	fn test_concurrent_materialize_happens_once() {
		let store = TestMetaStore::new();
		let catalog = Arc::new(test_catalog(&store, 7, "C1"));
		let barrier = Arc::new(Barrier::new(8));

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let catalog = catalog.clone();
				let barrier = barrier.clone();
				thread::spawn(move || {
					barrier.wait();
					let schema = catalog.find_schema("INFORMATION_SCHEMA").unwrap();
					let crate::SchemaObject::SystemView(view) = schema.find("USERS").unwrap() else {
						panic!("expected a system view");
					};
					Arc::as_ptr(&view) as usize
				})
			})
			.collect();

		let pointers: Vec<usize> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
		assert!(pointers.windows(2).all(|pair| pair[0] == pair[1]));
		assert_eq!(catalog.info_schema().len(), SystemViewKind::ALL.len());
	}
}

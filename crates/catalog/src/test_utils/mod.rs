// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeMap,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};

use parking_lot::Mutex;
use strata_core::{
	auth::User,
	interface::{IdentifierCase, ObjectId, SessionId, UserId},
	meta::MetaLock,
};
use strata_type::{error::diagnostic::transaction::database_read_only, return_error, return_internal_error};

use crate::{
	Catalog, ColumnDef, MetaRecord, MetaStore, NamespaceObject, Schema, Synonym, Table, TableToCreate, View,
};

/// In-memory [`MetaStore`] for exercising the namespace graph without a database around it.
pub struct TestMetaStore {
	lock: MetaLock,
	records: Mutex<BTreeMap<ObjectId, MetaRecord>>,
	starting: AtomicBool,
	read_only: AtomicBool,
	failing_removal: Mutex<Option<ObjectId>>,
	system_user: Arc<User>,
}

impl TestMetaStore {
	pub fn new() -> Arc<Self> {
		Arc::new(Self {
			lock: MetaLock::new(),
			records: Mutex::new(BTreeMap::new()),
			starting: AtomicBool::new(false),
			read_only: AtomicBool::new(false),
			failing_removal: Mutex::new(None),
			system_user: Arc::new(User::new(UserId(0), "DBA", true)),
		})
	}

	pub fn record(&self, id: ObjectId) -> Option<MetaRecord> {
		self.records.lock().get(&id).cloned()
	}

	pub fn records(&self) -> Vec<MetaRecord> {
		self.records.lock().values().cloned().collect()
	}

	pub fn set_starting(&self, starting: bool) {
		self.starting.store(starting, Ordering::Release);
	}

	pub fn set_read_only(&self, read_only: bool) {
		self.read_only.store(read_only, Ordering::Release);
	}

	/// Makes every later `remove_meta` of `id` fail.
	pub fn fail_removal_of(&self, id: ObjectId) {
		*self.failing_removal.lock() = Some(id);
	}
}

impl MetaStore for TestMetaStore {
	fn meta_lock(&self) -> &MetaLock {
		&self.lock
	}

	fn add_meta(&self, _session: SessionId, object: &dyn NamespaceObject) -> crate::Result<()> {
		if object.id().is_persistent() {
			self.records.lock().insert(object.id(), MetaRecord::of(object));
		}
		Ok(())
	}

	fn remove_meta(&self, _session: SessionId, id: ObjectId) -> crate::Result<()> {
		if *self.failing_removal.lock() == Some(id) {
			return_internal_error!("metadata row {} could not be removed", id);
		}
		self.records.lock().remove(&id);
		Ok(())
	}

	fn is_starting(&self) -> bool {
		self.starting.load(Ordering::Acquire)
	}

	fn check_writing_allowed(&self) -> crate::Result<()> {
		if self.read_only.load(Ordering::Acquire) {
			return_error!(database_read_only());
		}
		Ok(())
	}

	fn system_user(&self) -> Arc<User> {
		self.system_user.clone()
	}

	fn identifier_case(&self) -> IdentifierCase {
		IdentifierCase::Upper
	}
}

fn database(store: &Arc<TestMetaStore>) -> Arc<dyn MetaStore> {
	store.clone()
}

/// An opened, non-system catalog owned by the system user. Not registered anywhere.
pub fn test_catalog(store: &Arc<TestMetaStore>, id: i32, name: &str) -> Catalog {
	let catalog = Catalog::new(&database(store), ObjectId(id), name, &store.system_user, false);
	catalog.open();
	catalog
}

/// A droppable schema that claims to live in catalog 1.
pub fn test_schema(store: &Arc<TestMetaStore>, id: i32, name: &str) -> Arc<Schema> {
	Arc::new(Schema::new(&database(store), ObjectId(1), ObjectId(id), name, &store.system_user, false))
}

pub fn test_schema_in(store: &Arc<TestMetaStore>, catalog: &Catalog, id: i32, name: &str) -> Arc<Schema> {
	Arc::new(Schema::new(&database(store), catalog.id(), ObjectId(id), name, &store.system_user, false))
}

/// A table in a `PUBLIC` schema with id 0.
pub fn test_table(store: &Arc<TestMetaStore>, id: i32, name: &str, columns: Vec<ColumnDef>) -> Arc<Table> {
	Arc::new(Table::new(
		&database(store),
		crate::MAIN_SCHEMA_ID,
		crate::MAIN_SCHEMA_NAME,
		&store.system_user,
		TableToCreate {
			id: ObjectId(id),
			name: name.to_string(),
			columns,
			engine: None,
			engine_params: vec![],
		},
	))
}

pub fn test_table_in(
	store: &Arc<TestMetaStore>,
	schema: &Schema,
	id: i32,
	name: &str,
	columns: Vec<ColumnDef>,
) -> Arc<Table> {
	Arc::new(Table::new(
		&database(store),
		schema.id(),
		schema.name(),
		&store.system_user,
		TableToCreate {
			id: ObjectId(id),
			name: name.to_string(),
			columns,
			engine: None,
			engine_params: vec![],
		},
	))
}

pub fn test_view_in(store: &Arc<TestMetaStore>, schema: &Schema, id: i32, name: &str, query: &str) -> Arc<View> {
	Arc::new(View::new(&database(store), schema.id(), schema.name(), ObjectId(id), name, &store.system_user, query))
}

pub fn test_synonym_in(
	store: &Arc<TestMetaStore>,
	schema: &Schema,
	id: i32,
	name: &str,
	target_table: &str,
) -> Arc<Synonym> {
	Arc::new(Synonym::new(
		&database(store),
		schema.id(),
		schema.name(),
		ObjectId(id),
		name,
		&store.system_user,
		schema.name(),
		target_table,
	))
}

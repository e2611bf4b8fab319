// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, atomic::AtomicBool};

use crossbeam_skiplist::SkipMap;
use parking_lot::{Mutex, RwLock};
use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind, SessionId},
};
use strata_type::internal_error;
use tracing::{debug, error, instrument};

use crate::{
	INFORMATION_SCHEMA_ID, INFORMATION_SCHEMA_NAME, MAIN_SCHEMA_ID, MAIN_SCHEMA_NAME, MetaStore, NamespaceObject,
	ObjectBase, Schema, SchemaObject, SchemaObjectType, Synonym, sql::quote_identifier,
};

mod materialize;

/// A top level namespace holding schemas.
///
/// Every catalog carries two built-in schemas, the main schema and the information schema. They are built with
/// the catalog but only become visible through [`Catalog::open`].
#[derive(Debug)]
pub struct Catalog {
	base: ObjectBase,
	system: bool,
	schemas: SkipMap<String, Arc<Schema>>,
	info_schema: Arc<Schema>,
	main_schema: Arc<Schema>,
	table_engine_params: RwLock<Option<Vec<String>>>,
	system_views_materialized: AtomicBool,
	schemas_write: Mutex<()>,
}

impl Catalog {
	pub fn new(
		database: &Arc<dyn MetaStore>,
		id: ObjectId,
		name: impl Into<String>,
		owner: &Arc<User>,
		system: bool,
	) -> Self {
		let system_user = database.system_user();
		let info_schema = Arc::new(Schema::new(
			database,
			id,
			INFORMATION_SCHEMA_ID,
			database.sys_identifier(INFORMATION_SCHEMA_NAME),
			&system_user,
			true,
		));
		let main_schema = Arc::new(Schema::new(
			database,
			id,
			MAIN_SCHEMA_ID,
			database.sys_identifier(MAIN_SCHEMA_NAME),
			&system_user,
			true,
		));

		Self {
			base: ObjectBase::new(database, id, name, owner),
			system,
			schemas: SkipMap::new(),
			info_schema,
			main_schema,
			table_engine_params: RwLock::new(None),
			system_views_materialized: AtomicBool::new(false),
			schemas_write: Mutex::new(()),
		}
	}

	/// Publishes the built-in schemas. Meant to be called once, right after the catalog is registered.
	pub fn open(&self) {
		self.schemas.insert(self.main_schema.name().to_string(), self.main_schema.clone());
		self.schemas.insert(self.info_schema.name().to_string(), self.info_schema.clone());
	}

	pub fn owner(&self) -> Option<Arc<User>> {
		self.base.owner()
	}

	pub fn is_system(&self) -> bool {
		self.system
	}

	pub fn can_drop(&self) -> bool {
		!self.system
	}

	/// True when nothing in this catalog is removable, which is not the same as having no schemas.
	pub fn is_empty(&self) -> bool {
		self.schemas.is_empty() || self.schemas.iter().all(|entry| !entry.value().can_drop())
	}

	pub fn info_schema(&self) -> &Arc<Schema> {
		&self.info_schema
	}

	pub fn main_schema(&self) -> &Arc<Schema> {
		&self.main_schema
	}

	pub fn table_engine_params(&self) -> Option<Vec<String>> {
		self.table_engine_params.read().clone()
	}

	pub fn set_table_engine_params(&self, params: Option<Vec<String>>) {
		*self.table_engine_params.write() = params;
	}

	/// Every schema in the catalog, with the information schema fully populated.
	pub fn all_schemas(&self) -> Vec<Arc<Schema>> {
		self.materialize_system_views();
		self.schemas()
	}

	/// Snapshot of the schema map without touching the information schema.
	pub fn schemas(&self) -> Vec<Arc<Schema>> {
		self.schemas.iter().map(|entry| entry.value().clone()).collect()
	}

	#[instrument(name = "catalog::find_schema", level = "trace", skip(self))]
	pub fn find_schema(&self, name: &str) -> Option<Arc<Schema>> {
		let schema = self.schemas.get(name).map(|entry| entry.value().clone())?;
		if Arc::ptr_eq(&schema, &self.info_schema) {
			self.materialize_system_views();
		}
		Some(schema)
	}

	pub fn contains_schema(&self, name: &str) -> bool {
		self.schemas.contains_key(name)
	}

	/// Every object of every schema, system views included.
	pub fn all_schema_objects(&self) -> Vec<SchemaObject> {
		self.materialize_system_views();
		let mut list = Vec::new();
		for entry in self.schemas.iter() {
			entry.value().all(&mut list);
		}
		list
	}

	/// Every object of `object_type`. System views count as views, so asking for tables or views populates them.
	pub fn all_schema_objects_of(&self, object_type: SchemaObjectType) -> Vec<SchemaObject> {
		if object_type == SchemaObjectType::TableOrView {
			self.materialize_system_views();
		}
		let mut list = Vec::new();
		for entry in self.schemas.iter() {
			entry.value().all_of(object_type, &mut list);
		}
		list
	}

	/// With `include_meta` the system views are always part of the result; without it they are part of it only
	/// once something else has materialized them.
	pub fn all_tables_and_views(&self, include_meta: bool) -> Vec<SchemaObject> {
		if include_meta {
			self.materialize_system_views();
		}
		self.schemas.iter().flat_map(|entry| entry.value().all_tables_and_views()).collect()
	}

	pub fn all_synonyms(&self) -> Vec<Arc<Synonym>> {
		self.schemas.iter().flat_map(|entry| entry.value().all_synonyms()).collect()
	}

	/// Tables or views called `name`, at most one per schema.
	pub fn tables_or_views_by_name(&self, name: &str) -> Vec<SchemaObject> {
		let mut list = Vec::with_capacity(1);
		for entry in self.schemas.iter() {
			if let Some(object) = entry.value().find_table_or_view(name) {
				list.push(object);
			}
		}
		list
	}

	/// Registers a schema.
	///
	/// Callers check for a conflicting name before getting here; a collision is an internal error.
	#[instrument(name = "catalog::add_schema", level = "debug", skip(self, schema), fields(catalog = %self.base.name(), schema = %schema.name()))]
	pub fn add_schema(&self, session: SessionId, schema: Arc<Schema>) -> crate::Result<()> {
		let database = self.base.database()?;
		if schema.id().is_persistent() && !database.is_starting() {
			database.check_writing_allowed()?;
		}

		let _meta = database.lock_meta(session);
		let _write = self.schemas_write.lock();

		if self.schemas.contains_key(schema.name()) {
			let diagnostic = internal_error!(
				"schema `{}` already exists in catalog `{}`",
				schema.name(),
				self.base.name()
			);
			error!(message = %diagnostic.message, "duplicate schema reached the catalog");
			return Err(diagnostic.into());
		}

		database.add_meta(session, schema.as_ref())?;
		self.schemas.insert(schema.name().to_string(), schema);
		Ok(())
	}

	/// Tears down and unregisters one schema. Returns `None` when no schema has that name.
	#[instrument(name = "catalog::remove_schema", level = "debug", skip(self), fields(catalog = %self.base.name()))]
	pub fn remove_schema(&self, session: SessionId, name: &str) -> crate::Result<Option<Arc<Schema>>> {
		let database = self.base.database()?;
		let _meta = database.lock_meta(session);
		let _write = self.schemas_write.lock();

		let Some(schema) = self.schemas.get(name).map(|entry| entry.value().clone()) else {
			return Ok(None);
		};

		schema.remove_children_and_resources(session)?;
		self.schemas.remove(name);
		debug!(schema = %name, "schema removed");
		Ok(Some(schema))
	}

	/// Cascades into every schema and then drops this catalog's own metadata row. Does nothing for a catalog that
	/// can not be dropped.
	#[instrument(name = "catalog::remove_children_and_resources", level = "debug", skip(self), fields(catalog = %self.base.name()))]
	pub fn remove_children_and_resources(&self, session: SessionId) -> crate::Result<()> {
		if !self.can_drop() {
			return Ok(());
		}

		let database = self.base.database()?;
		let _meta = database.lock_meta(session);
		let _write = self.schemas_write.lock();

		// a failed teardown leaves only the schemas it has not reached yet
		let schemas: Vec<Arc<Schema>> = self.schemas.iter().map(|entry| entry.value().clone()).collect();
		for schema in schemas {
			schema.set_can_drop(true);
			schema.remove_children_and_resources(session)?;
			self.schemas.remove(schema.name());
		}

		if self.base.id().is_persistent() {
			database.remove_meta(session, self.base.id())?;
		}
		debug!("catalog torn down");
		Ok(())
	}
}

impl NamespaceObject for Catalog {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::Catalog
	}

	fn create_sql(&self) -> Option<String> {
		if self.system {
			return None;
		}
		let owner = self.base.owner()?;
		Some(format!(
			"CREATE CATALOG IF NOT EXISTS {} AUTHORIZATION {}",
			quote_identifier(self.base.name()),
			quote_identifier(owner.name())
		))
	}

	fn drop_sql(&self) -> Option<String> {
		Some(format!("DROP CATALOG IF EXISTS {} CASCADE", quote_identifier(self.base.name())))
	}
}

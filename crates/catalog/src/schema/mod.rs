// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use crossbeam_skiplist::SkipMap;
use parking_lot::{Mutex, MutexGuard};
use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind, SessionId},
};
use strata_type::return_internal_error;
use tracing::{debug, instrument, trace};

use crate::{
	CatalogError, INFORMATION_SCHEMA_ID, MetaStore, NamespaceObject, ObjectBase,
	schema::object::{SchemaObject, SchemaObjectType},
	sql::quote_identifier,
};

pub mod object;
pub mod synonym;
pub mod table;
pub mod view;

/// A named container of schema objects inside one catalog.
///
/// Reads go straight to the lock free object map. Writers serialize on the schema's structure lock (and, for
/// persisted objects, on the database metadata lock) so check-then-insert stays atomic.
#[derive(Debug)]
pub struct Schema {
	base: ObjectBase,
	catalog: ObjectId,
	system: bool,
	can_drop: AtomicBool,
	objects: SkipMap<String, SchemaObject>,
	structure: Mutex<()>,
}

impl Schema {
	/// `system` schemas start out non-droppable and reconstruct to no SQL. Only the information schema refuses
	/// persisted objects.
	pub fn new(
		database: &Arc<dyn MetaStore>,
		catalog: ObjectId,
		id: ObjectId,
		name: impl Into<String>,
		owner: &Arc<User>,
		system: bool,
	) -> Self {
		Self {
			base: ObjectBase::new(database, id, name, owner),
			catalog,
			system,
			can_drop: AtomicBool::new(!system),
			objects: SkipMap::new(),
			structure: Mutex::new(()),
		}
	}

	/// Id of the owning catalog.
	pub fn catalog_id(&self) -> ObjectId {
		self.catalog
	}

	pub fn owner(&self) -> Option<Arc<User>> {
		self.base.owner()
	}

	pub fn is_system(&self) -> bool {
		self.system
	}

	pub fn can_drop(&self) -> bool {
		self.can_drop.load(Ordering::Acquire)
	}

	pub fn set_can_drop(&self, can_drop: bool) {
		self.can_drop.store(can_drop, Ordering::Release);
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// Exclusive lock over this schema's structure, independent of the metadata lock.
	pub fn lock_structure(&self) -> MutexGuard<'_, ()> {
		self.structure.lock()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.objects.contains_key(name)
	}

	pub fn find(&self, name: &str) -> Option<SchemaObject> {
		self.objects.get(name).map(|entry| entry.value().clone())
	}

	pub fn find_table_or_view(&self, name: &str) -> Option<SchemaObject> {
		self.find(name).filter(|object| object.is_table_or_view())
	}

	/// Adds a persisted object.
	///
	/// The caller has already checked for a name conflict; hitting one here means two writers raced past that
	/// check, which is a defect rather than a user error.
	#[instrument(name = "catalog::schema::add", level = "debug", skip(self, object), fields(schema = %self.base.name(), object = %object.name()))]
	pub fn add(&self, session: SessionId, object: SchemaObject) -> crate::Result<()> {
		if self.base.id() == INFORMATION_SCHEMA_ID {
			return Err(CatalogError::ReadOnlySchema {
				name: self.base.name().to_string(),
			}
			.into());
		}

		let database = self.base.database()?;
		if object.id().is_persistent() && !database.is_starting() {
			database.check_writing_allowed()?;
		}

		let _meta = database.lock_meta(session);
		let _structure = self.structure.lock();

		if self.objects.contains_key(object.name()) {
			return_internal_error!(
				"{} `{}` already exists in schema `{}`",
				object.kind(),
				object.name(),
				self.base.name()
			);
		}

		database.add_meta(session, object.as_object())?;
		self.objects.insert(object.name().to_string(), object);
		Ok(())
	}

	/// Adds an object that is never persisted. Caller holds the structure lock.
	pub(crate) fn add_unpersisted(&self, object: SchemaObject) {
		self.objects.insert(object.name().to_string(), object);
	}

	#[instrument(name = "catalog::schema::remove", level = "debug", skip(self), fields(schema = %self.base.name()))]
	pub fn remove(&self, session: SessionId, name: &str) -> crate::Result<SchemaObject> {
		let database = self.base.database()?;
		let _meta = database.lock_meta(session);
		let _structure = self.structure.lock();

		let Some(object) = self.objects.get(name).map(|entry| entry.value().clone()) else {
			return Err(CatalogError::NotFound {
				kind: ObjectKind::Table,
				name: name.to_string(),
			}
			.into());
		};

		Self::release(&*database, session, &object)?;
		self.objects.remove(name);
		Ok(object)
	}

	fn release(database: &dyn MetaStore, session: SessionId, object: &SchemaObject) -> crate::Result<()> {
		if let SchemaObject::Table(table) = object {
			table.truncate();
		}
		if object.id().is_persistent() {
			database.remove_meta(session, object.id())?;
		}
		Ok(())
	}

	/// Appends every object to `list`, in name order.
	pub fn all(&self, list: &mut Vec<SchemaObject>) {
		list.extend(self.objects.iter().map(|entry| entry.value().clone()));
	}

	pub fn all_of(&self, object_type: SchemaObjectType, list: &mut Vec<SchemaObject>) {
		list.extend(
			self.objects
				.iter()
				.map(|entry| entry.value().clone())
				.filter(|object| object.object_type() == object_type),
		);
	}

	pub fn all_tables_and_views(&self) -> Vec<SchemaObject> {
		let mut result = Vec::new();
		self.all_of(SchemaObjectType::TableOrView, &mut result);
		result
	}

	pub fn all_synonyms(&self) -> Vec<Arc<crate::Synonym>> {
		self.objects.iter().filter_map(|entry| entry.value().as_synonym().cloned()).collect()
	}

	/// Releases every contained object and then this schema's own metadata row.
	#[instrument(name = "catalog::schema::remove_children_and_resources", level = "debug", skip(self), fields(schema = %self.base.name()))]
	pub fn remove_children_and_resources(&self, session: SessionId) -> crate::Result<()> {
		let database = self.base.database()?;
		let _meta = database.lock_meta(session);
		let _structure = self.structure.lock();

		let mut objects = Vec::with_capacity(self.objects.len());
		self.all(&mut objects);
		objects.sort_by_key(|object| object.drop_rank());

		for object in &objects {
			trace!(object = %object.name(), kind = %object.kind(), "releasing schema object");
			Self::release(&*database, session, object)?;
			self.objects.remove(object.name());
		}

		if self.base.id().is_persistent() {
			database.remove_meta(session, self.base.id())?;
		}
		debug!(released = objects.len(), "schema torn down");
		Ok(())
	}
}

impl NamespaceObject for Schema {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::Schema
	}

	fn parent(&self) -> Option<ObjectId> {
		Some(self.catalog)
	}

	fn create_sql(&self) -> Option<String> {
		if self.system {
			return None;
		}
		let owner = self.base.owner()?;
		Some(format!(
			"CREATE SCHEMA IF NOT EXISTS {} AUTHORIZATION {}",
			quote_identifier(self.base.name()),
			quote_identifier(owner.name())
		))
	}

	fn drop_sql(&self) -> Option<String> {
		Some(format!("DROP SCHEMA IF EXISTS {} CASCADE", quote_identifier(self.base.name())))
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

use strata_catalog::{Catalog, CatalogError, MetaStore, NamespaceObject, Schema, SchemaObject};
use strata_core::{
	auth::User,
	interface::{ObjectKind, SessionId},
	meta::MetaLockGuard,
};
use strata_type::Value;
use tracing::{debug, instrument, trace};

use crate::{
	Command, Database, ObjectName,
	command::{
		create_catalog, create_schema, create_synonym, create_table, create_view, drop_catalog, drop_schema, insert,
	},
};

/// One user's connection to a database.
///
/// DML opens an implicit transaction that stays open until [`Session::commit`]. DDL always commits it first.
pub struct Session {
	id: SessionId,
	user: Arc<User>,
	database: Arc<Database>,
	in_transaction: Arc<AtomicBool>,
}

impl Session {
	pub(crate) fn new(database: Arc<Database>, user: Arc<User>) -> Self {
		let in_transaction = Arc::new(AtomicBool::new(false));
		let id = database.register_session(&user, in_transaction.clone());
		trace!(%id, user = %user.name(), "session opened");
		Self {
			id,
			user,
			database,
			in_transaction,
		}
	}

	pub fn id(&self) -> SessionId {
		self.id
	}

	pub fn user(&self) -> &Arc<User> {
		&self.user
	}

	pub fn database(&self) -> &Arc<Database> {
		&self.database
	}

	pub fn in_transaction(&self) -> bool {
		self.in_transaction.load(Ordering::Acquire)
	}

	pub(crate) fn begin(&self) {
		self.in_transaction.store(true, Ordering::Release);
	}

	pub fn commit(&self) {
		if self.in_transaction.swap(false, Ordering::AcqRel) {
			debug!(session = %self.id, "transaction committed");
		}
	}

	/// Takes the metadata lock on behalf of this session. Nested acquisitions by the same session do not block.
	pub(crate) fn lock_meta(&self) -> MetaLockGuard<'_> {
		self.database.lock_meta(self.id)
	}

	/// Runs one command and returns the number of affected rows.
	#[instrument(name = "engine::session::execute", level = "debug", skip(self, command), fields(session = %self.id))]
	pub fn execute(&self, command: Command) -> crate::Result<u64> {
		match command {
			Command::CreateCatalog(plan) => create_catalog::create_catalog(self, plan),
			Command::DropCatalog(plan) => drop_catalog::drop_catalog(self, plan),
			Command::CreateSchema(plan) => create_schema::create_schema(self, plan),
			Command::DropSchema(plan) => drop_schema::drop_schema(self, plan),
			Command::CreateTable(plan) => create_table::create_table(self, plan),
			Command::CreateView(plan) => create_view::create_view(self, plan),
			Command::CreateSynonym(plan) => create_synonym::create_synonym(self, plan),
			Command::Insert(plan) => insert::insert(self, plan),
		}
	}

	pub(crate) fn resolve_catalog(&self, name: Option<&str>) -> crate::Result<Arc<Catalog>> {
		match name {
			Some(name) => self.database.get_catalog(name),
			None => self.database.default_catalog(),
		}
	}

	/// Resolves `[catalog.]schema`, defaulting to the main schema of the default catalog.
	pub fn resolve_schema(
		&self,
		catalog: Option<&str>,
		schema: Option<&str>,
	) -> crate::Result<(Arc<Catalog>, Arc<Schema>)> {
		let catalog = self.resolve_catalog(catalog)?;
		let found = match schema {
			Some(name) => catalog.find_schema(name),
			None => Some(catalog.main_schema().clone()),
		};
		match found {
			Some(schema) => Ok((catalog, schema)),
			None => Err(CatalogError::NotFound {
				kind: ObjectKind::Schema,
				name: schema.unwrap_or_default().to_string(),
			}
			.into()),
		}
	}

	/// Finds a table or view, following synonyms. Lookups never take the metadata lock.
	#[instrument(name = "engine::session::resolve_table", level = "trace", skip(self), fields(table = %name))]
	pub fn resolve_table(&self, name: &ObjectName) -> crate::Result<(Arc<Catalog>, SchemaObject)> {
		let (catalog, schema) = self.resolve_schema(name.catalog.as_deref(), name.schema.as_deref())?;

		match schema.find(&name.name) {
			Some(SchemaObject::Synonym(synonym)) => {
				let target = ObjectName::with_catalog(
					catalog.name(),
					synonym.target_schema(),
					synonym.target_table(),
				);
				let (_, target_schema) =
					self.resolve_schema(target.catalog.as_deref(), target.schema.as_deref())?;
				match target_schema.find_table_or_view(&target.name) {
					Some(object) => Ok((catalog, object)),
					None => Err(table_not_found(&target)),
				}
			}
			Some(object) => Ok((catalog, object)),
			None => Err(table_not_found(name)),
		}
	}

	/// Reads every row of a base table or system view.
	pub fn scan(&self, name: &ObjectName) -> crate::Result<Vec<Vec<Value>>> {
		let (catalog, object) = self.resolve_table(name)?;
		match object {
			SchemaObject::Table(table) => Ok(table.scan()),
			SchemaObject::SystemView(view) => Ok(self.database.system_rows(&view, &catalog)),
			other => Err(CatalogError::NotATable {
				kind: other.kind(),
				name: other.name().to_string(),
			}
			.into()),
		}
	}
}

fn table_not_found(name: &ObjectName) -> strata_type::Error {
	CatalogError::NotFound {
		kind: ObjectKind::Table,
		name: name.to_string(),
	}
	.into()
}

impl Drop for Session {
	fn drop(&mut self) {
		self.database.unregister_session(self.id);
		trace!(id = %self.id, "session closed");
	}
}

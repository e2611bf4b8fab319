// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::{CatalogError, ColumnDef, MetaStore, NamespaceObject, SchemaObject, Table, TableToCreate};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument};

use crate::{ObjectName, Session};

/// `CREATE TABLE [IF NOT EXISTS] [[catalog.]schema.]name (column type, ...) [ENGINE engine] [WITH param, ...]`
#[derive(Debug, Clone)]
pub struct CreateTable {
	pub table: ObjectName,
	pub if_not_exists: bool,
	pub columns: Vec<ColumnDef>,
	pub engine: Option<String>,
	/// Inherited from the catalog when neither an engine nor parameters are given.
	pub engine_params: Option<Vec<String>>,
}

impl CreateTable {
	pub fn new(table: ObjectName, columns: Vec<ColumnDef>) -> Self {
		Self {
			table,
			if_not_exists: false,
			columns,
			engine: None,
			engine_params: None,
		}
	}

	pub fn if_not_exists(mut self) -> Self {
		self.if_not_exists = true;
		self
	}

	pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
		self.engine = Some(engine.into());
		self
	}

	pub fn with_engine_params(mut self, params: Vec<String>) -> Self {
		self.engine_params = Some(params);
		self
	}
}

#[instrument(name = "engine::command::create_table", level = "debug", skip(session, plan), fields(table = %plan.table))]
pub(crate) fn create_table(session: &Session, plan: CreateTable) -> crate::Result<u64> {
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();
	let (catalog, schema) = session.resolve_schema(plan.table.catalog.as_deref(), plan.table.schema.as_deref())?;
	match schema.owner() {
		Some(owner) => session.user().check_owner_or_schema_admin(owner.id())?,
		None => session.user().check_schema_admin()?,
	}

	if schema.contains(&plan.table.name) {
		if plan.if_not_exists {
			return Ok(0);
		}
		return Err(CatalogError::AlreadyExists {
			kind: ObjectKind::Table,
			name: plan.table.to_string(),
		}
		.into());
	}

	let engine_params = match (&plan.engine, plan.engine_params) {
		(_, Some(params)) => params,
		(None, None) => catalog.table_engine_params().unwrap_or_default(),
		(Some(_), None) => vec![],
	};

	let meta: Arc<dyn MetaStore> = database.clone();
	let table = Arc::new(Table::new(
		&meta,
		schema.id(),
		schema.name(),
		session.user(),
		TableToCreate {
			id: database.allocate_object_id(),
			name: plan.table.name,
			columns: plan.columns,
			engine: plan.engine,
			engine_params,
		},
	));
	schema.add(session.id(), SchemaObject::Table(table.clone()))?;

	debug!(id = %table.id(), "table created");
	Ok(0)
}

#[cfg(test)]
mod tests {
	use strata_type::Type;

	use super::*;
	use crate::{
		Command, CreateCatalog,
		test_utils::{create_test_database, create_test_schema, create_test_session, create_test_session_for},
	};

	fn varchar(name: &str) -> Vec<ColumnDef> {
		vec![ColumnDef::new(name, Type::Utf8)]
	}

	#[test]
	fn test_create_table_in_default_schema() {
		let session = create_test_session();

		session.execute(Command::CreateTable(CreateTable::new(ObjectName::new("table1"), varchar("c")))).unwrap();

		let (_, object) = session.resolve_table(&ObjectName::new("table1")).unwrap();
		let table = object.as_table().unwrap();
		assert_eq!(table.schema_name(), "PUBLIC");
		assert_eq!(
			session.database().script(),
			vec!["CREATE TABLE \"PUBLIC\".\"table1\"(\"c\" VARCHAR)".to_string()]
		);
	}

	#[test]
	fn test_create_existing_table() {
		let session = create_test_session();
		let plan = CreateTable::new(ObjectName::new("table1"), varchar("c"));
		session.execute(Command::CreateTable(plan.clone())).unwrap();

		assert_eq!(session.execute(Command::CreateTable(plan.clone().if_not_exists())).unwrap(), 0);
		let err = session.execute(Command::CreateTable(plan)).unwrap_err();
		assert_eq!(err.code, "CA_001");
	}

	#[test]
	fn test_table_inherits_catalog_engine_params() {
		let session = create_test_session();
		session.execute(Command::CreateCatalog(
			CreateCatalog::new("C1").with_table_engine_params(vec!["compress".to_string()]),
		))
		.unwrap();
		create_test_schema(&session, Some("C1"), "S1");

		let inherited = ObjectName::with_catalog("C1", "S1", "T1");
		session.execute(Command::CreateTable(CreateTable::new(inherited.clone(), varchar("a")))).unwrap();
		let explicit = ObjectName::with_catalog("C1", "S1", "T2");
		session.execute(Command::CreateTable(CreateTable::new(explicit.clone(), varchar("a")).with_engine("heap")))
			.unwrap();

		let (_, object) = session.resolve_table(&inherited).unwrap();
		assert_eq!(object.as_table().unwrap().engine_params(), ["compress".to_string()]);
		let (_, object) = session.resolve_table(&explicit).unwrap();
		assert!(object.as_table().unwrap().engine_params().is_empty());
	}

	#[test]
	fn test_create_table_in_information_schema_fails() {
		let session = create_test_session();
		let name = ObjectName::with_schema("INFORMATION_SCHEMA", "T1");

		let err = session.execute(Command::CreateTable(CreateTable::new(name, varchar("a")))).unwrap_err();
		assert_eq!(err.code, "CA_005");
	}

	#[test]
	fn test_create_table_requires_ownership_or_schema_admin() {
		let database = create_test_database();
		let admin = database.connect("DBA").unwrap();
		create_test_schema(&admin, None, "S1");

		let session = create_test_session_for(&database, "ALICE", &[]);
		let name = ObjectName::with_schema("S1", "T1");
		let err = session.execute(Command::CreateTable(CreateTable::new(name, varchar("a")))).unwrap_err();
		assert_eq!(err.code, "AUTH_001");
	}
}

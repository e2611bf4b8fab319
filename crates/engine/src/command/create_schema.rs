// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::{CatalogError, MetaStore, NamespaceObject, Schema};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument};

use crate::Session;

/// `CREATE SCHEMA [IF NOT EXISTS] [catalog.]name [AUTHORIZATION user]`
#[derive(Debug, Clone)]
pub struct CreateSchema {
	/// Default catalog when absent.
	pub catalog_name: Option<String>,
	pub schema_name: String,
	pub if_not_exists: bool,
	pub authorization: Option<String>,
}

impl CreateSchema {
	pub fn new(schema_name: impl Into<String>) -> Self {
		Self {
			catalog_name: None,
			schema_name: schema_name.into(),
			if_not_exists: false,
			authorization: None,
		}
	}

	pub fn in_catalog(mut self, catalog_name: impl Into<String>) -> Self {
		self.catalog_name = Some(catalog_name.into());
		self
	}

	pub fn if_not_exists(mut self) -> Self {
		self.if_not_exists = true;
		self
	}

	pub fn with_authorization(mut self, user: impl Into<String>) -> Self {
		self.authorization = Some(user.into());
		self
	}
}

#[instrument(name = "engine::command::create_schema", level = "debug", skip(session, plan), fields(schema = %plan.schema_name))]
pub(crate) fn create_schema(session: &Session, plan: CreateSchema) -> crate::Result<u64> {
	session.user().check_schema_admin()?;
	session.commit();

	let database = session.database();
	let owner = match &plan.authorization {
		Some(name) => database.get_user(name)?,
		None => session.user().clone(),
	};
	if !database.is_starting() {
		owner.check_schema_admin()?;
	}

	let _meta = session.lock_meta();
	let catalog = session.resolve_catalog(plan.catalog_name.as_deref())?;

	if catalog.contains_schema(&plan.schema_name) {
		if plan.if_not_exists {
			return Ok(0);
		}
		return Err(CatalogError::AlreadyExists {
			kind: ObjectKind::Schema,
			name: plan.schema_name,
		}
		.into());
	}

	let meta: Arc<dyn MetaStore> = database.clone();
	let schema = Arc::new(Schema::new(
		&meta,
		catalog.id(),
		database.allocate_object_id(),
		plan.schema_name,
		&owner,
		false,
	));
	catalog.add_schema(session.id(), schema.clone())?;

	debug!(catalog = %catalog.name(), id = %schema.id(), "schema created");
	Ok(0)
}

#[cfg(test)]
mod tests {
	use strata_core::auth::Capability;

	use super::*;
	use crate::{
		Command, CreateCatalog,
		test_utils::{create_test_database, create_test_session, create_test_session_for},
	};

	#[test]
	fn test_create_schema_in_default_catalog() {
		let session = create_test_session();

		session.execute(Command::CreateSchema(CreateSchema::new("dbo"))).unwrap();

		let catalog = session.database().default_catalog().unwrap();
		let schema = catalog.find_schema("dbo").unwrap();
		assert!(schema.can_drop());
		assert!(!catalog.is_empty());
		assert_eq!(
			session.database().script(),
			vec!["CREATE SCHEMA IF NOT EXISTS \"dbo\" AUTHORIZATION \"DBA\"".to_string()]
		);
	}

	#[test]
	fn test_create_schema_in_named_catalog() {
		let session = create_test_session();
		session.execute(Command::CreateCatalog(CreateCatalog::new("catalog1"))).unwrap();

		session.execute(Command::CreateSchema(CreateSchema::new("dbo").in_catalog("catalog1"))).unwrap();

		assert!(session.database().find_catalog("catalog1").unwrap().contains_schema("dbo"));
		assert!(!session.database().default_catalog().unwrap().contains_schema("dbo"));
	}

	#[test]
	fn test_create_existing_schema() {
		let session = create_test_session();
		session.execute(Command::CreateSchema(CreateSchema::new("dbo"))).unwrap();

		assert_eq!(session.execute(Command::CreateSchema(CreateSchema::new("dbo").if_not_exists())).unwrap(), 0);

		let err = session.execute(Command::CreateSchema(CreateSchema::new("dbo"))).unwrap_err();
		assert_eq!(err.code, "CA_001");

		let err = session.execute(Command::CreateSchema(CreateSchema::new("PUBLIC"))).unwrap_err();
		assert_eq!(err.code, "CA_001");
	}

	#[test]
	fn test_create_schema_in_missing_catalog() {
		let session = create_test_session();
		let err = session.execute(Command::CreateSchema(CreateSchema::new("dbo").in_catalog("NOPE"))).unwrap_err();
		assert_eq!(err.code, "CA_002");
	}

	#[test]
	fn test_create_schema_requires_schema_admin() {
		let database = create_test_database();
		let session = create_test_session_for(&database, "ALICE", &[]);

		let err = session.execute(Command::CreateSchema(CreateSchema::new("dbo"))).unwrap_err();
		assert_eq!(err.code, "AUTH_001");

		let session = create_test_session_for(&database, "ALICE", &[Capability::SchemaAdmin]);
		session.execute(Command::CreateSchema(CreateSchema::new("dbo"))).unwrap();
		let schema = database.default_catalog().unwrap().find_schema("dbo").unwrap();
		assert_eq!(schema.owner().unwrap().name(), "ALICE");
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::{Catalog, CatalogError, MetaStore, NamespaceObject};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument};

use crate::Session;

/// `CREATE CATALOG [IF NOT EXISTS] name [AUTHORIZATION user] [WITH param, ...]`
#[derive(Debug, Clone)]
pub struct CreateCatalog {
	pub catalog_name: String,
	pub if_not_exists: bool,
	/// Owner of the new catalog; the invoking user when absent.
	pub authorization: Option<String>,
	/// Engine parameters inherited by tables created without an explicit engine.
	pub table_engine_params: Option<Vec<String>>,
}

impl CreateCatalog {
	pub fn new(catalog_name: impl Into<String>) -> Self {
		Self {
			catalog_name: catalog_name.into(),
			if_not_exists: false,
			authorization: None,
			table_engine_params: None,
		}
	}

	pub fn if_not_exists(mut self) -> Self {
		self.if_not_exists = true;
		self
	}

	pub fn with_authorization(mut self, user: impl Into<String>) -> Self {
		self.authorization = Some(user.into());
		self
	}

	pub fn with_table_engine_params(mut self, params: Vec<String>) -> Self {
		self.table_engine_params = Some(params);
		self
	}
}

#[instrument(name = "engine::command::create_catalog", level = "debug", skip(session, plan), fields(catalog = %plan.catalog_name))]
pub(crate) fn create_catalog(session: &Session, plan: CreateCatalog) -> crate::Result<u64> {
	session.user().check_catalog_admin()?;
	session.commit();

	let database = session.database();
	let owner = match &plan.authorization {
		Some(name) => database.get_user(name)?,
		None => session.user().clone(),
	};
	// permission metadata is not loaded while starting
	if !database.is_starting() {
		owner.check_catalog_admin()?;
	}

	let _meta = session.lock_meta();

	if database.find_catalog(&plan.catalog_name).is_some() {
		if plan.if_not_exists {
			return Ok(0);
		}
		return Err(CatalogError::AlreadyExists {
			kind: ObjectKind::Catalog,
			name: plan.catalog_name,
		}
		.into());
	}
	database.check_writing_allowed()?;

	let meta: Arc<dyn MetaStore> = database.clone();
	let catalog =
		Arc::new(Catalog::new(&meta, database.allocate_object_id(), plan.catalog_name, &owner, false));
	catalog.set_table_engine_params(plan.table_engine_params);

	database.catalogs().add(database.as_ref(), session.id(), catalog.clone())?;
	catalog.open();

	debug!(id = %catalog.id(), owner = %owner.name(), "catalog created");
	Ok(0)
}

#[cfg(test)]
mod tests {
	use strata_core::auth::Capability;

	use super::*;
	use crate::{
		Command, Database, DatabaseConfig,
		test_utils::{create_test_database, create_test_session, create_test_session_for},
	};

	#[test]
	fn test_create_catalog() {
		let session = create_test_session();

		let affected = session.execute(Command::CreateCatalog(CreateCatalog::new("catalog1"))).unwrap();
		assert_eq!(affected, 0);

		let catalog = session.database().find_catalog("catalog1").unwrap();
		assert!(catalog.id().is_persistent());
		assert!(catalog.can_drop());
		assert!(catalog.is_empty());
		assert!(catalog.contains_schema("PUBLIC"));
		assert_eq!(catalog.owner().unwrap().name(), "DBA");
		assert_eq!(
			session.database().script(),
			vec!["CREATE CATALOG IF NOT EXISTS \"catalog1\" AUTHORIZATION \"DBA\"".to_string()]
		);
	}

	#[test]
	fn test_create_existing_catalog() {
		let session = create_test_session();
		session.execute(Command::CreateCatalog(
			CreateCatalog::new("catalog1").with_table_engine_params(vec!["p1".to_string()]),
		))
		.unwrap();
		let before = session.database().find_catalog("catalog1").unwrap();

		let affected = session
			.execute(Command::CreateCatalog(
				CreateCatalog::new("catalog1")
					.if_not_exists()
					.with_table_engine_params(vec!["p2".to_string()]),
			))
			.unwrap();
		assert_eq!(affected, 0);

		let after = session.database().find_catalog("catalog1").unwrap();
		assert!(Arc::ptr_eq(&before, &after));
		assert_eq!(after.table_engine_params(), Some(vec!["p1".to_string()]));

		let err = session.execute(Command::CreateCatalog(CreateCatalog::new("catalog1"))).unwrap_err();
		assert_eq!(err.code, "CA_001");
		assert!(err.message.contains("catalog1"));
	}

	#[test]
	fn test_create_catalog_with_authorization() {
		let database = create_test_database();
		database.create_user("ALICE", false).unwrap().grant(Capability::CatalogAdmin);
		let session = database.connect("DBA").unwrap();

		session.execute(Command::CreateCatalog(CreateCatalog::new("C1").with_authorization("ALICE"))).unwrap();

		assert_eq!(database.find_catalog("C1").unwrap().owner().unwrap().name(), "ALICE");
	}

	#[test]
	fn test_authorization_user_needs_catalog_admin() {
		let database = create_test_database();
		database.create_user("BOB", false).unwrap().grant(Capability::SchemaAdmin);
		let session = database.connect("DBA").unwrap();

		let err = session
			.execute(Command::CreateCatalog(CreateCatalog::new("C1").with_authorization("BOB")))
			.unwrap_err();
		assert_eq!(err.code, "AUTH_001");
		assert!(database.find_catalog("C1").is_none());

		let err = session
			.execute(Command::CreateCatalog(CreateCatalog::new("C1").with_authorization("NOBODY")))
			.unwrap_err();
		assert_eq!(err.code, "AUTH_002");
	}

	#[test]
	fn test_invoker_needs_catalog_admin() {
		let database = create_test_database();
		let schema_admin = create_test_session_for(&database, "CAROL", &[Capability::SchemaAdmin]);

		let err = schema_admin.execute(Command::CreateCatalog(CreateCatalog::new("C1"))).unwrap_err();
		assert_eq!(err.code, "AUTH_001");

		let catalog_admin = create_test_session_for(&database, "DAVE", &[Capability::CatalogAdmin]);
		catalog_admin.execute(Command::CreateCatalog(CreateCatalog::new("C1"))).unwrap();
		assert!(database.find_catalog("C1").is_some());
	}

	#[test]
	fn test_create_commits_open_transaction() {
		let session = create_test_session();
		session.begin();

		session.execute(Command::CreateCatalog(CreateCatalog::new("C1"))).unwrap();
		assert!(!session.in_transaction());
	}

	#[test]
	fn test_read_only_database() {
		let database = Database::open(DatabaseConfig::new().with_read_only(true)).unwrap();
		let session = database.connect("DBA").unwrap();

		let err = session.execute(Command::CreateCatalog(CreateCatalog::new("C1"))).unwrap_err();
		assert_eq!(err.code, "TXN_001");
		assert_eq!(database.catalogs().len(), 1);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{Catalog, CatalogError, NamespaceObject};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument, warn};

use crate::{DropAction, Session};

/// The two statements that drop catalogs.
///
/// They deliberately do not share semantics: only `Named` honours RESTRICT and reports what blocks the drop.
#[derive(Debug, Clone)]
pub enum DropCatalog {
	/// `DROP CATALOG [IF EXISTS] name [RESTRICT | CASCADE]`
	Named {
		catalog_name: String,
		if_exists: bool,
		/// Falls back to the database's configured default when absent.
		drop_action: Option<DropAction>,
	},
	/// The catalog step of `DROP ALL OBJECTS`.
	///
	/// Always cascades once the target passes the protection check. Session local temporary tables are not
	/// removed by this path.
	All {
		catalog_name: String,
		if_exists: bool,
	},
}

impl DropCatalog {
	pub fn named(catalog_name: impl Into<String>) -> Self {
		DropCatalog::Named {
			catalog_name: catalog_name.into(),
			if_exists: false,
			drop_action: None,
		}
	}

	pub fn all(catalog_name: impl Into<String>) -> Self {
		DropCatalog::All {
			catalog_name: catalog_name.into(),
			if_exists: false,
		}
	}

	pub fn if_exists(mut self) -> Self {
		match &mut self {
			DropCatalog::Named {
				if_exists,
				..
			}
			| DropCatalog::All {
				if_exists,
				..
			} => *if_exists = true,
		}
		self
	}

	/// Ignored by the `All` form.
	pub fn with_drop_action(mut self, action: DropAction) -> Self {
		if let DropCatalog::Named {
			drop_action,
			..
		} = &mut self
		{
			*drop_action = Some(action);
		}
		self
	}

	pub fn catalog_name(&self) -> &str {
		match self {
			DropCatalog::Named {
				catalog_name,
				..
			}
			| DropCatalog::All {
				catalog_name,
				..
			} => catalog_name,
		}
	}
}

pub(crate) fn drop_catalog(session: &Session, plan: DropCatalog) -> crate::Result<u64> {
	match plan {
		DropCatalog::Named {
			catalog_name,
			if_exists,
			drop_action,
		} => drop_named(session, catalog_name, if_exists, drop_action),
		DropCatalog::All {
			catalog_name,
			if_exists,
		} => drop_all(session, catalog_name, if_exists),
	}
}

#[instrument(name = "engine::command::drop_catalog", level = "debug", skip(session))]
fn drop_named(
	session: &Session,
	catalog_name: String,
	if_exists: bool,
	drop_action: Option<DropAction>,
) -> crate::Result<u64> {
	session.user().check_admin()?;
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();

	let Some(catalog) = database.find_catalog(&catalog_name) else {
		if if_exists {
			return Ok(0);
		}
		return Err(not_found(catalog_name));
	};

	ensure_droppable(&catalog)?;

	let action = drop_action.unwrap_or_else(|| database.config().default_drop_action());
	if action == DropAction::Restrict && !catalog.is_empty() {
		let dependents: Vec<String> =
			catalog.all_schema_objects().iter().map(|object| object.name().to_string()).collect();
		debug!(blocked_by = dependents.len(), "restricted drop refused");
		return Err(CatalogError::CannotDrop {
			kind: ObjectKind::Catalog,
			name: catalog_name,
			dependents,
		}
		.into());
	}

	database.remove_catalog(session.id(), &catalog)?;
	Ok(0)
}

#[instrument(name = "engine::command::drop_all_catalog", level = "debug", skip(session))]
fn drop_all(session: &Session, catalog_name: String, if_exists: bool) -> crate::Result<u64> {
	session.user().check_admin()?;
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();

	for catalog in database.catalogs().list() {
		if catalog.name() == catalog_name {
			ensure_droppable(&catalog)?;
			database.remove_catalog(session.id(), &catalog)?;
			return Ok(0);
		}
	}

	if if_exists {
		return Ok(0);
	}
	Err(not_found(catalog_name))
}

fn ensure_droppable(catalog: &Catalog) -> crate::Result<()> {
	if catalog.can_drop() {
		return Ok(());
	}
	warn!(catalog = %catalog.name(), "attempt to drop a system catalog");
	Err(CatalogError::CannotBeDropped {
		kind: ObjectKind::Catalog,
		name: catalog.name().to_string(),
	}
	.into())
}

fn not_found(catalog_name: String) -> strata_type::Error {
	CatalogError::NotFound {
		kind: ObjectKind::Catalog,
		name: catalog_name,
	}
	.into()
}

#[cfg(test)]
mod tests {
	use strata_catalog::SchemaObjectType;
	use strata_core::auth::Capability;

	use super::*;
	use crate::{
		Command, Database, DatabaseConfig,
		test_utils::{
			create_test_catalog, create_test_database, create_test_schema, create_test_session,
			create_test_session_for, create_test_table,
		},
	};

	#[test]
	fn test_drop_missing_catalog() {
		let session = create_test_session();

		for _ in 0..3 {
			let affected =
				session.execute(Command::DropCatalog(DropCatalog::named("NOPE").if_exists())).unwrap();
			assert_eq!(affected, 0);
		}
		assert_eq!(session.database().catalogs().len(), 1);

		let err = session.execute(Command::DropCatalog(DropCatalog::named("NOPE"))).unwrap_err();
		assert_eq!(err.code, "CA_002");
		assert!(err.message.contains("NOPE"));
	}

	#[test]
	fn test_default_catalog_is_protected() {
		let session = create_test_session();

		for action in [DropAction::Restrict, DropAction::Cascade] {
			let err = session
				.execute(Command::DropCatalog(DropCatalog::named("DEFAULT").with_drop_action(action)))
				.unwrap_err();
			assert_eq!(err.code, "CA_003");
		}

		let err = session.execute(Command::DropCatalog(DropCatalog::all("DEFAULT"))).unwrap_err();
		assert_eq!(err.code, "CA_003");
		assert!(session.database().find_catalog("DEFAULT").is_some());
	}

	#[test]
	fn test_drop_empty_catalog_with_restrict() {
		let session = create_test_session();
		create_test_catalog(&session, "C1");

		session.execute(Command::DropCatalog(DropCatalog::named("C1"))).unwrap();

		assert!(session.database().find_catalog("C1").is_none());
		assert!(session.database().script().is_empty());
	}

	#[test]
	fn test_restrict_lists_blocking_objects() {
		let session = create_test_session();
		create_test_catalog(&session, "C1");
		create_test_schema(&session, Some("C1"), "S1");
		create_test_schema(&session, Some("C1"), "S2");
		create_test_table(&session, "C1.S1.T1", &["A"]);

		let err = session
			.execute(Command::DropCatalog(DropCatalog::named("C1").with_drop_action(DropAction::Restrict)))
			.unwrap_err();

		assert_eq!(err.code, "CA_004");
		assert!(err.message.contains("T1"));
		assert!(err.notes.contains(&"blocked by `T1`".to_string()));
		assert!(!err.message.contains("S2"));

		let catalog = session.database().find_catalog("C1").unwrap();
		let expected = catalog.all_schema_objects_of(SchemaObjectType::TableOrView).len();
		assert_eq!(err.notes.len(), expected);
		assert!(catalog.contains_schema("S1"));
	}

	#[test]
	fn test_default_drop_action_comes_from_config() {
		let database = Database::open(DatabaseConfig::new().with_drop_restrict(false)).unwrap();
		let session = database.connect("DBA").unwrap();
		create_test_catalog(&session, "C1");
		create_test_schema(&session, Some("C1"), "S1");

		session.execute(Command::DropCatalog(DropCatalog::named("C1"))).unwrap();
		assert!(database.find_catalog("C1").is_none());
	}

	#[test]
	fn test_cascade_removes_everything() {
		let session = create_test_session();
		create_test_catalog(&session, "C1");
		create_test_schema(&session, Some("C1"), "S1");
		create_test_schema(&session, Some("C1"), "S2");
		create_test_table(&session, "C1.S1.T1", &["A"]);
		let catalog = session.database().find_catalog("C1").unwrap();
		let schema = catalog.find_schema("S1").unwrap();

		session.execute(Command::DropCatalog(DropCatalog::named("C1").with_drop_action(DropAction::Cascade)))
			.unwrap();

		assert!(session.database().find_catalog("C1").is_none());
		assert!(catalog.schemas().is_empty());
		assert!(schema.is_empty());
		assert!(session.database().script().is_empty());
	}

	#[test]
	fn test_drop_requires_admin() {
		let database = create_test_database();
		let admin = database.connect("DBA").unwrap();
		create_test_catalog(&admin, "C1");

		let session = create_test_session_for(&database, "ALICE", &[Capability::CatalogAdmin]);
		let err = session.execute(Command::DropCatalog(DropCatalog::named("C1"))).unwrap_err();
		assert_eq!(err.code, "AUTH_001");

		let err = session.execute(Command::DropCatalog(DropCatalog::all("C1"))).unwrap_err();
		assert_eq!(err.code, "AUTH_001");
		assert!(database.find_catalog("C1").is_some());
	}

	#[test]
	fn test_drop_all_ignores_restrict() {
		let session = create_test_session();
		create_test_catalog(&session, "C1");
		create_test_schema(&session, Some("C1"), "S1");
		create_test_table(&session, "C1.S1.T1", &["A"]);

		let plan = DropCatalog::all("C1").with_drop_action(DropAction::Restrict);
		session.execute(Command::DropCatalog(plan)).unwrap();

		assert!(session.database().find_catalog("C1").is_none());
	}

	#[test]
	fn test_drop_all_missing() {
		let session = create_test_session();

		assert_eq!(session.execute(Command::DropCatalog(DropCatalog::all("NOPE").if_exists())).unwrap(), 0);
		let err = session.execute(Command::DropCatalog(DropCatalog::all("NOPE"))).unwrap_err();
		assert_eq!(err.code, "CA_002");
	}
}

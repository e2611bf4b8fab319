// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::{CatalogError, MetaStore, NamespaceObject, SchemaObject, Synonym};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument};

use crate::{ObjectName, Session};

/// `CREATE SYNONYM [IF NOT EXISTS] [[catalog.]schema.]name FOR [schema.]table`
///
/// The target lives in the synonym's catalog and defaults to the synonym's schema. It must exist when the synonym
/// is created but is resolved again by name on every use.
#[derive(Debug, Clone)]
pub struct CreateSynonym {
	pub synonym: ObjectName,
	pub target_schema: Option<String>,
	pub target_table: String,
	pub if_not_exists: bool,
}

impl CreateSynonym {
	pub fn new(synonym: ObjectName, target_table: impl Into<String>) -> Self {
		Self {
			synonym,
			target_schema: None,
			target_table: target_table.into(),
			if_not_exists: false,
		}
	}

	pub fn in_target_schema(mut self, schema: impl Into<String>) -> Self {
		self.target_schema = Some(schema.into());
		self
	}

	pub fn if_not_exists(mut self) -> Self {
		self.if_not_exists = true;
		self
	}
}

#[instrument(name = "engine::command::create_synonym", level = "debug", skip(session, plan), fields(synonym = %plan.synonym))]
pub(crate) fn create_synonym(session: &Session, plan: CreateSynonym) -> crate::Result<u64> {
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();
	let (catalog, schema) =
		session.resolve_schema(plan.synonym.catalog.as_deref(), plan.synonym.schema.as_deref())?;
	match schema.owner() {
		Some(owner) => session.user().check_owner_or_schema_admin(owner.id())?,
		None => session.user().check_schema_admin()?,
	}

	let target_schema = plan.target_schema.unwrap_or_else(|| schema.name().to_string());
	let target = ObjectName::with_catalog(catalog.name(), target_schema, plan.target_table);

	if schema.contains(&plan.synonym.name) {
		if plan.if_not_exists {
			return Ok(0);
		}
		return Err(CatalogError::AlreadyExists {
			kind: ObjectKind::Synonym,
			name: plan.synonym.to_string(),
		}
		.into());
	}

	let (_, target_object) = session.resolve_table(&target)?;
	if !matches!(target_object, SchemaObject::Table(_)) {
		return Err(CatalogError::NotATable {
			kind: target_object.kind(),
			name: target.to_string(),
		}
		.into());
	}

	let meta: Arc<dyn MetaStore> = database.clone();
	let synonym = Arc::new(Synonym::new(
		&meta,
		schema.id(),
		schema.name(),
		database.allocate_object_id(),
		plan.synonym.name,
		session.user(),
		target.schema.unwrap_or_default(),
		target.name,
	));
	schema.add(session.id(), SchemaObject::Synonym(synonym.clone()))?;

	debug!(id = %synonym.id(), "synonym created");
	Ok(0)
}

#[cfg(test)]
mod tests {
	use strata_type::Value;

	use super::*;
	use crate::{
		Command, Insert,
		test_utils::{create_test_schema, create_test_session, create_test_table},
	};

	#[test]
	fn test_synonym_resolves_to_its_table() {
		let session = create_test_session();
		create_test_schema(&session, None, "S1");
		create_test_table(&session, "S1.T1", &["a"]);
		session.execute(Command::Insert(Insert::new(
			ObjectName::with_schema("S1", "T1"),
			vec![vec![Value::utf8("x")]],
		)))
		.unwrap();

		let plan = CreateSynonym::new(ObjectName::new("ALIAS"), "T1").in_target_schema("S1");
		session.execute(Command::CreateSynonym(plan)).unwrap();

		assert_eq!(session.scan(&ObjectName::new("ALIAS")).unwrap(), vec![vec![Value::utf8("x")]]);
		let catalog = session.database().default_catalog().unwrap();
		assert_eq!(catalog.all_synonyms().len(), 1);
		assert_eq!(
			session.database().script().last().unwrap(),
			"CREATE SYNONYM \"PUBLIC\".\"ALIAS\" FOR \"S1\".\"T1\""
		);
	}

	#[test]
	fn test_synonym_target_must_be_a_table() {
		let session = create_test_session();

		let err = session.execute(Command::CreateSynonym(CreateSynonym::new(ObjectName::new("ALIAS"), "T1")))
			.unwrap_err();
		assert_eq!(err.code, "CA_002");

		let plan = CreateSynonym::new(ObjectName::new("ALIAS"), "TABLES").in_target_schema("INFORMATION_SCHEMA");
		let err = session.execute(Command::CreateSynonym(plan)).unwrap_err();
		assert_eq!(err.code, "CA_009");
	}

	#[test]
	fn test_insert_through_synonym() {
		let session = create_test_session();
		create_test_table(&session, "T1", &["a"]);
		session.execute(Command::CreateSynonym(CreateSynonym::new(ObjectName::new("ALIAS"), "T1"))).unwrap();

		let rows = vec![vec![Value::utf8("y")]];
		session.execute(Command::Insert(Insert::new(ObjectName::new("ALIAS"), rows))).unwrap();

		assert_eq!(session.scan(&ObjectName::new("T1")).unwrap().len(), 1);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::{CatalogError, MetaStore, NamespaceObject, SchemaObject, View};
use strata_core::interface::ObjectKind;
use tracing::{debug, instrument};

use crate::{ObjectName, Session};

/// `CREATE [FORCE] VIEW [IF NOT EXISTS] [[catalog.]schema.]name AS query`
///
/// The query text is stored as given and is not planned here.
#[derive(Debug, Clone)]
pub struct CreateView {
	pub view: ObjectName,
	pub query: String,
	pub if_not_exists: bool,
}

impl CreateView {
	pub fn new(view: ObjectName, query: impl Into<String>) -> Self {
		Self {
			view,
			query: query.into(),
			if_not_exists: false,
		}
	}

	pub fn if_not_exists(mut self) -> Self {
		self.if_not_exists = true;
		self
	}
}

#[instrument(name = "engine::command::create_view", level = "debug", skip(session, plan), fields(view = %plan.view))]
pub(crate) fn create_view(session: &Session, plan: CreateView) -> crate::Result<u64> {
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();
	let (_, schema) = session.resolve_schema(plan.view.catalog.as_deref(), plan.view.schema.as_deref())?;
	match schema.owner() {
		Some(owner) => session.user().check_owner_or_schema_admin(owner.id())?,
		None => session.user().check_schema_admin()?,
	}

	if schema.contains(&plan.view.name) {
		if plan.if_not_exists {
			return Ok(0);
		}
		return Err(CatalogError::AlreadyExists {
			kind: ObjectKind::View,
			name: plan.view.to_string(),
		}
		.into());
	}

	let meta: Arc<dyn MetaStore> = database.clone();
	let view = Arc::new(View::new(
		&meta,
		schema.id(),
		schema.name(),
		database.allocate_object_id(),
		plan.view.name,
		session.user(),
		plan.query,
	));
	schema.add(session.id(), SchemaObject::View(view.clone()))?;

	debug!(id = %view.id(), "view created");
	Ok(0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Command,
		test_utils::{create_test_session, create_test_table},
	};

	#[test]
	fn test_create_view_is_persisted_with_its_query() {
		let session = create_test_session();
		create_test_table(&session, "T1", &["a"]);

		let plan = CreateView::new(ObjectName::new("V1"), "SELECT \"a\" FROM \"PUBLIC\".\"T1\"");
		session.execute(Command::CreateView(plan)).unwrap();

		let script = session.database().script();
		assert_eq!(script.len(), 2);
		assert_eq!(script[1], "CREATE FORCE VIEW \"PUBLIC\".\"V1\" AS SELECT \"a\" FROM \"PUBLIC\".\"T1\"");
	}

	#[test]
	fn test_views_can_not_be_scanned_directly() {
		let session = create_test_session();
		session.execute(Command::CreateView(CreateView::new(ObjectName::new("V1"), "SELECT 1"))).unwrap();

		let err = session.scan(&ObjectName::new("V1")).unwrap_err();
		assert_eq!(err.code, "CA_009");
	}

	#[test]
	fn test_create_existing_view() {
		let session = create_test_session();
		create_test_table(&session, "T1", &["a"]);

		let plan = CreateView::new(ObjectName::new("T1"), "SELECT 1");
		assert_eq!(session.execute(Command::CreateView(plan.clone().if_not_exists())).unwrap(), 0);
		let err = session.execute(Command::CreateView(plan)).unwrap_err();
		assert_eq!(err.code, "CA_001");
	}
}

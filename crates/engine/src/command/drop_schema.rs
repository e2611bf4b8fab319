// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{CatalogError, NamespaceObject};
use strata_core::interface::ObjectKind;
use tracing::{instrument, warn};

use crate::{DropAction, Session};

/// `DROP SCHEMA [IF EXISTS] [catalog.]name [RESTRICT | CASCADE]`
#[derive(Debug, Clone)]
pub struct DropSchema {
	pub catalog_name: Option<String>,
	pub schema_name: String,
	pub if_exists: bool,
	pub drop_action: Option<DropAction>,
}

impl DropSchema {
	pub fn new(schema_name: impl Into<String>) -> Self {
		Self {
			catalog_name: None,
			schema_name: schema_name.into(),
			if_exists: false,
			drop_action: None,
		}
	}

	pub fn in_catalog(mut self, catalog_name: impl Into<String>) -> Self {
		self.catalog_name = Some(catalog_name.into());
		self
	}

	pub fn if_exists(mut self) -> Self {
		self.if_exists = true;
		self
	}

	pub fn with_drop_action(mut self, action: DropAction) -> Self {
		self.drop_action = Some(action);
		self
	}
}

#[instrument(name = "engine::command::drop_schema", level = "debug", skip(session, plan), fields(schema = %plan.schema_name))]
pub(crate) fn drop_schema(session: &Session, plan: DropSchema) -> crate::Result<u64> {
	session.user().check_schema_admin()?;
	session.commit();

	let database = session.database();
	let _meta = session.lock_meta();
	let catalog = session.resolve_catalog(plan.catalog_name.as_deref())?;

	let Some(schema) = catalog.find_schema(&plan.schema_name) else {
		if plan.if_exists {
			return Ok(0);
		}
		return Err(CatalogError::NotFound {
			kind: ObjectKind::Schema,
			name: plan.schema_name,
		}
		.into());
	};

	if !schema.can_drop() {
		warn!(catalog = %catalog.name(), "attempt to drop a built-in schema");
		return Err(CatalogError::CannotBeDropped {
			kind: ObjectKind::Schema,
			name: plan.schema_name,
		}
		.into());
	}

	let action = plan.drop_action.unwrap_or_else(|| database.config().default_drop_action());
	if action == DropAction::Restrict && !schema.is_empty() {
		let mut objects = Vec::new();
		schema.all(&mut objects);
		return Err(CatalogError::CannotDrop {
			kind: ObjectKind::Schema,
			name: plan.schema_name,
			dependents: objects.iter().map(|object| object.name().to_string()).collect(),
		}
		.into());
	}

	catalog.remove_schema(session.id(), &plan.schema_name)?;
	Ok(0)
}

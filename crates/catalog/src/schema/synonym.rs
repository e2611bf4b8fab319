// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind},
};

use crate::{MetaStore, NamespaceObject, ObjectBase, sql::qualified_name};

/// An alternative name for a table, resolved by name at use time.
#[derive(Debug)]
pub struct Synonym {
	base: ObjectBase,
	schema: ObjectId,
	schema_name: String,
	target_schema: String,
	target_table: String,
}

impl Synonym {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		database: &Arc<dyn MetaStore>,
		schema: ObjectId,
		schema_name: impl Into<String>,
		id: ObjectId,
		name: impl Into<String>,
		owner: &Arc<User>,
		target_schema: impl Into<String>,
		target_table: impl Into<String>,
	) -> Self {
		Self {
			base: ObjectBase::new(database, id, name, owner),
			schema,
			schema_name: schema_name.into(),
			target_schema: target_schema.into(),
			target_table: target_table.into(),
		}
	}

	pub fn schema_name(&self) -> &str {
		&self.schema_name
	}

	pub fn target_schema(&self) -> &str {
		&self.target_schema
	}

	pub fn target_table(&self) -> &str {
		&self.target_table
	}
}

impl NamespaceObject for Synonym {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::Synonym
	}

	fn parent(&self) -> Option<ObjectId> {
		Some(self.schema)
	}

	fn create_sql(&self) -> Option<String> {
		Some(format!(
			"CREATE SYNONYM {} FOR {}",
			qualified_name(&[&self.schema_name, self.base.name()]),
			qualified_name(&[&self.target_schema, &self.target_table])
		))
	}

	fn drop_sql(&self) -> Option<String> {
		Some(format!("DROP SYNONYM IF EXISTS {}", qualified_name(&[&self.schema_name, self.base.name()])))
	}
}

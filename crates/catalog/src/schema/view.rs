// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind},
};

use crate::{MetaStore, NamespaceObject, ObjectBase, sql::qualified_name};

/// A stored query. The catalog keeps its text; planning it is someone else's job.
#[derive(Debug)]
pub struct View {
	base: ObjectBase,
	schema: ObjectId,
	schema_name: String,
	query: String,
}

impl View {
	pub fn new(
		database: &Arc<dyn MetaStore>,
		schema: ObjectId,
		schema_name: impl Into<String>,
		id: ObjectId,
		name: impl Into<String>,
		owner: &Arc<User>,
		query: impl Into<String>,
	) -> Self {
		Self {
			base: ObjectBase::new(database, id, name, owner),
			schema,
			schema_name: schema_name.into(),
			query: query.into(),
		}
	}

	pub fn schema_name(&self) -> &str {
		&self.schema_name
	}

	pub fn query(&self) -> &str {
		&self.query
	}
}

impl NamespaceObject for View {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::View
	}

	fn parent(&self) -> Option<ObjectId> {
		Some(self.schema)
	}

	fn create_sql(&self) -> Option<String> {
		Some(format!(
			"CREATE FORCE VIEW {} AS {}",
			qualified_name(&[&self.schema_name, self.base.name()]),
			self.query
		))
	}

	fn drop_sql(&self) -> Option<String> {
		Some(format!("DROP VIEW IF EXISTS {} CASCADE", qualified_name(&[&self.schema_name, self.base.name()])))
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Enum-based dispatch over everything a schema can contain.

use std::sync::Arc;

use strata_core::interface::{ObjectId, ObjectKind};

use crate::{NamespaceObject, Synonym, SystemView, Table, View};

/// Coarse object type used when filtering aggregations.
///
/// System views are exposed as a kind of view, so they fall under `TableOrView`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SchemaObjectType {
	TableOrView,
	Synonym,
}

#[derive(Debug, Clone)]
pub enum SchemaObject {
	Table(Arc<Table>),
	View(Arc<View>),
	Synonym(Arc<Synonym>),
	SystemView(Arc<SystemView>),
}

impl SchemaObject {
	pub fn as_object(&self) -> &dyn NamespaceObject {
		match self {
			SchemaObject::Table(table) => table.as_ref(),
			SchemaObject::View(view) => view.as_ref(),
			SchemaObject::Synonym(synonym) => synonym.as_ref(),
			SchemaObject::SystemView(view) => view.as_ref(),
		}
	}

	pub fn id(&self) -> ObjectId {
		self.as_object().id()
	}

	pub fn name(&self) -> &str {
		self.as_object().name()
	}

	pub fn kind(&self) -> ObjectKind {
		self.as_object().kind()
	}

	/// Name of the schema holding this object.
	pub fn schema_name(&self) -> &str {
		match self {
			SchemaObject::Table(table) => table.schema_name(),
			SchemaObject::View(view) => view.schema_name(),
			SchemaObject::Synonym(synonym) => synonym.schema_name(),
			SchemaObject::SystemView(view) => view.schema_name(),
		}
	}

	pub fn object_type(&self) -> SchemaObjectType {
		match self {
			SchemaObject::Synonym(_) => SchemaObjectType::Synonym,
			SchemaObject::Table(_) | SchemaObject::View(_) | SchemaObject::SystemView(_) => {
				SchemaObjectType::TableOrView
			}
		}
	}

	pub fn is_table_or_view(&self) -> bool {
		self.object_type() == SchemaObjectType::TableOrView
	}

	pub fn as_table(&self) -> Option<&Arc<Table>> {
		match self {
			SchemaObject::Table(table) => Some(table),
			_ => None,
		}
	}

	pub fn as_synonym(&self) -> Option<&Arc<Synonym>> {
		match self {
			SchemaObject::Synonym(synonym) => Some(synonym),
			_ => None,
		}
	}

	/// Drop order during a cascade: dependents before what they depend on.
	pub(crate) fn drop_rank(&self) -> u8 {
		match self {
			SchemaObject::Synonym(_) => 0,
			SchemaObject::View(_) => 1,
			SchemaObject::Table(_) => 2,
			SchemaObject::SystemView(_) => 3,
		}
	}
}

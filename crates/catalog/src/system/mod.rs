// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Read only views over the catalog's own metadata, exposed through the information schema.

use std::{
	fmt::{Display, Formatter},
	sync::{Arc, OnceLock},
};

use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind},
};
use strata_type::{Type, Value};

use crate::{
	Catalog, ColumnDef, INFORMATION_SCHEMA_ID, MetaStore, NamespaceObject, ObjectBase, SchemaObject,
	sql::qualified_name,
};

/// Every system view kind, in materialization order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemViewKind {
	Catalogs,
	Schemata,
	Tables,
	Columns,
	Views,
	Synonyms,
	Users,
	Rights,
	Settings,
	Sessions,
}

impl SystemViewKind {
	pub const ALL: [SystemViewKind; 10] = [
		SystemViewKind::Catalogs,
		SystemViewKind::Schemata,
		SystemViewKind::Tables,
		SystemViewKind::Columns,
		SystemViewKind::Views,
		SystemViewKind::Synonyms,
		SystemViewKind::Users,
		SystemViewKind::Rights,
		SystemViewKind::Settings,
		SystemViewKind::Sessions,
	];

	pub fn name(self) -> &'static str {
		match self {
			SystemViewKind::Catalogs => "CATALOGS",
			SystemViewKind::Schemata => "SCHEMATA",
			SystemViewKind::Tables => "TABLES",
			SystemViewKind::Columns => "COLUMNS",
			SystemViewKind::Views => "VIEWS",
			SystemViewKind::Synonyms => "SYNONYMS",
			SystemViewKind::Users => "USERS",
			SystemViewKind::Rights => "RIGHTS",
			SystemViewKind::Settings => "SETTINGS",
			SystemViewKind::Sessions => "SESSIONS",
		}
	}

	fn ordinal(self) -> i32 {
		self as i32
	}

	/// Fixed, negative id. System views are never persisted.
	pub fn object_id(self) -> ObjectId {
		ObjectId(-100 - self.ordinal())
	}

	/// True for kinds whose rows are derived from one catalog alone.
	pub fn is_catalog_scoped(self) -> bool {
		matches!(
			self,
			SystemViewKind::Schemata
				| SystemViewKind::Tables
				| SystemViewKind::Columns
				| SystemViewKind::Views
				| SystemViewKind::Synonyms
		)
	}

	pub fn columns(self) -> &'static [ColumnDef] {
		static INSTANCE: OnceLock<Vec<Vec<ColumnDef>>> = OnceLock::new();

		let all = INSTANCE.get_or_init(|| {
			SystemViewKind::ALL
				.iter()
				.map(|kind| {
					kind.column_defs()
						.iter()
						.map(|(name, ty)| ColumnDef::new(*name, *ty))
						.collect()
				})
				.collect()
		});
		&all[self as usize]
	}

	fn column_defs(self) -> &'static [(&'static str, Type)] {
		match self {
			SystemViewKind::Catalogs => {
				&[("CATALOG_NAME", Type::Utf8), ("CATALOG_ID", Type::Int4), ("IS_SYSTEM", Type::Boolean)]
			}
			SystemViewKind::Schemata => &[
				("CATALOG_NAME", Type::Utf8),
				("SCHEMA_NAME", Type::Utf8),
				("SCHEMA_OWNER", Type::Utf8),
				("IS_DEFAULT", Type::Boolean),
			],
			SystemViewKind::Tables => &[
				("TABLE_CATALOG", Type::Utf8),
				("TABLE_SCHEMA", Type::Utf8),
				("TABLE_NAME", Type::Utf8),
				("TABLE_TYPE", Type::Utf8),
				("ROW_COUNT_ESTIMATE", Type::Int8),
			],
			SystemViewKind::Columns => &[
				("TABLE_CATALOG", Type::Utf8),
				("TABLE_SCHEMA", Type::Utf8),
				("TABLE_NAME", Type::Utf8),
				("COLUMN_NAME", Type::Utf8),
				("ORDINAL_POSITION", Type::Int4),
				("IS_NULLABLE", Type::Boolean),
				("DATA_TYPE", Type::Utf8),
			],
			SystemViewKind::Views => &[
				("TABLE_CATALOG", Type::Utf8),
				("TABLE_SCHEMA", Type::Utf8),
				("TABLE_NAME", Type::Utf8),
				("VIEW_DEFINITION", Type::Utf8),
			],
			SystemViewKind::Synonyms => &[
				("SYNONYM_CATALOG", Type::Utf8),
				("SYNONYM_SCHEMA", Type::Utf8),
				("SYNONYM_NAME", Type::Utf8),
				("SYNONYM_FOR_SCHEMA", Type::Utf8),
				("SYNONYM_FOR", Type::Utf8),
			],
			SystemViewKind::Users => &[("USER_NAME", Type::Utf8), ("IS_ADMIN", Type::Boolean)],
			SystemViewKind::Rights => &[("GRANTEE", Type::Utf8), ("PRIVILEGE_TYPE", Type::Utf8)],
			SystemViewKind::Settings => &[("SETTING_NAME", Type::Utf8), ("SETTING_VALUE", Type::Utf8)],
			SystemViewKind::Sessions => &[
				("SESSION_ID", Type::Int8),
				("USER_NAME", Type::Utf8),
				("IS_IN_TRANSACTION", Type::Boolean),
			],
		}
	}
}

impl Display for SystemViewKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// One materialized system view instance, owned by a catalog's information schema.
#[derive(Debug)]
pub struct SystemView {
	base: ObjectBase,
	kind: SystemViewKind,
	schema_name: String,
}

impl SystemView {
	pub fn new(
		database: &Arc<dyn MetaStore>,
		schema_name: impl Into<String>,
		owner: &Arc<User>,
		kind: SystemViewKind,
	) -> Self {
		let name = database.sys_identifier(kind.name());
		Self {
			base: ObjectBase::new(database, kind.object_id(), name, owner),
			kind,
			schema_name: schema_name.into(),
		}
	}

	pub fn view_kind(&self) -> SystemViewKind {
		self.kind
	}

	pub fn schema_name(&self) -> &str {
		&self.schema_name
	}

	pub fn columns(&self) -> &'static [ColumnDef] {
		self.kind.columns()
	}

	/// Rows of a catalog scoped view computed from `catalog`. Kinds describing the whole database are filled in
	/// by the database and yield nothing here.
	pub fn rows(&self, catalog: &Catalog) -> Vec<Vec<Value>> {
		let mut rows = Vec::new();
		if !self.kind.is_catalog_scoped() {
			return rows;
		}
		let catalog_name = Value::utf8(catalog.name());

		match self.kind {
			SystemViewKind::Schemata => {
				for schema in catalog.all_schemas() {
					let owner = schema.owner().map(|user| user.name().to_string()).unwrap_or_default();
					rows.push(vec![
						catalog_name.clone(),
						Value::utf8(schema.name()),
						Value::utf8(owner),
						Value::Boolean(schema.id() == crate::MAIN_SCHEMA_ID),
					]);
				}
			}
			SystemViewKind::Tables => {
				for object in catalog.all_tables_and_views(true) {
					let (table_type, estimate) = match &object {
						SchemaObject::Table(table) => ("BASE TABLE", Value::Int8(table.row_count() as i64)),
						SchemaObject::View(_) => ("VIEW", Value::Undefined),
						SchemaObject::SystemView(_) => ("SYSTEM VIEW", Value::Undefined),
						SchemaObject::Synonym(_) => continue,
					};
					rows.push(vec![
						catalog_name.clone(),
						Value::utf8(object.schema_name()),
						Value::utf8(object.name()),
						Value::utf8(table_type),
						estimate,
					]);
				}
			}
			SystemViewKind::Columns => {
				for object in catalog.all_tables_and_views(true) {
					let columns = match &object {
						SchemaObject::Table(table) => table.columns(),
						SchemaObject::SystemView(view) => view.columns(),
						_ => continue,
					};
					let schema_name = object.schema_name();
					for (position, column) in columns.iter().enumerate() {
						rows.push(vec![
							catalog_name.clone(),
							Value::utf8(schema_name),
							Value::utf8(object.name()),
							Value::utf8(column.name.clone()),
							Value::Int4(position as i32 + 1),
							Value::Boolean(column.nullable),
							Value::utf8(column.ty.to_string()),
						]);
					}
				}
			}
			SystemViewKind::Views => {
				for object in catalog.all_tables_and_views(false) {
					if let SchemaObject::View(view) = &object {
						rows.push(vec![
							catalog_name.clone(),
							Value::utf8(object.schema_name()),
							Value::utf8(view.name()),
							Value::utf8(view.query()),
						]);
					}
				}
			}
			SystemViewKind::Synonyms => {
				for synonym in catalog.all_synonyms() {
					rows.push(vec![
						catalog_name.clone(),
						Value::utf8(synonym.schema_name()),
						Value::utf8(synonym.name()),
						Value::utf8(synonym.target_schema()),
						Value::utf8(synonym.target_table()),
					]);
				}
			}
			_ => {}
		}
		rows
	}
}

impl NamespaceObject for SystemView {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::SystemView
	}

	fn parent(&self) -> Option<ObjectId> {
		Some(INFORMATION_SCHEMA_ID)
	}

	fn create_sql(&self) -> Option<String> {
		None
	}

	fn drop_sql(&self) -> Option<String> {
		None
	}

	fn sql_name(&self) -> String {
		qualified_name(&[&self.schema_name, self.base.name()])
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use strata_core::interface::SessionId;

	use super::*;
	use crate::test_utils::{TestMetaStore, test_catalog, test_schema_in, test_synonym_in, test_table_in, test_view_in};

	#[test]
	fn test_ids_are_negative_and_distinct() {
		let ids: HashSet<_> = SystemViewKind::ALL.iter().map(|kind| kind.object_id()).collect();
		assert_eq!(ids.len(), SystemViewKind::ALL.len());
		assert!(ids.iter().all(|id| !id.is_persistent()));
		assert_eq!(SystemViewKind::Catalogs.object_id(), ObjectId(-100));
		assert_eq!(SystemViewKind::Sessions.object_id(), ObjectId(-109));
	}

	#[test]
	fn test_columns_are_static() {
		let first = SystemViewKind::Tables.columns();
		let second = SystemViewKind::Tables.columns();
		assert!(std::ptr::eq(first, second));
		assert_eq!(first[2].name, "TABLE_NAME");
	}

	#[test]
	fn test_system_view_has_no_sql() {
		let store = TestMetaStore::new();
		let database: Arc<dyn MetaStore> = store.clone();
		let view = SystemView::new(&database, "INFORMATION_SCHEMA", &store.system_user(), SystemViewKind::Users);

		assert_eq!(view.name(), "USERS");
		assert_eq!(view.create_sql(), None);
		assert_eq!(view.drop_sql(), None);
		assert_eq!(view.sql_name(), "\"INFORMATION_SCHEMA\".\"USERS\"");
	}

	#[test]
	fn test_catalog_scoped_rows() {
		let store = TestMetaStore::new();
		let catalog = test_catalog(&store, 7, "C1");
		let schema = test_schema_in(&store, &catalog, 8, "S1");
		catalog.add_schema(SessionId(1), schema.clone()).unwrap();
		let table = test_table_in(&store, &schema, 9, "T1", vec![ColumnDef::new("A", Type::Int4)]);
		schema.add(SessionId(1), SchemaObject::Table(table)).unwrap();
		schema.add(SessionId(1), SchemaObject::View(test_view_in(&store, &schema, 10, "V1", "SELECT 1"))).unwrap();
		schema.add(SessionId(1), SchemaObject::Synonym(test_synonym_in(&store, &schema, 11, "ALIAS", "T1")))
			.unwrap();

		let database: Arc<dyn MetaStore> = store.clone();
		let view = |kind| SystemView::new(&database, "INFORMATION_SCHEMA", &store.system_user(), kind);

		let views = view(SystemViewKind::Views).rows(&catalog);
		assert_eq!(
			views,
			vec![vec![Value::utf8("C1"), Value::utf8("S1"), Value::utf8("V1"), Value::utf8("SELECT 1")]]
		);

		let synonyms = view(SystemViewKind::Synonyms).rows(&catalog);
		assert_eq!(synonyms[0][2], Value::utf8("ALIAS"));
		assert_eq!(synonyms[0][4], Value::utf8("T1"));

		let tables = view(SystemViewKind::Tables).rows(&catalog);
		let base_tables: Vec<_> = tables.iter().filter(|row| row[3] == Value::utf8("BASE TABLE")).collect();
		assert_eq!(base_tables.len(), 1);
		assert_eq!(tables.len(), 2 + SystemViewKind::ALL.len());

		let schemata = view(SystemViewKind::Schemata).rows(&catalog);
		assert_eq!(schemata.len(), 3);
	}

	#[test]
	fn test_database_wide_kinds_have_no_catalog_rows() {
		let store = TestMetaStore::new();
		let catalog = test_catalog(&store, 7, "C1");
		let database: Arc<dyn MetaStore> = store.clone();

		for kind in [SystemViewKind::Catalogs, SystemViewKind::Users, SystemViewKind::Sessions] {
			assert!(!kind.is_catalog_scoped());
			let view = SystemView::new(&database, "INFORMATION_SCHEMA", &store.system_user(), kind);
			assert!(view.rows(&catalog).is_empty());
		}
	}
}

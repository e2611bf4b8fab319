// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use parking_lot::RwLock;
use strata_core::{
	auth::User,
	interface::{ObjectId, ObjectKind},
};
use strata_type::{Type, Value};

use crate::{
	CatalogError, MetaStore, NamespaceObject, ObjectBase,
	sql::{qualified_name, quote_identifier},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
	pub nullable: bool,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			nullable: true,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}
}

/// Table creation specification
#[derive(Debug, Clone)]
pub struct TableToCreate {
	pub id: ObjectId,
	pub name: String,
	pub columns: Vec<ColumnDef>,
	pub engine: Option<String>,
	pub engine_params: Vec<String>,
}

/// A base table. Rows are held in memory; the storage engine proper is out of reach of the catalog.
#[derive(Debug)]
pub struct Table {
	base: ObjectBase,
	schema: ObjectId,
	schema_name: String,
	columns: Vec<ColumnDef>,
	engine: Option<String>,
	engine_params: Vec<String>,
	rows: RwLock<Vec<Vec<Value>>>,
}

impl Table {
	pub fn new(
		database: &Arc<dyn MetaStore>,
		schema: ObjectId,
		schema_name: impl Into<String>,
		owner: &Arc<User>,
		to_create: TableToCreate,
	) -> Self {
		Self {
			base: ObjectBase::new(database, to_create.id, to_create.name, owner),
			schema,
			schema_name: schema_name.into(),
			columns: to_create.columns,
			engine: to_create.engine,
			engine_params: to_create.engine_params,
			rows: RwLock::new(Vec::new()),
		}
	}

	pub fn schema_id(&self) -> ObjectId {
		self.schema
	}

	pub fn schema_name(&self) -> &str {
		&self.schema_name
	}

	pub fn columns(&self) -> &[ColumnDef] {
		&self.columns
	}

	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name == name)
	}

	pub fn engine(&self) -> Option<&str> {
		self.engine.as_deref()
	}

	pub fn engine_params(&self) -> &[String] {
		&self.engine_params
	}

	pub fn insert(&self, row: Vec<Value>) -> crate::Result<()> {
		self.validate(&row)?;
		self.rows.write().push(row);
		Ok(())
	}

	/// Appends every row or none of them.
	pub fn insert_all(&self, rows: Vec<Vec<Value>>) -> crate::Result<usize> {
		for row in &rows {
			self.validate(row)?;
		}
		let count = rows.len();
		self.rows.write().extend(rows);
		Ok(count)
	}

	fn validate(&self, row: &[Value]) -> crate::Result<()> {
		if row.len() != self.columns.len() {
			return Err(CatalogError::ColumnCountMismatch {
				table: self.base.name().to_string(),
				expected: self.columns.len(),
				actual: row.len(),
			}
			.into());
		}

		for (column, value) in self.columns.iter().zip(row.iter()) {
			match value.get_type() {
				None if !column.nullable => {
					return Err(CatalogError::NullNotAllowed {
						table: self.base.name().to_string(),
						column: column.name.clone(),
					}
					.into());
				}
				Some(actual) if actual != column.ty => {
					return Err(CatalogError::TypeMismatch {
						table: self.base.name().to_string(),
						column: column.name.clone(),
						expected: column.ty,
						actual,
					}
					.into());
				}
				_ => {}
			}
		}
		Ok(())
	}

	pub fn scan(&self) -> Vec<Vec<Value>> {
		self.rows.read().clone()
	}

	pub fn row_count(&self) -> usize {
		self.rows.read().len()
	}

	/// Frees the rows held by this table.
	pub(crate) fn truncate(&self) {
		self.rows.write().clear();
	}
}

impl NamespaceObject for Table {
	fn base(&self) -> &ObjectBase {
		&self.base
	}

	fn kind(&self) -> ObjectKind {
		ObjectKind::Table
	}

	fn parent(&self) -> Option<ObjectId> {
		Some(self.schema)
	}

	fn create_sql(&self) -> Option<String> {
		let columns = self
			.columns
			.iter()
			.map(|column| {
				let mut sql = format!("{} {}", quote_identifier(&column.name), column.ty);
				if !column.nullable {
					sql.push_str(" NOT NULL");
				}
				sql
			})
			.collect::<Vec<_>>()
			.join(", ");

		let mut sql =
			format!("CREATE TABLE {}({})", qualified_name(&[&self.schema_name, self.base.name()]), columns);

		if let Some(engine) = &self.engine {
			sql.push_str(" ENGINE ");
			sql.push_str(&quote_identifier(engine));
		}
		if !self.engine_params.is_empty() {
			let params = self.engine_params.iter().map(|p| quote_identifier(p)).collect::<Vec<_>>().join(", ");
			sql.push_str(" WITH ");
			sql.push_str(&params);
		}
		Some(sql)
	}

	fn drop_sql(&self) -> Option<String> {
		Some(format!("DROP TABLE IF EXISTS {} CASCADE", qualified_name(&[&self.schema_name, self.base.name()])))
	}
}

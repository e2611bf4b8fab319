// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Statement level operations. Each command is built once by the parser, executed once by a session and reports
//! the number of affected rows, which is always zero for DDL.

use std::fmt::{Display, Formatter};

use create_catalog::CreateCatalog;
use create_schema::CreateSchema;
use create_synonym::CreateSynonym;
use create_table::CreateTable;
use create_view::CreateView;
use drop_catalog::DropCatalog;
use drop_schema::DropSchema;
use insert::Insert;
use strata_catalog::sql::quote_identifier;

pub mod create_catalog;
pub mod create_schema;
pub mod create_synonym;
pub mod create_table;
pub mod create_view;
pub mod drop_catalog;
pub mod drop_schema;
pub mod insert;

#[derive(Debug, Clone)]
pub enum Command {
	CreateCatalog(CreateCatalog),
	DropCatalog(DropCatalog),
	CreateSchema(CreateSchema),
	DropSchema(DropSchema),
	CreateTable(CreateTable),
	CreateView(CreateView),
	CreateSynonym(CreateSynonym),
	Insert(Insert),
}

impl Command {
	pub fn is_ddl(&self) -> bool {
		!matches!(self, Command::Insert(_))
	}
}

/// What a DROP does with a non-empty target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DropAction {
	Restrict,
	Cascade,
}

/// A possibly qualified `[[catalog.]schema.]name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
	pub catalog: Option<String>,
	pub schema: Option<String>,
	pub name: String,
}

impl ObjectName {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			catalog: None,
			schema: None,
			name: name.into(),
		}
	}

	pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			catalog: None,
			schema: Some(schema.into()),
			name: name.into(),
		}
	}

	pub fn with_catalog(catalog: impl Into<String>, schema: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			catalog: Some(catalog.into()),
			schema: Some(schema.into()),
			name: name.into(),
		}
	}

	/// Splits a dotted name. Returns `None` for empty parts or more than three parts.
	pub fn parse(text: &str) -> Option<Self> {
		let parts: Vec<&str> = text.split('.').collect();
		if parts.iter().any(|part| part.is_empty()) {
			return None;
		}
		match parts.as_slice() {
			[name] => Some(Self::new(*name)),
			[schema, name] => Some(Self::with_schema(*schema, *name)),
			[catalog, schema, name] => Some(Self::with_catalog(*catalog, *schema, *name)),
			_ => None,
		}
	}
}

impl Display for ObjectName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(catalog) = &self.catalog {
			write!(f, "{}.", quote_identifier(catalog))?;
		}
		if let Some(schema) = &self.schema {
			write!(f, "{}.", quote_identifier(schema))?;
		}
		f.write_str(&quote_identifier(&self.name))
	}
}

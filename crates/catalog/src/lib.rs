// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use catalog::Catalog;
pub use error::CatalogError;
pub use meta::{MetaRecord, MetaStore};
pub use object::{NamespaceObject, ObjectBase};
pub use registry::CatalogRegistry;
pub use schema::{
	Schema,
	object::{SchemaObject, SchemaObjectType},
	synonym::Synonym,
	table::{ColumnDef, Table, TableToCreate},
	view::View,
};
pub use system::{SystemView, SystemViewKind};

pub mod catalog;
pub mod error;
pub mod meta;
pub mod object;
pub mod registry;
pub mod schema;
pub mod sql;
pub mod system;
pub mod test_utils;

pub type Result<T> = std::result::Result<T, strata_type::Error>;

/// Fixed id of the default schema every catalog carries.
pub const MAIN_SCHEMA_ID: strata_core::interface::ObjectId = strata_core::interface::ObjectId(0);
/// Fixed id of the information schema every catalog carries.
pub const INFORMATION_SCHEMA_ID: strata_core::interface::ObjectId = strata_core::interface::ObjectId(-1);

pub const MAIN_SCHEMA_NAME: &str = "PUBLIC";
pub const INFORMATION_SCHEMA_NAME: &str = "INFORMATION_SCHEMA";

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_catalog::ColumnDef;
use strata_core::auth::{Capability, User};
use strata_type::Type;

use crate::{
	Command, CreateCatalog, CreateSchema, CreateTable, Database, DatabaseConfig, ObjectName, Session,
};

pub fn create_test_database() -> Arc<Database> {
	Database::open(DatabaseConfig::default()).unwrap()
}

/// A session of the built-in admin on a fresh database.
pub fn create_test_session() -> Session {
	create_test_database().connect("DBA").unwrap()
}

/// A session for `user`, created on first use with the given grants.
pub fn create_test_session_for(database: &Arc<Database>, user: &str, grants: &[Capability]) -> Session {
	let user: Arc<User> = match database.find_user(user) {
		Some(existing) => existing,
		None => database.create_user(user, false).unwrap(),
	};
	for capability in grants {
		user.grant(*capability);
	}
	database.connect(user.name()).unwrap()
}

pub fn create_test_catalog(session: &Session, name: &str) {
	session.execute(Command::CreateCatalog(CreateCatalog::new(name))).unwrap();
}

pub fn create_test_schema(session: &Session, catalog: Option<&str>, name: &str) {
	let mut plan = CreateSchema::new(name);
	plan.catalog_name = catalog.map(str::to_string);
	session.execute(Command::CreateSchema(plan)).unwrap();
}

/// Creates a table with one nullable VARCHAR column per entry of `columns`.
pub fn create_test_table(session: &Session, table: &str, columns: &[&str]) {
	let name = ObjectName::parse(table).unwrap();
	let columns = columns.iter().map(|column| ColumnDef::new(*column, Type::Utf8)).collect();
	session.execute(Command::CreateTable(CreateTable::new(name, columns))).unwrap();
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_catalog::{CatalogError, SchemaObject};
use strata_type::Value;
use tracing::instrument;

use crate::{ObjectName, Session};

/// `INSERT INTO table VALUES (...), (...)`
#[derive(Debug, Clone)]
pub struct Insert {
	pub table: ObjectName,
	pub rows: Vec<Vec<Value>>,
}

impl Insert {
	pub fn new(table: ObjectName, rows: Vec<Vec<Value>>) -> Self {
		Self {
			table,
			rows,
		}
	}
}

/// Opens the session's implicit transaction; rows are all inserted or none is.
#[instrument(name = "engine::command::insert", level = "debug", skip(session, plan), fields(table = %plan.table, rows = plan.rows.len()))]
pub(crate) fn insert(session: &Session, plan: Insert) -> crate::Result<u64> {
	let (_, object) = session.resolve_table(&plan.table)?;
	let table = match object {
		SchemaObject::Table(table) => table,
		other => {
			return Err(CatalogError::NotATable {
				kind: other.kind(),
				name: plan.table.to_string(),
			}
			.into());
		}
	};

	session.begin();
	let inserted = table.insert_all(plan.rows)?;
	Ok(inserted as u64)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Command,
		test_utils::{create_test_session, create_test_table},
	};

	#[test]
	fn test_insert_rows() {
		let session = create_test_session();
		create_test_table(&session, "table1", &["c"]);

		let rows = vec![vec![Value::utf8("hello")], vec![Value::utf8("world")]];
		let affected = session.execute(Command::Insert(Insert::new(ObjectName::new("table1"), rows))).unwrap();

		assert_eq!(affected, 2);
		assert!(session.in_transaction());
		assert_eq!(session.scan(&ObjectName::new("table1")).unwrap().len(), 2);
	}

	#[test]
	fn test_insert_arity_mismatch_inserts_nothing() {
		let session = create_test_session();
		create_test_table(&session, "table1", &["c"]);

		let rows = vec![vec![Value::utf8("ok")], vec![Value::utf8("a"), Value::utf8("b")]];
		let err = session.execute(Command::Insert(Insert::new(ObjectName::new("table1"), rows))).unwrap_err();

		assert_eq!(err.code, "CA_006");
		assert!(session.scan(&ObjectName::new("table1")).unwrap().is_empty());
	}

	#[test]
	fn test_insert_into_system_view_fails() {
		let session = create_test_session();
		let name = ObjectName::with_schema("INFORMATION_SCHEMA", "TABLES");

		let err = session.execute(Command::Insert(Insert::new(name, vec![]))).unwrap_err();
		assert_eq!(err.code, "CA_009");
	}

	#[test]
	fn test_insert_into_missing_table() {
		let session = create_test_session();
		let err = session.execute(Command::Insert(Insert::new(ObjectName::new("nope"), vec![]))).unwrap_err();
		assert_eq!(err.code, "CA_002");
	}
}

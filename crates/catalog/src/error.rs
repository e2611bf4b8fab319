// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::interface::ObjectKind;
use strata_type::{Diagnostic, Error, IntoDiagnostic, Type};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("{kind} `{name}` already exists")]
	AlreadyExists {
		kind: ObjectKind,
		name: String,
	},

	#[error("{kind} `{name}` not found")]
	NotFound {
		kind: ObjectKind,
		name: String,
	},

	#[error("{kind} `{name}` is a system object and can not be dropped")]
	CannotBeDropped {
		kind: ObjectKind,
		name: String,
	},

	#[error("cannot drop {kind} `{name}` because {} depend on it", .dependents.join(", "))]
	CannotDrop {
		kind: ObjectKind,
		name: String,
		dependents: Vec<String>,
	},

	#[error("schema `{name}` is read only")]
	ReadOnlySchema {
		name: String,
	},

	#[error("table `{table}` has {expected} columns but {actual} values were supplied")]
	ColumnCountMismatch {
		table: String,
		expected: usize,
		actual: usize,
	},

	#[error("column `{column}` of table `{table}` expects {expected} but got {actual}")]
	TypeMismatch {
		table: String,
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("column `{column}` of table `{table}` does not accept NULL")]
	NullNotAllowed {
		table: String,
		column: String,
	},

	#[error("{kind} `{name}` is not a base table")]
	NotATable {
		kind: ObjectKind,
		name: String,
	},
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			CatalogError::AlreadyExists {
				kind,
				..
			} => Diagnostic {
				code: "CA_001".to_string(),
				statement: None,
				message,
				label: Some(format!("duplicate {}", kind)),
				help: Some(format!("Choose a different name or use IF NOT EXISTS to skip an existing {}", kind)),
				notes: vec![],
				cause: None,
			},
			CatalogError::NotFound {
				kind,
				..
			} => Diagnostic {
				code: "CA_002".to_string(),
				statement: None,
				message,
				label: Some(format!("unknown {}", kind)),
				help: Some(format!("Check the spelling or use IF EXISTS to ignore a missing {}", kind)),
				notes: vec![],
				cause: None,
			},
			CatalogError::CannotBeDropped {
				..
			} => Diagnostic {
				code: "CA_003".to_string(),
				statement: None,
				message,
				label: Some("protected system object".to_string()),
				help: Some("System objects exist for the lifetime of the database".to_string()),
				notes: vec![],
				cause: None,
			},
			CatalogError::CannotDrop {
				kind,
				dependents,
				..
			} => Diagnostic {
				code: "CA_004".to_string(),
				statement: None,
				message,
				label: Some(format!("{} is not empty", kind)),
				help: Some("Drop the listed objects first or use CASCADE".to_string()),
				notes: dependents.into_iter().map(|name| format!("blocked by `{}`", name)).collect(),
				cause: None,
			},
			CatalogError::ReadOnlySchema {
				..
			} => Diagnostic {
				code: "CA_005".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Objects can not be created in the information schema".to_string()),
				notes: vec![],
				cause: None,
			},
			CatalogError::ColumnCountMismatch {
				..
			} => Diagnostic {
				code: "CA_006".to_string(),
				statement: None,
				message,
				label: Some("wrong number of values".to_string()),
				help: Some("Supply exactly one value per column".to_string()),
				notes: vec![],
				cause: None,
			},
			CatalogError::TypeMismatch {
				expected,
				..
			} => Diagnostic {
				code: "CA_007".to_string(),
				statement: None,
				message,
				label: Some("type mismatch".to_string()),
				help: Some(format!("Supply a {} value", expected)),
				notes: vec![],
				cause: None,
			},
			CatalogError::NullNotAllowed {
				..
			} => Diagnostic {
				code: "CA_008".to_string(),
				statement: None,
				message,
				label: None,
				help: Some("Supply a value for every NOT NULL column".to_string()),
				notes: vec![],
				cause: None,
			},
			CatalogError::NotATable {
				kind,
				..
			} => Diagnostic {
				code: "CA_009".to_string(),
				statement: None,
				message,
				label: Some(format!("{} has no stored rows", kind)),
				help: Some("Only base tables accept inserts and direct scans".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<CatalogError> for Error {
	fn from(err: CatalogError) -> Self {
		Error(err.into_diagnostic())
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// A write was attempted against a database opened read only
pub fn database_read_only() -> Diagnostic {
	Diagnostic {
		code: "TXN_001".to_string(),
		statement: None,
		message: "The database is read only".to_string(),
		label: None,
		help: Some("Open the database without the read only setting to modify metadata".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The database was closed while a session still referenced it
pub fn database_closed() -> Diagnostic {
	Diagnostic {
		code: "TXN_002".to_string(),
		statement: None,
		message: "The database is closed".to_string(),
		label: None,
		help: Some("Reopen the database and start a new session".to_string()),
		notes: vec![],
		cause: None,
	}
}
